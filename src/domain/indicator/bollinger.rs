//! Bollinger-style moving average band.
//!
//! Middle: arithmetic mean of the trailing `length` closes.
//! Band: middle ± mult × sample standard deviation (divisor n-1) of the same
//! window. The first `length - 1` rows have no full window and are `None`.
//!
//! Implemented with sliding sum and sum-of-squares accumulators, so the pass
//! stays linear in the number of candles.

use crate::domain::candle::Candle;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BandPoint {
    pub sma: f64,
    pub std_dev: f64,
    pub upper: f64,
    pub lower: f64,
}

pub fn calculate_bollinger(
    candles: &[Candle],
    length: usize,
    mult: f64,
) -> Vec<Option<BandPoint>> {
    // Sample variance is undefined for windows shorter than two closes.
    if length < 2 {
        return vec![None; candles.len()];
    }

    let mut out = Vec::with_capacity(candles.len());
    let mut sum = 0.0;
    let mut sum_sq = 0.0;

    for (i, candle) in candles.iter().enumerate() {
        let close = candle.close;
        sum += close;
        sum_sq += close * close;

        if i >= length {
            let dropped = candles[i - length].close;
            sum -= dropped;
            sum_sq -= dropped * dropped;
        }

        if i + 1 < length {
            out.push(None);
            continue;
        }

        let n = length as f64;
        let sma = sum / n;
        // The subtraction can dip just below zero on constant windows;
        // clamp before the square root.
        let variance = ((sum_sq - sum * sum / n) / (n - 1.0)).max(0.0);
        let std_dev = variance.sqrt();

        out.push(Some(BandPoint {
            sma,
            std_dev,
            upper: sma + mult * std_dev,
            lower: sma - mult * std_dev,
        }));
    }

    out
}
