//! Momentum oscillator (RSI) over rolling gain/loss means.
//!
//! Close deltas are split into gains and losses, then averaged over the
//! trailing `length` window using all available samples near the start of
//! the series; the window shrinks instead of producing a warm-up gap.
//! rsi = 100 - 100/(1 + avg_gain/avg_loss).
//!
//! Degenerate ratios: avg_loss == 0 with avg_gain > 0 saturates to 100.
//! When both averages are zero the ratio is indeterminate and the value is
//! pinned to a neutral 50. Index 0 has no delta and both accumulators are
//! empty, so it falls into the neutral case.

use crate::domain::candle::Candle;

pub fn calculate_rsi(candles: &[Candle], length: usize) -> Vec<f64> {
    if candles.is_empty() {
        return Vec::new();
    }

    let length = length.max(1);

    // gains[0]/losses[0] stay zero: there is no delta at index 0.
    let mut gains = vec![0.0; candles.len()];
    let mut losses = vec![0.0; candles.len()];
    for i in 1..candles.len() {
        let delta = candles[i].close - candles[i - 1].close;
        gains[i] = delta.max(0.0);
        losses[i] = (-delta).max(0.0);
    }

    let mut out = Vec::with_capacity(candles.len());
    let mut gain_sum = 0.0;
    let mut loss_sum = 0.0;

    for i in 0..candles.len() {
        gain_sum += gains[i];
        loss_sum += losses[i];
        if i >= length {
            gain_sum -= gains[i - length];
            loss_sum -= losses[i - length];
        }

        let n = (i + 1).min(length) as f64;
        let avg_gain = gain_sum / n;
        let avg_loss = loss_sum / n;

        let rsi = if avg_loss > 0.0 {
            100.0 - 100.0 / (1.0 + avg_gain / avg_loss)
        } else if avg_gain > 0.0 {
            100.0
        } else {
            50.0
        };
        out.push(rsi);
    }

    out
}
