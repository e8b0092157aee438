//! Trend filter: exponentially weighted moving average.
//!
//! alpha = 2/(length+1), seeded with the first close:
//! ema[0] = close[0], ema[i] = alpha·close[i] + (1-alpha)·ema[i-1].
//! Defined from index 0; there is no warm-up gap, unlike the band.

use crate::domain::candle::Candle;

pub fn calculate_ema(candles: &[Candle], length: usize) -> Vec<f64> {
    let Some(first) = candles.first() else {
        return Vec::new();
    };

    let alpha = 2.0 / (length as f64 + 1.0);
    let mut out = Vec::with_capacity(candles.len());
    let mut ema = first.close;
    out.push(ema);

    for candle in &candles[1..] {
        ema = alpha * candle.close + (1.0 - alpha) * ema;
        out.push(ema);
    }

    out
}
