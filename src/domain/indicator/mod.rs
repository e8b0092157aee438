//! Technical indicator derivation.
//!
//! Each sub-module computes one series from the raw candle sequence in a
//! single forward pass; [`compute_indicators`] zips them into one
//! index-aligned row per candle. Rolling-window values without a full
//! window are `None`, never a silent zero.

pub mod bollinger;
pub mod ema;
pub mod rsi;

use super::candle::Candle;
use super::params::StrategyParams;

/// Per-candle indicator row, index-aligned with the input candles.
#[derive(Debug, Clone, PartialEq)]
pub struct IndicatorSet {
    pub sma: Option<f64>,
    pub std_dev: Option<f64>,
    pub upper_band: Option<f64>,
    pub lower_band: Option<f64>,
    pub trend_ema: f64,
    pub rsi: f64,
}

/// Compute all indicator series for the candle sequence. The result has the
/// same length as the input; the band block is `None` for the first
/// `bb_length - 1` rows, the EMA and RSI are defined from index 0.
pub fn compute_indicators(candles: &[Candle], params: &StrategyParams) -> Vec<IndicatorSet> {
    let bands = bollinger::calculate_bollinger(candles, params.bb_length, params.bb_mult);
    let emas = ema::calculate_ema(candles, params.ema_length);
    let rsis = rsi::calculate_rsi(candles, params.rsi_length);

    bands
        .into_iter()
        .zip(emas)
        .zip(rsis)
        .map(|((band, trend_ema), rsi)| IndicatorSet {
            sma: band.map(|b| b.sma),
            std_dev: band.map(|b| b.std_dev),
            upper_band: band.map(|b| b.upper),
            lower_band: band.map(|b| b.lower),
            trend_ema,
            rsi,
        })
        .collect()
}
