//! Shared fixtures for integration tests.
#![allow(dead_code)]

use chrono::{Duration, NaiveDate, NaiveDateTime};

use bandtrader::domain::candle::Candle;
use bandtrader::domain::params::StrategyParams;

/// Candle timestamps on a 3-minute grid starting 2024-01-15 10:00.
pub fn ts(i: usize) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2024, 1, 15)
        .unwrap()
        .and_hms_opt(10, 0, 0)
        .unwrap()
        + Duration::minutes(3 * i as i64)
}

pub fn make_candle(i: usize, open: f64, high: f64, low: f64, close: f64, volume: f64) -> Candle {
    Candle {
        timestamp: ts(i),
        open,
        high,
        low,
        close,
        volume,
    }
}

/// Short parameter set so the bands warm up after a single candle.
pub fn short_params() -> StrategyParams {
    StrategyParams {
        bb_length: 2,
        bb_mult: 2.0,
        ema_length: 3,
        rsi_length: 3,
        initial_balance: 100.0,
    }
}

/// Six candles producing exactly one losing round trip:
/// a red dip onto the lower band, a larger green candle on rising volume
/// (entry at 101, stop at its low 94), then a drop through the stop.
/// The last two candles fail the entry conditions, so the run ends flat.
pub fn one_trade_fixture() -> Vec<Candle> {
    vec![
        make_candle(0, 100.0, 101.0, 99.0, 100.0, 1000.0),
        make_candle(1, 100.0, 100.5, 92.0, 96.0, 1000.0),
        make_candle(2, 96.0, 101.5, 94.0, 101.0, 1500.0),
        make_candle(3, 101.0, 102.0, 93.0, 95.0, 1200.0),
        make_candle(4, 95.0, 95.5, 94.0, 94.5, 1100.0),
        make_candle(5, 94.5, 95.0, 94.0, 94.6, 1000.0),
    ]
}
