//! Candle (OHLCV) representation and structural input validation.

use chrono::NaiveDateTime;

use super::error::BandtraderError;

#[derive(Debug, Clone, PartialEq)]
pub struct Candle {
    pub timestamp: NaiveDateTime,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: f64,
}

impl Candle {
    /// |close - open|
    pub fn body(&self) -> f64 {
        (self.close - self.open).abs()
    }

    pub fn is_green(&self) -> bool {
        self.close > self.open
    }

    pub fn is_red(&self) -> bool {
        self.close < self.open
    }
}

/// Structural validation of the input series: all prices and the volume must
/// be positive and finite, timestamps strictly increasing. Violations are
/// fatal; no partial result is produced. Gaps between timestamps are
/// tolerated, only ordering is checked.
pub fn validate_series(candles: &[Candle]) -> Result<(), BandtraderError> {
    for (i, candle) in candles.iter().enumerate() {
        for (field, value) in [
            ("open", candle.open),
            ("high", candle.high),
            ("low", candle.low),
            ("close", candle.close),
            ("volume", candle.volume),
        ] {
            if !value.is_finite() || value <= 0.0 {
                return Err(BandtraderError::InvalidCandle {
                    index: i,
                    reason: format!("{} must be positive and finite, got {}", field, value),
                });
            }
        }

        if i > 0 && candle.timestamp <= candles[i - 1].timestamp {
            return Err(BandtraderError::NonMonotonicTimestamp { index: i });
        }
    }

    Ok(())
}
