//! Domain error types.
//!
//! Indicator warm-up is not an error: invalid indicator values suppress rule
//! evaluation in the simulation instead. Only structural input and
//! configuration violations are fatal.

/// Top-level error type for bandtrader.
#[derive(Debug, thiserror::Error)]
pub enum BandtraderError {
    #[error("data error: {reason}")]
    Data { reason: String },

    #[error("config parse error in {file}: {reason}")]
    ConfigParse { file: String, reason: String },

    #[error("invalid config value [{section}] {key}: {reason}")]
    ConfigInvalid {
        section: String,
        key: String,
        reason: String,
    },

    #[error("invalid candle at index {index}: {reason}")]
    InvalidCandle { index: usize, reason: String },

    #[error("non-monotonic timestamp at candle index {index}")]
    NonMonotonicTimestamp { index: usize },

    #[error("series length mismatch: {candles} candles vs {indicators} indicator rows")]
    SeriesLengthMismatch { candles: usize, indicators: usize },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl From<&BandtraderError> for std::process::ExitCode {
    fn from(err: &BandtraderError) -> Self {
        let code: u8 = match err {
            BandtraderError::Io(_) => 1,
            BandtraderError::ConfigParse { .. } | BandtraderError::ConfigInvalid { .. } => 2,
            BandtraderError::Data { .. } => 3,
            BandtraderError::InvalidCandle { .. }
            | BandtraderError::NonMonotonicTimestamp { .. }
            | BandtraderError::SeriesLengthMismatch { .. } => 4,
        };
        std::process::ExitCode::from(code)
    }
}
