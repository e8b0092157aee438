//! Strategy parameters with defaults and validation.

use crate::ports::config_port::ConfigPort;

use super::error::BandtraderError;

#[derive(Debug, Clone, PartialEq)]
pub struct StrategyParams {
    pub bb_length: usize,
    pub bb_mult: f64,
    pub ema_length: usize,
    pub rsi_length: usize,
    pub initial_balance: f64,
}

impl Default for StrategyParams {
    fn default() -> Self {
        StrategyParams {
            bb_length: 20,
            bb_mult: 2.0,
            ema_length: 50,
            rsi_length: 14,
            initial_balance: 100.0,
        }
    }
}

impl StrategyParams {
    /// Read parameters from the `[strategy]` section, keeping the default for
    /// any missing key.
    pub fn from_config(config: &dyn ConfigPort) -> Self {
        let defaults = StrategyParams::default();
        StrategyParams {
            bb_length: read_length(config, "bb_length", defaults.bb_length),
            bb_mult: config.get_double("strategy", "bb_mult", defaults.bb_mult),
            ema_length: read_length(config, "ema_length", defaults.ema_length),
            rsi_length: read_length(config, "rsi_length", defaults.rsi_length),
            initial_balance: config.get_double(
                "strategy",
                "initial_balance",
                defaults.initial_balance,
            ),
        }
    }

    pub fn validate(&self) -> Result<(), BandtraderError> {
        // Sample standard deviation needs at least two closes per window.
        if self.bb_length < 2 {
            return Err(invalid("bb_length", "must be at least 2"));
        }
        if !self.bb_mult.is_finite() || self.bb_mult <= 0.0 {
            return Err(invalid("bb_mult", "must be positive and finite"));
        }
        if self.ema_length < 1 {
            return Err(invalid("ema_length", "must be at least 1"));
        }
        if self.rsi_length < 1 {
            return Err(invalid("rsi_length", "must be at least 1"));
        }
        if !self.initial_balance.is_finite() || self.initial_balance <= 0.0 {
            return Err(invalid("initial_balance", "must be positive and finite"));
        }
        Ok(())
    }
}

// Negative config values become zero and fail `validate()` instead of
// wrapping through the unsigned cast.
fn read_length(config: &dyn ConfigPort, key: &str, default: usize) -> usize {
    let value = config.get_int("strategy", key, default as i64);
    usize::try_from(value).unwrap_or(0)
}

fn invalid(key: &str, reason: &str) -> BandtraderError {
    BandtraderError::ConfigInvalid {
        section: "strategy".into(),
        key: key.into(),
        reason: reason.into(),
    }
}
