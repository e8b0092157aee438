//! Sequential simulation engine.
//!
//! A two-state machine folded over the indicator-augmented candle series.
//! The loop-carried state is an explicit [`Position`] value threaded through
//! [`step`]; each step consumes the prior state plus the current and previous
//! candle rows and produces the next state and at most one signal. Nothing
//! outside the fold mutates the position.
//!
//! Processing starts at index 1; index 0 only seeds prior-candle
//! comparisons. A position opened on candle i is not eligible for exit
//! until a later candle, so an entry and an exit never share a candle.

use std::fmt;

use chrono::NaiveDateTime;

use super::candle::{self, Candle};
use super::error::BandtraderError;
use super::indicator::{self, IndicatorSet};
use super::params::StrategyParams;

/// Exclusive position state: cash when flat, an open position when long.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Position {
    Flat {
        balance: f64,
    },
    Long {
        quantity: f64,
        entry_price: f64,
        stop_loss: f64,
    },
}

impl Position {
    pub fn is_long(&self) -> bool {
        matches!(self, Position::Long { .. })
    }

    /// Mark-to-market value: the cash balance when flat, quantity × close
    /// when long.
    pub fn equity(&self, close: f64) -> f64 {
        match *self {
            Position::Flat { balance } => balance,
            Position::Long { quantity, .. } => quantity * close,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SignalKind {
    Buy,
    ExitStopLoss,
    ExitTakeProfit,
}

impl fmt::Display for SignalKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SignalKind::Buy => write!(f, "buy"),
            SignalKind::ExitStopLoss => write!(f, "exit_stop_loss"),
            SignalKind::ExitTakeProfit => write!(f, "exit_take_profit"),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct TradeSignal {
    pub timestamp: NaiveDateTime,
    pub price: f64,
    pub kind: SignalKind,
}

#[derive(Debug, Clone, PartialEq)]
pub struct EquityPoint {
    pub timestamp: NaiveDateTime,
    pub value: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SimulationResult {
    pub signals: Vec<TradeSignal>,
    pub equity: Vec<EquityPoint>,
}

/// All six entry conditions, evaluated on the current and prior candle.
/// Returns false while any consulted band value is still in warm-up.
fn entry_conditions_met(
    prev: &Candle,
    curr: &Candle,
    prev_ind: &IndicatorSet,
    ind: &IndicatorSet,
) -> bool {
    let (Some(lower), Some(prev_lower), Some(upper)) =
        (ind.lower_band, prev_ind.lower_band, ind.upper_band)
    else {
        return false;
    };

    let touches_lower_band = curr.low <= lower || prev.low <= prev_lower;
    let below_trend_or_band = curr.close < ind.trend_ema || curr.close < upper;
    let body_growing = curr.body() > prev.body();
    let volume_rising = curr.volume > prev.volume;

    touches_lower_band
        && below_trend_or_band
        && curr.is_green()
        && prev.is_red()
        && body_growing
        && volume_rising
}

/// One fold step of the state machine.
///
/// Flat: fire the entry when all six conditions hold, deploying the entire
/// balance at the close and fixing the stop at the entry candle's low.
/// Long: stop-loss is checked first and fills at the stop level itself,
/// not the close; otherwise take-profit at or above the rolling mean.
pub fn step(
    state: Position,
    prev: &Candle,
    curr: &Candle,
    prev_ind: &IndicatorSet,
    ind: &IndicatorSet,
) -> (Position, Option<TradeSignal>) {
    match state {
        Position::Flat { balance } => {
            if entry_conditions_met(prev, curr, prev_ind, ind) {
                let entry_price = curr.close;
                let next = Position::Long {
                    quantity: balance / entry_price,
                    entry_price,
                    stop_loss: curr.low,
                };
                let signal = TradeSignal {
                    timestamp: curr.timestamp,
                    price: entry_price,
                    kind: SignalKind::Buy,
                };
                (next, Some(signal))
            } else {
                (state, None)
            }
        }
        Position::Long {
            quantity,
            stop_loss,
            ..
        } => {
            if curr.low < stop_loss {
                let signal = TradeSignal {
                    timestamp: curr.timestamp,
                    price: stop_loss,
                    kind: SignalKind::ExitStopLoss,
                };
                (
                    Position::Flat {
                        balance: quantity * stop_loss,
                    },
                    Some(signal),
                )
            } else if ind.sma.is_some_and(|sma| curr.close >= sma) {
                let signal = TradeSignal {
                    timestamp: curr.timestamp,
                    price: curr.close,
                    kind: SignalKind::ExitTakeProfit,
                };
                (
                    Position::Flat {
                        balance: quantity * curr.close,
                    },
                    Some(signal),
                )
            } else {
                (state, None)
            }
        }
    }
}

/// Fold the simulation over a candle series and its precomputed indicator
/// rows. The input is validated structurally first; any violation aborts
/// the run with no partial output. The equity curve has exactly one point
/// per candle, starting at `initial_balance`.
pub fn run_simulation(
    candles: &[Candle],
    indicators: &[IndicatorSet],
    initial_balance: f64,
) -> Result<SimulationResult, BandtraderError> {
    candle::validate_series(candles)?;
    if candles.len() != indicators.len() {
        return Err(BandtraderError::SeriesLengthMismatch {
            candles: candles.len(),
            indicators: indicators.len(),
        });
    }

    let mut signals = Vec::new();
    let mut equity = Vec::with_capacity(candles.len());
    let mut state = Position::Flat {
        balance: initial_balance,
    };

    if let Some(first) = candles.first() {
        equity.push(EquityPoint {
            timestamp: first.timestamp,
            value: initial_balance,
        });
    }

    for i in 1..candles.len() {
        let (next, signal) = step(
            state,
            &candles[i - 1],
            &candles[i],
            &indicators[i - 1],
            &indicators[i],
        );
        state = next;
        if let Some(signal) = signal {
            signals.push(signal);
        }
        equity.push(EquityPoint {
            timestamp: candles[i].timestamp,
            value: state.equity(candles[i].close),
        });
    }

    Ok(SimulationResult { signals, equity })
}

/// Convenience pipeline: validate parameters, compute indicators, simulate.
pub fn run(
    candles: &[Candle],
    params: &StrategyParams,
) -> Result<SimulationResult, BandtraderError> {
    params.validate()?;
    let indicators = indicator::compute_indicators(candles, params);
    run_simulation(candles, &indicators, params.initial_balance)
}
