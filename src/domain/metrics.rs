//! Summary statistics over a completed simulation.

use super::simulation::{EquityPoint, SignalKind, SimulationResult};

#[derive(Debug, Clone, PartialEq)]
pub struct Metrics {
    pub final_equity: f64,
    pub total_return: f64,
    pub max_drawdown: f64,
    pub total_trades: usize,
    pub trades_won: usize,
    pub trades_lost: usize,
    pub trades_breakeven: usize,
    pub win_rate: f64,
    pub profit_factor: f64,
}

impl Metrics {
    pub fn compute(result: &SimulationResult, initial_balance: f64) -> Self {
        let final_equity = result
            .equity
            .last()
            .map(|p| p.value)
            .unwrap_or(initial_balance);

        let total_return = if initial_balance > 0.0 {
            (final_equity - initial_balance) / initial_balance
        } else {
            0.0
        };

        let max_drawdown = compute_drawdown(&result.equity);

        // Full-balance sizing: every Buy..Exit round trip scales the whole
        // balance by exit_price / entry_price.
        let mut balance = initial_balance;
        let mut entry: Option<f64> = None;
        let mut trades_won = 0usize;
        let mut trades_lost = 0usize;
        let mut trades_breakeven = 0usize;
        let mut total_wins = 0.0_f64;
        let mut total_losses = 0.0_f64;

        for signal in &result.signals {
            match signal.kind {
                SignalKind::Buy => entry = Some(signal.price),
                SignalKind::ExitStopLoss | SignalKind::ExitTakeProfit => {
                    if let Some(entry_price) = entry.take() {
                        let next_balance = balance * signal.price / entry_price;
                        let pnl = next_balance - balance;
                        if pnl > 0.0 {
                            trades_won += 1;
                            total_wins += pnl;
                        } else if pnl < 0.0 {
                            trades_lost += 1;
                            total_losses += -pnl;
                        } else {
                            trades_breakeven += 1;
                        }
                        balance = next_balance;
                    }
                }
            }
        }

        let total_trades = trades_won + trades_lost + trades_breakeven;
        let win_rate = if total_trades > 0 {
            trades_won as f64 / total_trades as f64
        } else {
            0.0
        };

        let profit_factor = if total_losses > 0.0 {
            total_wins / total_losses
        } else if total_wins > 0.0 {
            f64::INFINITY
        } else {
            0.0
        };

        Metrics {
            final_equity,
            total_return,
            max_drawdown,
            total_trades,
            trades_won,
            trades_lost,
            trades_breakeven,
            win_rate,
            profit_factor,
        }
    }
}

/// Largest peak-to-trough decline as a fraction of the peak.
fn compute_drawdown(equity: &[EquityPoint]) -> f64 {
    let Some(first) = equity.first() else {
        return 0.0;
    };

    let mut peak = first.value;
    let mut max_dd = 0.0_f64;

    for point in equity {
        if point.value > peak {
            peak = point.value;
        } else if peak > 0.0 {
            let dd = (peak - point.value) / peak;
            if dd > max_dd {
                max_dd = dd;
            }
        }
    }

    max_dd
}
