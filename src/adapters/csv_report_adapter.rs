//! CSV report adapter.
//!
//! Writes `signals.csv` and `equity.csv` into a directory for the external
//! reporting/visualization collaborator. The summary metrics go into
//! `summary.csv` as key/value rows.

use std::fs;
use std::path::{Path, PathBuf};

use crate::domain::error::BandtraderError;
use crate::domain::metrics::Metrics;
use crate::domain::simulation::SimulationResult;
use crate::ports::report_port::ReportPort;

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

pub struct CsvReportAdapter {
    dir: PathBuf,
}

impl CsvReportAdapter {
    pub fn new(dir: PathBuf) -> Self {
        Self { dir }
    }

    fn write_signals(&self, result: &SimulationResult, path: &Path) -> Result<(), BandtraderError> {
        let mut wtr = csv::Writer::from_path(path).map_err(csv_error)?;
        wtr.write_record(["timestamp", "kind", "price"])
            .map_err(csv_error)?;
        for signal in &result.signals {
            wtr.write_record([
                signal.timestamp.format(TIMESTAMP_FORMAT).to_string(),
                signal.kind.to_string(),
                format!("{}", signal.price),
            ])
            .map_err(csv_error)?;
        }
        wtr.flush()?;
        Ok(())
    }

    fn write_equity(&self, result: &SimulationResult, path: &Path) -> Result<(), BandtraderError> {
        let mut wtr = csv::Writer::from_path(path).map_err(csv_error)?;
        wtr.write_record(["timestamp", "equity"]).map_err(csv_error)?;
        for point in &result.equity {
            wtr.write_record([
                point.timestamp.format(TIMESTAMP_FORMAT).to_string(),
                format!("{}", point.value),
            ])
            .map_err(csv_error)?;
        }
        wtr.flush()?;
        Ok(())
    }

    fn write_summary(&self, metrics: &Metrics, path: &Path) -> Result<(), BandtraderError> {
        let mut wtr = csv::Writer::from_path(path).map_err(csv_error)?;
        wtr.write_record(["metric", "value"]).map_err(csv_error)?;
        let rows = [
            ("final_equity", metrics.final_equity.to_string()),
            ("total_return", metrics.total_return.to_string()),
            ("max_drawdown", metrics.max_drawdown.to_string()),
            ("total_trades", metrics.total_trades.to_string()),
            ("trades_won", metrics.trades_won.to_string()),
            ("trades_lost", metrics.trades_lost.to_string()),
            ("trades_breakeven", metrics.trades_breakeven.to_string()),
            ("win_rate", metrics.win_rate.to_string()),
            ("profit_factor", metrics.profit_factor.to_string()),
        ];
        for (name, value) in rows {
            wtr.write_record([name, &value]).map_err(csv_error)?;
        }
        wtr.flush()?;
        Ok(())
    }
}

fn csv_error(e: csv::Error) -> BandtraderError {
    BandtraderError::Data {
        reason: format!("CSV write error: {}", e),
    }
}

impl ReportPort for CsvReportAdapter {
    fn write_report(
        &self,
        result: &SimulationResult,
        metrics: &Metrics,
    ) -> Result<(), BandtraderError> {
        fs::create_dir_all(&self.dir)?;
        self.write_signals(result, &self.dir.join("signals.csv"))?;
        self.write_equity(result, &self.dir.join("equity.csv"))?;
        self.write_summary(metrics, &self.dir.join("summary.csv"))?;
        Ok(())
    }
}
