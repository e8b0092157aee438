//! File-to-report pipeline tests: CSV candles in, config in, CSV report out.

mod common;

use std::fs;

use approx::assert_relative_eq;
use tempfile::TempDir;

use bandtrader::adapters::csv_adapter::CsvAdapter;
use bandtrader::adapters::csv_report_adapter::CsvReportAdapter;
use bandtrader::adapters::file_config_adapter::FileConfigAdapter;
use bandtrader::domain::metrics::Metrics;
use bandtrader::domain::params::StrategyParams;
use bandtrader::domain::simulation::{self, SignalKind};
use bandtrader::ports::data_port::DataPort;
use bandtrader::ports::report_port::ReportPort;

use common::one_trade_fixture;

fn fixture_csv() -> String {
    let mut out = String::from("timestamp,open,high,low,close,volume\n");
    for candle in one_trade_fixture() {
        out.push_str(&format!(
            "{},{},{},{},{},{}\n",
            candle.timestamp.format("%Y-%m-%d %H:%M:%S"),
            candle.open,
            candle.high,
            candle.low,
            candle.close,
            candle.volume,
        ));
    }
    out
}

#[test]
fn csv_file_to_signals() {
    let dir = TempDir::new().unwrap();
    let data_path = dir.path().join("candles.csv");
    fs::write(&data_path, fixture_csv()).unwrap();

    let candles = CsvAdapter::new(data_path).fetch_candles().unwrap();
    assert_eq!(candles, one_trade_fixture());

    let params = common::short_params();
    let result = simulation::run(&candles, &params).unwrap();

    assert_eq!(result.signals.len(), 2);
    assert_eq!(result.signals[0].kind, SignalKind::Buy);
    assert_eq!(result.signals[1].kind, SignalKind::ExitStopLoss);
}

#[test]
fn config_file_drives_parameters() {
    let dir = TempDir::new().unwrap();
    let config_path = dir.path().join("strategy.ini");
    fs::write(
        &config_path,
        "[strategy]\n\
         bb_length = 2\n\
         bb_mult = 2.0\n\
         ema_length = 3\n\
         rsi_length = 3\n\
         initial_balance = 100.0\n",
    )
    .unwrap();

    let adapter = FileConfigAdapter::from_file(&config_path).unwrap();
    let params = StrategyParams::from_config(&adapter);
    params.validate().unwrap();
    assert_eq!(params, common::short_params());
}

#[test]
fn full_pipeline_writes_report() {
    let dir = TempDir::new().unwrap();
    let data_path = dir.path().join("candles.csv");
    fs::write(&data_path, fixture_csv()).unwrap();
    let report_dir = dir.path().join("report");

    let candles = CsvAdapter::new(data_path).fetch_candles().unwrap();
    let params = common::short_params();
    let result = simulation::run(&candles, &params).unwrap();
    let metrics = Metrics::compute(&result, params.initial_balance);

    CsvReportAdapter::new(report_dir.clone())
        .write_report(&result, &metrics)
        .unwrap();

    let signals = fs::read_to_string(report_dir.join("signals.csv")).unwrap();
    let mut lines = signals.lines();
    assert_eq!(lines.next(), Some("timestamp,kind,price"));
    assert_eq!(lines.next(), Some("2024-01-15 10:06:00,buy,101"));
    assert_eq!(lines.next(), Some("2024-01-15 10:09:00,exit_stop_loss,94"));

    let equity = fs::read_to_string(report_dir.join("equity.csv")).unwrap();
    assert_eq!(equity.lines().count(), 1 + candles.len());

    let summary = fs::read_to_string(report_dir.join("summary.csv")).unwrap();
    assert!(summary.contains("total_trades,1"));

    assert_relative_eq!(metrics.final_equity, 100.0 / 101.0 * 94.0, epsilon = 1e-12);
}

#[test]
fn malformed_data_file_is_rejected() {
    let dir = TempDir::new().unwrap();
    let data_path = dir.path().join("candles.csv");
    fs::write(
        &data_path,
        "timestamp,open,high,low,close,volume\n\
         2024-01-15 10:00:00,oops,101,99,100,1000\n",
    )
    .unwrap();

    assert!(CsvAdapter::new(data_path).fetch_candles().is_err());
}
