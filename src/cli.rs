//! CLI definition and dispatch.
//!
//! Progress and the summary block go to stderr; stdout carries the
//! machine-readable signal lines.

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;

use crate::adapters::csv_adapter::CsvAdapter;
use crate::adapters::csv_report_adapter::CsvReportAdapter;
use crate::adapters::file_config_adapter::FileConfigAdapter;
use crate::domain::error::BandtraderError;
use crate::domain::metrics::Metrics;
use crate::domain::params::StrategyParams;
use crate::domain::simulation;
use crate::ports::data_port::DataPort;
use crate::ports::report_port::ReportPort;

#[derive(Parser, Debug)]
#[command(name = "bandtrader", about = "Bollinger band dip-buy backtester")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Run a backtest over a candle CSV file
    Backtest {
        /// Candle CSV file (timestamp,open,high,low,close,volume)
        #[arg(short, long)]
        data: PathBuf,
        /// Optional INI file with a [strategy] section
        #[arg(short, long)]
        config: Option<PathBuf>,
        /// Directory for signals.csv / equity.csv / summary.csv
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Override the configured starting balance
        #[arg(long)]
        initial_balance: Option<f64>,
    },
    /// Validate a strategy configuration file
    Validate {
        #[arg(short, long)]
        config: PathBuf,
    },
    /// Show the data range of a candle CSV file
    Info {
        #[arg(short, long)]
        data: PathBuf,
    },
}

pub fn run(cli: Cli) -> ExitCode {
    match cli.command {
        Command::Backtest {
            data,
            config,
            output,
            initial_balance,
        } => run_backtest(&data, config.as_ref(), output.as_ref(), initial_balance),
        Command::Validate { config } => run_validate(&config),
        Command::Info { data } => run_info(&data),
    }
}

pub fn load_config(path: &PathBuf) -> Result<FileConfigAdapter, ExitCode> {
    FileConfigAdapter::from_file(path).map_err(|e| {
        let err = BandtraderError::ConfigParse {
            file: path.display().to_string(),
            reason: e.to_string(),
        };
        eprintln!("error: {err}");
        ExitCode::from(&err)
    })
}

fn load_params(
    config_path: Option<&PathBuf>,
    initial_balance: Option<f64>,
) -> Result<StrategyParams, ExitCode> {
    let mut params = match config_path {
        Some(path) => {
            eprintln!("Loading config from {}", path.display());
            let adapter = load_config(path)?;
            StrategyParams::from_config(&adapter)
        }
        None => StrategyParams::default(),
    };

    if let Some(balance) = initial_balance {
        params.initial_balance = balance;
    }

    params.validate().map_err(|e| {
        eprintln!("error: {e}");
        ExitCode::from(&e)
    })?;

    Ok(params)
}

fn run_backtest(
    data_path: &PathBuf,
    config_path: Option<&PathBuf>,
    output_path: Option<&PathBuf>,
    initial_balance: Option<f64>,
) -> ExitCode {
    let params = match load_params(config_path, initial_balance) {
        Ok(p) => p,
        Err(code) => return code,
    };

    eprintln!("Loading candles from {}", data_path.display());
    let adapter = CsvAdapter::new(data_path.clone());
    let candles = match adapter.fetch_candles() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("error: {e}");
            return (&e).into();
        }
    };

    eprintln!(
        "Running simulation: {} candles, BB({}, {}), EMA({}), RSI({})",
        candles.len(),
        params.bb_length,
        params.bb_mult,
        params.ema_length,
        params.rsi_length,
    );

    let result = match simulation::run(&candles, &params) {
        Ok(r) => r,
        Err(e) => {
            eprintln!("error: {e}");
            return (&e).into();
        }
    };

    for signal in &result.signals {
        println!(
            "{} {} {:.8}",
            signal.timestamp.format("%Y-%m-%d %H:%M:%S"),
            signal.kind,
            signal.price,
        );
    }

    let metrics = Metrics::compute(&result, params.initial_balance);

    eprintln!("\n=== Results ===");
    eprintln!("Initial Balance:  {:.2}", params.initial_balance);
    eprintln!("Final Equity:     {:.2}", metrics.final_equity);
    eprintln!("Total Return:     {:.2}%", metrics.total_return * 100.0);
    eprintln!("Max Drawdown:     -{:.1}%", metrics.max_drawdown * 100.0);
    eprintln!("Total Trades:     {}", metrics.total_trades);
    eprintln!("Win Rate:         {:.1}%", metrics.win_rate * 100.0);
    eprintln!("Profit Factor:    {:.2}", metrics.profit_factor);

    if let Some(output) = output_path {
        let report = CsvReportAdapter::new(output.clone());
        match report.write_report(&result, &metrics) {
            Ok(()) => eprintln!("\nReport written to: {}", output.display()),
            Err(e) => {
                eprintln!("error: failed to write report: {e}");
                return (&e).into();
            }
        }
    }

    ExitCode::SUCCESS
}

fn run_validate(config_path: &PathBuf) -> ExitCode {
    eprintln!("Validating config: {}", config_path.display());
    let adapter = match load_config(config_path) {
        Ok(a) => a,
        Err(code) => return code,
    };

    let params = StrategyParams::from_config(&adapter);
    if let Err(e) = params.validate() {
        eprintln!("error: {e}");
        return (&e).into();
    }

    eprintln!("\nStrategy parameters:");
    eprintln!("  bb_length:       {}", params.bb_length);
    eprintln!("  bb_mult:         {}", params.bb_mult);
    eprintln!("  ema_length:      {}", params.ema_length);
    eprintln!("  rsi_length:      {}", params.rsi_length);
    eprintln!("  initial_balance: {}", params.initial_balance);
    eprintln!("\nConfiguration is valid.");
    ExitCode::SUCCESS
}

fn run_info(data_path: &PathBuf) -> ExitCode {
    let adapter = CsvAdapter::new(data_path.clone());
    match adapter.data_range() {
        Ok(Some((first, last, count))) => {
            println!(
                "{}: {} candles, {} to {}",
                data_path.display(),
                count,
                first.format("%Y-%m-%d %H:%M:%S"),
                last.format("%Y-%m-%d %H:%M:%S"),
            );
            ExitCode::SUCCESS
        }
        Ok(None) => {
            eprintln!("{}: no candles found", data_path.display());
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("error: {e}");
            (&e).into()
        }
    }
}
