//! CLI definition and dispatch.

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::{error, info, warn};

use crate::adapters::console_report::ConsoleReport;
use crate::adapters::csv_adapter::CsvAdapter;
use crate::adapters::file_config_adapter::FileConfigAdapter;
use crate::domain::config_validation::{
    parse_optional_date, resolve_invest_amount, resolve_threshold_factor, validate_analysis_config,
    validate_analysis_fields, validate_data_config,
};
use crate::domain::error::DipdcaError;
use crate::domain::settings::{AnalysisSettings, Interval};
use crate::domain::strategy::StrategyParams;
use crate::domain::universe::{parse_tickers, run_batch};
use crate::ports::config_port::ConfigPort;
use crate::ports::data_port::PriceProvider;
use crate::ports::report_port::ReportPort;

#[derive(Parser, Debug)]
#[command(name = "dipdca", about = "Compare DCA and dip-buying returns on historical prices")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Run the DCA / dip-buy comparison for every configured ticker
    Analyze {
        #[arg(short, long)]
        config: PathBuf,
        #[arg(long)]
        ticker: Option<String>,
        #[arg(long)]
        start_date: Option<String>,
        /// Print invested amounts and final values
        #[arg(long)]
        details: bool,
    },
    /// Validate a configuration file without fetching prices
    Validate {
        #[arg(short, long)]
        config: PathBuf,
    },
    /// Show the price range available for ticker(s)
    Info {
        #[arg(short, long)]
        config: PathBuf,
        #[arg(long)]
        ticker: Option<String>,
    },
    /// List tickers with CSV price files
    ListTickers {
        #[arg(short, long)]
        config: PathBuf,
    },
}

pub fn run(cli: Cli) -> ExitCode {
    match cli.command {
        Command::Analyze {
            config,
            ticker,
            start_date,
            details,
        } => run_analyze(&config, ticker.as_deref(), start_date.as_deref(), details),
        Command::Validate { config } => run_validate(&config),
        Command::Info { config, ticker } => run_info(&config, ticker.as_deref()),
        Command::ListTickers { config } => run_list_tickers(&config),
    }
}

fn fail(err: &DipdcaError) -> ExitCode {
    error!("{err}");
    err.into()
}

pub fn load_config(path: &PathBuf) -> Result<FileConfigAdapter, ExitCode> {
    info!("Loading config from {}", path.display());
    FileConfigAdapter::from_file(path).map_err(|e| fail(&e))
}

/// Resolves settings from the config file; `--ticker` and `--start-date`
/// take precedence over the file.
pub fn build_settings(
    config: &dyn ConfigPort,
    ticker_override: Option<&str>,
    start_override: Option<&str>,
) -> Result<AnalysisSettings, DipdcaError> {
    let tickers_str = match ticker_override {
        Some(t) => t.to_string(),
        None => config.require_string("analysis", "tickers")?,
    };
    let tickers = parse_tickers(&tickers_str).map_err(|e| DipdcaError::ConfigInvalid {
        section: "analysis".into(),
        key: "tickers".into(),
        reason: e.to_string(),
    })?;

    let interval = match config.get_string("analysis", "interval") {
        Some(s) => s
            .parse::<Interval>()
            .map_err(|reason| DipdcaError::ConfigInvalid {
                section: "analysis".into(),
                key: "interval".into(),
                reason,
            })?,
        None => Interval::default(),
    };

    let start_date = match start_override {
        Some(s) => parse_optional_date(Some(s))?,
        None => parse_optional_date(config.get_string("analysis", "start_date").as_deref())?,
    };

    Ok(AnalysisSettings {
        tickers,
        interval,
        start_date,
        params: StrategyParams {
            invest_amount: resolve_invest_amount(config)?,
            threshold_factor: resolve_threshold_factor(config)?,
        },
    })
}

pub fn build_provider(config: &dyn ConfigPort) -> Result<Box<dyn PriceProvider>, DipdcaError> {
    let source = config
        .get_string("data", "source")
        .unwrap_or_else(|| "csv".to_string())
        .to_lowercase();

    match source.as_str() {
        "csv" => {
            let dir = config.require_string("data", "csv_dir")?;
            Ok(Box::new(CsvAdapter::new(PathBuf::from(dir))))
        }
        #[cfg(feature = "alphavantage")]
        "alphavantage" => {
            use crate::adapters::alpha_vantage::AlphaVantageAdapter;
            Ok(Box::new(AlphaVantageAdapter::from_config(config)?))
        }
        other => Err(DipdcaError::ConfigInvalid {
            section: "data".into(),
            key: "source".into(),
            reason: format!("unsupported source '{}'", other),
        }),
    }
}

fn run_analyze(
    config_path: &PathBuf,
    ticker: Option<&str>,
    start_date: Option<&str>,
    details: bool,
) -> ExitCode {
    let config = match load_config(config_path) {
        Ok(c) => c,
        Err(code) => return code,
    };

    let analysis_check = match ticker {
        Some(_) => validate_analysis_fields(&config),
        None => validate_analysis_config(&config),
    };
    if let Err(e) = analysis_check.and_then(|()| validate_data_config(&config)) {
        return fail(&e);
    }

    let settings = match build_settings(&config, ticker, start_date) {
        Ok(s) => s,
        Err(e) => return fail(&e),
    };
    let provider = match build_provider(&config) {
        Ok(p) => p,
        Err(e) => return fail(&e),
    };

    let report = ConsoleReport::new(details || config.get_bool("report", "details", false));
    run_analysis_pipeline(provider.as_ref(), &settings, &report)
}

pub fn run_analysis_pipeline(
    provider: &dyn PriceProvider,
    settings: &AnalysisSettings,
    report: &dyn ReportPort,
) -> ExitCode {
    info!(
        tickers = settings.tickers.len(),
        invest_amount = settings.params.invest_amount,
        threshold_factor = settings.params.threshold_factor,
        "Starting analysis"
    );

    let result = run_batch(provider, settings);

    if let Err(e) = report.write(&result) {
        return fail(&e);
    }

    if result.is_empty() {
        error!("no ticker could be analyzed");
        return ExitCode::from(5);
    }
    ExitCode::SUCCESS
}

fn run_validate(config_path: &PathBuf) -> ExitCode {
    let config = match load_config(config_path) {
        Ok(c) => c,
        Err(code) => return code,
    };

    if let Err(e) = validate_analysis_config(&config).and_then(|()| validate_data_config(&config)) {
        return fail(&e);
    }

    let settings = match build_settings(&config, None, None) {
        Ok(s) => s,
        Err(e) => return fail(&e),
    };

    println!("Tickers:          {}", settings.tickers.join(", "));
    println!("Interval:         {}", settings.interval);
    match settings.start_date {
        Some(d) => println!("Start date:       {}", d),
        None => println!("Start date:       (all data)"),
    }
    println!("Invest amount:    {:.2}", settings.params.invest_amount);
    println!("Threshold factor: {}", settings.params.threshold_factor);
    println!(
        "Data source:      {}",
        config
            .get_string("data", "source")
            .unwrap_or_else(|| "csv".to_string())
    );
    println!("\nConfiguration is valid.");
    ExitCode::SUCCESS
}

fn run_info(config_path: &PathBuf, ticker: Option<&str>) -> ExitCode {
    let config = match load_config(config_path) {
        Ok(c) => c,
        Err(code) => return code,
    };

    let settings = match build_settings(&config, ticker, None) {
        Ok(s) => s,
        Err(e) => return fail(&e),
    };
    let provider = match build_provider(&config) {
        Ok(p) => p,
        Err(e) => return fail(&e),
    };

    for t in &settings.tickers {
        match provider.fetch_prices(t, settings.interval) {
            Ok(series) => match (series.first_date(), series.last_date()) {
                (Some(first), Some(last)) => {
                    println!("{}: {} prices, {} to {}", t, series.len(), first, last);
                }
                _ => warn!("{}: no data found", t),
            },
            Err(e) => warn!("error querying {}: {}", t, e),
        }
    }
    ExitCode::SUCCESS
}

fn run_list_tickers(config_path: &PathBuf) -> ExitCode {
    let config = match load_config(config_path) {
        Ok(c) => c,
        Err(code) => return code,
    };

    let dir = match config.require_string("data", "csv_dir") {
        Ok(d) => d,
        Err(e) => return fail(&e),
    };
    let interval = match config.get_string("analysis", "interval") {
        Some(s) => match s.parse::<Interval>() {
            Ok(i) => i,
            Err(reason) => {
                return fail(&DipdcaError::ConfigInvalid {
                    section: "analysis".into(),
                    key: "interval".into(),
                    reason,
                });
            }
        },
        None => Interval::default(),
    };

    match CsvAdapter::new(PathBuf::from(dir)).list_tickers(interval) {
        Ok(tickers) => {
            for t in &tickers {
                println!("{}", t);
            }
            info!("{} tickers found", tickers.len());
            ExitCode::SUCCESS
        }
        Err(e) => fail(&e),
    }
}
