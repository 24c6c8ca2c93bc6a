//! CLI integration tests for the analyze command orchestration.
//!
//! Tests cover:
//! - Settings resolution from INI files (build_settings) and CLI overrides
//! - Provider selection (build_provider)
//! - Full pipeline with a mock provider and with CSV files on disk

mod common;

use common::*;
use dipdca::adapters::console_report::ConsoleReport;
use dipdca::adapters::file_config_adapter::FileConfigAdapter;
use dipdca::cli;
use dipdca::domain::error::DipdcaError;
use dipdca::domain::settings::Interval;
use dipdca::domain::universe::BatchResult;
use dipdca::ports::report_port::ReportPort;
use std::cell::RefCell;
use std::fs;
use std::process::ExitCode;

const VALID_INI: &str = r#"
[alphavantage]
api_key = demo

[data]
source = csv
csv_dir = ./data

[analysis]
tickers = msft, UL
interval = weekly
start_date = 2020-01-01
invest_amount = 25
threshold_factor = 3
"#;

struct CapturingReport {
    rendered: RefCell<Vec<String>>,
}

impl CapturingReport {
    fn new() -> Self {
        Self {
            rendered: RefCell::new(Vec::new()),
        }
    }
}

impl ReportPort for CapturingReport {
    fn write(&self, result: &BatchResult) -> Result<(), DipdcaError> {
        self.rendered
            .borrow_mut()
            .push(ConsoleReport::new(true).render(result));
        Ok(())
    }
}

mod settings_resolution {
    use super::*;

    #[test]
    fn build_settings_from_full_config() {
        let adapter = FileConfigAdapter::from_string(VALID_INI).unwrap();
        let s = cli::build_settings(&adapter, None, None).unwrap();

        assert_eq!(s.tickers, vec!["MSFT", "UL"]);
        assert_eq!(s.interval, Interval::Weekly);
        assert_eq!(s.start_date, Some(date(2020, 1, 1)));
        assert!((s.params.invest_amount - 25.0).abs() < f64::EPSILON);
        assert_eq!(s.params.threshold_factor, 3);
    }

    #[test]
    fn build_settings_uses_defaults() {
        let adapter = FileConfigAdapter::from_string("[analysis]\ntickers = MSFT\n").unwrap();
        let s = cli::build_settings(&adapter, None, None).unwrap();

        assert_eq!(s.interval, Interval::Daily);
        assert_eq!(s.start_date, None);
        assert!((s.params.invest_amount - 10.0).abs() < f64::EPSILON);
        assert_eq!(s.params.threshold_factor, 2);
    }

    #[test]
    fn overrides_take_precedence() {
        let adapter = FileConfigAdapter::from_string(VALID_INI).unwrap();
        let s = cli::build_settings(&adapter, Some("brk.b"), Some("2023-06-01")).unwrap();

        assert_eq!(s.tickers, vec!["BRK.B"]);
        assert_eq!(s.start_date, Some(date(2023, 6, 1)));
    }

    #[test]
    fn missing_tickers() {
        let adapter = FileConfigAdapter::from_string("[analysis]\n").unwrap();
        let err = cli::build_settings(&adapter, None, None).unwrap_err();
        assert!(matches!(err, DipdcaError::ConfigMissing { key, .. } if key == "tickers"));
    }

    #[test]
    fn invalid_start_override() {
        let adapter = FileConfigAdapter::from_string(VALID_INI).unwrap();
        let err = cli::build_settings(&adapter, None, Some("June 1st")).unwrap_err();
        assert!(matches!(err, DipdcaError::ConfigInvalid { key, .. } if key == "start_date"));
    }

    #[test]
    fn zero_threshold_factor_rejected() {
        let adapter =
            FileConfigAdapter::from_string("[analysis]\ntickers = MSFT\nthreshold_factor = 0\n")
                .unwrap();
        let err = cli::build_settings(&adapter, None, None).unwrap_err();
        assert!(
            matches!(err, DipdcaError::ConfigInvalid { key, .. } if key == "threshold_factor")
        );
    }

    #[test]
    fn ticker_override_still_checks_invest_amount() {
        let adapter =
            FileConfigAdapter::from_string("[analysis]\ntickers = MSFT\ninvest_amount = -5\n")
                .unwrap();
        let err = cli::build_settings(&adapter, Some("UL"), None).unwrap_err();
        assert!(matches!(err, DipdcaError::ConfigInvalid { key, .. } if key == "invest_amount"));
    }

    #[test]
    fn unparseable_threshold_factor_rejected() {
        let adapter =
            FileConfigAdapter::from_string("[analysis]\ntickers = MSFT\nthreshold_factor = 2.5\n")
                .unwrap();
        let err = cli::build_settings(&adapter, None, None).unwrap_err();
        assert!(
            matches!(err, DipdcaError::ConfigInvalid { key, .. } if key == "threshold_factor")
        );
    }

    #[test]
    fn config_errors_map_to_exit_code_2() {
        let err = DipdcaError::ConfigMissing {
            section: "analysis".into(),
            key: "tickers".into(),
        };
        assert_eq!(ExitCode::from(&err), ExitCode::from(2));
    }
}

mod analyze_command {
    use super::*;
    use dipdca::cli::{Cli, Command};

    fn analyze(config: &std::path::Path, ticker: Option<&str>) -> ExitCode {
        cli::run(Cli {
            command: Command::Analyze {
                config: config.to_path_buf(),
                ticker: ticker.map(str::to_string),
                start_date: None,
                details: false,
            },
        })
    }

    fn write_config(dir: &tempfile::TempDir, analysis: &str) -> std::path::PathBuf {
        let path = dir.path().join("dipdca.ini");
        let ini = format!(
            "[data]\nsource = csv\ncsv_dir = {}\n[analysis]\n{}",
            dir.path().display(),
            analysis
        );
        fs::write(&path, ini).unwrap();
        path
    }

    #[test]
    fn invalid_amount_is_a_config_error_with_or_without_ticker() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = write_config(&dir, "tickers = MSFT\ninvest_amount = -5\n");

        assert_eq!(analyze(&path, None), ExitCode::from(2));
        assert_eq!(analyze(&path, Some("MSFT")), ExitCode::from(2));
    }

    #[test]
    fn ticker_override_allows_missing_ticker_list() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = write_config(&dir, "invest_amount = 10\n");

        // passes validation, then the CSV file for NOPE is missing
        assert_eq!(analyze(&path, Some("NOPE")), ExitCode::from(5));
        assert_eq!(analyze(&path, None), ExitCode::from(2));
    }
}

mod provider_selection {
    use super::*;

    #[test]
    fn csv_requires_dir() {
        let adapter = FileConfigAdapter::from_string("[data]\nsource = csv\n").unwrap();
        assert!(matches!(
            cli::build_provider(&adapter),
            Err(DipdcaError::ConfigMissing { key, .. }) if key == "csv_dir"
        ));
    }

    #[test]
    fn unknown_source_rejected() {
        let adapter = FileConfigAdapter::from_string("[data]\nsource = ftp\n").unwrap();
        assert!(matches!(
            cli::build_provider(&adapter),
            Err(DipdcaError::ConfigInvalid { key, .. }) if key == "source"
        ));
    }

    #[test]
    fn csv_is_default_source() {
        let adapter = FileConfigAdapter::from_string("[data]\ncsv_dir = /tmp\n").unwrap();
        assert!(cli::build_provider(&adapter).is_ok());
    }

    #[cfg(feature = "alphavantage")]
    #[test]
    fn alphavantage_source() {
        let adapter =
            FileConfigAdapter::from_string("[data]\nsource = alphavantage\n[alphavantage]\napi_key = demo\n")
                .unwrap();
        assert!(cli::build_provider(&adapter).is_ok());
    }
}

mod pipeline {
    use super::*;

    #[test]
    fn pipeline_reports_and_succeeds() {
        let provider = MockPriceProvider::new()
            .with_prices("MSFT", make_points("2024-01-01", &dip_then_recovery()))
            .with_prices("FLAT", make_points("2024-01-01", &[100.0; 5]));
        let report = CapturingReport::new();

        let code = cli::run_analysis_pipeline(&provider, &settings(&["MSFT", "FLAT"]), &report);
        assert_eq!(code, ExitCode::SUCCESS);

        let rendered = report.rendered.borrow();
        assert_eq!(rendered.len(), 1);
        assert!(rendered[0].contains("--- Running analysis for: MSFT ---"));
        assert!(rendered[0].contains("Dips ROI: 0.00%"));
        assert!(rendered[0].contains("FLAT (analysis failed): nothing was invested"));
    }

    #[test]
    fn pipeline_fails_when_everything_skipped() {
        let provider = MockPriceProvider::new();
        let report = CapturingReport::new();

        let code = cli::run_analysis_pipeline(&provider, &settings(&["NOPE"]), &report);
        assert_eq!(code, ExitCode::from(5));
        assert!(report.rendered.borrow()[0].contains("NOPE (fetch failed): invalid ticker: NOPE"));
    }

    #[test]
    fn csv_files_end_to_end() {
        let dir = tempfile::TempDir::new().unwrap();
        let mut csv = String::from("date,open,high,low,close,volume\n");
        for p in make_points("2024-01-01", &dip_then_recovery()) {
            csv.push_str(&format!("{},0,0,0,{},1000\n", p.date, p.close));
        }
        fs::write(dir.path().join("MSFT_daily.csv"), csv).unwrap();

        let ini = format!(
            "[data]\nsource = csv\ncsv_dir = {}\n[analysis]\ntickers = MSFT\n",
            dir.path().display()
        );
        let config = FileConfigAdapter::from_string(&ini).unwrap();
        let settings = cli::build_settings(&config, None, None).unwrap();
        let provider = cli::build_provider(&config).unwrap();
        let report = CapturingReport::new();

        let code = cli::run_analysis_pipeline(provider.as_ref(), &settings, &report);
        assert_eq!(code, ExitCode::SUCCESS);
        let rendered = &report.rendered.borrow()[0];
        assert!(rendered.contains("26 prices, 2024-01-01 to 2024-01-26"));
        assert!(rendered.contains("DCA ROI: 11.16%"));
    }
}
