//! Configuration validation.
//!
//! Validates all config fields before any prices are fetched.

use crate::domain::dip::DEFAULT_THRESHOLD_FACTOR;
use crate::domain::error::DipdcaError;
use crate::domain::settings::Interval;
use crate::domain::strategy::DEFAULT_INVEST_AMOUNT;
use crate::domain::universe::parse_tickers;
use crate::ports::config_port::ConfigPort;
use chrono::NaiveDate;

pub const DATA_SOURCES: [&str; 2] = ["csv", "alphavantage"];

pub fn validate_analysis_config(config: &dyn ConfigPort) -> Result<(), DipdcaError> {
    validate_tickers(config)?;
    validate_analysis_fields(config)
}

/// Every `[analysis]` check except the ticker list, for runs where the
/// tickers come from the command line.
pub fn validate_analysis_fields(config: &dyn ConfigPort) -> Result<(), DipdcaError> {
    validate_interval(config)?;
    validate_start_date(config)?;
    resolve_invest_amount(config)?;
    resolve_threshold_factor(config)?;
    Ok(())
}

pub fn validate_data_config(config: &dyn ConfigPort) -> Result<(), DipdcaError> {
    let source = config
        .get_string("data", "source")
        .unwrap_or_else(|| "csv".to_string());
    match source.trim().to_lowercase().as_str() {
        "csv" => config.require_string("data", "csv_dir").map(|_| ()),
        "alphavantage" => config.require_string("alphavantage", "api_key").map(|_| ()),
        other => Err(DipdcaError::ConfigInvalid {
            section: "data".to_string(),
            key: "source".to_string(),
            reason: format!(
                "unknown source '{}', expected one of {}",
                other,
                DATA_SOURCES.join(", ")
            ),
        }),
    }
}

fn validate_tickers(config: &dyn ConfigPort) -> Result<(), DipdcaError> {
    let tickers = config.require_string("analysis", "tickers")?;
    parse_tickers(&tickers).map_err(|e| DipdcaError::ConfigInvalid {
        section: "analysis".to_string(),
        key: "tickers".to_string(),
        reason: e.to_string(),
    })?;
    Ok(())
}

fn validate_interval(config: &dyn ConfigPort) -> Result<(), DipdcaError> {
    if let Some(value) = config.get_string("analysis", "interval") {
        value
            .parse::<Interval>()
            .map_err(|reason| DipdcaError::ConfigInvalid {
                section: "analysis".to_string(),
                key: "interval".to_string(),
                reason,
            })?;
    }
    Ok(())
}

fn validate_start_date(config: &dyn ConfigPort) -> Result<(), DipdcaError> {
    parse_optional_date(config.get_string("analysis", "start_date").as_deref())?;
    Ok(())
}

pub fn parse_optional_date(value: Option<&str>) -> Result<Option<NaiveDate>, DipdcaError> {
    match value.map(str::trim).filter(|s| !s.is_empty()) {
        None => Ok(None),
        Some(s) => NaiveDate::parse_from_str(s, "%Y-%m-%d")
            .map(Some)
            .map_err(|_| DipdcaError::ConfigInvalid {
                section: "analysis".to_string(),
                key: "start_date".to_string(),
                reason: "invalid start_date format, expected YYYY-MM-DD".to_string(),
            }),
    }
}

pub fn resolve_invest_amount(config: &dyn ConfigPort) -> Result<f64, DipdcaError> {
    let value = config.get_double("analysis", "invest_amount", DEFAULT_INVEST_AMOUNT)?;
    if !value.is_finite() || value <= 0.0 {
        return Err(DipdcaError::ConfigInvalid {
            section: "analysis".to_string(),
            key: "invest_amount".to_string(),
            reason: "invest_amount must be positive".to_string(),
        });
    }
    Ok(value)
}

pub fn resolve_threshold_factor(config: &dyn ConfigPort) -> Result<u32, DipdcaError> {
    let value = config.get_int(
        "analysis",
        "threshold_factor",
        i64::from(DEFAULT_THRESHOLD_FACTOR),
    )?;
    u32::try_from(value)
        .ok()
        .filter(|f| *f >= 1)
        .ok_or_else(|| DipdcaError::ConfigInvalid {
            section: "analysis".to_string(),
            key: "threshold_factor".to_string(),
            reason: "threshold_factor must be an integer of at least 1".to_string(),
        })
}
