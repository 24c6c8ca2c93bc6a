//! Alpha Vantage price adapter.
//!
//! Fetches `TIME_SERIES_{DAILY,WEEKLY,MONTHLY}` and keeps the `4. close`
//! field of each entry. The API reports failures inside a 200 response:
//! `Error Message` for unknown symbols, `Note` or `Information` when the
//! request quota is exhausted.

use crate::domain::error::DipdcaError;
use crate::domain::price_series::{PricePoint, PriceSeries};
use crate::domain::settings::Interval;
use crate::ports::config_port::ConfigPort;
use crate::ports::data_port::PriceProvider;
use chrono::NaiveDate;
use serde::Deserialize;
use serde_json::{Map, Value};
use std::time::Duration;

pub const DEFAULT_BASE_URL: &str = "https://www.alphavantage.co/query";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Clone)]
pub struct AlphaVantageConfig {
    pub api_key: String,
    pub base_url: String,
}

impl std::fmt::Debug for AlphaVantageConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AlphaVantageConfig")
            .field("api_key", &"***")
            .field("base_url", &self.base_url)
            .finish()
    }
}

/// One entry of a time series object; other OHLCV fields are ignored.
#[derive(Debug, Deserialize)]
struct Bar {
    #[serde(rename = "4. close")]
    close: String,
}

pub struct AlphaVantageAdapter {
    config: AlphaVantageConfig,
    client: reqwest::blocking::Client,
}

fn function_name(interval: Interval) -> &'static str {
    match interval {
        Interval::Daily => "TIME_SERIES_DAILY",
        Interval::Weekly => "TIME_SERIES_WEEKLY",
        Interval::Monthly => "TIME_SERIES_MONTHLY",
    }
}

fn series_key(interval: Interval) -> &'static str {
    match interval {
        Interval::Daily => "Time Series (Daily)",
        Interval::Weekly => "Weekly Time Series",
        Interval::Monthly => "Monthly Time Series",
    }
}

impl AlphaVantageAdapter {
    pub fn new(config: AlphaVantageConfig) -> Result<Self, DipdcaError> {
        let client = reqwest::blocking::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| DipdcaError::Network {
                reason: format!("failed to build HTTP client: {}", e),
            })?;
        Ok(Self { config, client })
    }

    pub fn from_config(config: &dyn ConfigPort) -> Result<Self, DipdcaError> {
        let api_key = config.require_string("alphavantage", "api_key")?;
        let base_url = config
            .get_string("alphavantage", "base_url")
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
        Self::new(AlphaVantageConfig { api_key, base_url })
    }
}

impl PriceProvider for AlphaVantageAdapter {
    fn fetch_prices(&self, ticker: &str, interval: Interval) -> Result<PriceSeries, DipdcaError> {
        tracing::debug!(ticker, %interval, "requesting Alpha Vantage time series");
        let response = self
            .client
            .get(&self.config.base_url)
            .query(&[
                ("function", function_name(interval)),
                ("symbol", ticker),
                ("outputsize", "full"),
                ("apikey", self.config.api_key.as_str()),
            ])
            .send()
            .map_err(|e| DipdcaError::Network {
                reason: e.to_string(),
            })?;

        let status = response.status();
        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return Err(DipdcaError::RateLimited {
                reason: format!("HTTP {}", status),
            });
        }
        if !status.is_success() {
            return Err(DipdcaError::Network {
                reason: format!("HTTP {}", status),
            });
        }

        let body = response.text().map_err(|e| DipdcaError::Network {
            reason: e.to_string(),
        })?;
        parse_time_series(&body, ticker, interval)
    }
}

/// Parses an Alpha Vantage time series response body.
pub fn parse_time_series(
    body: &str,
    ticker: &str,
    interval: Interval,
) -> Result<PriceSeries, DipdcaError> {
    let json: Value = serde_json::from_str(body).map_err(|e| DipdcaError::DataSource {
        reason: format!("invalid JSON from Alpha Vantage: {}", e),
    })?;

    if json.get("Error Message").is_some() {
        return Err(DipdcaError::InvalidTicker {
            ticker: ticker.to_string(),
        });
    }
    for key in ["Note", "Information"] {
        if let Some(message) = json.get(key).and_then(Value::as_str) {
            return Err(DipdcaError::RateLimited {
                reason: message.to_string(),
            });
        }
    }

    let entries: &Map<String, Value> = json
        .get(series_key(interval))
        .and_then(Value::as_object)
        .ok_or_else(|| DipdcaError::DataSource {
            reason: format!("response has no '{}' object", series_key(interval)),
        })?;

    let mut points = Vec::with_capacity(entries.len());
    for (date_str, fields) in entries {
        let date = NaiveDate::parse_from_str(date_str, "%Y-%m-%d").map_err(|e| {
            DipdcaError::DataSource {
                reason: format!("invalid date '{}': {}", date_str, e),
            }
        })?;
        let bar = Bar::deserialize(fields).map_err(|e| DipdcaError::DataSource {
            reason: format!("missing close on {}: {}", date, e),
        })?;
        let close = bar
            .close
            .trim()
            .parse::<f64>()
            .map_err(|e| DipdcaError::DataSource {
                reason: format!("invalid close on {}: {}", date, e),
            })?;
        points.push(PricePoint { date, close });
    }

    Ok(PriceSeries::new(points)?)
}
