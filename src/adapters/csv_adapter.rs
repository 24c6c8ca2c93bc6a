//! CSV file price adapter.
//!
//! Reads `<TICKER>_<interval>.csv` from a base directory. The header row must
//! name a `date` column (YYYY-MM-DD) and a `close` column; any other columns
//! are ignored.

use crate::domain::error::DipdcaError;
use crate::domain::price_series::{PricePoint, PriceSeries};
use crate::domain::settings::Interval;
use crate::ports::data_port::PriceProvider;
use chrono::NaiveDate;
use std::fs;
use std::path::PathBuf;

pub struct CsvAdapter {
    base_path: PathBuf,
}

impl CsvAdapter {
    pub fn new(base_path: PathBuf) -> Self {
        Self { base_path }
    }

    fn csv_path(&self, ticker: &str, interval: Interval) -> PathBuf {
        self.base_path.join(format!("{}_{}.csv", ticker, interval))
    }

    fn column(headers: &csv::StringRecord, name: &str) -> Result<usize, DipdcaError> {
        headers
            .iter()
            .position(|h| h.trim().eq_ignore_ascii_case(name))
            .ok_or_else(|| DipdcaError::DataSource {
                reason: format!("missing {} column", name),
            })
    }

    /// Lists tickers that have a file for `interval`.
    pub fn list_tickers(&self, interval: Interval) -> Result<Vec<String>, DipdcaError> {
        let entries = fs::read_dir(&self.base_path).map_err(|e| DipdcaError::DataSource {
            reason: format!(
                "failed to read directory {}: {}",
                self.base_path.display(),
                e
            ),
        })?;

        let suffix = format!("_{}.csv", interval);
        let mut tickers = Vec::new();

        for entry in entries {
            let entry = entry.map_err(|e| DipdcaError::DataSource {
                reason: format!("directory entry error: {}", e),
            })?;

            let name = entry.file_name();
            let name_str = name.to_string_lossy();

            if let Some(ticker) = name_str.strip_suffix(&suffix) {
                tickers.push(ticker.to_string());
            }
        }

        tickers.sort();
        Ok(tickers)
    }
}

impl PriceProvider for CsvAdapter {
    fn fetch_prices(&self, ticker: &str, interval: Interval) -> Result<PriceSeries, DipdcaError> {
        let path = self.csv_path(ticker, interval);
        let content = fs::read_to_string(&path).map_err(|e| DipdcaError::DataSource {
            reason: format!("failed to read {}: {}", path.display(), e),
        })?;

        let mut rdr = csv::Reader::from_reader(content.as_bytes());
        let headers = rdr
            .headers()
            .map_err(|e| DipdcaError::DataSource {
                reason: format!("CSV header error: {}", e),
            })?
            .clone();
        let date_col = Self::column(&headers, "date")?;
        let close_col = Self::column(&headers, "close")?;

        let mut points = Vec::new();
        for result in rdr.records() {
            let record = result.map_err(|e| DipdcaError::DataSource {
                reason: format!("CSV parse error: {}", e),
            })?;

            let date_str = record.get(date_col).ok_or_else(|| DipdcaError::DataSource {
                reason: "missing date value".into(),
            })?;
            let date = NaiveDate::parse_from_str(date_str.trim(), "%Y-%m-%d").map_err(|e| {
                DipdcaError::DataSource {
                    reason: format!("invalid date format: {}", e),
                }
            })?;

            let close: f64 = record
                .get(close_col)
                .ok_or_else(|| DipdcaError::DataSource {
                    reason: "missing close value".into(),
                })?
                .trim()
                .parse()
                .map_err(|e| DipdcaError::DataSource {
                    reason: format!("invalid close value on {}: {}", date, e),
                })?;

            points.push(PricePoint { date, close });
        }

        Ok(PriceSeries::new(points)?)
    }
}
