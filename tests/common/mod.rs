#![allow(dead_code)]

use chrono::NaiveDate;
use dipdca::domain::error::DipdcaError;
pub use dipdca::domain::price_series::{PricePoint, PriceSeries};
use dipdca::domain::settings::{AnalysisSettings, Interval};
use dipdca::domain::strategy::StrategyParams;
use dipdca::ports::data_port::PriceProvider;
use std::cell::RefCell;
use std::collections::HashMap;

pub struct MockPriceProvider {
    pub data: HashMap<String, Vec<PricePoint>>,
    pub errors: HashMap<String, fn(&str) -> DipdcaError>,
    pub calls: RefCell<Vec<(String, Interval)>>,
}

impl MockPriceProvider {
    pub fn new() -> Self {
        Self {
            data: HashMap::new(),
            errors: HashMap::new(),
            calls: RefCell::new(Vec::new()),
        }
    }

    pub fn with_prices(mut self, ticker: &str, points: Vec<PricePoint>) -> Self {
        self.data.insert(ticker.to_string(), points);
        self
    }

    pub fn with_error(mut self, ticker: &str, make: fn(&str) -> DipdcaError) -> Self {
        self.errors.insert(ticker.to_string(), make);
        self
    }
}

impl PriceProvider for MockPriceProvider {
    fn fetch_prices(&self, ticker: &str, interval: Interval) -> Result<PriceSeries, DipdcaError> {
        self.calls.borrow_mut().push((ticker.to_string(), interval));
        if let Some(make) = self.errors.get(ticker) {
            return Err(make(ticker));
        }
        match self.data.get(ticker) {
            Some(points) => Ok(PriceSeries::new(points.clone())?),
            None => Err(DipdcaError::InvalidTicker {
                ticker: ticker.to_string(),
            }),
        }
    }
}

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

/// Consecutive daily points starting at `start`.
pub fn make_points(start: &str, prices: &[f64]) -> Vec<PricePoint> {
    let start = NaiveDate::parse_from_str(start, "%Y-%m-%d").unwrap();
    prices
        .iter()
        .enumerate()
        .map(|(i, &close)| PricePoint {
            date: start + chrono::Duration::days(i as i64),
            close,
        })
        .collect()
}

pub fn make_series(prices: &[f64]) -> PriceSeries {
    PriceSeries::new(make_points("2024-01-01", prices)).unwrap()
}

/// Twenty flat days, one 20% drop, then a recovery to 110.
pub fn dip_then_recovery() -> Vec<f64> {
    let mut prices = vec![100.0; 20];
    prices.push(80.0);
    prices.extend([90.0, 95.0, 100.0, 105.0, 110.0]);
    prices
}

pub fn settings(tickers: &[&str]) -> AnalysisSettings {
    AnalysisSettings {
        tickers: tickers.iter().map(|t| t.to_string()).collect(),
        interval: Interval::Daily,
        start_date: None,
        params: StrategyParams::default(),
    }
}
