//! Ticker universe and batch runs.
//!
//! Parses ticker lists from configuration and runs the per-asset analysis
//! over each ticker. A ticker whose fetch or analysis fails is skipped and
//! the batch continues.

use crate::domain::analysis::{AssetAnalysis, analyze};
use crate::domain::error::DipdcaError;
use crate::domain::settings::AnalysisSettings;
use crate::ports::data_port::PriceProvider;
use chrono::NaiveDate;
use std::collections::HashSet;
use tracing::{debug, info, warn};

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum UniverseError {
    #[error("empty token in ticker list")]
    EmptyToken,

    #[error("duplicate ticker: {0}")]
    DuplicateTicker(String),
}

pub fn parse_tickers(input: &str) -> Result<Vec<String>, UniverseError> {
    let mut tickers = Vec::new();
    let mut seen = HashSet::new();

    for token in input.split(',') {
        let trimmed = token.trim();
        if trimmed.is_empty() {
            return Err(UniverseError::EmptyToken);
        }
        let ticker = trimmed.to_uppercase();
        if !seen.insert(ticker.clone()) {
            return Err(UniverseError::DuplicateTicker(ticker));
        }
        tickers.push(ticker);
    }

    Ok(tickers)
}

#[derive(Debug, Clone)]
pub struct AssetReport {
    pub ticker: String,
    pub points: usize,
    pub first_date: Option<NaiveDate>,
    pub last_date: Option<NaiveDate>,
    pub analysis: AssetAnalysis,
}

#[derive(Debug, Clone, PartialEq)]
pub enum SkipStage {
    Fetch,
    Analysis,
}

#[derive(Debug, Clone)]
pub struct SkippedTicker {
    pub ticker: String,
    pub stage: SkipStage,
    pub reason: String,
}

#[derive(Debug, Clone, Default)]
pub struct BatchResult {
    pub reports: Vec<AssetReport>,
    pub skipped: Vec<SkippedTicker>,
}

impl BatchResult {
    pub fn is_empty(&self) -> bool {
        self.reports.is_empty()
    }
}

/// Fetches and analyzes a single ticker.
pub fn run_ticker(
    provider: &dyn PriceProvider,
    ticker: &str,
    settings: &AnalysisSettings,
) -> Result<AssetReport, SkippedTicker> {
    let fetched = provider
        .fetch_prices(ticker, settings.interval)
        .map_err(|e| skipped(ticker, SkipStage::Fetch, &e))?;

    let prices = match settings.start_date {
        Some(start) => fetched.since(start),
        None => fetched,
    };
    debug!(
        ticker,
        points = prices.len(),
        first = ?prices.first_date(),
        last = ?prices.last_date(),
        "fetched prices"
    );

    let analysis = analyze(&prices, &settings.params)
        .map_err(|e| skipped(ticker, SkipStage::Analysis, &DipdcaError::from(e)))?;

    Ok(AssetReport {
        ticker: ticker.to_string(),
        points: prices.len(),
        first_date: prices.first_date(),
        last_date: prices.last_date(),
        analysis,
    })
}

fn skipped(ticker: &str, stage: SkipStage, err: &DipdcaError) -> SkippedTicker {
    warn!(ticker, stage = ?stage, error = %err, "skipping ticker");
    SkippedTicker {
        ticker: ticker.to_string(),
        stage,
        reason: err.to_string(),
    }
}

pub fn run_batch(provider: &dyn PriceProvider, settings: &AnalysisSettings) -> BatchResult {
    let mut result = BatchResult::default();

    for ticker in &settings.tickers {
        info!(ticker = %ticker, interval = %settings.interval, "running analysis");
        match run_ticker(provider, ticker, settings) {
            Ok(report) => result.reports.push(report),
            Err(skip) => result.skipped.push(skip),
        }
    }

    info!(
        analyzed = result.reports.len(),
        skipped = result.skipped.len(),
        "batch complete"
    );
    result
}
