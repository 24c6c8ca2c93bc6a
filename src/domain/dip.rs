//! Dip detection from daily log-returns.
//!
//! r[t] = ln(C[t]) - ln(C[t-1]) for t = 1..N-1
//! threshold = mean(r) - factor * stddev(r)   (sample stddev, n - 1)
//! dip[t] = r[t] < threshold
//!
//! The statistics cover the whole series, including the dips being detected.

use crate::domain::error::AnalysisError;
use crate::domain::price_series::{PriceSeries, checked_price};
use chrono::NaiveDate;

pub const DEFAULT_THRESHOLD_FACTOR: u32 = 2;
pub const MIN_PRICE_POINTS: usize = 2;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LogReturn {
    pub date: NaiveDate,
    pub value: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DipFlag {
    pub date: NaiveDate,
    pub log_return: f64,
    pub is_dip: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DipSeries {
    pub mean: f64,
    pub sigma: f64,
    pub threshold: f64,
    pub flags: Vec<DipFlag>,
}

impl DipSeries {
    pub fn dip_dates(&self) -> impl Iterator<Item = NaiveDate> + '_ {
        self.flags.iter().filter(|f| f.is_dip).map(|f| f.date)
    }

    pub fn dip_count(&self) -> usize {
        self.flags.iter().filter(|f| f.is_dip).count()
    }
}

pub fn log_returns(series: &PriceSeries) -> Result<Vec<LogReturn>, AnalysisError> {
    let points = series.points();
    if points.len() < MIN_PRICE_POINTS {
        return Err(AnalysisError::InsufficientData {
            points: points.len(),
            minimum: MIN_PRICE_POINTS,
        });
    }

    let mut prev = checked_price(points[0].date, points[0].close)?.ln();
    let mut returns = Vec::with_capacity(points.len() - 1);
    for p in &points[1..] {
        let ln = checked_price(p.date, p.close)?.ln();
        returns.push(LogReturn {
            date: p.date,
            value: ln - prev,
        });
        prev = ln;
    }
    Ok(returns)
}

/// Sample mean and standard deviation. A single observation has no spread,
/// so sigma is 0 rather than undefined.
fn mean_and_sigma(values: &[f64]) -> (f64, f64) {
    let n = values.len();
    if n == 0 {
        return (0.0, 0.0);
    }
    let mean = values.iter().sum::<f64>() / n as f64;
    if n < 2 {
        return (mean, 0.0);
    }
    let variance = values
        .iter()
        .map(|v| {
            let diff = v - mean;
            diff * diff
        })
        .sum::<f64>()
        / (n - 1) as f64;
    (mean, variance.sqrt())
}

pub fn detect_dips(series: &PriceSeries, threshold_factor: u32) -> Result<DipSeries, AnalysisError> {
    if threshold_factor < 1 {
        return Err(AnalysisError::InvalidThresholdFactor {
            factor: threshold_factor,
        });
    }

    let returns = log_returns(series)?;
    let values: Vec<f64> = returns.iter().map(|r| r.value).collect();
    let (mean, sigma) = mean_and_sigma(&values);
    let threshold = mean - f64::from(threshold_factor) * sigma;

    let flags = returns
        .iter()
        .map(|r| DipFlag {
            date: r.date,
            log_return: r.value,
            is_dip: r.value < threshold,
        })
        .collect();

    Ok(DipSeries {
        mean,
        sigma,
        threshold,
        flags,
    })
}
