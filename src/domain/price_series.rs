//! Daily close price series.
//!
//! Dates are strictly increasing and unique once constructed. Prices are not
//! checked here; each consumer validates the prices it reads with
//! [`checked_price`].

use crate::domain::error::AnalysisError;
use chrono::NaiveDate;
use std::collections::HashMap;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PricePoint {
    pub date: NaiveDate,
    pub close: f64,
}

#[derive(Debug, Clone)]
pub struct PriceSeries {
    points: Vec<PricePoint>,
    date_index: HashMap<NaiveDate, usize>,
}

impl PriceSeries {
    pub fn new(mut points: Vec<PricePoint>) -> Result<Self, AnalysisError> {
        points.sort_by_key(|p| p.date);
        if let Some(pair) = points.windows(2).find(|w| w[0].date == w[1].date) {
            return Err(AnalysisError::DuplicateDate { date: pair[0].date });
        }
        let date_index = points
            .iter()
            .enumerate()
            .map(|(i, p)| (p.date, i))
            .collect();
        Ok(Self { points, date_index })
    }

    pub fn points(&self) -> &[PricePoint] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn first_date(&self) -> Option<NaiveDate> {
        self.points.first().map(|p| p.date)
    }

    pub fn last_date(&self) -> Option<NaiveDate> {
        self.points.last().map(|p| p.date)
    }

    pub fn close_on(&self, date: NaiveDate) -> Option<f64> {
        self.date_index.get(&date).map(|&i| self.points[i].close)
    }

    /// Sub-series of points dated on or after `start`.
    pub fn since(&self, start: NaiveDate) -> Self {
        let from = self.points.partition_point(|p| p.date < start);
        let points = self.points[from..].to_vec();
        let date_index = points
            .iter()
            .enumerate()
            .map(|(i, p)| (p.date, i))
            .collect();
        Self { points, date_index }
    }
}

/// Returns `price` if it is finite and strictly positive.
pub fn checked_price(date: NaiveDate, price: f64) -> Result<f64, AnalysisError> {
    if price.is_finite() && price > 0.0 {
        Ok(price)
    } else {
        Err(AnalysisError::InvalidPrice { date, price })
    }
}
