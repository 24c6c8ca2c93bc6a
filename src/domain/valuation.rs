//! Portfolio valuation over a buy schedule.

use crate::domain::error::AnalysisError;
use crate::domain::price_series::{PriceSeries, checked_price};
use crate::domain::schedule::BuySchedule;
use chrono::NaiveDate;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ValuePoint {
    pub date: NaiveDate,
    pub shares_held: f64,
    pub value: f64,
}

/// Market value of the accumulated holdings on each buy date.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ValueSeries {
    points: Vec<ValuePoint>,
}

impl ValueSeries {
    pub fn points(&self) -> &[ValuePoint] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn value_on(&self, date: NaiveDate) -> Option<f64> {
        self.points
            .binary_search_by_key(&date, |p| p.date)
            .ok()
            .map(|i| self.points[i].value)
    }

    /// The chronologically latest point.
    pub fn latest(&self) -> Option<&ValuePoint> {
        self.points.iter().max_by_key(|p| p.date)
    }
}

/// value[t] = (sum of shares bought on or before t) * price[t]
pub fn portfolio_value(
    schedule: &BuySchedule,
    prices: &PriceSeries,
) -> Result<ValueSeries, AnalysisError> {
    let mut shares_held = 0.0_f64;
    let mut points = Vec::with_capacity(schedule.len());

    for (date, shares) in schedule.iter() {
        let close = prices
            .close_on(date)
            .ok_or(AnalysisError::MissingPrice { date })?;
        let price = checked_price(date, close)?;
        shares_held += shares;
        points.push(ValuePoint {
            date,
            shares_held,
            value: shares_held * price,
        });
    }

    Ok(ValueSeries { points })
}
