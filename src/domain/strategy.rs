//! Buy-schedule generators for the accumulation strategies.

use crate::domain::dip::{DEFAULT_THRESHOLD_FACTOR, detect_dips};
use crate::domain::error::AnalysisError;
use crate::domain::price_series::{PriceSeries, checked_price};
use crate::domain::schedule::BuyPlan;
use std::fmt;

pub const DEFAULT_INVEST_AMOUNT: f64 = 10.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StrategyParams {
    pub invest_amount: f64,
    pub threshold_factor: u32,
}

impl Default for StrategyParams {
    fn default() -> Self {
        Self {
            invest_amount: DEFAULT_INVEST_AMOUNT,
            threshold_factor: DEFAULT_THRESHOLD_FACTOR,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StrategyKind {
    Dca,
    DipBuy,
    Combined,
}

impl StrategyKind {
    pub const ALL: [StrategyKind; 3] = [StrategyKind::Dca, StrategyKind::DipBuy, StrategyKind::Combined];

    pub fn label(self) -> &'static str {
        match self {
            StrategyKind::Dca => "DCA",
            StrategyKind::DipBuy => "Dips",
            StrategyKind::Combined => "Combined",
        }
    }
}

impl fmt::Display for StrategyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

fn checked_amount(amount: f64) -> Result<f64, AnalysisError> {
    if amount.is_finite() && amount > 0.0 {
        Ok(amount)
    } else {
        Err(AnalysisError::InvalidAmount { amount })
    }
}

/// Buys `invest_amount` worth of shares on every date of the series.
pub fn dca_plan(series: &PriceSeries, invest_amount: f64) -> Result<BuyPlan, AnalysisError> {
    let amount = checked_amount(invest_amount)?;
    let mut plan = BuyPlan::new();
    for p in series.points() {
        let price = checked_price(p.date, p.close)?;
        plan.buy(p.date, amount, price);
    }
    Ok(plan)
}

/// Buys `invest_amount` worth of shares only on dates flagged as dips.
/// No dips yields an empty plan.
pub fn dip_buy_plan(series: &PriceSeries, params: &StrategyParams) -> Result<BuyPlan, AnalysisError> {
    let amount = checked_amount(params.invest_amount)?;
    let dips = detect_dips(series, params.threshold_factor)?;

    let mut plan = BuyPlan::new();
    for date in dips.dip_dates() {
        let close = series
            .close_on(date)
            .ok_or(AnalysisError::MissingPrice { date })?;
        plan.buy(date, amount, checked_price(date, close)?);
    }
    Ok(plan)
}
