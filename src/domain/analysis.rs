//! Per-asset analysis: DCA, dip-buy and their combination, each valued and
//! reduced to a [`Performance`].

use crate::domain::error::AnalysisError;
use crate::domain::price_series::PriceSeries;
use crate::domain::roi::Performance;
use crate::domain::schedule::{BuyPlan, combine};
use crate::domain::strategy::{StrategyKind, StrategyParams, dca_plan, dip_buy_plan};
use crate::domain::valuation::{ValueSeries, portfolio_value};

#[derive(Debug, Clone)]
pub struct StrategyOutcome {
    pub kind: StrategyKind,
    pub plan: BuyPlan,
    pub values: ValueSeries,
    pub performance: Performance,
}

impl StrategyOutcome {
    fn evaluate(kind: StrategyKind, plan: BuyPlan, prices: &PriceSeries) -> Result<Self, AnalysisError> {
        let values = portfolio_value(&plan.schedule, prices)?;
        let performance = Performance::compute(&values, &plan.ledger)?;
        Ok(Self {
            kind,
            plan,
            values,
            performance,
        })
    }
}

#[derive(Debug, Clone)]
pub struct AssetAnalysis {
    pub dca: StrategyOutcome,
    pub dip_buy: StrategyOutcome,
    pub combined: StrategyOutcome,
}

impl AssetAnalysis {
    pub fn outcome(&self, kind: StrategyKind) -> &StrategyOutcome {
        match kind {
            StrategyKind::Dca => &self.dca,
            StrategyKind::DipBuy => &self.dip_buy,
            StrategyKind::Combined => &self.combined,
        }
    }

    pub fn roi(&self, kind: StrategyKind) -> f64 {
        self.outcome(kind).performance.roi
    }
}

pub fn analyze(prices: &PriceSeries, params: &StrategyParams) -> Result<AssetAnalysis, AnalysisError> {
    let dca_buys = dca_plan(prices, params.invest_amount)?;
    let dip_buys = dip_buy_plan(prices, params)?;
    let combined_buys = combine(&dca_buys, &dip_buys);

    Ok(AssetAnalysis {
        dca: StrategyOutcome::evaluate(StrategyKind::Dca, dca_buys, prices)?,
        dip_buy: StrategyOutcome::evaluate(StrategyKind::DipBuy, dip_buys, prices)?,
        combined: StrategyOutcome::evaluate(StrategyKind::Combined, combined_buys, prices)?,
    })
}
