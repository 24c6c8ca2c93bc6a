//! Return on investment.
//!
//! roi = (final_value - total_invested) / total_invested

use crate::domain::error::AnalysisError;
use crate::domain::schedule::Ledger;
use crate::domain::valuation::ValueSeries;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Performance {
    pub total_invested: f64,
    pub final_value: f64,
    pub roi: f64,
}

impl Performance {
    pub fn compute(values: &ValueSeries, ledger: &Ledger) -> Result<Self, AnalysisError> {
        let total_invested = ledger.total_invested();
        if total_invested == 0.0 {
            return Err(AnalysisError::NoInvestment);
        }

        let final_value = values
            .latest()
            .map(|p| p.value)
            .ok_or(AnalysisError::EmptyValueSeries {
                invested: total_invested,
            })?;

        let roi = (final_value - total_invested) / total_invested;
        if !(total_invested.is_finite() && final_value.is_finite() && roi.is_finite()) {
            return Err(AnalysisError::NonFiniteResult {
                total_invested,
                final_value,
            });
        }

        Ok(Self {
            total_invested,
            final_value,
            roi,
        })
    }
}

pub fn compute_roi(values: &ValueSeries, ledger: &Ledger) -> Result<f64, AnalysisError> {
    Performance::compute(values, ledger).map(|p| p.roi)
}
