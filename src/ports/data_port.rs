//! Price data access port trait.

use crate::domain::error::DipdcaError;
use crate::domain::price_series::PriceSeries;
use crate::domain::settings::Interval;

/// Source of close prices for a ticker. Implementations may block; the
/// analysis core never calls them.
pub trait PriceProvider {
    fn fetch_prices(&self, ticker: &str, interval: Interval) -> Result<PriceSeries, DipdcaError>;
}
