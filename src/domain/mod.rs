//! Core domain types and logic.

pub mod price_series;
pub mod dip;
pub mod schedule;
pub mod strategy;
pub mod valuation;
pub mod roi;
pub mod analysis;
pub mod settings;
pub mod config_validation;
pub mod universe;
pub mod error;
