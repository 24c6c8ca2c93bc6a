//! Concrete adapter implementations for ports.

#[cfg(feature = "alphavantage")]
pub mod alpha_vantage;
pub mod console_report;
pub mod csv_adapter;
pub mod file_config_adapter;
