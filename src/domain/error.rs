//! Domain error types.

use chrono::NaiveDate;

/// Failures raised by the analysis core. None of them is recovered locally;
/// the batch runner skips the affected asset.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum AnalysisError {
    #[error("insufficient data: have {points} price points, need at least {minimum}")]
    InsufficientData { points: usize, minimum: usize },

    #[error("invalid price {price} on {date}")]
    InvalidPrice { date: NaiveDate, price: f64 },

    #[error("no price for {date}")]
    MissingPrice { date: NaiveDate },

    #[error("nothing was invested")]
    NoInvestment,

    #[error("duplicate price date {date}")]
    DuplicateDate { date: NaiveDate },

    #[error("invest amount must be a positive number, got {amount}")]
    InvalidAmount { amount: f64 },

    #[error("threshold factor must be at least 1, got {factor}")]
    InvalidThresholdFactor { factor: u32 },

    #[error("value series is empty but {invested} was invested")]
    EmptyValueSeries { invested: f64 },

    #[error("return is not a finite number (invested {total_invested}, value {final_value})")]
    NonFiniteResult {
        total_invested: f64,
        final_value: f64,
    },
}

/// Top-level error type for dipdca.
#[derive(Debug, thiserror::Error)]
pub enum DipdcaError {
    #[error("config parse error in {file}: {reason}")]
    ConfigParse { file: String, reason: String },

    #[error("missing config key [{section}] {key}")]
    ConfigMissing { section: String, key: String },

    #[error("invalid config value [{section}] {key}: {reason}")]
    ConfigInvalid {
        section: String,
        key: String,
        reason: String,
    },

    #[error("network error: {reason}")]
    Network { reason: String },

    #[error("rate limited by price provider: {reason}")]
    RateLimited { reason: String },

    #[error("invalid ticker: {ticker}")]
    InvalidTicker { ticker: String },

    #[error("data source error: {reason}")]
    DataSource { reason: String },

    #[error(transparent)]
    Analysis(#[from] AnalysisError),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl From<&DipdcaError> for std::process::ExitCode {
    fn from(err: &DipdcaError) -> Self {
        let code: u8 = match err {
            DipdcaError::Io(_) => 1,
            DipdcaError::ConfigParse { .. }
            | DipdcaError::ConfigMissing { .. }
            | DipdcaError::ConfigInvalid { .. } => 2,
            DipdcaError::Network { .. }
            | DipdcaError::RateLimited { .. }
            | DipdcaError::InvalidTicker { .. }
            | DipdcaError::DataSource { .. } => 3,
            DipdcaError::Analysis(_) => 5,
        };
        std::process::ExitCode::from(code)
    }
}
