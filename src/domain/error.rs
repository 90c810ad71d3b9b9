//! Domain error types.

use chrono::NaiveDate;

/// Top-level error type for marketlab.
#[derive(Debug, thiserror::Error)]
pub enum MarketLabError {
    #[error("invalid horizon: {days} days requested, need at least 1")]
    InvalidHorizon { days: usize },

    #[error("date out of range: cannot go back {days} days from {date}")]
    DateOutOfRange { date: NaiveDate, days: usize },

    #[error("{operation} called on an empty price series")]
    EmptySeries { operation: String },

    #[error("config parse error in {file}: {reason}")]
    ConfigParse { file: String, reason: String },

    #[error("invalid config value [{section}] {key}: {reason}")]
    ConfigInvalid {
        section: String,
        key: String,
        reason: String,
    },

    #[error("export error: {reason}")]
    Export { reason: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl MarketLabError {
    pub(crate) fn empty_series(operation: &str) -> Self {
        MarketLabError::EmptySeries {
            operation: operation.to_string(),
        }
    }
}

impl From<&MarketLabError> for std::process::ExitCode {
    fn from(err: &MarketLabError) -> Self {
        let code: u8 = match err {
            MarketLabError::Io(_) | MarketLabError::Export { .. } => 1,
            MarketLabError::ConfigParse { .. } | MarketLabError::ConfigInvalid { .. } => 2,
            MarketLabError::InvalidHorizon { .. }
            | MarketLabError::DateOutOfRange { .. }
            | MarketLabError::EmptySeries { .. } => 3,
        };
        std::process::ExitCode::from(code)
    }
}
