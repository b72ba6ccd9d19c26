//! Logger errors

use thiserror::Error;

/// Result type for logger setup
pub type LogResult<T> = Result<T, LogError>;

/// Errors raised while configuring or installing the logger
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LogError {
    /// The level/filter directive could not be parsed
    #[error("invalid log filter: {0}")]
    Filter(String),

    /// The output format name is not recognised
    #[error("unknown log format '{0}' (expected compact, pretty or json)")]
    Format(String),

    /// A global subscriber is already installed
    #[error("logger initialization failed: {0}")]
    Init(String),
}
