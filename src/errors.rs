use std::result::Result as StdResult;

use thiserror::Error;

use crate::domain::period::DateWindowError;

/// Unified error type for domain, service, and storage layers.
#[derive(Error, Debug)]
pub enum TrackerError {
    #[error("Book not loaded")]
    BookNotLoaded,
    #[error("Category not found: {0}")]
    CategoryNotFound(String),
    #[error("Budget not found: {0}")]
    BudgetNotFound(String),
    #[error("Goal not found: {0}")]
    GoalNotFound(String),
    #[error("Transaction failed: {0}")]
    TransactionError(String),
    #[error("Persistence error: {0}")]
    StorageError(String),
    #[error("Configuration error: {0}")]
    ConfigError(String),
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

pub type Result<T> = StdResult<T, TrackerError>;

impl From<std::io::Error> for TrackerError {
    fn from(err: std::io::Error) -> Self {
        TrackerError::StorageError(err.to_string())
    }
}

impl From<serde_json::Error> for TrackerError {
    fn from(err: serde_json::Error) -> Self {
        TrackerError::StorageError(err.to_string())
    }
}

impl From<DateWindowError> for TrackerError {
    fn from(err: DateWindowError) -> Self {
        TrackerError::InvalidInput(err.to_string())
    }
}

/// User-facing CLI error wrapper.
#[derive(Error, Debug)]
pub enum CliError {
    #[error(transparent)]
    Core(#[from] TrackerError),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Readline error: {0}")]
    Readline(#[from] rustyline::error::ReadlineError),
}
