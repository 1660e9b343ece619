//! Infrastructure error type

use thiserror::Error;

/// Failures raised while wiring up or talking to infrastructure
#[derive(Error, Debug)]
pub enum InfraError {
    /// Invalid configuration (bad URL, missing values)
    #[error("Configuration error: {0}")]
    Config(String),

    /// Database connectivity or query failure
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}
