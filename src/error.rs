//! Error types for the spambayes pipeline.

use thiserror::Error;

/// Unified error type for dataset handling, model fitting and evaluation.
#[derive(Debug, Error)]
pub enum SpambayesError {
    /// I/O failure while reading or writing a file.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// CSV-level failure (unreadable file, malformed record).
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// Malformed dataset: wrong field count, bad label, empty input.
    #[error("invalid dataset: {0}")]
    InvalidDataset(String),

    /// Model used before `fit` was called.
    #[error("model not fitted, call fit() first")]
    NotFitted,

    /// Metric with a zero denominator (e.g. precision with no positive
    /// predictions).
    #[error("{0} is undefined: denominator is zero")]
    UndefinedMetric(&'static str),
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, SpambayesError>;
