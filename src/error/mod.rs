//! Error handling for the cohort builder.
//!
//! Only conditions that make the run meaningless are errors. Data-quality
//! problems in individual rows (unknown vocabulary literals, missing values,
//! unmatched signal files) are logged and handled inline by the cohort logic.

pub mod util;

use std::io;
use std::path::PathBuf;

use arrow::error::ArrowError;

/// Specialized error type for the cohort builder
#[derive(Debug, thiserror::Error)]
pub enum CohortError {
    /// Error opening, reading or writing a file
    #[error("IO error at {}: {source}", .path.display())]
    Io {
        /// Path that was being accessed
        path: PathBuf,
        /// Underlying error
        #[source]
        source: io::Error,
    },

    /// A required input file or directory does not exist
    #[error("Missing {role}: {} does not exist", .path.display())]
    MissingInput {
        /// What the input is used for (e.g. "CDED subject table")
        role: String,
        /// The path that was expected
        path: PathBuf,
    },

    /// Error decoding or encoding CSV through Arrow
    #[error("Arrow error: {0}")]
    Arrow(#[from] ArrowError),

    /// Error converting between record batches and typed rows
    #[error("Deserialization error: {0}")]
    Deserialize(#[from] serde_arrow::Error),

    /// A table lacks a column that every row depends on
    #[error("Column '{column}' not found in {dataset} table")]
    MissingColumn {
        /// Dataset the table belongs to
        dataset: String,
        /// Name of the missing column
        column: String,
    },

    /// Invalid or unreadable configuration
    #[error("Configuration error: {0}")]
    Config(String),

    /// The copy thread pool could not be started
    #[error("Thread pool error: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),

    /// A routed file would overwrite an existing destination
    #[error("Destination already exists: {}", .path.display())]
    DestinationExists {
        /// The conflicting destination path
        path: PathBuf,
    },
}

impl CohortError {
    /// Wrap an IO error with the path it occurred on
    pub fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Create a missing-input error for the given role
    pub fn missing_input(role: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        Self::MissingInput {
            role: role.into(),
            path: path.into(),
        }
    }
}

impl From<serde_json::Error> for CohortError {
    fn from(error: serde_json::Error) -> Self {
        Self::Config(error.to_string())
    }
}

/// Result type for cohort builder operations
pub type Result<T> = std::result::Result<T, CohortError>;
