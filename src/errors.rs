//! Shared error types for loading the Pokedex and building filter criteria.

use std::path::PathBuf;
use thiserror::Error;

use crate::dataset::Stat;

/// Raised when the Pokedex dataset cannot be loaded.
///
/// Always fatal: nothing can be served without data, so callers surface
/// the message and exit instead of retrying.
#[derive(Debug, Error)]
pub enum DataLoadError {
    /// Dataset file does not exist
    #[error("dataset not found at {}", path.display())]
    Missing { path: PathBuf },

    /// Dataset file exists but could not be read as CSV
    #[error("failed to read dataset {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    /// A required column is absent after header trimming
    #[error("dataset is missing required column '{column}'")]
    MissingColumn { column: &'static str },

    /// A cell failed to parse or violated its declared domain
    #[error("row {row}, column '{column}': {message}")]
    BadRow {
        row: usize,
        column: &'static str,
        message: String,
    },
}

/// Raised when user-supplied criteria fall outside a stat's domain.
///
/// Recoverable: callers clamp the offending threshold to the nearest
/// valid bound and rerun, so one bad input never aborts the process.
#[derive(Debug, Error)]
pub enum CriteriaError {
    #[error("minimum {stat} of {value} exceeds the stat maximum of {max}")]
    ThresholdOutOfRange { stat: Stat, value: u16, max: u16 },
}
