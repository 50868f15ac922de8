//! Crate-level error type.

use crate::instruments::{DmmError, InvalidResolution, ReadingOutOfRange};
use crate::units::UnrecognizedUnit;

/// Result type for fallible crate operations.
pub type LabResult<T> = Result<T, LabError>;

/// Any error raised by this crate.
#[derive(Debug, thiserror::Error)]
pub enum LabError {
    #[error(transparent)]
    Unit(#[from] UnrecognizedUnit),

    #[error(transparent)]
    Range(#[from] ReadingOutOfRange),

    #[error(transparent)]
    Resolution(#[from] InvalidResolution),

    #[error("Configuration error: {0}")]
    Configuration(String),
}

impl From<DmmError> for LabError {
    fn from(err: DmmError) -> Self {
        match err {
            DmmError::OutOfRange(err) => LabError::Range(err),
            DmmError::InvalidResolution(err) => LabError::Resolution(err),
        }
    }
}
