//! Error types for voxbridge-filter
//!
//! Every failure that leaves [`FilterShell`](crate::FilterShell) is a
//! [`FilterError`]. Each variant belongs to one [`ErrorCategory`] and maps
//! to a stable negative code that hosts can report next to the message.

use thiserror::Error;
use voxbridge_store::{DataArrayPath, StoreError};

/// Failure raised by a delegated algorithm
#[derive(Debug, Error, Clone, PartialEq)]
#[error("{algorithm}: {description}")]
pub struct AlgorithmError {
    /// Name of the algorithm that failed
    pub algorithm: String,
    /// Human-readable description
    pub description: String,
}

impl AlgorithmError {
    pub fn new(algorithm: impl Into<String>, description: impl Into<String>) -> Self {
        AlgorithmError {
            algorithm: algorithm.into(),
            description: description.into(),
        }
    }
}

/// Broad class of a filter failure
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCategory {
    /// Missing or malformed input, detected before anything runs
    Validation,
    /// Input element kind outside the accepted set
    UnsupportedType,
    /// The delegated algorithm failed; its output must not be trusted
    Algorithm,
    /// Creating, removing or renaming a host array failed
    StoreMutation,
    /// Configuration could not be read
    Configuration,
}

/// Errors reported by the filter execution shell
#[derive(Debug, Error)]
pub enum FilterError {
    #[error("data container '{0}' does not exist")]
    MissingContainer(String),

    #[error("data container '{0}' has no image geometry attached")]
    MissingGeometry(String),

    #[error("attribute matrix '{matrix}' does not exist in data container '{container}'")]
    MissingMatrix { container: String, matrix: String },

    #[error("input array '{0}' does not exist")]
    MissingArray(DataArrayPath),

    #[error("array '{path}' has {actual} component(s), expected {expected}")]
    ComponentMismatch {
        path: DataArrayPath,
        expected: String,
        actual: usize,
    },

    #[error("array '{path}' has {actual} tuples but the geometry holds {expected} voxels")]
    TupleMismatch {
        path: DataArrayPath,
        expected: usize,
        actual: usize,
    },

    #[error("invalid output array name '{0}'")]
    InvalidOutputName(String),

    #[error("output array '{0}' already exists")]
    OutputExists(DataArrayPath),

    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    #[error("type not supported: {0}")]
    UnsupportedType(voxbridge_core::Error),

    #[error("algorithm failed: {0}")]
    Algorithm(#[from] AlgorithmError),

    /// View construction or output binding failed
    #[error("could not bridge arrays to the algorithm: {0}")]
    Bridge(voxbridge_core::Error),

    #[error("store mutation failed: {0}")]
    StoreMutation(StoreError),

    #[error("configuration error: {0}")]
    Config(String),
}

impl FilterError {
    /// Stable negative code reported to the host
    pub fn code(&self) -> i32 {
        match self {
            FilterError::MissingContainer(_) => -3000,
            FilterError::MissingGeometry(_) => -3001,
            FilterError::MissingMatrix { .. } => -3002,
            FilterError::MissingArray(_) => -3003,
            FilterError::ComponentMismatch { .. } => -3004,
            FilterError::TupleMismatch { .. } => -3005,
            FilterError::InvalidOutputName(_) => -3006,
            FilterError::OutputExists(_) => -3007,
            FilterError::InvalidParameter(_) => -3008,
            FilterError::UnsupportedType(_) => -3010,
            FilterError::Algorithm(_) => -3020,
            FilterError::Bridge(_) => -3021,
            FilterError::StoreMutation(_) => -3030,
            FilterError::Config(_) => -3040,
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            FilterError::MissingContainer(_)
            | FilterError::MissingGeometry(_)
            | FilterError::MissingMatrix { .. }
            | FilterError::MissingArray(_)
            | FilterError::ComponentMismatch { .. }
            | FilterError::TupleMismatch { .. }
            | FilterError::InvalidOutputName(_)
            | FilterError::OutputExists(_)
            | FilterError::InvalidParameter(_) => ErrorCategory::Validation,
            FilterError::UnsupportedType(_) => ErrorCategory::UnsupportedType,
            FilterError::Algorithm(_) | FilterError::Bridge(_) => ErrorCategory::Algorithm,
            FilterError::StoreMutation(_) => ErrorCategory::StoreMutation,
            FilterError::Config(_) => ErrorCategory::Configuration,
        }
    }

    /// Human-readable message (same as `Display`)
    pub fn message(&self) -> String {
        self.to_string()
    }
}

/// Result type for filter operations
pub type FilterResult<T> = Result<T, FilterError>;
