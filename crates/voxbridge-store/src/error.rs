//! Error types for voxbridge-store

use thiserror::Error;

use crate::path::DataArrayPath;

/// Errors raised by host data store operations
#[derive(Debug, Error, Clone, PartialEq)]
pub enum StoreError {
    /// No data container with this name
    #[error("data container '{0}' not found")]
    ContainerNotFound(String),

    /// A data container with this name already exists
    #[error("data container '{0}' already exists")]
    ContainerExists(String),

    /// No attribute matrix with this name in the container
    #[error("attribute matrix '{matrix}' not found in '{container}'")]
    MatrixNotFound { container: String, matrix: String },

    /// An attribute matrix with this name already exists
    #[error("attribute matrix '{matrix}' already exists in '{container}'")]
    MatrixExists { container: String, matrix: String },

    /// No array at this path
    #[error("data array '{0}' not found")]
    ArrayNotFound(DataArrayPath),

    /// An array already exists at this path with a different layout
    #[error("data array '{0}' already exists with a different type or shape")]
    ArrayExists(DataArrayPath),

    /// Array tuple count differs from its attribute matrix
    #[error("data array '{path}' has {actual} tuples but its matrix holds {expected}")]
    TupleCountMismatch {
        path: DataArrayPath,
        expected: usize,
        actual: usize,
    },

    /// Invalid array layout (zero components, ragged data)
    #[error("invalid array layout: {0}")]
    InvalidLayout(String),

    /// Two paths that must differ refer to the same array
    #[error("source and destination both refer to '{0}'")]
    SameArray(DataArrayPath),

    /// Empty or otherwise unusable name
    #[error("invalid name: '{0}'")]
    InvalidName(String),
}

/// Result type for store operations
pub type StoreResult<T> = Result<T, StoreError>;
