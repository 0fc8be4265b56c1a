//! Error types for voxbridge-core
//!
//! Every failure the bridging layer can report before or while touching a
//! host buffer. Nothing here reads or writes out of bounds: a mismatch is
//! always surfaced as one of these variants instead.

use thiserror::Error;

use crate::geometry::Axis;

/// Core bridging error
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    /// The array's element kind is not in the requested kind set
    #[error("array '{name}' has unsupported element type '{type_name}'")]
    UnsupportedType { name: String, type_name: String },

    /// Buffer length does not match geometry × components
    #[error(
        "buffer holds {actual} elements but geometry {dims:?} with {components} component(s) requires {expected}"
    )]
    ShapeMismatch {
        dims: [usize; 3],
        components: usize,
        expected: usize,
        actual: usize,
    },

    /// Invalid geometry extents
    #[error("invalid geometry extents: {0:?}")]
    InvalidGeometry([usize; 3]),

    /// Index out of bounds along an axis
    #[error("index {index} out of bounds along {axis:?} (extent {extent})")]
    IndexOutOfBounds {
        axis: Axis,
        index: usize,
        extent: usize,
    },

    /// A 2D slice does not fit the target volume
    #[error("slice mismatch: expected {expected:?} x {expected_components}, got {actual:?} x {actual_components}")]
    SliceMismatch {
        expected: [usize; 2],
        expected_components: usize,
        actual: [usize; 2],
        actual_components: usize,
    },

    /// Destination buffer smaller than the stage output
    #[error("output capacity {capacity} is smaller than expected output length {expected}")]
    CapacityTooSmall { expected: usize, capacity: usize },

    /// Invalid parameter value
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),
}

/// Result type alias for bridging operations
pub type Result<T> = std::result::Result<T, Error>;
