//! voxbridge-test - Regression test framework for voxbridge
//!
//! This crate provides the regression harness used by the integration tests
//! of every voxbridge crate. A test creates a [`RegParams`], records a
//! sequence of numbered comparisons, and asserts on [`RegParams::cleanup`]:
//!
//! - **Compare** (default): failures are collected and reported at cleanup
//! - **Display**: every comparison is also printed as it runs
//!
//! # Usage
//!
//! ```ignore
//! use voxbridge_test::RegParams;
//!
//! let mut rp = RegParams::new("resolve");
//! rp.compare_values(1000.0, view.tuple_count() as f64, 0.0);
//! rp.compare_buffers(&expected, &actual);
//! assert!(rp.cleanup());
//! ```
//!
//! # Environment Variables
//!
//! - `REGTEST_MODE`: Set to "compare" or "display"

mod error;
mod params;

pub use error::{TestError, TestResult};
pub use params::{RegParams, RegTestMode};

use voxbridge_core::{Element, ImageGeometry};

/// Deterministic test volume: `value(i) = (i * step) mod modulus`.
///
/// # Arguments
///
/// * `geometry` - Volume extents
/// * `components` - Components per voxel
/// * `step` - Increment between consecutive elements
/// * `modulus` - Values wrap below this bound (must be > 0)
pub fn ramp_volume<T: Element>(
    geometry: &ImageGeometry,
    components: usize,
    step: u64,
    modulus: u64,
) -> Vec<T> {
    let n = geometry.voxel_count() * components;
    let modulus = modulus.max(1);
    (0..n as u64)
        .map(|i| T::from_f64((i.wrapping_mul(step) % modulus) as f64))
        .collect()
}

/// Build a geometry for a fixture, mapping failures to [`TestError`].
pub fn fixture_geometry(dims: [usize; 3]) -> TestResult<ImageGeometry> {
    ImageGeometry::new(dims).map_err(|e| TestError::Fixture(e.to_string()))
}
