//! voxbridge-filter - Filter execution shell and algorithm adapters
//!
//! This crate runs generically typed volumetric algorithms against a host
//! [`DataStore`](voxbridge_store::DataStore):
//!
//! - [`FilterShell`] - Validate, resolve, run and finalize one filter run
//! - [`VolumeAlgorithm`] / [`SliceAlgorithm`] - The delegated algorithm seam
//! - [`SliceWise`] - Slice-by-slice execution of a 2D algorithm
//! - [`BinaryThreshold`] / [`CastImage`] - Built-in per-voxel adapters
//! - [`ShellConfig`] / [`FilterDocument`] - JSON configuration
//!
//! # Examples
//!
//! ```
//! use voxbridge_core::ImageGeometry;
//! use voxbridge_filter::{BinaryThreshold, FilterShell, ShellConfig};
//! use voxbridge_store::{DataArray, DataArrayPath, DataContainerArray};
//!
//! let mut dca = DataContainerArray::new();
//! dca.add_container("Volume", Some(ImageGeometry::new([4, 1, 1]).unwrap()))
//!     .unwrap();
//! dca.add_matrix("Volume", "CellData", 4).unwrap();
//! let input = DataArrayPath::new("Volume", "CellData", "Density");
//! let values = DataArray::from_vec("Density", 1, vec![0.1f32, 0.4, 0.6, 0.9]).unwrap();
//! dca.insert_array(&input, Box::new(values)).unwrap();
//!
//! let mut shell = FilterShell::new(ShellConfig::save_as_new(input.clone(), "Mask"));
//! shell
//!     .execute(&mut dca, &mut BinaryThreshold::new(0.5, 1.0))
//!     .unwrap();
//! assert_eq!(
//!     dca.values::<u8>(&input.with_array("Mask")).unwrap(),
//!     [0, 0, 255, 255]
//! );
//! ```

pub mod algorithm;
pub mod cast;
pub mod config;
pub mod error;
pub mod shell;
pub mod threshold;

pub use algorithm::{ComponentRule, SliceAlgorithm, SliceWise, VolumeAlgorithm};
pub use cast::CastImage;
pub use config::{FilterDocument, ShellConfig};
pub use error::{AlgorithmError, ErrorCategory, FilterError, FilterResult};
pub use shell::{FilterShell, OutputPlan, ShellState};
pub use threshold::{BinaryThreshold, ThresholdParams};
