//! voxbridge - Generic pixel-type dispatch and array bridging
//!
//! Volumetric filters in a host application see arrays whose element type
//! is only known at run time, while the algorithms they delegate to are
//! generic over that type. voxbridge sits between the two:
//!
//! - Runtime kind resolution over a closed set of element kinds
//! - Zero-copy volume and slice views over host buffers
//! - Algorithm output written straight into host-owned arrays
//! - A filter shell that validates, resolves, runs and finalizes one run
//!
//! # Example
//!
//! ```
//! use voxbridge::filter::{CastImage, FilterShell, ShellConfig};
//! use voxbridge::store::{DataArray, DataArrayPath, DataContainerArray, DataStore};
//! use voxbridge::{DataKind, ImageGeometry};
//!
//! let mut dca = DataContainerArray::new();
//! dca.add_container("Volume", Some(ImageGeometry::new([2, 2, 2]).unwrap()))
//!     .unwrap();
//! dca.add_matrix("Volume", "CellData", 8).unwrap();
//! let input = DataArrayPath::new("Volume", "CellData", "Phases");
//! let phases = DataArray::from_vec("Phases", 1, vec![1i32, 2, 2, 1, 3, 3, 1, 2]).unwrap();
//! dca.insert_array(&input, Box::new(phases)).unwrap();
//!
//! let mut shell = FilterShell::new(ShellConfig::in_place(input.clone()));
//! shell.execute(&mut dca, &mut CastImage::<f32>::new()).unwrap();
//! assert_eq!(dca.array_kind(&input).unwrap(), Some(DataKind::Float32));
//! assert!(dca.contains_array(&input));
//! ```

// Re-export core types (used by every other crate)
pub use voxbridge_core::*;

// Re-export the other crates as modules to avoid name conflicts
pub use voxbridge_filter as filter;
pub use voxbridge_store as store;
