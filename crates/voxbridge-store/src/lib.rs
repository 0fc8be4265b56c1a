//! voxbridge-store - Host data store model
//!
//! Filters treat the host's data store as an external collaborator reached
//! only through the [`DataStore`] trait. This crate defines that contract
//! and provides [`DataContainerArray`], an in-memory host with the same
//! container / attribute-matrix / array layout:
//!
//! - [`DataArrayPath`] - Address of one array
//! - [`DataArray`] / [`StringDataArray`] - Host-owned arrays
//! - [`DataContainer`] / [`AttributeMatrix`] - Containers and matrices
//! - [`DataStore`] - Lookup, create, borrow, remove and rename
//!
//! # Examples
//!
//! ```
//! use voxbridge_core::{ArrayHandle, DataKind, ImageGeometry};
//! use voxbridge_store::{DataArrayPath, DataContainerArray, DataStore};
//!
//! let mut dca = DataContainerArray::new();
//! dca.add_container("Volume", Some(ImageGeometry::new([4, 4, 2]).unwrap()))
//!     .unwrap();
//! dca.add_matrix("Volume", "CellData", 32).unwrap();
//!
//! let path = DataArrayPath::new("Volume", "CellData", "Phases");
//! dca.create_array(&path, DataKind::Int32, 1, 32).unwrap();
//! assert_eq!(dca.array(&path).unwrap().tuple_count(), 32);
//! ```

pub mod array;
pub mod container;
pub mod error;
pub mod path;
pub mod store;

pub use voxbridge_core;

pub use array::{DataArray, HostArray, StringDataArray, new_array};
pub use container::{AttributeMatrix, DataContainer};
pub use error::{StoreError, StoreResult};
pub use path::DataArrayPath;
pub use store::{DataContainerArray, DataStore};
