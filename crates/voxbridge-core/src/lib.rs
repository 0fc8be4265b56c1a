//! voxbridge-core - Typed array bridging for volumetric filters
//!
//! This crate provides the pieces every filter adapter needs between a
//! runtime-typed host array and a generically typed algorithm:
//!
//! - [`DataKind`] / [`Element`] - The closed set of element kinds
//! - [`ArrayHandle`] / [`resolve`] - Runtime kind resolution in a fixed order
//! - [`TypedSlice`] / [`SliceVisitor`] - One generic dispatch over all kinds
//! - [`ImageGeometry`] - Extents, spacing and origin of a 3D grid
//! - [`ImageView`] / [`ImageViewMut`] - Zero-copy volume views
//! - [`SliceView`] / [`Slice2`] - 2D cross-sections
//! - [`OutputBinder`] - Algorithm output written straight into host buffers
//!
//! Every view borrows its buffer; nothing in this crate allocates or frees
//! host storage.

pub mod error;
pub mod geometry;
pub mod kind;
pub mod output;
pub mod resolve;
pub mod slice;
pub mod typed;
pub mod view;

pub use error::{Error, Result};
pub use geometry::{Axis, ImageGeometry, SliceGeometry};
pub use kind::{DataKind, Element, KindSet, NUMERIC_KINDS, Scalar};
pub use output::{BoundOutput, OutputBinder, OutputStage};
pub use resolve::{
    ArrayHandle, classify, resolve, resolve_as, resolve_as_mut, resolve_bool, resolve_bool_mut,
    resolve_mut, resolve_numeric, resolve_numeric_mut,
};
pub use slice::{Slice2, SliceView};
pub use typed::{SliceVisitor, SliceVisitorMut, TypedSlice, TypedSliceMut};
pub use view::{ImageView, ImageViewMut};
