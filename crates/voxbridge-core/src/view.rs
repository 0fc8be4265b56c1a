//! Zero-copy volume views over host buffers
//!
//! [`ImageView`] and [`ImageViewMut`] borrow a contiguous host buffer and
//! address it through an [`ImageGeometry`]. Nothing is copied and nothing
//! is owned: the lifetime parameter ties every view to the call that
//! borrowed the buffer.
//!
//! Construction checks `voxel_count × components == buffer.len()` up
//! front, so every later index computation stays in bounds.
//!
//! # Examples
//!
//! ```
//! use voxbridge_core::{Axis, ImageGeometry, ImageViewMut};
//!
//! let geom = ImageGeometry::new([4, 3, 2]).unwrap();
//! let mut data = vec![0u8; 24];
//! let mut view = ImageViewMut::new(&mut data, geom, 1).unwrap();
//! view.set(1, 2, 1, &[7]).unwrap();
//!
//! let slice = view.as_view().slice(Axis::Z, 1).unwrap();
//! assert_eq!(slice.get(1, 2), Some(&[7u8][..]));
//! ```

use crate::error::{Error, Result};
use crate::geometry::{Axis, ImageGeometry};
use crate::kind::Element;
use crate::slice::{Slice2, SliceView};

fn check_shape(len: usize, geometry: &ImageGeometry, components: usize) -> Result<()> {
    if components == 0 {
        return Err(Error::InvalidParameter(
            "component count must be at least 1".to_string(),
        ));
    }
    let Some(expected) = geometry.voxel_count().checked_mul(components) else {
        return Err(Error::InvalidParameter(format!(
            "{} voxels x {} components overflows usize",
            geometry.voxel_count(),
            components
        )));
    };
    if len != expected {
        return Err(Error::ShapeMismatch {
            dims: geometry.dims(),
            components,
            expected,
            actual: len,
        });
    }
    Ok(())
}

fn check_index(geometry: &ImageGeometry, axis: Axis, index: usize) -> Result<()> {
    let extent = geometry.extent(axis);
    if index >= extent {
        return Err(Error::IndexOutOfBounds {
            axis,
            index,
            extent,
        });
    }
    Ok(())
}

/// Read-only volume view over a borrowed buffer
#[derive(Debug, Clone, Copy)]
pub struct ImageView<'a, T: Element> {
    data: &'a [T],
    geometry: ImageGeometry,
    components: usize,
}

impl<'a, T: Element> ImageView<'a, T> {
    /// Wrap `data` as a volume.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ShapeMismatch`] if the buffer length is not
    /// `geometry.voxel_count() * components`.
    pub fn new(data: &'a [T], geometry: ImageGeometry, components: usize) -> Result<Self> {
        check_shape(data.len(), &geometry, components)?;
        Ok(ImageView {
            data,
            geometry,
            components,
        })
    }

    #[inline]
    pub fn geometry(&self) -> &ImageGeometry {
        &self.geometry
    }

    #[inline]
    pub fn components(&self) -> usize {
        self.components
    }

    #[inline]
    pub fn tuple_count(&self) -> usize {
        self.geometry.voxel_count()
    }

    /// The borrowed buffer
    #[inline]
    pub fn as_slice(&self) -> &'a [T] {
        self.data
    }

    /// Components of the voxel at `(x, y, z)`
    #[inline]
    pub fn get(&self, x: usize, y: usize, z: usize) -> Option<&'a [T]> {
        let t = self.geometry.tuple_index(x, y, z)?;
        let c = self.components;
        Some(&self.data[t * c..(t + 1) * c])
    }

    /// Iterate over voxels in storage order.
    pub fn tuples(&self) -> std::slice::ChunksExact<'a, T> {
        self.data.chunks_exact(self.components)
    }

    /// Zero-copy cross-section at `index` along `axis`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::IndexOutOfBounds`] if `index` is past the extent.
    pub fn slice(&self, axis: Axis, index: usize) -> Result<SliceView<'a, T>> {
        check_index(&self.geometry, axis, index)?;
        let [u, v] = axis.others();
        Ok(SliceView::from_parts(
            self.data,
            self.geometry.slice_geometry(axis),
            self.components,
            index * self.geometry.stride(axis),
            [self.geometry.stride(u), self.geometry.stride(v)],
        ))
    }
}

/// Mutable volume view over a borrowed buffer
///
/// Writes go straight into the host buffer.
#[derive(Debug)]
pub struct ImageViewMut<'a, T: Element> {
    data: &'a mut [T],
    geometry: ImageGeometry,
    components: usize,
}

impl<'a, T: Element> ImageViewMut<'a, T> {
    /// Wrap `data` as a writable volume.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ShapeMismatch`] if the buffer length is not
    /// `geometry.voxel_count() * components`.
    pub fn new(data: &'a mut [T], geometry: ImageGeometry, components: usize) -> Result<Self> {
        check_shape(data.len(), &geometry, components)?;
        Ok(ImageViewMut {
            data,
            geometry,
            components,
        })
    }

    #[inline]
    pub fn geometry(&self) -> &ImageGeometry {
        &self.geometry
    }

    #[inline]
    pub fn components(&self) -> usize {
        self.components
    }

    #[inline]
    pub fn tuple_count(&self) -> usize {
        self.geometry.voxel_count()
    }

    /// Reborrow as a read-only view.
    pub fn as_view(&self) -> ImageView<'_, T> {
        ImageView {
            data: &*self.data,
            geometry: self.geometry,
            components: self.components,
        }
    }

    #[inline]
    pub fn as_slice(&self) -> &[T] {
        &*self.data
    }

    #[inline]
    pub fn as_mut_slice(&mut self) -> &mut [T] {
        &mut *self.data
    }

    #[inline]
    pub fn get(&self, x: usize, y: usize, z: usize) -> Option<&[T]> {
        let t = self.geometry.tuple_index(x, y, z)?;
        let c = self.components;
        Some(&self.data[t * c..(t + 1) * c])
    }

    #[inline]
    pub fn get_mut(&mut self, x: usize, y: usize, z: usize) -> Option<&mut [T]> {
        let t = self.geometry.tuple_index(x, y, z)?;
        let c = self.components;
        Some(&mut self.data[t * c..(t + 1) * c])
    }

    /// Overwrite the voxel at `(x, y, z)`.
    ///
    /// # Errors
    ///
    /// Returns an error if the position is outside the grid or `value`
    /// does not hold exactly one tuple.
    pub fn set(&mut self, x: usize, y: usize, z: usize, value: &[T]) -> Result<()> {
        if value.len() != self.components {
            return Err(Error::InvalidParameter(format!(
                "expected {} component(s), got {}",
                self.components,
                value.len()
            )));
        }
        for (axis, index) in [(Axis::X, x), (Axis::Y, y), (Axis::Z, z)] {
            check_index(&self.geometry, axis, index)?;
        }
        if let Some(dst) = self.get_mut(x, y, z) {
            dst.copy_from_slice(value);
        }
        Ok(())
    }

    pub fn fill(&mut self, value: T) {
        self.data.fill(value);
    }

    /// Iterate mutably over voxels in storage order.
    pub fn tuples_mut(&mut self) -> std::slice::ChunksExactMut<'_, T> {
        self.data.chunks_exact_mut(self.components)
    }

    /// Write `slice` into the cross-section at `index` along `axis`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::IndexOutOfBounds`] if `index` is past the extent
    /// and [`Error::SliceMismatch`] if the slice extents or component count
    /// differ from this volume's cross-section.
    pub fn write_slice(&mut self, axis: Axis, index: usize, slice: &Slice2<T>) -> Result<()> {
        check_index(&self.geometry, axis, index)?;
        let expected = self.geometry.slice_geometry(axis);
        if slice.geometry().dims() != expected.dims() || slice.components() != self.components {
            return Err(Error::SliceMismatch {
                expected: expected.dims(),
                expected_components: self.components,
                actual: slice.geometry().dims(),
                actual_components: slice.components(),
            });
        }

        let [u_axis, v_axis] = axis.others();
        let [su, sv] = [self.geometry.stride(u_axis), self.geometry.stride(v_axis)];
        let base = index * self.geometry.stride(axis);
        let c = self.components;
        let [nu, nv] = expected.dims();
        let src = slice.as_slice();

        for v in 0..nv {
            for u in 0..nu {
                let t = base + u * su + v * sv;
                let s = u + v * nu;
                self.data[t * c..(t + 1) * c].copy_from_slice(&src[s * c..(s + 1) * c]);
            }
        }
        Ok(())
    }
}
