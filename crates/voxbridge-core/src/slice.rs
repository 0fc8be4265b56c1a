//! 2D cross-sections of a volume
//!
//! [`SliceView`] is a strided, zero-copy window onto one cross-section of
//! a borrowed volume. [`Slice2`] is an owned, packed 2D image used as the
//! input/output of per-slice algorithms and for writing a slice back with
//! [`ImageViewMut::write_slice`](crate::ImageViewMut::write_slice).

use crate::error::{Error, Result};
use crate::geometry::SliceGeometry;
use crate::kind::Element;

/// Strided read-only view of one cross-section
#[derive(Debug, Clone, Copy)]
pub struct SliceView<'a, T: Element> {
    data: &'a [T],
    geometry: SliceGeometry,
    components: usize,
    /// Tuple offset of `(0, 0)` in the volume buffer
    offset: usize,
    /// Tuple strides along `u` and `v`
    strides: [usize; 2],
}

impl<'a, T: Element> SliceView<'a, T> {
    pub(crate) fn from_parts(
        data: &'a [T],
        geometry: SliceGeometry,
        components: usize,
        offset: usize,
        strides: [usize; 2],
    ) -> Self {
        SliceView {
            data,
            geometry,
            components,
            offset,
            strides,
        }
    }

    #[inline]
    pub fn geometry(&self) -> &SliceGeometry {
        &self.geometry
    }

    #[inline]
    pub fn components(&self) -> usize {
        self.components
    }

    /// Components of the pixel at `(u, v)`
    #[inline]
    pub fn get(&self, u: usize, v: usize) -> Option<&'a [T]> {
        let [nu, nv] = self.geometry.dims();
        if u >= nu || v >= nv {
            return None;
        }
        let t = self.offset + u * self.strides[0] + v * self.strides[1];
        let c = self.components;
        Some(&self.data[t * c..(t + 1) * c])
    }

    /// Copy the cross-section into a packed owned slice.
    pub fn to_owned(&self) -> Slice2<T> {
        let [nu, nv] = self.geometry.dims();
        let mut data = Vec::with_capacity(nu * nv * self.components);
        for v in 0..nv {
            for u in 0..nu {
                if let Some(px) = self.get(u, v) {
                    data.extend_from_slice(px);
                }
            }
        }
        Slice2 {
            data,
            geometry: self.geometry,
            components: self.components,
        }
    }
}

/// Owned packed 2D image
///
/// Pixel `(u, v)` lives at tuple `u + v * nu`.
#[derive(Debug, Clone, PartialEq)]
pub struct Slice2<T: Element> {
    data: Vec<T>,
    geometry: SliceGeometry,
    components: usize,
}

impl<T: Element> Slice2<T> {
    /// Create a slice filled with `T::default()`.
    pub fn new(geometry: SliceGeometry, components: usize) -> Result<Self> {
        if components == 0 {
            return Err(Error::InvalidParameter(
                "component count must be at least 1".to_string(),
            ));
        }
        Ok(Slice2 {
            data: vec![T::default(); geometry.pixel_count() * components],
            geometry,
            components,
        })
    }

    /// Wrap packed data.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidParameter`] if `data` does not hold exactly
    /// `pixel_count * components` elements.
    pub fn from_data(data: Vec<T>, geometry: SliceGeometry, components: usize) -> Result<Self> {
        if components == 0 || data.len() != geometry.pixel_count() * components {
            return Err(Error::InvalidParameter(format!(
                "slice data holds {} elements, {:?} x {} requires {}",
                data.len(),
                geometry.dims(),
                components,
                geometry.pixel_count() * components
            )));
        }
        Ok(Slice2 {
            data,
            geometry,
            components,
        })
    }

    #[inline]
    pub fn geometry(&self) -> &SliceGeometry {
        &self.geometry
    }

    #[inline]
    pub fn components(&self) -> usize {
        self.components
    }

    #[inline]
    pub fn as_slice(&self) -> &[T] {
        &self.data
    }

    #[inline]
    pub fn as_mut_slice(&mut self) -> &mut [T] {
        &mut self.data
    }

    pub fn into_vec(self) -> Vec<T> {
        self.data
    }

    #[inline]
    pub fn get(&self, u: usize, v: usize) -> Option<&[T]> {
        let t = self.geometry.tuple_index(u, v)?;
        let c = self.components;
        Some(&self.data[t * c..(t + 1) * c])
    }

    #[inline]
    pub fn get_mut(&mut self, u: usize, v: usize) -> Option<&mut [T]> {
        let t = self.geometry.tuple_index(u, v)?;
        let c = self.components;
        Some(&mut self.data[t * c..(t + 1) * c])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::{Axis, ImageGeometry};
    use crate::view::ImageView;

    #[test]
    fn test_slice_view_along_each_axis() {
        let geom = ImageGeometry::new([2, 3, 4]).unwrap();
        let data: Vec<u32> = (0..24).collect();
        let view = ImageView::new(&data, geom, 1).unwrap();

        // z = 1: (x, y) plane starting at tuple 6
        let z = view.slice(Axis::Z, 1).unwrap();
        assert_eq!(z.geometry().dims(), [2, 3]);
        assert_eq!(z.get(0, 0), Some(&[6u32][..]));
        assert_eq!(z.get(1, 2), Some(&[11u32][..]));

        // y = 2: (x, z) plane
        let y = view.slice(Axis::Y, 2).unwrap();
        assert_eq!(y.geometry().dims(), [2, 4]);
        assert_eq!(y.get(1, 3), Some(&[1 + 2 * 2 + 3 * 6][..]));

        // x = 1: (y, z) plane
        let x = view.slice(Axis::X, 1).unwrap();
        assert_eq!(x.geometry().dims(), [3, 4]);
        assert_eq!(x.get(2, 1), Some(&[1 + 2 * 2 + 6][..]));
        assert_eq!(x.get(3, 0), None);
    }

    #[test]
    fn test_slice_out_of_range() {
        let geom = ImageGeometry::new([2, 2, 2]).unwrap();
        let data = vec![0u8; 8];
        let view = ImageView::new(&data, geom, 1).unwrap();
        assert_eq!(
            view.slice(Axis::Y, 2).unwrap_err(),
            Error::IndexOutOfBounds {
                axis: Axis::Y,
                index: 2,
                extent: 2
            }
        );
    }

    #[test]
    fn test_to_owned_packs_pixels() {
        let geom = ImageGeometry::new([2, 2, 2]).unwrap();
        let data: Vec<i16> = (0..16).collect();
        let view = ImageView::new(&data, geom, 2).unwrap();
        let owned = view.slice(Axis::X, 1).unwrap().to_owned();
        assert_eq!(owned.as_slice(), &[2, 3, 6, 7, 10, 11, 14, 15]);
        assert_eq!(owned.get(1, 1), Some(&[14i16, 15][..]));
    }

    #[test]
    fn test_from_data_checks_length() {
        let geom = ImageGeometry::new([2, 3, 1]).unwrap().slice_geometry(Axis::Z);
        assert!(Slice2::from_data(vec![0u8; 6], geom, 1).is_ok());
        assert!(Slice2::from_data(vec![0u8; 5], geom, 1).is_err());
        assert!(Slice2::<u8>::new(geom, 0).is_err());
    }
}
