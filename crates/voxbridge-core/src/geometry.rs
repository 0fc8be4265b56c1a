//! Volume geometry descriptors
//!
//! [`ImageGeometry`] maps a flat buffer onto a 3D voxel grid. Tuples are
//! laid out with `x` varying fastest, then `y`, then `z`:
//!
//! ```text
//! tuple(x, y, z) = x + y * nx + z * nx * ny
//! ```
//!
//! Spacing and origin are carried verbatim; no unit conversion is applied
//! anywhere in the bridging layer.

use crate::error::{Error, Result};

/// One of the three volume axes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Axis {
    X,
    Y,
    /// Slowest-varying axis
    #[default]
    Z,
}

impl Axis {
    pub const ALL: [Axis; 3] = [Axis::X, Axis::Y, Axis::Z];

    /// Position of this axis in `[x, y, z]` arrays
    #[inline]
    pub const fn index(self) -> usize {
        match self {
            Axis::X => 0,
            Axis::Y => 1,
            Axis::Z => 2,
        }
    }

    /// The two remaining axes, in increasing order
    pub const fn others(self) -> [Axis; 2] {
        match self {
            Axis::X => [Axis::Y, Axis::Z],
            Axis::Y => [Axis::X, Axis::Z],
            Axis::Z => [Axis::X, Axis::Y],
        }
    }
}

/// Extents, spacing and origin of a 3D voxel grid
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ImageGeometry {
    dims: [usize; 3],
    spacing: [f32; 3],
    origin: [f32; 3],
}

impl ImageGeometry {
    /// Create a geometry with unit spacing at the origin.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidGeometry`] if any extent is zero or the
    /// voxel count does not fit in `usize`.
    pub fn new(dims: [usize; 3]) -> Result<Self> {
        if dims.contains(&0) {
            return Err(Error::InvalidGeometry(dims));
        }
        let [nx, ny, nz] = dims;
        if nx.checked_mul(ny).and_then(|n| n.checked_mul(nz)).is_none() {
            return Err(Error::InvalidGeometry(dims));
        }
        Ok(ImageGeometry {
            dims,
            spacing: [1.0; 3],
            origin: [0.0; 3],
        })
    }

    pub fn with_spacing(mut self, spacing: [f32; 3]) -> Self {
        self.spacing = spacing;
        self
    }

    pub fn with_origin(mut self, origin: [f32; 3]) -> Self {
        self.origin = origin;
        self
    }

    #[inline]
    pub fn dims(&self) -> [usize; 3] {
        self.dims
    }

    #[inline]
    pub fn spacing(&self) -> [f32; 3] {
        self.spacing
    }

    #[inline]
    pub fn origin(&self) -> [f32; 3] {
        self.origin
    }

    /// Extent along one axis
    #[inline]
    pub fn extent(&self, axis: Axis) -> usize {
        self.dims[axis.index()]
    }

    /// Total number of voxels (tuples). Never overflows; `new` rejects
    /// extents whose product does not fit.
    #[inline]
    pub fn voxel_count(&self) -> usize {
        self.dims.iter().product()
    }

    /// Tuple index of `(x, y, z)`, or `None` when outside the grid.
    #[inline]
    pub fn tuple_index(&self, x: usize, y: usize, z: usize) -> Option<usize> {
        let [nx, ny, nz] = self.dims;
        if x >= nx || y >= ny || z >= nz {
            return None;
        }
        Some(x + y * nx + z * nx * ny)
    }

    /// Stride in tuples between neighbours along `axis`
    #[inline]
    pub fn stride(&self, axis: Axis) -> usize {
        let [nx, ny, _] = self.dims;
        match axis {
            Axis::X => 1,
            Axis::Y => nx,
            Axis::Z => nx * ny,
        }
    }

    /// Geometry of a cross-section perpendicular to `axis`.
    ///
    /// The remaining two axes keep their order, so a `Z` slice is `(x, y)`,
    /// a `Y` slice is `(x, z)` and an `X` slice is `(y, z)`.
    pub fn slice_geometry(&self, axis: Axis) -> SliceGeometry {
        let [u, v] = axis.others();
        SliceGeometry {
            normal: axis,
            dims: [self.extent(u), self.extent(v)],
            spacing: [self.spacing[u.index()], self.spacing[v.index()]],
            origin: [self.origin[u.index()], self.origin[v.index()]],
        }
    }
}

/// Extents, spacing and origin of a 2D cross-section
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SliceGeometry {
    normal: Axis,
    dims: [usize; 2],
    spacing: [f32; 2],
    origin: [f32; 2],
}

impl SliceGeometry {
    /// Axis the slice was cut perpendicular to
    #[inline]
    pub fn normal(&self) -> Axis {
        self.normal
    }

    #[inline]
    pub fn dims(&self) -> [usize; 2] {
        self.dims
    }

    #[inline]
    pub fn spacing(&self) -> [f32; 2] {
        self.spacing
    }

    #[inline]
    pub fn origin(&self) -> [f32; 2] {
        self.origin
    }

    /// Number of pixels (tuples) in the slice
    #[inline]
    pub fn pixel_count(&self) -> usize {
        self.dims[0] * self.dims[1]
    }

    /// Tuple index of `(u, v)` in a packed slice buffer
    #[inline]
    pub fn tuple_index(&self, u: usize, v: usize) -> Option<usize> {
        if u >= self.dims[0] || v >= self.dims[1] {
            return None;
        }
        Some(u + v * self.dims[0])
    }
}
