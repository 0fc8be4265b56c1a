//! Data containers and attribute matrices
//!
//! The in-memory host model mirrors the layout filters expect:
//!
//! ```text
//! DataContainerArray
//!   └─ DataContainer (optional ImageGeometry)
//!        └─ AttributeMatrix (tuple count)
//!             └─ HostArray ...
//! ```
//!
//! Entries keep insertion order, like the host's own containers.

use voxbridge_core::ImageGeometry;

use crate::array::HostArray;
use crate::error::{StoreError, StoreResult};

/// Named set of arrays sharing one tuple count
pub struct AttributeMatrix {
    name: String,
    tuple_count: usize,
    pub(crate) arrays: Vec<Box<dyn HostArray>>,
}

impl AttributeMatrix {
    pub fn new(name: &str, tuple_count: usize) -> Self {
        AttributeMatrix {
            name: name.to_string(),
            tuple_count,
            arrays: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn tuple_count(&self) -> usize {
        self.tuple_count
    }

    /// Array names in insertion order
    pub fn array_names(&self) -> Vec<&str> {
        self.arrays.iter().map(|a| a.name()).collect()
    }

    pub fn len(&self) -> usize {
        self.arrays.len()
    }

    pub fn is_empty(&self) -> bool {
        self.arrays.is_empty()
    }

    pub fn get(&self, name: &str) -> Option<&dyn HostArray> {
        self.arrays
            .iter()
            .find(|a| a.name() == name)
            .map(|a| a.as_ref())
    }

    pub(crate) fn position(&self, name: &str) -> Option<usize> {
        self.arrays.iter().position(|a| a.name() == name)
    }

    /// Add an array, enforcing the matrix tuple count and unique names.
    pub(crate) fn insert(&mut self, array: Box<dyn HostArray>) -> StoreResult<()> {
        if array.name().is_empty() {
            return Err(StoreError::InvalidName(String::new()));
        }
        if self.position(array.name()).is_some() {
            return Err(StoreError::InvalidName(format!(
                "{}/{}",
                self.name,
                array.name()
            )));
        }
        if array.tuple_count() != self.tuple_count {
            return Err(StoreError::InvalidLayout(format!(
                "array '{}' has {} tuples, matrix '{}' holds {}",
                array.name(),
                array.tuple_count(),
                self.name,
                self.tuple_count
            )));
        }
        self.arrays.push(array);
        Ok(())
    }
}

/// Named container with an optional volumetric geometry
pub struct DataContainer {
    name: String,
    geometry: Option<ImageGeometry>,
    pub(crate) matrices: Vec<AttributeMatrix>,
}

impl DataContainer {
    pub fn new(name: &str, geometry: Option<ImageGeometry>) -> Self {
        DataContainer {
            name: name.to_string(),
            geometry,
            matrices: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn geometry(&self) -> Option<&ImageGeometry> {
        self.geometry.as_ref()
    }

    pub fn set_geometry(&mut self, geometry: Option<ImageGeometry>) {
        self.geometry = geometry;
    }

    pub fn matrix(&self, name: &str) -> Option<&AttributeMatrix> {
        self.matrices.iter().find(|m| m.name() == name)
    }

    pub(crate) fn matrix_mut(&mut self, name: &str) -> Option<&mut AttributeMatrix> {
        self.matrices.iter_mut().find(|m| m.name() == name)
    }

    pub fn matrix_names(&self) -> Vec<&str> {
        self.matrices.iter().map(|m| m.name()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::array::DataArray;

    #[test]
    fn test_insert_enforces_tuples_and_names() {
        let mut matrix = AttributeMatrix::new("CellData", 8);
        let a = DataArray::<u8>::new("A", 1, 8).unwrap();
        let dup = DataArray::<f32>::new("A", 1, 8).unwrap();
        let short = DataArray::<u8>::new("B", 1, 7).unwrap();

        matrix.insert(Box::new(a)).unwrap();
        assert!(matrix.insert(Box::new(dup)).is_err());
        assert!(matrix.insert(Box::new(short)).is_err());
        assert_eq!(matrix.array_names(), ["A"]);
        assert_eq!(matrix.len(), 1);
    }

    #[test]
    fn test_matrix_lookup() {
        let mut container = DataContainer::new("Volume", None);
        container.matrices.push(AttributeMatrix::new("CellData", 4));
        assert!(container.matrix("CellData").is_some());
        assert!(container.matrix("Other").is_none());
        assert!(container.geometry().is_none());
    }
}
