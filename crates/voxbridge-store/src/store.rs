//! The host data store contract and its in-memory implementation
//!
//! Filters never own host arrays. They reach them through [`DataStore`],
//! which hands out call-scoped borrows and performs the few structural
//! mutations a filter needs (create, remove, rename). Every operation
//! reports failure explicitly; none of them silently does nothing.

use voxbridge_core::{ArrayHandle, DataKind, Element, ImageGeometry, resolve_as, resolve_as_mut};

use crate::array::{HostArray, new_array};
use crate::container::{AttributeMatrix, DataContainer};
use crate::error::{StoreError, StoreResult};
use crate::path::DataArrayPath;

/// Operations a filter needs from the host data store
pub trait DataStore {
    /// Attached volumetric geometry of a container.
    ///
    /// Returns `Ok(None)` when the container exists without a geometry and
    /// [`StoreError::ContainerNotFound`] when it does not exist.
    fn geometry(&self, container: &str) -> StoreResult<Option<ImageGeometry>>;

    /// Tuple count of the attribute matrix named by `path`.
    fn matrix_tuple_count(&self, path: &DataArrayPath) -> StoreResult<usize>;

    /// Look up an array.
    fn array(&self, path: &DataArrayPath) -> StoreResult<&dyn ArrayHandle>;

    /// True if an array exists at `path`.
    fn contains_array(&self, path: &DataArrayPath) -> bool {
        self.array(path).is_ok()
    }

    /// Create a zero-filled array unless an identical one already exists.
    ///
    /// An existing array with a different kind, component count or tuple
    /// count is an error rather than being replaced.
    fn create_array(
        &mut self,
        path: &DataArrayPath,
        kind: DataKind,
        components: usize,
        tuples: usize,
    ) -> StoreResult<()>;

    /// Borrow `src` immutably and `dst` mutably at the same time.
    fn array_pair_mut(
        &mut self,
        src: &DataArrayPath,
        dst: &DataArrayPath,
    ) -> StoreResult<(&dyn ArrayHandle, &mut dyn ArrayHandle)>;

    /// Remove an array.
    fn remove_array(&mut self, path: &DataArrayPath) -> StoreResult<()>;

    /// Rename an array within its matrix.
    fn rename_array(&mut self, path: &DataArrayPath, new_name: &str) -> StoreResult<()>;
}

/// In-memory host store: a list of data containers
#[derive(Default)]
pub struct DataContainerArray {
    containers: Vec<DataContainer>,
}

impl DataContainerArray {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an empty container.
    pub fn add_container(
        &mut self,
        name: &str,
        geometry: Option<ImageGeometry>,
    ) -> StoreResult<&mut DataContainer> {
        if name.is_empty() {
            return Err(StoreError::InvalidName(String::new()));
        }
        if self.container(name).is_some() {
            return Err(StoreError::ContainerExists(name.to_string()));
        }
        self.containers.push(DataContainer::new(name, geometry));
        let last = self.containers.len() - 1;
        Ok(&mut self.containers[last])
    }

    /// Add an empty attribute matrix to a container.
    pub fn add_matrix(&mut self, container: &str, name: &str, tuple_count: usize) -> StoreResult<()> {
        if name.is_empty() {
            return Err(StoreError::InvalidName(String::new()));
        }
        let dc = self
            .container_mut(container)
            .ok_or_else(|| StoreError::ContainerNotFound(container.to_string()))?;
        if dc.matrix(name).is_some() {
            return Err(StoreError::MatrixExists {
                container: container.to_string(),
                matrix: name.to_string(),
            });
        }
        dc.matrices.push(AttributeMatrix::new(name, tuple_count));
        Ok(())
    }

    /// Insert a prebuilt array at `path`, renaming it to `path.array`.
    pub fn insert_array(
        &mut self,
        path: &DataArrayPath,
        mut array: Box<dyn HostArray>,
    ) -> StoreResult<()> {
        if !path.is_valid() {
            return Err(StoreError::InvalidName(path.to_string()));
        }
        if self.contains_array(path) {
            return Err(StoreError::ArrayExists(path.clone()));
        }
        let matrix = self.matrix_mut(path)?;
        if array.tuple_count() != matrix.tuple_count() {
            return Err(StoreError::TupleCountMismatch {
                path: path.clone(),
                expected: matrix.tuple_count(),
                actual: array.tuple_count(),
            });
        }
        array.set_name(&path.array);
        matrix.insert(array)
    }

    pub fn container(&self, name: &str) -> Option<&DataContainer> {
        self.containers.iter().find(|c| c.name() == name)
    }

    pub fn container_mut(&mut self, name: &str) -> Option<&mut DataContainer> {
        self.containers.iter_mut().find(|c| c.name() == name)
    }

    pub fn container_names(&self) -> Vec<&str> {
        self.containers.iter().map(|c| c.name()).collect()
    }

    /// Attribute matrix named by `path` (the array component is ignored).
    pub fn matrix(&self, path: &DataArrayPath) -> StoreResult<&AttributeMatrix> {
        let dc = self
            .container(&path.container)
            .ok_or_else(|| StoreError::ContainerNotFound(path.container.clone()))?;
        dc.matrix(&path.matrix)
            .ok_or_else(|| StoreError::MatrixNotFound {
                container: path.container.clone(),
                matrix: path.matrix.clone(),
            })
    }

    fn matrix_mut(&mut self, path: &DataArrayPath) -> StoreResult<&mut AttributeMatrix> {
        let dc = self
            .container_mut(&path.container)
            .ok_or_else(|| StoreError::ContainerNotFound(path.container.clone()))?;
        dc.matrix_mut(&path.matrix)
            .ok_or_else(|| StoreError::MatrixNotFound {
                container: path.container.clone(),
                matrix: path.matrix.clone(),
            })
    }

    /// Borrow an array's values as `T`.
    pub fn values<T: Element>(&self, path: &DataArrayPath) -> StoreResult<&[T]> {
        let handle = self.array(path)?;
        resolve_as::<T>(handle).map_err(|e| StoreError::InvalidLayout(e.to_string()))
    }

    /// Borrow an array's values mutably as `T`.
    pub fn values_mut<T: Element>(&mut self, path: &DataArrayPath) -> StoreResult<&mut [T]> {
        let matrix = self.matrix_mut(path)?;
        let index = matrix
            .position(&path.array)
            .ok_or_else(|| StoreError::ArrayNotFound(path.clone()))?;
        resolve_as_mut::<T>(matrix.arrays[index].as_handle_mut())
            .map_err(|e| StoreError::InvalidLayout(e.to_string()))
    }

    /// Element kind of the array at `path`, `None` for unsupported types.
    pub fn array_kind(&self, path: &DataArrayPath) -> StoreResult<Option<DataKind>> {
        let matrix = self.matrix(path)?;
        matrix
            .get(&path.array)
            .map(|a| a.kind())
            .ok_or_else(|| StoreError::ArrayNotFound(path.clone()))
    }
}

impl DataStore for DataContainerArray {
    fn geometry(&self, container: &str) -> StoreResult<Option<ImageGeometry>> {
        self.container(container)
            .map(|dc| dc.geometry().copied())
            .ok_or_else(|| StoreError::ContainerNotFound(container.to_string()))
    }

    fn matrix_tuple_count(&self, path: &DataArrayPath) -> StoreResult<usize> {
        self.matrix(path).map(AttributeMatrix::tuple_count)
    }

    fn array(&self, path: &DataArrayPath) -> StoreResult<&dyn ArrayHandle> {
        self.matrix(path)?
            .get(&path.array)
            .map(|a| a.as_handle())
            .ok_or_else(|| StoreError::ArrayNotFound(path.clone()))
    }

    fn create_array(
        &mut self,
        path: &DataArrayPath,
        kind: DataKind,
        components: usize,
        tuples: usize,
    ) -> StoreResult<()> {
        if !path.is_valid() {
            return Err(StoreError::InvalidName(path.to_string()));
        }
        let matrix = self.matrix_mut(path)?;
        if tuples != matrix.tuple_count() {
            return Err(StoreError::TupleCountMismatch {
                path: path.clone(),
                expected: matrix.tuple_count(),
                actual: tuples,
            });
        }
        if let Some(existing) = matrix.get(&path.array) {
            let same = existing.kind() == Some(kind)
                && existing.component_count() == components
                && existing.tuple_count() == tuples;
            return if same {
                Ok(())
            } else {
                Err(StoreError::ArrayExists(path.clone()))
            };
        }
        let array = new_array(&path.array, kind, components, tuples)?;
        matrix.insert(array)
    }

    fn array_pair_mut(
        &mut self,
        src: &DataArrayPath,
        dst: &DataArrayPath,
    ) -> StoreResult<(&dyn ArrayHandle, &mut dyn ArrayHandle)> {
        if src == dst {
            return Err(StoreError::SameArray(src.clone()));
        }
        self.array(src)?;
        self.array(dst)?;

        let mut src_ref: Option<&dyn ArrayHandle> = None;
        let mut dst_ref: Option<&mut dyn ArrayHandle> = None;
        for dc in self.containers.iter_mut() {
            let in_src = dc.name() == src.container;
            let in_dst = dc.name() == dst.container;
            if !in_src && !in_dst {
                continue;
            }
            for matrix in dc.matrices.iter_mut() {
                let m_src = in_src && matrix.name() == src.matrix;
                let m_dst = in_dst && matrix.name() == dst.matrix;
                if !m_src && !m_dst {
                    continue;
                }
                for array in matrix.arrays.iter_mut() {
                    if m_src && array.name() == src.array {
                        src_ref = Some(array.as_handle());
                    } else if m_dst && array.name() == dst.array {
                        dst_ref = Some(array.as_handle_mut());
                    }
                }
            }
        }

        match (src_ref, dst_ref) {
            (Some(s), Some(d)) => Ok((s, d)),
            (None, _) => Err(StoreError::ArrayNotFound(src.clone())),
            (_, None) => Err(StoreError::ArrayNotFound(dst.clone())),
        }
    }

    fn remove_array(&mut self, path: &DataArrayPath) -> StoreResult<()> {
        let matrix = self.matrix_mut(path)?;
        let index = matrix
            .position(&path.array)
            .ok_or_else(|| StoreError::ArrayNotFound(path.clone()))?;
        matrix.arrays.remove(index);
        Ok(())
    }

    fn rename_array(&mut self, path: &DataArrayPath, new_name: &str) -> StoreResult<()> {
        if new_name.is_empty() {
            return Err(StoreError::InvalidName(new_name.to_string()));
        }
        let matrix = self.matrix_mut(path)?;
        let index = matrix
            .position(&path.array)
            .ok_or_else(|| StoreError::ArrayNotFound(path.clone()))?;
        if new_name == path.array {
            return Ok(());
        }
        if matrix.position(new_name).is_some() {
            return Err(StoreError::ArrayExists(path.with_array(new_name)));
        }
        matrix.arrays[index].set_name(new_name);
        Ok(())
    }
}
