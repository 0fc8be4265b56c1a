//! Host-owned data arrays
//!
//! [`DataArray<T>`] is the host's storage for every supported element kind.
//! It keeps its values in a `Vec<T>` and exposes that vector through
//! [`ArrayHandle::storage`], which is what kind resolution downcasts.
//! [`StringDataArray`] stands in for the host array types that fall outside
//! the supported kind set.

use std::any::Any;

use voxbridge_core::{ArrayHandle, DataKind, Element};

use crate::error::{StoreError, StoreResult};

/// A host array as stored in an attribute matrix
pub trait HostArray: ArrayHandle {
    /// Element kind, or `None` for types outside the supported set
    fn kind(&self) -> Option<DataKind>;

    fn set_name(&mut self, name: &str);

    fn as_handle(&self) -> &dyn ArrayHandle;

    fn as_handle_mut(&mut self) -> &mut dyn ArrayHandle;
}

/// Homogeneous array of one element kind
#[derive(Debug, Clone, PartialEq)]
pub struct DataArray<T: Element> {
    name: String,
    components: usize,
    data: Vec<T>,
}

impl<T: Element> DataArray<T> {
    /// Create a zero-filled array of `tuples × components` elements.
    pub fn new(name: &str, components: usize, tuples: usize) -> StoreResult<Self> {
        if components == 0 {
            return Err(StoreError::InvalidLayout(format!(
                "array '{name}' must have at least one component"
            )));
        }
        let len = components.checked_mul(tuples).ok_or_else(|| {
            StoreError::InvalidLayout(format!(
                "array '{name}' of {tuples} x {components} elements overflows usize"
            ))
        })?;
        let mut data = Vec::new();
        data.try_reserve_exact(len).map_err(|e| {
            StoreError::InvalidLayout(format!("array '{name}' of {len} elements: {e}"))
        })?;
        data.resize(len, T::default());
        Ok(DataArray {
            name: name.to_string(),
            components,
            data,
        })
    }

    /// Wrap existing values.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::InvalidLayout`] if `components` is zero or does
    /// not divide `data.len()`.
    pub fn from_vec(name: &str, components: usize, data: Vec<T>) -> StoreResult<Self> {
        if components == 0 || data.len() % components != 0 {
            return Err(StoreError::InvalidLayout(format!(
                "array '{name}' with {} elements cannot hold {components}-component tuples",
                data.len()
            )));
        }
        Ok(DataArray {
            name: name.to_string(),
            components,
            data,
        })
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
}

impl<T: Element> ArrayHandle for DataArray<T> {
    fn name(&self) -> &str {
        &self.name
    }

    fn type_name(&self) -> &str {
        T::KIND.name()
    }

    fn component_count(&self) -> usize {
        self.components
    }

    fn tuple_count(&self) -> usize {
        self.data.len() / self.components
    }

    fn storage(&self) -> &dyn Any {
        &self.data
    }

    fn storage_mut(&mut self) -> &mut dyn Any {
        &mut self.data
    }
}

impl<T: Element> HostArray for DataArray<T> {
    fn kind(&self) -> Option<DataKind> {
        Some(T::KIND)
    }

    fn set_name(&mut self, name: &str) {
        self.name = name.to_string();
    }

    fn as_handle(&self) -> &dyn ArrayHandle {
        self
    }

    fn as_handle_mut(&mut self) -> &mut dyn ArrayHandle {
        self
    }
}

/// One string per tuple
#[derive(Debug, Clone, PartialEq, Default)]
pub struct StringDataArray {
    name: String,
    values: Vec<String>,
}

impl StringDataArray {
    pub fn new(name: &str, values: Vec<String>) -> Self {
        StringDataArray {
            name: name.to_string(),
            values,
        }
    }

    pub fn values(&self) -> &[String] {
        &self.values
    }
}

impl ArrayHandle for StringDataArray {
    fn name(&self) -> &str {
        &self.name
    }

    fn type_name(&self) -> &str {
        "string"
    }

    fn component_count(&self) -> usize {
        1
    }

    fn tuple_count(&self) -> usize {
        self.values.len()
    }

    fn storage(&self) -> &dyn Any {
        &self.values
    }

    fn storage_mut(&mut self) -> &mut dyn Any {
        &mut self.values
    }
}

impl HostArray for StringDataArray {
    fn kind(&self) -> Option<DataKind> {
        None
    }

    fn set_name(&mut self, name: &str) {
        self.name = name.to_string();
    }

    fn as_handle(&self) -> &dyn ArrayHandle {
        self
    }

    fn as_handle_mut(&mut self) -> &mut dyn ArrayHandle {
        self
    }
}

/// Allocate a zero-filled array of a runtime kind.
pub fn new_array(
    name: &str,
    kind: DataKind,
    components: usize,
    tuples: usize,
) -> StoreResult<Box<dyn HostArray>> {
    fn boxed<T: Element>(
        name: &str,
        components: usize,
        tuples: usize,
    ) -> StoreResult<Box<dyn HostArray>> {
        Ok(Box::new(DataArray::<T>::new(name, components, tuples)?))
    }

    match kind {
        DataKind::Int8 => boxed::<i8>(name, components, tuples),
        DataKind::UInt8 => boxed::<u8>(name, components, tuples),
        DataKind::Int16 => boxed::<i16>(name, components, tuples),
        DataKind::UInt16 => boxed::<u16>(name, components, tuples),
        DataKind::Int32 => boxed::<i32>(name, components, tuples),
        DataKind::UInt32 => boxed::<u32>(name, components, tuples),
        DataKind::Int64 => boxed::<i64>(name, components, tuples),
        DataKind::UInt64 => boxed::<u64>(name, components, tuples),
        DataKind::Float32 => boxed::<f32>(name, components, tuples),
        DataKind::Float64 => boxed::<f64>(name, components, tuples),
        DataKind::Bool => boxed::<bool>(name, components, tuples),
    }
}
