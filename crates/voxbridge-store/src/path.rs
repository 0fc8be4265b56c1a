//! Addressing arrays inside the store

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{StoreError, StoreResult};

/// Container / attribute-matrix / array triple naming one host array
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct DataArrayPath {
    pub container: String,
    pub matrix: String,
    pub array: String,
}

impl DataArrayPath {
    pub fn new(
        container: impl Into<String>,
        matrix: impl Into<String>,
        array: impl Into<String>,
    ) -> Self {
        DataArrayPath {
            container: container.into(),
            matrix: matrix.into(),
            array: array.into(),
        }
    }

    /// Parse `"container/matrix/array"`.
    pub fn parse(s: &str) -> StoreResult<Self> {
        let parts: Vec<&str> = s.split('/').collect();
        match parts.as_slice() {
            [c, m, a] if !c.is_empty() && !m.is_empty() && !a.is_empty() => {
                Ok(DataArrayPath::new(*c, *m, *a))
            }
            _ => Err(StoreError::InvalidName(s.to_string())),
        }
    }

    /// Same container and matrix, different array name
    pub fn with_array(&self, array: impl Into<String>) -> Self {
        DataArrayPath {
            container: self.container.clone(),
            matrix: self.matrix.clone(),
            array: array.into(),
        }
    }

    /// True if both paths name the same attribute matrix
    pub fn same_matrix(&self, other: &DataArrayPath) -> bool {
        self.container == other.container && self.matrix == other.matrix
    }

    /// True if no component is empty
    pub fn is_valid(&self) -> bool {
        !self.container.is_empty() && !self.matrix.is_empty() && !self.array.is_empty()
    }
}

impl fmt::Display for DataArrayPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}/{}", self.container, self.matrix, self.array)
    }
}
