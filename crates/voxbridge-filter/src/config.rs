//! Filter configuration
//!
//! A filter run is configured by a [`ShellConfig`] (which array to read and
//! where the result goes) and, for parameterised algorithms, a parameter
//! block. Both can be read from JSON, either separately or together as a
//! [`FilterDocument`]:
//!
//! ```json
//! {
//!   "input": { "container": "Volume", "matrix": "CellData", "array": "Input" },
//!   "save_as_new_array": true,
//!   "new_array_name": "Mask",
//!   "params": { "lower": 10.0, "upper": 200.0 }
//! }
//! ```

use std::fs;
use std::path::Path;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use voxbridge_store::DataArrayPath;

use crate::error::{FilterError, FilterResult};

fn default_true() -> bool {
    true
}

fn default_temp_suffix() -> String {
    "_tmp".to_string()
}

/// Where a filter reads its input and writes its result
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShellConfig {
    /// Input array
    pub input: DataArrayPath,
    /// Write a new array next to the input instead of replacing it
    #[serde(default = "default_true")]
    pub save_as_new_array: bool,
    /// Name of the new array when `save_as_new_array` is set
    #[serde(default)]
    pub new_array_name: String,
    /// Suffix of the temporary array used when replacing the input
    #[serde(default = "default_temp_suffix")]
    pub temp_suffix: String,
}

impl ShellConfig {
    /// Write the result to a new array named `new_array_name`.
    pub fn save_as_new(input: DataArrayPath, new_array_name: &str) -> Self {
        ShellConfig {
            input,
            save_as_new_array: true,
            new_array_name: new_array_name.to_string(),
            temp_suffix: default_temp_suffix(),
        }
    }

    /// Replace the input array with the result.
    pub fn in_place(input: DataArrayPath) -> Self {
        ShellConfig {
            input,
            save_as_new_array: false,
            new_array_name: String::new(),
            temp_suffix: default_temp_suffix(),
        }
    }

    /// Path the algorithm writes into while running
    pub fn working_path(&self) -> DataArrayPath {
        if self.save_as_new_array {
            self.input.with_array(self.new_array_name.as_str())
        } else {
            self.input
                .with_array(format!("{}{}", self.input.array, self.temp_suffix))
        }
    }

    /// Path the result ends up at once the run is done
    pub fn result_path(&self) -> DataArrayPath {
        if self.save_as_new_array {
            self.working_path()
        } else {
            self.input.clone()
        }
    }

    pub fn from_json_str(json: &str) -> FilterResult<Self> {
        serde_json::from_str(json)
            .map_err(|e| FilterError::Config(format!("failed to parse shell config: {e}")))
    }

    pub fn load(path: &Path) -> FilterResult<Self> {
        let contents = fs::read_to_string(path)
            .map_err(|e| FilterError::Config(format!("failed to read {}: {e}", path.display())))?;
        Self::from_json_str(&contents)
    }

    pub fn to_json_string(&self) -> FilterResult<String> {
        serde_json::to_string_pretty(self)
            .map_err(|e| FilterError::Config(format!("failed to serialize shell config: {e}")))
    }
}

/// Shell configuration plus algorithm parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FilterDocument<P> {
    #[serde(flatten)]
    pub shell: ShellConfig,
    pub params: P,
}

impl<P: DeserializeOwned> FilterDocument<P> {
    pub fn from_json_str(json: &str) -> FilterResult<Self> {
        serde_json::from_str(json)
            .map_err(|e| FilterError::Config(format!("failed to parse filter document: {e}")))
    }

    pub fn load(path: &Path) -> FilterResult<Self> {
        let contents = fs::read_to_string(path)
            .map_err(|e| FilterError::Config(format!("failed to read {}: {e}", path.display())))?;
        Self::from_json_str(&contents)
    }
}
