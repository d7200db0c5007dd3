//! Zarr v2 array metadata, i.e. the content of an array's `.zarray` key.
//! https://zarr.readthedocs.io/en/stable/spec/v2.html#metadata

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Codec configuration. Only `id` is interpreted, everything else is kept as is.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Codec {
    pub id: String,

    #[serde(flatten)]
    pub configuration: HashMap<String, Value>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Order {
    /// Row-major: the last dimension varies fastest.
    C,

    /// Column-major: the first dimension varies fastest.
    F,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum DimensionSeparator {
    /// Flat chunk keys, e.g. `0.0.1`.
    #[default]
    #[serde(rename = ".")]
    Dot,

    /// Nested chunk keys, e.g. `0/0/1`.
    #[serde(rename = "/")]
    Slash,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ArrayMetadata {
    pub zarr_format: u32,

    pub shape: Vec<u64>,

    /// All chunks of an array share this shape.
    pub chunks: Vec<u64>,

    // todo: parse into a typed representation once chunks are actually decoded
    #[serde(rename = "dtype")]
    pub data_type: Value,

    pub compressor: Option<Codec>,

    pub fill_value: Option<Value>,

    pub order: Order,

    pub filters: Option<Vec<Codec>>,

    // absent means "."
    #[serde(default)]
    pub dimension_separator: DimensionSeparator,
}

impl ArrayMetadata {
    pub fn from_slice(bytes: &[u8]) -> Result<Self, serde_json::Error> {
        serde_json::from_slice(bytes)
    }

    pub fn dimensionality(&self) -> usize {
        self.shape.len()
    }
}
