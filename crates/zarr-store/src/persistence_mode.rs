use serde::{Deserialize, Serialize};

/// Selects the write behaviour of a store instance.
///
/// The serialized names follow Zarr's persistence modes.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum PersistenceMode {
    /// Writes and deletions are refused with `false` and a warning. Key enumeration is not
    /// supported and always yields no keys.
    #[default]
    #[serde(rename = "r")]
    ReadOnly,

    /// Writes, deletions and key enumeration act on the filesystem.
    #[serde(rename = "r+")]
    ReadWrite,
}

impl PersistenceMode {
    pub fn is_writable(&self) -> bool {
        matches!(self, PersistenceMode::ReadWrite)
    }
}
