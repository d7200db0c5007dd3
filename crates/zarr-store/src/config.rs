use serde::{Deserialize, Serialize};

use crate::persistence_mode::PersistenceMode;

fn default_root_label() -> String {
    "/".to_string()
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct StoreConfig {
    #[serde(rename = "rootLabel", default = "default_root_label")]
    pub root_label: String,

    /// Filesystem path (or URL-like prefix) that keys are mapped below.
    #[serde(rename = "rootPrefix", default)]
    pub root_prefix: String,

    #[serde(default)]
    pub mode: PersistenceMode,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            root_label: default_root_label(),
            root_prefix: String::new(),
            mode: PersistenceMode::default(),
        }
    }
}

impl StoreConfig {
    pub fn from_json(bytes: &[u8]) -> Result<Self, serde_json::Error> {
        serde_json::from_slice(bytes)
    }
}
