use serde::{Deserialize, Serialize};

use crate::util::{field, index, is_hex_color, warn_unless};
use crate::validation::{Validate, Violation};

// https://ngff.openmicroscopy.org/0.4/#omero-md
// "omero" is transitional metadata, only the fields rendering needs are typed.

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Window {
    pub min: f64,
    pub max: f64,
    pub start: f64,
    pub end: f64,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Channel {
    pub window: Window,

    /// Hex RGB without a leading "#", e.g. "00FF00".
    pub color: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub family: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub active: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub coefficient: Option<f64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub inverted: Option<bool>,
}

impl Channel {
    pub fn hex_color(&self) -> String {
        format!("#{}", self.color)
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RDefs {
    #[serde(rename = "defaultT")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_t: Option<u64>,

    #[serde(rename = "defaultZ")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_z: Option<u64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Omero {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,

    pub channels: Vec<Channel>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub rdefs: Option<RDefs>,
}

impl Validate for Channel {
    fn validate(&self, path: &str, violations: &mut Vec<Violation>) {
        warn_unless!(
            violations,
            field(path, "color"),
            is_hex_color(&self.color),
            "must be a hex RGB color like \"00FF00\", got \"{}\"",
            self.color
        );
        warn_unless!(
            violations,
            field(path, "window"),
            self.window.min <= self.window.max,
            "min must not be greater than max ({} > {})",
            self.window.min,
            self.window.max
        );
    }
}

impl Validate for Omero {
    fn validate(&self, path: &str, violations: &mut Vec<Violation>) {
        let channels_path = field(path, "channels");
        for (i, channel) in self.channels.iter().enumerate() {
            channel.validate(&index(&channels_path, i), violations);
        }
    }
}
