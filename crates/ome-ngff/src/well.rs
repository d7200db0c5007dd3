use serde::{Deserialize, Serialize};

use crate::util::{duplicate_indices, field, index, is_alphanumeric_name, warn_unless, VERSION};
use crate::validation::{Validate, Violation};

// https://ngff.openmicroscopy.org/0.4/#well-md

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Image {
    /// Relative to the well group.
    pub path: String,

    /// Id of the plate acquisition this field of view belongs to.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub acquisition: Option<i64>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Well {
    #[serde(default)]
    pub images: Vec<Image>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
}

/// The attributes (`.zattrs`) of a well group.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct WellAttributes {
    pub well: Well,
}

impl Validate for Well {
    fn validate(&self, path: &str, violations: &mut Vec<Violation>) {
        let images_path = field(path, "images");
        warn_unless!(
            violations,
            &images_path,
            !self.images.is_empty(),
            "must contain at least one image"
        );
        for (i, image) in self.images.iter().enumerate() {
            warn_unless!(
                violations,
                field(&index(&images_path, i), "path"),
                is_alphanumeric_name(&image.path),
                "must contain only alphanumeric characters, got \"{}\"",
                image.path
            );
        }
        for i in duplicate_indices(self.images.iter().map(|image| image.path.as_str())) {
            warn_unless!(
                violations,
                field(&index(&images_path, i), "path"),
                false,
                "image paths must be unique, \"{}\" is used more than once",
                self.images[i].path
            );
        }

        if let Some(version) = &self.version {
            warn_unless!(
                violations,
                field(path, "version"),
                version == VERSION,
                "expected version \"{}\", got \"{}\"",
                VERSION,
                version
            );
        }
    }
}

impl Validate for WellAttributes {
    fn validate(&self, path: &str, violations: &mut Vec<Violation>) {
        self.well.validate(&field(path, "well"), violations);
    }
}
