use serde::{Deserialize, Serialize};

use crate::util::{index, warn_unless};
use crate::validation::Violation;

// https://ngff.openmicroscopy.org/0.4/#trafo-md

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Identity {}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Translation {
    Translation(Vec<f64>),
    Path(String),
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Scale {
    Scale(Vec<f64>),
    Path(String),
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[serde(tag = "type")]
pub enum CoordinateTransformation {
    Identity(Identity),
    Translation(Translation),
    Scale(Scale),
}

impl CoordinateTransformation {
    /// Length of the inline scale or translation vector. `None` for identities and for
    /// transformations stored in a binary file (`path`), which can't be checked here.
    pub fn dimensionality(&self) -> Option<usize> {
        match self {
            CoordinateTransformation::Translation(Translation::Translation(v))
            | CoordinateTransformation::Scale(Scale::Scale(v)) => Some(v.len()),
            _ => None,
        }
    }

    pub fn is_scale(&self) -> bool {
        matches!(self, CoordinateTransformation::Scale(_))
    }

    pub fn is_translation(&self) -> bool {
        matches!(self, CoordinateTransformation::Translation(_))
    }
}

/// Checks a list of transformations of a dataset or multiscale against the number of axes.
pub(crate) fn validate_transformations(
    coordinate_transformations: &[CoordinateTransformation],
    axes_length: usize,
    path: &str,
    violations: &mut Vec<Violation>,
) {
    for (i, c) in coordinate_transformations.iter().enumerate() {
        warn_unless!(
            violations,
            index(path, i),
            c.is_scale() || c.is_translation(),
            "must be of type \"scale\" or \"translation\""
        );
        if let Some(length) = c.dimensionality() {
            warn_unless!(
                violations,
                index(path, i),
                length == axes_length,
                "length of the scale / translation must match the number of axes (expected {}, got {})",
                axes_length,
                length
            );
        }
    }

    let scale_count = coordinate_transformations
        .iter()
        .filter(|c| c.is_scale())
        .count();
    warn_unless!(
        violations,
        path,
        scale_count == 1,
        "must contain exactly one scale transformation, got {}",
        scale_count
    );

    let translation_count = coordinate_transformations
        .iter()
        .filter(|c| c.is_translation())
        .count();
    warn_unless!(
        violations,
        path,
        translation_count <= 1,
        "may contain at most one translation, got {}",
        translation_count
    );

    if let Some(first) = coordinate_transformations.first() {
        warn_unless!(
            violations,
            index(path, 0),
            first.is_scale() || scale_count == 0,
            "a translation must be listed after the scale"
        );
    }
}
