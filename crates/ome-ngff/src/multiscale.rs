use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::axis::Axis;
use crate::coordinate_transformations::{validate_transformations, CoordinateTransformation};
use crate::util::{duplicate_indices, field, index, warn_unless, VERSION};
use crate::validation::{Validate, Violation};

// https://ngff.openmicroscopy.org/0.4/#multiscale-md

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Dataset {
    pub path: String,

    #[serde(rename = "coordinateTransformations")]
    #[serde(default)]
    pub coordinate_transformations: Vec<CoordinateTransformation>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Multiscale {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,

    #[serde(rename = "type")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub downscaling_type: Option<String>,

    #[serde(default)]
    pub axes: Vec<Axis>,

    // ordered by largest (i.e. highest resolution) to smallest.
    #[serde(default)]
    pub datasets: Vec<Dataset>,

    // applied after the `coordinate_transformations` of the datasets
    #[serde(rename = "coordinateTransformations")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub coordinate_transformations: Option<Vec<CoordinateTransformation>>,

    // fields in metadata depend on `downscaling_type`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<Value>,
}

fn axis_rank(axis: &Axis) -> u8 {
    if axis.is_time() {
        0
    } else if axis.is_channel_or_custom() {
        1
    } else {
        2
    }
}

impl Multiscale {
    pub fn dimensionality(&self) -> usize {
        self.axes.len()
    }

    pub fn space_axes(&self) -> impl Iterator<Item = &Axis> {
        self.axes.iter().filter(|a| a.is_space())
    }

    fn validate_axes(&self, path: &str, violations: &mut Vec<Violation>) {
        warn_unless!(
            violations,
            path,
            (2..=5).contains(&self.axes.len()),
            "must contain between 2 and 5 axes, got {}",
            self.axes.len()
        );

        for (i, axis) in self.axes.iter().enumerate() {
            axis.validate(&index(path, i), violations);
        }
        for i in duplicate_indices(self.axes.iter().map(Axis::name)) {
            warn_unless!(
                violations,
                field(&index(path, i), "name"),
                false,
                "axis names must be unique, \"{}\" is used more than once",
                self.axes[i].name()
            );
        }

        let space_count = self.space_axes().count();
        let time_count = self.axes.iter().filter(|a| a.is_time()).count();
        let other_count = self.axes.iter().filter(|a| a.is_channel_or_custom()).count();
        warn_unless!(
            violations,
            path,
            space_count == 2 || space_count == 3,
            "must contain 2 or 3 axes of type \"space\", got {}",
            space_count
        );
        warn_unless!(
            violations,
            path,
            time_count <= 1,
            "may contain at most one axis of type \"time\", got {}",
            time_count
        );
        warn_unless!(
            violations,
            path,
            other_count <= 1,
            "may contain at most one axis of type \"channel\" or of a custom type, got {}",
            other_count
        );

        let ranks: Vec<u8> = self.axes.iter().map(axis_rank).collect();
        warn_unless!(
            violations,
            path,
            ranks.windows(2).all(|w| w[0] <= w[1]),
            "must be ordered time, then channel or custom, then space, got {:?}",
            self.axes.iter().map(Axis::name).collect::<Vec<_>>()
        );
    }
}

impl Validate for Multiscale {
    fn validate(&self, path: &str, violations: &mut Vec<Violation>) {
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

        self.validate_axes(&field(path, "axes"), violations);

        let datasets_path = field(path, "datasets");
        warn_unless!(
            violations,
            &datasets_path,
            !self.datasets.is_empty(),
            "must contain at least one dataset"
        );
        for (i, dataset) in self.datasets.iter().enumerate() {
            let dataset_path = index(&datasets_path, i);
            warn_unless!(
                violations,
                field(&dataset_path, "path"),
                !dataset.path.is_empty(),
                "must not be empty"
            );
            validate_transformations(
                &dataset.coordinate_transformations,
                self.axes.len(),
                &field(&dataset_path, "coordinateTransformations"),
                violations,
            );
        }
        for i in duplicate_indices(self.datasets.iter().map(|d| d.path.as_str())) {
            warn_unless!(
                violations,
                field(&index(&datasets_path, i), "path"),
                false,
                "dataset paths must be unique, \"{}\" is used more than once",
                self.datasets[i].path
            );
        }

        if let Some(coordinate_transformations) = &self.coordinate_transformations {
            validate_transformations(
                coordinate_transformations,
                self.axes.len(),
                &field(path, "coordinateTransformations"),
                violations,
            );
        }
    }
}
