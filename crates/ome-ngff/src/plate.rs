use serde::{Deserialize, Serialize};

use crate::util::{
    duplicate_indices, field, index, is_alphanumeric_name, is_well_path, warn_unless, VERSION,
};
use crate::validation::{Validate, Violation};

// https://ngff.openmicroscopy.org/0.4/#plate-md

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Acquisition {
    /// Unique within the plate.
    pub id: i64,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(rename = "maximumfieldcount")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub maximum_field_count: Option<i64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Seconds since the epoch.
    #[serde(rename = "starttime")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_time: Option<i64>,

    /// Seconds since the epoch.
    #[serde(rename = "endtime")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_time: Option<i64>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Column {
    pub name: String,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Row {
    pub name: String,
}

/// A well as referenced from its plate. The well's own metadata is a [`crate::well::Well`].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Well {
    /// `<row name>/<column name>`, relative to the plate group.
    pub path: String,

    #[serde(rename = "rowIndex")]
    pub row_index: i64,

    #[serde(rename = "columnIndex")]
    pub column_index: i64,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Plate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,

    /// Maximum number of fields per view across all wells. [sic!]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field_count: Option<i64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub acquisitions: Option<Vec<Acquisition>>,

    // every row / column of the physical plate, even if it has no wells
    #[serde(default)]
    pub columns: Vec<Column>,

    #[serde(default)]
    pub rows: Vec<Row>,

    #[serde(default)]
    pub wells: Vec<Well>,
}

/// The attributes (`.zattrs`) of a plate group.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PlateAttributes {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub plate: Option<Plate>,
}

fn validate_non_negative(
    value: Option<i64>,
    path: String,
    strict: bool,
    violations: &mut Vec<Violation>,
) {
    if let Some(value) = value {
        if strict {
            warn_unless!(violations, path, value > 0, "must be greater than 0, got {}", value);
        } else {
            warn_unless!(violations, path, value >= 0, "must not be negative, got {}", value);
        }
    }
}

/// Checks a list of row or column names.
fn validate_names<'a, I>(names: I, path: &str, kind: &str, violations: &mut Vec<Violation>)
where
    I: Iterator<Item = &'a str> + Clone,
{
    warn_unless!(
        violations,
        path,
        names.clone().next().is_some(),
        "must contain at least one {}",
        kind
    );
    for (i, name) in names.clone().enumerate() {
        warn_unless!(
            violations,
            field(&index(path, i), "name"),
            is_alphanumeric_name(name),
            "must contain only alphanumeric characters, got \"{}\"",
            name
        );
    }
    for i in duplicate_indices(names) {
        warn_unless!(
            violations,
            field(&index(path, i), "name"),
            false,
            "{} names must be unique",
            kind
        );
    }
}

impl Acquisition {
    fn validate_fields(&self, path: &str, violations: &mut Vec<Violation>) {
        validate_non_negative(Some(self.id), field(path, "id"), false, violations);
        validate_non_negative(
            self.maximum_field_count,
            field(path, "maximumfieldcount"),
            true,
            violations,
        );
        validate_non_negative(self.start_time, field(path, "starttime"), false, violations);
        validate_non_negative(self.end_time, field(path, "endtime"), false, violations);
    }
}

impl Plate {
    pub fn row(&self, well: &Well) -> Option<&Row> {
        usize::try_from(well.row_index).ok().and_then(|i| self.rows.get(i))
    }

    pub fn column(&self, well: &Well) -> Option<&Column> {
        usize::try_from(well.column_index).ok().and_then(|i| self.columns.get(i))
    }

    pub fn acquisition_ids(&self) -> Vec<i64> {
        self.acquisitions
            .iter()
            .flatten()
            .map(|a| a.id)
            .collect()
    }

    fn validate_well(&self, well: &Well, path: &str, violations: &mut Vec<Violation>) {
        warn_unless!(
            violations,
            field(path, "path"),
            is_well_path(&well.path),
            "must be \"<row name>/<column name>\", got \"{}\"",
            well.path
        );
        validate_non_negative(Some(well.row_index), field(path, "rowIndex"), false, violations);
        validate_non_negative(
            Some(well.column_index),
            field(path, "columnIndex"),
            false,
            violations,
        );

        let row = self.row(well);
        let column = self.column(well);
        let row_found = warn_unless!(
            violations,
            field(path, "rowIndex"),
            row.is_some() || well.row_index < 0,
            "must be an index into \"rows\" ({} rows), got {}",
            self.rows.len(),
            well.row_index
        );
        let column_found = warn_unless!(
            violations,
            field(path, "columnIndex"),
            column.is_some() || well.column_index < 0,
            "must be an index into \"columns\" ({} columns), got {}",
            self.columns.len(),
            well.column_index
        );
        if let (Some(row), Some(column), true, true) = (row, column, row_found, column_found) {
            let expected = format!("{}/{}", row.name, column.name);
            warn_unless!(
                violations,
                field(path, "path"),
                well.path == expected,
                "must refer to the same row and column as rowIndex and columnIndex (expected \"{}\", got \"{}\")",
                expected,
                well.path
            );
        }
    }
}

impl Validate for Plate {
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
        validate_non_negative(self.field_count, field(path, "field_count"), true, violations);

        if let Some(acquisitions) = &self.acquisitions {
            let acquisitions_path = field(path, "acquisitions");
            for (i, acquisition) in acquisitions.iter().enumerate() {
                acquisition.validate_fields(&index(&acquisitions_path, i), violations);
            }
            for i in duplicate_indices(acquisitions.iter().map(|a| a.id)) {
                warn_unless!(
                    violations,
                    field(&index(&acquisitions_path, i), "id"),
                    false,
                    "acquisition ids must be unique, {} is used more than once",
                    acquisitions[i].id
                );
            }
        }

        validate_names(
            self.columns.iter().map(|c| c.name.as_str()),
            &field(path, "columns"),
            "column",
            violations,
        );
        validate_names(
            self.rows.iter().map(|r| r.name.as_str()),
            &field(path, "rows"),
            "row",
            violations,
        );

        let wells_path = field(path, "wells");
        warn_unless!(
            violations,
            &wells_path,
            !self.wells.is_empty(),
            "must contain at least one well"
        );
        for (i, well) in self.wells.iter().enumerate() {
            self.validate_well(well, &index(&wells_path, i), violations);
        }
        for i in duplicate_indices(self.wells.iter().map(|w| w.path.as_str())) {
            warn_unless!(
                violations,
                field(&index(&wells_path, i), "path"),
                false,
                "well paths must be unique, \"{}\" is used more than once",
                self.wells[i].path
            );
        }
    }
}

impl Validate for PlateAttributes {
    fn validate(&self, path: &str, violations: &mut Vec<Violation>) {
        self.plate.validate(&field(path, "plate"), violations);
    }
}
