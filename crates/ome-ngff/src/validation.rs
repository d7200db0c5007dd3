use std::fmt;
use std::fmt::{Display, Formatter};

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

/// Location reported for documents that don't have the expected shape at all.
pub const DOCUMENT_ROOT: &str = "$";

/// A single broken rule, located by a dotted / indexed path such as `plate.wells[3].path`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Violation {
    pub path: String,
    pub message: String,
}

impl Violation {
    pub fn new<P, M>(path: P, message: M) -> Self
    where
        P: Into<String>,
        M: Into<String>,
    {
        Self {
            path: path.into(),
            message: message.into(),
        }
    }
}

impl Display for Violation {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        if self.path.is_empty() {
            write!(f, "{}: {}", DOCUMENT_ROOT, self.message)
        } else {
            write!(f, "{}: {}", self.path, self.message)
        }
    }
}

/// All violations found in a document, in the order they were detected. Never empty.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, thiserror::Error)]
#[error("invalid document: {}", summarize(.0))]
#[serde(transparent)]
pub struct ValidationErrors(Vec<Violation>);

fn summarize(violations: &[Violation]) -> String {
    match violations.first() {
        Some(first) if violations.len() > 1 => {
            format!("{} (and {} more)", first, violations.len() - 1)
        }
        Some(first) => first.to_string(),
        None => "no violations".to_string(),
    }
}

impl ValidationErrors {
    pub fn violations(&self) -> &[Violation] {
        &self.0
    }

    pub fn into_violations(self) -> Vec<Violation> {
        self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Semantic rules of a document that its structure alone can't express.
pub trait Validate {
    /// Pushes a violation for every rule `self` breaks. `path` is the location of `self` inside
    /// the document; it is empty for the document itself.
    fn validate(&self, path: &str, violations: &mut Vec<Violation>);

    fn check(&self) -> Result<(), ValidationErrors> {
        let mut violations = Vec::new();
        self.validate("", &mut violations);
        if violations.is_empty() {
            Ok(())
        } else {
            Err(ValidationErrors(violations))
        }
    }
}

impl<T: Validate> Validate for Option<T> {
    fn validate(&self, path: &str, violations: &mut Vec<Violation>) {
        if let Some(value) = self {
            value.validate(path, violations);
        }
    }
}

fn shape_error(err: serde_json::Error) -> ValidationErrors {
    let violation = Violation::new(DOCUMENT_ROOT, err.to_string());
    log::warn!("{}", violation);
    ValidationErrors(vec![violation])
}

/// Deserializes a document of type `T` from a JSON value and validates it.
///
/// Returns the typed document or every violation found. A value that doesn't even have the
/// shape of `T` is reported as a single violation at [`DOCUMENT_ROOT`].
pub fn from_value<T>(value: Value) -> Result<T, ValidationErrors>
where
    T: DeserializeOwned + Validate,
{
    let document: T = serde_json::from_value(value).map_err(shape_error)?;
    document.check()?;
    Ok(document)
}

/// Like [`from_value`], but parses the document from raw JSON bytes, e.g. a `.zattrs` file.
pub fn from_slice<T>(bytes: &[u8]) -> Result<T, ValidationErrors>
where
    T: DeserializeOwned + Validate,
{
    let document: T = serde_json::from_slice(bytes).map_err(shape_error)?;
    document.check()?;
    Ok(document)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::util::warn_unless;
    use serde::Deserialize;

    #[derive(Debug, Deserialize)]
    struct Range {
        min: i64,
        max: i64,
    }

    impl Validate for Range {
        fn validate(&self, path: &str, violations: &mut Vec<Violation>) {
            warn_unless!(
                violations,
                crate::util::field(path, "min"),
                self.min <= self.max,
                "must not be greater than max ({} > {})",
                self.min,
                self.max
            );
        }
    }

    #[test]
    fn valid_document_is_returned() {
        let range: Range = from_slice(br#"{"min": 1, "max": 2, "ignored": true}"#).unwrap();
        assert_eq!((range.min, range.max), (1, 2));
    }

    #[test]
    fn rule_violation_is_located() {
        let errors = from_value::<Range>(serde_json::json!({"min": 3, "max": 2})).unwrap_err();
        assert_eq!(
            errors.violations(),
            &[Violation::new("min", "must not be greater than max (3 > 2)")]
        );
    }

    #[test]
    fn shape_error_is_reported_at_root() {
        let errors = from_slice::<Range>(br#"{"min": "a", "max": 2}"#).unwrap_err();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors.violations()[0].path, DOCUMENT_ROOT);
    }

    #[test]
    fn malformed_json_is_reported_at_root() {
        let errors = from_slice::<Range>(b"{").unwrap_err();
        assert_eq!(errors.violations()[0].path, DOCUMENT_ROOT);
    }

    #[test]
    fn absent_optional_is_valid() {
        let range: Option<Range> = None;
        assert!(range.check().is_ok());
    }

    #[test]
    fn display_and_serialize() {
        let errors = ValidationErrors(vec![
            Violation::new("plate.rows", "must not be empty"),
            Violation::new("", "bad"),
        ]);
        assert_eq!(
            errors.to_string(),
            "invalid document: plate.rows: must not be empty (and 1 more)"
        );
        assert_eq!(errors.violations()[1].to_string(), "$: bad");
        assert_eq!(
            serde_json::to_value(&errors).unwrap(),
            serde_json::json!([
                {"path": "plate.rows", "message": "must not be empty"},
                {"path": "", "message": "bad"}
            ])
        );
    }
}
