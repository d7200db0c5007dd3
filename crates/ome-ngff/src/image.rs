use serde::{Deserialize, Serialize};

use crate::multiscale::Multiscale;
use crate::omero::Omero;
use crate::util::{field, index, warn_unless};
use crate::validation::{Validate, Violation};

/// The attributes (`.zattrs`) of an image group.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ImageAttributes {
    #[serde(default)]
    pub multiscales: Vec<Multiscale>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub omero: Option<Omero>,
}

impl ImageAttributes {
    /// The multiscale readers should use if they don't know better.
    pub fn default_multiscale(&self) -> Option<&Multiscale> {
        self.multiscales.first()
    }
}

impl Validate for ImageAttributes {
    fn validate(&self, path: &str, violations: &mut Vec<Violation>) {
        let multiscales_path = field(path, "multiscales");
        warn_unless!(
            violations,
            &multiscales_path,
            !self.multiscales.is_empty(),
            "must contain at least one multiscale"
        );
        for (i, multiscale) in self.multiscales.iter().enumerate() {
            multiscale.validate(&index(&multiscales_path, i), violations);
        }
        self.omero.validate(&field(path, "omero"), violations);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validation::{from_slice, from_value};
    use serde_json::{json, Value};

    fn image_json() -> Value {
        json!({
            "multiscales": [{
                "version": "0.4",
                "name": "example",
                "axes": [
                    {"name": "c", "type": "channel"},
                    {"name": "y", "type": "space", "unit": "micrometer"},
                    {"name": "x", "type": "space", "unit": "micrometer"}
                ],
                "datasets": [
                    {"path": "0", "coordinateTransformations": [{"type": "scale", "scale": [1.0, 0.5, 0.5]}]},
                    {"path": "1", "coordinateTransformations": [{"type": "scale", "scale": [1.0, 1.0, 1.0]}]}
                ],
                "type": "gaussian"
            }],
            "omero": {
                "channels": [{"color": "00FF00", "window": {"min": 0, "max": 255, "start": 0, "end": 200}}]
            }
        })
    }

    #[test]
    fn valid_image() {
        let attributes = from_value::<ImageAttributes>(image_json()).unwrap();
        assert_eq!(attributes.default_multiscale().unwrap().dimensionality(), 3);
        assert!(attributes.omero.is_some());
    }

    #[test]
    fn image_without_omero_is_valid() {
        let mut value = image_json();
        value.as_object_mut().unwrap().remove("omero");
        assert!(from_value::<ImageAttributes>(value).is_ok());
    }

    #[test]
    fn multiscales_must_not_be_empty() {
        let errors = from_slice::<ImageAttributes>(br#"{"multiscales": []}"#).unwrap_err();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors.violations()[0].path, "multiscales");
        let errors = from_slice::<ImageAttributes>(b"{}").unwrap_err();
        assert_eq!(errors.violations()[0].path, "multiscales");
    }

    #[test]
    fn nested_violations_are_located() {
        let mut value = image_json();
        value["multiscales"][0]["datasets"][1]["coordinateTransformations"][0]["scale"] =
            json!([1.0, 1.0]);
        value["omero"]["channels"][0]["color"] = json!("green");
        let errors = from_value::<ImageAttributes>(value).unwrap_err();
        let paths: Vec<&str> = errors.violations().iter().map(|v| v.path.as_str()).collect();
        assert_eq!(
            paths,
            vec![
                "multiscales[0].datasets[1].coordinateTransformations[0]",
                "omero.channels[0].color",
            ]
        );
    }
}
