//! Readers that walk an OME-NGFF hierarchy through a [`Store`] and validate every document on
//! the way down: plate → wells → images → arrays.

use std::collections::{BTreeMap, BTreeSet};

use serde::de::DeserializeOwned;

use ome_ngff::{
    from_slice, ImageAttributes, Multiscale, Plate, PlateAttributes, Validate, Well,
    WellAttributes,
};
use zarr_store::{join_url_parts, ArrayMetadata, Store};

use crate::error::{Error, Result};

pub const ATTRIBUTES_KEY: &str = ".zattrs";
pub const ARRAY_METADATA_KEY: &str = ".zarray";

fn attributes_key(group: &str) -> String {
    join_url_parts(&[group, ATTRIBUTES_KEY])
}

/// Reads the raw attributes (`.zattrs`) of `group`.
pub fn read_attributes<S: Store + ?Sized>(store: &S, group: &str) -> Result<Vec<u8>> {
    let key = attributes_key(group);
    log::debug!("reading {} from store {}", key, store.root_label());
    Ok(store.get(&key)?)
}

fn read_document<T, S>(store: &S, group: &str) -> Result<T>
where
    T: DeserializeOwned + Validate,
    S: Store + ?Sized,
{
    let bytes = read_attributes(store, group)?;
    from_slice(&bytes).map_err(|errors| Error::Invalid {
        key: attributes_key(group),
        errors,
    })
}

/// An image group and the metadata of the arrays of its default multiscale.
#[derive(Clone, Debug)]
pub struct ImageReader {
    pub group: String,
    pub attributes: ImageAttributes,

    /// One entry per dataset of the default multiscale, in the same order.
    pub arrays: Vec<ArrayMetadata>,
}

impl ImageReader {
    pub fn open<S: Store + ?Sized>(store: &S, group: &str) -> Result<Self> {
        log::info!("opening image {}", group);
        let attributes: ImageAttributes = read_document(store, group)?;

        let arrays = match attributes.default_multiscale() {
            Some(multiscale) => read_arrays(store, group, multiscale)?,
            None => Vec::new(),
        };

        Ok(Self {
            group: group.to_string(),
            attributes,
            arrays,
        })
    }

    pub fn multiscale(&self) -> Option<&Multiscale> {
        self.attributes.default_multiscale()
    }
}

fn read_arrays<S: Store + ?Sized>(
    store: &S,
    group: &str,
    multiscale: &Multiscale,
) -> Result<Vec<ArrayMetadata>> {
    multiscale
        .datasets
        .iter()
        .map(|dataset| {
            let key = join_url_parts(&[group, dataset.path.as_str(), ARRAY_METADATA_KEY]);
            log::debug!("reading {} from store {}", key, store.root_label());
            let bytes = store.get(&key)?;
            let array = ArrayMetadata::from_slice(&bytes).map_err(|source| Error::Json {
                key: key.clone(),
                source,
            })?;
            if array.dimensionality() != multiscale.dimensionality() {
                return Err(Error::Inconsistent {
                    key,
                    message: format!(
                        "array has {} dimensions but the multiscale has {} axes",
                        array.dimensionality(),
                        multiscale.dimensionality()
                    ),
                });
            }
            Ok(array)
        })
        .collect()
}

/// A well group and its images, keyed by image path.
#[derive(Clone, Debug)]
pub struct WellReader {
    pub group: String,
    pub well: Well,
    pub images: BTreeMap<String, ImageReader>,
}

impl WellReader {
    pub fn open<S: Store + ?Sized>(store: &S, group: &str) -> Result<Self> {
        log::info!("opening well {}", group);
        let attributes: WellAttributes = read_document(store, group)?;

        let mut images = BTreeMap::new();
        for image in &attributes.well.images {
            let image_group = join_url_parts(&[group, image.path.as_str()]);
            images.insert(image.path.clone(), ImageReader::open(store, &image_group)?);
        }

        Ok(Self {
            group: group.to_string(),
            well: attributes.well,
            images,
        })
    }
}

/// A plate group with all of its wells and images.
#[derive(Clone, Debug)]
pub struct PlateReader {
    pub group: String,
    pub plate: Plate,

    /// Keyed by well path, e.g. `A/1`.
    pub wells: BTreeMap<String, Well>,

    /// Keyed by `<well path>/<image path>`, e.g. `A/1/0`.
    pub images: BTreeMap<String, ImageReader>,
}

impl PlateReader {
    pub fn open<S: Store + ?Sized>(store: &S, group: &str) -> Result<Self> {
        log::info!("opening plate {}", group);
        let attributes: PlateAttributes = read_document(store, group)?;
        let plate = attributes.plate.ok_or_else(|| Error::NotAPlate {
            key: attributes_key(group),
        })?;

        let mut wells = BTreeMap::new();
        let mut images = BTreeMap::new();
        for plate_well in &plate.wells {
            let well_group = join_url_parts(&[group, plate_well.path.as_str()]);
            let well_reader = WellReader::open(store, &well_group)?;
            check_acquisitions(&plate, &well_reader)?;

            for (image_path, image) in well_reader.images {
                images.insert(
                    join_url_parts(&[plate_well.path.as_str(), image_path.as_str()]),
                    image,
                );
            }
            wells.insert(plate_well.path.clone(), well_reader.well);
        }

        Ok(Self {
            group: group.to_string(),
            plate,
            wells,
            images,
        })
    }
}

/// Images must name their acquisition if the plate has more than one, and may only name
/// acquisitions the plate declares.
fn check_acquisitions(plate: &Plate, well: &WellReader) -> Result<()> {
    let acquisition_ids: BTreeSet<i64> = plate.acquisition_ids().into_iter().collect();
    for (i, image) in well.well.images.iter().enumerate() {
        let message = match image.acquisition {
            None if acquisition_ids.len() > 1 => Some(format!(
                "images[{}] must name its acquisition because the plate has {}",
                i,
                acquisition_ids.len()
            )),
            Some(id) if plate.acquisitions.is_some() && !acquisition_ids.contains(&id) => Some(
                format!("images[{}] refers to acquisition {} which the plate doesn't declare", i, id),
            ),
            _ => None,
        };
        if let Some(message) = message {
            return Err(Error::Inconsistent {
                key: attributes_key(&well.group),
                message,
            });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::path::Path;
    use tempfile::TempDir;
    use zarr_store::FileStore;

    fn write(root: &Path, key: &str, content: &str) {
        let path = root.join(key);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
    }

    fn plate_json() -> &'static str {
        r#"{
            "plate": {
                "acquisitions": [{"id": 1}, {"id": 2}],
                "columns": [{"name": "1"}, {"name": "2"}],
                "rows": [{"name": "A"}],
                "wells": [
                    {"path": "A/1", "rowIndex": 0, "columnIndex": 0},
                    {"path": "A/2", "rowIndex": 0, "columnIndex": 1}
                ],
                "version": "0.4"
            }
        }"#
    }

    fn well_json() -> &'static str {
        r#"{"well": {"images": [{"path": "0", "acquisition": 1}, {"path": "1", "acquisition": 2}], "version": "0.4"}}"#
    }

    fn image_json() -> &'static str {
        r#"{
            "multiscales": [{
                "version": "0.4",
                "axes": [
                    {"name": "c", "type": "channel"},
                    {"name": "y", "type": "space"},
                    {"name": "x", "type": "space"}
                ],
                "datasets": [
                    {"path": "0", "coordinateTransformations": [{"type": "scale", "scale": [1.0, 1.0, 1.0]}]},
                    {"path": "1", "coordinateTransformations": [{"type": "scale", "scale": [1.0, 2.0, 2.0]}]}
                ]
            }]
        }"#
    }

    fn zarray_json(shape: &[u64]) -> String {
        format!(
            r#"{{"zarr_format": 2, "shape": {:?}, "chunks": {:?}, "dtype": "<u2",
                "compressor": null, "fill_value": 0, "order": "C", "filters": null}}"#,
            shape, shape
        )
    }

    fn write_image(root: &Path, group: &str) {
        write(root, &format!("{}/.zattrs", group), image_json());
        write(root, &format!("{}/0/.zarray", group), &zarray_json(&[2, 64, 64]));
        write(root, &format!("{}/1/.zarray", group), &zarray_json(&[2, 32, 32]));
    }

    fn write_plate(root: &Path) {
        write(root, "plate.zarr/.zattrs", plate_json());
        for well in ["A/1", "A/2"] {
            write(root, &format!("plate.zarr/{}/.zattrs", well), well_json());
            for image in ["0", "1"] {
                write_image(root, &format!("plate.zarr/{}/{}", well, image));
            }
        }
    }

    fn store(dir: &TempDir) -> FileStore {
        FileStore::new("/", dir.path().to_str().unwrap())
    }

    #[test]
    fn read_attributes_of_root_group() {
        let dir = TempDir::new().unwrap();
        write(dir.path(), ".zattrs", "{}");
        assert_eq!(read_attributes(&store(&dir), "").unwrap(), b"{}");
    }

    #[test]
    fn open_image() {
        let dir = TempDir::new().unwrap();
        write_image(dir.path(), "image");
        let image = ImageReader::open(&store(&dir), "image").unwrap();
        assert_eq!(image.arrays.len(), 2);
        assert_eq!(image.arrays[1].shape, vec![2, 32, 32]);
        assert_eq!(image.multiscale().unwrap().dimensionality(), 3);
    }

    #[test]
    fn image_with_wrong_array_dimensionality() {
        let dir = TempDir::new().unwrap();
        write_image(dir.path(), "image");
        write(dir.path(), "image/1/.zarray", &zarray_json(&[32, 32]));
        let err = ImageReader::open(&store(&dir), "image").unwrap_err();
        assert!(matches!(err, Error::Inconsistent { ref key, .. } if key == "image/1/.zarray"));
        assert!(err.is_invalid());
    }

    #[test]
    fn image_with_broken_array_metadata() {
        let dir = TempDir::new().unwrap();
        write_image(dir.path(), "image");
        write(dir.path(), "image/0/.zarray", "{\"shape\": [1, 2, 3]}");
        let err = ImageReader::open(&store(&dir), "image").unwrap_err();
        assert!(matches!(err, Error::Json { ref key, .. } if key == "image/0/.zarray"));
    }

    #[test]
    fn image_with_missing_array() {
        let dir = TempDir::new().unwrap();
        write_image(dir.path(), "image");
        fs::remove_file(dir.path().join("image/1/.zarray")).unwrap();
        let err = ImageReader::open(&store(&dir), "image").unwrap_err();
        assert!(matches!(err, Error::Store(ref e) if e.is_missing_file()));
        assert!(!err.is_invalid());
    }

    #[test]
    fn invalid_image_attributes() {
        let dir = TempDir::new().unwrap();
        write(dir.path(), "image/.zattrs", r#"{"multiscales": []}"#);
        let err = ImageReader::open(&store(&dir), "image").unwrap_err();
        match err {
            Error::Invalid { key, errors } => {
                assert_eq!(key, "image/.zattrs");
                assert_eq!(errors.violations()[0].path, "multiscales");
            }
            other => panic!("unexpected error: {}", other),
        }
    }

    #[test]
    fn open_well() {
        let dir = TempDir::new().unwrap();
        write(dir.path(), "well/.zattrs", well_json());
        write_image(dir.path(), "well/0");
        write_image(dir.path(), "well/1");
        let well = WellReader::open(&store(&dir), "well").unwrap();
        assert_eq!(well.images.keys().collect::<Vec<_>>(), vec!["0", "1"]);
        assert_eq!(well.images["1"].group, "well/1");
    }

    #[test]
    fn open_plate() {
        let dir = TempDir::new().unwrap();
        write_plate(dir.path());
        let plate = PlateReader::open(&store(&dir), "plate.zarr").unwrap();
        assert_eq!(plate.wells.len(), 2);
        assert_eq!(
            plate.images.keys().collect::<Vec<_>>(),
            vec!["A/1/0", "A/1/1", "A/2/0", "A/2/1"]
        );
        assert_eq!(plate.images["A/2/1"].group, "plate.zarr/A/2/1");
    }

    #[test]
    fn plate_with_missing_well() {
        let dir = TempDir::new().unwrap();
        write_plate(dir.path());
        fs::remove_file(dir.path().join("plate.zarr/A/2/.zattrs")).unwrap();
        let err = PlateReader::open(&store(&dir), "plate.zarr").unwrap_err();
        assert!(matches!(err, Error::Store(ref e) if e.is_missing_file()));
    }

    #[test]
    fn group_without_plate() {
        let dir = TempDir::new().unwrap();
        write_image(dir.path(), "image");
        let err = PlateReader::open(&store(&dir), "image").unwrap_err();
        assert!(matches!(err, Error::NotAPlate { ref key } if key == "image/.zattrs"));
    }

    #[test]
    fn image_must_name_acquisition() {
        let dir = TempDir::new().unwrap();
        write_plate(dir.path());
        write(
            dir.path(),
            "plate.zarr/A/1/.zattrs",
            r#"{"well": {"images": [{"path": "0"}, {"path": "1", "acquisition": 2}]}}"#,
        );
        let err = PlateReader::open(&store(&dir), "plate.zarr").unwrap_err();
        assert!(matches!(err, Error::Inconsistent { ref key, .. } if key == "plate.zarr/A/1/.zattrs"));
    }

    #[test]
    fn image_must_refer_to_known_acquisition() {
        let dir = TempDir::new().unwrap();
        write_plate(dir.path());
        write(
            dir.path(),
            "plate.zarr/A/2/.zattrs",
            r#"{"well": {"images": [{"path": "0", "acquisition": 1}, {"path": "1", "acquisition": 3}]}}"#,
        );
        let err = PlateReader::open(&store(&dir), "plate.zarr").unwrap_err();
        assert!(matches!(err, Error::Inconsistent { .. }));
        assert_eq!(err.violations().len(), 1);
    }
}
