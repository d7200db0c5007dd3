use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, ValueEnum};
use serde::Serialize;

use ngff_validate::{Error, ImageReader, PlateReader, WellReader};
use ome_ngff::Violation;
use zarr_store::{FileStore, PersistenceMode, StoreConfig};

const EXIT_INVALID: u8 = 1;
const EXIT_STORE_FAILURE: u8 = 2;

#[derive(Clone, Copy, Debug, Serialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
enum Kind {
    Plate,
    Well,
    Image,
}

/// Validates the metadata of an OME-NGFF hierarchy on disk.
#[derive(Parser, Debug)]
#[command(name = "ngff-validate", version)]
struct Args {
    /// Store configuration (JSON with "rootLabel" and "rootPrefix")
    #[arg(long)]
    config: Option<PathBuf>,

    /// Label of the store, overrides the configuration
    #[arg(long)]
    label: Option<String>,

    /// What the group is expected to be
    #[arg(long, value_enum, default_value = "plate")]
    kind: Kind,

    /// Print the result as JSON
    #[arg(long)]
    json: bool,

    /// Directory the store is rooted at, overrides "rootPrefix" of the configuration
    root: Option<String>,

    /// Group to validate, relative to the root
    #[arg(default_value = "")]
    group: String,
}

#[derive(Debug, Serialize)]
struct Report {
    group: String,
    kind: Kind,
    valid: bool,

    #[serde(skip_serializing_if = "Option::is_none")]
    key: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,

    violations: Vec<Violation>,
}

fn load_config(args: &Args) -> Result<StoreConfig, String> {
    let mut config = match &args.config {
        Some(path) => {
            let bytes = fs::read(path)
                .map_err(|err| format!("could not read {}: {}", path.display(), err))?;
            StoreConfig::from_json(&bytes)
                .map_err(|err| format!("invalid store configuration {}: {}", path.display(), err))?
        }
        None => StoreConfig::default(),
    };
    // an empty ROOT only acts as a placeholder in front of GROUP
    if let Some(root) = args.root.as_deref().filter(|root| !root.is_empty()) {
        config.root_prefix = root.to_string();
    }
    if let Some(label) = &args.label {
        config.root_label = label.clone();
    }
    if config.mode.is_writable() {
        log::info!("ignoring configured mode {:?}, validation is read-only", config.mode);
        config.mode = PersistenceMode::ReadOnly;
    }
    Ok(config)
}

/// Opens the group as `kind` and returns a short summary of what was found.
fn validate(store: &FileStore, kind: Kind, group: &str) -> Result<String, Error> {
    let summary = match kind {
        Kind::Plate => {
            let plate = PlateReader::open(store, group)?;
            format!("{} wells, {} images", plate.wells.len(), plate.images.len())
        }
        Kind::Well => {
            let well = WellReader::open(store, group)?;
            format!("{} images", well.images.len())
        }
        Kind::Image => {
            let image = ImageReader::open(store, group)?;
            format!("{} resolution levels", image.arrays.len())
        }
    };
    Ok(summary)
}

fn print_report(report: &Report) {
    match serde_json::to_string_pretty(report) {
        Ok(json) => println!("{}", json),
        Err(err) => log::error!("could not serialize report: {}", err),
    }
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let args = Args::parse();

    let config = match load_config(&args) {
        Ok(config) => config,
        Err(message) => {
            eprintln!("{}", message);
            return ExitCode::from(EXIT_STORE_FAILURE);
        }
    };
    let store = FileStore::from_config(&config);
    log::info!("validating {:?} in store {}", args.group, store.root_label);

    let result = validate(&store, args.kind, &args.group);
    let exit_code = match &result {
        Ok(_) => ExitCode::SUCCESS,
        Err(err) if err.is_invalid() => ExitCode::from(EXIT_INVALID),
        Err(_) => ExitCode::from(EXIT_STORE_FAILURE),
    };

    if args.json {
        let report = Report {
            group: args.group.clone(),
            kind: args.kind,
            valid: result.is_ok(),
            key: result.as_ref().err().and_then(Error::key).map(str::to_string),
            error: result.as_ref().err().map(ToString::to_string),
            violations: result.as_ref().err().map(Error::violations).unwrap_or_default(),
        };
        print_report(&report);
    } else {
        match &result {
            Ok(summary) => println!("{:?} is a valid {:?}: {}", args.group, args.kind, summary),
            Err(err) => {
                eprintln!("{}", err);
                for violation in err.violations() {
                    eprintln!("  {}", violation);
                }
            }
        }
    }

    exit_code
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn write_config(dir: &TempDir, json: &str) -> String {
        let path = dir.path().join("store.json");
        fs::write(&path, json).unwrap();
        path.to_str().unwrap().to_string()
    }

    #[test]
    fn root_prefix_from_config() {
        let dir = TempDir::new().unwrap();
        let config_path = write_config(&dir, r#"{"rootPrefix": "data/plate.zarr", "rootLabel": "plate"}"#);
        let args = Args::parse_from(["ngff-validate", "--config", config_path.as_str()]);
        let config = load_config(&args).unwrap();
        assert_eq!(config.root_prefix, "data/plate.zarr");
        assert_eq!(config.root_label, "plate");
        assert_eq!(args.group, "");
    }

    #[test]
    fn flags_override_config() {
        let dir = TempDir::new().unwrap();
        let config_path = write_config(&dir, r#"{"rootPrefix": "data/plate.zarr", "rootLabel": "plate"}"#);
        let args = Args::parse_from([
            "ngff-validate",
            "--config",
            config_path.as_str(),
            "--label",
            "other",
            "other.zarr",
            "A/1",
        ]);
        let config = load_config(&args).unwrap();
        assert_eq!(config.root_prefix, "other.zarr");
        assert_eq!(config.root_label, "other");
        assert_eq!(args.group, "A/1");
    }

    #[test]
    fn empty_root_keeps_configured_prefix() {
        let dir = TempDir::new().unwrap();
        let config_path = write_config(&dir, r#"{"rootPrefix": "data/plate.zarr"}"#);
        let args = Args::parse_from(["ngff-validate", "--config", config_path.as_str(), "", "A/1"]);
        let config = load_config(&args).unwrap();
        assert_eq!(config.root_prefix, "data/plate.zarr");
        assert_eq!(args.group, "A/1");
    }

    #[test]
    fn configured_write_mode_is_downgraded() {
        let dir = TempDir::new().unwrap();
        let config_path = write_config(&dir, r#"{"rootPrefix": "data", "mode": "r+"}"#);
        let args = Args::parse_from(["ngff-validate", "--config", config_path.as_str()]);
        assert_eq!(load_config(&args).unwrap().mode, PersistenceMode::ReadOnly);
    }

    #[test]
    fn missing_config_file_is_reported() {
        let args = Args::parse_from(["ngff-validate", "--config", "does/not/exist.json", "root"]);
        assert!(load_config(&args).is_err());
    }

    #[test]
    fn validate_image_below_configured_root() {
        let dir = TempDir::new().unwrap();
        fs::create_dir_all(dir.path().join("img/0")).unwrap();
        fs::write(
            dir.path().join("img/.zattrs"),
            r#"{"multiscales": [{"axes": [{"name": "y", "type": "space"}, {"name": "x", "type": "space"}],
                "datasets": [{"path": "0", "coordinateTransformations": [{"type": "scale", "scale": [1.0, 1.0]}]}]}]}"#,
        )
        .unwrap();
        fs::write(
            dir.path().join("img/0/.zarray"),
            r#"{"zarr_format": 2, "shape": [4, 4], "chunks": [4, 4], "dtype": "<u1", "order": "C"}"#,
        )
        .unwrap();
        let config_path = write_config(
            &dir,
            &format!(r#"{{"rootPrefix": {:?}}}"#, dir.path().to_str().unwrap()),
        );
        let args = Args::parse_from([
            "ngff-validate",
            "--config",
            config_path.as_str(),
            "--kind",
            "image",
            "",
            "img",
        ]);
        let store = FileStore::from_config(&load_config(&args).unwrap());
        assert!(validate(&store, args.kind, &args.group).is_ok());
    }
}
