use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::config::StoreConfig;
use crate::error::{StoreError, StoreResult};
use crate::path::join_url_parts;
use crate::persistence_mode::PersistenceMode;
use crate::store::Store;

/// A [`Store`] that maps keys to files below a root prefix.
///
/// A key's mapped path is `join_url_parts(&[root_prefix, key])`, recomputed on every call. The
/// prefix is not checked at construction, so a missing root only shows up on first access.
/// File handles never outlive a single call.
#[readonly::make]
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FileStore {
    pub root_label: String,
    pub root_prefix: String,
    pub mode: PersistenceMode,
}

impl FileStore {
    /// Creates a read-only store.
    pub fn new<L, P>(root_label: L, root_prefix: P) -> Self
    where
        L: Into<String>,
        P: Into<String>,
    {
        Self::with_mode(root_label, root_prefix, PersistenceMode::ReadOnly)
    }

    /// Creates a store that writes, deletes and enumerates keys on the filesystem.
    pub fn read_write<L, P>(root_label: L, root_prefix: P) -> Self
    where
        L: Into<String>,
        P: Into<String>,
    {
        Self::with_mode(root_label, root_prefix, PersistenceMode::ReadWrite)
    }

    pub fn with_mode<L, P>(root_label: L, root_prefix: P, mode: PersistenceMode) -> Self
    where
        L: Into<String>,
        P: Into<String>,
    {
        Self {
            root_label: root_label.into(),
            root_prefix: root_prefix.into(),
            mode,
        }
    }

    pub fn from_config(config: &StoreConfig) -> Self {
        Self::with_mode(
            config.root_label.as_str(),
            config.root_prefix.as_str(),
            config.mode,
        )
    }

    /// The filesystem location `key` maps to. Empty if the key can't address anything.
    pub fn mapped_path(&self, key: &str) -> String {
        join_url_parts(&[self.root_prefix.as_str(), key])
    }

    fn resolve(&self, key: &str) -> StoreResult<PathBuf> {
        let path = self.mapped_path(key);
        if path.is_empty() {
            Err(StoreError::KeyNotFound(key.to_string()))
        } else {
            Ok(PathBuf::from(path))
        }
    }

    fn root_dir(&self) -> PathBuf {
        let root = join_url_parts(&[self.root_prefix.as_str()]);
        if root.is_empty() {
            PathBuf::from(".")
        } else {
            PathBuf::from(root)
        }
    }

    fn list_keys(&self) -> StoreResult<Vec<String>> {
        let root = self.root_dir();
        if !root.is_dir() {
            return Ok(Vec::new());
        }

        let mut keys = Vec::new();
        for entry in WalkDir::new(&root).min_depth(1) {
            let entry = entry.map_err(|err| {
                let path = err.path().map(Path::to_path_buf).unwrap_or_else(|| root.clone());
                StoreError::filesystem(path, io::Error::from(err))
            })?;
            if !entry.file_type().is_file() {
                continue;
            }
            let relative = entry.path().strip_prefix(&root).unwrap_or(entry.path());
            let key = relative
                .components()
                .map(|component| component.as_os_str().to_string_lossy())
                .collect::<Vec<_>>()
                .join("/");
            keys.push(key);
        }
        keys.sort();
        Ok(keys)
    }
}

impl Store for FileStore {
    fn root_label(&self) -> &str {
        &self.root_label
    }

    fn get(&self, key: &str) -> StoreResult<Vec<u8>> {
        let path = self.resolve(key)?;
        log::debug!("reading {}", path.display());
        fs::read(&path).map_err(|source| StoreError::filesystem(path, source))
    }

    fn contains(&self, key: &str) -> bool {
        // an empty mapped path is never stat'ed: its meaning is platform-dependent
        match self.resolve(key) {
            Ok(path) => path.exists(),
            Err(_) => false,
        }
    }

    fn keys(&self) -> StoreResult<Vec<String>> {
        match self.mode {
            PersistenceMode::ReadOnly => {
                log::debug!(
                    "store \"{}\" is read-only and does not enumerate keys",
                    self.root_label
                );
                Ok(Vec::new())
            }
            PersistenceMode::ReadWrite => self.list_keys(),
        }
    }

    fn delete_item(&self, key: &str) -> StoreResult<bool> {
        match self.mode {
            PersistenceMode::ReadOnly => Ok(false),
            PersistenceMode::ReadWrite => {
                let path = self.resolve(key)?;
                match fs::remove_file(&path) {
                    Ok(()) => Ok(true),
                    Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(false),
                    Err(err) => Err(StoreError::filesystem(path, err)),
                }
            }
        }
    }

    fn set_item(&self, key: &str, value: &[u8]) -> StoreResult<bool> {
        match self.mode {
            PersistenceMode::ReadOnly => {
                log::warn!(
                    "Cannot write to read-only store \"{}\" (key \"{}\")",
                    self.root_label,
                    key
                );
                Ok(false)
            }
            PersistenceMode::ReadWrite => {
                let path = self.resolve(key)?;
                if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                    fs::create_dir_all(parent)
                        .map_err(|source| StoreError::filesystem(parent, source))?;
                }
                fs::write(&path, value).map_err(|source| StoreError::filesystem(path, source))?;
                Ok(true)
            }
        }
    }
}
