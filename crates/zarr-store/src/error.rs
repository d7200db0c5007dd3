use std::io;
use std::path::PathBuf;

/// Errors from store operations.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// The key maps to an empty path and can't address anything.
    /// Raised before the filesystem is touched.
    #[error("key not found: \"{0}\"")]
    KeyNotFound(String),

    /// The key is addressable but the filesystem operation on its mapped path failed.
    #[error("could not access \"{}\": {source}", .path.display())]
    Filesystem {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl StoreError {
    pub(crate) fn filesystem<P: Into<PathBuf>>(path: P, source: io::Error) -> Self {
        StoreError::Filesystem {
            path: path.into(),
            source,
        }
    }

    /// Returns `true` if this error wraps a filesystem "not found" condition.
    ///
    /// Note that this is never the case for [`StoreError::KeyNotFound`], which is about the key
    /// itself, not about the file it maps to.
    pub fn is_missing_file(&self) -> bool {
        matches!(
            self,
            StoreError::Filesystem { source, .. } if source.kind() == io::ErrorKind::NotFound
        )
    }
}

/// Result alias for store operations.
pub type StoreResult<T> = Result<T, StoreError>;
