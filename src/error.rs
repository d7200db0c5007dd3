use ome_ngff::{ValidationErrors, Violation};
use zarr_store::StoreError;

/// Errors from reading an OME-NGFF hierarchy.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Store(#[from] StoreError),

    #[error("invalid metadata in \"{key}\": {errors}")]
    Invalid {
        key: String,
        #[source]
        errors: ValidationErrors,
    },

    #[error("could not parse \"{key}\": {source}")]
    Json {
        key: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("\"{key}\" does not describe a plate")]
    NotAPlate { key: String },

    #[error("inconsistent hierarchy at \"{key}\": {message}")]
    Inconsistent { key: String, message: String },
}

impl Error {
    /// Returns `true` if the hierarchy could be read but its metadata is wrong, and `false` if
    /// the store itself failed.
    pub fn is_invalid(&self) -> bool {
        !matches!(self, Error::Store(_))
    }

    /// The key of the document this error is about, if any.
    pub fn key(&self) -> Option<&str> {
        match self {
            Error::Store(_) => None,
            Error::Invalid { key, .. }
            | Error::Json { key, .. }
            | Error::NotAPlate { key }
            | Error::Inconsistent { key, .. } => Some(key),
        }
    }

    /// The rule violations behind this error. Errors that aren't about a single rule are
    /// reported as one violation at the document root.
    pub fn violations(&self) -> Vec<Violation> {
        match self {
            Error::Invalid { errors, .. } => errors.violations().to_vec(),
            Error::Json { source, .. } => {
                vec![Violation::new(ome_ngff::validation::DOCUMENT_ROOT, source.to_string())]
            }
            Error::NotAPlate { .. } => vec![Violation::new("plate", "is missing")],
            Error::Inconsistent { message, .. } => {
                vec![Violation::new(ome_ngff::validation::DOCUMENT_ROOT, message.clone())]
            }
            Error::Store(_) => Vec::new(),
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
