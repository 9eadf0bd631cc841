//! Catalog persistence for the storefront.
//!
//! # Storage: `products.json`
//!
//! The whole catalog lives in a single JSON document, an array of products
//! with camelCase fields. It is read once at startup and rewritten in full
//! after every mutation.
//!
//! The location is set by `STOREFRONT_CATALOG_PATH`. To inspect or edit the
//! catalog from the command line:
//! ```bash
//! cargo run -p stride-cli -- catalog show
//! ```

pub mod products;

use std::io;
use std::path::PathBuf;

use thiserror::Error;

pub use products::JsonFileBackend;

/// Errors from catalog file operations.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// The catalog file could not be read or written.
    #[error("catalog file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The catalog file is not a valid product array, or products failed to
    /// serialize.
    #[error("catalog file {path} is not valid JSON: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

impl RepositoryError {
    /// Whether the error means the catalog file does not exist.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::Io { source, .. } if source.kind() == io::ErrorKind::NotFound)
    }
}
