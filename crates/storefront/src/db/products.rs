//! JSON file backend for the product catalog.

use std::fs;
use std::io::Write;
use std::path::PathBuf;

use stride_core::Product;
use stride_core::catalog::CatalogBackend;

use super::RepositoryError;

/// Reads and writes the catalog as one pretty-printed JSON array.
#[derive(Debug, Clone)]
pub struct JsonFileBackend {
    path: PathBuf,
}

impl JsonFileBackend {
    /// Create a backend for the catalog file at `path`.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    fn io_error(&self, source: std::io::Error) -> RepositoryError {
        RepositoryError::Io {
            path: self.path.clone(),
            source,
        }
    }

    fn json_error(&self, source: serde_json::Error) -> RepositoryError {
        RepositoryError::Json {
            path: self.path.clone(),
            source,
        }
    }
}

impl CatalogBackend for JsonFileBackend {
    type Error = RepositoryError;

    /// Read the catalog file. A document holding `null` is an empty catalog.
    fn load(&self) -> Result<Vec<Product>, Self::Error> {
        let text = fs::read_to_string(&self.path).map_err(|e| self.io_error(e))?;
        let products: Option<Vec<Product>> =
            serde_json::from_str(&text).map_err(|e| self.json_error(e))?;
        Ok(products.unwrap_or_default())
    }

    /// Write the catalog next to its final location, then rename over it so
    /// readers never observe a partially written file.
    fn save(&self, products: &[Product]) -> Result<(), Self::Error> {
        let json = serde_json::to_vec_pretty(products).map_err(|e| self.json_error(e))?;

        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent).map_err(|e| self.io_error(e))?;
        }

        let mut tmp = self.path.clone().into_os_string();
        tmp.push(".tmp");
        let tmp = PathBuf::from(tmp);

        let mut file = fs::File::create(&tmp).map_err(|e| self.io_error(e))?;
        file.write_all(&json).map_err(|e| self.io_error(e))?;
        file.sync_all().map_err(|e| self.io_error(e))?;
        drop(file);

        fs::rename(&tmp, &self.path).map_err(|e| self.io_error(e))
    }
}
