//! Apparel Storage
//!
//! JSON-file persistence for the apparel inventory.
//!
//! The whole dataset (`users` and `inventory`) lives in one pretty-printed
//! JSON document. Every load reads the full file and every save rewrites it,
//! so two writers working from the same snapshot silently overwrite each
//! other.
//!
//! # Example
//!
//! ```rust,no_run
//! use apparel_core::DataStore;
//! use apparel_storage::JsonFileStore;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let store = JsonFileStore::new("./data.json");
//! let data = store.load().await?;
//! println!("{} records", data.inventory.len());
//! # Ok(())
//! # }
//! ```

mod error;

pub use error::StorageError;

use apparel_core::{DataStore, Dataset};
use async_trait::async_trait;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tokio::fs;

/// Store backed by a single JSON document on disk
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the document; a missing file is an empty dataset
    pub async fn read(&self) -> error::Result<Dataset> {
        let contents = match fs::read_to_string(&self.path).await {
            Ok(contents) => contents,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                tracing::debug!("Data file {:?} not found, starting empty", self.path);
                return Ok(Dataset::default());
            }
            Err(source) => {
                return Err(StorageError::File {
                    path: self.path.clone(),
                    source,
                })
            }
        };

        if contents.trim().is_empty() {
            return Ok(Dataset::default());
        }

        serde_json::from_str(&contents).map_err(|source| StorageError::Malformed {
            path: self.path.clone(),
            source,
        })
    }

    /// Rewrite the whole document
    pub async fn write(&self, data: &Dataset) -> error::Result<()> {
        let contents = serde_json::to_string_pretty(data)?;

        // Ensure parent directory exists
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)
                    .await
                    .map_err(|source| StorageError::File {
                        path: self.path.clone(),
                        source,
                    })?;
            }
        }

        fs::write(&self.path, contents)
            .await
            .map_err(|source| StorageError::File {
                path: self.path.clone(),
                source,
            })
    }
}

#[async_trait]
impl DataStore for JsonFileStore {
    async fn load(&self) -> apparel_core::Result<Dataset> {
        Ok(self.read().await?)
    }

    async fn save_all(&self, data: &Dataset) -> apparel_core::Result<()> {
        Ok(self.write(data).await?)
    }
}
