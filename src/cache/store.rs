//! cache::store
//!
//! Persisted-bytes store for metadata, keyed by chain.
//!
//! # Design
//!
//! The store is a plain synchronous key-value interface; it never looks
//! inside the bytes. [`FileMetadataStore`] keeps one file per chain under
//! [`DotPaths`], [`MemoryMetadataStore`] is for tests.
//!
//! # Example
//!
//! ```
//! use dotinspect::cache::{MemoryMetadataStore, MetadataStore};
//! use dotinspect::core::types::ChainName;
//!
//! let store = MemoryMetadataStore::new();
//! let chain = ChainName::new("kusama").unwrap();
//!
//! assert_eq!(store.load(&chain).unwrap(), None);
//! store.save(&chain, b"meta...").unwrap();
//! assert_eq!(store.load(&chain).unwrap().as_deref(), Some(&b"meta..."[..]));
//! ```

use std::collections::HashMap;
use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use thiserror::Error;

use crate::core::paths::DotPaths;
use crate::core::types::ChainName;

/// Errors from metadata storage.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("failed to read '{path}': {source}")]
    ReadError { path: PathBuf, source: io::Error },

    #[error("failed to write '{path}': {source}")]
    WriteError { path: PathBuf, source: io::Error },

    #[error("failed to remove '{path}': {source}")]
    RemoveError { path: PathBuf, source: io::Error },

    #[error("metadata store unavailable: {0}")]
    Unavailable(String),
}

/// Storage for raw metadata bytes.
pub trait MetadataStore: Send + Sync {
    /// Stored bytes for a chain, if any.
    fn load(&self, chain: &ChainName) -> Result<Option<Vec<u8>>, StoreError>;

    /// Store bytes for a chain, replacing what was there.
    fn save(&self, chain: &ChainName, bytes: &[u8]) -> Result<(), StoreError>;

    /// Drop everything stored for a chain. Removing nothing is not an error.
    fn remove(&self, chain: &ChainName) -> Result<(), StoreError>;
}

/// One `metadata.bin` per chain under the storage root.
#[derive(Debug, Clone)]
pub struct FileMetadataStore {
    paths: DotPaths,
}

impl FileMetadataStore {
    pub fn new(paths: DotPaths) -> Self {
        Self { paths }
    }

    pub fn paths(&self) -> &DotPaths {
        &self.paths
    }
}

impl MetadataStore for FileMetadataStore {
    fn load(&self, chain: &ChainName) -> Result<Option<Vec<u8>>, StoreError> {
        let path = self.paths.metadata_path(chain);
        match fs::read(&path) {
            Ok(bytes) => Ok(Some(bytes)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(StoreError::ReadError { path, source: e }),
        }
    }

    fn save(&self, chain: &ChainName, bytes: &[u8]) -> Result<(), StoreError> {
        let path = self.paths.metadata_path(chain);
        let write_err = |path: &PathBuf| {
            let path = path.clone();
            move |source| StoreError::WriteError { path, source }
        };

        fs::create_dir_all(self.paths.chain_dir(chain))
            .map_err(write_err(&path))?;

        // Write to temp file in same directory (for atomic rename)
        let temp_path = path.with_extension("bin.tmp");
        {
            let mut file = OpenOptions::new()
                .write(true)
                .create(true)
                .truncate(true)
                .open(&temp_path)
                .map_err(write_err(&temp_path))?;
            file.write_all(bytes).map_err(write_err(&temp_path))?;
            file.sync_all().map_err(write_err(&temp_path))?;
        }

        fs::rename(&temp_path, &path).map_err(write_err(&path))?;
        Ok(())
    }

    fn remove(&self, chain: &ChainName) -> Result<(), StoreError> {
        let dir = self.paths.chain_dir(chain);
        match fs::remove_dir_all(&dir) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(StoreError::RemoveError {
                path: dir,
                source: e,
            }),
        }
    }
}

/// In-memory store. Clones share contents.
#[derive(Debug, Clone, Default)]
pub struct MemoryMetadataStore {
    blobs: Arc<Mutex<HashMap<ChainName, Vec<u8>>>>,
}

impl MemoryMetadataStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, HashMap<ChainName, Vec<u8>>>, StoreError> {
        self.blobs
            .lock()
            .map_err(|_| StoreError::Unavailable("store lock poisoned".into()))
    }
}

impl MetadataStore for MemoryMetadataStore {
    fn load(&self, chain: &ChainName) -> Result<Option<Vec<u8>>, StoreError> {
        Ok(self.lock()?.get(chain).cloned())
    }

    fn save(&self, chain: &ChainName, bytes: &[u8]) -> Result<(), StoreError> {
        self.lock()?.insert(chain.clone(), bytes.to_vec());
        Ok(())
    }

    fn remove(&self, chain: &ChainName) -> Result<(), StoreError> {
        self.lock()?.remove(chain);
        Ok(())
    }
}
