//! # Document Store Connection
//!
//! A small document store on the local file system. Every collection is a
//! directory under the base directory and every document is a YAML file
//! named after its (escaped) ID:
//!
//! ```text
//! data/
//! ├── allocations/
//! │   └── allocation%3A%3A<uuid>.yaml
//! └── users/
//!     └── <user id>.yaml
//! ```
//!
//! Writes go to a temp file that is then renamed over the target, so readers
//! never observe a half-written document. All writes in one process are
//! serialised through a single async lock, which is what makes
//! [`DocumentConnection::update_document`] a compare-and-swap.

use anyhow::{Context, Result};
use log::{debug, info};
use serde::{de::DeserializeOwned, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::sync::Mutex;

use super::{AllocationRepository, UserRepository};
use crate::storage::traits::Connection;

pub const ALLOCATIONS_COLLECTION: &str = "allocations";
pub const USERS_COLLECTION: &str = "users";

const DOCUMENT_EXTENSION: &str = "yaml";

/// Result of a read-modify-write on a single document
#[derive(Debug, Clone, PartialEq)]
pub enum DocumentUpdate<T> {
    /// The closure changed the document and it was written back
    Written(T),
    /// The closure declined to change the document
    Unchanged(T),
    Missing,
}

/// DocumentConnection manages collection directories and document files
#[derive(Clone)]
pub struct DocumentConnection {
    base_directory: PathBuf,
    write_lock: Arc<Mutex<()>>,
}

impl DocumentConnection {
    /// Open (and create if needed) a document store rooted at `base_directory`
    pub fn new<P: AsRef<Path>>(base_directory: P) -> Result<Self> {
        let base_path = base_directory.as_ref().to_path_buf();

        for collection in [ALLOCATIONS_COLLECTION, USERS_COLLECTION] {
            let dir = base_path.join(collection);
            if !dir.exists() {
                fs::create_dir_all(&dir)
                    .with_context(|| format!("Failed to create collection directory {}", dir.display()))?;
                info!("Created collection directory {}", dir.display());
            }
        }

        Ok(Self {
            base_directory: base_path,
            write_lock: Arc::new(Mutex::new(())),
        })
    }

    pub fn base_directory(&self) -> &Path {
        &self.base_directory
    }

    pub fn collection_directory(&self, collection: &str) -> PathBuf {
        self.base_directory.join(collection)
    }

    /// Path of a document; IDs are escaped so any ID maps to one safe file name
    pub fn document_path(&self, collection: &str, id: &str) -> PathBuf {
        self.collection_directory(collection)
            .join(format!("{}.{}", escape_id(id), DOCUMENT_EXTENSION))
    }

    /// Read a single document, `None` when it does not exist
    pub async fn read_document<T: DeserializeOwned>(&self, collection: &str, id: &str) -> Result<Option<T>> {
        let path = self.document_path(collection, id);
        if !path.exists() {
            debug!("No document '{}' in collection '{}'", id, collection);
            return Ok(None);
        }

        let content = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read document {}", path.display()))?;
        let document = serde_yaml::from_str(&content)
            .with_context(|| format!("Corrupt document {}", path.display()))?;
        Ok(Some(document))
    }

    /// Create or fully replace a document
    pub async fn write_document<T: Serialize>(&self, collection: &str, id: &str, document: &T) -> Result<()> {
        let _guard = self.write_lock.lock().await;
        self.write_unlocked(collection, id, document)
    }

    /// Read-modify-write under the store's write lock.
    ///
    /// `apply` returns `false` to leave the document untouched.
    pub async fn update_document<T, F>(&self, collection: &str, id: &str, apply: F) -> Result<DocumentUpdate<T>>
    where
        T: Serialize + DeserializeOwned,
        F: FnOnce(&mut T) -> bool + Send,
    {
        let _guard = self.write_lock.lock().await;

        let mut document: T = match self.read_document(collection, id).await? {
            Some(document) => document,
            None => return Ok(DocumentUpdate::Missing),
        };

        if !apply(&mut document) {
            return Ok(DocumentUpdate::Unchanged(document));
        }

        self.write_unlocked(collection, id, &document)?;
        Ok(DocumentUpdate::Written(document))
    }

    /// Load every document of a collection.
    ///
    /// Fails on the first unreadable document so callers never act on a partial collection.
    pub async fn list_documents<T: DeserializeOwned>(&self, collection: &str) -> Result<Vec<T>> {
        let dir = self.collection_directory(collection);
        let mut documents = Vec::new();

        if !dir.exists() {
            return Ok(documents);
        }

        for entry in fs::read_dir(&dir)? {
            let path = entry?.path();
            if path.extension().and_then(|ext| ext.to_str()) != Some(DOCUMENT_EXTENSION) {
                continue;
            }

            let content = fs::read_to_string(&path)
                .with_context(|| format!("Failed to read document {}", path.display()))?;
            let document = serde_yaml::from_str::<T>(&content)
                .with_context(|| format!("Corrupt document {}", path.display()))?;
            documents.push(document);
        }

        Ok(documents)
    }

    fn write_unlocked<T: Serialize>(&self, collection: &str, id: &str, document: &T) -> Result<()> {
        let path = self.document_path(collection, id);
        let yaml_content = serde_yaml::to_string(document)?;

        // Atomic write: temp file first, then rename over the target
        let temp_path = path.with_extension("tmp");
        fs::write(&temp_path, yaml_content)
            .with_context(|| format!("Failed to write {}", temp_path.display()))?;
        fs::rename(&temp_path, &path)
            .with_context(|| format!("Failed to replace {}", path.display()))?;

        debug!("Wrote document '{}' to {:?}", id, path);
        Ok(())
    }
}

impl Connection for DocumentConnection {
    type AllocationRepository = AllocationRepository;
    type UserRepository = UserRepository;

    fn create_allocation_repository(&self) -> Self::AllocationRepository {
        AllocationRepository::new(self.clone())
    }

    fn create_user_repository(&self) -> Self::UserRepository {
        UserRepository::new(self.clone())
    }
}

/// Percent-escape everything outside `[A-Za-z0-9_-]` so distinct IDs never
/// collide and never escape the collection directory
fn escape_id(id: &str) -> String {
    let mut escaped = String::with_capacity(id.len());
    for byte in id.bytes() {
        match byte {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'_' | b'-' => escaped.push(byte as char),
            _ => escaped.push_str(&format!("%{:02X}", byte)),
        }
    }
    escaped
}
