//! # Document Store
//!
//! The store abstraction that supplies root and neighbor documents.
//!
//! The graph builder never fetches anything itself; documents come from a
//! store behind the `DocumentStore` trait. This module defines the trait,
//! the in-memory backend, and the backend selector. The disk-backed
//! backend lives in `storage`.

use std::collections::BTreeMap;
use std::path::Path;

use crate::storage::RedbStore;
use crate::types::{DocId, Document, VicinityError};

// =============================================================================
// DOCUMENTSTORE TRAIT
// =============================================================================

/// The DocumentStore trait defines document lookup and supply.
///
/// All fallible operations return `Result<T, VicinityError>` to support
/// both in-memory and persistent storage backends uniformly.
pub trait DocumentStore {
    /// Look up a document by canonical id.
    fn get(&self, id: &DocId) -> Result<Option<Document>, VicinityError>;

    /// Insert or replace a document, keyed by its id.
    ///
    /// The sentinel id denotes "no value" and never identifies a stored
    /// document; storing it fails with `InvalidDocId`.
    fn put(&mut self, document: Document) -> Result<(), VicinityError>;

    /// All documents in ascending id order.
    fn all(&self) -> Result<Vec<Document>, VicinityError>;

    /// Number of stored documents.
    fn len(&self) -> Result<u64, VicinityError>;

    /// Whether the store holds no documents.
    fn is_empty(&self) -> Result<bool, VicinityError> {
        Ok(self.len()? == 0)
    }
}

// =============================================================================
// IN-MEMORY STORE
// =============================================================================

/// In-memory document store.
///
/// Uses `BTreeMap` for deterministic iteration. Fast and volatile.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    docs: BTreeMap<DocId, Document>,
}

impl MemoryStore {
    /// Create an empty in-memory store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl DocumentStore for MemoryStore {
    fn get(&self, id: &DocId) -> Result<Option<Document>, VicinityError> {
        Ok(self.docs.get(id).cloned())
    }

    fn put(&mut self, document: Document) -> Result<(), VicinityError> {
        if document.id.is_no_value() {
            return Err(VicinityError::InvalidDocId(
                "the no-value sentinel cannot key a stored document".to_string(),
            ));
        }
        self.docs.insert(document.id, document);
        Ok(())
    }

    fn all(&self) -> Result<Vec<Document>, VicinityError> {
        Ok(self.docs.values().cloned().collect())
    }

    fn len(&self) -> Result<u64, VicinityError> {
        Ok(self.docs.len() as u64)
    }
}

// =============================================================================
// BACKEND SELECTION
// =============================================================================

/// Storage backend for documents.
#[derive(Debug)]
pub enum StorageBackend {
    /// In-memory store (fast, volatile).
    InMemory(MemoryStore),
    /// Disk-backed store using redb (ACID, persistent).
    Persistent(RedbStore),
}

impl Default for StorageBackend {
    fn default() -> Self {
        Self::InMemory(MemoryStore::new())
    }
}

// NOTE: StorageBackend does NOT implement Clone.
// RedbStore (database handle) cannot be safely cloned.

impl StorageBackend {
    /// Open a persistent store at `path`, or an in-memory store when no
    /// path is given.
    pub fn open(path: Option<&Path>) -> Result<Self, VicinityError> {
        match path {
            Some(path) => Ok(Self::Persistent(RedbStore::open(path)?)),
            None => Ok(Self::InMemory(MemoryStore::new())),
        }
    }

    /// Whether this backend persists to disk.
    #[must_use]
    pub fn is_persistent(&self) -> bool {
        matches!(self, Self::Persistent(_))
    }
}

impl DocumentStore for StorageBackend {
    fn get(&self, id: &DocId) -> Result<Option<Document>, VicinityError> {
        match self {
            Self::InMemory(store) => store.get(id),
            Self::Persistent(store) => store.get(id),
        }
    }

    fn put(&mut self, document: Document) -> Result<(), VicinityError> {
        match self {
            Self::InMemory(store) => store.put(document),
            Self::Persistent(store) => store.put(document),
        }
    }

    fn all(&self) -> Result<Vec<Document>, VicinityError> {
        match self {
            Self::InMemory(store) => store.all(),
            Self::Persistent(store) => store.all(),
        }
    }

    fn len(&self) -> Result<u64, VicinityError> {
        match self {
            Self::InMemory(store) => store.len(),
            Self::Persistent(store) => store.len(),
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================
