//! # redb-backed Document Storage
//!
//! A disk-backed document store using the redb embedded database:
//! - ACID transactions
//! - Crash safety (copy-on-write B-trees)
//! - Zero configuration
//!
//! Documents are keyed by the id's 16-byte big-endian form, so iterating
//! the table yields the same ascending id order as the in-memory store.

use redb::{Database, ReadableDatabase, ReadableTable, ReadableTableMetadata, TableDefinition};
use std::path::Path;

use crate::store::DocumentStore;
use crate::types::{DocId, Document, VicinityError};

/// Table for documents: 16-byte big-endian id -> postcard Document bytes
const DOCUMENTS: TableDefinition<&[u8], &[u8]> = TableDefinition::new("documents");

/// A disk-backed document store using redb.
pub struct RedbStore {
    /// The redb database handle.
    db: Database,
}

impl std::fmt::Debug for RedbStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RedbStore").finish_non_exhaustive()
    }
}

impl RedbStore {
    /// Open or create a document database at the given path.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, VicinityError> {
        let db =
            Database::create(path.as_ref()).map_err(|e| VicinityError::IoError(e.to_string()))?;

        // Initialize the table if it doesn't exist
        {
            let write_txn = db
                .begin_write()
                .map_err(|e| VicinityError::IoError(e.to_string()))?;
            let _ = write_txn
                .open_table(DOCUMENTS)
                .map_err(|e| VicinityError::IoError(e.to_string()))?;
            write_txn
                .commit()
                .map_err(|e| VicinityError::IoError(e.to_string()))?;
        }

        Ok(Self { db })
    }
}

// =============================================================================
// DOCUMENTSTORE TRAIT IMPLEMENTATION
// =============================================================================

impl DocumentStore for RedbStore {
    fn get(&self, id: &DocId) -> Result<Option<Document>, VicinityError> {
        let read_txn = self
            .db
            .begin_read()
            .map_err(|e| VicinityError::IoError(e.to_string()))?;
        let table = read_txn
            .open_table(DOCUMENTS)
            .map_err(|e| VicinityError::IoError(e.to_string()))?;

        let key = id.to_bytes();
        match table
            .get(key.as_slice())
            .map_err(|e| VicinityError::IoError(e.to_string()))?
        {
            Some(data) => {
                let document: Document = postcard::from_bytes(data.value())
                    .map_err(|e| VicinityError::SerializationError(e.to_string()))?;
                Ok(Some(document))
            }
            None => Ok(None),
        }
    }

    fn put(&mut self, document: Document) -> Result<(), VicinityError> {
        if document.id.is_no_value() {
            return Err(VicinityError::InvalidDocId(
                "the no-value sentinel cannot key a stored document".to_string(),
            ));
        }

        let key = document.id.to_bytes();
        let bytes = postcard::to_allocvec(&document)
            .map_err(|e| VicinityError::SerializationError(e.to_string()))?;

        let write_txn = self
            .db
            .begin_write()
            .map_err(|e| VicinityError::IoError(e.to_string()))?;
        {
            let mut table = write_txn
                .open_table(DOCUMENTS)
                .map_err(|e| VicinityError::IoError(e.to_string()))?;
            table
                .insert(key.as_slice(), bytes.as_slice())
                .map_err(|e| VicinityError::IoError(e.to_string()))?;
        }
        write_txn
            .commit()
            .map_err(|e| VicinityError::IoError(e.to_string()))?;

        Ok(())
    }

    fn all(&self) -> Result<Vec<Document>, VicinityError> {
        let read_txn = self
            .db
            .begin_read()
            .map_err(|e| VicinityError::IoError(e.to_string()))?;
        let table = read_txn
            .open_table(DOCUMENTS)
            .map_err(|e| VicinityError::IoError(e.to_string()))?;

        let mut documents = Vec::new();
        for entry in table
            .iter()
            .map_err(|e| VicinityError::IoError(e.to_string()))?
        {
            let (_, data) = entry.map_err(|e| VicinityError::IoError(e.to_string()))?;
            let document: Document = postcard::from_bytes(data.value())
                .map_err(|e| VicinityError::SerializationError(e.to_string()))?;
            documents.push(document);
        }
        Ok(documents)
    }

    fn len(&self) -> Result<u64, VicinityError> {
        let read_txn = self
            .db
            .begin_read()
            .map_err(|e| VicinityError::IoError(e.to_string()))?;
        let table = read_txn
            .open_table(DOCUMENTS)
            .map_err(|e| VicinityError::IoError(e.to_string()))?;
        table
            .len()
            .map_err(|e| VicinityError::IoError(e.to_string()))
    }
}

// =============================================================================
// TESTS
// =============================================================================
