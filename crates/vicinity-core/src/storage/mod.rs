//! # Persistent Storage
//!
//! Disk-backed document storage using redb.

mod redb_docs;

pub use redb_docs::RedbStore;
