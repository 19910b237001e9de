//! # Core Type Definitions
//!
//! This module contains all core types for the Vicinity result-graph core:
//! - Canonical document identifier (`DocId`) and its reserved sentinel
//! - Document record (`Document`)
//! - Error types (`VicinityError`)
//!
//! ## Determinism Guarantees
//!
//! All types in this module:
//! - Use integer arithmetic only (no floating-point)
//! - Implement `Ord` where they key a `BTreeMap`/`BTreeSet`
//! - Serialize to stable textual forms

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;
use uuid::Uuid;

use crate::primitives::SENTINEL_TEXT;

// =============================================================================
// CANONICAL IDENTIFIER
// =============================================================================

/// Canonical 128-bit identifier of a document.
///
/// One value is reserved: [`DocId::NoValue`], the sentinel meaning
/// "no value/category". It is semantically distinct from every real id and
/// exempt from algorithmic token coding. Real ids are UUIDs; the nil UUID
/// normalizes to the sentinel, so `DocId::Id` never holds it and matching
/// on the two variants is exhaustive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub enum DocId {
    /// Reserved sentinel: "no value/category".
    NoValue,
    /// A real document identifier.
    Id(Uuid),
}

impl DocId {
    /// Create an id from a UUID, normalizing the nil UUID to the sentinel.
    #[must_use]
    pub fn new(uuid: Uuid) -> Self {
        if uuid.is_nil() {
            Self::NoValue
        } else {
            Self::Id(uuid)
        }
    }

    /// Create an id from a raw 128-bit value, normalizing zero to the sentinel.
    #[must_use]
    pub fn from_u128(value: u128) -> Self {
        Self::new(Uuid::from_u128(value))
    }

    /// Raw 128-bit value of this id. The sentinel is zero.
    #[must_use]
    pub fn as_u128(&self) -> u128 {
        match self {
            Self::NoValue => 0,
            Self::Id(uuid) => uuid.as_u128(),
        }
    }

    /// Whether this id is the reserved sentinel.
    #[must_use]
    pub fn is_no_value(&self) -> bool {
        matches!(self, Self::NoValue)
    }

    /// Big-endian 16-byte form, used as the storage key.
    #[must_use]
    pub fn to_bytes(&self) -> [u8; 16] {
        self.as_u128().to_be_bytes()
    }
}

impl fmt::Display for DocId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoValue => f.write_str(SENTINEL_TEXT),
            Self::Id(uuid) => write!(f, "{uuid}"),
        }
    }
}

impl FromStr for DocId {
    type Err = VicinityError;

    /// Parse the hyphenated UUID textual form. The nil UUID parses to the
    /// sentinel.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let uuid = Uuid::parse_str(s).map_err(|e| VicinityError::InvalidDocId(e.to_string()))?;
        Ok(Self::new(uuid))
    }
}

impl From<DocId> for String {
    fn from(id: DocId) -> Self {
        id.to_string()
    }
}

impl TryFrom<String> for DocId {
    type Error = VicinityError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

// =============================================================================
// DOCUMENT
// =============================================================================

/// A search-result document.
///
/// Immutable once fetched; owned by the document store. Crawled data is
/// not trusted: `url` may be malformed and `description` may be absent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    /// Canonical identifier of this document.
    pub id: DocId,
    /// Title shown in result lists; label fallback for unparseable URLs.
    pub title: String,
    /// Source URL of the document.
    pub url: String,
    /// Snippet/description text. Empty when the source had none.
    #[serde(default)]
    pub description: String,
}

impl Document {
    /// Create a new document.
    #[must_use]
    pub fn new(
        id: DocId,
        title: impl Into<String>,
        url: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            id,
            title: title.into(),
            url: url.into(),
            description: description.into(),
        }
    }
}

// =============================================================================
// ERROR TYPES
// =============================================================================

/// Errors that can occur in the Vicinity core.
///
/// - No silent failures
/// - Use `Result<T, VicinityError>` for fallible operations
/// - The CORE should never panic; all errors must be recoverable
#[derive(Debug, Error)]
pub enum VicinityError {
    /// The token is not a well-formed short token.
    #[error("Invalid token: {0}")]
    InvalidToken(String),

    /// The string is not a well-formed canonical id.
    #[error("Invalid document id: {0}")]
    InvalidDocId(String),

    /// The requested document was not found in the store.
    #[error("Document not found: {0}")]
    DocumentNotFound(DocId),

    /// A serialization or deserialization error occurred.
    #[error("Serialization error: {0}")]
    SerializationError(String),

    /// An I/O error occurred.
    #[error("I/O error: {0}")]
    IoError(String),
}

// =============================================================================
// TESTS
// =============================================================================
