//! # Shareable Links
//!
//! The `/result/{token}` link format and its inverse: resolving a token
//! from an incoming link back to the stored document.

use crate::primitives::RESULT_PATH_PREFIX;
use crate::store::DocumentStore;
use crate::token::{decode, encode};
use crate::types::{DocId, Document, VicinityError};

/// Shareable path for a document id: `/result/{token}`.
#[must_use]
pub fn share_path(id: &DocId) -> String {
    format!("{RESULT_PATH_PREFIX}{}", encode(id))
}

/// Resolve a share-link token against a store.
///
/// Decodes the token, then looks the id up. Malformed tokens surface
/// [`VicinityError::InvalidToken`]; absent documents surface
/// [`VicinityError::DocumentNotFound`]. Callers map both to a
/// "resource not found" outcome and never retry.
pub fn resolve<S: DocumentStore>(store: &S, token: &str) -> Result<Document, VicinityError> {
    let id = decode(token)?;
    store.get(&id)?.ok_or(VicinityError::DocumentNotFound(id))
}

// =============================================================================
// TESTS
// =============================================================================
