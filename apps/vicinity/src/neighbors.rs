//! # Neighbor Service
//!
//! Fetching ranked neighbor documents for a root result.

use vicinity_core::primitives::MAX_NEIGHBOR_COUNT;
use vicinity_core::{DocId, Document, DocumentStore, VicinityError};

use crate::rank::{DocumentIndex, RankedDocument};

// =============================================================================
// NEIGHBOR SERVICE
// =============================================================================

/// Source of ranked neighbors for a root document.
///
/// Implementations return at most `count` documents, most similar
/// first, never including the root's own stored record.
#[allow(async_fn_in_trait)]
pub trait NeighborService {
    /// Fetch ranked neighbors of `root_id`.
    async fn fetch_neighbors(
        &self,
        root_id: &DocId,
        count: usize,
    ) -> Result<Vec<Document>, VicinityError>;
}

// =============================================================================
// STORE-BACKED SERVICE
// =============================================================================

/// Neighbor service backed by the document store itself.
///
/// Ranks the whole corpus by similarity to the root document's token
/// profile. The index is rebuilt per fetch so results always reflect
/// the current store contents.
#[derive(Debug)]
pub struct StoreNeighbors<'a, S: DocumentStore> {
    store: &'a S,
}

impl<'a, S: DocumentStore> StoreNeighbors<'a, S> {
    /// Create a service over a store.
    #[must_use]
    pub fn new(store: &'a S) -> Self {
        Self { store }
    }

    /// Rank documents against a free-text query.
    pub fn search(&self, query: &str, limit: usize) -> Result<Vec<RankedDocument>, VicinityError> {
        let index = DocumentIndex::build(self.store)?;
        Ok(index.search(query, limit))
    }
}

impl<S: DocumentStore> NeighborService for StoreNeighbors<'_, S> {
    async fn fetch_neighbors(
        &self,
        root_id: &DocId,
        count: usize,
    ) -> Result<Vec<Document>, VicinityError> {
        if self.store.get(root_id)?.is_none() {
            return Err(VicinityError::DocumentNotFound(*root_id));
        }

        let count = count.min(MAX_NEIGHBOR_COUNT);
        let index = DocumentIndex::build(self.store)?;
        let neighbors = index
            .similar_to(root_id, count)
            .into_iter()
            .map(|ranked| ranked.document)
            .collect();

        Ok(neighbors)
    }
}
