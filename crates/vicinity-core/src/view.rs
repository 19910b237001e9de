//! # Result View
//!
//! Session-local holder of the currently displayed result and its
//! neighbor graph.
//!
//! The builder itself is pure; this wrapper enforces the caller-side
//! contract around it: a fetch response applies only while it still
//! matches the displayed root, and the (graph, registry) pair is swapped
//! whole on every rebuild, never patched.

use serde::{Deserialize, Serialize};

use crate::graph::{NeighborGraph, Registry, build_graph};
use crate::types::{DocId, Document};

// =============================================================================
// NEIGHBOR RESPONSE
// =============================================================================

/// A completed neighbor fetch, tagged with the root id it answers.
///
/// The tag is what makes stale responses detectable: a response for a
/// root the view no longer displays is dropped without effect.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NeighborResponse {
    /// Id of the root document this response was fetched for.
    pub root_id: DocId,
    /// Ranked neighbor documents, most relevant first.
    pub neighbors: Vec<Document>,
}

// =============================================================================
// RESULT VIEW
// =============================================================================

/// Holder of the displayed root document and its current
/// (graph, registry) pair.
///
/// At most one pair exists at a time; [`ResultView::apply`] replaces it
/// atomically. The view owns its pair outright, so no lock discipline is
/// needed around it.
#[derive(Debug, Clone, Default)]
pub struct ResultView {
    root: Option<Document>,
    current: Option<(NeighborGraph, Registry)>,
}

impl ResultView {
    /// Create an empty view.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Display a new root document. Any previous pair is dropped; the
    /// graph stays empty until a matching response arrives.
    pub fn show(&mut self, root: Document) {
        self.root = Some(root);
        self.current = None;
    }

    /// Apply a neighbor fetch response.
    ///
    /// Returns `false` and changes nothing when the response is stale:
    /// its root id differs from the displayed root's, or nothing is
    /// displayed. Otherwise rebuilds the pair from scratch, swaps it in
    /// whole, and returns `true`.
    pub fn apply(&mut self, response: &NeighborResponse) -> bool {
        let Some(root) = &self.root else {
            return false;
        };
        if root.id != response.root_id {
            return false;
        }
        self.current = Some(build_graph(root, &response.neighbors));
        true
    }

    /// The displayed root document, if any.
    #[must_use]
    pub fn root(&self) -> Option<&Document> {
        self.root.as_ref()
    }

    /// The current graph, if a matching response has been applied.
    #[must_use]
    pub fn graph(&self) -> Option<&NeighborGraph> {
        self.current.as_ref().map(|(graph, _)| graph)
    }

    /// The current registry, if a matching response has been applied.
    #[must_use]
    pub fn registry(&self) -> Option<&Registry> {
        self.current.as_ref().map(|(_, registry)| registry)
    }

    /// Node-click lookup: the document behind a node id of the current
    /// graph.
    #[must_use]
    pub fn select(&self, token: &str) -> Option<&Document> {
        self.registry().and_then(|registry| registry.get(token))
    }

    /// Drop the root and the pair. This is the empty/neutral state shown
    /// after a failed fetch.
    pub fn clear(&mut self) {
        self.root = None;
        self.current = None;
    }
}

// =============================================================================
// TESTS
// =============================================================================
