//! # Neighbor Graph Builder
//!
//! Turns a root document plus its ranked neighbors into a deduplicated,
//! renderable graph with a reverse lookup registry.
//!
//! [`build_graph`] is a pure function: same root and same neighbor order
//! yield the same (graph, registry) pair, byte for byte. All collections
//! iterate in insertion order or `BTreeMap` order; no randomness anywhere.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use url::Url;

use crate::primitives::{NEIGHBOR_NODE_SIZE, ROOT_NODE_LABEL, ROOT_NODE_SIZE};
use crate::token::{ShortToken, encode};
use crate::types::Document;

// =============================================================================
// RENDERABLE GRAPH
// =============================================================================

/// A renderable node of the neighbor graph.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphNode {
    /// Node id. Unique within one graph instance.
    pub id: ShortToken,
    /// Display label: the document's URL host, or its title when the URL
    /// yields no host.
    pub label: String,
    /// Visual weight.
    pub size: u32,
}

/// A directed edge from a neighbor node to the root node.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphEdge {
    /// Edge id. Same text as `label`.
    pub id: String,
    /// Source node id (a neighbor).
    pub source: ShortToken,
    /// Target node id (always the root's token).
    pub target: ShortToken,
    /// Display label, `"{source}-{target}"`.
    pub label: String,
    /// The neighbor document this edge connects to the root.
    pub document: Document,
}

/// The renderable neighbor graph of one root document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NeighborGraph {
    /// Token of the root node.
    pub root_node: ShortToken,
    /// Nodes in insertion order: neighbors by rank, then the root last.
    pub nodes: Vec<GraphNode>,
    /// Edges in registry insertion order (neighbor rank order).
    pub edges: Vec<GraphEdge>,
}

// =============================================================================
// REGISTRY
// =============================================================================

/// Reverse lookup from node id to document, scoped to exactly one build.
///
/// Preserves insertion order (neighbors by rank, root last) so edge
/// construction and display listings stay deterministic. Never shared or
/// merged across builds: a rebuild replaces the whole registry, and node
/// ids from an older build must not be looked up against a newer one.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Registry {
    /// Node ids in insertion order.
    order: Vec<ShortToken>,
    /// Node id -> document.
    docs: BTreeMap<ShortToken, Document>,
}

impl Registry {
    /// Insert an entry. Keys are unique by construction (the builder
    /// diverts collisions before inserting), so the order list and the
    /// map stay in lockstep.
    fn insert(&mut self, token: ShortToken, document: Document) {
        if self.docs.insert(token.clone(), document).is_none() {
            self.order.push(token);
        }
    }

    /// Look up the document behind a node id.
    #[must_use]
    pub fn get(&self, token: &str) -> Option<&Document> {
        self.docs.get(token)
    }

    /// Whether a node id is present.
    #[must_use]
    pub fn contains(&self, token: &str) -> bool {
        self.docs.contains_key(token)
    }

    /// Number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// Whether the registry has no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&ShortToken, &Document)> {
        self.order
            .iter()
            .filter_map(|token| self.docs.get(token.as_str()).map(|doc| (token, doc)))
    }
}

// =============================================================================
// BUILDER
// =============================================================================

/// Build the renderable graph and its lookup registry for one root
/// document and its ranked neighbors.
///
/// `neighbors` must already be ranked; rank order is preserved in nodes,
/// edges, and registry. The list may repeat an id or carry the root's own
/// id (re-crawled duplicate content): colliding node ids get the
/// neighbor's 0-based rank appended, so duplicates become distinct nodes
/// instead of merging into the root.
///
/// Returns a self-contained pair. Callers replace the previous pair in
/// full on rebuild; nothing is patched in place.
#[must_use]
pub fn build_graph(root: &Document, neighbors: &[Document]) -> (NeighborGraph, Registry) {
    let root_token = encode(&root.id);
    let mut registry = Registry::default();
    let mut nodes = Vec::with_capacity(neighbors.len() + 1);

    for (rank, neighbor) in neighbors.iter().enumerate() {
        let candidate = encode(&neighbor.id);
        let node_id = if registry.contains(candidate.as_str()) || candidate == root_token {
            candidate.with_rank(rank)
        } else {
            candidate
        };

        nodes.push(GraphNode {
            id: node_id.clone(),
            label: node_label(neighbor),
            size: NEIGHBOR_NODE_SIZE,
        });
        registry.insert(node_id, neighbor.clone());
    }

    // One edge per registry entry, neighbor -> root, in insertion order.
    // The root is not in the registry yet.
    let edges = registry
        .iter()
        .map(|(node_id, document)| {
            let label = format!("{node_id}-{root_token}");
            GraphEdge {
                id: label.clone(),
                source: node_id.clone(),
                target: root_token.clone(),
                label,
                document: document.clone(),
            }
        })
        .collect();

    registry.insert(root_token.clone(), root.clone());
    nodes.push(GraphNode {
        id: root_token.clone(),
        label: ROOT_NODE_LABEL.to_string(),
        size: ROOT_NODE_SIZE,
    });

    let graph = NeighborGraph {
        root_node: root_token,
        nodes,
        edges,
    };

    (graph, registry)
}

/// Display label for a neighbor node: the URL host, or the document title
/// when parsing yields no host. Malformed URLs are expected in crawled
/// data and never abort a build.
fn node_label(document: &Document) -> String {
    Url::parse(&document.url)
        .ok()
        .and_then(|url| url.host_str().map(str::to_string))
        .unwrap_or_else(|| document.title.clone())
}

// =============================================================================
// TESTS
// =============================================================================
