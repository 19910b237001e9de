//! # vicinity-core
//!
//! The deterministic result-graph core for Vicinity - THE LOGIC.
//!
//! Two pieces carry the design weight:
//! - the **identifier codec**: a reversible mapping between canonical
//!   128-bit document ids and short URL-safe tokens, with one reserved
//!   sentinel that passes through untransformed;
//! - the **neighbor graph builder**: a pure function turning a root
//!   document plus its ranked neighbors into a deduplicated, renderable
//!   graph and a per-build lookup registry.
//!
//! Around them sit the collaborator seams the binary drives: the document
//! store abstraction, share-link resolution, and the result view that
//! guards against stale fetch responses.
//!
//! ## Architectural Constraints
//!
//! The CORE:
//! - Is synchronous and pure: no async, no network, no I/O in the codec
//!   or the builder
//! - Is deterministic: `BTreeMap` only, integer arithmetic only, no
//!   randomness
//! - Never panics; all failures are typed `Result`s

// =============================================================================
// MODULES
// =============================================================================

pub mod graph;
pub mod link;
pub mod primitives;
pub mod storage;
pub mod store;
pub mod token;
pub mod types;
pub mod view;

// =============================================================================
// RE-EXPORTS: Core Types (from types module)
// =============================================================================

pub use types::{DocId, Document, VicinityError};

// =============================================================================
// RE-EXPORTS: Codec & Graph Builder
// =============================================================================

pub use graph::{GraphEdge, GraphNode, NeighborGraph, Registry, build_graph};
pub use token::{ShortToken, decode, encode};

// =============================================================================
// RE-EXPORTS: Collaborator Seams
// =============================================================================

pub use link::{resolve, share_path};
pub use storage::RedbStore;
pub use store::{DocumentStore, MemoryStore, StorageBackend};
pub use view::{NeighborResponse, ResultView};
