//! # Validation Tier Tests (T0-T3)
//!
//! If ANY tier fails, the system is INVALID.
//!
//! ## Tiers
//! - T0: Token Codec Integrity
//! - T1: Deterministic Graph Construction
//! - T2: Result View Lifecycle
//! - T3: Storage and Share Links

use vicinity_core::{DocId, Document, VicinityError, build_graph, decode, encode};

fn doc(value: u128, title: &str, url: &str) -> Document {
    Document::new(DocId::from_u128(value), title, url, "")
}

// =============================================================================
// TIER T0: TOKEN CODEC INTEGRITY
// =============================================================================

mod t0_token_codec {
    use super::*;
    use vicinity_core::primitives::{SENTINEL_TEXT, TOKEN_LENGTH};

    /// T0.1: The sentinel passes through encoding untouched.
    #[test]
    fn sentinel_encodes_to_its_own_text() {
        let token = encode(&DocId::NoValue);
        assert_eq!(token.as_str(), SENTINEL_TEXT);
    }

    /// T0.2: The sentinel text passes through decoding untouched.
    #[test]
    fn sentinel_text_decodes_to_sentinel() {
        let id = decode(SENTINEL_TEXT).expect("decode");
        assert!(id.is_no_value());
    }

    /// T0.3: Known values map to known tokens.
    #[test]
    fn known_value_tokens() {
        assert_eq!(
            encode(&DocId::from_u128(1)).as_str(),
            "0000000000000000000001"
        );
        assert_eq!(
            encode(&DocId::from_u128(61)).as_str(),
            "000000000000000000000z"
        );
        assert_eq!(
            encode(&DocId::from_u128(62)).as_str(),
            "0000000000000000000010"
        );
    }

    /// T0.4: The largest id round-trips.
    #[test]
    fn max_value_round_trips() {
        let id = DocId::from_u128(u128::MAX);
        let token = encode(&id);
        assert_eq!(token.as_str().len(), TOKEN_LENGTH);
        assert_eq!(decode(token.as_str()).expect("decode"), id);
    }

    /// T0.5: Wrong-length tokens are rejected.
    #[test]
    fn wrong_length_rejected() {
        let short = "000000000000000000001";
        let long = "00000000000000000000001";
        assert!(matches!(decode(short), Err(VicinityError::InvalidToken(_))));
        assert!(matches!(decode(long), Err(VicinityError::InvalidToken(_))));
        assert!(matches!(decode(""), Err(VicinityError::InvalidToken(_))));
    }

    /// T0.6: Tokens with characters outside base62 are rejected.
    #[test]
    fn bad_charset_rejected() {
        let hyphen = "000000000000000000000-";
        let space = "00000000000000000000 1";
        assert!(matches!(
            decode(hyphen),
            Err(VicinityError::InvalidToken(_))
        ));
        assert!(matches!(decode(space), Err(VicinityError::InvalidToken(_))));
    }

    /// T0.7: The all-zero token does not alias the sentinel.
    #[test]
    fn zero_token_rejected() {
        let zero = "0000000000000000000000";
        assert!(matches!(decode(zero), Err(VicinityError::InvalidToken(_))));
    }

    /// T0.8: Tokens above the 128-bit range are rejected, not wrapped.
    #[test]
    fn overflowing_token_rejected() {
        let over = "zzzzzzzzzzzzzzzzzzzzzz";
        assert!(matches!(decode(over), Err(VicinityError::InvalidToken(_))));
    }
}

// =============================================================================
// TIER T1: DETERMINISTIC GRAPH CONSTRUCTION
// =============================================================================

mod t1_graph_construction {
    use super::*;
    use vicinity_core::primitives::ROOT_NODE_LABEL;

    /// T1.1: N ranked neighbors always produce N+1 nodes and N edges.
    #[test]
    fn counts_match_input() {
        let root = doc(1, "Root", "https://root.example/");
        let neighbors = vec![
            doc(2, "Two", "https://two.example/"),
            doc(3, "Three", "https://three.example/"),
            doc(4, "Four", "https://four.example/"),
        ];

        let (graph, registry) = build_graph(&root, &neighbors);
        assert_eq!(graph.nodes.len(), 4);
        assert_eq!(graph.edges.len(), 3);
        assert_eq!(registry.len(), 4);
    }

    /// T1.2: Nodes keep rank order, root appended last.
    #[test]
    fn rank_order_preserved() {
        let root = doc(1, "Root", "https://root.example/");
        let neighbors = vec![
            doc(9, "Nine", "https://nine.example/"),
            doc(2, "Two", "https://two.example/"),
        ];

        let (graph, _) = build_graph(&root, &neighbors);
        assert_eq!(graph.nodes[0].id, encode(&DocId::from_u128(9)));
        assert_eq!(graph.nodes[1].id, encode(&DocId::from_u128(2)));
        assert_eq!(graph.nodes[2].label, ROOT_NODE_LABEL);
        assert_eq!(graph.nodes[2].id, graph.root_node);
    }

    /// T1.3: Colliding ids are diverted with the rank index, never merged.
    #[test]
    fn collisions_diverted_by_rank() {
        let root = doc(1, "Root", "https://root.example/");
        let neighbors = vec![
            doc(2, "Dup A", "https://a.example/"),
            doc(2, "Dup B", "https://b.example/"),
            doc(1, "Root Echo", "https://echo.example/"),
        ];

        let (graph, registry) = build_graph(&root, &neighbors);
        let two = encode(&DocId::from_u128(2));
        let root_token = encode(&root.id);

        assert_eq!(graph.nodes[0].id, two);
        assert_eq!(graph.nodes[1].id, two.with_rank(1));
        assert_eq!(graph.nodes[2].id, root_token.with_rank(2));
        assert_eq!(registry.len(), 4);
        assert_eq!(registry.get(root_token.as_str()), Some(&root));
    }

    /// T1.4: Edge labels name source and target tokens.
    #[test]
    fn edge_labels_join_tokens() {
        let root = doc(1, "Root", "https://root.example/");
        let neighbors = vec![doc(2, "Two", "https://two.example/")];

        let (graph, _) = build_graph(&root, &neighbors);
        let edge = &graph.edges[0];
        assert_eq!(
            edge.label,
            format!("{}-{}", graph.nodes[0].id, graph.root_node)
        );
        assert_eq!(edge.id, edge.label);
        assert_eq!(edge.document.title, "Two");
    }

    /// T1.5: Same input, same output, across repeated builds.
    #[test]
    fn repeated_builds_identical() {
        let root = doc(1, "Root", "https://root.example/");
        let neighbors = vec![
            doc(2, "Two", "https://two.example/"),
            doc(2, "Two again", "mailto:two@example.org"),
            doc(3, "Three", "not a url"),
        ];

        let (graph_a, registry_a) = build_graph(&root, &neighbors);
        let (graph_b, registry_b) = build_graph(&root, &neighbors);
        assert_eq!(graph_a, graph_b);
        assert_eq!(registry_a, registry_b);
    }

    /// T1.6: Host labels with title fallback for URLs without a host.
    #[test]
    fn labels_prefer_host() {
        let root = doc(1, "Root", "https://root.example/");
        let neighbors = vec![
            doc(2, "Two", "https://docs.example.org/guide"),
            doc(3, "Plain Text", "not a url at all"),
            doc(4, "Mail", "mailto:team@example.org"),
        ];

        let (graph, _) = build_graph(&root, &neighbors);
        assert_eq!(graph.nodes[0].label, "docs.example.org");
        assert_eq!(graph.nodes[1].label, "Plain Text");
        assert_eq!(graph.nodes[2].label, "Mail");
    }
}

// =============================================================================
// TIER T2: RESULT VIEW LIFECYCLE
// =============================================================================

mod t2_view_lifecycle {
    use super::*;
    use vicinity_core::{NeighborResponse, ResultView};

    fn response(root: &Document, neighbors: Vec<Document>) -> NeighborResponse {
        NeighborResponse {
            root_id: root.id,
            neighbors,
        }
    }

    /// T2.1: A matching response installs a fresh pair.
    #[test]
    fn matching_response_applies() {
        let root = doc(1, "Root", "https://root.example/");
        let mut view = ResultView::new();
        view.show(root.clone());

        let applied = view.apply(&response(
            &root,
            vec![doc(2, "Two", "https://two.example/")],
        ));
        assert!(applied);
        assert_eq!(view.graph().expect("graph").edges.len(), 1);
    }

    /// T2.2: A response that outlived its root is dropped whole.
    #[test]
    fn stale_response_dropped() {
        let first = doc(1, "First", "https://first.example/");
        let second = doc(2, "Second", "https://second.example/");
        let mut view = ResultView::new();

        view.show(first.clone());
        view.show(second);

        let applied = view.apply(&response(
            &first,
            vec![doc(3, "Three", "https://three.example/")],
        ));
        assert!(!applied);
        assert!(view.graph().is_none());
    }

    /// T2.3: Selection resolves against the current build only.
    #[test]
    fn selection_tracks_current_build() {
        let root = doc(1, "Root", "https://root.example/");
        let old_neighbor = doc(2, "Old", "https://old.example/");
        let new_neighbor = doc(3, "New", "https://new.example/");
        let mut view = ResultView::new();
        view.show(root.clone());

        assert!(view.apply(&response(&root, vec![old_neighbor.clone()])));
        let old_token = encode(&old_neighbor.id);
        assert_eq!(view.select(old_token.as_str()), Some(&old_neighbor));

        assert!(view.apply(&response(&root, vec![new_neighbor.clone()])));
        assert_eq!(view.select(old_token.as_str()), None);
        let new_token = encode(&new_neighbor.id);
        assert_eq!(view.select(new_token.as_str()), Some(&new_neighbor));
    }

    /// T2.4: Clearing returns the neutral empty state.
    #[test]
    fn clear_is_neutral() {
        let root = doc(1, "Root", "https://root.example/");
        let mut view = ResultView::new();
        view.show(root.clone());
        assert!(view.apply(&response(&root, vec![])));

        view.clear();
        assert!(view.root().is_none());
        assert!(view.graph().is_none());
        assert!(!view.apply(&response(&root, vec![])));
    }
}

// =============================================================================
// TIER T3: STORAGE AND SHARE LINKS
// =============================================================================

mod t3_storage_and_links {
    use super::*;
    use vicinity_core::{DocumentStore, MemoryStore, StorageBackend, resolve, share_path};

    /// T3.1: Stored documents resolve through their share path token.
    #[test]
    fn share_path_round_trip_in_memory() {
        let mut store = MemoryStore::new();
        let document = doc(42, "Answer", "https://answer.example/");
        store.put(document.clone()).expect("put");

        let path = share_path(&document.id);
        let token = path.strip_prefix("/result/").expect("prefix");
        assert_eq!(resolve(&store, token).expect("resolve"), document);
    }

    /// T3.2: Unknown tokens resolve to a not-found error, malformed
    /// tokens to an invalid-token error.
    #[test]
    fn resolve_error_paths() {
        let store = MemoryStore::new();

        let missing = encode(&DocId::from_u128(7));
        assert!(matches!(
            resolve(&store, missing.as_str()),
            Err(VicinityError::DocumentNotFound(_))
        ));
        assert!(matches!(
            resolve(&store, "!!"),
            Err(VicinityError::InvalidToken(_))
        ));
    }

    /// T3.3: The persistent backend keeps documents across reopen.
    #[test]
    fn persistent_backend_survives_reopen() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("docs.redb");
        let document = doc(9, "Nine", "https://nine.example/");

        {
            let mut backend = StorageBackend::open(Some(path.as_path())).expect("open");
            assert!(backend.is_persistent());
            backend.put(document.clone()).expect("put");
        }

        let backend = StorageBackend::open(Some(path.as_path())).expect("reopen");
        assert_eq!(backend.get(&document.id).expect("get"), Some(document));
        assert_eq!(backend.len().expect("len"), 1);
    }

    /// T3.4: The default backend is in-memory and starts empty.
    #[test]
    fn default_backend_is_memory() {
        let backend = StorageBackend::open(None).expect("open");
        assert!(!backend.is_persistent());
        assert!(backend.is_empty().expect("empty"));
    }

    /// T3.5: Listing returns documents in ascending id order.
    #[test]
    fn listing_is_ordered() {
        let mut store = MemoryStore::new();
        store
            .put(doc(9, "Nine", "https://nine.example/"))
            .expect("put");
        store
            .put(doc(2, "Two", "https://two.example/"))
            .expect("put");
        store
            .put(doc(5, "Five", "https://five.example/"))
            .expect("put");

        let all = store.all().expect("all");
        let values: Vec<u128> = all.iter().map(|d| d.id.as_u128()).collect();
        assert_eq!(values, vec![2, 5, 9]);
    }
}
