//! # CLI Command Implementations
//!
//! This module contains the actual implementations of CLI commands.

use std::path::{Path, PathBuf};

use uuid::Uuid;
use vicinity_core::{
    DocId, Document, DocumentStore, NeighborResponse, ResultView, StorageBackend, VicinityError,
    decode, encode, resolve, share_path,
};

use crate::neighbors::{NeighborService, StoreNeighbors};

// =============================================================================
// FILE SIZE LIMITS
// =============================================================================

/// Maximum file size for import (50 MB).
///
/// This prevents memory exhaustion from malicious or accidental large files.
const MAX_IMPORT_FILE_SIZE: u64 = 50 * 1024 * 1024;

/// Maximum number of documents per import file.
const MAX_IMPORT_DOCUMENTS: usize = 100_000;

/// Validate file size before reading.
fn validate_file_size(path: &Path, max_size: u64) -> Result<(), VicinityError> {
    let metadata = std::fs::metadata(path)
        .map_err(|e| VicinityError::IoError(format!("Cannot read file metadata: {}", e)))?;

    if metadata.len() > max_size {
        return Err(VicinityError::SerializationError(format!(
            "File size {} bytes exceeds maximum allowed {} bytes",
            metadata.len(),
            max_size
        )));
    }
    Ok(())
}

/// Validate an input file path.
///
/// Canonicalizes the path to resolve symlinks and "..", then ensures
/// the path exists and is a regular file.
fn validate_file_path(path: &Path) -> Result<PathBuf, VicinityError> {
    let canonical = path.canonicalize().map_err(|e| {
        VicinityError::IoError(format!("Invalid file path '{}': {}", path.display(), e))
    })?;

    if !canonical.is_file() {
        return Err(VicinityError::IoError(format!(
            "Path '{}' is not a regular file",
            path.display()
        )));
    }

    Ok(canonical)
}

// =============================================================================
// STORE ACCESS
// =============================================================================

/// Open the document store behind the global `--store` option,
/// in-memory when the option is absent.
fn open_store(store_path: Option<&Path>) -> Result<StorageBackend, VicinityError> {
    let backend = StorageBackend::open(store_path)?;
    tracing::debug!("Opened {} store", backend_name(&backend));
    Ok(backend)
}

/// Human name of a storage backend.
fn backend_name(backend: &StorageBackend) -> &'static str {
    if backend.is_persistent() {
        "redb"
    } else {
        "memory"
    }
}

// =============================================================================
// IMPORT COMMAND
// =============================================================================

/// Load a JSON array of documents into the store.
pub fn cmd_import(
    store_path: Option<&Path>,
    json_mode: bool,
    file: &Path,
) -> Result<(), VicinityError> {
    tracing::info!("Importing documents from {:?}", file);

    let mut backend = open_store(store_path)?;
    if !backend.is_persistent() {
        tracing::warn!("No --store given; imported documents are dropped on exit");
    }

    let validated_path = validate_file_path(file)?;
    validate_file_size(&validated_path, MAX_IMPORT_FILE_SIZE)?;

    let contents = std::fs::read(&validated_path)
        .map_err(|e| VicinityError::IoError(format!("Read file: {}", e)))?;

    let records: Vec<serde_json::Value> = serde_json::from_slice(&contents)
        .map_err(|e| VicinityError::SerializationError(format!("Parse import file: {}", e)))?;

    if records.len() > MAX_IMPORT_DOCUMENTS {
        return Err(VicinityError::SerializationError(format!(
            "Document count {} exceeds maximum allowed {}",
            records.len(),
            MAX_IMPORT_DOCUMENTS
        )));
    }

    let mut minted = 0usize;
    let mut documents = Vec::with_capacity(records.len());
    for (position, record) in records.iter().enumerate() {
        documents.push(parse_record(record, position, &mut minted)?);
    }

    let count = documents.len();
    for document in documents {
        backend.put(document)?;
    }

    if json_mode {
        let output = serde_json::json!({
            "imported": count,
            "minted_ids": minted,
            "total": backend.len()?,
        });
        println!(
            "{}",
            serde_json::to_string_pretty(&output).unwrap_or_default()
        );
        return Ok(());
    }

    println!("Imported {} documents ({} ids minted)", count, minted);
    println!("Store now holds {} documents", backend.len()?);

    Ok(())
}

/// Parse one import record into a document.
///
/// Records without an `id` field get a fresh v4 id. The reserved nil
/// id is rejected outright.
fn parse_record(
    record: &serde_json::Value,
    position: usize,
    minted: &mut usize,
) -> Result<Document, VicinityError> {
    let id = match record.get("id") {
        Some(value) => {
            let text = value.as_str().ok_or_else(|| {
                VicinityError::SerializationError(format!(
                    "Record {}: id is not a string",
                    position
                ))
            })?;
            let id: DocId = text.parse()?;
            if id.is_no_value() {
                return Err(VicinityError::InvalidDocId(format!(
                    "Record {}: the nil id is reserved",
                    position
                )));
            }
            id
        }
        None => {
            *minted += 1;
            DocId::new(Uuid::new_v4())
        }
    };

    let title = record
        .get("title")
        .and_then(|v| v.as_str())
        .ok_or_else(|| {
            VicinityError::SerializationError(format!("Record {}: missing title", position))
        })?;
    let url = record.get("url").and_then(|v| v.as_str()).ok_or_else(|| {
        VicinityError::SerializationError(format!("Record {}: missing url", position))
    })?;
    let description = record
        .get("description")
        .and_then(|v| v.as_str())
        .unwrap_or_default();

    Ok(Document::new(id, title, url, description))
}

// =============================================================================
// STATUS COMMAND
// =============================================================================

/// Show store status.
pub fn cmd_status(store_path: Option<&Path>, json_mode: bool) -> Result<(), VicinityError> {
    let backend = open_store(store_path)?;
    let count = backend.len()?;

    if json_mode {
        let output = serde_json::json!({
            "backend": backend_name(&backend),
            "store": store_path.map(|p| p.to_string_lossy().into_owned()),
            "document_count": count,
        });
        println!(
            "{}",
            serde_json::to_string_pretty(&output).unwrap_or_default()
        );
        return Ok(());
    }

    println!("Vicinity Store Status");
    println!("=====================");
    println!("Backend:   {}", backend_name(&backend));
    match store_path {
        Some(path) => println!("Store:     {:?}", path),
        None => println!("Store:     (in-memory)"),
    }
    println!("Documents: {}", count);

    Ok(())
}

// =============================================================================
// CODEC COMMANDS
// =============================================================================

/// Encode a canonical id into its short token.
pub fn cmd_encode(id: &str, json_mode: bool) -> Result<(), VicinityError> {
    let id: DocId = id.parse()?;
    let token = encode(&id);

    if json_mode {
        let output = serde_json::json!({ "id": id.to_string(), "token": token.as_str() });
        println!(
            "{}",
            serde_json::to_string_pretty(&output).unwrap_or_default()
        );
        return Ok(());
    }

    println!("{}", token);
    Ok(())
}

/// Decode a short token back into its canonical id.
pub fn cmd_decode(token: &str, json_mode: bool) -> Result<(), VicinityError> {
    let id = decode(token)?;

    if json_mode {
        let output = serde_json::json!({ "token": token, "id": id.to_string() });
        println!(
            "{}",
            serde_json::to_string_pretty(&output).unwrap_or_default()
        );
        return Ok(());
    }

    println!("{}", id);
    Ok(())
}

// =============================================================================
// SHARE LINK COMMANDS
// =============================================================================

/// Print the shareable result path for an id.
pub fn cmd_link(id: &str, json_mode: bool) -> Result<(), VicinityError> {
    let id: DocId = id.parse()?;
    let path = share_path(&id);

    if json_mode {
        let output = serde_json::json!({ "id": id.to_string(), "path": path });
        println!(
            "{}",
            serde_json::to_string_pretty(&output).unwrap_or_default()
        );
        return Ok(());
    }

    println!("{}", path);
    Ok(())
}

/// Resolve a share token against the store.
pub fn cmd_resolve(
    store_path: Option<&Path>,
    json_mode: bool,
    token: &str,
) -> Result<(), VicinityError> {
    let backend = open_store(store_path)?;
    let document = resolve(&backend, token)?;

    if json_mode {
        let output = serde_json::json!({ "token": token, "document": document });
        println!(
            "{}",
            serde_json::to_string_pretty(&output).unwrap_or_default()
        );
        return Ok(());
    }

    print_document(&document);
    Ok(())
}

/// Print one document in the human-readable detail form.
fn print_document(document: &Document) {
    println!("Title: {}", document.title);
    println!("URL:   {}", document.url);
    if !document.description.is_empty() {
        println!("About: {}", document.description);
    }
    println!("Id:    {}", document.id);
}

// =============================================================================
// GRAPH COMMAND
// =============================================================================

/// Fetch neighbors for a root document and print its graph.
pub async fn cmd_graph(
    store_path: Option<&Path>,
    json_mode: bool,
    id: &str,
    count: usize,
) -> Result<(), VicinityError> {
    let backend = open_store(store_path)?;
    let root_id: DocId = id.parse()?;
    let root = backend
        .get(&root_id)?
        .ok_or(VicinityError::DocumentNotFound(root_id))?;

    let service = StoreNeighbors::new(&backend);
    let neighbors = service.fetch_neighbors(&root_id, count).await?;
    tracing::info!("Fetched {} neighbors for {}", neighbors.len(), root_id);

    let mut view = ResultView::new();
    view.show(root);
    let response = NeighborResponse { root_id, neighbors };
    if !view.apply(&response) {
        return Err(VicinityError::SerializationError(
            "Neighbor response no longer matches the displayed root".to_string(),
        ));
    }

    let graph = view
        .graph()
        .ok_or_else(|| VicinityError::SerializationError("View holds no graph".to_string()))?;
    let registry = view
        .registry()
        .ok_or_else(|| VicinityError::SerializationError("View holds no registry".to_string()))?;

    if json_mode {
        let output = serde_json::json!({
            "root": graph.root_node.as_str(),
            "graph": graph,
            "registry_entries": registry.len(),
        });
        println!(
            "{}",
            serde_json::to_string_pretty(&output).unwrap_or_default()
        );
        return Ok(());
    }

    println!("Result graph for {}", graph.root_node);
    println!();
    println!("Nodes ({}):", graph.nodes.len());
    for node in &graph.nodes {
        println!("  {}  {} (size {})", node.id, node.label, node.size);
    }
    println!();
    println!("Edges ({}):", graph.edges.len());
    for edge in &graph.edges {
        println!("  {} -> {}", edge.source, edge.target);
    }
    println!();
    println!("Registry ({} entries):", registry.len());
    for (token, document) in registry.iter() {
        println!("  {}  {}", token, document.title);
    }

    Ok(())
}

// =============================================================================
// SEARCH COMMAND
// =============================================================================

/// Rank stored documents against a free-text query.
pub fn cmd_search(
    store_path: Option<&Path>,
    json_mode: bool,
    query: &str,
    limit: usize,
) -> Result<(), VicinityError> {
    let backend = open_store(store_path)?;
    let service = StoreNeighbors::new(&backend);
    let hits = service.search(query, limit)?;

    if json_mode {
        let output = serde_json::json!({
            "query": query,
            "hits": hits
                .iter()
                .map(|hit| {
                    serde_json::json!({
                        "score_millionths": hit.millionths,
                        "document": &hit.document,
                    })
                })
                .collect::<Vec<_>>(),
        });
        println!(
            "{}",
            serde_json::to_string_pretty(&output).unwrap_or_default()
        );
        return Ok(());
    }

    if hits.is_empty() {
        println!("No matches for '{}'", query);
        return Ok(());
    }

    println!("Results for '{}':", query);
    for hit in &hits {
        println!(
            "  {:>10}  {} ({})",
            format_millionths(hit.millionths),
            hit.document.title,
            hit.document.url
        );
    }

    Ok(())
}

/// Format a millionths score as a fixed-point decimal string.
fn format_millionths(millionths: i64) -> String {
    format!("{}.{:06}", millionths / 1_000_000, millionths % 1_000_000)
}
