//! # Vicinity CLI Module
//!
//! This module implements the CLI interface for Vicinity.
//!
//! ## Available Commands
//!
//! - `import` - Load documents from a JSON file into the store
//! - `status` - Show store status
//! - `encode` - Encode a canonical id into its short token
//! - `decode` - Decode a short token into its canonical id
//! - `link` - Print the shareable result path for an id
//! - `resolve` - Resolve a share token against the store
//! - `graph` - Build and print the neighbor graph of a document
//! - `search` - Rank stored documents against a query

mod commands;

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use vicinity_core::VicinityError;
use vicinity_core::primitives::DEFAULT_NEIGHBOR_COUNT;

pub use commands::*;

// =============================================================================
// CLI STRUCTURE
// =============================================================================

/// Vicinity - Neighbor Graph Explorer
///
/// Builds deterministic neighbor graphs around stored documents, with
/// reversible short tokens as node ids.
#[derive(Parser, Debug)]
#[command(name = "vicinity")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Suppress banner output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Path to the document store (defaults to in-memory)
    #[arg(short = 'D', long, global = true)]
    pub store: Option<PathBuf>,

    /// Output in JSON format (for programmatic access)
    #[arg(long = "json", global = true)]
    pub json_mode: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available CLI commands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Load a JSON array of documents into the store
    Import {
        /// Path to the input file (JSON array of documents)
        file: PathBuf,
    },

    /// Show store status
    Status,

    /// Encode a canonical id into its short token
    Encode {
        /// Canonical id (UUID form)
        id: String,
    },

    /// Decode a short token into its canonical id
    Decode {
        /// 22-character short token
        token: String,
    },

    /// Print the shareable result path for an id
    Link {
        /// Canonical id (UUID form)
        id: String,
    },

    /// Resolve a share token against the store
    Resolve {
        /// 22-character short token
        token: String,
    },

    /// Build and print the neighbor graph of a stored document
    Graph {
        /// Canonical id (UUID form) of the root document
        id: String,

        /// Number of neighbors to fetch (capped at 50)
        #[arg(short, long, default_value_t = DEFAULT_NEIGHBOR_COUNT)]
        count: usize,
    },

    /// Rank stored documents against a free-text query
    Search {
        /// Query text
        query: String,

        /// Maximum number of results
        #[arg(short, long, default_value_t = 10)]
        limit: usize,
    },
}

// =============================================================================
// COMMAND EXECUTION
// =============================================================================

/// Execute the CLI with parsed arguments.
pub async fn execute(cli: Cli) -> Result<(), VicinityError> {
    let store_path = cli.store.as_deref();
    let json_mode = cli.json_mode;

    match cli.command {
        Some(Commands::Import { file }) => cmd_import(store_path, json_mode, &file),
        Some(Commands::Status) => cmd_status(store_path, json_mode),
        Some(Commands::Encode { id }) => cmd_encode(&id, json_mode),
        Some(Commands::Decode { token }) => cmd_decode(&token, json_mode),
        Some(Commands::Link { id }) => cmd_link(&id, json_mode),
        Some(Commands::Resolve { token }) => cmd_resolve(store_path, json_mode, &token),
        Some(Commands::Graph { id, count }) => cmd_graph(store_path, json_mode, &id, count).await,
        Some(Commands::Search { query, limit }) => cmd_search(store_path, json_mode, &query, limit),
        None => {
            // No subcommand - show status by default
            cmd_status(store_path, json_mode)
        }
    }
}
