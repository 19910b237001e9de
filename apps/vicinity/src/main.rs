//! # Vicinity - Neighbor Graph Explorer
//!
//! The main binary for the Vicinity result-graph engine.
//!
//! This application provides:
//! - CLI interface for codec, store, and graph operations
//! - Deterministic neighbor ranking over stored documents
//!
//! ## Architecture
//!
//! ```text
//! ┌───────────────────────────────────────────────────────┐
//! │                apps/vicinity (THE BINARY)             │
//! │                                                       │
//! │  ┌────────────┐   ┌──────────────┐   ┌────────────┐   │
//! │  │    CLI     │   │   Ranking    │   │  Neighbor  │   │
//! │  │   (clap)   │   │ (millionths) │   │  service   │   │
//! │  └─────┬──────┘   └──────┬───────┘   └─────┬──────┘   │
//! │        │                 │                 │          │
//! │        └─────────────────┼─────────────────┘          │
//! │                          ▼                            │
//! │                 ┌─────────────────┐                   │
//! │                 │  vicinity-core  │                   │
//! │                 │   (THE LOGIC)   │                   │
//! │                 └─────────────────┘                   │
//! └───────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```bash
//! # Import documents into a persistent store
//! vicinity --store docs.redb import results.json
//!
//! # CLI operations
//! vicinity --store docs.redb status
//! vicinity encode 9aa99963-ad4e-4d3b-9b40-984c5b8e44d4
//! vicinity --store docs.redb graph 9aa99963-ad4e-4d3b-9b40-984c5b8e44d4 --count 5
//! ```

mod cli;
mod neighbors;
mod rank;

use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

// =============================================================================
// APPLICATION ENTRY POINT
// =============================================================================

#[tokio::main]
async fn main() {
    // Initialize tracing — VICINITY_LOG_FORMAT=json enables machine-parseable output.
    let log_format = std::env::var("VICINITY_LOG_FORMAT").unwrap_or_else(|_| "text".to_string());

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "vicinity=info".into());

    match log_format.as_str() {
        "json" => {
            tracing_subscriber::registry()
                .with(filter)
                .with(tracing_subscriber::fmt::layer().json())
                .init();
        }
        _ => {
            tracing_subscriber::registry()
                .with(filter)
                .with(tracing_subscriber::fmt::layer())
                .init();
        }
    }

    // Parse CLI arguments
    let cli = cli::Cli::parse();

    // Display startup banner
    if !cli.quiet {
        print_banner();
    }

    // Execute command
    if let Err(e) = cli::execute(cli).await {
        tracing::error!("Error: {}", e);
        std::process::exit(1);
    }
}

/// Print the Vicinity startup banner.
fn print_banner() {
    println!(
        r#"
  ██╗   ██╗██╗ ██████╗██╗███╗   ██╗██╗████████╗██╗   ██╗
  ██║   ██║██║██╔════╝██║████╗  ██║██║╚══██╔══╝╚██╗ ██╔╝
  ██║   ██║██║██║     ██║██╔██╗ ██║██║   ██║    ╚████╔╝
  ╚██╗ ██╔╝██║██║     ██║██║╚██╗██║██║   ██║     ╚██╔╝
   ╚████╔╝ ██║╚██████╗██║██║ ╚████║██║   ██║      ██║
    ╚═══╝  ╚═╝ ╚═════╝╚═╝╚═╝  ╚═══╝╚═╝   ╚═╝      ╚═╝

  Neighbor Graph Explorer v{}

  Deterministic • Reversible • Self-contained
"#,
        env!("CARGO_PKG_VERSION")
    );
}
