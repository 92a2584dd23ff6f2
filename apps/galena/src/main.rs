//! # Galena
//!
//! The main binary for the Galena mining engine.
//!
//! ```text
//! ┌──────────────────────────────────────────────┐
//! │             apps/galena (THE BINARY)         │
//! │                                              │
//! │   CLI (clap) · file loader · reporting       │
//! │                     │                        │
//! │                     ▼                        │
//! │             ┌───────────────┐                │
//! │             │  galena-core  │                │
//! │             │  (THE LOGIC)  │                │
//! │             └───────────────┘                │
//! └──────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```bash
//! galena mine -f groceries.udb --tau 0.7 -k 10
//! galena compare -f groceries.udb --tau 0.7 -k 10
//! galena prune -f groceries.udb --csv
//! galena stats -f groceries.udb
//! ```

mod cli;
mod loader;

use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

// =============================================================================
// APPLICATION ENTRY POINT
// =============================================================================

fn main() {
    let cli = cli::Cli::parse();

    let default_filter = if cli.verbose {
        "galena=debug"
    } else {
        "galena=info"
    };
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| default_filter.into());
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .init();

    if let Err(e) = cli::execute(cli) {
        tracing::error!("{e}");
        std::process::exit(1);
    }
}
