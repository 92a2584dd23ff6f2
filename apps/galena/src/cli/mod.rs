//! # Galena CLI Module
//!
//! CLI interface for the Galena mining engine.
//!
//! ## Available Commands
//!
//! - `mine` - Mine the top-k frequent closed itemsets from a database file
//! - `compare` - Run all three search strategies and compare them
//! - `prune` - Run the incremental pruning-profile ladder
//! - `stats` - Show dataset statistics

mod commands;

use clap::{Parser, Subcommand};
use galena_core::GalenaError;
use std::path::PathBuf;

pub use commands::*;

// =============================================================================
// CLI STRUCTURE
// =============================================================================

/// Galena - top-k frequent closed itemset mining over uncertain databases.
///
/// Every item of every transaction carries an independent existence
/// probability; mining returns the k closed itemsets with the largest
/// probabilistic support under the threshold tau.
#[derive(Parser, Debug)]
#[command(name = "galena")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Output in JSON format (for programmatic access)
    #[arg(long, global = true)]
    pub json: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available CLI commands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Mine the top-k frequent closed itemsets
    Mine {
        /// Path to the uncertain transaction file
        #[arg(short, long)]
        file: PathBuf,

        /// Probability threshold tau in (0, 1]
        #[arg(short, long, default_value = "0.7")]
        tau: f64,

        /// Number of itemsets to mine
        #[arg(short, long, default_value = "10")]
        k: usize,

        /// Search strategy (best-first, dfs, bfs)
        #[arg(short, long, default_value = "best-first")]
        strategy: String,

        /// Support calculator (direct, dnc)
        #[arg(short, long, default_value = "direct")]
        calculator: String,
    },

    /// Run best-first, DFS, and BFS and compare their work and timing
    Compare {
        /// Path to the uncertain transaction file
        #[arg(short, long)]
        file: PathBuf,

        /// Probability threshold tau in (0, 1]
        #[arg(short, long, default_value = "0.7")]
        tau: f64,

        /// Number of itemsets to mine
        #[arg(short, long, default_value = "10")]
        k: usize,
    },

    /// Run the incremental pruning ladder (BASE, +P1, ..., ALL)
    Prune {
        /// Path to the uncertain transaction file
        #[arg(short, long)]
        file: PathBuf,

        /// Probability threshold tau in (0, 1]
        #[arg(short, long, default_value = "0.7")]
        tau: f64,

        /// Number of itemsets to mine
        #[arg(short, long, default_value = "10")]
        k: usize,

        /// Run a single ladder level (0 = BASE .. 7 = ALL) instead of all
        #[arg(short, long)]
        level: Option<u8>,

        /// Emit CSV rows instead of a table
        #[arg(long)]
        csv: bool,
    },

    /// Show dataset statistics
    Stats {
        /// Path to the uncertain transaction file
        #[arg(short, long)]
        file: PathBuf,
    },
}

// =============================================================================
// COMMAND EXECUTION
// =============================================================================

/// Execute the CLI with parsed arguments.
pub fn execute(cli: Cli) -> Result<(), GalenaError> {
    let json = cli.json;
    match cli.command {
        Commands::Mine {
            file,
            tau,
            k,
            strategy,
            calculator,
        } => cmd_mine(&file, tau, k, &strategy, &calculator, json),
        Commands::Compare { file, tau, k } => cmd_compare(&file, tau, k, json),
        Commands::Prune {
            file,
            tau,
            k,
            level,
            csv,
        } => cmd_prune(&file, tau, k, level, csv),
        Commands::Stats { file } => cmd_stats(&file, json),
    }
}
