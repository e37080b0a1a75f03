//! Vocalis CLI — entry point.
//!
//! # Commands
//!
//! - `vocalis providers [-c CAPABILITY]` — list registered providers
//! - `vocalis resolve [...]` — dry-run a model request against the registry
//! - `vocalis status` — show config path and effective defaults

mod helpers;
mod providers_cmd;
mod resolve_cmd;
mod status;

use anyhow::Result;
use clap::{Parser, Subcommand};

// ─────────────────────────────────────────────
// CLI definition
// ─────────────────────────────────────────────

/// Vocalis — pick LLM, speech-to-text and text-to-speech models by name
#[derive(Parser)]
#[command(name = "vocalis", version, about, long_about = None)]
struct Cli {
    /// Enable debug logging
    #[arg(long, global = true, default_value_t = false)]
    logs: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List registered providers and their credential status
    Providers {
        /// Only show one capability (llm, stt, tts)
        #[arg(short, long)]
        capability: Option<String>,
    },

    /// Resolve a model request without calling any provider
    Resolve(resolve_cmd::ResolveArgs),

    /// Show configuration and effective defaults
    Status,
}

// ─────────────────────────────────────────────
// Entrypoint
// ─────────────────────────────────────────────

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.logs);

    match cli.command {
        Commands::Providers { capability } => providers_cmd::run(capability.as_deref()),
        Commands::Resolve(args) => resolve_cmd::run(&args),
        Commands::Status => status::run(),
    }
}

// ─────────────────────────────────────────────
// Logging
// ─────────────────────────────────────────────

fn init_logging(verbose: bool) {
    use tracing_subscriber::EnvFilter;

    let filter = if verbose {
        EnvFilter::new("vocalis=debug,vocalis_core=debug,vocalis_providers=debug,info")
    } else {
        EnvFilter::new("warn")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .compact()
        .init();
}
