//! Captionset CLI - pair images with caption files and summarize caption tags.
//!
//! Captionset takes a listing of file names from a folder served by a local
//! file server, pairs each image with its caption file, reads the captions
//! and reports records plus tag frequencies. It never touches the folder
//! itself; everything goes through the file server.
//!
//! # Usage
//!
//! ```bash
//! # Pair a listing against a file server on port 8080
//! ls ./dataset | captionset pair --stdin --port 8080
//!
//! # Only the tag ranking, one tag per line
//! captionset pair --port 8080 --tags-only -f jsonl dog.jpg dog.txt cat.png
//!
//! # Count tags in captions read from stdin
//! cat captions.txt | captionset tags
//!
//! # View configuration
//! captionset config show
//! ```

use clap::{Parser, Subcommand};

mod cli;
mod logging;

/// Captionset - pair images with caption files and summarize caption tags.
#[derive(Parser, Debug)]
#[command(name = "captionset")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Enable verbose (debug) logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Output logs in JSON format
    #[arg(long, global = true)]
    json_logs: bool,

    #[command(subcommand)]
    command: Commands,
}

/// Available commands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Pair images with caption files and load the captions
    Pair(cli::pair::PairArgs),

    /// Count tags in caption text
    Tags(cli::tags::TagsArgs),

    /// View and manage configuration
    Config(cli::config::ConfigArgs),
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Logging isn't initialized yet, so config warnings go through eprintln.
    let config = match captionset_core::Config::load() {
        Ok(config) => config,
        Err(e) => {
            eprintln!(
                "Warning: Failed to load config: {e}\n  \
                 Using default configuration. Check your config file with `captionset config path`."
            );
            captionset_core::Config::default()
        }
    };
    logging::init_from_config(&config, cli.verbose, cli.json_logs);

    tracing::debug!("Captionset v{}", captionset_core::VERSION);

    match cli.command {
        Commands::Pair(args) => cli::pair::execute(args).await,
        Commands::Tags(args) => cli::tags::execute(args).await,
        Commands::Config(args) => cli::config::execute(args).await,
    }
}
