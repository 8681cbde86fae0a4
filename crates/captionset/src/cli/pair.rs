//! The `captionset pair` command: run one pass over a listing and print it.

use std::path::PathBuf;

use clap::Args;
use captionset_core::{Captionset, Config, PassReport, ReportWriter};

use super::input::{gather, open_output};
use super::types::OutputFormat;

/// Arguments for the `pair` command.
#[derive(Args, Debug)]
pub struct PairArgs {
    /// File names from the served folder (no paths)
    pub files: Vec<String>,

    /// Also read file names from stdin, one per line
    #[arg(long)]
    pub stdin: bool,

    /// File server host
    #[arg(long, env = "CAPTIONSET_HOST")]
    pub host: Option<String>,

    /// File server port
    #[arg(short, long, env = "CAPTIONSET_PORT")]
    pub port: Option<u16>,

    /// Folder the file server is serving (shown in the report only)
    #[arg(short, long)]
    pub working_folder: Option<String>,

    /// Tag delimiter
    #[arg(short, long)]
    pub delimiter: Option<String>,

    /// Per-caption fetch timeout in milliseconds
    #[arg(long)]
    pub timeout_ms: Option<u64>,

    /// Output file (defaults to stdout)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum)]
    pub format: Option<OutputFormat>,

    /// Pretty-print JSON output
    #[arg(long)]
    pub pretty: bool,

    /// Print only tag statistics
    #[arg(long)]
    pub tags_only: bool,
}

/// Apply command-line overrides on top of the loaded config.
pub(crate) fn apply_overrides(mut config: Config, args: &PairArgs) -> anyhow::Result<Config> {
    if let Some(host) = &args.host {
        config.server.host = host.clone();
    }
    if let Some(port) = args.port {
        config.server.port = port;
    }
    if let Some(folder) = &args.working_folder {
        config.general.working_folder = folder.clone();
    }
    if let Some(delimiter) = &args.delimiter {
        if delimiter.is_empty() {
            anyhow::bail!("--delimiter must not be empty");
        }
        config.tagging.delimiter = delimiter.clone();
    }
    if let Some(timeout_ms) = args.timeout_ms {
        if timeout_ms == 0 {
            anyhow::bail!("--timeout-ms must be > 0");
        }
        config.limits.fetch_timeout_ms = timeout_ms;
    }
    if !config.server.is_configured() {
        anyhow::bail!(
            "No file server port configured.\n  \
             Pass --port, set CAPTIONSET_PORT, or set server.port in the config file."
        );
    }
    Ok(config)
}

/// Execute the pair command.
pub async fn execute(args: PairArgs) -> anyhow::Result<()> {
    let config = apply_overrides(Config::load()?, &args)?;
    let files = gather(args.files.clone(), args.stdin, true)?;
    if files.is_empty() {
        tracing::warn!("No file names given, nothing to pair");
    }

    let format = OutputFormat::resolve(args.format, &config.output.format);
    let pretty = args.pretty || config.output.pretty;

    let captionset = Captionset::new(config);
    tracing::info!(
        "Pairing {} files against {}",
        files.len(),
        captionset.config().server.base_url()
    );

    let pipeline = captionset.http_pipeline()?;
    pipeline.set_files(files).await?;
    let snapshot = pipeline.wait_ready().await?;
    pipeline.shutdown().await;

    let mut writer = ReportWriter::new(open_output(args.output.as_deref())?, format, pretty);
    if args.tags_only {
        writer.write_tags(&snapshot.tags)?;
    } else {
        writer.write_report(&PassReport::from_snapshot(&snapshot))?;
    }
    writer.flush()?;

    if snapshot.summary.failed > 0 {
        tracing::warn!(
            "{} of {} captions could not be read and were left empty",
            snapshot.summary.failed,
            snapshot.summary.total()
        );
    }
    Ok(())
}
