//! The `captionset tags` command: tag statistics for raw caption text.

use std::path::PathBuf;

use clap::Args;
use captionset_core::{Config, ReportWriter, TagAggregator, TokenCounter};

use super::input::{gather, open_output};
use super::types::OutputFormat;

/// Arguments for the `tags` command.
#[derive(Args, Debug)]
pub struct TagsArgs {
    /// Captions to count; read from stdin (one per line) when none are given
    pub captions: Vec<String>,

    /// Tag delimiter (defaults to tagging.delimiter from the config)
    #[arg(short, long)]
    pub delimiter: Option<String>,

    /// Output file (defaults to stdout)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum)]
    pub format: Option<OutputFormat>,

    /// Pretty-print JSON output
    #[arg(long)]
    pub pretty: bool,

    /// Print the CLIP token count of each caption instead of tag statistics
    #[arg(long)]
    pub tokens: bool,
}

/// Execute the tags command.
pub async fn execute(args: TagsArgs) -> anyhow::Result<()> {
    let config = Config::load()?;
    let delimiter = args
        .delimiter
        .clone()
        .unwrap_or_else(|| config.tagging.delimiter.clone());

    let from_stdin = args.captions.is_empty();
    let captions = gather(args.captions, from_stdin, false)?;

    let format = OutputFormat::resolve(args.format, &config.output.format);
    let mut writer = ReportWriter::new(
        open_output(args.output.as_deref())?,
        format,
        args.pretty || config.output.pretty,
    );

    if args.tokens {
        tracing::debug!("Counting tokens in {} captions", captions.len());
        let counts = TokenCounter::new().count_all(captions.iter().map(String::as_str));
        writer.write_token_counts(&captions, &counts)?;
    } else {
        let aggregator = TagAggregator::new(delimiter);
        tracing::debug!(
            "Counting tags in {} captions split on {:?}",
            captions.len(),
            aggregator.delimiter()
        );
        let stats = aggregator.aggregate_captions(captions.iter().map(String::as_str));
        writer.write_tags(&stats)?;
    }
    writer.flush()?;
    Ok(())
}
