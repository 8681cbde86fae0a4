//! Report output in JSON and JSONL form.
//!
//! JSON writes the whole report as one object. JSONL streams one line per
//! record followed by a single line carrying tag statistics, so large folders
//! can be piped into line-oriented tools.

use serde::Serialize;
use std::io::{self, Write};

use crate::pipeline::PipelineSnapshot;
use crate::tagging::TagStats;
use crate::types::{FetchSummary, ImageRecord};

/// Output format options.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// One JSON document
    Json,
    /// One JSON object per line
    JsonLines,
}

impl OutputFormat {
    /// Parse format from string (case-insensitive).
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "json" => Some(Self::Json),
            "jsonl" | "jsonlines" | "ndjson" => Some(Self::JsonLines),
            _ => None,
        }
    }
}

/// A record as printed, with the CLIP token count of its caption.
#[derive(Debug, Clone, Serialize)]
pub struct ReportRecord<'a> {
    #[serde(flatten)]
    pub record: &'a ImageRecord,
    pub tokens: usize,
}

/// The result of a pass as printed by the CLI.
#[derive(Debug, Clone, Serialize)]
pub struct PassReport<'a> {
    pub working_folder: &'a str,
    pub records: Vec<ReportRecord<'a>>,
    pub tags: &'a TagStats,
    pub summary: FetchSummary,
}

impl<'a> PassReport<'a> {
    pub fn from_snapshot(snapshot: &'a PipelineSnapshot) -> Self {
        let records = snapshot
            .records
            .iter()
            .enumerate()
            .map(|(i, record)| ReportRecord {
                record,
                tokens: snapshot.tokens(i).unwrap_or(0),
            })
            .collect();
        Self {
            working_folder: &snapshot.working_folder,
            records,
            tags: &snapshot.tags,
            summary: snapshot.summary,
        }
    }
}

#[derive(Serialize)]
struct TokenLine<'a> {
    caption: &'a str,
    tokens: usize,
}

#[derive(Serialize)]
struct TagsLine<'a> {
    tags: &'a TagStats,
    summary: FetchSummary,
}

/// Writes reports and tag statistics in the chosen format.
pub struct ReportWriter<W: Write> {
    writer: W,
    format: OutputFormat,
    pretty: bool,
}

impl<W: Write> ReportWriter<W> {
    /// `pretty` only affects the JSON format; JSONL is always compact.
    pub fn new(writer: W, format: OutputFormat, pretty: bool) -> Self {
        Self {
            writer,
            format,
            pretty,
        }
    }

    fn write_json<T: Serialize>(&mut self, value: &T) -> io::Result<()> {
        if self.pretty {
            serde_json::to_writer_pretty(&mut self.writer, value).map_err(io::Error::other)?;
        } else {
            serde_json::to_writer(&mut self.writer, value).map_err(io::Error::other)?;
        }
        writeln!(self.writer)
    }

    fn write_line<T: Serialize>(&mut self, value: &T) -> io::Result<()> {
        serde_json::to_writer(&mut self.writer, value).map_err(io::Error::other)?;
        writeln!(self.writer)
    }

    /// Write a full pass report.
    pub fn write_report(&mut self, report: &PassReport<'_>) -> io::Result<()> {
        match self.format {
            OutputFormat::Json => self.write_json(report),
            OutputFormat::JsonLines => {
                for record in &report.records {
                    self.write_line(record)?;
                }
                self.write_line(&TagsLine {
                    tags: report.tags,
                    summary: report.summary,
                })
            }
        }
    }

    /// Write tag statistics only.
    pub fn write_tags(&mut self, tags: &TagStats) -> io::Result<()> {
        match self.format {
            OutputFormat::Json => self.write_json(tags),
            OutputFormat::JsonLines => {
                for (tag, count) in tags.sorted.iter().map(|t| (t, tags.frequencies.get(t))) {
                    self.write_line(&serde_json::json!({ "tag": tag, "count": count }))?;
                }
                Ok(())
            }
        }
    }

    /// Write the token count of each caption, paired by position.
    pub fn write_token_counts(&mut self, captions: &[String], counts: &[usize]) -> io::Result<()> {
        let lines: Vec<TokenLine<'_>> = captions
            .iter()
            .zip(counts)
            .map(|(caption, &tokens)| TokenLine { caption, tokens })
            .collect();
        match self.format {
            OutputFormat::Json => self.write_json(&lines),
            OutputFormat::JsonLines => {
                for line in &lines {
                    self.write_line(line)?;
                }
                Ok(())
            }
        }
    }

    /// Flush the underlying writer.
    pub fn flush(&mut self) -> io::Result<()> {
        self.writer.flush()
    }
}
