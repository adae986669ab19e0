//! Command handlers.

pub mod config;
pub mod embed;
pub mod locations;
pub mod show;

use clap::ValueEnum;
use geotag_core::output::OutputFormat;

/// How reports are printed on stdout.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum Format {
    /// Check-mark lines for humans
    #[default]
    Text,
    /// Single JSON document
    Json,
    /// One JSON object per line
    Jsonl,
}

impl From<Format> for OutputFormat {
    fn from(format: Format) -> Self {
        match format {
            Format::Text => OutputFormat::Text,
            Format::Json => OutputFormat::Json,
            Format::Jsonl => OutputFormat::JsonLines,
        }
    }
}

