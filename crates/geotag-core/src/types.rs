//! Result types reported by the embedder and the batch driver.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Outcome of embedding geolocation into one image.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmbedReport {
    /// File that was read
    pub input: PathBuf,

    /// File that was written (same as `input` for in-place writes)
    pub output: PathBuf,

    /// Latitude written, decimal degrees
    pub latitude: f64,

    /// Longitude written, decimal degrees
    pub longitude: f64,

    /// "N" or "S"
    pub latitude_ref: String,

    /// "E" or "W"
    pub longitude_ref: String,

    /// Text written to ImageDescription
    pub location_name: String,

    /// Container format of the output ("jpeg", "png", "webp")
    pub format: String,

    /// Whether a previous EXIF block was found and carried over
    pub had_existing_exif: bool,
}

/// Geolocation currently stored in an image.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeoTag {
    pub path: PathBuf,

    /// Signed decimal latitude, if the GPS section has one
    #[serde(skip_serializing_if = "Option::is_none")]
    pub latitude: Option<f64>,

    /// Signed decimal longitude, if the GPS section has one
    #[serde(skip_serializing_if = "Option::is_none")]
    pub longitude: Option<f64>,

    /// ImageDescription text
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Software text
    #[serde(skip_serializing_if = "Option::is_none")]
    pub software: Option<String>,

    /// Number of entries in the GPS section
    pub gps_entries: usize,
}

/// What happened to one file in a batch.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum FileOutcome {
    /// Geolocation was written
    Embedded(EmbedReport),

    /// The file was left as it was (or partially written) because of an error
    Failed {
        path: PathBuf,
        file_name: String,
        reason: String,
    },
}

impl FileOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, FileOutcome::Embedded(_))
    }
}

/// Accumulated outcomes of a directory run.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BatchReport {
    /// Directory that was processed
    pub directory: PathBuf,

    /// One entry per supported file, in processing order
    pub outcomes: Vec<FileOutcome>,

    /// Entries ignored for having an unsupported extension or not being a file
    pub skipped: usize,
}

impl BatchReport {
    /// Files processed without error.
    pub fn succeeded(&self) -> usize {
        self.outcomes.iter().filter(|o| o.is_success()).count()
    }

    /// Files that raised an error.
    pub fn failed(&self) -> usize {
        self.outcomes.len() - self.succeeded()
    }

    /// Failed outcomes only.
    pub fn failures(&self) -> impl Iterator<Item = &FileOutcome> {
        self.outcomes.iter().filter(|o| !o.is_success())
    }
}
