//! Report output as text lines, JSON, or JSON Lines.

use serde::Serialize;
use std::io::{self, Write};

use crate::locations::NamedLocation;
use crate::types::{BatchReport, EmbedReport, FileOutcome, GeoTag};

/// Output format options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// Human-readable check-mark lines
    #[default]
    Text,
    /// Single JSON object or array
    Json,
    /// One JSON object per line (newline-delimited JSON)
    JsonLines,
}

/// Plain-text rendering of a report.
pub trait TextReport {
    fn text_lines(&self) -> Vec<String>;
}

impl TextReport for EmbedReport {
    fn text_lines(&self) -> Vec<String> {
        vec![
            format!(
                "✓ Embedded GPS coordinates: {}, {}",
                self.latitude, self.longitude
            ),
            format!("✓ Location: {}", self.location_name),
            format!("✓ Saved to: {}", self.output.display()),
        ]
    }
}

impl TextReport for FileOutcome {
    fn text_lines(&self) -> Vec<String> {
        match self {
            FileOutcome::Embedded(report) => {
                let name = report
                    .output
                    .file_name()
                    .map(|n| n.to_string_lossy().into_owned())
                    .unwrap_or_default();
                vec![format!(
                    "✓ {}: {}, {} ({})",
                    name, report.latitude, report.longitude, report.location_name
                )]
            }
            FileOutcome::Failed {
                file_name, reason, ..
            } => vec![format!("✗ Error processing {file_name}: {reason}")],
        }
    }
}

impl TextReport for BatchReport {
    fn text_lines(&self) -> Vec<String> {
        let mut lines = vec![format!("✓ Processed {} images", self.succeeded())];
        if self.failed() > 0 {
            lines.push(format!("✗ {} failed", self.failed()));
        }
        lines
    }
}

impl TextReport for GeoTag {
    fn text_lines(&self) -> Vec<String> {
        let mut lines = vec![self.path.display().to_string()];
        match (self.latitude, self.longitude) {
            (Some(lat), Some(lon)) => lines.push(format!("  GPS: {lat:.6}, {lon:.6}")),
            _ => lines.push("  GPS: incomplete".to_string()),
        }
        if let Some(description) = &self.description {
            lines.push(format!("  Location: {description}"));
        }
        if let Some(software) = &self.software {
            lines.push(format!("  Software: {software}"));
        }
        lines
    }
}

impl TextReport for NamedLocation {
    fn text_lines(&self) -> Vec<String> {
        vec![format!(
            "{:<14} {:>9.4} {:>9.4}  {}",
            self.key, self.latitude, self.longitude, self.name
        )]
    }
}

/// A writer that serializes reports in the chosen format.
pub struct OutputWriter<W: Write> {
    writer: W,
    format: OutputFormat,
    pretty: bool,
}

impl<W: Write> OutputWriter<W> {
    /// Create a new output writer.
    ///
    /// `pretty` only affects [`OutputFormat::Json`].
    pub fn new(writer: W, format: OutputFormat, pretty: bool) -> Self {
        Self {
            writer,
            format,
            pretty,
        }
    }

    /// Write a single item.
    pub fn write<T: Serialize + TextReport>(&mut self, item: &T) -> io::Result<()> {
        match self.format {
            OutputFormat::Text => {
                for line in item.text_lines() {
                    writeln!(self.writer, "{line}")?;
                }
            }
            OutputFormat::Json => {
                if self.pretty {
                    serde_json::to_writer_pretty(&mut self.writer, item)
                        .map_err(io::Error::other)?;
                } else {
                    serde_json::to_writer(&mut self.writer, item).map_err(io::Error::other)?;
                }
                writeln!(self.writer)?;
            }
            OutputFormat::JsonLines => {
                serde_json::to_writer(&mut self.writer, item).map_err(io::Error::other)?;
                writeln!(self.writer)?;
            }
        }
        Ok(())
    }

    /// Write multiple items.
    ///
    /// JSON gets a single array; text and JSONL get one entry per item.
    pub fn write_all<T: Serialize + TextReport>(&mut self, items: &[T]) -> io::Result<()> {
        match self.format {
            OutputFormat::Json => {
                if self.pretty {
                    serde_json::to_writer_pretty(&mut self.writer, items)
                        .map_err(io::Error::other)?;
                } else {
                    serde_json::to_writer(&mut self.writer, items).map_err(io::Error::other)?;
                }
                writeln!(self.writer)?;
            }
            OutputFormat::Text | OutputFormat::JsonLines => {
                for item in items {
                    self.write(item)?;
                }
            }
        }
        Ok(())
    }

    /// Flush the underlying writer.
    pub fn flush(&mut self) -> io::Result<()> {
        self.writer.flush()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::locations::NAMED_LOCATIONS;
    use std::path::PathBuf;

    fn report() -> EmbedReport {
        EmbedReport {
            input: PathBuf::from("/photos/villa.jpg"),
            output: PathBuf::from("/photos/villa.jpg"),
            latitude: 36.51,
            longitude: -4.8826,
            latitude_ref: "N".to_string(),
            longitude_ref: "W".to_string(),
            location_name: "Marbella, Costa del Sol, Spain".to_string(),
            format: "jpg".to_string(),
            had_existing_exif: true,
        }
    }

    fn render<T: Serialize + TextReport>(format: OutputFormat, item: &T) -> String {
        let mut buffer = Vec::new();
        OutputWriter::new(&mut buffer, format, false)
            .write(item)
            .unwrap();
        String::from_utf8(buffer).unwrap()
    }

    #[test]
    fn test_text_embed_report() {
        let output = render(OutputFormat::Text, &report());
        let lines: Vec<&str> = output.lines().collect();
        assert_eq!(lines[0], "✓ Embedded GPS coordinates: 36.51, -4.8826");
        assert_eq!(lines[1], "✓ Location: Marbella, Costa del Sol, Spain");
        assert_eq!(lines[2], "✓ Saved to: /photos/villa.jpg");
    }

    #[test]
    fn test_text_failed_outcome() {
        let outcome = FileOutcome::Failed {
            path: PathBuf::from("/photos/broken.png"),
            file_name: "broken.png".to_string(),
            reason: "Decode error".to_string(),
        };
        assert_eq!(
            render(OutputFormat::Text, &outcome).trim_end(),
            "✗ Error processing broken.png: Decode error"
        );
    }

    #[test]
    fn test_text_batch_summary() {
        let batch = BatchReport {
            directory: PathBuf::from("/photos"),
            outcomes: vec![FileOutcome::Embedded(report())],
            skipped: 4,
        };
        assert_eq!(
            render(OutputFormat::Text, &batch).trim_end(),
            "✓ Processed 1 images"
        );
    }

    #[test]
    fn test_write_json() {
        let output = render(OutputFormat::Json, &report());
        assert!(output.contains("\"longitude_ref\":\"W\""));
        assert!(output.contains("\"had_existing_exif\":true"));
    }

    #[test]
    fn test_write_jsonl_outcomes() {
        let mut buffer = Vec::new();
        let mut writer = OutputWriter::new(&mut buffer, OutputFormat::JsonLines, false);
        let outcomes = vec![
            FileOutcome::Embedded(report()),
            FileOutcome::Failed {
                path: PathBuf::from("b.jpg"),
                file_name: "b.jpg".to_string(),
                reason: "boom".to_string(),
            },
        ];
        writer.write_all(&outcomes).unwrap();

        let output = String::from_utf8(buffer).unwrap();
        let lines: Vec<&str> = output.trim().split('\n').collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[1].contains("\"status\":\"failed\""));
    }

    #[test]
    fn test_write_all_json_array() {
        let mut buffer = Vec::new();
        let mut writer = OutputWriter::new(&mut buffer, OutputFormat::Json, false);
        writer.write_all(&NAMED_LOCATIONS).unwrap();

        let output = String::from_utf8(buffer).unwrap();
        assert!(output.starts_with('['));
        assert!(output.contains("\"key\":\"torremolinos\""));
    }

    #[test]
    fn test_text_location_row() {
        let line = NAMED_LOCATIONS[0].text_lines().remove(0);
        assert!(line.starts_with("marbella"));
        assert!(line.contains("36.5100"));
        assert!(line.ends_with("Marbella, Costa del Sol, Spain"));
    }
}
