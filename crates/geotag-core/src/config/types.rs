//! Sub-configuration structs and their defaults.

use serde::{Deserialize, Serialize};

/// Coordinate and name used when a request supplies neither a known
/// location key nor explicit values.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DefaultLocationConfig {
    /// Latitude in decimal degrees (negative is South)
    pub latitude: f64,

    /// Longitude in decimal degrees (negative is West)
    pub longitude: f64,

    /// Human-readable location written to ImageDescription
    pub location_name: String,
}

impl Default for DefaultLocationConfig {
    fn default() -> Self {
        Self {
            latitude: 36.5100,
            longitude: -4.8826,
            location_name: "Costa del Sol, Málaga, Spain".to_string(),
        }
    }
}

/// Tag values and encoder settings for writing images.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EmbedConfig {
    /// Value of the Software tag
    pub software: String,

    /// JPEG encoder quality (1-100)
    pub jpeg_quality: u8,

    /// Use the slowest, smallest PNG compression
    pub optimize: bool,
}

impl Default for EmbedConfig {
    fn default() -> Self {
        Self {
            software: "DelSolPrimeHomes EXIF Embedder".to_string(),
            jpeg_quality: 95,
            optimize: true,
        }
    }
}

/// Directory processing settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BatchConfig {
    /// File extensions picked up in batch mode (case-insensitive)
    pub supported_formats: Vec<String>,
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            supported_formats: vec![
                "jpg".to_string(),
                "jpeg".to_string(),
                "png".to_string(),
                "webp".to_string(),
            ],
        }
    }
}

/// Logging settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level: "error", "warn", "info", "debug", "trace"
    pub level: String,

    /// Log format: "pretty" or "json"
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "pretty".to_string(),
        }
    }
}
