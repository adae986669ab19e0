//! Error types for geotag.
//!
//! Errors are organized by stage so messages carry the file path and the
//! specific issue. Metadata parsing has its own error type because callers
//! recover from it locally instead of propagating it.

use std::path::PathBuf;
use thiserror::Error;

/// Configuration-specific errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to read the config file from disk
    #[error("Failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),

    /// Failed to parse TOML configuration
    #[error("Failed to parse config: {0}")]
    ParseError(#[from] toml::de::Error),

    /// Configuration values are invalid
    #[error("Invalid configuration: {0}")]
    ValidationError(String),
}

/// Errors from embedding geolocation into a single image.
#[derive(Error, Debug)]
pub enum EmbedError {
    /// Input path does not exist
    #[error("File not found: {0}")]
    FileNotFound(PathBuf),

    /// Input could not be read from disk
    #[error("Cannot read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Input bytes are not a decodable image
    #[error("Decode error for {path}: {message}")]
    Decode { path: PathBuf, message: String },

    /// Container format we cannot write EXIF into
    #[error("Unsupported format for {path}: {format}")]
    UnsupportedFormat { path: PathBuf, format: String },

    /// Resolved tag values violate EXIF type constraints
    #[error("Metadata serialization failed for {path}: {source}")]
    Serialization {
        path: PathBuf,
        #[source]
        source: SerializationError,
    },

    /// Re-encoding the pixels failed
    #[error("Encode error for {path}: {message}")]
    Encode { path: PathBuf, message: String },

    /// Output could not be written
    #[error("Cannot write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Batch directory could not be listed
    #[error("Cannot list directory {path}: {message}")]
    Directory { path: PathBuf, message: String },
}

/// Failure to load an existing EXIF block.
#[derive(Error, Debug)]
pub enum MetadataParseError {
    /// The image carries no EXIF block
    #[error("no embedded EXIF block")]
    NotFound,

    /// An EXIF block is present but could not be parsed
    #[error("malformed EXIF block: {0}")]
    Malformed(String),
}

/// Failure to serialize a metadata block to TIFF bytes.
#[derive(Error, Debug)]
pub enum SerializationError {
    /// A tag value breaks the EXIF type rules for its tag
    #[error("invalid value for {section} tag 0x{tag:04X}: {reason}")]
    InvalidValue {
        section: &'static str,
        tag: u16,
        reason: String,
    },

    /// The serialized block does not fit in the container's EXIF slot
    #[error("EXIF block of {size} bytes exceeds the {limit}-byte limit")]
    Oversized { size: usize, limit: usize },

    /// The TIFF writer rejected the block
    #[error("TIFF writer: {0}")]
    Writer(String),
}

/// Convenience type alias for embed-specific results.
pub type EmbedResult<T> = std::result::Result<T, EmbedError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serialization_error_names_section_and_tag() {
        let err = SerializationError::InvalidValue {
            section: "GPS",
            tag: 0x0002,
            reason: "expected three rationals".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "invalid value for GPS tag 0x0002: expected three rationals"
        );
    }
}
