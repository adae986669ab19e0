//! Geotag Core - embed GPS geolocation into image EXIF metadata.
//!
//! Takes a JPEG, PNG or WebP image and a location (explicit coordinates, a
//! named Costa del Sol location, or the configured default) and writes the
//! GPS section, ImageDescription and Software tags while keeping every other
//! EXIF entry the image already had.
//!
//! # Architecture
//!
//! ```text
//! request → resolved location → DMS + refs → MetadataBlock → TIFF bytes → encoder with EXIF → file
//! ```
//!
//! # Usage
//!
//! ```rust,ignore
//! use geotag_core::{Config, EmbedRequest, GeoEmbedder, LocationRequest};
//!
//! let config = Config::load()?;
//! let embedder = GeoEmbedder::new(&config);
//! let report = embedder.embed(&EmbedRequest {
//!     input: "villa.jpg".into(),
//!     output: None,
//!     location: LocationRequest {
//!         key: Some("marbella".into()),
//!         ..Default::default()
//!     },
//! })?;
//! println!("{} {}", report.latitude_ref, report.longitude_ref);
//! ```

pub mod batch;
pub mod config;
pub mod embed;
pub mod error;
pub mod geo;
pub mod locations;
pub mod metadata;
pub mod output;
pub mod types;

pub use batch::BatchDriver;
pub use config::Config;
pub use embed::{EmbedRequest, GeoEmbedder};
pub use error::{ConfigError, EmbedError, EmbedResult};
pub use locations::{LocationRequest, NamedLocation, ResolvedLocation, NAMED_LOCATIONS};
pub use metadata::MetadataBlock;
pub use output::{OutputFormat, OutputWriter, TextReport};
pub use types::{BatchReport, EmbedReport, FileOutcome, GeoTag};

/// Library version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!VERSION.is_empty());
    }
}
