//! Writing geolocation into a single image.
//!
//! The embedder reads the file, carries over whatever EXIF block it already
//! has, replaces the GPS section and the two descriptive tags, and re-encodes
//! the pixels in the output format with the new block attached.

use std::io::Cursor;
use std::path::{Path, PathBuf};

use image::codecs::jpeg::JpegEncoder;
use image::codecs::png::{CompressionType, FilterType as PngFilterType, PngEncoder};
use image::codecs::webp::WebPEncoder;
use image::{DynamicImage, ImageEncoder, ImageFormat};

use crate::config::{Config, DefaultLocationConfig, EmbedConfig};
use crate::error::{EmbedError, EmbedResult, MetadataParseError, SerializationError};
use crate::geo;
use crate::locations::{LocationRequest, ResolvedLocation};
use crate::metadata::MetadataBlock;
use crate::types::{EmbedReport, GeoTag};

/// Largest TIFF payload a JPEG APP1 segment can carry: the 16-bit segment
/// length minus its own two bytes and the `Exif\0\0` prefix.
const JPEG_MAX_EXIF: usize = 0xFFFF - 2 - 6;

/// A single-file embed job.
#[derive(Debug, Clone, Default)]
pub struct EmbedRequest {
    /// Image to read
    pub input: PathBuf,
    /// Where to write; `None` overwrites `input`
    pub output: Option<PathBuf>,
    /// Location selection
    pub location: LocationRequest,
}

/// Decoded input with its detected container.
struct SourceImage {
    image: DynamicImage,
    format: ImageFormat,
}

/// Embeds GPS coordinates and a location name into image files.
#[derive(Debug, Clone)]
pub struct GeoEmbedder {
    defaults: DefaultLocationConfig,
    settings: EmbedConfig,
}

impl GeoEmbedder {
    /// Create an embedder from the loaded configuration.
    pub fn new(config: &Config) -> Self {
        Self {
            defaults: config.defaults.clone(),
            settings: config.embed.clone(),
        }
    }

    /// Resolve a location request against the configured defaults.
    pub fn resolve(&self, location: &LocationRequest) -> ResolvedLocation {
        location.resolve(&self.defaults)
    }

    /// Overwrite the GPS section and the description/software tags of `block`.
    /// Every other entry is left alone.
    pub fn assemble(&self, block: &mut MetadataBlock, location: &ResolvedLocation) {
        block.set_gps(location.latitude, location.longitude);
        block.set_description(&location.name);
        block.set_software(&self.settings.software);
    }

    /// Embed geolocation into one image and write it out.
    ///
    /// Fails fast: nothing is written unless every step before the write
    /// succeeds.
    pub fn embed(&self, request: &EmbedRequest) -> EmbedResult<EmbedReport> {
        let start = std::time::Instant::now();
        let input = request.input.as_path();
        let output = request.output.as_deref().unwrap_or(input);
        tracing::debug!("Embedding: {:?} -> {:?}", input, output);

        let location = self.resolve(&request.location);
        tracing::debug!(
            "  Location: {}, {} ({})",
            location.latitude,
            location.longitude,
            location.name
        );

        let bytes = read_file(input)?;
        let source = decode(&bytes, input)?;

        let (mut block, had_existing_exif) = match MetadataBlock::from_container(&bytes) {
            Ok(block) => (block, true),
            Err(MetadataParseError::NotFound) => (MetadataBlock::empty(), false),
            Err(e) => {
                tracing::debug!("  Discarding unreadable EXIF in {:?}: {e}", input);
                (MetadataBlock::empty(), false)
            }
        };

        self.assemble(&mut block, &location);
        let tiff = block.to_tiff().map_err(|source| EmbedError::Serialization {
            path: input.to_path_buf(),
            source,
        })?;

        let format = output_format(output, source.format)?;
        if format == ImageFormat::Jpeg && tiff.len() > JPEG_MAX_EXIF {
            return Err(EmbedError::Serialization {
                path: input.to_path_buf(),
                source: SerializationError::Oversized {
                    size: tiff.len(),
                    limit: JPEG_MAX_EXIF,
                },
            });
        }
        let file = self.encode(&source.image, format, tiff, output)?;

        std::fs::write(output, &file).map_err(|source| EmbedError::Write {
            path: output.to_path_buf(),
            source,
        })?;

        tracing::info!(
            "Wrote {:?} ({}, {} bytes) in {:?}",
            output,
            format_name(format),
            file.len(),
            start.elapsed()
        );

        Ok(EmbedReport {
            input: input.to_path_buf(),
            output: output.to_path_buf(),
            latitude: location.latitude,
            longitude: location.longitude,
            latitude_ref: geo::latitude_ref(location.latitude).to_string(),
            longitude_ref: geo::longitude_ref(location.longitude).to_string(),
            location_name: location.name,
            format: format_name(format).to_string(),
            had_existing_exif,
        })
    }

    /// Read back the geolocation stored in an image.
    ///
    /// `None` when the image has no readable EXIF block or no GPS section.
    pub fn inspect(&self, path: &Path) -> EmbedResult<Option<GeoTag>> {
        let bytes = read_file(path)?;
        let block = match MetadataBlock::from_container(&bytes) {
            Ok(block) => block,
            Err(MetadataParseError::NotFound) => return Ok(None),
            Err(e) => {
                tracing::warn!("Unreadable EXIF in {:?}: {e}", path);
                return Ok(None);
            }
        };
        if block.gps.is_empty() {
            return Ok(None);
        }
        let coordinates = block.gps_coordinates();

        Ok(Some(GeoTag {
            path: path.to_path_buf(),
            latitude: coordinates.map(|(lat, _)| lat),
            longitude: coordinates.map(|(_, lon)| lon),
            description: block.description(),
            software: block.software(),
            gps_entries: block.gps.len(),
        }))
    }

    /// Encode pixels for `format` with `exif` attached by the encoder.
    fn encode(
        &self,
        image: &DynamicImage,
        format: ImageFormat,
        exif: Vec<u8>,
        path: &Path,
    ) -> EmbedResult<Vec<u8>> {
        let mut buf = Vec::new();
        let result = match format {
            ImageFormat::Jpeg => {
                let mut encoder =
                    JpegEncoder::new_with_quality(&mut buf, self.settings.jpeg_quality);
                attach_exif(&mut encoder, exif, format, path)?;
                image.write_with_encoder(encoder)
            }
            ImageFormat::Png => {
                let compression = if self.settings.optimize {
                    CompressionType::Best
                } else {
                    CompressionType::Default
                };
                let mut encoder =
                    PngEncoder::new_with_quality(&mut buf, compression, PngFilterType::Adaptive);
                attach_exif(&mut encoder, exif, format, path)?;
                image.write_with_encoder(encoder)
            }
            ImageFormat::WebP => {
                let mut encoder = WebPEncoder::new_lossless(&mut buf);
                attach_exif(&mut encoder, exif, format, path)?;
                image.write_with_encoder(encoder)
            }
            other => {
                return Err(EmbedError::UnsupportedFormat {
                    path: path.to_path_buf(),
                    format: format_name(other).to_string(),
                })
            }
        };

        result.map_err(|e| EmbedError::Encode {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        Ok(buf)
    }
}

fn attach_exif<E: ImageEncoder>(
    encoder: &mut E,
    exif: Vec<u8>,
    format: ImageFormat,
    path: &Path,
) -> EmbedResult<()> {
    encoder
        .set_exif_metadata(exif)
        .map_err(|_| EmbedError::UnsupportedFormat {
            path: path.to_path_buf(),
            format: format_name(format).to_string(),
        })
}

fn read_file(path: &Path) -> EmbedResult<Vec<u8>> {
    if !path.exists() {
        return Err(EmbedError::FileNotFound(path.to_path_buf()));
    }
    std::fs::read(path).map_err(|source| EmbedError::Read {
        path: path.to_path_buf(),
        source,
    })
}

fn decode(bytes: &[u8], path: &Path) -> EmbedResult<SourceImage> {
    let reader = image::ImageReader::new(Cursor::new(bytes))
        .with_guessed_format()
        .map_err(|e| EmbedError::Decode {
            path: path.to_path_buf(),
            message: format!("Cannot detect image format: {}", e),
        })?;
    let format = reader.format().ok_or_else(|| EmbedError::Decode {
        path: path.to_path_buf(),
        message: "Unrecognized image format".to_string(),
    })?;
    let image = reader.decode().map_err(|e| EmbedError::Decode {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;
    Ok(SourceImage { image, format })
}

/// Output container: taken from the output extension when it names a known
/// image format, otherwise the input's detected format.
fn output_format(output: &Path, source: ImageFormat) -> EmbedResult<ImageFormat> {
    let format = ImageFormat::from_path(output).unwrap_or(source);
    if matches!(
        format,
        ImageFormat::Jpeg | ImageFormat::Png | ImageFormat::WebP
    ) {
        Ok(format)
    } else {
        Err(EmbedError::UnsupportedFormat {
            path: output.to_path_buf(),
            format: format_name(format).to_string(),
        })
    }
}

/// Lowercase name for an image format: its preferred file extension.
fn format_name(format: ImageFormat) -> &'static str {
    format.extensions_str().first().copied().unwrap_or("unknown")
}
