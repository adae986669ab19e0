//! The in-memory EXIF block: four tag sections plus an optional thumbnail.
//!
//! - **primary**: IFD0 TIFF tags (description, software, make, ...)
//! - **capture**: the Exif sub-IFD (exposure, timestamps, ...)
//! - **gps**: the GPS sub-IFD
//! - **thumbnail**: IFD1 TIFF tags, with the JPEG thumbnail bytes kept aside
//!
//! Parsing goes through `exif::Reader` and serialization through the
//! crate's TIFF writer. IFD pointers and thumbnail offsets are structural:
//! they are dropped on load and regenerated on write.

pub mod tags;
mod value;

pub use value::TagValue;

use std::collections::BTreeMap;
use std::io::Cursor;

use exif::experimental::Writer;
use exif::{Context, Exif, Field, In, Reader, Tag};

use crate::error::{MetadataParseError, SerializationError};
use crate::geo;

/// Tags the writer synthesizes from the block layout.
const STRUCTURAL_TAGS: [Tag; 9] = [
    Tag::ExifIFDPointer,
    Tag::GPSInfoIFDPointer,
    Tag::InteropIFDPointer,
    Tag::JPEGInterchangeFormat,
    Tag::JPEGInterchangeFormatLength,
    Tag::StripOffsets,
    Tag::StripByteCounts,
    Tag(Context::Tiff, tags::TILE_OFFSETS),
    Tag(Context::Tiff, tags::TILE_BYTE_COUNTS),
];

/// One of the four tag sections of a block.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Section {
    Primary,
    Capture,
    Gps,
    Thumbnail,
}

impl Section {
    pub fn name(self) -> &'static str {
        match self {
            Section::Primary => "primary",
            Section::Capture => "capture",
            Section::Gps => "GPS",
            Section::Thumbnail => "thumbnail",
        }
    }

    fn context(self) -> Context {
        match self {
            Section::Primary | Section::Thumbnail => Context::Tiff,
            Section::Capture => Context::Exif,
            Section::Gps => Context::Gps,
        }
    }

    fn ifd(self) -> In {
        match self {
            Section::Thumbnail => In::THUMBNAIL,
            _ => In::PRIMARY,
        }
    }

    /// Section a parsed field belongs to, if any.
    fn of(field: &Field) -> Option<Self> {
        if field.ifd_num == In::PRIMARY {
            match field.tag.context() {
                Context::Tiff => Some(Section::Primary),
                Context::Exif => Some(Section::Capture),
                Context::Gps => Some(Section::Gps),
                _ => None,
            }
        } else if field.ifd_num == In::THUMBNAIL && field.tag.context() == Context::Tiff {
            Some(Section::Thumbnail)
        } else {
            None
        }
    }
}

/// An EXIF block as nested tag maps.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MetadataBlock {
    pub primary: BTreeMap<u16, TagValue>,
    pub capture: BTreeMap<u16, TagValue>,
    pub gps: BTreeMap<u16, TagValue>,
    pub thumbnail: BTreeMap<u16, TagValue>,
    /// Compressed IFD1 thumbnail, if the source carried one
    pub thumbnail_jpeg: Option<Vec<u8>>,
    /// Byte order used on write; big-endian unless the source was little-endian
    pub little_endian: bool,
}

impl MetadataBlock {
    /// An empty four-section block.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Load the EXIF block embedded in an image container (JPEG, PNG, WebP, TIFF, HEIF).
    pub fn from_container(bytes: &[u8]) -> Result<Self, MetadataParseError> {
        let exif = Reader::new()
            .read_from_container(&mut Cursor::new(bytes))
            .map_err(parse_error)?;
        Ok(Self::from_exif(&exif))
    }

    /// Load a bare TIFF-structured EXIF block (no container, no `Exif\0\0` prefix).
    pub fn from_tiff(tiff: Vec<u8>) -> Result<Self, MetadataParseError> {
        let exif = Reader::new().read_raw(tiff).map_err(parse_error)?;
        Ok(Self::from_exif(&exif))
    }

    fn from_exif(exif: &Exif) -> Self {
        let mut block = Self {
            little_endian: exif.little_endian(),
            ..Self::default()
        };

        for field in exif.fields() {
            if STRUCTURAL_TAGS.contains(&field.tag) {
                continue;
            }
            let Some(section) = Section::of(field) else {
                tracing::trace!("Dropping {} outside the block sections", field.tag);
                continue;
            };
            let Some(value) = TagValue::from_exif(&field.value) else {
                tracing::trace!("Dropping {} with unknown field type", field.tag);
                continue;
            };
            block.section_mut(section).insert(field.tag.number(), value);
        }

        block.thumbnail_jpeg = thumbnail_bytes(exif);
        block
    }

    pub fn section(&self, section: Section) -> &BTreeMap<u16, TagValue> {
        match section {
            Section::Primary => &self.primary,
            Section::Capture => &self.capture,
            Section::Gps => &self.gps,
            Section::Thumbnail => &self.thumbnail,
        }
    }

    pub fn section_mut(&mut self, section: Section) -> &mut BTreeMap<u16, TagValue> {
        match section {
            Section::Primary => &mut self.primary,
            Section::Capture => &mut self.capture,
            Section::Gps => &mut self.gps,
            Section::Thumbnail => &mut self.thumbnail,
        }
    }

    /// Replace the GPS section with exactly six entries: both coordinates
    /// with their references, and a sea-level altitude.
    pub fn set_gps(&mut self, latitude: f64, longitude: f64) {
        let lat = geo::decimal_to_dms(latitude).to_rationals();
        let lon = geo::decimal_to_dms(longitude).to_rationals();

        self.gps = BTreeMap::from([
            (tags::GPS_LATITUDE_REF, TagValue::ascii(geo::latitude_ref(latitude))),
            (tags::GPS_LATITUDE, TagValue::Rational(lat.to_vec())),
            (tags::GPS_LONGITUDE_REF, TagValue::ascii(geo::longitude_ref(longitude))),
            (tags::GPS_LONGITUDE, TagValue::Rational(lon.to_vec())),
            (tags::GPS_ALTITUDE_REF, TagValue::Byte(vec![tags::ALTITUDE_SEA_LEVEL])),
            (tags::GPS_ALTITUDE, TagValue::Rational(vec![(0, 1)])),
        ]);
    }

    /// Set ImageDescription to the UTF-8 bytes of `text`.
    pub fn set_description(&mut self, text: &str) {
        self.primary
            .insert(tags::IMAGE_DESCRIPTION, TagValue::ascii(text.as_bytes()));
    }

    /// Set the Software tag.
    pub fn set_software(&mut self, text: &str) {
        self.primary
            .insert(tags::SOFTWARE, TagValue::ascii(text.as_bytes()));
    }

    pub fn description(&self) -> Option<String> {
        self.primary.get(&tags::IMAGE_DESCRIPTION)?.as_text()
    }

    pub fn software(&self) -> Option<String> {
        self.primary.get(&tags::SOFTWARE)?.as_text()
    }

    /// Signed decimal (latitude, longitude) from the GPS section.
    pub fn gps_coordinates(&self) -> Option<(f64, f64)> {
        let axis = |value_tag, ref_tag| {
            let rationals = self.gps.get(&value_tag)?.as_rationals()?;
            let reference = self.gps.get(&ref_tag)?.as_text()?;
            geo::rationals_to_decimal(rationals, &reference)
        };
        Some((
            axis(tags::GPS_LATITUDE, tags::GPS_LATITUDE_REF)?,
            axis(tags::GPS_LONGITUDE, tags::GPS_LONGITUDE_REF)?,
        ))
    }

    /// Check every value against the EXIF type rules this crate relies on.
    pub fn validate(&self) -> Result<(), SerializationError> {
        for section in [
            Section::Primary,
            Section::Capture,
            Section::Gps,
            Section::Thumbnail,
        ] {
            for (&tag, value) in self.section(section) {
                if let TagValue::Ascii(strings) = value {
                    if strings.iter().any(|s| s.contains(&0)) {
                        return Err(invalid(section, tag, "ASCII value contains a NUL byte"));
                    }
                }
            }
        }

        for (&tag, value) in &self.gps {
            match tag {
                tags::GPS_LATITUDE_REF | tags::GPS_LONGITUDE_REF => match value {
                    TagValue::Ascii(s) if s.len() == 1 && s[0].len() == 1 => {}
                    _ => return Err(invalid(Section::Gps, tag, "expected a one-letter reference")),
                },
                tags::GPS_LATITUDE | tags::GPS_LONGITUDE => match value {
                    TagValue::Rational(r) if r.len() == 3 => {}
                    _ => return Err(invalid(Section::Gps, tag, "expected three rationals")),
                },
                tags::GPS_ALTITUDE_REF => match value {
                    TagValue::Byte(b) if b.len() == 1 => {}
                    _ => return Err(invalid(Section::Gps, tag, "expected a single byte")),
                },
                tags::GPS_ALTITUDE => match value {
                    TagValue::Rational(r) if r.len() == 1 => {}
                    _ => return Err(invalid(Section::Gps, tag, "expected one rational")),
                },
                _ => {}
            }
        }
        Ok(())
    }

    /// Serialize to a TIFF-structured EXIF block.
    pub fn to_tiff(&self) -> Result<Vec<u8>, SerializationError> {
        self.validate()?;

        let fields: Vec<Field> = [
            Section::Primary,
            Section::Capture,
            Section::Gps,
            Section::Thumbnail,
        ]
        .into_iter()
        .flat_map(|section| {
            self.section(section).iter().map(move |(&number, value)| Field {
                tag: Tag(section.context(), number),
                ifd_num: section.ifd(),
                value: value.to_exif(),
            })
        })
        .collect();

        let mut writer = Writer::new();
        for field in &fields {
            writer.push_field(field);
        }
        if let Some(jpeg) = &self.thumbnail_jpeg {
            writer.set_jpeg(jpeg, In::THUMBNAIL);
        }

        let mut buf = Cursor::new(Vec::new());
        writer
            .write(&mut buf, self.little_endian)
            .map_err(|e| SerializationError::Writer(e.to_string()))?;
        Ok(buf.into_inner())
    }
}

fn parse_error(err: exif::Error) -> MetadataParseError {
    match err {
        exif::Error::NotFound(_) => MetadataParseError::NotFound,
        other => MetadataParseError::Malformed(other.to_string()),
    }
}

fn invalid(section: Section, tag: u16, reason: &str) -> SerializationError {
    SerializationError::InvalidValue {
        section: section.name(),
        tag,
        reason: reason.to_string(),
    }
}

/// Slice the IFD1 JPEG thumbnail out of the raw block.
fn thumbnail_bytes(exif: &Exif) -> Option<Vec<u8>> {
    let offset = exif
        .get_field(Tag::JPEGInterchangeFormat, In::THUMBNAIL)?
        .value
        .get_uint(0)? as usize;
    let len = exif
        .get_field(Tag::JPEGInterchangeFormatLength, In::THUMBNAIL)?
        .value
        .get_uint(0)? as usize;
    exif.buf()
        .get(offset..offset.checked_add(len)?)
        .map(<[u8]>::to_vec)
}
