//! Typed EXIF field values.

use exif::Value;

/// A TIFF field value, one variant per TIFF field type.
///
/// Mirrors `exif::Value` but owns plain tuples for rationals and drops the
/// reader-specific offsets, so values can be compared and built by hand.
#[derive(Debug, Clone, PartialEq)]
pub enum TagValue {
    Byte(Vec<u8>),
    /// One or more strings, without their NUL terminators
    Ascii(Vec<Vec<u8>>),
    Short(Vec<u16>),
    Long(Vec<u32>),
    Rational(Vec<(u32, u32)>),
    SByte(Vec<i8>),
    Undefined(Vec<u8>),
    SShort(Vec<i16>),
    SLong(Vec<i32>),
    SRational(Vec<(i32, i32)>),
    Float(Vec<f32>),
    Double(Vec<f64>),
}

impl TagValue {
    /// A single ASCII string.
    pub fn ascii(text: impl Into<Vec<u8>>) -> Self {
        Self::Ascii(vec![text.into()])
    }

    /// First ASCII string, lossily decoded as UTF-8.
    pub fn as_text(&self) -> Option<String> {
        match self {
            Self::Ascii(v) => v.first().map(|s| String::from_utf8_lossy(s).into_owned()),
            _ => None,
        }
    }

    /// Unsigned rationals, if this is a rational value.
    pub fn as_rationals(&self) -> Option<&[(u32, u32)]> {
        match self {
            Self::Rational(v) => Some(v),
            _ => None,
        }
    }

    /// Convert from the reader's representation.
    ///
    /// Returns `None` for fields of unknown TIFF type.
    pub(crate) fn from_exif(value: &Value) -> Option<Self> {
        let converted = match value {
            Value::Byte(v) => Self::Byte(v.clone()),
            Value::Ascii(v) => Self::Ascii(v.clone()),
            Value::Short(v) => Self::Short(v.clone()),
            Value::Long(v) => Self::Long(v.clone()),
            Value::Rational(v) => Self::Rational(v.iter().map(|r| (r.num, r.denom)).collect()),
            Value::SByte(v) => Self::SByte(v.clone()),
            Value::Undefined(v, _) => Self::Undefined(v.clone()),
            Value::SShort(v) => Self::SShort(v.clone()),
            Value::SLong(v) => Self::SLong(v.clone()),
            Value::SRational(v) => Self::SRational(v.iter().map(|r| (r.num, r.denom)).collect()),
            Value::Float(v) => Self::Float(v.clone()),
            Value::Double(v) => Self::Double(v.clone()),
            _ => return None,
        };
        Some(converted)
    }

    /// Convert to the writer's representation.
    pub(crate) fn to_exif(&self) -> Value {
        match self {
            Self::Byte(v) => Value::Byte(v.clone()),
            Self::Ascii(v) => Value::Ascii(v.clone()),
            Self::Short(v) => Value::Short(v.clone()),
            Self::Long(v) => Value::Long(v.clone()),
            Self::Rational(v) => Value::Rational(
                v.iter()
                    .map(|&(num, denom)| exif::Rational { num, denom })
                    .collect(),
            ),
            Self::SByte(v) => Value::SByte(v.clone()),
            Self::Undefined(v) => Value::Undefined(v.clone(), 0),
            Self::SShort(v) => Value::SShort(v.clone()),
            Self::SLong(v) => Value::SLong(v.clone()),
            Self::SRational(v) => Value::SRational(
                v.iter()
                    .map(|&(num, denom)| exif::SRational { num, denom })
                    .collect(),
            ),
            Self::Float(v) => Value::Float(v.clone()),
            Self::Double(v) => Value::Double(v.clone()),
        }
    }
}
