//! Tag numbers written or inspected by geotag.

// Primary (IFD0) tags
pub const IMAGE_DESCRIPTION: u16 = 0x010E;
pub const MAKE: u16 = 0x010F;
pub const SOFTWARE: u16 = 0x0131;
pub const TILE_OFFSETS: u16 = 0x0144;
pub const TILE_BYTE_COUNTS: u16 = 0x0145;

// GPS sub-IFD tags
pub const GPS_VERSION_ID: u16 = 0x0000;
pub const GPS_LATITUDE_REF: u16 = 0x0001;
pub const GPS_LATITUDE: u16 = 0x0002;
pub const GPS_LONGITUDE_REF: u16 = 0x0003;
pub const GPS_LONGITUDE: u16 = 0x0004;
pub const GPS_ALTITUDE_REF: u16 = 0x0005;
pub const GPS_ALTITUDE: u16 = 0x0006;

/// GPSAltitudeRef value for "above sea level".
pub const ALTITUDE_SEA_LEVEL: u8 = 0;
