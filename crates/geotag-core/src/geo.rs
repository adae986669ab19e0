//! Decimal degree to degrees/minutes/seconds conversion.
//!
//! EXIF stores each GPS axis as three unsigned rationals with the sign
//! carried separately in a one-letter reference tag. Seconds use a
//! denominator of 100, so two decimal places survive.

use serde::{Deserialize, Serialize};

/// Denominator used for the seconds rational.
pub const SECONDS_DENOMINATOR: u32 = 100;

/// One coordinate axis as EXIF degrees/minutes/seconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dms {
    pub degrees: u32,
    pub minutes: u32,
    /// Seconds scaled by [`SECONDS_DENOMINATOR`]
    pub centiseconds: u32,
}

impl Dms {
    /// Rationals in EXIF order: degrees/1, minutes/1, seconds/100.
    pub fn to_rationals(self) -> [(u32, u32); 3] {
        [
            (self.degrees, 1),
            (self.minutes, 1),
            (self.centiseconds, SECONDS_DENOMINATOR),
        ]
    }

    /// Unsigned decimal degrees.
    pub fn to_decimal(self) -> f64 {
        self.degrees as f64
            + self.minutes as f64 / 60.0
            + (self.centiseconds as f64 / SECONDS_DENOMINATOR as f64) / 3600.0
    }
}

/// Convert a decimal degree value to DMS using its magnitude.
///
/// Each step truncates toward zero. Non-finite input saturates through the
/// float-to-integer casts instead of failing.
pub fn decimal_to_dms(value: f64) -> Dms {
    let magnitude = value.abs();
    let degrees = magnitude.trunc();
    let minutes_decimal = (magnitude - degrees) * 60.0;
    let minutes = minutes_decimal.trunc();
    let centiseconds = ((minutes_decimal - minutes) * 60.0 * SECONDS_DENOMINATOR as f64).trunc();

    Dms {
        degrees: degrees as u32,
        minutes: minutes as u32,
        centiseconds: centiseconds as u32,
    }
}

/// Decode EXIF GPS rationals (degrees, minutes, seconds) to signed decimal
/// degrees. `reference` is the N/S/E/W tag; S and W make the result negative.
///
/// Returns `None` for fewer than three rationals or a zero denominator.
pub fn rationals_to_decimal(rationals: &[(u32, u32)], reference: &str) -> Option<f64> {
    if rationals.len() < 3 || rationals[..3].iter().any(|&(_, d)| d == 0) {
        return None;
    }
    let part = |i: usize| rationals[i].0 as f64 / rationals[i].1 as f64;
    let magnitude = part(0) + part(1) / 60.0 + part(2) / 3600.0;

    let sign = if reference.contains('S') || reference.contains('W') {
        -1.0
    } else {
        1.0
    };
    Some(sign * magnitude)
}

/// Latitude reference: `N` for values >= 0, otherwise `S`.
pub fn latitude_ref(latitude: f64) -> &'static str {
    if latitude >= 0.0 {
        "N"
    } else {
        "S"
    }
}

/// Longitude reference: `E` for values >= 0, otherwise `W`.
pub fn longitude_ref(longitude: f64) -> &'static str {
    if longitude >= 0.0 {
        "E"
    } else {
        "W"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// 1/100 of an arc second, in degrees.
    const CENTISECOND_DEG: f64 = 0.01 / 3600.0;

    #[test]
    fn test_decimal_to_dms_marbella_latitude() {
        let dms = decimal_to_dms(36.5100);
        assert_eq!(dms.degrees, 36);
        assert_eq!(dms.minutes, 30);
        // 0.6' = 36" but float error lands just below, truncation keeps 35.99"
        assert!(dms.centiseconds == 3599 || dms.centiseconds == 3600);
    }

    #[test]
    fn test_decimal_to_dms_uses_magnitude() {
        assert_eq!(decimal_to_dms(-4.8826), decimal_to_dms(4.8826));
        let dms = decimal_to_dms(-4.8826);
        assert_eq!(dms.degrees, 4);
        assert_eq!(dms.minutes, 52);
    }

    #[test]
    fn test_decimal_to_dms_zero() {
        let dms = decimal_to_dms(0.0);
        assert_eq!(dms.to_rationals(), [(0, 1), (0, 1), (0, 100)]);
    }

    #[test]
    fn test_decimal_to_dms_whole_degrees() {
        let dms = decimal_to_dms(45.0);
        assert_eq!(dms.to_rationals(), [(45, 1), (0, 1), (0, 100)]);
    }

    #[test]
    fn test_truncation_error_is_bounded_and_never_overshoots() {
        let mut d = 0.0;
        while d < 360.0 {
            let decoded = decimal_to_dms(d).to_decimal();
            let error = d - decoded;
            assert!(
                error > -1e-9,
                "decoded {decoded} overshoots input {d} by {}",
                -error
            );
            assert!(
                error < CENTISECOND_DEG + 1e-9,
                "decoded {decoded} is {error} below input {d}"
            );
            d += 0.123_457;
        }
    }

    #[test]
    fn test_out_of_range_values_pass_through() {
        let dms = decimal_to_dms(400.25);
        assert_eq!(dms.degrees, 400);
        assert_eq!(dms.minutes, 15);
    }

    #[test]
    fn test_hemisphere_refs() {
        assert_eq!(latitude_ref(0.0), "N");
        assert_eq!(latitude_ref(36.51), "N");
        assert_eq!(latitude_ref(-0.0001), "S");
        assert_eq!(longitude_ref(0.0), "E");
        assert_eq!(longitude_ref(2.35), "E");
        assert_eq!(longitude_ref(-4.8826), "W");
    }

    #[test]
    fn test_rationals_to_decimal_applies_sign() {
        let rationals = decimal_to_dms(-4.8826).to_rationals();
        let decoded = rationals_to_decimal(&rationals, "W").unwrap();
        assert!((decoded + 4.8826).abs() < CENTISECOND_DEG + 1e-9);

        let decoded = rationals_to_decimal(&rationals, "E").unwrap();
        assert!(decoded > 0.0);
    }

    #[test]
    fn test_rationals_to_decimal_rejects_bad_input() {
        assert!(rationals_to_decimal(&[(1, 1), (2, 1)], "N").is_none());
        assert!(rationals_to_decimal(&[(1, 1), (2, 0), (3, 100)], "N").is_none());
    }
}
