//! Built-in named locations and request resolution.

use serde::{Deserialize, Serialize};

use crate::config::DefaultLocationConfig;

/// A predefined coordinate with its display name.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct NamedLocation {
    pub key: &'static str,
    pub latitude: f64,
    pub longitude: f64,
    pub name: &'static str,
}

/// Costa del Sol locations selectable by key.
pub static NAMED_LOCATIONS: [NamedLocation; 6] = [
    NamedLocation {
        key: "marbella",
        latitude: 36.5100,
        longitude: -4.8826,
        name: "Marbella, Costa del Sol, Spain",
    },
    NamedLocation {
        key: "estepona",
        latitude: 36.4277,
        longitude: -5.1448,
        name: "Estepona, Costa del Sol, Spain",
    },
    NamedLocation {
        key: "malaga",
        latitude: 36.7213,
        longitude: -4.4214,
        name: "Málaga, Costa del Sol, Spain",
    },
    NamedLocation {
        key: "benalmadena",
        latitude: 36.5988,
        longitude: -4.5162,
        name: "Benalmádena, Costa del Sol, Spain",
    },
    NamedLocation {
        key: "fuengirola",
        latitude: 36.5406,
        longitude: -4.6269,
        name: "Fuengirola, Costa del Sol, Spain",
    },
    NamedLocation {
        key: "torremolinos",
        latitude: 36.6204,
        longitude: -4.4999,
        name: "Torremolinos, Costa del Sol, Spain",
    },
];

/// Look up a named location by key, ignoring case.
pub fn lookup(key: &str) -> Option<&'static NamedLocation> {
    NAMED_LOCATIONS
        .iter()
        .find(|loc| loc.key.eq_ignore_ascii_case(key))
}

/// What the caller asked for. Every field is optional.
#[derive(Debug, Clone, Default)]
pub struct LocationRequest {
    /// Named-location key; a match overrides the three explicit fields
    pub key: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub name: Option<String>,
}

/// The coordinate and name that will be written.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResolvedLocation {
    pub latitude: f64,
    pub longitude: f64,
    pub name: String,
}

impl LocationRequest {
    /// Resolve to a concrete location.
    ///
    /// A known key wins outright. Otherwise each field falls back to the
    /// configured default independently. Unknown keys are ignored.
    pub fn resolve(&self, defaults: &DefaultLocationConfig) -> ResolvedLocation {
        if let Some(key) = self.key.as_deref() {
            match lookup(key) {
                Some(loc) => {
                    return ResolvedLocation {
                        latitude: loc.latitude,
                        longitude: loc.longitude,
                        name: loc.name.to_string(),
                    }
                }
                None => tracing::warn!("Unknown location key {key:?}, ignoring it"),
            }
        }

        ResolvedLocation {
            latitude: self.latitude.unwrap_or(defaults.latitude),
            longitude: self.longitude.unwrap_or(defaults.longitude),
            name: self
                .name
                .clone()
                .unwrap_or_else(|| defaults.location_name.clone()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_is_case_insensitive() {
        assert_eq!(lookup("MARBELLA").unwrap().key, "marbella");
        assert_eq!(lookup("Estepona").unwrap().latitude, 36.4277);
        assert!(lookup("madrid").is_none());
    }

    #[test]
    fn test_table_has_unique_keys() {
        for (i, a) in NAMED_LOCATIONS.iter().enumerate() {
            for b in &NAMED_LOCATIONS[i + 1..] {
                assert_ne!(a.key, b.key);
            }
        }
    }

    #[test]
    fn test_key_overrides_explicit_values() {
        let request = LocationRequest {
            key: Some("marbella".to_string()),
            latitude: Some(1.0),
            longitude: Some(2.0),
            name: Some("Elsewhere".to_string()),
        };
        let resolved = request.resolve(&DefaultLocationConfig::default());
        assert_eq!(
            resolved,
            ResolvedLocation {
                latitude: 36.5100,
                longitude: -4.8826,
                name: "Marbella, Costa del Sol, Spain".to_string(),
            }
        );
    }

    #[test]
    fn test_no_input_resolves_to_default() {
        let resolved = LocationRequest::default().resolve(&DefaultLocationConfig::default());
        assert_eq!(resolved.latitude, 36.5100);
        assert_eq!(resolved.longitude, -4.8826);
        assert_eq!(resolved.name, "Costa del Sol, Málaga, Spain");
    }

    #[test]
    fn test_fields_fall_back_independently() {
        let request = LocationRequest {
            latitude: Some(40.4168),
            ..Default::default()
        };
        let resolved = request.resolve(&DefaultLocationConfig::default());
        assert_eq!(resolved.latitude, 40.4168);
        assert_eq!(resolved.longitude, -4.8826);
        assert_eq!(resolved.name, "Costa del Sol, Málaga, Spain");
    }

    #[test]
    fn test_unknown_key_uses_explicit_values() {
        let request = LocationRequest {
            key: Some("atlantis".to_string()),
            name: Some("Lost City".to_string()),
            ..Default::default()
        };
        let resolved = request.resolve(&DefaultLocationConfig::default());
        assert_eq!(resolved.name, "Lost City");
        assert_eq!(resolved.latitude, 36.5100);
    }
}
