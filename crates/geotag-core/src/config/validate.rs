//! Configuration validation with range checks.

use crate::error::ConfigError;

use super::Config;

impl Config {
    /// Validate configuration values are within acceptable ranges.
    pub(crate) fn validate(&self) -> Result<(), ConfigError> {
        if !self.defaults.latitude.is_finite() || !self.defaults.longitude.is_finite() {
            return Err(ConfigError::ValidationError(
                "defaults.latitude and defaults.longitude must be finite".into(),
            ));
        }
        if self.embed.software.is_empty() || self.embed.software.contains('\0') {
            return Err(ConfigError::ValidationError(
                "embed.software must be non-empty and contain no NUL".into(),
            ));
        }
        if self.embed.jpeg_quality == 0 || self.embed.jpeg_quality > 100 {
            return Err(ConfigError::ValidationError(
                "embed.jpeg_quality must be between 1 and 100".into(),
            ));
        }
        if self.batch.supported_formats.is_empty() {
            return Err(ConfigError::ValidationError(
                "batch.supported_formats must not be empty".into(),
            ));
        }
        Ok(())
    }
}
