#![forbid(unsafe_code)]

//! Engine configuration.
//!
//! Every tunable of the engine in one [`EngineConfig`], loadable from TOML or
//! JSON when the `settings-io` feature is enabled.
//!
//! ```toml
//! # legible.toml
//! enabled = true
//! history_capacity = 50
//! font_size_min = 8
//! font_size_max = 50
//!
//! [speech]
//! rate = 0.9
//! ```
//!
//! Missing fields take their defaults, so `EngineConfig::default()` and an
//! empty file behave the same.

#[cfg(feature = "settings-io")]
use std::path::Path;

use crate::speech::SpeechConfig;
use crate::undo::DEFAULT_CAPACITY;

/// Tunables for [`Engine`](crate::Engine).
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "settings-io", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "settings-io", serde(default))]
pub struct EngineConfig {
    /// Initial state of the enable signal.
    pub enabled: bool,
    /// Maximum number of history entries.
    pub history_capacity: usize,
    /// Smallest font size `sizeDown` may produce, in pixels.
    pub font_size_min: f64,
    /// Largest font size `sizeUp` may produce, in pixels.
    pub font_size_max: f64,
    /// Pixels added or removed per resize command.
    pub font_size_step: f64,
    /// Read-aloud voice parameters.
    pub speech: SpeechConfig,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            history_capacity: DEFAULT_CAPACITY,
            font_size_min: 8.0,
            font_size_max: 50.0,
            font_size_step: 2.0,
            speech: SpeechConfig::default(),
        }
    }
}

impl EngineConfig {
    /// Set the history capacity.
    #[must_use]
    pub fn with_history_capacity(mut self, capacity: usize) -> Self {
        self.history_capacity = capacity;
        self
    }

    /// Set the initial enabled state.
    #[must_use]
    pub fn with_enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }

    /// Load from a TOML string.
    #[cfg(feature = "settings-io")]
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(s)?;
        config.validated()
    }

    /// Load from a TOML file on disk.
    #[cfg(feature = "settings-io")]
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path.as_ref())?;
        Self::from_toml_str(&content)
    }

    /// Load from a JSON string.
    #[cfg(feature = "settings-io")]
    pub fn from_json_str(s: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(s)?;
        config.validated()
    }

    /// Load from a JSON file on disk.
    #[cfg(feature = "settings-io")]
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path.as_ref())?;
        Self::from_json_str(&content)
    }

    /// Serialize to a TOML string.
    #[cfg(feature = "settings-io")]
    pub fn to_toml_string(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string(self)?)
    }

    /// Validate all parameters are within acceptable ranges.
    ///
    /// Returns a list of validation errors. An empty list means the config
    /// is valid.
    #[must_use]
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();

        if self.history_capacity == 0 {
            errors.push("history_capacity must be > 0".into());
        }

        if !(self.font_size_min > 0.0) {
            errors.push(format!(
                "font_size_min must be > 0, got {}",
                self.font_size_min
            ));
        }
        if !(self.font_size_min < self.font_size_max) {
            errors.push(format!(
                "font_size_min ({}) must be < font_size_max ({})",
                self.font_size_min, self.font_size_max
            ));
        }
        if !(self.font_size_step > 0.0) {
            errors.push(format!(
                "font_size_step must be > 0, got {}",
                self.font_size_step
            ));
        }

        if !(self.speech.rate > 0.0 && self.speech.rate <= 10.0) {
            errors.push(format!(
                "speech.rate must be in (0, 10], got {}",
                self.speech.rate
            ));
        }
        if !(0.0..=2.0).contains(&self.speech.pitch) {
            errors.push(format!(
                "speech.pitch must be in [0, 2], got {}",
                self.speech.pitch
            ));
        }

        errors
    }

    #[cfg(feature = "settings-io")]
    fn validated(self) -> Result<Self, ConfigError> {
        let errors = self.validate();
        if errors.is_empty() {
            Ok(self)
        } else {
            Err(ConfigError::Validation(errors))
        }
    }
}

/// Errors that can occur when loading an engine configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[cfg(feature = "settings-io")]
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[cfg(feature = "settings-io")]
    #[error("TOML serialize error: {0}")]
    TomlSerialize(#[from] toml::ser::Error),

    #[cfg(feature = "settings-io")]
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("validation errors: {}", .0.join("; "))]
    Validation(Vec<String>),
}
