//! Accordion configuration loaded from TOML.
//!
//! Every key is optional; missing keys take the widget defaults.
//!
//! ```toml
//! display_mode = "multiple_selection"
//! header_height = 52.0
//! animation_duration_ms = 250
//! animation_easing = "ease_in_out"
//! header_background = "#1E1E1E"
//! header_text_color = "#FAFAFA"
//! ```

use std::path::{Path, PathBuf};
use std::time::Duration;

use lattice_accordion_core::Color;
use serde::Deserialize;
use thiserror::Error;

use crate::accordion::DisplayMode;
use crate::animation::Easing;

/// Default header height for titled entries.
pub const DEFAULT_HEADER_HEIGHT: f32 = 45.0;

/// Default animation duration in milliseconds.
pub const DEFAULT_ANIMATION_DURATION_MS: u64 = 300;

/// Errors produced while loading an [`AccordionConfig`].
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The config file could not be read.
    #[error("failed to read config file {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The document is not valid TOML or has unknown/mistyped keys.
    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    /// A value parsed but is not usable.
    #[error("invalid config value for `{field}`: {reason}")]
    Invalid {
        field: &'static str,
        reason: String,
    },
}

/// Accordion settings.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AccordionConfig {
    /// How many entries may be open at once.
    pub display_mode: DisplayMode,
    /// Header height for entries added with a title.
    pub header_height: f32,
    /// Length of each layout animation.
    pub animation_duration_ms: u64,
    /// Easing curve of each layout animation.
    pub animation_easing: Easing,
    /// Background color of titled headers.
    pub header_background: Color,
    /// Title color of titled headers.
    pub header_text_color: Color,
}

impl Default for AccordionConfig {
    fn default() -> Self {
        Self {
            display_mode: DisplayMode::SingleSelectionOneAlwaysOpen,
            header_height: DEFAULT_HEADER_HEIGHT,
            animation_duration_ms: DEFAULT_ANIMATION_DURATION_MS,
            animation_easing: Easing::EaseIn,
            header_background: Color::BLACK,
            header_text_color: Color::WHITE,
        }
    }
}

impl AccordionConfig {
    /// Parse and validate a TOML document.
    pub fn from_toml_str(source: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(source)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let source = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&source)
    }

    /// Check values that parse but cannot be used.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.header_height.is_finite() || self.header_height <= 0.0 {
            return Err(ConfigError::Invalid {
                field: "header_height",
                reason: format!("must be a positive number, got {}", self.header_height),
            });
        }
        Ok(())
    }

    /// The animation duration as a [`Duration`].
    pub fn animation_duration(&self) -> Duration {
        Duration::from_millis(self.animation_duration_ms)
    }
}
