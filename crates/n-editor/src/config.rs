//! User configuration, read from TOML.
//!
//! ```toml
//! app_name = "n-pad"
//!
//! [font]
//! size = 14
//! family = "courier"
//! style = "plain"
//! ```
//!
//! Every field is optional. The default location is
//! `<config dir>/n-pad/config.toml`; a missing file there just means
//! defaults. A path given explicitly must exist.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;
use tracing::{debug, warn};

use crate::presentation::Presentation;

/// Name used in the window title and the About box unless configured.
pub const APP_NAME: &str = "n-pad";

/// Errors that can occur while loading the configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The file exists but couldn't be read, or an explicit path is missing.
    #[error("cannot read config {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The file isn't valid TOML or has fields of the wrong type.
    #[error("invalid config {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub app_name: String,
    pub font: FontConfig,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FontConfig {
    pub size: Option<u16>,
    pub family: Option<String>,
    pub style: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            app_name: APP_NAME.to_string(),
            font: FontConfig::default(),
        }
    }
}

impl Config {
    /// `<config dir>/n-pad/config.toml`, when the platform has a config dir.
    #[must_use]
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join(APP_NAME).join("config.toml"))
    }

    /// Load from `explicit` if given, otherwise from [`default_path`]
    /// (falling back to defaults when that file doesn't exist).
    ///
    /// [`default_path`]: Self::default_path
    ///
    /// # Errors
    ///
    /// [`ConfigError`] when a file that should be read can't be, or doesn't
    /// parse.
    pub fn load(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        if let Some(path) = explicit {
            return Self::from_file(path);
        }
        match Self::default_path() {
            Some(path) if path.exists() => Self::from_file(&path),
            _ => Ok(Self::default()),
        }
    }

    /// # Errors
    ///
    /// [`ConfigError`] on read or parse failure.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = toml::from_str(&text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        debug!(path = %path.display(), "config loaded");
        Ok(config)
    }

    /// Apply the font settings through the same operations the Format menu
    /// uses. A bad size is logged and skipped.
    pub fn apply(&self, presentation: &mut Presentation) {
        if let Some(size) = self.font.size {
            if let Err(e) = presentation.set_font_size(&size.to_string()) {
                warn!(size, error = %e, "ignoring configured font size");
            }
        }
        if self.font.family.is_some() || self.font.style.is_some() {
            presentation.set_font_style(
                self.font.family.as_deref().unwrap_or_default(),
                self.font.style.as_deref().unwrap_or_default(),
            );
        }
    }
}
