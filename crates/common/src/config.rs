//! Application configuration.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{BannerError, BannerResult};

/// Global application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Font files used for banner, sticker, CTA and watermark text.
    pub fonts: FontConfig,

    /// Default export settings.
    pub export: ExportDefaults,

    /// Logging configuration.
    pub logging: LoggingConfig,
}

/// Font file locations.
///
/// When `regular` is unset the renderer probes well-known system font paths.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FontConfig {
    /// TrueType/OpenType file for regular text.
    pub regular: Option<PathBuf>,

    /// Bold face for sticker and CTA labels. Falls back to `regular`.
    pub bold: Option<PathBuf>,
}

/// Default export parameters.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportDefaults {
    /// Output format name (`png`, `jpeg`, `webp`).
    pub format: String,

    /// Directory exported files are written to.
    pub output_dir: PathBuf,

    /// Name files `banner_<timestamp>.<ext>` instead of `fixed_name`.
    pub timestamped_names: bool,

    /// File stem used when `timestamped_names` is off.
    pub fixed_name: String,

    /// JPEG quality in `[1, 100]`.
    pub jpeg_quality: u8,
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level filter (e.g., "info", "debug", "bannerkit=debug,warn").
    pub level: String,

    /// Whether to output structured JSON logs.
    pub json: bool,

    /// Optional log file path.
    pub file: Option<PathBuf>,
}

impl Default for ExportDefaults {
    fn default() -> Self {
        Self {
            format: "png".to_string(),
            output_dir: PathBuf::from("."),
            timestamped_names: true,
            fixed_name: "banner".to_string(),
            jpeg_quality: 90,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json: false,
            file: None,
        }
    }
}

impl AppConfig {
    /// Load config from the standard location.
    ///
    /// A missing file yields the defaults; an unreadable or malformed one is
    /// a [`BannerError::Config`] so the caller can report it once logging
    /// is up.
    pub fn try_load() -> BannerResult<Self> {
        Self::try_load_from(&config_file_path())
    }

    /// Load config from an explicit path.
    pub fn try_load_from(config_path: &Path) -> BannerResult<Self> {
        if !config_path.exists() {
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(config_path).map_err(|e| {
            BannerError::config(format!(
                "Failed to read config at {}: {e}",
                config_path.display()
            ))
        })?;
        serde_json::from_str(&content).map_err(|e| {
            BannerError::config(format!(
                "Failed to parse config at {}: {e}",
                config_path.display()
            ))
        })
    }

    /// Save config to the standard location.
    pub fn save(&self) -> Result<(), std::io::Error> {
        self.save_to(&config_file_path())
    }

    /// Save config to an explicit path.
    pub fn save_to(&self, config_path: &Path) -> Result<(), std::io::Error> {
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(self).map_err(std::io::Error::other)?;
        std::fs::write(config_path, json)
    }
}

/// Standard config file location.
pub fn config_file_path() -> PathBuf {
    let base = std::env::var("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| {
            let home = std::env::var("HOME").unwrap_or_else(|_| "/tmp".to_string());
            PathBuf::from(home).join(".config")
        });
    base.join("bannerkit").join("config.json")
}
