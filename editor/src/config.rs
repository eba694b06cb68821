//! Editor configuration with optional user overrides.
//!
//! The browser has no environment, so overrides arrive as a JSON object (the
//! client reads it from `localStorage`). Every field is optional; missing
//! fields keep their defaults and present ones are validated.

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

use serde::Deserialize;

use crate::color::canonical_hex;
use crate::consts::{
    COPY_SUFFIX, DB_NAME, DB_VERSION, DEFAULT_PIN_COLOR, DEFAULT_PRINT_TITLE, DEFAULT_ZOOM, ZOOM_MAX, ZOOM_MIN,
};

#[derive(Debug, thiserror::Error, PartialEq)]
pub enum ConfigError {
    #[error("invalid config: {0}")]
    Invalid(String),
    #[error("config parse error: {0}")]
    Parse(String),
}

/// Zoom slider range.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ZoomRange {
    pub min: f64,
    pub max: f64,
    pub default: f64,
}

impl Default for ZoomRange {
    fn default() -> Self {
        Self { min: ZOOM_MIN, max: ZOOM_MAX, default: DEFAULT_ZOOM }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct EditorConfig {
    pub db_name: String,
    pub db_version: u32,
    pub zoom: ZoomRange,
    pub default_pin_color: String,
    pub copy_suffix: String,
    pub print_title: String,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            db_name: DB_NAME.to_owned(),
            db_version: DB_VERSION,
            zoom: ZoomRange::default(),
            default_pin_color: DEFAULT_PIN_COLOR.to_owned(),
            copy_suffix: COPY_SUFFIX.to_owned(),
            print_title: DEFAULT_PRINT_TITLE.to_owned(),
        }
    }
}

/// Optional overrides, deserialized from user-provided JSON.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct ConfigOverrides {
    pub db_name: Option<String>,
    pub db_version: Option<u32>,
    pub zoom_min: Option<f64>,
    pub zoom_max: Option<f64>,
    pub zoom_default: Option<f64>,
    pub default_pin_color: Option<String>,
    pub copy_suffix: Option<String>,
    pub print_title: Option<String>,
}

impl ConfigOverrides {
    /// Parse overrides from a JSON document.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] for malformed JSON or unknown keys.
    pub fn from_json(raw: &str) -> Result<Self, ConfigError> {
        serde_json::from_str(raw).map_err(|e| ConfigError::Parse(e.to_string()))
    }
}

impl EditorConfig {
    /// Apply overrides on top of the defaults.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] if a value is out of range or malformed.
    pub fn with_overrides(overrides: ConfigOverrides) -> Result<Self, ConfigError> {
        let mut cfg = Self::default();

        if let Some(name) = overrides.db_name {
            let name = name.trim();
            if name.is_empty() {
                return Err(ConfigError::Invalid("dbName must not be empty".into()));
            }
            cfg.db_name = name.to_owned();
        }
        if let Some(version) = overrides.db_version {
            if version == 0 {
                return Err(ConfigError::Invalid("dbVersion must be at least 1".into()));
            }
            cfg.db_version = version;
        }

        cfg.zoom = parse_zoom(cfg.zoom, overrides.zoom_min, overrides.zoom_max, overrides.zoom_default)?;

        if let Some(color) = overrides.default_pin_color {
            cfg.default_pin_color = canonical_hex(&color)
                .ok_or_else(|| ConfigError::Invalid(format!("defaultPinColor is not a hex color: {color}")))?;
        }
        if let Some(suffix) = overrides.copy_suffix {
            if suffix.trim().is_empty() {
                return Err(ConfigError::Invalid("copySuffix must not be blank".into()));
            }
            cfg.copy_suffix = suffix;
        }
        if let Some(title) = overrides.print_title {
            cfg.print_title = title;
        }

        Ok(cfg)
    }
}

fn parse_zoom(base: ZoomRange, min: Option<f64>, max: Option<f64>, default: Option<f64>) -> Result<ZoomRange, ConfigError> {
    let range = ZoomRange {
        min: min.unwrap_or(base.min),
        max: max.unwrap_or(base.max),
        default: default.unwrap_or(base.default),
    };
    let finite = range.min.is_finite() && range.max.is_finite() && range.default.is_finite();
    if !finite || range.min <= 0.0 {
        return Err(ConfigError::Invalid("zoom bounds must be positive numbers".into()));
    }
    if range.min > range.max {
        return Err(ConfigError::Invalid(format!("zoomMin {} exceeds zoomMax {}", range.min, range.max)));
    }
    if range.default < range.min || range.default > range.max {
        return Err(ConfigError::Invalid(format!(
            "zoomDefault {} outside [{}, {}]",
            range.default, range.min, range.max
        )));
    }
    Ok(range)
}
