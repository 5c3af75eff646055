//! Editor and remote-store settings.
//!
//! Settings are plain serde structs; missing fields fall back to defaults so a
//! partial JSON file is accepted.

use crate::geometry::{DUPLICATE_OFFSET, MIN_SIZE};
use crate::selection::HANDLE_MARGIN;
use crate::shapes::Rgb;
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

/// Errors from loading or saving settings.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid JSON config: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("invalid setting: {0}")]
    Invalid(String),
}

pub type ConfigResult<T> = Result<T, ConfigError>;

/// Tunables for the interaction engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    /// Width of the resize band around a selected shape.
    pub handle_margin: f64,
    /// Smallest width or height a resize may produce; smaller drags create nothing.
    pub min_size: f64,
    /// Distance a duplicate is shifted from its original.
    pub duplicate_offset: f64,
    /// Fill colour of newly created shapes.
    pub default_fill: Rgb,
    /// Outline colour of newly created shapes.
    pub default_outline: Rgb,
    /// Outline thickness of newly created shapes.
    pub default_outline_thickness: u32,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            handle_margin: HANDLE_MARGIN,
            min_size: MIN_SIZE,
            duplicate_offset: DUPLICATE_OFFSET,
            default_fill: Rgb::BLACK,
            default_outline: Rgb::BLACK,
            default_outline_thickness: 0,
        }
    }
}

impl EditorConfig {
    pub fn from_json(json: &str) -> ConfigResult<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Load settings from a JSON file.
    pub fn load(path: &Path) -> ConfigResult<Self> {
        let content = std::fs::read_to_string(path)?;
        let config = Self::from_json(&content)?;
        log::info!("Loaded editor config from {:?}", path);
        Ok(config)
    }

    /// Save settings as pretty JSON.
    pub fn save(&self, path: &Path) -> ConfigResult<()> {
        self.validate()?;
        std::fs::write(path, serde_json::to_string_pretty(self)?)?;
        Ok(())
    }

    pub fn validate(&self) -> ConfigResult<()> {
        if !(self.handle_margin.is_finite() && self.handle_margin > 0.0) {
            return Err(ConfigError::Invalid("handle_margin must be > 0".to_string()));
        }
        if !(self.min_size.is_finite() && self.min_size >= 0.0) {
            return Err(ConfigError::Invalid("min_size must be >= 0".to_string()));
        }
        if !(self.duplicate_offset.is_finite() && self.duplicate_offset >= 0.0) {
            return Err(ConfigError::Invalid(
                "duplicate_offset must be >= 0".to_string(),
            ));
        }
        Ok(())
    }
}

/// Address of the remote document store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RemoteConfig {
    pub host: String,
    pub port: u16,
}

impl Default for RemoteConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 1099,
        }
    }
}

impl RemoteConfig {
    /// `host:port` form of the address.
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_defaults() {
        let config = EditorConfig::default();
        assert_eq!(config.handle_margin, 10.0);
        assert_eq!(config.min_size, 2.0);
        assert_eq!(config.duplicate_offset, 10.0);
        assert_eq!(config.default_fill, Rgb::BLACK);
        assert_eq!(RemoteConfig::default().address(), "127.0.0.1:1099");
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config = EditorConfig::from_json(r#"{ "handle_margin": 6.0 }"#).unwrap();
        assert_eq!(config.handle_margin, 6.0);
        assert_eq!(config.min_size, MIN_SIZE);
    }

    #[test]
    fn test_invalid_values_rejected() {
        let err = EditorConfig::from_json(r#"{ "handle_margin": 0.0 }"#).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
        let err = EditorConfig::from_json("{ not json").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("editor.json");
        let config = EditorConfig {
            min_size: 4.0,
            default_fill: Rgb::new(10, 20, 30),
            ..EditorConfig::default()
        };
        config.save(&path).unwrap();
        assert_eq!(EditorConfig::load(&path).unwrap(), config);
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempdir().unwrap();
        let err = EditorConfig::load(&dir.path().join("nope.json")).unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }
}
