//! Plot configuration loaded from JSON.

use crate::gpu::StyleDescriptor;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Errors that can occur while loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Invalid color: {0}")]
    InvalidColor(String),
}

/// User-facing plot settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlotConfig {
    pub foreground: String,
    pub background: String,
    pub frequency_domain: bool,
    pub centered: bool,
    pub filled: bool,
    /// Present in step with the display refresh.
    pub vsync: bool,
}

impl Default for PlotConfig {
    fn default() -> Self {
        Self {
            foreground: "#00ff88".to_string(),
            background: "#000000".to_string(),
            frequency_domain: false,
            centered: true,
            filled: false,
            vsync: true,
        }
    }
}

impl PlotConfig {
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Load a config file. Missing fields take their defaults.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }

    /// Convert to the style handed to the renderer.
    pub fn to_style(&self) -> Result<StyleDescriptor, ConfigError> {
        let foreground_color = parse_hex_color(&self.foreground)
            .ok_or_else(|| ConfigError::InvalidColor(self.foreground.clone()))?;
        let background_color = parse_hex_color(&self.background)
            .ok_or_else(|| ConfigError::InvalidColor(self.background.clone()))?;

        Ok(StyleDescriptor {
            foreground_color,
            background_color,
            is_frequency_domain: self.frequency_domain,
            is_centered: self.centered,
            is_filled: self.filled,
        })
    }
}

/// Parse hex color to RGBA floats (6-char RGB with opaque alpha, or 8-char RGBA).
pub fn parse_hex_color(hex: &str) -> Option<[f32; 4]> {
    let hex = hex.trim_start_matches('#');
    if (hex.len() != 6 && hex.len() != 8) || !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
        return None;
    }
    let channel = |i: usize| -> Option<f32> {
        Some(u8::from_str_radix(&hex[i..i + 2], 16).ok()? as f32 / 255.0)
    };
    let alpha = if hex.len() == 8 { channel(6)? } else { 1.0 };
    Some([channel(0)?, channel(2)?, channel(4)?, alpha])
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_parse_hex_color() {
        assert_eq!(parse_hex_color("#00ff88"), Some([0.0, 1.0, 136.0 / 255.0, 1.0]));
        assert_eq!(parse_hex_color("ffffff"), Some([1.0, 1.0, 1.0, 1.0]));
        assert_eq!(parse_hex_color("#00000000"), Some([0.0, 0.0, 0.0, 0.0]));
        assert_eq!(parse_hex_color("ff000080"), Some([1.0, 0.0, 0.0, 128.0 / 255.0]));
        assert_eq!(parse_hex_color("invalid"), None);
        assert_eq!(parse_hex_color("#12345"), None);
        assert_eq!(parse_hex_color("#ééé"), None);
        assert_eq!(parse_hex_color("#+1+2+3"), None);
        assert_eq!(parse_hex_color("+f+f+f+f"), None);
    }

    #[test]
    fn test_default_config_to_style() {
        let style = PlotConfig::default().to_style().unwrap();
        assert_eq!(style.background_color, [0.0, 0.0, 0.0, 1.0]);
        assert!(style.is_centered);
        assert!(!style.is_filled);
        assert!(!style.is_frequency_domain);
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config =
            PlotConfig::from_json_str(r#"{ "filled": true, "frequency_domain": true }"#).unwrap();
        assert!(config.filled);
        assert!(config.frequency_domain);
        assert_eq!(config.foreground, "#00ff88");
        assert!(config.vsync);
    }

    #[test]
    fn test_invalid_color_is_rejected() {
        let config = PlotConfig {
            foreground: "#nothex".to_string(),
            ..Default::default()
        };
        assert!(matches!(config.to_style(), Err(ConfigError::InvalidColor(_))));
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r##"{{ "background": "#ffffff", "centered": false }}"##).unwrap();

        let config = PlotConfig::load(file.path()).unwrap();
        let style = config.to_style().unwrap();
        assert_eq!(style.background_color, [1.0, 1.0, 1.0, 1.0]);
        assert!(!style.is_centered);
    }

    #[test]
    fn test_load_missing_file() {
        let err = PlotConfig::load("/definitely/not/here.json").unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }
}
