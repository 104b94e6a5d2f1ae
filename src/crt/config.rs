//! CRT effect configuration
//!
//! Construction-time tuning for the compositor, stored as RON.

use std::fs;
use std::path::Path;
use serde::{Deserialize, Serialize};
use crate::rasterizer::{HEIGHT, WIDTH};

/// Error type for config loading
#[derive(Debug)]
pub enum ConfigError {
    IoError(std::io::Error),
    ParseError(ron::error::SpannedError),
    SerializeError(ron::Error),
    Invalid(String),
}

impl From<std::io::Error> for ConfigError {
    fn from(e: std::io::Error) -> Self {
        ConfigError::IoError(e)
    }
}

impl From<ron::error::SpannedError> for ConfigError {
    fn from(e: ron::error::SpannedError) -> Self {
        ConfigError::ParseError(e)
    }
}

impl From<ron::Error> for ConfigError {
    fn from(e: ron::Error) -> Self {
        ConfigError::SerializeError(e)
    }
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::IoError(e) => write!(f, "IO error: {}", e),
            ConfigError::ParseError(e) => write!(f, "Parse error: {}", e),
            ConfigError::SerializeError(e) => write!(f, "Serialize error: {}", e),
            ConfigError::Invalid(msg) => write!(f, "Invalid config: {}", msg),
        }
    }
}

/// Largest canvas side the window texture can hold
pub const MAX_CANVAS_DIM: usize = u16::MAX as usize;

/// Compositor settings. Every field is independently tunable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CrtConfig {
    /// Canvas width in pixels
    pub width: usize,
    /// Canvas height in pixels
    pub height: usize,
    /// Rows the bright sweep band moves per frame
    pub scanline_speed: i32,
    /// Height of the sweep band in rows
    pub scanline_thickness: i32,
    /// Max horizontal jitter in pixels (either direction)
    pub jitter_amplitude: i32,
    /// Frames between jitter re-rolls
    pub jitter_interval: u32,
    /// Frames between flicker pulses
    pub flicker_period: u32,
    /// Brightness kept during a flicker pulse (0.0-1.0)
    pub flicker_intensity: f32,
    /// Noise pixels per refresh
    pub noise_density: usize,
    /// Frames between noise refreshes
    pub noise_refresh_interval: u32,
    /// Brightness of the side-by-side bleed copies (0.0 disables)
    pub color_bleed_strength: f32,
    /// Glyph scale for ghosted text and sprites
    pub text_scale: i32,
    /// Glyph scale for status text
    pub ui_text_scale: i32,
    /// Vertical distance between sprite lines
    pub sprite_line_pitch: i32,
    /// Fixed RNG seed (None = seed from the OS)
    pub seed: Option<u64>,
}

impl Default for CrtConfig {
    fn default() -> Self {
        Self {
            width: WIDTH,
            height: HEIGHT,
            scanline_speed: 3,
            scanline_thickness: 2,
            jitter_amplitude: 1,
            jitter_interval: 8,
            flicker_period: 120,
            flicker_intensity: 0.95,
            noise_density: 50,
            noise_refresh_interval: 3,
            color_bleed_strength: 0.8,
            text_scale: 2,
            ui_text_scale: 1,
            sprite_line_pitch: 18,
            seed: None,
        }
    }
}

impl CrtConfig {
    /// Default settings at a custom canvas size
    pub fn with_size(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            ..Self::default()
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.width == 0 || self.height == 0 {
            return Err(ConfigError::Invalid(format!(
                "canvas size {}x{} must be non-zero",
                self.width, self.height
            )));
        }
        if self.width > MAX_CANVAS_DIM || self.height > MAX_CANVAS_DIM {
            return Err(ConfigError::Invalid(format!(
                "canvas size {}x{} exceeds {} per side",
                self.width, self.height, MAX_CANVAS_DIM
            )));
        }
        for (name, value) in [
            ("jitter_interval", self.jitter_interval),
            ("flicker_period", self.flicker_period),
            ("noise_refresh_interval", self.noise_refresh_interval),
        ] {
            if value == 0 {
                return Err(ConfigError::Invalid(format!("{} must be at least 1", name)));
            }
        }
        if self.text_scale < 1 || self.ui_text_scale < 1 {
            return Err(ConfigError::Invalid("text scales must be at least 1".to_string()));
        }
        if self.jitter_amplitude < 0 || self.scanline_thickness < 0 || self.scanline_speed < 0 {
            return Err(ConfigError::Invalid(
                "jitter amplitude and scanline settings must not be negative".to_string(),
            ));
        }
        for (name, value) in [
            ("flicker_intensity", self.flicker_intensity),
            ("color_bleed_strength", self.color_bleed_strength),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(ConfigError::Invalid(format!("{} must be within 0.0-1.0", name)));
            }
        }
        Ok(())
    }
}

/// Load and validate a config from a RON file
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<CrtConfig, ConfigError> {
    let contents = fs::read_to_string(path)?;
    load_config_from_str(&contents)
}

/// Load and validate a config from a RON string
pub fn load_config_from_str(s: &str) -> Result<CrtConfig, ConfigError> {
    let config: CrtConfig = ron::from_str(s)?;
    config.validate()?;
    Ok(config)
}

/// Save a config to a RON file
pub fn save_config<P: AsRef<Path>>(config: &CrtConfig, path: P) -> Result<(), ConfigError> {
    let pretty = ron::ser::PrettyConfig::new().indentor("  ".to_string());
    let contents = ron::ser::to_string_pretty(config, pretty)?;
    fs::write(path, contents)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let config = CrtConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.jitter_interval, 8);
        assert_eq!(config.flicker_period, 120);
        assert_eq!((config.width, config.height), (800, 600));
    }

    #[test]
    fn test_partial_ron_keeps_defaults() {
        let config = load_config_from_str("(scanline_thickness: 4, seed: Some(7))").unwrap();
        assert_eq!(config.scanline_thickness, 4);
        assert_eq!(config.seed, Some(7));
        assert_eq!(config.noise_density, 50);
    }

    #[test]
    fn test_zero_period_rejected() {
        let err = load_config_from_str("(flicker_period: 0)").unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn test_out_of_range_intensity_rejected() {
        let config = CrtConfig {
            color_bleed_strength: 1.5,
            ..CrtConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_oversized_canvas_rejected() {
        let err = load_config_from_str("(width: 70000)").unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
        assert!(load_config_from_str("(height: 65535)").is_ok());
    }

    #[test]
    fn test_malformed_ron_is_parse_error() {
        let err = load_config_from_str("(width: ").unwrap_err();
        assert!(matches!(err, ConfigError::ParseError(_)));
    }

    #[test]
    fn test_save_then_load_file() {
        let path = std::env::temp_dir().join(format!("crt-config-{}.ron", std::process::id()));
        let config = CrtConfig::with_size(320, 240);
        save_config(&config, &path).unwrap();
        let loaded = load_config(&path).unwrap();
        let _ = fs::remove_file(&path);
        assert_eq!(loaded, config);
    }
}
