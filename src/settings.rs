//! Run configuration
//!
//! Loaded from a JSON file. Every field has a default, so a partial file (or
//! `{}`) is a valid configuration.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::sim::{Difficulty, Variant};

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("failed to read settings: {0}")]
    Io(#[from] std::io::Error),
    #[error("malformed settings: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid settings: {0}")]
    Invalid(String),
}

/// Game settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub difficulty: Difficulty,
    pub variant: Variant,
    /// Fixed run seed; the binary derives one from the clock when absent
    pub seed: Option<u64>,
    /// Let the idle-mode driver steer. The headless binary always does.
    pub autopilot: bool,

    // === Headless runner ===
    /// Stop after this many frames even if the run is still going
    pub max_frames: u32,
    /// Frames between HUD log lines
    pub hud_interval: u32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            difficulty: Difficulty::Medium,
            variant: Variant::Zombie,
            seed: None,
            autopilot: false,

            max_frames: 3600,
            hud_interval: 60,
        }
    }
}

impl Settings {
    /// Parse and validate settings from a JSON string
    pub fn from_json(json: &str) -> Result<Self, SettingsError> {
        let settings: Settings = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Load settings from a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, SettingsError> {
        let path = path.as_ref();
        let json = fs::read_to_string(path)?;
        let settings = Self::from_json(&json)?;
        log::info!("Loaded settings from {}", path.display());
        Ok(settings)
    }

    /// Save settings as pretty JSON
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), SettingsError> {
        let path = path.as_ref();
        fs::write(path, serde_json::to_string_pretty(self)?)?;
        log::info!("Settings saved to {}", path.display());
        Ok(())
    }

    pub fn validate(&self) -> Result<(), SettingsError> {
        if self.max_frames == 0 {
            return Err(SettingsError::Invalid("max_frames must be positive".into()));
        }
        if self.hud_interval == 0 {
            return Err(SettingsError::Invalid("hud_interval must be positive".into()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_object_is_default() {
        let settings = Settings::from_json("{}").unwrap();
        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn test_partial_settings() {
        let settings =
            Settings::from_json(r#"{"variant": "pedestrian", "difficulty": "hard", "seed": 7}"#)
                .unwrap();
        assert_eq!(settings.variant, Variant::Pedestrian);
        assert_eq!(settings.difficulty, Difficulty::Hard);
        assert_eq!(settings.seed, Some(7));
        assert_eq!(settings.max_frames, 3600);
        assert!(!settings.autopilot);
    }

    #[test]
    fn test_unknown_variant_is_parse_error() {
        let err = Settings::from_json(r#"{"variant": "robots"}"#).unwrap_err();
        assert!(matches!(err, SettingsError::Parse(_)));
    }

    #[test]
    fn test_zero_frames_rejected() {
        let err = Settings::from_json(r#"{"max_frames": 0}"#).unwrap_err();
        assert!(matches!(err, SettingsError::Invalid(_)));
        let err = Settings::from_json(r#"{"hud_interval": 0}"#).unwrap_err();
        assert!(matches!(err, SettingsError::Invalid(_)));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = Settings::load("/nonexistent/dead-lane/settings.json").unwrap_err();
        assert!(matches!(err, SettingsError::Io(_)));
    }

    #[test]
    fn test_save_then_load() {
        let path = std::env::temp_dir().join(format!("dead-lane-{}.json", std::process::id()));
        let settings = Settings {
            variant: Variant::Pedestrian,
            autopilot: true,
            seed: Some(99),
            ..Default::default()
        };
        settings.save(&path).unwrap();
        let loaded = Settings::load(&path).unwrap();
        let _ = fs::remove_file(&path);
        assert_eq!(loaded, settings);
    }
}
