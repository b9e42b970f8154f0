//! Player preferences and timing configuration
//!
//! Persisted in LocalStorage on the web. Natively, read from the JSON file
//! named by `BIRTHDAY_HUNT_SETTINGS` when that variable is set.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::session::Timings;

#[derive(Error, Debug)]
pub enum SettingsError {
    #[error("failed to access settings file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid settings JSON: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Audio ===
    /// Master volume (0.0 - 1.0)
    pub master_volume: f32,
    /// Sound effects volume (0.0 - 1.0)
    pub sfx_volume: f32,
    /// Silence everything
    pub muted: bool,
    /// Mute when window loses focus
    pub mute_on_blur: bool,

    // === Accessibility ===
    /// Reduced motion (no floating decorations)
    pub reduced_motion: bool,

    // === Pacing ===
    pub timings: Timings,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            master_volume: 0.8,
            sfx_volume: 1.0,
            muted: false,
            mute_on_blur: true,
            reduced_motion: false,
            timings: Timings::default(),
        }
    }
}

impl Settings {
    /// Environment variable naming the native settings file
    pub const PATH_ENV: &'static str = "BIRTHDAY_HUNT_SETTINGS";

    /// LocalStorage key (used only in wasm32)
    #[allow(dead_code)]
    const STORAGE_KEY: &'static str = "birthday_hunt_settings";

    /// Parse settings, clamping volumes into range
    pub fn from_json(json: &str) -> Result<Self, SettingsError> {
        let mut settings: Settings = serde_json::from_str(json)?;
        settings.master_volume = settings.master_volume.clamp(0.0, 1.0);
        settings.sfx_volume = settings.sfx_volume.clamp(0.0, 1.0);
        Ok(settings)
    }

    pub fn to_json(&self) -> Result<String, SettingsError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Effective sound effect gain (0 when muted)
    pub fn effective_volume(&self) -> f32 {
        if self.muted {
            0.0
        } else {
            self.master_volume * self.sfx_volume
        }
    }

    /// Load settings from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(Some(json)) = storage.get_item(Self::STORAGE_KEY) {
                match Self::from_json(&json) {
                    Ok(settings) => {
                        log::info!("Loaded settings from LocalStorage");
                        return settings;
                    }
                    Err(e) => log::warn!("Ignoring stored settings: {}", e),
                }
            }
        }

        log::info!("Using default settings");
        Self::default()
    }

    /// Save settings to LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn save(&self) {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            match self.to_json() {
                Ok(json) => {
                    if storage.set_item(Self::STORAGE_KEY, &json).is_ok() {
                        log::info!("Settings saved");
                    } else {
                        log::warn!("LocalStorage rejected settings");
                    }
                }
                Err(e) => log::warn!("Failed to serialize settings: {}", e),
            }
        }
    }

    /// Load settings from `$BIRTHDAY_HUNT_SETTINGS`, falling back to defaults
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        let Ok(path) = std::env::var(Self::PATH_ENV) else {
            log::info!("Using default settings");
            return Self::default();
        };
        match Self::load_from(&path) {
            Ok(settings) => {
                log::info!("Loaded settings from {}", path);
                settings
            }
            Err(e) => {
                log::warn!("{}; using defaults", e);
                Self::default()
            }
        }
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn load_from(path: &str) -> Result<Self, SettingsError> {
        let json = std::fs::read_to_string(path).map_err(|source| SettingsError::Io {
            path: path.to_string(),
            source,
        })?;
        Self::from_json(&json)
    }

    /// Write settings back to `$BIRTHDAY_HUNT_SETTINGS` if it is set
    #[cfg(not(target_arch = "wasm32"))]
    pub fn save(&self) {
        let Ok(path) = std::env::var(Self::PATH_ENV) else {
            return;
        };
        match self.save_to(&path) {
            Ok(()) => log::info!("Settings saved to {}", path),
            Err(e) => log::warn!("{}", e),
        }
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn save_to(&self, path: &str) -> Result<(), SettingsError> {
        let json = self.to_json()?;
        std::fs::write(path, json).map_err(|source| SettingsError::Io {
            path: path.to_string(),
            source,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_json_fills_defaults() {
        let settings = Settings::from_json(r#"{"muted": true, "timings": {"notification_ms": 1500}}"#)
            .unwrap();
        assert!(settings.muted);
        assert_eq!(settings.master_volume, 0.8);
        assert_eq!(settings.timings.notification_ms, 1500);
        assert_eq!(settings.timings.transition_delay_ms, Timings::default().transition_delay_ms);
    }

    #[test]
    fn test_volumes_are_clamped() {
        let settings = Settings::from_json(r#"{"master_volume": 3.0, "sfx_volume": -1.0}"#).unwrap();
        assert_eq!(settings.master_volume, 1.0);
        assert_eq!(settings.sfx_volume, 0.0);
    }

    #[test]
    fn test_effective_volume() {
        let mut settings = Settings::default();
        assert!((settings.effective_volume() - 0.8).abs() < 1e-6);
        settings.muted = true;
        assert_eq!(settings.effective_volume(), 0.0);
    }

    #[test]
    fn test_bad_json_is_a_parse_error() {
        assert!(matches!(
            Settings::from_json("{not json"),
            Err(SettingsError::Parse(_))
        ));
    }

    #[cfg(not(target_arch = "wasm32"))]
    #[test]
    fn test_missing_file_is_an_io_error() {
        let err = Settings::load_from("/nonexistent/birthday-hunt.json").unwrap_err();
        assert!(matches!(err, SettingsError::Io { .. }));
        assert!(err.to_string().contains("/nonexistent/birthday-hunt.json"));
    }

    #[cfg(not(target_arch = "wasm32"))]
    #[test]
    fn test_save_then_load_file() {
        let path = std::env::temp_dir().join(format!("birthday-hunt-{}.json", std::process::id()));
        let path = path.to_string_lossy().to_string();
        let settings = Settings {
            muted: true,
            reduced_motion: true,
            ..Default::default()
        };
        settings.save_to(&path).unwrap();
        let loaded = Settings::load_from(&path).unwrap();
        std::fs::remove_file(&path).unwrap();
        assert_eq!(loaded, settings);
    }
}
