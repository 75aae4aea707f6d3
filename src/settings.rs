//! Game settings and preferences
//!
//! Persisted separately from the leaderboard.

use serde::{Deserialize, Serialize};

use crate::persistence::{Storage, StorageError};
use crate::tuning::{Tuning, Variant};

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Which build's balance to play with
    pub variant: Variant,
    /// Draw particle effects (simulation is unaffected)
    pub particles: bool,
    /// Show FPS counter
    pub show_fps: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            variant: Variant::Mobile,
            particles: true,
            show_fps: false,
        }
    }
}

impl Settings {
    /// Storage slot
    pub const STORAGE_KEY: &'static str = "fpsArenaSettings";

    /// Create settings for a variant
    pub fn for_variant(variant: Variant) -> Self {
        Self {
            variant,
            ..Self::default()
        }
    }

    /// Balance numbers for the selected variant
    pub fn tuning(&self) -> Tuning {
        Tuning::for_variant(self.variant)
    }

    /// Load settings; anything missing or unreadable falls back to defaults
    pub fn load<S: Storage>(storage: &S) -> Self {
        match storage.get(Self::STORAGE_KEY) {
            Ok(Some(json)) => match serde_json::from_str(&json) {
                Ok(settings) => {
                    log::info!("Loaded settings");
                    settings
                }
                Err(e) => {
                    log::warn!("Ignoring unreadable settings: {}", e);
                    Self::default()
                }
            },
            Ok(None) => {
                log::info!("Using default settings");
                Self::default()
            }
            Err(e) => {
                log::warn!("Settings unavailable: {}", e);
                Self::default()
            }
        }
    }

    pub fn save<S: Storage>(&self, storage: &mut S) -> Result<(), StorageError> {
        let json = serde_json::to_string(self)?;
        storage.set(Self::STORAGE_KEY, &json)?;
        log::info!("Settings saved");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persistence::MemoryStorage;

    #[test]
    fn test_defaults_when_missing() {
        let storage = MemoryStorage::new();
        assert_eq!(Settings::load(&storage), Settings::default());
    }

    #[test]
    fn test_save_and_load() {
        let mut storage = MemoryStorage::new();
        let mut settings = Settings::for_variant(Variant::Desktop);
        settings.particles = false;
        settings.save(&mut storage).unwrap();

        let loaded = Settings::load(&storage);
        assert_eq!(loaded, settings);
        assert!(loaded.tuning().allow_pause);
    }

    #[test]
    fn test_partial_settings_fill_defaults() {
        let mut storage = MemoryStorage::new();
        storage
            .set(Settings::STORAGE_KEY, r#"{"variant":"Desktop"}"#)
            .unwrap();

        let loaded = Settings::load(&storage);
        assert_eq!(loaded.variant, Variant::Desktop);
        assert!(loaded.particles);
    }

    #[test]
    fn test_corrupt_settings_use_defaults() {
        let mut storage = MemoryStorage::new();
        storage.set(Settings::STORAGE_KEY, "[1, 2").unwrap();
        assert_eq!(Settings::load(&storage), Settings::default());
    }
}
