//! Player preferences
//!
//! Persisted separately from the personal best in LocalStorage, together
//! with an optional developer override for the simulation tuning.

use serde::{Deserialize, Serialize};

use crate::sim::Tuning;

/// Player preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Audio ===
    /// Volume (0.0 - 1.0)
    pub volume: f64,
    /// Silence all cues
    pub muted: bool,

    // === Accessibility ===
    /// Keep the cat's head and paws still
    pub reduced_motion: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            volume: 0.8,
            muted: false,
            reduced_motion: false,
        }
    }
}

impl Settings {
    /// Volume actually applied to cue playback
    pub fn effective_volume(&self) -> f64 {
        if self.muted {
            0.0
        } else {
            self.volume.clamp(0.0, 1.0)
        }
    }

    pub fn toggle_mute(&mut self) {
        self.muted = !self.muted;
    }

    /// LocalStorage keys
    #[allow(dead_code)]
    const STORAGE_KEY: &'static str = "longcat_settings";
    const TUNING_KEY: &'static str = "longcat_tuning";

    /// Tuning from a JSON override document, or defaults if it is absent or
    /// rejected. `mid_screen_offset` comes from the viewport unless the
    /// document sets it.
    pub fn tuning_from(json: Option<&str>, mid_screen_offset: f64) -> Tuning {
        let fallback = Tuning {
            mid_screen_offset,
            ..Tuning::default()
        };
        let Some(json) = json else {
            return fallback;
        };
        match Tuning::from_json(json) {
            Ok(mut tuning) => {
                log::info!("Using tuning override from '{}'", Self::TUNING_KEY);
                if !sets_key(json, "mid_screen_offset") {
                    tuning.mid_screen_offset = mid_screen_offset;
                }
                tuning
            }
            Err(e) => {
                log::warn!("Ignoring tuning override: {}", e);
                fallback
            }
        }
    }

    /// Load settings from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        if let Some(json) = read_storage(Self::STORAGE_KEY) {
            if let Ok(settings) = serde_json::from_str(&json) {
                log::info!("Loaded settings from LocalStorage");
                return settings;
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
            if let Ok(json) = serde_json::to_string(self) {
                let _ = storage.set_item(Self::STORAGE_KEY, &json);
                log::info!("Settings saved");
            }
        }
    }

    /// Simulation tuning, honouring a LocalStorage override (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load_tuning(mid_screen_offset: f64) -> Tuning {
        Self::tuning_from(read_storage(Self::TUNING_KEY).as_deref(), mid_screen_offset)
    }

    /// Native stubs
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        Self::default()
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn save(&self) {
        // No-op for native
    }

    /// Tuning from the `LONGCAT_TUNING` environment variable (JSON)
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load_tuning(mid_screen_offset: f64) -> Tuning {
        Self::tuning_from(
            std::env::var("LONGCAT_TUNING").ok().as_deref(),
            mid_screen_offset,
        )
    }
}

/// Whether a JSON object document names `key` at the top level
fn sets_key(json: &str, key: &str) -> bool {
    serde_json::from_str::<serde_json::Value>(json).is_ok_and(|doc| doc.get(key).is_some())
}

#[cfg(target_arch = "wasm32")]
fn read_storage(key: &str) -> Option<String> {
    let storage = web_sys::window()?.local_storage().ok()??;
    storage.get_item(key).ok()?
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_effective_volume() {
        let mut settings = Settings::default();
        assert_eq!(settings.effective_volume(), 0.8);
        settings.toggle_mute();
        assert_eq!(settings.effective_volume(), 0.0);
        settings.toggle_mute();
        settings.volume = 3.0;
        assert_eq!(settings.effective_volume(), 1.0);
    }

    #[test]
    fn test_partial_settings_json() {
        let settings: Settings = serde_json::from_str(r#"{"muted":true}"#).unwrap();
        assert!(settings.muted);
        assert_eq!(settings.volume, 0.8);
    }

    #[test]
    fn test_mute_keeps_volume() {
        let mut settings = Settings::default();
        settings.toggle_mute();
        assert!(settings.muted);
        assert_eq!(settings.volume, 0.8);
        settings.toggle_mute();
        assert_eq!(settings.effective_volume(), 0.8);
    }

    #[test]
    fn test_tuning_override_falls_back_on_error() {
        let mid = 150.0;
        let fallback = Tuning {
            mid_screen_offset: mid,
            ..Tuning::default()
        };
        assert_eq!(Settings::tuning_from(None, mid), fallback);
        assert_eq!(
            Settings::tuning_from(Some(r#"{"gravity":-1}"#), mid),
            fallback
        );
        let tuning = Settings::tuning_from(Some(r#"{"gravity":2}"#), mid);
        assert_eq!(tuning.gravity, 2.0);
        assert_eq!(tuning.mid_screen_offset, mid);
    }

    #[test]
    fn test_tuning_override_keeps_its_mid_screen() {
        let tuning = Settings::tuning_from(Some(r#"{"mid_screen_offset":60}"#), 150.0);
        assert_eq!(tuning.mid_screen_offset, 60.0);
    }
}
