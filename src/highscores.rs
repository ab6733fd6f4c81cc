//! Personal best
//!
//! Persisted to LocalStorage so the best stretch survives reloads. The
//! in-session high score lives on `MotionState`; this only keeps the max.

use serde::{Deserialize, Serialize};

/// Best score ever reached and the run time it took
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub struct PersonalBest {
    /// Score reached
    pub score: f64,
    /// Seconds from the first jump to reaching it
    pub time: f64,
    /// A record was set since the last save
    #[serde(skip)]
    unsaved: bool,
}

impl PersonalBest {
    /// LocalStorage key (used only in wasm32)
    #[allow(dead_code)]
    const STORAGE_KEY: &'static str = "longcat_best";

    pub fn new() -> Self {
        Self::default()
    }

    /// Keep `score` if it beats the current best. Returns true on a new record.
    pub fn record(&mut self, score: f64, time: f64) -> bool {
        if score.is_nan() || score <= self.score {
            return false;
        }
        self.score = score;
        self.time = time;
        self.unsaved = true;
        true
    }

    /// Whether a record was set since the last save
    pub fn is_unsaved(&self) -> bool {
        self.unsaved
    }

    /// Persist a pending record. Returns true if anything was written.
    pub fn save_if_unsaved(&mut self) -> bool {
        if !self.unsaved {
            return false;
        }
        self.save();
        self.unsaved = false;
        true
    }

    /// Text for sharing the record
    pub fn brag(&self) -> String {
        format!(
            "Beat my highscore of {:.2}km in {:.2}s!",
            self.score, self.time
        )
    }

    /// Load the personal best from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(Some(json)) = storage.get_item(Self::STORAGE_KEY) {
                if let Ok(best) = serde_json::from_str::<PersonalBest>(&json) {
                    log::info!("Loaded personal best {:.1}", best.score);
                    return best;
                }
            }
        }

        log::info!("No personal best found, starting fresh");
        Self::new()
    }

    /// Save the personal best to LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn save(&self) {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(json) = serde_json::to_string(self) {
                let _ = storage.set_item(Self::STORAGE_KEY, &json);
                log::info!("Personal best saved ({:.1})", self.score);
            }
        }
    }

    /// Native stubs
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        Self::new()
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn save(&self) {
        // No-op for native
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_keeps_max() {
        let mut best = PersonalBest::new();
        assert!(best.record(3.0, 1.5));
        assert!(!best.record(2.0, 0.5));
        assert!(!best.record(3.0, 0.1));
        assert_eq!((best.score, best.time), (3.0, 1.5));
        assert!(best.record(12.5, 9.0));
        assert_eq!(best.time, 9.0);
    }

    #[test]
    fn test_record_ignores_nan() {
        let mut best = PersonalBest::new();
        assert!(!best.record(f64::NAN, 1.0));
        assert_eq!(best.score, 0.0);
    }

    #[test]
    fn test_brag() {
        let mut best = PersonalBest::new();
        best.record(7.849, 3.1);
        assert_eq!(best.brag(), "Beat my highscore of 7.85km in 3.10s!");
    }

    #[test]
    fn test_parses_stored_json() {
        let best: PersonalBest = serde_json::from_str(r#"{"score":10.5,"time":4.25}"#).unwrap();
        assert_eq!(best.score, 10.5);
        assert_eq!(best.time, 4.25);
        assert!(!best.is_unsaved());
    }

    #[test]
    fn test_save_if_unsaved() {
        let mut best = PersonalBest::new();
        assert!(!best.save_if_unsaved());

        // A record set mid-climb is pending until flushed
        best.record(4.0, 2.0);
        assert!(best.is_unsaved());
        assert!(best.save_if_unsaved());
        assert!(!best.is_unsaved());
        assert!(!best.save_if_unsaved());

        // Failing to beat it leaves nothing to write
        best.record(1.0, 0.5);
        assert!(!best.save_if_unsaved());
    }
}
