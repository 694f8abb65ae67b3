//! Learner settings and preferences
//!
//! Loaded from an optional JSON file. Missing fields take their defaults so
//! a file only needs the values it changes.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::progress::{CELEBRATION_SECS, ProgressStore};
use crate::sim::CueTimers;
use crate::skills::LevelBand;
use crate::tuning::Tuning;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Level band selected on first launch
    pub default_level: LevelBand,
    /// How long the hub highlights freshly earned points, in seconds
    pub celebration_secs: f32,

    // === Accessibility ===
    /// Reduced motion (no screen flashes)
    pub reduced_motion: bool,

    // === Simulation ===
    /// Fixed seed for reproducible runs; random per run when unset
    pub seed: Option<u64>,
    /// Mini-game balance
    pub tuning: Tuning,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            default_level: LevelBand::default(),
            celebration_secs: CELEBRATION_SECS,
            reduced_motion: false,
            seed: None,
            tuning: Tuning::default(),
        }
    }
}

impl Settings {
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Read settings from `path`, falling back to defaults if the file is
    /// missing or malformed
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        let json = match std::fs::read_to_string(path) {
            Ok(json) => json,
            Err(e) => {
                log::info!("No settings at {} ({}), using defaults", path.display(), e);
                return Self::default();
            }
        };

        match Self::from_json(&json) {
            Ok(settings) => {
                log::info!("Loaded settings from {}", path.display());
                settings
            }
            Err(e) => {
                log::warn!("Ignoring malformed settings in {}: {}", path.display(), e);
                Self::default()
            }
        }
    }

    /// Fresh progress store honouring the level and celebration preferences
    pub fn progress_store(&self) -> ProgressStore {
        ProgressStore::new(self.default_level, self.celebration_secs)
    }

    /// Cue timers honouring reduced motion
    pub fn cue_timers(&self) -> CueTimers {
        CueTimers::new(self.reduced_motion)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_json_uses_defaults() {
        let settings = Settings::from_json(r#"{"default_level":"5-8","seed":42}"#).unwrap();
        assert_eq!(settings.default_level, LevelBand::Years5To8);
        assert_eq!(settings.seed, Some(42));
        assert_eq!(settings.celebration_secs, 4.0);
        assert_eq!(settings.tuning, Tuning::default());
    }

    #[test]
    fn test_json_round_trip() {
        let mut settings = Settings::default();
        settings.reduced_motion = true;
        settings.tuning.debit_drill.overdraft_fee = 25.0;
        let json = settings.to_json().unwrap();
        assert_eq!(Settings::from_json(&json).unwrap(), settings);
    }

    #[test]
    fn test_bad_level_is_an_error() {
        assert!(Settings::from_json(r#"{"default_level":"kindergarten"}"#).is_err());
    }

    #[test]
    fn test_missing_file_falls_back() {
        let settings = Settings::load_or_default("/nonexistent/mind-over-money.json");
        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn test_store_and_cues_follow_settings() {
        let settings = Settings {
            default_level: LevelBand::Years11To13,
            reduced_motion: true,
            ..Settings::default()
        };
        assert_eq!(settings.progress_store().user_level(), LevelBand::Years11To13);

        let mut cues = settings.cue_timers();
        cues.trigger(crate::sim::Cue::new(crate::sim::CueKind::Flash, "fee", 500.0));
        assert!(!cues.is_active(crate::sim::CueKind::Flash));
    }
}
