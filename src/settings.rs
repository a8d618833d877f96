//! Driver settings
//!
//! Loaded from JSON; every field falls back to its default when absent.

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::Result;

/// Settings for the headless tick driver
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Fixed timestep handed to every tick (seconds)
    pub step: f32,
    /// Upper bound on ticks per level before the driver gives up
    pub max_ticks: u32,
    /// Seed for coin phases
    pub seed: u64,
    /// Grace period applied to freshly built levels
    pub finish_delay: f32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            step: SIM_DT,
            max_ticks: MAX_TICKS,
            seed: 0x5EED,
            finish_delay: FINISH_DELAY,
        }
    }
}

impl Settings {
    /// Parse settings from a JSON document
    pub fn from_json(json: &str) -> Result<Self> {
        let settings: Settings = serde_json::from_str(json)?;
        log::info!(
            "Loaded settings: step={} max_ticks={} seed={}",
            settings.step,
            settings.max_ticks,
            settings.seed
        );
        Ok(settings)
    }

    /// Serialize settings to JSON
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_json_uses_defaults() {
        let settings = Settings::from_json(r#"{ "seed": 7 }"#).unwrap();
        assert_eq!(settings.seed, 7);
        assert_eq!(settings.max_ticks, MAX_TICKS);
        assert!((settings.step - SIM_DT).abs() < f32::EPSILON);
        assert!((settings.finish_delay - 1.0).abs() < f32::EPSILON);
    }

    #[test]
    fn test_json_round_trip() {
        let settings = Settings {
            step: 0.5,
            max_ticks: 10,
            seed: 3,
            finish_delay: 2.0,
        };
        let json = settings.to_json().unwrap();
        assert_eq!(Settings::from_json(&json).unwrap(), settings);
    }

    #[test]
    fn test_malformed_json_is_an_error() {
        assert!(matches!(
            Settings::from_json("{ step: }"),
            Err(crate::SimError::Json(_))
        ));
    }
}
