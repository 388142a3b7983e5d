use serde::{Deserialize, Serialize};

use crate::error::TheoryError;

/// Caller-level defaults for the [`crate::theory::Theory`] facade.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TheoryConfig {
    /// Frequency of A4 (MIDI 69) in Hz. Common values: 440.0, 432.0.
    pub tuning_pitch: f64,
    /// Spell accidentals with sharps (`C#`) rather than flats (`Db`).
    pub use_sharps: bool,
    /// Octaves generated when a scale is requested without an explicit count.
    pub default_octaves: u32,
}

impl Default for TheoryConfig {
    fn default() -> Self {
        TheoryConfig {
            tuning_pitch: 440.0,
            use_sharps: true,
            default_octaves: 2,
        }
    }
}

impl TheoryConfig {
    /// Parse a config from JSON. Missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self, TheoryError> {
        let config: TheoryConfig = serde_json::from_str(json)?;
        if !(config.tuning_pitch.is_finite() && config.tuning_pitch > 0.0) {
            return Err(TheoryError::Config(format!(
                "tuningPitch must be a positive frequency, got {}",
                config.tuning_pitch
            )));
        }
        Ok(config)
    }

    pub fn to_json(&self) -> Result<String, TheoryError> {
        Ok(serde_json::to_string(self)?)
    }
}
