//! Engine configuration - tunables loaded from JSON with per-field defaults.
//!
//! Every field falls back to the shipped tuning, so a config file only needs
//! to name what it changes:
//!
//! ```json
//! { "seed": 7, "cadence": { "mode": "wall_clock", "roll_interval_ms": 16000 } }
//! ```

use std::io::ErrorKind;
use std::path::Path;

use nightguard_logic::constants::{
    AI_CHANCE_CURVE, DOOR_SPEED, FIRST_FRAME_DT_MS, FOXY_ADVANCE_CHANCE, INITIAL_POWER,
    NIGHT_DURATION_SECONDS, TICKS_PER_AI_ROLL,
};
use serde::{Deserialize, Serialize};

/// How often actors roll to advance.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum AiCadence {
    /// One roll every `ticks_per_ai_roll` frames. Actors move faster at
    /// higher frame rates; this is how the game always behaved.
    PerFrame { ticks_per_ai_roll: u64 },
    /// One roll every `roll_interval_ms` of wall-clock time, whatever the
    /// frame rate. A long frame spanning several intervals rolls several
    /// times.
    WallClock { roll_interval_ms: f64 },
}

impl Default for AiCadence {
    fn default() -> Self {
        AiCadence::PerFrame {
            ticks_per_ai_roll: TICKS_PER_AI_ROLL,
        }
    }
}

/// Tunables for one simulation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    pub night_duration_seconds: f64,
    pub initial_power: f64,
    pub cadence: AiCadence,
    /// Bonnie/Chica advance chance per night, saturating at the last entry.
    pub ai_chance_curve: Vec<f64>,
    pub foxy_chance: f64,
    pub door_speed: f32,
    /// Frame delta used for the first frame of a run.
    pub first_frame_dt_ms: f64,
    /// RNG seed. `None` seeds from OS entropy.
    pub seed: Option<u64>,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            night_duration_seconds: NIGHT_DURATION_SECONDS,
            initial_power: INITIAL_POWER,
            cadence: AiCadence::default(),
            ai_chance_curve: AI_CHANCE_CURVE.to_vec(),
            foxy_chance: FOXY_ADVANCE_CHANCE,
            door_speed: DOOR_SPEED,
            first_frame_dt_ms: FIRST_FRAME_DT_MS,
            seed: None,
        }
    }
}

impl SimConfig {
    /// Default tuning with a fixed seed, for reproducible runs.
    pub fn seeded(seed: u64) -> Self {
        Self {
            seed: Some(seed),
            ..Self::default()
        }
    }

    pub fn from_json_str(text: &str) -> Result<Self, ConfigError> {
        let config: SimConfig = serde_json::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json_str(&text)
    }

    /// Load `path`, or fall back to defaults when the file does not exist.
    /// A file that exists but fails to parse or validate is still an error.
    pub fn load_or_default(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        match std::fs::read_to_string(path) {
            Ok(text) => Self::from_json_str(&text),
            Err(e) if e.kind() == ErrorKind::NotFound => {
                log::warn!(
                    "Config file {} not found, using default tuning",
                    path.display()
                );
                Ok(Self::default())
            }
            Err(e) => Err(ConfigError::Io(e)),
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.night_duration_seconds > 0.0) {
            return Err(ConfigError::invalid("night_duration_seconds", "must be positive"));
        }
        if !(self.initial_power > 0.0 && self.initial_power <= 100.0) {
            return Err(ConfigError::invalid("initial_power", "must be in (0, 100]"));
        }
        match self.cadence {
            AiCadence::PerFrame { ticks_per_ai_roll } if ticks_per_ai_roll == 0 => {
                return Err(ConfigError::invalid("cadence", "ticks_per_ai_roll must be > 0"));
            }
            AiCadence::WallClock { roll_interval_ms } if !(roll_interval_ms > 0.0) => {
                return Err(ConfigError::invalid("cadence", "roll_interval_ms must be > 0"));
            }
            _ => {}
        }
        if self.ai_chance_curve.is_empty() {
            return Err(ConfigError::invalid("ai_chance_curve", "must not be empty"));
        }
        if let Some(bad) = self
            .ai_chance_curve
            .iter()
            .find(|c| !(0.0..=1.0).contains(*c))
        {
            return Err(ConfigError::Invalid {
                field: "ai_chance_curve",
                reason: format!("chance {} outside [0, 1]", bad),
            });
        }
        if !(0.0..=1.0).contains(&self.foxy_chance) {
            return Err(ConfigError::invalid("foxy_chance", "must be in [0, 1]"));
        }
        if !(self.door_speed > 0.0 && self.door_speed <= 1.0) {
            return Err(ConfigError::invalid("door_speed", "must be in (0, 1]"));
        }
        if !(self.first_frame_dt_ms >= 0.0) {
            return Err(ConfigError::invalid("first_frame_dt_ms", "must not be negative"));
        }
        Ok(())
    }
}

/// Errors that can occur loading a configuration
#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Json(serde_json::Error),
    Invalid { field: &'static str, reason: String },
}

impl ConfigError {
    fn invalid(field: &'static str, reason: &str) -> Self {
        ConfigError::Invalid {
            field,
            reason: reason.to_string(),
        }
    }
}

impl From<std::io::Error> for ConfigError {
    fn from(e: std::io::Error) -> Self {
        ConfigError::Io(e)
    }
}

impl From<serde_json::Error> for ConfigError {
    fn from(e: serde_json::Error) -> Self {
        ConfigError::Json(e)
    }
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "IO error: {}", e),
            ConfigError::Json(e) => write!(f, "Config parse error: {}", e),
            ConfigError::Invalid { field, reason } => {
                write!(f, "Invalid config field `{}`: {}", field, reason)
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::Io(e) => Some(e),
            ConfigError::Json(e) => Some(e),
            ConfigError::Invalid { .. } => None,
        }
    }
}
