//! Game constants - night length, power budget, AI cadence, door speed.
//!
//! These are the defaults the engine configuration starts from. Values match
//! the tuning the game shipped with.

/// Length of one night in (real) seconds. One in-game hour lasts a minute.
pub const NIGHT_DURATION_SECONDS: f64 = 360.0;

/// Power level at the start of every night.
pub const INITIAL_POWER: f64 = 100.0;

/// Fraction of the power budget drained per second per usage unit.
pub const DRAIN_PER_UNIT_PER_SECOND: f64 = 0.001;

/// Simulation ticks between two AI rolls.
pub const TICKS_PER_AI_ROLL: u64 = 1000;

/// Chance for Bonnie/Chica to advance on a roll, indexed by `night - 1`.
/// Nights past the end of the curve reuse the last entry.
pub const AI_CHANCE_CURVE: [f64; 5] = [0.2, 0.4, 0.6, 0.8, 1.0];

/// Foxy's fixed chance to advance on a roll while the cameras are down.
pub const FOXY_ADVANCE_CHANCE: f64 = 0.02;

/// Door closing distance per tick. Opening runs at half this rate.
pub const DOOR_SPEED: f32 = 0.15;

/// Frame delta assumed for the very first frame, before a previous
/// timestamp exists.
pub const FIRST_FRAME_DT_MS: f64 = 16.0;

/// Number of camera feeds. Feeds are numbered `1..=CAMERA_COUNT`.
pub const CAMERA_COUNT: u8 = 9;
