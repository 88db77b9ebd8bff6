//! Pure night-survival rules for NightGuard.
//!
//! This crate holds every rule of the night loop that can be expressed as a
//! plain function over plain data: no ECS world, no randomness source, no
//! wall clock. The engine in `nightguard-core` feeds these functions with its
//! state each frame, and the headless harness calls them directly.
//!
//! # Module Overview
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`actors`] | Actor kinds, approach paths, station names, protecting doors |
//! | [`cameras`] | Camera feed ids, names, and which stations each feed shows |
//! | [`clock`] | Wall-clock to in-game time, night bound, 12-hour display time |
//! | [`constants`] | Tunable defaults (night length, drain rate, AI cadence) |
//! | [`difficulty`] | Per-night AI chance curve and the advancement rule |
//! | [`doors`] | Door sides and the cosmetic slam/raise animation |
//! | [`power`] | Device load (usage units) and frame-rate independent drain |

pub mod actors;
pub mod cameras;
pub mod clock;
pub mod constants;
pub mod difficulty;
pub mod doors;
pub mod power;
