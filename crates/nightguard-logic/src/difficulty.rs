//! Difficulty curve and the actor advancement rule.
//!
//! The random draw itself happens in the engine; everything here is a pure
//! decision over an already-drawn value in `[0, 1)`.

use crate::constants::AI_CHANCE_CURVE;

/// Chance that Bonnie or Chica advances on a roll during `night`.
///
/// Night 1 uses the first entry; nights past the end of the curve
/// saturate at the last entry.
pub fn ai_chance(night: u32) -> f64 {
    ai_chance_from_curve(&AI_CHANCE_CURVE, night)
}

/// Same as [`ai_chance`] over a custom curve. An empty curve never advances.
pub fn ai_chance_from_curve(curve: &[f64], night: u32) -> f64 {
    if curve.is_empty() {
        return 0.0;
    }
    let index = (night.max(1) as usize - 1).min(curve.len() - 1);
    curve[index]
}

/// Whether an actor at `position` advances given a drawn `roll`.
pub fn should_advance(roll: f64, chance: f64, position: u8, max_position: u8) -> bool {
    roll < chance && position < max_position
}

/// Foxy's rule: a fixed `chance`, and only while the player is away from
/// the cameras. See [`FOXY_ADVANCE_CHANCE`](crate::constants::FOXY_ADVANCE_CHANCE)
/// for the default.
pub fn foxy_should_advance(
    roll: f64,
    chance: f64,
    camera_up: bool,
    position: u8,
    max_position: u8,
) -> bool {
    !camera_up && should_advance(roll, chance, position, max_position)
}

/// Whether a per-frame tick counter has reached an AI roll.
pub fn roll_due(tick: u64, ticks_per_roll: u64) -> bool {
    ticks_per_roll > 0 && tick > 0 && tick % ticks_per_roll == 0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::FOXY_ADVANCE_CHANCE;

    #[test]
    fn test_curve_per_night() {
        assert_eq!(ai_chance(1), 0.2);
        assert_eq!(ai_chance(2), 0.4);
        assert_eq!(ai_chance(3), 0.6);
        assert_eq!(ai_chance(4), 0.8);
        assert_eq!(ai_chance(5), 1.0);
    }

    #[test]
    fn test_curve_saturates() {
        assert_eq!(ai_chance(6), 1.0);
        assert_eq!(ai_chance(50), 1.0);
    }

    #[test]
    fn test_night_zero_treated_as_first() {
        assert_eq!(ai_chance(0), 0.2);
    }

    #[test]
    fn test_curve_monotonic() {
        for night in 1..10 {
            assert!(ai_chance(night + 1) >= ai_chance(night));
        }
    }

    #[test]
    fn test_empty_curve() {
        assert_eq!(ai_chance_from_curve(&[], 3), 0.0);
    }

    #[test]
    fn test_advance_capped_at_max() {
        assert!(should_advance(0.1, 0.2, 3, 4));
        assert!(!should_advance(0.1, 0.2, 4, 4));
        assert!(!should_advance(0.3, 0.2, 0, 4));
    }

    #[test]
    fn test_foxy_frozen_by_camera() {
        let chance = FOXY_ADVANCE_CHANCE;
        assert!(foxy_should_advance(0.01, chance, false, 0, 2));
        assert!(!foxy_should_advance(0.01, chance, true, 0, 2));
        assert!(!foxy_should_advance(0.5, chance, false, 0, 2));
        assert!(!foxy_should_advance(0.01, chance, false, 2, 2));
    }

    #[test]
    fn test_roll_due_every_n_ticks() {
        assert!(!roll_due(0, 1000));
        assert!(!roll_due(999, 1000));
        assert!(roll_due(1000, 1000));
        assert!(roll_due(2000, 1000));
        assert!(!roll_due(1000, 0));
    }
}
