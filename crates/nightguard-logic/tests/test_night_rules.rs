//! Integration tests for the pure night rules.
//!
//! Exercises: NightClock → display time → device load → power drain,
//! plus the difficulty curve against actor paths and the camera table.
//!
//! All tests are pure logic: no ECS world, no RNG.

use nightguard_logic::actors::{reaches_player, ActorKind};
use nightguard_logic::cameras::{camera_for_station, camera_name};
use nightguard_logic::clock::{display_time, NightClock};
use nightguard_logic::constants::{INITIAL_POWER, NIGHT_DURATION_SECONDS};
use nightguard_logic::difficulty::{ai_chance, should_advance};
use nightguard_logic::doors::{DoorAnimation, DoorSide};
use nightguard_logic::power::{drain, usage_units, DeviceLoad};

// ── Helpers ────────────────────────────────────────────────────────────

/// Drain a full night at a fixed frame interval; returns remaining power.
fn power_after_night(load: &DeviceLoad, frame_ms: u64) -> f64 {
    let clock = NightClock::new(0);
    let units = usage_units(load);
    let mut power = INITIAL_POWER;
    let mut now = 0;
    while !clock.is_night_over(clock.tick(now)) {
        power = drain(power, units, frame_ms as f64);
        now += frame_ms;
    }
    power
}

// ── Clock + power ──────────────────────────────────────────────────────

#[test]
fn idle_office_survives_a_night_on_a_third_of_the_battery() {
    // 1 unit = 0.1/s, 360 s → 36 drained
    let power = power_after_night(&DeviceLoad::default(), 16);
    assert!((power - 64.0).abs() < 1e-6, "power {}", power);
}

#[test]
fn both_doors_shut_all_night_runs_dry() {
    let load = DeviceLoad {
        left_door: true,
        right_door: true,
        ..Default::default()
    };
    assert_eq!(power_after_night(&load, 16), 0.0);
}

#[test]
fn full_night_drain_same_at_any_frame_rate() {
    let load = DeviceLoad {
        left_light: true,
        camera_up: true,
        ..Default::default()
    };
    let at_60 = power_after_night(&load, 16);
    let at_30 = power_after_night(&load, 32);
    let at_10 = power_after_night(&load, 100);
    assert!((at_60 - at_30).abs() < 1e-6);
    assert!((at_60 - at_10).abs() < 1e-6);
}

#[test]
fn clock_runs_midnight_to_six() {
    let clock = NightClock::new(1_000);
    assert_eq!(display_time(clock.tick(1_000)).to_string(), "12:00 AM");
    assert_eq!(display_time(clock.tick(61_000)).to_string(), "1:00 AM");
    assert_eq!(
        display_time(clock.tick(1_000 + 10_000_000)).to_string(),
        "6:00 AM"
    );
    assert_eq!(clock.tick(u64::MAX), NIGHT_DURATION_SECONDS);
}

// ── Actors, doors, cameras ─────────────────────────────────────────────

#[test]
fn fifth_night_every_roll_advances() {
    let chance = ai_chance(5);
    for kind in [ActorKind::Bonnie, ActorKind::Chica] {
        let mut position = 0;
        let mut rolls = 0;
        while should_advance(0.999, chance, position, kind.max_position()) {
            position += 1;
            rolls += 1;
        }
        assert_eq!(rolls, 4);
        assert!(kind.is_at_terminal(position));
    }
}

#[test]
fn closed_door_keeps_each_actor_out() {
    for kind in ActorKind::ALL {
        let terminal = kind.max_position();
        assert!(reaches_player(kind, terminal, false));
        assert!(!reaches_player(kind, terminal, true));
        let side = kind.guarded_by();
        assert!(DoorSide::ALL.contains(&side));
    }
}

#[test]
fn door_closed_before_the_actor_arrives() {
    // The slam finishes within a handful of frames of the button press
    let mut door = DoorAnimation::default();
    door.set_target(true);
    for _ in 0..10 {
        door.step();
    }
    assert!(door.is_fully_closed());
    assert!(!door.is_animating);
}

#[test]
fn every_station_on_camera_has_a_named_feed() {
    for kind in ActorKind::ALL {
        for position in 0..=kind.max_position() {
            if let Some(camera) = camera_for_station(kind, position) {
                assert!(camera_name(camera).is_some());
            }
        }
    }
}
