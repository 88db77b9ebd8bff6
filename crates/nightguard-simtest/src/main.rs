//! NightGuard Headless Simulation Harness
//!
//! Validates the night rules and the game state machine without a renderer.
//! Runs entirely in-process with synthesized frame timestamps.
//!
//! Usage:
//!   cargo run -p nightguard-simtest
//!   cargo run -p nightguard-simtest -- --verbose
//!   cargo run -p nightguard-simtest -- --config tuning.json --seed 7 --json

use std::path::PathBuf;

use clap::Parser;
use hecs::World;
use nightguard_core::prelude::*;
use nightguard_core::systems::{actor_positions, ai_system, spawn_actors, RollContext};
use nightguard_logic::clock::NightClock;
use nightguard_logic::constants::FOXY_ADVANCE_CHANCE;
use nightguard_logic::difficulty::ai_chance_from_curve;
use nightguard_logic::power::{self, DeviceLoad};
use rand::rngs::mock::StepRng;
use rand::rngs::StdRng;
use rand::SeedableRng;

// ── Command line ────────────────────────────────────────────────────────

#[derive(Parser, Debug)]
#[command(about = "Headless NightGuard simulation harness")]
struct Opts {
    /// Print every check, not just failures
    #[arg(long)]
    verbose: bool,

    /// Dump the final autopilot snapshot as JSON
    #[arg(long)]
    json: bool,

    /// JSON tuning file; must exist and validate
    #[arg(long)]
    config: Option<PathBuf>,

    /// RNG seed, overriding the config file
    #[arg(long)]
    seed: Option<u64>,

    /// Nights for the autopilot to play
    #[arg(long, default_value_t = 5)]
    nights: u32,
}

// ── Test harness ────────────────────────────────────────────────────────

struct TestResult {
    name: String,
    passed: bool,
    detail: String,
}

const FRAME_MS: u64 = 16;

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let options = Opts::parse();

    let mut config = match &options.config {
        Some(path) => match SimConfig::load(path) {
            Ok(c) => c,
            Err(e) => {
                eprintln!("failed to load {}: {}", path.display(), e);
                std::process::exit(2);
            }
        },
        None => SimConfig::default(),
    };
    if options.seed.is_some() {
        config.seed = options.seed;
    }
    if config.seed.is_none() {
        config.seed = Some(42);
    }
    log::info!("Harness config: {:?}", config);

    println!("=== NightGuard Simulation Harness ===\n");

    let mut results = Vec::new();

    // 1. Power model
    results.extend(validate_power_model(options.verbose));

    // 2. Night clock
    results.extend(validate_night_clock(&config));

    // 3. AI roll statistics
    results.extend(validate_ai_rates(&config, options.verbose));

    // 4. Terminal states
    results.extend(validate_terminal_states(&config));

    // 5. Autopilot nights
    let (autopilot, last_snapshot) = run_autopilot(&config, options.nights, options.verbose);
    results.extend(autopilot);

    // ── Summary ──
    println!();
    let passed = results.iter().filter(|r| r.passed).count();
    let failed = results.iter().filter(|r| !r.passed).count();
    let total = results.len();

    for r in &results {
        let icon = if r.passed { "✓" } else { "✗" };
        if !r.passed || options.verbose {
            println!("  {} {}: {}", icon, r.name, r.detail);
        }
    }

    if options.json {
        match last_snapshot.to_json() {
            Ok(json) => println!("\n{}", json),
            Err(e) => log::warn!("Could not serialize final snapshot: {}", e),
        }
    }

    println!(
        "\n=== RESULT: {}/{} passed, {} failed ===",
        passed, total, failed
    );

    if failed > 0 {
        std::process::exit(1);
    }
}

// ── 1. Power Model ──────────────────────────────────────────────────────

fn validate_power_model(verbose: bool) -> Vec<TestResult> {
    println!("--- Power Model ---");
    let mut results = Vec::new();

    // Every device combination stays within [1, 7]
    let mut seen = Vec::new();
    for mask in 0u8..32 {
        let load = DeviceLoad {
            left_light: mask & 1 != 0,
            right_light: mask & 2 != 0,
            left_door: mask & 4 != 0,
            right_door: mask & 8 != 0,
            camera_up: mask & 16 != 0,
        };
        seen.push(power::usage_units(&load));
    }
    let min = seen.iter().copied().min().unwrap_or(0);
    let max = seen.iter().copied().max().unwrap_or(0);
    results.push(TestResult {
        name: "power_usage_range".into(),
        passed: min == power::BASE_USAGE && max == power::MAX_USAGE,
        detail: format!("usage units span {}..={} over 32 device states", min, max),
    });

    // Same 60 s interval, many frame rates, every load level
    let mut worst = 0.0_f64;
    for units in power::BASE_USAGE..=power::MAX_USAGE {
        let drops: Vec<f64> = [5u64, 8, 16, 33, 50, 100]
            .iter()
            .map(|&dt| {
                let mut p = 100.0;
                for _ in 0..(60_000 / dt) {
                    p = power::drain(p, units, dt as f64);
                }
                // Top up the remainder so every run covers exactly 60 s
                power::drain(p, units, (60_000 % dt) as f64)
            })
            .collect();
        let spread = drops.iter().cloned().fold(f64::MIN, f64::max)
            - drops.iter().cloned().fold(f64::MAX, f64::min);
        worst = worst.max(spread);
        if verbose {
            println!("  {} units: {:.4} power left after 60 s", units, drops[0]);
        }
    }
    results.push(TestResult {
        name: "power_frame_rate_independent".into(),
        passed: worst < 1e-6,
        detail: format!("max spread across frame rates {:.2e}", worst),
    });

    results
}

// ── 2. Night Clock ──────────────────────────────────────────────────────

fn validate_night_clock(config: &SimConfig) -> Vec<TestResult> {
    println!("--- Night Clock ---");
    let mut results = Vec::new();

    let clock = NightClock::with_duration(0, config.night_duration_seconds);
    let end_ms = (config.night_duration_seconds * 1000.0) as u64;
    results.push(TestResult {
        name: "clock_bounded".into(),
        passed: clock.tick(end_ms * 3) == config.night_duration_seconds
            && clock.is_night_over(clock.tick(end_ms)),
        detail: format!("elapsed clamps at {}s", config.night_duration_seconds),
    });

    // A quiet engine crosses the boundary exactly once
    let quiet = SimConfig {
        ai_chance_curve: vec![0.0],
        foxy_chance: 0.0,
        ..config.clone()
    };
    let mut sim = GameStateMachine::new(quiet);
    let mut survived = 0;
    let mut over_bound = false;
    let frames = (end_ms + 30_000) / FRAME_MS;
    for frame in 0..frames {
        let events = sim.update(frame * FRAME_MS, FRAME_MS as f64);
        survived += events
            .iter()
            .filter(|e| matches!(e, GameEvent::NightSurvived { .. }))
            .count();
        over_bound |= sim.state().elapsed_seconds > config.night_duration_seconds;
    }
    results.push(TestResult {
        name: "clock_single_crossing".into(),
        passed: survived == 1 && sim.state().night == 2 && !over_bound,
        detail: format!(
            "{} survived events, night now {}",
            survived,
            sim.state().night
        ),
    });

    results
}

// ── 3. AI Roll Statistics ───────────────────────────────────────────────

fn validate_ai_rates(config: &SimConfig, verbose: bool) -> Vec<TestResult> {
    println!("--- Actor AI ---");
    let mut results = Vec::new();
    const SAMPLES: u32 = 20_000;

    let mut rng = StdRng::seed_from_u64(config.seed.unwrap_or(0));
    for night in 1..=5 {
        let expected = ai_chance_from_curve(&config.ai_chance_curve, night);
        let ctx = RollContext {
            night,
            camera_up: false,
            ai_chance_curve: &config.ai_chance_curve,
            foxy_chance: config.foxy_chance,
        };
        let mut bonnie_moves = 0u32;
        let mut foxy_moves = 0u32;
        for _ in 0..SAMPLES {
            let mut world = World::new();
            spawn_actors(&mut world);
            ai_system(&mut world, &mut rng, &ctx);
            for (kind, position) in actor_positions(&world) {
                match (kind, position) {
                    (ActorKind::Bonnie, 1) => bonnie_moves += 1,
                    (ActorKind::Foxy, 1) => foxy_moves += 1,
                    _ => {}
                }
            }
        }
        let bonnie_rate = bonnie_moves as f64 / SAMPLES as f64;
        let foxy_rate = foxy_moves as f64 / SAMPLES as f64;
        if verbose {
            println!(
                "  night {}: bonnie {:.3} (want {:.2}), foxy {:.4}",
                night, bonnie_rate, expected, foxy_rate
            );
        }
        results.push(TestResult {
            name: format!("ai_rate_night_{}", night),
            passed: (bonnie_rate - expected).abs() < 0.02
                && (foxy_rate - config.foxy_chance).abs() < 0.01,
            detail: format!(
                "bonnie advanced {:.3} of rolls (want {:.2}), foxy {:.4} (want {:.2})",
                bonnie_rate, expected, foxy_rate, config.foxy_chance
            ),
        });
    }

    // Guaranteed rolls: Bonnie and Chica hit the doors after four rolls
    let mut world = World::new();
    spawn_actors(&mut world);
    let mut always = StepRng::new(0, 0);
    let ctx = RollContext {
        night: 5,
        camera_up: true,
        ai_chance_curve: &config.ai_chance_curve,
        foxy_chance: FOXY_ADVANCE_CHANCE,
    };
    let mut rolls_to_doors = None;
    for roll in 1..=1000 {
        ai_system(&mut world, &mut always, &ctx);
        let positions = actor_positions(&world);
        if rolls_to_doors.is_none() && positions[0].1 == 4 && positions[1].1 == 4 {
            rolls_to_doors = Some(roll);
        }
    }
    let positions = actor_positions(&world);
    let curve_saturates = ai_chance_from_curve(&config.ai_chance_curve, 5) >= 1.0;
    results.push(TestResult {
        name: "ai_guaranteed_rolls_capped".into(),
        passed: (!curve_saturates || rolls_to_doors == Some(4))
            && positions[0].1 <= 4
            && positions[1].1 <= 4
            && positions[2].1 == 0,
        detail: format!(
            "doors reached after {:?} rolls, final {:?}",
            rolls_to_doors, positions
        ),
    });

    results
}

// ── 4. Terminal States ──────────────────────────────────────────────────

fn validate_terminal_states(config: &SimConfig) -> Vec<TestResult> {
    println!("--- Terminal States ---");
    let mut results = Vec::new();

    let mut sim = GameStateMachine::new(config.clone());
    sim.set_power(0.0);
    let events = sim.tick(0);
    let causes: Vec<JumpscareCause> = events
        .iter()
        .filter_map(GameEvent::jumpscare)
        .map(|j| j.cause)
        .collect();
    results.push(TestResult {
        name: "terminal_power_out".into(),
        passed: causes == vec![JumpscareCause::PowerOut] && sim.is_game_over(),
        detail: format!("causes after injected power out: {:?}", causes),
    });

    let frozen = sim.state().clone();
    let positions = sim.actor_positions();
    let mut quiet = true;
    for frame in 1..1000u64 {
        quiet &= sim.tick(frame * FRAME_MS).is_empty();
    }
    results.push(TestResult {
        name: "terminal_idempotent".into(),
        passed: quiet && sim.state() == &frozen && sim.actor_positions() == positions,
        detail: "1000 ticks after game over change nothing".into(),
    });

    sim.restart();
    sim.tick(5_000_000);
    results.push(TestResult {
        name: "terminal_restart".into(),
        passed: !sim.is_game_over()
            && sim.state().night == 1
            && sim.state().elapsed_seconds == 0.0
            && sim.ai_ticks() == 1,
        detail: format!(
            "after restart: night {}, power {:.2}",
            sim.state().night,
            sim.state().power
        ),
    });

    results
}

// ── 5. Autopilot Nights ─────────────────────────────────────────────────

/// A guard who watches every actor and shuts a door only while someone is
/// at its corner or beyond.
fn autopilot(sim: &mut GameStateMachine) {
    let snapshot = sim.snapshot();
    let bonnie = snapshot.actor(ActorKind::Bonnie).map_or(0, |a| a.position);
    let chica = snapshot.actor(ActorKind::Chica).map_or(0, |a| a.position);
    let foxy = snapshot.actor(ActorKind::Foxy).map_or(0, |a| a.position);

    let want_left = bonnie >= 3 || foxy >= 1;
    let want_right = chica >= 3;
    if want_left != snapshot.left_door {
        sim.toggle_left_door();
    }
    if want_right != snapshot.right_door {
        sim.toggle_right_door();
    }
}

fn run_autopilot(
    config: &SimConfig,
    nights: u32,
    verbose: bool,
) -> (Vec<TestResult>, RenderSnapshot) {
    println!("--- Autopilot Nights ---");
    let mut results = Vec::new();
    let mut sim = GameStateMachine::new(config.clone());

    let max_frames =
        (config.night_duration_seconds * 1000.0) as u64 * nights as u64 / FRAME_MS + nights as u64;
    let mut previous = sim.actor_positions();
    let mut violations = Vec::new();
    let mut jumpscares = 0;
    let mut survived = 0;

    for frame in 0..max_frames {
        autopilot(&mut sim);
        let events = sim.tick(frame * FRAME_MS);

        let power = sim.state().power;
        if !(0.0..=100.0).contains(&power) {
            violations.push(format!("frame {}: power {}", frame, power));
        }
        if sim.state().elapsed_seconds > config.night_duration_seconds {
            violations.push(format!("frame {}: clock past end of night", frame));
        }

        let new_night = events
            .iter()
            .any(|e| matches!(e, GameEvent::NightSurvived { .. }));
        let positions = sim.actor_positions();
        if !new_night {
            for (before, after) in previous.iter().zip(&positions) {
                if after.1 < before.1 {
                    violations.push(format!("frame {}: {:?} moved backwards", frame, after.0));
                }
            }
        }
        previous = positions;

        for event in &events {
            match event {
                GameEvent::NightSurvived { night } => {
                    survived += 1;
                    if verbose {
                        println!("  survived night {}", night);
                    }
                }
                GameEvent::Jumpscare(j) => {
                    jumpscares += 1;
                    if verbose {
                        println!("  night {}: {}", j.night, j.cause);
                    }
                }
                GameEvent::ActorAdvanced { .. } => {}
            }
        }

        if sim.is_game_over() || survived >= nights {
            break;
        }
    }

    results.push(TestResult {
        name: "autopilot_invariants".into(),
        passed: violations.is_empty() && jumpscares <= 1,
        detail: if violations.is_empty() {
            format!(
                "survived {} of {} nights, {} jumpscare(s), final power {:.1}",
                survived,
                nights,
                jumpscares,
                sim.state().power
            )
        } else {
            violations.join("; ")
        },
    });

    (results, sim.snapshot())
}
