//! Game state machine - main entry point for running a night

use hecs::World;
use nightguard_logic::actors::{hall_warning_level, reaches_player, ActorKind};
use nightguard_logic::cameras::{camera_name, is_valid_camera, visible_on_camera};
use nightguard_logic::clock::{display_time, NightClock};
use nightguard_logic::doors::DoorSide;
use nightguard_logic::power;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::config::{ConfigError, SimConfig};
use crate::events::{GameEvent, JumpscareCause, JumpscareEvent};
use crate::snapshot::{ActorSnapshot, DoorSnapshot, RenderSnapshot};
use crate::state::{GameState, ViewMode};
use crate::systems::*;

/// Owns one simulation: game state, actors, doors, clock and RNG.
///
/// Drive it with [`tick`](Self::tick) once per rendered frame and feed player
/// input through the toggle methods. Each tick runs, in order: clock, power,
/// door animation, AI, then the caught check.
pub struct GameStateMachine<R: Rng = StdRng> {
    config: SimConfig,
    state: GameState,
    /// ECS world holding actor and door entities
    world: World,
    clock: NightClock,
    scheduler: AiScheduler,
    rng: R,
    /// Clock waits for the first tick after construction or restart
    clock_anchor_pending: bool,
    /// Wall-clock time of the previous frame
    last_frame_ms: Option<u64>,
    /// Jumpscare raised during the most recent tick
    jumpscare: Option<JumpscareEvent>,
}

fn rng_for(config: &SimConfig) -> StdRng {
    match config.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    }
}

impl GameStateMachine<StdRng> {
    /// Create a simulation seeded from `config.seed`, or from OS entropy
    /// when no seed is set.
    ///
    /// An invalid config is replaced by the default tuning (keeping the
    /// seed). Use [`try_new`](Self::try_new) to reject it instead.
    pub fn new(config: SimConfig) -> Self {
        let rng = rng_for(&config);
        Self::with_rng(config, rng)
    }

    /// Like [`new`](Self::new), but fails on an invalid config.
    pub fn try_new(config: SimConfig) -> Result<Self, ConfigError> {
        let rng = rng_for(&config);
        Self::try_with_rng(config, rng)
    }
}

impl Default for GameStateMachine<StdRng> {
    fn default() -> Self {
        Self::new(SimConfig::default())
    }
}

impl<R: Rng> GameStateMachine<R> {
    /// Create a simulation drawing from the given RNG. An invalid config
    /// falls back to the default tuning, keeping the seed.
    pub fn with_rng(config: SimConfig, rng: R) -> Self {
        let config = match config.validate() {
            Ok(()) => config,
            Err(e) => {
                log::warn!("{}, using default tuning", e);
                SimConfig {
                    seed: config.seed,
                    ..SimConfig::default()
                }
            }
        };
        Self::build(config, rng)
    }

    /// Create a simulation drawing from the given RNG, rejecting an invalid
    /// config.
    pub fn try_with_rng(config: SimConfig, rng: R) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::build(config, rng))
    }

    fn build(config: SimConfig, rng: R) -> Self {
        let mut world = World::new();
        spawn_actors(&mut world);
        spawn_doors(&mut world, config.door_speed);

        log::info!(
            "Night engine ready: night length {}s, cadence {:?}",
            config.night_duration_seconds,
            config.cadence
        );

        Self {
            state: GameState::new(config.initial_power),
            clock: NightClock::with_duration(0, config.night_duration_seconds),
            scheduler: AiScheduler::new(config.cadence),
            config,
            world,
            rng,
            clock_anchor_pending: true,
            last_frame_ms: None,
            jumpscare: None,
        }
    }

    /// Run one frame at wall-clock time `now_ms`.
    ///
    /// The frame delta is measured from the previous call; the first frame
    /// after construction or restart uses `config.first_frame_dt_ms`.
    pub fn tick(&mut self, now_ms: u64) -> Vec<GameEvent> {
        let dt_ms = match self.last_frame_ms {
            Some(previous) => now_ms.saturating_sub(previous) as f64,
            None => self.config.first_frame_dt_ms,
        };
        self.last_frame_ms = Some(now_ms);
        self.update(now_ms, dt_ms)
    }

    /// Advance the simulation by one step of `dt_ms`, ending at `now_ms`.
    pub fn update(&mut self, now_ms: u64, dt_ms: f64) -> Vec<GameEvent> {
        self.jumpscare = None;
        if self.state.game_over {
            return Vec::new();
        }

        if self.clock_anchor_pending {
            self.clock.restart(now_ms);
            self.clock_anchor_pending = false;
        }

        let mut events = Vec::new();

        // Clock
        let elapsed = self.clock.tick(now_ms).max(self.state.elapsed_seconds);
        self.state.elapsed_seconds = elapsed;
        if self.clock.is_night_over(elapsed) {
            let survived = self.state.night;
            log::info!("Survived night {}", survived);
            events.push(GameEvent::NightSurvived { night: survived });
            self.state.night = self.state.night.saturating_add(1);
            self.begin_night(now_ms);
            return events;
        }

        // Power
        let units = power::usage_units(&self.state.device_load());
        self.state.power = power::drain(self.state.power, units, dt_ms);
        if power::is_depleted(self.state.power) {
            events.push(self.end_game(JumpscareCause::PowerOut));
            return events;
        }

        // Doors
        door_animation_system(&mut self.world);

        // AI
        let rolls = self.scheduler.step(dt_ms);
        for _ in 0..rolls {
            let ctx = RollContext {
                night: self.state.night,
                camera_up: self.state.camera_up(),
                ai_chance_curve: &self.config.ai_chance_curve,
                foxy_chance: self.config.foxy_chance,
            };
            events.extend(ai_system(&mut self.world, &mut self.rng, &ctx));
        }

        // Caught check, against this tick's positions
        let intruder = actor_positions(&self.world)
            .into_iter()
            .find(|&(kind, position)| {
                reaches_player(kind, position, self.state.door_closed(kind.guarded_by()))
            });
        if let Some((kind, _)) = intruder {
            events.push(self.end_game(JumpscareCause::Caught(kind)));
        }

        events
    }

    /// Reset per-night state after surviving a night
    fn begin_night(&mut self, now_ms: u64) {
        reset_actors(&mut self.world);
        self.state.power = self.config.initial_power;
        self.state.elapsed_seconds = 0.0;
        self.clock.restart(now_ms);
    }

    fn end_game(&mut self, cause: JumpscareCause) -> GameEvent {
        let event = JumpscareEvent {
            cause,
            night: self.state.night,
        };
        log::info!(
            "Jumpscare on night {} at {}: {:?}",
            self.state.night,
            display_time(self.state.elapsed_seconds),
            cause
        );
        self.state.game_over = true;
        self.jumpscare = Some(event);
        GameEvent::Jumpscare(event)
    }

    /// Start over from night 1 with everything reinitialized.
    pub fn restart(&mut self) {
        self.state = GameState::new(self.config.initial_power);
        reset_actors(&mut self.world);
        reset_doors(&mut self.world, self.config.door_speed);
        self.scheduler.reset();
        self.clock_anchor_pending = true;
        self.last_frame_ms = None;
        self.jumpscare = None;
        log::info!("Game restarted");
    }

    // ── Player input ────────────────────────────────────────────────────

    pub fn toggle_left_light(&mut self) {
        if !self.state.game_over {
            self.state.left_light = !self.state.left_light;
        }
    }

    pub fn toggle_right_light(&mut self) {
        if !self.state.game_over {
            self.state.right_light = !self.state.right_light;
        }
    }

    pub fn toggle_left_door(&mut self) {
        self.toggle_door(DoorSide::Left);
    }

    pub fn toggle_right_door(&mut self) {
        self.toggle_door(DoorSide::Right);
    }

    /// Flip a door. The logical state changes now; the animation follows.
    pub fn toggle_door(&mut self, side: DoorSide) {
        if self.state.game_over {
            return;
        }
        let closed = match side {
            DoorSide::Left => {
                self.state.left_door = !self.state.left_door;
                self.state.left_door
            }
            DoorSide::Right => {
                self.state.right_door = !self.state.right_door;
                self.state.right_door
            }
        };
        set_door_target(&mut self.world, side, closed);
        log::debug!(
            "{} door {}",
            side.name(),
            if closed { "closed" } else { "opened" }
        );
    }

    /// Raise or lower the camera monitor. The selected feed is kept.
    pub fn toggle_camera_view(&mut self) {
        if self.state.game_over {
            return;
        }
        self.state.view_mode = match self.state.view_mode {
            ViewMode::Office => ViewMode::Camera,
            ViewMode::Camera => ViewMode::Office,
        };
    }

    /// Lower the monitor if it is up
    pub fn close_camera(&mut self) {
        if !self.state.game_over && self.state.view_mode == ViewMode::Camera {
            self.state.view_mode = ViewMode::Office;
        }
    }

    /// Switch feeds. Ignored unless the monitor is up and `camera` is 1..=9.
    /// Returns whether the selection was applied.
    pub fn select_camera(&mut self, camera: u8) -> bool {
        if self.state.game_over || !self.state.camera_up() || !is_valid_camera(camera) {
            return false;
        }
        self.state.current_camera = camera;
        log::debug!("Camera {} selected", camera);
        true
    }

    // ── Read access ─────────────────────────────────────────────────────

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    pub fn is_game_over(&self) -> bool {
        self.state.game_over
    }

    /// Simulation steps since the last restart
    pub fn ai_ticks(&self) -> u64 {
        self.scheduler.ticks()
    }

    pub fn actor_positions(&self) -> Vec<(ActorKind, u8)> {
        actor_positions(&self.world)
    }

    pub fn actor_position(&self, kind: ActorKind) -> u8 {
        self.actor_positions()
            .into_iter()
            .find(|(k, _)| *k == kind)
            .map(|(_, position)| position)
            .unwrap_or(0)
    }

    pub fn door_positions(&self) -> Vec<(DoorSide, f32)> {
        door_positions(&self.world)
    }

    /// Jumpscare raised by the most recent tick, if any
    pub fn jumpscare(&self) -> Option<&JumpscareEvent> {
        self.jumpscare.as_ref()
    }

    /// Build the render snapshot for the current frame
    pub fn snapshot(&self) -> RenderSnapshot {
        let positions = self.actor_positions();

        let actors = positions
            .iter()
            .map(|&(kind, position)| ActorSnapshot {
                kind,
                position,
                station: kind.station_name(position).unwrap_or_default().to_string(),
            })
            .collect();

        let doors = self
            .door_positions()
            .into_iter()
            .map(|(side, animation_position)| DoorSnapshot {
                side,
                closed: self.state.door_closed(side),
                animation_position,
            })
            .collect();

        let visible_actors = if self.state.camera_up() {
            visible_on_camera(self.state.current_camera, &positions)
        } else {
            Vec::new()
        };

        let warning_for = |side: DoorSide| {
            positions
                .iter()
                .filter(|(kind, _)| kind.guarded_by() == side)
                .map(|&(kind, position)| hall_warning_level(kind, position))
                .fold(0.0_f32, f32::max)
        };

        RenderSnapshot {
            power: self.state.power,
            display_time: display_time(self.state.elapsed_seconds),
            elapsed_seconds: self.state.elapsed_seconds,
            night: self.state.night,
            view_mode: self.state.view_mode,
            current_camera: self.state.current_camera,
            camera_name: camera_name(self.state.current_camera)
                .unwrap_or("UNKNOWN")
                .to_string(),
            visible_actors,
            left_light: self.state.left_light,
            right_light: self.state.right_light,
            left_door: self.state.left_door,
            right_door: self.state.right_door,
            usage_units: power::usage_units(&self.state.device_load()),
            actors,
            doors,
            left_warning: warning_for(DoorSide::Left),
            right_warning: warning_for(DoorSide::Right),
            game_over: self.state.game_over,
            jumpscare: self.jumpscare,
        }
    }

    // ── Test and harness hooks ──────────────────────────────────────────

    /// Overwrite the battery level, clamped to [0, 100]
    pub fn set_power(&mut self, power: f64) {
        self.state.power = power.clamp(0.0, 100.0);
    }

    /// Jump to a later night without replaying the earlier ones
    pub fn set_night(&mut self, night: u32) {
        self.state.night = night.max(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::mock::StepRng;

    fn engine() -> GameStateMachine {
        GameStateMachine::new(SimConfig::seeded(42))
    }

    #[test]
    fn test_initial_state() {
        let sim = engine();
        let state = sim.state();
        assert_eq!(state.power, 100.0);
        assert_eq!(state.night, 1);
        assert_eq!(state.view_mode, ViewMode::Office);
        assert_eq!(state.current_camera, 1);
        assert!(!state.game_over);
        for (_, position) in sim.actor_positions() {
            assert_eq!(position, 0);
        }
    }

    #[test]
    fn test_light_toggles() {
        let mut sim = engine();
        sim.toggle_left_light();
        sim.toggle_right_light();
        assert!(sim.state().left_light);
        assert!(sim.state().right_light);
        sim.toggle_left_light();
        assert!(!sim.state().left_light);
    }

    #[test]
    fn test_door_flips_instantly_and_animates() {
        let mut sim = engine();
        sim.toggle_left_door();
        assert!(sim.state().left_door);
        assert_eq!(sim.door_positions()[0], (DoorSide::Left, 0.0));

        sim.tick(0);
        let (side, position) = sim.door_positions()[0];
        assert_eq!(side, DoorSide::Left);
        assert!(position > 0.0);
    }

    #[test]
    fn test_select_camera_requires_monitor() {
        let mut sim = engine();
        assert!(!sim.select_camera(4));
        assert_eq!(sim.state().current_camera, 1);

        sim.toggle_camera_view();
        assert!(sim.select_camera(4));
        assert_eq!(sim.state().current_camera, 4);
        assert!(!sim.select_camera(0));
        assert!(!sim.select_camera(10));
        assert_eq!(sim.state().current_camera, 4);
    }

    #[test]
    fn test_camera_kept_across_toggles() {
        let mut sim = engine();
        sim.toggle_camera_view();
        sim.select_camera(7);
        sim.close_camera();
        assert_eq!(sim.state().view_mode, ViewMode::Office);
        sim.toggle_camera_view();
        assert_eq!(sim.state().current_camera, 7);
    }

    #[test]
    fn test_close_camera_in_office_is_noop() {
        let mut sim = engine();
        sim.close_camera();
        assert_eq!(sim.state().view_mode, ViewMode::Office);
    }

    #[test]
    fn test_clock_anchors_on_first_tick() {
        let mut sim = engine();
        sim.tick(1_000_000);
        assert_eq!(sim.state().elapsed_seconds, 0.0);
        sim.tick(1_030_000);
        assert!((sim.state().elapsed_seconds - 30.0).abs() < 1e-9);
    }

    #[test]
    fn test_input_ignored_after_game_over() {
        let mut sim = engine();
        sim.set_power(0.0);
        sim.tick(0);
        assert!(sim.is_game_over());

        let before = sim.state().clone();
        sim.toggle_left_light();
        sim.toggle_right_door();
        sim.toggle_camera_view();
        sim.select_camera(3);
        assert_eq!(sim.state(), &before);
    }

    #[test]
    fn test_caught_through_open_door() {
        let config = SimConfig {
            seed: Some(1),
            ..SimConfig::default()
        };
        let mut sim = GameStateMachine::with_rng(config, StepRng::new(0, 0));
        sim.set_night(5);
        sim.toggle_right_door();
        sim.toggle_camera_view();

        let mut caught = None;
        for frame in 0..10_000u64 {
            let events = sim.update(frame * 16, 16.0);
            if let Some(event) = events.iter().find_map(GameEvent::jumpscare) {
                caught = Some(*event);
                break;
            }
        }

        // Bonnie reaches the left window on the 4th roll with the left door open
        let event = caught.expect("jumpscare");
        assert_eq!(event.cause, JumpscareCause::Caught(ActorKind::Bonnie));
        assert_eq!(sim.ai_ticks(), 4000);
        assert_eq!(sim.actor_position(ActorKind::Chica), 4);
    }

    #[test]
    fn test_closed_doors_hold_everyone_off() {
        let mut sim = GameStateMachine::with_rng(SimConfig::default(), StepRng::new(0, 0));
        sim.set_night(5);
        sim.toggle_left_door();
        sim.toggle_right_door();

        for frame in 0..6000u64 {
            sim.update(frame * 16, 16.0);
        }
        assert!(!sim.is_game_over());
        assert_eq!(sim.actor_position(ActorKind::Bonnie), 4);
        assert_eq!(sim.actor_position(ActorKind::Chica), 4);
        assert_eq!(sim.actor_position(ActorKind::Foxy), 2);
    }

    #[test]
    fn test_opening_door_on_waiting_actor_is_fatal() {
        let mut sim = GameStateMachine::with_rng(SimConfig::default(), StepRng::new(0, 0));
        sim.set_night(5);
        sim.toggle_left_door();
        sim.toggle_right_door();
        for frame in 0..4000u64 {
            sim.update(frame * 16, 16.0);
        }
        assert!(!sim.is_game_over());

        sim.toggle_right_door();
        let events = sim.update(4000 * 16, 16.0);
        let event = events.iter().find_map(GameEvent::jumpscare).expect("jumpscare");
        assert_eq!(event.cause, JumpscareCause::Caught(ActorKind::Chica));
    }

    #[test]
    fn test_snapshot_reports_visible_actors() {
        let mut sim = engine();
        let office = sim.snapshot();
        assert!(office.visible_actors.is_empty());
        assert_eq!(office.camera_name, "SHOW STAGE");
        assert_eq!(office.usage_units, 1);

        sim.toggle_camera_view();
        let stage = sim.snapshot();
        assert_eq!(
            stage.visible_actors,
            vec![ActorKind::Bonnie, ActorKind::Chica]
        );
        assert_eq!(stage.usage_units, 2);
        assert_eq!(
            stage.actor(ActorKind::Foxy).map(|a| a.station.as_str()),
            Some("Cove Closed")
        );
    }

    #[test]
    fn test_snapshot_warning_levels() {
        let mut sim = GameStateMachine::with_rng(SimConfig::default(), StepRng::new(0, 0));
        sim.set_night(5);
        sim.toggle_left_door();
        sim.toggle_right_door();
        for frame in 0..3000u64 {
            sim.update(frame * 16, 16.0);
        }
        let snapshot = sim.snapshot();
        assert_eq!(snapshot.left_warning, 0.3);
        assert_eq!(snapshot.right_warning, 0.3);
        assert_eq!(
            snapshot.door(DoorSide::Left).map(|d| d.animation_position),
            Some(1.0)
        );
    }

    #[test]
    fn test_try_new_rejects_invalid_config() {
        let overcharged = SimConfig {
            initial_power: 150.0,
            ..SimConfig::seeded(1)
        };
        let err = GameStateMachine::try_new(overcharged).err().expect("rejected");
        assert!(matches!(
            err,
            ConfigError::Invalid {
                field: "initial_power",
                ..
            }
        ));

        let endless = SimConfig {
            night_duration_seconds: 0.0,
            ..SimConfig::seeded(1)
        };
        assert!(GameStateMachine::try_new(endless).is_err());
        assert!(GameStateMachine::try_new(SimConfig::seeded(1)).is_ok());
    }

    #[test]
    fn test_overcharged_config_falls_back_to_full_battery() {
        let mut sim = GameStateMachine::new(SimConfig {
            initial_power: 150.0,
            ..SimConfig::seeded(2)
        });
        assert_eq!(sim.state().power, 100.0);
        assert_eq!(sim.config().seed, Some(2));

        for frame in 0..100u64 {
            sim.tick(frame * 16);
            assert!(sim.state().power <= 100.0);
        }
    }

    #[test]
    fn test_non_positive_night_length_falls_back() {
        let config = SimConfig {
            night_duration_seconds: -1.0,
            ai_chance_curve: vec![0.0],
            foxy_chance: 0.0,
            ..SimConfig::default()
        };
        let mut sim = GameStateMachine::with_rng(config, StepRng::new(0, 0));

        let mut survived = 0;
        for frame in 0..1000u64 {
            survived += sim
                .tick(frame * 16)
                .iter()
                .filter(|e| matches!(e, GameEvent::NightSurvived { .. }))
                .count();
        }
        assert_eq!(survived, 0);
        assert_eq!(sim.state().night, 1);
    }

    #[test]
    fn test_night_counter_saturates() {
        let config = SimConfig {
            ai_chance_curve: vec![0.0],
            foxy_chance: 0.0,
            ..SimConfig::seeded(3)
        };
        let mut sim = GameStateMachine::new(config);
        sim.set_night(u32::MAX);
        sim.tick(0);
        let events = sim.tick(360_000);
        assert_eq!(events, vec![GameEvent::NightSurvived { night: u32::MAX }]);
        assert_eq!(sim.state().night, u32::MAX);
    }

    #[test]
    fn test_snapshot_serializes() {
        let sim = engine();
        let json = sim.snapshot().to_json().expect("json");
        assert!(json.contains("\"night\": 1"));
    }
}
