//! AI system - rolls actors forward along their approach paths
//!
//! Actors never move on their own schedule. The engine asks the
//! [`AiScheduler`] how many rolls are due each step and runs [`ai_system`]
//! once per roll. A roll draws for Bonnie, then Chica (against the night's
//! difficulty), then Foxy (fixed low chance, frozen while the cameras are
//! up, in which case no draw happens at all).

use hecs::{Entity, World};
use nightguard_logic::actors::ActorKind;
use nightguard_logic::difficulty::{
    ai_chance_from_curve, foxy_should_advance, roll_due, should_advance,
};
use rand::Rng;

use crate::components::{Actor, Station};
use crate::config::AiCadence;
use crate::events::GameEvent;

/// Counts simulation steps and decides when the AI rolls
#[derive(Debug, Clone, PartialEq)]
pub struct AiScheduler {
    cadence: AiCadence,
    /// Steps since the last restart
    ticks: u64,
    /// Wall-clock time not yet spent on a roll (wall-clock cadence only)
    pending_ms: f64,
}

impl AiScheduler {
    pub fn new(cadence: AiCadence) -> Self {
        Self {
            cadence,
            ticks: 0,
            pending_ms: 0.0,
        }
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    /// Count one simulation step of `dt_ms` and return how many rolls it
    /// triggers.
    pub fn step(&mut self, dt_ms: f64) -> u32 {
        self.ticks += 1;
        match self.cadence {
            AiCadence::PerFrame { ticks_per_ai_roll } => {
                u32::from(roll_due(self.ticks, ticks_per_ai_roll))
            }
            AiCadence::WallClock { roll_interval_ms } => {
                if roll_interval_ms <= 0.0 {
                    return 0;
                }
                self.pending_ms += dt_ms.max(0.0);
                let rolls = (self.pending_ms / roll_interval_ms).floor();
                self.pending_ms -= rolls * roll_interval_ms;
                rolls as u32
            }
        }
    }

    pub fn reset(&mut self) {
        self.ticks = 0;
        self.pending_ms = 0.0;
    }
}

/// Inputs for one AI roll
#[derive(Debug, Clone, Copy)]
pub struct RollContext<'a> {
    pub night: u32,
    pub camera_up: bool,
    pub ai_chance_curve: &'a [f64],
    pub foxy_chance: f64,
}

/// Spawn the three actors at their starting stations
pub fn spawn_actors(world: &mut World) -> Vec<Entity> {
    ActorKind::ALL
        .iter()
        .map(|&kind| world.spawn((Actor { kind }, Station::default())))
        .collect()
}

/// Run one AI roll over every actor, in roll order.
///
/// Returns an `ActorAdvanced` event for each actor that moved.
pub fn ai_system<R: Rng + ?Sized>(
    world: &mut World,
    rng: &mut R,
    ctx: &RollContext<'_>,
) -> Vec<GameEvent> {
    let chance = ai_chance_from_curve(ctx.ai_chance_curve, ctx.night);

    let mut actors: Vec<(Entity, ActorKind)> = world
        .query::<&Actor>()
        .iter()
        .map(|(entity, actor)| (entity, actor.kind))
        .collect();
    actors.sort_by_key(|(_, kind)| *kind);

    let mut events = Vec::new();
    for (entity, kind) in actors {
        let Ok(mut station) = world.get::<&mut Station>(entity) else {
            continue;
        };
        let max_position = kind.max_position();

        let advance = if kind.uses_difficulty_curve() {
            let roll: f64 = rng.gen();
            should_advance(roll, chance, station.position, max_position)
        } else if ctx.camera_up {
            false
        } else {
            let roll: f64 = rng.gen();
            foxy_should_advance(
                roll,
                ctx.foxy_chance,
                ctx.camera_up,
                station.position,
                max_position,
            )
        };

        if advance && station.advance(max_position) {
            log::debug!("{} moved to {}", kind.name(), station.position);
            events.push(GameEvent::ActorAdvanced {
                kind,
                position: station.position,
            });
        }
    }

    events
}

/// Send every actor back to its starting station
pub fn reset_actors(world: &mut World) {
    for (_, station) in world.query_mut::<&mut Station>() {
        station.reset();
    }
}

/// Current position of every actor, in roll order
pub fn actor_positions(world: &World) -> Vec<(ActorKind, u8)> {
    let mut positions: Vec<(ActorKind, u8)> = world
        .query::<(&Actor, &Station)>()
        .iter()
        .map(|(_, (actor, station))| (actor.kind, station.position))
        .collect();
    positions.sort_by_key(|(kind, _)| *kind);
    positions
}
