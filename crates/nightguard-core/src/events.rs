//! Events emitted by the engine each tick, for the renderer and harnesses.

use nightguard_logic::actors::ActorKind;
use serde::{Deserialize, Serialize};

/// Why the night ended badly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum JumpscareCause {
    /// The battery ran dry.
    PowerOut,
    /// An actor got into the office through an open door.
    Caught(ActorKind),
}

impl std::fmt::Display for JumpscareCause {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            JumpscareCause::PowerOut => write!(f, "POWER OUT!"),
            JumpscareCause::Caught(kind) => write!(f, "{}!", kind.name().to_uppercase()),
        }
    }
}

/// The terminal transition. Emitted exactly once per game over.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct JumpscareEvent {
    pub cause: JumpscareCause,
    /// Night during which the player was caught.
    pub night: u32,
}

/// Something that happened during a tick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    /// The player made it to 6 AM; `night` is the night just completed.
    NightSurvived { night: u32 },
    /// An actor stepped to a new station.
    ActorAdvanced { kind: ActorKind, position: u8 },
    Jumpscare(JumpscareEvent),
}

impl GameEvent {
    pub fn jumpscare(&self) -> Option<&JumpscareEvent> {
        match self {
            GameEvent::Jumpscare(event) => Some(event),
            _ => None,
        }
    }
}
