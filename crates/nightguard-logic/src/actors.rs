//! Actors and their approach paths toward the office.
//!
//! Each actor walks a fixed list of stations. Index 0 is where it starts the
//! night; the last index is the station from which it reaches the player.

use serde::{Deserialize, Serialize};

use crate::doors::DoorSide;

/// One of the hidden antagonists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ActorKind {
    Bonnie,
    Chica,
    Foxy,
}

const BONNIE_PATH: [&str; 5] = [
    "Show Stage",
    "Backstage",
    "West Hall",
    "West Hall Corner",
    "Left Window",
];

const CHICA_PATH: [&str; 5] = [
    "Show Stage",
    "Dining Area",
    "East Hall",
    "East Hall Corner",
    "Right Door",
];

const FOXY_PATH: [&str; 3] = ["Cove Closed", "Cove Peek", "Cove Open"];

impl ActorKind {
    /// Roll order. Bonnie and Chica draw before Foxy on every roll.
    pub const ALL: [ActorKind; 3] = [ActorKind::Bonnie, ActorKind::Chica, ActorKind::Foxy];

    pub fn name(self) -> &'static str {
        match self {
            ActorKind::Bonnie => "Bonnie",
            ActorKind::Chica => "Chica",
            ActorKind::Foxy => "Foxy",
        }
    }

    pub fn path(self) -> &'static [&'static str] {
        match self {
            ActorKind::Bonnie => &BONNIE_PATH,
            ActorKind::Chica => &CHICA_PATH,
            ActorKind::Foxy => &FOXY_PATH,
        }
    }

    /// Index of the terminal station.
    pub fn max_position(self) -> u8 {
        (self.path().len() - 1) as u8
    }

    /// Station name at `position`, or `None` past the end of the path.
    pub fn station_name(self, position: u8) -> Option<&'static str> {
        self.path().get(position as usize).copied()
    }

    /// Whether the actor follows the night difficulty curve.
    /// Foxy instead uses a fixed chance and punishes camera neglect.
    pub fn uses_difficulty_curve(self) -> bool {
        !matches!(self, ActorKind::Foxy)
    }

    /// The door that keeps this actor out of the office.
    pub fn guarded_by(self) -> DoorSide {
        match self {
            ActorKind::Bonnie | ActorKind::Foxy => DoorSide::Left,
            ActorKind::Chica => DoorSide::Right,
        }
    }

    pub fn is_at_terminal(self, position: u8) -> bool {
        position >= self.max_position()
    }
}

/// Whether an actor at `position` gets into the office through an open door.
pub fn reaches_player(kind: ActorKind, position: u8, door_closed: bool) -> bool {
    kind.is_at_terminal(position) && !door_closed
}

/// Warning overlay strength for a hall window, from the actor on that side.
///
/// Only the hall walkers (Bonnie left, Chica right) light the window warning:
/// 0.3 at the corner, 0.6 at the window or door.
pub fn hall_warning_level(kind: ActorKind, position: u8) -> f32 {
    if !kind.uses_difficulty_curve() {
        return 0.0;
    }
    match position {
        3 => 0.3,
        p if p >= 4 => 0.6,
        _ => 0.0,
    }
}
