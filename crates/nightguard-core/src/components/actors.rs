//! Actor components: who the actor is and where it stands on its path.

use nightguard_logic::actors::ActorKind;
use serde::{Deserialize, Serialize};

/// Marks an entity as one of the hidden actors
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Actor {
    pub kind: ActorKind,
}

/// Index of the actor's current station along its path
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Station {
    pub position: u8,
}

impl Station {
    /// Step one station closer, unless already at `max_position`.
    /// Returns true if the actor moved.
    pub fn advance(&mut self, max_position: u8) -> bool {
        if self.position < max_position {
            self.position += 1;
            true
        } else {
            false
        }
    }

    pub fn reset(&mut self) {
        self.position = 0;
    }
}
