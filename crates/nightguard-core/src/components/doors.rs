//! Door components.

use nightguard_logic::doors::DoorSide;
use serde::{Deserialize, Serialize};

pub use nightguard_logic::doors::DoorAnimation;

/// Marks an entity as one of the office doors
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Door {
    pub side: DoorSide,
}
