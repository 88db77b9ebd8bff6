//! Render snapshot - an owned, read-only copy of everything the renderer
//! draws in one frame.
//!
//! The snapshot shares nothing with the engine, so it can be handed to a
//! render thread while the next tick runs.

use nightguard_logic::actors::ActorKind;
use nightguard_logic::clock::DisplayTime;
use nightguard_logic::doors::DoorSide;
use serde::{Deserialize, Serialize};

use crate::events::JumpscareEvent;
use crate::state::ViewMode;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActorSnapshot {
    pub kind: ActorKind,
    pub position: u8,
    pub station: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DoorSnapshot {
    pub side: DoorSide,
    /// Logical state, flips instantly on input
    pub closed: bool,
    /// Animation progress, 0.0 open to 1.0 closed
    pub animation_position: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenderSnapshot {
    pub power: f64,
    pub display_time: DisplayTime,
    pub elapsed_seconds: f64,
    pub night: u32,
    pub view_mode: ViewMode,
    pub current_camera: u8,
    pub camera_name: String,
    /// Actors standing in front of the current feed (empty in the office)
    pub visible_actors: Vec<ActorKind>,
    pub left_light: bool,
    pub right_light: bool,
    pub left_door: bool,
    pub right_door: bool,
    pub usage_units: u8,
    pub actors: Vec<ActorSnapshot>,
    pub doors: Vec<DoorSnapshot>,
    /// Hall window warning strength per side
    pub left_warning: f32,
    pub right_warning: f32,
    pub game_over: bool,
    /// Set only on the frame the game ended
    pub jumpscare: Option<JumpscareEvent>,
}

impl RenderSnapshot {
    pub fn actor(&self, kind: ActorKind) -> Option<&ActorSnapshot> {
        self.actors.iter().find(|a| a.kind == kind)
    }

    pub fn door(&self, side: DoorSide) -> Option<&DoorSnapshot> {
        self.doors.iter().find(|d| d.side == side)
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}
