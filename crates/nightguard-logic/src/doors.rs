//! Office doors - sides and the cosmetic slam/raise animation.
//!
//! The logical door state (closed or not) flips instantly on input and lives
//! in the engine. `DoorAnimation` only trails it visually: a door slams shut
//! at full speed and rises again at half speed.

use serde::{Deserialize, Serialize};

use crate::constants::DOOR_SPEED;

/// Which office door.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum DoorSide {
    Left,
    Right,
}

impl DoorSide {
    pub const ALL: [DoorSide; 2] = [DoorSide::Left, DoorSide::Right];

    pub fn name(self) -> &'static str {
        match self {
            DoorSide::Left => "left",
            DoorSide::Right => "right",
        }
    }
}

/// Visual animation state of one door.
///
/// `position` 0.0 is fully open (door up), 1.0 fully closed.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DoorAnimation {
    pub is_animating: bool,
    pub position: f32,
    pub target_position: f32,
    /// Closing distance per step; opening uses half.
    pub speed: f32,
}

impl Default for DoorAnimation {
    fn default() -> Self {
        Self::with_speed(DOOR_SPEED)
    }
}

impl DoorAnimation {
    pub fn with_speed(speed: f32) -> Self {
        Self {
            is_animating: false,
            position: 0.0,
            target_position: 0.0,
            speed,
        }
    }

    pub fn set_target(&mut self, closed: bool) {
        self.target_position = if closed { 1.0 } else { 0.0 };
        self.is_animating = true;
    }

    /// Advance one frame toward the target.
    pub fn step(&mut self) {
        if !self.is_animating {
            return;
        }
        if self.target_position >= 1.0 {
            self.position = (self.position + self.speed).min(1.0);
            if self.position >= 1.0 {
                self.position = 1.0;
                self.is_animating = false;
            }
        } else {
            self.position = (self.position - self.speed * 0.5).max(0.0);
            if self.position <= 0.0 {
                self.position = 0.0;
                self.is_animating = false;
            }
        }
    }

    pub fn is_fully_closed(&self) -> bool {
        self.position >= 1.0
    }
}
