//! Authoritative game state for one simulation.

use nightguard_logic::doors::DoorSide;
use nightguard_logic::power::DeviceLoad;
use serde::{Deserialize, Serialize};

/// Where the player is looking
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ViewMode {
    #[default]
    Office,
    Camera,
}

/// Player-facing state of the night. Owned and mutated only by the engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameState {
    /// Battery level [0, 100]
    pub power: f64,
    /// Seconds into the current night, never past the night length
    pub elapsed_seconds: f64,
    /// Current night, starting at 1
    pub night: u32,
    pub view_mode: ViewMode,
    /// Selected camera feed, 1..=9. Kept while the monitor is down.
    pub current_camera: u8,
    pub left_light: bool,
    pub right_light: bool,
    /// true = closed
    pub left_door: bool,
    pub right_door: bool,
    pub game_over: bool,
}

impl GameState {
    pub fn new(initial_power: f64) -> Self {
        Self {
            power: initial_power,
            elapsed_seconds: 0.0,
            night: 1,
            view_mode: ViewMode::Office,
            current_camera: 1,
            left_light: false,
            right_light: false,
            left_door: false,
            right_door: false,
            game_over: false,
        }
    }

    pub fn camera_up(&self) -> bool {
        self.view_mode == ViewMode::Camera
    }

    pub fn door_closed(&self, side: DoorSide) -> bool {
        match side {
            DoorSide::Left => self.left_door,
            DoorSide::Right => self.right_door,
        }
    }

    pub fn device_load(&self) -> DeviceLoad {
        DeviceLoad {
            left_light: self.left_light,
            right_light: self.right_light,
            left_door: self.left_door,
            right_door: self.right_door,
            camera_up: self.camera_up(),
        }
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::new(nightguard_logic::constants::INITIAL_POWER)
    }
}
