//! Power model - device load and battery drain.
//!
//! Drain is linear in both load and elapsed wall-clock time, never in frame
//! count, so the same interval drains the same amount at any frame rate.

use serde::{Deserialize, Serialize};

use crate::constants::DRAIN_PER_UNIT_PER_SECOND;

/// Devices that draw power, as seen from the office.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeviceLoad {
    pub left_light: bool,
    pub right_light: bool,
    pub left_door: bool,
    pub right_door: bool,
    pub camera_up: bool,
}

/// Minimum load: the office itself always draws one unit.
pub const BASE_USAGE: u8 = 1;

/// Maximum load: both lights, both doors and the camera monitor.
pub const MAX_USAGE: u8 = 7;

/// Usage units for the current device state. Range `[1, 7]`.
///
/// Lights and the camera cost one unit each, a closed door costs two.
pub fn usage_units(load: &DeviceLoad) -> u8 {
    let mut units = BASE_USAGE;
    if load.left_light {
        units += 1;
    }
    if load.right_light {
        units += 1;
    }
    if load.left_door {
        units += 2;
    }
    if load.right_door {
        units += 2;
    }
    if load.camera_up {
        units += 1;
    }
    units
}

/// Power remaining after `dt_ms` of drain at `usage_units`, floored at zero.
pub fn drain(power: f64, usage_units: u8, dt_ms: f64) -> f64 {
    let drain_per_second = usage_units as f64 * DRAIN_PER_UNIT_PER_SECOND;
    let drained = drain_per_second * (dt_ms.max(0.0) / 1000.0) * 100.0;
    (power - drained).max(0.0)
}

/// Whether the battery is empty.
pub fn is_depleted(power: f64) -> bool {
    power <= 0.0
}
