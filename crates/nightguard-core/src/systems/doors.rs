//! Door animation system - trails the logical door state visually

use hecs::World;
use nightguard_logic::doors::DoorSide;

use crate::components::{Door, DoorAnimation};

/// Spawn both office doors, open and at rest
pub fn spawn_doors(world: &mut World, speed: f32) {
    for side in DoorSide::ALL {
        world.spawn((Door { side }, DoorAnimation::with_speed(speed)));
    }
}

/// Step every animating door one frame
pub fn door_animation_system(world: &mut World) {
    for (_, animation) in world.query_mut::<&mut DoorAnimation>() {
        animation.step();
    }
}

/// Point the door on `side` at its new resting state
pub fn set_door_target(world: &mut World, side: DoorSide, closed: bool) {
    for (_, (door, animation)) in world.query_mut::<(&Door, &mut DoorAnimation)>() {
        if door.side == side {
            animation.set_target(closed);
        }
    }
}

/// Put every door back at rest, fully open
pub fn reset_doors(world: &mut World, speed: f32) {
    for (_, animation) in world.query_mut::<&mut DoorAnimation>() {
        *animation = DoorAnimation::with_speed(speed);
    }
}

/// Animation progress per door, left first
pub fn door_positions(world: &World) -> Vec<(DoorSide, f32)> {
    let mut doors: Vec<(DoorSide, f32)> = world
        .query::<(&Door, &DoorAnimation)>()
        .iter()
        .map(|(_, (door, animation))| (door.side, animation.position))
        .collect();
    doors.sort_by_key(|(side, _)| *side);
    doors
}
