//! Camera feeds - ids, names, and which stations each feed shows.
//!
//! Scene composition belongs to the renderer. The core only needs to know a
//! feed's name and which actors stand in front of it.

use crate::actors::ActorKind;
use crate::constants::CAMERA_COUNT;

const CAMERA_NAMES: [&str; CAMERA_COUNT as usize] = [
    "SHOW STAGE",
    "DINING AREA",
    "PIRATE COVE",
    "WEST HALL",
    "WEST HALL CORNER",
    "SUPPLY CLOSET",
    "EAST HALL",
    "EAST HALL CORNER",
    "BACKSTAGE",
];

pub const SHOW_STAGE: u8 = 1;
pub const DINING_AREA: u8 = 2;
pub const PIRATE_COVE: u8 = 3;
pub const WEST_HALL: u8 = 4;
pub const WEST_HALL_CORNER: u8 = 5;
pub const SUPPLY_CLOSET: u8 = 6;
pub const EAST_HALL: u8 = 7;
pub const EAST_HALL_CORNER: u8 = 8;
pub const BACKSTAGE: u8 = 9;

pub fn is_valid_camera(camera: u8) -> bool {
    (1..=CAMERA_COUNT).contains(&camera)
}

/// Feed name for a camera id, `None` for ids outside `1..=9`.
pub fn camera_name(camera: u8) -> Option<&'static str> {
    if !is_valid_camera(camera) {
        return None;
    }
    Some(CAMERA_NAMES[camera as usize - 1])
}

/// The camera that shows `kind` standing at `position`, if any.
///
/// Terminal stations are outside the camera network: they are seen from
/// the office. Foxy is only on the Pirate Cove feed while hidden behind the
/// curtain; once peeking out, Foxy is off every feed.
pub fn camera_for_station(kind: ActorKind, position: u8) -> Option<u8> {
    match (kind, position) {
        (ActorKind::Bonnie, 0) | (ActorKind::Chica, 0) => Some(SHOW_STAGE),
        (ActorKind::Bonnie, 1) => Some(BACKSTAGE),
        (ActorKind::Bonnie, 2) => Some(WEST_HALL),
        (ActorKind::Bonnie, 3) => Some(WEST_HALL_CORNER),
        (ActorKind::Chica, 1) => Some(DINING_AREA),
        (ActorKind::Chica, 2) => Some(EAST_HALL),
        (ActorKind::Chica, 3) => Some(EAST_HALL_CORNER),
        (ActorKind::Foxy, 0) => Some(PIRATE_COVE),
        _ => None,
    }
}

/// Actors visible on `camera`, given each actor's current position.
pub fn visible_on_camera(camera: u8, positions: &[(ActorKind, u8)]) -> Vec<ActorKind> {
    positions
        .iter()
        .filter(|(kind, position)| camera_for_station(*kind, *position) == Some(camera))
        .map(|(kind, _)| *kind)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_camera_names() {
        assert_eq!(camera_name(1), Some("SHOW STAGE"));
        assert_eq!(camera_name(SUPPLY_CLOSET), Some("SUPPLY CLOSET"));
        assert_eq!(camera_name(9), Some("BACKSTAGE"));
        assert_eq!(camera_name(0), None);
        assert_eq!(camera_name(10), None);
    }

    #[test]
    fn test_every_non_terminal_station_has_a_feed() {
        for kind in [ActorKind::Bonnie, ActorKind::Chica] {
            for position in 0..kind.max_position() {
                let camera = camera_for_station(kind, position);
                assert!(camera.is_some(), "{:?} at {} has no feed", kind, position);
                assert!(is_valid_camera(camera.unwrap_or(0)));
            }
            assert_eq!(camera_for_station(kind, kind.max_position()), None);
        }
    }

    #[test]
    fn test_foxy_leaves_the_cove_feed_once_peeking() {
        assert_eq!(camera_for_station(ActorKind::Foxy, 0), Some(PIRATE_COVE));
        assert_eq!(camera_for_station(ActorKind::Foxy, 1), None);
        assert_eq!(camera_for_station(ActorKind::Foxy, 2), None);

        let positions = [(ActorKind::Foxy, 1)];
        assert!(visible_on_camera(PIRATE_COVE, &positions).is_empty());
    }

    #[test]
    fn test_show_stage_at_night_start() {
        let positions = [
            (ActorKind::Bonnie, 0),
            (ActorKind::Chica, 0),
            (ActorKind::Foxy, 0),
        ];
        assert_eq!(
            visible_on_camera(SHOW_STAGE, &positions),
            vec![ActorKind::Bonnie, ActorKind::Chica]
        );
        assert_eq!(visible_on_camera(PIRATE_COVE, &positions), vec![ActorKind::Foxy]);
        assert!(visible_on_camera(SUPPLY_CLOSET, &positions).is_empty());
    }

    #[test]
    fn test_actors_leave_the_stage() {
        let positions = [
            (ActorKind::Bonnie, 3),
            (ActorKind::Chica, 2),
            (ActorKind::Foxy, 2),
        ];
        assert!(visible_on_camera(SHOW_STAGE, &positions).is_empty());
        assert_eq!(
            visible_on_camera(WEST_HALL_CORNER, &positions),
            vec![ActorKind::Bonnie]
        );
        assert_eq!(visible_on_camera(EAST_HALL, &positions), vec![ActorKind::Chica]);
        assert!(visible_on_camera(PIRATE_COVE, &positions).is_empty());
    }
}
