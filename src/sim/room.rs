//! Static room definitions
//!
//! A room is an ordered list of enemy placements, instantiated in order when
//! the room loads.

use serde::{Deserialize, Serialize};

use super::entity::{Color, Entity};
use super::vector::Position;

/// Which enemy variant a placement builds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlacementKind {
    Enemy,
    FollowEnemy,
}

/// One entity in a room
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Placement {
    pub kind: PlacementKind,
    pub pos: Position,
    pub radius: f32,
    pub color: Color,
    /// Seconds between shots
    pub waiting: f32,
}

impl Placement {
    pub fn enemy(x: f32, y: f32, radius: f32, color: Color, waiting: f32) -> Self {
        Self {
            kind: PlacementKind::Enemy,
            pos: Position::new(x, y),
            radius,
            color,
            waiting,
        }
    }

    pub fn follow_enemy(x: f32, y: f32, radius: f32, color: Color, waiting: f32) -> Self {
        Self {
            kind: PlacementKind::FollowEnemy,
            ..Self::enemy(x, y, radius, color, waiting)
        }
    }

    pub fn build(&self, fps: u32) -> Entity {
        match self.kind {
            PlacementKind::Enemy => Entity::enemy(self.pos, self.radius, self.color, self.waiting, fps),
            PlacementKind::FollowEnemy => {
                Entity::follow_enemy(self.pos, self.radius, self.color, self.waiting, fps)
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Room {
    pub name: String,
    pub objects: Vec<Placement>,
}

impl Room {
    pub fn new(name: impl Into<String>, objects: Vec<Placement>) -> Self {
        Self {
            name: name.into(),
            objects,
        }
    }
}

/// The built-in campaign
pub fn default_rooms() -> Vec<Room> {
    vec![
        Room::new("First", vec![Placement::enemy(100.0, 100.0, 10.0, Color::Green, 5.0)]),
        Room::new(
            "Second",
            vec![
                Placement::enemy(100.0, 100.0, 10.0, Color::Green, 5.0),
                Placement::enemy(400.0, 400.0, 10.0, Color::Green, 5.0),
            ],
        ),
        Room::new(
            "Third",
            vec![
                Placement::enemy(100.0, 100.0, 10.0, Color::Orange, 2.0),
                Placement::enemy(400.0, 400.0, 10.0, Color::Green, 5.0),
            ],
        ),
        Room::new(
            "Fourth",
            vec![Placement::follow_enemy(100.0, 100.0, 10.0, Color::Blue, 3.0)],
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::entity::EntityKind;

    #[test]
    fn test_placements_build_their_variant() {
        let turret = Placement::enemy(1.0, 2.0, 10.0, Color::Orange, 2.0).build(60);
        assert!(matches!(turret.kind, EntityKind::Enemy(l) if l.interval == 120));
        assert!(turret.vel.is_none());

        let follower = Placement::follow_enemy(1.0, 2.0, 10.0, Color::Blue, 3.0).build(30);
        assert!(matches!(follower.kind, EntityKind::FollowEnemy(l) if l.interval == 90));
        assert!(follower.vel.is_some());
    }

    #[test]
    fn test_room_json_shape() {
        let json = r#"{
            "name": "Custom",
            "objects": [
                { "kind": "follow_enemy", "pos": { "x": 10.0, "y": 20.0 },
                  "radius": 12.0, "color": "blue", "waiting": 1.5 }
            ]
        }"#;
        let room: Room = serde_json::from_str(json).unwrap();
        assert_eq!(room.objects[0], Placement::follow_enemy(10.0, 20.0, 12.0, Color::Blue, 1.5));
    }

    #[test]
    fn test_default_campaign() {
        let rooms = default_rooms();
        assert_eq!(rooms.len(), 4);
        assert!(rooms.iter().all(|r| !r.objects.is_empty()));
    }
}
