//! All-pairs overlap detection
//!
//! Each tick starts from a snapshot of the live list. Every unordered pair of
//! solid entities whose circles touch is recorded in both directions, keyed by
//! snapshot index. The index is rebuilt from scratch every tick.

use std::collections::{HashMap, HashSet};

use super::entity::{Command, Entity, EntityId};

/// Per-tick record of which entity pairs overlap
#[derive(Debug, Clone, Default)]
pub struct CollisionIndex {
    /// Id -> snapshot index
    slots: HashMap<EntityId, usize>,
    /// Symmetric: holds (i, j) and (j, i)
    pairs: HashSet<(usize, usize)>,
    /// Overlapping pairs with i < j, in iteration order
    ordered: Vec<(usize, usize)>,
}

impl CollisionIndex {
    /// Detect every overlapping solid pair in `snapshot`
    pub fn build(snapshot: &[Entity]) -> Self {
        let mut index = Self {
            slots: snapshot.iter().enumerate().map(|(i, e)| (e.id, i)).collect(),
            ..Default::default()
        };

        for (i, a) in snapshot.iter().enumerate() {
            if !a.is_solid() {
                continue;
            }
            for (j, b) in snapshot.iter().enumerate().skip(i + 1) {
                if !b.is_solid() {
                    continue;
                }
                if circles_overlap(a, b) {
                    index.pairs.insert((i, j));
                    index.pairs.insert((j, i));
                    index.ordered.push((i, j));
                }
            }
        }
        index
    }

    /// Whether `id` was part of the snapshot this index was built from
    pub fn contains(&self, id: EntityId) -> bool {
        self.slots.contains_key(&id)
    }

    /// Whether two snapshot entities overlapped. Entities outside the snapshot never do.
    pub fn is_colliding(&self, a: EntityId, b: EntityId) -> bool {
        match (self.slots.get(&a), self.slots.get(&b)) {
            (Some(&i), Some(&j)) => self.is_colliding_at(i, j),
            _ => false,
        }
    }

    pub fn is_colliding_at(&self, i: usize, j: usize) -> bool {
        self.pairs.contains(&(i, j))
    }

    /// Overlapping pairs (i < j) in snapshot index order
    pub fn pairs(&self) -> &[(usize, usize)] {
        &self.ordered
    }

    pub fn is_empty(&self) -> bool {
        self.ordered.is_empty()
    }
}

/// Distance between centers is at most the sum of radii
#[inline]
pub fn circles_overlap(a: &Entity, b: &Entity) -> bool {
    a.pos.distance(b.pos) <= a.radius + b.radius
}

/// Ask each overlapping pair how it reacts.
///
/// `i` is asked first; `j` is only asked when `i` does not report the
/// interaction as handled. Reactions read the snapshot, so the resulting
/// commands can be applied after the whole pass.
pub fn resolve(snapshot: &[Entity], index: &CollisionIndex) -> Vec<Command> {
    let mut commands = Vec::new();
    for &(i, j) in index.pairs() {
        let (a, b) = (&snapshot[i], &snapshot[j]);
        if !a.collide_with(b, &mut commands) {
            b.collide_with(a, &mut commands);
        }
    }
    commands
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::entity::Color;
    use crate::sim::vector::{Position, Vector};
    use proptest::prelude::*;

    fn enemy_at(id: u32, x: f32, y: f32, radius: f32) -> Entity {
        let mut e = Entity::enemy(Position::new(x, y), radius, Color::Green, 5.0, 60);
        e.id = EntityId(id);
        e
    }

    #[test]
    fn test_touching_circles_collide() {
        let snapshot = vec![
            enemy_at(1, 0.0, 0.0, 10.0),
            enemy_at(2, 20.0, 0.0, 10.0),
            enemy_at(3, 100.0, 0.0, 10.0),
        ];
        let index = CollisionIndex::build(&snapshot);

        assert!(index.is_colliding(EntityId(1), EntityId(2)));
        assert!(index.is_colliding(EntityId(2), EntityId(1)));
        assert!(!index.is_colliding(EntityId(1), EntityId(3)));
        assert_eq!(index.pairs(), &[(0, 1)]);
    }

    #[test]
    fn test_non_solid_entities_are_skipped() {
        let mut explosion = Entity::explosion(Position::new(0.0, 0.0), 10.0, Color::Green);
        explosion.id = EntityId(2);
        let snapshot = vec![enemy_at(1, 0.0, 0.0, 10.0), explosion];
        let index = CollisionIndex::build(&snapshot);

        assert!(index.is_empty());
        assert!(index.contains(EntityId(2)));
    }

    #[test]
    fn test_unknown_ids_never_collide() {
        let snapshot = vec![enemy_at(1, 0.0, 0.0, 10.0)];
        let index = CollisionIndex::build(&snapshot);
        assert!(!index.contains(EntityId(5)));
        assert!(!index.is_colliding(EntityId(1), EntityId(5)));
    }

    #[test]
    fn test_pairs_follow_snapshot_order() {
        let snapshot = vec![
            enemy_at(1, 0.0, 0.0, 10.0),
            enemy_at(2, 5.0, 0.0, 10.0),
            enemy_at(3, 10.0, 0.0, 10.0),
        ];
        let index = CollisionIndex::build(&snapshot);
        assert_eq!(index.pairs(), &[(0, 1), (0, 2), (1, 2)]);
    }

    #[test]
    fn test_resolve_asks_second_party_when_unhandled() {
        // Bullet listed first does not handle an enemy, so the enemy is asked
        let mut bullet = Entity::bullet(Position::new(0.0, 0.0), Vector::ZERO, EntityId(9));
        bullet.id = EntityId(1);
        let snapshot = vec![bullet, enemy_at(2, 3.0, 0.0, 10.0)];
        let index = CollisionIndex::build(&snapshot);

        let commands = resolve(&snapshot, &index);
        assert_eq!(
            commands,
            vec![
                Command::Hit { target: EntityId(2), damage: 1 },
                Command::Kill(EntityId(1)),
            ]
        );
    }

    proptest! {
        #[test]
        fn prop_index_is_symmetric(
            circles in prop::collection::vec((0.0f32..200.0, 0.0f32..200.0, 1.0f32..30.0), 0..12)
        ) {
            let snapshot: Vec<Entity> = circles
                .iter()
                .enumerate()
                .map(|(i, &(x, y, r))| enemy_at(i as u32 + 1, x, y, r))
                .collect();
            let index = CollisionIndex::build(&snapshot);

            for (i, a) in snapshot.iter().enumerate() {
                for (j, b) in snapshot.iter().enumerate() {
                    if i == j {
                        continue;
                    }
                    let expected = circles_overlap(a, b);
                    prop_assert_eq!(index.is_colliding(a.id, b.id), expected);
                    prop_assert_eq!(index.is_colliding(b.id, a.id), expected);
                }
            }
        }
    }
}
