//! Game state and room progression
//!
//! The state exclusively owns the live entity list. Entities refer to each
//! other (and to the player) by [`EntityId`] only.

use super::collision::CollisionIndex;
use super::entity::{Command, Entity, EntityId, Target};
use super::room::Room;
use crate::settings::Settings;

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GamePhase {
    /// Room in progress
    Active,
    /// Room cleared; the next room loads when `remaining` reaches zero.
    /// Simulation continues normally meanwhile.
    Clearing { remaining: u32 },
    /// Player died or the last room was cleared
    GameOver,
}

/// Complete session state
#[derive(Debug, Clone)]
pub struct GameState {
    /// Live entities, sorted by id
    pub entities: Vec<Entity>,
    pub player: EntityId,
    pub living_enemies: i32,
    pub room_index: usize,
    /// Ticks completed since the session started
    pub frames: u64,
    pub phase: GamePhase,
    /// Overlaps found at the start of the current tick
    pub collisions: CollisionIndex,
    settings: Settings,
    next_id: u32,
}

impl GameState {
    /// Create a session and load the first room
    pub fn new(settings: Settings) -> Self {
        let mut state = Self {
            entities: Vec::new(),
            player: EntityId::UNASSIGNED,
            living_enemies: 0,
            room_index: 0,
            frames: 0,
            phase: GamePhase::Active,
            collisions: CollisionIndex::default(),
            settings,
            next_id: 1,
        };
        state.reset();
        state
    }

    /// Fresh player, empty world, first room
    pub fn reset(&mut self) {
        self.entities.clear();
        self.collisions = CollisionIndex::default();
        self.living_enemies = 0;
        self.phase = GamePhase::Active;
        self.room_index = 0;
        self.frames = 0;

        let player = Entity::player(self.settings.player_start, self.settings.player_radius);
        self.player = self.add(player);
        self.load_room(0);
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn current_room(&self) -> Option<&Room> {
        self.settings.rooms.get(self.room_index)
    }

    /// Allocate a new entity ID
    fn next_entity_id(&mut self) -> EntityId {
        let id = EntityId(self.next_id);
        self.next_id += 1;
        id
    }

    /// Add an entity to the live list, returning its new id
    pub fn add(&mut self, mut entity: Entity) -> EntityId {
        let id = self.next_entity_id();
        entity.id = id;
        if entity.is_enemy() {
            self.living_enemies += 1;
        }
        log::trace!("spawn {:?} {:?}", id, entity.kind);
        self.entities.push(entity);
        id
    }

    fn index_of(&self, id: EntityId) -> Option<usize> {
        self.entities.binary_search_by_key(&id, |e| e.id).ok()
    }

    pub fn entity(&self, id: EntityId) -> Option<&Entity> {
        self.index_of(id).map(|i| &self.entities[i])
    }

    pub fn entity_mut(&mut self, id: EntityId) -> Option<&mut Entity> {
        let index = self.index_of(id)?;
        Some(&mut self.entities[index])
    }

    /// The live player, if any
    pub fn player_target(&self) -> Option<Target> {
        self.entity(self.player).map(Entity::as_target)
    }

    /// Take an entity out of the live list.
    ///
    /// Removing the player ends the game. Removing an id that is not live is a no-op.
    pub fn remove(&mut self, id: EntityId) -> Option<Entity> {
        if id == self.player {
            self.game_over();
        }
        let index = self.index_of(id)?;
        let entity = self.entities.remove(index);
        if entity.is_enemy() {
            self.living_enemies -= 1;
            if self.living_enemies <= 0 {
                self.queue_room();
            }
        }
        Some(entity)
    }

    /// Destroy an entity, leaving behind whatever it leaves when it dies
    pub fn kill(&mut self, id: EntityId) {
        if id == self.player {
            log::info!("player destroyed at frame {}", self.frames);
        }
        let Some(dead) = self.remove(id) else {
            return;
        };
        log::debug!("{:?} died at ({:.1}, {:.1})", dead.id, dead.pos.x, dead.pos.y);
        if let Some(remains) = dead.remains() {
            self.add(remains);
        }
    }

    /// Every entity dies on any hit
    pub fn hit(&mut self, id: EntityId, damage: u32) {
        log::debug!("{:?} hit for {}", id, damage);
        self.kill(id);
    }

    pub fn apply(&mut self, commands: impl IntoIterator<Item = Command>) {
        for command in commands {
            match command {
                Command::Spawn(entity) => {
                    self.add(entity);
                }
                Command::Hit { target, damage } => self.hit(target, damage),
                Command::Kill(id) => self.kill(id),
            }
        }
    }

    /// Whether two entities overlapped at the start of this tick
    pub fn is_colliding(&self, a: EntityId, b: EntityId) -> bool {
        self.collisions.is_colliding(a, b)
    }

    /// Instantiate every placement of room `index`
    pub fn load_room(&mut self, index: usize) {
        self.living_enemies = 0;
        let Some(room) = self.settings.rooms.get(index) else {
            return;
        };
        log::info!("loading room {} ({})", index, room.name);
        let fps = self.settings.fps;
        let spawned: Vec<Entity> = room.objects.iter().map(|p| p.build(fps)).collect();
        for entity in spawned {
            self.add(entity);
        }
    }

    /// Start the room-advance countdown unless one is pending or the game is over
    pub fn queue_room(&mut self) {
        if self.phase == GamePhase::Active {
            log::info!("room {} cleared", self.room_index);
            self.phase = GamePhase::Clearing {
                remaining: self.settings.room_advance_ticks,
            };
        }
    }

    /// Advance to the next room, or end the game after the last one
    pub fn next_room(&mut self) {
        self.room_index += 1;
        if self.room_index >= self.settings.rooms.len() {
            self.game_over();
            return;
        }
        self.phase = GamePhase::Active;
        self.load_room(self.room_index);
    }

    pub fn game_over(&mut self) {
        if self.phase != GamePhase::GameOver {
            log::info!("game over in room {} after {} frames", self.room_index, self.frames);
            self.phase = GamePhase::GameOver;
        }
    }

    pub fn is_over(&self) -> bool {
        self.phase == GamePhase::GameOver
    }

    pub fn count(&self, pred: impl Fn(&Entity) -> bool) -> usize {
        self.entities.iter().filter(|&e| pred(e)).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::entity::{Color, EntityKind};
    use crate::sim::room::Placement;
    use crate::sim::vector::{Position, Vector};

    fn one_enemy_rooms(n: usize) -> Settings {
        Settings {
            rooms: (0..n)
                .map(|i| {
                    let turret = Placement::enemy(50.0, 50.0, 10.0, Color::Green, 5.0);
                    Room::new(format!("room {i}"), vec![turret])
                })
                .collect(),
            ..Settings::default()
        }
    }

    fn first_enemy(state: &GameState) -> EntityId {
        state.entities.iter().find(|e| e.is_enemy()).unwrap().id
    }

    #[test]
    fn test_new_loads_first_room() {
        let state = GameState::new(Settings::default());
        assert_eq!(state.room_index, 0);
        assert_eq!(state.frames, 0);
        assert_eq!(state.phase, GamePhase::Active);
        assert_eq!(state.living_enemies, 1);
        assert_eq!(state.entities.len(), 2);
        assert!(state.entity(state.player).unwrap().is_player());
    }

    #[test]
    fn test_ids_stay_sorted() {
        let mut state = GameState::new(Settings::default());
        let a = state.add(Entity::bullet(Position::default(), Vector::ZERO, state.player));
        let b = state.add(Entity::bullet(Position::default(), Vector::ZERO, state.player));
        assert!(a < b);
        assert!(state.entities.windows(2).all(|w| w[0].id < w[1].id));
    }

    #[test]
    fn test_remove_twice_is_noop() {
        let mut state = GameState::new(one_enemy_rooms(2));
        let extra = state.add(Entity::enemy(Position::default(), 10.0, Color::Green, 5.0, 60));
        assert_eq!(state.living_enemies, 2);

        assert!(state.remove(extra).is_some());
        let len = state.entities.len();
        assert_eq!(state.living_enemies, 1);

        assert!(state.remove(extra).is_none());
        assert_eq!(state.entities.len(), len);
        assert_eq!(state.living_enemies, 1);
        assert_eq!(state.phase, GamePhase::Active);
    }

    #[test]
    fn test_last_enemy_starts_countdown() {
        let mut state = GameState::new(one_enemy_rooms(2));
        let enemy = first_enemy(&state);
        state.kill(enemy);
        assert_eq!(state.living_enemies, 0);
        assert_eq!(state.phase, GamePhase::Clearing { remaining: 60 });

        // A second clear signal does not restart the countdown
        state.phase = GamePhase::Clearing { remaining: 10 };
        state.queue_room();
        assert_eq!(state.phase, GamePhase::Clearing { remaining: 10 });
    }

    #[test]
    fn test_empty_room_never_clears() {
        let settings = Settings {
            rooms: vec![Room::new("empty", Vec::new())],
            ..Settings::default()
        };
        let mut state = GameState::new(settings);
        assert_eq!(state.living_enemies, 0);
        let bullet = state.add(Entity::bullet(Position::new(400.0, 400.0), Vector::ZERO, state.player));
        state.remove(bullet);
        assert_eq!(state.phase, GamePhase::Active);
    }

    #[test]
    fn test_killing_bullet_leaves_one_explosion() {
        let mut state = GameState::new(one_enemy_rooms(1));
        let bullet = state.add(Entity::bullet(Position::new(400.0, 400.0), Vector::ZERO, state.player));
        state.kill(bullet);
        state.kill(bullet);
        assert_eq!(state.count(|e| matches!(e.kind, EntityKind::Explosion(_))), 1);
    }

    #[test]
    fn test_player_death_ends_game() {
        let mut state = GameState::new(one_enemy_rooms(2));
        state.kill(first_enemy(&state));
        assert!(matches!(state.phase, GamePhase::Clearing { .. }));

        state.kill(state.player);
        assert!(state.is_over());
        assert!(state.player_target().is_none());
    }

    #[test]
    fn test_next_room_past_last_is_game_over() {
        let mut state = GameState::new(one_enemy_rooms(2));
        assert_eq!(state.current_room().unwrap().name, "room 0");
        state.next_room();
        assert_eq!(state.room_index, 1);
        assert_eq!(state.current_room().unwrap().name, "room 1");
        assert_eq!(state.phase, GamePhase::Active);
        assert_eq!(state.living_enemies, 1);

        state.next_room();
        assert!(state.is_over());
        assert!(state.current_room().is_none());
    }

    #[test]
    fn test_reset_restores_start() {
        let mut state = GameState::new(one_enemy_rooms(2));
        state.next_room();
        state.frames = 500;
        state.kill(state.player);
        assert!(state.is_over());

        state.reset();
        assert_eq!(state.phase, GamePhase::Active);
        assert_eq!(state.room_index, 0);
        assert_eq!(state.frames, 0);
        assert_eq!(state.entities.len(), 2);
        assert!(state.player_target().is_some());
    }
}
