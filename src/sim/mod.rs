//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - One fixed step per tick, no wall-clock time
//! - Stable iteration order (live list sorted by entity ID)
//! - No rendering or platform dependencies beyond the `Surface` trait

pub mod collision;
pub mod entity;
pub mod room;
pub mod state;
pub mod tick;
pub mod vector;

pub use collision::{CollisionIndex, circles_overlap};
pub use entity::{
    BulletState, Color, Command, Entity, EntityId, EntityKind, ExplosionState, Launcher, StepContext, Target,
};
pub use room::{Placement, PlacementKind, Room, default_rooms};
pub use state::{GamePhase, GameState};
pub use tick::{draw, finish_frame, simulate, tick};
pub use vector::{Position, Vector};
