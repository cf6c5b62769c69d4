//! Gravitron - a room-by-room arcade shooter
//!
//! Core modules:
//! - `sim`: Deterministic simulation (entities, collisions, rooms, game state)
//! - `game`: Frame driver wiring the simulation to input, scheduling and drawing
//! - `renderer`: Draw surface abstraction
//! - `input`: Directional buttons and the key adapter that feeds them
//! - `scheduler`: Fixed-interval tick scheduling
//! - `platform`: Browser bindings (wasm32 only)
//! - `settings`: Data-driven configuration and room list

pub mod error;
pub mod game;
pub mod input;
pub mod platform;
pub mod renderer;
pub mod scheduler;
pub mod settings;
pub mod sim;

pub use error::ConfigError;
pub use game::Game;
pub use settings::Settings;

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Default ticks per second
    pub const DEFAULT_FPS: u32 = 60;

    /// Drawable surface dimensions
    pub const SCREEN_WIDTH: f32 = 500.0;
    pub const SCREEN_HEIGHT: f32 = 500.0;

    /// Player defaults
    pub const PLAYER_START_X: f32 = 250.0;
    pub const PLAYER_START_Y: f32 = 250.0;
    pub const PLAYER_RADIUS: f32 = 10.0;
    /// Velocity added per held direction per tick
    pub const PLAYER_PUSH: f32 = 0.3;
    pub const PLAYER_MAX_SPEED: f32 = 7.0;
    /// Multiplier applied to player speed every tick
    pub const PLAYER_DAMPING: f32 = 0.98;
    /// Speeds below this snap to zero
    pub const PLAYER_DEADZONE: f32 = 0.1;

    /// Bullet defaults
    pub const BULLET_SPEED: f32 = 3.0;
    pub const BULLET_RADIUS: f32 = 5.0;
    pub const BULLET_MAX_SPEED: f32 = 5.0;
    pub const BULLET_DAMAGE: u32 = 1;
    /// Gap between an enemy's edge and the bullet it fires
    pub const MUZZLE_GAP: f32 = 20.0;

    /// Follow enemy acceleration toward the player
    pub const FOLLOW_ACCEL: f32 = 0.05;
    pub const FOLLOW_MAX_SPEED: f32 = 0.5;

    /// Numerator of the 1/d gravity law
    pub const GRAVITY_STRENGTH: f32 = 20.0;

    /// Explosion lifetime in ticks
    pub const EXPLOSION_TICKS: u32 = 20;

    /// Side length of the off-screen position marker
    pub const EDGE_MARKER_SIZE: f32 = 10.0;

    /// Ticks between a room clear and the next room loading
    pub const ROOM_ADVANCE_TICKS: u32 = 60;
    /// Delay between game over and the automatic reset
    pub const RESET_DELAY_MS: u64 = 1000;
}

/// Convert polar (r, theta) to cartesian (x, y)
#[inline]
pub fn polar_to_cartesian(r: f32, theta: f32) -> Vec2 {
    Vec2::new(r * theta.cos(), r * theta.sin())
}

/// Convert cartesian (x, y) to polar (r, theta)
///
/// The origin maps to angle 0 rather than whatever `atan2` yields for signed zeros.
#[inline]
pub fn cartesian_to_polar(pos: Vec2) -> (f32, f32) {
    if pos == Vec2::ZERO {
        return (0.0, 0.0);
    }
    (pos.length(), pos.y.atan2(pos.x))
}
