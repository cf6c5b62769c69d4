//! Configuration errors
//!
//! The simulation itself cannot fail; only loading settings can.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read settings: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid settings JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("fps must be positive")]
    ZeroFps,

    #[error("room list is empty")]
    NoRooms,

    #[error("player radius must be positive, got {0}")]
    BadPlayerRadius(f32),

    #[error("room {room:?}: seconds between shots must be positive, got {waiting}")]
    BadFireInterval { room: String, waiting: f32 },
}
