//! Game settings
//!
//! Tick rate, surface size, player start and the room list. Loaded from JSON
//! when provided; every field falls back to its default.

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::ConfigError;
use crate::sim::{Position, Room, default_rooms};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Ticks per second; also scales enemy fire intervals
    pub fps: u32,
    /// Drawable surface size in pixels
    pub width: f32,
    pub height: f32,
    pub player_start: Position,
    pub player_radius: f32,
    /// Ticks between clearing a room and loading the next
    pub room_advance_ticks: u32,
    /// Delay before a finished game resets
    pub reset_delay_ms: u64,
    pub rooms: Vec<Room>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            fps: DEFAULT_FPS,
            width: SCREEN_WIDTH,
            height: SCREEN_HEIGHT,
            player_start: Position::new(PLAYER_START_X, PLAYER_START_Y),
            player_radius: PLAYER_RADIUS,
            room_advance_ticks: ROOM_ADVANCE_TICKS,
            reset_delay_ms: RESET_DELAY_MS,
            rooms: default_rooms(),
        }
    }
}

impl Settings {
    /// Parse and validate settings JSON
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let settings: Settings = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Load settings from a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.fps == 0 {
            return Err(ConfigError::ZeroFps);
        }
        if self.rooms.is_empty() {
            return Err(ConfigError::NoRooms);
        }
        if !(self.player_radius > 0.0) {
            return Err(ConfigError::BadPlayerRadius(self.player_radius));
        }
        for room in &self.rooms {
            if let Some(p) = room.objects.iter().find(|p| !(p.waiting > 0.0)) {
                return Err(ConfigError::BadFireInterval {
                    room: room.name.clone(),
                    waiting: p.waiting,
                });
            }
        }
        Ok(())
    }

    /// Scheduler period for the configured tick rate
    pub fn tick_period(&self) -> Duration {
        Duration::from_secs_f64(1.0 / self.fps.max(1) as f64)
    }

    pub fn reset_delay(&self) -> Duration {
        Duration::from_millis(self.reset_delay_ms)
    }
}
