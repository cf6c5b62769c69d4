//! Polar vectors and absolute positions
//!
//! Velocities and accelerations are kept in polar form (magnitude + angle).
//! Magnitudes may go negative; only the trigonometric projection is meaningful,
//! so angles are never normalized or compared directly.

use std::ops::Sub;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::{cartesian_to_polar, polar_to_cartesian};

/// A directed quantity in polar form
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Vector {
    pub mag: f32,
    /// Radians
    pub angle: f32,
}

impl Vector {
    pub const ZERO: Self = Self { mag: 0.0, angle: 0.0 };

    pub fn new(mag: f32, angle: f32) -> Self {
        Self { mag, angle }
    }

    /// Polar decomposition of a position-like offset
    pub fn from_position(pos: Position) -> Self {
        let (mag, angle) = cartesian_to_polar(pos.as_vec2());
        Self { mag, angle }
    }

    /// Cartesian projection
    pub fn as_position(&self) -> Position {
        polar_to_cartesian(self.mag, self.angle).into()
    }

    /// Apply `other` as a pull in the opposite direction of its angle.
    ///
    /// Both vectors are projected to cartesian, `other` is subtracted and the
    /// result converted back to polar. This is not commutative addition.
    pub fn push(&mut self, other: Vector) {
        let me = polar_to_cartesian(self.mag, self.angle);
        let ot = polar_to_cartesian(other.mag, other.angle);
        let (mag, angle) = cartesian_to_polar(me - ot);
        self.mag = mag;
        self.angle = angle;
    }

    /// `push` with a magnitude and angle instead of a vector
    pub fn push_polar(&mut self, mag: f32, angle: f32) {
        self.push(Vector::new(mag, angle));
    }
}

/// An absolute point (or an offset between two points)
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Position {
    pub x: f32,
    pub y: f32,
}

impl Position {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    #[inline]
    pub fn as_vec2(&self) -> Vec2 {
        Vec2::new(self.x, self.y)
    }

    /// Translate in place by an offset
    pub fn move_by(&mut self, delta: Position) {
        self.move_xy(delta.x, delta.y);
    }

    pub fn move_xy(&mut self, dx: f32, dy: f32) {
        self.x += dx;
        self.y += dy;
    }

    /// Offset `self - other`
    ///
    /// As a vector this points from `other` toward `self`.
    pub fn to(&self, other: Position) -> Position {
        *self - other
    }

    pub fn len(&self) -> f32 {
        self.as_vec2().length()
    }

    pub fn as_vector(&self) -> Vector {
        Vector::from_position(*self)
    }

    /// Euclidean distance between two points
    pub fn distance(&self, other: Position) -> f32 {
        self.to(other).len()
    }
}

impl From<Vec2> for Position {
    fn from(v: Vec2) -> Self {
        Self { x: v.x, y: v.y }
    }
}

impl Sub for Position {
    type Output = Position;

    fn sub(self, rhs: Position) -> Position {
        (self.as_vec2() - rhs.as_vec2()).into()
    }
}
