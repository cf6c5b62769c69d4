//! Circle-shaped actors and their per-variant behavior
//!
//! Every actor shares the same body (position, optional velocity and
//! acceleration, radius, speed cap, color). The closed set of variants in
//! [`EntityKind`] decides how it steps, collides, dies and draws.
//!
//! Entities never touch the game state directly. Anything that affects other
//! entities (spawning, killing, hitting) is written to a [`Command`] buffer that
//! the state applies right after the call returns.

use std::f32::consts::{FRAC_PI_2, PI, TAU};

use serde::{Deserialize, Serialize};

use super::collision::CollisionIndex;
use super::vector::{Position, Vector};
use crate::consts::*;
use crate::input::Buttons;
use crate::renderer::Surface;

/// Stable identity of a live entity. Ids increase monotonically, so the live
/// list is always sorted by id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
pub struct EntityId(pub u32);

impl EntityId {
    /// Placeholder carried by entities that have not been added yet
    pub const UNASSIGNED: Self = Self(0);
}

/// Named fill colors
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Color {
    #[default]
    Red,
    Green,
    Orange,
    Blue,
}

impl Color {
    pub fn as_str(&self) -> &'static str {
        match self {
            Color::Red => "red",
            Color::Green => "green",
            Color::Orange => "orange",
            Color::Blue => "blue",
        }
    }
}

/// Fire control shared by both enemy variants
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Launcher {
    /// Frames between shots
    pub interval: u64,
}

impl Launcher {
    /// `waiting` is in seconds, scaled to frames by the configured fps
    pub fn new(waiting: f32, fps: u32) -> Self {
        let interval = (waiting * fps as f32).round().max(1.0) as u64;
        Self { interval }
    }

    /// Fires on every nonzero multiple of the interval
    pub fn ready(&self, frames: u64) -> bool {
        frames != 0 && frames % self.interval == 0
    }

    /// Build a bullet leaving `shooter` toward `target`
    pub fn fire(&self, shooter: &Entity, target: Position) -> Entity {
        // Offset from target to shooter; flipping its magnitude points back at the target
        let mut dir = shooter.pos.to(target).as_vector();
        dir.mag = -shooter.radius - MUZZLE_GAP;
        let mut pos = shooter.pos;
        pos.move_by(dir.as_position());
        Entity::bullet(pos, Vector::new(BULLET_SPEED, dir.angle + PI), shooter.id)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BulletState {
    pub damage: u32,
    /// Cannot harm `parent` until first seen apart from it
    pub safe: bool,
    pub parent: EntityId,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ExplosionState {
    pub timer: u32,
    pub max: u32,
}

/// Variant tag plus per-variant data
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum EntityKind {
    Player,
    Enemy(Launcher),
    /// An enemy that also drifts toward the player
    FollowEnemy(Launcher),
    Bullet(BulletState),
    Explosion(ExplosionState),
}

/// Side effects requested by an entity
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Spawn(Entity),
    Hit { target: EntityId, damage: u32 },
    Kill(EntityId),
}

/// Read-only view of the player used for aiming and gravity
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Target {
    pub id: EntityId,
    pub pos: Position,
    pub radius: f32,
}

/// Everything a step may read besides the entity itself
#[derive(Debug, Clone, Copy)]
pub struct StepContext<'a> {
    pub frames: u64,
    pub buttons: Buttons,
    pub player: Option<Target>,
    pub collisions: &'a CollisionIndex,
}

/// A circle-shaped actor
#[derive(Debug, Clone, PartialEq)]
pub struct Entity {
    pub id: EntityId,
    pub pos: Position,
    /// `None` means immobile
    pub vel: Option<Vector>,
    pub acc: Option<Vector>,
    pub radius: f32,
    /// 0 = unbounded
    pub max_speed: f32,
    pub color: Color,
    pub kind: EntityKind,
}

impl Entity {
    fn circle(pos: Position, vel: Option<Vector>, radius: f32, color: Color, kind: EntityKind) -> Self {
        Self {
            id: EntityId::UNASSIGNED,
            pos,
            vel,
            acc: None,
            radius,
            max_speed: 0.0,
            color,
            kind,
        }
    }

    pub fn player(pos: Position, radius: f32) -> Self {
        let mut player = Self::circle(pos, Some(Vector::ZERO), radius, Color::Red, EntityKind::Player);
        player.acc = Some(Vector::ZERO);
        player
    }

    /// Stationary turret
    pub fn enemy(pos: Position, radius: f32, color: Color, waiting: f32, fps: u32) -> Self {
        Self::circle(pos, None, radius, color, EntityKind::Enemy(Launcher::new(waiting, fps)))
    }

    pub fn follow_enemy(pos: Position, radius: f32, color: Color, waiting: f32, fps: u32) -> Self {
        let kind = EntityKind::FollowEnemy(Launcher::new(waiting, fps));
        let mut enemy = Self::circle(pos, Some(Vector::ZERO), radius, color, kind);
        enemy.max_speed = FOLLOW_MAX_SPEED;
        enemy
    }

    pub fn bullet(pos: Position, vel: Vector, parent: EntityId) -> Self {
        let state = BulletState {
            damage: BULLET_DAMAGE,
            safe: true,
            parent,
        };
        let mut bullet = Self::circle(pos, Some(vel), BULLET_RADIUS, Color::Green, EntityKind::Bullet(state));
        bullet.max_speed = BULLET_MAX_SPEED;
        bullet
    }

    pub fn explosion(pos: Position, radius: f32, color: Color) -> Self {
        let state = ExplosionState {
            timer: 0,
            max: EXPLOSION_TICKS,
        };
        Self::circle(pos, Some(Vector::ZERO), radius, color, EntityKind::Explosion(state))
    }

    /// Participates in pairwise collision detection
    pub fn is_solid(&self) -> bool {
        !matches!(self.kind, EntityKind::Explosion(_))
    }

    /// Counts toward the room's living enemies
    pub fn is_enemy(&self) -> bool {
        matches!(self.kind, EntityKind::Enemy(_) | EntityKind::FollowEnemy(_))
    }

    pub fn is_player(&self) -> bool {
        matches!(self.kind, EntityKind::Player)
    }

    pub fn as_target(&self) -> Target {
        Target {
            id: self.id,
            pos: self.pos,
            radius: self.radius,
        }
    }

    /// Shared motion step: accelerate, cap speed, move
    pub fn integrate(&mut self) {
        let Some(vel) = self.vel.as_mut() else {
            return;
        };
        if let Some(acc) = self.acc {
            vel.push(acc);
        }
        if self.max_speed != 0.0 && vel.mag.abs() > self.max_speed {
            vel.mag = vel.mag.signum() * self.max_speed;
        }
        self.pos.move_by(vel.as_position());
    }

    /// Pull self toward `other` with a 1/d law, destroying `other` on contact
    pub fn gravity(&mut self, other: &Target, commands: &mut Vec<Command>) {
        let mut to_other = Vector::from_position(self.pos.to(other.pos));
        if to_other.mag <= self.radius + other.radius {
            commands.push(Command::Kill(other.id));
            return;
        }
        to_other.mag = GRAVITY_STRENGTH / to_other.mag;
        self.acc = Some(to_other);
    }

    /// Advance one tick
    pub fn step(&mut self, ctx: &StepContext<'_>, commands: &mut Vec<Command>) {
        match self.kind {
            EntityKind::Player => self.step_player(ctx.buttons),
            EntityKind::Enemy(launcher) => self.step_enemy(launcher, ctx, commands),
            EntityKind::FollowEnemy(launcher) => {
                if let Some(player) = ctx.player {
                    let mut to_player = Vector::from_position(self.pos.to(player.pos));
                    to_player.mag = FOLLOW_ACCEL;
                    self.acc = Some(to_player);
                }
                self.step_enemy(launcher, ctx, commands);
            }
            EntityKind::Bullet(_) => self.step_bullet(ctx, commands),
            EntityKind::Explosion(_) => {
                if let EntityKind::Explosion(state) = &mut self.kind {
                    state.timer += 1;
                    if state.timer >= state.max {
                        commands.push(Command::Kill(self.id));
                    }
                }
            }
        }
    }

    fn step_player(&mut self, buttons: Buttons) {
        if let Some(vel) = self.vel.as_mut() {
            if buttons.up {
                vel.push_polar(PLAYER_PUSH, FRAC_PI_2);
            }
            if buttons.right {
                vel.push_polar(PLAYER_PUSH, PI);
            }
            if buttons.left {
                vel.push_polar(PLAYER_PUSH, 0.0);
            }
            if buttons.down {
                vel.push_polar(PLAYER_PUSH, TAU * 3.0 / 4.0);
            }
            vel.mag = vel.mag.clamp(-PLAYER_MAX_SPEED, PLAYER_MAX_SPEED);
            vel.mag *= PLAYER_DAMPING;
            if vel.mag.abs() < PLAYER_DEADZONE {
                vel.mag = 0.0;
            }
        }
        self.integrate();
    }

    fn step_enemy(&mut self, launcher: Launcher, ctx: &StepContext<'_>, commands: &mut Vec<Command>) {
        self.integrate();
        if launcher.ready(ctx.frames) {
            if let Some(player) = ctx.player {
                commands.push(Command::Spawn(launcher.fire(self, player.pos)));
            }
        }
    }

    fn step_bullet(&mut self, ctx: &StepContext<'_>, commands: &mut Vec<Command>) {
        if let Some(player) = ctx.player {
            self.gravity(&player, commands);
        }
        self.integrate();

        let id = self.id;
        if let EntityKind::Bullet(state) = &mut self.kind {
            // Only a tick whose collision pass saw this bullet can prove it clear of its parent
            if state.safe && ctx.collisions.contains(id) && !ctx.collisions.is_colliding(id, state.parent) {
                state.safe = false;
            }
        }
    }

    /// React to overlapping `other`.
    ///
    /// Returns true when the interaction is fully handled and `other` should
    /// not be asked in turn.
    pub fn collide_with(&self, other: &Entity, commands: &mut Vec<Command>) -> bool {
        match (&self.kind, &other.kind) {
            (EntityKind::Player, _) => {
                commands.push(Command::Kill(self.id));
                false
            }
            (EntityKind::Bullet(mine), EntityKind::Bullet(theirs)) => {
                commands.push(Command::Hit {
                    target: self.id,
                    damage: theirs.damage,
                });
                commands.push(Command::Hit {
                    target: other.id,
                    damage: mine.damage,
                });
                true
            }
            (EntityKind::Enemy(_) | EntityKind::FollowEnemy(_), EntityKind::Bullet(bullet)) => {
                if bullet.safe && bullet.parent == self.id {
                    return true;
                }
                commands.push(Command::Hit {
                    target: self.id,
                    damage: bullet.damage,
                });
                commands.push(Command::Kill(other.id));
                true
            }
            _ => false,
        }
    }

    /// Entities this one leaves behind when it dies
    pub fn remains(&self) -> Option<Entity> {
        match self.kind {
            EntityKind::Bullet(_) => Some(Entity::explosion(self.pos, self.radius, self.color)),
            _ => None,
        }
    }

    pub fn draw(&self, surface: &mut dyn Surface) {
        if let EntityKind::Explosion(state) = self.kind {
            let scale = state.timer as f32 / state.max as f32 + 1.0;
            surface.set_alpha(2.0 - scale);
            surface.circle(self.pos.x, self.pos.y, self.radius * scale, self.color);
            surface.set_alpha(1.0);
            return;
        }

        surface.circle(self.pos.x, self.pos.y, self.radius, self.color);
        if let Some((x, y)) = self.edge_marker(surface.width(), surface.height()) {
            let half = EDGE_MARKER_SIZE / 2.0;
            surface.rect(x - half, y - half, EDGE_MARKER_SIZE, EDGE_MARKER_SIZE, self.color);
        }
    }

    /// Where to pin the marker for an entity fully outside the surface
    pub fn edge_marker(&self, width: f32, height: f32) -> Option<(f32, f32)> {
        let r = self.radius;
        let x = if self.pos.x < -r {
            Some(0.0)
        } else if self.pos.x > width + r {
            Some(width)
        } else {
            None
        };
        let y = if self.pos.y < -r {
            Some(0.0)
        } else if self.pos.y > height + r {
            Some(height)
        } else {
            None
        };
        if x.is_none() && y.is_none() {
            return None;
        }
        Some((x.unwrap_or(self.pos.x), y.unwrap_or(self.pos.y)))
    }
}
