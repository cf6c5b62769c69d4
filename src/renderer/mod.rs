//! Draw surface abstraction
//!
//! The simulation only needs filled circles, filled rectangles, a clear and
//! the surface size. Concrete surfaces live in `platform` (canvas) or here
//! (recording, for headless runs and tests).

use crate::sim::Color;

/// Something entities can be drawn onto, in pixels
pub trait Surface {
    fn width(&self) -> f32;
    fn height(&self) -> f32;
    fn clear(&mut self);
    fn circle(&mut self, x: f32, y: f32, radius: f32, color: Color);
    fn rect(&mut self, x: f32, y: f32, w: f32, h: f32, color: Color);
    /// Opacity for subsequent draws (1.0 = opaque)
    fn set_alpha(&mut self, _alpha: f32) {}
}

/// A recorded draw call
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Circle { x: f32, y: f32, radius: f32, color: Color, alpha: f32 },
    Rect { x: f32, y: f32, w: f32, h: f32, color: Color },
}

/// Surface that keeps the draw calls of the current frame
#[derive(Debug, Clone)]
pub struct RecordingSurface {
    width: f32,
    height: f32,
    alpha: f32,
    pub commands: Vec<DrawCommand>,
}

impl RecordingSurface {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            width,
            height,
            alpha: 1.0,
            commands: Vec::new(),
        }
    }
}

impl Surface for RecordingSurface {
    fn width(&self) -> f32 {
        self.width
    }

    fn height(&self) -> f32 {
        self.height
    }

    fn clear(&mut self) {
        self.commands.clear();
    }

    fn circle(&mut self, x: f32, y: f32, radius: f32, color: Color) {
        self.commands.push(DrawCommand::Circle {
            x,
            y,
            radius,
            color,
            alpha: self.alpha,
        });
    }

    fn rect(&mut self, x: f32, y: f32, w: f32, h: f32, color: Color) {
        self.commands.push(DrawCommand::Rect { x, y, w, h, color });
    }

    fn set_alpha(&mut self, alpha: f32) {
        self.alpha = alpha;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::{Entity, Position};

    #[test]
    fn test_explosion_fades_and_grows() {
        let mut surface = RecordingSurface::new(500.0, 500.0);
        let mut explosion = Entity::explosion(Position::new(10.0, 10.0), 4.0, Color::Green);
        if let crate::sim::EntityKind::Explosion(state) = &mut explosion.kind {
            state.timer = state.max / 2;
        }
        explosion.draw(&mut surface);

        assert_eq!(
            surface.commands,
            vec![DrawCommand::Circle {
                x: 10.0,
                y: 10.0,
                radius: 6.0,
                color: Color::Green,
                alpha: 0.5,
            }]
        );
        // Opacity is restored for whatever draws next
        surface.rect(0.0, 0.0, 1.0, 1.0, Color::Red);
        surface.circle(0.0, 0.0, 1.0, Color::Red);
        assert!(matches!(surface.commands.last(), Some(DrawCommand::Circle { alpha, .. }) if *alpha == 1.0));
    }

    #[test]
    fn test_clear_drops_previous_frame() {
        let mut surface = RecordingSurface::new(500.0, 500.0);
        surface.circle(1.0, 1.0, 1.0, Color::Blue);
        surface.clear();
        assert!(surface.commands.is_empty());
    }
}
