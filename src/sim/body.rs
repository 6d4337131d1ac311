//! Kinematic body: position, velocity and extent
//!
//! Arcade model: velocity is added to position once per tick, no mass,
//! no forces beyond what each entity adds to its own velocity.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::rect::Rect;

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Body {
    /// Top-left corner
    pub pos: Vec2,
    pub vel: Vec2,
    pub size: Vec2,
}

impl Body {
    pub fn new(pos: Vec2, size: Vec2) -> Self {
        Self {
            pos,
            vel: Vec2::ZERO,
            size,
        }
    }

    /// Advance one tick along both axes
    #[inline]
    pub fn integrate(&mut self) {
        self.pos += self.vel;
    }

    /// Advance one tick along y only (x velocity is ignored, not cleared)
    #[inline]
    pub fn integrate_vertical(&mut self) {
        self.pos.y += self.vel.y;
    }

    #[inline]
    pub fn width(&self) -> f32 {
        self.size.x
    }

    #[inline]
    pub fn height(&self) -> f32 {
        self.size.y
    }

    pub fn rect(&self) -> Rect {
        Rect::from_pos_size(self.pos, self.size)
    }

    /// Where the body was last tick, assuming velocity held constant over the step
    pub fn prev_rect(&self) -> Rect {
        Rect::from_pos_size(self.pos - self.vel, self.size)
    }

    pub fn center(&self) -> Vec2 {
        self.pos + self.size / 2.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_integrate_adds_velocity() {
        let mut body = Body::new(Vec2::new(10.0, 20.0), Vec2::new(4.0, 4.0));
        body.vel = Vec2::new(2.0, -3.0);
        body.integrate();
        body.integrate();
        assert_eq!(body.pos, Vec2::new(14.0, 14.0));
    }

    #[test]
    fn test_integrate_vertical_keeps_x() {
        let mut body = Body::new(Vec2::new(10.0, 20.0), Vec2::new(4.0, 4.0));
        body.vel = Vec2::new(5.0, 1.5);
        body.integrate_vertical();
        assert_eq!(body.pos, Vec2::new(10.0, 21.5));
        assert_eq!(body.vel.x, 5.0);
    }

    #[test]
    fn test_prev_rect_reconstruction() {
        let mut body = Body::new(Vec2::new(0.0, 0.0), Vec2::new(10.0, 10.0));
        body.vel = Vec2::new(3.0, 4.0);
        body.integrate();
        let prev = body.prev_rect();
        assert_eq!(prev.x, 0.0);
        assert_eq!(prev.y, 0.0);
    }
}
