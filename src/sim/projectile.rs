//! Arrows: straight horizontal flight, no gravity, pass through platforms

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::body::Body;
use super::rect::Rect;
use crate::consts::*;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Arrow {
    pub id: u32,
    pub body: Body,
}

impl Arrow {
    /// `direction` is -1 or +1; zero is treated as +1
    pub fn new(id: u32, origin: Vec2, direction: i8) -> Self {
        let dir = if direction < 0 { -1.0 } else { 1.0 };
        let mut body = Body::new(origin, Vec2::new(ARROW_WIDTH, ARROW_HEIGHT));
        body.vel = Vec2::new(ARROW_SPEED * dir, 0.0);
        Self { id, body }
    }

    pub fn update(&mut self) {
        self.body.integrate();
    }

    pub fn rect(&self) -> Rect {
        self.body.rect()
    }

    /// Still inside the horizontal camera window `[left, left + width)`
    pub fn in_window(&self, left: f32, width: f32) -> bool {
        let r = self.rect();
        r.right() > left && r.left() < left + width
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_arrow_flies_straight() {
        let mut arrow = Arrow::new(1, Vec2::new(100.0, 50.0), -1);
        for _ in 0..10 {
            arrow.update();
        }
        assert_eq!(arrow.body.pos, Vec2::new(100.0 - 10.0 * ARROW_SPEED, 50.0));
    }

    #[test]
    fn test_window_bounds() {
        let arrow = Arrow::new(1, Vec2::new(100.0, 0.0), 1);
        assert!(arrow.in_window(0.0, 1200.0));
        // Trailing edge behind the left boundary
        assert!(!arrow.in_window(120.0, 1200.0));
        // Past the right boundary
        assert!(!arrow.in_window(-1200.0, 1200.0));
    }
}
