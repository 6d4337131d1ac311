//! Static platforms

use serde::{Deserialize, Serialize};

use super::rect::Rect;
use crate::consts::PLATFORM_HEIGHT;

/// An immovable ledge. Collision target only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Platform {
    pub id: u32,
    pub rect: Rect,
}

impl Platform {
    pub fn new(id: u32, x: f32, y: f32, width: f32) -> Self {
        Self {
            id,
            rect: Rect::new(x, y, width, PLATFORM_HEIGHT),
        }
    }

    #[inline]
    pub fn left(&self) -> f32 {
        self.rect.left()
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.rect.right()
    }

    #[inline]
    pub fn top(&self) -> f32 {
        self.rect.top()
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.rect.bottom()
    }

    #[inline]
    pub fn width(&self) -> f32 {
        self.rect.width
    }
}
