use crate::color::Rgba;
use crate::particle::Endpoint;
use nannou::prelude::*;

/// Pointer-driven pseudo particle.
///
/// Has no velocity and no connections of its own; particles hold the lines
/// that reach it.
#[derive(Debug, Clone)]
pub struct Cursor {
    position: Vec2,
    visible: bool,
    color: Rgba,
}

impl Cursor {
    pub fn new(color: Rgba) -> Self {
        Self {
            position: Vec2::ZERO,
            visible: false,
            color,
        }
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn enter(&mut self) {
        self.visible = true;
    }

    pub fn leave(&mut self) {
        self.visible = false;
    }

    pub fn move_to(&mut self, position: Vec2) {
        self.position = position;
    }
}

impl Endpoint for Cursor {
    fn position(&self) -> Vec2 {
        self.position
    }

    fn color(&self) -> Rgba {
        self.color
    }
}
