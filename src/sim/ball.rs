//! Ball state

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::color::Rgb;
use crate::polar_to_cartesian;

/// A single ball
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ball {
    /// Stable ID, equal to the ball's index in `World::balls`
    pub id: u32,
    pub pos: Vec2,
    pub vel: Vec2,
    pub radius: f32,
    /// Per-ball multiplier on the global gravity
    pub gravity_scale: f32,
    pub color: Rgb,
}

impl Ball {
    pub fn new(id: u32, pos: Vec2, radius: f32, color: Rgb) -> Self {
        Self {
            id,
            pos,
            vel: Vec2::ZERO,
            radius,
            gravity_scale: 1.0,
            color,
        }
    }

    /// Aim the ball at `speed` in a uniformly random direction
    pub fn launch<R: Rng + ?Sized>(&mut self, speed: f32, rng: &mut R) {
        let angle = rng.random_range(0.0..std::f32::consts::TAU);
        self.vel = polar_to_cartesian(speed, angle);
    }
}
