//! Mutable ball state
//!
//! The only state the physics core advances. One driver owns it at a time.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Ball position and velocity (pixels, pixels/sec)
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct BallState {
    pub position: Vec2,
    pub velocity: Vec2,
}

impl BallState {
    /// Ball resting at `position`
    pub fn at_rest(position: Vec2) -> Self {
        Self {
            position,
            velocity: Vec2::ZERO,
        }
    }

    pub fn with_velocity(mut self, velocity: Vec2) -> Self {
        self.velocity = velocity;
        self
    }

    #[inline]
    pub fn speed(&self) -> f32 {
        self.velocity.length()
    }
}
