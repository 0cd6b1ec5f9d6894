//! Single physics step
//!
//! Semi-implicit Euler: move by the current velocity, decay and cap the
//! velocity, then resolve walls followed by obstacles in list order.
//! The function is pure; callers choose how many sub-steps to run.

use serde::{Deserialize, Serialize};

use super::collision::{CollisionEvent, resolve_bumpers, resolve_walls};
use super::obstacle::ResolvedObstacle;
use super::state::BallState;
use crate::settings::StepSettings;

/// Outcome of one step
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StepResult {
    pub ball: BallState,
    pub collisions: Vec<CollisionEvent>,
}

/// Advance `ball` by `dt` seconds against already-resolved geometry
pub fn step(
    ball: &BallState,
    obstacles: &[ResolvedObstacle],
    dt: f32,
    settings: &StepSettings,
) -> StepResult {
    let mut next = BallState {
        position: ball.position + ball.velocity * dt,
        velocity: ball.velocity,
    };

    // Clamped at zero so a huge dt stops the ball instead of reversing it
    let decay = (1.0 - settings.friction * dt).max(0.0);
    next.velocity *= decay;

    if next.velocity.length() > settings.max_speed {
        next.velocity = next.velocity.normalize_or_zero() * settings.max_speed;
    }

    let mut collisions = Vec::new();
    resolve_walls(&mut next, settings, &mut collisions);
    resolve_bumpers(&mut next, obstacles, settings, &mut collisions);

    StepResult {
        ball: next,
        collisions,
    }
}
