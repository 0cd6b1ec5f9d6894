//! Aim-assist trajectory preview
//!
//! Forward-simulates a hypothetical launch with the same `step` the live
//! game uses, on a private copy of the ball.

use glam::Vec2;

use super::obstacle::resolve_obstacles;
use super::state::BallState;
use super::step::step;
use crate::levels::Level;
use crate::settings::StepSettings;

/// Predict the path of `initial` through `level` starting at `initial_time`.
///
/// Geometry is re-resolved at every step's start time so moving obstacles
/// are anticipated. Each step appends the resulting position. After a step's
/// events are counted, the run stops once the total reaches
/// `max_collisions`; a cap of 0 means the collision count never stops the run.
pub fn simulate_trajectory(
    initial: &BallState,
    level: &Level,
    initial_time: f32,
    dt: f32,
    max_steps: usize,
    max_collisions: usize,
    settings: &StepSettings,
) -> Vec<Vec2> {
    let mut ball = *initial;
    let mut points = Vec::with_capacity(max_steps);
    let mut collisions = 0usize;

    for i in 0..max_steps {
        let time = initial_time + i as f32 * dt;
        let obstacles = resolve_obstacles(level, time);
        let result = step(&ball, &obstacles, dt, settings);

        ball = result.ball;
        points.push(ball.position);
        collisions += result.collisions.len();

        if max_collisions > 0 && collisions >= max_collisions {
            break;
        }
    }

    points
}
