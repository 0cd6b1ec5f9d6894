//! Collision detection and response
//!
//! The ball is a circle; the arena is an axis-aligned box and obstacles are
//! convex polygons. Every hit is resolved the same way: push the ball out of
//! the surface along the contact normal, reflect velocity about that normal
//! and scale it by the damping factor.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::obstacle::ResolvedObstacle;
use super::state::BallState;
use crate::closest_point_on_segment;
use crate::settings::StepSettings;

pub const WALL_LEFT: &str = "wall-left";
pub const WALL_RIGHT: &str = "wall-right";
pub const WALL_TOP: &str = "wall-top";
pub const WALL_BOTTOM: &str = "wall-bottom";

/// What the ball struck
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CollisionKind {
    Wall,
    Bumper,
}

/// One surface struck during a step
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CollisionEvent {
    /// Obstacle id, or one of the `WALL_*` ids
    pub id: String,
    pub kind: CollisionKind,
    /// Unit normal pointing from the surface toward the ball
    pub normal: Vec2,
    /// Contact point on the surface
    pub point: Vec2,
}

/// Reflect velocity off a surface
///
/// Standard reflection: v' = v - 2(v·n)n
#[inline]
pub fn reflect_velocity(velocity: Vec2, normal: Vec2) -> Vec2 {
    velocity - 2.0 * velocity.dot(normal) * normal
}

/// Push out by `penetration` along `normal`, reflect and damp
fn bounce(ball: &mut BallState, normal: Vec2, penetration: f32, damping: f32) {
    ball.position += normal * penetration;
    ball.velocity = reflect_velocity(ball.velocity, normal) * damping;
}

/// Keep the ball inside the arena.
///
/// The x pair and the y pair are handled independently so a corner hit can
/// report two walls, but never both walls of one pair.
pub fn resolve_walls(ball: &mut BallState, settings: &StepSettings, events: &mut Vec<CollisionEvent>) {
    let r = settings.ball_radius;
    let (w, h) = (settings.world_width, settings.world_height);
    let d = settings.damping;

    if ball.position.x - r < 0.0 && ball.velocity.x < 0.0 {
        ball.position.x = r;
        ball.velocity.x = -ball.velocity.x * d;
        events.push(wall_event(WALL_LEFT, Vec2::X, Vec2::new(0.0, ball.position.y)));
    } else if ball.position.x + r > w && ball.velocity.x > 0.0 {
        ball.position.x = w - r;
        ball.velocity.x = -ball.velocity.x * d;
        events.push(wall_event(WALL_RIGHT, Vec2::NEG_X, Vec2::new(w, ball.position.y)));
    }

    if ball.position.y - r < 0.0 && ball.velocity.y < 0.0 {
        ball.position.y = r;
        ball.velocity.y = -ball.velocity.y * d;
        events.push(wall_event(WALL_TOP, Vec2::Y, Vec2::new(ball.position.x, 0.0)));
    } else if ball.position.y + r > h && ball.velocity.y > 0.0 {
        ball.position.y = h - r;
        ball.velocity.y = -ball.velocity.y * d;
        events.push(wall_event(WALL_BOTTOM, Vec2::NEG_Y, Vec2::new(ball.position.x, h)));
    }
}

fn wall_event(id: &str, normal: Vec2, point: Vec2) -> CollisionEvent {
    CollisionEvent {
        id: id.to_string(),
        kind: CollisionKind::Wall,
        normal,
        point,
    }
}

/// Check one polygon and resolve the first contact found.
///
/// Edges are tried first, in vertex order; the first edge the ball overlaps
/// while moving into it wins. Only if no edge matched are the vertices tried.
/// A ball center lying exactly on a feature has no normal and is skipped.
pub fn resolve_polygon(
    ball: &mut BallState,
    obstacle: &ResolvedObstacle,
    settings: &StepSettings,
) -> Option<CollisionEvent> {
    let r = settings.ball_radius;

    for (a, b) in obstacle.edges() {
        let e = b - a;
        let normal = Vec2::new(e.y, -e.x).normalize_or_zero();
        let closest = closest_point_on_segment(ball.position, a, b);
        let dist = ball.position.distance(closest);

        if dist == 0.0 || dist >= r || ball.velocity.dot(normal) >= 0.0 {
            continue;
        }

        bounce(ball, normal, r - dist, settings.damping);
        return Some(bumper_event(obstacle, normal, closest));
    }

    for &v in &obstacle.vertices {
        let to_ball = ball.position - v;
        let dist = to_ball.length();

        if dist == 0.0 || dist >= r || ball.velocity.dot(-to_ball) <= 0.0 {
            continue;
        }

        let normal = to_ball / dist;
        bounce(ball, normal, r - dist, settings.damping);
        return Some(bumper_event(obstacle, normal, v));
    }

    None
}

fn bumper_event(obstacle: &ResolvedObstacle, normal: Vec2, point: Vec2) -> CollisionEvent {
    CollisionEvent {
        id: obstacle.id.clone(),
        kind: CollisionKind::Bumper,
        normal,
        point,
    }
}

/// Resolve obstacles in list order, at most one event per id
pub fn resolve_bumpers(
    ball: &mut BallState,
    obstacles: &[ResolvedObstacle],
    settings: &StepSettings,
    events: &mut Vec<CollisionEvent>,
) {
    for obstacle in obstacles {
        if let Some(event) = resolve_polygon(ball, obstacle, settings) {
            if !events.iter().any(|e| e.id == event.id) {
                events.push(event);
            }
        }
    }
}
