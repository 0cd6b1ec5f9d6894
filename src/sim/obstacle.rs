//! Obstacle ("bumper") geometry
//!
//! Obstacles are immutable level data. Each physics sub-step projects them
//! into world space at the current simulation time:
//! - local vertices come from the shape tag and width/height
//! - static rotation turns them about the anchor
//! - periodic motion slides the whole rotated shape along one axis
//!
//! Resolution is always recomputed from scratch from `time`, never cached.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::levels::Level;
use crate::rotate_deg;

/// Which way a triangle's apex points
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Orientation {
    #[default]
    Up,
    Down,
    Left,
    Right,
}

/// Obstacle shape with shape-specific fields
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Shape {
    Rect,
    Triangle {
        #[serde(default)]
        orientation: Orientation,
    },
}

/// Axis a moving obstacle oscillates along
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Axis {
    X,
    Y,
}

/// Periodic motion: offset = amplitude * sin(time * speed + phase)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Motion {
    pub axis: Axis,
    pub amplitude: f32,
    /// Angular speed (radians/sec)
    pub speed: f32,
    #[serde(default)]
    pub phase: f32,
}

impl Motion {
    /// Anchor offset at `time`
    pub fn offset_at(&self, time: f32) -> Vec2 {
        let d = self.amplitude * (time * self.speed + self.phase).sin();
        match self.axis {
            Axis::X => Vec2::new(d, 0.0),
            Axis::Y => Vec2::new(0.0, d),
        }
    }

    /// Seconds for one full oscillation (infinite when stationary)
    pub fn period(&self) -> f32 {
        if self.speed == 0.0 {
            f32::INFINITY
        } else {
            std::f32::consts::TAU / self.speed.abs()
        }
    }
}

/// A bumper as authored in level data
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Obstacle {
    /// Unique within a level
    pub id: String,
    /// Display color, opaque to physics
    pub color: String,
    #[serde(flatten)]
    pub shape: Shape,
    /// Anchor before motion
    pub position: Vec2,
    pub width: f32,
    pub height: f32,
    /// Static rotation in degrees (clockwise on screen)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rotation: Option<f32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub motion: Option<Motion>,
}

impl Obstacle {
    pub fn rect(id: &str, color: &str, position: Vec2, width: f32, height: f32) -> Self {
        Self {
            id: id.to_string(),
            color: color.to_string(),
            shape: Shape::Rect,
            position,
            width,
            height,
            rotation: None,
            motion: None,
        }
    }

    pub fn triangle(
        id: &str,
        color: &str,
        orientation: Orientation,
        position: Vec2,
        width: f32,
        height: f32,
    ) -> Self {
        Self {
            shape: Shape::Triangle { orientation },
            ..Self::rect(id, color, position, width, height)
        }
    }

    /// Builder: static rotation in degrees
    pub fn rotated(mut self, degrees: f32) -> Self {
        self.rotation = Some(degrees);
        self
    }

    /// Builder: periodic motion
    pub fn moving(mut self, axis: Axis, amplitude: f32, speed: f32, phase: f32) -> Self {
        self.motion = Some(Motion {
            axis,
            amplitude,
            speed,
            phase,
        });
        self
    }

    /// Shape vertices about the local origin, before rotation.
    ///
    /// Every variant is wound the same way (clockwise on a y-down screen)
    /// so that `(dy, -dx)` of each edge points outward.
    pub fn local_vertices(&self) -> Vec<Vec2> {
        let hw = self.width / 2.0;
        let hh = self.height / 2.0;
        match self.shape {
            Shape::Rect => vec![
                Vec2::new(-hw, -hh),
                Vec2::new(hw, -hh),
                Vec2::new(hw, hh),
                Vec2::new(-hw, hh),
            ],
            Shape::Triangle { orientation } => match orientation {
                Orientation::Up => vec![
                    Vec2::new(0.0, -hh),
                    Vec2::new(hw, hh),
                    Vec2::new(-hw, hh),
                ],
                Orientation::Down => vec![
                    Vec2::new(0.0, hh),
                    Vec2::new(-hw, -hh),
                    Vec2::new(hw, -hh),
                ],
                Orientation::Left => vec![
                    Vec2::new(-hw, 0.0),
                    Vec2::new(hw, -hh),
                    Vec2::new(hw, hh),
                ],
                Orientation::Right => vec![
                    Vec2::new(hw, 0.0),
                    Vec2::new(-hw, hh),
                    Vec2::new(-hw, -hh),
                ],
            },
        }
    }

    /// Project into world space at simulation `time`
    pub fn resolve(&self, time: f32) -> ResolvedObstacle {
        let center = match &self.motion {
            Some(motion) => self.position + motion.offset_at(time),
            None => self.position,
        };
        let rotation = self.rotation.unwrap_or(0.0);

        let vertices = self
            .local_vertices()
            .into_iter()
            .map(|v| {
                let v = if rotation != 0.0 { rotate_deg(v, rotation) } else { v };
                v + center
            })
            .collect();

        ResolvedObstacle {
            id: self.id.clone(),
            color: self.color.clone(),
            shape: self.shape,
            center,
            vertices,
        }
    }
}

/// World-space polygon for one obstacle at one instant
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResolvedObstacle {
    pub id: String,
    pub color: String,
    pub shape: Shape,
    pub center: Vec2,
    /// Consistently wound, see [`Obstacle::local_vertices`]
    pub vertices: Vec<Vec2>,
}

impl ResolvedObstacle {
    /// Edges as (start, end) pairs, wrapping back to the first vertex
    pub fn edges(&self) -> impl Iterator<Item = (Vec2, Vec2)> + '_ {
        let n = self.vertices.len();
        (0..n).map(move |i| (self.vertices[i], self.vertices[(i + 1) % n]))
    }
}

/// Resolve every obstacle of `level` at `time`, preserving list order
pub fn resolve_obstacles(level: &Level, time: f32) -> Vec<ResolvedObstacle> {
    level.obstacles.iter().map(|o| o.resolve(time)).collect()
}
