//! Ricochet - a drag-to-launch bounce puzzle
//!
//! Core modules:
//! - `sim`: Deterministic physics (geometry, collisions, integrator, preview)
//! - `levels`: Static level catalog
//! - `settings`: Physics and gameplay tunables
//! - `input`: Drag gesture to launch velocity
//! - `session`: Frame driver and run outcome tracking

pub mod input;
pub mod levels;
pub mod session;
pub mod settings;
pub mod sim;

pub use levels::{Level, Target};
pub use session::{LossReason, Phase, PlaySession, SessionSnapshot};
pub use settings::{Settings, StepSettings};

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Largest physics sub-step (240 Hz)
    pub const SUBSTEP_CEILING: f32 = 1.0 / 240.0;
    /// Frame deltas are capped to this before sub-stepping
    pub const MAX_FRAME_DT: f32 = 0.05;

    /// World dimensions (portrait, y grows downward)
    pub const WORLD_WIDTH: f32 = 360.0;
    pub const WORLD_HEIGHT: f32 = 640.0;

    /// Ball defaults
    pub const BALL_RADIUS: f32 = 14.0;
    /// Velocity retained along the normal after a bounce
    pub const BOUNCE_DAMPING: f32 = 0.88;
    /// Linear velocity decay per second
    pub const FRICTION: f32 = 0.18;
    pub const BALL_MAX_SPEED: f32 = 1400.0;

    /// Floor for segment projection denominators
    pub const MIN_SEGMENT_LEN_SQ: f32 = 1e-6;
}

/// Rotate a vector about the origin by `degrees`.
///
/// With y pointing down the screen, positive angles turn clockwise.
#[inline]
pub fn rotate_deg(v: Vec2, degrees: f32) -> Vec2 {
    let (sin, cos) = degrees.to_radians().sin_cos();
    Vec2::new(v.x * cos - v.y * sin, v.x * sin + v.y * cos)
}

/// Closest point to `p` on the finite segment `a`-`b`
#[inline]
pub fn closest_point_on_segment(p: Vec2, a: Vec2, b: Vec2) -> Vec2 {
    let ab = b - a;
    let denom = ab.length_squared().max(consts::MIN_SEGMENT_LEN_SQ);
    let t = ((p - a).dot(ab) / denom).clamp(0.0, 1.0);
    a + ab * t
}
