//! Deterministic physics core
//!
//! Everything the ball does lives here. This module must be pure and deterministic:
//! - Caller-chosen timestep, no clocks
//! - Geometry recomputed from (obstacle, time), never cached
//! - Stable iteration order (obstacle list order)
//! - No rendering, storage or platform dependencies

pub mod collision;
pub mod obstacle;
pub mod state;
pub mod step;
pub mod trajectory;

pub use collision::{CollisionEvent, CollisionKind, reflect_velocity};
pub use obstacle::{Axis, Motion, Obstacle, Orientation, ResolvedObstacle, Shape, resolve_obstacles};
pub use state::BallState;
pub use step::{StepResult, step};
pub use trajectory::simulate_trajectory;
