//! Drag-to-launch input
//!
//! The player pulls back from the ball; the launch goes the opposite way,
//! faster the further they pulled, up to a cap.

use glam::Vec2;

use crate::settings::LaunchSettings;

/// A drag in progress (screen space, same units as the world)
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct DragGesture {
    pub start: Vec2,
    pub current: Vec2,
}

impl DragGesture {
    pub fn new(start: Vec2) -> Self {
        Self {
            start,
            current: start,
        }
    }

    pub fn update(&mut self, current: Vec2) {
        self.current = current;
    }

    /// Pull vector from start to current pointer
    pub fn pull(&self) -> Vec2 {
        self.current - self.start
    }

    /// Long enough to count as a launch rather than a tap
    pub fn is_launchable(&self, launch: &LaunchSettings) -> bool {
        self.pull().length() >= launch.min_drag_distance
    }
}

/// Launch velocity for a drag: opposite the pull, scaled by capped length.
///
/// A zero-length drag yields the zero vector.
pub fn launch_velocity(gesture: &DragGesture, launch: &LaunchSettings) -> Vec2 {
    let pull = gesture.pull();
    let distance = pull.length().min(launch.max_drag_distance);
    let power = if launch.max_drag_distance > 0.0 {
        distance / launch.max_drag_distance
    } else {
        0.0
    };
    (-pull).normalize_or_zero() * power * launch.max_launch_speed
}
