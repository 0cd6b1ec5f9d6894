//! Physics and gameplay tunables
//!
//! Loaded once per play session from JSON; any missing field falls back to
//! its default.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Constants the integrator reads every step
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StepSettings {
    pub ball_radius: f32,
    pub world_width: f32,
    pub world_height: f32,
    /// Fraction of velocity kept after a bounce (0 < damping <= 1)
    pub damping: f32,
    /// Linear velocity decay per second
    pub friction: f32,
    pub max_speed: f32,
}

impl Default for StepSettings {
    fn default() -> Self {
        Self {
            ball_radius: BALL_RADIUS,
            world_width: WORLD_WIDTH,
            world_height: WORLD_HEIGHT,
            damping: BOUNCE_DAMPING,
            friction: FRICTION,
            max_speed: BALL_MAX_SPEED,
        }
    }
}

/// Drag-to-launch scaling
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LaunchSettings {
    /// Drag length that yields full launch speed
    pub max_drag_distance: f32,
    /// Shorter drags are treated as cancelled
    pub min_drag_distance: f32,
    pub max_launch_speed: f32,
}

impl Default for LaunchSettings {
    fn default() -> Self {
        Self {
            max_drag_distance: 160.0,
            min_drag_distance: 12.0,
            max_launch_speed: 1100.0,
        }
    }
}

/// Trajectory preview budget
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PreviewSettings {
    pub dt: f32,
    pub max_steps: usize,
    /// 0 disables the collision cap
    pub max_collisions: usize,
}

impl Default for PreviewSettings {
    fn default() -> Self {
        Self {
            dt: 1.0 / 60.0,
            max_steps: 90,
            max_collisions: 3,
        }
    }
}

/// Frame driver scheduling
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FrameSettings {
    pub max_frame_dt: f32,
    pub substep_ceiling: f32,
}

impl Default for FrameSettings {
    fn default() -> Self {
        Self {
            max_frame_dt: MAX_FRAME_DT,
            substep_ceiling: SUBSTEP_CEILING,
        }
    }
}

/// All game tunables
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub physics: StepSettings,
    pub launch: LaunchSettings,
    pub preview: PreviewSettings,
    pub frame: FrameSettings,
    /// Below this speed (px/s) a rolling ball counts as settled
    pub settle_speed: f32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            physics: StepSettings::default(),
            launch: LaunchSettings::default(),
            preview: PreviewSettings::default(),
            frame: FrameSettings::default(),
            settle_speed: 20.0,
        }
    }
}

impl Settings {
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn to_json(&self) -> String {
        // Plain data with string keys; serialization cannot fail
        serde_json::to_string_pretty(self).unwrap_or_default()
    }

    /// Load settings from a JSON file, falling back to defaults
    pub fn load(path: &Path) -> Self {
        match std::fs::read_to_string(path) {
            Ok(json) => match Self::from_json(&json) {
                Ok(settings) => {
                    log::info!("Loaded settings from {}", path.display());
                    settings
                }
                Err(e) => {
                    log::warn!("Invalid settings in {}: {} - using defaults", path.display(), e);
                    Self::default()
                }
            },
            Err(e) => {
                log::warn!("Could not read {}: {} - using defaults", path.display(), e);
                Self::default()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_reference_tuning() {
        let s = StepSettings::default();
        assert_eq!(s.ball_radius, 14.0);
        assert_eq!((s.world_width, s.world_height), (360.0, 640.0));
        assert_eq!(s.damping, 0.88);
        assert_eq!(s.friction, 0.18);
        assert!(Settings::default().launch.max_launch_speed <= s.max_speed);
    }

    #[test]
    fn test_partial_json_fills_defaults() {
        let s = Settings::from_json(r#"{"physics": {"damping": 0.5}, "settle_speed": 8.0}"#).unwrap();
        assert_eq!(s.physics.damping, 0.5);
        assert_eq!(s.physics.ball_radius, BALL_RADIUS);
        assert_eq!(s.settle_speed, 8.0);
        assert_eq!(s.preview, PreviewSettings::default());
    }

    #[test]
    fn test_json_roundtrip() {
        let s = Settings::default();
        assert_eq!(Settings::from_json(&s.to_json()).unwrap(), s);
    }

    #[test]
    fn test_load_missing_file_uses_defaults() {
        let s = Settings::load(Path::new("/nonexistent/ricochet-settings.json"));
        assert_eq!(s, Settings::default());
    }

    #[test]
    fn test_invalid_json_is_error() {
        assert!(Settings::from_json("{ not json").is_err());
    }
}
