//! Level catalog
//!
//! Levels are static configuration: loaded once, never mutated. Only the
//! time-resolved projection of their obstacles changes during play.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::sim::obstacle::{Axis, Obstacle, Orientation};

/// Zone the ball must come to rest in
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Target {
    pub position: Vec2,
    /// Radius of the zone
    pub size: f32,
    pub color: String,
}

impl Target {
    pub fn contains(&self, point: Vec2) -> bool {
        self.position.distance(point) <= self.size
    }
}

/// One puzzle
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Level {
    pub id: u32,
    pub name: String,
    pub background: String,
    /// Collisions tolerated while the ball is moving
    pub bounce_limit: u32,
    pub ball_start: Vec2,
    pub target: Target,
    #[serde(default)]
    pub obstacles: Vec<Obstacle>,
}

/// Parse a JSON array of levels
pub fn from_json(json: &str) -> Result<Vec<Level>, serde_json::Error> {
    serde_json::from_str(json)
}

/// Level at `index`, clamped into the catalog
///
/// Returns `None` only for an empty catalog.
pub fn level_at(levels: &[Level], index: usize) -> Option<&Level> {
    levels.get(index.min(levels.len().saturating_sub(1)))
}

fn target(x: f32, y: f32, size: f32) -> Target {
    Target {
        position: Vec2::new(x, y),
        size,
        color: "#3ee88a".to_string(),
    }
}

/// The built-in levels, in play order
pub fn builtin() -> Vec<Level> {
    vec![
        Level {
            id: 1,
            name: "First Bounce".to_string(),
            background: "#10131c".to_string(),
            bounce_limit: 3,
            ball_start: Vec2::new(180.0, 560.0),
            target: target(180.0, 120.0, 40.0),
            obstacles: vec![
                Obstacle::rect("left-post", "#ff5577", Vec2::new(80.0, 330.0), 60.0, 24.0),
                Obstacle::rect("right-post", "#ff5577", Vec2::new(280.0, 330.0), 60.0, 24.0),
            ],
        },
        Level {
            id: 2,
            name: "Wedges".to_string(),
            background: "#151022".to_string(),
            bounce_limit: 4,
            ball_start: Vec2::new(70.0, 580.0),
            target: target(290.0, 110.0, 36.0),
            obstacles: vec![
                Obstacle::triangle("wedge-up", "#ffb347", Orientation::Up, Vec2::new(180.0, 420.0), 80.0, 60.0),
                Obstacle::triangle("wedge-down", "#ffb347", Orientation::Down, Vec2::new(110.0, 240.0), 70.0, 50.0),
                Obstacle::triangle("wedge-left", "#47b5ff", Orientation::Left, Vec2::new(300.0, 300.0), 50.0, 70.0),
                Obstacle::triangle("wedge-right", "#47b5ff", Orientation::Right, Vec2::new(40.0, 360.0), 50.0, 70.0),
            ],
        },
        Level {
            id: 3,
            name: "Tilted".to_string(),
            background: "#0f1a1a".to_string(),
            bounce_limit: 4,
            ball_start: Vec2::new(300.0, 580.0),
            target: target(70.0, 90.0, 34.0),
            obstacles: vec![
                Obstacle::rect("slab-a", "#a0f0e0", Vec2::new(130.0, 430.0), 140.0, 18.0).rotated(-20.0),
                Obstacle::rect("slab-b", "#a0f0e0", Vec2::new(240.0, 270.0), 140.0, 18.0).rotated(25.0),
                Obstacle::triangle("spike", "#f0e0a0", Orientation::Down, Vec2::new(180.0, 150.0), 40.0, 50.0)
                    .rotated(45.0),
            ],
        },
        Level {
            id: 4,
            name: "Sliders".to_string(),
            background: "#1c1010".to_string(),
            bounce_limit: 5,
            ball_start: Vec2::new(180.0, 590.0),
            target: target(180.0, 80.0, 32.0),
            obstacles: vec![
                Obstacle::rect("slider-low", "#ff7a45", Vec2::new(180.0, 430.0), 90.0, 20.0).moving(Axis::X, 110.0, 1.6, 0.0),
                Obstacle::rect("slider-high", "#ff7a45", Vec2::new(180.0, 250.0), 90.0, 20.0).moving(
                    Axis::X,
                    110.0,
                    1.6,
                    std::f32::consts::PI,
                ),
                Obstacle::triangle("bobber", "#ffd045", Orientation::Up, Vec2::new(70.0, 160.0), 44.0, 40.0)
                    .moving(Axis::Y, 30.0, 2.2, 0.5),
            ],
        },
        Level {
            id: 5,
            name: "Gauntlet".to_string(),
            background: "#0c0c14".to_string(),
            bounce_limit: 6,
            ball_start: Vec2::new(60.0, 590.0),
            target: target(300.0, 70.0, 30.0),
            obstacles: vec![
                Obstacle::rect("gate", "#e060ff", Vec2::new(180.0, 470.0), 120.0, 16.0)
                    .rotated(10.0)
                    .moving(Axis::X, 80.0, 1.2, 0.0),
                Obstacle::triangle("fang-left", "#60e0ff", Orientation::Right, Vec2::new(40.0, 320.0), 60.0, 80.0),
                Obstacle::triangle("fang-right", "#60e0ff", Orientation::Left, Vec2::new(320.0, 320.0), 60.0, 80.0),
                Obstacle::rect("pendulum", "#e060ff", Vec2::new(180.0, 200.0), 30.0, 90.0)
                    .rotated(-30.0)
                    .moving(Axis::Y, 40.0, 2.0, 1.0),
                Obstacle::triangle("cap", "#ffffff", Orientation::Down, Vec2::new(240.0, 130.0), 50.0, 36.0),
            ],
        },
    ]
}
