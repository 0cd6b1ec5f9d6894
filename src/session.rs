//! Play session: the frame driver around the physics core
//!
//! Owns the single live `BallState` for a level attempt. The host calls
//! `advance` once per rendered frame with the elapsed time; the session caps
//! it, splits it into fixed-ceiling sub-steps, resolves obstacle geometry
//! for each sub-step and runs the integrator. Rendering only ever sees
//! `SessionSnapshot` copies.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::levels::Level;
use crate::settings::Settings;
use crate::sim::{
    BallState, CollisionEvent, ResolvedObstacle, resolve_obstacles, simulate_trajectory, step,
};

/// Why a run failed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LossReason {
    /// More collisions than the level allows
    BounceLimit,
    /// Came to rest outside the target
    Stalled,
}

/// Current phase of a level attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Phase {
    /// Ball at the start position, waiting for a drag
    Aiming,
    /// Ball in flight
    Rolling,
    /// Settled inside the target
    Won,
    Lost(LossReason),
}

impl Phase {
    pub fn is_finished(&self) -> bool {
        matches!(self, Phase::Won | Phase::Lost(_))
    }
}

/// What happened during one `advance` call
#[derive(Debug, Clone, Default)]
pub struct FrameReport {
    pub substeps: u32,
    /// Every event from every sub-step, in order
    pub collisions: Vec<CollisionEvent>,
    /// Set when the run finished during this frame
    pub finished: Option<Phase>,
}

/// Immutable copy of session state for rendering/UI
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionSnapshot {
    pub level_id: u32,
    pub ball: BallState,
    pub phase: Phase,
    pub bounces: u32,
    pub bounces_remaining: u32,
    pub time: f32,
    pub obstacles: Vec<ResolvedObstacle>,
}

/// A single attempt at a level
#[derive(Debug, Clone)]
pub struct PlaySession {
    level: Level,
    settings: Settings,
    ball: BallState,
    phase: Phase,
    bounces: u32,
    /// Simulation clock driving obstacle motion (seconds)
    time: f32,
}

impl PlaySession {
    pub fn new(level: Level, settings: Settings) -> Self {
        log::info!(
            "Level {} \"{}\": {} obstacles, bounce limit {}",
            level.id,
            level.name,
            level.obstacles.len(),
            level.bounce_limit
        );
        Self {
            ball: BallState::at_rest(level.ball_start),
            level,
            settings,
            phase: Phase::Aiming,
            bounces: 0,
            time: 0.0,
        }
    }

    pub fn level(&self) -> &Level {
        &self.level
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn ball(&self) -> BallState {
        self.ball
    }

    pub fn bounces(&self) -> u32 {
        self.bounces
    }

    pub fn time(&self) -> f32 {
        self.time
    }

    /// Put the ball back at the start and rewind the clock
    pub fn restart(&mut self) {
        self.ball = BallState::at_rest(self.level.ball_start);
        self.phase = Phase::Aiming;
        self.bounces = 0;
        self.time = 0.0;
        log::info!("Level {} restarted", self.level.id);
    }

    /// Launch the ball. Ignored unless aiming, or if too slow to move.
    pub fn launch(&mut self, velocity: Vec2) -> bool {
        if self.phase != Phase::Aiming {
            return false;
        }
        if velocity.length() <= self.settings.settle_speed {
            log::debug!("Launch too weak ({:.1} px/s), ignored", velocity.length());
            return false;
        }
        self.ball.velocity = velocity;
        self.phase = Phase::Rolling;
        log::info!(
            "Launched at ({:.1}, {:.1}) t={:.3}",
            velocity.x,
            velocity.y,
            self.time
        );
        true
    }

    /// Aim-assist path for a launch at `velocity` from the current moment
    pub fn preview(&self, velocity: Vec2) -> Vec<Vec2> {
        let preview = &self.settings.preview;
        simulate_trajectory(
            &self.ball.with_velocity(velocity),
            &self.level,
            self.time,
            preview.dt,
            preview.max_steps,
            preview.max_collisions,
            &self.settings.physics,
        )
    }

    /// Advance by one external frame of `frame_dt` seconds
    pub fn advance(&mut self, frame_dt: f32) -> FrameReport {
        let mut report = FrameReport::default();
        let frame = &self.settings.frame;
        let dt = frame_dt.clamp(0.0, frame.max_frame_dt);
        if dt <= 0.0 || frame.substep_ceiling <= 0.0 {
            return report;
        }

        // Tolerance keeps exact multiples (1/60 over 1/240) from rounding up
        let substeps = ((dt / frame.substep_ceiling) - 1e-3).ceil().max(1.0) as u32;
        let sub_dt = dt / substeps as f32;

        for _ in 0..substeps {
            if self.phase == Phase::Rolling {
                let obstacles = resolve_obstacles(&self.level, self.time);
                let result = step(&self.ball, &obstacles, sub_dt, &self.settings.physics);
                self.ball = result.ball;

                for event in &result.collisions {
                    log::debug!(
                        "Hit {} ({:?}) at ({:.1}, {:.1})",
                        event.id,
                        event.kind,
                        event.point.x,
                        event.point.y
                    );
                }
                self.bounces += result.collisions.len() as u32;
                report.collisions.extend(result.collisions);

                if let Some(outcome) = self.check_outcome() {
                    self.phase = outcome;
                    report.finished = Some(outcome);
                    log::info!(
                        "Level {} finished: {:?} after {} bounces",
                        self.level.id,
                        outcome,
                        self.bounces
                    );
                }
            }
            self.time += sub_dt;
            report.substeps += 1;
        }

        report
    }

    fn check_outcome(&self) -> Option<Phase> {
        if self.bounces > self.level.bounce_limit {
            return Some(Phase::Lost(LossReason::BounceLimit));
        }
        if self.ball.speed() < self.settings.settle_speed {
            if self.level.target.contains(self.ball.position) {
                return Some(Phase::Won);
            }
            return Some(Phase::Lost(LossReason::Stalled));
        }
        None
    }

    /// Publish an immutable copy for rendering
    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            level_id: self.level.id,
            ball: self.ball,
            phase: self.phase,
            bounces: self.bounces,
            bounces_remaining: self.level.bounce_limit.saturating_sub(self.bounces),
            time: self.time,
            obstacles: resolve_obstacles(&self.level, self.time),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::levels::{Target, builtin};
    use crate::sim::{CollisionKind, Obstacle};

    fn open_level(bounce_limit: u32, target: Vec2) -> Level {
        Level {
            id: 42,
            name: "Open".to_string(),
            background: "#000".to_string(),
            bounce_limit,
            ball_start: Vec2::new(180.0, 320.0),
            target: Target {
                position: target,
                size: 40.0,
                color: "#0f0".to_string(),
            },
            obstacles: Vec::new(),
        }
    }

    fn run_until_finished(session: &mut PlaySession, max_frames: usize) -> Option<Phase> {
        for _ in 0..max_frames {
            if let Some(phase) = session.advance(1.0 / 60.0).finished {
                return Some(phase);
            }
        }
        None
    }

    #[test]
    fn test_new_session_is_aiming_at_start() {
        let level = builtin().remove(0);
        let start = level.ball_start;
        let session = PlaySession::new(level, Settings::default());
        assert_eq!(session.phase(), Phase::Aiming);
        assert_eq!(session.ball(), BallState::at_rest(start));
        assert_eq!(session.time(), 0.0);
    }

    #[test]
    fn test_aiming_keeps_ball_still_but_clock_runs() {
        let level = builtin().remove(3);
        let mut session = PlaySession::new(level, Settings::default());
        let before = session.snapshot();
        let report = session.advance(1.0 / 60.0);
        assert_eq!(report.substeps, 4);
        assert!(report.collisions.is_empty());
        assert_eq!(session.ball(), before.ball);
        assert!((session.time() - 1.0 / 60.0).abs() < 1e-6);
        // Moving obstacles have moved
        assert_ne!(session.snapshot().obstacles, before.obstacles);
    }

    #[test]
    fn test_frame_dt_is_capped() {
        let mut session = PlaySession::new(open_level(3, Vec2::ZERO), Settings::default());
        let report = session.advance(1.0);
        assert_eq!(report.substeps, 12);
        assert!((session.time() - 0.05).abs() < 1e-5);
        assert_eq!(session.advance(-1.0).substeps, 0);
    }

    #[test]
    fn test_substeps_match_regardless_of_frame_split() {
        let mut one = PlaySession::new(open_level(10, Vec2::ZERO), Settings::default());
        let mut four = one.clone();
        assert!(one.launch(Vec2::new(400.0, -250.0)));
        assert!(four.launch(Vec2::new(400.0, -250.0)));

        one.advance(0.05);
        for _ in 0..4 {
            four.advance(0.0125);
        }
        assert_eq!(one.ball(), four.ball());
    }

    #[test]
    fn test_launch_only_while_aiming() {
        let mut session = PlaySession::new(open_level(3, Vec2::ZERO), Settings::default());
        assert!(!session.launch(Vec2::new(1.0, 0.0)));
        assert_eq!(session.phase(), Phase::Aiming);
        assert!(session.launch(Vec2::new(0.0, -300.0)));
        assert_eq!(session.phase(), Phase::Rolling);
        assert!(!session.launch(Vec2::new(0.0, 300.0)));
    }

    #[test]
    fn test_wall_hits_are_reported_and_counted() {
        let mut session = PlaySession::new(open_level(10, Vec2::ZERO), Settings::default());
        session.launch(Vec2::new(-900.0, 0.0));
        let mut walls = 0;
        for _ in 0..30 {
            walls += session
                .advance(1.0 / 60.0)
                .collisions
                .iter()
                .filter(|e| e.kind == CollisionKind::Wall)
                .count();
        }
        assert!(walls >= 1);
        assert_eq!(session.bounces() as usize, walls);
    }

    #[test]
    fn test_exceeding_bounce_limit_loses() {
        let mut session = PlaySession::new(open_level(1, Vec2::ZERO), Settings::default());
        // Fast horizontal shot ricochets between the side walls
        session.launch(Vec2::new(1200.0, 0.0));
        let outcome = run_until_finished(&mut session, 600);
        assert_eq!(outcome, Some(Phase::Lost(LossReason::BounceLimit)));
        assert_eq!(session.bounces(), 2);
    }

    #[test]
    fn test_settling_in_target_wins() {
        let mut session = PlaySession::new(open_level(3, Vec2::new(180.0, 320.0)), Settings::default());
        // Just above the settle speed; friction brings it to rest within a few px
        session.launch(Vec2::new(0.0, -25.0));
        let outcome = run_until_finished(&mut session, 600);
        assert_eq!(outcome, Some(Phase::Won));
        assert!(session.phase().is_finished());
    }

    #[test]
    fn test_settling_outside_target_stalls() {
        let mut session = PlaySession::new(open_level(3, Vec2::new(40.0, 40.0)), Settings::default());
        session.launch(Vec2::new(0.0, -25.0));
        let outcome = run_until_finished(&mut session, 600);
        assert_eq!(outcome, Some(Phase::Lost(LossReason::Stalled)));
    }

    #[test]
    fn test_finished_session_stops_moving() {
        let mut session = PlaySession::new(open_level(3, Vec2::new(40.0, 40.0)), Settings::default());
        session.launch(Vec2::new(0.0, -25.0));
        run_until_finished(&mut session, 600);
        let ball = session.ball();
        session.advance(1.0 / 60.0);
        assert_eq!(session.ball(), ball);
    }

    #[test]
    fn test_restart_resets_everything() {
        let level = builtin().remove(1);
        let start = level.ball_start;
        let mut session = PlaySession::new(level, Settings::default());
        session.launch(Vec2::new(300.0, -700.0));
        for _ in 0..90 {
            session.advance(1.0 / 60.0);
        }
        session.restart();
        assert_eq!(session.phase(), Phase::Aiming);
        assert_eq!(session.ball(), BallState::at_rest(start));
        assert_eq!(session.bounces(), 0);
        assert_eq!(session.time(), 0.0);
    }

    #[test]
    fn test_snapshot_is_detached() {
        let mut session = PlaySession::new(open_level(5, Vec2::ZERO), Settings::default());
        session.launch(Vec2::new(200.0, 200.0));
        let snap = session.snapshot();
        session.advance(1.0 / 60.0);
        assert_ne!(snap.ball, session.ball());
        assert_eq!(snap.bounces_remaining, 5);
        assert_eq!(snap.phase, Phase::Rolling);
    }

    #[test]
    fn test_preview_matches_live_flight() {
        let mut level = open_level(10, Vec2::ZERO);
        level
            .obstacles
            .push(Obstacle::rect("block", "#fff", Vec2::new(180.0, 200.0), 120.0, 20.0));
        let mut settings = Settings::default();
        settings.preview.dt = settings.frame.substep_ceiling;
        settings.preview.max_steps = 40;
        settings.preview.max_collisions = 0;
        let frame_dt = 4.0 * settings.frame.substep_ceiling;

        let mut session = PlaySession::new(level, settings);
        let velocity = Vec2::new(60.0, -800.0);
        let path = session.preview(velocity);
        assert_eq!(path.len(), 40);
        assert_eq!(session.phase(), Phase::Aiming);

        session.launch(velocity);
        // 10 frames of 4 sub-steps each at the same dt as the preview
        for _ in 0..10 {
            session.advance(frame_dt);
        }
        assert!((session.ball().position - path[39]).length() < 1e-3);
    }
}
