//! Ricochet headless runner
//!
//! Plays every built-in level with seeded random drags and logs what
//! happened. Usage: `ricochet [settings.json] [seed]`

use std::path::Path;

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use ricochet::input::{DragGesture, launch_velocity};
use ricochet::{Phase, PlaySession, Settings, levels};

/// Attempts per level before giving up
const MAX_ATTEMPTS: usize = 25;
/// Frame cap per attempt (60 seconds at 60 fps)
const MAX_FRAMES: usize = 60 * 60;
const FRAME_DT: f32 = 1.0 / 60.0;

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let mut args = std::env::args().skip(1);
    let settings = match args.next() {
        Some(path) => Settings::load(Path::new(&path)),
        None => Settings::default(),
    };
    let seed = args.next().and_then(|s| s.parse().ok()).unwrap_or(0x5eed_u64);
    log::info!("Ricochet (headless) starting, seed {}", seed);

    let mut rng = Pcg32::seed_from_u64(seed);
    let mut cleared = 0;
    let catalog = levels::builtin();

    for level in &catalog {
        let mut session = PlaySession::new(level.clone(), settings.clone());
        if let Some(attempt) = play_level(&mut session, &mut rng) {
            log::info!("Cleared \"{}\" on attempt {}", level.name, attempt);
            cleared += 1;
        } else {
            log::warn!("Gave up on \"{}\" after {} attempts", level.name, MAX_ATTEMPTS);
        }
    }

    log::info!("Cleared {}/{} levels", cleared, catalog.len());
}

/// Try random aims until one wins; returns the winning attempt number
fn play_level(session: &mut PlaySession, rng: &mut Pcg32) -> Option<usize> {
    let launch = session.settings().launch;

    for attempt in 1..=MAX_ATTEMPTS {
        session.restart();

        // Let the obstacles drift a random amount before aiming
        let wait_frames = rng.random_range(0..120);
        for _ in 0..wait_frames {
            session.advance(FRAME_DT);
        }

        let start = session.ball().position;
        let mut drag = DragGesture::new(start);
        let angle = rng.random_range(0.0..std::f32::consts::TAU);
        let pull = rng.random_range(launch.min_drag_distance..=launch.max_drag_distance);
        drag.update(start + Vec2::from_angle(angle) * pull);

        let velocity = launch_velocity(&drag, &launch);
        let preview = session.preview(velocity);
        log::debug!("Attempt {}: preview {} points", attempt, preview.len());

        if !session.launch(velocity) {
            continue;
        }

        for _ in 0..MAX_FRAMES {
            if session.advance(FRAME_DT).finished.is_some() {
                break;
            }
        }

        match session.phase() {
            Phase::Won => return Some(attempt),
            phase => log::info!(
                "Attempt {}: {:?} with {} bounces",
                attempt,
                phase,
                session.bounces()
            ),
        }
    }

    None
}
