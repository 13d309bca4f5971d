//! Native entry point
//!
//! Drives sessions headlessly with a small autopilot: aim at the
//! nearest asteroid, hold fire, and keep going until the session ends.
//! A windowed host would run the same loop, sampling real input and
//! compositing the scene each frame.

use std::time::{SystemTime, UNIX_EPOCH};

use glam::Vec2;

use asteroid_rain::consts::*;
use asteroid_rain::sim::{InputSnapshot, Phase, Session, Verdict};

/// Frames of game over the autopilot watches before quitting
const GAME_OVER_GRACE_FRAMES: u32 = 120;
/// Cap on demo playing time (seconds)
const DEMO_TIME_LIMIT: f32 = 120.0;

fn main() {
    env_logger::init();

    let seed = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_millis() as u64)
        .unwrap_or(0);

    let mut round = 0u64;
    loop {
        log::info!("starting session with seed {}", seed + round);
        match run_session(Session::new(seed + round)) {
            Verdict::Restart => round += 1,
            Verdict::Quit => break,
        }
    }
}

/// Drive one session at the 60 Hz target until it returns a verdict.
fn run_session(mut session: Session) -> Verdict {
    let dt = 1.0 / TARGET_FPS as f32;
    let mut grace = GAME_OVER_GRACE_FRAMES;

    loop {
        let mut input = autopilot(&session);
        if session.phase == Phase::GameOver {
            grace -= 1;
            if grace == 0 {
                input.quit = true;
            }
        } else if session.elapsed > DEMO_TIME_LIMIT {
            input.quit = true;
        }

        if let Some(verdict) = session.frame(&input, dt) {
            log::info!(
                "session over: score {} after {:.1} s",
                session.score,
                session.elapsed
            );
            return verdict;
        }

        // A presenter would composite this; the headless demo only
        // exercises the boundary.
        let _scene = session.scene();
    }
}

/// Minimal self-play: point at the closest asteroid and hold fire.
fn autopilot(session: &Session) -> InputSnapshot {
    let origin = session
        .registry
        .player
        .as_ref()
        .map(|p| p.position)
        .unwrap_or(Vec2::new(FRAME_WIDTH / 2.0, FRAME_HEIGHT / 2.0));

    let nearest = session
        .registry
        .asteroids
        .iter()
        .min_by(|a, b| {
            let da = (a.position - origin).length_squared();
            let db = (b.position - origin).length_squared();
            da.partial_cmp(&db).unwrap_or(std::cmp::Ordering::Equal)
        })
        .map(|a| a.position);

    InputSnapshot {
        pointer: nearest.unwrap_or(Vec2::new(origin.x, 0.0)),
        fire: true,
        ..Default::default()
    }
}
