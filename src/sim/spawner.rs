//! Timed spawning
//!
//! Scheduler state for the three recurring timers: held-fire repeat,
//! asteroid spawn (interval decays with elapsed playing time) and
//! power-up spawn. Timers advance by the real frame dt and re-arm at
//! trigger time from the elapsed-time snapshot passed in, so a decayed
//! interval is never computed from stale time.

use glam::Vec2;
use rand::Rng;

use crate::consts::*;

/// A due timer event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerEvent {
    Fire,
    SpawnAsteroid,
    SpawnPowerUp,
}

/// Recurring-timer scheduler
#[derive(Debug, Clone)]
pub struct Spawner {
    /// Seconds until the next held-fire shot; `None` while fire is
    /// released
    fire: Option<f32>,
    asteroid: f32,
    power_up: f32,
}

impl Spawner {
    pub fn new() -> Self {
        Self {
            fire: None,
            asteroid: ASTEROID_SPAWN_SECS,
            power_up: POWER_UP_SPAWN_SECS,
        }
    }

    /// Arm the repeat timer after a shot. The period follows the
    /// fire-rate effect active at arm time.
    pub fn arm_fire(&mut self, fast: bool) {
        self.fire = Some(fire_period(fast));
    }

    /// Disarm entirely; no shots until the next arm.
    pub fn disarm_fire(&mut self) {
        self.fire = None;
    }

    pub fn fire_armed(&self) -> bool {
        self.fire.is_some()
    }

    /// Advance all timers by `dt` and collect every event that came
    /// due. An interval shorter than the frame comes due more than once.
    pub fn poll(&mut self, dt: f32, elapsed: f32, fast_fire: bool) -> Vec<TimerEvent> {
        let mut events = Vec::new();
        if let Some(left) = self.fire.as_mut() {
            *left -= dt;
            while *left <= 0.0 {
                events.push(TimerEvent::Fire);
                *left += fire_period(fast_fire);
            }
        }
        self.asteroid -= dt;
        while self.asteroid <= 0.0 {
            events.push(TimerEvent::SpawnAsteroid);
            self.asteroid += asteroid_interval(elapsed);
        }
        self.power_up -= dt;
        while self.power_up <= 0.0 {
            events.push(TimerEvent::SpawnPowerUp);
            self.power_up += POWER_UP_SPAWN_SECS;
        }
        events
    }
}

impl Default for Spawner {
    fn default() -> Self {
        Self::new()
    }
}

/// Shot repeat period for the current fire-rate effect
pub fn fire_period(fast: bool) -> f32 {
    if fast { FAST_FIRE_PERIOD } else { FIRE_PERIOD }
}

/// Asteroid spawn interval after `elapsed` seconds of play: decays
/// exponentially, floored so runaway scheduling is impossible.
pub fn asteroid_interval(elapsed: f32) -> f32 {
    (ASTEROID_SPAWN_SECS * ASTEROID_SPAWN_DECAY.powf(elapsed)).max(MIN_SPAWN_SECS)
}

/// One of the evenly spaced entry points along the top edge
pub fn spawn_lane(rng: &mut impl Rng) -> Vec2 {
    Vec2::new(lane_x(rng), 0.0)
}

/// One of the evenly spaced travel targets along the bottom edge. The
/// target lane is drawn independently of the spawn lane.
pub fn target_lane(rng: &mut impl Rng) -> Vec2 {
    Vec2::new(lane_x(rng), FRAME_HEIGHT)
}

fn lane_x(rng: &mut impl Rng) -> f32 {
    rng.random_range(0..LANE_COUNT) as f32 * (FRAME_WIDTH / LANE_COUNT as f32)
}
