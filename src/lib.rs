//! Asteroid Rain - a frame-driven arcade survival game core
//!
//! Core modules:
//! - `sim`: entity model, registry, timed spawning, collision resolution
//!   and the playing/game-over state machine
//! - `scene`: the draw list handed to a presenter each frame
//!
//! Windowing, input polling and font rasterization live outside this
//! crate. A host samples an [`sim::InputSnapshot`] once per frame, calls
//! [`sim::Session::frame`] with the measured frame time, and composites
//! the [`Scene`] returned by [`sim::Session::scene`].

pub mod scene;
pub mod sim;

pub use scene::Scene;
pub use sim::{InputSnapshot, Session, Verdict};

/// Game configuration constants
pub mod consts {
    /// Visible frame size in pixels
    pub const FRAME_WIDTH: f32 = 720.0;
    pub const FRAME_HEIGHT: f32 = 480.0;
    /// Target refresh rate (frames are paced to this, dt stays measured)
    pub const TARGET_FPS: u32 = 60;

    /// Evenly spaced entry/exit lanes along the top and bottom edges
    pub const LANE_COUNT: usize = 32;

    /// Base asteroid spawn interval (seconds)
    pub const ASTEROID_SPAWN_SECS: f32 = 1.0;
    /// Decay applied to the asteroid interval per elapsed second of play
    pub const ASTEROID_SPAWN_DECAY: f32 = 0.95;
    /// Spawn interval floor (seconds)
    pub const MIN_SPAWN_SECS: f32 = 0.010;
    /// Power-up spawn interval (seconds)
    pub const POWER_UP_SPAWN_SECS: f32 = 2.5;

    /// Effect duration granted on power-up pickup (seconds)
    pub const POWER_UP_SECS: f32 = 5.0;
    /// Held-fire repeat period (seconds)
    pub const FIRE_PERIOD: f32 = 0.25;
    /// Held-fire repeat period while FastFire is active
    pub const FAST_FIRE_PERIOD: f32 = 0.10;

    /// Lives at session start
    pub const START_LIVES: i32 = 3;
    /// Score awarded per destroyed asteroid
    pub const KILL_SCORE: u32 = 10;

    /// Player ship sprite size (square)
    pub const PLAYER_SIZE: f32 = 32.0;
    /// Per-axis acceleration cap
    pub const PLAYER_MAX_ACCEL: f32 = 3.0;
    /// Declared top speed. Unused by the movement clamp, which bounds
    /// velocity with `PLAYER_MAX_ACCEL` (see `Player::advance`).
    pub const PLAYER_MAX_VELOCITY: f32 = 3.0;

    /// Projectile radii and speeds (pixels, pixels per second)
    pub const BULLET_RADIUS: f32 = 2.0;
    pub const BULLET_SPEED: f32 = 300.0;
    pub const ASTEROID_RADIUS: f32 = 16.0;
    pub const ASTEROID_SPEED: f32 = 180.0;
    pub const SPLITTER_RADIUS: f32 = 3.0;
    /// Burst splitter speeds are drawn uniformly from this range
    pub const SPLITTER_MIN_SPEED: f32 = 180.0;
    pub const SPLITTER_MAX_SPEED: f32 = 600.0;
    pub const POWER_UP_RADIUS: f32 = 8.0;
    pub const POWER_UP_SPEED: f32 = 150.0;

    /// Power-up color blink half-period (seconds)
    pub const BLINK_PERIOD: f32 = 0.30;

    /// Explosion radius for a player-asteroid hit
    pub const PLAYER_HIT_EXPLOSION_RADIUS: f32 = 256.0;
    /// Splitters scattered per destroyed asteroid
    pub const SPLITTER_BURST: usize = 10;
    /// Splitters scattered when the player ship is destroyed
    pub const DEATH_BURST: usize = 500;

    /// Feedback text envelope defaults (seconds)
    pub const TEXT_HOLD_SECS: f32 = 0.5;
    pub const TEXT_FADE_OUT_SECS: f32 = 0.5;
}
