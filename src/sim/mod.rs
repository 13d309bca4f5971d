//! Frame-driven simulation module
//!
//! All gameplay logic lives here, single-threaded and frame-at-a-time:
//! - Measured-dt frames, no hidden clocks
//! - Seeded RNG only, so a session replays from its seed
//! - Entities exclusively owned by the registry; kills are reconciled
//!   within the frame that makes them
//! - No windowing, input polling or rendering dependencies

pub mod collision;
pub mod entity;
pub mod powerup;
pub mod rect;
pub mod registry;
pub mod session;
pub mod spawner;

pub use collision::{Resolution, resolve};
pub use entity::{Explosion, FadingText, Player, Projectile, ProjectileKind, splitter_burst};
pub use powerup::{PowerUpKind, PowerUpState};
pub use rect::Rect;
pub use registry::Registry;
pub use session::{InputSnapshot, Phase, Session, Verdict};
pub use spawner::{Spawner, TimerEvent, asteroid_interval, fire_period};
