//! Entity model
//!
//! Every entity owns its position, derives an axis-aligned bounding rect
//! from its rendered size, and advances itself one frame at a time. An
//! entity that is done marks itself dead; the registry drops dead
//! entities before the frame ends. Updates never reach into other
//! entities - cross-entity effects belong to collision resolution.

use glam::Vec2;
use rand::Rng;

use super::powerup::PowerUpKind;
use super::rect::Rect;
use super::session::InputSnapshot;
use crate::consts::*;
use crate::scene::{Color, Shape};

// ---- Player ----

/// The player ship.
///
/// Orientation follows the pointer but only affects the rendered
/// triangle; the collision rect stays axis-aligned.
#[derive(Debug, Clone)]
pub struct Player {
    pub position: Vec2,
    pub velocity: Vec2,
    pub acceleration: Vec2,
    /// Rendered heading in degrees
    pub heading: f32,
}

impl Player {
    pub fn new(position: Vec2) -> Self {
        Self {
            position,
            velocity: Vec2::ZERO,
            acceleration: Vec2::ZERO,
            heading: 0.0,
        }
    }

    pub fn bounds(&self) -> Rect {
        Rect::square(self.position, PLAYER_SIZE)
    }

    /// Aim the rendered ship at the pointer. A zero direction (pointer
    /// dead on the ship) keeps the previous heading.
    pub fn aim(&mut self, pointer: Vec2) {
        let direction = pointer - self.position;
        if direction.length_squared() != 0.0 {
            self.heading = -direction.y.atan2(direction.x).to_degrees() - 90.0;
        }
    }

    /// Apply held movement keys and integrate one frame.
    ///
    /// Velocity is clamped to the acceleration cap before the new
    /// acceleration lands, so a single frame of overshoot past the cap
    /// is possible. The clamp must stay ahead of the add.
    pub fn advance(&mut self, dt: f32, input: &InputSnapshot) {
        self.acceleration.x = if input.left {
            -PLAYER_MAX_ACCEL * dt
        } else if input.right {
            PLAYER_MAX_ACCEL * dt
        } else {
            0.0
        };
        self.acceleration.y = if input.up {
            -PLAYER_MAX_ACCEL * dt
        } else if input.down {
            PLAYER_MAX_ACCEL * dt
        } else {
            0.0
        };

        self.velocity.x = self.velocity.x.clamp(-PLAYER_MAX_ACCEL, PLAYER_MAX_ACCEL);
        self.velocity.y = self.velocity.y.clamp(-PLAYER_MAX_ACCEL, PLAYER_MAX_ACCEL);

        self.velocity += self.acceleration;
        self.position += self.velocity;
    }

    /// Toroidal wrap: once the ship is fully past one edge it re-enters
    /// just outside the opposite edge.
    pub fn wrap(&mut self) {
        let half = PLAYER_SIZE / 2.0;
        if self.position.x + half < 0.0 {
            self.position.x = FRAME_WIDTH + half;
        } else if self.position.x - half > FRAME_WIDTH {
            self.position.x = -half;
        }
        if self.position.y + half < 0.0 {
            self.position.y = FRAME_HEIGHT + half;
        } else if self.position.y - half > FRAME_HEIGHT {
            self.position.y = -half;
        }
    }

    pub fn update(&mut self, dt: f32, input: &InputSnapshot) {
        self.aim(input.pointer);
        self.advance(dt, input);
        self.wrap();
    }
}

// ---- Projectiles ----

/// What a projectile is, with per-kind render state
#[derive(Debug, Clone, PartialEq)]
pub enum ProjectileKind {
    Bullet,
    Asteroid,
    Splitter { color: Color },
    PowerUp { kind: PowerUpKind, blink_timer: f32 },
}

/// A sprite crossing the frame on a constant velocity. Removes itself
/// once its rect no longer intersects the visible frame.
#[derive(Debug, Clone)]
pub struct Projectile {
    pub kind: ProjectileKind,
    pub radius: f32,
    pub position: Vec2,
    pub velocity: Vec2,
    alive: bool,
}

impl Projectile {
    /// Velocity points from `position` toward `target`, scaled by
    /// `speed`. A degenerate direction falls back to standing still
    /// rather than producing NaN.
    fn new(kind: ProjectileKind, radius: f32, position: Vec2, target: Vec2, speed: f32) -> Self {
        Self {
            kind,
            radius,
            position,
            velocity: (target - position).normalize_or_zero() * speed,
            alive: true,
        }
    }

    pub fn bullet(position: Vec2, target: Vec2) -> Self {
        Self::new(
            ProjectileKind::Bullet,
            BULLET_RADIUS,
            position,
            target,
            BULLET_SPEED,
        )
    }

    pub fn asteroid(position: Vec2, target: Vec2) -> Self {
        Self::new(
            ProjectileKind::Asteroid,
            ASTEROID_RADIUS,
            position,
            target,
            ASTEROID_SPEED,
        )
    }

    pub fn splitter(position: Vec2, target: Vec2, speed: f32, color: Color) -> Self {
        Self::new(
            ProjectileKind::Splitter { color },
            SPLITTER_RADIUS,
            position,
            target,
            speed,
        )
    }

    pub fn power_up(position: Vec2, target: Vec2, kind: PowerUpKind) -> Self {
        Self::new(
            ProjectileKind::PowerUp {
                kind,
                blink_timer: BLINK_PERIOD,
            },
            POWER_UP_RADIUS,
            position,
            target,
            POWER_UP_SPEED,
        )
    }

    pub fn bounds(&self) -> Rect {
        Rect::square(self.position, self.radius * 2.0)
    }

    pub fn is_alive(&self) -> bool {
        self.alive
    }

    /// Mark for removal; the registry excises the entity this frame.
    pub fn kill(&mut self) {
        self.alive = false;
    }

    /// The pickup type, for entities in the power-up group
    pub fn power_up_kind(&self) -> Option<PowerUpKind> {
        match self.kind {
            ProjectileKind::PowerUp { kind, .. } => Some(kind),
            _ => None,
        }
    }

    pub fn update(&mut self, dt: f32) {
        self.position += self.velocity * dt;

        // Power-ups blink between gray and their type color on a fixed
        // period, independent of anything else in the frame.
        if let ProjectileKind::PowerUp { blink_timer, .. } = &mut self.kind {
            *blink_timer -= dt;
            if *blink_timer <= -BLINK_PERIOD {
                *blink_timer = BLINK_PERIOD;
            }
        }

        if !self.bounds().intersects(&Rect::frame()) {
            self.alive = false;
        }
    }

    pub fn shape(&self) -> Shape {
        match &self.kind {
            ProjectileKind::Bullet => Shape::Disc { color: Color::RED },
            ProjectileKind::Asteroid => Shape::Ring {
                color: Color::WHITE,
            },
            ProjectileKind::Splitter { color } => Shape::Disc { color: *color },
            ProjectileKind::PowerUp { kind, blink_timer } => {
                let factor = (blink_timer / BLINK_PERIOD).abs();
                Shape::Disc {
                    color: Color::GRAY.lerp(kind.color(), factor),
                }
            }
        }
    }
}

/// A burst of `n` splitters scattering from `position` toward random
/// points in the frame at random speeds.
pub fn splitter_burst(position: Vec2, n: usize, rng: &mut impl Rng) -> Vec<Projectile> {
    (0..n)
        .map(|_| {
            let target = Vec2::new(
                rng.random_range(0.0..=FRAME_WIDTH),
                rng.random_range(0.0..=FRAME_HEIGHT),
            );
            let speed = rng.random_range(SPLITTER_MIN_SPEED..=SPLITTER_MAX_SPEED);
            Projectile::splitter(position, target, speed, Color::random(rng))
        })
        .collect()
}

// ---- Explosion ----

/// A short-lived flash left where something died. Decays over
/// `6 / log2(2r)` seconds; the rendered disc shrinks with the remaining
/// fraction while the color falls from white through red toward black
/// (channel decay rates 1, 2 and 4). Not collidable.
#[derive(Debug, Clone)]
pub struct Explosion {
    pub position: Vec2,
    pub radius: f32,
    death_time: f32,
    death_timer: f32,
}

impl Explosion {
    pub fn new(position: Vec2, radius: f32) -> Self {
        let death_time = 6.0 / (radius * 2.0).log2();
        Self {
            position,
            radius,
            death_time,
            death_timer: death_time,
        }
    }

    pub fn is_alive(&self) -> bool {
        self.death_timer >= 0.0
    }

    pub fn update(&mut self, dt: f32) {
        self.death_timer -= dt;
    }

    /// Remaining fraction of the decay, 1 at spawn down to 0
    pub fn scale(&self) -> f32 {
        (self.death_timer / self.death_time).max(0.0)
    }

    pub fn color(&self) -> Color {
        let gone = 1.0 - self.death_timer / self.death_time;
        let channel = |rate: f32| (((1.0 - gone * rate) * 255.0).max(0.0)) as u8;
        Color::new(channel(1.0), channel(2.0), channel(4.0))
    }
}

// ---- Fading text ----

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FadePhase {
    In,
    Hold,
    Out,
    Done,
}

/// Transient feedback text: fade in, hold, fade out, then remove itself.
#[derive(Debug, Clone)]
pub struct FadingText {
    pub text: String,
    pub position: Vec2,
    pub color: Color,
    phase: FadePhase,
    alpha: f32,
    fade_in_time: f32,
    fade_in_timer: f32,
    hold_timer: f32,
    fade_out_time: f32,
    fade_out_timer: f32,
}

impl FadingText {
    /// Feedback with the default envelope: no fade-in, 0.5 s hold,
    /// 0.5 s fade-out.
    pub fn new(text: impl Into<String>, position: Vec2, color: Color) -> Self {
        Self::with_envelope(text, position, color, 0.0, TEXT_HOLD_SECS, TEXT_FADE_OUT_SECS)
    }

    pub fn with_envelope(
        text: impl Into<String>,
        position: Vec2,
        color: Color,
        fade_in: f32,
        hold: f32,
        fade_out: f32,
    ) -> Self {
        Self {
            text: text.into(),
            position,
            color,
            phase: FadePhase::In,
            alpha: 0.0,
            fade_in_time: fade_in,
            fade_in_timer: fade_in,
            hold_timer: hold,
            fade_out_time: fade_out,
            fade_out_timer: fade_out,
        }
    }

    pub fn alpha(&self) -> f32 {
        self.alpha
    }

    pub fn is_alive(&self) -> bool {
        self.phase != FadePhase::Done
    }

    pub fn update(&mut self, dt: f32) {
        match self.phase {
            FadePhase::In => {
                self.fade_in_timer -= dt;
                if self.fade_in_timer <= 0.0 {
                    self.phase = FadePhase::Hold;
                    self.alpha = 1.0;
                } else {
                    self.alpha = 1.0 - self.fade_in_timer / self.fade_in_time;
                }
            }
            FadePhase::Hold => {
                self.hold_timer -= dt;
                if self.hold_timer <= 0.0 {
                    self.phase = FadePhase::Out;
                }
            }
            FadePhase::Out => {
                self.fade_out_timer -= dt;
                if self.fade_out_timer <= 0.0 {
                    self.phase = FadePhase::Done;
                    self.alpha = 0.0;
                } else {
                    self.alpha = self.fade_out_timer / self.fade_out_time;
                }
            }
            FadePhase::Done => {}
        }
    }
}
