//! Per-frame orchestration and the session state machine
//!
//! One [`Session`] is one Playing -> GameOver lifecycle. The host calls
//! [`Session::frame`] once per frame with the sampled input and the
//! measured frame time, then composites [`Session::scene`]. A returned
//! [`Verdict`] ends the session; the surrounding process loop restarts
//! on [`Verdict::Restart`].

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;

use super::collision::{Resolution, resolve};
use super::entity::{FadingText, Player, Projectile, splitter_burst};
use super::powerup::{PowerUpKind, PowerUpState};
use super::registry::Registry;
use super::spawner::{self, Spawner, TimerEvent};
use crate::consts::*;
use crate::scene::{Anchor, Color, FontSize, Scene, TextOverlay};

/// Input state sampled once per frame by the host
#[derive(Debug, Clone, Copy, Default)]
pub struct InputSnapshot {
    pub left: bool,
    pub right: bool,
    pub up: bool,
    pub down: bool,
    /// Pointer position in frame coordinates
    pub pointer: Vec2,
    pub fire: bool,
    pub restart: bool,
    pub quit: bool,
}

/// Session phase
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Playing,
    GameOver,
}

/// Why the session ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    Restart,
    Quit,
}

/// One run of the game, from fresh lives to game over
#[derive(Debug, Clone)]
pub struct Session {
    pub registry: Registry,
    pub effects: PowerUpState,
    pub lives: i32,
    pub score: u32,
    /// Playing time in seconds; drives the spawn-interval decay
    pub elapsed: f32,
    pub phase: Phase,
    spawner: Spawner,
    rng: Pcg32,
    fire_held: bool,
}

impl Session {
    pub fn new(seed: u64) -> Self {
        let start = Vec2::new(FRAME_WIDTH / 2.0, FRAME_HEIGHT - 128.0);
        Self {
            registry: Registry::new(Player::new(start)),
            effects: PowerUpState::new(),
            lives: START_LIVES,
            score: 0,
            elapsed: 0.0,
            phase: Phase::Playing,
            spawner: Spawner::new(),
            rng: Pcg32::seed_from_u64(seed),
            fire_held: false,
        }
    }

    /// Advance one frame. `dt` is the measured frame time in seconds.
    ///
    /// Restart and quit are observed here, at the top of the frame,
    /// never mid-frame.
    pub fn frame(&mut self, input: &InputSnapshot, dt: f32) -> Option<Verdict> {
        if input.quit {
            return Some(Verdict::Quit);
        }
        if input.restart {
            return Some(Verdict::Restart);
        }

        let mut update_dt = dt;

        if self.phase == Phase::Playing {
            let fast_before = self.effects.is_active(PowerUpKind::FastFire);
            self.dispatch_timers(input, dt);

            let before = self.effects.clone();
            let resolved = resolve(
                &mut self.registry,
                self.lives,
                self.score,
                &self.effects,
                &mut self.rng,
            );
            self.apply(resolved, &before);

            self.elapsed += dt;

            if self.effects.is_active(PowerUpKind::SlowMo) {
                update_dt = dt / 2.0;
            }
            // Effects decay by real time; SlowMo must not stretch its
            // own countdown.
            self.effects.tick(dt);

            // A fire-rate change mid-interval re-arms the repeat timer
            // with the new period right away.
            let fast_now = self.effects.is_active(PowerUpKind::FastFire);
            if fast_now != fast_before && self.spawner.fire_armed() {
                self.spawner.arm_fire(fast_now);
            }
        }

        self.registry.update(update_dt, input);
        None
    }

    /// Edge-triggered fire plus the recurring timers. Timer events are
    /// only dispatched while Playing.
    fn dispatch_timers(&mut self, input: &InputSnapshot, dt: f32) {
        let fast = self.effects.is_active(PowerUpKind::FastFire);

        // First shot lands immediately; the repeat timer takes over
        // until fire is released.
        if input.fire && !self.fire_held {
            self.fire(input.pointer);
            self.spawner.arm_fire(fast);
        } else if !input.fire && self.fire_held {
            self.spawner.disarm_fire();
        }
        self.fire_held = input.fire;

        for event in self.spawner.poll(dt, self.elapsed, fast) {
            match event {
                TimerEvent::Fire => self.fire(input.pointer),
                TimerEvent::SpawnAsteroid => {
                    let asteroid = Projectile::asteroid(
                        spawner::spawn_lane(&mut self.rng),
                        spawner::target_lane(&mut self.rng),
                    );
                    self.registry.asteroids.push(asteroid);
                }
                TimerEvent::SpawnPowerUp => {
                    let kind = PowerUpKind::random(&mut self.rng);
                    let pickup = Projectile::power_up(
                        spawner::spawn_lane(&mut self.rng),
                        spawner::target_lane(&mut self.rng),
                        kind,
                    );
                    self.registry.power_ups.push(pickup);
                }
            }
        }
    }

    fn fire(&mut self, pointer: Vec2) {
        if let Some(player) = &self.registry.player {
            let origin = player.position;
            self.registry.bullets.push(Projectile::bullet(origin, pointer));
        }
    }

    /// Apply a resolution batch: diff lives and effects for one-shot
    /// feedback, and run the game-over transition when lives hit zero.
    fn apply(&mut self, resolved: Resolution, before: &PowerUpState) {
        let position = self
            .registry
            .player
            .as_ref()
            .map(|p| p.position)
            .unwrap_or_default();

        let lives = resolved.lives.max(0);
        if lives < self.lives {
            self.registry
                .info
                .push(FadingText::new("Ouch!", position, Color::WHITE));
            if lives == 0 {
                log::info!("game over: score {} after {:.1} s", resolved.score, self.elapsed);
                self.phase = Phase::GameOver;
                self.registry.player = None;
                self.registry
                    .splitters
                    .extend(splitter_burst(position, DEATH_BURST, &mut self.rng));
            }
        } else if lives > self.lives {
            self.registry
                .info
                .push(FadingText::new("Extra life!", position, Color::GREEN));
        }
        self.lives = lives;
        self.score = resolved.score;

        if let Some(kind) = resolved.effects.newly_acquired(before) {
            log::debug!("picked up {}", kind.label());
            self.registry.info.push(FadingText::new(
                format!("{}!", kind.label()),
                position,
                kind.color(),
            ));
        }
        self.effects = resolved.effects;
    }

    /// The frame's draw list: entities in layer order, then the HUD.
    pub fn scene(&self) -> Scene {
        let mut scene = Scene::default();
        self.registry.render(&mut scene);

        // Active effects stack upward from the bottom-left corner.
        for (row, (kind, left)) in self.effects.entries().enumerate() {
            scene.texts.push(TextOverlay {
                text: format!("{} {:.1} s", kind.label(), left),
                position: Vec2::new(16.0, FRAME_HEIGHT - 8.0 - 24.0 * row as f32),
                anchor: Anchor::BottomLeft,
                font: FontSize::Regular,
                color: Color::WHITE,
                alpha: 1.0,
            });
        }

        scene.texts.push(hud(
            format!("Score: {}", self.score),
            Vec2::new(16.0, 16.0),
            Anchor::TopLeft,
        ));
        scene.texts.push(hud(
            format!("Lives: {}", self.lives),
            Vec2::new(FRAME_WIDTH / 2.0, 16.0),
            Anchor::MidTop,
        ));
        scene.texts.push(hud(
            format!("Time: {:.1}", self.elapsed),
            Vec2::new(FRAME_WIDTH - 16.0, 16.0),
            Anchor::TopRight,
        ));

        if self.phase == Phase::GameOver {
            let center = Vec2::new(FRAME_WIDTH / 2.0, FRAME_HEIGHT / 2.0);
            scene
                .texts
                .push(hud("GAME OVER!".to_string(), center, Anchor::MidBottom));
            scene.texts.push(hud(
                "Press r to try again".to_string(),
                center,
                Anchor::MidTop,
            ));
        }

        scene
    }
}

fn hud(text: String, position: Vec2, anchor: Anchor) -> TextOverlay {
    TextOverlay {
        text,
        position,
        anchor,
        font: FontSize::Big,
        color: Color::WHITE,
        alpha: 1.0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::entity::Projectile;

    const DT: f32 = 1.0 / 60.0;

    fn idle() -> InputSnapshot {
        InputSnapshot {
            pointer: Vec2::new(360.0, 0.0),
            ..Default::default()
        }
    }

    fn player_position(session: &Session) -> Vec2 {
        session.registry.player.as_ref().unwrap().position
    }

    #[test]
    fn test_fresh_session() {
        let session = Session::new(1);
        assert_eq!(session.phase, Phase::Playing);
        assert_eq!(session.lives, START_LIVES);
        assert_eq!(session.score, 0);
        assert!(session.registry.player.is_some());
        assert!(session.registry.asteroids.is_empty());
    }

    #[test]
    fn test_bullet_kill_scenario() {
        let mut session = Session::new(2);
        let position = Vec2::new(100.0, 100.0);
        session
            .registry
            .asteroids
            .push(Projectile::asteroid(position, Vec2::new(100.0, 480.0)));
        session
            .registry
            .bullets
            .push(Projectile::bullet(position, Vec2::new(100.0, 0.0)));

        session.frame(&idle(), DT);

        assert_eq!(session.score, KILL_SCORE);
        assert!(session.registry.bullets.is_empty());
        assert_eq!(session.registry.explosions.len(), 1);
        // Ten fragments, minus any that already left the frame (none at
        // one frame of travel from the middle).
        assert_eq!(session.registry.splitters.len(), SPLITTER_BURST);
    }

    #[test]
    fn test_score_is_monotonic() {
        let mut session = Session::new(3);
        let mut last = 0;
        let input = InputSnapshot {
            fire: true,
            ..idle()
        };
        for _ in 0..600 {
            session.frame(&input, DT);
            assert!(session.score >= last);
            last = session.score;
        }
    }

    #[test]
    fn test_life_loss_feedback_and_count() {
        let mut session = Session::new(4);
        let position = player_position(&session);
        session
            .registry
            .asteroids
            .push(Projectile::asteroid(position, Vec2::new(position.x, 480.0)));

        session.frame(&idle(), DT);

        assert_eq!(session.lives, START_LIVES - 1);
        assert!(session.registry.info.iter().any(|t| t.text == "Ouch!"));
        assert_eq!(session.phase, Phase::Playing);
    }

    #[test]
    fn test_game_over_removes_player_and_bursts() {
        let mut session = Session::new(5);
        session.lives = 1;
        let position = player_position(&session);
        session
            .registry
            .asteroids
            .push(Projectile::asteroid(position, Vec2::new(position.x, 480.0)));

        session.frame(&idle(), DT);

        assert_eq!(session.phase, Phase::GameOver);
        assert_eq!(session.lives, 0);
        assert!(session.registry.player.is_none());
        assert!(session.registry.splitters.len() >= DEATH_BURST);
    }

    #[test]
    fn test_lives_never_observably_negative() {
        let mut session = Session::new(6);
        session.lives = 1;
        let position = player_position(&session);
        // Two simultaneous hits against a single remaining life.
        session
            .registry
            .asteroids
            .push(Projectile::asteroid(position, Vec2::new(position.x, 480.0)));
        session.registry.asteroids.push(Projectile::asteroid(
            position + Vec2::new(4.0, 0.0),
            Vec2::new(position.x, 480.0),
        ));

        session.frame(&idle(), DT);

        assert_eq!(session.lives, 0);
        assert_eq!(session.phase, Phase::GameOver);
    }

    #[test]
    fn test_extra_life_pickup() {
        let mut session = Session::new(7);
        session.lives = 2;
        let position = player_position(&session);
        session.registry.power_ups.push(Projectile::power_up(
            position,
            Vec2::new(position.x, 480.0),
            PowerUpKind::ExtraLife,
        ));

        session.frame(&idle(), DT);

        assert_eq!(session.lives, 3);
        assert!(session.registry.power_ups.is_empty());
        assert!(session.effects.is_empty());
        assert!(
            session
                .registry
                .info
                .iter()
                .any(|t| t.text == "Extra life!")
        );
    }

    #[test]
    fn test_pickup_feedback_names_the_effect() {
        let mut session = Session::new(8);
        let position = player_position(&session);
        session.registry.power_ups.push(Projectile::power_up(
            position,
            Vec2::new(position.x, 480.0),
            PowerUpKind::FastFire,
        ));

        session.frame(&idle(), DT);

        assert!(session.effects.is_active(PowerUpKind::FastFire));
        assert!(session.registry.info.iter().any(|t| t.text == "Fast fire!"));
    }

    #[test]
    fn test_slow_mo_halves_entity_dt_but_not_decay() {
        let mut session = Session::new(9);
        session.effects.grant(PowerUpKind::SlowMo);
        let start = Vec2::new(100.0, 100.0);
        session
            .registry
            .asteroids
            .push(Projectile::asteroid(start, Vec2::new(100.0, 480.0)));

        session.frame(&idle(), 0.1);

        // Entities moved half a tick's worth.
        let moved = session.registry.asteroids[0].position.y - start.y;
        assert!((moved - ASTEROID_SPEED * 0.05).abs() < 1e-3);
        // The countdown lost the full real dt.
        let (_, left) = session.effects.entries().next().unwrap();
        assert!((left - (POWER_UP_SECS - 0.1)).abs() < 1e-5);
    }

    #[test]
    fn test_first_shot_is_immediate_and_repeats() {
        let mut session = Session::new(10);
        let input = InputSnapshot {
            fire: true,
            ..idle()
        };
        session.frame(&input, DT);
        assert_eq!(session.registry.bullets.len(), 1);

        // Holding fire for a full period lands the next shot.
        let frames = (FIRE_PERIOD / DT).ceil() as usize + 1;
        for _ in 0..frames {
            session.frame(&input, DT);
        }
        assert!(session.registry.bullets.len() >= 2);
    }

    #[test]
    fn test_fast_fire_pickup_rearms_held_fire() {
        let mut session = Session::new(17);
        let input = InputSnapshot {
            fire: true,
            ..idle()
        };
        session.frame(&input, DT); // immediate shot, timer armed at the slow period
        assert_eq!(session.registry.bullets.len(), 1);

        let position = player_position(&session);
        session.registry.power_ups.push(Projectile::power_up(
            position,
            Vec2::new(position.x, 480.0),
            PowerUpKind::FastFire,
        ));
        session.frame(&input, DT); // pickup re-arms with the fast period

        let frames = (FAST_FIRE_PERIOD / DT).ceil() as usize + 1;
        for _ in 0..frames {
            session.frame(&input, DT);
        }
        // The next shot lands on the fast schedule, well inside the
        // slow period.
        assert!(session.registry.bullets.len() >= 2);
    }

    #[test]
    fn test_releasing_fire_disarms() {
        let mut session = Session::new(11);
        let firing = InputSnapshot {
            fire: true,
            ..idle()
        };
        session.frame(&firing, DT);
        let fired = session.registry.bullets.len();

        for _ in 0..120 {
            session.frame(&idle(), DT);
        }
        // Bullets only drain (off-frame), none are added.
        assert!(session.registry.bullets.len() <= fired);
    }

    #[test]
    fn test_timers_idle_during_game_over() {
        let mut session = Session::new(12);
        session.lives = 1;
        let position = player_position(&session);
        session
            .registry
            .asteroids
            .push(Projectile::asteroid(position, Vec2::new(position.x, 480.0)));
        session.frame(&idle(), DT);
        assert_eq!(session.phase, Phase::GameOver);

        let elapsed = session.elapsed;
        // Long enough that the spawn timers would have fired many times.
        for _ in 0..600 {
            session.frame(&idle(), DT);
        }
        assert!(session.registry.asteroids.is_empty());
        assert!(session.registry.power_ups.is_empty());
        assert_eq!(session.elapsed, elapsed);
    }

    #[test]
    fn test_restart_and_quit_verdicts() {
        let mut session = Session::new(13);
        let restart = InputSnapshot {
            restart: true,
            ..idle()
        };
        assert_eq!(session.frame(&restart, DT), Some(Verdict::Restart));

        let quit = InputSnapshot {
            quit: true,
            ..idle()
        };
        assert_eq!(session.frame(&quit, DT), Some(Verdict::Quit));
    }

    #[test]
    fn test_game_over_prompt_in_scene() {
        let mut session = Session::new(14);
        session.lives = 1;
        let position = player_position(&session);
        session
            .registry
            .asteroids
            .push(Projectile::asteroid(position, Vec2::new(position.x, 480.0)));
        session.frame(&idle(), DT);

        let scene = session.scene();
        assert!(scene.texts.iter().any(|t| t.text == "GAME OVER!"));
        assert!(scene.texts.iter().any(|t| t.text == "Press r to try again"));
    }

    #[test]
    fn test_hud_overlays_present() {
        let session = Session::new(15);
        let scene = session.scene();
        assert!(scene.texts.iter().any(|t| t.text.starts_with("Score:")));
        assert!(scene.texts.iter().any(|t| t.text.starts_with("Lives:")));
        assert!(scene.texts.iter().any(|t| t.text.starts_with("Time:")));
    }

    #[test]
    fn test_effect_hud_row() {
        let mut session = Session::new(16);
        session.effects.grant(PowerUpKind::SlowMo);
        let scene = session.scene();
        assert!(
            scene
                .texts
                .iter()
                .any(|t| t.text.starts_with("Slow-mo") && t.anchor == Anchor::BottomLeft)
        );
    }
}
