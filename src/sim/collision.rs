//! Collision resolution
//!
//! Runs once per frame over the registry groups, after movement, in a
//! fixed pass order: bullets against asteroids, splitters against
//! asteroids (only under SplitterDestruction), asteroids against the
//! player, pickups against the player. The outcome (lives, score,
//! power-up map) is computed as a batch against the incoming state so
//! the caller can diff it for one-shot feedback, and every kill is
//! purged from the registry before the pass returns.

use rand::Rng;

use super::entity::{Explosion, Projectile, splitter_burst};
use super::powerup::{PowerUpKind, PowerUpState};
use super::registry::Registry;
use crate::consts::*;

/// Batched result of one resolution pass
#[derive(Debug, Clone)]
pub struct Resolution {
    pub lives: i32,
    pub score: u32,
    pub effects: PowerUpState,
}

/// Resolve the four collision passes for this frame.
///
/// `effects` is read-only input; the returned map carries any pickups.
/// New explosions and splitter bursts land in the registry, kills are
/// excised before returning.
pub fn resolve(
    registry: &mut Registry,
    lives: i32,
    score: u32,
    effects: &PowerUpState,
    rng: &mut impl Rng,
) -> Resolution {
    let mut outcome = Resolution {
        lives,
        score,
        effects: effects.clone(),
    };

    // New visuals are buffered and appended after the passes so the
    // groups under scan stay stable. Splitters spawned here are not
    // collision candidates until the next frame.
    let mut new_explosions: Vec<Explosion> = Vec::new();
    let mut new_splitters: Vec<Projectile> = Vec::new();

    let Registry {
        player,
        asteroids,
        bullets,
        power_ups,
        splitters,
        ..
    } = registry;

    // Pass 1: bullets against asteroids. Piercing bullets survive the
    // hit and stay live for later frames.
    let piercing = outcome.effects.is_active(PowerUpKind::PiercingBullet);
    shots_vs_asteroids(
        bullets,
        asteroids,
        !piercing,
        &mut new_explosions,
        &mut new_splitters,
        &mut outcome.score,
        rng,
    );

    // Pass 2: splitters become ammunition under SplitterDestruction.
    if outcome.effects.is_active(PowerUpKind::SplitterDestruction) {
        shots_vs_asteroids(
            splitters,
            asteroids,
            true,
            &mut new_explosions,
            &mut new_splitters,
            &mut outcome.score,
            rng,
        );
    }

    if let Some(player) = player.as_ref() {
        let player_rect = player.bounds();

        // Pass 3: every asteroid overlapping the player costs one life.
        // Simultaneous hits each count.
        for asteroid in asteroids.iter_mut().filter(|a| a.is_alive()) {
            if asteroid.bounds().intersects(&player_rect) {
                let impact = asteroid.bounds().clamped_into(&player_rect).center;
                new_explosions.push(Explosion::new(impact, PLAYER_HIT_EXPLOSION_RADIUS));
                new_splitters.extend(splitter_burst(impact, SPLITTER_BURST, rng));
                asteroid.kill();
                outcome.lives -= 1;
            }
        }

        // Pass 4: pickups. ExtraLife grants a life on the spot and is
        // never stored; everything else refreshes its effect entry.
        for pickup in power_ups.iter_mut().filter(|p| p.is_alive()) {
            if pickup.bounds().intersects(&player_rect) {
                pickup.kill();
                match pickup.power_up_kind() {
                    Some(PowerUpKind::ExtraLife) => outcome.lives += 1,
                    Some(kind) => outcome.effects.grant(kind),
                    None => {}
                }
            }
        }
    }

    registry.purge();
    registry.explosions.append(&mut new_explosions);
    registry.splitters.append(&mut new_splitters);
    outcome
}

/// Shared pass body for bullet and splitter fire: each live shot
/// destroys the first overlapping live asteroid in group order (one
/// asteroid per shot, stacked overlaps never over-count), spawning an
/// explosion sized to the asteroid and a fragment burst at the impact.
fn shots_vs_asteroids(
    shots: &mut [Projectile],
    asteroids: &mut [Projectile],
    consume_shot: bool,
    new_explosions: &mut Vec<Explosion>,
    new_splitters: &mut Vec<Projectile>,
    score: &mut u32,
    rng: &mut impl Rng,
) {
    for shot in shots.iter_mut().filter(|s| s.is_alive()) {
        let shot_rect = shot.bounds();
        let Some(target) = asteroids
            .iter_mut()
            .find(|a| a.is_alive() && a.bounds().intersects(&shot_rect))
        else {
            continue;
        };

        let impact = shot_rect.clamped_into(&target.bounds()).center;
        new_explosions.push(Explosion::new(impact, target.bounds().width()));
        new_splitters.extend(splitter_burst(impact, SPLITTER_BURST, rng));
        *score += KILL_SCORE;

        target.kill();
        if consume_shot {
            shot.kill();
        }
    }
}
