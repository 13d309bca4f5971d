//! Entity ownership
//!
//! One collection per role plus a fixed draw-layer order. Every live
//! entity sits in exactly one role group; the draw list is emitted by
//! walking the groups in ascending layer order, so membership and draw
//! order cannot drift apart. Removal is reconciled before a frame ends:
//! anything marked dead is gone from its group the same frame.

use crate::scene::{Anchor, FontSize, Scene, Shape, Sprite, TextOverlay};

use super::entity::{Explosion, FadingText, Player, Projectile};
use super::rect::Rect;
use super::session::InputSnapshot;

/// Draw layers, lower composited first
pub const LAYER_EXPLOSIONS: u8 = 0;
pub const LAYER_SPLITTERS: u8 = 1;
pub const LAYER_PROJECTILES: u8 = 2;
pub const LAYER_PLAYER: u8 = 3;
pub const LAYER_INFO: u8 = 4;

/// Owns every live entity, grouped by role
#[derive(Debug, Clone, Default)]
pub struct Registry {
    pub player: Option<Player>,
    pub asteroids: Vec<Projectile>,
    pub bullets: Vec<Projectile>,
    pub power_ups: Vec<Projectile>,
    pub splitters: Vec<Projectile>,
    pub explosions: Vec<Explosion>,
    pub info: Vec<FadingText>,
}

impl Registry {
    pub fn new(player: Player) -> Self {
        Self {
            player: Some(player),
            ..Default::default()
        }
    }

    /// Advance every entity one frame, then drop the ones that flagged
    /// themselves dead. No removal survives into the next frame.
    pub fn update(&mut self, dt: f32, input: &InputSnapshot) {
        if let Some(player) = self.player.as_mut() {
            player.update(dt, input);
        }
        for group in [
            &mut self.asteroids,
            &mut self.bullets,
            &mut self.power_ups,
            &mut self.splitters,
        ] {
            for projectile in group.iter_mut() {
                projectile.update(dt);
            }
            group.retain(Projectile::is_alive);
        }
        for explosion in &mut self.explosions {
            explosion.update(dt);
        }
        self.explosions.retain(Explosion::is_alive);
        for text in &mut self.info {
            text.update(dt);
        }
        self.info.retain(FadingText::is_alive);
    }

    /// Drop projectiles killed during collision resolution. Runs inside
    /// the same frame as the kills, so nothing dead is ever drawn or
    /// collided with again.
    pub fn purge(&mut self) {
        self.asteroids.retain(Projectile::is_alive);
        self.bullets.retain(Projectile::is_alive);
        self.power_ups.retain(Projectile::is_alive);
        self.splitters.retain(Projectile::is_alive);
    }

    /// Emit sprites in ascending layer order, then the feedback texts
    /// (topmost layer).
    pub fn render(&self, scene: &mut Scene) {
        for explosion in &self.explosions {
            scene.sprites.push(Sprite {
                rect: Rect::square(explosion.position, explosion.radius * explosion.scale()),
                shape: Shape::Disc {
                    color: explosion.color(),
                },
                layer: LAYER_EXPLOSIONS,
            });
        }
        for splitter in &self.splitters {
            scene.sprites.push(sprite_of(splitter, LAYER_SPLITTERS));
        }
        for group in [&self.asteroids, &self.bullets, &self.power_ups] {
            for projectile in group {
                scene.sprites.push(sprite_of(projectile, LAYER_PROJECTILES));
            }
        }
        if let Some(player) = &self.player {
            scene.sprites.push(Sprite {
                rect: player.bounds(),
                shape: Shape::Ship {
                    heading: player.heading,
                },
                layer: LAYER_PLAYER,
            });
        }
        for text in &self.info {
            scene.texts.push(TextOverlay {
                text: text.text.clone(),
                position: text.position,
                anchor: Anchor::TopLeft,
                font: FontSize::Small,
                color: text.color,
                alpha: text.alpha(),
            });
        }
    }

    /// Live entity count across every role
    pub fn len(&self) -> usize {
        self.player.is_some() as usize
            + self.asteroids.len()
            + self.bullets.len()
            + self.power_ups.len()
            + self.splitters.len()
            + self.explosions.len()
            + self.info.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Empty all collections (session teardown)
    pub fn clear(&mut self) {
        self.player = None;
        self.asteroids.clear();
        self.bullets.clear();
        self.power_ups.clear();
        self.splitters.clear();
        self.explosions.clear();
        self.info.clear();
    }
}

fn sprite_of(projectile: &Projectile, layer: u8) -> Sprite {
    Sprite {
        rect: projectile.bounds(),
        shape: projectile.shape(),
        layer,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec2;

    fn seeded_registry() -> Registry {
        let mut registry = Registry::new(Player::new(Vec2::new(360.0, 352.0)));
        registry
            .asteroids
            .push(Projectile::asteroid(Vec2::new(100.0, 0.0), Vec2::new(100.0, 480.0)));
        registry
            .bullets
            .push(Projectile::bullet(Vec2::new(360.0, 352.0), Vec2::new(360.0, 0.0)));
        registry
    }

    #[test]
    fn test_draw_list_matches_role_membership() {
        let registry = seeded_registry();
        let mut scene = Scene::default();
        registry.render(&mut scene);
        assert_eq!(scene.sprites.len() + scene.texts.len(), registry.len());
    }

    #[test]
    fn test_draw_layers_ascend() {
        let registry = seeded_registry();
        let mut scene = Scene::default();
        registry.render(&mut scene);
        let layers: Vec<u8> = scene.sprites.iter().map(|s| s.layer).collect();
        let mut sorted = layers.clone();
        sorted.sort_unstable();
        assert_eq!(layers, sorted);
    }

    #[test]
    fn test_update_excises_dead_same_frame() {
        let mut registry = seeded_registry();
        registry.bullets[0].kill();
        registry.update(1.0 / 60.0, &InputSnapshot::default());
        assert!(registry.bullets.is_empty());
    }

    #[test]
    fn test_clear_empties_everything() {
        let mut registry = seeded_registry();
        registry.clear();
        assert!(registry.is_empty());
        assert!(registry.player.is_none());
    }
}
