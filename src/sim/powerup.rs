//! Power-up types and the active-effect tracker

use std::collections::HashMap;

use rand::Rng;

use crate::consts::POWER_UP_SECS;
use crate::scene::Color;

/// The five pickup effects
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PowerUpKind {
    SlowMo,
    FastFire,
    ExtraLife,
    PiercingBullet,
    SplitterDestruction,
}

impl PowerUpKind {
    /// Stable order used for HUD rows and pickup-diff reporting
    pub const ALL: [PowerUpKind; 5] = [
        PowerUpKind::SlowMo,
        PowerUpKind::FastFire,
        PowerUpKind::ExtraLife,
        PowerUpKind::PiercingBullet,
        PowerUpKind::SplitterDestruction,
    ];

    pub fn label(self) -> &'static str {
        match self {
            PowerUpKind::SlowMo => "Slow-mo",
            PowerUpKind::FastFire => "Fast fire",
            PowerUpKind::ExtraLife => "Extra life",
            PowerUpKind::PiercingBullet => "Piercing bullet",
            PowerUpKind::SplitterDestruction => "Splitter destruction",
        }
    }

    pub fn color(self) -> Color {
        match self {
            PowerUpKind::SlowMo => Color::PURPLE,
            PowerUpKind::FastFire => Color::RED,
            PowerUpKind::ExtraLife => Color::GREEN,
            PowerUpKind::PiercingBullet => Color::YELLOW,
            PowerUpKind::SplitterDestruction => Color::BLUE,
        }
    }

    pub fn random(rng: &mut impl Rng) -> Self {
        Self::ALL[rng.random_range(0..Self::ALL.len())]
    }
}

/// Active effect -> remaining seconds.
///
/// ExtraLife is applied the instant it is picked up and never stored
/// here. Entries are refreshed to the full duration on re-pickup, not
/// stacked, and dropped the same frame they reach zero.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PowerUpState {
    remaining: HashMap<PowerUpKind, f32>,
}

impl PowerUpState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_active(&self, kind: PowerUpKind) -> bool {
        self.remaining.contains_key(&kind)
    }

    /// Set or refresh `kind` to the full pickup duration
    pub fn grant(&mut self, kind: PowerUpKind) {
        self.remaining.insert(kind, POWER_UP_SECS);
    }

    /// Decrement every entry by the frame's real elapsed time. SlowMo
    /// dilates entity updates, never this countdown.
    pub fn tick(&mut self, dt: f32) {
        for left in self.remaining.values_mut() {
            *left -= dt;
        }
        self.remaining.retain(|_, left| *left > 0.0);
    }

    /// The first kind active here but not in `before`, in stable order
    pub fn newly_acquired(&self, before: &PowerUpState) -> Option<PowerUpKind> {
        PowerUpKind::ALL
            .into_iter()
            .find(|kind| self.is_active(*kind) && !before.is_active(*kind))
    }

    /// Active entries in stable order, for HUD rows
    pub fn entries(&self) -> impl Iterator<Item = (PowerUpKind, f32)> + '_ {
        PowerUpKind::ALL
            .into_iter()
            .filter_map(|kind| self.remaining.get(&kind).map(|left| (kind, *left)))
    }

    pub fn len(&self) -> usize {
        self.remaining.len()
    }

    pub fn is_empty(&self) -> bool {
        self.remaining.is_empty()
    }
}
