//! Power-ups: falling pickups dropped by broken blocks
//!
//! Every kind rolls independently when a block breaks, so one block can drop
//! several pickups. Timed kinds stay activated until their duration runs out.

use glam::{Vec2, Vec3};
use rand::Rng;

use super::body::{Body, Sprite};
use crate::consts::*;

/// Power-up types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PowerUpKind {
    Speed,
    Sticky,
    PassThrough,
    PadSizeIncrease,
    Confuse,
    Chaos,
}

/// Static per-kind tuning
#[derive(Debug, Clone, Copy)]
pub struct PowerUpInfo {
    pub kind: PowerUpKind,
    pub color: Vec3,
    /// Seconds of effect once picked up (0 = instantaneous)
    pub duration: f32,
    /// Drops with probability 1 / spawn_chance
    pub spawn_chance: u32,
}

impl PowerUpKind {
    /// Roll order when a block breaks
    pub const ALL: [PowerUpKind; 6] = [
        PowerUpKind::Speed,
        PowerUpKind::Sticky,
        PowerUpKind::PassThrough,
        PowerUpKind::PadSizeIncrease,
        PowerUpKind::Confuse,
        PowerUpKind::Chaos,
    ];

    pub fn info(self) -> PowerUpInfo {
        let (color, duration, spawn_chance) = match self {
            PowerUpKind::Speed => (Vec3::new(0.5, 0.5, 1.0), 0.0, 75),
            PowerUpKind::Sticky => (Vec3::new(1.0, 0.5, 1.0), 20.0, 75),
            PowerUpKind::PassThrough => (Vec3::new(1.0, 0.5, 1.0), 10.0, 75),
            PowerUpKind::PadSizeIncrease => (Vec3::new(1.0, 0.6, 0.4), 0.0, 75),
            PowerUpKind::Confuse => (Vec3::new(1.0, 0.3, 0.3), 15.0, 15),
            PowerUpKind::Chaos => (Vec3::new(0.9, 0.25, 0.25), 15.0, 15),
        };
        PowerUpInfo {
            kind: self,
            color,
            duration,
            spawn_chance,
        }
    }

    pub fn texture_name(self) -> &'static str {
        match self {
            PowerUpKind::Speed => "powerup_speed",
            PowerUpKind::Sticky => "powerup_sticky",
            PowerUpKind::PassThrough => "powerup_passthrough",
            PowerUpKind::PadSizeIncrease => "powerup_increase",
            PowerUpKind::Confuse => "powerup_confuse",
            PowerUpKind::Chaos => "powerup_chaos",
        }
    }

    /// Applies once and never needs reverting
    pub fn is_instant(self) -> bool {
        self.info().duration <= 0.0
    }
}

/// A falling pickup, and later the record of an effect in force
#[derive(Debug, Clone, PartialEq)]
pub struct PowerUp {
    pub body: Body,
    pub kind: PowerUpKind,
    /// Seconds of effect remaining once activated
    pub duration: f32,
    /// Effect currently applied
    pub activated: bool,
}

impl PowerUp {
    pub fn new(kind: PowerUpKind, position: Vec2) -> Self {
        let info = kind.info();
        let body = Body::new(position, POWERUP_SIZE, Sprite::PowerUp(kind))
            .with_color(info.color)
            .with_velocity(POWERUP_VELOCITY);
        Self {
            body,
            kind,
            duration: info.duration,
            activated: false,
        }
    }

    /// Fully past the left or bottom edge of the play field
    pub fn is_off_screen(&self) -> bool {
        self.body.position.x + self.body.size.x < 0.0 || self.body.position.y < 0.0
    }

    /// Drift by velocity; count down the effect if active.
    ///
    /// Returns true on the tick the effect runs out.
    pub fn tick(&mut self, dt: f32) -> bool {
        self.body.position += self.body.velocity * dt;
        if !self.activated {
            return false;
        }
        self.duration -= dt;
        if self.duration > 0.0 {
            return false;
        }
        self.activated = false;
        true
    }

    /// Nothing left to track: gone from the screen and no effect in force
    pub fn is_spent(&self) -> bool {
        self.body.is_destroyed && !self.activated
    }
}

/// One-in-`chance` roll: true when a uniform draw from `[0, chance)` is zero
pub fn roll<R: Rng + ?Sized>(rng: &mut R, chance: u32) -> bool {
    if chance == 0 {
        return false;
    }
    rng.random_range(0..chance) == 0
}

/// Roll every kind once for a block broken at `position`
pub fn spawn_for_block<R: Rng + ?Sized>(rng: &mut R, position: Vec2) -> Vec<PowerUp> {
    PowerUpKind::ALL
        .into_iter()
        .filter(|kind| roll(rng, kind.info().spawn_chance))
        .map(|kind| PowerUp::new(kind, position))
        .collect()
}

/// Whether any activated power-up of `kind` remains
pub fn is_kind_active(powerups: &[PowerUp], kind: PowerUpKind) -> bool {
    powerups.iter().any(|p| p.kind == kind && p.activated)
}
