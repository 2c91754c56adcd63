//! Frame-stepped simulation module
//!
//! All gameplay logic lives here. This module stays free of rendering and
//! platform dependencies:
//! - One update pass per frame, driven by the caller's timestep
//! - Seeded RNG only
//! - Stable iteration order (blocks are never reordered)
//! - Side effects for the outside world are reported as [`GameEvent`]s

pub mod body;
pub mod collision;
pub mod effects;
pub mod level;
pub mod particles;
pub mod powerup;
pub mod state;
pub mod tick;

pub use body::{Ball, Body, Sprite};
pub use collision::{CollisionResult, Direction, circle_vs_rect, rect_overlap, resolve};
pub use effects::{PostEffect, PostEffects};
pub use level::{GameLevel, TileCode, TileGrid};
pub use particles::{Particle, ParticleGenerator};
pub use powerup::{PowerUp, PowerUpKind};
pub use state::{GameEvent, GamePhase, GameState};
pub use tick::{handle_input, update};
