//! Brick Breaker - paddle-and-ball arcade core
//!
//! Core modules:
//! - `sim`: Frame-stepped simulation (bodies, collisions, power-ups, game state)
//! - `input`: Key state table with one-shot press edges
//! - `renderer`: Draw-call seam and resource cache
//! - `audio`: Sound effect seam
//! - `game`: Application facade driven by the frame loop
//! - `settings`: Data-driven configuration

pub mod audio;
pub mod error;
pub mod game;
pub mod input;
pub mod renderer;
pub mod settings;
pub mod sim;

pub use error::GameError;
pub use game::Game;
pub use input::{InputState, KeyCode};
pub use settings::Settings;

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    use glam::Vec2;

    /// Fixed simulation timestep used by the headless driver (120 Hz)
    pub const SIM_DT: f32 = 1.0 / 120.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;

    /// Default screen dimensions
    pub const SCREEN_WIDTH: f32 = 800.0;
    pub const SCREEN_HEIGHT: f32 = 600.0;

    pub const STARTING_LIVES: u32 = 3;

    /// Paddle defaults
    pub const PLAYER_SIZE: Vec2 = Vec2::new(100.0, 20.0);
    pub const PLAYER_VELOCITY: f32 = 500.0;
    /// Width added by each PAD_SIZE_INCREASE pickup
    pub const PLAYER_GROWTH: f32 = 50.0;

    /// Ball defaults
    pub const BALL_RADIUS: f32 = 12.5;
    pub const BALL_VELOCITY: Vec2 = Vec2::new(150.0, 325.0);
    /// Paddle bounce: how strongly the hit offset steers the ball
    pub const PADDLE_STRENGTH: f32 = 2.0;
    /// SPEED pickup multiplier
    pub const SPEED_BOOST: f32 = 1.2;

    /// Power-up defaults
    pub const POWERUP_SIZE: Vec2 = Vec2::new(60.0, 20.0);
    pub const POWERUP_VELOCITY: Vec2 = Vec2::new(0.0, -150.0);

    /// Screen shake after hitting a solid block (seconds)
    pub const SHAKE_DURATION: f32 = 0.05;

    /// Ball trail
    pub const MAX_PARTICLES: usize = 500;
    pub const PARTICLES_PER_FRAME: usize = 2;
}

/// Center of an axis-aligned box whose `position` is its top-left corner
/// (y grows upward).
#[inline]
pub fn box_center(position: Vec2, size: Vec2) -> Vec2 {
    Vec2::new(position.x + size.x / 2.0, position.y - size.y / 2.0)
}

/// Paddle resting position: horizontally centered at the bottom of the screen
#[inline]
pub fn player_spawn(screen_width: f32) -> Vec2 {
    Vec2::new(
        screen_width / 2.0 - consts::PLAYER_SIZE.x / 2.0,
        consts::PLAYER_SIZE.y,
    )
}

/// Ball spawn position, glued to the top of the paddle
#[inline]
pub fn ball_spawn(player_position: Vec2) -> Vec2 {
    player_position
        + Vec2::new(
            consts::PLAYER_SIZE.x / 2.0 - consts::BALL_RADIUS,
            consts::BALL_RADIUS * 2.0,
        )
}
