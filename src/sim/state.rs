//! Game state and round bookkeeping
//!
//! Everything the frame loop mutates lives in [`GameState`]. The state is
//! owned by one caller and only changed inside `handle_input` and `update`.

use glam::{Vec2, Vec3};
use rand::SeedableRng;
use rand_pcg::Pcg32;

use super::body::{Ball, Body};
use super::effects::{PostEffect, PostEffects};
use super::level::GameLevel;
use super::particles::ParticleGenerator;
use super::powerup::{PowerUp, PowerUpKind};
use crate::consts::*;

/// Top-level screen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GamePhase {
    /// Level select, ball parked on the paddle
    #[default]
    Menu,
    /// Active gameplay
    Active,
    /// Current level cleared
    Win,
}

/// Something the outside world may want to react to (sound, HUD)
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GameEvent {
    BlockDestroyed { position: Vec2 },
    SolidBlockHit,
    PaddleHit,
    PowerUpCollected(PowerUpKind),
    PowerUpExpired(PowerUpKind),
    LifeLost { remaining: u32 },
    GameOver,
    LevelCompleted { level: usize },
    LevelSelected { level: usize },
    PhaseChanged { from: GamePhase, to: GamePhase },
}

/// Complete round state
#[derive(Debug, Clone)]
pub struct GameState {
    /// Play field size
    pub width: f32,
    pub height: f32,
    /// Run seed for reproducibility
    pub seed: u64,
    pub rng: Pcg32,
    pub phase: GamePhase,
    pub lives: u32,
    /// Lives restored on every round reset
    pub starting_lives: u32,
    /// Index into `levels`
    pub level_index: usize,
    pub levels: Vec<GameLevel>,
    pub player: Body,
    pub ball: Ball,
    /// Falling pickups and effects in force
    pub powerups: Vec<PowerUp>,
    pub particles: ParticleGenerator,
    pub effects: PostEffects,
    /// Seconds of screen shake left
    pub shake_time: f32,
    /// Events raised since the last drain
    events: Vec<GameEvent>,
}

impl GameState {
    /// Create a round on the menu screen with the given levels
    pub fn new(
        width: f32,
        height: f32,
        starting_lives: u32,
        seed: u64,
        levels: Vec<GameLevel>,
    ) -> Self {
        let levels = if levels.is_empty() {
            log::warn!("No levels supplied, starting with an empty level");
            vec![GameLevel::default()]
        } else {
            levels
        };

        let player = Body::player(width);
        let ball = Ball::spawn(player.position);

        Self {
            width,
            height,
            seed,
            rng: Pcg32::seed_from_u64(seed),
            phase: GamePhase::Menu,
            lives: starting_lives,
            starting_lives,
            level_index: 0,
            levels,
            player,
            ball,
            powerups: Vec::new(),
            particles: ParticleGenerator::new(MAX_PARTICLES),
            effects: PostEffects::default(),
            shake_time: 0.0,
            events: Vec::new(),
        }
    }

    pub fn current_level(&self) -> &GameLevel {
        &self.levels[self.level_index]
    }

    pub fn current_level_mut(&mut self) -> &mut GameLevel {
        &mut self.levels[self.level_index]
    }

    /// Step the level selection, wrapping in both directions
    pub fn cycle_level(&mut self, forward: bool) {
        let count = self.levels.len();
        self.level_index = if forward {
            (self.level_index + 1) % count
        } else {
            (self.level_index + count - 1) % count
        };
        self.emit(GameEvent::LevelSelected {
            level: self.level_index,
        });
    }

    pub fn set_phase(&mut self, phase: GamePhase) {
        if self.phase == phase {
            return;
        }
        log::info!("Phase {:?} -> {:?}", self.phase, phase);
        let from = self.phase;
        self.phase = phase;
        self.emit(GameEvent::PhaseChanged { from, to: phase });
    }

    /// Restore the current level's blocks, drop all power-ups, refill lives
    pub fn reset_level(&mut self) {
        self.current_level_mut().reset();
        self.powerups.clear();
        self.lives = self.starting_lives;
    }

    /// Put paddle and ball back to their starting layout
    pub fn reset_player(&mut self) {
        self.player.size = PLAYER_SIZE;
        self.player.position = crate::player_spawn(self.width);
        self.player.color = Vec3::ONE;

        self.ball
            .reset(crate::ball_spawn(self.player.position), BALL_VELOCITY);
        self.ball.body.color = Vec3::ONE;

        self.effects.disable(PostEffect::Chaos);
        self.effects.disable(PostEffect::Confuse);
    }

    pub fn emit(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    pub fn events(&self) -> &[GameEvent] {
        &self.events
    }

    /// Take the events raised since the last call
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }
}
