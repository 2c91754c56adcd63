//! Per-frame input handling and simulation step
//!
//! Frame order: input, ball motion, collisions (blocks, power-ups, paddle),
//! particles, power-up timers, shake timer, lose/win checks.

use glam::{Vec2, Vec3};

use super::collision::{circle_vs_rect, rect_overlap, resolve};
use super::effects::PostEffect;
use super::powerup::{PowerUpKind, is_kind_active, spawn_for_block};
use super::state::{GameEvent, GamePhase, GameState};
use crate::consts::*;
use crate::input::{InputState, KeyCode};

/// Paddle tint while STICKY is in force
const STICKY_TINT: Vec3 = Vec3::new(1.0, 0.5, 1.0);
/// Ball tint while PASS_THROUGH is in force
const PASS_THROUGH_TINT: Vec3 = Vec3::new(1.0, 0.5, 0.5);

/// Apply this frame's input to the current phase
pub fn handle_input(state: &mut GameState, input: &mut InputState, dt: f32) {
    match state.phase {
        GamePhase::Menu => {
            if input.take_key_edge(KeyCode::Enter) {
                state.set_phase(GamePhase::Active);
            }
            if input.take_key_edge(KeyCode::W) {
                state.cycle_level(true);
            }
            if input.take_key_edge(KeyCode::S) {
                state.cycle_level(false);
            }
        }

        GamePhase::Active => {
            // Presses meant for the menu must not leak into the next visit
            for key in [KeyCode::Enter, KeyCode::W, KeyCode::S] {
                input.consume_key_edge(key);
            }

            let velocity = PLAYER_VELOCITY * dt;
            if input.is_key_pressed(KeyCode::A) && state.player.position.x >= 0.0 {
                state.player.position.x -= velocity;
                if state.ball.is_stuck {
                    state.ball.body.position.x -= velocity;
                }
            }
            if input.is_key_pressed(KeyCode::D)
                && state.player.position.x <= state.width - state.player.size.x
            {
                state.player.position.x += velocity;
                if state.ball.is_stuck {
                    state.ball.body.position.x += velocity;
                }
            }
            if input.is_key_pressed(KeyCode::Space) {
                state.ball.is_stuck = false;
            }
        }

        GamePhase::Win => {
            for key in [KeyCode::W, KeyCode::S] {
                input.consume_key_edge(key);
            }
            if input.take_key_edge(KeyCode::Enter) {
                state.effects.disable(PostEffect::Chaos);
                state.set_phase(GamePhase::Menu);
            }
        }
    }
}

/// Advance the game by `dt` seconds
///
/// Only the active phase runs the simulation; menu and win screens just let
/// cosmetic timers run out.
pub fn update(state: &mut GameState, dt: f32) {
    let active = state.phase == GamePhase::Active;

    if active {
        state.ball.advance(dt, state.width, state.height);
        resolve_collisions(state);

        let offset = Vec2::new(state.ball.radius / 2.0, -state.ball.radius);
        state.particles.update(
            &mut state.rng,
            dt,
            &state.ball.body,
            PARTICLES_PER_FRAME,
            offset,
        );

        update_powerups(state, dt);
    }

    if state.shake_time > 0.0 {
        state.shake_time -= dt;
        if state.shake_time <= 0.0 {
            state.shake_time = 0.0;
            state.effects.disable(PostEffect::Shake);
        }
    }

    if active {
        check_ball_lost(state);
        check_level_completed(state);
    }
}

fn resolve_collisions(state: &mut GameState) {
    resolve_block_collisions(state);
    resolve_powerup_collisions(state);
    resolve_player_collision(state);
}

/// Resolve the ball against the first block it touches, in level order
fn resolve_block_collisions(state: &mut GameState) {
    let index = state.level_index;
    let mut hit = None;
    for block in state.levels[index].blocks_mut() {
        if block.is_destroyed {
            continue;
        }
        let result = circle_vs_rect(&state.ball, block);
        if !result.collided {
            continue;
        }
        if !block.is_solid {
            block.is_destroyed = true;
        }
        hit = Some((result, block.is_solid, block.position));
        break;
    }

    let Some((result, solid, position)) = hit else {
        return;
    };

    if solid {
        state.shake_time = SHAKE_DURATION;
        state.effects.enable(PostEffect::Shake);
        state.emit(GameEvent::SolidBlockHit);
    } else {
        state.emit(GameEvent::BlockDestroyed { position });
        let spawned = spawn_for_block(&mut state.rng, position);
        for powerup in &spawned {
            log::debug!("Spawned {:?} at {:?}", powerup.kind, position);
        }
        state.powerups.extend(spawned);
    }

    if !state.ball.pass_through || solid {
        resolve(&mut state.ball, &result);
    }
}

/// Retire pickups that left the screen; activate the ones the paddle caught
fn resolve_powerup_collisions(state: &mut GameState) {
    let mut collected = Vec::new();
    for powerup in &mut state.powerups {
        if powerup.body.is_destroyed {
            continue;
        }
        if powerup.is_off_screen() {
            powerup.body.is_destroyed = true;
        }
        if rect_overlap(&state.player, &powerup.body) {
            powerup.body.is_destroyed = true;
            powerup.activated = true;
            collected.push(powerup.kind);
        }
    }

    for kind in collected {
        activate_powerup(state, kind);
        state.emit(GameEvent::PowerUpCollected(kind));
    }
}

fn activate_powerup(state: &mut GameState, kind: PowerUpKind) {
    log::debug!("Activating {:?}", kind);
    match kind {
        PowerUpKind::Speed => {
            state.ball.body.velocity *= SPEED_BOOST;
        }
        PowerUpKind::Sticky => {
            state.ball.sticky = true;
            state.player.color = STICKY_TINT;
        }
        PowerUpKind::PassThrough => {
            state.ball.pass_through = true;
            state.ball.body.color = PASS_THROUGH_TINT;
        }
        PowerUpKind::PadSizeIncrease => {
            state.player.size.x += PLAYER_GROWTH;
        }
        PowerUpKind::Confuse => {
            state.effects.enable_distortion(PostEffect::Confuse);
        }
        PowerUpKind::Chaos => {
            state.effects.enable_distortion(PostEffect::Chaos);
        }
    }
}

/// Undo a timed effect once the last power-up of its kind has run out
fn deactivate_powerup(state: &mut GameState, kind: PowerUpKind) {
    log::debug!("Deactivating {:?}", kind);
    match kind {
        PowerUpKind::Sticky => {
            state.ball.sticky = false;
            state.player.color = Vec3::ONE;
        }
        PowerUpKind::PassThrough => {
            state.ball.pass_through = false;
            state.ball.body.color = Vec3::ONE;
        }
        PowerUpKind::Confuse => state.effects.disable(PostEffect::Confuse),
        PowerUpKind::Chaos => state.effects.disable(PostEffect::Chaos),
        PowerUpKind::Speed | PowerUpKind::PadSizeIncrease => {}
    }
}

fn update_powerups(state: &mut GameState, dt: f32) {
    let mut expired = Vec::new();
    for powerup in &mut state.powerups {
        if powerup.tick(dt) {
            expired.push(powerup.kind);
        }
    }

    for kind in expired {
        if kind.is_instant() {
            continue;
        }
        state.emit(GameEvent::PowerUpExpired(kind));
        if is_kind_active(&state.powerups, kind) {
            continue;
        }
        deactivate_powerup(state, kind);
    }

    state.powerups.retain(|p| !p.is_spent());
}

/// Steer the ball by where it hit the paddle and send it back up
fn resolve_player_collision(state: &mut GameState) {
    if state.ball.is_stuck || !rect_overlap(&state.ball.body, &state.player) {
        return;
    }

    let player = &state.player;
    let ball = &mut state.ball;

    let center_board = player.position.x + player.size.x / 2.0;
    let distance = ball.body.position.x + ball.radius - center_board;
    let percentage = distance / (player.size.x / 2.0);

    let old_velocity = ball.body.velocity;
    ball.body.velocity.x = BALL_VELOCITY.x * percentage * PADDLE_STRENGTH;
    ball.body.velocity = ball.body.velocity.normalize_or_zero() * old_velocity.length();
    ball.body.velocity.y = ball.body.velocity.y.abs();

    ball.is_stuck = ball.sticky;
    state.emit(GameEvent::PaddleHit);
}

/// One life per miss; the whole round resets when the last one goes
fn check_ball_lost(state: &mut GameState) {
    if !state.ball.is_lost() {
        return;
    }

    state.lives = state.lives.saturating_sub(1);
    log::info!("Ball lost, {} lives left", state.lives);
    state.emit(GameEvent::LifeLost {
        remaining: state.lives,
    });

    if state.lives == 0 {
        state.emit(GameEvent::GameOver);
        state.reset_level();
        state.set_phase(GamePhase::Menu);
    }
    state.reset_player();
}

fn check_level_completed(state: &mut GameState) {
    if state.phase != GamePhase::Active || !state.current_level().is_completed() {
        return;
    }

    let level = state.level_index;
    log::info!("Level {} completed", level + 1);
    state.reset_level();
    state.reset_player();
    state.effects.enable(PostEffect::Chaos);
    state.emit(GameEvent::LevelCompleted { level });
    state.set_phase(GamePhase::Win);
}
