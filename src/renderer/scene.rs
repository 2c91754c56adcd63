//! Frame composition: what gets drawn, in which order
//!
//! Scene pass (post-processed): background, blocks, paddle, falling
//! pickups, particle trail, ball. HUD text is drawn after compositing so the
//! distortion effects never scramble it.

use glam::{Vec2, Vec3};

use super::{Renderer, ResourceCache};
use crate::sim::{Body, GamePhase, GameState, Sprite};

const TEXT_COLOR: Vec3 = Vec3::ONE;
const WIN_COLOR: Vec3 = Vec3::new(0.0, 1.0, 0.0);
const RETRY_COLOR: Vec3 = Vec3::new(1.0, 1.0, 0.0);

fn draw_body(renderer: &mut dyn Renderer, cache: &ResourceCache, body: &Body) {
    renderer.draw_sprite(
        cache.sprite(body.sprite),
        body.position,
        body.size,
        body.rotation,
        body.color,
    );
}

/// Draw one frame of `state`
pub fn draw_scene(
    renderer: &mut dyn Renderer,
    cache: &ResourceCache,
    state: &GameState,
    time: f32,
) {
    let (width, height) = (state.width, state.height);

    renderer.begin_scene();
    renderer.bind_shader(cache.shader("sprite"));

    renderer.draw_sprite(
        cache.sprite(Sprite::Background),
        Vec2::new(0.0, height),
        Vec2::new(width, height),
        0.0,
        Vec3::ONE,
    );

    for block in state.current_level().blocks() {
        if !block.is_destroyed {
            draw_body(renderer, cache, block);
        }
    }

    draw_body(renderer, cache, &state.player);

    for powerup in &state.powerups {
        if !powerup.body.is_destroyed {
            draw_body(renderer, cache, &powerup.body);
        }
    }

    renderer.bind_shader(cache.shader("particle"));
    let particle = cache.sprite(Sprite::Particle);
    for p in state.particles.alive() {
        renderer.draw_particle(particle, p.position, p.color);
    }

    renderer.bind_shader(cache.shader("sprite"));
    draw_body(renderer, cache, &state.ball.body);

    renderer.bind_shader(cache.shader("postprocessing"));
    renderer.end_scene(&state.effects, time);

    draw_hud(renderer, state, height);
}

/// Text overlay for the current phase
fn draw_hud(renderer: &mut dyn Renderer, state: &GameState, height: f32) {
    let lives = format!("Lives: {}", state.lives);
    renderer.draw_text(&lives, Vec2::new(5.0, height - 5.0), 1.0, TEXT_COLOR);

    let middle = height / 2.0;
    match state.phase {
        GamePhase::Menu => {
            renderer.draw_text(
                "Press ENTER to start",
                Vec2::new(250.0, middle),
                1.0,
                TEXT_COLOR,
            );
            renderer.draw_text(
                "Press W or S to select level",
                Vec2::new(245.0, middle - 20.0),
                0.75,
                TEXT_COLOR,
            );
        }
        GamePhase::Win => {
            renderer.draw_text("You WON!!!", Vec2::new(320.0, middle + 20.0), 1.0, WIN_COLOR);
            renderer.draw_text(
                "Press ENTER to retry or ESC to quit",
                Vec2::new(130.0, middle),
                1.0,
                RETRY_COLOR,
            );
        }
        GamePhase::Active => {}
    }
}
