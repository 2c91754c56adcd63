//! Headless driver
//!
//! Runs the game with no window, no GPU and no sound device: a scripted
//! player starts the round, launches the ball and tracks it with the paddle.
//!
//! Usage: `brick-breaker [settings.json] [seconds]`

use std::path::PathBuf;

use brick_breaker::audio::NullAudio;
use brick_breaker::consts::*;
use brick_breaker::renderer::HeadlessRenderer;
use brick_breaker::sim::{GameEvent, GamePhase, GameState};
use brick_breaker::{Game, InputState, KeyCode, Settings};

/// Host frame rate the driver pretends to run at
const FRAME_DT: f32 = 1.0 / 60.0;

/// Fixed-timestep frame loop state
struct Driver {
    game: Game,
    renderer: HeadlessRenderer,
    input: InputState,
    accumulator: f32,
    time: f32,
}

impl Driver {
    fn new(game: Game, renderer: HeadlessRenderer) -> Self {
        Self {
            game,
            renderer,
            input: InputState::new(),
            accumulator: 0.0,
            time: 0.0,
        }
    }

    /// Run simulation ticks for one host frame, then draw it
    fn frame(&mut self, dt: f32) {
        let dt = dt.min(0.1);
        self.accumulator += dt;
        self.time += dt;

        let mut substeps = 0;
        while self.accumulator >= SIM_DT && substeps < MAX_SUBSTEPS {
            self.game.handle_input(&mut self.input, SIM_DT);
            self.game.update(SIM_DT);
            self.accumulator -= SIM_DT;
            substeps += 1;

            for event in self.game.events() {
                match event {
                    GameEvent::LifeLost { remaining } => {
                        log::info!("Life lost, {} left", remaining)
                    }
                    GameEvent::LevelCompleted { level } => {
                        log::info!("Cleared level {}", level + 1)
                    }
                    GameEvent::PowerUpCollected(kind) => log::info!("Collected {:?}", kind),
                    _ => {}
                }
            }
        }

        self.game.render(&mut self.renderer, self.time);
    }

    /// Scripted player: start from menus, launch, follow the ball
    fn autopilot(&mut self) {
        let state = self.game.state();
        let phase = state.phase;
        let steer = steer(state);

        for key in [KeyCode::A, KeyCode::D, KeyCode::Space, KeyCode::Enter] {
            self.input.release(key);
        }
        match phase {
            GamePhase::Menu => self.input.press(KeyCode::Enter),
            GamePhase::Active => {
                self.input.press(KeyCode::Space);
                if let Some(key) = steer {
                    self.input.press(key);
                }
            }
            GamePhase::Win => self.input.press(KeyCode::Escape),
        }
    }
}

/// Key that moves the paddle under the ball, if it is off by more than a
/// quarter paddle
fn steer(state: &GameState) -> Option<KeyCode> {
    let offset = state.ball.center().x - state.player.center().x;
    if offset.abs() < state.player.size.x / 4.0 {
        None
    } else if offset < 0.0 {
        Some(KeyCode::A)
    } else {
        Some(KeyCode::D)
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();

    let mut args = std::env::args().skip(1);
    let settings_path = args
        .next()
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("settings.json"));
    let seconds: f32 = match args.next().map(|s| s.parse::<f32>()) {
        Some(Ok(seconds)) => seconds,
        Some(Err(e)) => {
            log::warn!("Bad duration: {}; running 60 seconds", e);
            60.0
        }
        None => 60.0,
    };

    log::info!("Brick Breaker (headless) starting...");
    let settings = Settings::load(&settings_path);
    let mut game = Game::new(settings, Box::new(NullAudio));
    let mut renderer = HeadlessRenderer::new();
    game.initialize(&mut renderer);

    let mut driver = Driver::new(game, renderer);

    let frames = (seconds / FRAME_DT) as u64;
    for _ in 0..frames {
        driver.autopilot();
        driver.frame(FRAME_DT);
        if driver.game.should_quit() {
            break;
        }
    }

    let state = driver.game.state();
    log::info!(
        "Stopped after {:.1}s in {:?}: level {}, {} lives, {} blocks left",
        driver.time,
        state.phase,
        state.level_index + 1,
        state.lives,
        state
            .current_level()
            .blocks()
            .iter()
            .filter(|b| !b.is_solid && !b.is_destroyed)
            .count()
    );
    log::info!(
        "Drew {} frames, {} sprites, {} particles",
        driver.renderer.frames,
        driver.renderer.sprites,
        driver.renderer.particles
    );
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // No headless driver on the web
}
