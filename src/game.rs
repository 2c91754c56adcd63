//! Application facade
//!
//! Owns the round state and the service handles, and exposes the four calls
//! a frame loop needs: `initialize` once, then `handle_input`, `update` and
//! `render` every frame.

use crate::audio::{AudioBackend, AudioManager};
use crate::input::{InputState, KeyCode};
use crate::renderer::{self, Renderer, ResourceCache};
use crate::settings::Settings;
use crate::sim::{self, GameEvent, GameLevel, GameState};

pub struct Game {
    settings: Settings,
    state: GameState,
    audio: AudioManager,
    cache: ResourceCache,
    /// Events raised by the last `update`
    events: Vec<GameEvent>,
    quit_requested: bool,
}

impl Game {
    pub fn new(settings: Settings, audio: Box<dyn AudioBackend>) -> Self {
        let state = GameState::new(
            settings.screen_width,
            settings.screen_height,
            settings.starting_lives,
            settings.seed,
            vec![GameLevel::default()],
        );
        let audio = AudioManager::new(audio, &settings);
        Self {
            settings,
            state,
            audio,
            cache: ResourceCache::new(),
            events: Vec::new(),
            quit_requested: false,
        }
    }

    /// Load shaders, textures and levels, then start the theme
    pub fn initialize(&mut self, renderer: &mut dyn Renderer) {
        log::info!("Initializing {}x{}", self.settings.screen_width, self.settings.screen_height);
        self.cache
            .load_defaults(renderer, &self.settings.resource_dir);

        let levels = self
            .settings
            .level_paths()
            .iter()
            .enumerate()
            .map(|(i, path)| {
                GameLevel::load(
                    path,
                    self.settings.screen_height,
                    self.settings.screen_width,
                    self.settings.level_height(i),
                )
            })
            .collect();
        self.set_levels(levels);

        self.audio.start_music();
    }

    /// Replace the level set and start over on the menu
    pub fn set_levels(&mut self, levels: Vec<GameLevel>) {
        self.state = GameState::new(
            self.settings.screen_width,
            self.settings.screen_height,
            self.settings.starting_lives,
            self.settings.seed,
            levels,
        );
    }

    pub fn handle_input(&mut self, input: &mut InputState, dt: f32) {
        if input.take_key_edge(KeyCode::Escape) {
            log::info!("Quit requested");
            self.quit_requested = true;
        }
        sim::handle_input(&mut self.state, input, dt);
    }

    pub fn update(&mut self, dt: f32) {
        sim::update(&mut self.state, dt);
        self.events = self.state.drain_events();
        self.audio.play_events(&self.events);
    }

    pub fn render(&self, renderer: &mut dyn Renderer, time: f32) {
        renderer::draw_scene(renderer, &self.cache, &self.state, time);
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn state_mut(&mut self) -> &mut GameState {
        &mut self.state
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn events(&self) -> &[GameEvent] {
        &self.events
    }

    pub fn audio_mut(&mut self) -> &mut AudioManager {
        &mut self.audio
    }

    pub fn should_quit(&self) -> bool {
        self.quit_requested
    }
}
