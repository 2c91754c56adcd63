//! Rendering seam
//!
//! The game never touches a graphics API. It loads named resources through
//! a [`Renderer`] at startup and issues sprite, particle and text draws each
//! frame; the platform layer turns those into GPU work and applies the post
//! effects when the scene ends.

pub mod cache;
pub mod scene;

use std::path::Path;

use glam::{Vec2, Vec3, Vec4};

use crate::error::GameError;
use crate::sim::PostEffects;

pub use cache::ResourceCache;
pub use scene::draw_scene;

/// Opaque texture id handed out by a [`Renderer`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TextureHandle(pub u32);

impl TextureHandle {
    /// Plain white texture every backend must provide
    pub const BLANK: Self = Self(0);
}

/// Opaque shader program id handed out by a [`Renderer`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ShaderHandle(pub u32);

impl ShaderHandle {
    /// Pass-through program every backend must provide
    pub const BLANK: Self = Self(0);
}

/// Draw-call sink implemented by the platform layer
///
/// Positions are in the simulation's y-up screen space; a sprite's position
/// is its top-left corner.
pub trait Renderer {
    fn load_texture(&mut self, name: &str, path: &Path, alpha: bool)
    -> Result<TextureHandle, GameError>;

    fn load_shader(
        &mut self,
        name: &str,
        vertex: &Path,
        fragment: &Path,
    ) -> Result<ShaderHandle, GameError>;

    /// Start drawing into the off-screen scene target
    fn begin_scene(&mut self);

    /// Program used by subsequent draws
    fn bind_shader(&mut self, shader: ShaderHandle);

    fn draw_sprite(
        &mut self,
        texture: TextureHandle,
        position: Vec2,
        size: Vec2,
        rotation: f32,
        color: Vec3,
    );

    fn draw_particle(&mut self, texture: TextureHandle, position: Vec2, color: Vec4);

    /// Composite the scene to the screen with the enabled post effects
    fn end_scene(&mut self, effects: &PostEffects, time: f32);

    /// Overlay text, drawn on top of the composited scene
    fn draw_text(&mut self, text: &str, position: Vec2, scale: f32, color: Vec3);
}

/// Renderer that accepts everything and draws nothing
///
/// Used by the headless driver; it only counts what it was asked to do.
#[derive(Debug, Default, Clone)]
pub struct HeadlessRenderer {
    next_handle: u32,
    pub frames: u64,
    pub sprites: u64,
    pub particles: u64,
    pub texts: u64,
}

impl HeadlessRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    fn allocate(&mut self) -> u32 {
        self.next_handle += 1;
        self.next_handle
    }
}

impl Renderer for HeadlessRenderer {
    fn load_texture(
        &mut self,
        name: &str,
        _path: &Path,
        _alpha: bool,
    ) -> Result<TextureHandle, GameError> {
        log::debug!("Headless texture '{}'", name);
        Ok(TextureHandle(self.allocate()))
    }

    fn load_shader(
        &mut self,
        name: &str,
        _vertex: &Path,
        _fragment: &Path,
    ) -> Result<ShaderHandle, GameError> {
        log::debug!("Headless shader '{}'", name);
        Ok(ShaderHandle(self.allocate()))
    }

    fn begin_scene(&mut self) {}

    fn bind_shader(&mut self, _shader: ShaderHandle) {}

    fn draw_sprite(&mut self, _: TextureHandle, _: Vec2, _: Vec2, _: f32, _: Vec3) {
        self.sprites += 1;
    }

    fn draw_particle(&mut self, _: TextureHandle, _: Vec2, _: Vec4) {
        self.particles += 1;
    }

    fn end_scene(&mut self, _effects: &PostEffects, _time: f32) {
        self.frames += 1;
    }

    fn draw_text(&mut self, _: &str, _: Vec2, _: f32, _: Vec3) {
        self.texts += 1;
    }
}
