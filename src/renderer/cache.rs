//! Named texture and shader handles
//!
//! Loaded once at startup. A resource that fails to load, or a name that was
//! never loaded, resolves to the blank handle so drawing carries on.

use std::collections::HashMap;
use std::path::Path;

use super::{Renderer, ShaderHandle, TextureHandle};
use crate::error::GameError;
use crate::sim::Sprite;

/// Shader programs the scene pass binds
pub const SHADERS: [&str; 3] = ["sprite", "particle", "postprocessing"];

#[derive(Debug, Default, Clone)]
pub struct ResourceCache {
    textures: HashMap<String, TextureHandle>,
    shaders: HashMap<String, ShaderHandle>,
}

impl ResourceCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a texture and remember it under `name`; failures store the blank
    /// handle.
    pub fn load_texture(
        &mut self,
        renderer: &mut dyn Renderer,
        name: &str,
        path: &Path,
        alpha: bool,
    ) -> TextureHandle {
        let handle = renderer.load_texture(name, path, alpha).unwrap_or_else(|e| {
            log::error!("Texture '{}': {}", name, e);
            TextureHandle::BLANK
        });
        self.textures.insert(name.to_string(), handle);
        handle
    }

    pub fn load_shader(
        &mut self,
        renderer: &mut dyn Renderer,
        name: &str,
        vertex: &Path,
        fragment: &Path,
    ) -> ShaderHandle {
        let handle = renderer
            .load_shader(name, vertex, fragment)
            .unwrap_or_else(|e| {
                log::error!("Shader '{}': {}", name, e);
                ShaderHandle::BLANK
            });
        self.shaders.insert(name.to_string(), handle);
        handle
    }

    /// Load every shader and sprite texture the game draws with
    pub fn load_defaults(&mut self, renderer: &mut dyn Renderer, resource_dir: &Path) {
        let shader_dir = resource_dir.join("shaders");
        for name in SHADERS {
            self.load_shader(
                renderer,
                name,
                &shader_dir.join(format!("{name}.vs")),
                &shader_dir.join(format!("{name}.frag")),
            );
        }

        let texture_dir = resource_dir.join("textures");
        for sprite in Sprite::ALL {
            self.load_texture(
                renderer,
                sprite.texture_name(),
                &texture_dir.join(texture_file(sprite)),
                sprite.has_alpha(),
            );
        }
        log::info!(
            "Loaded {} shaders and {} textures",
            self.shaders.len(),
            self.textures.len()
        );
    }

    pub fn try_texture(&self, name: &str) -> Result<TextureHandle, GameError> {
        self.textures
            .get(name)
            .copied()
            .ok_or_else(|| GameError::UnknownResource {
                kind: "texture",
                name: name.to_string(),
            })
    }

    pub fn try_shader(&self, name: &str) -> Result<ShaderHandle, GameError> {
        self.shaders
            .get(name)
            .copied()
            .ok_or_else(|| GameError::UnknownResource {
                kind: "shader",
                name: name.to_string(),
            })
    }

    /// Handle for `name`, or the blank texture
    pub fn texture(&self, name: &str) -> TextureHandle {
        self.try_texture(name).unwrap_or_else(|e| {
            log::debug!("{}", e);
            TextureHandle::BLANK
        })
    }

    /// Handle for `name`, or the blank shader
    pub fn shader(&self, name: &str) -> ShaderHandle {
        self.try_shader(name).unwrap_or_else(|e| {
            log::debug!("{}", e);
            ShaderHandle::BLANK
        })
    }

    pub fn sprite(&self, sprite: Sprite) -> TextureHandle {
        self.texture(sprite.texture_name())
    }
}

/// File name under `textures/` for a sprite
fn texture_file(sprite: Sprite) -> String {
    match sprite {
        Sprite::Background => "background.jpg".to_string(),
        Sprite::Ball => "awesomeface.png".to_string(),
        other => format!("{}.png", other.texture_name()),
    }
}
