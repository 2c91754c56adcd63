//! Kinematic bodies: the shared rectangle entity and the ball
//!
//! Positions are the top-left corner of the body in a y-up screen space, so a
//! body covers `[x, x + w] x [y - h, y]`.

use glam::{Vec2, Vec3};

use super::powerup::PowerUpKind;
use crate::consts::*;

/// Which texture a body is drawn with
///
/// The render pass matches on this instead of dispatching through the body.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sprite {
    Background,
    Ball,
    Block,
    BlockSolid,
    Paddle,
    Particle,
    PowerUp(PowerUpKind),
}

impl Sprite {
    /// Name the resource cache knows this texture by
    pub fn texture_name(&self) -> &'static str {
        match self {
            Sprite::Background => "background",
            Sprite::Ball => "face",
            Sprite::Block => "block",
            Sprite::BlockSolid => "block_solid",
            Sprite::Paddle => "paddle",
            Sprite::Particle => "particle",
            Sprite::PowerUp(kind) => kind.texture_name(),
        }
    }

    /// Every sprite the game draws, for preloading
    pub const ALL: [Sprite; 12] = [
        Sprite::Background,
        Sprite::Ball,
        Sprite::Block,
        Sprite::BlockSolid,
        Sprite::Paddle,
        Sprite::Particle,
        Sprite::PowerUp(PowerUpKind::Speed),
        Sprite::PowerUp(PowerUpKind::Sticky),
        Sprite::PowerUp(PowerUpKind::PassThrough),
        Sprite::PowerUp(PowerUpKind::PadSizeIncrease),
        Sprite::PowerUp(PowerUpKind::Confuse),
        Sprite::PowerUp(PowerUpKind::Chaos),
    ];

    /// Whether the texture carries an alpha channel
    pub fn has_alpha(&self) -> bool {
        !matches!(
            self,
            Sprite::Background | Sprite::Block | Sprite::BlockSolid
        )
    }
}

/// A rectangle in play: paddle, block, or the base of a power-up
#[derive(Debug, Clone, PartialEq)]
pub struct Body {
    pub position: Vec2,
    pub size: Vec2,
    pub velocity: Vec2,
    pub rotation: f32,
    pub color: Vec3,
    /// Indestructible (solid blocks)
    pub is_solid: bool,
    /// Removed from play
    pub is_destroyed: bool,
    pub sprite: Sprite,
}

impl Body {
    pub fn new(position: Vec2, size: Vec2, sprite: Sprite) -> Self {
        Self {
            position,
            size,
            velocity: Vec2::ZERO,
            rotation: 0.0,
            color: Vec3::ONE,
            is_solid: false,
            is_destroyed: false,
            sprite,
        }
    }

    pub fn with_color(mut self, color: Vec3) -> Self {
        self.color = color;
        self
    }

    pub fn with_velocity(mut self, velocity: Vec2) -> Self {
        self.velocity = velocity;
        self
    }

    /// The player's paddle at its resting position
    pub fn player(screen_width: f32) -> Self {
        Self::new(crate::player_spawn(screen_width), PLAYER_SIZE, Sprite::Paddle)
    }

    /// Center of the bounding box
    #[inline]
    pub fn center(&self) -> Vec2 {
        crate::box_center(self.position, self.size)
    }

    /// Half width/height of the bounding box
    #[inline]
    pub fn half_extents(&self) -> Vec2 {
        self.size / 2.0
    }
}

/// The ball: a body with a radius and gameplay flags
#[derive(Debug, Clone, PartialEq)]
pub struct Ball {
    pub body: Body,
    pub radius: f32,
    /// Glued to the paddle; velocity is ignored while set
    pub is_stuck: bool,
    /// Next paddle contact re-sticks the ball
    pub sticky: bool,
    /// Ignores resolution against non-solid blocks
    pub pass_through: bool,
}

impl Ball {
    pub fn new(position: Vec2, radius: f32, velocity: Vec2) -> Self {
        let size = Vec2::splat(radius * 2.0);
        Self {
            body: Body::new(position, size, Sprite::Ball).with_velocity(velocity),
            radius,
            is_stuck: true,
            sticky: false,
            pass_through: false,
        }
    }

    /// Ball resting on a paddle at `player_position`
    pub fn spawn(player_position: Vec2) -> Self {
        Self::new(crate::ball_spawn(player_position), BALL_RADIUS, BALL_VELOCITY)
    }

    /// Center of the ball's circle
    #[inline]
    pub fn center(&self) -> Vec2 {
        Vec2::new(
            self.body.position.x + self.radius,
            self.body.position.y - self.radius,
        )
    }

    /// Integrate position and bounce off the side and top walls.
    ///
    /// The bottom edge is open: crossing it is how the ball is lost, which is
    /// the state machine's business.
    pub fn advance(&mut self, dt: f32, width: f32, height: f32) -> Vec2 {
        if self.is_stuck {
            return self.body.position;
        }

        let body = &mut self.body;
        body.position += body.velocity * dt;

        if body.position.x <= 0.0 {
            body.velocity.x = -body.velocity.x;
            body.position.x = 0.0;
        } else if body.position.x + body.size.x >= width {
            body.velocity.x = -body.velocity.x;
            body.position.x = width - body.size.x;
        }

        if body.position.y >= height {
            body.velocity.y = -body.velocity.y;
            body.position.y = height;
        }

        body.position
    }

    /// Put the ball back on the paddle with fresh flags
    pub fn reset(&mut self, position: Vec2, velocity: Vec2) {
        self.body.position = position;
        self.body.velocity = velocity;
        self.is_stuck = true;
        self.sticky = false;
        self.pass_through = false;
    }

    /// The ball's top edge has dropped below the bottom of the screen
    #[inline]
    pub fn is_lost(&self) -> bool {
        self.body.position.y <= 0.0
    }
}
