//! Collision detection and response for boxes and the ball
//!
//! Everything here is axis-aligned: boxes never rotate, and the ball is
//! resolved against the nearest face of the box it touches.

use glam::Vec2;

use super::body::{Ball, Body};

/// Which face of a box the ball struck, as a compass direction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Right,
    Down,
    Left,
}

impl Direction {
    /// Enumeration order doubles as the tie-break order
    pub const COMPASS: [Direction; 4] = [
        Direction::Up,
        Direction::Right,
        Direction::Down,
        Direction::Left,
    ];

    /// Unit vector for this direction (y up)
    pub fn unit(self) -> Vec2 {
        match self {
            Direction::Up => Vec2::Y,
            Direction::Right => Vec2::X,
            Direction::Down => Vec2::NEG_Y,
            Direction::Left => Vec2::NEG_X,
        }
    }

    /// Closest compass direction to `target` by dot product.
    ///
    /// Ties go to the earliest entry in [`Direction::COMPASS`]. A zero or
    /// non-finite vector has no direction and maps to `Up`.
    pub fn from_vector(target: Vec2) -> Self {
        let Some(target) = target.try_normalize() else {
            return Direction::Up;
        };

        let mut best = Direction::Up;
        let mut max = f32::NEG_INFINITY;
        for dir in Self::COMPASS {
            let dot = target.dot(dir.unit());
            if dot > max {
                max = dot;
                best = dir;
            }
        }
        best
    }

    #[inline]
    pub fn is_horizontal(self) -> bool {
        matches!(self, Direction::Left | Direction::Right)
    }
}

/// Result of a circle vs box check
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CollisionResult {
    /// Whether the circle touches the box
    pub collided: bool,
    /// Face of the box nearest the penetration vector
    pub direction: Direction,
    /// Closest point on the box minus the circle center
    pub difference: Vec2,
}

impl CollisionResult {
    pub fn miss() -> Self {
        Self {
            collided: false,
            direction: Direction::Up,
            difference: Vec2::ZERO,
        }
    }
}

/// Axis-aligned bounding box overlap, touching edges included
pub fn rect_overlap(a: &Body, b: &Body) -> bool {
    let overlap_x =
        a.position.x + a.size.x >= b.position.x && b.position.x + b.size.x >= a.position.x;
    let overlap_y =
        a.position.y - a.size.y <= b.position.y && b.position.y - b.size.y <= a.position.y;
    overlap_x && overlap_y
}

/// Check the ball against a box
///
/// The closest point on the box is found by clamping the center-to-center
/// vector to the box's half extents. The ball collides when that point lies
/// within its radius (boundary inclusive).
pub fn circle_vs_rect(ball: &Ball, rect: &Body) -> CollisionResult {
    let center = ball.center();
    let half = rect.half_extents();
    let rect_center = rect.center();

    let clamped = (center - rect_center).clamp(-half, half);
    let closest = rect_center + clamped;
    let difference = closest - center;

    if difference.length() <= ball.radius {
        CollisionResult {
            collided: true,
            direction: Direction::from_vector(difference),
            difference,
        }
    } else {
        CollisionResult::miss()
    }
}

/// Reflect velocity off a surface
///
/// Standard reflection: v' = v - 2(v·n)n
#[inline]
pub fn reflect_velocity(velocity: Vec2, normal: Vec2) -> Vec2 {
    velocity - 2.0 * velocity.dot(normal) * normal
}

/// Bounce the ball off the face in `result` and push it back out of the box
/// along that face's axis.
pub fn resolve(ball: &mut Ball, result: &CollisionResult) {
    if !result.collided {
        return;
    }
    let normal = result.direction.unit();
    let depth = result.difference.dot(normal) - ball.radius;
    ball.body.velocity = reflect_velocity(ball.body.velocity, normal);
    ball.body.position += normal * depth;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::body::Sprite;
    use proptest::prelude::*;

    fn block(x: f32, y: f32, w: f32, h: f32) -> Body {
        Body::new(Vec2::new(x, y), Vec2::new(w, h), Sprite::Block)
    }

    /// Ball whose center sits at `center`
    fn ball_at(center: Vec2, radius: f32, vel: Vec2) -> Ball {
        let mut ball = Ball::new(center + Vec2::new(-radius, radius), radius, vel);
        ball.is_stuck = false;
        ball
    }

    #[test]
    fn test_rect_overlap_touching_edges() {
        let a = block(0.0, 100.0, 50.0, 50.0);
        let b = block(50.0, 100.0, 50.0, 50.0);
        assert!(rect_overlap(&a, &b));
        let c = block(0.0, 50.0, 50.0, 20.0);
        assert!(rect_overlap(&a, &c));
        let d = block(50.1, 100.0, 50.0, 50.0);
        assert!(!rect_overlap(&a, &d));
        let e = block(0.0, 49.9, 50.0, 20.0);
        assert!(!rect_overlap(&a, &e));
    }

    #[test]
    fn test_direction_compass() {
        assert_eq!(Direction::from_vector(Vec2::new(0.0, 3.0)), Direction::Up);
        assert_eq!(Direction::from_vector(Vec2::new(2.0, 0.5)), Direction::Right);
        assert_eq!(Direction::from_vector(Vec2::new(0.1, -1.0)), Direction::Down);
        assert_eq!(Direction::from_vector(Vec2::new(-5.0, 1.0)), Direction::Left);
    }

    #[test]
    fn test_direction_ties_take_first() {
        assert_eq!(Direction::from_vector(Vec2::new(1.0, 1.0)), Direction::Up);
        assert_eq!(Direction::from_vector(Vec2::new(1.0, -1.0)), Direction::Right);
        assert_eq!(Direction::from_vector(Vec2::new(-1.0, -1.0)), Direction::Down);
    }

    #[test]
    fn test_direction_zero_vector_defaults_up() {
        assert_eq!(Direction::from_vector(Vec2::ZERO), Direction::Up);
    }

    #[test]
    fn test_ball_below_block_hits_up_face() {
        // Block spans x 100..200, y 250..300
        let rect = block(100.0, 300.0, 100.0, 50.0);
        let ball = ball_at(Vec2::new(150.0, 240.0), 12.5, Vec2::new(0.0, 100.0));
        let result = circle_vs_rect(&ball, &rect);
        assert!(result.collided);
        assert_eq!(result.direction, Direction::Up);
        assert!((result.difference - Vec2::new(0.0, 10.0)).length() < 1e-4);
    }

    #[test]
    fn test_ball_far_away_misses() {
        let rect = block(100.0, 300.0, 100.0, 50.0);
        let ball = ball_at(Vec2::new(400.0, 100.0), 12.5, Vec2::ZERO);
        let result = circle_vs_rect(&ball, &rect);
        assert!(!result.collided);
        assert_eq!(result, CollisionResult::miss());
    }

    #[test]
    fn test_boundary_distance_is_inclusive() {
        // Ball exactly one radius left of the box's left face
        let rect = block(100.0, 300.0, 100.0, 50.0);
        let ball = ball_at(Vec2::new(90.0, 275.0), 10.0, Vec2::ZERO);
        let result = circle_vs_rect(&ball, &rect);
        assert!(result.collided);
        assert_eq!(result.direction, Direction::Right);
    }

    #[test]
    fn test_center_inside_box_defaults_up() {
        let rect = block(100.0, 300.0, 100.0, 50.0);
        let ball = ball_at(Vec2::new(150.0, 275.0), 10.0, Vec2::ZERO);
        let result = circle_vs_rect(&ball, &rect);
        assert!(result.collided);
        assert_eq!(result.difference, Vec2::ZERO);
        assert_eq!(result.direction, Direction::Up);
    }

    #[test]
    fn test_reflect_velocity() {
        let reflected = reflect_velocity(Vec2::new(100.0, 30.0), Vec2::NEG_X);
        assert!((reflected.x - (-100.0)).abs() < 0.001);
        assert!((reflected.y - 30.0).abs() < 0.001);
    }

    #[test]
    fn test_resolve_pushes_ball_out() {
        let rect = block(100.0, 300.0, 100.0, 50.0);
        let mut ball = ball_at(Vec2::new(150.0, 240.0), 12.5, Vec2::new(40.0, 100.0));
        let result = circle_vs_rect(&ball, &rect);
        resolve(&mut ball, &result);

        assert_eq!(ball.body.velocity, Vec2::new(40.0, -100.0));
        // Center now one radius below the bottom face
        assert!((ball.center().y - (250.0 - 12.5)).abs() < 1e-3);
        assert!((ball.center().x - 150.0).abs() < 1e-4);
    }

    #[test]
    fn test_resolve_ignores_miss() {
        let mut ball = ball_at(Vec2::new(150.0, 240.0), 12.5, Vec2::new(40.0, 100.0));
        let before = ball.clone();
        resolve(&mut ball, &CollisionResult::miss());
        assert_eq!(ball, before);
    }

    proptest! {
        #[test]
        fn prop_collides_iff_within_radius(
            cx in -100.0f32..400.0,
            cy in -100.0f32..400.0,
            radius in 1.0f32..40.0,
        ) {
            let rect = block(100.0, 250.0, 120.0, 40.0);
            let ball = ball_at(Vec2::new(cx, cy), radius, Vec2::ZERO);
            let center = ball.center();

            let nearest = Vec2::new(
                center.x.clamp(100.0, 220.0),
                center.y.clamp(210.0, 250.0),
            );
            let distance = (nearest - center).length();

            let result = circle_vs_rect(&ball, &rect);
            if distance > radius + 1e-3 {
                prop_assert!(!result.collided);
            }
            if distance < radius - 1e-3 {
                prop_assert!(result.collided);
            }
        }

        #[test]
        fn prop_direction_maximizes_dot(x in -50.0f32..50.0, y in -50.0f32..50.0) {
            let v = Vec2::new(x, y);
            prop_assume!(v.length() > 1e-3);
            let chosen = Direction::from_vector(v).unit().dot(v.normalize());
            for dir in Direction::COMPASS {
                prop_assert!(chosen >= dir.unit().dot(v.normalize()));
            }
        }

        #[test]
        fn prop_reflection_flips_normal_component(
            offset in -45.0f32..45.0,
            vx in -300.0f32..300.0,
            vy in 10.0f32..300.0,
        ) {
            // Ball approaching the bottom face of the block from below
            let rect = block(100.0, 300.0, 100.0, 50.0);
            let mut ball = ball_at(Vec2::new(150.0 + offset, 242.0), 10.0, Vec2::new(vx, vy));
            let result = circle_vs_rect(&ball, &rect);
            prop_assert!(result.collided);
            prop_assert_eq!(result.direction, Direction::Up);

            let normal = result.direction.unit();
            let before = ball.body.velocity.dot(normal);
            resolve(&mut ball, &result);
            let after = ball.body.velocity.dot(normal);

            prop_assert!((after + before).abs() < 1e-3);
            // Tangential component untouched
            prop_assert!((ball.body.velocity.x - vx).abs() < 1e-3);
            // No longer penetrating: a second check finds at most a touch
            let again = circle_vs_rect(&ball, &rect);
            prop_assert!(!again.collided || again.difference.length() >= ball.radius - 1e-3);
        }
    }
}
