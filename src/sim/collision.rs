//! Collision detection and response for axis-aligned boxes
//!
//! Detection reports the axis of least overlap as the contact normal. Response
//! is a plain velocity reflection, which is all the game needs.

use glam::Vec2;

use super::rect::Rect;

/// Result of a collision check
#[derive(Debug, Clone)]
pub struct CollisionResult {
    /// Whether a collision occurred
    pub hit: bool,
    /// Surface normal pointing from the other box toward the first one
    pub normal: Vec2,
    /// Penetration depth along the normal (for position correction)
    pub penetration: f32,
}

impl CollisionResult {
    pub fn miss() -> Self {
        Self {
            hit: false,
            normal: Vec2::ZERO,
            penetration: 0.0,
        }
    }
}

/// Check collision between two boxes
///
/// The normal is expressed from `a`'s point of view: moving `a` along it by
/// `penetration` separates the pair.
pub fn rect_collision(a: &Rect, b: &Rect) -> CollisionResult {
    if !a.intersects(b) {
        return CollisionResult::miss();
    }

    let overlap = a.overlap(b);
    let delta = a.center - b.center;
    if overlap.x < overlap.y {
        let sign = if delta.x < 0.0 { -1.0 } else { 1.0 };
        CollisionResult {
            hit: true,
            normal: Vec2::new(sign, 0.0),
            penetration: overlap.x,
        }
    } else {
        let sign = if delta.y < 0.0 { -1.0 } else { 1.0 };
        CollisionResult {
            hit: true,
            normal: Vec2::new(0.0, sign),
            penetration: overlap.y,
        }
    }
}

/// Reflect velocity off a surface
///
/// Standard reflection: v' = v - 2(v·n)n
#[inline]
pub fn reflect_velocity(velocity: Vec2, normal: Vec2) -> Vec2 {
    velocity - 2.0 * velocity.dot(normal) * normal
}

/// Reflect only when moving into the surface, so a body already separating
/// is not pulled back in.
#[inline]
pub fn bounce(velocity: Vec2, normal: Vec2) -> Vec2 {
    if velocity.dot(normal) < 0.0 {
        reflect_velocity(velocity, normal)
    } else {
        velocity
    }
}
