//! Collision detection between circular bodies

use glam::Vec2;

/// Result of a collision check
#[derive(Debug, Clone)]
pub struct CollisionResult {
    /// Whether a collision occurred
    pub hit: bool,
    /// Contact point (if hit), on the surface of the first circle
    pub point: Vec2,
    /// Unit normal pointing from the first circle toward the second
    pub normal: Vec2,
    /// Overlap depth (for position correction)
    pub penetration: f32,
}

impl CollisionResult {
    pub fn miss() -> Self {
        Self {
            hit: false,
            point: Vec2::ZERO,
            normal: Vec2::ZERO,
            penetration: 0.0,
        }
    }
}

/// Signed distance to a circle
#[inline]
pub fn sd_circle(p: Vec2, center: Vec2, radius: f32) -> f32 {
    (p - center).length() - radius
}

/// Check overlap between two circles.
///
/// Coincident centres have no defined direction; they separate along +Y.
pub fn circle_circle_collision(
    a_pos: Vec2,
    a_radius: f32,
    b_pos: Vec2,
    b_radius: f32,
) -> CollisionResult {
    let dist = sd_circle(b_pos, a_pos, a_radius) - b_radius;
    if dist >= 0.0 {
        return CollisionResult::miss();
    }

    let normal = {
        let n = (b_pos - a_pos).normalize_or_zero();
        if n == Vec2::ZERO { Vec2::Y } else { n }
    };

    CollisionResult {
        hit: true,
        point: a_pos + normal * a_radius,
        normal,
        penetration: -dist,
    }
}
