//! Inverse toroidal wrap
//!
//! Leaving the screen through one edge re-enters on the opposite edge with the
//! other axis mirrored, so the field appears to flip rather than scroll
//! seamlessly.

use glam::Vec2;

/// Margin kept between a star and the screen edge after wrapping
pub const STAR_EDGE_MARGIN: f32 = 0.1;

/// Apply the inverse wrap to `pos` on a `width` x `height` screen.
///
/// The x test runs first and mirrors y; the y test then sees the mirrored
/// value and mirrors x. Both may fire in the same call.
pub fn wrap_inverse(mut pos: Vec2, width: f32, height: f32) -> Vec2 {
    if pos.x < 0.0 {
        pos.x += width;
        pos.y = height - pos.y;
    } else if pos.x > width {
        pos.x -= width;
        pos.y = height - pos.y;
    }

    if pos.y < 0.0 {
        pos.y += height;
        pos.x = width - pos.x;
    } else if pos.y > height {
        pos.y -= height;
        pos.x = width - pos.x;
    }

    pos
}

/// Clamp a star into the screen, `margin` away from every edge
#[inline]
pub fn keep_inside(pos: Vec2, width: f32, height: f32, margin: f32) -> Vec2 {
    Vec2::new(
        pos.x.min(width - margin).max(margin),
        pos.y.min(height - margin).max(margin),
    )
}

/// Full point inversion through the screen center, used when a star's depth wraps
#[inline]
pub fn invert(pos: Vec2, width: f32, height: f32) -> Vec2 {
    Vec2::new(width - pos.x, height - pos.y)
}
