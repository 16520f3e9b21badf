//! What the renderer draws each frame
//!
//! Positions are floats (the renderer truncates), sizes are integer radii and
//! colors are RGB. Layer order: stars, far projectiles, ship, near projectiles,
//! then the lock box.

use glam::Vec2;
use serde::Serialize;

use super::projectile::Projectile;
use super::state::GameState;
use crate::scaled_radius;

/// Lock box side, in multiples of the target's draw radius
pub const LOCK_BOX_SCALE: u32 = 8;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Sprite {
    pub pos: Vec2,
    pub radius: u32,
    pub color: [u8; 3],
}

/// The ship is drawn centered on screen from the sprite under `shape_key`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ShipSprite {
    pub shape_key: String,
    /// Top-left corner of the sprite
    pub origin: Vec2,
    pub size: (u32, u32),
}

/// Square outline around the locked star
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LockBox {
    pub center: Vec2,
    pub side: u32,
    pub color: [u8; 3],
}

#[derive(Debug, Clone, Serialize)]
pub struct Frame {
    pub stars: Vec<Sprite>,
    /// Drawn before the ship, farthest first
    pub far_projectiles: Vec<Sprite>,
    pub ship: ShipSprite,
    /// Drawn after the ship, farthest first
    pub near_projectiles: Vec<Sprite>,
    pub lock_box: Option<LockBox>,
}

impl Frame {
    /// Build a frame from the current state (read-only)
    pub fn capture(state: &GameState) -> Self {
        let config = &state.config;
        let target = state.target.target().filter(|id| state.stars.get(*id).is_some());

        let stars = state
            .stars
            .iter()
            .enumerate()
            .map(|(i, star)| {
                let is_target = target.is_some_and(|id| id.index == i);
                Sprite {
                    pos: star.pos,
                    radius: star.radius(),
                    color: if is_target {
                        config.target_color
                    } else {
                        config.star_color
                    },
                }
            })
            .collect();

        // Sorting a copy keeps draw order out of update order
        let mut by_depth: Vec<_> = state.projectiles.iter().filter(|p| p.alive).collect();
        by_depth.sort_by(|a, b| b.depth.total_cmp(&a.depth));
        let (near, far): (Vec<_>, Vec<_>) = by_depth.into_iter().partition(|p| p.drawn_over_ship());
        let to_sprite = |p: &&Projectile| Sprite {
            pos: p.pos,
            radius: p.draw_size(),
            color: p.color(config),
        };

        let size = state.ship_size();
        let ship = ShipSprite {
            shape_key: state.player.facing.key(),
            origin: Vec2::new(
                ((config.width as u32).saturating_sub(size.0) / 2) as f32,
                ((config.height as u32).saturating_sub(size.1) / 2) as f32,
            ),
            size,
        };

        let lock_box = target.and_then(|id| state.stars.get(id)).map(|star| LockBox {
            center: star.pos,
            side: scaled_radius(star.size as f32, star.depth) * LOCK_BOX_SCALE,
            color: config.target_color,
        });

        Self {
            stars,
            far_projectiles: far.iter().map(to_sprite).collect(),
            ship,
            near_projectiles: near.iter().map(to_sprite).collect(),
            lock_box,
        }
    }
}
