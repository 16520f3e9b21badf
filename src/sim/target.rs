//! Target lock and orbital zoom
//!
//! While a star is locked the whole field (stars and projectiles) is pulled
//! toward screen center around it and the depth drifts toward the near plane.
//! Releasing the lock converts the orbit into a boost for the ship.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::depth::DepthRange;
use super::player::{Player, WheelGuard};
use super::projectile::Projectile;
use super::star::{Star, StarField, StarId};
use crate::config::Config;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TargetLock {
    target: Option<StarId>,
    /// `|center - target| / dt` from the last zoom step
    pub orbital_velocity: f32,
    /// Unit vector from the target toward screen center
    pub orbital_direction: Vec2,
}

impl TargetLock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn target(&self) -> Option<StarId> {
        self.target
    }

    pub fn is_locked(&self) -> bool {
        self.target.is_some()
    }

    /// Lock onto a star, discarding any previous orbit
    pub fn lock(&mut self, id: StarId) {
        log::debug!("Target locked: star {}", id.index);
        self.target = Some(id);
        self.orbital_velocity = 0.0;
        self.orbital_direction = Vec2::ZERO;
    }

    /// Drop the lock without a boost
    pub fn clear(&mut self) {
        self.target = None;
    }

    /// The locked star; a handle that no longer resolves clears the lock
    pub fn resolve<'a>(&mut self, stars: &'a StarField) -> Option<&'a Star> {
        let id = self.target?;
        match stars.get(id) {
            Some(star) => Some(star),
            None => {
                log::debug!("Target star {} no longer exists, lock cleared", id.index);
                self.target = None;
                None
            }
        }
    }

    /// Pull the field toward the target and return the extra depth change
    /// for this tick (0 without a target or when it would leave the range).
    pub fn center_zoom(
        &mut self,
        dt: f32,
        stars: &mut StarField,
        projectiles: &mut [Projectile],
        config: &Config,
    ) -> f32 {
        let Some(star) = self.resolve(stars) else {
            return 0.0;
        };
        let target_pos = star.pos;
        let target_depth = star.depth;

        let displacement = config.center() - target_pos;
        // Unscaled displacement over dt: grows without bound as dt shrinks
        self.orbital_velocity = if dt > 0.0 {
            displacement.length() / dt
        } else {
            0.0
        };
        self.orbital_direction = displacement.normalize_or_zero();

        let offset = displacement * dt;
        stars.displace(offset);
        for projectile in projectiles.iter_mut().filter(|p| p.alive) {
            projectile.pos += offset;
        }

        let depth_delta = (config.min_depth - target_depth) * dt;
        let range = DepthRange::new(config.min_depth, config.max_depth);
        if range.contains(target_depth + depth_delta) {
            depth_delta
        } else {
            0.0
        }
    }

    /// Release the lock and hand the orbit to the ship as a boost
    pub fn release(&mut self, player: &mut Player, stars: &StarField, config: &Config) {
        let star = self.resolve(stars);
        player.handle_target_release(star, self.orbital_velocity, config);
        if let Some(id) = self.target.take() {
            log::debug!("Target released: star {}", id.index);
        }
    }

    /// Wheel guard for the locked star, if any
    pub fn wheel_guard(&mut self, stars: &StarField, dt: f32, config: &Config) -> Option<WheelGuard> {
        let star = self.resolve(stars)?;
        Some(WheelGuard {
            target_depth: star.depth,
            range: DepthRange::new(config.min_depth, config.max_depth),
            buffer: config.depth_buffer,
            step: config.depth_rate * dt,
        })
    }
}
