//! Background star field
//!
//! Every star drifts against the ship's velocity scaled by its parallax
//! factor. Depth wraps (with a full position inversion) for background stars
//! and clamps for the currently targeted one.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::depth::{DepthRange, star_parallax};
use super::wrap::{STAR_EDGE_MARGIN, invert, keep_inside, wrap_inverse};
use crate::config::Config;
use crate::scaled_radius;

/// A single background star
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Star {
    pub pos: Vec2,
    /// Intrinsic drift; only feeds `relative_velocity`
    pub drift: Vec2,
    pub depth: f32,
    /// Base size, 1..=3
    pub size: u8,
    /// Drift minus the driving velocity, as of the last update
    pub relative_velocity: Vec2,
}

impl Star {
    pub fn new(pos: Vec2, depth: f32, size: u8, drift: Vec2) -> Self {
        Self {
            pos,
            drift,
            depth,
            size,
            relative_velocity: Vec2::ZERO,
        }
    }

    /// Random star anywhere on screen at any background depth
    pub fn random<R: Rng>(config: &Config, rng: &mut R) -> Self {
        let pos = Vec2::new(
            rng.random_range(0.0..=config.width),
            rng.random_range(0.0..=config.height),
        );
        let depth = rng.random_range(config.min_depth..=config.max_depth);
        let drift = Vec2::new(
            rng.random_range(-config.star_drift..=config.star_drift),
            rng.random_range(-config.star_drift..=config.star_drift),
        );
        let size = rng.random_range(1..=3u8);
        Self::new(pos, depth, size, drift)
    }

    /// Advance one tick.
    ///
    /// The targeted star clamps its depth instead of wrapping so it never pops
    /// to the far plane while being approached.
    pub fn update(
        &mut self,
        driving_velocity: Vec2,
        depth_change: f32,
        dt: f32,
        is_target: bool,
        config: &Config,
    ) {
        let range = DepthRange::new(config.min_depth, config.max_depth);
        let depth = self.depth + depth_change;

        if is_target {
            self.depth = range.clamp(depth);
        } else {
            let (depth, wrapped) = range.wrap(depth);
            self.depth = depth;
            if wrapped {
                self.pos = invert(self.pos, config.width, config.height);
            }
        }

        let parallax = star_parallax(self.depth, config.min_depth);
        self.pos -= driving_velocity * parallax * dt;

        self.relative_velocity = self.drift - driving_velocity;

        self.pos = wrap_inverse(self.pos, config.width, config.height);
        self.pos = keep_inside(self.pos, config.width, config.height, STAR_EDGE_MARGIN);
    }

    /// Draw and hit-test radius: `max(1, int(size / depth))`
    #[inline]
    pub fn radius(&self) -> u32 {
        scaled_radius(self.size as f32, self.depth)
    }

    /// Whether a pointer at `point` lands on this star
    pub fn hit(&self, point: Vec2) -> bool {
        self.pos.distance(point) <= self.radius() as f32
    }
}

/// Stable handle to a star. Goes stale when the field is regenerated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct StarId {
    pub index: usize,
    pub generation: u32,
}

/// Fixed-size, fixed-order collection of stars
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StarField {
    stars: Vec<Star>,
    generation: u32,
}

impl StarField {
    /// Scatter `config.star_count` random stars
    pub fn new<R: Rng>(config: &Config, rng: &mut R) -> Self {
        Self {
            stars: (0..config.star_count)
                .map(|_| Star::random(config, rng))
                .collect(),
            generation: 0,
        }
    }

    /// Field with explicit stars (scenarios and tests)
    pub fn from_stars(stars: Vec<Star>) -> Self {
        Self {
            stars,
            generation: 0,
        }
    }

    /// Replace every star; all outstanding [`StarId`]s stop resolving
    pub fn regenerate<R: Rng>(&mut self, config: &Config, rng: &mut R) {
        self.stars = (0..config.star_count)
            .map(|_| Star::random(config, rng))
            .collect();
        self.generation = self.generation.wrapping_add(1);
        log::debug!(
            "Star field regenerated ({} stars, generation {})",
            self.stars.len(),
            self.generation
        );
    }

    pub fn len(&self) -> usize {
        self.stars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stars.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Star> {
        self.stars.iter()
    }

    pub fn as_slice(&self) -> &[Star] {
        &self.stars
    }

    pub fn id_at(&self, index: usize) -> Option<StarId> {
        (index < self.stars.len()).then_some(StarId {
            index,
            generation: self.generation,
        })
    }

    pub fn get(&self, id: StarId) -> Option<&Star> {
        if id.generation != self.generation {
            return None;
        }
        self.stars.get(id.index)
    }

    pub fn get_mut(&mut self, id: StarId) -> Option<&mut Star> {
        if id.generation != self.generation {
            return None;
        }
        self.stars.get_mut(id.index)
    }

    /// Update every star; `target` selects the one that clamps its depth
    pub fn update(
        &mut self,
        driving_velocity: Vec2,
        depth_change: f32,
        dt: f32,
        target: Option<StarId>,
        config: &Config,
    ) {
        let target_index = target
            .filter(|id| id.generation == self.generation)
            .map(|id| id.index);
        for (i, star) in self.stars.iter_mut().enumerate() {
            star.update(
                driving_velocity,
                depth_change,
                dt,
                target_index == Some(i),
                config,
            );
        }
    }

    /// Shift every star by `offset` (no wrap)
    pub fn displace(&mut self, offset: Vec2) {
        for star in &mut self.stars {
            star.pos += offset;
        }
    }

    /// Topmost star under `point`. Later stars are drawn over earlier ones,
    /// so the search runs back to front.
    pub fn hit_test(&self, point: Vec2) -> Option<StarId> {
        self.stars
            .iter()
            .rposition(|star| star.hit(point))
            .and_then(|index| self.id_at(index))
    }
}
