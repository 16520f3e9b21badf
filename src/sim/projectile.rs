//! Projectiles fired from the ship
//!
//! Screen-plane shots keep their depth and live 2 s. Inward and outward shots
//! travel along the depth axis at a quarter of the base speed, live 1 s and
//! die early if they leave the projectile depth range.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::depth::{DepthRange, bullet_parallax};
use super::direction::{Facing, ScrollMode};
use super::wrap::wrap_inverse;
use crate::config::Config;
use crate::DEPTH_EPSILON;

/// Depth units per second for depth-traveling shots
pub const DEPTH_TRAVEL_RATE: f32 = 0.25;
/// Velocity scale for depth-traveling shots
pub const DEPTH_TRAVEL_SPEED_SCALE: f32 = 0.25;
pub const PLANE_LIFESPAN_MS: f64 = 2000.0;
pub const DEPTH_LIFESPAN_MS: f64 = 1000.0;
/// Exponent of the draw-size falloff with depth
pub const DRAW_FALLOFF: f32 = 3.14;

/// Travel class, from the qualifier of the firing facing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ProjectileKind {
    Neutral,
    Inward,
    Outward,
}

impl From<ScrollMode> for ProjectileKind {
    fn from(mode: ScrollMode) -> Self {
        match mode {
            ScrollMode::Inward => ProjectileKind::Inward,
            ScrollMode::Middle => ProjectileKind::Neutral,
            ScrollMode::Outward => ProjectileKind::Outward,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Projectile {
    pub pos: Vec2,
    /// Travel direction (base + qualifier)
    pub facing: Facing,
    pub kind: ProjectileKind,
    pub initial_depth: f32,
    pub depth: f32,
    pub target_depth: f32,
    /// Depth change per second; 0 for screen-plane shots
    pub depth_rate: f32,
    pub velocity: Vec2,
    /// Game time at spawn (ms)
    pub created_ms: f64,
    pub lifespan_ms: f64,
    /// Draw size at spawn, before the depth falloff
    pub base_size: u32,
    pub alive: bool,
}

impl Projectile {
    /// Spawn at screen center.
    ///
    /// `ship_size` is the current sprite size in pixels; it sets the draw size.
    pub fn spawn(
        facing: Facing,
        depth: f32,
        ship_size: (u32, u32),
        now_ms: f64,
        config: &Config,
    ) -> Self {
        let kind = ProjectileKind::from(facing.scroll);
        let mut velocity = facing.base.vector() * config.bullet_speed;

        let (target_depth, depth_rate) = match kind {
            ProjectileKind::Inward => {
                velocity *= DEPTH_TRAVEL_SPEED_SCALE;
                (config.min_depth, DEPTH_TRAVEL_RATE)
            }
            ProjectileKind::Outward => {
                velocity *= DEPTH_TRAVEL_SPEED_SCALE;
                (config.bullet_max_depth, -DEPTH_TRAVEL_RATE)
            }
            ProjectileKind::Neutral => (depth, 0.0),
        };

        let ship_min = ship_size.0.min(ship_size.1) as f32;
        let base_size = crate::scaled_radius(ship_min, 2.0 * depth);

        let lifespan_ms = if depth_rate == 0.0 {
            PLANE_LIFESPAN_MS
        } else {
            DEPTH_LIFESPAN_MS
        };

        Self {
            pos: config.center(),
            facing,
            kind,
            initial_depth: depth,
            depth,
            target_depth,
            depth_rate,
            velocity,
            created_ms: now_ms,
            lifespan_ms,
            base_size,
            alive: true,
        }
    }

    /// Milliseconds since spawn
    #[inline]
    pub fn age_ms(&self, now_ms: f64) -> f64 {
        now_ms - self.created_ms
    }

    /// Advance one tick; marks the projectile dead instead of removing it
    pub fn update(&mut self, dt: f32, now_ms: f64, config: &Config) {
        if !self.alive {
            return;
        }
        if self.age_ms(now_ms) > self.lifespan_ms {
            self.alive = false;
            return;
        }

        self.depth += self.depth_rate * dt;
        let range = DepthRange::new(config.min_depth, config.bullet_max_depth);
        if !range.contains(self.depth) {
            self.alive = false;
            return;
        }

        let step = match self.kind {
            ProjectileKind::Inward => self.velocity * config.inward_bullet_speed_mod,
            ProjectileKind::Outward => {
                self.velocity * config.outward_bullet_speed_mod * bullet_parallax(self.depth)
            }
            ProjectileKind::Neutral => self.velocity * config.neutral_bullet_speed_mod,
        };
        self.pos = wrap_inverse(self.pos + step * dt, config.width, config.height);
    }

    /// `max(1, int(base_size / depth^3.14)) / 2`, floor then halve, in that order
    pub fn draw_size(&self) -> u32 {
        let scaled = (self.base_size as f32 / self.depth.max(DEPTH_EPSILON).powf(DRAW_FALLOFF)).trunc();
        let floored = if scaled < 1.0 { 1 } else { scaled as u32 };
        floored / 2
    }

    /// Red, dimming as the shot recedes; saturates at black
    pub fn color(&self, config: &Config) -> [u8; 3] {
        let range = DepthRange::new(config.min_depth, config.bullet_max_depth);
        let factor = range.fraction(self.depth) * 3.0;
        let red = (255.0 - 127.0 * factor).trunc().clamp(0.0, 255.0) as u8;
        [red, 0, 0]
    }

    /// Outward shots draw over the ship, everything else under it
    #[inline]
    pub fn drawn_over_ship(&self) -> bool {
        self.kind == ProjectileKind::Outward
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::direction::BaseDirection;

    const DT: f32 = 1.0 / 60.0;

    fn fire(key: &str, depth: f32) -> Projectile {
        Projectile::spawn(Facing::parse(key), depth, (35, 30), 0.0, &Config::default())
    }

    #[test]
    fn test_outward_spawn() {
        let p = fire("up_outward", 1.0);
        assert_eq!(p.kind, ProjectileKind::Outward);
        assert_eq!(p.facing.key(), "up_outward");
        assert_eq!(p.target_depth, 5.0);
        assert_eq!(p.depth_rate, -0.25);
        assert_eq!(p.velocity, Vec2::new(0.0, -200.0) * 0.25);
        assert_eq!(p.lifespan_ms, 1000.0);
        assert_eq!(p.pos, Vec2::new(960.0, 540.0));
        assert_eq!(p.base_size, 15);
    }

    #[test]
    fn test_inward_and_neutral_spawn() {
        let p = fire("left_inward", 1.0);
        assert_eq!(p.kind, ProjectileKind::Inward);
        assert_eq!(p.target_depth, 0.1);
        assert_eq!(p.depth_rate, 0.25);
        assert_eq!(p.velocity, Vec2::new(-50.0, 0.0));

        let p = fire("down-right", 0.5);
        assert_eq!(p.kind, ProjectileKind::Neutral);
        assert_eq!(p.depth_rate, 0.0);
        assert_eq!(p.target_depth, 0.5);
        assert_eq!(p.velocity, Vec2::new(200.0, 200.0));
        assert_eq!(p.lifespan_ms, 2000.0);
        assert_eq!(p.base_size, 30);
    }

    #[test]
    fn test_unknown_direction_fires_up() {
        let p = Projectile::spawn(
            Facing::parse("sideways"),
            1.0,
            (0, 0),
            0.0,
            &Config::default(),
        );
        assert_eq!(p.facing.base, BaseDirection::Up);
        assert_eq!(p.velocity, Vec2::new(0.0, -200.0));
        assert_eq!(p.base_size, 1);
    }

    #[test]
    fn test_neutral_lifetime_boundary() {
        let config = Config::default();
        let mut p = fire("right", 1.0);
        p.update(DT, 2000.0, &config);
        assert!(p.alive);
        p.update(DT, 2000.001, &config);
        assert!(!p.alive);
    }

    #[test]
    fn test_depth_shot_dies_at_one_second() {
        let config = Config::default();
        let mut p = fire("up_outward", 1.0);
        p.update(DT, 1000.0, &config);
        assert!(p.alive);
        p.update(DT, 1000.5, &config);
        assert!(!p.alive);
    }

    #[test]
    fn test_depth_shot_dies_leaving_range() {
        let config = Config::default();
        let mut p = fire("up_outward", 0.11);
        // -0.25/s takes it below 0.1 within the first tenth of a second
        p.update(0.1, 100.0, &config);
        assert!(!p.alive);

        let mut p = fire("up_inward", 4.99);
        p.update(0.1, 100.0, &config);
        assert!(!p.alive);
    }

    #[test]
    fn test_outward_moves_with_parallax() {
        let config = Config::default();
        let mut p = fire("right_outward", 2.0);
        p.update(0.1, 100.0, &config);
        // depth 1.975, factor 2/1.975; 50 * factor * 0.1
        let expected = 960.0 + 50.0 * (2.0 / 1.975) * 0.1;
        assert!((p.pos.x - expected).abs() < 1e-3);

        let mut p = fire("right", 2.0);
        p.update(0.1, 100.0, &config);
        assert!((p.pos.x - 980.0).abs() < 1e-3);
    }

    #[test]
    fn test_draw_size_and_color() {
        let config = Config::default();
        let mut p = fire("up", 1.0);
        assert_eq!(p.draw_size(), 7);
        p.depth = 0.5;
        // 15 / 0.5^3.14 = 132.2 -> 132 -> 66
        assert_eq!(p.draw_size(), 66);
        p.depth = 4.0;
        assert_eq!(p.draw_size(), 0);

        p.depth = 0.1;
        assert_eq!(p.color(&config), [255, 0, 0]);
        p.depth = 5.0;
        assert_eq!(p.color(&config), [0, 0, 0]);
    }
}
