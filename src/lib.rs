//! Parallax Field - a wrap-around starfield with a depth axis
//!
//! Core modules:
//! - `sim`: Deterministic simulation (stars, ship, projectiles, target lock)
//! - `config`: Startup configuration shared by every component
//!
//! Windowing, drawing, input polling and the frame loop live outside this
//! crate. A driver feeds [`sim::tick`] one [`sim::TickInput`] per frame and
//! reads back a [`sim::Frame`] to draw.

pub mod config;
pub mod sim;

pub use config::{Config, ConfigError};

use glam::Vec2;

/// Default configuration constants
pub mod consts {
    /// Screen dimensions
    pub const WIDTH: f32 = 1920.0;
    pub const HEIGHT: f32 = 1080.0;

    /// Background star count (fixed for the lifetime of a field)
    pub const NUM_STARS: usize = 100;
    /// Random drift speed range for stars (per axis, pixels/s)
    pub const STAR_DRIFT: f32 = 50.0;

    /// Ship acceleration per held movement key
    pub const PLAYER_SPEED: f32 = 2000.0;
    /// Depth units per second for depth keys and wheel steps
    pub const DEPTH_RATE: f32 = 0.1;

    /// Background depth range (wraps)
    pub const MIN_DEPTH: f32 = 0.1;
    pub const MAX_DEPTH: f32 = 1.0;
    /// Projectile depth range upper bound (clamps, kills on exit)
    pub const BULLET_MAX_DEPTH: f32 = 5.0;

    /// Projectile defaults
    pub const BULLET_SPEED: f32 = 200.0;
    pub const NEUTRAL_BULLET_SPEED_MOD: f32 = 1.0;
    pub const INWARD_BULLET_SPEED_MOD: f32 = 1.0;
    pub const OUTWARD_BULLET_SPEED_MOD: f32 = 1.0;
    /// Minimum time between shots while fire is held (ms)
    pub const FIRE_DELAY_MS: f64 = 500.0;

    /// Boost impulse: per-tick multiplicative decay
    pub const BOOST_DECAY_RATE: f32 = 0.995;
    /// Boost impulse lifetime (seconds)
    pub const MAX_BOOST_DURATION: f32 = 0.5;
    pub const MAX_BOOST_SPEED: f32 = 500.0;

    /// Seconds the ship keeps facing its movement keys after the last press
    pub const MANUAL_CONTROL_TIMEOUT: f32 = 1.0;
    /// Closest a targeted star may be pushed toward either depth bound by the wheel
    pub const DEPTH_BUFFER: f32 = 0.2;

    /// Ship sprite pixel size
    pub const PIXEL_SIZE: u32 = 5;

    pub const STAR_COLOR: [u8; 3] = [255, 255, 255];
    pub const TARGET_COLOR: [u8; 3] = [255, 0, 0];
}

/// Floor used wherever a depth ends up in a denominator
pub const DEPTH_EPSILON: f32 = 1e-6;

/// Center of a `width` x `height` screen
#[inline]
pub fn screen_center(width: f32, height: f32) -> Vec2 {
    Vec2::new(width / 2.0, height / 2.0)
}

/// Angle of `v` in degrees, in screen coordinates (y grows downward), range (-180, 180]
#[inline]
pub fn screen_angle_degrees(v: Vec2) -> f32 {
    v.y.atan2(v.x).to_degrees()
}

/// `max(1, int(size / divisor))` - the integer draw radius shared by stars and hit tests
#[inline]
pub fn scaled_radius(size: f32, divisor: f32) -> u32 {
    let r = (size / divisor.max(DEPTH_EPSILON)).trunc();
    if r < 1.0 { 1 } else { r as u32 }
}
