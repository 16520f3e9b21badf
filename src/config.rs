//! Startup configuration
//!
//! Built once (from defaults or a JSON document) and handed to every
//! component by reference. Nothing here changes while a game is running.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Errors produced while building a [`Config`]
#[derive(Debug)]
pub enum ConfigError {
    /// The document was not valid JSON or had mistyped fields
    Parse(serde_json::Error),
    /// A field parsed but holds a value the simulation cannot run with
    Invalid {
        field: &'static str,
        value: f64,
        reason: &'static str,
    },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Parse(e) => write!(f, "config parse error: {e}"),
            ConfigError::Invalid {
                field,
                value,
                reason,
            } => write!(f, "invalid config value {field} = {value}: {reason}"),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::Parse(e) => Some(e),
            ConfigError::Invalid { .. } => None,
        }
    }
}

impl From<serde_json::Error> for ConfigError {
    fn from(e: serde_json::Error) -> Self {
        ConfigError::Parse(e)
    }
}

/// Simulation tunables
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    // === Screen ===
    pub width: f32,
    pub height: f32,

    // === Star field ===
    pub star_count: usize,
    /// Stars drift at up to this speed on each axis (only feeds relative velocity)
    pub star_drift: f32,

    // === Ship ===
    pub player_speed: f32,
    pub depth_rate: f32,
    /// Seconds the facing follows movement keys after the last press
    pub manual_control_timeout: f32,
    pub pixel_size: u32,

    // === Depth ===
    pub min_depth: f32,
    pub max_depth: f32,
    pub bullet_max_depth: f32,
    /// Wheel changes that would bring the target star this close to a bound are refused
    pub depth_buffer: f32,

    // === Projectiles ===
    pub bullet_speed: f32,
    pub neutral_bullet_speed_mod: f32,
    pub inward_bullet_speed_mod: f32,
    pub outward_bullet_speed_mod: f32,
    pub fire_delay_ms: f64,

    // === Boost ===
    pub boost_decay_rate: f32,
    pub max_boost_duration: f32,
    pub max_boost_speed: f32,

    // === Colors ===
    pub star_color: [u8; 3],
    pub target_color: [u8; 3],
}

impl Default for Config {
    fn default() -> Self {
        Self {
            width: WIDTH,
            height: HEIGHT,

            star_count: NUM_STARS,
            star_drift: STAR_DRIFT,

            player_speed: PLAYER_SPEED,
            depth_rate: DEPTH_RATE,
            manual_control_timeout: MANUAL_CONTROL_TIMEOUT,
            pixel_size: PIXEL_SIZE,

            min_depth: MIN_DEPTH,
            max_depth: MAX_DEPTH,
            bullet_max_depth: BULLET_MAX_DEPTH,
            depth_buffer: DEPTH_BUFFER,

            bullet_speed: BULLET_SPEED,
            neutral_bullet_speed_mod: NEUTRAL_BULLET_SPEED_MOD,
            inward_bullet_speed_mod: INWARD_BULLET_SPEED_MOD,
            outward_bullet_speed_mod: OUTWARD_BULLET_SPEED_MOD,
            fire_delay_ms: FIRE_DELAY_MS,

            boost_decay_rate: BOOST_DECAY_RATE,
            max_boost_duration: MAX_BOOST_DURATION,
            max_boost_speed: MAX_BOOST_SPEED,

            star_color: STAR_COLOR,
            target_color: TARGET_COLOR,
        }
    }
}

impl Config {
    /// Parse a (possibly partial) JSON document; missing keys keep their defaults
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Config = serde_json::from_str(json)?;
        config.validate()?;
        log::info!(
            "Loaded config: {}x{}, {} stars, depth [{}, {}]",
            config.width,
            config.height,
            config.star_count,
            config.min_depth,
            config.max_depth
        );
        Ok(config)
    }

    /// Check every value the simulation divides by or compares against
    pub fn validate(&self) -> Result<(), ConfigError> {
        fn invalid(field: &'static str, value: impl Into<f64>, reason: &'static str) -> ConfigError {
            ConfigError::Invalid {
                field,
                value: value.into(),
                reason,
            }
        }

        if !(self.width > 0.0 && self.width.is_finite()) {
            return Err(invalid("width", self.width, "must be positive and finite"));
        }
        if !(self.height > 0.0 && self.height.is_finite()) {
            return Err(invalid("height", self.height, "must be positive and finite"));
        }
        if !(self.star_drift >= 0.0 && self.star_drift.is_finite()) {
            return Err(invalid("star_drift", self.star_drift, "must be finite and not negative"));
        }
        if !(self.min_depth > 0.0 && self.min_depth.is_finite()) {
            return Err(invalid("min_depth", self.min_depth, "must be positive and finite"));
        }
        if !(self.max_depth > self.min_depth && self.max_depth.is_finite()) {
            return Err(invalid("max_depth", self.max_depth, "must be finite and exceed min_depth"));
        }
        if !(self.bullet_max_depth > self.min_depth && self.bullet_max_depth.is_finite()) {
            return Err(invalid(
                "bullet_max_depth",
                self.bullet_max_depth,
                "must be finite and exceed min_depth",
            ));
        }
        if !(self.boost_decay_rate > 0.0 && self.boost_decay_rate <= 1.0) {
            return Err(invalid(
                "boost_decay_rate",
                self.boost_decay_rate,
                "must be in (0, 1]",
            ));
        }
        if self.max_boost_duration < 0.0 {
            return Err(invalid(
                "max_boost_duration",
                self.max_boost_duration,
                "must not be negative",
            ));
        }
        if self.manual_control_timeout < 0.0 {
            return Err(invalid(
                "manual_control_timeout",
                self.manual_control_timeout,
                "must not be negative",
            ));
        }
        if self.fire_delay_ms < 0.0 {
            return Err(invalid("fire_delay_ms", self.fire_delay_ms, "must not be negative"));
        }
        if self.depth_buffer < 0.0 {
            return Err(invalid("depth_buffer", self.depth_buffer, "must not be negative"));
        }
        if self.pixel_size == 0 {
            return Err(invalid("pixel_size", self.pixel_size, "must be at least 1"));
        }
        Ok(())
    }

    /// Screen center, where the ship sits and projectiles spawn
    #[inline]
    pub fn center(&self) -> glam::Vec2 {
        crate::screen_center(self.width, self.height)
    }
}
