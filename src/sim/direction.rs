//! Compass directions, scroll modes and the facing they combine into
//!
//! A facing is a base compass direction plus an optional depth qualifier
//! (inward/outward). The string form `"{dir}_{mode}"` is kept only as the
//! key format of sprite tables.

use std::fmt;

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// One of the 8 compass directions (screen coordinates: +y is down)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum BaseDirection {
    #[default]
    Up,
    Down,
    Left,
    Right,
    UpRight,
    UpLeft,
    DownRight,
    DownLeft,
}

impl BaseDirection {
    pub const ALL: [BaseDirection; 8] = [
        BaseDirection::Up,
        BaseDirection::Down,
        BaseDirection::Left,
        BaseDirection::Right,
        BaseDirection::UpRight,
        BaseDirection::UpLeft,
        BaseDirection::DownRight,
        BaseDirection::DownLeft,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            BaseDirection::Up => "up",
            BaseDirection::Down => "down",
            BaseDirection::Left => "left",
            BaseDirection::Right => "right",
            BaseDirection::UpRight => "up-right",
            BaseDirection::UpLeft => "up-left",
            BaseDirection::DownRight => "down-right",
            BaseDirection::DownLeft => "down-left",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "up" => Some(BaseDirection::Up),
            "down" => Some(BaseDirection::Down),
            "left" => Some(BaseDirection::Left),
            "right" => Some(BaseDirection::Right),
            "up-right" => Some(BaseDirection::UpRight),
            "up-left" => Some(BaseDirection::UpLeft),
            "down-right" => Some(BaseDirection::DownRight),
            "down-left" => Some(BaseDirection::DownLeft),
            _ => None,
        }
    }

    /// Axis-aligned direction vector; diagonals are (±1, ±1), not normalized
    pub fn vector(&self) -> Vec2 {
        match self {
            BaseDirection::Up => Vec2::new(0.0, -1.0),
            BaseDirection::Down => Vec2::new(0.0, 1.0),
            BaseDirection::Left => Vec2::new(-1.0, 0.0),
            BaseDirection::Right => Vec2::new(1.0, 0.0),
            BaseDirection::UpRight => Vec2::new(1.0, -1.0),
            BaseDirection::UpLeft => Vec2::new(-1.0, -1.0),
            BaseDirection::DownRight => Vec2::new(1.0, 1.0),
            BaseDirection::DownLeft => Vec2::new(-1.0, 1.0),
        }
    }

    /// Direction from key axes (`dx`, `dy` in {-1, 0, 1}); `None` when idle
    pub fn from_axes(dx: i32, dy: i32) -> Option<Self> {
        match (dx.signum(), dy.signum()) {
            (0, -1) => Some(BaseDirection::Up),
            (0, 1) => Some(BaseDirection::Down),
            (-1, 0) => Some(BaseDirection::Left),
            (1, 0) => Some(BaseDirection::Right),
            (1, -1) => Some(BaseDirection::UpRight),
            (-1, -1) => Some(BaseDirection::UpLeft),
            (1, 1) => Some(BaseDirection::DownRight),
            (-1, 1) => Some(BaseDirection::DownLeft),
            _ => None,
        }
    }

    /// Quantize a screen-space angle (degrees, +y down) into one of 8 octants.
    /// Each octant is half-open on its upper boundary, e.g. right = [-22.5, 22.5).
    pub fn from_angle_degrees(angle: f32) -> Self {
        // Shift so octant 0 (right) starts at 0, then bucket by 45 degrees
        let shifted = (angle + 22.5).rem_euclid(360.0);
        match (shifted / 45.0) as u32 % 8 {
            0 => BaseDirection::Right,
            1 => BaseDirection::DownRight,
            2 => BaseDirection::Down,
            3 => BaseDirection::DownLeft,
            4 => BaseDirection::Left,
            5 => BaseDirection::UpLeft,
            6 => BaseDirection::Up,
            _ => BaseDirection::UpRight,
        }
    }
}

/// Ship depth intent, stepped by the scroll wheel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ScrollMode {
    Inward,
    #[default]
    Middle,
    Outward,
}

impl ScrollMode {
    /// Order the wheel walks through (no wrap at the ends)
    pub const ORDER: [ScrollMode; 3] = [ScrollMode::Inward, ScrollMode::Middle, ScrollMode::Outward];

    fn index(&self) -> usize {
        match self {
            ScrollMode::Inward => 0,
            ScrollMode::Middle => 1,
            ScrollMode::Outward => 2,
        }
    }

    /// Mode after a wheel event: scrolling down (`y < 0`) moves toward outward,
    /// scrolling up toward inward. Saturates at both ends.
    pub fn stepped(&self, wheel_y: i32) -> Self {
        let i = self.index();
        if wheel_y < 0 && i < Self::ORDER.len() - 1 {
            Self::ORDER[i + 1]
        } else if wheel_y > 0 && i > 0 {
            Self::ORDER[i - 1]
        } else {
            *self
        }
    }

    /// Sprite-key suffix; middle has none
    pub fn suffix(&self) -> Option<&'static str> {
        match self {
            ScrollMode::Inward => Some("inward"),
            ScrollMode::Middle => None,
            ScrollMode::Outward => Some("outward"),
        }
    }

    /// Wheel depth term held for one tick after a mode change
    pub fn wheel_value(&self) -> i32 {
        match self {
            ScrollMode::Inward => 1,
            ScrollMode::Middle => 0,
            ScrollMode::Outward => -1,
        }
    }
}

/// Base direction plus depth qualifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Facing {
    pub base: BaseDirection,
    pub scroll: ScrollMode,
}

impl Facing {
    pub const UP: Facing = Facing::bare(BaseDirection::Up);

    pub const fn new(base: BaseDirection, scroll: ScrollMode) -> Self {
        Self { base, scroll }
    }

    /// Unqualified facing
    pub const fn bare(base: BaseDirection) -> Self {
        Self {
            base,
            scroll: ScrollMode::Middle,
        }
    }

    pub fn with_scroll(self, scroll: ScrollMode) -> Self {
        Self { scroll, ..self }
    }

    /// Sprite-table key, e.g. `"up"` or `"down-left_outward"`
    pub fn key(&self) -> String {
        match self.scroll.suffix() {
            Some(suffix) => format!("{}_{}", self.base.as_str(), suffix),
            None => self.base.as_str().to_string(),
        }
    }

    /// Parse a key. An unknown or empty base falls back to up; the qualifier is
    /// taken from anywhere in the name so doubled suffixes still resolve.
    pub fn parse(name: &str) -> Self {
        let prefix = name.split('_').next().unwrap_or("");
        let base = BaseDirection::from_name(prefix).unwrap_or_default();
        let scroll = if name.contains("inward") {
            ScrollMode::Inward
        } else if name.contains("outward") {
            ScrollMode::Outward
        } else {
            ScrollMode::Middle
        };
        Self { base, scroll }
    }

    /// Unit vector of the base direction
    pub fn unit_vector(&self) -> Vec2 {
        self.base.vector().normalize()
    }
}

impl fmt::Display for Facing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.key())
    }
}

/// Direction vector for a name such as `"up-left"` or `"right_inward"`.
/// Anything unrecognized maps to up, (0, -1).
pub fn direction_vector(name: &str) -> Vec2 {
    Facing::parse(name).base.vector()
}
