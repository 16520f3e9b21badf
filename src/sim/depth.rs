//! Depth ranges and parallax
//!
//! Smaller depth is closer to the viewer: faster apparent drift and larger
//! draw size. Background entities wrap around their range, projectiles and the
//! targeted star are clamped to theirs.

use serde::{Deserialize, Serialize};

use crate::DEPTH_EPSILON;

/// Closed depth interval
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DepthRange {
    pub min: f32,
    pub max: f32,
}

impl DepthRange {
    pub const fn new(min: f32, max: f32) -> Self {
        Self { min, max }
    }

    #[inline]
    pub fn contains(&self, depth: f32) -> bool {
        depth >= self.min && depth <= self.max
    }

    /// Wrap policy: past the max resets to exactly the min and vice versa.
    /// Returns the new depth and whether a wrap happened.
    pub fn wrap(&self, depth: f32) -> (f32, bool) {
        if depth > self.max {
            (self.min, true)
        } else if depth < self.min {
            (self.max, true)
        } else {
            (depth, false)
        }
    }

    #[inline]
    pub fn clamp(&self, depth: f32) -> f32 {
        depth.clamp(self.min, self.max)
    }

    /// Position of `depth` inside the range, 0 at min and 1 at max
    #[inline]
    pub fn fraction(&self, depth: f32) -> f32 {
        (depth - self.min) / (self.max - self.min)
    }
}

/// Parallax factor for stars: `1 / max(depth, min_depth)`
#[inline]
pub fn star_parallax(depth: f32, min_depth: f32) -> f32 {
    1.0 / depth.max(min_depth)
}

/// Parallax factor for outward projectiles: `2 / depth`, floored at a tiny epsilon
#[inline]
pub fn bullet_parallax(depth: f32) -> f32 {
    (2.0 / depth).max(DEPTH_EPSILON)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_wrap_resets_to_opposite_bound() {
        let range = DepthRange::new(0.1, 1.0);
        assert_eq!(range.wrap(1.3), (0.1, true));
        assert_eq!(range.wrap(0.05), (1.0, true));
        assert_eq!(range.wrap(0.5), (0.5, false));
        assert_eq!(range.wrap(1.0), (1.0, false));
    }

    #[test]
    fn test_parallax_guards() {
        assert!((star_parallax(0.0, 0.1) - 10.0).abs() < 1e-4);
        assert!((star_parallax(-3.0, 0.1) - 10.0).abs() < 1e-4);
        assert!((star_parallax(0.5, 0.1) - 2.0).abs() < 1e-6);
        assert!((bullet_parallax(0.5) - 4.0).abs() < 1e-6);
        assert!(bullet_parallax(-1.0) > 0.0);
    }

    proptest! {
        #[test]
        fn prop_clamp_is_idempotent(depth in -100.0f32..100.0) {
            let range = DepthRange::new(0.1, 1.0);
            let once = range.clamp(depth);
            prop_assert!(range.contains(once));
            prop_assert_eq!(range.clamp(once), once);
        }
    }
}
