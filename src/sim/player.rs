//! The player's ship
//!
//! Velocity is recomputed from the held keys every tick; the only motion that
//! outlives a tick is the decaying boost impulse granted on target release.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::depth::DepthRange;
use super::direction::{BaseDirection, Facing, ScrollMode};
use super::shapes::ShapeTable;
use super::star::Star;
use super::tick::KeyState;
use super::wrap::wrap_inverse;
use crate::config::Config;
use crate::screen_angle_degrees;

/// Ship depth; the ship stays on this plane while the field moves around it
pub const PLAYER_DEPTH: f32 = 1.0;

/// Refuses wheel steps that would push the targeted star into the buffer
/// zone next to either depth bound.
#[derive(Debug, Clone, Copy)]
pub struct WheelGuard {
    pub target_depth: f32,
    pub range: DepthRange,
    pub buffer: f32,
    /// Depth moved by one wheel step this tick (`depth_rate * dt`)
    pub step: f32,
}

impl WheelGuard {
    /// Whether switching to `mode` may move the field
    pub fn allows(&self, mode: ScrollMode) -> bool {
        let delta = -(mode.wheel_value() as f32) * self.step;
        let projected = self.target_depth + delta;
        if delta < 0.0 {
            projected >= self.range.min + self.buffer
        } else if delta > 0.0 {
            projected <= self.range.max - self.buffer
        } else {
            true
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub pos: Vec2,
    /// Key-driven velocity for this tick, without boost
    pub velocity: Vec2,
    pub depth: f32,
    /// Resolved facing; its key selects the sprite
    pub facing: Facing,
    /// Last nonzero movement-key direction
    pub last_direction: BaseDirection,
    /// Mode that drives depth movement
    pub scroll_mode: ScrollMode,
    /// Mode shown on the sprite and used for firing; differs from
    /// `scroll_mode` only after a guarded wheel step
    pub aim_mode: ScrollMode,
    /// Pending wheel term, consumed by the next `handle_input`
    wheel: i32,
    /// Seconds left before facing stops following the movement keys
    pub manual_timer: f32,
    pub boost_velocity: Vec2,
    pub boost_duration: f32,
}

impl Player {
    pub fn new(config: &Config) -> Self {
        Self {
            pos: config.center(),
            velocity: Vec2::ZERO,
            depth: PLAYER_DEPTH,
            facing: Facing::UP,
            last_direction: BaseDirection::Up,
            scroll_mode: ScrollMode::Middle,
            aim_mode: ScrollMode::Middle,
            wheel: 0,
            manual_timer: 0.0,
            boost_velocity: Vec2::ZERO,
            boost_duration: 0.0,
        }
    }

    #[inline]
    pub fn manual_control(&self) -> bool {
        self.manual_timer > 0.0
    }

    #[inline]
    pub fn boosting(&self) -> bool {
        self.boost_duration > 0.0
    }

    /// Apply this tick's keys. Returns the frame's base depth change.
    ///
    /// `target_pos` is the screen position of the locked star, if any; it
    /// steers the facing once manual control has lapsed.
    pub fn handle_input(
        &mut self,
        keys: &KeyState,
        dt: f32,
        target_pos: Option<Vec2>,
        shapes: &ShapeTable,
        config: &Config,
    ) -> f32 {
        let dx = keys.right as i32 - keys.left as i32;
        let dy = keys.down as i32 - keys.up as i32;
        let current = BaseDirection::from_axes(dx, dy);
        if let Some(dir) = current {
            self.last_direction = dir;
        }

        if keys.any_movement() {
            self.manual_timer = config.manual_control_timeout;
        } else {
            self.manual_timer = (self.manual_timer - dt).max(0.0);
        }

        // Movement: no momentum, velocity is replaced every tick
        let acceleration = Vec2::new(dx as f32, dy as f32) * config.player_speed;
        self.velocity = acceleration * dt;
        self.pos = wrap_inverse(self.pos + self.velocity, config.width, config.height);

        let mut depth_change =
            (keys.depth_in as i32 - keys.depth_out as i32) as f32 * config.depth_rate * dt;
        depth_change += -(self.wheel as f32) * config.depth_rate * dt;
        self.wheel = 0;

        let base = if self.manual_control() {
            current.unwrap_or(self.last_direction)
        } else if let Some(target) = target_pos {
            BaseDirection::from_angle_degrees(screen_angle_degrees(target - config.center()))
        } else {
            self.facing.base
        };
        self.facing = shapes.resolve_shape(base, self.aim_mode);

        depth_change
    }

    /// Step the scroll mode for a wheel event.
    ///
    /// With a guard (a star is targeted) a refused step still changes the
    /// sprite and firing mode but not the movement mode. Returns whether the
    /// step was allowed to move the field.
    pub fn handle_wheel(&mut self, y: i32, guard: Option<WheelGuard>) -> bool {
        let requested = self.aim_mode.stepped(y);
        self.aim_mode = requested;

        let refused = guard.filter(|g| !g.allows(requested));
        if let Some(guard) = refused {
            log::debug!(
                "Wheel step to {:?} refused (target depth {:.3})",
                requested,
                guard.target_depth
            );
            self.wheel = 0;
            return false;
        }

        self.scroll_mode = requested;
        self.wheel = requested.wheel_value();
        true
    }

    /// Pending wheel term (for inspection)
    pub fn pending_wheel(&self) -> i32 {
        self.wheel
    }

    /// Decay the boost and report the effective velocity
    pub fn update_boost(&mut self, dt: f32, config: &Config) -> Vec2 {
        if self.boost_duration > 0.0 {
            self.boost_duration -= dt;
            self.boost_velocity *= config.boost_decay_rate;
            return self.velocity + self.boost_velocity;
        }
        self.velocity
    }

    /// Slingshot off a released target: boost along the base facing with twice
    /// the star's relative speed, capped.
    pub fn handle_target_release(
        &mut self,
        target: Option<&Star>,
        orbital_velocity: f32,
        config: &Config,
    ) {
        let Some(star) = target else {
            return;
        };

        let direction = self.facing.unit_vector();
        let magnitude = (star.relative_velocity.length() * 2.0).min(config.max_boost_speed);
        self.boost_velocity = direction * magnitude;
        self.boost_duration = config.max_boost_duration;
        log::debug!(
            "Boost {:.1} toward {} (orbital velocity {:.1})",
            magnitude,
            self.facing.base.as_str(),
            orbital_velocity
        );
    }

    /// Facing a new projectile travels in
    pub fn firing_facing(&self) -> Facing {
        if self.aim_mode == ScrollMode::Outward {
            self.facing.with_scroll(ScrollMode::Outward)
        } else {
            self.facing
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const DT: f32 = 1.0 / 60.0;

    fn setup() -> (Player, ShapeTable, Config) {
        let config = Config::default();
        (Player::new(&config), ShapeTable::standard(), config)
    }

    #[test]
    fn test_velocity_is_replaced_each_tick() {
        let (mut player, shapes, config) = setup();
        let keys = KeyState {
            right: true,
            ..Default::default()
        };
        player.handle_input(&keys, DT, None, &shapes, &config);
        assert!((player.velocity.x - 2000.0 * DT).abs() < 1e-3);
        assert_eq!(player.facing, Facing::bare(BaseDirection::Right));

        player.handle_input(&KeyState::default(), DT, None, &shapes, &config);
        assert_eq!(player.velocity, Vec2::ZERO);
        // Facing holds while the manual timer runs
        assert_eq!(player.facing.base, BaseDirection::Right);
    }

    #[test]
    fn test_depth_keys_and_wheel() {
        let (mut player, shapes, config) = setup();
        let keys = KeyState {
            depth_in: true,
            ..Default::default()
        };
        let change = player.handle_input(&keys, 0.5, None, &shapes, &config);
        assert!((change - 0.05).abs() < 1e-6);

        assert!(player.handle_wheel(-1, None));
        assert_eq!(player.scroll_mode, ScrollMode::Outward);
        let change = player.handle_input(&KeyState::default(), 0.5, None, &shapes, &config);
        assert!((change - 0.05).abs() < 1e-6);
        // Wheel term is consumed once
        let change = player.handle_input(&KeyState::default(), 0.5, None, &shapes, &config);
        assert_eq!(change, 0.0);
    }

    #[test]
    fn test_facing_qualified_by_scroll_mode() {
        let (mut player, shapes, config) = setup();
        player.handle_wheel(1, None);
        let keys = KeyState {
            left: true,
            ..Default::default()
        };
        player.handle_input(&keys, DT, None, &shapes, &config);
        assert_eq!(player.facing.key(), "left_inward");

        let empty = ShapeTable::new();
        player.handle_input(&keys, DT, None, &empty, &config);
        assert_eq!(player.facing.key(), "left");
    }

    #[test]
    fn test_target_steers_facing_after_manual_timeout() {
        let (mut player, shapes, config) = setup();
        let keys = KeyState {
            up: true,
            ..Default::default()
        };
        player.handle_input(&keys, DT, None, &shapes, &config);

        // Target to the lower right of center at 45 degrees
        let target = config.center() + Vec2::new(100.0, 100.0);
        player.handle_input(&KeyState::default(), 0.5, Some(target), &shapes, &config);
        assert_eq!(player.facing.base, BaseDirection::Up);

        player.handle_input(&KeyState::default(), 0.6, Some(target), &shapes, &config);
        assert!(!player.manual_control());
        assert_eq!(player.facing.base, BaseDirection::DownRight);

        // Without a target the last facing holds
        player.handle_input(&KeyState::default(), DT, None, &shapes, &config);
        assert_eq!(player.facing.base, BaseDirection::DownRight);
    }

    #[test]
    fn test_wheel_guard_blocks_movement_but_not_facing() {
        let (mut player, shapes, config) = setup();
        let guard = WheelGuard {
            target_depth: 0.15,
            range: DepthRange::new(0.1, 1.0),
            buffer: 0.2,
            step: config.depth_rate * DT,
        };
        assert!(!player.handle_wheel(1, Some(guard)));
        assert_eq!(player.scroll_mode, ScrollMode::Middle);
        assert_eq!(player.aim_mode, ScrollMode::Inward);
        assert_eq!(player.pending_wheel(), 0);

        let change = player.handle_input(&KeyState::default(), DT, None, &shapes, &config);
        assert_eq!(change, 0.0);
        assert_eq!(player.facing.key(), "up_inward");

        // Moving back out is allowed
        assert!(player.handle_wheel(-1, Some(guard)));
        assert_eq!(player.scroll_mode, ScrollMode::Middle);
    }

    #[test]
    fn test_target_release_boost() {
        let (mut player, _, config) = setup();
        player.handle_target_release(None, 10.0, &config);
        assert!(!player.boosting());

        let mut star = Star::new(Vec2::ZERO, 0.5, 1, Vec2::ZERO);
        star.relative_velocity = Vec2::new(30.0, 40.0);
        player.facing = Facing::new(BaseDirection::Right, ScrollMode::Outward);
        player.handle_target_release(Some(&star), 10.0, &config);
        assert_eq!(player.boost_velocity, Vec2::new(100.0, 0.0));
        assert_eq!(player.boost_duration, config.max_boost_duration);

        star.relative_velocity = Vec2::new(0.0, 1000.0);
        player.facing = Facing::bare(BaseDirection::UpLeft);
        player.handle_target_release(Some(&star), 10.0, &config);
        assert!((player.boost_velocity.length() - config.max_boost_speed).abs() < 1e-3);
    }

    #[test]
    fn test_boost_expires() {
        let (mut player, _, config) = setup();
        player.boost_velocity = Vec2::new(100.0, 0.0);
        player.boost_duration = 0.02;
        let v = player.update_boost(DT, &config);
        assert!((v.x - 99.5).abs() < 1e-3);
        player.update_boost(DT, &config);
        assert!(!player.boosting());
        assert_eq!(player.update_boost(DT, &config), player.velocity);
    }

    #[test]
    fn test_firing_facing_adds_outward() {
        let (mut player, _, _) = setup();
        player.aim_mode = ScrollMode::Outward;
        assert_eq!(player.firing_facing().key(), "up_outward");
        player.aim_mode = ScrollMode::Inward;
        player.facing = Facing::new(BaseDirection::Up, ScrollMode::Inward);
        assert_eq!(player.firing_facing().key(), "up_inward");
    }

    proptest! {
        #[test]
        fn prop_boost_decay_is_monotonic(speed in 1.0f32..500.0, ticks in 1usize..30) {
            let (mut player, _, config) = setup();
            player.boost_velocity = Vec2::new(speed, 0.0);
            player.boost_duration = config.max_boost_duration;
            let mut last = player.boost_velocity.length();
            for _ in 0..ticks {
                if !player.boosting() {
                    break;
                }
                player.update_boost(DT, &config);
                let now = player.boost_velocity.length();
                prop_assert!(now < last);
                last = now;
            }
        }
    }
}
