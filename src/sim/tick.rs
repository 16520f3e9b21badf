//! Per-frame simulation tick
//!
//! Order matters: the ship resolves its velocity and depth input first, the
//! target lock then pulls the field and adds its zoom, the star field applies
//! the combined depth change, and projectiles move and are pruned last.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::state::GameState;

/// Held keys for one tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyState {
    pub up: bool,
    pub down: bool,
    pub left: bool,
    pub right: bool,
    /// Move the field toward the viewer
    pub depth_in: bool,
    /// Move the field away from the viewer
    pub depth_out: bool,
    pub fire: bool,
}

impl KeyState {
    pub fn any_movement(&self) -> bool {
        self.up || self.down || self.left || self.right
    }
}

/// Pointer button that selects and releases targets
pub const SELECT_BUTTON: u8 = 1;

/// Discrete events delivered since the previous tick, in arrival order
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum InputEvent {
    Quit,
    Click { pos: Vec2, button: u8 },
    /// Signed wheel delta; only the sign is used
    Wheel(i32),
}

/// Input for a single tick
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    pub keys: KeyState,
    pub events: Vec<InputEvent>,
}

/// Advance the game by one frame of `dt` seconds
pub fn tick(state: &mut GameState, input: &TickInput, dt: f32) {
    if !state.running {
        return;
    }

    state.time_ticks += 1;
    state.time_ms += dt as f64 * 1000.0;

    for event in &input.events {
        match *event {
            InputEvent::Quit => {
                log::info!("Quit requested after {} ticks", state.time_ticks);
                state.running = false;
                return;
            }
            InputEvent::Click { pos, button } => {
                if button == SELECT_BUTTON {
                    state.handle_click(pos);
                }
            }
            InputEvent::Wheel(y) => {
                let guard = state.target.wheel_guard(&state.stars, dt, &state.config);
                state.player.handle_wheel(y, guard);
            }
        }
    }

    // Ship
    let target_pos = state.target.resolve(&state.stars).map(|star| star.pos);
    let mut depth_change =
        state
            .player
            .handle_input(&input.keys, dt, target_pos, &state.shapes, &state.config);
    if input.keys.fire {
        state.try_fire();
    }
    let driving_velocity = state.player.update_boost(dt, &state.config);

    // Target lock
    depth_change += state.target.center_zoom(
        dt,
        &mut state.stars,
        &mut state.projectiles,
        &state.config,
    );

    // Stars
    state.stars.update(
        driving_velocity,
        depth_change,
        dt,
        state.target.target(),
        &state.config,
    );

    // Projectiles
    let now_ms = state.time_ms;
    for projectile in &mut state.projectiles {
        projectile.update(dt, now_ms, &state.config);
    }
    state.projectiles.retain(|p| p.alive);

    state.last_depth_change = depth_change;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::sim::direction::{BaseDirection, ScrollMode};
    use crate::sim::projectile::ProjectileKind;
    use crate::sim::star::{Star, StarField};

    const DT: f32 = 1.0 / 60.0;

    fn one_star_state(x: f32, y: f32, depth: f32) -> GameState {
        let config = Config::default();
        let stars = StarField::from_stars(vec![Star::new(Vec2::new(x, y), depth, 3, Vec2::ZERO)]);
        GameState::with_stars(config, stars)
    }

    fn click(x: f32, y: f32) -> TickInput {
        TickInput {
            events: vec![InputEvent::Click {
                pos: Vec2::new(x, y),
                button: SELECT_BUTTON,
            }],
            ..Default::default()
        }
    }

    #[test]
    fn test_quit_stops_ticking() {
        let mut state = GameState::new(Config::default(), 42);
        let input = TickInput {
            events: vec![InputEvent::Quit],
            ..Default::default()
        };
        tick(&mut state, &input, DT);
        assert!(!state.running);
        let ticks = state.time_ticks;
        tick(&mut state, &TickInput::default(), DT);
        assert_eq!(state.time_ticks, ticks);
    }

    #[test]
    fn test_fire_outward_scenario() {
        let mut state = GameState::new(Config::default(), 42);
        tick(
            &mut state,
            &TickInput {
                events: vec![InputEvent::Wheel(-1)],
                ..Default::default()
            },
            DT,
        );
        assert_eq!(state.player.scroll_mode, ScrollMode::Outward);

        // Sprite table without qualified shapes: the ship keeps showing "up"
        state.shapes = crate::sim::shapes::ShapeTable::new();
        let fire = TickInput {
            keys: KeyState {
                fire: true,
                ..Default::default()
            },
            ..Default::default()
        };
        tick(&mut state, &fire, DT);
        assert_eq!(state.player.facing.key(), "up");
        assert_eq!(state.projectiles.len(), 1);
        let shot = &state.projectiles[0];
        assert_eq!(shot.facing.key(), "up_outward");
        assert_eq!(shot.kind, ProjectileKind::Outward);
        assert_eq!(shot.target_depth, state.config.bullet_max_depth);
        assert_eq!(shot.velocity, Vec2::new(0.0, -200.0) * 0.25);
    }

    #[test]
    fn test_fire_delay() {
        let mut state = GameState::new(Config::default(), 1);
        let fire = TickInput {
            keys: KeyState {
                fire: true,
                ..Default::default()
            },
            ..Default::default()
        };
        // 0.1 s ticks: shots at 100 ms, 600 ms, 1100 ms
        for _ in 0..11 {
            tick(&mut state, &fire, 0.1);
        }
        assert_eq!(state.projectiles.len(), 3);
    }

    #[test]
    fn test_projectiles_are_pruned() {
        let mut state = GameState::new(Config::default(), 5);
        let fire = TickInput {
            keys: KeyState {
                fire: true,
                ..Default::default()
            },
            ..Default::default()
        };
        tick(&mut state, &fire, 0.1);
        assert_eq!(state.projectiles.len(), 1);
        for _ in 0..21 {
            tick(&mut state, &TickInput::default(), 0.1);
        }
        assert!(state.projectiles.is_empty());
    }

    #[test]
    fn test_click_locks_and_release_boosts() {
        let mut state = one_star_state(700.0, 300.0, 0.5);
        tick(&mut state, &click(700.0, 300.0), DT);
        assert!(state.target.is_locked());
        // The lock zooms in and pulls the star toward center
        assert!(state.stars.as_slice()[0].depth < 0.5);
        assert!(state.stars.as_slice()[0].pos.x > 700.0);

        // Facing swings toward the target (up-left of center)
        assert_eq!(state.player.facing.base, BaseDirection::UpLeft);

        // Move the ship so the star has relative speed, then click empty space
        let keys = KeyState {
            right: true,
            ..Default::default()
        };
        tick(
            &mut state,
            &TickInput {
                keys,
                ..Default::default()
            },
            DT,
        );
        tick(&mut state, &click(5.0, 1075.0), DT);
        assert!(!state.target.is_locked());
        assert!(state.player.boosting());
        assert!(state.player.boost_velocity.length() > 0.0);
    }

    #[test]
    fn test_clicking_empty_space_without_target_does_nothing() {
        let mut state = one_star_state(700.0, 300.0, 0.5);
        tick(&mut state, &click(5.0, 5.0), DT);
        assert!(!state.target.is_locked());
        assert!(!state.player.boosting());
    }

    #[test]
    fn test_other_buttons_ignored() {
        let mut state = one_star_state(700.0, 300.0, 0.5);
        let input = TickInput {
            events: vec![InputEvent::Click {
                pos: Vec2::new(700.0, 300.0),
                button: 3,
            }],
            ..Default::default()
        };
        tick(&mut state, &input, DT);
        assert!(!state.target.is_locked());
    }

    #[test]
    fn test_wheel_guard_scenario() {
        let mut state = one_star_state(960.0, 540.0, 0.15);
        tick(&mut state, &click(960.0, 540.0), DT);
        assert!(state.target.is_locked());

        let wheel_in = TickInput {
            events: vec![InputEvent::Wheel(1)],
            ..Default::default()
        };
        tick(&mut state, &wheel_in, DT);
        assert_eq!(state.player.scroll_mode, ScrollMode::Middle);
        assert_eq!(state.player.aim_mode, ScrollMode::Inward);
        assert_eq!(state.player.facing.scroll, ScrollMode::Inward);
        assert_eq!(state.player.facing.key(), format!("{}_inward", state.player.facing.base.as_str()));
        // Only the lock's own zoom moved the depth this tick
        let zoom_only = (state.config.min_depth - 0.15) * DT;
        assert!((state.last_depth_change - zoom_only).abs() < 1e-4);
    }

    #[test]
    fn test_determinism() {
        let mut a = GameState::new(Config::default(), 99999);
        let mut b = GameState::new(Config::default(), 99999);
        let inputs = [
            TickInput {
                keys: KeyState {
                    left: true,
                    fire: true,
                    ..Default::default()
                },
                ..Default::default()
            },
            TickInput {
                events: vec![InputEvent::Wheel(-1)],
                ..Default::default()
            },
            TickInput::default(),
        ];
        for input in &inputs {
            tick(&mut a, input, DT);
            tick(&mut b, input, DT);
        }
        for (sa, sb) in a.stars.iter().zip(b.stars.iter()) {
            assert_eq!(sa.pos, sb.pos);
            assert_eq!(sa.depth, sb.depth);
        }
        assert_eq!(a.projectiles.len(), b.projectiles.len());
    }
}
