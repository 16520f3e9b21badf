//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Time comes only from tick deltas
//! - Seeded RNG only
//! - Stable iteration order (stars by index, projectiles by spawn order)
//! - No rendering or platform dependencies

pub mod depth;
pub mod direction;
pub mod frame;
pub mod player;
pub mod projectile;
pub mod shapes;
pub mod star;
pub mod state;
pub mod target;
pub mod tick;
pub mod wrap;

pub use depth::{DepthRange, bullet_parallax, star_parallax};
pub use direction::{BaseDirection, Facing, ScrollMode, direction_vector};
pub use frame::{Frame, LockBox, ShipSprite, Sprite};
pub use player::{PLAYER_DEPTH, Player, WheelGuard};
pub use projectile::{Projectile, ProjectileKind};
pub use shapes::{ShapeMatrix, ShapeTable, parse_shape, pixel_color};
pub use star::{Star, StarField, StarId};
pub use state::{GameState, RngState};
pub use target::TargetLock;
pub use tick::{InputEvent, KeyState, SELECT_BUTTON, TickInput, tick};
pub use wrap::wrap_inverse;
