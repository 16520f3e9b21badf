//! Game state
//!
//! Owns the configuration, the ship, the star field, live projectiles and the
//! target lock. Everything except the sprite table serializes for snapshots.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::player::Player;
use super::projectile::Projectile;
use super::shapes::ShapeTable;
use super::star::StarField;
use super::target::TargetLock;
use crate::config::Config;

/// RNG state wrapper for serialization
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RngState {
    pub seed: u64,
}

impl RngState {
    pub fn new(seed: u64) -> Self {
        Self { seed }
    }

    pub fn to_rng(&self) -> Pcg32 {
        Pcg32::seed_from_u64(self.seed)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    pub config: Config,
    /// Sprite lookup; decides qualified-facing fallback and shot size
    #[serde(skip, default = "ShapeTable::standard")]
    pub shapes: ShapeTable,
    pub rng_state: RngState,
    pub player: Player,
    /// Fixed-size background field
    pub stars: StarField,
    /// Live projectiles in spawn order
    pub projectiles: Vec<Projectile>,
    pub target: TargetLock,
    /// Simulation tick counter
    pub time_ticks: u64,
    /// Game clock (ms), the sum of tick deltas
    pub time_ms: f64,
    /// Game time of the last shot
    pub last_shot_ms: Option<f64>,
    /// Depth change applied to the field on the last tick
    pub last_depth_change: f32,
    /// Cleared by a quit event
    pub running: bool,
}

impl GameState {
    /// New game with a star field scattered from `seed`
    pub fn new(config: Config, seed: u64) -> Self {
        let rng_state = RngState::new(seed);
        let mut rng = rng_state.to_rng();
        let stars = StarField::new(&config, &mut rng);
        log::info!(
            "Game initialized with seed {} ({} stars, {}x{})",
            seed,
            stars.len(),
            config.width,
            config.height
        );
        Self::assemble(config, rng_state, stars)
    }

    /// New game with a prepared star field
    pub fn with_stars(config: Config, stars: StarField) -> Self {
        Self::assemble(config, RngState::new(0), stars)
    }

    fn assemble(config: Config, rng_state: RngState, stars: StarField) -> Self {
        Self {
            player: Player::new(&config),
            shapes: ShapeTable::standard(),
            rng_state,
            stars,
            projectiles: Vec::new(),
            target: TargetLock::new(),
            time_ticks: 0,
            time_ms: 0.0,
            last_shot_ms: None,
            last_depth_change: 0.0,
            running: true,
            config,
        }
    }

    /// Pointer press with the select button: lock the star under the
    /// pointer, or release the current lock when nothing is hit.
    pub fn handle_click(&mut self, pos: Vec2) {
        match self.stars.hit_test(pos) {
            Some(id) => self.target.lock(id),
            None => {
                if self.target.is_locked() {
                    self.target.release(&mut self.player, &self.stars, &self.config);
                }
            }
        }
    }

    /// Ship sprite size in pixels for the current facing
    pub fn ship_size(&self) -> (u32, u32) {
        self.shapes.size_px(self.player.facing, self.config.pixel_size)
    }

    /// Fire if the fire delay has elapsed. Returns whether a shot spawned.
    pub fn try_fire(&mut self) -> bool {
        let ready = match self.last_shot_ms {
            Some(last) => self.time_ms - last >= self.config.fire_delay_ms,
            None => true,
        };
        if !ready {
            return false;
        }

        let facing = self.player.firing_facing();
        let projectile = Projectile::spawn(
            facing,
            self.player.depth,
            self.ship_size(),
            self.time_ms,
            &self.config,
        );
        log::trace!("Fired {} at {:.0} ms", facing, self.time_ms);
        self.projectiles.push(projectile);
        self.last_shot_ms = Some(self.time_ms);
        true
    }

    /// Scatter a fresh star field from the next seed; drops any lock
    pub fn reseed(&mut self, seed: u64) {
        self.rng_state = RngState::new(seed);
        let mut rng = self.rng_state.to_rng();
        self.stars.regenerate(&self.config, &mut rng);
        // Resolving the stale handle clears it
        self.target.resolve(&self.stars);
    }
}
