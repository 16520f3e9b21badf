//! Parallax Field headless driver
//!
//! Runs a scripted session against the simulation at 60 Hz and logs what
//! happens. Usage: `parallax-field [config.json] [seed]`.

use anyhow::{Context, Result};
use glam::Vec2;

use parallax_field::Config;
use parallax_field::sim::{Frame, GameState, InputEvent, KeyState, SELECT_BUTTON, TickInput, tick};

/// Fixed step; the session is replayable from its seed
const FRAME_DT: f32 = 1.0 / 60.0;
const SESSION_TICKS: u64 = 600;
/// Tick at which the field is scattered again from the next seed
const RESEED_TICK: u64 = 480;

fn load_config(path: Option<&str>) -> Result<Config> {
    match path {
        Some(path) => {
            let json = std::fs::read_to_string(path)
                .with_context(|| format!("reading config file {path}"))?;
            Config::from_json(&json).with_context(|| format!("loading config from {path}"))
        }
        None => Ok(Config::default()),
    }
}

/// A point with no star under it, for releasing the lock
fn empty_point(state: &GameState) -> Vec2 {
    let step = 37.0;
    let mut y = step;
    while y < state.config.height {
        let mut x = step;
        while x < state.config.width {
            let p = Vec2::new(x, y);
            if state.stars.hit_test(p).is_none() {
                return p;
            }
            x += step;
        }
        y += step;
    }
    Vec2::new(-1.0, -1.0)
}

/// Star nearest to screen center, for locking
fn nearest_star(state: &GameState) -> Option<Vec2> {
    let center = state.config.center();
    state
        .stars
        .iter()
        .min_by(|a, b| a.pos.distance(center).total_cmp(&b.pos.distance(center)))
        .map(|star| star.pos)
}

/// Scripted input: drift right while firing, scroll outward, lock a star,
/// then release it for a slingshot. The field is reseeded at `RESEED_TICK`.
fn scripted_input(state: &GameState, t: u64) -> TickInput {
    let mut input = TickInput {
        keys: KeyState {
            right: t < 60,
            fire: t % 120 < 60,
            ..Default::default()
        },
        events: Vec::new(),
    };

    match t {
        90 => input.events.push(InputEvent::Wheel(-1)),
        150 => input.events.push(InputEvent::Wheel(1)),
        180 => {
            if let Some(pos) = nearest_star(state) {
                input.events.push(InputEvent::Click {
                    pos,
                    button: SELECT_BUTTON,
                });
            }
        }
        420 => input.events.push(InputEvent::Click {
            pos: empty_point(state),
            button: SELECT_BUTTON,
        }),
        t if t == SESSION_TICKS - 1 => input.events.push(InputEvent::Quit),
        _ => {}
    }
    input
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let mut args = std::env::args().skip(1);
    let config_path = args.next();
    let seed = match args.next() {
        Some(s) => s.parse::<u64>().with_context(|| format!("invalid seed {s:?}"))?,
        None => 0x5eed,
    };

    let config = load_config(config_path.as_deref())?;
    let mut state = GameState::new(config, seed);
    log::info!("Parallax Field running!");

    let mut t = 0;
    while state.running {
        let input = scripted_input(&state, t);
        tick(&mut state, &input, FRAME_DT);
        if t == RESEED_TICK {
            let next = seed.wrapping_add(1);
            state.reseed(next);
            log::info!("t={t:>4} reseeded star field with seed {next}");
        }

        if t % 60 == 0 {
            let frame = Frame::capture(&state);
            log::info!(
                "t={:>4} ship={} shots={}/{} lock={} boost={:.1} depth_change={:+.4}",
                t,
                frame.ship.shape_key,
                frame.far_projectiles.len(),
                frame.near_projectiles.len(),
                state.target.is_locked(),
                state.player.boost_velocity.length(),
                state.last_depth_change,
            );
        }
        t += 1;
    }

    let json = serde_json::to_string(&Frame::capture(&state)).context("serializing final frame")?;
    log::info!("Session ended after {} ticks ({} bytes final frame)", state.time_ticks, json.len());
    Ok(())
}
