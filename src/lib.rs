//! Mail Dash - an endless-runner mail delivery game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (physics, spawning, collisions, weather)
//! - `audio`: Web Audio sound-effect sink driven by simulation events
//! - `bestscore`: Best-score persistence (LocalStorage)
//! - `settings`: Audio preferences
//!
//! Rendering and input capture live in the host page; the host feeds a
//! [`sim::TickInput`] into [`sim::tick`] once per animation frame, draws from
//! the resulting [`sim::GameState`] snapshot, and drains
//! [`sim::GameState::events`] into the audio sink.

pub mod audio;
pub mod bestscore;
pub mod settings;
pub mod sim;

pub use bestscore::BestScore;
pub use settings::Settings;

/// Game configuration constants
///
/// Rates marked "per frame" are expressed at the 60 Hz reference rate; the
/// tick converts elapsed wall time into reference frames so the outcome does
/// not depend on the host's actual frame rate.
pub mod consts {
    /// Reference frame rate all per-frame rates are tuned against
    pub const REFERENCE_FPS: f32 = 60.0;
    /// Per-tick delta cap; longer stalls are truncated rather than integrated
    pub const MAX_TICK_DT: f32 = 0.1;

    /// Player sprite and physics
    pub const PLAYER_X: f32 = 100.0;
    pub const PLAYER_WIDTH: f32 = 50.0;
    pub const PLAYER_HEIGHT: f32 = 70.0;
    /// Downward acceleration, px/frame²
    pub const GRAVITY: f32 = 0.8;
    /// Initial jump velocity, px/frame (negative = up)
    pub const JUMP_FORCE: f32 = -18.0;
    /// Releasing jump clamps an ascent faster than this, shortening the arc
    pub const JUMP_RELEASE_THRESHOLD: f32 = -8.0;
    pub const MAX_FALL_SPEED: f32 = 20.0;
    /// Horizontal drift while a move key is held, px/frame
    pub const DRIFT_SPEED: f32 = 5.0;
    pub const PLAYER_MIN_X: f32 = 40.0;
    /// Player may drift right up to this fraction of the viewport width
    pub const PLAYER_MAX_X_FRAC: f32 = 0.45;

    /// Trampoline launch velocity, px/frame
    pub const TRAMPOLINE_FORCE: f32 = -26.0;

    /// Flight mode (Wings power-up)
    pub const FLIGHT_DECAY: f32 = 0.9;
    pub const FLIGHT_CEILING: f32 = 60.0;
    pub const FLIGHT_RISE_SPEED: f32 = -9.0;
    pub const FLIGHT_DIVE_SPEED: f32 = 9.0;

    /// Ground band height at the bottom of the viewport
    pub const GROUND_HEIGHT: f32 = 100.0;

    /// World scroll speed, px/frame
    pub const INITIAL_SPEED: f32 = 6.0;
    pub const MAX_SPEED: f32 = 15.0;
    /// Speed ramp per frame
    pub const SPEED_INCREMENT: f32 = 0.001;

    /// Roadside spawner: distance between spawns, px of scroll
    pub const MIN_SPAWN_DISTANCE: f32 = 300.0;
    pub const MAX_SPAWN_DISTANCE: f32 = 600.0;
    /// Probability a roadside spawn is a mailbox rather than an obstacle
    pub const MAILBOX_SPAWN_CHANCE: f32 = 0.4;
    /// Entities further than this past the left edge are pruned
    pub const OFFSCREEN_MARGIN: f32 = 50.0;

    /// Lives
    pub const STARTING_LIVES: u8 = 3;
    pub const MAX_LIVES: u8 = 5;
    pub const HEART_HEAL: u8 = 2;
    /// Post-hit invincibility grace, seconds
    pub const HIT_GRACE_SECS: f32 = 2.0;

    /// Mail projectile
    pub const THROW_COOLDOWN_SECS: f32 = 0.3;
    pub const RAPID_FIRE_COOLDOWN_SECS: f32 = 0.12;
    /// Rapid fire auto-throw interval, seconds
    pub const AUTO_FIRE_INTERVAL_SECS: f32 = 0.25;
    pub const MAIL_SIZE: f32 = 15.0;
    pub const MAIL_SPEED_X: f32 = 12.0;
    pub const MAIL_SPEED_Y: f32 = -8.0;
    /// Mail gravity, px/frame²
    pub const MAIL_GRAVITY: f32 = 0.5;
    /// Mail spin, degrees/frame
    pub const MAIL_SPIN: f32 = 15.0;

    /// Scoring
    pub const DISTANCE_POINTS: f32 = 1.0;
    pub const DELIVERY_POINTS: u64 = 100;
    pub const COIN_POINTS: u64 = 10;
    /// Bonus per obstacle destroyed by knockback mail
    pub const KNOCKBACK_POINTS: u64 = 25;
    pub const BONUS_ENTITY_POINTS: u64 = 250;
    pub const BONUS_COIN_BURST: usize = 8;
    /// Upward kick granted by collecting the bonus entity, px/frame
    pub const BONUS_BOUNCE: f32 = -10.0;

    /// Environmental clock
    pub const DAY_NIGHT_CYCLE_SECS: f32 = 60.0;
    /// Completed day/night cycles per season change
    pub const CYCLES_PER_SEASON: u32 = 2;
    pub const STORM_OFF_SECS_MIN: f32 = 20.0;
    pub const STORM_OFF_SECS_MAX: f32 = 40.0;
    pub const STORM_ON_SECS_MIN: f32 = 8.0;
    pub const STORM_ON_SECS_MAX: f32 = 16.0;
    /// Exponential approach rate for storm intensity, 1/s
    pub const STORM_EASE_RATE: f32 = 0.8;
}

#[cfg(target_arch = "wasm32")]
mod wasm_init {
    use wasm_bindgen::prelude::*;

    #[wasm_bindgen(start)]
    pub fn start() {
        console_error_panic_hook::set_once();
        let _ = console_log::init_with_level(log::Level::Info);
        log::info!("Mail Dash simulation core loaded");
    }
}
