//! Entity spawners
//!
//! Two cadence families:
//! - The roadside spawner counts down in *scrolled pixels*, so mailbox and
//!   obstacle spacing stays constant on screen as the run speeds up.
//! - Timed spawners count down in seconds scaled by the speed multiplier, so
//!   slow motion stretches the gaps and speed boost compresses them.
//!
//! Every countdown reseeds from its uniform range when it fires; all draws go
//! through the state-owned RNG so a seed reproduces the whole sequence.

use glam::Vec2;
use rand::Rng;
use rand_pcg::Pcg32;

use super::state::{
    Bird, Bonus, Cloud, GameEvent, GameState, Hazard, HazardKind, Mailbox, Obstacle, ObstacleKind,
    Pedestrian, Pickup, PickupKind,
};
use super::status::PowerKind;
use crate::consts::*;

const HAZARD_SECS_MIN: f32 = 6.0;
const HAZARD_SECS_MAX: f32 = 12.0;
const BIRD_SECS_MIN: f32 = 8.0;
const BIRD_SECS_MAX: f32 = 18.0;
const PEDESTRIAN_SECS_MIN: f32 = 5.0;
const PEDESTRIAN_SECS_MAX: f32 = 11.0;
const PICKUP_SECS_MIN: f32 = 9.0;
const PICKUP_SECS_MAX: f32 = 16.0;
const BONUS_SECS_MIN: f32 = 25.0;
const BONUS_SECS_MAX: f32 = 50.0;

/// Countdown registers for every spawner
#[derive(Debug, Clone)]
pub struct Spawners {
    /// Scrolled pixels until the next roadside spawn
    pub roadside_px: f32,
    pub hazard_secs: f32,
    pub bird_secs: f32,
    pub pedestrian_secs: f32,
    pub pickup_secs: f32,
    pub bonus_secs: f32,
}

impl Spawners {
    pub fn new(rng: &mut Pcg32) -> Self {
        Self {
            roadside_px: rng.random_range(MIN_SPAWN_DISTANCE..MAX_SPAWN_DISTANCE),
            hazard_secs: rng.random_range(HAZARD_SECS_MIN..HAZARD_SECS_MAX),
            bird_secs: rng.random_range(BIRD_SECS_MIN..BIRD_SECS_MAX),
            pedestrian_secs: rng.random_range(PEDESTRIAN_SECS_MIN..PEDESTRIAN_SECS_MAX),
            pickup_secs: rng.random_range(PICKUP_SECS_MIN..PICKUP_SECS_MAX),
            bonus_secs: rng.random_range(BONUS_SECS_MIN..BONUS_SECS_MAX),
        }
    }
}

/// Decrement every spawner and fire the ones that reach zero
pub fn run_spawners(state: &mut GameState, dt: f32, dt_norm: f32, speed_mult: f32) {
    let scroll = state.speed * speed_mult * dt_norm;
    let scaled_dt = dt * speed_mult;

    state.spawners.roadside_px -= scroll;
    if state.spawners.roadside_px <= 0.0 {
        spawn_roadside(state);
        state.spawners.roadside_px = state
            .rng
            .random_range(MIN_SPAWN_DISTANCE..MAX_SPAWN_DISTANCE);
    }

    state.spawners.hazard_secs -= scaled_dt;
    if state.spawners.hazard_secs <= 0.0 {
        spawn_hazard(state);
        state.spawners.hazard_secs = state.rng.random_range(HAZARD_SECS_MIN..HAZARD_SECS_MAX);
    }

    state.spawners.bird_secs -= scaled_dt;
    if state.spawners.bird_secs <= 0.0 {
        spawn_bird_flock(state);
        state.spawners.bird_secs = state.rng.random_range(BIRD_SECS_MIN..BIRD_SECS_MAX);
    }

    state.spawners.pedestrian_secs -= scaled_dt;
    if state.spawners.pedestrian_secs <= 0.0 {
        spawn_pedestrian(state);
        state.spawners.pedestrian_secs = state
            .rng
            .random_range(PEDESTRIAN_SECS_MIN..PEDESTRIAN_SECS_MAX);
    }

    state.spawners.pickup_secs -= scaled_dt;
    if state.spawners.pickup_secs <= 0.0 {
        spawn_pickup(state);
        state.spawners.pickup_secs = state.rng.random_range(PICKUP_SECS_MIN..PICKUP_SECS_MAX);
    }

    state.spawners.bonus_secs -= scaled_dt;
    if state.spawners.bonus_secs <= 0.0 {
        spawn_bonus(state);
        state.spawners.bonus_secs = state.rng.random_range(BONUS_SECS_MIN..BONUS_SECS_MAX);
    }
}

/// Mailbox or obstacle, entering from the right edge
fn spawn_roadside(state: &mut GameState) {
    let x = state.viewport.x + OFFSCREEN_MARGIN;
    let ground = state.ground_y();
    if state.rng.random_range(0.0..1.0) < MAILBOX_SPAWN_CHANCE {
        state.mailboxes.push(Mailbox::new(x, ground));
    } else {
        let kind = ObstacleKind::ALL[state.rng.random_range(0..ObstacleKind::ALL.len())];
        state.obstacles.push(Obstacle::new(kind, x, ground));
    }
}

fn spawn_hazard(state: &mut GameState) {
    let kind = HazardKind::ALL[state.rng.random_range(0..HazardKind::ALL.len())];
    let size = kind.size();
    // Traffic runs both ways; debris only ever tumbles in from the right
    let rightward = match kind {
        HazardKind::Car | HazardKind::Truck | HazardKind::Cyclist => state.rng.random_bool(0.5),
        HazardKind::Tire | HazardKind::Tumbleweed => false,
    };
    let (x, vx) = if rightward {
        (-size.x, kind.speed())
    } else {
        (state.viewport.x + size.x, -kind.speed())
    };
    let hazard = Hazard {
        kind,
        pos: Vec2::new(x, state.ground_y() - size.y),
        vx,
        phase: 0.0,
    };
    if kind.honks() {
        state.events.push(GameEvent::Horn);
    }
    state.hazards.push(hazard);
}

/// Flock of 3-5 birds staggered along the sky band
fn spawn_bird_flock(state: &mut GameState) {
    let count = state.rng.random_range(3..=5);
    let sky = (state.viewport.y * 0.4).max(61.0);
    let base_y = state.rng.random_range(60.0..sky);
    let speed = state.rng.random_range(2.0..4.5);
    for i in 0..count {
        let jitter = state.rng.random_range(-20.0..20.0);
        state.birds.push(Bird {
            pos: Vec2::new(state.viewport.x + 30.0 + i as f32 * 45.0, base_y + jitter),
            base_y: base_y + jitter,
            phase: state.rng.random_range(0.0..std::f32::consts::TAU),
            speed,
        });
    }
}

fn spawn_pedestrian(state: &mut GameState) {
    state.pedestrians.push(Pedestrian {
        pos: Vec2::new(
            state.viewport.x + 20.0,
            state.ground_y() - 55.0,
        ),
        speed: state.rng.random_range(1.0..2.5),
        phase: 0.0,
    });
}

/// Weighted pickup table. Hearts only enter the pool while the player is
/// missing lives; their share folds into coins otherwise.
fn spawn_pickup(state: &mut GameState) {
    let roll: f32 = state.rng.random_range(0.0..1.0);
    let hearts_allowed = state.lives < MAX_LIVES;
    let kind = if hearts_allowed && roll < 0.20 {
        PickupKind::Heart
    } else if roll < 0.55 {
        PickupKind::Coin
    } else {
        PickupKind::Power(PowerKind::ALL[state.rng.random_range(0..PowerKind::ALL.len())])
    };

    let min_y = state.viewport.y * 0.3;
    let max_y = (state.ground_y() - Pickup::SIZE - 10.0).max(min_y + 1.0);
    let y = state.rng.random_range(min_y..max_y);
    state.pickups.push(Pickup {
        kind,
        pos: Vec2::new(state.viewport.x + Pickup::SIZE, y),
        phase: 0.0,
    });
}

fn spawn_bonus(state: &mut GameState) {
    let min_y = state.viewport.y * 0.35;
    let max_y = (state.ground_y() - Bonus::SIZE.y).max(min_y + 1.0);
    let y = state.rng.random_range(min_y..max_y);
    state.bonuses.push(Bonus {
        pos: Vec2::new(state.viewport.x + Bonus::SIZE.x, y),
        phase: 0.0,
    });
    log::debug!("Bonus entity spawned");
}

/// Scatter a ring of coin pickups around `center`
pub(crate) fn burst_coins(state: &mut GameState, center: Vec2, count: usize) {
    for i in 0..count {
        let angle = std::f32::consts::TAU * i as f32 / count as f32;
        let radius = state.rng.random_range(40.0..90.0);
        state.pickups.push(Pickup {
            kind: PickupKind::Coin,
            pos: center + Vec2::new(angle.cos(), angle.sin()) * radius,
            phase: 0.0,
        });
    }
}

/// Populate the decorative layers once the viewport is known
pub(crate) fn seed_decor(state: &mut GameState) {
    let sky = (state.viewport.y * 0.35).max(31.0);
    for _ in 0..6 {
        let width = state.rng.random_range(60.0..140.0);
        state.clouds.push(Cloud {
            pos: Vec2::new(
                state.rng.random_range(0.0..state.viewport.x),
                state.rng.random_range(30.0..sky),
            ),
            width,
            speed: state.rng.random_range(0.2..0.8),
        });
    }
}
