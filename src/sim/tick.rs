//! Per-frame simulation driver
//!
//! The host calls [`tick`] once per animation frame with the elapsed wall
//! time and the sampled input. Everything runs in a fixed phase order; see
//! the module docs in [`super`].

use super::collision;
use super::physics;
use super::spawn;
use super::state::{GamePhase, GameState, TickReport};
use super::status::PowerKind;
use crate::consts::*;

/// Input sampled by the host for one frame
#[derive(Debug, Clone, Copy, Default)]
pub struct TickInput {
    /// Jump key went down this frame
    pub jump_pressed: bool,
    /// Jump key is currently down (flight steering)
    pub jump_held: bool,
    /// Jump key went up this frame
    pub jump_released: bool,
    pub throw_pressed: bool,
    pub move_left: bool,
    pub move_right: bool,
    pub down_held: bool,
    /// Pause key went down this frame; toggles pause
    pub pause: bool,
}

/// Advance the simulation by `dt` seconds and return the HUD snapshot
pub fn tick(state: &mut GameState, input: &TickInput, dt: f32) -> TickReport {
    if input.pause {
        state.phase = match state.phase {
            GamePhase::Running => GamePhase::Paused,
            GamePhase::Paused => GamePhase::Running,
            GamePhase::GameOver => GamePhase::GameOver,
        };
    }
    if state.phase != GamePhase::Running || !state.has_viewport() {
        return state.report();
    }

    // Stalls integrate as one capped step instead of a catch-up burst
    let dt = dt.clamp(0.0, MAX_TICK_DT);
    let dt_norm = dt * REFERENCE_FPS;

    state.time += dt;
    let viewport = state.viewport;
    state.env.advance(dt, dt_norm, &mut state.rng, viewport);

    // Speed ramp and distance scoring
    state.speed = (state.speed + SPEED_INCREMENT * dt_norm).min(MAX_SPEED);
    let speed_mult = state.statuses.speed_multiplier();
    state.distance += state.speed * speed_mult * dt_norm / 10.0;
    state.score_accum += DISTANCE_POINTS * speed_mult * dt_norm;
    if state.score_accum >= 1.0 {
        let whole = state.score_accum.floor();
        state.add_score(whole as u64);
        state.score_accum -= whole;
    }

    for expired in state.statuses.advance(dt) {
        if expired == PowerKind::Wings {
            state.player.flying = false;
        }
    }

    spawn::run_spawners(state, dt, dt_norm, speed_mult);

    physics::update_player(state, input, dt, dt_norm);
    if input.throw_pressed {
        physics::try_throw(state);
    }
    if state.statuses.is_active(PowerKind::RapidFire) {
        state.statuses.auto_fire_timer -= dt;
        if state.statuses.auto_fire_timer <= 0.0 {
            physics::try_throw(state);
            state.statuses.auto_fire_timer = AUTO_FIRE_INTERVAL_SECS;
        }
    }
    physics::update_mails(state, dt_norm);
    physics::update_world(state, dt, dt_norm, speed_mult);

    collision::resolve(state);
    prune(state);

    state.report()
}

/// Drop entities that have left the play field
fn prune(state: &mut GameState) {
    let left_edge = -OFFSCREEN_MARGIN;
    let right_edge = state.viewport.x + OFFSCREEN_MARGIN;
    let ground = state.ground_y();

    state
        .obstacles
        .retain(|o| o.pos.x + o.size.x > left_edge);
    state
        .mailboxes
        .retain(|m| m.pos.x + m.size.x > left_edge);
    state.pickups.retain(|p| {
        p.pos.x + super::state::Pickup::SIZE > left_edge
    });
    state.bonuses.retain(|b| {
        b.pos.x + super::state::Bonus::SIZE.x > left_edge
    });
    state
        .hazards
        .retain(|h| h.pos.x + h.kind.size().x > left_edge && h.pos.x < right_edge + 200.0);
    state
        .pedestrians
        .retain(|p| p.pos.x > left_edge - 50.0);
    state.birds.retain(|b| b.pos.x > left_edge - 50.0);

    // Mail ends on the ground or off the right edge
    state
        .mails
        .retain(|m| m.pos.x < right_edge && m.pos.y < ground);

    // Clouds wrap instead of despawning
    let viewport_x = state.viewport.x;
    for cloud in &mut state.clouds {
        if cloud.pos.x + cloud.width < 0.0 {
            cloud.pos.x = viewport_x;
        }
    }
}
