//! Per-tick motion: player, mail projectiles, and world translation
//!
//! All velocities are px/frame at the 60 Hz reference rate; callers pass
//! `dt_norm` (elapsed reference frames) so integration is frame-rate
//! independent.

use glam::Vec2;

use super::state::{GameEvent, GameState, Mail};
use super::tick::TickInput;
use crate::consts::*;

/// Advance the player: jump handling, gravity or flight damping, horizontal
/// drift, and timer decay.
pub fn update_player(state: &mut GameState, input: &TickInput, dt: f32, dt_norm: f32) {
    state.player.invincible_timer = (state.player.invincible_timer - dt).max(0.0);
    state.player.throw_cooldown = (state.player.throw_cooldown - dt).max(0.0);

    if state.player.flying {
        update_flight(state, input, dt_norm);
    } else {
        update_jump(state, input, dt_norm);
    }
    // Platform contact lasts one tick; collision re-grants it after movement
    state.player.on_platform = false;

    // Horizontal drift, clamped to the left portion of the field
    let max_x = state.viewport.x * PLAYER_MAX_X_FRAC - PLAYER_WIDTH;
    if input.move_left {
        state.player.pos.x -= DRIFT_SPEED * dt_norm;
    }
    if input.move_right {
        state.player.pos.x += DRIFT_SPEED * dt_norm;
    }
    state.player.pos.x = state.player.pos.x.clamp(PLAYER_MIN_X, max_x.max(PLAYER_MIN_X));
}

fn update_jump(state: &mut GameState, input: &TickInput, dt_norm: f32) {
    if input.jump_pressed && (state.player.grounded || state.player.on_platform) {
        state.player.vy = state.statuses.jump_force();
        state.player.grounded = false;
        state.player.jumping = true;
        state.events.push(GameEvent::Jump);
    }
    // Releasing early clamps the ascent for a shorter arc
    if input.jump_released && state.player.jumping {
        if state.player.vy < JUMP_RELEASE_THRESHOLD {
            state.player.vy = JUMP_RELEASE_THRESHOLD;
        }
        state.player.jumping = false;
    }

    let ground = state.viewport.y - GROUND_HEIGHT - PLAYER_HEIGHT;
    let player = &mut state.player;
    player.vy = (player.vy + GRAVITY * dt_norm).min(MAX_FALL_SPEED);
    player.pos.y += player.vy * dt_norm;

    if player.pos.y >= ground {
        player.pos.y = ground;
        player.vy = 0.0;
        player.grounded = true;
        player.jumping = false;
    } else {
        player.grounded = false;
    }
}

/// Wings flight: velocity damps toward hover, jump and down steer directly
fn update_flight(state: &mut GameState, input: &TickInput, dt_norm: f32) {
    let ceiling = FLIGHT_CEILING;
    let ground = state.viewport.y - GROUND_HEIGHT - PLAYER_HEIGHT;
    let player = &mut state.player;

    if input.jump_pressed || input.jump_held {
        player.vy = FLIGHT_RISE_SPEED;
    } else if input.down_held {
        player.vy = FLIGHT_DIVE_SPEED;
    } else {
        player.vy *= FLIGHT_DECAY.powf(dt_norm);
    }

    player.pos.y += player.vy * dt_norm;

    if player.pos.y < ceiling {
        player.pos.y = ceiling;
        player.vy = player.vy.max(0.0);
    }
    if player.pos.y > ground {
        player.pos.y = ground;
        player.vy = player.vy.min(0.0);
    }
    player.grounded = false;
    player.jumping = false;
}

/// Throw a mail if the cooldown has elapsed. PowerThrow mail flies flat and
/// smashes obstacles.
pub fn try_throw(state: &mut GameState) {
    if state.player.throw_cooldown > 0.0 {
        return;
    }
    let empowered = state.statuses.is_active(super::status::PowerKind::PowerThrow);
    let vel = if empowered {
        Vec2::new(MAIL_SPEED_X + 4.0, 0.0)
    } else {
        Vec2::new(MAIL_SPEED_X, MAIL_SPEED_Y)
    };
    state.mails.push(Mail {
        pos: state.player.throw_origin(),
        vel,
        rotation: 0.0,
        knockback: empowered,
        straight: empowered,
    });
    state.player.throw_cooldown = state.statuses.throw_cooldown();
    state.events.push(GameEvent::Throw);
}

/// Advance mail projectiles along their arcs
pub fn update_mails(state: &mut GameState, dt_norm: f32) {
    for mail in &mut state.mails {
        if !mail.straight {
            mail.vel.y += MAIL_GRAVITY * dt_norm;
        }
        mail.pos += mail.vel * dt_norm;
        mail.rotation += MAIL_SPIN * dt_norm;
    }
}

/// Translate the world: scrolled entities, self-propelled hazards, and the
/// decorative layers.
pub fn update_world(state: &mut GameState, dt: f32, dt_norm: f32, speed_mult: f32) {
    let scroll = state.speed * speed_mult * dt_norm;

    for obstacle in &mut state.obstacles {
        obstacle.pos.x -= scroll + obstacle.kind.extra_speed() * speed_mult * dt_norm;
        obstacle.phase += dt * 6.0;
    }
    for mailbox in &mut state.mailboxes {
        mailbox.pos.x -= scroll;
    }
    for pickup in &mut state.pickups {
        pickup.pos.x -= scroll;
        pickup.phase += dt * 4.0;
    }
    for bonus in &mut state.bonuses {
        bonus.pos.x -= scroll;
        bonus.phase += dt * 5.0;
    }
    // Hazards travel under their own power, unaffected by the scroll rate
    for hazard in &mut state.hazards {
        hazard.pos.x += hazard.vx * speed_mult * dt_norm;
        hazard.phase += dt * 8.0;
    }

    for cloud in &mut state.clouds {
        cloud.pos.x -= cloud.speed * dt_norm;
    }
    for bird in &mut state.birds {
        bird.pos.x -= bird.speed * dt_norm;
        bird.phase += dt * 6.0;
        bird.pos.y = bird.base_y + bird.phase.sin() * 12.0;
    }
    for pedestrian in &mut state.pedestrians {
        pedestrian.pos.x -= scroll * 0.5 + pedestrian.speed * dt_norm;
        pedestrian.phase += dt * 5.0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ready_state() -> GameState {
        let mut state = GameState::new(11);
        state.set_viewport(1280.0, 720.0);
        state
    }

    fn jump_input() -> TickInput {
        TickInput {
            jump_pressed: true,
            ..TickInput::default()
        }
    }

    #[test]
    fn test_grounded_jump_launches() {
        let mut state = ready_state();
        update_player(&mut state, &jump_input(), 1.0 / 60.0, 1.0);
        assert!(!state.player.grounded);
        assert!(state.player.vy < 0.0);
        assert!(state.events.contains(&GameEvent::Jump));
    }

    #[test]
    fn test_airborne_jump_is_ignored() {
        let mut state = ready_state();
        update_player(&mut state, &jump_input(), 1.0 / 60.0, 1.0);
        let vy_after_launch = state.player.vy;

        update_player(&mut state, &jump_input(), 1.0 / 60.0, 1.0);
        // Second press does not relaunch; gravity keeps integrating
        assert!(state.player.vy > vy_after_launch);
        assert_eq!(
            state
                .events
                .iter()
                .filter(|e| **e == GameEvent::Jump)
                .count(),
            1
        );
    }

    #[test]
    fn test_jump_release_shortens_arc() {
        let mut state = ready_state();
        update_player(&mut state, &jump_input(), 1.0 / 60.0, 1.0);
        assert!(state.player.vy < JUMP_RELEASE_THRESHOLD);

        let release = TickInput {
            jump_released: true,
            ..TickInput::default()
        };
        update_player(&mut state, &release, 1.0 / 60.0, 1.0);
        assert!(state.player.vy >= JUMP_RELEASE_THRESHOLD);
        assert!(!state.player.jumping);
    }

    #[test]
    fn test_player_lands_back_on_ground() {
        let mut state = ready_state();
        update_player(&mut state, &jump_input(), 1.0 / 60.0, 1.0);
        for _ in 0..600 {
            update_player(&mut state, &TickInput::default(), 1.0 / 60.0, 1.0);
        }
        assert!(state.player.grounded);
        assert_eq!(state.player.pos.y, state.player_ground_y());
        assert_eq!(state.player.vy, 0.0);
    }

    #[test]
    fn test_drift_clamps_to_field() {
        let mut state = ready_state();
        let left = TickInput {
            move_left: true,
            ..TickInput::default()
        };
        for _ in 0..200 {
            update_player(&mut state, &left, 1.0 / 60.0, 1.0);
        }
        assert_eq!(state.player.pos.x, PLAYER_MIN_X);

        let right = TickInput {
            move_right: true,
            ..TickInput::default()
        };
        for _ in 0..2000 {
            update_player(&mut state, &right, 1.0 / 60.0, 1.0);
        }
        let max_x = state.viewport.x * PLAYER_MAX_X_FRAC - PLAYER_WIDTH;
        assert_eq!(state.player.pos.x, max_x);
    }

    #[test]
    fn test_flight_respects_ceiling_and_ground() {
        let mut state = ready_state();
        state.player.flying = true;

        let rise = TickInput {
            jump_held: true,
            ..TickInput::default()
        };
        for _ in 0..2000 {
            update_player(&mut state, &rise, 1.0 / 60.0, 1.0);
        }
        assert_eq!(state.player.pos.y, FLIGHT_CEILING);

        let dive = TickInput {
            down_held: true,
            ..TickInput::default()
        };
        for _ in 0..2000 {
            update_player(&mut state, &dive, 1.0 / 60.0, 1.0);
        }
        assert_eq!(state.player.pos.y, state.player_ground_y());
    }

    #[test]
    fn test_throw_respects_cooldown() {
        let mut state = ready_state();
        try_throw(&mut state);
        try_throw(&mut state);
        assert_eq!(state.mails.len(), 1);

        state.player.throw_cooldown = 0.0;
        try_throw(&mut state);
        assert_eq!(state.mails.len(), 2);
    }

    #[test]
    fn test_power_throw_flies_flat() {
        let mut state = ready_state();
        state.statuses.activate(super::super::status::PowerKind::PowerThrow);
        try_throw(&mut state);

        let mail = &state.mails[0];
        assert!(mail.knockback);
        assert!(mail.straight);
        assert_eq!(mail.vel.y, 0.0);

        let y_before = state.mails[0].pos.y;
        update_mails(&mut state, 1.0);
        // Straight mail ignores gravity
        assert_eq!(state.mails[0].pos.y, y_before);
    }

    #[test]
    fn test_mail_arc_bends_down() {
        let mut state = ready_state();
        try_throw(&mut state);
        let vy0 = state.mails[0].vel.y;
        update_mails(&mut state, 1.0);
        assert!(state.mails[0].vel.y > vy0);
    }

    #[test]
    fn test_world_scroll_moves_obstacles_left() {
        let mut state = ready_state();
        let ground = state.ground_y();
        state.obstacles.push(super::super::state::Obstacle::new(
            super::super::state::ObstacleKind::Pylon,
            900.0,
            ground,
        ));
        let x0 = state.obstacles[0].pos.x;
        update_world(&mut state, 1.0 / 60.0, 1.0, 1.0);
        assert!((state.obstacles[0].pos.x - (x0 - state.speed)).abs() < 1e-4);
    }
}
