//! AABB overlap tests and per-tick collision resolution
//!
//! Resolution runs in a fixed pass order so outcomes are deterministic:
//! mail effects first (knockback smashes, deliveries, duds), then player
//! contacts (trampolines, obstacles, hazards, pickups, bonuses). A knockback
//! mail removes an obstacle before the player-damage pass sees it, so an
//! obstacle smashed mid-overlap never also hurts the player.

use glam::Vec2;

use super::state::{GameEvent, GameState, ObstacleKind, PickupKind};
use super::status::PowerKind;
use crate::consts::*;

/// Axis-aligned bounding box, top-left anchored
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    pub pos: Vec2,
    pub size: Vec2,
}

impl Aabb {
    pub fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self {
            pos: Vec2::new(x, y),
            size: Vec2::new(w, h),
        }
    }

    pub fn intersects(&self, other: &Aabb) -> bool {
        self.pos.x < other.pos.x + other.size.x
            && self.pos.x + self.size.x > other.pos.x
            && self.pos.y < other.pos.y + other.size.y
            && self.pos.y + self.size.y > other.pos.y
    }
}

/// Run every collision pass for the current tick
pub fn resolve(state: &mut GameState) {
    resolve_mail_smashes(state);
    resolve_deliveries(state);
    resolve_mail_duds(state);
    resolve_trampolines(state);
    resolve_obstacle_hits(state);
    resolve_hazard_hits(state);
    resolve_pickups(state);
    resolve_bonuses(state);
}

/// Knockback mail destroys obstacles it touches and keeps flying
fn resolve_mail_smashes(state: &mut GameState) {
    let mut smashed = 0u64;
    for mail in &state.mails {
        if !mail.knockback {
            continue;
        }
        let mail_box = mail.hitbox();
        state.obstacles.retain(|obstacle| {
            if mail_box.intersects(&obstacle.hitbox()) {
                smashed += 1;
                false
            } else {
                true
            }
        });
    }
    for _ in 0..smashed {
        state.add_score(KNOCKBACK_POINTS);
        state.events.push(GameEvent::Smash);
    }
}

/// Mail reaching an undelivered mailbox completes a delivery. Each mail
/// delivers to at most one mailbox and is consumed by it.
fn resolve_deliveries(state: &mut GameState) {
    let mut delivered = 0u32;
    let mailboxes = &mut state.mailboxes;
    state.mails.retain(|mail| {
        let mail_box = mail.hitbox();
        for mailbox in mailboxes.iter_mut() {
            if !mailbox.delivered && mail_box.intersects(&mailbox.hitbox()) {
                mailbox.delivered = true;
                delivered += 1;
                return false;
            }
        }
        true
    });
    for _ in 0..delivered {
        state.add_score(DELIVERY_POINTS);
        state.deliveries += 1;
        state.events.push(GameEvent::Delivery);
    }
}

/// Ordinary mail stops dead against an obstacle
fn resolve_mail_duds(state: &mut GameState) {
    let obstacles = &state.obstacles;
    state.mails.retain(|mail| {
        if mail.knockback {
            return true;
        }
        let mail_box = mail.hitbox();
        !obstacles.iter().any(|o| mail_box.intersects(&o.hitbox()))
    });
}

/// Landing on a trampoline's top surface launches the player
fn resolve_trampolines(state: &mut GameState) {
    if state.player.vy <= 0.0 {
        return;
    }
    let feet = state.player.hitbox();
    for obstacle in &state.obstacles {
        if obstacle.kind == ObstacleKind::Trampoline && feet.intersects(&obstacle.top_surface()) {
            state.player.vy = TRAMPOLINE_FORCE;
            state.player.on_platform = true;
            state.player.grounded = false;
            state.events.push(GameEvent::Jump);
            return;
        }
    }
}

fn player_damage_suppressed(state: &GameState) -> bool {
    state.player.is_invincible()
        || state.statuses.is_active(PowerKind::Shield)
        || state.statuses.is_active(PowerKind::Wings)
}

fn resolve_obstacle_hits(state: &mut GameState) {
    if player_damage_suppressed(state) {
        return;
    }
    let player_box = state.player.hitbox();
    let hit = state.obstacles.iter().find_map(|obstacle| {
        if obstacle.kind.damage() > 0 && player_box.intersects(&obstacle.hitbox()) {
            Some((obstacle.kind.damage(), obstacle.kind.hit_source()))
        } else {
            None
        }
    });
    if let Some((damage, source)) = hit {
        state.damage(damage, source);
    }
}

fn resolve_hazard_hits(state: &mut GameState) {
    if player_damage_suppressed(state) {
        return;
    }
    let player_box = state.player.hitbox();
    let hit = state.hazards.iter().find_map(|hazard| {
        let damage = hazard.kind.damage()?;
        if player_box.intersects(&hazard.hitbox()) {
            Some((damage, hazard.kind.hit_source()))
        } else {
            None
        }
    });
    if let Some((damage, source)) = hit {
        state.damage(damage, source);
    }
}

fn resolve_pickups(state: &mut GameState) {
    let player_box = state.player.hitbox();
    let mut collected = Vec::new();
    state.pickups.retain(|pickup| {
        if player_box.intersects(&pickup.hitbox()) {
            collected.push(pickup.kind);
            false
        } else {
            true
        }
    });

    for kind in collected {
        match kind {
            PickupKind::Heart => {
                state.heal(HEART_HEAL);
                state.events.push(GameEvent::Heal);
            }
            PickupKind::Coin => {
                state.add_score(COIN_POINTS);
                state.events.push(GameEvent::Coin);
            }
            PickupKind::Power(power) => {
                state.statuses.activate(power);
                if power == PowerKind::Wings {
                    state.player.flying = true;
                    state.player.grounded = false;
                }
                state.events.push(GameEvent::PowerUp(power));
            }
        }
    }
}

/// Touching the bonus entity pays out points, a coin burst, and a bounce
fn resolve_bonuses(state: &mut GameState) {
    let player_box = state.player.hitbox();
    let mut hit_positions = Vec::new();
    state.bonuses.retain(|bonus| {
        if player_box.intersects(&bonus.hitbox()) {
            hit_positions.push(bonus.pos);
            false
        } else {
            true
        }
    });

    for pos in hit_positions {
        state.add_score(BONUS_ENTITY_POINTS);
        state.player.vy = BONUS_BOUNCE;
        state.player.grounded = false;
        state.events.push(GameEvent::Bonus);
        let center = pos + super::state::Bonus::SIZE * 0.5;
        super::spawn::burst_coins(state, center, BONUS_COIN_BURST);
    }
}
