//! Timed power-up statuses
//!
//! Each status is a per-kind countdown in seconds. Activation overwrites the
//! existing timer (no duration stacking). Different kinds compose; the speed
//! pair is mutually exclusive with SpeedBoost taking precedence.

use crate::consts::*;

/// Power-up kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PowerKind {
    /// Scroll speed ×1.5
    SpeedBoost,
    /// Scroll speed ×0.6
    SlowMotion,
    /// Jump force ×1.35
    SuperJump,
    /// Flight mode: damping instead of gravity, up/down steer directly
    Wings,
    /// Short throw cooldown plus hands-free auto-throw
    RapidFire,
    /// Thrown mail flies flat and smashes obstacles it passes through
    PowerThrow,
    /// Damage immunity
    Shield,
}

impl PowerKind {
    pub const ALL: [PowerKind; 7] = [
        PowerKind::SpeedBoost,
        PowerKind::SlowMotion,
        PowerKind::SuperJump,
        PowerKind::Wings,
        PowerKind::RapidFire,
        PowerKind::PowerThrow,
        PowerKind::Shield,
    ];

    /// Fixed duration applied on activation, seconds
    pub fn duration(self) -> f32 {
        match self {
            PowerKind::SpeedBoost => 30.0,
            PowerKind::SlowMotion => 10.0,
            PowerKind::SuperJump => 15.0,
            PowerKind::Wings => 10.0,
            PowerKind::RapidFire => 12.0,
            PowerKind::PowerThrow => 12.0,
            PowerKind::Shield => 8.0,
        }
    }
}

/// Remaining duration per status, seconds; zero means inactive
#[derive(Debug, Clone, Default)]
pub struct ActiveStatuses {
    pub speed_boost: f32,
    pub slow_motion: f32,
    pub super_jump: f32,
    pub wings: f32,
    pub rapid_fire: f32,
    pub power_throw: f32,
    pub shield: f32,
    /// Countdown to the next rapid-fire auto-throw
    pub auto_fire_timer: f32,
}

impl ActiveStatuses {
    /// Set the timer for `kind` to its fixed duration, overwriting any
    /// remaining time. Kind-specific activation side effects (entering flight)
    /// are applied by the caller, which owns the player.
    pub fn activate(&mut self, kind: PowerKind) {
        let duration = kind.duration();
        match kind {
            PowerKind::SpeedBoost => self.speed_boost = duration,
            PowerKind::SlowMotion => self.slow_motion = duration,
            PowerKind::SuperJump => self.super_jump = duration,
            PowerKind::Wings => self.wings = duration,
            PowerKind::RapidFire => {
                self.rapid_fire = duration;
                self.auto_fire_timer = AUTO_FIRE_INTERVAL_SECS;
            }
            PowerKind::PowerThrow => self.power_throw = duration,
            PowerKind::Shield => self.shield = duration,
        }
    }

    pub fn is_active(&self, kind: PowerKind) -> bool {
        self.remaining(kind) > 0.0
    }

    pub fn remaining(&self, kind: PowerKind) -> f32 {
        match kind {
            PowerKind::SpeedBoost => self.speed_boost,
            PowerKind::SlowMotion => self.slow_motion,
            PowerKind::SuperJump => self.super_jump,
            PowerKind::Wings => self.wings,
            PowerKind::RapidFire => self.rapid_fire,
            PowerKind::PowerThrow => self.power_throw,
            PowerKind::Shield => self.shield,
        }
    }

    /// Decrement all timers by `dt`. Returns the kinds that expired this tick
    /// so the caller can run deactivation side effects (leaving flight).
    pub fn advance(&mut self, dt: f32) -> Vec<PowerKind> {
        let mut expired = Vec::new();
        for kind in PowerKind::ALL {
            let timer = match kind {
                PowerKind::SpeedBoost => &mut self.speed_boost,
                PowerKind::SlowMotion => &mut self.slow_motion,
                PowerKind::SuperJump => &mut self.super_jump,
                PowerKind::Wings => &mut self.wings,
                PowerKind::RapidFire => &mut self.rapid_fire,
                PowerKind::PowerThrow => &mut self.power_throw,
                PowerKind::Shield => &mut self.shield,
            };
            if *timer > 0.0 {
                *timer -= dt;
                if *timer <= 0.0 {
                    *timer = 0.0;
                    expired.push(kind);
                }
            }
        }
        expired
    }

    /// Net scroll-speed multiplier. SpeedBoost overrides SlowMotion while
    /// both are active.
    pub fn speed_multiplier(&self) -> f32 {
        if self.speed_boost > 0.0 {
            1.5
        } else if self.slow_motion > 0.0 {
            0.6
        } else {
            1.0
        }
    }

    /// Jump launch velocity under the current statuses, px/frame
    pub fn jump_force(&self) -> f32 {
        if self.super_jump > 0.0 {
            JUMP_FORCE * 1.35
        } else {
            JUMP_FORCE
        }
    }

    /// Throw cooldown under the current statuses, seconds
    pub fn throw_cooldown(&self) -> f32 {
        if self.rapid_fire > 0.0 {
            RAPID_FIRE_COOLDOWN_SECS
        } else {
            THROW_COOLDOWN_SECS
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_activate_overwrites_duration() {
        let mut statuses = ActiveStatuses::default();
        statuses.activate(PowerKind::SpeedBoost);
        statuses.advance(20.0);
        assert!(statuses.speed_boost < PowerKind::SpeedBoost.duration());

        statuses.activate(PowerKind::SpeedBoost);
        assert_eq!(statuses.speed_boost, PowerKind::SpeedBoost.duration());
    }

    #[test]
    fn test_expiry_after_duration_elapses() {
        let mut statuses = ActiveStatuses::default();
        statuses.activate(PowerKind::SpeedBoost);
        assert_eq!(statuses.speed_boost, 30.0);

        // 31 seconds of 60 Hz ticks
        let dt = 1.0 / 60.0;
        let mut expired = Vec::new();
        for _ in 0..(31 * 60) {
            expired.extend(statuses.advance(dt));
        }
        assert!(!statuses.is_active(PowerKind::SpeedBoost));
        assert_eq!(expired, vec![PowerKind::SpeedBoost]);
        assert_eq!(statuses.speed_multiplier(), 1.0);
    }

    #[test]
    fn test_speed_boost_overrides_slow_motion() {
        let mut statuses = ActiveStatuses::default();
        statuses.activate(PowerKind::SlowMotion);
        assert_eq!(statuses.speed_multiplier(), 0.6);

        statuses.activate(PowerKind::SpeedBoost);
        assert_eq!(statuses.speed_multiplier(), 1.5);

        // Boost runs out first; slow motion resumes control
        statuses.speed_boost = 0.1;
        statuses.slow_motion = 5.0;
        statuses.advance(0.2);
        assert_eq!(statuses.speed_multiplier(), 0.6);
    }

    #[test]
    fn test_statuses_compose_across_kinds() {
        let mut statuses = ActiveStatuses::default();
        statuses.activate(PowerKind::SpeedBoost);
        statuses.activate(PowerKind::SuperJump);
        assert_eq!(statuses.speed_multiplier(), 1.5);
        assert_eq!(statuses.jump_force(), JUMP_FORCE * 1.35);
    }

    #[test]
    fn test_rapid_fire_shortens_cooldown() {
        let mut statuses = ActiveStatuses::default();
        assert_eq!(statuses.throw_cooldown(), THROW_COOLDOWN_SECS);
        statuses.activate(PowerKind::RapidFire);
        assert_eq!(statuses.throw_cooldown(), RAPID_FIRE_COOLDOWN_SECS);
    }
}
