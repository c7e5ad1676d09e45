//! Environmental clock: day/night, seasons, storms, weather particles
//!
//! Everything here is cosmetic. Rendering reads the interpolated values;
//! collision and spawn cadence never depend on them. The one exception is
//! storm intensity scaling the weather-particle drift, which is itself
//! cosmetic.

use glam::Vec2;
use rand::Rng;
use rand_pcg::Pcg32;

use crate::consts::*;

/// Seasons rotate in a fixed order, one step every
/// `CYCLES_PER_SEASON` completed day/night cycles.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Season {
    Spring,
    Summer,
    Autumn,
    Winter,
}

impl Season {
    pub fn next(self) -> Season {
        match self {
            Season::Spring => Season::Summer,
            Season::Summer => Season::Autumn,
            Season::Autumn => Season::Winter,
            Season::Winter => Season::Spring,
        }
    }

    pub fn weather(self) -> WeatherKind {
        match self {
            Season::Spring => WeatherKind::Petals,
            Season::Summer => WeatherKind::Fireflies,
            Season::Autumn => WeatherKind::Leaves,
            Season::Winter => WeatherKind::Snow,
        }
    }

    /// Particle pool size for the season
    pub fn particle_count(self) -> usize {
        match self {
            Season::Spring => 40,
            Season::Summer => 25,
            Season::Autumn => 50,
            Season::Winter => 80,
        }
    }
}

/// Weather particle flavor, drives rendering and sway behavior
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WeatherKind {
    Petals,
    Fireflies,
    Leaves,
    Snow,
}

/// One weather particle
#[derive(Debug, Clone)]
pub struct WeatherParticle {
    pub pos: Vec2,
    /// Base drift, px/frame
    pub vel: Vec2,
    /// Sway phase, radians
    pub phase: f32,
    pub size: f32,
}

/// Clock state for day/night, season, and storm cycles
#[derive(Debug, Clone)]
pub struct Environment {
    /// Total simulated seconds
    pub time: f32,
    /// Completed day/night cycles
    pub cycles_completed: u32,
    pub season: Season,
    pub storm_active: bool,
    /// Eases toward 0 or 1, always within [0, 1]
    pub storm_intensity: f32,
    /// Seconds until the storm toggles
    storm_timer: f32,
    pub particles: Vec<WeatherParticle>,
}

impl Environment {
    pub fn new(rng: &mut Pcg32) -> Self {
        Self {
            time: 0.0,
            cycles_completed: 0,
            season: Season::Spring,
            storm_active: false,
            storm_intensity: 0.0,
            storm_timer: rng.random_range(STORM_OFF_SECS_MIN..STORM_OFF_SECS_MAX),
            particles: Vec::new(),
        }
    }

    /// Cyclic day/night phase in [0, 1)
    pub fn day_night_progress(&self) -> f32 {
        (self.time / DAY_NIGHT_CYCLE_SECS).fract()
    }

    /// Smooth darkness factor in [0, 1]; 0 at dawn, 1 at midnight.
    /// Consumed by rendering only.
    pub fn night_amount(&self) -> f32 {
        let progress = self.day_night_progress();
        0.5 - 0.5 * (progress * std::f32::consts::TAU).cos()
    }

    /// Advance all environmental timers by `dt` seconds
    pub fn advance(&mut self, dt: f32, dt_norm: f32, rng: &mut Pcg32, viewport: Vec2) {
        let before = (self.time / DAY_NIGHT_CYCLE_SECS) as u32;
        self.time += dt;
        let after = (self.time / DAY_NIGHT_CYCLE_SECS) as u32;

        if after > before {
            self.cycles_completed += after - before;
            if self.cycles_completed % CYCLES_PER_SEASON == 0 {
                self.season = self.season.next();
                self.regenerate_particles(rng, viewport);
                log::info!("Season changed to {:?}", self.season);
            }
        }

        self.advance_storm(dt, rng);
        self.advance_particles(dt, dt_norm, viewport);
    }

    fn advance_storm(&mut self, dt: f32, rng: &mut Pcg32) {
        self.storm_timer -= dt;
        if self.storm_timer <= 0.0 {
            self.storm_active = !self.storm_active;
            self.storm_timer = if self.storm_active {
                rng.random_range(STORM_ON_SECS_MIN..STORM_ON_SECS_MAX)
            } else {
                rng.random_range(STORM_OFF_SECS_MIN..STORM_OFF_SECS_MAX)
            };
            log::debug!(
                "Storm {} for {:.0}s",
                if self.storm_active { "rising" } else { "fading" },
                self.storm_timer
            );
        }

        // Smoothed approach toward the binary target; never snaps
        let target = if self.storm_active { 1.0 } else { 0.0 };
        let step = (dt * STORM_EASE_RATE).min(1.0);
        self.storm_intensity += (target - self.storm_intensity) * step;
        self.storm_intensity = self.storm_intensity.clamp(0.0, 1.0);
    }

    fn advance_particles(&mut self, dt: f32, dt_norm: f32, viewport: Vec2) {
        if viewport.x <= 0.0 || viewport.y <= 0.0 {
            return;
        }
        // Storm scales motion magnitude only
        let agitation = 1.0 + self.storm_intensity * 2.0;
        let sway_kind = self.season.weather();

        for p in &mut self.particles {
            p.phase += dt * 2.0;
            let sway = match sway_kind {
                WeatherKind::Fireflies => Vec2::new(p.phase.sin(), (p.phase * 1.3).cos()) * 0.6,
                WeatherKind::Snow => Vec2::new(p.phase.sin() * 0.8, 0.0),
                _ => Vec2::new(p.phase.sin() * 0.5, 0.0),
            };
            p.pos += (p.vel + sway) * agitation * dt_norm;

            // Wrap back onto the field
            if p.pos.y > viewport.y {
                p.pos.y = -p.size;
            } else if p.pos.y < -p.size {
                p.pos.y = viewport.y;
            }
            if p.pos.x < -p.size {
                p.pos.x = viewport.x + p.size;
            } else if p.pos.x > viewport.x + p.size {
                p.pos.x = -p.size;
            }
        }
    }

    /// Rebuild the particle pool, sized and typed for the current season
    pub fn regenerate_particles(&mut self, rng: &mut Pcg32, viewport: Vec2) {
        self.particles.clear();
        if viewport.x <= 0.0 || viewport.y <= 0.0 {
            return;
        }
        let kind = self.season.weather();
        for _ in 0..self.season.particle_count() {
            let vel = match kind {
                WeatherKind::Petals => Vec2::new(rng.random_range(-1.2..-0.4), rng.random_range(0.6..1.4)),
                WeatherKind::Fireflies => Vec2::new(rng.random_range(-0.3..0.3), rng.random_range(-0.2..0.2)),
                WeatherKind::Leaves => Vec2::new(rng.random_range(-2.0..-0.8), rng.random_range(0.8..1.8)),
                WeatherKind::Snow => Vec2::new(rng.random_range(-0.6..0.2), rng.random_range(0.5..1.6)),
            };
            self.particles.push(WeatherParticle {
                pos: Vec2::new(
                    rng.random_range(0.0..viewport.x),
                    rng.random_range(0.0..viewport.y),
                ),
                vel,
                phase: rng.random_range(0.0..std::f32::consts::TAU),
                size: rng.random_range(2.0..6.0),
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    fn test_rng() -> Pcg32 {
        Pcg32::seed_from_u64(42)
    }

    #[test]
    fn test_day_night_progress_stays_in_range() {
        let mut rng = test_rng();
        let mut env = Environment::new(&mut rng);
        let viewport = Vec2::new(800.0, 600.0);
        for _ in 0..10_000 {
            env.advance(0.033, 0.033 * REFERENCE_FPS, &mut rng, viewport);
            let p = env.day_night_progress();
            assert!((0.0..1.0).contains(&p));
            let n = env.night_amount();
            assert!((0.0..=1.0).contains(&n));
        }
    }

    #[test]
    fn test_storm_intensity_monotone_approach() {
        let mut rng = test_rng();
        let mut env = Environment::new(&mut rng);
        let viewport = Vec2::new(800.0, 600.0);
        let dt = 1.0 / 60.0;
        let mut prev = env.storm_intensity;
        let mut prev_active = env.storm_active;
        for _ in 0..60_000 {
            env.advance(dt, dt * REFERENCE_FPS, &mut rng, viewport);
            assert!((0.0..=1.0).contains(&env.storm_intensity));
            if env.storm_active == prev_active {
                if env.storm_active {
                    assert!(env.storm_intensity >= prev);
                } else {
                    assert!(env.storm_intensity <= prev);
                }
            }
            prev = env.storm_intensity;
            prev_active = env.storm_active;
        }
    }

    #[test]
    fn test_season_rotation_regenerates_particles() {
        let mut rng = test_rng();
        let mut env = Environment::new(&mut rng);
        let viewport = Vec2::new(800.0, 600.0);
        env.regenerate_particles(&mut rng, viewport);
        assert_eq!(env.particles.len(), Season::Spring.particle_count());

        // Run past two full day/night cycles
        let season_secs = DAY_NIGHT_CYCLE_SECS * CYCLES_PER_SEASON as f32;
        let dt = 0.05;
        let steps = (season_secs / dt) as usize + 10;
        for _ in 0..steps {
            env.advance(dt, dt * REFERENCE_FPS, &mut rng, viewport);
        }
        assert_eq!(env.season, Season::Summer);
        assert_eq!(env.particles.len(), Season::Summer.particle_count());
    }

    #[test]
    fn test_rising_particles_wrap_at_top_edge() {
        let mut rng = test_rng();
        let mut env = Environment::new(&mut rng);
        // Fireflies are the only kind that drifts upward
        env.season = Season::Summer;
        let viewport = Vec2::new(800.0, 600.0);
        env.regenerate_particles(&mut rng, viewport);

        let size = env.particles[0].size;
        env.particles[0].pos = Vec2::new(400.0, -size - 10.0);
        env.particles[0].vel = Vec2::new(0.0, -0.2);

        let dt = 1.0 / 60.0;
        env.advance(dt, dt * REFERENCE_FPS, &mut rng, viewport);
        assert_eq!(env.particles[0].pos.y, viewport.y);

        // And the pool as a whole never escapes the field vertically
        for _ in 0..20_000 {
            env.advance(dt, dt * REFERENCE_FPS, &mut rng, viewport);
        }
        for p in &env.particles {
            assert!(p.pos.y <= viewport.y);
            assert!(p.pos.y >= -p.size);
        }
    }

    #[test]
    fn test_season_order_wraps() {
        assert_eq!(Season::Winter.next(), Season::Spring);
        assert_eq!(
            Season::Spring.next().next().next().next(),
            Season::Spring
        );
    }
}
