//! Game state and core simulation types
//!
//! One explicit context object owns every entity pool and timer for a run;
//! the phase functions in `tick` borrow it mutably in a fixed order.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;

use super::collision::Aabb;
use super::environment::Environment;
use super::spawn::Spawners;
use super::status::{ActiveStatuses, PowerKind};
use crate::consts::*;

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GamePhase {
    /// Active gameplay
    Running,
    /// Tick advancement suspended; no time passes
    Paused,
    /// Run ended, state frozen
    GameOver,
}

/// What dealt damage to the player, for cue selection
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HitSource {
    Dog,
    Vehicle,
    Generic,
}

/// Fire-and-forget signals emitted during a tick.
///
/// The host drains these once per frame: audio cues go to the sound sink,
/// `GameOver` goes to the game-over screen and best-score persistence.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GameEvent {
    Throw,
    Jump,
    Delivery,
    Heal,
    Coin,
    Bonus,
    PowerUp(PowerKind),
    Hit(HitSource),
    /// Obstacle destroyed by a knockback mail
    Smash,
    /// Vehicle hazard entering the play field
    Horn,
    /// Emitted exactly once per run
    GameOver {
        score: u64,
        deliveries: u32,
        distance: u32,
    },
}

/// Per-tick aggregate snapshot for the HUD
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TickReport {
    pub score: u64,
    pub deliveries: u32,
    pub distance: u32,
    pub lives: u8,
    pub game_over: bool,
}

/// The mail carrier
#[derive(Debug, Clone)]
pub struct Player {
    /// Top-left corner of the sprite
    pub pos: Vec2,
    /// Vertical velocity, px/frame (negative = up)
    pub vy: f32,
    pub grounded: bool,
    pub jumping: bool,
    /// Standing on a trampoline this tick (jump permitted while airborne)
    pub on_platform: bool,
    /// Wings power-up active; gravity replaced by damping
    pub flying: bool,
    /// Post-hit grace, seconds remaining
    pub invincible_timer: f32,
    /// Seconds until the next throw is allowed
    pub throw_cooldown: f32,
}

impl Player {
    pub fn new() -> Self {
        Self {
            pos: Vec2::new(PLAYER_X, 0.0),
            vy: 0.0,
            grounded: true,
            jumping: false,
            on_platform: false,
            flying: false,
            invincible_timer: 0.0,
            throw_cooldown: 0.0,
        }
    }

    /// Inset hitbox so near-misses feel fair against the drawn silhouette
    pub fn hitbox(&self) -> Aabb {
        Aabb::new(
            self.pos.x + 10.0,
            self.pos.y + 10.0,
            PLAYER_WIDTH - 20.0,
            PLAYER_HEIGHT - 10.0,
        )
    }

    pub fn is_invincible(&self) -> bool {
        self.invincible_timer > 0.0
    }

    /// Where a thrown mail leaves the hand
    pub fn throw_origin(&self) -> Vec2 {
        Vec2::new(self.pos.x + PLAYER_WIDTH, self.pos.y + 20.0)
    }
}

impl Default for Player {
    fn default() -> Self {
        Self::new()
    }
}

/// Obstacle types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ObstacleKind {
    Dog,
    #[default]
    Pylon,
    Hydrant,
    TrashCan,
    /// Runaway toy car, rolls toward the player faster than the scroll
    ToyCar,
    /// Skateboarder weaving down the sidewalk
    Skater,
    /// Bounce pad; never damages, launches the player upward
    Trampoline,
}

impl ObstacleKind {
    pub const ALL: [ObstacleKind; 7] = [
        ObstacleKind::Dog,
        ObstacleKind::Pylon,
        ObstacleKind::Hydrant,
        ObstacleKind::TrashCan,
        ObstacleKind::ToyCar,
        ObstacleKind::Skater,
        ObstacleKind::Trampoline,
    ];

    pub fn size(self) -> Vec2 {
        match self {
            ObstacleKind::Dog => Vec2::new(50.0, 40.0),
            ObstacleKind::Pylon => Vec2::new(25.0, 50.0),
            ObstacleKind::Hydrant => Vec2::new(30.0, 45.0),
            ObstacleKind::TrashCan => Vec2::new(40.0, 55.0),
            ObstacleKind::ToyCar => Vec2::new(45.0, 30.0),
            ObstacleKind::Skater => Vec2::new(40.0, 65.0),
            ObstacleKind::Trampoline => Vec2::new(50.0, 25.0),
        }
    }

    /// Lives removed on contact; trampolines never damage
    pub fn damage(self) -> u8 {
        match self {
            ObstacleKind::Trampoline => 0,
            _ => 1,
        }
    }

    /// Extra leftward motion on top of the world scroll, px/frame
    pub fn extra_speed(self) -> f32 {
        match self {
            ObstacleKind::ToyCar => 3.0,
            ObstacleKind::Skater => 2.0,
            _ => 0.0,
        }
    }

    pub fn hit_source(self) -> HitSource {
        match self {
            ObstacleKind::Dog => HitSource::Dog,
            _ => HitSource::Generic,
        }
    }
}

/// A roadside obstacle
#[derive(Debug, Clone)]
pub struct Obstacle {
    pub kind: ObstacleKind,
    /// Top-left corner
    pub pos: Vec2,
    pub size: Vec2,
    /// Per-type animation phase (gait frame, wheel spin, flex)
    pub phase: f32,
}

impl Obstacle {
    pub fn new(kind: ObstacleKind, x: f32, ground_y: f32) -> Self {
        let size = kind.size();
        Self {
            kind,
            pos: Vec2::new(x, ground_y - size.y),
            size,
            phase: 0.0,
        }
    }

    pub fn hitbox(&self) -> Aabb {
        // Slight inset keeps grazing jumps survivable
        Aabb::new(
            self.pos.x + 3.0,
            self.pos.y + 3.0,
            self.size.x - 6.0,
            self.size.y - 3.0,
        )
    }

    /// Thin band across the top surface, used for trampoline landings
    pub fn top_surface(&self) -> Aabb {
        Aabb::new(self.pos.x, self.pos.y - 4.0, self.size.x, 12.0)
    }
}

/// A delivery target
#[derive(Debug, Clone)]
pub struct Mailbox {
    pub pos: Vec2,
    pub size: Vec2,
    pub delivered: bool,
}

impl Mailbox {
    pub fn new(x: f32, ground_y: f32) -> Self {
        let size = Vec2::new(30.0, 60.0);
        Self {
            pos: Vec2::new(x, ground_y - size.y),
            size,
            delivered: false,
        }
    }

    pub fn hitbox(&self) -> Aabb {
        Aabb::new(self.pos.x, self.pos.y, self.size.x, self.size.y)
    }
}

/// A thrown mail projectile
#[derive(Debug, Clone)]
pub struct Mail {
    pub pos: Vec2,
    /// px/frame
    pub vel: Vec2,
    /// Degrees, cosmetic spin
    pub rotation: f32,
    /// Destroys obstacles it passes through
    pub knockback: bool,
    /// No gravity; flies flat (PowerThrow)
    pub straight: bool,
}

impl Mail {
    pub fn hitbox(&self) -> Aabb {
        Aabb::new(self.pos.x, self.pos.y, MAIL_SIZE, MAIL_SIZE)
    }
}

/// Road hazard types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HazardKind {
    Car,
    Truck,
    Cyclist,
    /// Rolling tire escaped from somewhere
    Tire,
    #[default]
    Tumbleweed,
}

impl HazardKind {
    pub const ALL: [HazardKind; 5] = [
        HazardKind::Car,
        HazardKind::Truck,
        HazardKind::Cyclist,
        HazardKind::Tire,
        HazardKind::Tumbleweed,
    ];

    pub fn size(self) -> Vec2 {
        match self {
            HazardKind::Car => Vec2::new(90.0, 45.0),
            HazardKind::Truck => Vec2::new(130.0, 55.0),
            HazardKind::Cyclist => Vec2::new(45.0, 70.0),
            HazardKind::Tire => Vec2::new(36.0, 36.0),
            HazardKind::Tumbleweed => Vec2::new(32.0, 32.0),
        }
    }

    /// Lives removed on contact; `None` means the hazard never collides
    pub fn damage(self) -> Option<u8> {
        match self {
            HazardKind::Car | HazardKind::Truck => Some(2),
            HazardKind::Cyclist | HazardKind::Tire => Some(1),
            HazardKind::Tumbleweed => None,
        }
    }

    /// Own travel speed magnitude, px/frame
    pub fn speed(self) -> f32 {
        match self {
            HazardKind::Car => 11.0,
            HazardKind::Truck => 9.0,
            HazardKind::Cyclist => 7.0,
            HazardKind::Tire => 8.0,
            HazardKind::Tumbleweed => 5.0,
        }
    }

    /// Motor vehicles announce themselves
    pub fn honks(self) -> bool {
        matches!(self, HazardKind::Car | HazardKind::Truck)
    }

    pub fn hit_source(self) -> HitSource {
        match self {
            HazardKind::Car | HazardKind::Truck => HitSource::Vehicle,
            _ => HitSource::Generic,
        }
    }
}

/// A road hazard travelling independently of the world scroll
#[derive(Debug, Clone)]
pub struct Hazard {
    pub kind: HazardKind,
    pub pos: Vec2,
    /// Signed own velocity, px/frame (negative = leftward)
    pub vx: f32,
    pub phase: f32,
}

impl Hazard {
    pub fn hitbox(&self) -> Aabb {
        let size = self.kind.size();
        Aabb::new(
            self.pos.x + 4.0,
            self.pos.y + 4.0,
            size.x - 8.0,
            size.y - 8.0,
        )
    }
}

/// Collectible types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PickupKind {
    Heart,
    Coin,
    Power(PowerKind),
}

/// A floating collectible
#[derive(Debug, Clone)]
pub struct Pickup {
    pub kind: PickupKind,
    pub pos: Vec2,
    /// Pulse/rotation animation phase
    pub phase: f32,
}

impl Pickup {
    pub const SIZE: f32 = 28.0;

    pub fn hitbox(&self) -> Aabb {
        Aabb::new(self.pos.x, self.pos.y, Self::SIZE, Self::SIZE)
    }
}

/// One-hit bonus entity; touching it pays out a coin burst
#[derive(Debug, Clone)]
pub struct Bonus {
    pub pos: Vec2,
    pub phase: f32,
}

impl Bonus {
    pub const SIZE: Vec2 = Vec2::new(40.0, 55.0);

    pub fn hitbox(&self) -> Aabb {
        Aabb::new(self.pos.x, self.pos.y, Self::SIZE.x, Self::SIZE.y)
    }
}

/// Background cloud, purely decorative
#[derive(Debug, Clone)]
pub struct Cloud {
    pub pos: Vec2,
    pub width: f32,
    /// px/frame, independent of the scroll
    pub speed: f32,
}

/// Background bird; flocks bob along a sine around `base_y`
#[derive(Debug, Clone)]
pub struct Bird {
    pub pos: Vec2,
    pub base_y: f32,
    pub phase: f32,
    pub speed: f32,
}

/// Sidewalk pedestrian, never collides
#[derive(Debug, Clone)]
pub struct Pedestrian {
    pub pos: Vec2,
    pub speed: f32,
    pub phase: f32,
}

/// Complete per-run simulation state
#[derive(Debug, Clone)]
pub struct GameState {
    /// Run seed for reproducible spawn sequences
    pub seed: u64,
    pub(crate) rng: Pcg32,
    pub phase: GamePhase,
    /// Play field dimensions; zero until the host reports a real size
    pub viewport: Vec2,
    /// Total simulated seconds
    pub time: f32,
    /// World scroll speed, px/frame (before status multipliers)
    pub speed: f32,
    pub player: Player,
    pub obstacles: Vec<Obstacle>,
    pub mailboxes: Vec<Mailbox>,
    pub mails: Vec<Mail>,
    pub hazards: Vec<Hazard>,
    pub pickups: Vec<Pickup>,
    pub bonuses: Vec<Bonus>,
    pub clouds: Vec<Cloud>,
    pub birds: Vec<Bird>,
    pub pedestrians: Vec<Pedestrian>,
    pub statuses: ActiveStatuses,
    pub env: Environment,
    pub spawners: Spawners,
    pub score: u64,
    /// Fractional score carry so accrual is frame-rate independent
    pub(crate) score_accum: f32,
    pub deliveries: u32,
    pub distance: f32,
    pub lives: u8,
    /// Events produced this tick, drained by the host
    pub events: Vec<GameEvent>,
    game_over_emitted: bool,
}

impl GameState {
    /// Create a fresh run. The viewport starts at zero; spawning and physics
    /// stay suppressed until [`GameState::set_viewport`] reports a real size.
    pub fn new(seed: u64) -> Self {
        let mut rng = Pcg32::seed_from_u64(seed);
        let env = Environment::new(&mut rng);
        let spawners = Spawners::new(&mut rng);
        Self {
            seed,
            rng,
            phase: GamePhase::Running,
            viewport: Vec2::ZERO,
            time: 0.0,
            speed: INITIAL_SPEED,
            player: Player::new(),
            obstacles: Vec::new(),
            mailboxes: Vec::new(),
            mails: Vec::new(),
            hazards: Vec::new(),
            pickups: Vec::new(),
            bonuses: Vec::new(),
            clouds: Vec::new(),
            birds: Vec::new(),
            pedestrians: Vec::new(),
            statuses: ActiveStatuses::default(),
            env,
            spawners,
            score: 0,
            score_accum: 0.0,
            deliveries: 0,
            distance: 0.0,
            lives: STARTING_LIVES,
            events: Vec::new(),
            game_over_emitted: false,
        }
    }

    /// Report the play field size. The first valid size places the player on
    /// the ground and seeds the decorative layers.
    pub fn set_viewport(&mut self, width: f32, height: f32) {
        let had_viewport = self.has_viewport();
        self.viewport = Vec2::new(width.max(0.0), height.max(0.0));

        if !self.has_viewport() {
            return;
        }
        if !had_viewport {
            self.player.pos.y = self.player_ground_y();
            self.player.vy = 0.0;
            self.player.grounded = true;
            super::spawn::seed_decor(self);
            self.env.regenerate_particles(&mut self.rng, self.viewport);
            log::info!("Viewport ready: {}x{}", width, height);
        } else if self.player.grounded {
            self.player.pos.y = self.player_ground_y();
        }
    }

    pub fn has_viewport(&self) -> bool {
        self.viewport.x > 0.0 && self.viewport.y > 0.0
    }

    /// Top of the road band
    pub fn ground_y(&self) -> f32 {
        self.viewport.y - GROUND_HEIGHT
    }

    /// Player y when standing on the ground
    pub fn player_ground_y(&self) -> f32 {
        self.ground_y() - PLAYER_HEIGHT
    }

    pub fn report(&self) -> TickReport {
        TickReport {
            score: self.score,
            deliveries: self.deliveries,
            distance: self.distance as u32,
            lives: self.lives,
            game_over: self.phase == GamePhase::GameOver,
        }
    }

    /// Move events out for the host to dispatch
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    pub(crate) fn add_score(&mut self, points: u64) {
        self.score += points;
    }

    /// Heal, clamped to `MAX_LIVES`
    pub(crate) fn heal(&mut self, amount: u8) {
        self.lives = (self.lives + amount).min(MAX_LIVES);
    }

    /// Apply damage, start the grace window, and end the run at zero lives.
    /// The game-over event fires at most once per run.
    pub(crate) fn damage(&mut self, amount: u8, source: HitSource) {
        self.lives = self.lives.saturating_sub(amount);
        self.player.invincible_timer = HIT_GRACE_SECS;
        self.events.push(GameEvent::Hit(source));

        if self.lives == 0 && !self.game_over_emitted {
            self.game_over_emitted = true;
            self.phase = GamePhase::GameOver;
            self.events.push(GameEvent::GameOver {
                score: self.score,
                deliveries: self.deliveries,
                distance: self.distance as u32,
            });
            log::info!(
                "Run over: score={} deliveries={} distance={}",
                self.score,
                self.deliveries,
                self.distance as u32
            );
        }
    }
}
