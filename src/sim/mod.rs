//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Seeded RNG only (every random draw goes through the state-owned PCG)
//! - Fixed phase order within a tick: clock → spawns → physics → collisions →
//!   pruning → reporting
//! - No rendering or platform dependencies

pub mod collision;
pub mod environment;
pub mod physics;
pub mod spawn;
pub mod state;
pub mod status;
pub mod tick;

pub use collision::Aabb;
pub use environment::{Environment, Season, WeatherKind, WeatherParticle};
pub use state::{
    Bird, Bonus, Cloud, GameEvent, GamePhase, GameState, Hazard, HazardKind, HitSource, Mail,
    Mailbox, Obstacle, ObstacleKind, Pedestrian, Pickup, PickupKind, Player, TickReport,
};
pub use status::{ActiveStatuses, PowerKind};
pub use tick::{TickInput, tick};
