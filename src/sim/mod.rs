//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only (one call to `tick` per frame)
//! - Fixed-point math only
//! - Seeded RNG only
//! - Stable iteration order (by entity ID)
//! - No rendering or platform dependencies

pub mod bbox;
pub mod enemy;
pub mod fixed;
pub mod player;
pub mod powerup;
pub mod score;
pub mod state;
pub mod tick;

pub use bbox::{BoundingBox, Size};
pub use enemy::{Enemy, Pursuit, separate_all};
pub use fixed::{Fixed, Position};
pub use player::{Player, PlayerStatus};
pub use powerup::{Powerup, PowerupKind, PowerupSpawner};
pub use score::ScoreTracker;
pub use state::{Color555, GameEvent, GameState, backdrop};
pub use tick::{FrameResult, TickInput, tick};
