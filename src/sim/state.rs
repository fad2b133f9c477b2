//! Game state and core simulation types
//!
//! Everything the per-frame loop mutates lives in `GameState`.

use serde::{Deserialize, Serialize};

use super::enemy::Enemy;
use super::fixed::Position;
use super::player::Player;
use super::powerup::{Powerup, PowerupKind, PowerupSpawner};
use super::score::ScoreTracker;
use crate::config::WorldConfig;

/// 15-bit BGR555 color, each channel 0..=31
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Color555 {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color555 {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Scale to 8 bits per channel for hosts that want RGB888
    pub const fn to_rgb888(self) -> (u8, u8, u8) {
        (
            (self.r << 3) | (self.r >> 2),
            (self.g << 3) | (self.g >> 2),
            (self.b << 3) | (self.b >> 2),
        )
    }
}

/// Backdrop colors the buttons switch between
pub mod backdrop {
    use super::Color555;

    pub const START: Color555 = Color555::new(31, 0, 0);
    /// Button A
    pub const A_PRESSED: Color555 = Color555::new(0, 0, 30);
    /// Button B
    pub const B_PRESSED: Color555 = Color555::new(0, 31, 0);
}

/// Something worth reacting to that happened during a frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    /// A non-invincible player was touched; score reset, player moved to restart
    PlayerCaught { enemy_id: u32 },
    /// An enemy touched the player and jumped away
    EnemyTeleported { enemy_id: u32, from: Position, to: Position },
    PowerupSpawned { id: u32, kind: PowerupKind, position: Position },
    PowerupCollected { id: u32, kind: PowerupKind },
    /// Powerup left the screen uncollected
    PowerupExpired { id: u32 },
    /// The player's active effect ran out
    PowerupEnded,
    NewHighScore { score: u64 },
    BackdropChanged { color: Color555 },
}

/// Complete game state (deterministic for a given config and input stream)
#[derive(Debug, Clone)]
pub struct GameState {
    pub config: WorldConfig,
    pub player: Player,
    /// Fixed set created at startup, only ever repositioned
    pub enemies: Vec<Enemy>,
    /// Active powerups sorted by id
    pub powerups: Vec<Powerup>,
    pub spawner: PowerupSpawner,
    pub score: ScoreTracker,
    pub backdrop: Color555,
    /// Frames simulated so far
    pub frame: u64,
    /// Set after a catch until the score climbs past the high score again
    pub(crate) chasing_record: bool,
    next_id: u32,
}

impl GameState {
    pub fn new(config: WorldConfig) -> Self {
        let player = Player::new(&config);
        let mut next_id = 1;
        let enemies = config
            .enemies
            .iter()
            .enumerate()
            .map(|(i, spawn)| {
                let id = next_id;
                next_id += 1;
                let seed = config.seed.wrapping_add(i as u64 + 1);
                Enemy::new(id, spawn.position, spawn.speed, config.entity_size, seed)
            })
            .collect();
        let spawner = PowerupSpawner::new(config.seed, &config.powerups);

        log::info!(
            "New game: seed {}, {} enemies, player at {}",
            config.seed,
            config.enemies.len(),
            config.player_spawn
        );

        Self {
            player,
            enemies,
            powerups: Vec::with_capacity(config.powerups.capacity),
            spawner,
            score: ScoreTracker::new(),
            backdrop: backdrop::START,
            frame: 0,
            chasing_record: false,
            next_id,
            config,
        }
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Place a powerup by hand (used by the spawner path and by tests)
    pub fn add_powerup(&mut self, kind: PowerupKind, position: Position) -> u32 {
        let id = self.next_entity_id();
        self.powerups
            .push(Powerup::new(id, kind, position, self.config.entity_size));
        id
    }
}
