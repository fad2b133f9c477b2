//! Evade - a handheld-style chase game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (movement, pursuit, powerups, scoring)
//! - `config`: World configuration (screen, sizes, timings, spawn tables)
//! - `platform`: Host interfaces and the frame driver, plus terminal/headless hosts
//! - `audio`: Sound cue routing
//! - `settings`: Host preferences

pub mod audio;
pub mod config;
pub mod platform;
pub mod settings;
pub mod sim;

pub use config::WorldConfig;
pub use settings::Settings;

/// Game configuration constants
pub mod consts {
    use crate::sim::Fixed;

    /// Screen dimensions (pixels). The origin sits at the screen center.
    pub const SCREEN_WIDTH: i32 = 240;
    pub const SCREEN_HEIGHT: i32 = 160;
    /// Largest accepted screen side; keeps every coordinate well inside Q19.12
    pub const MAX_SCREEN_SIDE: i32 = 4096;

    /// Every entity uses the same square footprint
    pub const ENTITY_SIZE: i32 = 8;

    /// Player defaults
    pub const PLAYER_BASE_SPEED: Fixed = Fixed::from_ratio(3, 2);
    pub const PLAYER_SPAWN: (i32, i32) = (44, 22);
    /// Where the player is put back after being caught
    pub const RESTART_POSITION: (i32, i32) = (44, 22);

    /// Powerup effect length in frames
    pub const POWERUP_DURATION: u32 = 300;
    /// Most powerups on screen at once
    pub const MAX_POWERUPS: usize = 3;
    /// Frames between spawn attempts
    pub const POWERUP_SPAWN_INTERVAL: u32 = 240;
    /// Frames an uncollected powerup stays on screen
    pub const POWERUP_LIFETIME: u32 = 480;

    /// Enemies closer than this push each other apart
    pub const SEPARATION_DISTANCE: i32 = 14;

    /// HUD number anchors
    pub const SCORE_POSITION: (i32, i32) = (70, -70);
    pub const HIGH_SCORE_POSITION: (i32, i32) = (-70, -70);

    /// Autopilot flees when an enemy is this close
    pub const IDLE_DANGER_RADIUS: i32 = 40;

    pub const DEFAULT_SEED: u64 = 12345;
    pub const FRAME_RATE: u32 = 60;
}
