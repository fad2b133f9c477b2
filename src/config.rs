//! World configuration
//!
//! Everything the simulation needs to know about the screen, entity sizes,
//! timings and spawn tables. Built once and handed to `GameState::new`;
//! there are no ambient globals.

use std::path::Path;

use anyhow::{Context, Result, bail, ensure};
use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::sim::{BoundingBox, Fixed, Position, Size};

/// Screen rectangle centered on the origin
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Screen {
    pub width: i32,
    pub height: i32,
}

impl Default for Screen {
    fn default() -> Self {
        Self {
            width: SCREEN_WIDTH,
            height: SCREEN_HEIGHT,
        }
    }
}

impl Screen {
    #[inline]
    pub const fn min_x(&self) -> i32 {
        -self.width / 2
    }

    #[inline]
    pub const fn max_x(&self) -> i32 {
        self.width / 2
    }

    #[inline]
    pub const fn min_y(&self) -> i32 {
        -self.height / 2
    }

    #[inline]
    pub const fn max_y(&self) -> i32 {
        self.height / 2
    }

    pub const fn bounds(&self) -> BoundingBox {
        BoundingBox::from_edges(self.min_x(), self.min_y(), self.max_x(), self.max_y())
    }
}

/// Starting point and fixed speed of one enemy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnemySpawn {
    pub position: Position,
    pub speed: Fixed,
}

impl EnemySpawn {
    pub fn new(x: i32, y: i32, speed: Fixed) -> Self {
        Self {
            position: Position::from_ints(x, y),
            speed,
        }
    }
}

/// Powerup spawn cadence and lifetime
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PowerupRules {
    pub capacity: usize,
    pub spawn_interval: u32,
    pub lifetime: u32,
}

impl Default for PowerupRules {
    fn default() -> Self {
        Self {
            capacity: MAX_POWERUPS,
            spawn_interval: POWERUP_SPAWN_INTERVAL,
            lifetime: POWERUP_LIFETIME,
        }
    }
}

/// Where the score numbers are drawn
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HudLayout {
    pub score: (i32, i32),
    pub high_score: (i32, i32),
}

impl Default for HudLayout {
    fn default() -> Self {
        Self {
            score: SCORE_POSITION,
            high_score: HIGH_SCORE_POSITION,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorldConfig {
    /// Run seed; enemies and the powerup spawner derive their sources from it
    pub seed: u64,
    pub screen: Screen,
    pub entity_size: Size,
    pub player_base_speed: Fixed,
    pub player_spawn: Position,
    pub restart_position: Position,
    /// Frames a collected powerup stays in effect
    pub powerup_duration: u32,
    pub separation_distance: Fixed,
    pub enemies: Vec<EnemySpawn>,
    pub powerups: PowerupRules,
    pub hud: HudLayout,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            seed: DEFAULT_SEED,
            screen: Screen::default(),
            entity_size: Size::new(ENTITY_SIZE, ENTITY_SIZE),
            player_base_speed: PLAYER_BASE_SPEED,
            player_spawn: Position::from_ints(PLAYER_SPAWN.0, PLAYER_SPAWN.1),
            restart_position: Position::from_ints(RESTART_POSITION.0, RESTART_POSITION.1),
            powerup_duration: POWERUP_DURATION,
            separation_distance: Fixed::from_int(SEPARATION_DISTANCE),
            enemies: vec![
                EnemySpawn::new(-80, -50, Fixed::ONE),
                EnemySpawn::new(80, -50, Fixed::from_ratio(3, 4)),
                EnemySpawn::new(-80, 50, Fixed::from_ratio(5, 4)),
            ],
            powerups: PowerupRules::default(),
            hud: HudLayout::default(),
        }
    }
}

impl WorldConfig {
    /// Same world with a different seed
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Read a JSON config; omitted fields keep their defaults
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("reading world config {}", path.display()))?;
        let config: WorldConfig = serde_json::from_str(&json)
            .with_context(|| format!("parsing world config {}", path.display()))?;
        config
            .validate()
            .with_context(|| format!("invalid world config {}", path.display()))?;
        log::info!(
            "Loaded world config from {} ({} enemies)",
            path.display(),
            config.enemies.len()
        );
        Ok(config)
    }

    /// Range the player's center is clamped to, per axis.
    ///
    /// Odd sizes extend one pixel further right/down than left/up, so the
    /// upper bounds inset by the larger half.
    pub fn player_range(&self) -> ((i32, i32), (i32, i32)) {
        let size = self.entity_size;
        (
            (
                self.screen.min_x() + size.half_width(),
                self.screen.max_x() - (size.width - size.half_width()),
            ),
            (
                self.screen.min_y() + size.half_height(),
                self.screen.max_y() - (size.height - size.half_height()),
            ),
        )
    }

    pub fn validate(&self) -> Result<()> {
        let size = self.entity_size;
        ensure!(
            size.width > 0 && size.height > 0,
            "entity size must be positive, got {}x{}",
            size.width,
            size.height
        );
        ensure!(
            self.screen.width >= 2 * size.width && self.screen.height >= 2 * size.height,
            "screen {}x{} leaves no room for {}x{} entities",
            self.screen.width,
            self.screen.height,
            size.width,
            size.height
        );
        ensure!(
            self.screen.width <= MAX_SCREEN_SIDE && self.screen.height <= MAX_SCREEN_SIDE,
            "screen {}x{} is larger than {}x{}",
            self.screen.width,
            self.screen.height,
            MAX_SCREEN_SIDE,
            MAX_SCREEN_SIDE
        );

        // A single step may not cross the whole screen
        let max_speed = Fixed::from_int(self.screen.width.min(self.screen.height));
        ensure!(
            self.player_base_speed > Fixed::ZERO && self.player_base_speed < max_speed,
            "player speed {} must be positive and below {}",
            self.player_base_speed,
            max_speed
        );
        ensure!(
            self.separation_distance >= Fixed::ZERO && self.separation_distance < max_speed,
            "separation distance {} must be in 0..{}",
            self.separation_distance,
            max_speed
        );
        ensure!(self.powerup_duration > 0, "powerup duration must be positive");
        ensure!(
            self.powerups.spawn_interval > 0 && self.powerups.lifetime > 0,
            "powerup spawn interval and lifetime must be positive"
        );

        let ((min_x, max_x), (min_y, max_y)) = self.player_range();
        let in_player_range = |p: Position| {
            let (x, y) = (p.x.round_integer(), p.y.round_integer());
            (min_x..=max_x).contains(&x) && (min_y..=max_y).contains(&y)
        };
        if !in_player_range(self.player_spawn) {
            bail!("player spawn {} is off screen", self.player_spawn);
        }
        if !in_player_range(self.restart_position) {
            bail!("restart position {} is off screen", self.restart_position);
        }

        let screen = self.screen.bounds();
        for (i, enemy) in self.enemies.iter().enumerate() {
            ensure!(
                enemy.speed > Fixed::ZERO && enemy.speed < max_speed,
                "enemy {} speed {} must be positive and below {}",
                i,
                enemy.speed,
                max_speed
            );
            ensure!(
                BoundingBox::new(enemy.position, size).contained_in(&screen),
                "enemy {} spawns off screen at {}",
                i,
                enemy.position
            );
        }
        Ok(())
    }
}
