//! Timed collectibles and the spawner that places them

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::bbox::{BoundingBox, Size};
use super::fixed::Position;
use crate::config::{PowerupRules, Screen};

/// Power-up types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum PowerupKind {
    /// Doubles player speed
    SpeedBoost,
    /// Collisions no longer reset the score
    Invincibility,
}

/// A collectible sitting on the screen
#[derive(Debug, Clone)]
pub struct Powerup {
    id: u32,
    kind: PowerupKind,
    position: Position,
    bbox: BoundingBox,
    active: bool,
    /// Frames spent on screen
    age: u32,
}

impl Powerup {
    pub fn new(id: u32, kind: PowerupKind, position: Position, size: Size) -> Self {
        Self {
            id,
            kind,
            position,
            bbox: BoundingBox::new(position, size),
            active: true,
            age: 0,
        }
    }

    pub fn id(&self) -> u32 {
        self.id
    }

    pub fn kind(&self) -> PowerupKind {
        self.kind
    }

    pub fn position(&self) -> Position {
        self.position
    }

    pub fn bounding_box(&self) -> BoundingBox {
        self.bbox
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn age(&self) -> u32 {
        self.age
    }

    /// One-way switch; an inactive powerup never comes back
    pub fn deactivate(&mut self) {
        self.active = false;
    }

    /// Count one more frame on screen; returns the new age
    pub fn tick_age(&mut self) -> u32 {
        self.age = self.age.saturating_add(1);
        self.age
    }
}

/// Decides when and where new powerups appear
#[derive(Debug, Clone)]
pub struct PowerupSpawner {
    rng: Pcg32,
    frames_until_spawn: u32,
}

impl PowerupSpawner {
    pub fn new(seed: u64, rules: &PowerupRules) -> Self {
        Self {
            rng: Pcg32::seed_from_u64(seed),
            frames_until_spawn: rules.spawn_interval,
        }
    }

    pub fn frames_until_spawn(&self) -> u32 {
        self.frames_until_spawn
    }

    /// Count down one frame; when the interval elapses and there is room,
    /// returns the kind and spot of a new powerup.
    ///
    /// A full screen skips the slot rather than queueing it.
    pub fn update(
        &mut self,
        present: usize,
        rules: &PowerupRules,
        screen: &Screen,
        size: Size,
    ) -> Option<(PowerupKind, Position)> {
        self.frames_until_spawn = self.frames_until_spawn.saturating_sub(1);
        if self.frames_until_spawn > 0 {
            return None;
        }
        self.frames_until_spawn = rules.spawn_interval;
        if present >= rules.capacity {
            return None;
        }

        let kind = if self.rng.random_bool(0.5) {
            PowerupKind::SpeedBoost
        } else {
            PowerupKind::Invincibility
        };
        let x = self
            .rng
            .random_range(screen.min_x() + size.width..=screen.max_x() - size.width);
        let y = self
            .rng
            .random_range(screen.min_y() + size.height..=screen.max_y() - size.height);
        Some((kind, Position::from_ints(x, y)))
    }
}
