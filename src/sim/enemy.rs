//! Pursuing enemies
//!
//! Each enemy closes on the player one speed unit per axis per frame,
//! jumps to a random spot when it touches the player, and is pushed away
//! from siblings that crowd it.

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::bbox::{BoundingBox, Size};
use super::fixed::{Fixed, Position};
use super::player::Player;
use crate::config::Screen;

/// What an enemy's pursuit step ended with
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pursuit {
    /// Still chasing, no contact
    Chasing,
    /// Touched the player and teleported away
    Contact { from: Position, to: Position },
}

#[derive(Debug, Clone)]
pub struct Enemy {
    id: u32,
    position: Position,
    speed: Fixed,
    size: Size,
    bbox: BoundingBox,
    /// Private source for teleport destinations
    rng: Pcg32,
}

impl Enemy {
    pub fn new(id: u32, position: Position, speed: Fixed, size: Size, seed: u64) -> Self {
        Self {
            id,
            position,
            speed,
            size,
            bbox: BoundingBox::new(position, size),
            rng: Pcg32::seed_from_u64(seed),
        }
    }

    pub fn id(&self) -> u32 {
        self.id
    }

    pub fn position(&self) -> Position {
        self.position
    }

    pub fn speed(&self) -> Fixed {
        self.speed
    }

    pub fn bounding_box(&self) -> BoundingBox {
        self.bbox
    }

    pub fn set_position(&mut self, position: Position) {
        self.position = position;
        self.bbox = BoundingBox::new(position, self.size);
    }

    /// Step toward the player; teleport if the new box touches theirs
    pub fn update(&mut self, player: &Player, screen: &Screen) -> Pursuit {
        let target = player.position();
        let mut pos = self.position;

        // Per-axis chase; a step may overshoot when closer than `speed`
        match (target.x - pos.x).signum() {
            1 => pos.x += self.speed,
            -1 => pos.x -= self.speed,
            _ => {}
        }
        match (target.y - pos.y).signum() {
            1 => pos.y += self.speed,
            -1 => pos.y -= self.speed,
            _ => {}
        }
        self.set_position(pos);

        if self.bbox.intersects(&player.bounding_box()) {
            let from = self.position;
            self.teleport(screen);
            log::debug!("Enemy {} caught player at {}, teleported to {}", self.id, from, self.position);
            Pursuit::Contact {
                from,
                to: self.position,
            }
        } else {
            Pursuit::Chasing
        }
    }

    /// Jump to a uniformly random spot whose box lies fully on screen
    fn teleport(&mut self, screen: &Screen) {
        let x = self
            .rng
            .random_range(screen.min_x() + self.size.width..=screen.max_x() - self.size.width);
        let y = self
            .rng
            .random_range(screen.min_y() + self.size.height..=screen.max_y() - self.size.height);
        self.set_position(Position::from_ints(x, y));
    }

    /// Push this enemy and `other` apart until they are `threshold` apart.
    ///
    /// Only applies when the distance is strictly below the threshold and
    /// nonzero; coincident enemies have no direction to separate along, so
    /// they stay put. Returns true if either enemy moved.
    pub fn separate_from(&mut self, other: &mut Enemy, threshold: Fixed) -> bool {
        let dist_sq = self.position.distance_squared(other.position);
        if dist_sq == 0 || dist_sq >= threshold.squared_wide() {
            return false;
        }

        let distance = Fixed::sqrt_wide(dist_sq);
        let push = (threshold - distance) / 2;
        let offset = other.position - self.position;
        let nx = offset.x / distance;
        let ny = offset.y / distance;
        let shift = Position::new(nx * push, ny * push);

        self.set_position(self.position - shift);
        other.set_position(other.position + shift);
        true
    }
}

/// Run `separate_from` once over every unordered pair; returns how many
/// pairs were pushed apart
pub fn separate_all(enemies: &mut [Enemy], threshold: Fixed) -> usize {
    let mut pushed = 0;
    for i in 0..enemies.len() {
        let (head, tail) = enemies.split_at_mut(i + 1);
        let a = &mut head[i];
        for b in tail.iter_mut() {
            if a.separate_from(b, threshold) {
                pushed += 1;
            }
        }
    }
    pushed
}
