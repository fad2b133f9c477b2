//! The player-controlled sprite
//!
//! Movement comes from four independent held directions; the powerup slot
//! drives a small status machine (Normal, Boosted, Invincible).

use super::bbox::{BoundingBox, Size};
use super::fixed::{Fixed, Position};
use super::powerup::PowerupKind;
use super::tick::TickInput;
use crate::config::WorldConfig;

/// Effect currently applied by the powerup slot
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayerStatus {
    Normal,
    Boosted,
    Invincible,
}

#[derive(Debug, Clone)]
pub struct Player {
    position: Position,
    base_speed: Fixed,
    speed: Fixed,
    size: Size,
    bbox: BoundingBox,
    /// Frames left on the active powerup
    powerup_timer: u32,
    has_powerup: bool,
    is_invincible: bool,
    powerup_duration: u32,
    /// Clamp range for the center, per axis
    x_range: (Fixed, Fixed),
    y_range: (Fixed, Fixed),
}

impl Player {
    pub fn new(config: &WorldConfig) -> Self {
        let ((min_x, max_x), (min_y, max_y)) = config.player_range();
        let size = config.entity_size;
        Self {
            position: config.player_spawn,
            base_speed: config.player_base_speed,
            speed: config.player_base_speed,
            size,
            bbox: BoundingBox::new(config.player_spawn, size),
            powerup_timer: 0,
            has_powerup: false,
            is_invincible: false,
            powerup_duration: config.powerup_duration,
            x_range: (Fixed::from_int(min_x), Fixed::from_int(max_x)),
            y_range: (Fixed::from_int(min_y), Fixed::from_int(max_y)),
        }
    }

    pub fn position(&self) -> Position {
        self.position
    }

    pub fn bounding_box(&self) -> BoundingBox {
        self.bbox
    }

    pub fn size(&self) -> Size {
        self.size
    }

    pub fn speed(&self) -> Fixed {
        self.speed
    }

    pub fn base_speed(&self) -> Fixed {
        self.base_speed
    }

    pub fn powerup_timer(&self) -> u32 {
        self.powerup_timer
    }

    pub fn has_powerup(&self) -> bool {
        self.has_powerup
    }

    pub fn is_invincible(&self) -> bool {
        self.is_invincible
    }

    pub fn status(&self) -> PlayerStatus {
        if self.is_invincible {
            PlayerStatus::Invincible
        } else if self.has_powerup {
            PlayerStatus::Boosted
        } else {
            PlayerStatus::Normal
        }
    }

    /// Move without clamping, keeping the box in sync
    pub fn set_position(&mut self, position: Position) {
        self.position = position;
        self.bbox = BoundingBox::new(position, self.size);
    }

    /// Fill the powerup slot, replacing whatever was there
    pub fn apply_powerup(&mut self, kind: PowerupKind) {
        self.has_powerup = true;
        self.powerup_timer = self.powerup_duration;
        match kind {
            PowerupKind::SpeedBoost => {
                self.speed = self.base_speed * 2;
                self.is_invincible = false;
            }
            PowerupKind::Invincibility => {
                self.speed = self.base_speed;
                self.is_invincible = true;
            }
        }
    }

    /// Advance the powerup timer, then move and clamp.
    ///
    /// Returns true if the active powerup ran out this frame.
    pub fn update(&mut self, input: &TickInput) -> bool {
        let mut expired = false;
        if self.has_powerup {
            self.powerup_timer = self.powerup_timer.saturating_sub(1);
            if self.powerup_timer == 0 {
                self.has_powerup = false;
                self.is_invincible = false;
                self.speed = self.base_speed;
                expired = true;
            }
        }

        // Axes are independent: diagonals cover sqrt(2) more ground
        let mut pos = self.position;
        if input.left {
            pos.x -= self.speed;
        }
        if input.right {
            pos.x += self.speed;
        }
        if input.up {
            pos.y -= self.speed;
        }
        if input.down {
            pos.y += self.speed;
        }
        pos.x = pos.x.clamp(self.x_range.0, self.x_range.1);
        pos.y = pos.y.clamp(self.y_range.0, self.y_range.1);

        self.set_position(pos);
        expired
    }
}
