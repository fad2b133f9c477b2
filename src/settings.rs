//! Host preferences
//!
//! Read from an optional JSON file; nothing here changes gameplay.

use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::consts::FRAME_RATE;

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Frames per second the host paces `tick` at
    pub frame_rate: u32,

    // === Audio ===
    /// Play sound cues
    pub sound: bool,
    /// Master volume (0.0 - 1.0)
    pub volume: f32,

    // === Terminal input ===
    /// A key counts as held for this many frames after its last press/repeat
    /// event (terminals rarely report key releases)
    pub key_hold_frames: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            frame_rate: FRAME_RATE,
            sound: true,
            volume: 0.8,
            key_hold_frames: 4,
        }
    }
}

impl Settings {
    /// Load settings from a JSON file, or defaults when no path is given
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let Some(path) = path else {
            log::info!("Using default settings");
            return Ok(Self::default());
        };
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("reading settings {}", path.display()))?;
        let settings: Settings = serde_json::from_str(&json)
            .with_context(|| format!("parsing settings {}", path.display()))?;
        log::info!("Loaded settings from {}", path.display());
        Ok(settings.sanitized())
    }

    /// Clamp out-of-range values instead of rejecting the file
    pub fn sanitized(mut self) -> Self {
        if self.frame_rate == 0 {
            log::warn!("frame_rate 0 is not usable, falling back to {}", FRAME_RATE);
            self.frame_rate = FRAME_RATE;
        }
        self.volume = self.volume.clamp(0.0, 1.0);
        self.key_hold_frames = self.key_hold_frames.max(1);
        self
    }

    pub fn frame_duration(&self) -> std::time::Duration {
        std::time::Duration::from_secs_f64(1.0 / self.frame_rate as f64)
    }
}
