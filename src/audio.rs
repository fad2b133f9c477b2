//! Sound cue routing
//!
//! The simulation reports events; this module turns them into fire-and-forget
//! cues for whatever sink the host provides.

use crate::settings::Settings;
use crate::sim::GameEvent;

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SoundEffect {
    /// Enemy caught a vulnerable player
    Caught,
    /// Enemy bounced off an invincible player
    Deflect,
    /// Powerup collected
    PowerupCollect,
    /// Powerup appeared
    PowerupSpawn,
    /// Active effect wore off
    PowerupEnd,
    /// Score passed the previous best
    HighScore,
}

impl SoundEffect {
    /// Cues to play for a frame's events, in event order.
    ///
    /// A catch is reported as a teleport followed by the catch itself; only
    /// the catch sounds, an uncaught teleport sounds as a deflect.
    pub fn for_events(events: &[GameEvent]) -> Vec<SoundEffect> {
        let mut cues = Vec::new();
        for (i, event) in events.iter().enumerate() {
            let cue = match event {
                GameEvent::PlayerCaught { .. } => Some(SoundEffect::Caught),
                GameEvent::EnemyTeleported { enemy_id, .. } => {
                    let caught = matches!(
                        events.get(i + 1),
                        Some(GameEvent::PlayerCaught { enemy_id: id }) if id == enemy_id
                    );
                    (!caught).then_some(SoundEffect::Deflect)
                }
                GameEvent::PowerupCollected { .. } => Some(SoundEffect::PowerupCollect),
                GameEvent::PowerupSpawned { .. } => Some(SoundEffect::PowerupSpawn),
                GameEvent::PowerupEnded => Some(SoundEffect::PowerupEnd),
                GameEvent::NewHighScore { .. } => Some(SoundEffect::HighScore),
                GameEvent::PowerupExpired { .. } | GameEvent::BackdropChanged { .. } => None,
            };
            cues.extend(cue);
        }
        cues
    }
}

/// Host-side playback; no acknowledgement, no ordering guarantee
pub trait AudioSink {
    fn play(&mut self, effect: SoundEffect, volume: f32);
}

/// Audio manager for the game
#[derive(Debug, Clone)]
pub struct AudioManager {
    master_volume: f32,
    muted: bool,
}

impl Default for AudioManager {
    fn default() -> Self {
        Self::new()
    }
}

impl AudioManager {
    pub fn new() -> Self {
        Self {
            master_volume: 0.8,
            muted: false,
        }
    }

    pub fn from_settings(settings: &Settings) -> Self {
        Self {
            master_volume: settings.volume.clamp(0.0, 1.0),
            muted: !settings.sound,
        }
    }

    /// Set master volume (0.0 - 1.0)
    pub fn set_master_volume(&mut self, vol: f32) {
        self.master_volume = vol.clamp(0.0, 1.0);
    }

    /// Mute/unmute all audio
    pub fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
    }

    /// Get effective volume
    fn effective_volume(&self) -> f32 {
        if self.muted { 0.0 } else { self.master_volume }
    }

    /// Play the cues for a frame's events; returns how many were sent
    pub fn play_events<S: AudioSink + ?Sized>(&self, events: &[GameEvent], sink: &mut S) -> usize {
        let vol = self.effective_volume();
        if vol <= 0.0 {
            return 0;
        }
        let cues = SoundEffect::for_events(events);
        for cue in &cues {
            sink.play(*cue, vol);
        }
        cues.len()
    }
}
