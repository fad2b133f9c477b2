//! Host with no screen, keyboard or speaker
//!
//! Feeds a fixed or scripted input stream and records what the loop asked
//! it to show. Used by `evade --headless` and by the tests.

use std::collections::{BTreeMap, VecDeque};

use anyhow::Result;

use super::{FramePump, Host, InputSource, SpriteKey, SpriteLayer, TextRenderer, VisualHandle};
use crate::audio::{AudioSink, SoundEffect};
use crate::sim::{Color555, TickInput};

/// Last position a headless sprite was set to
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RecordedSprite {
    pub x: i32,
    pub y: i32,
}

impl VisualHandle for RecordedSprite {
    fn set_position(&mut self, x: i32, y: i32) {
        self.x = x;
        self.y = y;
    }
}

#[derive(Debug, Default)]
pub struct HeadlessHost {
    /// Played in order, then `fallback` forever
    script: VecDeque<TickInput>,
    fallback: TickInput,
    pub sprites: BTreeMap<SpriteKey, RecordedSprite>,
    /// Numbers drawn during the current frame, as (value, x, y)
    pub numbers: Vec<(u64, i32, i32)>,
    pending_numbers: Vec<(u64, i32, i32)>,
    pub cues: Vec<SoundEffect>,
    pub backdrop: Option<Color555>,
    pub frames: u64,
}

impl HeadlessHost {
    /// Same input every frame
    pub fn new(input: TickInput) -> Self {
        Self {
            fallback: input,
            ..Default::default()
        }
    }

    /// Scripted frames first, then `fallback`
    pub fn scripted(script: impl IntoIterator<Item = TickInput>, fallback: TickInput) -> Self {
        Self {
            script: script.into_iter().collect(),
            fallback,
            ..Default::default()
        }
    }
}

impl FramePump for HeadlessHost {
    fn wait_frame(&mut self) -> Result<()> {
        self.numbers = std::mem::take(&mut self.pending_numbers);
        self.frames += 1;
        Ok(())
    }
}

impl InputSource for HeadlessHost {
    fn poll(&mut self) -> Result<TickInput> {
        Ok(self.script.pop_front().unwrap_or(self.fallback))
    }
}

impl SpriteLayer for HeadlessHost {
    fn sprite(&mut self, key: SpriteKey) -> &mut dyn VisualHandle {
        self.sprites.entry(key).or_default()
    }

    fn release(&mut self, key: SpriteKey) {
        self.sprites.remove(&key);
    }
}

impl TextRenderer for HeadlessHost {
    fn draw_number(&mut self, value: u64, x: i32, y: i32) {
        self.pending_numbers.push((value, x, y));
    }
}

impl AudioSink for HeadlessHost {
    fn play(&mut self, effect: SoundEffect, _volume: f32) {
        self.cues.push(effect);
    }
}

impl Host for HeadlessHost {
    fn set_backdrop(&mut self, color: Color555) {
        self.backdrop = Some(color);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audio::AudioManager;
    use crate::config::WorldConfig;
    use crate::platform::{SpriteKind, run};
    use crate::sim::{GameState, PowerupKind, Position, backdrop};

    #[test]
    fn test_run_stops_at_frame_limit() {
        let mut state = GameState::new(WorldConfig::default());
        let mut host = HeadlessHost::new(TickInput::default());
        let summary = run(&mut state, &mut host, &AudioManager::new(), Some(25)).unwrap();
        assert_eq!(summary.frames, 25);
        assert_eq!(host.frames, 25);
        assert_eq!(state.frame, 25);
    }

    #[test]
    fn test_presents_every_entity() {
        let mut state = GameState::new(WorldConfig::default());
        let mut host = HeadlessHost::new(TickInput::default());
        run(&mut state, &mut host, &AudioManager::new(), Some(1)).unwrap();

        let player = host.sprites[&SpriteKey::PLAYER];
        let pos = state.player.position();
        assert_eq!((player.x, player.y), (pos.x.round_integer(), pos.y.round_integer()));
        for enemy in &state.enemies {
            assert!(host.sprites.contains_key(&SpriteKey::new(SpriteKind::Enemy, enemy.id())));
        }
        assert_eq!(host.sprites.len(), 1 + state.enemies.len());
        assert_eq!(host.numbers, vec![(1, 70, -70), (1, -70, -70)]);
        assert_eq!(host.backdrop, Some(backdrop::START));
    }

    #[test]
    fn test_collected_powerup_sprite_is_released() {
        let mut state = GameState::new(WorldConfig::default());
        // Right in the player's path: reached on frame 6 at 1.5 px/frame
        let id = state.add_powerup(PowerupKind::Invincibility, Position::from_ints(60, 22));
        let key = SpriteKey::new(SpriteKind::Powerup(PowerupKind::Invincibility), id);

        let right = TickInput {
            right: true,
            ..Default::default()
        };
        let mut host = HeadlessHost::scripted(std::iter::repeat_n(right, 5), TickInput::default());
        let audio = AudioManager::new();
        run(&mut state, &mut host, &audio, Some(5)).unwrap();
        assert!(host.sprites.contains_key(&key));
        assert!(!state.player.has_powerup());

        let mut host = HeadlessHost::new(right);
        let mut presenter = crate::platform::Presenter::new();
        presenter.present(&state, &mut host);
        assert!(host.sprites.contains_key(&key));

        let result = crate::sim::tick(&mut state, &right);
        presenter.present(&state, &mut host);
        assert!(state.player.is_invincible());
        assert!(!host.sprites.contains_key(&key));
        assert_eq!(audio.play_events(&result.events, &mut host), 1);
        assert_eq!(host.cues, vec![SoundEffect::PowerupCollect]);
    }

    #[test]
    fn test_sprite_keys_sort_by_kind_then_id() {
        let mut host = HeadlessHost::default();
        host.sprite(SpriteKey::new(SpriteKind::Powerup(PowerupKind::Invincibility), 5));
        host.sprite(SpriteKey::new(SpriteKind::Powerup(PowerupKind::SpeedBoost), 9));
        host.sprite(SpriteKey::new(SpriteKind::Enemy, 2));
        host.sprite(SpriteKey::PLAYER);

        let kinds: Vec<SpriteKind> = host.sprites.keys().map(|k| k.kind).collect();
        assert_eq!(
            kinds,
            vec![
                SpriteKind::Player,
                SpriteKind::Enemy,
                SpriteKind::Powerup(PowerupKind::SpeedBoost),
                SpriteKind::Powerup(PowerupKind::Invincibility),
            ]
        );
    }

    #[test]
    fn test_scripted_buttons_change_backdrop() {
        let press_b = TickInput {
            b_pressed: true,
            ..Default::default()
        };
        let mut state = GameState::new(WorldConfig::default());
        let mut host = HeadlessHost::scripted([TickInput::default(), press_b], TickInput::default());
        run(&mut state, &mut host, &AudioManager::new(), Some(3)).unwrap();
        assert_eq!(host.backdrop, Some(backdrop::B_PRESSED));
        assert_eq!(state.backdrop, backdrop::B_PRESSED);
    }
}
