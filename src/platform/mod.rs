//! Platform abstraction layer
//!
//! The simulation never talks to a screen, keyboard or speaker directly.
//! A host implements the narrow traits below and `run` drives the frame loop:
//! - Frame pacing (`FramePump`)
//! - Input (`InputSource`)
//! - Sprites and HUD numbers (`SpriteLayer`, `VisualHandle`, `TextRenderer`)
//! - Sound cues (`AudioSink`)

pub mod headless;
pub mod terminal;

use anyhow::Result;

use crate::audio::{AudioManager, AudioSink};
use crate::sim::{Color555, GameEvent, GameState, PowerupKind, TickInput, tick};

/// Blocks until the next frame boundary and flips buffered output
pub trait FramePump {
    fn wait_frame(&mut self) -> Result<()>;
}

/// Per-frame input queries
pub trait InputSource {
    /// Sample held directions and buttons pressed since the last poll
    fn poll(&mut self) -> Result<TickInput>;

    /// Host wants the loop to stop (window closed, quit key, ...)
    fn shutdown_requested(&self) -> bool {
        false
    }
}

/// What a sprite depicts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum SpriteKind {
    Player,
    Enemy,
    Powerup(PowerupKind),
}

/// Identifies one host-owned drawable
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SpriteKey {
    pub kind: SpriteKind,
    pub id: u32,
}

impl SpriteKey {
    pub const PLAYER: SpriteKey = SpriteKey {
        kind: SpriteKind::Player,
        id: 0,
    };

    pub const fn new(kind: SpriteKind, id: u32) -> Self {
        Self { kind, id }
    }
}

/// Opaque drawable bound to a screen position
pub trait VisualHandle {
    fn set_position(&mut self, x: i32, y: i32);
}

/// Creates, hands out and destroys drawables. The simulation only borrows them.
pub trait SpriteLayer {
    /// Handle for `key`, created on first use
    fn sprite(&mut self, key: SpriteKey) -> &mut dyn VisualHandle;

    /// Drop the handle for `key` if it exists
    fn release(&mut self, key: SpriteKey);
}

/// Draws a number at a screen position for the current frame
pub trait TextRenderer {
    fn draw_number(&mut self, value: u64, x: i32, y: i32);
}

/// Everything `run` needs from a host
pub trait Host: FramePump + InputSource + SpriteLayer + TextRenderer + AudioSink {
    fn set_backdrop(&mut self, color: Color555);
}

/// Totals reported when the loop stops
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub frames: u64,
    pub catches: u64,
    pub powerups_collected: u64,
    pub high_score: u64,
}

impl RunSummary {
    fn record(&mut self, events: &[GameEvent]) {
        for event in events {
            match event {
                GameEvent::PlayerCaught { .. } => self.catches += 1,
                GameEvent::PowerupCollected { .. } => self.powerups_collected += 1,
                _ => {}
            }
        }
    }
}

/// Mirrors simulation state onto host drawables
#[derive(Debug, Default)]
pub struct Presenter {
    /// Powerup sprites handed out last frame
    shown: Vec<SpriteKey>,
    started: bool,
}

impl Presenter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn present<H: Host + ?Sized>(&mut self, state: &GameState, host: &mut H) {
        if !self.started {
            host.set_backdrop(state.backdrop);
            self.started = true;
        }

        let player = state.player.position();
        host.sprite(SpriteKey::PLAYER)
            .set_position(player.x.round_integer(), player.y.round_integer());

        for enemy in &state.enemies {
            let pos = enemy.position();
            host.sprite(SpriteKey::new(SpriteKind::Enemy, enemy.id()))
                .set_position(pos.x.round_integer(), pos.y.round_integer());
        }

        let current: Vec<SpriteKey> = state
            .powerups
            .iter()
            .map(|p| SpriteKey::new(SpriteKind::Powerup(p.kind()), p.id()))
            .collect();
        for key in &self.shown {
            if !current.contains(key) {
                host.release(*key);
            }
        }
        for (key, powerup) in current.iter().zip(&state.powerups) {
            let pos = powerup.position();
            host.sprite(*key)
                .set_position(pos.x.round_integer(), pos.y.round_integer());
        }
        self.shown = current;

        let hud = state.config.hud;
        host.draw_number(state.score.score(), hud.score.0, hud.score.1);
        host.draw_number(state.score.high_score(), hud.high_score.0, hud.high_score.1);
    }
}

/// Drive the game until the host asks to stop or a host call fails.
///
/// Each iteration: poll input, tick, fire audio cues, present, wait for the
/// next frame. `max_frames` bounds headless runs.
pub fn run<H: Host + ?Sized>(
    state: &mut GameState,
    host: &mut H,
    audio: &AudioManager,
    max_frames: Option<u64>,
) -> Result<RunSummary> {
    let mut presenter = Presenter::new();
    let mut summary = RunSummary::default();

    log::info!("Frame loop starting at frame {}", state.frame);
    loop {
        if host.shutdown_requested() {
            log::info!("Host requested shutdown");
            break;
        }
        if max_frames.is_some_and(|max| summary.frames >= max) {
            break;
        }

        let input = host.poll()?;
        let result = tick(state, &input);
        summary.frames += 1;
        summary.record(&result.events);

        for event in &result.events {
            if let GameEvent::BackdropChanged { color } = event {
                host.set_backdrop(*color);
            }
        }
        audio.play_events(&result.events, host);
        presenter.present(state, host);
        host.wait_frame()?;
    }

    summary.high_score = state.score.high_score();
    log::info!(
        "Stopped after {} frames: {} catches, {} powerups, high score {}",
        summary.frames,
        summary.catches,
        summary.powerups_collected,
        summary.high_score
    );
    Ok(summary)
}
