//! Crossterm host
//!
//! Draws the 240x160 play field as a character grid, one cell per 4x8 pixels,
//! and reads the keyboard without blocking. Most terminals never report key
//! releases, so a key counts as held until `key_hold_frames` frames pass
//! without a press or repeat event for it.

use std::collections::{BTreeMap, HashMap};
use std::io::{BufWriter, Stdout, Write, stdout};
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use crossterm::{
    ExecutableCommand, QueueableCommand, cursor,
    event::{
        self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, KeyboardEnhancementFlags,
        PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
    },
    style::{self, Color, Print},
    terminal,
};

use super::{FramePump, Host, InputSource, SpriteKey, SpriteKind, SpriteLayer, TextRenderer, VisualHandle};
use crate::audio::{AudioSink, SoundEffect};
use crate::config::Screen;
use crate::settings::Settings;
use crate::sim::{Color555, PowerupKind, TickInput, backdrop};

/// Pixels per character cell
const CELL_WIDTH: i32 = 4;
const CELL_HEIGHT: i32 = 8;

const HELP: &str = "arrows/WASD move  Z/J: A  X/K: B  I: idle  Q: quit";

#[derive(Debug, Clone, Copy, Default)]
struct CellSprite {
    x: i32,
    y: i32,
}

impl VisualHandle for CellSprite {
    fn set_position(&mut self, x: i32, y: i32) {
        self.x = x;
        self.y = y;
    }
}

fn glyph(kind: SpriteKind) -> (char, Color) {
    match kind {
        SpriteKind::Player => ('@', Color::White),
        SpriteKind::Enemy => ('E', Color::Red),
        SpriteKind::Powerup(PowerupKind::SpeedBoost) => ('S', Color::Yellow),
        SpriteKind::Powerup(PowerupKind::Invincibility) => ('I', Color::Cyan),
    }
}

fn to_color(color: Color555) -> Color {
    let (r, g, b) = color.to_rgb888();
    Color::Rgb { r, g, b }
}

pub struct TerminalHost {
    out: BufWriter<Stdout>,
    screen: Screen,
    columns: usize,
    rows: usize,

    /// Last frame each key was seen pressed or repeating
    key_frame: HashMap<KeyCode, u64>,
    hold_frames: u64,
    frame: u64,
    a_pressed: bool,
    b_pressed: bool,
    idle_mode: bool,
    quit: bool,
    keyboard_enhanced: bool,

    frame_duration: Duration,
    frame_start: Instant,

    sprites: BTreeMap<SpriteKey, CellSprite>,
    numbers: Vec<(u64, i32, i32)>,
    backdrop: Color,
    bell: bool,
}

impl TerminalHost {
    /// Take over the terminal. It is restored when the host is dropped.
    pub fn new(settings: &Settings, screen: Screen, idle_mode: bool) -> Result<Self> {
        let mut out = BufWriter::new(stdout());
        terminal::enable_raw_mode().context("enabling raw mode")?;
        out.execute(terminal::EnterAlternateScreen)?;
        out.execute(cursor::Hide)?;

        // Only some terminals accept this; without it releases never arrive
        let keyboard_enhanced = out
            .execute(PushKeyboardEnhancementFlags(
                KeyboardEnhancementFlags::REPORT_EVENT_TYPES,
            ))
            .is_ok();
        log::debug!("Keyboard enhancement: {}", keyboard_enhanced);

        Ok(Self {
            out,
            screen,
            columns: (screen.width / CELL_WIDTH).max(1) as usize,
            rows: (screen.height / CELL_HEIGHT).max(1) as usize,
            key_frame: HashMap::new(),
            hold_frames: settings.key_hold_frames,
            frame: 0,
            a_pressed: false,
            b_pressed: false,
            idle_mode,
            quit: false,
            keyboard_enhanced,
            frame_duration: settings.frame_duration(),
            frame_start: Instant::now(),
            sprites: BTreeMap::new(),
            numbers: Vec::new(),
            backdrop: to_color(backdrop::START),
            bell: false,
        })
    }

    /// Screen pixel to (column, row), clamped to the grid
    fn cell(&self, x: i32, y: i32) -> (usize, usize) {
        let col = ((x - self.screen.min_x()) / CELL_WIDTH).clamp(0, self.columns as i32 - 1);
        let row = ((y - self.screen.min_y()) / CELL_HEIGHT).clamp(0, self.rows as i32 - 1);
        (col as usize, row as usize)
    }

    fn is_held(&self, key: KeyCode) -> bool {
        self.key_frame
            .get(&key)
            .is_some_and(|&last| self.frame.saturating_sub(last) <= self.hold_frames)
    }

    fn any_held(&self, keys: &[KeyCode]) -> bool {
        keys.iter().any(|&key| self.is_held(key))
    }

    fn handle_key(&mut self, key: KeyEvent) {
        let code = match key.code {
            KeyCode::Char(c) => KeyCode::Char(c.to_ascii_lowercase()),
            other => other,
        };
        match key.kind {
            KeyEventKind::Press => {
                self.key_frame.insert(code, self.frame);
                match code {
                    KeyCode::Char('q') | KeyCode::Esc => self.quit = true,
                    KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                        self.quit = true
                    }
                    KeyCode::Char('z') | KeyCode::Char('j') => self.a_pressed = true,
                    KeyCode::Char('x') | KeyCode::Char('k') => self.b_pressed = true,
                    KeyCode::Char('i') => {
                        self.idle_mode = !self.idle_mode;
                        log::info!("Idle mode {}", if self.idle_mode { "on" } else { "off" });
                    }
                    _ => {}
                }
            }
            KeyEventKind::Repeat => {
                self.key_frame.insert(code, self.frame);
            }
            KeyEventKind::Release => {
                self.key_frame.remove(&code);
            }
        }
    }

    fn render(&mut self) -> Result<()> {
        let mut grid = vec![vec![(' ', Color::White); self.columns]; self.rows];

        for (key, sprite) in &self.sprites {
            let (col, row) = self.cell(sprite.x, sprite.y);
            grid[row][col] = glyph(key.kind);
        }
        for &(value, x, y) in &self.numbers {
            let (col, row) = self.cell(x, y);
            for (i, digit) in value.to_string().chars().enumerate() {
                if let Some(cell) = grid[row].get_mut(col + i) {
                    *cell = (digit, Color::White);
                }
            }
        }

        self.out.queue(style::SetBackgroundColor(self.backdrop))?;
        for (row, cells) in grid.iter().enumerate() {
            self.out.queue(cursor::MoveTo(0, row as u16))?;
            for &(ch, color) in cells {
                self.out.queue(style::SetForegroundColor(color))?;
                self.out.queue(Print(ch))?;
            }
        }
        self.out.queue(style::ResetColor)?;
        self.out.queue(cursor::MoveTo(0, self.rows as u16))?;
        self.out.queue(style::SetForegroundColor(Color::DarkGrey))?;
        let mode = if self.idle_mode { "  [idle]" } else { "" };
        self.out.queue(Print(format!("{HELP}{mode}")))?;
        self.out.queue(terminal::Clear(terminal::ClearType::UntilNewLine))?;
        self.out.queue(style::ResetColor)?;

        if std::mem::take(&mut self.bell) {
            self.out.queue(Print('\x07'))?;
        }
        self.out.flush()?;
        Ok(())
    }
}

impl Drop for TerminalHost {
    fn drop(&mut self) {
        if self.keyboard_enhanced {
            let _ = self.out.execute(PopKeyboardEnhancementFlags);
        }
        let _ = self.out.execute(style::ResetColor);
        let _ = self.out.execute(cursor::Show);
        let _ = self.out.execute(terminal::LeaveAlternateScreen);
        let _ = terminal::disable_raw_mode();
    }
}

impl FramePump for TerminalHost {
    fn wait_frame(&mut self) -> Result<()> {
        self.render()?;
        self.numbers.clear();

        let elapsed = self.frame_start.elapsed();
        if elapsed < self.frame_duration {
            std::thread::sleep(self.frame_duration - elapsed);
        }
        self.frame_start = Instant::now();
        Ok(())
    }
}

impl InputSource for TerminalHost {
    fn poll(&mut self) -> Result<TickInput> {
        self.frame += 1;
        self.a_pressed = false;
        self.b_pressed = false;

        while event::poll(Duration::ZERO)? {
            if let Event::Key(key) = event::read()? {
                self.handle_key(key);
            }
        }

        Ok(TickInput {
            up: self.any_held(&[KeyCode::Up, KeyCode::Char('w')]),
            down: self.any_held(&[KeyCode::Down, KeyCode::Char('s')]),
            left: self.any_held(&[KeyCode::Left, KeyCode::Char('a')]),
            right: self.any_held(&[KeyCode::Right, KeyCode::Char('d')]),
            a_pressed: self.a_pressed,
            b_pressed: self.b_pressed,
            idle_mode: self.idle_mode,
        })
    }

    fn shutdown_requested(&self) -> bool {
        self.quit
    }
}

impl SpriteLayer for TerminalHost {
    fn sprite(&mut self, key: SpriteKey) -> &mut dyn VisualHandle {
        self.sprites.entry(key).or_default()
    }

    fn release(&mut self, key: SpriteKey) {
        self.sprites.remove(&key);
    }
}

impl TextRenderer for TerminalHost {
    fn draw_number(&mut self, value: u64, x: i32, y: i32) {
        self.numbers.push((value, x, y));
    }
}

impl AudioSink for TerminalHost {
    /// The terminal bell is the only speaker available
    fn play(&mut self, effect: SoundEffect, volume: f32) {
        if volume > 0.0 && matches!(effect, SoundEffect::Caught | SoundEffect::HighScore) {
            self.bell = true;
        }
    }
}

impl Host for TerminalHost {
    fn set_backdrop(&mut self, color: Color555) {
        self.backdrop = to_color(color);
    }
}
