//! Terminal backend on crossterm
//!
//! The arena is scaled onto the terminal's character grid, one colored cell
//! per grid position. Input comes from crossterm's event queue, translated to
//! semantic `InputEvent`s.
//!
//! Terminals only report key releases when they support the keyboard
//! enhancement protocol (kitty, Ghostty, ...). Elsewhere a key counts as held
//! while it keeps auto-repeating, and a release is synthesised once it has
//! been silent for longer than its repeat window.

use std::collections::HashMap;
use std::io::{self, Write};
use std::time::{Duration, Instant};

use crossterm::{
    ExecutableCommand, QueueableCommand, cursor,
    event::{
        self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, KeyboardEnhancementFlags,
        PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
    },
    style::{self, Color, Print},
    terminal,
};
use glam::Vec2;

use super::EventSource;
use crate::consts::{ARENA_HEIGHT, ARENA_WIDTH};
use crate::input::{InputEvent, Key};
use crate::renderer::{Canvas, Rgb};
use crate::sim::Rect;

/// Silence after a press before the first auto-repeat. OS repeat delays run
/// from about 250 ms up to 660 ms.
const FIRST_REPEAT_WINDOW: Duration = Duration::from_millis(700);
/// Silence between auto-repeats. OS repeat runs at 15 Hz or faster.
const HOLD_WINDOW: Duration = Duration::from_millis(150);

/// A key that is down, as far as the terminal has told us
#[derive(Debug, Clone, Copy)]
struct HeldKey {
    last_seen: Instant,
    repeating: bool,
}

impl HeldKey {
    fn window(&self) -> Duration {
        if self.repeating {
            HOLD_WINDOW
        } else {
            FIRST_REPEAT_WINDOW
        }
    }
}

/// Raw mode + alternate screen for the lifetime of the value
pub struct TerminalSession {
    keyboard_enhanced: bool,
}

impl TerminalSession {
    pub fn enter<W: Write>(out: &mut W) -> io::Result<Self> {
        terminal::enable_raw_mode()?;
        out.execute(terminal::EnterAlternateScreen)?;
        out.execute(cursor::Hide)?;

        // Request key-release (and key-repeat) events where supported
        let keyboard_enhanced = terminal::supports_keyboard_enhancement().unwrap_or(false)
            && out
                .execute(PushKeyboardEnhancementFlags(
                    KeyboardEnhancementFlags::REPORT_EVENT_TYPES,
                ))
                .is_ok();
        log::debug!("Keyboard enhancement: {}", keyboard_enhanced);

        Ok(Self { keyboard_enhanced })
    }

    pub fn keyboard_enhanced(&self) -> bool {
        self.keyboard_enhanced
    }
}

impl Drop for TerminalSession {
    fn drop(&mut self) {
        let mut out = io::stdout();
        if self.keyboard_enhanced {
            let _ = out.execute(PopKeyboardEnhancementFlags);
        }
        let _ = out.execute(cursor::Show);
        let _ = out.execute(terminal::LeaveAlternateScreen);
        let _ = terminal::disable_raw_mode();
    }
}

/// Map a physical key to a game key
pub fn map_key(code: KeyCode) -> Option<Key> {
    match code {
        KeyCode::Up | KeyCode::Char('w') | KeyCode::Char('W') => Some(Key::Up),
        KeyCode::Down | KeyCode::Char('s') | KeyCode::Char('S') => Some(Key::Down),
        KeyCode::Left | KeyCode::Char('a') | KeyCode::Char('A') => Some(Key::Left),
        KeyCode::Right | KeyCode::Char('d') | KeyCode::Char('D') => Some(Key::Right),
        KeyCode::Char(' ') => Some(Key::Hold),
        KeyCode::Char('r') | KeyCode::Char('R') => Some(Key::Restart),
        KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => Some(Key::Quit),
        _ => None,
    }
}

/// `EventSource` reading crossterm's queue without blocking
#[derive(Debug)]
pub struct TerminalEvents {
    keyboard_enhanced: bool,
    /// Keys currently down
    held: HashMap<Key, HeldKey>,
}

impl TerminalEvents {
    pub fn new(keyboard_enhanced: bool) -> Self {
        Self {
            keyboard_enhanced,
            held: HashMap::new(),
        }
    }

    /// Translate one crossterm key event
    pub fn translate(&mut self, key_event: KeyEvent, now: Instant) -> Option<InputEvent> {
        let KeyEvent {
            code,
            kind,
            modifiers,
            ..
        } = key_event;

        if modifiers.contains(KeyModifiers::CONTROL) && matches!(code, KeyCode::Char('c')) {
            return Some(InputEvent::QuitRequest);
        }

        let key = map_key(code)?;
        match kind {
            KeyEventKind::Press | KeyEventKind::Repeat => {
                // Without enhancement, auto-repeats arrive as further presses
                let repeating = kind == KeyEventKind::Repeat || self.held.contains_key(&key);
                self.held.insert(
                    key,
                    HeldKey {
                        last_seen: now,
                        repeating,
                    },
                );
                Some(InputEvent::KeyDown(key))
            }
            KeyEventKind::Release => {
                self.held.remove(&key);
                Some(InputEvent::KeyUp(key))
            }
        }
    }

    /// Releases for keys that went quiet, on terminals without release events
    pub fn expire_stale(&mut self, now: Instant) -> Vec<InputEvent> {
        if self.keyboard_enhanced {
            return Vec::new();
        }
        let stale: Vec<Key> = self
            .held
            .iter()
            .filter(|(_, held)| now.duration_since(held.last_seen) > held.window())
            .map(|(key, _)| *key)
            .collect();
        stale
            .into_iter()
            .map(|key| {
                self.held.remove(&key);
                InputEvent::KeyUp(key)
            })
            .collect()
    }
}

impl EventSource for TerminalEvents {
    fn poll_events(&mut self) -> io::Result<Vec<InputEvent>> {
        let mut events = Vec::new();
        while event::poll(Duration::ZERO)? {
            if let Event::Key(key_event) = event::read()? {
                if let Some(ev) = self.translate(key_event, Instant::now()) {
                    events.push(ev);
                }
            }
        }
        events.extend(self.expire_stale(Instant::now()));
        Ok(events)
    }
}

/// Character-cell canvas
pub struct TerminalCanvas<W: Write> {
    out: W,
    cols: u16,
    rows: u16,
    cells: Vec<Rgb>,
}

impl<W: Write> TerminalCanvas<W> {
    pub fn new(out: W, cols: u16, rows: u16) -> Self {
        let mut canvas = Self {
            out,
            cols: 0,
            rows: 0,
            cells: Vec::new(),
        };
        canvas.resize(cols, rows);
        canvas
    }

    /// Canvas filling the current terminal
    pub fn fullscreen(out: W) -> io::Result<Self> {
        let (cols, rows) = terminal::size()?;
        Ok(Self::new(out, cols, rows))
    }

    pub fn resize(&mut self, cols: u16, rows: u16) {
        self.cols = cols.max(1);
        self.rows = rows.max(1);
        self.cells = vec![Rgb::BLACK; self.cols as usize * self.rows as usize];
    }

    /// Color at a grid position
    pub fn cell(&self, col: u16, row: u16) -> Option<Rgb> {
        if col >= self.cols || row >= self.rows {
            return None;
        }
        Some(self.cells[row as usize * self.cols as usize + col as usize])
    }

    /// Arena units per cell
    fn cell_size(&self) -> Vec2 {
        Vec2::new(ARENA_WIDTH / self.cols as f32, ARENA_HEIGHT / self.rows as f32)
    }

    fn cell_center(&self, col: u16, row: u16) -> Vec2 {
        (Vec2::new(col as f32, row as f32) + Vec2::splat(0.5)) * self.cell_size()
    }

    fn cell_at(&self, point: Vec2) -> Option<(u16, u16)> {
        let grid = (point / self.cell_size()).floor();
        let (cols, rows) = (self.cols as f32, self.rows as f32);
        if grid.x < 0.0 || grid.y < 0.0 || grid.x >= cols || grid.y >= rows {
            return None;
        }
        Some((grid.x as u16, grid.y as u16))
    }

    fn set(&mut self, col: u16, row: u16, color: Rgb) {
        let idx = row as usize * self.cols as usize + col as usize;
        self.cells[idx] = color;
    }

    /// Paint every cell whose center passes `inside`, and always the cell
    /// under `anchor` so sub-cell shapes stay visible.
    fn paint(&mut self, anchor: Vec2, color: Rgb, inside: impl Fn(Vec2) -> bool) {
        for row in 0..self.rows {
            for col in 0..self.cols {
                if inside(self.cell_center(col, row)) {
                    self.set(col, row, color);
                }
            }
        }
        if let Some((col, row)) = self.cell_at(anchor) {
            self.set(col, row, color);
        }
    }
}

impl<W: Write> Canvas for TerminalCanvas<W> {
    fn clear(&mut self, color: Rgb) {
        if let Ok((cols, rows)) = terminal::size() {
            if cols != self.cols || rows != self.rows {
                self.resize(cols, rows);
            }
        }
        self.cells.fill(color);
    }

    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Rgb) {
        self.paint(center, color, |p| p.distance(center) <= radius);
    }

    fn stroke_circle(&mut self, center: Vec2, radius: f32, color: Rgb) {
        let band = self.cell_size().max_element() / 2.0;
        self.paint(center + Vec2::new(radius, 0.0), color, |p| {
            (p.distance(center) - radius).abs() <= band
        });
    }

    fn fill_rect(&mut self, rect: &Rect, color: Rgb) {
        let rect = *rect;
        self.paint(rect.center, color, |p| rect.contains_point(p));
    }

    fn stroke_rect(&mut self, rect: &Rect, color: Rgb) {
        let half_cell = self.cell_size() / 2.0;
        let outer = Rect::from_center(rect.center, rect.size + half_cell * 2.0);
        let inner = Rect::from_center(rect.center, rect.size - half_cell * 2.0);
        let anchor = Vec2::new(rect.left(), rect.center.y);
        self.paint(anchor, color, |p| {
            outer.contains_point(p) && !(inner.size.min_element() > 0.0 && inner.contains_point(p))
        });
    }

    fn present(&mut self) -> io::Result<()> {
        let mut current: Option<Rgb> = None;
        for row in 0..self.rows {
            self.out.queue(cursor::MoveTo(0, row))?;
            let mut run = String::new();
            for col in 0..self.cols {
                let color = self.cells[row as usize * self.cols as usize + col as usize];
                if current != Some(color) {
                    if !run.is_empty() {
                        self.out.queue(Print(std::mem::take(&mut run)))?;
                    }
                    let Rgb(r, g, b) = color;
                    self.out
                        .queue(style::SetBackgroundColor(Color::Rgb { r, g, b }))?;
                    current = Some(color);
                }
                run.push(' ');
            }
            if !run.is_empty() {
                self.out.queue(Print(run))?;
            }
        }
        self.out.queue(style::ResetColor)?;
        self.out.flush()
    }
}
