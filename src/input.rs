//! Semantic input events and the per-frame input state derived from them

use glam::IVec2;
use serde::{Deserialize, Serialize};

use crate::sim::TickInput;

/// Keys the game reacts to, independent of the physical layout
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Up,
    Down,
    Left,
    Right,
    Hold,
    Restart,
    Quit,
}

/// A discrete event from the input collaborator
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent {
    /// Window close / interrupt - exits in any phase
    QuitRequest,
    KeyDown(Key),
    KeyUp(Key),
}

/// How movement keys turn into a movement vector
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MovementMode {
    /// Movement is rebuilt from scratch for every event batch: a key-down
    /// moves the player on the frame it arrives (and on OS key repeats).
    #[default]
    PerBatch,
    /// Movement persists while keys are held, last-pressed wins per axis.
    Held,
}

/// Held state of one movement axis
#[derive(Debug, Clone, Copy, Default)]
struct Axis {
    negative: bool,
    positive: bool,
    value: i32,
}

impl Axis {
    fn press(&mut self, dir: i32) {
        if dir < 0 {
            self.negative = true;
        } else {
            self.positive = true;
        }
        self.value = dir;
    }

    fn release(&mut self, dir: i32) {
        if dir < 0 {
            self.negative = false;
        } else {
            self.positive = false;
        }
        if self.value == dir {
            self.value = match (self.negative, self.positive) {
                (true, _) => -1,
                (_, true) => 1,
                _ => 0,
            };
        }
    }
}

/// Input state for the current frame
#[derive(Debug, Clone, Default)]
pub struct InputState {
    pub mode: MovementMode,
    pub move_vec: IVec2,
    pub hold: bool,
    /// Edge-triggered, only true on the frame the key went down
    pub restart: bool,
    /// Edge-triggered, only true on the frame the key went down
    pub quit: bool,
    /// Set by a quit request; never cleared
    pub quit_requested: bool,
    x: Axis,
    y: Axis,
}

impl InputState {
    pub fn new(mode: MovementMode) -> Self {
        Self {
            mode,
            ..Self::default()
        }
    }

    /// Forget everything, keeping the movement mode
    pub fn reset(&mut self) {
        *self = Self::new(self.mode);
    }

    /// Fold one batch of events into the state
    pub fn handle_events(&mut self, events: &[InputEvent]) {
        self.restart = false;
        self.quit = false;
        if self.mode == MovementMode::PerBatch {
            self.move_vec = IVec2::ZERO;
        }

        for event in events {
            match *event {
                InputEvent::QuitRequest => self.quit_requested = true,
                InputEvent::KeyDown(key) => self.key_down(key),
                InputEvent::KeyUp(key) => self.key_up(key),
            }
        }

        if self.mode == MovementMode::Held {
            self.move_vec = IVec2::new(self.x.value, self.y.value);
        }
    }

    fn key_down(&mut self, key: Key) {
        match key {
            Key::Up => self.press_axis(false, -1),
            Key::Down => self.press_axis(false, 1),
            Key::Left => self.press_axis(true, -1),
            Key::Right => self.press_axis(true, 1),
            Key::Hold => self.hold = true,
            Key::Restart => self.restart = true,
            Key::Quit => self.quit = true,
        }
    }

    fn key_up(&mut self, key: Key) {
        match key {
            Key::Up => self.y.release(-1),
            Key::Down => self.y.release(1),
            Key::Left => self.x.release(-1),
            Key::Right => self.x.release(1),
            Key::Hold => self.hold = false,
            Key::Restart | Key::Quit => {}
        }
    }

    fn press_axis(&mut self, horizontal: bool, dir: i32) {
        if horizontal {
            self.x.press(dir);
            self.move_vec.x = dir;
        } else {
            self.y.press(dir);
            self.move_vec.y = dir;
        }
    }

    /// Simulation input for this frame
    pub fn tick_input(&self) -> TickInput {
        TickInput {
            move_vec: self.move_vec,
            hold: self.hold,
        }
    }
}
