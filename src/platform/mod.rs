//! Platform abstraction layer
//!
//! Handles backend differences for:
//! - Time (`Clock`)
//! - Input events (`EventSource`)
//! - Drawing (`crate::renderer::Canvas`)

pub mod terminal;

use std::io;
use std::time::Instant;

use crate::input::InputEvent;

/// Non-blocking source of semantic input events
pub trait EventSource {
    /// Every event queued since the last poll; empty when nothing happened
    fn poll_events(&mut self) -> io::Result<Vec<InputEvent>>;
}

/// Monotonic wall clock in milliseconds
pub trait Clock {
    fn now_ms(&self) -> f64;
}

/// `Clock` backed by `Instant`, zero at construction
#[derive(Debug, Clone, Copy)]
pub struct SystemClock {
    start: Instant,
}

impl SystemClock {
    pub fn new() -> Self {
        Self {
            start: Instant::now(),
        }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for SystemClock {
    fn now_ms(&self) -> f64 {
        self.start.elapsed().as_secs_f64() * 1000.0
    }
}
