//! Frame loop
//!
//! One `Game::frame` is one pass of the loop: measure time, fold input,
//! advance or wait on the state machine, draw. `run` repeats it against real
//! collaborators until the player quits.

use std::io;
use std::time::Duration;

use crate::input::{InputEvent, InputState};
use crate::platform::{Clock, EventSource};
use crate::renderer::{self, Canvas, Palette};
use crate::settings::Settings;
use crate::sim::{GameEvent, GamePhase, GameState, tick};

/// What the driver should do after a frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameOutcome {
    Continue,
    Quit,
}

/// Game instance holding all state
#[derive(Debug, Clone)]
pub struct Game {
    pub state: GameState,
    pub input: InputState,
    pub palette: Palette,
    prev_time_ms: f64,
    /// Events from the most recent tick
    pub last_events: Vec<GameEvent>,
}

impl Game {
    pub fn new(settings: &Settings) -> Self {
        let mut state = GameState::new(settings.resolve_seed());
        state.collisions.policy = settings.collision_policy;
        state.enemies.cull_offscreen_projectiles = settings.cull_offscreen_projectiles;

        Self {
            state,
            input: InputState::new(settings.movement_mode),
            palette: settings.palette,
            prev_time_ms: 0.0,
            last_events: Vec::new(),
        }
    }

    /// Seed the frame clock so the first frame sees `dt = 0`
    pub fn start(&mut self, now_ms: f64) {
        self.prev_time_ms = now_ms;
        log::info!("Run started with seed {}", self.state.seed);
    }

    /// Full reset of simulation, input and timers
    pub fn restart(&mut self, now_ms: f64) {
        self.input.reset();
        self.state.restart();
        self.last_events.clear();
        self.prev_time_ms = now_ms;
        log::info!("Restarted");
    }

    /// Run one loop iteration
    pub fn frame<C: Canvas + ?Sized>(
        &mut self,
        now_ms: f64,
        events: &[InputEvent],
        canvas: &mut C,
    ) -> io::Result<FrameOutcome> {
        let dt = (now_ms - self.prev_time_ms).max(0.0) as f32;
        self.prev_time_ms = now_ms;

        self.input.handle_events(events);
        if self.input.quit_requested {
            return Ok(FrameOutcome::Quit);
        }

        match self.state.phase {
            GamePhase::GameOver => {
                if self.input.quit {
                    return Ok(FrameOutcome::Quit);
                }
                if self.input.restart {
                    self.restart(now_ms);
                }
            }
            GamePhase::Playing => {
                self.last_events = tick(&mut self.state, &self.input.tick_input(), dt);
            }
        }

        let players = &self.state.players;
        renderer::draw(
            canvas,
            &self.palette,
            &players.player,
            &self.state.enemies.enemies,
            &players.decaying_teleporters,
        )?;

        Ok(FrameOutcome::Continue)
    }
}

/// Drive `game` until it quits.
///
/// With `frame_interval_ms` set, each frame sleeps out the rest of its slot;
/// `None` runs as fast as the host allows.
pub fn run<S, C, K>(
    game: &mut Game,
    source: &mut S,
    canvas: &mut C,
    clock: &K,
    frame_interval_ms: Option<f64>,
) -> io::Result<()>
where
    S: EventSource + ?Sized,
    C: Canvas + ?Sized,
    K: Clock + ?Sized,
{
    game.start(clock.now_ms());

    loop {
        let frame_start = clock.now_ms();
        let events = source.poll_events()?;

        if game.frame(frame_start, &events, canvas)? == FrameOutcome::Quit {
            log::info!("Quit");
            return Ok(());
        }

        if let Some(interval) = frame_interval_ms {
            let elapsed = clock.now_ms() - frame_start;
            if elapsed < interval {
                std::thread::sleep(Duration::from_secs_f64((interval - elapsed) / 1000.0));
            }
        }
    }
}
