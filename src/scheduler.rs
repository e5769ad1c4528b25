use std::io;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, PoisonError};
use std::time::{Duration, Instant};

use log::{info, trace};

use crate::game::{GameState, Snapshot};
use crate::input::Command;

/// Source of the current time for the tick loop.
pub trait Clock {
    fn now(&self) -> Instant;
}

/// Wall-clock time.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }
}

/// Clock that only moves when told to. Clones share the same time.
#[derive(Debug, Clone)]
pub struct ManualClock {
    now: Arc<Mutex<Instant>>,
}

impl ManualClock {
    #[must_use]
    pub fn new() -> Self {
        Self {
            now: Arc::new(Mutex::new(Instant::now())),
        }
    }

    pub fn advance(&self, by: Duration) {
        let mut now = self.now.lock().unwrap_or_else(PoisonError::into_inner);
        *now += by;
    }
}

impl Default for ManualClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Instant {
        *self.now.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// The outside world as seen by the tick loop: somewhere to draw each
/// snapshot and somewhere to wait for player commands.
pub trait Frontend {
    /// Draws one snapshot. Must not mutate game state.
    fn render(&mut self, snapshot: &Snapshot) -> io::Result<()>;

    /// Blocks for at most `timeout` and returns the first command received.
    fn wait_for_command(&mut self, timeout: Duration) -> io::Result<Option<Command>>;
}

/// Stops a running [`Scheduler`] at its next wake-up.
#[derive(Debug, Clone, Default)]
pub struct CancelHandle {
    cancelled: Arc<AtomicBool>,
}

impl CancelHandle {
    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::SeqCst);
    }

    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::SeqCst)
    }
}

/// How [`Scheduler::run`] ended.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum RunOutcome {
    /// The game reached its terminal state.
    Finished { score: u32, ticks: u64 },
    /// The loop was stopped before the game ended.
    Cancelled,
}

/// Re-arming tick loop that owns one game.
///
/// After every step and render the next deadline is set from the state's
/// current tick interval, so a speed-up applies from the very next tick.
/// Nothing is rescheduled once the game is terminal.
#[derive(Debug)]
pub struct Scheduler<C: Clock = SystemClock> {
    state: GameState,
    clock: C,
    cancel: CancelHandle,
}

impl Scheduler<SystemClock> {
    #[must_use]
    pub fn new(state: GameState) -> Self {
        Self::with_clock(state, SystemClock)
    }
}

impl<C: Clock> Scheduler<C> {
    #[must_use]
    pub fn with_clock(state: GameState, clock: C) -> Self {
        Self {
            state,
            clock,
            cancel: CancelHandle::default(),
        }
    }

    /// Returns a handle that can stop this loop from elsewhere.
    #[must_use]
    pub fn cancel_handle(&self) -> CancelHandle {
        self.cancel.clone()
    }

    #[must_use]
    pub fn state(&self) -> &GameState {
        &self.state
    }

    #[must_use]
    pub fn into_state(self) -> GameState {
        self.state
    }

    /// Drives the game until it ends or is cancelled.
    pub fn run<F: Frontend + ?Sized>(&mut self, frontend: &mut F) -> io::Result<RunOutcome> {
        frontend.render(&self.state.snapshot())?;
        if self.state.is_terminal() {
            return Ok(self.finished());
        }

        let mut deadline = self.clock.now() + self.state.tick_interval();
        loop {
            if self.cancel.is_cancelled() {
                info!("tick loop cancelled after {} ticks", self.state.tick_count);
                return Ok(RunOutcome::Cancelled);
            }

            let now = self.clock.now();
            if now < deadline {
                match frontend.wait_for_command(deadline - now)? {
                    Some(Command::Steer(heading)) => self.state.on_direction_input(heading),
                    Some(Command::Quit) => self.cancel.cancel(),
                    None => {}
                }
                continue;
            }

            let event = self.state.step();
            trace!("tick {}: {event:?}", self.state.tick_count);
            frontend.render(&self.state.snapshot())?;

            if self.state.is_terminal() {
                return Ok(self.finished());
            }
            deadline = self.clock.now() + self.state.tick_interval();
        }
    }

    fn finished(&self) -> RunOutcome {
        RunOutcome::Finished {
            score: self.state.score,
            ticks: self.state.tick_count,
        }
    }
}
