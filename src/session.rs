use std::panic;
use std::sync::mpsc::{self, RecvTimeoutError, Sender};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::thread::{self, JoinHandle};
use std::time::Duration;

use tracing::{debug, info};

use crate::error::GameError;
use crate::game::{GameSnapshot, GameState, GameStatus};
use crate::input::Direction;

/// A game shared between the ticker, input and render threads.
///
/// Every read and mutation goes through one lock, so `tick` and
/// `set_direction` never interleave.
#[derive(Debug, Clone)]
pub struct SharedGame {
    inner: Arc<Mutex<GameState>>,
}

impl SharedGame {
    #[must_use]
    pub fn new(state: GameState) -> Self {
        Self {
            inner: Arc::new(Mutex::new(state)),
        }
    }

    /// Advances the game by one tick.
    pub fn tick(&self) -> Result<GameStatus, GameError> {
        self.lock().tick()
    }

    /// Forwards a heading change request.
    pub fn set_direction(&self, direction: Direction) -> bool {
        self.lock().set_direction(direction)
    }

    #[must_use]
    pub fn snapshot(&self) -> GameSnapshot {
        self.lock().snapshot()
    }

    /// Runs `read` against the current state while holding the lock.
    pub fn read<T>(&self, read: impl FnOnce(&GameState) -> T) -> T {
        read(&self.lock())
    }

    /// Swaps in a fresh game, e.g. after a restart.
    pub fn replace(&self, state: GameState) {
        *self.lock() = state;
    }

    fn lock(&self) -> MutexGuard<'_, GameState> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Background thread that ticks a [`SharedGame`] on a fixed cadence.
///
/// The thread exits on its own once the game is lost or a tick fails.
#[derive(Debug)]
pub struct Ticker {
    stop: Sender<()>,
    handle: JoinHandle<Result<(), GameError>>,
}

impl Ticker {
    /// Starts ticking `game` every `interval`.
    #[must_use]
    pub fn spawn(game: SharedGame, interval: Duration) -> Self {
        let (stop, stop_rx) = mpsc::channel::<()>();

        let handle = thread::spawn(move || {
            info!(interval_ms = interval.as_millis(), "ticker started");
            loop {
                match stop_rx.recv_timeout(interval) {
                    Err(RecvTimeoutError::Timeout) => {}
                    Ok(()) | Err(RecvTimeoutError::Disconnected) => {
                        debug!("ticker stopped");
                        return Ok(());
                    }
                }

                if game.tick()?.is_lost() {
                    info!("ticker finished, game lost");
                    return Ok(());
                }
            }
        });

        Self { stop, handle }
    }

    /// Returns true once the ticker thread has exited.
    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }

    /// Stops the ticker and returns how its thread ended.
    pub fn stop(self) -> Result<(), GameError> {
        let _ = self.stop.send(());
        match self.handle.join() {
            Ok(result) => result,
            Err(payload) => panic::resume_unwind(payload),
        }
    }
}
