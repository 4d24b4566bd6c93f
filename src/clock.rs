use std::{
    sync::{
        Arc,
        mpsc::{self, RecvTimeoutError},
    },
    thread,
    time::{Duration, Instant},
};

use tracing::{error, info};

use crate::{
    core::SharedArena,
    error::{ArenaError, ArenaResult},
};

enum ClockCommand {
    Stop,
}

struct Worker {
    tx: mpsc::Sender<ClockCommand>,
    handle: thread::JoinHandle<()>,
}

/// Ticks a [`SharedArena`] at a fixed rate on its own thread.
///
/// `start` replaces any running loop instead of stacking a second one, and
/// `stop` joins the thread so no tick runs after it returns.
pub struct SimulationClock {
    arena: SharedArena,
    period: Duration,
    worker: Option<Worker>,
}

impl SimulationClock {
    pub fn new(arena: SharedArena, tick_hz: f32) -> Self {
        Self {
            arena,
            period: Duration::from_secs_f32(1.0 / tick_hz),
            worker: None,
        }
    }

    pub fn start(&mut self) -> ArenaResult<()> {
        self.stop();
        let (tx, rx) = mpsc::channel();
        let arena = Arc::clone(&self.arena);
        let period = self.period;
        let handle = thread::Builder::new()
            .name("dokusai-clock".into())
            .spawn(move || run_loop(&arena, period, &rx))
            .map_err(ArenaError::ClockSpawn)?;
        info!(period_ms = period.as_secs_f64() * 1000.0, "simulation clock started");
        self.worker = Some(Worker { tx, handle });
        Ok(())
    }

    pub fn stop(&mut self) {
        let Some(worker) = self.worker.take() else {
            return;
        };
        let _ = worker.tx.send(ClockCommand::Stop);
        if worker.handle.join().is_err() {
            error!("simulation clock thread panicked");
        }
        info!("simulation clock stopped");
    }

    pub fn is_running(&self) -> bool {
        self.worker
            .as_ref()
            .is_some_and(|worker| !worker.handle.is_finished())
    }

    pub fn arena(&self) -> SharedArena {
        Arc::clone(&self.arena)
    }
}

impl Drop for SimulationClock {
    fn drop(&mut self) {
        self.stop();
    }
}

fn run_loop(arena: &SharedArena, period: Duration, rx: &mpsc::Receiver<ClockCommand>) {
    let mut deadline = Instant::now() + period;
    loop {
        let wait = deadline.saturating_duration_since(Instant::now());
        match rx.recv_timeout(wait) {
            Ok(ClockCommand::Stop) | Err(RecvTimeoutError::Disconnected) => break,
            Err(RecvTimeoutError::Timeout) => {}
        }

        match arena.lock() {
            Ok(mut arena) => {
                if let Err(err) = arena.tick() {
                    error!(%err, "simulation tick failed");
                }
            }
            Err(_) => {
                error!("arena lock poisoned; stopping clock");
                break;
            }
        }

        deadline += period;
        let now = Instant::now();
        // Missed ticks are dropped, not replayed.
        if deadline < now {
            deadline = now + period;
        }
    }
}
