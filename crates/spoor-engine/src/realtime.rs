//! Background wall-clock driver.
//!
//! [`RealtimeDriver`] moves a [`ScentGrid`] onto a dedicated thread that
//! pauses, polls a [`TickScheduler`] and publishes a [`FieldSnapshot`]
//! whenever at least one tick ran. Readers on any thread fetch the latest
//! snapshot from the shared [`SnapshotSlot`]; they never see a half-updated
//! field because a snapshot is only published after the tick completed.
//!
//! ```text
//! Caller                        Tick thread ("spoor-tick")
//!   |                               |
//!   |  start(grid) -------------->  | scheduler.start(); poll (captures clock)
//!   |                               | loop:
//!   |                               |   stop_rx.recv_timeout(pause)
//!   |                               |   scheduler.poll(grid, now, max)
//!   |  latest() <---- slot -------- |   slot.publish(grid.snapshot())
//!   |                               |
//!   |  stop() --- stop_tx ------->  | wakes immediately, exits loop
//!   |  <------------ join --------- | returns the grid
//! ```

use std::fmt;
use std::sync::{Arc, Mutex, PoisonError};
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use crossbeam_channel::{Receiver, RecvTimeoutError, Sender};
use spoor_core::TickId;
use tracing::{info, warn};

use crate::config::{ConfigError, DriverConfig};
use crate::grid::ScentGrid;
use crate::schedule::TickScheduler;
use crate::snapshot::FieldSnapshot;

// ── DriverError ────────────────────────────────────────────────────

/// Error returned when the driver can not hand the grid back.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DriverError {
    /// The tick thread panicked; the grid it owned is lost.
    EngineRecoveryFailed,
}

impl fmt::Display for DriverError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EngineRecoveryFailed => write!(f, "tick thread panicked, grid lost"),
        }
    }
}

impl std::error::Error for DriverError {}

// ── SnapshotSlot ───────────────────────────────────────────────────

/// Latest published snapshot, shared between the tick thread and readers.
#[derive(Debug)]
pub struct SnapshotSlot {
    latest: Mutex<Arc<FieldSnapshot>>,
}

impl SnapshotSlot {
    /// A slot holding `initial`.
    pub fn new(initial: FieldSnapshot) -> Self {
        Self {
            latest: Mutex::new(Arc::new(initial)),
        }
    }

    /// Replace the published snapshot.
    pub fn publish(&self, snapshot: FieldSnapshot) {
        let snapshot = Arc::new(snapshot);
        // The lock only guards a pointer swap; the old Arc is dropped after
        // the guard is released.
        let old = {
            let mut slot = self.latest.lock().unwrap_or_else(PoisonError::into_inner);
            std::mem::replace(&mut *slot, snapshot)
        };
        drop(old);
    }

    /// The most recently published snapshot.
    pub fn latest(&self) -> Arc<FieldSnapshot> {
        Arc::clone(&self.latest.lock().unwrap_or_else(PoisonError::into_inner))
    }
}

// ── RealtimeDriver ─────────────────────────────────────────────────

/// Runs a [`ScentGrid`] in real time on a background thread.
///
/// The driver is the only writer of the grid while it runs. To step
/// manually or reconfigure, [`stop`](Self::stop) it to get the grid back.
/// Dropping a running driver stops it and discards the grid.
#[derive(Debug)]
pub struct RealtimeDriver {
    slot: Arc<SnapshotSlot>,
    stop_tx: Option<Sender<()>>,
    thread: Option<JoinHandle<ScentGrid>>,
}

impl RealtimeDriver {
    /// Move `grid` onto a new tick thread and start ticking.
    pub fn start(grid: ScentGrid, config: DriverConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let slot = Arc::new(SnapshotSlot::new(grid.snapshot()));
        let (stop_tx, stop_rx) = crossbeam_channel::bounded(1);

        let thread_slot = Arc::clone(&slot);
        let thread = thread::Builder::new()
            .name("spoor-tick".into())
            .spawn(move || run(grid, config, stop_rx, thread_slot))
            .map_err(|e| ConfigError::ThreadSpawnFailed {
                reason: e.to_string(),
            })?;
        info!("realtime driver started");

        Ok(Self {
            slot,
            stop_tx: Some(stop_tx),
            thread: Some(thread),
        })
    }

    /// The most recently published snapshot.
    pub fn latest(&self) -> Arc<FieldSnapshot> {
        self.slot.latest()
    }

    /// Tick of the most recently published snapshot.
    pub fn tick_id(&self) -> TickId {
        self.slot.latest().tick_id()
    }

    /// A handle to the snapshot slot that outlives the driver.
    pub fn slot(&self) -> Arc<SnapshotSlot> {
        Arc::clone(&self.slot)
    }

    /// Whether the tick thread is still alive.
    pub fn is_running(&self) -> bool {
        self.thread.as_ref().is_some_and(|t| !t.is_finished())
    }

    /// Interrupt the pause, join the tick thread and return the grid.
    pub fn stop(mut self) -> Result<ScentGrid, DriverError> {
        self.shutdown().ok_or(DriverError::EngineRecoveryFailed)
    }

    fn shutdown(&mut self) -> Option<ScentGrid> {
        if let Some(tx) = self.stop_tx.take() {
            // A full or disconnected channel means the thread is already
            // stopping.
            let _ = tx.try_send(());
        }
        let handle = self.thread.take()?;
        match handle.join() {
            Ok(grid) => {
                info!(tick = grid.tick_id().0, "realtime driver stopped");
                Some(grid)
            }
            Err(_) => {
                warn!("tick thread panicked");
                None
            }
        }
    }
}

impl Drop for RealtimeDriver {
    fn drop(&mut self) {
        self.shutdown();
    }
}

fn run(
    mut grid: ScentGrid,
    config: DriverConfig,
    stop_rx: Receiver<()>,
    slot: Arc<SnapshotSlot>,
) -> ScentGrid {
    let max_ticks = config.max_ticks_per_poll;
    let mut scheduler = TickScheduler::new();
    scheduler.start();
    scheduler.poll(&mut grid, Instant::now(), max_ticks);

    loop {
        let pause = config
            .poll_interval
            .unwrap_or_else(|| Duration::from_secs_f64(grid.params().period()));
        match stop_rx.recv_timeout(pause) {
            Err(RecvTimeoutError::Timeout) => {}
            Ok(()) | Err(RecvTimeoutError::Disconnected) => break,
        }
        if scheduler.poll(&mut grid, Instant::now(), max_ticks) > 0 {
            slot.publish(grid.snapshot());
        }
    }

    scheduler.stop();
    grid
}
