//! Per-task countdown timers.
//!
//! Each live task owns one [`Ticker`]: a detached thread that delivers a
//! [`Tick`] once per second until cancelled. Cancellation is a one-shot
//! atomic swap, so releasing a ticker twice is harmless and observable, and
//! dropping the handle always releases the thread. At most one in-flight tick
//! can arrive after cancellation; consumers check the task's current state
//! before acting on a tick.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::Sender;
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use tracing::debug;

pub const TICK_INTERVAL_MS: u64 = 1_000;

/// One countdown beat for a task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tick {
    pub task_id: String,
}

/// Handle to a running per-task timer thread.
#[derive(Debug)]
pub struct Ticker {
    task_id: String,
    cancelled: Arc<AtomicBool>,
}

impl Ticker {
    /// Start a ticker for `task_id` at the standard one-second interval.
    pub fn spawn(task_id: String, tx: Sender<Tick>) -> Self {
        Self::spawn_with_interval(task_id, tx, Duration::from_millis(TICK_INTERVAL_MS))
    }

    /// Start a ticker with an explicit interval.
    pub fn spawn_with_interval(task_id: String, tx: Sender<Tick>, interval: Duration) -> Self {
        let cancelled = Arc::new(AtomicBool::new(false));
        let flag = Arc::clone(&cancelled);
        let id = task_id.clone();
        debug!(task_id = %task_id, "ticker acquired");
        thread::spawn(move || loop {
            thread::sleep(interval);
            if flag.load(Ordering::SeqCst) {
                break;
            }
            if tx.send(Tick { task_id: id.clone() }).is_err() {
                // Receiver gone; the board is tearing down.
                break;
            }
        });
        Self { task_id, cancelled }
    }

    pub fn task_id(&self) -> &str {
        &self.task_id
    }

    /// Release the timer. Returns `true` only for the call that actually
    /// performed the release; later calls are no-ops.
    pub fn cancel(&self) -> bool {
        let released = !self.cancelled.swap(true, Ordering::SeqCst);
        if released {
            debug!(task_id = %self.task_id, "ticker released");
        }
        released
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::SeqCst)
    }
}

impl Drop for Ticker {
    fn drop(&mut self) {
        self.cancel();
    }
}
