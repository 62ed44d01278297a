//! Countdown state for a task at a given instant.
//!
//! The phase is computed fresh on every tick from the task's immutable
//! `(started_at, deadline)` pair plus live `now`; no countdown value is ever
//! written back into task state.

use chrono::{DateTime, Utc};

use crate::task::Task;

/// Fraction of the total duration at or below which a task turns critical.
pub const DEFAULT_CRITICAL_THRESHOLD: f64 = 0.10;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Normal countdown display.
    Active,
    /// Same numbers as Active, flagged for the warning presentation.
    Critical,
    /// Deadline reached; remaining is clamped to zero.
    Expired,
    /// Terminal; remaining time is no longer computed.
    Completed,
}

impl Phase {
    /// Live phases are the ones that hold a ticking timer.
    pub fn is_live(self) -> bool {
        matches!(self, Phase::Active | Phase::Critical)
    }
}

/// Milliseconds until the deadline, clamped at zero.
pub fn remaining_ms(deadline: DateTime<Utc>, now: DateTime<Utc>) -> i64 {
    (deadline - now).num_milliseconds().max(0)
}

/// Remaining share of the total duration, in `[0, 1]` for any `now` at or
/// after `started_at`.
pub fn fraction_remaining(
    started_at: DateTime<Utc>,
    deadline: DateTime<Utc>,
    now: DateTime<Utc>,
) -> f64 {
    let total = (deadline - started_at).num_milliseconds();
    if total <= 0 {
        return 0.0;
    }
    remaining_ms(deadline, now) as f64 / total as f64
}

/// Classify a task at `now`. Completion wins over expiry; the exact
/// threshold boundary is Critical, not Active.
pub fn phase(task: &Task, threshold: f64, now: DateTime<Utc>) -> Phase {
    if task.is_completed() {
        return Phase::Completed;
    }
    let deadline = task.deadline();
    if now >= deadline {
        return Phase::Expired;
    }
    if fraction_remaining(task.started_at, deadline, now) <= threshold {
        return Phase::Critical;
    }
    Phase::Active
}

/// Format milliseconds as `HH:MM:SS`, truncating partial seconds.
///
/// The hours field grows without bound; a 30-hour remainder renders as
/// `30:00:00`, not `06:00:00`.
pub fn format_remaining(ms: i64) -> String {
    let total_seconds = ms.max(0) / 1_000;
    let hours = total_seconds / 3_600;
    let minutes = (total_seconds % 3_600) / 60;
    let seconds = total_seconds % 60;
    format!("{hours:02}:{minutes:02}:{seconds:02}")
}
