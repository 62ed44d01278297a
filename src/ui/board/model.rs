use chrono::{DateTime, Utc};

use crate::countdown::{self, Phase};
use crate::task::Task;

/// Placeholder shown where a completed task's countdown would be; completed
/// tasks no longer have a remaining time.
const NO_COUNTDOWN: &str = "--:--:--";

/// One rendered board entry, derived fresh from the task list and `now`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoardRow {
    pub id: String,
    pub title: String,
    pub description: String,
    pub countdown: String,
    pub phase: Phase,
}

/// Derive the rows to render, in insertion order.
pub fn board_rows(
    tasks: &[Task],
    threshold: f64,
    show_completed: bool,
    now: DateTime<Utc>,
) -> Vec<BoardRow> {
    tasks
        .iter()
        .filter_map(|task| {
            let phase = countdown::phase(task, threshold, now);
            if phase == Phase::Completed && !show_completed {
                return None;
            }
            let countdown = if phase == Phase::Completed {
                NO_COUNTDOWN.to_string()
            } else {
                countdown::format_remaining(countdown::remaining_ms(task.deadline(), now))
            };
            Some(BoardRow {
                id: task.id.clone(),
                title: task.title.clone(),
                description: task.description.clone(),
                countdown,
                phase,
            })
        })
        .collect()
}

/// Keep the selection on the same task across refreshes; fall back to the
/// first row when the previously selected task is gone.
pub fn select_by_id(rows: &[BoardRow], previous_id: Option<&str>) -> Option<usize> {
    if rows.is_empty() {
        return None;
    }
    if let Some(id) = previous_id {
        if let Some(index) = rows.iter().position(|row| row.id == id) {
            return Some(index);
        }
    }
    Some(0)
}
