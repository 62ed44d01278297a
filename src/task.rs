//! The task board: an ordered, in-memory collection of tasks.
//!
//! Tasks live only for the lifetime of a board session; nothing here is
//! serialized or written to disk. Every task gets a ULID at creation and all
//! mutations are keyed by that id; positions shift on removal, ids never do.

use chrono::{DateTime, Duration, Utc};
use ulid::Ulid;

use crate::error::{Error, Result};

/// A single task with an immutable start instant and duration.
///
/// The deadline and remaining time are always derived from `started_at` and
/// `duration`; the countdown value itself is never stored back into the task.
#[derive(Debug, Clone)]
pub struct Task {
    pub id: String,
    pub title: String,
    pub description: String,
    pub started_at: DateTime<Utc>,
    pub duration: Duration,
    pub completed_at: Option<DateTime<Utc>>,
}

impl Task {
    pub fn deadline(&self) -> DateTime<Utc> {
        self.started_at + self.duration
    }

    pub fn is_completed(&self) -> bool {
        self.completed_at.is_some()
    }
}

/// Validated input for [`TaskBoard::add`].
#[derive(Debug, Clone)]
pub struct NewTask {
    pub title: String,
    pub description: String,
    pub duration: Duration,
}

impl NewTask {
    /// Build a task input from raw form fields.
    ///
    /// Title and description must be non-empty after trimming; the duration
    /// string must parse and be strictly positive.
    pub fn from_fields(title: &str, description: &str, duration: &str) -> Result<Self> {
        let title = title.trim();
        if title.is_empty() {
            return Err(Error::InvalidArgument("title cannot be empty".to_string()));
        }
        let description = description.trim();
        if description.is_empty() {
            return Err(Error::InvalidArgument(
                "description cannot be empty".to_string(),
            ));
        }
        let duration = parse_hours_minutes(duration)?;
        Ok(Self {
            title: title.to_string(),
            description: description.to_string(),
            duration,
        })
    }
}

/// Ordered task collection; the only shared mutable state in the app.
#[derive(Debug, Clone, Default)]
pub struct TaskBoard {
    tasks: Vec<Task>,
}

impl TaskBoard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a new task, capturing `started_at = now`. Returns the new id.
    pub fn add(&mut self, input: NewTask) -> Result<String> {
        self.add_at(input, Utc::now())
    }

    /// Append a new task with an explicit start instant.
    pub fn add_at(&mut self, input: NewTask, started_at: DateTime<Utc>) -> Result<String> {
        if input.duration <= Duration::zero() {
            return Err(Error::InvalidArgument(
                "duration must be greater than zero".to_string(),
            ));
        }
        let id = Ulid::new().to_string();
        self.tasks.push(Task {
            id: id.clone(),
            title: input.title,
            description: input.description,
            started_at,
            duration: input.duration,
            completed_at: None,
        });
        Ok(id)
    }

    /// Mark the task as completed. Returns whether anything changed: `false`
    /// for an unknown id or a task that is already completed. Completion is
    /// monotonic; a completed task never goes back.
    pub fn complete(&mut self, id: &str) -> bool {
        self.complete_at(id, Utc::now())
    }

    pub fn complete_at(&mut self, id: &str, now: DateTime<Utc>) -> bool {
        match self.tasks.iter_mut().find(|task| task.id == id) {
            Some(task) if task.completed_at.is_none() => {
                task.completed_at = Some(now);
                true
            }
            _ => false,
        }
    }

    /// Remove the task, preserving the order of the rest. Returns whether a
    /// task was removed; a stale id is a silent no-op.
    pub fn remove(&mut self, id: &str) -> bool {
        let before = self.tasks.len();
        self.tasks.retain(|task| task.id != id);
        self.tasks.len() != before
    }

    /// Insertion-ordered view of the board.
    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn get(&self, id: &str) -> Option<&Task> {
        self.tasks.iter().find(|task| task.id == id)
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }
}

/// Parse an `HH:MM` duration field into a [`Duration`].
///
/// Hours are not capped at 24; minutes must stay below 60. The zero duration
/// is rejected, so the form's `00:00` prefill never creates a task.
pub fn parse_hours_minutes(input: &str) -> Result<Duration> {
    let trimmed = input.trim();
    let invalid = |reason: &str| Error::InvalidDuration {
        input: input.to_string(),
        reason: reason.to_string(),
    };
    if trimmed.is_empty() {
        return Err(invalid("duration cannot be empty"));
    }
    let (hours_text, minutes_text) = trimmed
        .split_once(':')
        .ok_or_else(|| invalid("expected HH:MM"))?;
    if hours_text.is_empty() || minutes_text.is_empty() {
        return Err(invalid("expected HH:MM"));
    }
    let hours: i64 = hours_text
        .parse()
        .map_err(|_| invalid("hours must be a number"))?;
    let minutes: i64 = minutes_text
        .parse()
        .map_err(|_| invalid("minutes must be a number"))?;
    if hours < 0 || minutes < 0 {
        return Err(invalid("duration cannot be negative"));
    }
    if minutes >= 60 {
        return Err(invalid("minutes must be below 60"));
    }
    let total = Duration::hours(hours) + Duration::minutes(minutes);
    if total <= Duration::zero() {
        return Err(invalid("duration must be greater than zero"));
    }
    Ok(total)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn input(title: &str, description: &str, duration: &str) -> NewTask {
        NewTask::from_fields(title, description, duration).expect("input")
    }

    #[test]
    fn add_appends_with_captured_start_time() {
        let mut board = TaskBoard::new();
        let before = Utc::now();
        let id = board
            .add(input("Feed the cat", "Dry food, one scoop", "00:30"))
            .expect("add");
        let after = Utc::now();

        assert_eq!(board.len(), 1);
        let task = board.get(&id).expect("task");
        assert!(task.started_at >= before && task.started_at <= after);
        assert!(!task.is_completed());
        assert_eq!(task.duration, Duration::minutes(30));
    }

    #[test]
    fn add_preserves_insertion_order() {
        let mut board = TaskBoard::new();
        let first = board.add(input("First", "one", "01:00")).expect("add");
        let second = board.add(input("Second", "two", "01:00")).expect("add");
        let ids: Vec<&str> = board.tasks().iter().map(|task| task.id.as_str()).collect();
        assert_eq!(ids, vec![first.as_str(), second.as_str()]);
    }

    #[test]
    fn new_task_rejects_empty_fields() {
        let err = NewTask::from_fields("  ", "desc", "00:30").expect_err("title");
        assert!(matches!(err, Error::InvalidArgument(_)));
        let err = NewTask::from_fields("title", "", "00:30").expect_err("description");
        assert!(matches!(err, Error::InvalidArgument(_)));
        let err = NewTask::from_fields("title", "desc", "").expect_err("duration");
        assert!(matches!(err, Error::InvalidDuration { .. }));
    }

    #[test]
    fn complete_is_monotonic_and_idempotent() {
        let mut board = TaskBoard::new();
        let id = board.add(input("Homework", "Math sheet", "01:00")).expect("add");

        assert!(board.complete(&id));
        let completed_at = board.get(&id).expect("task").completed_at;
        assert!(completed_at.is_some());

        // Second completion changes nothing, including the timestamp.
        assert!(!board.complete(&id));
        assert_eq!(board.get(&id).expect("task").completed_at, completed_at);
    }

    #[test]
    fn complete_unknown_id_is_noop() {
        let mut board = TaskBoard::new();
        assert!(!board.complete("no-such-id"));
    }

    #[test]
    fn remove_drops_task_and_tolerates_stale_id() {
        let mut board = TaskBoard::new();
        let id = board.add(input("Tidy up", "Living room", "00:15")).expect("add");

        assert!(board.remove(&id));
        assert!(board.is_empty());
        // A stale handle after the mutation simply misses.
        assert!(!board.remove(&id));
        assert!(board.is_empty());
    }

    #[test]
    fn remove_keeps_order_of_remaining_tasks() {
        let mut board = TaskBoard::new();
        let first = board.add(input("First", "one", "01:00")).expect("add");
        let second = board.add(input("Second", "two", "01:00")).expect("add");
        let third = board.add(input("Third", "three", "01:00")).expect("add");

        assert!(board.remove(&second));
        let ids: Vec<&str> = board.tasks().iter().map(|task| task.id.as_str()).collect();
        assert_eq!(ids, vec![first.as_str(), third.as_str()]);
    }

    #[test]
    fn stale_id_after_removal_cannot_complete_wrong_task() {
        let mut board = TaskBoard::new();
        let doomed = board.add(input("Doomed", "one", "01:00")).expect("add");
        let survivor = board.add(input("Survivor", "two", "01:00")).expect("add");

        assert!(board.remove(&doomed));
        // Completing the removed task's id must not touch the survivor.
        assert!(!board.complete(&doomed));
        assert!(!board.get(&survivor).expect("task").is_completed());
    }

    #[test]
    fn deadline_derives_from_start_and_duration() {
        let mut board = TaskBoard::new();
        let started = Utc::now();
        let id = board
            .add_at(input("Walk the dog", "Around the block", "01:30"), started)
            .expect("add");
        let task = board.get(&id).expect("task");
        assert_eq!(task.deadline(), started + Duration::minutes(90));
    }

    #[test]
    fn parse_hours_minutes_accepts_plain_and_multiday() {
        assert_eq!(parse_hours_minutes("00:01").expect("parse"), Duration::minutes(1));
        assert_eq!(parse_hours_minutes("01:30").expect("parse"), Duration::minutes(90));
        assert_eq!(parse_hours_minutes("9:05").expect("parse"), Duration::minutes(545));
        // Hours beyond a day are allowed; there is no wraparound.
        assert_eq!(parse_hours_minutes("30:00").expect("parse"), Duration::hours(30));
    }

    #[test]
    fn parse_hours_minutes_rejects_bad_input() {
        for bad in ["", "   ", "90", "1:xx", "xx:10", "01:60", "-1:10", "1:-5"] {
            let err = parse_hours_minutes(bad).expect_err(bad);
            assert!(matches!(err, Error::InvalidDuration { .. }), "input {bad}");
        }
    }

    #[test]
    fn parse_hours_minutes_rejects_zero() {
        let err = parse_hours_minutes("00:00").expect_err("zero");
        assert!(matches!(err, Error::InvalidDuration { .. }));
    }
}
