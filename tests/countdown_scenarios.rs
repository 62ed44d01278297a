//! Countdown behavior over a task's whole life, driven with fixed instants.

use chime::countdown::{self, Phase, DEFAULT_CRITICAL_THRESHOLD};
use chime::task::{NewTask, TaskBoard};
use chime::ui::board::model;
use chrono::{DateTime, Duration, TimeZone, Utc};

fn start() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 6, 1, 16, 0, 0).unwrap()
}

fn one_minute_board() -> (TaskBoard, String) {
    let mut board = TaskBoard::new();
    let input = NewTask::from_fields("Sprint", "One minute on the clock", "00:01").expect("input");
    let id = board.add_at(input, start()).expect("add");
    (board, id)
}

#[test]
fn one_minute_task_is_critical_at_90_percent_elapsed() {
    let (board, id) = one_minute_board();
    let task = board.get(&id).expect("task");

    let at_54s = start() + Duration::seconds(54);
    assert_eq!(
        countdown::phase(task, DEFAULT_CRITICAL_THRESHOLD, at_54s),
        Phase::Critical
    );

    let at_60s = start() + Duration::seconds(60);
    assert_eq!(
        countdown::phase(task, DEFAULT_CRITICAL_THRESHOLD, at_60s),
        Phase::Expired
    );
}

#[test]
fn remaining_time_counts_down_exactly_per_tick() {
    let (board, id) = one_minute_board();
    let task = board.get(&id).expect("task");
    let deadline = task.deadline();

    let mut expected = 60_000;
    for second in 0..=60 {
        let now = start() + Duration::seconds(second);
        assert_eq!(countdown::remaining_ms(deadline, now), expected);
        expected -= 1_000;
        expected = expected.max(0);
    }
}

#[test]
fn display_row_walks_active_critical_expired() {
    let (board, _id) = one_minute_board();

    let checks = [
        (0, Phase::Active, "00:01:00"),
        (30, Phase::Active, "00:00:30"),
        (54, Phase::Critical, "00:00:06"),
        (59, Phase::Critical, "00:00:01"),
        (60, Phase::Expired, "00:00:00"),
        (90, Phase::Expired, "00:00:00"),
    ];
    for (seconds, phase, countdown) in checks {
        let now = start() + Duration::seconds(seconds);
        let rows = model::board_rows(board.tasks(), DEFAULT_CRITICAL_THRESHOLD, true, now);
        assert_eq!(rows[0].phase, phase, "at +{seconds}s");
        assert_eq!(rows[0].countdown, countdown, "at +{seconds}s");
    }
}

#[test]
fn completed_task_stops_counting() {
    let (mut board, id) = one_minute_board();
    board.complete_at(&id, start() + Duration::seconds(10));

    for seconds in [11, 59, 61, 3_600] {
        let now = start() + Duration::seconds(seconds);
        let task = board.get(&id).expect("task");
        assert_eq!(
            countdown::phase(task, DEFAULT_CRITICAL_THRESHOLD, now),
            Phase::Completed
        );
    }
}

#[test]
fn multiday_task_displays_unbounded_hours() {
    let mut board = TaskBoard::new();
    let input = NewTask::from_fields("Science project", "Volcano model", "26:00").expect("input");
    board.add_at(input, start()).expect("add");

    let rows = model::board_rows(board.tasks(), DEFAULT_CRITICAL_THRESHOLD, true, start());
    assert_eq!(rows[0].countdown, "26:00:00");

    let later = start() + Duration::hours(1);
    let rows = model::board_rows(board.tasks(), DEFAULT_CRITICAL_THRESHOLD, true, later);
    assert_eq!(rows[0].countdown, "25:00:00");
}

#[test]
fn custom_threshold_moves_the_warning_boundary() {
    let (board, id) = one_minute_board();
    let task = board.get(&id).expect("task");

    // With a 25% threshold the warning starts at 45s elapsed instead of 54s.
    let at_45s = start() + Duration::seconds(45);
    assert_eq!(countdown::phase(task, 0.25, at_45s), Phase::Critical);
    assert_eq!(
        countdown::phase(task, DEFAULT_CRITICAL_THRESHOLD, at_45s),
        Phase::Active
    );
}
