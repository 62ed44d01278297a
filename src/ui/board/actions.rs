use crate::error::Result;
use crate::role::Role;
use crate::task::{NewTask, TaskBoard};

/// Raw form fields for a new task; validation happens on submit.
#[derive(Debug, Clone)]
pub struct NewTaskInput {
    pub title: String,
    pub description: String,
    pub duration: String,
}

#[derive(Debug, Clone)]
pub struct ActionOutcome {
    pub changed: bool,
    pub message: String,
    pub task_id: Option<String>,
}

pub fn add_task(board: &mut TaskBoard, role: Role, input: NewTaskInput) -> Result<ActionOutcome> {
    if !role.can_add() {
        return Err(role.denied("add tasks"));
    }
    let new_task = NewTask::from_fields(&input.title, &input.description, &input.duration)?;
    let title = new_task.title.clone();
    let task_id = board.add(new_task)?;
    Ok(ActionOutcome {
        changed: true,
        message: format!("added '{title}'"),
        task_id: Some(task_id),
    })
}

/// Mark a task done. A stale id is reported, not raised: the task may have
/// been deleted between render and keypress.
pub fn complete_task(board: &mut TaskBoard, role: Role, id: &str) -> Result<ActionOutcome> {
    if !role.can_complete() {
        return Err(role.denied("complete tasks"));
    }
    if board.complete(id) {
        Ok(ActionOutcome {
            changed: true,
            message: "marked done".to_string(),
            task_id: Some(id.to_string()),
        })
    } else {
        Ok(ActionOutcome {
            changed: false,
            message: "already done or gone".to_string(),
            task_id: Some(id.to_string()),
        })
    }
}

pub fn delete_task(board: &mut TaskBoard, role: Role, id: &str) -> Result<ActionOutcome> {
    if !role.can_delete() {
        return Err(role.denied("delete tasks"));
    }
    if board.remove(id) {
        Ok(ActionOutcome {
            changed: true,
            message: "deleted".to_string(),
            task_id: Some(id.to_string()),
        })
    } else {
        Ok(ActionOutcome {
            changed: false,
            message: "task is gone".to_string(),
            task_id: Some(id.to_string()),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    fn input(title: &str, description: &str, duration: &str) -> NewTaskInput {
        NewTaskInput {
            title: title.to_string(),
            description: description.to_string(),
            duration: duration.to_string(),
        }
    }

    fn seeded_board() -> (TaskBoard, String) {
        let mut board = TaskBoard::new();
        let outcome = add_task(
            &mut board,
            Role::Parent,
            input("Homework", "Math sheet", "01:00"),
        )
        .expect("add");
        (board, outcome.task_id.expect("id"))
    }

    #[test]
    fn parent_adds_task() {
        let (board, id) = seeded_board();
        assert_eq!(board.len(), 1);
        assert!(board.get(&id).is_some());
    }

    #[test]
    fn child_cannot_add() {
        let mut board = TaskBoard::new();
        let err = add_task(&mut board, Role::Child, input("Homework", "Math", "01:00"))
            .expect_err("denied");
        assert!(matches!(err, Error::RoleDenied { .. }));
        assert!(board.is_empty());
    }

    #[test]
    fn add_rejects_empty_title_without_mutating() {
        let mut board = TaskBoard::new();
        let err =
            add_task(&mut board, Role::Parent, input("", "Math", "01:00")).expect_err("reject");
        assert!(matches!(err, Error::InvalidArgument(_)));
        assert!(board.is_empty());
    }

    #[test]
    fn both_roles_complete_and_repeat_is_noop() {
        let (mut board, id) = seeded_board();
        let outcome = complete_task(&mut board, Role::Child, &id).expect("complete");
        assert!(outcome.changed);

        let again = complete_task(&mut board, Role::Parent, &id).expect("complete");
        assert!(!again.changed);
        assert!(board.get(&id).expect("task").is_completed());
    }

    #[test]
    fn complete_stale_id_reports_without_error() {
        let (mut board, id) = seeded_board();
        assert!(board.remove(&id));
        let outcome = complete_task(&mut board, Role::Child, &id).expect("complete");
        assert!(!outcome.changed);
    }

    #[test]
    fn parent_deletes_child_is_denied() {
        let (mut board, id) = seeded_board();
        let err = delete_task(&mut board, Role::Child, &id).expect_err("denied");
        assert!(matches!(err, Error::RoleDenied { .. }));
        assert_eq!(board.len(), 1);

        let outcome = delete_task(&mut board, Role::Parent, &id).expect("delete");
        assert!(outcome.changed);
        assert!(board.is_empty());
    }

    #[test]
    fn delete_stale_id_is_noop() {
        let (mut board, id) = seeded_board();
        assert!(delete_task(&mut board, Role::Parent, &id).expect("delete").changed);
        let again = delete_task(&mut board, Role::Parent, &id).expect("delete");
        assert!(!again.changed);
    }
}
