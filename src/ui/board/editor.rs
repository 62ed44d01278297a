use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::task::NewTask;

use super::actions::NewTaskInput;

/// Duration field prefill; rejected by validation until edited.
const DEFAULT_DURATION: &str = "00:00";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditorFieldId {
    Title,
    Description,
    Duration,
}

#[derive(Debug, Clone)]
pub struct EditorField {
    pub id: EditorFieldId,
    pub label: &'static str,
    pub value: String,
    pub required: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditorAction {
    None,
    Cancel,
    Submit,
}

/// The new-task form. A failed submit keeps every typed value so the user can
/// fix the offending field in place.
#[derive(Debug, Clone)]
pub struct EditorState {
    fields: Vec<EditorField>,
    active: usize,
    confirming: bool,
    error: Option<String>,
}

impl EditorState {
    pub fn new_task() -> Self {
        Self {
            fields: vec![
                EditorField {
                    id: EditorFieldId::Title,
                    label: "Title",
                    value: String::new(),
                    required: true,
                },
                EditorField {
                    id: EditorFieldId::Description,
                    label: "Description",
                    value: String::new(),
                    required: true,
                },
                EditorField {
                    id: EditorFieldId::Duration,
                    label: "Duration",
                    value: DEFAULT_DURATION.to_string(),
                    required: true,
                },
            ],
            active: 0,
            confirming: false,
            error: None,
        }
    }

    pub fn fields(&self) -> &[EditorField] {
        &self.fields
    }

    pub fn active_index(&self) -> usize {
        self.active
    }

    pub fn confirming(&self) -> bool {
        self.confirming
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn set_error(&mut self, message: String) {
        self.error = Some(message);
        self.confirming = false;
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> EditorAction {
        if self.confirming {
            return self.handle_confirm_key(key);
        }

        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('u') {
            if let Some(field) = self.current_field_mut() {
                field.value.clear();
            }
            self.error = None;
            return EditorAction::None;
        }

        match key.code {
            KeyCode::Esc => return EditorAction::Cancel,
            KeyCode::Tab | KeyCode::Down => {
                self.move_active(1);
            }
            KeyCode::BackTab | KeyCode::Up => {
                self.move_active(-1);
            }
            KeyCode::Enter => {
                if self.active + 1 >= self.fields.len() {
                    return self.attempt_confirm();
                }
                self.move_active(1);
            }
            KeyCode::Backspace => {
                if let Some(field) = self.current_field_mut() {
                    field.value.pop();
                }
            }
            KeyCode::Char(ch) => {
                if key.modifiers.contains(KeyModifiers::CONTROL) {
                    return EditorAction::None;
                }
                if !ch.is_control() {
                    if let Some(field) = self.current_field_mut() {
                        field.value.push(ch);
                    }
                }
            }
            _ => {}
        }

        self.error = None;
        EditorAction::None
    }

    /// Collect the form into an action input. Only called after validation,
    /// but validates again so a direct call cannot smuggle bad values.
    pub fn build_submit(&self) -> Result<NewTaskInput, String> {
        self.validate()?;
        Ok(NewTaskInput {
            title: self.field_value(EditorFieldId::Title).trim().to_string(),
            description: self
                .field_value(EditorFieldId::Description)
                .trim()
                .to_string(),
            duration: self.field_value(EditorFieldId::Duration).trim().to_string(),
        })
    }

    pub fn field_value(&self, id: EditorFieldId) -> &str {
        self.fields
            .iter()
            .find(|field| field.id == id)
            .map(|field| field.value.as_str())
            .unwrap_or("")
    }

    fn attempt_confirm(&mut self) -> EditorAction {
        match self.validate() {
            Ok(()) => {
                self.confirming = true;
                EditorAction::None
            }
            Err(err) => {
                self.error = Some(err);
                self.confirming = false;
                EditorAction::None
            }
        }
    }

    fn handle_confirm_key(&mut self, key: KeyEvent) -> EditorAction {
        match key.code {
            KeyCode::Enter | KeyCode::Char('c') | KeyCode::Char('y') => EditorAction::Submit,
            KeyCode::Esc | KeyCode::Char('q') => EditorAction::Cancel,
            KeyCode::Backspace | KeyCode::Char('n') => {
                self.confirming = false;
                EditorAction::None
            }
            _ => EditorAction::None,
        }
    }

    fn validate(&self) -> Result<(), String> {
        NewTask::from_fields(
            self.field_value(EditorFieldId::Title),
            self.field_value(EditorFieldId::Description),
            self.field_value(EditorFieldId::Duration),
        )
        .map(|_| ())
        .map_err(|err| err.to_string())
    }

    fn move_active(&mut self, delta: isize) {
        let len = self.fields.len() as isize;
        let next = (self.active as isize + delta).rem_euclid(len);
        self.active = next as usize;
    }

    fn current_field_mut(&mut self) -> Option<&mut EditorField> {
        self.fields.get_mut(self.active)
    }
}
