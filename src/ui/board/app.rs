use std::collections::HashMap;
use std::io;
use std::sync::mpsc::{self, Receiver, Sender};
use std::time::Duration;

use chrono::Utc;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyModifiers};
use crossterm::execute;
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;

use crate::config::Config;
use crate::countdown;
use crate::error::Result;
use crate::role::Role;
use crate::task::TaskBoard;
use crate::ticker::{Tick, Ticker};

use super::actions;
use super::editor::{EditorAction, EditorState};
use super::model::{self, BoardRow};
use super::view;

const NARROW_WIDTH: u16 = 80;
const EVENT_POLL_MS: u64 = 120;

#[derive(Clone, Copy)]
pub(crate) enum StatusKind {
    Error,
    Info,
}

pub(crate) struct DeleteConfirmState {
    pub(crate) task_id: String,
    pub(crate) title: String,
}

#[derive(Default, Clone, Copy)]
struct Viewport {
    width: u16,
    height: u16,
}

pub struct AppState {
    pub(crate) board: TaskBoard,
    pub(crate) role: Role,
    pub(crate) rows: Vec<BoardRow>,
    pub(crate) selected: Option<usize>,
    pub(crate) editor: Option<EditorState>,
    pub(crate) delete_confirm: Option<DeleteConfirmState>,
    pub(crate) show_help: bool,
    pub(crate) show_detail: bool,
    status_message: Option<String>,
    info_message: Option<String>,
    tickers: HashMap<String, Ticker>,
    viewport: Viewport,
    config: Config,
}

impl AppState {
    fn new(board: TaskBoard, role: Role, config: Config) -> Self {
        Self {
            board,
            role,
            rows: Vec::new(),
            selected: None,
            editor: None,
            delete_confirm: None,
            show_help: false,
            show_detail: false,
            status_message: None,
            info_message: None,
            tickers: HashMap::new(),
            viewport: Viewport::default(),
            config,
        }
    }

    fn update_viewport(&mut self, width: u16, height: u16) {
        let changed = self.viewport.width != width || self.viewport.height != height;
        self.viewport = Viewport { width, height };
        if changed && width >= NARROW_WIDTH {
            self.show_detail = true;
        }
    }

    pub(crate) fn is_narrow(&self) -> bool {
        self.viewport.width > 0 && self.viewport.width < NARROW_WIDTH
    }

    pub(crate) fn critical_threshold(&self) -> f64 {
        self.config.alerts.critical_threshold
    }

    /// Recompute the render rows from the board and the current instant,
    /// keeping the selection pinned to its task id.
    pub(crate) fn refresh_rows(&mut self) {
        let previous_id = self.selected_task_id();
        self.rows = model::board_rows(
            self.board.tasks(),
            self.critical_threshold(),
            self.config.board.show_completed,
            Utc::now(),
        );
        self.selected = model::select_by_id(&self.rows, previous_id.as_deref());
    }

    pub(crate) fn selected_row(&self) -> Option<&BoardRow> {
        self.selected.and_then(|idx| self.rows.get(idx))
    }

    fn selected_task_id(&self) -> Option<String> {
        self.selected_row().map(|row| row.id.clone())
    }

    fn move_selection(&mut self, delta: isize) {
        if self.rows.is_empty() {
            self.selected = None;
            return;
        }
        let current = self.selected.unwrap_or(0) as isize;
        let max = self.rows.len().saturating_sub(1) as isize;
        self.selected = Some(current.saturating_add(delta).clamp(0, max) as usize);
    }

    fn list_jump(&self) -> isize {
        let height = self.viewport.height.saturating_sub(6);
        (height / 2).max(1) as isize
    }

    fn toggle_role(&mut self) {
        self.role = self.role.toggled();
        self.set_info(format!("role: {}", self.role));
    }

    /// Reconcile tickers with the board: every live countdown holds exactly
    /// one, and nothing else holds any.
    fn sync_tickers(&mut self, tick_tx: &Sender<Tick>) {
        let now = Utc::now();
        let threshold = self.critical_threshold();

        let mut stale: Vec<String> = Vec::new();
        for (id, ticker) in &self.tickers {
            let live = self
                .board
                .get(id)
                .map(|task| countdown::phase(task, threshold, now).is_live())
                .unwrap_or(false);
            if !live {
                ticker.cancel();
                stale.push(id.clone());
            }
        }
        for id in stale {
            self.tickers.remove(&id);
        }

        for task in self.board.tasks() {
            if countdown::phase(task, threshold, now).is_live()
                && !self.tickers.contains_key(&task.id)
            {
                self.tickers.insert(
                    task.id.clone(),
                    Ticker::spawn(task.id.clone(), tick_tx.clone()),
                );
            }
        }
    }

    /// React to a tick. Returns whether the board needs a repaint. A tick for
    /// a task that is gone or completed is a late callback from a
    /// just-cancelled timer and is dropped; a tick that lands on the deadline
    /// still repaints so the zeroed countdown reaches the screen.
    fn handle_tick(&mut self, tick: &Tick) -> bool {
        let live = matches!(
            self.board.get(&tick.task_id),
            Some(task) if !task.is_completed()
        );
        if !live {
            if let Some(ticker) = self.tickers.remove(&tick.task_id) {
                ticker.cancel();
            }
            return false;
        }
        self.refresh_rows();
        true
    }

    fn release_tickers(&mut self) {
        for (_, ticker) in self.tickers.drain() {
            ticker.cancel();
        }
    }

    pub(crate) fn status_line(&self) -> Option<(String, StatusKind)> {
        if let Some(message) = self.status_message.as_ref() {
            return Some((message.clone(), StatusKind::Error));
        }
        if let Some(info) = self.info_message.as_ref() {
            return Some((info.clone(), StatusKind::Info));
        }
        None
    }

    fn set_error(&mut self, message: String) {
        self.status_message = Some(message);
        self.info_message = None;
    }

    fn set_info(&mut self, message: String) {
        self.info_message = Some(message);
        self.status_message = None;
    }

    fn apply_outcome(&mut self, outcome: actions::ActionOutcome) {
        if outcome.changed {
            self.refresh_rows();
        }
        self.set_info(outcome.message);
    }

    pub(crate) fn footer_hint(&self) -> String {
        if self.delete_confirm.is_some() {
            return "y confirm delete  esc cancel".to_string();
        }
        if let Some(editor) = self.editor.as_ref() {
            if editor.confirming() {
                return "enter/c confirm  backspace edit  esc cancel".to_string();
            }
            return "tab next field  enter confirm  ctrl-u clear  esc cancel".to_string();
        }
        match self.role {
            Role::Parent => {
                "j/k move  n new  c done  d delete  t role  ? help  q quit".to_string()
            }
            Role::Child => "j/k move  c done  t role  ? help  q quit".to_string(),
        }
    }

    pub(crate) fn task_count_summary(&self) -> String {
        let now = Utc::now();
        let threshold = self.critical_threshold();
        let mut running = 0usize;
        let mut over = 0usize;
        let mut done = 0usize;
        for task in self.board.tasks() {
            match countdown::phase(task, threshold, now) {
                p if p.is_live() => running += 1,
                countdown::Phase::Expired => over += 1,
                _ => done += 1,
            }
        }
        format!(
            "role: {}  running: {running}  overdue: {over}  done: {done}",
            self.role
        )
    }
}

pub fn run(board: TaskBoard, role: Role, config: Config) -> Result<()> {
    let (tick_tx, tick_rx) = mpsc::channel();
    let mut app = AppState::new(board, role, config);
    app.refresh_rows();
    run_terminal(&mut app, tick_rx, tick_tx)
}

fn run_terminal(
    app: &mut AppState,
    tick_rx: Receiver<Tick>,
    tick_tx: Sender<Tick>,
) -> Result<()> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    let size = terminal.size()?;
    app.update_viewport(size.width, size.height);

    let result = run_loop(&mut terminal, app, tick_rx, tick_tx);

    // Timers are released before the terminal is handed back, success or not.
    app.release_tickers();
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

fn run_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut AppState,
    tick_rx: Receiver<Tick>,
    tick_tx: Sender<Tick>,
) -> Result<()> {
    let mut dirty = true;
    loop {
        while let Ok(tick) = tick_rx.try_recv() {
            if app.handle_tick(&tick) {
                dirty = true;
            }
        }

        app.sync_tickers(&tick_tx);

        if dirty {
            terminal.draw(|frame| {
                app.update_viewport(frame.size().width, frame.size().height);
                view::render(frame, app);
            })?;
            dirty = false;
        }

        if event::poll(Duration::from_millis(EVENT_POLL_MS))? {
            match event::read()? {
                Event::Key(key) => {
                    if handle_key(app, key) {
                        break;
                    }
                    dirty = true;
                }
                Event::Resize(width, height) => {
                    app.update_viewport(width, height);
                    dirty = true;
                }
                _ => {}
            }
        }
    }
    Ok(())
}

fn handle_key(app: &mut AppState, key: KeyEvent) -> bool {
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return true;
    }

    if app.delete_confirm.is_some() {
        let confirm = app.delete_confirm.take().unwrap();
        match key.code {
            KeyCode::Char('y') | KeyCode::Char('c') | KeyCode::Enter => {
                match actions::delete_task(&mut app.board, app.role, &confirm.task_id) {
                    Ok(outcome) => app.apply_outcome(outcome),
                    Err(err) => app.set_error(err.to_string()),
                }
            }
            KeyCode::Char('n') | KeyCode::Char('q') | KeyCode::Esc => {
                app.set_info("cancelled".to_string());
            }
            _ => {
                app.delete_confirm = Some(confirm);
            }
        }
        return false;
    }

    if app.editor.is_some() {
        let mut editor = app.editor.take().unwrap();
        let action = editor.handle_key(key);
        match action {
            EditorAction::None => {
                app.editor = Some(editor);
            }
            EditorAction::Cancel => {
                app.editor = None;
                app.set_info("cancelled".to_string());
            }
            EditorAction::Submit => match editor.build_submit() {
                Ok(input) => match actions::add_task(&mut app.board, app.role, input) {
                    Ok(outcome) => {
                        app.editor = None;
                        app.apply_outcome(outcome);
                    }
                    Err(err) => {
                        // Form input survives a rejected submit.
                        editor.set_error(err.to_string());
                        app.editor = Some(editor);
                    }
                },
                Err(err) => {
                    editor.set_error(err);
                    app.editor = Some(editor);
                }
            },
        }
        return false;
    }

    if key.code == KeyCode::Char('?') {
        app.show_help = !app.show_help;
        return false;
    }

    match key.code {
        KeyCode::Char('q') | KeyCode::Esc => true,
        KeyCode::Char('d') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            app.move_selection(app.list_jump());
            false
        }
        KeyCode::Char('u') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            app.move_selection(-app.list_jump());
            false
        }
        KeyCode::Char('j') | KeyCode::Down => {
            app.move_selection(1);
            false
        }
        KeyCode::Char('k') | KeyCode::Up => {
            app.move_selection(-1);
            false
        }
        KeyCode::Char('t') => {
            app.toggle_role();
            false
        }
        KeyCode::Char('r') => {
            app.refresh_rows();
            false
        }
        KeyCode::Char('n') => {
            if !app.role.can_add() {
                app.set_error(app.role.denied("add tasks").to_string());
                return false;
            }
            app.editor = Some(EditorState::new_task());
            if app.is_narrow() {
                app.show_detail = true;
            }
            false
        }
        KeyCode::Char('c') | KeyCode::Char(' ') => {
            let Some(task_id) = app.selected_row().map(|row| row.id.clone()) else {
                app.set_error("no task selected".to_string());
                return false;
            };
            match actions::complete_task(&mut app.board, app.role, &task_id) {
                Ok(outcome) => app.apply_outcome(outcome),
                Err(err) => app.set_error(err.to_string()),
            }
            false
        }
        KeyCode::Char('d') => {
            let Some(row) = app.selected_row() else {
                app.set_error("no task selected".to_string());
                return false;
            };
            if !app.role.can_delete() {
                app.set_error(app.role.denied("delete tasks").to_string());
                return false;
            }
            app.delete_confirm = Some(DeleteConfirmState {
                task_id: row.id.clone(),
                title: row.title.clone(),
            });
            false
        }
        KeyCode::Enter => {
            if app.is_narrow() {
                app.show_detail = !app.show_detail;
            }
            false
        }
        _ => false,
    }
}
