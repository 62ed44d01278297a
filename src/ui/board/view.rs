use chrono::{DateTime, Utc};
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};
use ratatui::Frame;

use crate::countdown::Phase;
use crate::role::Role;
use crate::task::Task;

use super::app::{AppState, DeleteConfirmState, StatusKind};
use super::editor::EditorState;
use super::model::BoardRow;

const PHASE_WIDTH: usize = 6;
const COUNTDOWN_WIDTH: usize = 9;
const HELP_KEY_WIDTH: usize = 10;
const COLOR_TEXT: Color = Color::Rgb(234, 236, 239);
const COLOR_MUTED: Color = Color::Rgb(160, 165, 172);
const COLOR_MUTED_DARK: Color = Color::Rgb(118, 124, 130);
const COLOR_BG_MUTED: Color = Color::Rgb(52, 56, 60);
const COLOR_INFO: Color = Color::Rgb(116, 198, 219);
const COLOR_WARNING: Color = Color::Rgb(244, 200, 98);
const COLOR_ERROR: Color = Color::Rgb(255, 107, 107);
const COLOR_SUCCESS: Color = Color::Rgb(126, 210, 146);
const COLOR_ACCENT: Color = Color::Rgb(122, 170, 255);
const COLOR_BORDER_LIST: Color = Color::Rgb(92, 126, 166);
const COLOR_BORDER_DETAIL: Color = Color::Rgb(180, 156, 92);

pub fn render(frame: &mut Frame, app: &mut AppState) {
    let area = frame.size();
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints(
            [
                Constraint::Length(1),
                Constraint::Min(0),
                Constraint::Length(3),
            ]
            .as_ref(),
        )
        .split(area);
    let header = chunks[0];
    let main = chunks[1];
    let footer = chunks[2];

    render_header(frame, app, header);

    if app.is_narrow() && !app.show_detail {
        render_list(frame, app, main);
    } else if app.is_narrow() {
        render_detail(frame, app, main);
    } else {
        let chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(55), Constraint::Percentage(45)].as_ref())
            .split(main);
        render_list(frame, app, chunks[0]);
        render_detail(frame, app, chunks[1]);
    }

    render_footer(frame, app, footer);

    if let Some(state) = app.delete_confirm.as_ref() {
        render_delete_confirm_modal(frame, area, state);
    }
}

fn render_header(frame: &mut Frame, app: &AppState, area: Rect) {
    let mut spans = vec![Span::styled(
        "chime",
        Style::default()
            .fg(COLOR_ACCENT)
            .add_modifier(Modifier::BOLD),
    )];
    spans.push(Span::styled("   ", Style::default()));
    for (idx, role) in [Role::Parent, Role::Child].into_iter().enumerate() {
        if idx > 0 {
            spans.push(Span::styled(" / ", Style::default().fg(COLOR_MUTED_DARK)));
        }
        let style = if app.role == role {
            Style::default()
                .fg(COLOR_INFO)
                .add_modifier(Modifier::BOLD | Modifier::UNDERLINED)
        } else {
            Style::default().fg(COLOR_MUTED)
        };
        spans.push(Span::styled(role.as_str().to_string(), style));
    }
    spans.push(Span::styled(
        "   t switches role",
        Style::default().fg(COLOR_MUTED_DARK),
    ));

    let widget = Paragraph::new(Line::from(spans)).block(
        Block::default()
            .borders(Borders::BOTTOM)
            .border_style(Style::default().fg(COLOR_BG_MUTED)),
    );
    frame.render_widget(widget, area);
}

fn render_list(frame: &mut Frame, app: &mut AppState, area: Rect) {
    let mut lines = Vec::new();
    let content_width = area.width.saturating_sub(2) as usize;
    let help_lines = if app.show_help {
        build_help_lines(content_width)
    } else {
        Vec::new()
    };
    let help_reserved = if help_lines.is_empty() {
        0
    } else {
        help_lines.len() + 1
    };

    if app.rows.is_empty() {
        lines.push(Line::from("No tasks"));
    } else {
        let list_height = area
            .height
            .saturating_sub(2)
            .saturating_sub(help_reserved as u16) as usize;
        let (start, end) = list_window(app.rows.len(), app.selected, list_height.max(1));
        for idx in start..end {
            if let Some(row) = app.rows.get(idx) {
                lines.push(render_list_row(row, app.selected == Some(idx), content_width));
            }
        }
    }

    if !help_lines.is_empty() {
        lines.push(Line::from(""));
        lines.extend(help_lines);
    }

    let widget = Paragraph::new(lines)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title("Tasks")
                .border_style(Style::default().fg(COLOR_BORDER_LIST)),
        )
        .wrap(Wrap { trim: true });
    frame.render_widget(widget, area);
}

fn render_list_row(row: &BoardRow, selected: bool, width: usize) -> Line<'static> {
    let phase_text = pad_text_center(phase_label(row.phase), PHASE_WIDTH);
    let countdown_text = pad_text(&row.countdown, COUNTDOWN_WIDTH);
    let used = PHASE_WIDTH + COUNTDOWN_WIDTH + 4;
    let title = truncate_text(&row.title, width.saturating_sub(used));

    let mut spans = vec![
        Span::raw(" "),
        Span::styled(phase_text, phase_style(row.phase).add_modifier(Modifier::BOLD)),
        Span::raw(" "),
        Span::styled(countdown_text, countdown_style(row.phase)),
        Span::raw(" "),
        Span::styled(title, Style::default().fg(COLOR_TEXT)),
    ];

    if selected {
        for span in &mut spans {
            span.style = span.style.add_modifier(Modifier::REVERSED);
        }
    }

    Line::from(spans)
}

fn render_detail(frame: &mut Frame, app: &mut AppState, area: Rect) {
    let content_width = area.width.saturating_sub(2) as usize;
    let (title, content) = if let Some(editor) = app.editor.as_ref() {
        ("New Task", build_editor_lines(editor, content_width))
    } else {
        ("Details", build_detail_lines(app, content_width))
    };
    let widget = Paragraph::new(content)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(title)
                .border_style(Style::default().fg(COLOR_BORDER_DETAIL)),
        )
        .wrap(Wrap { trim: false });
    frame.render_widget(widget, area);
}

fn render_footer(frame: &mut Frame, app: &AppState, area: Rect) {
    let hint = app.footer_hint();
    let hint_span = Span::styled(hint, Style::default().fg(COLOR_INFO));
    let line = if let Some((status, kind)) = app.status_line() {
        let status_style = match kind {
            StatusKind::Error => Style::default()
                .fg(COLOR_ERROR)
                .add_modifier(Modifier::BOLD),
            StatusKind::Info => Style::default().fg(COLOR_WARNING),
        };
        Line::from(vec![
            hint_span,
            Span::raw("  |  "),
            Span::styled(status, status_style),
        ])
    } else {
        Line::from(hint_span)
    };
    let counts_line = Line::from(Span::styled(
        app.task_count_summary(),
        Style::default().fg(COLOR_ACCENT),
    ));
    let widget = Paragraph::new(vec![line, counts_line])
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::TOP)
                .border_style(Style::default().fg(COLOR_BORDER_LIST)),
        );
    frame.render_widget(widget, area);
}

fn render_delete_confirm_modal(frame: &mut Frame, area: Rect, state: &DeleteConfirmState) {
    let content_width = area.width.saturating_sub(8).min(56);
    let height = 7u16.min(area.height.saturating_sub(4).max(7));
    let modal = centered_rect(content_width, height, area);
    frame.render_widget(Clear, modal);

    let title_width = (content_width as usize).saturating_sub(8);
    let mut lines: Vec<Line<'static>> = Vec::new();
    lines.push(Line::from(Span::styled(
        "Delete task?",
        Style::default()
            .fg(COLOR_ERROR)
            .add_modifier(Modifier::BOLD),
    )));
    lines.push(Line::from(""));
    lines.push(Line::from(vec![
        Span::styled("Title: ", Style::default().fg(COLOR_MUTED_DARK)),
        Span::styled(
            truncate_text(&state.title, title_width),
            Style::default().fg(COLOR_TEXT),
        ),
    ]));
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        "y/enter confirm  esc cancel",
        Style::default().fg(COLOR_MUTED_DARK),
    )));

    let widget = Paragraph::new(lines)
        .block(Block::default().borders(Borders::ALL).title("Delete Task"))
        .wrap(Wrap { trim: true });
    frame.render_widget(widget, modal);
}

fn build_editor_lines(editor: &EditorState, width: usize) -> Vec<Line<'static>> {
    if editor.confirming() {
        return build_confirm_lines(editor, width);
    }

    let mut lines: Vec<Line<'static>> = Vec::new();
    for (idx, field) in editor.fields().iter().enumerate() {
        let is_active = idx == editor.active_index();
        let label = format!("{:<12}", field.label);
        let mut value = field.value.clone();
        let placeholder = if value.is_empty() && field.required {
            Some("<required>".to_string())
        } else {
            None
        };
        let value_style = if placeholder.is_some() {
            Style::default().fg(COLOR_MUTED)
        } else {
            Style::default().fg(COLOR_TEXT)
        };
        if let Some(place) = placeholder {
            value = place;
        }
        let mut spans = vec![
            Span::styled(label, Style::default().fg(COLOR_TEXT)),
            Span::raw(" "),
            Span::styled(truncate_text(&value, width.saturating_sub(14)), value_style),
        ];
        if is_active {
            for span in &mut spans {
                span.style = span.style.add_modifier(Modifier::REVERSED);
            }
        }
        lines.push(Line::from(spans));
    }

    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        "Duration is HH:MM; hours may exceed 24.",
        Style::default().fg(COLOR_MUTED_DARK),
    )));

    if let Some(error) = editor.error() {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            error.to_string(),
            Style::default()
                .fg(COLOR_ERROR)
                .add_modifier(Modifier::BOLD),
        )));
    }

    lines
}

fn build_confirm_lines(editor: &EditorState, width: usize) -> Vec<Line<'static>> {
    let mut lines: Vec<Line<'static>> = Vec::new();
    lines.push(Line::from(Span::styled(
        "Add this task?",
        Style::default()
            .fg(COLOR_WARNING)
            .add_modifier(Modifier::BOLD),
    )));
    lines.push(Line::from(""));

    if let Ok(input) = editor.build_submit() {
        lines.push(Line::from(vec![
            label_span("Title: "),
            Span::styled(
                truncate_text(&input.title, width.saturating_sub(8)),
                Style::default().fg(COLOR_TEXT),
            ),
        ]));
        lines.push(Line::from(vec![
            label_span("Description: "),
            Span::styled(
                truncate_text(&input.description, width.saturating_sub(14)),
                Style::default().fg(COLOR_TEXT),
            ),
        ]));
        lines.push(Line::from(vec![
            label_span("Duration: "),
            Span::styled(input.duration, Style::default().fg(COLOR_INFO)),
        ]));
    }

    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        "enter/c confirm  backspace edit  esc cancel",
        Style::default().fg(COLOR_MUTED_DARK),
    )));
    lines
}

fn build_detail_lines(app: &AppState, width: usize) -> Vec<Line<'static>> {
    let Some(row) = app.selected_row() else {
        return vec![Line::from(Span::styled(
            "Nothing selected",
            Style::default().fg(COLOR_MUTED_DARK),
        ))];
    };
    let Some(task) = app.board.get(&row.id) else {
        return Vec::new();
    };

    let mut lines = Vec::new();
    lines.push(Line::from(Span::styled(
        truncate_text(&task.title, width),
        Style::default()
            .fg(COLOR_TEXT)
            .add_modifier(Modifier::BOLD),
    )));
    lines.push(Line::from(""));
    lines.push(Line::from(vec![
        label_span("Status: "),
        Span::styled(
            phase_label(row.phase).to_string(),
            phase_style(row.phase).add_modifier(Modifier::BOLD),
        ),
    ]));
    lines.push(Line::from(vec![
        label_span("Remaining: "),
        Span::styled(row.countdown.clone(), countdown_style(row.phase)),
    ]));
    lines.push(Line::from(vec![
        label_span("Started: "),
        Span::styled(
            format_timestamp(task.started_at),
            Style::default().fg(COLOR_MUTED),
        ),
    ]));
    lines.push(Line::from(vec![
        label_span("Deadline: "),
        Span::styled(
            format_timestamp(task.deadline()),
            Style::default().fg(COLOR_MUTED),
        ),
    ]));
    lines.push(Line::from(vec![
        label_span("Duration: "),
        Span::styled(format_duration(task), Style::default().fg(COLOR_MUTED)),
    ]));
    lines.push(Line::from(""));
    for text in task.description.split('\n') {
        lines.push(Line::from(Span::styled(
            text.to_string(),
            Style::default().fg(COLOR_TEXT),
        )));
    }
    lines
}

fn build_help_lines(width: usize) -> Vec<Line<'static>> {
    let mut lines = vec![Line::from(Span::styled(
        "Keys",
        Style::default()
            .fg(COLOR_ACCENT)
            .add_modifier(Modifier::BOLD),
    ))];
    let entries = [
        ("j/k", "move selection"),
        ("n", "new task (parent)"),
        ("c/space", "mark selected done"),
        ("d", "delete selected (parent)"),
        ("t", "toggle parent/child role"),
        ("enter", "toggle detail pane (narrow)"),
        ("q/esc", "quit"),
    ];
    for (keys, desc) in entries {
        lines.push(help_line(keys, desc, width));
    }
    lines
}

fn help_line(keys: &str, desc: &str, width: usize) -> Line<'static> {
    let keys_text = pad_text(keys, HELP_KEY_WIDTH);
    let desc_text = truncate_text(desc, width.saturating_sub(HELP_KEY_WIDTH + 1));
    Line::from(vec![
        Span::styled(keys_text, Style::default().fg(COLOR_INFO)),
        Span::raw(" "),
        Span::styled(desc_text, Style::default().fg(COLOR_MUTED)),
    ])
}

fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let width = width.min(area.width.saturating_sub(2));
    let height = height.min(area.height.saturating_sub(2));
    let x = area.x + (area.width.saturating_sub(width)) / 2;
    let y = area.y + (area.height.saturating_sub(height)) / 2;
    Rect::new(x, y, width, height)
}

fn list_window(total: usize, selected: Option<usize>, height: usize) -> (usize, usize) {
    if total == 0 || height == 0 {
        return (0, 0);
    }
    if total <= height {
        return (0, total);
    }
    let selected = selected.unwrap_or(0);
    let mut start = selected.saturating_sub(height / 2);
    if start + height > total {
        start = total - height;
    }
    (start, start + height)
}

fn phase_label(phase: Phase) -> &'static str {
    match phase {
        Phase::Active => "RUN",
        Phase::Critical => "WARN",
        Phase::Expired => "OVER",
        Phase::Completed => "DONE",
    }
}

fn phase_style(phase: Phase) -> Style {
    let (fg, bg) = match phase {
        Phase::Active => (Color::Rgb(80, 250, 123), Color::Rgb(26, 61, 42)),
        Phase::Critical => (COLOR_WARNING, Color::Rgb(68, 55, 22)),
        Phase::Expired => (COLOR_ERROR, Color::Rgb(68, 30, 30)),
        Phase::Completed => (Color::Rgb(98, 114, 164), Color::Rgb(42, 42, 61)),
    };
    Style::default().fg(fg).bg(bg)
}

fn countdown_style(phase: Phase) -> Style {
    match phase {
        Phase::Active => Style::default().fg(COLOR_TEXT),
        Phase::Critical => Style::default()
            .fg(COLOR_WARNING)
            .add_modifier(Modifier::BOLD),
        Phase::Expired => Style::default()
            .fg(COLOR_ERROR)
            .add_modifier(Modifier::BOLD),
        Phase::Completed => Style::default().fg(COLOR_SUCCESS),
    }
}

fn pad_text(value: &str, width: usize) -> String {
    let mut text = value.to_string();
    if text.len() > width {
        text = truncate_text(&text, width);
    }
    format!("{text:width$}")
}

fn pad_text_center(value: &str, width: usize) -> String {
    let mut text = value.to_string();
    if text.len() > width {
        text = truncate_text(&text, width);
    }
    let len = text.chars().count();
    if len >= width {
        return text;
    }
    let total_pad = width - len;
    let left = total_pad / 2;
    let right = total_pad - left;
    format!("{}{}{}", " ".repeat(left), text, " ".repeat(right))
}

fn truncate_text(value: &str, max: usize) -> String {
    if max == 0 {
        return String::new();
    }
    let chars: Vec<char> = value.chars().collect();
    if chars.len() <= max {
        return value.to_string();
    }
    if max <= 3 {
        return chars[..max].iter().collect();
    }
    let mut out: String = chars[..(max - 3)].iter().collect();
    out.push_str("...");
    out
}

fn format_timestamp(value: DateTime<Utc>) -> String {
    value.format("%Y-%m-%d %H:%M:%S").to_string()
}

fn format_duration(task: &Task) -> String {
    let minutes = task.duration.num_minutes();
    format!("{:02}:{:02}", minutes / 60, minutes % 60)
}

fn label_span(label: &str) -> Span<'static> {
    Span::styled(label.to_string(), Style::default().fg(COLOR_MUTED_DARK))
}
