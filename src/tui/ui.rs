use std::time::Instant;

use chrono::Local;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    widgets::{Block, Borders, Cell, Clear, Paragraph, Row, Table},
    Frame,
};

use crate::models::Theme;

use super::app::{App, InputMode, ViewMode};

fn base_fg(theme: Theme) -> Color {
    match theme {
        Theme::Dark => Color::White,
        Theme::Light => Color::Black,
    }
}

fn highlight_bg(theme: Theme) -> Color {
    match theme {
        Theme::Dark => Color::DarkGray,
        Theme::Light => Color::LightBlue,
    }
}

pub fn ui(f: &mut Frame, app: &mut App) {
    let undo_pending = app.undo.pending().is_some();
    let constraints: Vec<Constraint> = if undo_pending {
        vec![
            Constraint::Length(3), // Undo banner
            Constraint::Min(0),    // Table
            Constraint::Length(3), // Help
        ]
    } else {
        vec![Constraint::Min(0), Constraint::Length(3)]
    };
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .split(f.area());

    let (table_area, help_area) = if undo_pending {
        let remaining = app
            .undo
            .remaining_at(Instant::now())
            .map(|d| d.as_secs())
            .unwrap_or(0);
        let banner = Paragraph::new(format!("Task edited. Press u to undo ({}s)", remaining))
            .style(Style::default().fg(Color::Black).bg(Color::Yellow))
            .block(Block::default().borders(Borders::ALL));
        f.render_widget(banner, chunks[0]);
        (chunks[1], chunks[2])
    } else {
        (chunks[0], chunks[1])
    };

    let today = Local::now().date_naive();
    let fg = base_fg(app.theme);

    match app.view_mode {
        ViewMode::Tasks => {
            let rows: Vec<Row> = app
                .visible
                .iter()
                .map(|t| {
                    let style = if t.is_overdue(today) {
                        Style::default().fg(Color::Red)
                    } else if t.completed {
                        Style::default().fg(Color::Green)
                    } else {
                        Style::default().fg(fg)
                    };

                    Row::new(vec![
                        Cell::from(if t.completed { "[x]" } else { "[ ]" }),
                        Cell::from(t.text.clone()),
                        Cell::from(t.due_date.map(|d| d.to_string()).unwrap_or_default()),
                        Cell::from(
                            t.due_time
                                .map(|time| time.format("%H:%M").to_string())
                                .unwrap_or_default(),
                        ),
                    ])
                    .style(style)
                })
                .collect();

            let widths = [
                Constraint::Length(4),
                Constraint::Min(20),
                Constraint::Length(12),
                Constraint::Length(7),
            ];

            let title = if app.show_completed {
                "Taskbin - Tasks (all)"
            } else {
                "Taskbin - Tasks"
            };
            let table = Table::new(rows, widths)
                .header(
                    Row::new(vec!["", "Task", "Due", "Time"])
                        .style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))
                        .bottom_margin(1),
                )
                .block(Block::default().borders(Borders::ALL).title(title))
                .row_highlight_style(
                    Style::default()
                        .add_modifier(Modifier::BOLD)
                        .bg(highlight_bg(app.theme)),
                )
                .highlight_symbol(">> ");

            f.render_stateful_widget(table, table_area, &mut app.state);
        }
        ViewMode::Trash => {
            let rows: Vec<Row> = app
                .store
                .trashed_tasks()
                .iter()
                .map(|t| {
                    Row::new(vec![
                        Cell::from(t.text.clone()),
                        Cell::from(t.due_date.map(|d| d.to_string()).unwrap_or_default()),
                    ])
                    .style(Style::default().fg(fg))
                })
                .collect();

            let widths = [Constraint::Min(20), Constraint::Length(12)];

            let table = Table::new(rows, widths)
                .header(
                    Row::new(vec!["Task", "Due"])
                        .style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))
                        .bottom_margin(1),
                )
                .block(Block::default().borders(Borders::ALL).title("Taskbin - Trash"))
                .row_highlight_style(
                    Style::default()
                        .add_modifier(Modifier::BOLD)
                        .bg(highlight_bg(app.theme)),
                )
                .highlight_symbol(">> ");

            f.render_stateful_widget(table, table_area, &mut app.trash_state);
        }
    }

    let help_text = match app.input_mode {
        InputMode::Normal => match app.view_mode {
            ViewMode::Tasks => {
                "q: Quit | a: Add | e: Edit | u: Undo | Space: Done | d: Trash | c: Show Done | s: Sort | v: Trash View | t: Theme"
            }
            ViewMode::Trash => {
                "q: Quit | r: Restore | x: Purge | X: Empty Trash | v: Tasks View | t: Theme"
            }
        },
        InputMode::Editing => "Enter: Save | Esc: Cancel",
        InputMode::Adding => "Enter: Next Step | Esc: Cancel",
    };

    let help_line = match &app.status {
        Some(msg) => format!("{} | {}", msg, help_text),
        None => help_text.to_string(),
    };

    let help = Paragraph::new(help_line)
        .style(Style::default().fg(Color::Gray))
        .block(Block::default().borders(Borders::ALL));

    f.render_widget(help, help_area);

    // Render Input Box if needed
    match app.input_mode {
        InputMode::Editing | InputMode::Adding => {
            let area = centered_rect(60, 3, f.area()); // Fixed height of 3 (border + 1 line)
            f.render_widget(Clear, area); // Clear the area first

            let title = match app.input_mode {
                InputMode::Adding => match app.add_state.step {
                    0 => "Add Task: Enter Text",
                    1 => "Add Task: Enter Due Date (YYYY-MM-DD, Optional)",
                    2 => "Add Task: Enter Due Time (HH:MM, Optional)",
                    _ => "Add Task",
                },
                InputMode::Editing => "Edit Task Text",
                _ => "",
            };

            let input = Paragraph::new(app.input_buffer.as_str())
                .style(Style::default().fg(Color::Yellow))
                .block(Block::default().borders(Borders::ALL).title(title));

            f.render_widget(input, area);
        }
        _ => {}
    }
}

fn centered_rect(percent_x: u16, height: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints(
            [
                Constraint::Length((r.height - height) / 2),
                Constraint::Length(height),
                Constraint::Length((r.height - height) / 2),
            ]
            .as_ref(),
        )
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints(
            [
                Constraint::Percentage((100 - percent_x) / 2),
                Constraint::Percentage(percent_x),
                Constraint::Percentage((100 - percent_x) / 2),
            ]
            .as_ref(),
        )
        .split(popup_layout[1])[1]
}
