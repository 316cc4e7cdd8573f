use crate::tui::state::{AppState, InputMode};
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, Paragraph, Wrap},
};

pub fn draw(f: &mut Frame, state: &mut AppState) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(3)].as_ref())
        .split(f.area());

    // --- Task List ---
    let items: Vec<ListItem> = state
        .store
        .tasks()
        .iter()
        .map(|t| {
            let checkbox = if t.completed { "[x]" } else { "[ ]" };
            let mut style = Style::default().fg(Color::White);
            if t.completed {
                style = Style::default()
                    .fg(Color::DarkGray)
                    .add_modifier(Modifier::CROSSED_OUT);
            }
            if t.editing {
                style = style.fg(Color::Magenta).add_modifier(Modifier::ITALIC);
            }
            let marker = if t.editing { " (editing)" } else { "" };
            let line = format!("{} {}{}", checkbox, t.text, marker);
            ListItem::new(Line::from(vec![Span::styled(line, style)]))
        })
        .collect();

    let title = format!(" Todos ({}) ", state.store.tasks().len());
    let list = List::new(items)
        .block(Block::default().borders(Borders::ALL).title(title))
        .highlight_style(
            Style::default()
                .add_modifier(Modifier::BOLD)
                .bg(Color::DarkGray),
        );
    f.render_stateful_widget(list, chunks[0], &mut state.list_state);

    // --- Footer / Input ---
    let footer_area = chunks[1];
    match state.mode {
        InputMode::Creating | InputMode::Editing => {
            let (title, prefix, color) = match state.mode {
                InputMode::Editing => (" Edit Todo ", "> ", Color::Magenta),
                _ => (" New Todo ", "> ", Color::Yellow),
            };
            let input = Paragraph::new(format!("{}{}", prefix, state.input_buffer))
                .style(Style::default().fg(color))
                .block(Block::default().borders(Borders::ALL).title(title));
            f.render_widget(input, footer_area);
            let cursor_x =
                footer_area.x + 1 + prefix.chars().count() as u16 + state.cursor_position as u16;
            let cursor_y = footer_area.y + 1;
            f.set_cursor_position((cursor_x, cursor_y));
        }
        InputMode::Normal => {
            let f_chunks = Layout::default()
                .direction(Direction::Horizontal)
                .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
                .split(footer_area);
            let status = Paragraph::new(state.message.clone())
                .style(Style::default().fg(Color::Cyan))
                .block(
                    Block::default()
                        .borders(Borders::LEFT | Borders::TOP | Borders::BOTTOM)
                        .title(" Status "),
                );
            let help_text = "a:Add | e:Edit | Space:Done | d:Del | q:Quit";
            let help = Paragraph::new(help_text)
                .style(Style::default().fg(Color::DarkGray))
                .alignment(Alignment::Right)
                .block(
                    Block::default()
                        .borders(Borders::RIGHT | Borders::TOP | Borders::BOTTOM)
                        .title(" Actions "),
                );
            f.render_widget(status, f_chunks[0]);
            f.render_widget(help, f_chunks[1]);
        }
    }

    // --- Dialogs (drawn last, on top; notice wins over the delete prompt) ---
    if let Some(notice) = state.store.notice() {
        draw_notice(f, notice);
    } else if state.store.pending_delete().is_some() {
        draw_confirm_delete(f);
    }
}

fn draw_notice(f: &mut Frame, notice: &str) {
    let area = centered_rect(f.area(), 60, 25);
    f.render_widget(Clear, area);
    let text = vec![
        Line::from(""),
        Line::from(notice),
        Line::from(""),
        Line::from(Span::styled(
            "Press Enter to close",
            Style::default().fg(Color::DarkGray),
        )),
    ];
    let dialog = Paragraph::new(text)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true })
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" Notice ")
                .border_style(Style::default().fg(Color::Yellow)),
        );
    f.render_widget(dialog, area);
}

fn draw_confirm_delete(f: &mut Frame) {
    let area = centered_rect(f.area(), 50, 25);
    f.render_widget(Clear, area);
    let text = vec![
        Line::from(""),
        Line::from("Are you sure you want to delete this todo?"),
        Line::from(""),
        Line::from(vec![
            Span::styled(
                "y",
                Style::default()
                    .fg(Color::Green)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw(": OK   "),
            Span::styled(
                "n",
                Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
            ),
            Span::raw(": Cancel"),
        ]),
    ];
    let dialog = Paragraph::new(text)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true })
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" Delete ")
                .border_style(Style::default().fg(Color::Red)),
        );
    f.render_widget(dialog, area);
}

fn centered_rect(area: Rect, width_percent: u16, height_percent: u16) -> Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - height_percent) / 2),
            Constraint::Percentage(height_percent),
            Constraint::Percentage((100 - height_percent) / 2),
        ])
        .split(area);
    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - width_percent) / 2),
            Constraint::Percentage(width_percent),
            Constraint::Percentage((100 - width_percent) / 2),
        ])
        .split(vertical[1])[1]
}
