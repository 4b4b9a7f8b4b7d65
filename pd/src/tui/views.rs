//! TUI views and rendering

use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, List, ListItem, ListState, Paragraph, Wrap};

use super::app::{App, BLANK_OPTION, Focus};
use crate::session::{AskState, Session};

/// Main render function
pub fn render(app: &App, session: &Session, pending: usize, frame: &mut Frame) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),      // Header
            Constraint::Percentage(40), // Picker + preview
            Constraint::Length(3),      // Question input
            Constraint::Min(3),         // Answer
            Constraint::Length(3),      // Footer
        ])
        .split(frame.area());

    render_header(session, pending, frame, chunks[0]);

    let middle = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(chunks[1]);
    render_picker(app, session, frame, middle[0]);
    render_preview(session, frame, middle[1]);

    render_input(app, frame, chunks[2]);
    render_answer(session, frame, chunks[3]);
    render_footer(app, frame, chunks[4]);
}

fn focus_style(focused: bool) -> Style {
    if focused {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default()
    }
}

fn render_header(session: &Session, pending: usize, frame: &mut Frame, area: Rect) {
    let (state_text, state_color) = match session.ask_state() {
        AskState::Idle => ("idle".to_string(), Color::Green),
        AskState::AwaitingAnswer => (format!("asking ({})", session.asks_in_flight()), Color::Yellow),
    };

    let header = Paragraph::new(Line::from(vec![
        Span::styled(
            "promptdesk ",
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
        ),
        Span::raw("│ "),
        Span::styled(state_text, Style::default().fg(state_color)),
        Span::raw(" │ "),
        Span::styled(
            format!("{} templates", session.templates().len()),
            Style::default().fg(Color::Blue),
        ),
        Span::raw(" │ "),
        Span::styled(format!("{} pending", pending), Style::default().fg(Color::DarkGray)),
    ]))
    .block(Block::default().borders(Borders::ALL).title(" Status "));

    frame.render_widget(header, area);
}

fn render_picker(app: &App, session: &Session, frame: &mut Frame, area: Rect) {
    let selected = session.selected_id();

    let mut items = vec![ListItem::new(Line::from(Span::styled(
        BLANK_OPTION,
        Style::default().fg(Color::DarkGray),
    )))];
    items.extend(session.templates().iter().map(|t| {
        let marker = if Some(&t.id) == selected { "● " } else { "  " };
        ListItem::new(Line::from(vec![
            Span::styled(marker, Style::default().fg(Color::Green)),
            Span::styled(format!("{:>4} ", t.id.to_string()), Style::default().fg(Color::DarkGray)),
            Span::raw(t.prompt.as_str()),
        ]))
    }));

    let list = List::new(items)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(focus_style(app.focus == Focus::Picker))
                .title(" Templates "),
        )
        .highlight_style(Style::default().bg(Color::DarkGray).fg(Color::White));

    let mut state = ListState::default().with_selected(Some(app.cursor));
    frame.render_stateful_widget(list, area, &mut state);
}

fn render_preview(session: &Session, frame: &mut Frame, area: Rect) {
    let lines = match (session.selected_template(), session.is_selection_stale()) {
        (Some(t), _) => vec![
            Line::from(Span::styled(
                format!("Template {}", t.id),
                Style::default().add_modifier(Modifier::BOLD),
            )),
            Line::from(t.prompt.as_str()),
        ],
        (None, true) => vec![Line::from(Span::styled(
            "Selected template no longer exists",
            Style::default().fg(Color::Red),
        ))],
        (None, false) => vec![
            Line::from(Span::styled("Free text", Style::default().add_modifier(Modifier::BOLD))),
            Line::from(session.free_text()),
        ],
    };

    let preview = Paragraph::new(lines)
        .wrap(Wrap { trim: false })
        .block(Block::default().borders(Borders::ALL).title(" Will ask "));
    frame.render_widget(preview, area);
}

fn render_input(app: &App, frame: &mut Frame, area: Rect) {
    let focused = app.focus == Focus::Input;
    let content = if app.input.is_empty() && !focused {
        Line::from(Span::styled(
            "Or enter your question...",
            Style::default().fg(Color::DarkGray),
        ))
    } else {
        Line::from(app.input.as_str())
    };

    let input = Paragraph::new(content).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(focus_style(focused))
            .title(" Question "),
    );
    frame.render_widget(input, area);

    if focused {
        let typed = u16::try_from(app.input.chars().count()).unwrap_or(u16::MAX);
        let x = area.x.saturating_add(1).saturating_add(typed);
        frame.set_cursor_position((x.min(area.right().saturating_sub(2)), area.y + 1));
    }
}

fn render_answer(session: &Session, frame: &mut Frame, area: Rect) {
    let text = session.answer().map(|a| a.render()).unwrap_or_default();
    let answer = Paragraph::new(text)
        .wrap(Wrap { trim: false })
        .block(Block::default().borders(Borders::ALL).title(" Response "));
    frame.render_widget(answer, area);
}

fn render_footer(app: &App, frame: &mut Frame, area: Rect) {
    let hints = match app.focus {
        Focus::Picker => "j/k move │ Enter select │ c copy │ d delete │ r refresh │ a ask │ Tab input │ q quit",
        Focus::Input => "type question │ Enter ask │ Esc/Tab templates │ Ctrl-C quit",
    };
    let footer = Paragraph::new(Line::from(Span::styled(hints, Style::default().fg(Color::DarkGray))))
        .block(Block::default().borders(Borders::ALL));
    frame.render_widget(footer, area);
}
