//! UI rendering logic
//!
//! Handles layout and rendering of the application using Ratatui.
//! Layout structure:
//! - Title bar (1 line, fixed)
//! - Token buffer (3 lines, bordered): the cursor of the selected event is highlighted
//! - Middle section (responsive height):
//!   - Trace events (left)
//!   - Derivation tree (right)
//! - Status line (1 line, fixed)

use super::app::App;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};
use ratatui::Frame;
use svo::svo::formats::trace_table::describe_event;

/// Minimum terminal width required for the UI
const MIN_TERMINAL_WIDTH: u16 = 60;
/// Share of the middle section given to the trace list
const TRACE_PERCENT: u16 = 55;

/// Render the entire UI
pub fn render(frame: &mut Frame, app: &App) {
    let size = frame.area();

    if size.width < MIN_TERMINAL_WIDTH {
        render_error_too_narrow(frame, size);
        return;
    }

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Title bar
            Constraint::Length(3), // Token buffer
            Constraint::Min(1),    // Trace | tree
            Constraint::Length(1), // Status line
        ])
        .split(size);

    render_title_bar(frame, chunks[0], app);
    render_tokens(frame, chunks[1], app);
    render_middle_section(frame, chunks[2], app);
    render_status_line(frame, chunks[3], app);
}

fn render_error_too_narrow(frame: &mut Frame, area: Rect) {
    let msg = format!(
        "Terminal too narrow: {} < {} chars",
        area.width, MIN_TERMINAL_WIDTH
    );
    let paragraph =
        Paragraph::new(msg).style(Style::default().fg(Color::Red).add_modifier(Modifier::BOLD));
    frame.render_widget(paragraph, area);
}

fn render_title_bar(frame: &mut Frame, area: Rect, app: &App) {
    let title = format!(
        "svo:: {} [{}/{}]",
        app.model.current().sentence,
        app.model.current_index() + 1,
        app.model.sentence_count()
    );
    let paragraph = Paragraph::new(title).style(
        Style::default()
            .fg(Color::Black)
            .bg(Color::Cyan)
            .add_modifier(Modifier::BOLD),
    );
    frame.render_widget(paragraph, area);
}

/// Token buffer line: consumed tokens dimmed, the cursor token highlighted
fn token_line(tokens: &[String], cursor: usize) -> Line<'static> {
    let highlight = Style::default()
        .bg(Color::Blue)
        .fg(Color::White)
        .add_modifier(Modifier::BOLD);

    let mut spans = Vec::new();
    for (i, token) in tokens.iter().enumerate() {
        if i > 0 {
            spans.push(Span::raw(" "));
        }
        let style = if i == cursor {
            highlight
        } else if i < cursor {
            Style::default().add_modifier(Modifier::DIM)
        } else {
            Style::default()
        };
        spans.push(Span::styled(token.clone(), style));
    }
    if cursor >= tokens.len() {
        if !tokens.is_empty() {
            spans.push(Span::raw(" "));
        }
        spans.push(Span::styled("<eof>", highlight));
    }
    Line::from(spans)
}

fn render_tokens(frame: &mut Frame, area: Rect, app: &App) {
    let tokens: Vec<String> = app
        .model
        .current()
        .traced
        .result
        .tokens
        .iter()
        .map(|t| t.to_string())
        .collect();
    let block = Block::default()
        .borders(Borders::ALL)
        .title(format!("Tokens (cursor {})", app.model.cursor()));
    let paragraph = Paragraph::new(token_line(&tokens, app.model.cursor())).block(block);
    frame.render_widget(paragraph, area);
}

fn render_middle_section(frame: &mut Frame, area: Rect, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(TRACE_PERCENT),
            Constraint::Min(1),
        ])
        .split(area);

    render_trace(frame, chunks[0], app);
    render_tree(frame, chunks[1], app);
}

/// First visible row so that `selected` stays on screen
pub fn scroll_offset(selected: usize, height: usize) -> usize {
    if height == 0 {
        return selected;
    }
    selected.saturating_sub(height - 1)
}

fn render_trace(frame: &mut Frame, area: Rect, app: &App) {
    let events = app.model.events();
    let selected = app.model.selected_event_index();
    let block = Block::default()
        .borders(Borders::ALL)
        .title(format!("Trace [{}/{}]", selected + 1, events.len()));
    let inner_area = block.inner(area);
    frame.render_widget(block, area);

    let offset = scroll_offset(selected, inner_area.height as usize);
    let lines: Vec<Line> = events
        .iter()
        .enumerate()
        .skip(offset)
        .take(inner_area.height as usize)
        .map(|(i, event)| {
            let (action, detail) = describe_event(event);
            let text = format!("{:>3} {:>2}  {:<12} {}", i, event.cursor(), action, detail);
            if i == selected {
                Line::from(text).style(
                    Style::default()
                        .bg(Color::Blue)
                        .fg(Color::White)
                        .add_modifier(Modifier::BOLD),
                )
            } else if event.kind() == "fail" {
                Line::from(text).style(Style::default().fg(Color::Red))
            } else {
                Line::from(text)
            }
        })
        .collect();

    frame.render_widget(Paragraph::new(lines), inner_area);
}

fn render_tree(frame: &mut Frame, area: Rect, app: &App) {
    let lines: Vec<Line> = app.model.tree_lines().into_iter().map(Line::from).collect();
    let paragraph =
        Paragraph::new(lines).block(Block::default().borders(Borders::ALL).title("Derivation"));
    frame.render_widget(paragraph, area);
}

fn render_status_line(frame: &mut Frame, area: Rect, app: &App) {
    let result = &app.model.current().traced.result;
    let verdict = if result.accepted {
        Span::styled(
            "ACCEPTED",
            Style::default()
                .fg(Color::Green)
                .add_modifier(Modifier::BOLD),
        )
    } else {
        Span::styled(
            "REJECTED",
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        )
    };
    let line = Line::from(vec![
        verdict,
        Span::raw(format!(
            " | consumed {}/{} | ↑↓ step  ←→ sentence  q quit",
            result.consumed,
            result.total()
        )),
    ]);
    frame.render_widget(Paragraph::new(line), area);
}
