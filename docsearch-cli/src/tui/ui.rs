//! UI rendering using ratatui

use docsearch_core::{ResultLink, ResultRow};
use ratatui::{
    layout::{Constraint, Direction, Layout, Position, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph},
    Frame,
};

use super::app::App;

/// Primary accent color
const ACCENT: Color = Color::Cyan;
/// Secondary color for borders
const SECONDARY: Color = Color::DarkGray;
/// Highlight color for the selected link
const HIGHLIGHT: Color = Color::Yellow;
/// Error color for the status bar
const ERROR: Color = Color::Red;
/// Dim text color
const DIM: Color = Color::Rgb(100, 100, 100);

/// Render the entire UI
pub fn render(frame: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Search box
            Constraint::Min(3),    // Results container
            Constraint::Length(1), // Status bar
        ])
        .split(frame.area());

    render_input(frame, app, chunks[0]);
    render_results(frame, app, chunks[1]);
    render_status_bar(frame, app, chunks[2]);
}

/// Render the search box and place the cursor
fn render_input(frame: &mut Frame, app: &App, area: Rect) {
    let block = Block::default()
        .title(" Search ")
        .title_style(Style::default().fg(ACCENT).add_modifier(Modifier::BOLD))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(ACCENT));

    frame.render_widget(Paragraph::new(app.input.as_str()).block(block), area);

    let x = cursor_x(area, &app.input, app.cursor);
    frame.set_cursor_position(Position::new(x, area.y + 1));
}

/// Screen column for the cursor, kept inside the box border
fn cursor_x(area: Rect, input: &str, cursor: usize) -> u16 {
    let column = u16::try_from(input[..cursor].chars().count()).unwrap_or(u16::MAX);
    area.x
        .saturating_add(1)
        .saturating_add(column)
        .min(area.right().saturating_sub(2))
}

/// Split a dotted name into (parent path with trailing dot, short name)
fn split_name(text: &str) -> (&str, &str) {
    match text.rfind('.') {
        Some(idx) => (&text[..=idx], &text[idx + 1..]),
        None => ("", text),
    }
}

fn link_item<'a>(link: &'a ResultLink, selected: bool) -> ListItem<'a> {
    let (parent, short) = split_name(&link.text);
    let name_style = if selected {
        Style::default().fg(HIGHLIGHT).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::White)
    };
    let marker = if selected { "> " } else { "  " };

    ListItem::new(Line::from(vec![
        Span::styled(marker, Style::default().fg(HIGHLIGHT)),
        Span::styled(parent, Style::default().fg(DIM)),
        Span::styled(short, name_style),
        Span::raw("  "),
        Span::styled(link.href.as_str(), Style::default().fg(SECONDARY)),
    ]))
}

/// Render the results container (or a hint while it is hidden)
fn render_results(frame: &mut Frame, app: &App, area: Rect) {
    let results = app.results();

    let title = if results.is_visible() {
        format!(" {} ({} links) ", results.id(), results.links().count())
    } else {
        format!(" {} ", results.id())
    };

    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(SECONDARY));

    if !results.is_visible() {
        let hint = vec![
            Line::from(Span::styled(
                format!("{} symbols indexed", app.widget.index().len()),
                Style::default().fg(DIM),
            )),
            Line::from(""),
            Line::from(Span::styled(
                "Type a pattern to search. Matching ignores case.",
                Style::default().fg(DIM),
            )),
        ];
        frame.render_widget(Paragraph::new(hint).block(block), area);
        return;
    }

    // Keep the selection on screen
    let visible_rows = area.height.saturating_sub(2) as usize;
    let skip = if visible_rows == 0 {
        0
    } else {
        app.selected.saturating_sub(visible_rows - 1)
    };

    let mut link_pos = 0;
    let items: Vec<ListItem> = results
        .rows()
        .iter()
        .map(|row| match row {
            ResultRow::Link(link) => {
                let item = link_item(link, link_pos == app.selected);
                link_pos += 1;
                item
            }
            ResultRow::Placeholder { text } => ListItem::new(Line::from(Span::styled(
                format!("  {}", text),
                Style::default().fg(DIM).add_modifier(Modifier::ITALIC),
            ))),
        })
        .skip(skip)
        .collect();

    frame.render_widget(List::new(items).block(block), area);
}

fn render_status_bar(frame: &mut Frame, app: &App, area: Rect) {
    let help_text = "Type:search  Up/Down:select  Enter:open  Esc:hide  Ctrl+U:clear  Ctrl+C:quit";

    let mut spans = vec![
        Span::styled(" SEARCH ", Style::default().bg(ACCENT).fg(Color::Black)),
        Span::raw(" "),
        Span::styled(help_text, Style::default().fg(DIM)),
    ];
    if let Some(ref msg) = app.status_message {
        spans.push(Span::raw(" "));
        spans.push(Span::styled(msg.as_str(), Style::default().fg(ERROR)));
    }

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}
