use ratatui::{prelude::*, widgets::*};

use crate::app::state::Banner;

/// Renders a text input field; focused fields get a yellow border, or cyan
/// while not being edited
pub fn render_input<'a>(content: &'a str, title: &'a str, focused: bool, editing: bool) -> Paragraph<'a> {
    let style = match (focused, editing) {
        (true, true) => Style::default().fg(Color::Yellow),
        (true, false) => Style::default().fg(Color::Cyan),
        _ => Style::default().fg(Color::DarkGray),
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(style)
        .title(format!(" {} ", title));

    Paragraph::new(content).block(block)
}

/// Renders tabs
pub fn render_tabs<'a>(titles: &[&'a str], selected: usize) -> Tabs<'a> {
    let titles: Vec<Line> = titles.iter().map(|t| Line::from(*t)).collect();

    Tabs::new(titles)
        .select(selected)
        .style(Style::default().fg(Color::DarkGray))
        .highlight_style(Style::default().fg(Color::Yellow).bold())
        .divider("|")
}

/// Success and error lines of a section banner
pub fn banner_lines(banner: &Banner) -> Vec<Line<'static>> {
    let mut lines = Vec::new();

    if let Some(notice) = &banner.message {
        lines.push(Line::from(vec![
            Span::styled(" ✓ ", Style::default().fg(Color::Black).bg(Color::Green).bold()),
            Span::styled(format!(" {}", notice.text), Style::default().fg(Color::Green)),
            Span::styled(
                format!("  {}", notice.at.format("%H:%M:%S")),
                Style::default().fg(Color::DarkGray),
            ),
        ]));
    }

    if let Some(notice) = &banner.error {
        lines.push(Line::from(vec![
            Span::styled(" ✗ ", Style::default().fg(Color::White).bg(Color::Red).bold()),
            Span::styled(format!(" {}", notice.text), Style::default().fg(Color::Red)),
            Span::styled(
                format!("  {}", notice.at.format("%H:%M:%S")),
                Style::default().fg(Color::DarkGray),
            ),
        ]));
    }

    lines
}

/// Key hint for a section action; greyed out while the section is busy
pub fn action_hint(key: &'static str, label: &'static str, busy: bool) -> Vec<Span<'static>> {
    let (key_style, label_style) = if busy {
        (Style::default().fg(Color::DarkGray), Style::default().fg(Color::DarkGray))
    } else {
        (Style::default().fg(Color::Yellow).bold(), Style::default())
    };
    vec![
        Span::styled(format!(" {}", key), key_style),
        Span::styled(format!(":{} ", label), label_style),
    ]
}

/// Status code color
pub fn status_color(code: u16) -> Color {
    match code {
        200..=299 => Color::Green,
        300..=399 => Color::Cyan,
        400..=499 => Color::Red,
        500..=599 => Color::Magenta,
        _ => Color::Yellow,
    }
}

/// Method color
pub fn method_color(method: &str) -> Color {
    match method {
        "GET" => Color::Green,
        "POST" => Color::Yellow,
        "PUT" => Color::Blue,
        "DELETE" => Color::Red,
        _ => Color::White,
    }
}
