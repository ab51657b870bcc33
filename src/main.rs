//! Roster TUI - Actor-based student and course management client
//!
//! Architecture:
//! - UI Layer (Ratatui) - synchronous terminal rendering
//! - App Layer - central state machine processing events
//! - Network Layer (Tokio) - async HTTP execution

use std::io;
use std::time::Duration;
use crossterm::{
    event::{self, Event},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    prelude::*,
    widgets::*,
};
use tokio::sync::mpsc;

use roster_tui::app::{AppActor, AppState};
use roster_tui::config::Config;
use roster_tui::constants::{APP_NAME, APP_VERSION};
use roster_tui::messages::ui_events::{key_to_ui_event, AppTab, Field, InputMode};
use roster_tui::messages::{NetworkCommand, NetworkResponse, RenderState, UiEvent};
use roster_tui::network::{ApiClient, NetworkActor};
use roster_tui::ui::{self, action_hint, banner_lines, method_color, status_color};

/// Terminal cleanup guard
struct TerminalGuard;

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::load()?;

    // Initialize logging to file
    let file_appender = tracing_appender::rolling::never(&config.log_dir, &config.log_file);
    let (non_blocking, _log_guard) = tracing_appender::non_blocking(file_appender);
    tracing_subscriber::fmt()
        .with_writer(non_blocking)
        .with_ansi(false)
        .init();

    tracing::info!(base_url = %config.api_base_url, timeout_secs = config.timeout_secs, "Starting {}", APP_NAME);
    let client = ApiClient::new(&config.api_base_url, config.timeout())?;

    // Terminal setup
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let _guard = TerminalGuard;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Create channels
    let (ui_tx, ui_rx) = mpsc::unbounded_channel::<UiEvent>();
    let (net_cmd_tx, net_cmd_rx) = mpsc::unbounded_channel::<NetworkCommand>();
    let (net_resp_tx, net_resp_rx) = mpsc::unbounded_channel::<NetworkResponse>();
    let (render_tx, mut render_rx) = mpsc::unbounded_channel::<RenderState>();

    // Spawn network actor
    let network_actor = NetworkActor::new(client, net_resp_tx);
    tokio::spawn(network_actor.run(net_cmd_rx));

    // Spawn app actor
    let app_actor = AppActor::new(AppState::new(&config.api_base_url), net_cmd_tx, render_tx);
    tokio::spawn(app_actor.run(ui_rx, net_resp_rx));

    // Run UI loop (synchronous with async polling)
    run_ui_loop(&mut terminal, ui_tx, &mut render_rx).await?;

    tracing::info!("Shutting down");
    Ok(())
}

/// Run the synchronous UI rendering loop
async fn run_ui_loop(
    terminal: &mut Terminal<impl Backend>,
    ui_tx: mpsc::UnboundedSender<UiEvent>,
    render_rx: &mut mpsc::UnboundedReceiver<RenderState>,
) -> anyhow::Result<()> {
    let mut current_state = RenderState::default();

    loop {
        // Draw with current state
        terminal.draw(|f| draw_ui(f, &current_state))?;

        // Poll for events with timeout
        if event::poll(Duration::from_millis(50))? {
            if let Event::Key(key) = event::read()? {
                if let Some(event) = key_to_ui_event(
                    key,
                    current_state.active_tab,
                    current_state.input_mode,
                    current_state.show_help,
                ) {
                    let quit = matches!(event, UiEvent::Quit);
                    let _ = ui_tx.send(event);
                    if quit {
                        break;
                    }
                }
            }
        }

        // Check for state updates (non-blocking)
        while let Ok(state) = render_rx.try_recv() {
            current_state = state;
        }
    }

    Ok(())
}

// ============================================================================
// UI Drawing Functions
// ============================================================================

fn draw_ui(f: &mut Frame, state: &RenderState) {
    let area = f.area();

    let main_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),  // Title
            Constraint::Length(1),  // Tab bar
            Constraint::Min(0),     // Content
            Constraint::Length(1),  // Status bar
        ])
        .split(area);

    let title = Line::from(vec![
        Span::styled(format!(" {} ", APP_NAME), Style::default().fg(Color::Black).bg(Color::Cyan).bold()),
        Span::styled(format!(" v{}", APP_VERSION), Style::default().fg(Color::DarkGray)),
    ]);
    f.render_widget(Paragraph::new(title), main_chunks[0]);

    draw_tab_bar(f, state, main_chunks[1]);

    match state.active_tab {
        AppTab::Students => draw_students_tab(f, state, main_chunks[2]),
        AppTab::Courses => draw_courses_tab(f, state, main_chunks[2]),
        AppTab::Enrollments => draw_enrollments_tab(f, state, main_chunks[2]),
    }

    draw_status_bar(f, state, main_chunks[3]);

    if state.show_help {
        draw_help_popup(f, area);
    }
}

fn draw_tab_bar(f: &mut Frame, state: &RenderState, area: Rect) {
    let titles: Vec<String> = AppTab::ALL
        .iter()
        .map(|tab| {
            let busy = if state.is_busy(*tab) { " [...]" } else { "" };
            format!(" {}:{}{} ", tab.index() + 1, tab.title(), busy)
        })
        .collect();
    let titles: Vec<&str> = titles.iter().map(String::as_str).collect();

    f.render_widget(ui::render_tabs(&titles, state.active_tab.index()), area);
}

/// Draw one input, placing the terminal cursor when it is being edited
fn draw_field(f: &mut Frame, state: &RenderState, field: Field, area: Rect) {
    let focused = state.focused_field == field;
    let editing = focused && state.input_mode == InputMode::Editing;
    let content = state.field(field);

    f.render_widget(ui::render_input(content, field.label(), focused, editing), area);

    if editing {
        let before = content.get(..state.cursor_position).unwrap_or(content);
        let max_x = area.x + area.width.saturating_sub(2);
        let cursor_x = (area.x + before.chars().count() as u16 + 1).min(max_x);
        f.set_cursor_position(Position::new(cursor_x, area.y + 1));
    }
}

fn draw_field_row(f: &mut Frame, state: &RenderState, fields: &[(Field, u16)], area: Rect) {
    let constraints: Vec<Constraint> = fields.iter().map(|(_, pct)| Constraint::Percentage(*pct)).collect();
    let cells = Layout::default()
        .direction(Direction::Horizontal)
        .constraints(constraints)
        .split(area);

    for ((field, _), cell) in fields.iter().zip(cells.iter()) {
        draw_field(f, state, *field, *cell);
    }
}

fn draw_banner(f: &mut Frame, state: &RenderState, tab: AppTab, area: Rect) {
    let banner = match tab {
        AppTab::Students => &state.students.banner,
        AppTab::Courses => &state.courses.banner,
        AppTab::Enrollments => &state.enrollments.banner,
    };
    f.render_widget(Paragraph::new(banner_lines(banner)).wrap(Wrap { trim: true }), area);
}

fn draw_hints(f: &mut Frame, hints: &[(&'static str, &'static str)], busy: bool, area: Rect) {
    let mut spans: Vec<Span> = hints
        .iter()
        .flat_map(|&(key, label)| action_hint(key, label, busy))
        .collect();
    if busy {
        spans.push(Span::styled(" request in flight...", Style::default().fg(Color::Yellow)));
    }
    f.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn section_block(title: &str) -> Block<'_> {
    Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray))
        .title(title)
}

fn draw_students_tab(f: &mut Frame, state: &RenderState, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2),  // Banner
            Constraint::Length(5),  // Add / new info
            Constraint::Length(5),  // Lookup
            Constraint::Length(1),  // Actions
            Constraint::Min(3),     // Fetched student
        ])
        .split(area);

    draw_banner(f, state, AppTab::Students, chunks[0]);

    let add_block = section_block(" Add Student / New Info for Update ");
    let add_inner = add_block.inner(chunks[1]);
    f.render_widget(add_block, chunks[1]);
    draw_field_row(f, state, &[(Field::StudentName, 50), (Field::StudentEmail, 50)], add_inner);

    let lookup_block = section_block(" Find, Update, or Delete Student by ID ");
    let lookup_inner = lookup_block.inner(chunks[2]);
    f.render_widget(lookup_block, chunks[2]);
    draw_field_row(f, state, &[(Field::StudentId, 40)], lookup_inner);

    draw_hints(
        f,
        &[("a", "add"), ("g", "get"), ("u", "update (uses fields above)"), ("d", "delete")],
        state.is_busy(AppTab::Students),
        chunks[3],
    );

    let details = match &state.students.fetched {
        Some(student) => vec![
            Line::from(format!("Name: {}", student.name)),
            Line::from(format!("Email: {}", student.email)),
        ],
        None => vec![Line::from(Span::styled(
            "Enter a Student ID and press 'g' to fetch.",
            Style::default().fg(Color::DarkGray),
        ))],
    };
    f.render_widget(
        Paragraph::new(details).block(section_block(" Fetched Student Details ")),
        chunks[4],
    );
}

fn draw_courses_tab(f: &mut Frame, state: &RenderState, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2),  // Banner
            Constraint::Length(5),  // Add / new name
            Constraint::Length(5),  // Lookup key
            Constraint::Length(1),  // Actions
            Constraint::Min(3),     // Fetched course
        ])
        .split(area);

    draw_banner(f, state, AppTab::Courses, chunks[0]);

    let add_block = section_block(" Add Course / New Name for Update ");
    let add_inner = add_block.inner(chunks[1]);
    f.render_widget(add_block, chunks[1]);
    draw_field_row(
        f,
        state,
        &[(Field::CourseName, 42), (Field::CourseNumber, 29), (Field::CourseDepartment, 29)],
        add_inner,
    );

    let lookup_block = section_block(" Find, Update, or Delete Course ");
    let lookup_inner = lookup_block.inner(chunks[2]);
    f.render_widget(lookup_block, chunks[2]);
    draw_field_row(
        f,
        state,
        &[(Field::LookupNumber, 50), (Field::LookupDepartment, 50)],
        lookup_inner,
    );

    draw_hints(
        f,
        &[("a", "add"), ("f", "find"), ("u", "update name (uses name field above)"), ("d", "delete")],
        state.is_busy(AppTab::Courses),
        chunks[3],
    );

    let details = match &state.courses.fetched {
        Some(course) => vec![Line::from(format!("Name: {}", course.name))],
        None => vec![Line::from(Span::styled(
            "Enter a course number and department, then press 'f' to find.",
            Style::default().fg(Color::DarkGray),
        ))],
    };
    f.render_widget(
        Paragraph::new(details).block(section_block(" Fetched Course Details ")),
        chunks[4],
    );
}

fn draw_enrollments_tab(f: &mut Frame, state: &RenderState, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2),  // Banner
            Constraint::Length(5),  // Add / delete form
            Constraint::Length(1),  // Actions
            Constraint::Min(3),     // Current enrollments
        ])
        .split(area);

    draw_banner(f, state, AppTab::Enrollments, chunks[0]);

    let form_block = section_block(" Add/Delete Enrollment ");
    let form_inner = form_block.inner(chunks[1]);
    f.render_widget(form_block, chunks[1]);
    draw_field_row(
        f,
        state,
        &[
            (Field::EnrollmentStudentId, 34),
            (Field::EnrollmentNumber, 33),
            (Field::EnrollmentDepartment, 33),
        ],
        form_inner,
    );

    draw_hints(
        f,
        &[("a", "add"), ("d", "delete"), ("r", "refresh"), ("↑/↓", "scroll")],
        state.is_busy(AppTab::Enrollments),
        chunks[2],
    );

    let refreshing = if state.refreshing { " [refreshing]" } else { "" };
    let title = format!(" Current Enrollments ({}){} ", state.enrollments.enrollments.len(), refreshing);

    if state.enrollments.enrollments.is_empty() {
        let empty = Paragraph::new(Span::styled(
            "No enrollments found or could not load them.",
            Style::default().fg(Color::DarkGray),
        ))
        .block(section_block(&title));
        f.render_widget(empty, chunks[3]);
        return;
    }

    let items: Vec<ListItem> = state
        .enrollments
        .enrollments
        .iter()
        .map(|e| ListItem::new(format!("Student ID: {} - Course ID: {}", e.student_id, e.course_id)))
        .collect();

    let list = List::new(items)
        .block(section_block(&title))
        .highlight_style(Style::default().fg(Color::Yellow).bold());

    let mut list_state = ListState::default();
    list_state.select(Some(state.enrollments.list_scroll as usize));
    f.render_stateful_widget(list, chunks[3], &mut list_state);
}

fn draw_status_bar(f: &mut Frame, state: &RenderState, area: Rect) {
    let hint = if state.input_mode == InputMode::Editing {
        " ESC:stop editing | arrows:move | Tab:next field "
    } else {
        " 1-3:tab | Tab:field | e:edit | x:dismiss | ?:help | q:quit "
    };

    let mut spans = vec![Span::styled(hint, Style::default().fg(Color::DarkGray))];

    if let Some(exchange) = &state.last_exchange {
        spans.push(Span::styled(
            format!(" {} ", exchange.method),
            Style::default().fg(method_color(exchange.method.as_str())).bold(),
        ));
        spans.push(Span::raw(exchange.path.clone()));
        match exchange.status {
            Some(code) => {
                spans.push(Span::styled(format!(" {}", code), Style::default().fg(status_color(code)).bold()));
                spans.push(Span::styled(format!(" {}ms", exchange.time_ms), Style::default().fg(Color::DarkGray)));
            }
            None => spans.push(Span::styled(" ...", Style::default().fg(Color::Yellow))),
        }
    }

    spans.push(Span::styled(format!("  @ {}", state.api_base), Style::default().fg(Color::DarkGray)));
    f.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn draw_help_popup(f: &mut Frame, area: Rect) {
    let popup_area = centered_rect(60, 70, area);

    let help_text = r#"
 ROSTER TUI - Keyboard Shortcuts

 NAVIGATION
   1 / 2 / 3          Students / Courses / Enrollments
   ← / →              Previous / next tab
   Tab / Shift+Tab    Next / previous field
   e / Enter          Edit focused field (Esc to stop)

 STUDENTS
   a  add    g  get by ID    u  update by ID    d  delete by ID

 COURSES
   a  add    f  find    u  rename    d  delete
   (find/update/delete use the identifier fields)

 ENROLLMENTS
   a  add    d  delete    r  refresh    ↑ / ↓  scroll

 GENERAL
   x                  Dismiss messages
   ?                  Toggle this help
   q / Ctrl+C         Quit

 Press any key to close...
"#;

    let block = Block::default()
        .borders(Borders::ALL)
        .title(" Help ")
        .style(Style::default().bg(Color::Black));

    let help = Paragraph::new(help_text)
        .block(block)
        .wrap(Wrap { trim: false });

    f.render_widget(Clear, popup_area);
    f.render_widget(help, popup_area);
}

fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}
