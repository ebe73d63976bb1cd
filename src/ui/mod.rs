// UI module for rendering the TUI.
// Header with the username input, project grid, and status bar.

pub mod cards;

use ratatui::{prelude::*, widgets::*};

use crate::app::{App, InputMode};
use crate::state::{LoadingState, NotificationKind};

/// Main draw function that renders the entire UI.
pub fn draw(frame: &mut Frame, app: &mut App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Username and filter controls
            Constraint::Min(1),    // Project grid
            Constraint::Length(1), // Status bar
        ])
        .split(frame.area());

    draw_header(frame, app, chunks[0]);
    draw_projects(frame, app, chunks[1]);
    draw_status_bar(frame, app, chunks[2]);

    // Help overlay (rendered last, on top of everything)
    if app.show_help {
        draw_help_overlay(frame);
    }
}

fn draw_header(frame: &mut Frame, app: &App, area: Rect) {
    let editing = app.mode == InputMode::Editing;
    let border_color = if editing { Color::Cyan } else { Color::DarkGray };

    let mut spans = vec![
        Span::styled("GitHub user: ", Style::default().fg(Color::DarkGray)),
        Span::raw(app.projects.input.as_str()),
    ];
    if editing {
        spans.push(Span::styled("█", Style::default().fg(Color::Yellow)));
    }

    let (forks_label, forks_color) = if app.projects.policy.include_forks {
        ("included", Color::Green)
    } else {
        ("hidden", Color::DarkGray)
    };
    spans.push(Span::styled("   Forks: ", Style::default().fg(Color::DarkGray)));
    spans.push(Span::styled(forks_label, Style::default().fg(forks_color)));

    let header = Paragraph::new(Line::from(spans)).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(border_color))
            .title(" folio "),
    );
    frame.render_widget(header, area);
}

fn draw_projects(frame: &mut Frame, app: &App, area: Rect) {
    let title = match &app.projects.shown_identity {
        Some(identity) => format!(" Projects · {} ({}) ", identity, app.projects.project_count()),
        None => " Projects ".to_string(),
    };
    let block = Block::default().borders(Borders::ALL).title(title);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    match &app.projects.listing {
        LoadingState::Idle => render_message(
            frame,
            inner,
            "Press Enter to load projects",
            Color::DarkGray,
        ),
        LoadingState::Loading => render_message(frame, inner, "⏳ Loading projects...", Color::Yellow),
        LoadingState::Error(e) => {
            let text = vec![
                Line::from(Span::styled(
                    "No projects found",
                    Style::default().fg(Color::DarkGray),
                )),
                Line::from(Span::styled(format!("❌ {}", e), Style::default().fg(Color::Red))),
            ];
            frame.render_widget(Paragraph::new(text).alignment(Alignment::Center), inner);
        }
        LoadingState::Loaded(listing) if listing.is_empty() => {
            render_message(frame, inner, "No projects found", Color::DarkGray)
        }
        LoadingState::Loaded(listing) => {
            cards::render_grid(frame, listing, app.projects.list_state.selected(), inner)
        }
    }
}

fn render_message(frame: &mut Frame, area: Rect, message: &str, color: Color) {
    let text = Paragraph::new(message)
        .alignment(Alignment::Center)
        .style(Style::default().fg(color));
    frame.render_widget(text, area);
}

/// Draw the status bar with a notification or keybinding hints, plus rate limit.
fn draw_status_bar(frame: &mut Frame, app: &App, area: Rect) {
    let mut spans = match app.projects.notification() {
        Some(note) => {
            let color = match note.kind {
                NotificationKind::Success => Color::Green,
                NotificationKind::Error => Color::Red,
            };
            vec![Span::styled(
                format!(" {}", note.message),
                Style::default().fg(color),
            )]
        }
        None if app.mode == InputMode::Editing => vec![
            Span::raw(" ↵ "),
            Span::styled("Load", Style::default().fg(Color::DarkGray)),
            Span::raw("  Esc "),
            Span::styled("Done", Style::default().fg(Color::DarkGray)),
        ],
        None => vec![
            Span::raw(" u "),
            Span::styled("User", Style::default().fg(Color::DarkGray)),
            Span::raw("  ↵ "),
            Span::styled("Load", Style::default().fg(Color::DarkGray)),
            Span::raw("  r "),
            Span::styled("Refresh", Style::default().fg(Color::DarkGray)),
            Span::raw("  f "),
            Span::styled("Forks", Style::default().fg(Color::DarkGray)),
            Span::raw("  e "),
            Span::styled("Export", Style::default().fg(Color::DarkGray)),
            Span::raw("  ? "),
            Span::styled("Help", Style::default().fg(Color::DarkGray)),
            Span::raw("  q "),
            Span::styled("Quit", Style::default().fg(Color::DarkGray)),
        ],
    };

    let rate = app.projects.loader().source().rate_limit();
    if rate.is_known() {
        let rate_color = if rate.remaining < 10 {
            Color::Red
        } else if rate.remaining < 30 {
            Color::Yellow
        } else {
            Color::DarkGray
        };
        spans.push(Span::styled(
            format!("  API: {}/{}", rate.remaining, rate.limit),
            Style::default().fg(rate_color),
        ));
    }

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

/// Draw the help overlay.
fn draw_help_overlay(frame: &mut Frame) {
    let area = frame.area();

    let popup_width = 48u16.min(area.width);
    let popup_height = 15u16.min(area.height);
    let popup_x = (area.width.saturating_sub(popup_width)) / 2;
    let popup_y = (area.height.saturating_sub(popup_height)) / 2;
    let popup_area = Rect::new(popup_x, popup_y, popup_width, popup_height);

    // Clear the area behind the popup
    frame.render_widget(Clear, popup_area);

    let key = |k: &'static str, what: &'static str| {
        Line::from(vec![
            Span::styled(k, Style::default().fg(Color::Cyan)),
            Span::raw(what),
        ])
    };

    let help_text = vec![
        Line::from(Span::styled(
            "Keyboard Shortcuts",
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        key("  u or /        ", "Edit username"),
        key("  Enter         ", "Load projects"),
        key("  r             ", "Refresh (skip cache)"),
        key("  f             ", "Toggle forks"),
        key("  ↑/↓ or k/j    ", "Select project"),
        key("  e             ", "Export cached data"),
        key("  ?             ", "Show/hide this help"),
        key("  q             ", "Quit"),
        Line::from(""),
        Line::from(vec![
            Span::styled("Press ", Style::default().fg(Color::DarkGray)),
            Span::styled("Esc", Style::default().fg(Color::Yellow)),
            Span::styled(" or ", Style::default().fg(Color::DarkGray)),
            Span::styled("?", Style::default().fg(Color::Yellow)),
            Span::styled(" to close", Style::default().fg(Color::DarkGray)),
        ]),
    ];

    let help_paragraph = Paragraph::new(help_text).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan))
            .title(" Help ")
            .title_style(
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            ),
    );

    frame.render_widget(help_paragraph, popup_area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::github::{GITHUB_API_BASE, GitHubClient};
    use crate::projects::selector::tests::repo;
    use crate::projects::{FilterPolicy, ProjectLoader};
    use crate::state::ProjectsState;
    use ratatui::backend::TestBackend;

    fn app() -> App {
        let client = GitHubClient::new(GITHUB_API_BASE, None).unwrap();
        let projects =
            ProjectsState::new(ProjectLoader::new(client), "alice", FilterPolicy::default());
        App::new(projects)
    }

    fn render(app: &mut App) -> String {
        let mut terminal = Terminal::new(TestBackend::new(100, 30)).unwrap();
        terminal.draw(|frame| draw(frame, app)).unwrap();
        terminal
            .backend()
            .buffer()
            .content
            .iter()
            .map(|cell| cell.symbol())
            .collect()
    }

    #[test]
    fn test_draw_grid() {
        let mut app = app();
        app.projects.listing =
            LoadingState::Loaded(vec![repo("alpha", 2, false, false), repo("beta", 1, false, true)]);
        app.projects.shown_identity = Some("alice".to_string());

        let screen = render(&mut app);
        assert!(screen.contains("GitHub user: alice"));
        assert!(screen.contains("Projects · alice (2)"));
        assert!(screen.contains("alpha"));
        assert!(screen.contains("beta ⑂ Fork"));
    }

    #[test]
    fn test_draw_empty_and_error() {
        let mut app = app();
        app.projects.listing = LoadingState::Loaded(vec![]);
        assert!(render(&mut app).contains("No projects found"));

        app.projects.listing = LoadingState::Error("GitHub API error: HTTP 404".to_string());
        let screen = render(&mut app);
        assert!(screen.contains("No projects found"));
        assert!(screen.contains("HTTP 404"));
    }

    #[test]
    fn test_draw_help_overlay() {
        let mut app = app();
        app.show_help = true;
        assert!(render(&mut app).contains("Keyboard Shortcuts"));
    }
}
