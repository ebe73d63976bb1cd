// App state and main event loop.
// Translates keyboard input into project requests and redraws between them.

use std::io;
use std::path::PathBuf;
use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind};
use ratatui::prelude::*;
use tracing::error;

use crate::cache::paths;
use crate::export::export_portfolio_data;
use crate::github::GitHubClient;
use crate::state::{Notification, ProjectRequests, ProjectsState};
use crate::ui;

/// Whether keystrokes edit the username or drive the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InputMode {
    #[default]
    Normal,
    Editing,
}

/// Work requested by a keypress that needs more than a state change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Fetch,
    Refresh,
    Export,
}

/// Main application state.
pub struct App {
    pub projects: ProjectsState<GitHubClient>,
    pub mode: InputMode,
    /// Whether the help overlay is visible.
    pub show_help: bool,
    /// Whether the app should exit.
    pub should_quit: bool,
    export_path: Option<PathBuf>,
}

impl App {
    pub fn new(projects: ProjectsState<GitHubClient>) -> Self {
        Self {
            projects,
            mode: InputMode::default(),
            show_help: false,
            should_quit: false,
            export_path: paths::export_path(),
        }
    }

    /// Main event loop.
    pub async fn run(&mut self, terminal: &mut Terminal<impl Backend>) -> io::Result<()> {
        terminal.draw(|frame| ui::draw(frame, self))?;
        self.projects.load_initial().await;

        while !self.should_quit {
            terminal.draw(|frame| ui::draw(frame, self))?;
            if let Some(action) = self.poll_action()? {
                self.perform(action, terminal).await?;
            }
        }
        Ok(())
    }

    /// Wait briefly for a key and map it to an action.
    #[allow(clippy::collapsible_if)]
    fn poll_action(&mut self) -> io::Result<Option<Action>> {
        if event::poll(Duration::from_millis(100))? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    return Ok(self.handle_key(key));
                }
            }
        }
        Ok(None)
    }

    async fn perform(
        &mut self,
        action: Action,
        terminal: &mut Terminal<impl Backend>,
    ) -> io::Result<()> {
        match action {
            Action::Fetch | Action::Refresh => {
                self.projects.begin_loading();
                terminal.draw(|frame| ui::draw(frame, self))?;
                if action == Action::Refresh {
                    self.projects.on_refresh_requested().await;
                } else {
                    self.projects.on_fetch_requested().await;
                }
            }
            Action::Export => self.export(),
        }
        Ok(())
    }

    fn export(&mut self) {
        let Some(path) = self.export_path.clone() else {
            self.projects
                .notify(Notification::error("No data directory available for export"));
            return;
        };

        match export_portfolio_data(self.projects.loader().cache(), &path) {
            Ok(()) => self.projects.notify(Notification::success(format!(
                "Exported portfolio data to {}",
                path.display()
            ))),
            Err(e) => {
                error!(error = %e, path = %path.display(), "export failed");
                self.projects
                    .notify(Notification::error(format!("Export failed: {}", e)));
            }
        }
    }

    /// Apply a keypress, returning any work it requests.
    pub fn handle_key(&mut self, key: KeyEvent) -> Option<Action> {
        if self.mode == InputMode::Editing {
            return self.handle_editing_key(key);
        }

        if self.show_help {
            if matches!(key.code, KeyCode::Esc | KeyCode::Char('?') | KeyCode::Char('q')) {
                self.show_help = false;
            }
            return None;
        }

        match key.code {
            KeyCode::Char('q') => self.should_quit = true,
            KeyCode::Char('?') => self.show_help = true,
            KeyCode::Char('u') | KeyCode::Char('/') => self.mode = InputMode::Editing,
            KeyCode::Enter => return Some(Action::Fetch),
            KeyCode::Char('r') => return Some(Action::Refresh),
            KeyCode::Char('f') => {
                self.projects.toggle_forks();
                return Some(Action::Fetch);
            }
            KeyCode::Char('e') => return Some(Action::Export),
            KeyCode::Up | KeyCode::Char('k') => self.projects.select_prev(),
            KeyCode::Down | KeyCode::Char('j') => self.projects.select_next(),
            _ => {}
        }
        None
    }

    fn handle_editing_key(&mut self, key: KeyEvent) -> Option<Action> {
        match key.code {
            KeyCode::Enter => {
                self.mode = InputMode::Normal;
                return Some(Action::Fetch);
            }
            KeyCode::Esc => self.mode = InputMode::Normal,
            KeyCode::Backspace => {
                self.projects.input.pop();
            }
            KeyCode::Char(c) => self.projects.input.push(c),
            _ => {}
        }
        None
    }
}
