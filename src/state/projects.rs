// Projects view state.
// Maps load outcomes onto what the grid and status line display.

use std::future::Future;
use std::time::{Duration, Instant};

use ratatui::widgets::ListState;

use crate::cache::{Clock, SystemClock};
use crate::error::FolioError;
use crate::projects::{FilterPolicy, LoadOrigin, ProjectListing, ProjectLoader, RepoSource};

/// Fallback username when the input is blank.
pub const DEFAULT_USERNAME: &str = "israelng334";

/// The trimmed `input`, or the trimmed `default` when the input is blank.
pub fn resolve_identity(input: &str, default: &str) -> String {
    let typed = input.trim();
    if typed.is_empty() {
        default.trim().to_string()
    } else {
        typed.to_string()
    }
}

/// How long a notification stays on the status line.
const NOTIFICATION_TTL: Duration = Duration::from_secs(5);

/// Loading state for async data.
#[derive(Debug, Clone, Default)]
pub enum LoadingState<T> {
    #[default]
    Idle,
    Loading,
    Loaded(T),
    Error(String),
}

impl<T> LoadingState<T> {
    pub fn is_loading(&self) -> bool {
        matches!(self, LoadingState::Loading)
    }

    pub fn data(&self) -> Option<&T> {
        match self {
            LoadingState::Loaded(data) => Some(data),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationKind {
    Success,
    Error,
}

/// A transient status-line message.
#[derive(Debug, Clone)]
pub struct Notification {
    pub kind: NotificationKind,
    pub message: String,
    pub shown_at: Instant,
}

impl Notification {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            kind: NotificationKind::Success,
            message: message.into(),
            shown_at: Instant::now(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            kind: NotificationKind::Error,
            message: message.into(),
            shown_at: Instant::now(),
        }
    }

    pub fn is_visible(&self) -> bool {
        self.shown_at.elapsed() < NOTIFICATION_TTL
    }
}

/// Requests the presentation layer can make of the project pipeline.
pub trait ProjectRequests {
    /// Load the projects for the current input, from cache when fresh.
    fn on_fetch_requested(&mut self) -> impl Future<Output = ()>;

    /// Drop the cached listing for the current input and load it again.
    fn on_refresh_requested(&mut self) -> impl Future<Output = ()>;
}

/// Complete state for the projects grid.
pub struct ProjectsState<S, C: Clock = SystemClock> {
    loader: ProjectLoader<S, C>,
    /// Username as typed by the user.
    pub input: String,
    default_username: String,
    pub policy: FilterPolicy,
    pub listing: LoadingState<ProjectListing>,
    /// Identity the current listing belongs to.
    pub shown_identity: Option<String>,
    pub list_state: ListState,
    notification: Option<Notification>,
}

impl<S: RepoSource, C: Clock> ProjectsState<S, C> {
    pub fn new(
        loader: ProjectLoader<S, C>,
        default_username: impl Into<String>,
        policy: FilterPolicy,
    ) -> Self {
        let default_username = default_username.into();
        Self {
            loader,
            input: default_username.clone(),
            default_username,
            policy,
            listing: LoadingState::Idle,
            shown_identity: None,
            list_state: ListState::default(),
            notification: None,
        }
    }

    pub fn loader(&self) -> &ProjectLoader<S, C> {
        &self.loader
    }

    /// Identity to request: the trimmed input, or the default when blank.
    pub fn identity(&self) -> String {
        resolve_identity(&self.input, &self.default_username)
    }

    /// Show the loading indicator ahead of an announced request.
    ///
    /// A blank identity will be rejected before any request, so the current
    /// listing stays on screen.
    pub fn begin_loading(&mut self) {
        if !self.identity().is_empty() {
            self.listing = LoadingState::Loading;
        }
    }

    /// Load the starting identity without announcing the result.
    pub async fn load_initial(&mut self) {
        self.load(false, false).await;
    }

    pub fn toggle_forks(&mut self) {
        self.policy = self.policy.toggled_forks();
    }

    /// Number of projects currently displayed.
    pub fn project_count(&self) -> usize {
        self.listing.data().map_or(0, |listing| listing.len())
    }

    /// Current notification, if it has not timed out.
    pub fn notification(&self) -> Option<&Notification> {
        self.notification.as_ref().filter(|n| n.is_visible())
    }

    pub fn notify(&mut self, notification: Notification) {
        self.notification = Some(notification);
    }

    async fn load(&mut self, announce: bool, force_refresh: bool) {
        let identity = self.identity();

        match self
            .loader
            .load_with_origin(&identity, self.policy, force_refresh)
            .await
        {
            Ok((listing, origin)) => {
                if announce && origin == LoadOrigin::Source {
                    self.notify(Notification::success(format!(
                        "Loaded {} projects for {}",
                        listing.len(),
                        identity
                    )));
                }
                self.list_state
                    .select(if listing.is_empty() { None } else { Some(0) });
                self.listing = LoadingState::Loaded(listing);
                self.shown_identity = Some(identity);
            }
            Err(FolioError::Validation) => {
                self.notify(Notification::error("Please enter a GitHub username"));
            }
            Err(e) => {
                self.notify(Notification::error(
                    "Failed to fetch GitHub projects. Please check the username and try again.",
                ));
                self.list_state.select(None);
                self.listing = LoadingState::Error(e.to_string());
                self.shown_identity = Some(identity);
            }
        }
    }

    /// Select the previous project.
    pub fn select_prev(&mut self) {
        if self.project_count() == 0 {
            return;
        }
        let i = self.list_state.selected().map_or(0, |i| i.saturating_sub(1));
        self.list_state.select(Some(i));
    }

    /// Select the next project.
    pub fn select_next(&mut self) {
        let count = self.project_count();
        if count == 0 {
            return;
        }
        let i = self
            .list_state
            .selected()
            .map_or(0, |i| (i + 1).min(count - 1));
        self.list_state.select(Some(i));
    }
}

impl<S: RepoSource, C: Clock> ProjectRequests for ProjectsState<S, C> {
    async fn on_fetch_requested(&mut self) {
        self.load(true, false).await;
    }

    async fn on_refresh_requested(&mut self) {
        self.load(true, true).await;
    }
}
