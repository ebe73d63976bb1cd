// State management module.
// Holds the projects view state driven by user requests.

pub mod projects;

pub use projects::{
    DEFAULT_USERNAME, LoadingState, Notification, NotificationKind, ProjectRequests,
    ProjectsState, resolve_identity,
};
