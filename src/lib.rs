//! folio - a GitHub user's recent projects as a terminal portfolio grid
//!
//! The project pipeline fetches a user's repositories, selects what to show,
//! and caches the result per user for ten minutes.

pub mod app;
pub mod cache;
pub mod cli;
pub mod error;
pub mod export;
pub mod github;
pub mod projects;
pub mod state;
pub mod ui;

pub use error::{FolioError, Result};
