// GitHub API module.
// Provides the client and listing types for the public repositories endpoint.

pub mod client;
pub mod endpoints;
pub mod types;

pub use client::{GITHUB_API_BASE, GitHubClient};
pub use endpoints::FETCH_PAGE_SIZE;
pub use types::*;
