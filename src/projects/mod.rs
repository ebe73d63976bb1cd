// Project pipeline.
// Source, selection policy, and the cached loader that drives the grid.

pub mod loader;
pub mod selector;
pub mod source;

pub use loader::{LoadOrigin, ProjectLoader};
pub use selector::{FilterPolicy, MAX_PROJECTS, ProjectListing, select};
pub use source::RepoSource;
