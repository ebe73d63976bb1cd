// Project selection policy.
// Turns a raw repository listing into the ordered, capped grid contents.

use serde::{Deserialize, Serialize};

use crate::github::Repository;

/// Maximum number of projects shown in the grid.
pub const MAX_PROJECTS: usize = 12;

/// Ordered repositories chosen for display.
pub type ProjectListing = Vec<Repository>;

/// Filter configuration applied when selecting projects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FilterPolicy {
    pub include_forks: bool,
}

impl Default for FilterPolicy {
    fn default() -> Self {
        Self {
            include_forks: true,
        }
    }
}

impl FilterPolicy {
    pub fn toggled_forks(self) -> Self {
        Self {
            include_forks: !self.include_forks,
        }
    }

    fn admits(&self, repo: &Repository) -> bool {
        if repo.archived {
            return false;
        }
        self.include_forks || !repo.fork
    }
}

/// Select the projects to display from a raw listing.
///
/// Archived repositories are always dropped and forks are dropped unless the
/// policy includes them. The remainder is ordered by most recent update, with
/// ties kept in input order, and capped at [`MAX_PROJECTS`].
pub fn select(raw: &[Repository], policy: FilterPolicy) -> ProjectListing {
    let mut selected: ProjectListing = raw
        .iter()
        .filter(|repo| policy.admits(repo))
        .cloned()
        .collect();

    // sort_by is stable, which keeps input order for equal timestamps
    selected.sort_by(|a, b| b.updated_at.cmp(&a.updated_at));
    selected.truncate(MAX_PROJECTS);
    selected
}
