// Fetch-or-serve-cached project loading.
// Ties the repository source, selection policy, and listing cache together.

use tracing::{debug, info, warn};

use crate::cache::{Clock, ProjectCache, SystemClock};
use crate::error::{FolioError, Result};

use super::selector::{self, FilterPolicy, ProjectListing};
use super::source::RepoSource;

/// Where a loaded listing came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOrigin {
    Cache,
    Source,
}

/// Loads project listings, serving fresh cached results without a request.
///
/// The loader owns its cache for the whole session. Calls take `&mut self`,
/// so loads for one loader never overlap and no coalescing is needed.
pub struct ProjectLoader<S, C: Clock = SystemClock> {
    source: S,
    cache: ProjectCache<C>,
}

impl<S: RepoSource> ProjectLoader<S, SystemClock> {
    pub fn new(source: S) -> Self {
        Self::with_cache(source, ProjectCache::new())
    }
}

impl<S: RepoSource, C: Clock> ProjectLoader<S, C> {
    pub fn with_cache(source: S, cache: ProjectCache<C>) -> Self {
        Self { source, cache }
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    pub fn cache(&self) -> &ProjectCache<C> {
        &self.cache
    }

    /// Load the projects for `identity` under `policy`.
    ///
    /// A fresh cache entry selected under the same policy is returned as is.
    /// Otherwise the source is queried once; on failure the error is returned
    /// and any existing entry is left untouched.
    pub async fn load_projects(
        &mut self,
        identity: &str,
        policy: FilterPolicy,
        force_refresh: bool,
    ) -> Result<ProjectListing> {
        self.load_with_origin(identity, policy, force_refresh)
            .await
            .map(|(listing, _)| listing)
    }

    /// Like [`load_projects`](Self::load_projects), also reporting whether
    /// the listing was served from cache or fetched.
    pub async fn load_with_origin(
        &mut self,
        identity: &str,
        policy: FilterPolicy,
        force_refresh: bool,
    ) -> Result<(ProjectListing, LoadOrigin)> {
        let identity = identity.trim();
        if identity.is_empty() {
            return Err(FolioError::Validation);
        }

        if force_refresh {
            self.cache.invalidate(identity);
        }

        if let Some(entry) = self.cache.get(identity) {
            if entry.policy == policy {
                debug!(identity, count = entry.listing.len(), "serving cached listing");
                return Ok((entry.listing.clone(), LoadOrigin::Cache));
            }
            debug!(identity, "cached listing has a different policy");
        }

        let raw = match self.source.fetch_repos(identity).await {
            Ok(raw) => raw,
            Err(e) => {
                warn!(identity, error = %e, "failed to fetch repositories");
                return Err(e);
            }
        };

        let listing = selector::select(&raw, policy);
        info!(
            identity,
            fetched = raw.len(),
            selected = listing.len(),
            include_forks = policy.include_forks,
            "loaded projects"
        );
        self.cache.put(identity, listing.clone(), policy);
        Ok((listing, LoadOrigin::Source))
    }

    /// Drop the cached listing for `identity`.
    pub fn invalidate(&mut self, identity: &str) {
        self.cache.invalidate(identity.trim());
    }
}
