// In-memory project cache.
// Holds the latest listing per identity and treats old entries as absent.

use std::collections::HashMap;
use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::projects::{FilterPolicy, ProjectListing};

use super::clock::{Clock, SystemClock};

/// Time after which a cached listing is considered stale: 10 minutes.
pub const DEFAULT_TTL: Duration = Duration::from_secs(10 * 60);

/// A cached listing with metadata.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheEntry {
    pub identity: String,
    /// The selected projects.
    pub listing: ProjectListing,
    /// Policy the listing was selected under.
    pub policy: FilterPolicy,
    /// When the listing was stored.
    pub captured_at: DateTime<Utc>,
}

impl CacheEntry {
    /// Check if this entry is stale at `now` based on TTL.
    ///
    /// An entry exactly `ttl` old is already stale.
    pub fn is_expired(&self, now: DateTime<Utc>, ttl: Duration) -> bool {
        let elapsed = now
            .signed_duration_since(self.captured_at)
            .to_std()
            .unwrap_or(Duration::ZERO);

        elapsed >= ttl
    }
}

/// Per-identity listing cache with lazy expiry.
///
/// Stale entries stay in the map until a `put` overwrites them or
/// `invalidate` removes them; `get` just refuses to return them.
#[derive(Debug)]
pub struct ProjectCache<C: Clock = SystemClock> {
    entries: HashMap<String, CacheEntry>,
    ttl: Duration,
    clock: C,
}

impl ProjectCache<SystemClock> {
    pub fn new() -> Self {
        Self::with_clock(SystemClock, DEFAULT_TTL)
    }
}

impl Default for ProjectCache<SystemClock> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: Clock> ProjectCache<C> {
    pub fn with_clock(clock: C, ttl: Duration) -> Self {
        Self {
            entries: HashMap::new(),
            ttl,
            clock,
        }
    }

    /// Fresh entry for `identity`, if any.
    pub fn get(&self, identity: &str) -> Option<&CacheEntry> {
        self.entries
            .get(identity)
            .filter(|entry| !entry.is_expired(self.clock.now(), self.ttl))
    }

    /// Store `listing` for `identity`, replacing any previous entry.
    pub fn put(&mut self, identity: &str, listing: ProjectListing, policy: FilterPolicy) {
        let entry = CacheEntry {
            identity: identity.to_string(),
            listing,
            policy,
            captured_at: self.clock.now(),
        };
        debug!(identity, count = entry.listing.len(), "cached listing");
        self.entries.insert(identity.to_string(), entry);
    }

    /// Remove the entry for `identity`, if present.
    pub fn invalidate(&mut self, identity: &str) {
        if self.entries.remove(identity).is_some() {
            debug!(identity, "invalidated cached listing");
        }
    }

    /// Every stored entry, stale ones included.
    pub fn entries(&self) -> impl Iterator<Item = &CacheEntry> {
        self.entries.values()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
