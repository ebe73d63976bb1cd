// Cache module.
// In-memory listing cache plus the filesystem paths folio writes to.

pub mod clock;
pub mod paths;
pub mod store;

#[cfg(test)]
pub use clock::ManualClock;
pub use clock::{Clock, SystemClock};
pub use store::{CacheEntry, DEFAULT_TTL, ProjectCache};
