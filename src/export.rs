// Portfolio data export.
// Writes every cached listing to a JSON document.

use std::fs;
use std::io::Write;
use std::path::Path;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::cache::{CacheEntry, Clock, ProjectCache};
use crate::error::Result;

pub const EXPORT_VERSION: &str = "1.0";

/// Exported document.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PortfolioExport {
    pub projects: Vec<CacheEntry>,
    pub export_date: DateTime<Utc>,
    pub version: String,
}

impl PortfolioExport {
    /// Snapshot the cache, ordered by identity for stable output.
    pub fn from_cache<C: Clock>(cache: &ProjectCache<C>) -> Self {
        let mut projects: Vec<CacheEntry> = cache.entries().cloned().collect();
        projects.sort_by(|a, b| a.identity.cmp(&b.identity));
        Self {
            projects,
            export_date: Utc::now(),
            version: EXPORT_VERSION.to_string(),
        }
    }
}

/// Write the cached listings to `path` as pretty JSON.
pub fn export_portfolio_data<C: Clock>(cache: &ProjectCache<C>, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }

    let export = PortfolioExport::from_cache(cache);
    let json = serde_json::to_string_pretty(&export)?;

    // Write atomically via temp file
    let temp_path = path.with_extension("tmp");
    let mut file = fs::File::create(&temp_path)?;
    file.write_all(json.as_bytes())?;
    file.sync_all()?;
    fs::rename(&temp_path, path)?;

    info!(path = %path.display(), identities = export.projects.len(), "exported portfolio data");
    Ok(())
}
