// GitHub API response types.
// Defines the repository listing shape consumed by the project grid.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// GitHub repository as returned by the user repositories endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Repository {
    pub name: String,
    pub description: Option<String>,
    pub language: Option<String>,
    #[serde(default)]
    pub stargazers_count: u64,
    #[serde(default)]
    pub forks_count: u64,
    pub updated_at: DateTime<Utc>,
    pub html_url: String,
    pub homepage: Option<String>,
    #[serde(default)]
    pub archived: bool,
    #[serde(default)]
    pub fork: bool,
}

impl Repository {
    /// Homepage URL, treating GitHub's empty-string homepage as unset.
    pub fn live_demo(&self) -> Option<&str> {
        self.homepage.as_deref().filter(|h| !h.trim().is_empty())
    }
}

/// Rate limit information from response headers.
#[derive(Debug, Clone, Default)]
pub struct RateLimit {
    pub limit: u64,
    pub remaining: u64,
    pub reset: u64,
}

impl RateLimit {
    /// Reset time as a timestamp, once the server has reported one.
    pub fn reset_at(&self) -> Option<DateTime<Utc>> {
        if self.reset == 0 {
            return None;
        }
        DateTime::from_timestamp(self.reset as i64, 0)
    }

    pub fn is_known(&self) -> bool {
        self.limit > 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_listing_entry() {
        let json = r#"{
            "id": 1,
            "name": "folio",
            "full_name": "octo/folio",
            "description": null,
            "language": "Rust",
            "stargazers_count": 1500,
            "forks_count": 3,
            "updated_at": "2024-05-01T12:00:00Z",
            "html_url": "https://github.com/octo/folio",
            "homepage": "",
            "archived": false,
            "fork": true
        }"#;

        let repo: Repository = serde_json::from_str(json).unwrap();
        assert_eq!(repo.name, "folio");
        assert_eq!(repo.description, None);
        assert_eq!(repo.language.as_deref(), Some("Rust"));
        assert_eq!(repo.stargazers_count, 1500);
        assert!(repo.fork);
        assert!(!repo.archived);
        assert_eq!(repo.live_demo(), None);
    }

    #[test]
    fn test_live_demo_present() {
        let json = r#"{
            "name": "site",
            "description": "A site",
            "language": null,
            "updated_at": "2024-05-01T12:00:00Z",
            "html_url": "https://github.com/octo/site",
            "homepage": "https://octo.dev"
        }"#;

        let repo: Repository = serde_json::from_str(json).unwrap();
        assert_eq!(repo.live_demo(), Some("https://octo.dev"));
        assert_eq!(repo.stargazers_count, 0);
    }

    #[test]
    fn test_rate_limit_reset_at() {
        assert!(RateLimit::default().reset_at().is_none());
        let rate = RateLimit {
            limit: 60,
            remaining: 0,
            reset: 1_700_000_000,
        };
        assert_eq!(rate.reset_at().unwrap().timestamp(), 1_700_000_000);
        assert!(rate.is_known());
    }
}
