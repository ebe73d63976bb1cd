// Error types for folio.
// Separates caller mistakes (blank identity) from remote failures.

use chrono::{DateTime, Utc};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum FolioError {
    #[error("identity required")]
    Validation,

    #[error("GitHub API error: HTTP {status}")]
    Remote {
        status: u16,
        /// Set when the failure was a rate limit with a known reset time.
        rate_limit_reset: Option<DateTime<Utc>>,
    },

    #[error("GitHub API request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Malformed GitHub API response: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Other(String),
}

impl FolioError {
    /// Whether this failure came from talking to the remote API.
    pub fn is_remote(&self) -> bool {
        matches!(self, FolioError::Remote { .. } | FolioError::Transport(_))
    }

    /// HTTP status of the failed response, if the server answered at all.
    pub fn status(&self) -> Option<u16> {
        match self {
            FolioError::Remote { status, .. } => Some(*status),
            FolioError::Transport(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, FolioError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_remote_status() {
        let err = FolioError::Remote {
            status: 404,
            rate_limit_reset: None,
        };
        assert!(err.is_remote());
        assert_eq!(err.status(), Some(404));
        assert_eq!(err.to_string(), "GitHub API error: HTTP 404");
    }

    #[test]
    fn test_validation_is_not_remote() {
        let err = FolioError::Validation;
        assert!(!err.is_remote());
        assert_eq!(err.status(), None);
        assert_eq!(err.to_string(), "identity required");
    }
}
