// GitHub API HTTP client.
// Handles optional authentication, rate limit tracking, and status mapping.

use reqwest::{
    Client, Response, StatusCode, Url,
    header::{ACCEPT, AUTHORIZATION, HeaderMap, HeaderValue, USER_AGENT},
};
use tracing::{debug, warn};

use crate::error::{FolioError, Result};

use super::types::RateLimit;

pub const GITHUB_API_BASE: &str = "https://api.github.com";
const GITHUB_API_VERSION: &str = "2022-11-28";

/// GitHub API client with rate limit tracking.
pub struct GitHubClient {
    client: Client,
    base_url: Url,
    rate_limit: RateLimit,
}

impl GitHubClient {
    /// Create a client against `base_url`, authenticated when a token is given.
    ///
    /// The listing endpoint is public; a token only raises the rate limit.
    pub fn new(base_url: &str, token: Option<&str>) -> Result<Self> {
        let base_url = Url::parse(base_url)
            .map_err(|e| FolioError::Other(format!("Invalid API base URL {base_url}: {e}")))?;
        if base_url.cannot_be_a_base() {
            return Err(FolioError::Other(format!(
                "Invalid API base URL {base_url}"
            )));
        }

        let mut headers = HeaderMap::new();

        if let Some(token) = token.filter(|t| !t.trim().is_empty()) {
            headers.insert(
                AUTHORIZATION,
                HeaderValue::from_str(&format!("Bearer {}", token.trim()))
                    .map_err(|e| FolioError::Other(e.to_string()))?,
            );
        }
        headers.insert(
            ACCEPT,
            HeaderValue::from_static("application/vnd.github+json"),
        );
        headers.insert(
            "X-GitHub-Api-Version",
            HeaderValue::from_static(GITHUB_API_VERSION),
        );
        headers.insert(USER_AGENT, HeaderValue::from_static("folio-tui"));

        let client = Client::builder().default_headers(headers).build()?;

        Ok(Self {
            client,
            base_url,
            rate_limit: RateLimit::default(),
        })
    }

    /// Get the current rate limit information.
    pub fn rate_limit(&self) -> &RateLimit {
        &self.rate_limit
    }

    /// Build an API URL from path segments, escaping each segment.
    pub(crate) fn url_for(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    /// Make a GET request with query parameters.
    pub async fn get_with_params<T: serde::Serialize + ?Sized>(
        &mut self,
        segments: &[&str],
        params: &T,
    ) -> Result<Response> {
        let url = self.url_for(segments);
        debug!(%url, "GET");
        let response = self.client.get(url).query(params).send().await?;

        self.update_rate_limit(&response);
        self.check_response(response)
    }

    /// Update rate limit from response headers.
    fn update_rate_limit(&mut self, response: &Response) {
        let header = |name: &str| -> Option<u64> {
            response
                .headers()
                .get(name)
                .and_then(|v| v.to_str().ok())
                .and_then(|v| v.parse().ok())
        };

        if let Some(limit) = header("x-ratelimit-limit") {
            self.rate_limit.limit = limit;
        }
        if let Some(remaining) = header("x-ratelimit-remaining") {
            self.rate_limit.remaining = remaining;
        }
        if let Some(reset) = header("x-ratelimit-reset") {
            self.rate_limit.reset = reset;
        }
    }

    /// Check response status and convert failures to `FolioError::Remote`.
    fn check_response(&self, response: Response) -> Result<Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let rate_limited = matches!(
            status,
            StatusCode::FORBIDDEN | StatusCode::TOO_MANY_REQUESTS
        ) && self.rate_limit.is_known()
            && self.rate_limit.remaining == 0;

        let rate_limit_reset = if rate_limited {
            self.rate_limit.reset_at()
        } else {
            None
        };

        warn!(
            status = status.as_u16(),
            url = %response.url(),
            rate_limited,
            "GitHub API request failed"
        );

        Err(FolioError::Remote {
            status: status.as_u16(),
            rate_limit_reset,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_invalid_base() {
        assert!(GitHubClient::new("not a url", None).is_err());
        assert!(GitHubClient::new("mailto:someone@example.com", None).is_err());
    }

    #[test]
    fn test_url_for_escapes_segments() {
        let client = GitHubClient::new("https://api.github.com", None).unwrap();
        let url = client.url_for(&["users", "octo cat", "repos"]);
        assert_eq!(url.as_str(), "https://api.github.com/users/octo%20cat/repos");

        let client = GitHubClient::new("http://localhost:8080/api/", None).unwrap();
        let url = client.url_for(&["users", "octo", "repos"]);
        assert_eq!(url.as_str(), "http://localhost:8080/api/users/octo/repos");
    }

    #[test]
    fn test_rate_limit_starts_unknown() {
        let client = GitHubClient::new(GITHUB_API_BASE, Some("token")).unwrap();
        assert!(!client.rate_limit().is_known());
    }
}
