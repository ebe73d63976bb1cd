// GitHub API endpoint functions.
// Provides the typed repository listing request.

use tracing::debug;

use crate::error::Result;

use super::client::GitHubClient;
use super::types::Repository;

/// Number of repositories requested per listing call.
pub const FETCH_PAGE_SIZE: u32 = 50;

impl GitHubClient {
    /// Get a user's public repositories, most recently updated first.
    ///
    /// Returns the listing exactly as the API sent it; a body that is not a
    /// repository array surfaces as `FolioError::Decode`.
    pub async fn get_user_repos(&mut self, username: &str, per_page: u32) -> Result<Vec<Repository>> {
        let params = [
            ("sort", "updated".to_string()),
            ("per_page", per_page.to_string()),
        ];
        let response = self
            .get_with_params(&["users", username, "repos"], &params)
            .await?;
        let body = response.text().await?;
        let repos: Vec<Repository> = serde_json::from_str(&body)?;
        debug!(username, count = repos.len(), "fetched repositories");
        Ok(repos)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::FolioError;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;
    use tokio::task::JoinHandle;

    /// Serve a single canned HTTP response and hand back the request head.
    async fn serve_once(
        status_line: &'static str,
        headers: &'static str,
        body: &'static str,
    ) -> (String, JoinHandle<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        let handle = tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut request = Vec::new();
            let mut buf = [0u8; 1024];
            while !request.windows(4).any(|w| w == b"\r\n\r\n") {
                let n = socket.read(&mut buf).await.unwrap();
                if n == 0 {
                    break;
                }
                request.extend_from_slice(&buf[..n]);
            }

            let response = format!(
                "HTTP/1.1 {}\r\n{}Content-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                status_line,
                headers,
                body.len(),
                body
            );
            socket.write_all(response.as_bytes()).await.unwrap();
            socket.shutdown().await.ok();
            String::from_utf8_lossy(&request).into_owned()
        });

        (format!("http://{}", addr), handle)
    }

    const LISTING: &str = r#"[
        {"name":"alpha","description":"First","language":"Rust","stargazers_count":3,"forks_count":1,
         "updated_at":"2024-03-01T00:00:00Z","html_url":"https://github.com/alice/alpha",
         "homepage":null,"archived":false,"fork":false},
        {"name":"beta","description":null,"language":null,"stargazers_count":0,"forks_count":0,
         "updated_at":"2024-02-01T00:00:00Z","html_url":"https://github.com/alice/beta",
         "homepage":"https://beta.dev","archived":true,"fork":false}
    ]"#;

    #[tokio::test]
    async fn test_get_user_repos_success() {
        let (base, server) = serve_once(
            "200 OK",
            "x-ratelimit-limit: 60\r\nx-ratelimit-remaining: 59\r\nx-ratelimit-reset: 1700000000\r\n",
            LISTING,
        )
        .await;

        let mut client = GitHubClient::new(&base, None).unwrap();
        let repos = client.get_user_repos("alice", FETCH_PAGE_SIZE).await.unwrap();

        assert_eq!(repos.len(), 2);
        assert_eq!(repos[0].name, "alpha");
        assert!(repos[1].archived);
        assert_eq!(client.rate_limit().limit, 60);
        assert_eq!(client.rate_limit().remaining, 59);

        let request = server.await.unwrap();
        let request_line = request.lines().next().unwrap();
        assert!(request_line.starts_with("GET /users/alice/repos?"));
        assert!(request_line.contains("sort=updated"));
        assert!(request_line.contains("per_page=50"));
    }

    #[tokio::test]
    async fn test_not_found_maps_to_remote_status() {
        let (base, server) =
            serve_once("404 Not Found", "", r#"{"message":"Not Found"}"#).await;

        let mut client = GitHubClient::new(&base, None).unwrap();
        let err = client.get_user_repos("ghost", FETCH_PAGE_SIZE).await.unwrap_err();

        assert!(matches!(err, FolioError::Remote { status: 404, rate_limit_reset: None }));
        server.await.unwrap();
    }

    #[tokio::test]
    async fn test_rate_limited_carries_reset() {
        let (base, server) = serve_once(
            "403 Forbidden",
            "x-ratelimit-limit: 60\r\nx-ratelimit-remaining: 0\r\nx-ratelimit-reset: 1700000000\r\n",
            r#"{"message":"API rate limit exceeded"}"#,
        )
        .await;

        let mut client = GitHubClient::new(&base, None).unwrap();
        let err = client.get_user_repos("alice", FETCH_PAGE_SIZE).await.unwrap_err();

        match err {
            FolioError::Remote {
                status,
                rate_limit_reset,
            } => {
                assert_eq!(status, 403);
                assert_eq!(rate_limit_reset.unwrap().timestamp(), 1_700_000_000);
            }
            other => panic!("unexpected error: {other:?}"),
        }
        server.await.unwrap();
    }

    #[tokio::test]
    async fn test_malformed_body_is_decode_error() {
        let (base, server) = serve_once("200 OK", "", r#"{"not":"a list"}"#).await;

        let mut client = GitHubClient::new(&base, None).unwrap();
        let err = client.get_user_repos("alice", FETCH_PAGE_SIZE).await.unwrap_err();

        assert!(matches!(err, FolioError::Decode(_)));
        assert!(!err.is_remote());
        server.await.unwrap();
    }

    #[tokio::test]
    async fn test_connection_refused_is_transport_error() {
        // Bind then drop to get a port nothing listens on.
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let mut client = GitHubClient::new(&format!("http://{}", addr), None).unwrap();
        let err = client.get_user_repos("alice", FETCH_PAGE_SIZE).await.unwrap_err();

        assert!(matches!(err, FolioError::Transport(_)));
        assert!(err.is_remote());
        assert_eq!(err.status(), None);
    }
}
