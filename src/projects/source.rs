// Remote repository sources.

use std::future::Future;

use crate::error::Result;
use crate::github::{FETCH_PAGE_SIZE, GitHubClient, Repository};

/// Something that can list an identity's repositories.
///
/// A single call makes a single attempt; retrying is up to the caller.
pub trait RepoSource {
    fn fetch_repos(
        &mut self,
        identity: &str,
    ) -> impl Future<Output = Result<Vec<Repository>>> + Send;
}

impl RepoSource for GitHubClient {
    async fn fetch_repos(&mut self, identity: &str) -> Result<Vec<Repository>> {
        self.get_user_repos(identity, FETCH_PAGE_SIZE).await
    }
}
