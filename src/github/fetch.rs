// src/github/fetch.rs
// =============================================================================
// Talks to the GitHub REST API.
//
// Endpoints used:
// - /user/repos                            repositories of the token owner
// - /repos/{o}/{r}                         default branch
// - /repos/{o}/{r}/branches                branch list
// - /repos/{o}/{r}/git/ref/heads/{b}       branch -> commit sha
// - /repos/{o}/{r}/git/commits/{sha}       commit -> tree sha
// - /repos/{o}/{r}/git/trees/{sha}         full recursive listing
// - /repos/{o}/{r}/contents/{path}?ref=b   one file, base64-encoded
//
// A token is optional. Without one only public repositories work and the
// anonymous rate limit applies.
// =============================================================================

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION};
use reqwest::Client;
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::{debug, warn};
use url::Url;

use super::types::{
    ApiErrorBody, Branch, CommitResponse, ContentResponse, RefResponse, RepoRef, RepoResponse,
    Repository, RepositoryEntry, TreeResponse,
};
use super::{ContentProvider, TreeProvider};
use crate::config::{ExportConfig, ACCEPT_HEADER, USER_AGENT};
use crate::error::GithubError;

#[derive(Debug, Clone)]
pub struct GithubClient {
    http: Client,
    api_base: Url,
}

impl GithubClient {
    pub fn new(config: &ExportConfig) -> Result<Self, GithubError> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static(ACCEPT_HEADER));

        if let Some(token) = config.token() {
            let mut value = HeaderValue::from_str(&format!("token {token}"))
                .map_err(|_| GithubError::InvalidToken)?;
            value.set_sensitive(true);
            headers.insert(AUTHORIZATION, value);
        }

        // GitHub rejects requests without a User-Agent
        let http = Client::builder()
            .user_agent(USER_AGENT)
            .default_headers(headers)
            .timeout(Duration::from_secs(30))
            .build()?;

        let api_base = Url::parse(config.api_base())?;
        if api_base.cannot_be_a_base() {
            return Err(GithubError::Url(url::ParseError::RelativeUrlWithCannotBeABaseBase));
        }

        Ok(Self { http, api_base })
    }

    // Repositories visible to the token owner, most recently updated first
    pub async fn list_repositories(&self) -> Result<Vec<Repository>, GithubError> {
        let mut url = self.endpoint(&["user", "repos"]);
        url.query_pairs_mut()
            .append_pair("per_page", "100")
            .append_pair("sort", "updated");
        self.get_json(url).await
    }

    pub async fn list_branches(&self, owner: &str, repo: &str) -> Result<Vec<Branch>, GithubError> {
        let mut url = self.endpoint(&["repos", owner, repo, "branches"]);
        url.query_pairs_mut().append_pair("per_page", "100");
        self.get_json(url).await
    }

    pub async fn default_branch(&self, owner: &str, repo: &str) -> Result<String, GithubError> {
        let url = self.endpoint(&["repos", owner, repo]);
        let info: RepoResponse = self.get_json(url).await?;
        Ok(info.default_branch)
    }

    // Branch name -> commit -> recursive tree, the same hops the web UI makes
    pub async fn fetch_tree(&self, repo: &RepoRef) -> Result<Vec<RepositoryEntry>, GithubError> {
        let mut ref_path = vec![
            "repos",
            repo.owner.as_str(),
            repo.name.as_str(),
            "git",
            "ref",
            "heads",
        ];
        // Branch names like "feature/x" span several path segments
        ref_path.extend(repo.branch.split('/'));
        let reference: RefResponse = self.get_json(self.endpoint(&ref_path)).await?;

        let commit_url = self.endpoint(&[
            "repos",
            repo.owner.as_str(),
            repo.name.as_str(),
            "git",
            "commits",
            reference.object.sha.as_str(),
        ]);
        let commit: CommitResponse = self.get_json(commit_url).await?;

        let mut tree_url = self.endpoint(&[
            "repos",
            repo.owner.as_str(),
            repo.name.as_str(),
            "git",
            "trees",
            commit.tree.sha.as_str(),
        ]);
        tree_url.query_pairs_mut().append_pair("recursive", "1");
        let tree: TreeResponse = self.get_json(tree_url).await?;

        if tree.truncated {
            warn!(repo = %repo, "tree listing was truncated by GitHub; some files are missing");
        }
        debug!(repo = %repo, entries = tree.tree.len(), "fetched tree");

        Ok(tree.tree)
    }

    // Returns the raw base64 payload; an empty string if GitHub sent none
    pub async fn fetch_content(&self, repo: &RepoRef, path: &str) -> Result<String, GithubError> {
        let mut segments = vec!["repos", repo.owner.as_str(), repo.name.as_str(), "contents"];
        segments.extend(path.split('/'));

        let mut url = self.endpoint(&segments);
        url.query_pairs_mut().append_pair("ref", &repo.branch);

        let response: ContentResponse = self.get_json(url).await?;
        Ok(response.content.unwrap_or_default())
    }

    // Appends escaped path segments to the API base
    fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.api_base.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    async fn get_json<T: DeserializeOwned>(&self, url: Url) -> Result<T, GithubError> {
        debug!(%url, "GET");
        let response = self.http.get(url).send().await?;

        let status = response.status();
        if !status.is_success() {
            // Prefer GitHub's own message ("Not Found", "Bad credentials", ...)
            let message = response
                .json::<ApiErrorBody>()
                .await
                .ok()
                .and_then(|body| body.message)
                .unwrap_or_else(|| {
                    status
                        .canonical_reason()
                        .map(str::to_string)
                        .unwrap_or_else(|| format!("API error: {}", status.as_u16()))
                });

            return Err(GithubError::Api {
                status: status.as_u16(),
                message,
            });
        }

        Ok(response.json::<T>().await?)
    }
}

#[async_trait]
impl TreeProvider for GithubClient {
    async fn get_tree(&self, repo: &RepoRef) -> Result<Vec<RepositoryEntry>, GithubError> {
        self.fetch_tree(repo).await
    }
}

#[async_trait]
impl ContentProvider for GithubClient {
    async fn get_content(&self, repo: &RepoRef, path: &str) -> Result<String, GithubError> {
        self.fetch_content(repo, path).await
    }
}

// Parses a repository reference into (owner, repo)
//
// Supported formats:
//   - owner/repo
//   - https://github.com/owner/repo
//   - https://github.com/owner/repo.git
//   - github.com/owner/repo/tree/main   (extra segments are ignored)
pub fn parse_repo(input: &str) -> Result<(String, String), GithubError> {
    let trimmed = input
        .trim()
        .trim_start_matches("https://")
        .trim_start_matches("http://")
        .trim_start_matches("www.");

    let path = match trimmed.strip_prefix("github.com/") {
        Some(rest) => rest,
        // Anything else with a host-like first segment is another forge
        None if trimmed.split('/').next().is_some_and(|s| s.contains('.')) => {
            return Err(GithubError::InvalidRepo(input.to_string()));
        }
        None => trimmed,
    };

    let mut parts = path.split('/').filter(|p| !p.is_empty());
    let (Some(owner), Some(repo)) = (parts.next(), parts.next()) else {
        return Err(GithubError::InvalidRepo(input.to_string()));
    };

    let repo = repo.strip_suffix(".git").unwrap_or(repo);
    if repo.is_empty() {
        return Err(GithubError::InvalidRepo(input.to_string()));
    }

    Ok((owner.to_string(), repo.to_string()))
}

// -----------------------------------------------------------------------------
// BEGINNER NOTES:
//
// 1. Why path_segments_mut instead of format!("{base}/repos/{owner}/...")?
//    - Each segment is percent-encoded on its own, so a file called
//      "my page.html" or "a#b.css" cannot break the URL
//    - '/' inside a segment would be escaped too, which is why paths and
//      branch names are split on '/' before being passed in
//
// 2. pop_if_empty()
//    - An API base ending in '/' has an empty last segment; dropping it
//      avoids "//repos" in the final URL
//
// 3. `let (Some(a), Some(b)) = (..) else { .. };`
//    - Destructures two Options at once and bails out if either is missing
// -----------------------------------------------------------------------------
