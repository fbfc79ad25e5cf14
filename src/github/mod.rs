// src/github/mod.rs
// =============================================================================
// This module handles everything that comes from GitHub.
//
// - types: API payloads and the RepoRef / RepositoryEntry value types
// - fetch: the REST client and repository reference parsing
//
// The export pipeline never talks to GithubClient directly. It asks for a
// TreeProvider (the file listing) and a ContentProvider (one file's bytes),
// which keeps the pipeline testable with in-memory fakes.
// =============================================================================

mod fetch;
mod types;

use async_trait::async_trait;

use crate::error::GithubError;

pub use fetch::{parse_repo, GithubClient};
pub use types::{EntryKind, RepoRef, RepositoryEntry};

/// Lists every entry of a branch. Any failure aborts the export.
#[async_trait]
pub trait TreeProvider: Send + Sync {
    async fn get_tree(&self, repo: &RepoRef) -> Result<Vec<RepositoryEntry>, GithubError>;
}

/// Returns one file's content as a base64 payload. Failures only drop that file.
#[async_trait]
pub trait ContentProvider: Send + Sync {
    async fn get_content(&self, repo: &RepoRef, path: &str) -> Result<String, GithubError>;
}
