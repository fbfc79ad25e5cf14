// src/github/types.rs
// =============================================================================
// Data shapes we read from the GitHub REST API, plus the small value types
// the rest of the crate passes around (RepoRef, RepositoryEntry).
//
// Only the fields we actually use are declared; serde ignores the rest.
// =============================================================================

use serde::{Deserialize, Serialize};
use std::fmt;

/// Which repository and branch an export reads from
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepoRef {
    pub owner: String,
    pub name: String,
    pub branch: String,
}

impl fmt::Display for RepoRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}@{}", self.owner, self.name, self.branch)
    }
}

/// Kind of a git tree entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryKind {
    /// A file
    Blob,
    /// A directory
    Tree,
    /// Submodules ("commit") and anything else we do not export
    #[serde(other)]
    Other,
}

/// One entry of a recursive tree listing
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RepositoryEntry {
    pub path: String,
    #[serde(rename = "type")]
    pub kind: EntryKind,
}

// GET /repos/{owner}/{repo}/git/trees/{sha}?recursive=1
#[derive(Debug, Deserialize)]
pub(crate) struct TreeResponse {
    pub tree: Vec<RepositoryEntry>,
    #[serde(default)]
    pub truncated: bool,
}

// GET /repos/{owner}/{repo}/git/ref/heads/{branch}
#[derive(Debug, Deserialize)]
pub(crate) struct RefResponse {
    pub object: ShaObject,
}

// GET /repos/{owner}/{repo}/git/commits/{sha}
#[derive(Debug, Deserialize)]
pub(crate) struct CommitResponse {
    pub tree: ShaObject,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ShaObject {
    pub sha: String,
}

// GET /repos/{owner}/{repo}/contents/{path}?ref={branch}
#[derive(Debug, Deserialize)]
pub(crate) struct ContentResponse {
    /// Base64 with embedded newlines; absent for very large files
    #[serde(default)]
    pub content: Option<String>,
}

// GET /repos/{owner}/{repo}
#[derive(Debug, Deserialize)]
pub(crate) struct RepoResponse {
    pub default_branch: String,
}

// Error body GitHub sends with 4xx/5xx responses
#[derive(Debug, Deserialize)]
pub(crate) struct ApiErrorBody {
    pub message: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Branch {
    pub name: String,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RepoOwner {
    pub login: String,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Repository {
    pub name: String,
    pub full_name: String,
    pub owner: RepoOwner,
    #[serde(default)]
    pub private: bool,
}
