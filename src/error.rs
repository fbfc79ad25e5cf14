// src/error.rs
// =============================================================================
// Error types shared across the crate.
//
// Three families, matching how each failure is treated:
// - GithubError: anything that goes wrong talking to the GitHub API
// - ExportError: failures that abort the whole export (reported once in main)
// - SelectionRejected: an edit to the selection that was refused; the
//   selection is left untouched and the caller decides whether to warn
// =============================================================================

use thiserror::Error;

#[derive(Debug, Error)]
pub enum GithubError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The API answered with a non-success status
    #[error("{message} (HTTP {status})")]
    Api { status: u16, message: String },

    #[error("invalid API URL: {0}")]
    Url(#[from] url::ParseError),

    #[error("could not decode base64 content: {0}")]
    Decode(#[from] base64::DecodeError),

    #[error("token contains characters not allowed in an HTTP header")]
    InvalidToken,

    #[error("not a GitHub repository reference: {0}")]
    InvalidRepo(String),
}

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("failed to fetch repository tree: {0}")]
    TreeFetch(#[source] GithubError),

    #[error("no static files found")]
    NoEligibleFiles,

    #[error("no files selected")]
    EmptySelection,

    #[error("no entry point selected (pick an .html or .htm file)")]
    NoEntryPoint,

    #[error("failed to build archive: {0}")]
    Archive(#[from] zip::result::ZipError),

    #[error("failed to write archive: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SelectionRejected {
    #[error("{0} is not an HTML file")]
    NotHtml(String),

    #[error("{0} is not an exportable file in this tree")]
    NotEligible(String),
}
