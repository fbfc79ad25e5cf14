// src/export/batch.rs
// =============================================================================
// Downloads the selected files and turns them into archive entries.
//
// How it works:
// 1. Every included path becomes one content request
// 2. At most `batch_size` requests are in flight at any moment
//    (futures' `buffered` keeps a sliding window of that size)
// 3. Results come back in input order, whatever order the requests finish in
// 4. A failed request is logged and the file is left out; the rest continue
// 5. Surviving paths are re-rooted at the entry point's directory
// =============================================================================

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use futures::stream::{self, StreamExt};
use tracing::{debug, warn};

use super::paths::normalize;
use crate::error::GithubError;
use crate::github::{ContentProvider, RepoRef};
use crate::select::is_binary;

/// Payload of one exported file
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileContent {
    Text(String),
    Binary(Vec<u8>),
}

impl FileContent {
    pub fn as_bytes(&self) -> &[u8] {
        match self {
            FileContent::Text(text) => text.as_bytes(),
            FileContent::Binary(bytes) => bytes,
        }
    }
}

/// A file ready for the archive, with its entry-point-relative path
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportFile {
    pub path: String,
    pub content: FileContent,
}

pub async fn fetch_and_normalize<P>(
    provider: &P,
    repo: &RepoRef,
    files: &[&str],
    prefix: &str,
    batch_size: usize,
) -> Vec<ExportFile>
where
    P: ContentProvider + ?Sized,
{
    let total = files.len();

    let requests = files.iter().map(|path| async move {
        match fetch_one(provider, repo, path, prefix).await {
            Ok(file) => Some(file),
            Err(e) => {
                warn!(path = %path, error = %e, "failed to fetch file, leaving it out");
                None
            }
        }
    });

    let results = stream::iter(requests).buffered(batch_size.max(1));
    futures::pin_mut!(results);

    let mut exported = Vec::with_capacity(total);
    let mut done = 0;
    while let Some(result) = results.next().await {
        done += 1;
        debug!("downloaded {done}/{total}");
        if let Some(file) = result {
            exported.push(file);
        }
    }

    exported
}

async fn fetch_one<P>(
    provider: &P,
    repo: &RepoRef,
    path: &str,
    prefix: &str,
) -> Result<ExportFile, GithubError>
where
    P: ContentProvider + ?Sized,
{
    let payload = provider.get_content(repo, path).await?;
    let content = decode_content(path, &payload)?;

    Ok(ExportFile {
        path: normalize(path, prefix),
        content,
    })
}

// Binary extensions keep raw bytes; everything else is read as UTF-8
pub fn decode_content(path: &str, payload: &str) -> Result<FileContent, GithubError> {
    // The contents API wraps base64 at 60 columns
    let cleaned: String = payload.chars().filter(|c| !c.is_whitespace()).collect();
    let bytes = STANDARD.decode(cleaned)?;

    if is_binary(path) {
        Ok(FileContent::Binary(bytes))
    } else {
        Ok(FileContent::Text(String::from_utf8_lossy(&bytes).into_owned()))
    }
}

// -----------------------------------------------------------------------------
// BEGINNER NOTES:
//
// 1. buffered vs buffer_unordered
//    - Both run up to N futures at once
//    - buffer_unordered yields results as they finish
//    - buffered yields them in the order the futures were created, which is
//      what keeps the archive listing stable here
//
// 2. What does `P: ContentProvider + ?Sized` mean?
//    - ?Sized lets P be a trait object too (`&dyn ContentProvider`)
//    - Tests pass an in-memory fake, the CLI passes GithubClient
//
// 3. Why String::from_utf8_lossy?
//    - A text file with a stray invalid byte still exports; the bad byte
//      becomes U+FFFD instead of failing the whole file
// -----------------------------------------------------------------------------
