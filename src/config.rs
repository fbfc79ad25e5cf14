// src/config.rs
// =============================================================================
// Runtime settings for an export run.
//
// Values come from command-line flags (which fall back to environment
// variables, see cli.rs) and are collected into one ExportConfig that the
// GitHub client and the export pipeline read from.
// =============================================================================

use std::path::PathBuf;

pub const DEFAULT_API_BASE: &str = "https://api.github.com";
pub const ACCEPT_HEADER: &str = "application/vnd.github.v3+json";
pub const USER_AGENT: &str = concat!("gh-static-export/", env!("CARGO_PKG_VERSION"));

/// How many content fetches may be in flight at once
pub const DEFAULT_BATCH_SIZE: usize = 10;
/// DEFLATE level used for the archive (0-9)
pub const DEFAULT_COMPRESSION_LEVEL: i64 = 6;

#[derive(Debug, Clone)]
pub struct ExportConfig {
    api_base: String,
    token: Option<String>,
    batch_size: usize,
    compression_level: i64,
    output_dir: PathBuf,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            api_base: std::env::var("GITHUB_API_URL").unwrap_or_else(|_| DEFAULT_API_BASE.into()),
            token: std::env::var("GITHUB_TOKEN").ok().filter(|t| !t.is_empty()),
            batch_size: DEFAULT_BATCH_SIZE,
            compression_level: DEFAULT_COMPRESSION_LEVEL,
            output_dir: PathBuf::from("."),
        }
    }
}

impl ExportConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_api_base(mut self, base: impl Into<String>) -> Self {
        self.api_base = base.into();
        self
    }

    pub fn with_token(mut self, token: Option<String>) -> Self {
        self.token = token.filter(|t| !t.trim().is_empty());
        self
    }

    // Zero would stall the fetch stream, so it is clamped to one
    pub fn with_batch_size(mut self, size: usize) -> Self {
        self.batch_size = size.max(1);
        self
    }

    pub fn with_compression_level(mut self, level: i64) -> Self {
        self.compression_level = level.clamp(0, 9);
        self
    }

    pub fn with_output_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.output_dir = dir.into();
        self
    }

    pub fn api_base(&self) -> &str {
        self.api_base.trim_end_matches('/')
    }

    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    pub fn batch_size(&self) -> usize {
        self.batch_size
    }

    pub fn compression_level(&self) -> i64 {
        self.compression_level
    }

    pub fn output_dir(&self) -> &PathBuf {
        &self.output_dir
    }
}
