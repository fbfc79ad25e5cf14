// src/cli.rs
// =============================================================================
// Command-line interface, defined with clap's derive API.
//
// Subcommands:
// - repos     list repositories of the authenticated user
// - branches  list the branches of a repository
// - tree      show which files would be exported, as a folder tree
// - export    download the selection and write <repo>.zip
//
// `tree` and `export` share the selection flags (--none, --exclude,
// --include, --entry) so a selection can be previewed before exporting it.
// =============================================================================

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use crate::config::{DEFAULT_API_BASE, DEFAULT_BATCH_SIZE, DEFAULT_COMPRESSION_LEVEL};

#[derive(Parser, Debug)]
#[command(
    name = "gh-static-export",
    version,
    about = "Export static files from a GitHub repository as a ZIP rooted at its entry page",
    long_about = "gh-static-export lists a branch of a GitHub repository, keeps the files a static \
                  site needs (HTML, CSS, JS, images, fonts, media), lets you adjust the selection, \
                  and packs it into a ZIP whose paths are relative to the entry HTML page."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Personal access token, needed for private repositories
    #[arg(long, global = true, env = "GITHUB_TOKEN", hide_env_values = true)]
    pub token: Option<String>,

    /// Base URL of the GitHub REST API
    #[arg(long, global = true, env = "GITHUB_API_URL", default_value = DEFAULT_API_BASE)]
    pub api_url: String,

    /// Enable verbose logging (sets log level to DEBUG)
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List repositories you have access to (requires a token)
    Repos {
        /// Output JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// List the branches of a repository
    ///
    /// Example: gh-static-export branches octocat/website
    Branches {
        /// Repository as owner/name or a github.com URL
        repo: String,

        /// Output JSON instead of a list
        #[arg(long)]
        json: bool,
    },

    /// Preview the selection as a folder tree
    ///
    /// Example: gh-static-export tree octocat/website --exclude img --expand css
    Tree {
        /// Repository as owner/name or a github.com URL
        repo: String,

        /// Branch to read (defaults to the repository's default branch)
        #[arg(long, short)]
        branch: Option<String>,

        #[command(flatten)]
        selection: SelectionArgs,

        /// Show the contents of this folder (repeatable)
        #[arg(long = "expand", value_name = "FOLDER")]
        expand: Vec<String>,

        /// Show the contents of every folder
        #[arg(long)]
        expand_all: bool,

        /// Output JSON instead of a tree
        #[arg(long)]
        json: bool,
    },

    /// Download the selection and write <repo>.zip
    ///
    /// Example: gh-static-export export octocat/website --branch gh-pages -o dist
    Export {
        /// Repository as owner/name or a github.com URL
        repo: String,

        /// Branch to read (defaults to the repository's default branch)
        #[arg(long, short)]
        branch: Option<String>,

        #[command(flatten)]
        selection: SelectionArgs,

        /// Directory the archive is written to
        #[arg(long, short, default_value = ".")]
        out: PathBuf,

        /// Maximum number of files downloaded at the same time
        #[arg(long, default_value_t = DEFAULT_BATCH_SIZE as u64, value_parser = clap::value_parser!(u64).range(1..))]
        batch_size: u64,

        /// DEFLATE compression level, 0 (store) to 9 (smallest)
        #[arg(long, default_value_t = DEFAULT_COMPRESSION_LEVEL, value_parser = clap::value_parser!(i64).range(0..=9))]
        compression_level: i64,

        /// Print the export summary as JSON
        #[arg(long)]
        json: bool,
    },
}

/// Edits applied on top of the default selection (every eligible file)
#[derive(Args, Debug, Default, Clone)]
pub struct SelectionArgs {
    /// Start from an empty selection instead of all files
    #[arg(long)]
    pub none: bool,

    /// Deselect a file or a whole folder (repeatable, applied before --include)
    #[arg(long = "exclude", value_name = "PATH")]
    pub exclude: Vec<String>,

    /// Select a file or a whole folder (repeatable)
    #[arg(long = "include", value_name = "PATH")]
    pub include: Vec<String>,

    /// HTML file to use as the site root instead of the detected one
    #[arg(long, value_name = "PATH")]
    pub entry: Option<String>,
}
