// src/main.rs
// =============================================================================
// Entry point of the CLI.
//
// What happens here:
// 1. Parse command-line arguments and set up logging
// 2. Dispatch to the subcommand handler
// 3. Print results (table/tree or JSON)
// 4. Exit with a code: 0 = success, 1 = export refused or failed, 2 = other error
// =============================================================================

mod cli;
mod config;
mod error;
mod export;
mod github;
mod select;

use anyhow::{bail, Result};
use clap::Parser;
use serde::Serialize;
use tracing::Level;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use cli::{Cli, Commands, SelectionArgs};
use config::ExportConfig;
use error::ExportError;
use export::ExportSummary;
use github::{parse_repo, GithubClient, RepoRef};
use select::{base_name, FolderNode, FolderState, SelectionState};

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let exit_code = match run(cli).await {
        Ok(code) => code,
        Err(e) => match e.downcast_ref::<ExportError>() {
            Some(export_error) => {
                eprintln!("❌ Export failed: {export_error}");
                1
            }
            None => {
                eprintln!("Error: {e:#}");
                2
            }
        },
    };

    std::process::exit(exit_code);
}

// RUST_LOG always applies; --verbose adds DEBUG, otherwise only warnings show
fn init_tracing(verbose: bool) {
    let level = if verbose { Level::DEBUG } else { Level::WARN };
    let filter = EnvFilter::from_default_env().add_directive(level.into());
    let _ = tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .try_init();
}

async fn run(cli: Cli) -> Result<i32> {
    let config = ExportConfig::new()
        .with_api_base(cli.api_url)
        .with_token(cli.token);

    match cli.command {
        Commands::Repos { json } => handle_repos(&config, json).await,
        Commands::Branches { repo, json } => handle_branches(&config, &repo, json).await,
        Commands::Tree {
            repo,
            branch,
            selection,
            expand,
            expand_all,
            json,
        } => {
            let view = TreeView { expand, expand_all };
            handle_tree(&config, &repo, branch, &selection, &view, json).await
        }
        Commands::Export {
            repo,
            branch,
            selection,
            out,
            batch_size,
            compression_level,
            json,
        } => {
            let config = config
                .with_output_dir(out)
                .with_batch_size(usize::try_from(batch_size).unwrap_or(usize::MAX))
                .with_compression_level(compression_level);
            handle_export(&config, &repo, branch, &selection, json).await
        }
    }
}

async fn handle_repos(config: &ExportConfig, json: bool) -> Result<i32> {
    if config.token().is_none() {
        bail!("listing repositories needs a token (pass --token or set GITHUB_TOKEN)");
    }

    let client = GithubClient::new(config)?;
    let repos = client.list_repositories().await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&repos)?);
        return Ok(0);
    }

    println!("{:<50} {:<10}", "REPOSITORY", "VISIBILITY");
    println!("{}", "=".repeat(60));
    for repo in &repos {
        let visibility = if repo.private { "private" } else { "public" };
        println!("{:<50} {:<10}", repo.full_name, visibility);
    }
    println!();
    println!("📋 Total: {}", repos.len());

    Ok(0)
}

async fn handle_branches(config: &ExportConfig, repo: &str, json: bool) -> Result<i32> {
    let (owner, name) = parse_repo(repo)?;
    let client = GithubClient::new(config)?;
    let branches = client.list_branches(&owner, &name).await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&branches)?);
    } else {
        println!("🌿 Branches of {owner}/{name}:");
        for branch in &branches {
            println!("   {}", branch.name);
        }
    }

    Ok(0)
}

// Presentation-only options of the `tree` subcommand
struct TreeView {
    expand: Vec<String>,
    expand_all: bool,
}

async fn handle_tree(
    config: &ExportConfig,
    repo: &str,
    branch: Option<String>,
    edits: &SelectionArgs,
    view: &TreeView,
    json: bool,
) -> Result<i32> {
    let client = GithubClient::new(config)?;
    let repo = resolve_repo(&client, repo, branch).await?;

    let mut selection = export::load_selection(&client, &repo).await?;
    apply_selection(&mut selection, edits);

    if view.expand_all {
        selection.expand_all();
    }
    for folder in &view.expand {
        if !selection.is_expanded(folder) {
            selection.toggle_expanded(folder);
        }
    }

    if json {
        println!("{}", serde_json::to_string_pretty(&TreeReport::new(&selection))?);
        return Ok(0);
    }

    println!("📂 {repo}");
    for line in render_tree(&selection) {
        println!("{line}");
    }
    println!();
    print_selection_status(&selection);

    Ok(0)
}

async fn handle_export(
    config: &ExportConfig,
    repo: &str,
    branch: Option<String>,
    edits: &SelectionArgs,
    json: bool,
) -> Result<i32> {
    let client = GithubClient::new(config)?;
    let repo = resolve_repo(&client, repo, branch).await?;

    if !json {
        println!("🔍 Exporting {repo}");
    }

    let mut selection = export::load_selection(&client, &repo).await?;
    apply_selection(&mut selection, edits);

    if !json {
        print_selection_status(&selection);
        println!("\n🌐 Downloading {} file(s)...\n", selection.included_count());
    }

    let package = export::build_package(&client, &repo, &selection, config).await?;
    let written = export::deliver(&package, config.output_dir()).await?;
    let summary = ExportSummary::new(&repo, &package, written);

    if json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else {
        print_summary(&summary);
    }

    Ok(0)
}

// Fills in the default branch when none was given
async fn resolve_repo(client: &GithubClient, repo: &str, branch: Option<String>) -> Result<RepoRef> {
    let (owner, name) = parse_repo(repo)?;
    let branch = match branch {
        Some(branch) => branch,
        None => client.default_branch(&owner, &name).await?,
    };
    Ok(RepoRef {
        owner,
        name,
        branch,
    })
}

// Applies the command-line edits in a fixed order:
// --none, then every --exclude, then every --include, then --entry
fn apply_selection(selection: &mut SelectionState, edits: &SelectionArgs) {
    if edits.none {
        selection.clear_all();
    } else {
        selection.select_all();
    }
    for path in &edits.exclude {
        toggle_path(selection, path, false);
    }
    for path in &edits.include {
        toggle_path(selection, path, true);
    }
    if let Some(entry) = &edits.entry {
        if let Err(rejected) = selection.set_entry_point(Some(entry.as_str())) {
            eprintln!("⚠️  Ignoring --entry: {rejected}");
        }
    }
}

fn toggle_path(selection: &mut SelectionState, path: &str, on: bool) {
    let path = path.trim_matches('/');
    let applied = if selection.is_folder(path) {
        selection.toggle_folder(path, on)
    } else {
        selection.toggle_file(path, on)
    };

    if !applied {
        eprintln!("⚠️  {path} is not an exportable file or folder, ignored");
    }
}

fn print_selection_status(selection: &SelectionState) {
    println!(
        "📄 {} of {} file(s) selected",
        selection.included_count(),
        selection.eligible().len()
    );

    match (selection.entry_point(), selection.export_entry_point()) {
        (_, Some(entry)) => println!("🏠 Entry point: {entry}"),
        (Some(entry), None) => println!("⚠️  Entry point {entry} is not selected"),
        (None, None) => {
            let candidates = selection.entry_point_candidates();
            if candidates.is_empty() {
                println!("⚠️  No HTML file available as entry point");
            } else {
                println!("⚠️  No entry point; pick one with --entry:");
                for candidate in candidates {
                    println!("   {candidate}");
                }
            }
        }
    }
}

fn print_summary(summary: &ExportSummary) {
    println!("✅ Export complete: {}", summary.archive.display());
    println!();
    println!("📊 Summary:");
    println!("   📦 Size: {}", summary.size);
    println!("   🏠 Entry point: {}", summary.entry_point);
    println!("   ✅ Packed: {}", summary.files);
    if summary.dropped > 0 {
        println!("   ❌ Failed to download: {}", summary.dropped);
    }
}

// Renders the selection as an indented tree, folders before files:
//   [x] fully selected, [~] partially selected, [ ] not selected
// Collapsed folders show their file count instead of their contents.
fn render_tree(selection: &SelectionState) -> Vec<String> {
    let mut lines = Vec::new();
    render_folder(selection, selection.tree(), "", "", &mut lines);
    lines
}

fn render_folder(
    selection: &SelectionState,
    node: &FolderNode,
    folder_path: &str,
    indent: &str,
    lines: &mut Vec<String>,
) {
    let folders = node.sorted_subfolders();
    let files = node.sorted_files();
    let total = folders.len() + files.len();

    for (idx, (name, child)) in folders.into_iter().enumerate() {
        let is_last = idx == total - 1;
        let connector = if is_last { "└── " } else { "├── " };
        let path = if folder_path.is_empty() {
            name.to_string()
        } else {
            format!("{folder_path}/{name}")
        };

        let mark = match selection.folder_state(&path) {
            FolderState::All => "[x]",
            FolderState::Partial => "[~]",
            FolderState::None => "[ ]",
        };

        if selection.is_expanded(&path) {
            lines.push(format!("{indent}{connector}{mark} {name}/"));
            let child_indent = format!("{indent}{}", if is_last { "    " } else { "│   " });
            render_folder(selection, child, &path, &child_indent, lines);
        } else {
            let count = child.files_under().len();
            lines.push(format!("{indent}{connector}{mark} {name}/ ({count} files)"));
        }
    }

    let offset = total - files.len();
    for (idx, file) in files.into_iter().enumerate() {
        let is_last = offset + idx == total - 1;
        let connector = if is_last { "└── " } else { "├── " };
        let mark = if selection.is_included(file) { "[x]" } else { "[ ]" };
        let entry = if selection.entry_point() == Some(file) {
            "  🏠"
        } else {
            ""
        };
        lines.push(format!("{indent}{connector}{mark} {}{entry}", base_name(file)));
    }
}

#[derive(Serialize)]
struct TreeReport<'a> {
    entry_point: Option<&'a str>,
    can_export: bool,
    eligible: usize,
    selected: usize,
    files: Vec<TreeReportFile<'a>>,
}

#[derive(Serialize)]
struct TreeReportFile<'a> {
    path: &'a str,
    selected: bool,
}

impl<'a> TreeReport<'a> {
    fn new(selection: &'a SelectionState) -> Self {
        Self {
            entry_point: selection.entry_point(),
            can_export: selection.can_export(),
            eligible: selection.eligible().len(),
            selected: selection.included_count(),
            files: selection
                .eligible()
                .iter()
                .map(|path| TreeReportFile {
                    path: path.as_str(),
                    selected: selection.is_included(path),
                })
                .collect(),
        }
    }
}
