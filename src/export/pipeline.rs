// src/export/pipeline.rs
// =============================================================================
// Ties the pieces together for one export session.
//
// 1. load_selection: fetch the tree, filter it, build a fresh SelectionState
// 2. (the caller edits the selection)
// 3. build_package: gate on selection + entry point, download, normalize, zip
// 4. deliver: write the archive to the output directory
//
// Steps 1 and 3 fail as a whole only for the reasons in ExportError; a file
// that cannot be downloaded is just missing from the archive.
// =============================================================================

use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::{info, warn};

use super::archive::{format_bytes, pack};
use super::batch::fetch_and_normalize;
use super::paths::{is_outside_root, root_for};
use crate::config::ExportConfig;
use crate::error::ExportError;
use crate::github::{ContentProvider, RepoRef, TreeProvider};
use crate::select::SelectionState;

/// A finished archive, not yet written anywhere
#[derive(Debug, Clone)]
pub struct ExportPackage {
    pub filename: String,
    pub bytes: Vec<u8>,
    pub entry_point: String,
    pub root: String,
    pub requested: usize,
    pub packed: usize,
}

impl ExportPackage {
    pub fn dropped(&self) -> usize {
        self.requested - self.packed
    }
}

/// What gets printed after a successful export
#[derive(Debug, Clone, Serialize)]
pub struct ExportSummary {
    pub repository: String,
    pub branch: String,
    pub archive: PathBuf,
    pub entry_point: String,
    pub root: String,
    pub files: usize,
    pub dropped: usize,
    pub bytes: u64,
    pub size: String,
}

impl ExportSummary {
    pub fn new(repo: &RepoRef, package: &ExportPackage, archive: PathBuf) -> Self {
        let bytes = package.bytes.len() as u64;
        Self {
            repository: format!("{}/{}", repo.owner, repo.name),
            branch: repo.branch.clone(),
            archive,
            entry_point: package.entry_point.clone(),
            root: package.root.clone(),
            files: package.packed,
            dropped: package.dropped(),
            bytes,
            size: format_bytes(bytes),
        }
    }
}

pub async fn load_selection<T>(provider: &T, repo: &RepoRef) -> Result<SelectionState, ExportError>
where
    T: TreeProvider + ?Sized,
{
    let entries = provider
        .get_tree(repo)
        .await
        .map_err(ExportError::TreeFetch)?;

    let selection = SelectionState::new(&entries);
    if selection.eligible().is_empty() {
        return Err(ExportError::NoEligibleFiles);
    }

    info!(
        repo = %repo,
        entries = entries.len(),
        eligible = selection.eligible().len(),
        entry_point = selection.entry_point().unwrap_or("<none>"),
        "loaded repository tree"
    );

    Ok(selection)
}

pub async fn build_package<C>(
    provider: &C,
    repo: &RepoRef,
    selection: &SelectionState,
    config: &ExportConfig,
) -> Result<ExportPackage, ExportError>
where
    C: ContentProvider + ?Sized,
{
    if selection.included_count() == 0 {
        return Err(ExportError::EmptySelection);
    }
    let entry_point = selection
        .export_entry_point()
        .ok_or(ExportError::NoEntryPoint)?;

    let root = root_for(entry_point);
    let included = selection.included_files();

    let outside = included
        .iter()
        .filter(|path| is_outside_root(path, &root))
        .count();
    if outside > 0 {
        warn!(
            count = outside,
            root = %root,
            "some selected files are outside the entry point's folder and keep their repository paths"
        );
    }

    info!(files = included.len(), root = %root, "downloading selected files");
    let files = fetch_and_normalize(provider, repo, &included, &root, config.batch_size()).await;

    info!(files = files.len(), "creating ZIP archive");
    let bytes = pack(&files, config.compression_level())?;

    Ok(ExportPackage {
        filename: format!("{}.zip", repo.name),
        bytes,
        entry_point: entry_point.to_string(),
        root,
        requested: included.len(),
        packed: files.len(),
    })
}

// Hands the archive to its destination: a file in `dir`
pub async fn deliver(package: &ExportPackage, dir: &Path) -> Result<PathBuf, ExportError> {
    tokio::fs::create_dir_all(dir).await?;
    let target = dir.join(&package.filename);
    tokio::fs::write(&target, &package.bytes).await?;
    info!(path = %target.display(), bytes = package.bytes.len(), "archive written");
    Ok(target)
}

// -----------------------------------------------------------------------------
// BEGINNER NOTES:
//
// 1. Which failures stop an export?
//    - Returned as Err: tree fetch, no eligible files, empty selection,
//      no usable entry point, archive or disk errors
//    - Only logged: a single file that fails to download (batch.rs drops it)
//
// 2. `.ok_or(ExportError::NoEntryPoint)?`
//    - Turns an Option into a Result so `?` can return early
//
// 3. Why generic over `C: ContentProvider` instead of taking GithubClient?
//    - The tests below hand in an in-memory FakeRepo, no network needed
// -----------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::GithubError;
    use crate::github::{EntryKind, RepositoryEntry};
    use async_trait::async_trait;
    use base64::engine::general_purpose::STANDARD;
    use base64::Engine;
    use std::collections::HashMap;
    use std::io::Cursor;

    // Serves a fixed tree and fixed file bodies; unknown files fail
    struct FakeRepo {
        tree: Option<Vec<RepositoryEntry>>,
        contents: HashMap<String, String>,
    }

    impl FakeRepo {
        fn new(files: &[(&str, &str)]) -> Self {
            let tree = files
                .iter()
                .map(|(path, _)| RepositoryEntry {
                    path: path.to_string(),
                    kind: EntryKind::Blob,
                })
                .collect();
            let contents = files
                .iter()
                .map(|(path, body)| (path.to_string(), STANDARD.encode(body)))
                .collect();
            Self {
                tree: Some(tree),
                contents,
            }
        }

        fn without_content(mut self, path: &str) -> Self {
            self.contents.remove(path);
            self
        }
    }

    #[async_trait]
    impl TreeProvider for FakeRepo {
        async fn get_tree(&self, _repo: &RepoRef) -> Result<Vec<RepositoryEntry>, GithubError> {
            self.tree.clone().ok_or_else(|| GithubError::Api {
                status: 401,
                message: "Bad credentials".to_string(),
            })
        }
    }

    #[async_trait]
    impl ContentProvider for FakeRepo {
        async fn get_content(&self, _repo: &RepoRef, path: &str) -> Result<String, GithubError> {
            self.contents.get(path).cloned().ok_or_else(|| GithubError::Api {
                status: 404,
                message: "Not Found".to_string(),
            })
        }
    }

    fn repo() -> RepoRef {
        RepoRef {
            owner: "octo".to_string(),
            name: "site".to_string(),
            branch: "main".to_string(),
        }
    }

    fn archive_names(bytes: &[u8]) -> Vec<String> {
        let mut archive = zip::ZipArchive::new(Cursor::new(bytes.to_vec())).unwrap();
        (0..archive.len())
            .map(|i| archive.by_index(i).unwrap().name().to_string())
            .collect()
    }

    #[tokio::test]
    async fn test_tree_failure_is_fatal() {
        let fake = FakeRepo {
            tree: None,
            contents: HashMap::new(),
        };
        let err = load_selection(&fake, &repo()).await.unwrap_err();
        assert!(matches!(err, ExportError::TreeFetch(_)));
        assert!(err.to_string().contains("Bad credentials"));
    }

    #[tokio::test]
    async fn test_no_eligible_files_is_fatal() {
        let fake = FakeRepo::new(&[("package.json", "{}"), ("src/main.rs", "fn main() {}")]);
        let err = load_selection(&fake, &repo()).await.unwrap_err();
        assert!(matches!(err, ExportError::NoEligibleFiles));
    }

    #[tokio::test]
    async fn test_root_level_site_keeps_paths() {
        let fake = FakeRepo::new(&[
            ("index.html", "<h1>hi</h1>"),
            ("css/a.css", "body {}"),
            ("img/x.png", "png"),
            ("README", "readme"),
        ]);
        let selection = load_selection(&fake, &repo()).await.unwrap();
        let package = build_package(&fake, &repo(), &selection, &ExportConfig::new())
            .await
            .unwrap();

        assert_eq!(package.filename, "site.zip");
        assert_eq!(package.root, "");
        assert_eq!(
            archive_names(&package.bytes),
            vec!["index.html", "css/a.css", "img/x.png", "README"]
        );
    }

    #[tokio::test]
    async fn test_nested_site_is_rerooted() {
        let fake = FakeRepo::new(&[("site/index.html", "<html></html>"), ("site/app.js", "go()")]);
        let selection = load_selection(&fake, &repo()).await.unwrap();
        assert_eq!(selection.entry_point(), Some("site/index.html"));

        let package = build_package(&fake, &repo(), &selection, &ExportConfig::new())
            .await
            .unwrap();
        assert_eq!(package.root, "site/");
        assert_eq!(archive_names(&package.bytes), vec!["index.html", "app.js"]);
    }

    #[tokio::test]
    async fn test_one_failed_download_still_exports() {
        let fake = FakeRepo::new(&[
            ("index.html", "<h1>hi</h1>"),
            ("style.css", "body {}"),
            ("app.js", "go()"),
        ])
        .without_content("style.css");
        let selection = load_selection(&fake, &repo()).await.unwrap();

        let package = build_package(&fake, &repo(), &selection, &ExportConfig::new())
            .await
            .unwrap();
        assert_eq!(package.packed, 2);
        assert_eq!(package.dropped(), 1);
        assert_eq!(archive_names(&package.bytes), vec!["index.html", "app.js"]);
    }

    #[tokio::test]
    async fn test_only_included_files_are_exported() {
        let fake = FakeRepo::new(&[
            ("index.html", "<h1>hi</h1>"),
            ("img/x.png", "png"),
            ("img/y.png", "png"),
        ]);
        let mut selection = load_selection(&fake, &repo()).await.unwrap();
        selection.toggle_folder("img", false);
        selection.toggle_file("img/y.png", true);

        let package = build_package(&fake, &repo(), &selection, &ExportConfig::new())
            .await
            .unwrap();
        assert_eq!(archive_names(&package.bytes), vec!["index.html", "img/y.png"]);
    }

    #[tokio::test]
    async fn test_empty_selection_is_fatal() {
        let fake = FakeRepo::new(&[("index.html", "<h1>hi</h1>")]);
        let mut selection = load_selection(&fake, &repo()).await.unwrap();
        selection.clear_all();

        let err = build_package(&fake, &repo(), &selection, &ExportConfig::new())
            .await
            .unwrap_err();
        assert!(matches!(err, ExportError::EmptySelection));
    }

    #[tokio::test]
    async fn test_missing_entry_point_is_fatal() {
        let fake = FakeRepo::new(&[("style.css", "body {}")]);
        let selection = load_selection(&fake, &repo()).await.unwrap();

        let err = build_package(&fake, &repo(), &selection, &ExportConfig::new())
            .await
            .unwrap_err();
        assert!(matches!(err, ExportError::NoEntryPoint));
    }

    #[tokio::test]
    async fn test_deselected_entry_point_is_fatal() {
        let fake = FakeRepo::new(&[("index.html", "<h1>hi</h1>"), ("a.css", "")]);
        let mut selection = load_selection(&fake, &repo()).await.unwrap();
        selection.toggle_file("index.html", false);

        let err = build_package(&fake, &repo(), &selection, &ExportConfig::new())
            .await
            .unwrap_err();
        assert!(matches!(err, ExportError::NoEntryPoint));
    }

    #[tokio::test]
    async fn test_files_outside_root_keep_repository_paths() {
        let fake = FakeRepo::new(&[
            ("docs/readme.txt", "notes"),
            ("web/index.html", "<h1>hi</h1>"),
            ("web/a.css", ""),
        ]);
        let selection = load_selection(&fake, &repo()).await.unwrap();
        let package = build_package(&fake, &repo(), &selection, &ExportConfig::new())
            .await
            .unwrap();

        assert_eq!(
            archive_names(&package.bytes),
            vec!["docs/readme.txt", "index.html", "a.css"]
        );
    }

    #[tokio::test]
    async fn test_deliver_writes_archive() {
        let fake = FakeRepo::new(&[("index.html", "<h1>hi</h1>")]);
        let selection = load_selection(&fake, &repo()).await.unwrap();
        let package = build_package(&fake, &repo(), &selection, &ExportConfig::new())
            .await
            .unwrap();

        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("nested");
        let written = deliver(&package, &out).await.unwrap();

        assert_eq!(written, out.join("site.zip"));
        assert_eq!(std::fs::read(&written).unwrap(), package.bytes);

        let summary = ExportSummary::new(&repo(), &package, written);
        assert_eq!(summary.repository, "octo/site");
        assert_eq!(summary.files, 1);
        assert_eq!(summary.dropped, 0);
    }
}
