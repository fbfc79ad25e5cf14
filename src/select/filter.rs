// src/select/filter.rs
// =============================================================================
// Decides which repository entries can go into a static export.
//
// Rules, applied in order (the first failing rule excludes the entry):
// 1. Only blobs (files) qualify, never trees (directories)
// 2. Nothing inside an excluded directory (node_modules, src, tests, ...),
//    matched as a plain prefix or as "/name" anywhere in the path
// 3. No build/lockfile/config manifests (package.json, Dockerfile, ...)
// 4. Extension must be on the allowlist, or the path has no '.' at all
//
// Everything here is a pure function of the path, so results never depend
// on call order.
// =============================================================================

use crate::github::{EntryKind, RepositoryEntry};

// Directory names whose contents never ship with a static site
const EXCLUDED_DIRECTORIES: &[&str] = &[
    "src",
    "node_modules",
    "tests",
    "test",
    ".github",
    "dist",
    "build",
    ".git",
    "coverage",
    "__tests__",
    "spec",
    ".vscode",
    ".idea",
    "vendor",
    "packages",
];

// Base names of build manifests, lockfiles and tool configs
const EXCLUDED_FILES: &[&str] = &[
    ".gitignore",
    ".gitattributes",
    "package.json",
    "package-lock.json",
    "yarn.lock",
    "composer.json",
    "composer.lock",
    "Gemfile",
    "Gemfile.lock",
    ".npmrc",
    ".nvmrc",
    "tsconfig.json",
    "webpack.config.js",
    "rollup.config.js",
    "vite.config.js",
    ".babelrc",
    ".eslintrc",
    ".prettierrc",
    "jest.config.js",
    ".travis.yml",
    ".gitlab-ci.yml",
    "Dockerfile",
    "docker-compose.yml",
    "Makefile",
    "Rakefile",
    "gulpfile.js",
    "Gruntfile.js",
];

const ALLOWED_EXTENSIONS: &[&str] = &[
    "html", "htm", "css", "js", "json", "xml", "txt", // markup, code, data
    "jpg", "jpeg", "png", "gif", "svg", "webp", "ico", // images
    "woff", "woff2", "ttf", "otf", "eot", // fonts
    "mp4", "webm", "ogg", "mp3", "wav", // media
    "pdf", "md",
];

// Extensions whose content is packed as raw bytes instead of UTF-8 text
const BINARY_EXTENSIONS: &[&str] = &[
    "jpg", "jpeg", "png", "gif", "webp", "svg", "ico", "woff", "woff2", "ttf", "otf", "eot",
    "mp4", "webm", "ogg", "mp3", "wav", "pdf", "zip", "tar", "gz",
];

const HTML_EXTENSIONS: &[&str] = &["html", "htm"];

/// Returns true if the entry may be offered for export.
pub fn is_eligible(entry: &RepositoryEntry) -> bool {
    if entry.kind != EntryKind::Blob {
        return false;
    }

    let path = entry.path.as_str();

    if EXCLUDED_DIRECTORIES
        .iter()
        .any(|dir| starts_in_directory(path, dir) || nested_in_directory(path, dir))
    {
        return false;
    }

    if EXCLUDED_FILES.contains(&base_name(path)) {
        return false;
    }

    match extension(path) {
        Some(ext) => ALLOWED_EXTENSIONS.contains(&ext.as_str()),
        // Extensionless files (CNAME, LICENSE, ...) are let through
        None => true,
    }
}

// Keeps the eligible entries, in their original listing order
pub fn eligible_files(entries: &[RepositoryEntry]) -> Vec<String> {
    entries
        .iter()
        .filter(|entry| is_eligible(entry))
        .map(|entry| entry.path.clone())
        .collect()
}

/// Lower-cased text after the final '.' of the full path.
///
/// Note this looks at the whole path, not only the base name, so
/// `v1.2/README` yields `Some("2/readme")`, which no allowlist contains.
pub fn extension(path: &str) -> Option<String> {
    path.rsplit_once('.').map(|(_, ext)| ext.to_lowercase())
}

pub fn is_html_like(path: &str) -> bool {
    extension(path).is_some_and(|ext| HTML_EXTENSIONS.contains(&ext.as_str()))
}

pub fn is_binary(path: &str) -> bool {
    extension(path).is_some_and(|ext| BINARY_EXTENSIONS.contains(&ext.as_str()))
}

pub fn base_name(path: &str) -> &str {
    path.rsplit('/').next().unwrap_or(path)
}

// `node_modules/x` style: the path begins with the excluded name.
// Plain prefix match, so `srcset.html` is caught by `src` too.
fn starts_in_directory(path: &str, dir: &str) -> bool {
    path.starts_with(dir)
}

// `foo/node_modules/x` style: `/name` appears anywhere after the first segment
fn nested_in_directory(path: &str, dir: &str) -> bool {
    path.contains(&format!("/{dir}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn blob(path: &str) -> RepositoryEntry {
        RepositoryEntry {
            path: path.to_string(),
            kind: EntryKind::Blob,
        }
    }

    #[test]
    fn test_directories_are_never_eligible() {
        let entry = RepositoryEntry {
            path: "assets".to_string(),
            kind: EntryKind::Tree,
        };
        assert!(!is_eligible(&entry));
    }

    #[test]
    fn test_static_assets_are_eligible() {
        for path in ["index.html", "css/site.css", "img/Logo.PNG", "fonts/a.woff2"] {
            assert!(is_eligible(&blob(path)), "{path} should be eligible");
        }
    }

    #[test]
    fn test_excluded_directory_as_prefix() {
        assert!(!is_eligible(&blob("node_modules/lib/index.js")));
        assert!(!is_eligible(&blob("src/app.js")));
    }

    #[test]
    fn test_excluded_directory_nested() {
        assert!(!is_eligible(&blob("foo/node_modules/x.js")));
        assert!(!is_eligible(&blob("site/.github/logo.png")));
    }

    #[test]
    fn test_directory_names_match_as_plain_substrings() {
        for path in [
            "srcset.html",
            "pages/testimonials.html",
            "css/spectrum.css",
            "assets/test-data.json",
            "docs/dist",
            "a/buildings/x.png",
        ] {
            assert!(!is_eligible(&blob(path)), "{path} should be excluded");
        }
        // A name in the middle of a segment does not count
        assert!(is_eligible(&blob("css/mysrc.css")));
    }

    #[test]
    fn test_excluded_file_names() {
        assert!(!is_eligible(&blob("package.json")));
        assert!(!is_eligible(&blob("docs/Makefile")));
        // Other JSON files are fine
        assert!(is_eligible(&blob("data/manifest.json")));
    }

    #[test]
    fn test_extension_allowlist() {
        assert!(!is_eligible(&blob("scripts/build.sh")));
        assert!(!is_eligible(&blob("main.rs")));
    }

    #[test]
    fn test_extensionless_files_pass() {
        assert!(is_eligible(&blob("CNAME")));
        assert!(is_eligible(&blob("README")));
    }

    #[test]
    fn test_dot_in_directory_counts_as_extension() {
        assert_eq!(extension("v1.2/README").as_deref(), Some("2/readme"));
        assert!(!is_eligible(&blob("v1.2/README")));
    }

    #[test]
    fn test_eligible_files_keeps_order() {
        let entries = vec![blob("b.html"), blob("package.json"), blob("a.css")];
        assert_eq!(eligible_files(&entries), vec!["b.html", "a.css"]);
    }

    #[test]
    fn test_is_eligible_is_deterministic() {
        let entries = vec![blob("index.html"), blob("tests/a.html"), blob("x.exe")];
        let first: Vec<bool> = entries.iter().map(is_eligible).collect();
        let second: Vec<bool> = entries.iter().rev().map(is_eligible).collect();
        assert_eq!(first, second.into_iter().rev().collect::<Vec<_>>());
    }

    #[test]
    fn test_html_and_binary_classification() {
        assert!(is_html_like("site/INDEX.HTM"));
        assert!(!is_html_like("index.html.md"));
        assert!(is_binary("img/photo.JPG"));
        assert!(!is_binary("css/site.css"));
        assert!(!is_binary("LICENSE"));
    }
}
