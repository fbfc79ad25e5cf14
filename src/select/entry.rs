// src/select/entry.rs
// =============================================================================
// Picks the default entry point: the HTML page that becomes the root of the
// exported site.
//
// Search order:
// 1. For each canonical name (index.html, index.htm, home.html, ...):
//    an exact match at the repository root, else the first file in listing
//    order whose path ends with "/<name>"
// 2. Otherwise the first HTML-like file in listing order
// 3. Otherwise nothing; the user has to choose one before exporting
// =============================================================================

use super::filter::is_html_like;

const CANONICAL_NAMES: &[&str] = &[
    "index.html",
    "index.htm",
    "home.html",
    "default.html",
    "main.html",
];

pub fn detect_entry_point<S: AsRef<str>>(files: &[S]) -> Option<String> {
    for name in CANONICAL_NAMES {
        if let Some(root_match) = files.iter().find(|f| f.as_ref() == *name) {
            return Some(root_match.as_ref().to_string());
        }

        let nested = format!("/{name}");
        if let Some(nested_match) = files.iter().find(|f| f.as_ref().ends_with(&nested)) {
            return Some(nested_match.as_ref().to_string());
        }
    }

    files
        .iter()
        .map(|f| f.as_ref())
        .find(|path| is_html_like(path))
        .map(str::to_string)
}
