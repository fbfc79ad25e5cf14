// src/export/paths.rs
// =============================================================================
// Re-roots exported paths at the entry point's directory.
//
// Example with entry point "site/index.html":
//   root prefix        -> "site/"
//   "site/app.js"      -> "app.js"
//   "site/css/a.css"   -> "css/a.css"
//   "docs/notes.txt"   -> "docs/notes.txt"  (outside the prefix, left as is)
//
// Files outside the entry point's directory keep their repository-relative
// path instead of being rejected.
// =============================================================================

// Directory of the entry point with a trailing '/', or "" at the repo root
pub fn root_for(entry_point: &str) -> String {
    match entry_point.rsplit_once('/') {
        Some((dir, _)) => format!("{dir}/"),
        None => String::new(),
    }
}

pub fn normalize(path: &str, prefix: &str) -> String {
    path.strip_prefix(prefix).unwrap_or(path).to_string()
}

// True when normalize() would leave the path untouched for a non-empty prefix
pub fn is_outside_root(path: &str, prefix: &str) -> bool {
    !prefix.is_empty() && !path.starts_with(prefix)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_root_level_entry_point() {
        assert_eq!(root_for("index.html"), "");
        for path in ["index.html", "css/a.css", "img/x.png", "README"] {
            assert_eq!(normalize(path, ""), path);
        }
    }

    #[test]
    fn test_nested_entry_point() {
        let prefix = root_for("site/index.html");
        assert_eq!(prefix, "site/");
        assert_eq!(normalize("site/app.js", &prefix), "app.js");
        assert_eq!(normalize("site/index.html", &prefix), "index.html");
    }

    #[test]
    fn test_deep_entry_point() {
        assert_eq!(root_for("a/b/c/index.htm"), "a/b/c/");
        assert_eq!(normalize("a/b/c/img/x.png", "a/b/c/"), "img/x.png");
    }

    #[test]
    fn test_files_outside_root_keep_repository_path() {
        let prefix = root_for("site/index.html");
        assert_eq!(normalize("docs/notes.txt", &prefix), "docs/notes.txt");
        assert!(is_outside_root("docs/notes.txt", &prefix));
        assert!(!is_outside_root("site/app.js", &prefix));
        assert!(!is_outside_root("anything", ""));
    }

    #[test]
    fn test_prefix_is_directory_aware() {
        // "site/" must not strip from "siteextra/..."
        assert_eq!(normalize("siteextra/a.css", "site/"), "siteextra/a.css");
    }
}
