// src/select/tree.rs
// =============================================================================
// Turns the flat list of eligible paths into a folder hierarchy.
//
// The tree is a read model: it is rebuilt from the eligible list whenever a
// new repository tree is loaded and is never edited in place. Selection
// state asks it "which files live under this folder?" to compute the
// all/none/partial status of a folder.
// =============================================================================

use std::collections::HashMap;

use super::filter::base_name;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FolderNode {
    /// Full paths of the files directly inside this folder
    pub files: Vec<String>,
    /// Child folders keyed by their own name (one path segment)
    pub subfolders: HashMap<String, FolderNode>,
}

impl FolderNode {
    // Builds the root node from full repository paths
    pub fn build<S: AsRef<str>>(files: &[S]) -> FolderNode {
        let mut root = FolderNode::default();

        for file in files {
            let path = file.as_ref();
            let segments: Vec<&str> = path.split('/').collect();

            // Walk (or create) one folder per segment except the file name
            let mut node = &mut root;
            for segment in &segments[..segments.len() - 1] {
                node = node.subfolders.entry(segment.to_string()).or_default();
            }
            node.files.push(path.to_string());
        }

        root
    }

    // Looks up a descendant folder by slash path; "" is this node
    pub fn folder(&self, path: &str) -> Option<&FolderNode> {
        let path = path.trim_matches('/');
        if path.is_empty() {
            return Some(self);
        }

        path.split('/')
            .try_fold(self, |node, segment| node.subfolders.get(segment))
    }

    /// Every file in this folder and all of its descendants.
    pub fn files_under(&self) -> Vec<&str> {
        let mut out = Vec::new();
        self.collect_files(&mut out);
        out
    }

    fn collect_files<'a>(&'a self, out: &mut Vec<&'a str>) {
        out.extend(self.files.iter().map(String::as_str));
        for child in self.subfolders.values() {
            child.collect_files(out);
        }
    }

    // Child folders in case-sensitive lexical order
    pub fn sorted_subfolders(&self) -> Vec<(&str, &FolderNode)> {
        let mut children: Vec<(&str, &FolderNode)> = self
            .subfolders
            .iter()
            .map(|(name, node)| (name.as_str(), node))
            .collect();
        children.sort_by(|a, b| a.0.cmp(b.0));
        children
    }

    // Direct files in case-sensitive lexical order of their base names
    pub fn sorted_files(&self) -> Vec<&str> {
        let mut files: Vec<&str> = self.files.iter().map(String::as_str).collect();
        files.sort_by(|a, b| base_name(a).cmp(base_name(b)));
        files
    }
}
