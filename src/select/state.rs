// src/select/state.rs
// =============================================================================
// The mutable part of an export session: which files are included, which
// file is the entry point, and which folders are expanded in the tree view.
//
// A SelectionState is an ordinary owned value. Every operation takes it by
// reference, there is no global session, and a new value is built each time
// a branch's tree is loaded (everything included, nothing expanded, entry
// point re-detected).
//
// Folder status (all / none / partial) is computed by walking the tree on
// every query and is never stored.
// =============================================================================

use std::collections::BTreeSet;

use serde::Serialize;

use super::entry::detect_entry_point;
use super::filter::{eligible_files, is_html_like};
use super::tree::FolderNode;
use crate::error::SelectionRejected;
use crate::github::RepositoryEntry;

/// Selection status of a folder, derived from the files below it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FolderState {
    All,
    None,
    Partial,
}

#[derive(Debug, Clone)]
pub struct SelectionState {
    eligible: Vec<String>,
    tree: FolderNode,
    included: BTreeSet<String>,
    entry_point: Option<String>,
    expanded: BTreeSet<String>,
}

impl SelectionState {
    // Fresh state for a newly loaded tree listing
    pub fn new(entries: &[RepositoryEntry]) -> Self {
        Self::from_eligible(eligible_files(entries))
    }

    pub fn from_eligible(eligible: Vec<String>) -> Self {
        let tree = FolderNode::build(&eligible);
        let included = eligible.iter().cloned().collect();
        let entry_point = detect_entry_point(&eligible);

        Self {
            eligible,
            tree,
            included,
            entry_point,
            expanded: BTreeSet::new(),
        }
    }

    pub fn eligible(&self) -> &[String] {
        &self.eligible
    }

    pub fn tree(&self) -> &FolderNode {
        &self.tree
    }

    pub fn is_eligible(&self, path: &str) -> bool {
        self.eligible.iter().any(|p| p == path)
    }

    pub fn is_folder(&self, path: &str) -> bool {
        self.tree.folder(path).is_some()
    }

    pub fn is_included(&self, path: &str) -> bool {
        self.included.contains(path)
    }

    // Included files in the order the repository listed them
    pub fn included_files(&self) -> Vec<&str> {
        self.eligible
            .iter()
            .filter(|p| self.included.contains(p.as_str()))
            .map(String::as_str)
            .collect()
    }

    pub fn included_count(&self) -> usize {
        self.included.len()
    }

    /// Adds or removes one file.
    ///
    /// Returns false (and changes nothing) when the path is not an eligible
    /// file.
    pub fn toggle_file(&mut self, path: &str, on: bool) -> bool {
        if !self.is_eligible(path) {
            return false;
        }

        if on {
            self.included.insert(path.to_string());
        } else {
            self.included.remove(path);
        }
        true
    }

    /// Adds or removes every file below a folder in one step.
    ///
    /// Returns false when no such folder exists.
    pub fn toggle_folder(&mut self, folder: &str, on: bool) -> bool {
        let Some(node) = self.tree.folder(folder) else {
            return false;
        };

        for path in node.files_under() {
            if on {
                self.included.insert(path.to_string());
            } else {
                self.included.remove(path);
            }
        }
        true
    }

    pub fn select_all(&mut self) {
        self.included = self.eligible.iter().cloned().collect();
    }

    pub fn clear_all(&mut self) {
        self.included.clear();
    }

    pub fn folder_state(&self, folder: &str) -> FolderState {
        let files = match self.tree.folder(folder) {
            Some(node) => node.files_under(),
            None => return FolderState::None,
        };

        let selected = files
            .iter()
            .filter(|path| self.included.contains(**path))
            .count();

        if selected == 0 {
            FolderState::None
        } else if selected == files.len() {
            FolderState::All
        } else {
            FolderState::Partial
        }
    }

    /// Designates the entry point, or clears it with `None`.
    ///
    /// An HTML file that is currently deselected is added back to the
    /// selection, since the entry point always ships with the archive.
    pub fn set_entry_point(&mut self, path: Option<&str>) -> Result<(), SelectionRejected> {
        let Some(path) = path else {
            self.entry_point = None;
            return Ok(());
        };

        if !is_html_like(path) {
            return Err(SelectionRejected::NotHtml(path.to_string()));
        }
        if !self.is_eligible(path) {
            return Err(SelectionRejected::NotEligible(path.to_string()));
        }

        self.included.insert(path.to_string());
        self.entry_point = Some(path.to_string());
        Ok(())
    }

    /// The raw entry point as last set, even if currently deselected.
    pub fn entry_point(&self) -> Option<&str> {
        self.entry_point.as_deref()
    }

    // The entry point, only if it is usable for an export right now
    pub fn export_entry_point(&self) -> Option<&str> {
        self.entry_point
            .as_deref()
            .filter(|path| is_html_like(path) && self.included.contains(*path))
    }

    pub fn can_export(&self) -> bool {
        !self.included.is_empty() && self.export_entry_point().is_some()
    }

    // Every HTML file the user could pick as entry point
    pub fn entry_point_candidates(&self) -> Vec<&str> {
        self.eligible
            .iter()
            .map(String::as_str)
            .filter(|path| is_html_like(path))
            .collect()
    }

    // ---- expand / collapse (presentation only, never affects export) ----

    pub fn toggle_expanded(&mut self, folder: &str) {
        let folder = folder.trim_matches('/');
        if !self.expanded.remove(folder) {
            self.expanded.insert(folder.to_string());
        }
    }

    pub fn is_expanded(&self, folder: &str) -> bool {
        self.expanded.contains(folder.trim_matches('/'))
    }

    pub fn expand_all(&mut self) {
        let mut folders = Vec::new();
        collect_folder_paths(&self.tree, "", &mut folders);
        self.expanded.extend(folders);
    }

    pub fn collapse_all(&mut self) {
        self.expanded.clear();
    }
}

fn collect_folder_paths(node: &FolderNode, prefix: &str, out: &mut Vec<String>) {
    for (name, child) in node.sorted_subfolders() {
        let path = if prefix.is_empty() {
            name.to_string()
        } else {
            format!("{prefix}/{name}")
        };
        collect_folder_paths(child, &path, out);
        out.push(path);
    }
}

// -----------------------------------------------------------------------------
// BEGINNER NOTES:
//
// 1. Why is FolderState never stored?
//    - A stored "partial" flag goes stale the moment a single file toggles
//    - folder_state() walks files_under() and counts, so it always agrees
//      with `included`, whatever sequence of toggles got us here
//
// 2. Why BTreeSet for `included`?
//    - Membership checks are what every operation does
//    - Listing order comes from `eligible`, not from the set, so
//      included_files() still follows the repository's own order
//
// 3. `let Some(node) = ... else { return false; };`
//    - let-else binds on the happy path and bails out otherwise
// -----------------------------------------------------------------------------
