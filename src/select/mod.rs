// src/select/mod.rs
// =============================================================================
// Choosing what goes into an export.
//
// Submodules:
// - filter: which repository entries are exportable at all
// - tree: folder hierarchy over the exportable files
// - entry: default entry point detection
// - state: the user's current selection (files, entry point, expanded folders)
// =============================================================================

mod entry;
mod filter;
mod state;
mod tree;

pub use filter::{base_name, is_binary};
pub use state::{FolderState, SelectionState};
pub use tree::FolderNode;
