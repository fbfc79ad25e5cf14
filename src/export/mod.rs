// src/export/mod.rs
// =============================================================================
// Turning a selection into an archive.
//
// Submodules:
// - paths: re-rooting paths at the entry point's folder
// - batch: bounded-concurrency download of the selected files
// - archive: ZIP packing
// - pipeline: load -> gate -> download -> pack -> deliver
// =============================================================================

mod archive;
mod batch;
mod paths;
mod pipeline;

pub use pipeline::{build_package, deliver, load_selection, ExportSummary};
