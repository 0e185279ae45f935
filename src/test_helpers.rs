//! Shared test utilities for the sitemake test suite.
//!
//! Fixture builders write site trees into temp directories, and lookup
//! helpers panic with a listing of what the plan actually contains, so a
//! failing test names the graph it got instead of unwrapping a `None`.

use std::fs;
use std::path::Path;

use crate::graph::{Entry, Graph, Target};

// =========================================================================
// Fixture setup
// =========================================================================

/// Write `content` at `rel` under `root`, creating parent directories.
pub fn write_site_file(root: &Path, rel: &str, content: &str) {
    let path = root.join(rel);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(path, content).unwrap();
}

// =========================================================================
// Graph lookups that panic with a clear message on miss
// =========================================================================

/// Find a concrete entry by target path. Panics if not found.
pub fn find_entry<'a>(graph: &'a Graph, path: &str) -> &'a Entry {
    graph.get(&Target::path(path)).unwrap_or_else(|| {
        let available = target_names(graph);
        panic!("target '{path}' not found. Available: {available:?}")
    })
}

/// All target names in listing order.
pub fn target_names(graph: &Graph) -> Vec<String> {
    graph
        .sorted_entries()
        .iter()
        .map(|e| e.target().to_string())
        .collect()
}
