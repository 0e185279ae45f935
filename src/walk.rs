//! Site-root walking and top-level classification.
//!
//! The walker decides which files participate in the build and what role
//! they play, before any graph exists. Classification happens once, at the
//! top level of the site root: the directory a file lives under determines
//! its [`Category`], and the planner ([`crate::rules`]) never looks at
//! file contents to decide what to do.
//!
//! ## Classification table
//!
//! | Top-level entry | Category |
//! |---|---|
//! | `source/`, `pages/` | Page |
//! | `posts/` | Post (reserved, produces nothing) |
//! | `templates/` | Theme; only `current/assets/` is walked |
//! | leading `_` or `.` | skipped (generated output, dotfiles) |
//! | any other directory | Asset |
//!
//! Top-level plain files are ignored. Inside a walked subtree, entries
//! starting with `.` are pruned together with their whole subtree. The
//! walk is lexicographic at every level, so the same tree always produces
//! the same file sequence and therefore the same plan.

use std::fs;
use std::io;
use std::path::Path;

use thiserror::Error;
use walkdir::WalkDir;

/// What a top-level directory's contents become.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Category {
    /// Markdown/HTML sources compiled and composed into final pages.
    Page,
    /// Copied into the install tree as-is.
    Asset,
    /// The active theme's `assets/` subtree, installed under `theme/`.
    Theme,
    /// Recognized so the directory is not treated as an asset; currently
    /// produces nothing.
    Post,
}

/// One classified source file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceFile {
    /// Parent directory relative to the site root, `/`-separated; empty
    /// for files directly under the root.
    pub directory: String,
    pub file_name: String,
    pub category: Category,
}

impl SourceFile {
    /// The file's full site-root-relative path.
    pub fn source_path(&self) -> String {
        crate::paths::join_rel(&self.directory, &self.file_name)
    }
}

#[derive(Error, Debug)]
pub enum WalkError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
    #[error("walk error: {0}")]
    Walk(#[from] walkdir::Error),
}

/// Category for a top-level name; `None` for reserved entries (leading
/// `_` or `.`).
pub fn classify(name: &str) -> Option<Category> {
    if name.starts_with('_') || name.starts_with('.') {
        return None;
    }
    Some(match name {
        "source" | "pages" => Category::Page,
        "posts" => Category::Post,
        "templates" => Category::Theme,
        _ => Category::Asset,
    })
}

/// Walk a site root and classify every participating file.
pub fn walk(site_root: &Path) -> Result<Vec<SourceFile>, WalkError> {
    let mut top: Vec<(String, bool)> = Vec::new();
    for entry in fs::read_dir(site_root)? {
        let entry = entry?;
        let name = entry.file_name().to_string_lossy().into_owned();
        top.push((name, entry.file_type()?.is_dir()));
    }
    top.sort();

    let mut files = Vec::new();
    for (name, is_dir) in top {
        let Some(category) = classify(&name) else {
            continue;
        };
        if !is_dir {
            continue;
        }
        match category {
            Category::Page | Category::Asset => {
                collect(site_root, &name, category, &mut files)?;
            }
            Category::Theme => {
                let assets = format!("{name}/current/assets");
                collect(site_root, &assets, category, &mut files)?;
            }
            Category::Post => {}
        }
    }
    Ok(files)
}

/// Collect every file below `base_rel`, pruning hidden entries. A missing
/// base is not an error: `templates/` without `current/assets/` is a site
/// with no theme assets.
fn collect(
    site_root: &Path,
    base_rel: &str,
    category: Category,
    files: &mut Vec<SourceFile>,
) -> Result<(), WalkError> {
    let base = site_root.join(base_rel);
    if !base.is_dir() {
        return Ok(());
    }
    let entries = WalkDir::new(&base)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|e| e.depth() == 0 || !is_hidden(e));
    for entry in entries {
        let entry = entry?;
        if !entry.file_type().is_file() {
            continue;
        }
        let rel = entry.path().strip_prefix(site_root).unwrap_or(entry.path());
        let mut parts: Vec<String> = rel
            .components()
            .map(|c| c.as_os_str().to_string_lossy().into_owned())
            .collect();
        let file_name = parts.pop().unwrap_or_default();
        files.push(SourceFile {
            directory: parts.join("/"),
            file_name,
            category,
        });
    }
    Ok(())
}

fn is_hidden(entry: &walkdir::DirEntry) -> bool {
    entry.file_name().to_string_lossy().starts_with('.')
}
