//! Per-category planning rules and the plan builder.
//!
//! Rules translate classified source files into graph registrations. They
//! are pure functions from a file's path and category to a list of
//! [`Registration`]s; [`plan`] walks the site root, applies the rule for
//! each file, and merges everything into one fresh [`Graph`]. All path
//! arithmetic is delegated to [`crate::paths`].
//!
//! Per category:
//!
//! - **Asset**: the file is copied to the same relative path under the
//!   install root.
//! - **Theme**: the file is copied under `_install/theme/`, with the
//!   `templates/current` prefix stripped.
//! - **Page** (`.md` / `.html`): three steps per page. The source compiles
//!   to a fragment in `_build/` (markdown converted, HTML passed through),
//!   the fragment plus its front-matter sidecar compose into the final
//!   page, and the final page hangs off the root. Other extensions under a
//!   page directory are skipped.
//! - **Post**: reserved, no registrations yet.

use std::path::Path;

use thiserror::Error;

use crate::action::ActionKind;
use crate::graph::{Graph, GraphError, Registration, Target};
use crate::paths::{self, PageFormat};
use crate::walk::{self, Category, SourceFile, WalkError};

#[derive(Error, Debug)]
pub enum PlanError {
    #[error(transparent)]
    Walk(#[from] WalkError),
    #[error(transparent)]
    Graph(#[from] GraphError),
}

/// Build the full plan for a site root.
pub fn plan(site_root: &Path) -> Result<Graph, PlanError> {
    let mut graph = Graph::new();
    for file in walk::walk(site_root)? {
        for registration in registrations_for(&file) {
            graph.register(registration)?;
        }
    }
    Ok(graph)
}

/// The registrations one classified file implies.
pub fn registrations_for(file: &SourceFile) -> Vec<Registration> {
    match file.category {
        Category::Page => page_registrations(file),
        Category::Asset => {
            let source = file.source_path();
            let install = paths::asset_install_path(&source);
            copy_registrations(source, install)
        }
        Category::Theme => {
            let source = file.source_path();
            let install = paths::theme_install_path(&source);
            copy_registrations(source, install)
        }
        Category::Post => Vec::new(),
    }
}

/// Copy `source` to `install` and make the root require it.
fn copy_registrations(source: String, install: String) -> Vec<Registration> {
    let install = Target::path(install);
    vec![
        Registration::phony(Target::Site, vec![install.clone()]),
        Registration::concrete(install, vec![Target::path(source)], ActionKind::Copy),
    ]
}

fn page_registrations(file: &SourceFile) -> Vec<Registration> {
    let Some((stem, format)) = paths::split_page_name(&file.file_name) else {
        return Vec::new();
    };
    let compile = match format {
        PageFormat::Markdown => ActionKind::CompileMarkdown,
        PageFormat::Html => ActionKind::PassthroughHtml,
    };
    let build = paths::page_build_path(&file.directory, stem);
    let sidecar = paths::page_sidecar_path(&build);
    let install = Target::path(paths::page_install_path(&file.directory, stem));
    vec![
        Registration::phony(Target::Site, vec![install.clone()]),
        Registration::concrete(
            install,
            vec![Target::path(build.clone()), Target::path(sidecar)],
            ActionKind::ComposePage,
        ),
        Registration::concrete(
            Target::path(build),
            vec![Target::path(file.source_path())],
            compile,
        ),
    ]
}
