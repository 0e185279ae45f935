//! Actions: the units of work that produce artifacts.
//!
//! An [`ActionKind`] names one of the closed set of transformations the
//! planner can bind to a graph entry; an [`Action`] is a kind bound to a
//! concrete target and its sources, ready to run. Each kind declares how
//! many sources it accepts, and the bound is enforced twice: once by the
//! graph at registration time, and again by [`Action::new`] so a
//! hand-built action cannot sidestep it.
//!
//! All paths are site-root-relative strings; actions join them onto the
//! root at the filesystem boundary and create target parent directories
//! before writing.

use std::fmt;
use std::fs;
use std::io;
use std::path::PathBuf;

use serde::Serialize;
use serde_yaml::Mapping;
use thiserror::Error;

use crate::frontmatter::{self, FrontMatterError};
use crate::paths;
use crate::render::{self, RenderError, TemplateRenderer};

/// The closed set of transformations a graph entry can bind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum ActionKind {
    /// Byte-for-byte copy (assets and theme files).
    Copy,
    /// Markdown page source → HTML fragment plus front-matter sidecar.
    CompileMarkdown,
    /// HTML page source → body passed through plus front-matter sidecar.
    PassthroughHtml,
    /// Fragment plus optional sidecar → final page through the theme.
    ComposePage,
}

impl ActionKind {
    /// Most dependencies a target bound to this kind may accumulate.
    /// A return of zero would mean unbounded; every current kind is
    /// bounded.
    pub const fn max_dependencies(self) -> usize {
        match self {
            ActionKind::Copy => 1,
            ActionKind::CompileMarkdown => 1,
            ActionKind::PassthroughHtml => 1,
            ActionKind::ComposePage => 2,
        }
    }
}

impl fmt::Display for ActionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ActionKind::Copy => "copy",
            ActionKind::CompileMarkdown => "compile-markdown",
            ActionKind::PassthroughHtml => "passthrough-html",
            ActionKind::ComposePage => "compose-page",
        };
        f.write_str(name)
    }
}

#[derive(Error, Debug)]
pub enum ActionError {
    #[error("a {kind} action takes 1 to {limit} sources, got {count}")]
    WrongSourceCount {
        kind: ActionKind,
        limit: usize,
        count: usize,
    },
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
    #[error(transparent)]
    FrontMatter(#[from] FrontMatterError),
    #[error(transparent)]
    Render(#[from] RenderError),
}

/// A bound unit of work: produce `target` from `sources` under
/// `site_root`.
#[derive(Debug)]
pub struct Action {
    kind: ActionKind,
    target: String,
    sources: Vec<String>,
    site_root: PathBuf,
}

impl Action {
    /// Bind a kind to its target and sources, re-checking the kind's
    /// source-count contract.
    pub fn new(
        kind: ActionKind,
        target: impl Into<String>,
        sources: Vec<String>,
        site_root: impl Into<PathBuf>,
    ) -> Result<Self, ActionError> {
        let limit = kind.max_dependencies();
        let count = sources.len();
        if count == 0 || (limit != 0 && count > limit) {
            return Err(ActionError::WrongSourceCount { kind, limit, count });
        }
        Ok(Action {
            kind,
            target: target.into(),
            sources,
            site_root: site_root.into(),
        })
    }

    pub fn kind(&self) -> ActionKind {
        self.kind
    }

    pub fn target(&self) -> &str {
        &self.target
    }

    /// Execute the transformation.
    pub fn run(&self) -> Result<(), ActionError> {
        match self.kind {
            ActionKind::Copy => self.copy(),
            ActionKind::CompileMarkdown => self.compile_page(true),
            ActionKind::PassthroughHtml => self.compile_page(false),
            ActionKind::ComposePage => self.compose(),
        }
    }

    fn abs(&self, rel: &str) -> PathBuf {
        self.site_root.join(rel)
    }

    /// Absolute target path with its parent directories in place.
    fn prepare_target(&self) -> Result<PathBuf, io::Error> {
        let path = self.abs(&self.target);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        Ok(path)
    }

    fn copy(&self) -> Result<(), ActionError> {
        let target = self.prepare_target()?;
        fs::copy(self.abs(&self.sources[0]), target)?;
        Ok(())
    }

    /// Shared by the two page-source kinds: split off (or synthesize) the
    /// front matter, convert the body if asked, write the fragment to the
    /// target and the front matter to the target's sidecar.
    fn compile_page(&self, convert: bool) -> Result<(), ActionError> {
        let source = &self.sources[0];
        let text = fs::read_to_string(self.abs(source))?;
        let (block, body) = frontmatter::extract(&text)?;
        let front = match block {
            Some(block) => block.to_string(),
            None => frontmatter::synthesize(page_stem(source)),
        };
        let fragment = if convert {
            render::markdown_to_html(body)
        } else {
            body.to_string()
        };
        let target = self.prepare_target()?;
        fs::write(&target, fragment)?;
        fs::write(self.abs(&paths::page_sidecar_path(&self.target)), front)?;
        Ok(())
    }

    fn compose(&self) -> Result<(), ActionError> {
        let fragment = fs::read_to_string(self.abs(&self.sources[0]))?;
        let page = match self.sources.get(1) {
            Some(sidecar) => frontmatter::load_mapping(&fs::read_to_string(self.abs(sidecar))?)?,
            None => Mapping::new(),
        };
        let root_dir = paths::relative_root_dir(paths::INSTALL_DIR, &self.target);
        let renderer = TemplateRenderer::new(&self.site_root.join(paths::TEMPLATE_DIR))?;
        let rendered =
            renderer.render_page(paths::DEFAULT_TEMPLATE, &fragment, &root_dir, &page)?;
        let target = self.prepare_target()?;
        fs::write(target, rendered)?;
        Ok(())
    }
}

/// Base name of a page source without its extension, used for synthesized
/// titles.
fn page_stem(source: &str) -> &str {
    let base = source.rsplit_once('/').map_or(source, |(_, name)| name);
    base.rsplit_once('.').map_or(base, |(stem, _)| stem)
}
