//! Site scaffolding for `init`.
//!
//! Writes the smallest tree the build pipeline can work with: one sample
//! page, the default template, and a theme stylesheet. The starter files
//! ship inside the binary (`static/`), so `init` works offline and the
//! scaffolded site builds without further setup.

use std::fs;
use std::io;
use std::path::Path;

use thiserror::Error;

use crate::paths;

const STARTER_PAGE: &str = include_str!("../static/index.md");
const STARTER_TEMPLATE: &str = include_str!("../static/default.tpl");
const STARTER_STYLESHEET: &str = include_str!("../static/style.css");

#[derive(Error, Debug)]
pub enum ScaffoldError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}

/// What `init` did.
#[derive(Debug)]
pub struct InitReport {
    /// Site-root-relative paths written, in creation order.
    pub created: Vec<String>,
    /// The file whose presence marks a site as initialized.
    pub marker: String,
    pub already_initialized: bool,
}

/// Scaffold the directory convention into `site_root`.
///
/// The default template is the marker: when it already exists the site is
/// treated as initialized and nothing is touched.
pub fn init_site(site_root: &Path) -> Result<InitReport, ScaffoldError> {
    let marker = format!("{}/{}", paths::TEMPLATE_DIR, paths::DEFAULT_TEMPLATE);
    if site_root.join(&marker).exists() {
        return Ok(InitReport {
            created: Vec::new(),
            marker,
            already_initialized: true,
        });
    }
    let files = [
        ("pages/index.md".to_string(), STARTER_PAGE),
        (marker.clone(), STARTER_TEMPLATE),
        (
            format!("{}/assets/style.css", paths::TEMPLATE_DIR),
            STARTER_STYLESHEET,
        ),
    ];
    let mut created = Vec::new();
    for (rel, content) in files {
        let path = site_root.join(&rel);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, content)?;
        created.push(rel);
    }
    Ok(InitReport {
        created,
        marker,
        already_initialized: false,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn creates_the_starter_tree() {
        let root = TempDir::new().unwrap();
        let report = init_site(root.path()).unwrap();
        assert!(!report.already_initialized);
        assert_eq!(
            report.created,
            [
                "pages/index.md",
                "templates/current/default.tpl",
                "templates/current/assets/style.css",
            ]
        );
        let page = fs::read_to_string(root.path().join("pages/index.md")).unwrap();
        assert!(page.starts_with("--\n"));
        let template =
            fs::read_to_string(root.path().join("templates/current/default.tpl")).unwrap();
        assert!(template.contains("(( content ))"));
        assert!(template.contains("(( site.root_dir ))"));
    }

    #[test]
    fn second_init_touches_nothing() {
        let root = TempDir::new().unwrap();
        init_site(root.path()).unwrap();
        let page_path = root.path().join("pages/index.md");
        fs::write(&page_path, "customized\n").unwrap();

        let report = init_site(root.path()).unwrap();
        assert!(report.already_initialized);
        assert!(report.created.is_empty());
        assert_eq!(fs::read_to_string(&page_path).unwrap(), "customized\n");
    }

    #[test]
    fn marker_names_the_default_template() {
        let root = TempDir::new().unwrap();
        let report = init_site(root.path()).unwrap();
        assert_eq!(report.marker, "templates/current/default.tpl");
    }
}
