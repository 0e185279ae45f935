//! Centralized directory convention and path derivations.
//!
//! Every source-path → artifact-path rule lives in this module so the
//! planner ([`crate::rules`]) and the actions ([`crate::action`]) agree
//! byte-for-byte on where artifacts go. All paths here are `/`-separated
//! strings relative to the site root; callers join them onto the root with
//! [`std::path::Path::join`] at the filesystem boundary.
//!
//! ## Layout
//!
//! ```text
//! <site root>/
//!   pages/               page sources (.md, .html); `source/` is an alias
//!   templates/current/   active theme; only assets/ is installed
//!   <other dirs>/        copied into the site as-is
//!   _build/              intermediate fragments + front-matter sidecars
//!   _install/            the final, installable site
//! ```
//!
//! The first path component of a page source is dropped on output, so
//! `pages/essays/one.md` installs at `_install/essays/one.html` regardless
//! of which page directory name the site uses.

/// Intermediate artifacts (HTML fragments, front-matter sidecars).
pub const BUILD_DIR: &str = "_build";

/// The final site tree. Everything under here is publishable.
pub const INSTALL_DIR: &str = "_install";

/// Where the active theme lives, relative to the site root.
pub const TEMPLATE_DIR: &str = "templates/current";

/// The template every page is composed through.
pub const DEFAULT_TEMPLATE: &str = "default.tpl";

/// Page source formats the pipeline recognizes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageFormat {
    /// Converted to an HTML fragment before composition.
    Markdown,
    /// Already HTML; body passes through unchanged.
    Html,
}

/// Join a root-relative directory and a file name. The top level of the
/// site root is represented by an empty directory string.
pub fn join_rel(directory: &str, file_name: &str) -> String {
    if directory.is_empty() {
        file_name.to_string()
    } else {
        format!("{directory}/{file_name}")
    }
}

/// Split a page file name into its stem and format.
///
/// Returns `None` for extensions the page pipeline does not handle; the
/// planner skips those files rather than failing.
///
/// - `"one.md"` → `("one", Markdown)`
/// - `"about.html"` → `("about", Html)`
/// - `"notes.txt"` → `None`
pub fn split_page_name(file_name: &str) -> Option<(&str, PageFormat)> {
    if let Some(stem) = file_name.strip_suffix(".md") {
        return Some((stem, PageFormat::Markdown));
    }
    if let Some(stem) = file_name.strip_suffix(".html") {
        return Some((stem, PageFormat::Html));
    }
    None
}

/// Drop the first `/`-separated component: `"pages/essays"` → `"essays"`,
/// `"pages"` → `""`.
fn strip_first_component(path: &str) -> &str {
    match path.find('/') {
        Some(pos) => &path[pos + 1..],
        None => "",
    }
}

/// Install path for an asset source: the relative path is preserved under
/// the install root (`"css/site.css"` → `"_install/css/site.css"`).
pub fn asset_install_path(source: &str) -> String {
    format!("{INSTALL_DIR}/{source}")
}

/// Install path for a theme file: the `templates/current` prefix is
/// replaced by `_install/theme`, keeping the remainder intact
/// (`"templates/current/assets/style.css"` →
/// `"_install/theme/assets/style.css"`).
pub fn theme_install_path(source: &str) -> String {
    let rest = source
        .strip_prefix(TEMPLATE_DIR)
        .map(|r| r.trim_start_matches('/'))
        .unwrap_or(source);
    format!("{INSTALL_DIR}/theme/{rest}")
}

/// Intermediate fragment path for a page: `("pages/essays", "one")` →
/// `"_build/essays/one.middle"`.
pub fn page_build_path(directory: &str, stem: &str) -> String {
    let rel = join_rel(strip_first_component(directory), stem);
    format!("{BUILD_DIR}/{rel}.middle")
}

/// Front-matter sidecar written next to a fragment: the fragment path
/// plus `.yml`.
pub fn page_sidecar_path(build_path: &str) -> String {
    format!("{build_path}.yml")
}

/// Final page path: `("pages/essays", "one")` → `"_install/essays/one.html"`.
pub fn page_install_path(directory: &str, stem: &str) -> String {
    let rel = join_rel(strip_first_component(directory), stem);
    format!("{INSTALL_DIR}/{rel}.html")
}

/// Relative prefix from an installed file back to the install root, used
/// as `site.root_dir` in templates so themes link assets without knowing
/// where the site is mounted.
///
/// The `prefix` (normally [`INSTALL_DIR`]) is stripped if present; the
/// number of `..` components equals the remaining directory depth.
///
/// - `("_install", "_install/index.html")` → `"."`
/// - `("_install", "_install/essays/one.html")` → `".."`
/// - `("_install", "_install/a/b/c.html")` → `"../.."`
pub fn relative_root_dir(prefix: &str, target: &str) -> String {
    let rel = target
        .strip_prefix(prefix)
        .map(|r| r.trim_start_matches('/'))
        .unwrap_or(target);
    let ascents = rel.split('/').count().saturating_sub(1);
    if ascents == 0 {
        ".".to_string()
    } else {
        vec![".."; ascents].join("/")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn join_rel_top_level() {
        assert_eq!(join_rel("", "one.md"), "one.md");
    }

    #[test]
    fn join_rel_nested() {
        assert_eq!(join_rel("pages/essays", "one.md"), "pages/essays/one.md");
    }

    #[test]
    fn split_markdown_page() {
        assert_eq!(split_page_name("one.md"), Some(("one", PageFormat::Markdown)));
    }

    #[test]
    fn split_html_page() {
        assert_eq!(split_page_name("about.html"), Some(("about", PageFormat::Html)));
    }

    #[test]
    fn split_rejects_other_extensions() {
        assert_eq!(split_page_name("notes.txt"), None);
        assert_eq!(split_page_name("Makefile"), None);
    }

    #[test]
    fn asset_keeps_relative_path() {
        assert_eq!(asset_install_path("css/site.css"), "_install/css/site.css");
    }

    #[test]
    fn theme_strips_current_prefix() {
        assert_eq!(
            theme_install_path("templates/current/assets/style.css"),
            "_install/theme/assets/style.css"
        );
    }

    #[test]
    fn page_paths_drop_first_component() {
        assert_eq!(page_build_path("pages/x", "y"), "_build/x/y.middle");
        assert_eq!(
            page_sidecar_path(&page_build_path("pages/x", "y")),
            "_build/x/y.middle.yml"
        );
        assert_eq!(page_install_path("pages/x", "y"), "_install/x/y.html");
    }

    #[test]
    fn page_paths_at_page_root() {
        assert_eq!(page_build_path("pages", "index"), "_build/index.middle");
        assert_eq!(page_install_path("source", "index"), "_install/index.html");
    }

    #[test]
    fn root_dir_at_install_root() {
        assert_eq!(relative_root_dir(INSTALL_DIR, "_install/index.html"), ".");
    }

    #[test]
    fn root_dir_one_level_down() {
        assert_eq!(relative_root_dir(INSTALL_DIR, "_install/essays/one.html"), "..");
    }

    #[test]
    fn root_dir_two_levels_down() {
        assert_eq!(relative_root_dir(INSTALL_DIR, "_install/a/b/c.html"), "../..");
    }

    #[test]
    fn root_dir_without_prefix() {
        // Targets outside the install tree are measured as given.
        assert_eq!(relative_root_dir(INSTALL_DIR, "x/y.html"), "..");
    }
}
