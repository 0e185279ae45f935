//! Rendering collaborators: markdown conversion and the template engine.
//!
//! The build engine never talks to `pulldown-cmark` or `minijinja`
//! directly; it sees exactly two contracts. [`markdown_to_html`] turns
//! markdown text into an HTML fragment, and [`TemplateRenderer`] turns a
//! fragment plus page variables into a final page. Everything else about
//! the engines (delimiters, loaders, escaping) is decided here.
//!
//! ## Template contract
//!
//! Templates use `((` / `))` as variable delimiters instead of `{{` /
//! `}}`; theme authors can run their files through tools that claim the
//! default mustache syntax without fighting the site builder. Templates
//! are loaded by name from the active theme directory. The `.tpl`
//! extension keeps minijinja's auto-escaping off, so the already-HTML
//! `content` fragment is inserted verbatim.
//!
//! Variables every page template receives:
//!
//! - `content`: the page body as an HTML fragment
//! - `site.root_dir`: relative prefix back to the install root
//! - `page`: the page's front-matter mapping

use std::path::Path;

use minijinja::syntax::SyntaxConfig;
use minijinja::{Environment, Value, context, path_loader};
use pulldown_cmark::{Parser, html};
use serde_yaml::Mapping;
use thiserror::Error;

const VARIABLE_START: &str = "((";
const VARIABLE_END: &str = "))";

#[derive(Error, Debug)]
pub enum RenderError {
    #[error("template configuration: {0}")]
    Configuration(minijinja::Error),
    #[error("template `{name}`: {source}")]
    Render {
        name: String,
        #[source]
        source: minijinja::Error,
    },
}

impl RenderError {
    fn render(name: &str, source: minijinja::Error) -> Self {
        RenderError::Render {
            name: name.to_string(),
            source,
        }
    }
}

/// Convert markdown text to an HTML fragment.
pub fn markdown_to_html(markdown: &str) -> String {
    let parser = Parser::new(markdown);
    let mut out = String::new();
    html::push_html(&mut out, parser);
    out
}

/// Renders final pages through the site's active theme.
pub struct TemplateRenderer {
    env: Environment<'static>,
}

impl TemplateRenderer {
    /// Load templates by name from `template_dir` (normally
    /// `<site root>/templates/current`).
    pub fn new(template_dir: &Path) -> Result<Self, RenderError> {
        let syntax = SyntaxConfig::builder()
            .variable_delimiters(VARIABLE_START, VARIABLE_END)
            .build()
            .map_err(RenderError::Configuration)?;
        let mut env = Environment::new();
        env.set_syntax(syntax);
        env.set_loader(path_loader(template_dir));
        Ok(TemplateRenderer { env })
    }

    /// Render one page. `content` is the HTML fragment, `root_dir` becomes
    /// `site.root_dir`, `page` is the front-matter mapping.
    pub fn render_page(
        &self,
        template_name: &str,
        content: &str,
        root_dir: &str,
        page: &Mapping,
    ) -> Result<String, RenderError> {
        let template = self
            .env
            .get_template(template_name)
            .map_err(|source| RenderError::render(template_name, source))?;
        template
            .render(context! {
                content => content,
                site => context! { root_dir => root_dir },
                page => Value::from_serialize(page),
            })
            .map_err(|source| RenderError::render(template_name, source))
    }
}
