//! All user-facing output formatting.
//!
//! Each command has a `format_*` function (pure, returns `String`s) and a
//! `print_*` wrapper that writes to stdout. Commands go through here so
//! tests can assert on output without capturing stdout.
//!
//! # Output Format
//!
//! ## deps
//!
//! ```text
//! __site__ (phony)
//!     _install/index.html
//! _build/index.middle  [compile-markdown]
//!     pages/index.md
//! _install/index.html  [compose-page]
//!     _build/index.middle
//!     _build/index.middle.yml
//!
//! 3 targets (1 phony, 2 concrete)
//! ```
//!
//! ## make
//!
//! ```text
//! Compiling _build/index.middle
//! Composing _install/index.html
//! Copying _install/theme/assets/style.css
//! Built 3 targets
//! ```
//!
//! ## init
//!
//! ```text
//! Created pages/index.md
//! Created templates/current/default.tpl
//! Created templates/current/assets/style.css
//! Initialized site with 3 files
//! ```

use serde::Serialize;

use crate::action::ActionKind;
use crate::build::BuildReport;
use crate::graph::{Entry, Graph};
use crate::scaffold::InitReport;

// ============================================================================
// deps listing
// ============================================================================

/// Format the resolved plan: the root first, then concrete targets sorted
/// by path, each with its action in brackets and its dependencies indented
/// beneath it.
pub fn format_deps(graph: &Graph) -> Vec<String> {
    let entries = graph.sorted_entries();
    let phony = entries.iter().filter(|e| e.is_phony()).count();
    let mut lines = Vec::new();
    for entry in &entries {
        lines.push(entry_heading(entry));
        for dependency in entry.dependencies() {
            lines.push(format!("    {dependency}"));
        }
    }
    lines.push(String::new());
    lines.push(format!(
        "{} ({phony} phony, {} concrete)",
        count(entries.len(), "target"),
        entries.len() - phony
    ));
    lines
}

fn entry_heading(entry: &Entry) -> String {
    if entry.is_phony() {
        format!("{} (phony)", entry.target())
    } else if let Some(kind) = entry.action() {
        format!("{}  [{kind}]", entry.target())
    } else {
        entry.target().to_string()
    }
}

/// Print the plan listing to stdout.
pub fn print_deps(graph: &Graph) {
    print_lines(&format_deps(graph));
}

#[derive(Serialize)]
struct DepsDocument {
    targets: Vec<DepsTarget>,
}

#[derive(Serialize)]
struct DepsTarget {
    name: String,
    phony: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    action: Option<ActionKind>,
    dependencies: Vec<String>,
}

/// The `deps --json` document: same data and order as the text listing.
pub fn format_deps_json(graph: &Graph) -> Result<String, serde_json::Error> {
    let targets = graph
        .sorted_entries()
        .into_iter()
        .map(|entry| DepsTarget {
            name: entry.target().to_string(),
            phony: entry.is_phony(),
            action: entry.action(),
            dependencies: entry
                .dependencies()
                .iter()
                .map(ToString::to_string)
                .collect(),
        })
        .collect();
    serde_json::to_string_pretty(&DepsDocument { targets })
}

// ============================================================================
// make progress and summary
// ============================================================================

fn action_verb(kind: ActionKind) -> &'static str {
    match kind {
        ActionKind::Copy => "Copying",
        ActionKind::CompileMarkdown => "Compiling",
        ActionKind::PassthroughHtml => "Preparing",
        ActionKind::ComposePage => "Composing",
    }
}

/// One progress line per executed action.
pub fn format_action_line(kind: ActionKind, target: &str) -> String {
    format!("{} {}", action_verb(kind), target)
}

/// Print an action's progress line as it runs.
pub fn print_action_line(kind: ActionKind, target: &str) {
    println!("{}", format_action_line(kind, target));
}

/// Closing summary for `make`.
pub fn format_build_summary(report: &BuildReport) -> String {
    if report.built.is_empty() && report.up_to_date == 0 {
        return "Nothing to build".to_string();
    }
    let mut summary = format!("Built {}", count(report.built.len(), "target"));
    if report.up_to_date > 0 {
        summary.push_str(&format!(", {} up to date", report.up_to_date));
    }
    summary
}

pub fn print_build_summary(report: &BuildReport) {
    println!("{}", format_build_summary(report));
}

// ============================================================================
// init
// ============================================================================

/// Lines for `init`: one per created file, or the already-initialized
/// notice.
pub fn format_init(report: &InitReport) -> Vec<String> {
    if report.already_initialized {
        return vec![format!(
            "Site already initialized ({} exists)",
            report.marker
        )];
    }
    let mut lines: Vec<String> = report
        .created
        .iter()
        .map(|path| format!("Created {path}"))
        .collect();
    lines.push(format!(
        "Initialized site with {}",
        count(report.created.len(), "file")
    ));
    lines
}

pub fn print_init(report: &InitReport) {
    print_lines(&format_init(report));
}

// ============================================================================
// shared helpers
// ============================================================================

fn count(n: usize, noun: &str) -> String {
    if n == 1 {
        format!("1 {noun}")
    } else {
        format!("{n} {noun}s")
    }
}

fn print_lines(lines: &[String]) {
    for line in lines {
        println!("{line}");
    }
}
