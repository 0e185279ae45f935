//! # sitemake
//!
//! A minimal static site builder driven by an explicit dependency graph.
//! Your filesystem is the data source: files under `pages/` become pages,
//! any other directory is copied into the site as-is, and the active theme
//! under `templates/current/` frames every page.
//!
//! # Architecture: Plan, Then Execute
//!
//! Every invocation derives a complete build plan before touching any
//! output:
//!
//! ```text
//! 1. Walk     <root>/            →  classified source files
//! 2. Plan     source files       →  dependency graph (targets + actions)
//! 3. Execute  graph, post-order  →  _build/ + _install/
//! ```
//!
//! This separation exists for three reasons:
//!
//! - **Debuggability**: `deps` prints the exact plan `make` would run,
//!   before anything runs, as text or JSON.
//! - **Fail fast**: plan well-formedness (dependency counts, action
//!   bindings, phony flags) is validated while the graph is assembled, so
//!   a malformed plan never half-executes.
//! - **Testability**: planning is a pure function from paths to a graph;
//!   tests assert on whole plans without building anything.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`walk`] | Walks the site root and classifies files by top-level directory |
//! | [`rules`] | Pure per-category rules turning classified files into graph registrations |
//! | [`graph`] | Target keys, entries, registration merging, well-formedness checks |
//! | [`action`] | The closed set of transformations: copy, compile, passthrough, compose |
//! | [`build`] | Post-order executor with cycle detection and the rebuild-policy seam |
//! | [`paths`] | Directory convention and every source → artifact path derivation |
//! | [`frontmatter`] | The `--`-delimited front-matter boundary format |
//! | [`render`] | Markdown conversion and the minijinja template contract |
//! | [`scaffold`] | `init`: a working starter site from embedded assets |
//! | [`output`] | CLI output formatting, pure `format_*` functions + `print_*` wrappers |
//!
//! # Design Decisions
//!
//! ## Make Semantics Without Make
//!
//! The plan is a make-style graph: path-keyed targets, ordered
//! dependencies, one phony root ([`graph::Target::Site`], shown as
//! `__site__`) aggregating everything the finished site needs. Unlike
//! make there is no persisted state between runs and no mtime comparison;
//! the shipped policy rebuilds every target, and the
//! [`build::RebuildPolicy`] trait is the seam where an incremental policy
//! plugs in without changing the traversal.
//!
//! ## A Closed Action Set
//!
//! Transformations are an enum ([`action::ActionKind`]), not trait
//! objects. What a build can do is part of the tool's contract: each
//! variant declares how many sources it accepts, the graph enforces that
//! bound at registration time, and `match` dispatch means adding a
//! variant fails to compile until every consumer handles it.
//!
//! ## Plan-Time Validation
//!
//! Registration is the choke point. Empty dependency lists, conflicting
//! action bindings, phony/concrete flips, and over-long dependency lists
//! are all rejected while the plan is assembled; `make` either gets a
//! well-formed graph or nothing. Cycles are the one property checked
//! during execution instead, where the traversal can name the target that
//! closed the loop.
//!
//! ## `((` `))` Template Delimiters
//!
//! Templates are runtime files (themes are content, not code), rendered
//! with minijinja under custom `((` / `))` variable delimiters. Theme text
//! can pass through tools that treat `{{` as their own syntax without
//! escaping. The `.tpl` extension keeps auto-escaping off; page fragments
//! are already HTML by the time they reach the template.
//!
//! ## Front Matter as a Boundary Format
//!
//! Pages carry metadata between bare `--` lines. The block is YAML, but
//! only [`frontmatter`] knows that; the rest of the pipeline moves the
//! block around as text and hands templates a parsed mapping. A page
//! without front matter gets a synthesized `title`, so templates can rely
//! on one always being present.

pub mod action;
pub mod build;
pub mod frontmatter;
pub mod graph;
pub mod output;
pub mod paths;
pub mod render;
pub mod rules;
pub mod scaffold;
pub mod walk;

#[cfg(test)]
pub(crate) mod test_helpers;
