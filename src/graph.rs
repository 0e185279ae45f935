//! The dependency graph: target keys, entries, and registration merging.
//!
//! A graph maps each [`Target`] to an [`Entry`] describing how to produce
//! it: an ordered dependency list, an optional [`ActionKind`] binding, and
//! a phony flag. Planning rules never touch entries directly; they emit
//! [`Registration`]s which [`Graph::register`] merges, enforcing every
//! well-formedness rule at registration time so a malformed plan fails
//! before anything is written to disk.
//!
//! ## Well-formedness
//!
//! - every entry has at least one dependency (empty registrations are
//!   rejected);
//! - a concrete entry always has an action, and a phony entry never does
//!   (guaranteed by the [`Registration`] constructors);
//! - an action variant caps how many dependencies its target may
//!   accumulate ([`ActionKind::max_dependencies`]);
//! - re-registering a target appends dependencies but may not change its
//!   action or flip it between phony and concrete.

use std::collections::HashMap;
use std::fmt;

use thiserror::Error;

use crate::action::ActionKind;

/// Display name of the synthetic root target.
pub const SITE_TARGET_NAME: &str = "__site__";

/// Key identifying a buildable artifact.
///
/// `Site` is the phony root the whole site hangs off. It is its own
/// variant rather than a reserved string, so a source file that happens to
/// be named `__site__` can never collide with it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Target {
    /// The synthetic root; depends on every top-level artifact.
    Site,
    /// A `/`-separated path relative to the site root.
    Path(String),
}

impl Target {
    pub fn path(path: impl Into<String>) -> Self {
        Target::Path(path.into())
    }

    /// The root-relative path of a concrete target; `None` for the root.
    pub fn as_path(&self) -> Option<&str> {
        match self {
            Target::Site => None,
            Target::Path(p) => Some(p),
        }
    }
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Target::Site => f.write_str(SITE_TARGET_NAME),
            Target::Path(p) => f.write_str(p),
        }
    }
}

/// One node of the graph: everything needed to produce a single target.
#[derive(Debug, Clone)]
pub struct Entry {
    target: Target,
    dependencies: Vec<Target>,
    action: Option<ActionKind>,
    phony: bool,
}

impl Entry {
    pub fn target(&self) -> &Target {
        &self.target
    }

    /// Dependencies in registration order. Order is meaningful: composite
    /// actions read their sources positionally.
    pub fn dependencies(&self) -> &[Target] {
        &self.dependencies
    }

    pub fn action(&self) -> Option<ActionKind> {
        self.action
    }

    /// Phony targets group dependencies and are never built themselves.
    pub fn is_phony(&self) -> bool {
        self.phony
    }
}

/// What a planning rule asks the graph to record.
///
/// The two constructors are the only way to build one, which keeps two
/// invalid shapes unrepresentable: a concrete target without an action,
/// and a phony target with one.
#[derive(Debug, Clone)]
pub struct Registration {
    target: Target,
    dependencies: Vec<Target>,
    action: Option<ActionKind>,
    phony: bool,
}

impl Registration {
    /// A concrete artifact produced from `dependencies` by `action`.
    pub fn concrete(target: Target, dependencies: Vec<Target>, action: ActionKind) -> Self {
        Registration {
            target,
            dependencies,
            action: Some(action),
            phony: false,
        }
    }

    /// A phony grouping target: aggregates dependencies, never built.
    pub fn phony(target: Target, dependencies: Vec<Target>) -> Self {
        Registration {
            target,
            dependencies,
            action: None,
            phony: true,
        }
    }

    pub fn target(&self) -> &Target {
        &self.target
    }
}

#[derive(Error, Debug)]
pub enum GraphError {
    #[error("target `{0}` registered with no dependencies")]
    NoDependencies(Target),
    #[error(
        "target `{target}` would have {count} dependencies but a {kind} action takes at most {limit}"
    )]
    TooManyDependencies {
        target: Target,
        kind: ActionKind,
        limit: usize,
        count: usize,
    },
    #[error("target `{target}` is already produced by {existing}, cannot rebind to {requested}")]
    ConflictingAction {
        target: Target,
        existing: ActionKind,
        requested: ActionKind,
    },
    #[error("target `{0}` registered as both phony and concrete")]
    PhonyMismatch(Target),
}

/// The whole build plan for one invocation, keyed by target.
#[derive(Debug, Clone)]
pub struct Graph {
    entries: HashMap<Target, Entry>,
}

impl Graph {
    /// An empty plan. The phony root is present from the start, so building
    /// a site with no sources is a successful no-op rather than a
    /// missing-target error.
    pub fn new() -> Self {
        let mut entries = HashMap::new();
        entries.insert(
            Target::Site,
            Entry {
                target: Target::Site,
                dependencies: Vec::new(),
                action: None,
                phony: true,
            },
        );
        Graph { entries }
    }

    /// Merge one registration into the plan.
    ///
    /// New targets get a fresh entry; existing targets accumulate
    /// dependencies in registration order. Fails on an empty dependency
    /// list, an action rebind, a phony/concrete flip, or a dependency
    /// count exceeding the action's cap. Validation happens here, not at
    /// build time, so a bad plan never executes partially.
    pub fn register(&mut self, registration: Registration) -> Result<(), GraphError> {
        let Registration {
            target,
            dependencies,
            action,
            phony,
        } = registration;
        if dependencies.is_empty() {
            return Err(GraphError::NoDependencies(target));
        }
        let entry = self.entries.entry(target.clone()).or_insert_with(|| Entry {
            target: target.clone(),
            dependencies: Vec::new(),
            action: None,
            phony,
        });
        if entry.phony != phony {
            return Err(GraphError::PhonyMismatch(target));
        }
        match (entry.action, action) {
            (Some(existing), Some(requested)) if existing != requested => {
                return Err(GraphError::ConflictingAction {
                    target,
                    existing,
                    requested,
                });
            }
            (None, Some(requested)) => entry.action = Some(requested),
            _ => {}
        }
        if let Some(kind) = entry.action {
            let limit = kind.max_dependencies();
            let count = entry.dependencies.len() + dependencies.len();
            if limit != 0 && count > limit {
                return Err(GraphError::TooManyDependencies {
                    target,
                    kind,
                    limit,
                    count,
                });
            }
        }
        entry.dependencies.extend(dependencies);
        Ok(())
    }

    pub fn get(&self, target: &Target) -> Option<&Entry> {
        self.entries.get(target)
    }

    /// The phony root entry. Present from construction.
    pub fn root(&self) -> &Entry {
        &self.entries[&Target::Site]
    }

    /// Number of entries, the root included.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries in deterministic order: the root first, then concrete
    /// targets sorted by path. Listings and tests rely on this order.
    pub fn sorted_entries(&self) -> Vec<&Entry> {
        let mut entries: Vec<&Entry> = self.entries.values().collect();
        entries.sort_by(|a, b| a.target.cmp(&b.target));
        entries
    }
}

impl Default for Graph {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_graph_has_phony_root() {
        let graph = Graph::new();
        assert_eq!(graph.len(), 1);
        let root = graph.root();
        assert!(root.is_phony());
        assert!(root.action().is_none());
        assert!(root.dependencies().is_empty());
    }

    #[test]
    fn site_target_displays_as_reserved_name() {
        assert_eq!(Target::Site.to_string(), "__site__");
        assert_eq!(Target::path("_install/a.html").to_string(), "_install/a.html");
    }

    #[test]
    fn site_sorts_before_any_path() {
        let mut targets = vec![Target::path("_build/a.middle"), Target::Site];
        targets.sort();
        assert_eq!(targets[0], Target::Site);
    }

    #[test]
    fn concrete_registration_creates_entry() {
        let mut graph = Graph::new();
        graph
            .register(Registration::concrete(
                Target::path("_install/a.css"),
                vec![Target::path("css/a.css")],
                ActionKind::Copy,
            ))
            .unwrap();
        let entry = graph.get(&Target::path("_install/a.css")).unwrap();
        assert_eq!(entry.action(), Some(ActionKind::Copy));
        assert!(!entry.is_phony());
        assert_eq!(entry.dependencies(), &[Target::path("css/a.css")]);
    }

    #[test]
    fn reregistration_appends_dependencies_in_order() {
        let mut graph = Graph::new();
        graph
            .register(Registration::phony(Target::Site, vec![Target::path("a")]))
            .unwrap();
        graph
            .register(Registration::phony(Target::Site, vec![Target::path("b")]))
            .unwrap();
        assert_eq!(
            graph.root().dependencies(),
            &[Target::path("a"), Target::path("b")]
        );
    }

    #[test]
    fn empty_dependency_list_is_rejected() {
        let mut graph = Graph::new();
        let err = graph
            .register(Registration::phony(Target::Site, vec![]))
            .unwrap_err();
        assert!(matches!(err, GraphError::NoDependencies(Target::Site)));
    }

    #[test]
    fn copy_rejects_second_dependency() {
        let mut graph = Graph::new();
        graph
            .register(Registration::concrete(
                Target::path("_install/a.css"),
                vec![Target::path("css/a.css")],
                ActionKind::Copy,
            ))
            .unwrap();
        let err = graph
            .register(Registration::concrete(
                Target::path("_install/a.css"),
                vec![Target::path("css/b.css")],
                ActionKind::Copy,
            ))
            .unwrap_err();
        assert!(matches!(
            err,
            GraphError::TooManyDependencies { limit: 1, count: 2, .. }
        ));
    }

    #[test]
    fn compose_accepts_two_then_rejects_third() {
        let mut graph = Graph::new();
        graph
            .register(Registration::concrete(
                Target::path("_install/a.html"),
                vec![Target::path("_build/a.middle"), Target::path("_build/a.middle.yml")],
                ActionKind::ComposePage,
            ))
            .unwrap();
        let err = graph
            .register(Registration::concrete(
                Target::path("_install/a.html"),
                vec![Target::path("extra")],
                ActionKind::ComposePage,
            ))
            .unwrap_err();
        assert!(matches!(
            err,
            GraphError::TooManyDependencies { limit: 2, count: 3, .. }
        ));
    }

    #[test]
    fn rebinding_action_is_rejected() {
        let mut graph = Graph::new();
        graph
            .register(Registration::concrete(
                Target::path("_build/a.middle"),
                vec![Target::path("pages/a.md")],
                ActionKind::CompileMarkdown,
            ))
            .unwrap();
        let err = graph
            .register(Registration::concrete(
                Target::path("_build/a.middle"),
                vec![Target::path("pages/a.md")],
                ActionKind::Copy,
            ))
            .unwrap_err();
        assert!(matches!(err, GraphError::ConflictingAction { .. }));
    }

    #[test]
    fn phony_flip_is_rejected() {
        let mut graph = Graph::new();
        let err = graph
            .register(Registration::concrete(
                Target::Site,
                vec![Target::path("a")],
                ActionKind::Copy,
            ))
            .unwrap_err();
        assert!(matches!(err, GraphError::PhonyMismatch(Target::Site)));
    }

    #[test]
    fn failed_registration_leaves_entry_unchanged() {
        let mut graph = Graph::new();
        graph
            .register(Registration::concrete(
                Target::path("_install/a.css"),
                vec![Target::path("css/a.css")],
                ActionKind::Copy,
            ))
            .unwrap();
        let _ = graph
            .register(Registration::concrete(
                Target::path("_install/a.css"),
                vec![Target::path("css/b.css")],
                ActionKind::Copy,
            ))
            .unwrap_err();
        let entry = graph.get(&Target::path("_install/a.css")).unwrap();
        assert_eq!(entry.dependencies(), &[Target::path("css/a.css")]);
    }

    #[test]
    fn sorted_entries_lead_with_root() {
        let mut graph = Graph::new();
        graph
            .register(Registration::concrete(
                Target::path("_install/z.css"),
                vec![Target::path("css/z.css")],
                ActionKind::Copy,
            ))
            .unwrap();
        graph
            .register(Registration::concrete(
                Target::path("_install/a.css"),
                vec![Target::path("css/a.css")],
                ActionKind::Copy,
            ))
            .unwrap();
        let order: Vec<String> = graph
            .sorted_entries()
            .iter()
            .map(|e| e.target().to_string())
            .collect();
        assert_eq!(order, ["__site__", "_install/a.css", "_install/z.css"]);
    }
}
