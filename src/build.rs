//! The build executor: post-order graph traversal.
//!
//! Starting from the phony root, every dependency is resolved before the
//! entry that needs it; a concrete entry's action runs exactly once per
//! invocation, after its dependencies and only if the [`RebuildPolicy`]
//! says so. Dependencies that are not plan keys are pre-existing leaves
//! (the original source files) and need no resolution of their own.
//!
//! Traversal keeps a per-invocation visit-state map. `Done` entries are
//! skipped on re-visit, so shared dependencies build once; meeting an
//! entry already marked `Visiting` means the plan has a cycle, reported
//! as [`BuildError::CyclicDependency`] instead of recursing forever.

use std::collections::HashMap;
use std::path::Path;

use thiserror::Error;

use crate::action::{Action, ActionError, ActionKind};
use crate::graph::{Entry, Graph, Target};
use crate::output;

/// Decides whether a concrete target's action runs.
///
/// Phony targets never consult the policy; they are rebuilt by
/// definition. The shipped implementation is [`RebuildAlways`]; an mtime
/// or content-hash policy would plug in here without touching the
/// traversal.
pub trait RebuildPolicy {
    fn needs_rebuild(&self, site_root: &Path, entry: &Entry) -> bool;
}

/// Rebuild every concrete target unconditionally.
pub struct RebuildAlways;

impl RebuildPolicy for RebuildAlways {
    fn needs_rebuild(&self, _site_root: &Path, _entry: &Entry) -> bool {
        true
    }
}

#[derive(Error, Debug)]
pub enum BuildError {
    #[error("cyclic dependency through target `{0}`")]
    CyclicDependency(Target),
    #[error("building `{target}` failed: {source}")]
    Action {
        target: Target,
        #[source]
        source: ActionError,
    },
}

/// One executed action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuiltTarget {
    pub kind: ActionKind,
    pub target: String,
}

/// What one invocation did, in execution order.
#[derive(Debug, Default)]
pub struct BuildReport {
    pub built: Vec<BuiltTarget>,
    /// Concrete targets the policy decided not to rebuild.
    pub up_to_date: usize,
}

/// Build the whole site with the default rebuild-always policy.
pub fn build(graph: &Graph, site_root: &Path) -> Result<BuildReport, BuildError> {
    build_with_policy(graph, site_root, &RebuildAlways)
}

/// Build the whole site, letting `policy` decide which concrete targets
/// actually run.
pub fn build_with_policy(
    graph: &Graph,
    site_root: &Path,
    policy: &dyn RebuildPolicy,
) -> Result<BuildReport, BuildError> {
    let mut traversal = Traversal {
        graph,
        site_root,
        policy,
        state: HashMap::new(),
        report: BuildReport::default(),
    };
    traversal.visit(graph.root().target())?;
    Ok(traversal.report)
}

#[derive(Clone, Copy, PartialEq)]
enum VisitState {
    Visiting,
    Done,
}

struct Traversal<'a> {
    graph: &'a Graph,
    site_root: &'a Path,
    policy: &'a dyn RebuildPolicy,
    state: HashMap<&'a Target, VisitState>,
    report: BuildReport,
}

impl<'a> Traversal<'a> {
    fn visit(&mut self, target: &'a Target) -> Result<(), BuildError> {
        let Some(entry) = self.graph.get(target) else {
            // Not a plan key: a source-file leaf. The consuming action
            // reads it; a missing one fails there with an IO error.
            return Ok(());
        };
        match self.state.get(target) {
            Some(VisitState::Done) => return Ok(()),
            Some(VisitState::Visiting) => {
                return Err(BuildError::CyclicDependency(target.clone()));
            }
            None => {}
        }
        self.state.insert(entry.target(), VisitState::Visiting);
        for dependency in entry.dependencies() {
            self.visit(dependency)?;
        }
        if !entry.is_phony() {
            self.run_entry(entry)?;
        }
        self.state.insert(entry.target(), VisitState::Done);
        Ok(())
    }

    fn run_entry(&mut self, entry: &Entry) -> Result<(), BuildError> {
        if !self.policy.needs_rebuild(self.site_root, entry) {
            self.report.up_to_date += 1;
            return Ok(());
        }
        // Registration guarantees every concrete entry carries an action.
        let Some(kind) = entry.action() else {
            return Ok(());
        };
        let target = entry.target().to_string();
        let sources = entry
            .dependencies()
            .iter()
            .map(ToString::to_string)
            .collect();
        output::print_action_line(kind, &target);
        Action::new(kind, target.as_str(), sources, self.site_root)
            .and_then(|action| action.run())
            .map_err(|source| BuildError::Action {
                target: entry.target().clone(),
                source,
            })?;
        self.report.built.push(BuiltTarget { kind, target });
        Ok(())
    }
}
