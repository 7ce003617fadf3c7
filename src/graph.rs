//! The target graph: build outputs and the commands that produce them.

use crate::command::Cmd;

#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct TargetId(usize);

impl TargetId {
    pub(crate) fn index(&self) -> usize {
        self.0
    }
}

/// One node of the graph: an output path, the targets it depends on, and
/// optionally the command that produces it.  A target with no command is
/// a pure source; its output is assumed to already exist.
#[derive(Debug)]
pub struct Target {
    pub output: String,
    pub deps: Vec<TargetId>,
    pub cmd: Option<Cmd>,
}

/// All targets, keyed by TargetId.  Declared up front by the caller and
/// read-only for the duration of a build walk.
#[derive(Debug, Default)]
pub struct Graph {
    targets: Vec<Target>,
}

impl Graph {
    pub fn new() -> Graph {
        Graph::default()
    }

    fn add(&mut self, target: Target) -> TargetId {
        let id = TargetId(self.targets.len());
        self.targets.push(target);
        id
    }

    /// Declare a pure source: no dependencies, no command.
    pub fn source(&mut self, output: impl Into<String>) -> TargetId {
        self.add(Target {
            output: output.into(),
            deps: Vec::new(),
            cmd: None,
        })
    }

    /// Declare a built target: its output, the targets it depends on, and
    /// the command that produces it.
    pub fn target(
        &mut self,
        output: impl Into<String>,
        deps: Vec<TargetId>,
        cmd: Cmd,
    ) -> TargetId {
        self.add(Target {
            output: output.into(),
            deps,
            cmd: Some(cmd),
        })
    }

    /// Append a dependency to an already-declared target.
    pub fn add_dep(&mut self, target: TargetId, dep: TargetId) {
        self.targets[target.index()].deps.push(dep);
    }

    pub fn get(&self, id: TargetId) -> &Target {
        &self.targets[id.index()]
    }

    pub fn len(&self) -> usize {
        self.targets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.targets.is_empty()
    }
}
