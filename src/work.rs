//! The build walk: depth-first traversal of the target graph, rebuilding
//! whatever is stale relative to its inputs.

use crate::fs::{FileSystem, MTime};
use crate::graph::{Graph, TargetId};

#[derive(Clone, Copy, PartialEq)]
enum Visit {
    None,
    /// On the current traversal path; reaching it again means a cycle.
    Visiting,
}

/// One build invocation over a graph.  Holds the per-walk bookkeeping;
/// the graph itself stays read-only.
pub struct Work<'a> {
    fs: &'a dyn FileSystem,
    graph: &'a Graph,
    /// MTime of the build definition itself.  Anything with a command that
    /// is older than the build logic gets rebuilt.
    self_mtime: MTime,
    visits: Vec<Visit>,
    ran: usize,
}

impl<'a> Work<'a> {
    pub fn new(fs: &'a dyn FileSystem, graph: &'a Graph, self_mtime: MTime) -> Self {
        Work {
            fs,
            graph,
            self_mtime,
            visits: vec![Visit::None; graph.len()],
            ran: 0,
        }
    }

    /// Number of commands executed so far.
    pub fn ran(&self) -> usize {
        self.ran
    }

    /// Bring a target up to date, building its dependencies first.
    ///
    /// A target reached through multiple paths (a diamond) is re-checked
    /// once per path; the check is idempotent, so the repeat is only
    /// wasted stats, not wasted builds.  The visiting marker exists purely
    /// to catch cycles, and is cleared once the target's visit completes.
    pub fn build(&mut self, id: TargetId) -> anyhow::Result<()> {
        if self.visits[id.index()] == Visit::Visiting {
            anyhow::bail!(
                "dependency cycle involving {:?}",
                self.graph.get(id).output
            );
        }
        self.visits[id.index()] = Visit::Visiting;
        let result = self.build_inner(id);
        self.visits[id.index()] = Visit::None;
        result
    }

    fn build_inner(&mut self, id: TargetId) -> anyhow::Result<()> {
        let target = self.graph.get(id);
        let mtime = self.fs.stat(&target.output)?;

        // A missing output always needs producing.
        let mut dirty = mtime == MTime::Missing;

        // If the build logic itself changed, conservatively redo anything
        // that has a command.
        if target.cmd.is_some() && self.self_mtime > mtime {
            dirty = true;
        }

        // Bring dependencies fully up to date before comparing against them.
        for &dep in &target.deps {
            self.build(dep)?;
            if self.fs.stat(&self.graph.get(dep).output)? > mtime {
                dirty = true;
            }
        }

        if !dirty {
            if target.cmd.is_some() {
                println!("{} Up to date!!!", target.output);
            }
            return Ok(());
        }

        match &target.cmd {
            None => {
                if mtime == MTime::Missing {
                    anyhow::bail!("no command to produce {:?}", target.output);
                }
                // A source whose inputs changed: nothing can regenerate it,
                // so the existing content stands.
                Ok(())
            }
            Some(cmd) => {
                if !cmd.run()? {
                    anyhow::bail!("failed to build {:?}", target.output);
                }
                self.ran += 1;
                Ok(())
            }
        }
    }
}
