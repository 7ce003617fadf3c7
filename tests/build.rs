use rebuild::command::Cmd;
use rebuild::fs::{FileSystem, MTime, RealFileSystem};
use rebuild::graph::{Graph, TargetId};
use rebuild::work::Work;
use std::collections::HashMap;

/// Implementation of fs::FileSystem that is memory-backed: only mtimes,
/// since that is all the walk ever consults.
struct TestFileSystem {
    files: HashMap<String, MTime>,
}

impl TestFileSystem {
    fn new() -> Self {
        TestFileSystem {
            files: HashMap::new(),
        }
    }

    fn add(&mut self, path: &str, mtime: i64) {
        self.files.insert(path.to_string(), MTime::Stamp(mtime));
    }
}

impl FileSystem for TestFileSystem {
    fn stat(&self, path: &str) -> std::io::Result<MTime> {
        Ok(*self.files.get(path).unwrap_or(&MTime::Missing))
    }
}

fn build(
    fs: &dyn FileSystem,
    graph: &Graph,
    self_mtime: MTime,
    id: TargetId,
) -> anyhow::Result<usize> {
    let mut work = Work::new(fs, graph, self_mtime);
    work.build(id)?;
    Ok(work.ran())
}

#[test]
fn pure_source_is_a_no_op() -> anyhow::Result<()> {
    let mut fs = TestFileSystem::new();
    fs.add("in", 1);
    let mut graph = Graph::new();
    let src = graph.source("in");
    assert_eq!(build(&fs, &graph, MTime::Missing, src)?, 0);
    Ok(())
}

#[test]
fn missing_source_with_no_command_fails() {
    let fs = TestFileSystem::new();
    let mut graph = Graph::new();
    let src = graph.source("absent");
    let err = build(&fs, &graph, MTime::Missing, src).unwrap_err();
    assert!(err.to_string().contains("no command"), "{}", err);
    assert!(err.to_string().contains("absent"), "{}", err);
}

#[test]
fn missing_output_runs_the_command() -> anyhow::Result<()> {
    let mut fs = TestFileSystem::new();
    fs.add("in", 1);
    let mut graph = Graph::new();
    let src = graph.source("in");
    let out = graph.target("out", vec![src], Cmd::from_args(["true"]));
    assert_eq!(build(&fs, &graph, MTime::Missing, out)?, 1);
    Ok(())
}

#[test]
fn up_to_date_target_is_skipped() -> anyhow::Result<()> {
    let mut fs = TestFileSystem::new();
    fs.add("in", 1);
    fs.add("out", 2);
    let mut graph = Graph::new();
    let src = graph.source("in");
    // The command would fail if it ran; a clean target must never run it.
    let out = graph.target("out", vec![src], Cmd::from_args(["false"]));
    assert_eq!(build(&fs, &graph, MTime::Missing, out)?, 0);
    Ok(())
}

#[test]
fn newer_dependency_forces_a_rebuild() -> anyhow::Result<()> {
    let mut fs = TestFileSystem::new();
    fs.add("in", 5);
    fs.add("out", 3);
    let mut graph = Graph::new();
    let src = graph.source("in");
    let out = graph.target("out", vec![src], Cmd::from_args(["true"]));
    assert_eq!(build(&fs, &graph, MTime::Missing, out)?, 1);
    Ok(())
}

#[test]
fn changed_build_logic_forces_a_rebuild() -> anyhow::Result<()> {
    let mut fs = TestFileSystem::new();
    fs.add("in", 1);
    fs.add("out", 2);
    let mut graph = Graph::new();
    let src = graph.source("in");
    let out = graph.target("out", vec![src], Cmd::from_args(["true"]));
    // Build definition newer than the output: the command reruns even
    // though the output looks fresh relative to its inputs.
    assert_eq!(build(&fs, &graph, MTime::Stamp(10), out)?, 1);
    // But sources are left alone.
    assert_eq!(build(&fs, &graph, MTime::Stamp(10), src)?, 0);
    Ok(())
}

#[test]
fn commandless_target_with_existing_output_accepts_newer_deps() -> anyhow::Result<()> {
    // A file that exists but has no way to be regenerated: a newer
    // dependency is noted and silently accepted.
    let mut fs = TestFileSystem::new();
    fs.add("dep", 5);
    fs.add("file", 3);
    let mut graph = Graph::new();
    let dep = graph.source("dep");
    let file = graph.source("file");
    graph.add_dep(file, dep);
    assert_eq!(build(&fs, &graph, MTime::Missing, file)?, 0);
    Ok(())
}

#[test]
fn diamond_is_rechecked_once_per_path() -> anyhow::Result<()> {
    // d -> b -> a, d -> c -> a.  Nothing exists, every command is a no-op
    // that produces nothing, so every path re-runs its targets: a twice,
    // b, c and d once each.
    let mut fs = TestFileSystem::new();
    fs.add("in", 1);
    let mut graph = Graph::new();
    let src = graph.source("in");
    let a = graph.target("a", vec![src], Cmd::from_args(["true"]));
    let b = graph.target("b", vec![a], Cmd::from_args(["true"]));
    let c = graph.target("c", vec![a], Cmd::from_args(["true"]));
    let d = graph.target("d", vec![b, c], Cmd::from_args(["true"]));
    assert_eq!(build(&fs, &graph, MTime::Missing, d)?, 5);
    Ok(())
}

#[test]
fn cycle_is_a_detected_error() {
    let fs = TestFileSystem::new();
    let mut graph = Graph::new();
    let a = graph.target("a", vec![], Cmd::from_args(["true"]));
    let b = graph.target("b", vec![a], Cmd::from_args(["true"]));
    graph.add_dep(a, b);
    let err = build(&fs, &graph, MTime::Missing, a).unwrap_err();
    assert!(err.to_string().contains("cycle"), "{}", err);
}

#[test]
fn failed_command_is_fatal() {
    let fs = TestFileSystem::new();
    let mut graph = Graph::new();
    let out = graph.target("out", vec![], Cmd::from_args(["false"]));
    let err = build(&fs, &graph, MTime::Missing, out).unwrap_err();
    assert!(err.to_string().contains("failed to build"), "{}", err);
}

/// End to end on a real filesystem: build once for real, then observe
/// that a second walk does nothing.
#[cfg(unix)]
#[test]
fn on_disk_rebuild_is_idempotent() -> anyhow::Result<()> {
    let dir = tempfile::tempdir()?;
    let in_path = dir.path().join("in").display().to_string();
    let out_path = dir.path().join("out").display().to_string();
    std::fs::write(&in_path, "")?;

    let mut graph = Graph::new();
    let src = graph.source(&in_path);
    let out = graph.target(
        &out_path,
        vec![src],
        Cmd::from_args(["touch", out_path.as_str()]),
    );

    let fs = RealFileSystem::new();
    assert_eq!(build(&fs, &graph, MTime::Missing, out)?, 1);
    assert!(std::fs::metadata(&out_path).is_ok());
    assert_eq!(build(&fs, &graph, MTime::Missing, out)?, 0);
    Ok(())
}
