use rebuild::bootstrap::{self, Bootstrap};
use rebuild::command::Cmd;
use rebuild::fs::{FileSystem, RealFileSystem};
use rebuild::graph::Graph;
use rebuild::signal;
use rebuild::work::Work;

/// The build definition is this file; when it changes, the tool rebuilds
/// and relaunches itself before doing anything else.
const BUILD_SOURCE: &str = file!();

fn run() -> anyhow::Result<i32> {
    let args: Vec<String> = std::env::args().collect();
    signal::register_sigint();

    let binary = std::env::current_exe()?;
    let boot = Bootstrap::new(BUILD_SOURCE, &binary, bootstrap::cargo_command());
    if boot.stale()? {
        boot.rebuild()?;
        // Relaunch whatever now sits at the binary path, fresh or restored.
        return Err(boot.reexec(&args));
    }

    // Sample configuration: a C program built from a single source file.
    let mut graph = Graph::new();
    let src = graph.source("main.c");
    let obj = graph.target(
        "main.o",
        vec![src],
        Cmd::from_args(["cc", "-c", "main.c", "-o", "main.o"]),
    );
    let bin = graph.target(
        "main2",
        vec![src, obj],
        Cmd::from_args(["cc", "main.o", "-o", "main2"]),
    );

    let fs = RealFileSystem::new();
    let self_mtime = fs.stat(BUILD_SOURCE)?;
    let mut work = Work::new(&fs, &graph, self_mtime);
    work.build(bin)?;

    match work.ran() {
        0 => println!("rebuild: no work to do"),
        n => println!("rebuild: ran {} tasks, now up to date", n),
    }

    Ok(0)
}

fn main() {
    let exit_code = match run() {
        Ok(code) => code,
        Err(err) => {
            println!("rebuild: error: {}", err);
            1
        }
    };
    if exit_code != 0 {
        std::process::exit(exit_code);
    }
}
