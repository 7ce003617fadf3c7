//! The self-rebuild protocol: before doing any real work, check whether
//! the build definition source is newer than the running binary, and if
//! so recompile, swap the binary in place, and re-exec.

use crate::command::Cmd;
use crate::fs;
use std::os::unix::process::CommandExt;
use std::path::{Path, PathBuf};

/// Everything the self-rebuild needs to know: where the build definition
/// lives, where the running binary lives, and how to compile the former
/// into the latter.  The compile command is caller-supplied; see
/// cargo_command for the usual choice.
pub struct Bootstrap {
    pub source: PathBuf,
    pub binary: PathBuf,
    pub compile: Cmd,
}

/// The usual compile command for a build definition that lives inside a
/// cargo package: rebuild the whole package.  Run from the package root,
/// cargo writes the new binary to the same target/ path the old one was
/// renamed away from.
pub fn cargo_command() -> Cmd {
    Cmd::from_args(["cargo", "build"])
}

impl Bootstrap {
    pub fn new(source: impl Into<PathBuf>, binary: impl Into<PathBuf>, compile: Cmd) -> Self {
        Bootstrap {
            source: source.into(),
            binary: binary.into(),
            compile,
        }
    }

    /// Is the binary out of date with respect to its source?
    /// An absent source can never be newer, so a deleted or relocated
    /// build definition quietly disables self-rebuild.
    pub fn stale(&self) -> anyhow::Result<bool> {
        let source = fs::stat(&self.source)?;
        let binary = fs::stat(&self.binary)?;
        Ok(source > binary)
    }

    /// Recompile the binary in place.  The running image is first renamed
    /// to `<binary>.old` so the compiler never writes over a live file; if
    /// compilation fails the old image is moved back.  However it ends,
    /// no `.old` file is left behind and the path named by `binary` holds
    /// a runnable image.
    ///
    /// Returns whether a fresh binary was produced (false means the old
    /// one was restored).
    pub fn rebuild(&self) -> anyhow::Result<bool> {
        println!("[INFO] rebuilding {}", self.binary.display());

        let backup = backup_path(&self.binary);
        std::fs::rename(&self.binary, &backup).map_err(|err| {
            anyhow::anyhow!(
                "cannot move {} aside: {}",
                self.binary.display(),
                err
            )
        })?;

        // However the compile goes wrong -- nonzero exit, spawn failure,
        // killed by signal -- the old image must come back before we
        // surface the problem, so the binary path is never left empty.
        let result = self.compile.run();
        if !matches!(result, Ok(true)) {
            // Best-effort restore; the compile failure is already reported.
            let _ = std::fs::rename(&backup, &self.binary);
        }
        let _ = std::fs::remove_file(&backup);

        result
    }

    /// Replace the current process image with the binary, passing through
    /// the original argument vector unchanged.  Only returns on failure.
    pub fn reexec(&self, argv: &[String]) -> anyhow::Error {
        println!("[INFO] restarting {}", self.binary.display());
        let mut cmd = std::process::Command::new(&self.binary);
        if let Some((arg0, rest)) = argv.split_first() {
            cmd.arg0(arg0);
            cmd.args(rest);
        }
        let err = cmd.exec();
        anyhow::anyhow!("exec {}: {}", self.binary.display(), err)
    }
}

fn backup_path(binary: &Path) -> PathBuf {
    let mut path = binary.as_os_str().to_owned();
    path.push(".old");
    PathBuf::from(path)
}
