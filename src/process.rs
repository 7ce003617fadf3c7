//! Synchronous child process execution and exit classification.

use std::os::unix::process::ExitStatusExt;

/// How a child process ended.
#[derive(Debug, PartialEq)]
pub enum Termination {
    /// Exited with code 0.
    Success,
    /// Exited with the given nonzero code.
    Exit(i32),
    /// Killed by SIGINT, i.e. the user hit ctrl-c.
    Interrupted,
    /// Killed by some other signal.
    Signal(i32),
}

/// Spawn argv[0] with the remaining tokens as its argument vector,
/// inheriting environment and stdio, and block until it terminates.
/// Failure to spawn at all is an error; any way the child manages to
/// die is a Termination.
pub fn run_command(argv: &[String]) -> anyhow::Result<Termination> {
    let status = std::process::Command::new(&argv[0])
        .args(&argv[1..])
        .status()
        .map_err(|err| anyhow::anyhow!("spawn {:?}: {}", argv[0], err))?;

    if status.success() {
        return Ok(Termination::Success);
    }
    if let Some(sig) = status.signal() {
        if sig == libc::SIGINT {
            return Ok(Termination::Interrupted);
        }
        return Ok(Termination::Signal(sig));
    }
    // On unix a status that is neither a signal death nor success always
    // carries an exit code.
    Ok(Termination::Exit(status.code().unwrap_or(1)))
}
