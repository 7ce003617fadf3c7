//! Command lines: an ordered list of tokens plus the ability to render
//! and run them.

use crate::process::{run_command, Termination};

/// An executable invocation under construction: token 0 is the program,
/// the rest its argument vector.  An empty Cmd is legal but cannot run.
#[derive(Debug, Clone, Default)]
pub struct Cmd {
    args: Vec<String>,
}

impl Cmd {
    pub fn new() -> Cmd {
        Cmd::default()
    }

    /// Build a Cmd from a token list in one go.
    pub fn from_args<S: Into<String>>(args: impl IntoIterator<Item = S>) -> Cmd {
        Cmd {
            args: args.into_iter().map(|a| a.into()).collect(),
        }
    }

    /// Append one token; insertion order is execution order.
    pub fn push(&mut self, arg: impl Into<String>) {
        self.args.push(arg.into());
    }

    pub fn args(&self) -> &[String] {
        &self.args
    }

    pub fn is_empty(&self) -> bool {
        self.args.is_empty()
    }

    /// Write the rendered command line to stdout.  Empty commands print
    /// nothing, not even a newline.
    pub fn print(&self) {
        if self.args.is_empty() {
            return;
        }
        println!("{}", self);
    }

    /// Run the command, blocking until it finishes.
    /// Ok(true) is a zero exit; Ok(false) is a recoverable failure (nothing
    /// to run, or a nonzero exit, reported on stderr).  Err is reserved for
    /// the unrecoverable cases: spawn failure and death by signal.
    pub fn run(&self) -> anyhow::Result<bool> {
        if self.args.is_empty() {
            return Ok(false);
        }
        println!("[CMD] {}", self);
        match run_command(&self.args)? {
            Termination::Success => Ok(true),
            Termination::Exit(code) => {
                eprintln!("command failed with exit code {}", code);
                Ok(false)
            }
            Termination::Interrupted => anyhow::bail!("interrupted"),
            Termination::Signal(sig) => anyhow::bail!("command killed by signal {}", sig),
        }
    }
}

impl std::fmt::Display for Cmd {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (i, arg) in self.args.iter().enumerate() {
            if i > 0 {
                write!(f, " ")?;
            }
            if arg.contains(' ') {
                write!(f, "'{}'", arg)?;
            } else {
                write!(f, "{}", arg)?;
            }
        }
        Ok(())
    }
}
