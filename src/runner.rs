//! Running the renderer as a child process

use std::ffi::OsString;
use std::fmt;
use std::path::PathBuf;
use std::process::Command;

/// Program plus arguments, built fresh for every render.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderCommand {
    pub program: PathBuf,
    pub args: Vec<OsString>,
}

impl RenderCommand {
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
        }
    }

    pub fn arg(&mut self, arg: impl Into<OsString>) -> &mut Self {
        self.args.push(arg.into());
        self
    }

    /// True when `flag` is immediately followed by `value`.
    #[cfg(test)]
    pub fn has_pair(&self, flag: &str, value: &str) -> bool {
        self.args
            .windows(2)
            .any(|pair| pair[0] == flag && pair[1] == value)
    }

    #[cfg(test)]
    pub fn count(&self, arg: &str) -> usize {
        self.args.iter().filter(|a| *a == arg).count()
    }
}

impl fmt::Display for RenderCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.program.display())?;
        for arg in &self.args {
            write!(f, " {}", arg.to_string_lossy())?;
        }
        Ok(())
    }
}

/// How a finished child exited.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExitOutcome {
    /// `None` when the child was terminated by a signal.
    pub code: Option<i32>,
}

impl ExitOutcome {
    pub fn success(&self) -> bool {
        self.code == Some(0)
    }
}

/// Capability to run a command to completion.
pub trait ProcessRunner {
    fn run(&self, command: &RenderCommand) -> std::io::Result<ExitOutcome>;
}

/// Runs commands with `std::process::Command`, inheriting stdio.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemRunner;

impl ProcessRunner for SystemRunner {
    fn run(&self, command: &RenderCommand) -> std::io::Result<ExitOutcome> {
        let status = Command::new(&command.program)
            .args(&command.args)
            .status()?;
        Ok(ExitOutcome { code: status.code() })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> RenderCommand {
        let mut cmd = RenderCommand::new("mmdc");
        cmd.arg("-i").arg("flow.mmd").arg("-o").arg("flow.svg");
        cmd
    }

    #[test]
    fn test_display_joins_with_spaces() {
        assert_eq!(sample().to_string(), "mmdc -i flow.mmd -o flow.svg");
    }

    #[test]
    fn test_has_pair() {
        let cmd = sample();
        assert!(cmd.has_pair("-i", "flow.mmd"));
        assert!(cmd.has_pair("-o", "flow.svg"));
        assert!(!cmd.has_pair("-i", "flow.svg"));
    }

    #[test]
    fn test_exit_outcome() {
        assert!(ExitOutcome { code: Some(0) }.success());
        assert!(!ExitOutcome { code: Some(2) }.success());
        assert!(!ExitOutcome { code: None }.success());
    }

    #[cfg(unix)]
    #[test]
    fn test_system_runner_reports_code() {
        let mut cmd = RenderCommand::new("sh");
        cmd.arg("-c").arg("exit 3");
        let outcome = SystemRunner.run(&cmd).unwrap();
        assert_eq!(outcome.code, Some(3));

        let mut ok = RenderCommand::new("sh");
        ok.arg("-c").arg("exit 0");
        assert!(SystemRunner.run(&ok).unwrap().success());
    }

    #[test]
    fn test_system_runner_missing_program() {
        let cmd = RenderCommand::new("/definitely/not/a/real/mmdc");
        assert!(SystemRunner.run(&cmd).is_err());
    }
}
