//! External process execution: captured (`git push`) and interactive (editor).
use anyhow::{Context, Result, bail};
use std::ffi::OsStr;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};

/// Result of a command execution.
#[derive(Debug)]
pub struct ExecResult {
    /// Captured standard output.
    pub stdout: String,
    /// Captured standard error.
    pub stderr: String,
    /// Whether the process exited successfully.
    pub success: bool,
    /// Exit code, if the process was not killed by a signal.
    pub code: Option<i32>,
}

impl From<Output> for ExecResult {
    fn from(output: Output) -> Self {
        Self {
            stdout: String::from_utf8_lossy(&output.stdout).to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).to_string(),
            success: output.status.success(),
            code: output.status.code(),
        }
    }
}

/// Run a command in `dir` and return its output. Fails if the command exits
/// non-zero.
///
/// # Errors
///
/// Returns an error if the program cannot be started or exits non-zero.
pub fn run_in(dir: &Path, program: &str, args: &[&str]) -> Result<ExecResult> {
    let output = Command::new(program)
        .args(args)
        .current_dir(dir)
        .output()
        .with_context(|| format!("failed to execute: {program} in {}", dir.display()))?;
    let result = ExecResult::from(output);
    if !result.success {
        bail!(
            "{program} failed (exit {}): {}",
            result.code.unwrap_or(-1),
            result.stderr.trim()
        );
    }
    Ok(result)
}

/// Run a program with the terminal attached (stdin/stdout/stderr inherited)
/// and wait for it to exit.
///
/// `command_line` is split on whitespace so that editor settings such as
/// `code --wait` work; the first word is located with [`locate`].
///
/// # Errors
///
/// Returns an error if the program cannot be found or started, or if it
/// exits non-zero.
pub fn run_interactive<I, S>(command_line: &str, extra_args: I) -> Result<()>
where
    I: IntoIterator<Item = S>,
    S: AsRef<OsStr>,
{
    let mut words = command_line.split_whitespace();
    let Some(program) = words.next() else {
        bail!("empty command");
    };
    let resolved = locate(program).with_context(|| format!("'{program}' not found on PATH"))?;
    let status = Command::new(&resolved)
        .args(words)
        .args(extra_args)
        .status()
        .with_context(|| format!("failed to execute: {program}"))?;
    if !status.success() {
        bail!("{program} exited with {}", status.code().unwrap_or(-1));
    }
    Ok(())
}

/// Resolve `program` on `PATH`.
#[must_use]
pub fn locate(program: &str) -> Option<PathBuf> {
    which::which(program).ok()
}

/// Check if a program is available on PATH.
#[must_use]
pub fn which(program: &str) -> bool {
    locate(program).is_some()
}
