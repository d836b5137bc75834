//! External process invocation
//!
//! Every external tool call blocks the step until the process exits; there
//! are no timeouts and no retries.

use camino::Utf8Path;
use proj_setup_core::{Error, Result};
use std::io::ErrorKind;
use std::process::Output;
use tokio::process::Command;
use tracing::debug;

/// Run `program args...` in `cwd`, capturing output
///
/// A program that cannot be spawned because it does not exist is reported
/// as `ToolNotFound`. A non-zero exit is returned as a normal `Output`; the
/// caller decides which error it maps to.
pub async fn run<I, S>(
    program: &str,
    args: I,
    cwd: Option<&Utf8Path>,
    envs: &[(&str, &str)],
) -> Result<Output>
where
    I: IntoIterator<Item = S>,
    S: AsRef<std::ffi::OsStr>,
{
    let mut cmd = Command::new(program);
    cmd.args(args);
    if let Some(dir) = cwd {
        cmd.current_dir(dir);
    }
    for (key, value) in envs {
        cmd.env(key, value);
    }

    debug!("Running: {:?}", cmd.as_std());
    cmd.output().await.map_err(|e| match e.kind() {
        ErrorKind::NotFound => Error::tool_not_found(program),
        _ => Error::Io(e),
    })
}

/// True when `program --version` runs and exits successfully
pub async fn is_available(program: &str) -> bool {
    match Command::new(program).arg("--version").output().await {
        Ok(output) => output.status.success(),
        Err(e) => {
            debug!("{} unavailable: {}", program, e);
            false
        }
    }
}

/// Diagnostic text of a failed process: stderr, or stdout when stderr is empty
pub fn failure_text(output: &Output) -> String {
    let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
    if !stderr.is_empty() {
        return stderr;
    }

    let stdout = String::from_utf8_lossy(&output.stdout).trim().to_string();
    if !stdout.is_empty() {
        return stdout;
    }

    format!("exited with {}", output.status)
}
