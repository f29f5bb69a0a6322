//! # Process launcher and exit waits.
//!
//! [`launch`] turns a [`CommandSpec`] into a live [`Child`]; the wait helpers
//! implement the two exit protocols the supervisor needs:
//!
//! ```text
//! observe_startup(child, threshold)
//!   ├─ child exits within threshold ──► Startup::Exited(code)   (quick fail)
//!   └─ still alive at threshold     ──► Startup::Survived       ("started")
//!
//! wait_exit(child)                       unbounded wait, plain
//!
//! await_exit(child, poll, on_pending)    unbounded wait, invoking on_pending
//!                                        each poll interval while the child
//!                                        still runs (stop-pending watchdog)
//! ```
//!
//! ## Rules
//! - A [`LaunchError`] means the process never existed; it carries the OS
//!   error code and is never confused with a child exit code.
//! - Exit codes that cannot be read (e.g. the child was killed by a signal)
//!   map to [`EXIT_CODE_UNKNOWN`]; the caller logs, this is not fatal.
//! - The handle is owned by exactly one attempt and dropped right after the
//!   exit status is read.

use std::process::ExitStatus;
use std::time::Duration;

use tokio::process::{Child, Command};
use tokio::time;

use crate::error::LaunchError;

/// Sentinel exit code reported when the real one cannot be read.
pub const EXIT_CODE_UNKNOWN: i32 = 9999;

/// Everything needed to spawn one process: program, argv, the fully composed
/// environment (replaces the child's default environment), and an optional
/// working directory.
#[derive(Clone, Debug)]
pub struct CommandSpec {
    /// Program to execute.
    pub program: String,
    /// Arguments, in order.
    pub args: Vec<String>,
    /// Complete environment for the child. Replaces, never appends.
    pub env: Vec<(String, String)>,
    /// Working directory; `None` inherits the supervisor's.
    pub cwd: Option<String>,
}

/// Outcome of the startup observation phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Startup {
    /// The child was still alive at the healthy threshold.
    Survived,
    /// The child exited before the threshold, with this code.
    Exited(i32),
}

/// Spawns the process described by `spec`.
///
/// The composed environment replaces the child's default environment
/// entirely. Fails with a [`LaunchError`] carrying the platform error code
/// when process creation itself fails.
pub fn launch(spec: &CommandSpec) -> Result<Child, LaunchError> {
    let mut cmd = Command::new(&spec.program);
    cmd.args(&spec.args);
    cmd.env_clear();
    cmd.envs(spec.env.iter().map(|(k, v)| (k.as_str(), v.as_str())));
    if let Some(dir) = &spec.cwd {
        cmd.current_dir(dir);
    }
    cmd.spawn().map_err(|e| LaunchError {
        program: spec.program.clone(),
        code: e.raw_os_error().unwrap_or(-1),
    })
}

/// Two-phase startup wait: waits up to `threshold` for the child to exit.
///
/// Returns [`Startup::Survived`] if the child is still running at the
/// threshold — the attempt is then considered "started" and the caller
/// continues with an unbounded wait. Returns [`Startup::Exited`] with the
/// exit code if the child died first.
pub async fn observe_startup(child: &mut Child, threshold: Duration) -> Startup {
    match time::timeout(threshold, child.wait()).await {
        Ok(Ok(status)) => Startup::Exited(exit_code(status)),
        Ok(Err(_)) => Startup::Exited(EXIT_CODE_UNKNOWN),
        Err(_elapsed) => Startup::Survived,
    }
}

/// Waits unboundedly for the child to exit and returns its exit code.
pub async fn wait_exit(child: &mut Child) -> i32 {
    match child.wait().await {
        Ok(status) => exit_code(status),
        Err(_) => EXIT_CODE_UNKNOWN,
    }
}

/// Waits unboundedly for the child to exit, invoking `on_pending` each time
/// `poll` elapses while the child is still running.
///
/// Used while awaiting a slow stop command so the host's stop-pending
/// watchdog keeps being fed for as long as the shutdown takes.
pub async fn await_exit<F>(child: &mut Child, poll: Duration, mut on_pending: F) -> i32
where
    F: FnMut(),
{
    loop {
        match time::timeout(poll, child.wait()).await {
            Ok(Ok(status)) => return exit_code(status),
            Ok(Err(_)) => return EXIT_CODE_UNKNOWN,
            Err(_elapsed) => on_pending(),
        }
    }
}

fn exit_code(status: ExitStatus) -> i32 {
    status.code().unwrap_or(EXIT_CODE_UNKNOWN)
}
