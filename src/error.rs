//! Error types used by the supervisor and the process launcher.
//!
//! This module defines two error types:
//!
//! - [`LaunchError`] — process creation itself failed (never confused with a
//!   child's own exit code).
//! - [`SupervisorError`] — failures of the public `start`/`stop` contract.
//!
//! Both types provide `as_label` helpers for logging/metrics. Nothing that
//! happens inside the worker loop unwinds across the task boundary: worker
//! failures become reported states plus a saved error code, and the host only
//! ever observes the outcomes modeled here.

use std::time::Duration;
use thiserror::Error;

/// Process creation failed.
///
/// Carries the platform error code from the failed spawn (`raw_os_error`,
/// `-1` when the OS did not provide one). This is a launcher-level failure:
/// the child never existed, so there is no exit code to report.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("could not create process `{program}` (os error {code})")]
pub struct LaunchError {
    /// The program that failed to spawn.
    pub program: String,
    /// Platform error code (`-1` if unavailable).
    pub code: i32,
}

/// # Errors produced by the supervisor's public contract.
///
/// These are the failure outcomes of `start()` and `stop()`. Each carries the
/// last error code recorded by the worker so the host can surface it.
#[non_exhaustive]
#[derive(Error, Debug)]
pub enum SupervisorError {
    /// The worker signalled `stopped` before `started`: the managed process
    /// either could not be launched or exhausted its crash-loop budget
    /// without ever surviving the healthy threshold.
    #[error("managed process failed to start (last error code {code})")]
    StartFailed {
        /// Last error code recorded by the worker (launch OS error or exit code).
        code: i32,
    },

    /// The outer wait in `start()` expired before either signal fired.
    /// The caller must treat the service as not running.
    #[error("timed out after {timeout:?} waiting for the managed process to start (last error code {code})")]
    StartTimeout {
        /// The configured outer start timeout.
        timeout: Duration,
        /// Last error code recorded by the worker.
        code: i32,
    },

    /// The configured stop command could not be launched.
    #[error("stop command failed: {source}")]
    StopLaunchFailed {
        /// The underlying launch failure.
        #[source]
        source: LaunchError,
    },

    /// The bounded wait for the worker's `stopped` signal expired.
    /// Fatal: the caller must not assume the managed process is gone.
    #[error("timed out after {timeout:?} waiting for the worker to stop (last error code {code})")]
    StopTimeout {
        /// The configured stop timeout.
        timeout: Duration,
        /// Last error code recorded by the worker.
        code: i32,
    },
}

impl SupervisorError {
    /// Returns a short stable label (snake_case) for use in logs/metrics.
    pub fn as_label(&self) -> &'static str {
        match self {
            SupervisorError::StartFailed { .. } => "start_failed",
            SupervisorError::StartTimeout { .. } => "start_timeout",
            SupervisorError::StopLaunchFailed { .. } => "stop_launch_failed",
            SupervisorError::StopTimeout { .. } => "stop_timeout",
        }
    }

    /// Returns the last error code associated with this failure, if any.
    pub fn code(&self) -> Option<i32> {
        match self {
            SupervisorError::StartFailed { code }
            | SupervisorError::StartTimeout { code, .. }
            | SupervisorError::StopTimeout { code, .. } => Some(*code),
            SupervisorError::StopLaunchFailed { source } => Some(source.code),
        }
    }
}
