//! # The reporting capability consumed by the state machine.

use std::fmt;
use std::time::Duration;

/// Lifecycle states reported to the host.
///
/// `StartPending` doubles as the between-attempts state while the worker
/// waits out a retry delay; `Stopped` with a non-zero code is the fatal
/// terminal report.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ServiceState {
    /// Start requested; the managed process is not yet considered running.
    StartPending,
    /// The managed process survived the healthy threshold.
    Running,
    /// Stop requested; shutdown is in progress.
    StopPending,
    /// Terminal: clean when the code is 0, fatal otherwise.
    Stopped,
}

impl fmt::Display for ServiceState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ServiceState::StartPending => "start-pending",
            ServiceState::Running => "running",
            ServiceState::StopPending => "stop-pending",
            ServiceState::Stopped => "stopped",
        };
        f.write_str(s)
    }
}

/// Severity of a log entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Severity {
    Info,
    Warning,
    Error,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Severity::Info => "info",
            Severity::Warning => "warn",
            Severity::Error => "error",
        };
        f.write_str(s)
    }
}

/// Sink for lifecycle status and log entries.
///
/// Implementations must be infallible from the caller's point of view: a
/// reporting failure may be swallowed or logged locally, but it must never
/// block or abort the supervisor.
pub trait Report: Send + Sync + 'static {
    /// Reports a state transition with the last error code and a wait hint
    /// (how long the host should expect the pending state to last;
    /// `Duration::ZERO` when no estimate applies).
    fn report_state(&self, state: ServiceState, code: i32, wait_hint: Duration);

    /// Emits one free-text log entry.
    fn log(&self, severity: Severity, message: &str);
}
