//! # Stdout reporter for foreground runs.
//!
//! [`ConsoleReporter`] prints events in a compact human-readable form. It
//! exists for out-of-service manual testing (`Supervisor::test`) and demos;
//! a hosted deployment uses [`ChannelReporter`](super::ChannelReporter).
//!
//! ## Output format
//! ```text
//! [status] service=myapp state=running
//! [status] service=myapp state=stopped code=7
//! [warn] service=myapp `myapp.bin` stopped unexpectedly (code 7), restart 1/3
//! ```

use std::time::Duration;

use super::reporter::{Report, ServiceState, Severity};

/// Simple stdout reporter.
///
/// Carries the service display name so lines from several supervisors can be
/// told apart.
pub struct ConsoleReporter {
    name: String,
}

impl ConsoleReporter {
    /// Creates a reporter labelled with the given service name.
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

impl Report for ConsoleReporter {
    fn report_state(&self, state: ServiceState, code: i32, _wait_hint: Duration) {
        if code != 0 {
            println!("[status] service={} state={state} code={code}", self.name);
        } else {
            println!("[status] service={} state={state}", self.name);
        }
    }

    fn log(&self, severity: Severity, message: &str) {
        println!("[{severity}] service={} {message}", self.name);
    }
}
