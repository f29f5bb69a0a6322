//! # Channel-backed reporter for hosted deployments.
//!
//! [`ChannelReporter`] forwards every state transition and log entry as a
//! [`HostMessage`] over an unbounded channel. The hosting runtime (the piece
//! that actually speaks to the platform's service control manager and event
//! log) drains the receiver and translates.
//!
//! Send failures are swallowed: if the host has dropped the receiver there
//! is nobody left to tell, and reporting must never abort the state machine.

use std::time::Duration;

use tokio::sync::mpsc;

use super::reporter::{Report, ServiceState, Severity};

/// One message to the hosting runtime.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HostMessage {
    /// A state transition, with the last error code and a wait hint.
    State {
        state: ServiceState,
        code: i32,
        wait_hint: Duration,
    },
    /// A free-text log entry.
    Log {
        severity: Severity,
        message: String,
    },
}

/// Reporter that forwards [`HostMessage`]s to the hosting runtime.
#[derive(Clone)]
pub struct ChannelReporter {
    tx: mpsc::UnboundedSender<HostMessage>,
}

impl ChannelReporter {
    /// Creates the reporter and the receiving end the host drains.
    pub fn new() -> (Self, mpsc::UnboundedReceiver<HostMessage>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx }, rx)
    }
}

impl Report for ChannelReporter {
    fn report_state(&self, state: ServiceState, code: i32, wait_hint: Duration) {
        let _ = self.tx.send(HostMessage::State {
            state,
            code,
            wait_hint,
        });
    }

    fn log(&self, severity: Severity, message: &str) {
        let _ = self.tx.send(HostMessage::Log {
            severity,
            message: message.to_owned(),
        });
    }
}
