//! # Status reporting.
//!
//! The [`Report`] capability is how the supervisor talks to the outside
//! world: every state transition and every log line flows through it, and it
//! is the *only* observable account of what happened. Two implementations:
//!
//! - [`ConsoleReporter`] — human-readable stdout lines for foreground runs
//!   and manual testing;
//! - [`ChannelReporter`] — forwards [`HostMessage`]s to the hosting runtime
//!   over an unbounded channel (the real service-control-manager adapter
//!   lives on the receiving end).
//!
//! Reporting is infallible by contract: an implementation may drop a message,
//! but it must never propagate a failure back into the state machine.

mod channel;
mod console;
mod reporter;

pub use channel::{ChannelReporter, HostMessage};
pub use console::ConsoleReporter;
pub use reporter::{Report, ServiceState, Severity};
