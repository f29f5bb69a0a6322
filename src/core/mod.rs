//! Supervisor core: state machine and worker loop.
//!
//! Internal modules:
//! - [`supervisor`]: the control activity — `start`/`stop`/`test`, the gate
//!   waits, and the stop-command phase;
//! - [`worker`]: the worker activity — launch, two-phase exit observation,
//!   restart budget, gate signalling;
//! - [`entry`]: the thin adapter between host lifecycle callbacks and the
//!   supervisor.

mod entry;
mod supervisor;
mod worker;

pub use entry::{ServiceControl, ServiceEntry};
pub use supervisor::Supervisor;
