//! # Synchronization primitives.
//!
//! [`Gate`] is the manual-reset binary signal the supervisor's two activities
//! coordinate through: the worker sets it, the control activity waits on it,
//! and the next `start()` clears it again.

mod gate;

pub use gate::Gate;
