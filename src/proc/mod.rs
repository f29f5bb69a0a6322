//! # Process launching and exit observation.
//!
//! Internal modules:
//! - [`launcher`]: spawns one child from a [`CommandSpec`] and provides the
//!   exit-wait primitives the worker and the stop path build on.

mod launcher;

pub use launcher::{
    await_exit, launch, observe_startup, wait_exit, CommandSpec, Startup, EXIT_CODE_UNKNOWN,
};
