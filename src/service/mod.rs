//! # Service description.
//!
//! This module provides [`ServiceDescriptor`], the immutable configuration
//! value the supervisor consumes: which executable to run, with which
//! arguments, environment overrides, and working directory, plus the optional
//! stop command. How the descriptor was obtained (config file, CLI, ...) is
//! the caller's business.

mod descriptor;

pub use descriptor::{quote_arg, ServiceDescriptor};
