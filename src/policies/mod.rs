//! # Restart policy.
//!
//! Pure decision logic for the worker's attempt loop: given how the last
//! attempt ended, decide whether to retry after a delay or give up. No I/O,
//! no clocks — fully unit-testable.

mod restart;

pub use restart::{Decision, RestartBudget};
