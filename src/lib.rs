//! # servisor
//!
//! **Servisor** runs any executable as a supervised background service: it
//! launches the process described by a [`ServiceDescriptor`], restarts it on
//! unexpected early failure within a bounded crash-loop budget, and performs
//! an orderly two-phase shutdown when the host asks it to stop.
//!
//! ## Architecture
//! ```text
//!  host (SCM shim, signal handler, test harness)
//!    │  on_start / on_stop
//!    ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │ ServiceEntry (control entry point)                          │
//! └──────┬──────────────────────────────────────────────────────┘
//!        ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │ Supervisor (control activity)                               │
//! │  - start(): clear gates, spawn worker, wait either gate     │
//! │  - stop(): run stop command, cancel token, wait `stopped`   │
//! │  - gates: `started` / `stopped` (manual-reset, Gate)        │
//! └──────┬──────────────────────────────────────────────────────┘
//!        │ tokio::spawn
//!        ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │ Worker (attempt loop, one per start())                      │
//! │   loop {                                                    │
//! │     launch ──► observe_startup(healthy_threshold)           │
//! │       ├─ survived ──► set `started`, wait for exit          │
//! │       └─ quick fail                                         │
//! │     RestartBudget::on_exit()                                │
//! │       ├─ Retry{delay} ─► report StartPending, sleep         │
//! │       └─ GiveUp                                             │
//! │   }                                                         │
//! │   set `stopped` (always, exactly once, last)                │
//! └──────┬──────────────────────────────────────────────────────┘
//!        │ report_state / log
//!        ▼
//!   Report capability ──► ConsoleReporter | ChannelReporter ──► host
//! ```
//!
//! ## Lifecycle
//! ```text
//! Stopped ──start()──► Starting ──`started`──► Running ──stop()──► StopPending ──`stopped`──► Stopped
//!                         │                       │                    │
//!                         │ `stopped` first       │ unexpected exit    │ stop_timeout
//!                         ▼ or start window       ▼ after budget       ▼
//!                      Stopped(error)          Stopped(error)      Stopped(error)
//! ```
//!
//! A process that survives the **healthy threshold** (default 1 s) counts as
//! started; from then on every crash refreshes the restart budget, so only a
//! process that never gets off the ground exhausts its `max_attempts`
//! (default 3, spaced by `retry_delay`, default 3 s).
//!
//! ## Example
//! ```no_run
//! use std::sync::Arc;
//! use servisor::{Config, ConsoleReporter, ServiceDescriptor, Supervisor};
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let descriptor = ServiceDescriptor {
//!         name: "pinger".into(),
//!         executable: "ping".into(),
//!         start_arguments: vec!["127.0.0.1".into()],
//!         ..ServiceDescriptor::default()
//!     };
//!
//!     let reporter = Arc::new(ConsoleReporter::new("pinger"));
//!     let sup = Supervisor::new(descriptor, Config::default(), reporter);
//!
//!     // Foreground run: starts the service, then blocks until it is gone.
//!     sup.test().await?;
//!     Ok(())
//! }
//! ```

mod config;
mod core;
mod error;
mod policies;
mod proc;
mod report;
mod service;
mod sync;

// ---- Public re-exports ----

pub use config::Config;
pub use core::{ServiceControl, ServiceEntry, Supervisor};
pub use error::{LaunchError, SupervisorError};
pub use policies::{Decision, RestartBudget};
pub use proc::{CommandSpec, EXIT_CODE_UNKNOWN};
pub use report::{ChannelReporter, ConsoleReporter, HostMessage, Report, ServiceState, Severity};
pub use service::{quote_arg, ServiceDescriptor};
pub use sync::Gate;
