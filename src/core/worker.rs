//! # Worker: the attempt loop that owns the managed process.
//!
//! One [`Worker`] is spawned per `start()` call and runs until its budget is
//! exhausted, a launch fails, or the stopping token is observed. It is the
//! only place the `started` gate is ever set, and it sets the `stopped` gate
//! exactly once as its last action.
//!
//! ## Attempt cycle
//! ```text
//! loop {
//!   ├─► stopping cancelled or budget exhausted? ──► break  (before launch)
//!   ├─► launch(descriptor.start_command())
//!   │     └─ LaunchError ──► log, break              (never retried)
//!   ├─► observe_startup(child, healthy_threshold)
//!   │     ├─ Survived ──► mark started, set `started` gate,
//!   │     │               wait_exit(child) unbounded
//!   │     └─ Exited(code) ─► quick fail for this cycle
//!   ├─► record exit code
//!   ├─► stopping token cancelled? ──► break          (no policy consulted)
//!   ├─► budget.on_exit()
//!   │     ├─ GiveUp ──────► break                    (crash loop exhausted)
//!   │     └─ Retry{delay} ─► report StartPending, sleep delay
//!   │                        (sleep aborts if stopping fires)
//!   └─► next attempt
//! }
//! if !stopping && ever started ──► fatal Stopped(code)   (unexpected stop)
//! set `stopped` gate                                     (always, last)
//! ```
//!
//! ## Rules
//! - The child handle is owned by one cycle and dropped right after its exit
//!   code is read; it is never shared across attempts.
//! - The stopping token is checked at loop boundaries and aborts the retry
//!   sleep, but an in-flight unbounded exit wait is never cancelled — the
//!   operator's stop command is expected to end it.
//! - Nothing here unwinds across the task boundary: every failure becomes a
//!   log entry, a reported state, and a saved error code.

use std::sync::atomic::{AtomicBool, AtomicI32, Ordering};
use std::sync::Arc;
use std::time::Duration;

use tokio::{select, time};
use tokio_util::sync::CancellationToken;

use crate::config::Config;
use crate::policies::{Decision, RestartBudget};
use crate::proc::{launch, observe_startup, wait_exit, Startup};
use crate::report::{Report, ServiceState, Severity};
use crate::service::ServiceDescriptor;
use crate::sync::Gate;

/// The worker activity for one `start()` cycle.
pub(crate) struct Worker {
    pub(crate) descriptor: Arc<ServiceDescriptor>,
    pub(crate) cfg: Config,
    pub(crate) reporter: Arc<dyn Report>,
    /// Set once the managed process survives the healthy threshold.
    pub(crate) started: Arc<Gate>,
    /// Set exactly once when this worker exits.
    pub(crate) stopped: Arc<Gate>,
    /// Cancellation signal from the control activity.
    pub(crate) stopping: CancellationToken,
    /// Sticky "has ever been healthy" flag shared with the supervisor.
    pub(crate) ever_started: Arc<AtomicBool>,
    /// Last launch error or exit code, shared with the supervisor.
    pub(crate) last_code: Arc<AtomicI32>,
}

impl Worker {
    /// Runs the attempt loop to completion. Never panics outward; always
    /// sets the `stopped` gate before returning.
    pub(crate) async fn run(self) {
        let mut budget = RestartBudget::from_config(&self.cfg);
        // A previous cycle may have left the service healthy (e.g. a stop
        // that timed out); the budget inherits that history.
        if self.ever_started.load(Ordering::SeqCst) {
            budget.mark_started();
        }

        self.attempt_loop(&mut budget).await;

        if !self.stopping.is_cancelled() && budget.ever_started() {
            let code = self.last_code.load(Ordering::SeqCst);
            self.reporter.log(
                Severity::Error,
                &format!("managed process stopped unexpectedly (code {code})"),
            );
            self.reporter
                .report_state(ServiceState::Stopped, code, Duration::ZERO);
        }
        self.stopped.set();
    }

    async fn attempt_loop(&self, budget: &mut RestartBudget) {
        let spec = self.descriptor.start_command();
        let command_line = self.descriptor.start_command_line();

        loop {
            if self.stopping.is_cancelled() || budget.is_exhausted() {
                break;
            }

            let mut child = match launch(&spec) {
                Ok(child) => child,
                Err(err) => {
                    self.last_code.store(err.code, Ordering::SeqCst);
                    self.reporter.log(
                        Severity::Warning,
                        &format!("launch of `{command_line}` failed: {err}"),
                    );
                    break;
                }
            };

            let code = match observe_startup(&mut child, self.cfg.healthy_threshold).await {
                Startup::Exited(code) => code,
                Startup::Survived => {
                    let was_started = budget.mark_started();
                    self.ever_started.store(true, Ordering::SeqCst);
                    if was_started {
                        // A relaunch became healthy again after the host was
                        // told StartPending; tell it the service is back.
                        self.reporter
                            .report_state(ServiceState::Running, 0, Duration::ZERO);
                    }
                    self.started.set();
                    wait_exit(&mut child).await
                }
            };
            drop(child);
            self.last_code.store(code, Ordering::SeqCst);

            if self.stopping.is_cancelled() {
                break;
            }

            let decision = budget.on_exit();
            self.reporter.log(
                Severity::Warning,
                &format!(
                    "managed process exited (code {code}), restart {}/{}",
                    budget.attempt(),
                    budget.max_attempts(),
                ),
            );

            match decision {
                Decision::Retry { delay } => {
                    self.reporter
                        .report_state(ServiceState::StartPending, code, delay);
                    select! {
                        _ = time::sleep(delay) => {}
                        _ = self.stopping.cancelled() => break,
                    }
                }
                Decision::GiveUp => break,
            }
        }
    }
}
