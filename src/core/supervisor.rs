//! # Supervisor: the control-side state machine.
//!
//! One [`Supervisor`] instance babysits one managed process. The host drives
//! it through `start()` and `stop()` (assumed serialized — never concurrent);
//! the worker activity spawned by each `start()` owns the process itself.
//!
//! ## States
//! | State        | Entered when                              | Leaves via |
//! |--------------|-------------------------------------------|------------|
//! | Stopped      | construction; after a completed stop      | `start()` |
//! | Starting     | `start()` running                         | `started` gate → Running; `stopped` first or timeout → Stopped(error) |
//! | Running      | `started` observed within the start window | unexpected `stopped` → Stopped(error); `stop()` → StopPending |
//! | StopPending  | `stop()` running                          | `stopped` within `stop_timeout` → Stopped; timeout → Stopped(error), fatal |
//!
//! ## Coordination
//! Two manual-reset gates (`started`, `stopped`) are the only cross-activity
//! signals. `start()` clears both, spawns a fresh worker with a fresh
//! stopping token, and waits on either gate with the outer timeout. If both
//! are set when the wait wakes, `started` wins the race deterministically —
//! but `stopped` remains authoritative for "the worker has fully exited",
//! which is why every `start()` requires the previous worker to have
//! signalled `stopped` first.
//!
//! The stopping token is the sole cancellation primitive. `stop()` launches
//! the configured stop command and awaits it *before* cancelling the token,
//! so the stop command itself is never subject to the restart policy.

use std::sync::atomic::{AtomicBool, AtomicI32, Ordering};
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::Mutex;
use tokio::{select, time};
use tokio_util::sync::CancellationToken;

use crate::config::Config;
use crate::error::SupervisorError;
use crate::proc::{await_exit, launch};
use crate::report::{Report, ServiceState, Severity};
use crate::service::ServiceDescriptor;
use crate::sync::Gate;

use super::worker::Worker;

/// Supervises one managed process: start, babysit, restart, stop.
pub struct Supervisor {
    descriptor: Arc<ServiceDescriptor>,
    cfg: Config,
    reporter: Arc<dyn Report>,

    started: Arc<Gate>,
    stopped: Arc<Gate>,
    /// Token for the current worker; replaced at every `start()`.
    stopping: Mutex<CancellationToken>,

    /// Sticky "ever survived the healthy threshold" flag. Written by the
    /// worker, cleared by a successful `stop()`; reads elsewhere are
    /// non-authoritative (status formatting only).
    ever_started: Arc<AtomicBool>,
    /// Last launch error or exit code recorded by the worker.
    last_code: Arc<AtomicI32>,
}

impl Supervisor {
    /// Creates a supervisor for the given descriptor.
    pub fn new(descriptor: ServiceDescriptor, cfg: Config, reporter: Arc<dyn Report>) -> Self {
        Self {
            descriptor: Arc::new(descriptor),
            cfg,
            reporter,
            started: Arc::new(Gate::new()),
            stopped: Arc::new(Gate::new()),
            stopping: Mutex::new(CancellationToken::new()),
            ever_started: Arc::new(AtomicBool::new(false)),
            last_code: Arc::new(AtomicI32::new(0)),
        }
    }

    /// The descriptor this supervisor manages.
    pub fn descriptor(&self) -> &ServiceDescriptor {
        &self.descriptor
    }

    /// The supervisor's configuration.
    pub fn config(&self) -> &Config {
        &self.cfg
    }

    /// The reporting capability (shared with the worker).
    pub fn reporter(&self) -> &Arc<dyn Report> {
        &self.reporter
    }

    /// Last error code recorded by the worker (launch OS error or exit code).
    pub fn last_error_code(&self) -> i32 {
        self.last_code.load(Ordering::SeqCst)
    }

    /// Non-authoritative view of the sticky healthy flag, for status text.
    pub fn ever_started(&self) -> bool {
        self.ever_started.load(Ordering::SeqCst)
    }

    /// Starts the managed process.
    ///
    /// Clears both gates, spawns a fresh worker, then waits for either gate
    /// with the outer start window ([`Config::start_deadline`]):
    ///
    /// - `started` fires → the service is running; reported as such.
    /// - `stopped` fires first → the worker gave up (launch failure or
    ///   exhausted crash-loop budget); [`SupervisorError::StartFailed`].
    /// - the window expires → [`SupervisorError::StartTimeout`]; the caller
    ///   must treat the service as not running.
    ///
    /// On both failure paths the stopping token is cancelled so a worker
    /// still in its retry loop winds down.
    pub async fn start(&self) -> Result<(), SupervisorError> {
        self.started.clear();
        self.stopped.clear();

        let token = CancellationToken::new();
        *self.stopping.lock().await = token.clone();

        let worker = Worker {
            descriptor: Arc::clone(&self.descriptor),
            cfg: self.cfg.clone(),
            reporter: Arc::clone(&self.reporter),
            started: Arc::clone(&self.started),
            stopped: Arc::clone(&self.stopped),
            stopping: token.clone(),
            ever_started: Arc::clone(&self.ever_started),
            last_code: Arc::clone(&self.last_code),
        };
        tokio::spawn(worker.run());

        let window = self.cfg.start_deadline();
        select! {
            biased;
            _ = self.started.wait() => {
                self.reporter.log(Severity::Info, "service started successfully");
                self.reporter.report_state(ServiceState::Running, 0, Duration::ZERO);
                Ok(())
            }
            _ = self.stopped.wait() => {
                token.cancel();
                let code = self.last_error_code();
                self.reporter.log(
                    Severity::Warning,
                    &format!("wait for managed process to start failed (code {code})"),
                );
                Err(SupervisorError::StartFailed { code })
            }
            _ = time::sleep(window) => {
                token.cancel();
                let code = self.last_error_code();
                self.reporter.log(
                    Severity::Warning,
                    &format!("timed out waiting for managed process to start (code {code})"),
                );
                Err(SupervisorError::StartTimeout { timeout: window, code })
            }
        }
    }

    /// Stops the managed process.
    ///
    /// If a stop command is configured it is launched and awaited first,
    /// feeding the host's stop-pending watchdog every `poll_interval`; only
    /// then is the stopping token cancelled, so the stop command is never
    /// subject to the restart policy. Finally waits up to `stop_timeout` for
    /// the worker's `stopped` gate.
    ///
    /// A timeout here is fatal: the caller must not assume the managed
    /// process is gone.
    pub async fn stop(&self) -> Result<(), SupervisorError> {
        if let Some(spec) = self.descriptor.stop_command() {
            let command_line = self.descriptor.stop_command_line();
            let mut child = match launch(&spec) {
                Ok(child) => child,
                Err(source) => {
                    self.reporter.log(
                        Severity::Warning,
                        &format!("launch of stop command `{command_line}` failed: {source}"),
                    );
                    return Err(SupervisorError::StopLaunchFailed { source });
                }
            };
            let poll = self.cfg.poll_interval;
            let code = await_exit(&mut child, poll, || {
                self.reporter
                    .report_state(ServiceState::StopPending, 0, poll);
            })
            .await;
            self.reporter.log(
                Severity::Info,
                &format!("stop command `{command_line}` exited (code {code})"),
            );
        }

        self.stopping.lock().await.cancel();

        match time::timeout(self.cfg.stop_timeout, self.stopped.wait()).await {
            Ok(()) => {
                self.ever_started.store(false, Ordering::SeqCst);
                self.reporter.log(Severity::Info, "service stopped successfully");
                self.reporter
                    .report_state(ServiceState::Stopped, 0, Duration::ZERO);
                Ok(())
            }
            Err(_elapsed) => {
                let code = self.last_error_code();
                self.reporter.log(
                    Severity::Warning,
                    &format!("timed out waiting for worker to stop (code {code})"),
                );
                Err(SupervisorError::StopTimeout {
                    timeout: self.cfg.stop_timeout,
                    code,
                })
            }
        }
    }

    /// Runs the same state machine synchronously in the foreground and
    /// blocks until the worker signals `stopped`.
    ///
    /// Meant for manual, out-of-service verification with a console
    /// reporter: start the service, then sit on the `stopped` gate until the
    /// managed process is gone for good.
    pub async fn test(&self) -> Result<(), SupervisorError> {
        self.start().await?;
        self.stopped.wait().await;
        Ok(())
    }
}
