//! # Control entry point: host lifecycle adapter.
//!
//! The hosting runtime (a service control manager shim, a signal handler, a
//! test harness) drives the supervisor through the [`ServiceControl`]
//! callbacks. [`ServiceEntry`] is the standard adapter: it reports the
//! pending state up front, delegates to the [`Supervisor`], and converts a
//! start failure into the terminal fatal report the host expects.
//!
//! The callbacks return promptly: only the bounded waits of the supervisor's
//! `start`/`stop` contracts happen inside them, while the real work continues
//! on the worker activity.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;

use crate::error::SupervisorError;
use crate::report::{Report, ServiceState};

use super::supervisor::Supervisor;

/// Lifecycle callbacks invoked by the hosting runtime.
///
/// The host serializes calls: `on_start` and `on_stop` are never invoked
/// concurrently on the same instance.
#[async_trait]
pub trait ServiceControl: Send + Sync {
    /// Start command from the host. `args` are host-provided start
    /// parameters (unused by the default adapter, available to custom ones).
    async fn on_start(&self, args: Vec<String>) -> Result<(), SupervisorError>;

    /// Stop command from the host.
    async fn on_stop(&self) -> Result<(), SupervisorError>;
}

/// Standard adapter from host callbacks to a [`Supervisor`].
pub struct ServiceEntry {
    supervisor: Arc<Supervisor>,
}

impl ServiceEntry {
    /// Wraps a supervisor for host-driven control.
    pub fn new(supervisor: Arc<Supervisor>) -> Self {
        Self { supervisor }
    }

    /// The wrapped supervisor.
    pub fn supervisor(&self) -> &Arc<Supervisor> {
        &self.supervisor
    }

    fn reporter(&self) -> &Arc<dyn Report> {
        self.supervisor.reporter()
    }
}

#[async_trait]
impl ServiceControl for ServiceEntry {
    async fn on_start(&self, _args: Vec<String>) -> Result<(), SupervisorError> {
        let window = self.supervisor.config().start_deadline();
        self.reporter()
            .report_state(ServiceState::StartPending, 0, window);

        match self.supervisor.start().await {
            Ok(()) => Ok(()),
            Err(err) => {
                // The host treats a failed start as a terminal stop with the
                // saved error code.
                let code = err.code().unwrap_or(0);
                self.reporter()
                    .report_state(ServiceState::Stopped, code, Duration::ZERO);
                Err(err)
            }
        }
    }

    async fn on_stop(&self) -> Result<(), SupervisorError> {
        let timeout = self.supervisor.config().stop_timeout;
        self.reporter()
            .report_state(ServiceState::StopPending, 0, timeout);
        self.supervisor.stop().await
    }
}
