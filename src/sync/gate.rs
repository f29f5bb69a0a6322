//! # Manual-reset async signal.
//!
//! [`Gate`] is a thin wrapper over [`tokio::sync::watch`] with the semantics
//! of a manual-reset event: once set it stays set — releasing every current
//! and future waiter — until someone explicitly clears it.
//!
//! ## Rules
//! - `set()` and `clear()` are idempotent.
//! - `wait()` returns immediately when the gate is already set.
//! - State persists across waits; only `clear()` rearms the gate.
//!
//! This is deliberately not a [`tokio_util::sync::CancellationToken`]: tokens
//! latch permanently, while the supervisor reuses the same pair of gates
//! across start/stop cycles, clearing both at the beginning of every start.

use tokio::sync::watch;

/// Manual-reset binary signal with async waiting.
#[derive(Debug)]
pub struct Gate {
    tx: watch::Sender<bool>,
}

impl Gate {
    /// Creates a new gate in the cleared state.
    pub fn new() -> Self {
        let (tx, _rx) = watch::channel(false);
        Self { tx }
    }

    /// Sets the gate, releasing all current and future waiters.
    pub fn set(&self) {
        self.tx.send_replace(true);
    }

    /// Clears the gate; subsequent waiters block until the next `set()`.
    pub fn clear(&self) {
        self.tx.send_replace(false);
    }

    /// True if the gate is currently set.
    pub fn is_set(&self) -> bool {
        *self.tx.borrow()
    }

    /// Waits until the gate is set. Returns immediately if it already is.
    pub async fn wait(&self) {
        let mut rx = self.tx.subscribe();
        // The sender lives in self, so wait_for cannot observe a closed channel.
        let _ = rx.wait_for(|set| *set).await;
    }
}

impl Default for Gate {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::time::Duration;
    use tokio::time;

    #[tokio::test]
    async fn wait_returns_immediately_when_already_set() {
        let gate = Gate::new();
        gate.set();
        time::timeout(Duration::from_millis(100), gate.wait())
            .await
            .expect("gate was set, wait must not block");
    }

    #[tokio::test]
    async fn wait_blocks_until_set() {
        let gate = Arc::new(Gate::new());
        let waiter = {
            let gate = Arc::clone(&gate);
            tokio::spawn(async move { gate.wait().await })
        };
        time::sleep(Duration::from_millis(50)).await;
        assert!(!waiter.is_finished());

        gate.set();
        time::timeout(Duration::from_millis(500), waiter)
            .await
            .expect("waiter must be released")
            .expect("waiter must not panic");
    }

    #[tokio::test]
    async fn gate_is_manual_reset() {
        let gate = Gate::new();
        gate.set();
        assert!(gate.is_set());

        // Stays set across waits.
        gate.wait().await;
        assert!(gate.is_set());

        gate.clear();
        assert!(!gate.is_set());
        let blocked = time::timeout(Duration::from_millis(50), gate.wait()).await;
        assert!(blocked.is_err(), "cleared gate must block waiters again");
    }

    #[tokio::test]
    async fn set_and_clear_are_idempotent() {
        let gate = Gate::new();
        gate.set();
        gate.set();
        assert!(gate.is_set());
        gate.clear();
        gate.clear();
        assert!(!gate.is_set());
    }
}
