//! # Global supervisor configuration.
//!
//! Provides [`Config`], the timing and budget knobs of the supervisor.
//!
//! ## Field semantics
//! - `max_attempts`: crash-loop budget — consecutive quick failures tolerated
//!   before the worker gives up.
//! - `retry_delay`: sleep between relaunch attempts.
//! - `healthy_threshold`: minimum runtime after which an attempt counts as
//!   "started" rather than an immediate crash.
//! - `stop_timeout`: bounded wait in `stop()` for the worker's `stopped`
//!   signal; exceeding it is a fatal stop failure.
//! - `poll_interval`: how often the stop-pending watchdog is fed while
//!   awaiting a slow stop command.
//! - `start_timeout`: outer wait in `start()`. `None` derives it from the
//!   budget (see [`Config::start_deadline`]) so the window always covers
//!   `max_attempts` full retry cycles; set it explicitly to decouple the two.

use std::time::Duration;

/// Timing and restart-budget configuration for one supervisor instance.
///
/// All fields are public; [`Config::default`] reproduces the classic service
/// wrapper constants (3 attempts, 3 s retry delay, 1 s healthy threshold,
/// 2 s stop timeout). Prefer the helper accessors over reading `start_timeout`
/// directly so the derived-default rule stays in one place.
#[derive(Clone, Debug)]
pub struct Config {
    /// Maximum consecutive quick failures before the worker gives up.
    pub max_attempts: u32,

    /// Delay between relaunch attempts.
    pub retry_delay: Duration,

    /// Runtime after which an attempt is considered healthy ("started").
    pub healthy_threshold: Duration,

    /// Bounded wait for the worker's `stopped` signal during `stop()`.
    pub stop_timeout: Duration,

    /// Interval at which the stop-pending watchdog reports progress while
    /// a stop command runs.
    pub poll_interval: Duration,

    /// Outer wait for `start()`.
    ///
    /// - `None` → derived: `max_attempts × (healthy_threshold + retry_delay)`
    /// - `Some(d)` → explicit override
    pub start_timeout: Option<Duration>,
}

impl Config {
    /// Returns the effective outer start timeout.
    ///
    /// When `start_timeout` is unset, the window is sized to cover the whole
    /// restart budget: each attempt is bounded by the healthy threshold plus
    /// the retry delay, and there are at most `max_attempts` of them. With
    /// the defaults this yields 12 s.
    #[inline]
    pub fn start_deadline(&self) -> Duration {
        self.start_timeout
            .unwrap_or_else(|| (self.healthy_threshold + self.retry_delay) * self.max_attempts)
    }
}

impl Default for Config {
    /// Default configuration:
    ///
    /// - `max_attempts = 3`
    /// - `retry_delay = 3s`
    /// - `healthy_threshold = 1s`
    /// - `stop_timeout = 2s`
    /// - `poll_interval = 2s`
    /// - `start_timeout = None` (derived: 12 s)
    fn default() -> Self {
        Self {
            max_attempts: 3,
            retry_delay: Duration::from_millis(3000),
            healthy_threshold: Duration::from_millis(1000),
            stop_timeout: Duration::from_millis(2000),
            poll_interval: Duration::from_millis(2000),
            start_timeout: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_start_deadline_covers_the_full_budget() {
        let cfg = Config::default();
        assert_eq!(cfg.start_deadline(), Duration::from_millis(12_000));
    }

    #[test]
    fn explicit_start_timeout_wins() {
        let cfg = Config {
            start_timeout: Some(Duration::from_secs(5)),
            ..Config::default()
        };
        assert_eq!(cfg.start_deadline(), Duration::from_secs(5));
    }

    #[test]
    fn derived_deadline_tracks_budget_changes() {
        let cfg = Config {
            max_attempts: 5,
            retry_delay: Duration::from_millis(200),
            healthy_threshold: Duration::from_millis(100),
            ..Config::default()
        };
        assert_eq!(cfg.start_deadline(), Duration::from_millis(1500));
    }
}
