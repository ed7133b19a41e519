//! Bounded retry policy for locating lazily rendered cards.
//!
//! A targeted lookup probes for a visible node, and between failed probes it
//! scrolls the viewport and waits. The policy is a plain value so callers can
//! tune it without touching the extraction code.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Default number of probe attempts
pub const DEFAULT_MAX_ATTEMPTS: u32 = 6;

/// Default visibility wait per probe (2 seconds)
pub const DEFAULT_PROBE_TIMEOUT_MS: u64 = 2_000;

/// Default pause after each scroll (500ms)
pub const DEFAULT_DELAY_MS: u64 = 500;

/// Default scroll distance as a fraction of viewport height
pub const DEFAULT_SCROLL_FRACTION: f64 = 1.0 / 1.5;

/// Configuration for the probe/scroll/wait loop
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RetryPolicy {
    /// Maximum number of probes (at least one probe always runs)
    pub max_attempts: u32,
    /// How long each probe may wait for visibility
    pub probe_timeout: Duration,
    /// Pause after scrolling, before the next probe
    pub delay: Duration,
    /// Scroll distance as a fraction of viewport height
    pub scroll_fraction: f64,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            probe_timeout: Duration::from_millis(DEFAULT_PROBE_TIMEOUT_MS),
            delay: Duration::from_millis(DEFAULT_DELAY_MS),
            scroll_fraction: DEFAULT_SCROLL_FRACTION,
        }
    }
}

impl RetryPolicy {
    /// Create the default policy
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set maximum attempts
    #[must_use]
    pub const fn with_max_attempts(mut self, max: u32) -> Self {
        self.max_attempts = max;
        self
    }

    /// Set per-probe visibility timeout
    #[must_use]
    pub const fn with_probe_timeout(mut self, timeout: Duration) -> Self {
        self.probe_timeout = timeout;
        self
    }

    /// Set the pause between attempts
    #[must_use]
    pub const fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    /// Set the scroll fraction, clamped to `0.0..=1.0`
    #[must_use]
    pub fn with_scroll_fraction(mut self, fraction: f64) -> Self {
        self.scroll_fraction = if fraction.is_nan() {
            DEFAULT_SCROLL_FRACTION
        } else {
            fraction.clamp(0.0, 1.0)
        };
        self
    }

    /// Single probe, no scrolling
    #[must_use]
    pub fn once() -> Self {
        Self::default().with_max_attempts(1)
    }

    /// Attempts actually made, never zero
    #[must_use]
    pub fn attempts(&self) -> u32 {
        self.max_attempts.max(1)
    }

    /// Worst-case wall time if the node never appears
    #[must_use]
    pub fn worst_case(&self) -> Duration {
        let attempts = self.attempts();
        self.probe_timeout * attempts + self.delay * (attempts - 1)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn test_default() {
        let policy = RetryPolicy::default();
        assert_eq!(policy.max_attempts, 6);
        assert_eq!(policy.probe_timeout, Duration::from_secs(2));
        assert_eq!(policy.delay, Duration::from_millis(500));
        assert!((policy.scroll_fraction - 2.0 / 3.0).abs() < 1e-9);
    }

    #[test]
    fn test_builders() {
        let policy = RetryPolicy::new()
            .with_max_attempts(3)
            .with_probe_timeout(Duration::from_millis(10))
            .with_delay(Duration::from_millis(5))
            .with_scroll_fraction(0.5);
        assert_eq!(policy.max_attempts, 3);
        assert_eq!(policy.probe_timeout, Duration::from_millis(10));
        assert_eq!(policy.delay, Duration::from_millis(5));
        assert_eq!(policy.scroll_fraction, 0.5);
    }

    #[test]
    fn test_scroll_fraction_clamped() {
        assert_eq!(RetryPolicy::new().with_scroll_fraction(4.0).scroll_fraction, 1.0);
        assert_eq!(RetryPolicy::new().with_scroll_fraction(-1.0).scroll_fraction, 0.0);
    }

    #[test]
    fn test_zero_attempts_still_probes_once() {
        assert_eq!(RetryPolicy::new().with_max_attempts(0).attempts(), 1);
    }

    #[test]
    fn test_worst_case() {
        let policy = RetryPolicy::default();
        assert_eq!(policy.worst_case(), Duration::from_millis(6 * 2000 + 5 * 500));
        assert_eq!(RetryPolicy::once().worst_case(), Duration::from_secs(2));
    }

    #[test]
    fn test_serde() {
        let policy = RetryPolicy::default();
        let json = serde_json::to_string(&policy).unwrap();
        let back: RetryPolicy = serde_json::from_str(&json).unwrap();
        assert_eq!(back, policy);
    }
}
