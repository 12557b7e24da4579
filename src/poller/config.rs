//! Polling configuration.
//!
//! - **Poll interval**: 30 seconds by default (`--interval`)
//! - **Page size**: 20 notifications per request (`--per-page`)
//! - **Page limit**: 100 pages per cycle, after which the cycle stops early
//! - **Watermark policy**: pinned at the first cycle's start by default

use std::time::Duration;

/// Default poll interval (30 seconds).
const DEFAULT_POLL_INTERVAL_SECS: u64 = 30;

/// Default notifications per page.
const DEFAULT_PER_PAGE: u8 = 20;

/// Default maximum pages fetched in one cycle.
const DEFAULT_MAX_PAGES: u32 = 100;

/// How the watermark moves between poll cycles.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum WatermarkPolicy {
    /// Set once, on the first cycle, and never moved. Every cycle asks for
    /// notifications since the poller started and relies on the cleanup
    /// being idempotent.
    #[default]
    Pinned,

    /// Moved to the start time of each cycle that completes without error,
    /// so later cycles only see newer notifications. A failed cycle leaves
    /// it in place and the next cycle covers the same window again.
    AdvanceOnSuccess,
}

/// Configuration for the notification poller.
#[derive(Debug, Clone)]
pub struct PollConfig {
    /// Interval between poll cycles.
    pub interval: Duration,

    /// Notifications requested per page (GitHub caps this at 50).
    pub per_page: u8,

    /// Upper bound on pages fetched in one cycle.
    pub max_pages: u32,

    pub watermark_policy: WatermarkPolicy,
}

impl Default for PollConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl PollConfig {
    /// Creates a new `PollConfig` with default values.
    pub fn new() -> Self {
        PollConfig {
            interval: Duration::from_secs(DEFAULT_POLL_INTERVAL_SECS),
            per_page: DEFAULT_PER_PAGE,
            max_pages: DEFAULT_MAX_PAGES,
            watermark_policy: WatermarkPolicy::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_has_expected_values() {
        let config = PollConfig::new();

        assert_eq!(config.interval, Duration::from_secs(30));
        assert_eq!(config.per_page, 20);
        assert_eq!(config.max_pages, 100);
        assert_eq!(config.watermark_policy, WatermarkPolicy::Pinned);
    }
}
