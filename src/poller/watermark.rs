//! The poller's "since" cursor.
//!
//! The watermark is a plain value threaded through each cycle by the caller:
//! `begin_cycle` yields the `since` to query with, `finish_cycle` yields the
//! watermark for the next cycle. Neither touches the clock.

use chrono::{DateTime, Utc};

use super::config::WatermarkPolicy;

/// The earliest notification time the poller still asks for.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Watermark(Option<DateTime<Utc>>);

impl Watermark {
    /// A watermark that has not been set yet.
    pub fn unset() -> Self {
        Watermark(None)
    }

    /// A watermark at a fixed time.
    pub fn at(time: DateTime<Utc>) -> Self {
        Watermark(Some(time))
    }

    pub fn get(&self) -> Option<DateTime<Utc>> {
        self.0
    }

    /// Starts a cycle at `now`.
    ///
    /// An unset watermark is set to `now`, so the very first cycle only
    /// looks at notifications from startup onward rather than sweeping the
    /// account's whole history. Returns the updated watermark and the `since`
    /// value to use for every page of this cycle.
    pub fn begin_cycle(self, now: DateTime<Utc>) -> (Watermark, DateTime<Utc>) {
        let since = self.0.unwrap_or(now);
        (Watermark(Some(since)), since)
    }

    /// Ends a cycle that started at `started_at`.
    pub fn finish_cycle(
        self,
        policy: WatermarkPolicy,
        started_at: DateTime<Utc>,
        succeeded: bool,
    ) -> Watermark {
        match policy {
            WatermarkPolicy::AdvanceOnSuccess if succeeded => Watermark(Some(started_at)),
            WatermarkPolicy::AdvanceOnSuccess | WatermarkPolicy::Pinned => self,
        }
    }
}
