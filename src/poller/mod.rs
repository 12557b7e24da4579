//! Notification poller.
//!
//! Periodically reads the bot's notification feed and runs the cleanup
//! engine for every pull request it mentions. The feed is queried with
//! `all=true` and a `since` watermark, so read notifications are seen too.
//!
//! # Flow
//!
//! ```text
//! tick ──► Watermark::begin_cycle ──► since
//!            │
//!            ▼
//!   NotificationPager (page 1, 2, ...)
//!            │  PullRequest notifications only
//!            ▼
//!   GetPullRequest ──► cleanup_pull_request
//!            │
//!            ▼
//!   Watermark::finish_cycle(policy, ok?)
//! ```

mod config;
mod cycle;
mod pager;
mod runner;
mod watermark;

pub use config::{PollConfig, WatermarkPolicy};
pub use cycle::{CycleReport, PollError, PullRequestOutcome, poll_cycle, run_cycle};
pub use pager::NotificationPager;
pub use runner::Poller;
pub use watermark::Watermark;
