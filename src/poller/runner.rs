//! The poll loop.

use chrono::{DateTime, Utc};
use tokio::time::{Instant, MissedTickBehavior, interval_at};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use super::config::PollConfig;
use super::cycle::{CycleReport, PollError, run_cycle};
use super::watermark::Watermark;
use crate::effects::GitHubInterpreter;
use crate::types::Login;

/// Owns the watermark and runs poll cycles on a fixed interval.
pub struct Poller<G> {
    github: G,
    bot: Login,
    config: PollConfig,
    watermark: Watermark,
}

impl<G> Poller<G>
where
    G: GitHubInterpreter,
{
    pub fn new(github: G, bot: Login, config: PollConfig) -> Self {
        Poller {
            github,
            bot,
            config,
            watermark: Watermark::unset(),
        }
    }

    pub fn watermark(&self) -> Watermark {
        self.watermark
    }

    /// Runs one cycle at `now` and updates the watermark.
    ///
    /// Failures are logged here; the returned result is for callers that
    /// want to inspect it.
    pub async fn tick(&mut self, now: DateTime<Utc>) -> Result<CycleReport, PollError> {
        let (watermark, result) =
            run_cycle(&self.github, &self.bot, self.watermark, now, &self.config).await;
        self.watermark = watermark;

        match &result {
            Ok(report) if report.branches_removed() > 0 => info!(
                pages = report.pages_fetched,
                notifications = report.notifications,
                removed = report.branches_removed(),
                "Poll cycle complete"
            ),
            Ok(report) => debug!(
                pages = report.pages_fetched,
                notifications = report.notifications,
                "Poll cycle complete"
            ),
            Err(e) => warn!(error = %e, "Poll cycle aborted"),
        }

        result
    }

    /// Polls until `cancel` fires.
    ///
    /// The first cycle runs one interval after start. A cycle in flight when
    /// `cancel` fires is dropped. Cycles never overlap: a slow cycle delays
    /// the next tick instead of queueing a burst.
    pub async fn run(mut self, cancel: CancellationToken) {
        let period = self.config.interval;
        let mut ticker = interval_at(Instant::now() + period, period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        info!(interval = ?period, "Polling notifications");

        loop {
            tokio::select! {
                _ = cancel.cancelled() => break,
                _ = ticker.tick() => {
                    tokio::select! {
                        _ = cancel.cancelled() => break,
                        _ = self.tick(Utc::now()) => {}
                    }
                }
            }
        }

        info!("Poller stopped");
    }
}
