//! A single poll cycle.
//!
//! A cycle walks every notification page for one `since` value, resolves
//! each pull request notification to a fresh pull request snapshot, and
//! hands it to the cleanup engine. The first error ends the cycle: no
//! further notifications are processed and no further pages are fetched.

use chrono::{DateTime, Utc};
use thiserror::Error;
use tracing::debug;

use super::config::PollConfig;
use super::pager::NotificationPager;
use super::watermark::Watermark;
use crate::cleanup::{CleanupOutcome, cleanup_pull_request};
use crate::effects::GitHubInterpreter;
use crate::github::GitHubApiError;
use crate::types::{Login, PrNumber, RepoId, SubjectError};

/// Errors that abort a poll cycle.
#[derive(Debug, Error)]
pub enum PollError {
    #[error("failed to list notifications: {0}")]
    ListNotifications(#[source] GitHubApiError),

    #[error(transparent)]
    Subject(#[from] SubjectError),

    #[error("failed to fetch pull request {repo}{number}: {source}")]
    FetchPullRequest {
        repo: RepoId,
        number: PrNumber,
        #[source]
        source: GitHubApiError,
    },

    #[error("failed to clean up pull request {repo}{number}: {source}")]
    Cleanup {
        repo: RepoId,
        number: PrNumber,
        #[source]
        source: GitHubApiError,
    },
}

/// The cleanup outcome for one pull request notification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PullRequestOutcome {
    pub repo: RepoId,
    pub number: PrNumber,
    pub outcome: CleanupOutcome,
}

/// Summary of a completed poll cycle.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CycleReport {
    pub pages_fetched: u32,

    /// All notifications seen, pull requests or not.
    pub notifications: usize,

    /// One entry per pull request notification, in feed order.
    pub outcomes: Vec<PullRequestOutcome>,

    /// The page limit stopped the cycle with notifications left unread.
    pub truncated: bool,
}

impl CycleReport {
    /// Number of branches that no longer exist after this cycle.
    pub fn branches_removed(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|o| o.outcome.branch_removed())
            .count()
    }

    /// True when every notification in the window was read.
    pub fn is_complete(&self) -> bool {
        !self.truncated
    }
}

/// Runs one poll cycle with a fixed `since`.
pub async fn poll_cycle<G>(
    github: &G,
    bot: &Login,
    since: DateTime<Utc>,
    config: &PollConfig,
) -> Result<CycleReport, PollError>
where
    G: GitHubInterpreter,
{
    let mut pager = NotificationPager::new(Some(since), config.per_page, config.max_pages);
    let mut report = CycleReport::default();

    while let Some(page) = pager.next_page(github).await {
        let page = page.map_err(PollError::ListNotifications)?;
        report.pages_fetched = pager.pages_fetched();

        for notification in &page.items {
            report.notifications += 1;
            if !notification.is_pull_request() {
                continue;
            }

            let number = notification.pull_request_number()?;
            let repo = notification.repository.id();
            debug!(repo = %repo, pr = %number, "Resolving pull request notification");

            let pr = github
                .get_pull_request(repo.clone(), number)
                .await
                .map_err(|source| PollError::FetchPullRequest {
                    repo: repo.clone(),
                    number,
                    source,
                })?;

            let outcome = cleanup_pull_request(github, &pr, bot)
                .await
                .map_err(|source| PollError::Cleanup {
                    repo: repo.clone(),
                    number,
                    source,
                })?;

            report.outcomes.push(PullRequestOutcome {
                repo,
                number,
                outcome,
            });
        }
    }

    report.truncated = pager.is_truncated();
    Ok(report)
}

/// Runs one cycle starting at `now` and returns the watermark for the next
/// cycle alongside the cycle's result.
///
/// A truncated cycle counts as unsuccessful for the watermark, so its
/// unread notifications stay inside the next cycle's window.
pub async fn run_cycle<G>(
    github: &G,
    bot: &Login,
    watermark: Watermark,
    now: DateTime<Utc>,
    config: &PollConfig,
) -> (Watermark, Result<CycleReport, PollError>)
where
    G: GitHubInterpreter,
{
    let (watermark, since) = watermark.begin_cycle(now);
    let result = poll_cycle(github, bot, since, config).await;
    let succeeded = matches!(&result, Ok(report) if report.is_complete());
    let next = watermark.finish_cycle(config.watermark_policy, now, succeeded);
    (next, result)
}
