//! Iterative notification pagination.

use chrono::{DateTime, Utc};
use tracing::{debug, warn};

use crate::effects::{GitHubInterpreter, NotificationPage};
use crate::github::GitHubApiError;

/// Walks the notification pages for one `since` value.
///
/// Pages are fetched one at a time, on demand. The pager stops after the
/// page GitHub marks as last, when there is no next link, after the first
/// error, or after `max_pages` pages. Stopping at the limit with pages
/// still pending marks the walk as truncated.
#[derive(Debug)]
pub struct NotificationPager {
    since: Option<DateTime<Utc>>,
    per_page: u8,
    max_pages: u32,
    next: Option<u32>,
    fetched: u32,
    truncated: bool,
}

impl NotificationPager {
    pub fn new(since: Option<DateTime<Utc>>, per_page: u8, max_pages: u32) -> Self {
        NotificationPager {
            since,
            per_page,
            max_pages,
            next: Some(1),
            fetched: 0,
            truncated: false,
        }
    }

    /// Number of pages fetched successfully so far.
    pub fn pages_fetched(&self) -> u32 {
        self.fetched
    }

    /// True when the page limit ended the walk before the feed did.
    pub fn is_truncated(&self) -> bool {
        self.truncated
    }

    /// Fetches the next page, or returns `None` when the walk is over.
    pub async fn next_page<G>(
        &mut self,
        github: &G,
    ) -> Option<Result<NotificationPage, GitHubApiError>>
    where
        G: GitHubInterpreter,
    {
        let page = self.next.take()?;

        if self.fetched >= self.max_pages {
            self.truncated = true;
            warn!(
                max_pages = self.max_pages,
                "Notification page limit reached; remaining pages skipped"
            );
            return None;
        }

        debug!(page, since = ?self.since, "Fetching notifications");
        let result = github
            .list_notifications(self.since, page, self.per_page)
            .await;

        if let Ok(contents) = &result {
            self.fetched += 1;
            self.next = following_page(page, contents);
        }

        Some(result)
    }
}

/// The page to fetch after `current`, if any.
///
/// A next link that does not move forward is ignored so a misbehaving
/// server cannot keep the pager on the same page.
fn following_page(current: u32, contents: &NotificationPage) -> Option<u32> {
    if contents.last_page == Some(current) {
        return None;
    }
    contents.next_page.filter(|&next| next > current)
}
