//! GitHub API effect types.
//!
//! These types describe GitHub API operations as data, without executing them.
//! The interpreter in `crate::github` executes them against the real API;
//! tests use scripted interpreters instead.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::types::{Login, Notification, PrNumber, PullRequest, RepoId};

/// A branch in a specific repository.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BranchRef {
    pub repo: RepoId,
    pub branch: String,
}

impl BranchRef {
    pub fn new(repo: RepoId, branch: impl Into<String>) -> Self {
        BranchRef {
            repo,
            branch: branch.into(),
        }
    }

    /// Returns the git refs API path for this branch (`heads/<branch>`).
    ///
    /// `#` is legal in branch names but starts a URL fragment, so it is
    /// percent-encoded. Slashes stay literal: the refs API expects them.
    pub fn ref_path(&self) -> String {
        format!("heads/{}", self.branch.replace('#', "%23"))
    }
}

impl fmt::Display for BranchRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.repo, self.branch)
    }
}

/// A GitHub API effect.
///
/// Unlike repository-scoped bots, this bot acts across every repository the
/// account can see, so effects that touch a repository name it explicitly.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum GitHubEffect {
    /// Fetch the login of the authenticated account.
    GetCurrentUser,

    /// Fetch one page of the authenticated account's notifications.
    ///
    /// Read notifications are included (`all=true`), so the feed does not
    /// depend on whether the user has looked at them.
    ListNotifications {
        since: Option<DateTime<Utc>>,
        page: u32,
        per_page: u8,
    },

    /// Fetch a single pull request.
    GetPullRequest { repo: RepoId, number: PrNumber },

    /// Delete a branch. A branch that is already gone fails with
    /// `GitHubErrorKind::NotFound`.
    DeleteBranch { target: BranchRef },
}

// ─── Response Types ───────────────────────────────────────────────────────────

/// One page of the notification feed, with the pagination indicators GitHub
/// sent in its `Link` header.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct NotificationPage {
    pub items: Vec<Notification>,

    /// The page to request next, if GitHub reported one.
    pub next_page: Option<u32>,

    /// The final page number, if GitHub reported one.
    pub last_page: Option<u32>,
}

/// Response from a GitHub effect.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data", rename_all = "snake_case")]
pub enum GitHubResponse {
    /// Response to `GetCurrentUser`.
    User { login: Login },

    /// Response to `ListNotifications`.
    Notifications(NotificationPage),

    /// Response to `GetPullRequest`.
    PullRequest(PullRequest),

    /// Response to `DeleteBranch`.
    BranchDeleted,
}

impl GitHubResponse {
    /// Short name of the variant, for error messages.
    pub fn kind_name(&self) -> &'static str {
        match self {
            GitHubResponse::User { .. } => "user",
            GitHubResponse::Notifications(_) => "notifications",
            GitHubResponse::PullRequest(_) => "pull_request",
            GitHubResponse::BranchDeleted => "branch_deleted",
        }
    }
}
