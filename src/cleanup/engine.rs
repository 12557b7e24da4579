//! Executes cleanup decisions against GitHub.

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use super::decision::{CleanupDecision, SkipReason, evaluate};
use crate::effects::{BranchRef, GitHubInterpreter};
use crate::github::GitHubApiError;
use crate::types::{Login, PullRequest};

/// What happened to a pull request's head branch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum CleanupOutcome {
    /// The branch was deleted by this call.
    Deleted { target: BranchRef },

    /// The branch was eligible but had already been deleted.
    AlreadyGone { target: BranchRef },

    /// The branch was left alone.
    Skipped { reason: SkipReason },
}

impl CleanupOutcome {
    /// Returns true if the branch no longer exists after this call.
    pub fn branch_removed(&self) -> bool {
        matches!(
            self,
            CleanupOutcome::Deleted { .. } | CleanupOutcome::AlreadyGone { .. }
        )
    }
}

/// Evaluates `pr` and, if eligible, deletes its head branch.
///
/// At most one `DeleteBranch` effect is issued. A branch that is already
/// gone counts as success, so calling this twice for the same pull request
/// is safe. Any other GitHub error is returned to the caller.
pub async fn cleanup_pull_request<G>(
    github: &G,
    pr: &PullRequest,
    bot: &Login,
) -> Result<CleanupOutcome, GitHubApiError>
where
    G: GitHubInterpreter,
{
    let target = match evaluate(pr, bot) {
        CleanupDecision::Delete { target } => target,
        CleanupDecision::Skip { reason } => {
            debug!(pr = %pr.number, reason = %reason, "Leaving head branch alone");
            return Ok(CleanupOutcome::Skipped { reason });
        }
    };

    match github.delete_branch(target.clone()).await {
        Ok(()) => {
            info!(pr = %pr.number, branch = %target, "Deleted merged branch");
            Ok(CleanupOutcome::Deleted { target })
        }
        Err(e) if e.is_not_found() => {
            info!(
                pr = %pr.number,
                branch = %target,
                "Branch no longer exists"
            );
            Ok(CleanupOutcome::AlreadyGone { target })
        }
        Err(e) => Err(e),
    }
}
