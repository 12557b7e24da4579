//! Pure branch cleanup decision.
//!
//! `evaluate` looks at a pull request snapshot and the bot's login and
//! decides whether the head branch should be deleted. It performs no I/O.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::effects::BranchRef;
use crate::types::{Login, PullRequest};

/// Branch names that are never deleted, regardless of what GitHub reports
/// as the repository's default branch.
pub const PROTECTED_BRANCHES: &[&str] = &["master"];

/// Why a pull request's head branch is left alone.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "reason", rename_all = "snake_case")]
pub enum SkipReason {
    /// The PR is still open, or was closed without merging.
    NotMerged,

    /// The head repository no longer exists (or GitHub did not say).
    HeadRepositoryMissing,

    /// The head branch belongs to somebody else.
    ForeignOwner { owner: Login },

    /// The head branch is a default branch.
    ProtectedBranch { branch: String },
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkipReason::NotMerged => write!(f, "not merged"),
            SkipReason::HeadRepositoryMissing => write!(f, "head repository missing"),
            SkipReason::ForeignOwner { owner } => {
                write!(f, "head repository owned by {}", owner)
            }
            SkipReason::ProtectedBranch { branch } => {
                write!(f, "branch {} is protected", branch)
            }
        }
    }
}

/// The outcome of evaluating a pull request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "decision", rename_all = "snake_case")]
pub enum CleanupDecision {
    /// Delete this branch.
    Delete { target: BranchRef },

    /// Leave the branch alone.
    Skip { reason: SkipReason },
}

impl CleanupDecision {
    fn skip(reason: SkipReason) -> Self {
        CleanupDecision::Skip { reason }
    }
}

/// Decides whether the head branch of `pr` should be deleted.
///
/// The checks run in order and the first failing one wins:
///
/// 1. the PR is closed and merged;
/// 2. the head repository is known;
/// 3. the head repository is owned by `bot`;
/// 4. the head branch is not `master` and not the head repository's
///    reported default branch.
pub fn evaluate(pr: &PullRequest, bot: &Login) -> CleanupDecision {
    if !pr.is_merged() {
        return CleanupDecision::skip(SkipReason::NotMerged);
    }

    let Some(head_repo) = &pr.head.repo else {
        return CleanupDecision::skip(SkipReason::HeadRepositoryMissing);
    };

    if head_repo.owner.login != *bot {
        return CleanupDecision::skip(SkipReason::ForeignOwner {
            owner: head_repo.owner.login.clone(),
        });
    }

    let branch = &pr.head.branch;
    let is_default = head_repo.default_branch.as_deref() == Some(branch.as_str());
    if is_default || PROTECTED_BRANCHES.contains(&branch.as_str()) {
        return CleanupDecision::skip(SkipReason::ProtectedBranch {
            branch: branch.clone(),
        });
    }

    CleanupDecision::Delete {
        target: BranchRef::new(head_repo.id(), branch.clone()),
    }
}
