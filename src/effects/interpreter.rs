//! Effect interpreter trait.
//!
//! The trait-based design lets the cleanup engine, the poller and the webhook
//! receiver run against the real API in production and against scripted
//! interpreters in tests.

use std::future::Future;
use std::sync::Arc;

use chrono::{DateTime, Utc};

use super::github::{BranchRef, GitHubEffect, GitHubResponse, NotificationPage};
use crate::github::GitHubApiError;
use crate::types::{Login, PrNumber, PullRequest, RepoId};

/// Interprets GitHub effects against the GitHub API.
///
/// Implementors only provide [`interpret`](Self::interpret). The typed
/// helpers wrap it and reject responses that do not match the effect.
///
/// # Example (mock for testing)
///
/// ```ignore
/// struct AlwaysMissing;
///
/// impl GitHubInterpreter for AlwaysMissing {
///     fn interpret(
///         &self,
///         effect: GitHubEffect,
///     ) -> impl Future<Output = Result<GitHubResponse, GitHubApiError>> + Send {
///         async move {
///             Err(GitHubApiError::without_source(
///                 GitHubErrorKind::NotFound,
///                 format!("{:?}", effect),
///             ))
///         }
///     }
/// }
/// ```
pub trait GitHubInterpreter: Send + Sync {
    /// Execute a GitHub effect and return its response.
    fn interpret(
        &self,
        effect: GitHubEffect,
    ) -> impl Future<Output = Result<GitHubResponse, GitHubApiError>> + Send;

    /// Returns the login of the authenticated account.
    fn current_user(&self) -> impl Future<Output = Result<Login, GitHubApiError>> + Send {
        async move {
            match self.interpret(GitHubEffect::GetCurrentUser).await? {
                GitHubResponse::User { login } => Ok(login),
                other => Err(unexpected_response("get_current_user", &other)),
            }
        }
    }

    /// Returns one page of notifications updated at or after `since`.
    fn list_notifications(
        &self,
        since: Option<DateTime<Utc>>,
        page: u32,
        per_page: u8,
    ) -> impl Future<Output = Result<NotificationPage, GitHubApiError>> + Send {
        async move {
            let effect = GitHubEffect::ListNotifications {
                since,
                page,
                per_page,
            };
            match self.interpret(effect).await? {
                GitHubResponse::Notifications(page) => Ok(page),
                other => Err(unexpected_response("list_notifications", &other)),
            }
        }
    }

    /// Fetches a pull request.
    fn get_pull_request(
        &self,
        repo: RepoId,
        number: PrNumber,
    ) -> impl Future<Output = Result<PullRequest, GitHubApiError>> + Send {
        async move {
            match self
                .interpret(GitHubEffect::GetPullRequest { repo, number })
                .await?
            {
                GitHubResponse::PullRequest(pr) => Ok(pr),
                other => Err(unexpected_response("get_pull_request", &other)),
            }
        }
    }

    /// Deletes a branch.
    fn delete_branch(
        &self,
        target: BranchRef,
    ) -> impl Future<Output = Result<(), GitHubApiError>> + Send {
        async move {
            match self.interpret(GitHubEffect::DeleteBranch { target }).await? {
                GitHubResponse::BranchDeleted => Ok(()),
                other => Err(unexpected_response("delete_branch", &other)),
            }
        }
    }
}

impl<G: GitHubInterpreter> GitHubInterpreter for Arc<G> {
    fn interpret(
        &self,
        effect: GitHubEffect,
    ) -> impl Future<Output = Result<GitHubResponse, GitHubApiError>> + Send {
        (**self).interpret(effect)
    }
}

fn unexpected_response(effect: &str, response: &GitHubResponse) -> GitHubApiError {
    GitHubApiError::permanent_without_source(format!(
        "unexpected {} response to {}",
        response.kind_name(),
        effect
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::github::GitHubErrorKind;

    /// Answers every effect with the same response.
    struct FixedResponse(GitHubResponse);

    impl GitHubInterpreter for FixedResponse {
        fn interpret(
            &self,
            _effect: GitHubEffect,
        ) -> impl Future<Output = Result<GitHubResponse, GitHubApiError>> + Send {
            let response = self.0.clone();
            async move { Ok(response) }
        }
    }

    #[tokio::test]
    async fn current_user_unwraps_login() {
        let github = FixedResponse(GitHubResponse::User {
            login: Login::new("bot"),
        });
        assert_eq!(github.current_user().await.unwrap(), Login::new("bot"));
    }

    #[tokio::test]
    async fn mismatched_response_is_permanent_error() {
        let github = FixedResponse(GitHubResponse::BranchDeleted);

        let err = github.current_user().await.unwrap_err();
        assert_eq!(err.kind, GitHubErrorKind::Permanent);
        assert!(err.message.contains("branch_deleted"));
        assert!(err.message.contains("get_current_user"));
    }

    #[tokio::test]
    async fn delete_branch_accepts_branch_deleted() {
        let github = FixedResponse(GitHubResponse::BranchDeleted);
        let target = BranchRef::new(RepoId::new("bot", "project"), "feature-x");
        assert!(github.delete_branch(target).await.is_ok());
    }

    #[tokio::test]
    async fn shared_interpreter_delegates() {
        let github = Arc::new(FixedResponse(GitHubResponse::User {
            login: Login::new("bot"),
        }));
        assert_eq!(github.current_user().await.unwrap(), Login::new("bot"));
    }
}
