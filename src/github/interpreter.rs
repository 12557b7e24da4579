//! GitHub effect interpreter using octocrab.
//!
//! Each effect maps to exactly one REST call. Responses are decoded into the
//! crate's own serde types so that API responses and webhook payloads share
//! one model. Nothing is retried here.

use chrono::{DateTime, Utc};
use http::Uri;
use octocrab::Page;
use serde::Serialize;
use tracing::debug;

use crate::effects::{BranchRef, GitHubEffect, GitHubInterpreter, GitHubResponse, NotificationPage};
use crate::types::{Account, Notification, PrNumber, PullRequest, RepoId};

use super::client::OctocrabClient;
use super::error::GitHubApiError;

impl GitHubInterpreter for OctocrabClient {
    async fn interpret(&self, effect: GitHubEffect) -> Result<GitHubResponse, GitHubApiError> {
        interpret_github_effect(self, effect).await
    }
}

/// Interprets a GitHub effect, executing it against the GitHub API.
pub async fn interpret_github_effect(
    client: &OctocrabClient,
    effect: GitHubEffect,
) -> Result<GitHubResponse, GitHubApiError> {
    debug!(?effect, "Executing GitHub effect");

    match effect {
        GitHubEffect::GetCurrentUser => get_current_user(client).await,
        GitHubEffect::ListNotifications {
            since,
            page,
            per_page,
        } => list_notifications(client, since, page, per_page).await,
        GitHubEffect::GetPullRequest { repo, number } => {
            get_pull_request(client, &repo, number).await
        }
        GitHubEffect::DeleteBranch { target } => delete_branch(client, &target).await,
    }
}

// ─── Identity ─────────────────────────────────────────────────────────────────

async fn get_current_user(client: &OctocrabClient) -> Result<GitHubResponse, GitHubApiError> {
    let user: Account = client
        .inner()
        .get("/user", None::<&()>)
        .await
        .map_err(GitHubApiError::from_octocrab)?;

    Ok(GitHubResponse::User { login: user.login })
}

// ─── Notifications ────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
struct NotificationParams {
    all: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    since: Option<DateTime<Utc>>,
    page: u32,
    per_page: u8,
}

async fn list_notifications(
    client: &OctocrabClient,
    since: Option<DateTime<Utc>>,
    page: u32,
    per_page: u8,
) -> Result<GitHubResponse, GitHubApiError> {
    let params = NotificationParams {
        all: true,
        since,
        page,
        per_page,
    };

    let result: Page<Notification> = client
        .inner()
        .get("/notifications", Some(&params))
        .await
        .map_err(GitHubApiError::from_octocrab)?;

    Ok(GitHubResponse::Notifications(NotificationPage {
        next_page: result.next.as_ref().and_then(page_number),
        last_page: result.last.as_ref().and_then(page_number),
        items: result.items,
    }))
}

/// Reads the `page` query parameter from a `Link` header URI.
pub fn page_number(uri: &Uri) -> Option<u32> {
    url::form_urlencoded::parse(uri.query()?.as_bytes())
        .find(|(key, _)| key == "page")
        .and_then(|(_, value)| value.parse().ok())
}

// ─── Pull Requests ────────────────────────────────────────────────────────────

async fn get_pull_request(
    client: &OctocrabClient,
    repo: &RepoId,
    number: PrNumber,
) -> Result<GitHubResponse, GitHubApiError> {
    let route = format!("/repos/{}/{}/pulls/{}", repo.owner, repo.repo, number.0);

    let pr: PullRequest = client
        .inner()
        .get(route, None::<&()>)
        .await
        .map_err(GitHubApiError::from_octocrab)?;

    Ok(GitHubResponse::PullRequest(pr))
}

// ─── Branches ─────────────────────────────────────────────────────────────────

async fn delete_branch(
    client: &OctocrabClient,
    target: &BranchRef,
) -> Result<GitHubResponse, GitHubApiError> {
    let route = format!(
        "/repos/{}/{}/git/refs/{}",
        target.repo.owner,
        target.repo.repo,
        target.ref_path()
    );

    // DELETE answers 204 with an empty body, so the typed `delete` helper
    // (which decodes JSON) does not fit; map the raw response instead.
    let response = client
        .inner()
        ._delete(route, None::<&()>)
        .await
        .map_err(GitHubApiError::from_delete_ref)?;
    octocrab::map_github_error(response)
        .await
        .map_err(GitHubApiError::from_delete_ref)?;

    Ok(GitHubResponse::BranchDeleted)
}
