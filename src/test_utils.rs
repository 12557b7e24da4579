//! Shared test utilities: a scripted GitHub interpreter, fixtures and
//! arbitrary generators for property-based testing.

use std::collections::{HashMap, HashSet};
use std::future::Future;
use std::sync::Mutex;

use chrono::{DateTime, Utc};
use proptest::prelude::*;

use crate::effects::{BranchRef, GitHubEffect, GitHubInterpreter, GitHubResponse, NotificationPage};
use crate::github::{GitHubApiError, GitHubErrorKind};
use crate::types::{
    HeadRef, Login, Notification, PrNumber, PrState, PullRequest, RepoId, Repository, Subject,
    SubjectKind,
};

/// A GitHub interpreter backed by in-memory fixtures.
///
/// Every effect is recorded. Deleting a branch succeeds the first time and
/// reports `NotFound` afterwards, like the real API.
pub struct MockGitHub {
    login: Login,
    pages: HashMap<u32, NotificationPage>,
    pull_requests: HashMap<(RepoId, PrNumber), PullRequest>,
    delete_failure: Option<GitHubErrorKind>,
    deleted: Mutex<HashSet<BranchRef>>,
    effects: Mutex<Vec<GitHubEffect>>,
}

impl MockGitHub {
    pub fn new(login: &str) -> Self {
        MockGitHub {
            login: Login::new(login),
            pages: HashMap::new(),
            pull_requests: HashMap::new(),
            delete_failure: None,
            deleted: Mutex::new(HashSet::new()),
            effects: Mutex::new(Vec::new()),
        }
    }

    /// Serves `page` for `ListNotifications` requests with that page number.
    pub fn with_page(mut self, page: u32, contents: NotificationPage) -> Self {
        self.pages.insert(page, contents);
        self
    }

    /// Serves `pr` for `GetPullRequest` on `repo`.
    pub fn with_pull_request(mut self, repo: RepoId, pr: PullRequest) -> Self {
        self.pull_requests.insert((repo, pr.number), pr);
        self
    }

    /// Makes every `DeleteBranch` fail with `kind`.
    pub fn with_delete_failure(mut self, kind: GitHubErrorKind) -> Self {
        self.delete_failure = Some(kind);
        self
    }

    /// Marks a branch as already deleted.
    pub fn with_deleted_branch(self, target: BranchRef) -> Self {
        self.deleted.lock().unwrap().insert(target);
        self
    }

    /// All effects interpreted so far, in order.
    pub fn effects(&self) -> Vec<GitHubEffect> {
        self.effects.lock().unwrap().clone()
    }

    /// Targets of all `DeleteBranch` effects, in order.
    pub fn delete_attempts(&self) -> Vec<BranchRef> {
        self.effects()
            .into_iter()
            .filter_map(|effect| match effect {
                GitHubEffect::DeleteBranch { target } => Some(target),
                _ => None,
            })
            .collect()
    }

    /// Page numbers of all `ListNotifications` effects, in order.
    pub fn pages_requested(&self) -> Vec<u32> {
        self.effects()
            .into_iter()
            .filter_map(|effect| match effect {
                GitHubEffect::ListNotifications { page, .. } => Some(page),
                _ => None,
            })
            .collect()
    }

    /// `since` values of all `ListNotifications` effects, in order.
    pub fn since_requested(&self) -> Vec<Option<DateTime<Utc>>> {
        self.effects()
            .into_iter()
            .filter_map(|effect| match effect {
                GitHubEffect::ListNotifications { since, .. } => Some(since),
                _ => None,
            })
            .collect()
    }

    fn respond(&self, effect: &GitHubEffect) -> Result<GitHubResponse, GitHubApiError> {
        match effect {
            GitHubEffect::GetCurrentUser => Ok(GitHubResponse::User {
                login: self.login.clone(),
            }),
            GitHubEffect::ListNotifications { page, .. } => Ok(GitHubResponse::Notifications(
                self.pages.get(page).cloned().unwrap_or_default(),
            )),
            GitHubEffect::GetPullRequest { repo, number } => self
                .pull_requests
                .get(&(repo.clone(), *number))
                .cloned()
                .map(GitHubResponse::PullRequest)
                .ok_or_else(|| {
                    GitHubApiError::without_source(
                        GitHubErrorKind::NotFound,
                        format!("pull request {} {} not found", repo, number),
                    )
                }),
            GitHubEffect::DeleteBranch { target } => {
                if let Some(kind) = self.delete_failure {
                    return Err(GitHubApiError::without_source(kind, "scripted failure"));
                }
                if self.deleted.lock().unwrap().insert(target.clone()) {
                    Ok(GitHubResponse::BranchDeleted)
                } else {
                    Err(GitHubApiError::without_source(
                        GitHubErrorKind::NotFound,
                        "Reference does not exist",
                    ))
                }
            }
        }
    }
}

impl GitHubInterpreter for MockGitHub {
    fn interpret(
        &self,
        effect: GitHubEffect,
    ) -> impl Future<Output = Result<GitHubResponse, GitHubApiError>> + Send {
        self.effects.lock().unwrap().push(effect.clone());
        let response = self.respond(&effect);
        async move { response }
    }
}

// ─── Fixtures ─────────────────────────────────────────────────────────────────

/// A merged pull request whose head branch lives in `owner/repo`.
pub fn merged_pr(number: u64, owner: &str, repo: &str, branch: &str) -> PullRequest {
    PullRequest {
        number: PrNumber(number),
        state: PrState::Closed,
        merged: true,
        head: HeadRef {
            branch: branch.to_string(),
            repo: Some(Repository::new(owner, repo)),
        },
    }
}

/// A pull request notification for `repo` number `number`.
pub fn pr_notification(repo: &RepoId, number: u64) -> Notification {
    Notification {
        id: format!("{}-{}", repo.repo, number),
        subject: Subject {
            title: format!("PR {}", number),
            url: Some(format!(
                "https://api.github.com/repos/{}/{}/pulls/{}",
                repo.owner, repo.repo, number
            )),
            kind: SubjectKind::PullRequest,
        },
        repository: Repository::new(&repo.owner, &repo.repo),
        updated_at: Utc::now(),
    }
}

/// A notification about something other than a pull request.
pub fn issue_notification(repo: &RepoId, number: u64) -> Notification {
    let mut notification = pr_notification(repo, number);
    notification.subject.kind = SubjectKind::Issue;
    notification.subject.url = Some(format!(
        "https://api.github.com/repos/{}/{}/issues/{}",
        repo.owner, repo.repo, number
    ));
    notification
}

// ─── Generators ───────────────────────────────────────────────────────────────

pub fn arb_login() -> impl Strategy<Value = String> {
    prop_oneof![Just("bot".to_string()), "[a-z][a-z0-9-]{0,12}"]
}

pub fn arb_branch_name() -> impl Strategy<Value = String> {
    prop_oneof![
        Just("master".to_string()),
        Just("main".to_string()),
        "[a-z][a-z0-9/#-]{0,30}",
    ]
}

pub fn arb_pr_state() -> impl Strategy<Value = PrState> {
    prop_oneof![Just(PrState::Open), Just(PrState::Closed)]
}

pub fn arb_pull_request() -> impl Strategy<Value = PullRequest> {
    (
        1..100_000u64,
        arb_pr_state(),
        any::<bool>(),
        arb_branch_name(),
        prop::option::of((arb_login(), "[a-z][a-z0-9_-]{0,20}")),
    )
        .prop_map(|(number, state, merged, branch, repo)| PullRequest {
            number: PrNumber(number),
            state,
            merged,
            head: HeadRef {
                branch,
                repo: repo.map(|(owner, name)| Repository::new(owner, name)),
            },
        })
}
