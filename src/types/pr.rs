//! Pull request snapshot types.
//!
//! A `PullRequest` is whatever GitHub reported at one moment, either from
//! `GET /repos/{owner}/{repo}/pulls/{number}` or embedded in a `pull_request`
//! webhook. Both sources share the same JSON shape, so one set of serde types
//! covers them.

use serde::{Deserialize, Serialize};

use super::ids::PrNumber;
use super::repository::Repository;

/// The open/closed state GitHub reports for a pull request.
///
/// GitHub does not have a separate "merged" state: a merged PR is `closed`
/// with `merged: true`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PrState {
    Open,
    Closed,
}

/// The head side of a pull request: the branch the changes come from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeadRef {
    /// The branch name (GitHub's `ref` field, e.g., "feature-x").
    #[serde(rename = "ref")]
    pub branch: String,

    /// The repository holding the branch.
    ///
    /// GitHub sends `null` once the head repository (usually a fork) has
    /// been deleted.
    #[serde(default)]
    pub repo: Option<Repository>,
}

/// A snapshot of a pull request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PullRequest {
    pub number: PrNumber,
    pub state: PrState,

    /// Absent on some payloads; missing means "not merged".
    #[serde(default)]
    pub merged: bool,

    pub head: HeadRef,
}

impl PullRequest {
    /// Returns true if the PR is closed and was merged (not just closed).
    pub fn is_merged(&self) -> bool {
        self.state == PrState::Closed && self.merged
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn api_payload() -> serde_json::Value {
        json!({
            "url": "https://api.github.com/repos/upstream/project/pulls/42",
            "number": 42,
            "state": "closed",
            "merged": true,
            "title": "Add feature x",
            "head": {
                "label": "bot:feature-x",
                "ref": "feature-x",
                "sha": "0123456789abcdef0123456789abcdef01234567",
                "repo": {
                    "name": "project",
                    "full_name": "bot/project",
                    "owner": { "login": "bot" },
                    "default_branch": "master"
                }
            },
            "base": {
                "ref": "master",
                "repo": { "name": "project", "owner": { "login": "upstream" } }
            }
        })
    }

    #[test]
    fn deserializes_api_payload() {
        let pr: PullRequest = serde_json::from_value(api_payload()).unwrap();

        assert_eq!(pr.number, PrNumber(42));
        assert_eq!(pr.state, PrState::Closed);
        assert!(pr.merged);
        assert_eq!(pr.head.branch, "feature-x");

        let repo = pr.head.repo.expect("head repo present");
        assert_eq!(repo.owner.login.as_str(), "bot");
        assert_eq!(repo.name, "project");
    }

    #[test]
    fn null_head_repo_becomes_none() {
        let mut payload = api_payload();
        payload["head"]["repo"] = serde_json::Value::Null;

        let pr: PullRequest = serde_json::from_value(payload).unwrap();
        assert!(pr.head.repo.is_none());
    }

    #[test]
    fn missing_merged_flag_means_not_merged() {
        let mut payload = api_payload();
        payload.as_object_mut().unwrap().remove("merged");

        let pr: PullRequest = serde_json::from_value(payload).unwrap();
        assert!(!pr.merged);
        assert!(!pr.is_merged());
    }

    #[test]
    fn is_merged_requires_closed_state() {
        let mut pr: PullRequest = serde_json::from_value(api_payload()).unwrap();
        assert!(pr.is_merged());

        pr.state = PrState::Open;
        assert!(!pr.is_merged());

        pr.state = PrState::Closed;
        pr.merged = false;
        assert!(!pr.is_merged());
    }

    #[test]
    fn unknown_state_is_rejected() {
        let mut payload = api_payload();
        payload["state"] = json!("merged");

        let result: Result<PullRequest, _> = serde_json::from_value(payload);
        assert!(result.is_err());
    }
}
