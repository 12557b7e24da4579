//! Notification feed entries (`GET /notifications`).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::ids::PrNumber;
use super::repository::Repository;

/// The kind of thing a notification is about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SubjectKind {
    PullRequest,
    Issue,
    Commit,
    Release,
    Discussion,
    CheckSuite,
    /// Any subject type the bot does not act on.
    #[serde(other)]
    Other,
}

/// What a notification points at.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Subject {
    #[serde(default)]
    pub title: String,

    /// API URL of the subject. For pull requests this ends in the PR number.
    ///
    /// Some subject types (e.g., discussions) carry `null` here.
    #[serde(default)]
    pub url: Option<String>,

    #[serde(rename = "type")]
    pub kind: SubjectKind,
}

/// A single entry in the authenticated user's notification feed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    pub id: String,
    pub subject: Subject,
    pub repository: Repository,
    pub updated_at: DateTime<Utc>,
}

/// Errors from interpreting a notification's subject.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SubjectError {
    #[error("notification {id} has no subject URL")]
    MissingUrl { id: String },

    #[error("cannot parse pull request number from subject URL {url}")]
    InvalidUrl { url: String },
}

impl Notification {
    /// Returns true if this notification is about a pull request.
    pub fn is_pull_request(&self) -> bool {
        self.subject.kind == SubjectKind::PullRequest
    }

    /// Extracts the pull request number from the last path segment of the
    /// subject URL (`.../pulls/42` yields `#42`).
    pub fn pull_request_number(&self) -> Result<PrNumber, SubjectError> {
        let url = self
            .subject
            .url
            .as_deref()
            .ok_or_else(|| SubjectError::MissingUrl {
                id: self.id.clone(),
            })?;

        url.rsplit('/')
            .next()
            .and_then(|last| last.parse::<u64>().ok())
            .map(PrNumber)
            .ok_or_else(|| SubjectError::InvalidUrl {
                url: url.to_string(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn notification(kind: &str, url: Option<&str>) -> Notification {
        serde_json::from_value(json!({
            "id": "1",
            "unread": true,
            "reason": "author",
            "updated_at": "2024-03-01T12:00:00Z",
            "subject": {
                "title": "Add feature x",
                "url": url,
                "latest_comment_url": null,
                "type": kind
            },
            "repository": {
                "name": "project",
                "full_name": "upstream/project",
                "owner": { "login": "upstream" }
            }
        }))
        .unwrap()
    }

    #[test]
    fn deserializes_feed_entry() {
        let n = notification(
            "PullRequest",
            Some("https://api.github.com/repos/upstream/project/pulls/42"),
        );

        assert!(n.is_pull_request());
        assert_eq!(n.repository.owner.login.as_str(), "upstream");
        assert_eq!(n.pull_request_number(), Ok(PrNumber(42)));
    }

    #[test]
    fn unknown_subject_type_is_other() {
        let n = notification("RepositoryVulnerabilityAlert", None);
        assert_eq!(n.subject.kind, SubjectKind::Other);
        assert!(!n.is_pull_request());
    }

    #[test]
    fn trailing_segment_must_be_numeric() {
        let n = notification(
            "PullRequest",
            Some("https://api.github.com/repos/upstream/project/pulls/abc"),
        );
        assert!(matches!(
            n.pull_request_number(),
            Err(SubjectError::InvalidUrl { .. })
        ));
    }

    #[test]
    fn trailing_slash_is_invalid() {
        let n = notification(
            "PullRequest",
            Some("https://api.github.com/repos/upstream/project/pulls/42/"),
        );
        assert!(n.pull_request_number().is_err());
    }

    #[test]
    fn missing_url_is_reported() {
        let n = notification("PullRequest", None);
        assert_eq!(
            n.pull_request_number(),
            Err(SubjectError::MissingUrl { id: "1".to_string() })
        );
    }
}
