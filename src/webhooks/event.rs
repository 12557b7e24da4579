//! Pull request webhook payloads.
//!
//! Only the fields needed for branch cleanup are decoded. Every top-level
//! field is optional, so deliveries for other event types (`ping`, `push`,
//! `issues`, ...) still decode and are simply ignored.

use serde::{Deserialize, Serialize};

use crate::types::{PullRequest, Repository};

/// The `action` value that triggers a cleanup.
pub const CLOSED_ACTION: &str = "closed";

/// A webhook delivery, as far as branch cleanup is concerned.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CleanupEvent {
    #[serde(default)]
    pub action: Option<String>,

    #[serde(default)]
    pub number: Option<u64>,

    #[serde(default)]
    pub pull_request: Option<PullRequest>,

    #[serde(default)]
    pub repository: Option<Repository>,
}

/// What the receiver should do with a delivery.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventDisposition<'a> {
    /// Not a pull request event.
    NoPullRequest,

    /// A pull request event with an action other than `closed`.
    IgnoredAction(&'a str),

    /// A closed pull request: run the cleanup engine.
    Cleanup(&'a PullRequest),
}

impl CleanupEvent {
    /// Decodes a raw delivery body.
    pub fn from_slice(body: &[u8]) -> Result<Self, serde_json::Error> {
        serde_json::from_slice(body)
    }

    pub fn disposition(&self) -> EventDisposition<'_> {
        let Some(pr) = &self.pull_request else {
            return EventDisposition::NoPullRequest;
        };

        match self.action.as_deref() {
            Some(CLOSED_ACTION) => EventDisposition::Cleanup(pr),
            other => EventDisposition::IgnoredAction(other.unwrap_or("")),
        }
    }

    /// `owner/name` of the repository the event came from, for logging.
    pub fn repository_name(&self) -> String {
        self.repository
            .as_ref()
            .map(|repo| repo.id().to_string())
            .unwrap_or_else(|| "unknown repository".to_string())
    }
}
