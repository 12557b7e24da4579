//! GitHub API error types.
//!
//! Errors are categorized by what the caller can do about them:
//!
//! - **Transient** errors (5xx, rate limits, network failures) clear up on
//!   their own. The bot never retries them inline; the next poll tick or the
//!   next webhook delivery is the retry.
//! - **NotFound** means the object is gone. For branch deletion this is the
//!   "already deleted" outcome and callers treat it as success.
//! - **Unauthorized** means the token is invalid or expired.
//! - **Permanent** covers everything else.

use std::fmt;
use thiserror::Error;

/// The kind of GitHub API error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GitHubErrorKind {
    /// Temporary failure: HTTP 5xx, HTTP 429, HTTP 403 with rate limit
    /// message, or a network-level error.
    Transient,

    /// The requested object does not exist (HTTP 404, or 422 when deleting
    /// a git ref that is already gone).
    NotFound,

    /// The token was rejected (HTTP 401).
    Unauthorized,

    /// Any other failure.
    Permanent,
}

/// A GitHub API error with its category.
#[derive(Debug, Error)]
pub struct GitHubApiError {
    pub kind: GitHubErrorKind,

    /// The HTTP status code, if available.
    pub status_code: Option<u16>,

    /// A human-readable description of the error.
    pub message: String,

    /// The underlying octocrab error, if available.
    #[source]
    pub source: Option<octocrab::Error>,
}

impl fmt::Display for GitHubApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.status_code {
            Some(code) => write!(f, "GitHub API error (HTTP {}): {}", code, self.message),
            None => write!(f, "GitHub API error: {}", self.message),
        }
    }
}

impl GitHubApiError {
    /// Creates an error of the given kind without an octocrab source.
    pub fn without_source(kind: GitHubErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            status_code: None,
            message: message.into(),
            source: None,
        }
    }

    /// Creates a permanent error without an octocrab source.
    pub fn permanent_without_source(message: impl Into<String>) -> Self {
        Self::without_source(GitHubErrorKind::Permanent, message)
    }

    /// Creates a transient error without an octocrab source.
    pub fn transient_without_source(message: impl Into<String>) -> Self {
        Self::without_source(GitHubErrorKind::Transient, message)
    }

    /// Returns true if GitHub reported the object as missing.
    pub fn is_not_found(&self) -> bool {
        self.kind == GitHubErrorKind::NotFound
    }

    /// Categorizes an octocrab error.
    pub fn from_octocrab(err: octocrab::Error) -> Self {
        let status_code = Self::extract_status_code(&err);
        let message = err.to_string();
        let kind = classify(status_code, &message);

        Self {
            kind,
            status_code,
            message,
            source: Some(err),
        }
    }

    /// Categorizes an octocrab error from `DELETE /repos/{owner}/{repo}/git/refs/{ref}`.
    pub fn from_delete_ref(err: octocrab::Error) -> Self {
        let mut categorized = Self::from_octocrab(err);
        categorized.kind = classify_delete(categorized.status_code, &categorized.message);
        categorized
    }

    /// Extracts the HTTP status code from an octocrab error, if present.
    ///
    /// GitHub-reported errors carry a structured status code. Other variants
    /// only yield one when the message names it as `status: <code>`; `None`
    /// leads to conservative categorization.
    fn extract_status_code(err: &octocrab::Error) -> Option<u16> {
        if let octocrab::Error::GitHub { source, .. } = err {
            return Some(source.status_code.as_u16());
        }

        status_from_message(&err.to_string())
    }
}

/// Reads a `status: <code>` marker from an error message.
fn status_from_message(message: &str) -> Option<u16> {
    let idx = message.find("status: ")?;
    let digits: String = message[idx + 8..]
        .chars()
        .take_while(|c| c.is_ascii_digit())
        .collect();
    digits.parse().ok()
}

/// Maps a failed ref delete to an error kind.
///
/// GitHub answers 422 "Reference does not exist" when the branch is already
/// gone, so that response is `NotFound` here rather than `Permanent`.
pub fn classify_delete(status_code: Option<u16>, message: &str) -> GitHubErrorKind {
    if status_code == Some(422) || message.to_lowercase().contains("reference does not exist") {
        return GitHubErrorKind::NotFound;
    }
    classify(status_code, message)
}

/// Maps a status code and message to an error kind.
fn classify(status_code: Option<u16>, message: &str) -> GitHubErrorKind {
    match status_code {
        Some(404) => GitHubErrorKind::NotFound,
        Some(401) => GitHubErrorKind::Unauthorized,
        Some(429) => GitHubErrorKind::Transient,
        Some(403) if is_rate_limit_error(message) => GitHubErrorKind::Transient,
        Some(code) if (500..600).contains(&code) => GitHubErrorKind::Transient,
        Some(_) => GitHubErrorKind::Permanent,
        None if is_network_error(message) => GitHubErrorKind::Transient,
        None => GitHubErrorKind::Permanent,
    }
}

/// Checks if an error message indicates a rate limit.
fn is_rate_limit_error(message: &str) -> bool {
    let message_lower = message.to_lowercase();
    message_lower.contains("rate limit")
        || message_lower.contains("api rate")
        || message_lower.contains("secondary rate")
        || message_lower.contains("abuse detection")
}

/// Checks if an error message indicates a network-level error.
fn is_network_error(message: &str) -> bool {
    let message_lower = message.to_lowercase();
    message_lower.contains("timeout")
        || message_lower.contains("connection")
        || message_lower.contains("network")
        || message_lower.contains("dns")
        || message_lower.contains("timed out")
}
