//! Repository and account objects as GitHub serializes them.
//!
//! These appear inside pull requests, notifications and webhook payloads.
//! Only the fields the bot reads are modelled; everything else in the JSON
//! is ignored.

use serde::{Deserialize, Serialize};

use super::ids::{Login, RepoId};

/// A GitHub account reference (the `owner` or `user` objects).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    pub login: Login,
}

/// A GitHub repository reference.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Repository {
    /// The repository name without the owner (e.g., "hello-world").
    pub name: String,

    /// The account owning the repository.
    pub owner: Account,

    /// The repository's default branch, when the payload includes it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_branch: Option<String>,
}

impl Repository {
    /// Creates a repository reference without default branch information.
    pub fn new(owner: impl Into<String>, name: impl Into<String>) -> Self {
        Repository {
            name: name.into(),
            owner: Account {
                login: Login::new(owner),
            },
            default_branch: None,
        }
    }

    /// Returns the `owner/name` identifier of this repository.
    pub fn id(&self) -> RepoId {
        RepoId::new(self.owner.login.as_str(), &self.name)
    }
}
