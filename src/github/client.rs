//! Octocrab client wrapper for the bot's own account.
//!
//! The bot authenticates as a single user with a personal access token and
//! acts on whatever repositories that user's notifications mention, so the
//! client is account-scoped rather than repository-scoped.

use octocrab::Octocrab;

/// A GitHub API client authenticated as the bot account.
#[derive(Clone)]
pub struct OctocrabClient {
    client: Octocrab,
}

impl OctocrabClient {
    /// Wraps a pre-configured Octocrab instance.
    pub fn new(client: Octocrab) -> Self {
        Self { client }
    }

    /// Creates a client from a GitHub personal access token.
    pub fn from_token(token: impl Into<String>) -> Result<Self, octocrab::Error> {
        let client = Octocrab::builder().personal_token(token.into()).build()?;
        Ok(Self::new(client))
    }

    /// Returns a reference to the underlying octocrab client.
    pub fn inner(&self) -> &Octocrab {
        &self.client
    }
}

impl std::fmt::Debug for OctocrabClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OctocrabClient").finish_non_exhaustive()
    }
}
