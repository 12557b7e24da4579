//! Effects-as-data for GitHub operations.
//!
//! Every GitHub call the bot makes is described by a [`GitHubEffect`] and
//! executed by a [`GitHubInterpreter`]. This keeps the decision logic free of
//! transport concerns and lets tests script the API.

pub mod github;
pub mod interpreter;

pub use github::{BranchRef, GitHubEffect, GitHubResponse, NotificationPage};
pub use interpreter::GitHubInterpreter;
