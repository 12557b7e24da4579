//! GitHub API client and effect interpreter.
//!
//! This module executes [`GitHubEffect`](crate::effects::GitHubEffect)s via
//! the octocrab library and sorts failures into the categories the rest of the
//! bot cares about (transient, not found, unauthorized, permanent).

mod client;
mod error;
mod interpreter;

pub use client::OctocrabClient;
pub use error::{GitHubApiError, GitHubErrorKind, classify_delete};
pub use interpreter::{interpret_github_effect, page_number};
