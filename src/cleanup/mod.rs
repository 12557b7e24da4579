//! Merge cleanup engine.
//!
//! Both ingestion paths (notification polling and webhooks) end here. The
//! engine is split into a pure decision ([`evaluate`]) and its execution
//! ([`cleanup_pull_request`]), which issues at most one branch deletion.
//!
//! # Safety rules
//!
//! - A branch named `master`, or the head repository's reported default
//!   branch, is never deleted.
//! - A branch in a repository not owned by the bot is never deleted, even
//!   when the bot authored the pull request.

mod decision;
mod engine;

pub use decision::{CleanupDecision, PROTECTED_BRANCHES, SkipReason, evaluate};
pub use engine::{CleanupOutcome, cleanup_pull_request};
