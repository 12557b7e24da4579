//! Core domain types for the branch cleanup bot.
//!
//! These mirror the parts of GitHub's JSON the bot reads, with optional
//! fields modelled as `Option` so every consumer has to handle absence.

pub mod ids;
pub mod notification;
pub mod pr;
pub mod repository;

pub use ids::{Login, PrNumber, RepoId};
pub use notification::{Notification, Subject, SubjectError, SubjectKind};
pub use pr::{HeadRef, PrState, PullRequest};
pub use repository::{Account, Repository};
