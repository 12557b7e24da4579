//! Branch Sweep - a GitHub bot that deletes the head branches of merged pull
//! requests owned by its own account.
//!
//! Pull requests reach the cleanup engine through one of two paths: a poller
//! reading the account's notification feed, or a webhook receiver handling
//! `pull_request` deliveries.

pub mod cleanup;
pub mod config;
pub mod effects;
pub mod github;
pub mod poller;
pub mod server;
pub mod types;
pub mod webhooks;

#[cfg(test)]
mod test_utils;
