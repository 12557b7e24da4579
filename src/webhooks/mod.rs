//! GitHub webhook deliveries.
//!
//! - Signature verification for webhook payloads (HMAC-SHA256)
//! - Decoding of pull request events into a [`CleanupEvent`]

pub mod event;
pub mod signature;

pub use event::{CLOSED_ACTION, CleanupEvent, EventDisposition};
pub use signature::{SIGNATURE_HEADER, SignatureError, WebhookSecret};
