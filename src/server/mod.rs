//! HTTP server for webhook mode.
//!
//! # Endpoints
//!
//! - `POST /` - Accepts GitHub webhook deliveries and cleans up merged
//!   branches synchronously
//! - `GET /health` - Returns 200 if the server is running

use std::sync::Arc;

use crate::effects::GitHubInterpreter;
use crate::types::Login;
use crate::webhooks::WebhookSecret;

pub mod health;
pub mod webhook;

pub use health::health_handler;
pub use webhook::{WebhookError, webhook_handler};

/// Shared application state.
///
/// Read-only after startup and shared by every request through an `Arc`.
pub struct AppState<G> {
    inner: Arc<AppStateInner<G>>,
}

impl<G> Clone for AppState<G> {
    fn clone(&self) -> Self {
        AppState {
            inner: Arc::clone(&self.inner),
        }
    }
}

struct AppStateInner<G> {
    github: G,

    /// The authenticated account; only its branches are deleted.
    bot: Login,

    /// When set, deliveries must carry a valid `X-Hub-Signature-256`.
    webhook_secret: Option<WebhookSecret>,
}

impl<G> AppState<G> {
    pub fn new(github: G, bot: Login, webhook_secret: Option<WebhookSecret>) -> Self {
        AppState {
            inner: Arc::new(AppStateInner {
                github,
                bot,
                webhook_secret,
            }),
        }
    }

    pub fn github(&self) -> &G {
        &self.inner.github
    }

    pub fn bot(&self) -> &Login {
        &self.inner.bot
    }

    pub fn webhook_secret(&self) -> Option<&WebhookSecret> {
        self.inner.webhook_secret.as_ref()
    }
}

/// Builds the axum Router with all endpoints.
pub fn build_router<G>(app_state: AppState<G>) -> axum::Router
where
    G: GitHubInterpreter + 'static,
{
    use axum::routing::{get, post};

    axum::Router::new()
        .route("/", post(webhook_handler::<G>))
        .route("/health", get(health_handler))
        .with_state(app_state)
}
