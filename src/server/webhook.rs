//! Webhook endpoint handler.
//!
//! Unlike the poller, the receiver gets the pull request snapshot inside the
//! delivery, so a closed event goes straight to the cleanup engine without
//! another API read.

use axum::body::Bytes;
use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use thiserror::Error;
use tracing::{debug, error, info, warn};

use super::AppState;
use crate::cleanup::cleanup_pull_request;
use crate::effects::GitHubInterpreter;
use crate::webhooks::{CleanupEvent, EventDisposition, SIGNATURE_HEADER, SignatureError};

/// Errors that can occur when processing a webhook.
#[derive(Debug, Error)]
pub enum WebhookError {
    /// Missing or invalid signature.
    #[error("{0}")]
    Signature(#[from] SignatureError),

    /// Invalid JSON body.
    #[error("invalid JSON body: {0}")]
    InvalidJson(#[from] serde_json::Error),
}

impl IntoResponse for WebhookError {
    fn into_response(self) -> Response {
        let status = match &self {
            WebhookError::Signature(_) => StatusCode::UNAUTHORIZED,
            WebhookError::InvalidJson(_) => StatusCode::BAD_REQUEST,
        };

        (status, self.to_string()).into_response()
    }
}

/// Webhook handler.
///
/// # Response
///
/// - 200 OK: handled, empty body. This covers cleaned up, skipped and
///   ignored events, and a cleanup that GitHub failed (logged at error)
/// - 400 Bad Request: body is not valid JSON for a webhook payload
/// - 401 Unauthorized: signature missing or wrong (only with a secret)
pub async fn webhook_handler<G>(
    State(app_state): State<AppState<G>>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<StatusCode, WebhookError>
where
    G: GitHubInterpreter + 'static,
{
    if let Some(secret) = app_state.webhook_secret() {
        let signature = headers
            .get(SIGNATURE_HEADER)
            .and_then(|v| v.to_str().ok());
        if let Err(e) = secret.verify(&body, signature) {
            warn!(error = %e, "Rejected webhook delivery");
            return Err(e.into());
        }
    }

    let event = CleanupEvent::from_slice(&body).map_err(|e| {
        warn!(error = %e, "Failed to decode webhook body");
        WebhookError::InvalidJson(e)
    })?;

    match event.disposition() {
        EventDisposition::NoPullRequest => {
            info!(repo = %event.repository_name(), "Skipping non pull request event");
        }
        EventDisposition::IgnoredAction(action) => {
            info!(
                repo = %event.repository_name(),
                pr = ?event.number,
                action = %action,
                "Skipping pull request event, not closed"
            );
        }
        EventDisposition::Cleanup(pr) => {
            debug!(repo = %event.repository_name(), pr = %pr.number, "Pull request closed");
            if let Err(e) = cleanup_pull_request(app_state.github(), pr, app_state.bot()).await {
                error!(
                    repo = %event.repository_name(),
                    pr = %pr.number,
                    error = %e,
                    "Failed to clean up pull request"
                );
            }
        }
    }

    Ok(StatusCode::OK)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn status_of(err: WebhookError) -> StatusCode {
        err.into_response().status()
    }

    #[test]
    fn signature_errors_are_unauthorized() {
        assert_eq!(
            status_of(SignatureError::Missing.into()),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            status_of(SignatureError::Mismatch.into()),
            StatusCode::UNAUTHORIZED
        );
    }

    #[test]
    fn decode_errors_are_bad_request() {
        let err = serde_json::from_slice::<CleanupEvent>(b"[").unwrap_err();
        assert_eq!(status_of(err.into()), StatusCode::BAD_REQUEST);
    }
}
