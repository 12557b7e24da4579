//! GitHub webhook signature verification using HMAC-SHA256.
//!
//! GitHub signs each delivery with the hook's shared secret and sends the
//! result in the `X-Hub-Signature-256` header as `sha256=<hex>`. Verification
//! happens on the raw body, before any decoding.

use std::fmt;

use hmac::{Hmac, Mac};
use sha2::Sha256;
use thiserror::Error;

type HmacSha256 = Hmac<Sha256>;

/// Header carrying the delivery signature.
pub const SIGNATURE_HEADER: &str = "x-hub-signature-256";

/// Why a delivery's signature was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SignatureError {
    #[error("missing X-Hub-Signature-256 header")]
    Missing,

    #[error("malformed signature header")]
    Malformed,

    #[error("signature does not match payload")]
    Mismatch,
}

/// The shared secret configured on the GitHub webhook.
#[derive(Clone)]
pub struct WebhookSecret(Vec<u8>);

impl fmt::Debug for WebhookSecret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("WebhookSecret(..)")
    }
}

impl WebhookSecret {
    pub fn new(secret: impl Into<Vec<u8>>) -> Self {
        WebhookSecret(secret.into())
    }

    /// Checks `header` (the raw `X-Hub-Signature-256` value, if any)
    /// against `payload`.
    ///
    /// The comparison is constant-time.
    ///
    /// ```
    /// use branch_sweep::webhooks::{SignatureError, WebhookSecret};
    ///
    /// let secret = WebhookSecret::new("It's a Secret to Everybody");
    /// let header = secret.sign(b"Hello, World!");
    ///
    /// assert_eq!(secret.verify(b"Hello, World!", Some(&header)), Ok(()));
    /// assert_eq!(
    ///     secret.verify(b"Hello, World?", Some(&header)),
    ///     Err(SignatureError::Mismatch)
    /// );
    /// assert_eq!(secret.verify(b"Hello, World!", None), Err(SignatureError::Missing));
    /// ```
    pub fn verify(&self, payload: &[u8], header: Option<&str>) -> Result<(), SignatureError> {
        let header = header.ok_or(SignatureError::Missing)?;
        let expected = parse_signature_header(header).ok_or(SignatureError::Malformed)?;

        let mut mac =
            HmacSha256::new_from_slice(&self.0).map_err(|_| SignatureError::Mismatch)?;
        mac.update(payload);
        mac.verify_slice(&expected)
            .map_err(|_| SignatureError::Mismatch)
    }

    /// Signs `payload` and returns the header value GitHub would send.
    pub fn sign(&self, payload: &[u8]) -> String {
        let mut mac = HmacSha256::new_from_slice(&self.0).expect("HMAC can take key of any size");
        mac.update(payload);
        format!("sha256={}", hex::encode(mac.finalize().into_bytes()))
    }
}

/// Decodes `sha256=<hex>` into raw bytes. Anything else is `None`.
fn parse_signature_header(header: &str) -> Option<Vec<u8>> {
    let hex_sig = header.strip_prefix("sha256=")?;
    hex::decode(hex_sig).ok()
}
