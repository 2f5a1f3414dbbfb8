//! Request signing seam.
//!
//! Every outbound call to the AFlow platform carries an `X-A-Signature`
//! header computed over the exact bytes of the request body. The concrete
//! algorithm used by the hosted registry is proprietary, so the SDK exposes
//! a [`Signer`] trait and ships [`HmacSha256Signer`] as the pluggable
//! default; deployments talking to the real registry install the provider's
//! implementation behind the same trait.

use hmac::{Hmac, Mac};
use sha2::Sha256;
use thiserror::Error;

type HmacSha256 = Hmac<Sha256>;

/// The (app_id, app_secret, enterprise_code) tuple keying the signer.
/// Read-only after construction from [`crate::AflowConfig`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credential {
    pub app_id: String,
    pub app_secret: String,
    pub enterprise_code: String,
}

impl Credential {
    pub fn new(
        app_id: impl Into<String>,
        app_secret: impl Into<String>,
        enterprise_code: impl Into<String>,
    ) -> Self {
        Self {
            app_id: app_id.into(),
            app_secret: app_secret.into(),
            enterprise_code: enterprise_code.into(),
        }
    }

    fn check_complete(&self) -> Result<(), SignError> {
        if self.app_id.is_empty() || self.app_secret.is_empty() || self.enterprise_code.is_empty() {
            return Err(SignError::IncompleteCredential);
        }
        Ok(())
    }
}

#[derive(Debug, Error)]
pub enum SignError {
    #[error("credential is incomplete: app_id, app_secret and enterprise_code are all required")]
    IncompleteCredential,
}

/// Produces a hex-encoded signature over the exact byte sequence that will
/// be transmitted as the request body.
///
/// Implementations must be deterministic for a given (credential, body,
/// timestamp) triple and must depend on the body bytes as-is: re-serializing
/// a logically equal payload yields a different signature.
pub trait Signer: Send + Sync {
    fn sign(
        &self,
        credential: &Credential,
        body: &[u8],
        timestamp_millis: i64,
    ) -> Result<String, SignError>;
}

/// Default keyed-MAC signer: HMAC-SHA256 keyed by `app_secret` over the
/// app id, enterprise code, timestamp and body, newline-delimited.
#[derive(Debug, Default, Clone, Copy)]
pub struct HmacSha256Signer;

impl Signer for HmacSha256Signer {
    fn sign(
        &self,
        credential: &Credential,
        body: &[u8],
        timestamp_millis: i64,
    ) -> Result<String, SignError> {
        credential.check_complete()?;

        let mut mac = HmacSha256::new_from_slice(credential.app_secret.as_bytes())
            .map_err(|_| SignError::IncompleteCredential)?;
        mac.update(credential.app_id.as_bytes());
        mac.update(b"\n");
        mac.update(credential.enterprise_code.as_bytes());
        mac.update(b"\n");
        mac.update(timestamp_millis.to_string().as_bytes());
        mac.update(b"\n");
        mac.update(body);

        Ok(hex::encode(mac.finalize().into_bytes()))
    }
}

/// Current wall-clock time in milliseconds, the timestamp unit the
/// signature contract expects.
pub fn timestamp_millis() -> i64 {
    chrono::Utc::now().timestamp_millis()
}
