use thiserror::Error;

use aflow_core::SignError;

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("request transport failed")]
    Transport(#[from] reqwest::Error),

    #[error("API call failed with HTTP {code}: {body}")]
    Status { code: u16, body: String },

    #[error("request signing failed")]
    Signing(#[from] SignError),

    #[error("payload serialization failed")]
    Json(#[from] serde_json::Error),
}
