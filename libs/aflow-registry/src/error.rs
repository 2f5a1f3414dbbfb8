use thiserror::Error;

use aflow_core::SignError;
use aflow_schema::SchemaError;

/// Structured errors for route parsing and service registration.
#[derive(Debug, Error)]
pub enum RegistryError {
    /// A route declared in the table without a usable parameter model.
    /// Fatal to that route only; the scanner skips it.
    #[error("route '{route}' has no bound parameter model")]
    MissingBinding { route: String },

    #[error("schema extraction failed")]
    Schema(#[from] SchemaError),

    #[error("invalid route table configuration:\n{errors:#?}")]
    InvalidTableConfiguration { errors: Vec<String> },

    #[error("failed to serialize registration payload")]
    Serialize(#[from] serde_json::Error),

    #[error("request signing failed")]
    Signing(#[from] SignError),

    #[error("transport error while calling the registry")]
    Transport(#[from] reqwest::Error),

    #[error("registry returned HTTP {status}: {body}")]
    HttpStatus { status: u16, body: String },

    /// HTTP 200 but the embedded status code was non-zero.
    #[error("registry rejected the registration batch (status {status}): {msg}")]
    Rejected { status: i64, msg: String },
}
