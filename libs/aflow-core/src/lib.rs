//! Shared foundation for the AFlow client SDK: environment-sourced
//! configuration, the signing credential and the request signer seam.

pub mod config;
pub mod sign;

pub use config::{AflowConfig, ConfigError};
pub use sign::{timestamp_millis, Credential, HmacSha256Signer, SignError, Signer};
