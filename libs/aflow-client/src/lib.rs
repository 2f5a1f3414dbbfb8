//! Typed HTTP client for the AFlow workflow platform: directory
//! synchronization, user binding, third-party flow lifecycle and order
//! state push, with every request body signed.

pub mod client;
pub mod error;
pub mod models;

pub use client::{AflowClient, ApiResponse};
pub use error::ClientError;
pub use models::{
    AllowedRule, CcUser, CreateFlowRequest, Department, OrderId, SyncFailDetail, SyncResult,
    SyncTaskRequest, TaskInfo, UrlConfig, User,
};
