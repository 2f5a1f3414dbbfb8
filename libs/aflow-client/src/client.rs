//! Signed HTTP client for the AFlow workflow API.

use std::sync::Arc;
use std::time::Duration;

use reqwest::header::CONTENT_TYPE;
use serde::{Deserialize, Serialize};
use tracing::debug;

use aflow_core::sign::timestamp_millis;
use aflow_core::{AflowConfig, Credential, HmacSha256Signer, Signer};

use crate::error::ClientError;
use crate::models::{AllowedRule, CreateFlowRequest, Department, SyncTaskRequest, User};

const SIGNATURE_HEADER: &str = "X-A-Signature";
const TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Envelope every workflow API call replies with.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiResponse {
    pub status: i64,
    pub msg: Option<String>,
    pub data: Option<serde_json::Value>,
}

impl ApiResponse {
    pub fn is_success(&self) -> bool {
        self.status == 0
    }
}

/// Workflow API client. Every request body is serialized once to compact
/// JSON, signed over those exact bytes and sent unmodified.
pub struct AflowClient {
    base_url: String,
    credential: Credential,
    signer: Arc<dyn Signer>,
    http: reqwest::Client,
}

impl AflowClient {
    pub fn new(config: &AflowConfig) -> Result<Self, ClientError> {
        Self::with_signer(config, Arc::new(HmacSha256Signer))
    }

    pub fn with_signer(
        config: &AflowConfig,
        signer: Arc<dyn Signer>,
    ) -> Result<Self, ClientError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout))
            .build()?;
        Ok(Self {
            base_url: config.base_domain(),
            credential: config.credential(),
            signer,
            http,
        })
    }

    /// Push department records to the platform directory.
    pub async fn sync_departments(
        &self,
        departments: &[Department],
    ) -> Result<ApiResponse, ClientError> {
        let payload = serde_json::json!({ "departments": departments });
        self.post_signed("/aflow/api/sys/sync/department", &payload)
            .await
    }

    /// Push user records to the platform directory.
    pub async fn sync_users(&self, users: &[User]) -> Result<ApiResponse, ClientError> {
        let payload = serde_json::json!({ "users": users });
        self.post_signed("/aflow/api/sys/sync/user", &payload).await
    }

    /// Bind a host-system user code to a platform account. The link code
    /// is omitted from the payload when absent.
    pub async fn bind_user(
        &self,
        custom_user_code: &str,
        link_user_code: Option<&str>,
    ) -> Result<ApiResponse, ClientError> {
        let mut payload = serde_json::json!({ "customUserCode": custom_user_code });
        if let Some(code) = link_user_code {
            payload["linkUserCode"] = serde_json::Value::String(code.to_string());
        }
        self.post_signed("/aflow/api/auth/bind", &payload).await
    }

    /// Create a third-party flow definition. Unset terminals and rules
    /// take the platform defaults before the request is signed.
    pub async fn create_third_party_flow(
        &self,
        mut request: CreateFlowRequest,
    ) -> Result<ApiResponse, ClientError> {
        if request.allowed_apply_terminals.is_empty() {
            request.allowed_apply_terminals = vec!["pc".to_string(), "mobile".to_string()];
        }
        request.allowed_apply_rule.get_or_insert_with(AllowedRule::default);
        request.allowed_manage_rule.get_or_insert_with(AllowedRule::default);
        self.post_signed("/aflow/api/flow/create_third_party", &request)
            .await
    }

    /// Publish a previously created third-party flow version.
    pub async fn online_third_party_flow(
        &self,
        flow_code: &str,
        flow_version: i64,
        update_desc: &str,
    ) -> Result<ApiResponse, ClientError> {
        let payload = serde_json::json!({
            "flowCode": flow_code,
            "flowVersion": flow_version,
            "updateDesc": update_desc,
        });
        self.post_signed("/aflow/api/flow/online_third_party", &payload)
            .await
    }

    /// Push order and task state. Missing timestamps are stamped with the
    /// current local time.
    pub async fn sync_task(
        &self,
        mut request: SyncTaskRequest,
    ) -> Result<ApiResponse, ClientError> {
        let now = chrono::Local::now().format(TIME_FORMAT).to_string();
        request.create_time.get_or_insert_with(|| now.clone());
        request.update_time.get_or_insert(now);
        self.post_signed("/aflow/api/order/sync/task", &request).await
    }

    async fn post_signed<T: Serialize + ?Sized>(
        &self,
        endpoint: &str,
        payload: &T,
    ) -> Result<ApiResponse, ClientError> {
        // Signing input and request body are the same string.
        let body = serde_json::to_string(payload)?;
        let signature = self
            .signer
            .sign(&self.credential, body.as_bytes(), timestamp_millis())?;

        let url = format!("{}{}", self.base_url, endpoint);
        debug!(%url, "posting signed workflow request");
        let response = self
            .http
            .post(&url)
            .header(CONTENT_TYPE, "application/json")
            .header(SIGNATURE_HEADER, signature)
            .body(body)
            .send()
            .await?;

        let status = response.status();
        let text = response.text().await?;
        if !status.is_success() {
            return Err(ClientError::Status {
                code: status.as_u16(),
                body: text,
            });
        }
        Ok(serde_json::from_str(&text)?)
    }
}
