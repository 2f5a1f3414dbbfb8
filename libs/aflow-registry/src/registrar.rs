//! Service registrar: reports discovered interfaces to the central
//! registry over signed HTTP calls.

use std::sync::Arc;
use std::time::Duration;

use reqwest::header::CONTENT_TYPE;
use serde::{Deserialize, Serialize};
use tracing::{debug, error, info, warn};

use aflow_core::sign::timestamp_millis;
use aflow_core::{AflowConfig, Credential, HmacSha256Signer, Signer};
use aflow_schema::adapt_all;

use crate::error::RegistryError;
use crate::parser::InterfaceDescriptor;
use crate::scanner::InterfaceScanner;
use crate::table::RouteTable;

const REGISTER_ENDPOINT: &str = "/aflow/api/center/register";
const SIGNATURE_HEADER: &str = "X-A-Signature";
const SERVICE_TYPE_HTTP: &str = "HTTP";

/// Retry policy for background registration.
#[derive(Debug, Clone)]
pub struct RegistrarOptions {
    /// Total attempts per package in async mode.
    pub max_retries: u32,
    /// Delay between attempts.
    pub retry_delay: Duration,
}

impl Default for RegistrarOptions {
    fn default() -> Self {
        Self {
            max_retries: 3,
            retry_delay: Duration::from_secs(5),
        }
    }
}

/// One wire entry of the registration batch.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
struct RegistrationEntry {
    name: String,
    /// URL path of the interface.
    service_name: String,
    description: String,
    method_type: String,
    /// Adapted parameter schema, serialized to a compact JSON string.
    req_param_schema: String,
    /// Adapted return-type schema, serialized to a compact JSON string.
    resp_param_schema: String,
    app_name: String,
    app_cn_name: String,
    ip: String,
    host_name: String,
    // camelCase keeps this exactly "aserviceType", which the registry
    // requires to map onto its service-type enum.
    aservice_type: &'static str,
}

#[derive(Debug, Deserialize)]
struct RegisterReply {
    status: i64,
}

/// Registers a host application's interfaces with the AFlow registry.
///
/// Configuration is read once at construction and immutable afterwards, so
/// a registrar can be shared freely between the synchronous and background
/// paths. Terminal failures are logged, never returned, from the
/// outward-facing entry points ([`start`](Self::start) and
/// [`run_blocking`](Self::run_blocking)).
pub struct ServiceRegistrar {
    base_url: String,
    app_name: String,
    app_cn_name: String,
    ip: String,
    host_name: String,
    credential: Credential,
    signer: Arc<dyn Signer>,
    http: reqwest::Client,
    table: Arc<RouteTable>,
    options: RegistrarOptions,
}

impl ServiceRegistrar {
    /// Registrar with the default pluggable signer.
    pub fn new(config: &AflowConfig, table: Arc<RouteTable>) -> Result<Self, RegistryError> {
        Self::with_signer(config, table, Arc::new(HmacSha256Signer))
    }

    pub fn with_signer(
        config: &AflowConfig,
        table: Arc<RouteTable>,
        signer: Arc<dyn Signer>,
    ) -> Result<Self, RegistryError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout))
            .build()?;

        Ok(Self {
            base_url: format!("{}{}", config.base_domain(), REGISTER_ENDPOINT),
            app_name: config.app_name.clone(),
            app_cn_name: config.app_cn_name.clone(),
            ip: local_ip(),
            host_name: host_name(),
            credential: config.credential(),
            signer,
            http,
            table,
            options: RegistrarOptions::default(),
        })
    }

    pub fn options(mut self, options: RegistrarOptions) -> Self {
        self.options = options;
        self
    }

    /// Asynchronous mode: registers all packages on one supervised
    /// background task and returns immediately.
    ///
    /// Dropping the handle detaches the task (fire-and-forget, the
    /// default); `handle.wait().await` optionally awaits completion. The
    /// task itself never fails the host: every outcome is logged.
    pub fn start(self: &Arc<Self>, packages: Vec<String>) -> RegistrationHandle {
        let registrar = Arc::clone(self);
        let task = tokio::spawn(async move {
            registrar.register_with_retry(&packages).await;
        });
        RegistrationHandle { task }
    }

    /// Synchronous mode: one registration cycle on the caller's task.
    ///
    /// A failure for one package is logged and does not block the
    /// remaining packages. No retries.
    pub async fn run_blocking(&self, packages: &[String]) {
        let scanner = InterfaceScanner::new(&self.table);
        for package in packages {
            let interfaces = scanner.scan(package);
            if let Err(e) = self.register(&interfaces).await {
                error!(package, error = %e, "registration failed");
            }
        }
    }

    // Packages are processed sequentially; each is scanned once and its
    // registration retried independently up to max_retries attempts.
    async fn register_with_retry(&self, packages: &[String]) {
        let scanner = InterfaceScanner::new(&self.table);
        for package in packages {
            let interfaces = scanner.scan(package);
            for attempt in 1..=self.options.max_retries {
                match self.register(&interfaces).await {
                    Ok(()) => break,
                    Err(e) if attempt == self.options.max_retries => {
                        error!(
                            package,
                            error = %e,
                            attempts = self.options.max_retries,
                            "service registration failed after final attempt"
                        );
                    }
                    Err(e) => {
                        warn!(
                            package,
                            attempt,
                            error = %e,
                            retry_in = ?self.options.retry_delay,
                            "service registration attempt failed, retrying"
                        );
                        tokio::time::sleep(self.options.retry_delay).await;
                    }
                }
            }
        }
    }

    /// One registration call: build the batch, sign the exact bytes that
    /// will be transmitted, POST them.
    #[tracing::instrument(skip_all, fields(interfaces = interfaces.len()))]
    pub async fn register(&self, interfaces: &[InterfaceDescriptor]) -> Result<(), RegistryError> {
        let entries: Vec<RegistrationEntry> = interfaces
            .iter()
            .map(|descriptor| self.build_entry(descriptor))
            .collect::<Result<_, _>>()?;

        // This string is both the signing input and the request body; any
        // re-serialization in between would invalidate the signature.
        let body = serde_json::to_string(&entries)?;
        let signature = self
            .signer
            .sign(&self.credential, body.as_bytes(), timestamp_millis())?;

        debug!(url = %self.base_url, entries = entries.len(), "posting registration batch");
        let response = self
            .http
            .post(&self.base_url)
            .header(CONTENT_TYPE, "application/json")
            .header(SIGNATURE_HEADER, signature)
            .body(body)
            .send()
            .await?;

        let status = response.status();
        let text = response.text().await?;
        if !status.is_success() {
            return Err(RegistryError::HttpStatus {
                status: status.as_u16(),
                body: text,
            });
        }

        let reply: RegisterReply = serde_json::from_str(&text)?;
        if reply.status != 0 {
            return Err(RegistryError::Rejected {
                status: reply.status,
                msg: text,
            });
        }

        info!(app = %self.app_name, "service registered with the AFlow registry");
        Ok(())
    }

    fn build_entry(
        &self,
        descriptor: &InterfaceDescriptor,
    ) -> Result<RegistrationEntry, RegistryError> {
        let req_schema = serde_json::to_string(&adapt_all(&descriptor.parameters))?;
        let resp_fields = descriptor.return_info.fields.as_deref().unwrap_or(&[]);
        let resp_schema = serde_json::to_string(&adapt_all(resp_fields))?;

        Ok(RegistrationEntry {
            name: descriptor.name.clone(),
            service_name: descriptor.path.clone(),
            description: descriptor.description.clone(),
            method_type: descriptor.http_method.as_str().to_uppercase(),
            req_param_schema: req_schema,
            resp_param_schema: resp_schema,
            app_name: self.app_name.clone(),
            app_cn_name: self.app_cn_name.clone(),
            ip: self.ip.clone(),
            host_name: self.host_name.clone(),
            aservice_type: SERVICE_TYPE_HTTP,
        })
    }
}

/// Completion handle for a background registration run.
pub struct RegistrationHandle {
    task: tokio::task::JoinHandle<()>,
}

impl RegistrationHandle {
    /// Await completion of the background run.
    pub async fn wait(self) {
        if let Err(e) = self.task.await {
            error!(error = %e, "background registration task aborted");
        }
    }

    /// Explicitly detach; equivalent to dropping the handle.
    pub fn detach(self) {}
}

// Selects the outbound interface address; connect() on a UDP socket sends
// no packets.
fn local_ip() -> String {
    std::net::UdpSocket::bind("0.0.0.0:0")
        .and_then(|socket| {
            socket.connect("8.8.8.8:80")?;
            socket.local_addr()
        })
        .map(|addr| addr.ip().to_string())
        .unwrap_or_else(|_| "127.0.0.1".to_string())
}

fn host_name() -> String {
    hostname::get()
        .ok()
        .and_then(|name| name.into_string().ok())
        .unwrap_or_else(|| "localhost".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::route::RouteRegistration;
    use crate::table::RouteTableBuilder;
    use aflow_core::SignError;
    use aflow_schema::{FieldSpec, ModelSchema, SchemaNode};
    use httpmock::prelude::*;
    use std::sync::Mutex;

    struct DeptSyncRequest;
    impl ModelSchema for DeptSyncRequest {
        const NAME: &'static str = "DeptSyncRequest";
        fn fields() -> Vec<FieldSpec> {
            vec![
                FieldSpec::new("deptId", SchemaNode::String).doc("Department id"),
                FieldSpec::new("tags", SchemaNode::optional(SchemaNode::list(SchemaNode::String))),
            ]
        }
    }

    struct SyncResult;
    impl ModelSchema for SyncResult {
        const NAME: &'static str = "SyncResult";
        fn fields() -> Vec<FieldSpec> {
            vec![FieldSpec::new("successCount", SchemaNode::Long)]
        }
    }

    /// Records every signed body and returns a fixed signature.
    struct CapturingSigner {
        bodies: Mutex<Vec<Vec<u8>>>,
    }

    impl CapturingSigner {
        fn new() -> Arc<Self> {
            Arc::new(Self {
                bodies: Mutex::new(Vec::new()),
            })
        }
    }

    impl Signer for CapturingSigner {
        fn sign(
            &self,
            _credential: &Credential,
            body: &[u8],
            _timestamp_millis: i64,
        ) -> Result<String, SignError> {
            self.bodies.lock().unwrap().push(body.to_vec());
            Ok("stub-signature".to_string())
        }
    }

    fn table() -> Arc<RouteTable> {
        let mut b = RouteTableBuilder::default();
        b.register_route(
            "erp.sync",
            RouteRegistration::post("/sync/department")
                .name("sync_department")
                .description("Synchronize department data")
                .model::<DeptSyncRequest>()
                .returns::<SyncResult>(),
        );
        Arc::new(b.build().unwrap())
    }

    fn config(base_url: &str) -> AflowConfig {
        AflowConfig {
            aiflow_domain: base_url.to_string(),
            app_name: "erp".to_string(),
            app_cn_name: "ERP".to_string(),
            app_id: "app-1".to_string(),
            app_secret: "secret".to_string(),
            enterprise_code: "acme".to_string(),
            timeout: 5,
            ..Default::default()
        }
    }

    fn fast_options(max_retries: u32) -> RegistrarOptions {
        RegistrarOptions {
            max_retries,
            retry_delay: Duration::from_millis(10),
        }
    }

    #[tokio::test]
    async fn registration_posts_signed_compact_batch() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(POST)
                    .path("/aflow/api/center/register")
                    .header("content-type", "application/json")
                    .header("x-a-signature", "stub-signature");
                then.status(200).json_body(serde_json::json!({ "status": 0 }));
            })
            .await;

        let signer = CapturingSigner::new();
        let registrar =
            ServiceRegistrar::with_signer(&config(&server.base_url()), table(), signer.clone())
                .unwrap();

        registrar.run_blocking(&["erp.sync".to_string()]).await;
        mock.assert_async().await;

        // The signed body is the transmitted body: one compact JSON array.
        let bodies = signer.bodies.lock().unwrap();
        assert_eq!(bodies.len(), 1);
        let body = String::from_utf8(bodies[0].clone()).unwrap();
        assert!(!body.contains("\": "), "body must be compact: {body}");

        let batch: serde_json::Value = serde_json::from_str(&body).unwrap();
        let entry = &batch[0];
        assert_eq!(entry["name"], "sync_department");
        assert_eq!(entry["serviceName"], "/sync/department");
        assert_eq!(entry["methodType"], "POST");
        assert_eq!(entry["aserviceType"], "HTTP");
        assert_eq!(entry["appName"], "erp");
        assert_eq!(entry["appCnName"], "ERP");

        // Schemas are JSON strings, not inline arrays.
        let req_schema: Vec<serde_json::Value> =
            serde_json::from_str(entry["reqParamSchema"].as_str().unwrap()).unwrap();
        assert_eq!(req_schema[0]["fieldName"], "deptId");
        assert_eq!(req_schema[0]["type"], "string");
        assert_eq!(req_schema[0]["required"], true);
        assert_eq!(req_schema[1]["type"], "array");
        assert_eq!(req_schema[1]["itemType"], "string");

        let resp_schema: Vec<serde_json::Value> =
            serde_json::from_str(entry["respParamSchema"].as_str().unwrap()).unwrap();
        assert_eq!(resp_schema[0]["fieldName"], "successCount");
        assert_eq!(resp_schema[0]["type"], "long");
    }

    #[tokio::test]
    async fn embedded_error_status_is_a_failure() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(POST).path("/aflow/api/center/register");
                then.status(200)
                    .json_body(serde_json::json!({ "status": 1, "msg": "bad app" }));
            })
            .await;

        let registrar = ServiceRegistrar::with_signer(
            &config(&server.base_url()),
            table(),
            CapturingSigner::new(),
        )
        .unwrap();

        let scanner = InterfaceScanner::new(&registrar.table);
        let interfaces = scanner.scan("erp.sync");
        match registrar.register(&interfaces).await {
            Err(RegistryError::Rejected { status, .. }) => assert_eq!(status, 1),
            other => panic!("expected Rejected, got: {other:?}"),
        }
    }

    #[tokio::test]
    async fn always_failing_target_is_attempted_exactly_max_retries_times() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(POST).path("/aflow/api/center/register");
                then.status(500).body("boom");
            })
            .await;

        let registrar = Arc::new(
            ServiceRegistrar::with_signer(
                &config(&server.base_url()),
                table(),
                CapturingSigner::new(),
            )
            .unwrap()
            .options(fast_options(3)),
        );

        let handle = registrar.start(vec!["erp.sync".to_string()]);
        handle.wait().await;

        assert_eq!(mock.hits_async().await, 3);
    }

    #[tokio::test]
    async fn successful_attempt_stops_retrying() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(POST).path("/aflow/api/center/register");
                then.status(200).json_body(serde_json::json!({ "status": 0 }));
            })
            .await;

        let registrar = Arc::new(
            ServiceRegistrar::with_signer(
                &config(&server.base_url()),
                table(),
                CapturingSigner::new(),
            )
            .unwrap()
            .options(fast_options(3)),
        );

        registrar.start(vec!["erp.sync".to_string()]).wait().await;
        assert_eq!(mock.hits_async().await, 1);
    }

    #[tokio::test]
    async fn sync_mode_continues_after_package_failure() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(POST).path("/aflow/api/center/register");
                then.status(500).body("boom");
            })
            .await;

        let mut b = RouteTableBuilder::default();
        b.register_route("first", RouteRegistration::post("/a").model::<DeptSyncRequest>());
        b.register_route("second", RouteRegistration::post("/b").model::<DeptSyncRequest>());
        let table = Arc::new(b.build().unwrap());

        let registrar = ServiceRegistrar::with_signer(
            &config(&server.base_url()),
            table,
            CapturingSigner::new(),
        )
        .unwrap();

        registrar
            .run_blocking(&["first".to_string(), "second".to_string()])
            .await;

        // One POST per package despite the first failing; no retries in sync mode.
        assert_eq!(mock.hits_async().await, 2);
    }
}
