use serde::{Deserialize, Serialize};

/// Paired page URLs for the mobile and desktop renderings of a flow page.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UrlConfig {
    pub h5_url: String,
    pub web_url: String,
}

/// Visibility rule for initiating or managing a flow.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AllowedRule {
    pub allowed_apply_type: String,
}

impl Default for AllowedRule {
    fn default() -> Self {
        Self {
            allowed_apply_type: "all".to_string(),
        }
    }
}

/// Definition of a third-party flow to create on the platform.
///
/// `allowed_apply_terminals` and the two rules may be left empty/`None`;
/// the client fills them with the platform defaults (`["pc", "mobile"]`
/// and allow-all) before sending.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateFlowRequest {
    pub title: String,
    pub initiate_url: UrlConfig,
    pub detail_url: UrlConfig,
    pub category_id: String,
    pub manager_user_code: String,
    pub operation_user_code: String,
    pub config_user_code: String,
    pub create_by: String,
    pub allowed_apply_terminals: Vec<String>,
    pub allowed_apply_rule: Option<AllowedRule>,
    pub allowed_manage_rule: Option<AllowedRule>,
}
