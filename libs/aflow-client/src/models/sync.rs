use serde::{Deserialize, Serialize};

use aflow_schema::{FieldSpec, ModelSchema, SchemaNode};

/// Organizational unit pushed to the platform directory.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Department {
    pub dept_id: String,
    pub dept_name: String,
    /// Sort position within the parent department.
    pub order_num: i64,
    /// 1 enabled, 0 disabled.
    pub status: i64,
}

impl ModelSchema for Department {
    const NAME: &'static str = "Department";

    fn fields() -> Vec<FieldSpec> {
        vec![
            FieldSpec::new("deptId", SchemaNode::String).doc("Department id"),
            FieldSpec::new("deptName", SchemaNode::String).doc("Department name"),
            FieldSpec::new("orderNum", SchemaNode::Long).doc("Sort position"),
            FieldSpec::new("status", SchemaNode::Long).doc("1 enabled, 0 disabled"),
        ]
    }
}

/// Directory account pushed to the platform directory.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub user_id: String,
    pub user_name: String,
    pub real_name: String,
    pub email: String,
    pub dept_id: String,
    pub personnel_type: i64,
    pub direct_supervisor: String,
    /// 1 enabled, 0 disabled.
    pub status: i64,
}

impl ModelSchema for User {
    const NAME: &'static str = "User";

    fn fields() -> Vec<FieldSpec> {
        vec![
            FieldSpec::new("userId", SchemaNode::String).doc("User id"),
            FieldSpec::new("userName", SchemaNode::String).doc("Login name"),
            FieldSpec::new("realName", SchemaNode::String).doc("Display name"),
            FieldSpec::new("email", SchemaNode::String).doc("Email address"),
            FieldSpec::new("deptId", SchemaNode::String).doc("Owning department id"),
            FieldSpec::new("personnelType", SchemaNode::Long).doc("Personnel type"),
            FieldSpec::new("directSupervisor", SchemaNode::String).doc("Supervisor user id"),
            FieldSpec::new("status", SchemaNode::Long).doc("1 enabled, 0 disabled"),
        ]
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SyncFailDetail {
    pub code: String,
    pub message: String,
}

impl ModelSchema for SyncFailDetail {
    const NAME: &'static str = "SyncFailDetail";

    fn fields() -> Vec<FieldSpec> {
        vec![
            FieldSpec::new("code", SchemaNode::String).doc("Error code"),
            FieldSpec::new("message", SchemaNode::String).doc("Error message"),
        ]
    }
}

/// Outcome of a directory synchronization call.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SyncResult {
    pub success_count: i64,
    pub fail_count: i64,
    pub fail_details: Vec<SyncFailDetail>,
}

impl ModelSchema for SyncResult {
    const NAME: &'static str = "SyncResult";

    fn fields() -> Vec<FieldSpec> {
        vec![
            FieldSpec::new("successCount", SchemaNode::Long).doc("Successful rows"),
            FieldSpec::new("failCount", SchemaNode::Long).doc("Failed rows"),
            FieldSpec::new(
                "failDetails",
                SchemaNode::list(SchemaNode::record::<SyncFailDetail>()),
            )
            .doc("Per-row failure details"),
        ]
    }
}
