use serde::{Deserialize, Serialize};

/// Third-party order id; the platform accepts either form.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum OrderId {
    Number(i64),
    Text(String),
}

impl From<i64> for OrderId {
    fn from(id: i64) -> Self {
        Self::Number(id)
    }
}

impl From<&str> for OrderId {
    fn from(id: &str) -> Self {
        Self::Text(id.to_string())
    }
}

impl From<String> for OrderId {
    fn from(id: String) -> Self {
        Self::Text(id)
    }
}

/// One pending or completed task within an order.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskInfo {
    pub third_task_id: String,
    pub task_name: String,
    pub assignee_user_code: Vec<String>,
    pub task_status: String,
    pub task_result: String,
    /// `%Y-%m-%d %H:%M:%S`.
    pub dead_line: String,
    pub node_type: String,
    pub show_pc: bool,
    pub show_mobile: bool,
}

/// Carbon-copy recipient of an order.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CcUser {
    pub user_code: String,
    /// `%Y-%m-%d %H:%M:%S`.
    pub cc_time: String,
}

/// Order state pushed to the platform.
///
/// `create_time` and `update_time` may be left `None`; the client stamps
/// them with the current local time before sending. `cc_users` and
/// `tasks` default to empty lists.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SyncTaskRequest {
    pub third_order_id: OrderId,
    pub order_status: String,
    pub order_result: String,
    pub initiator: String,
    pub version: i64,
    pub business_key: String,
    pub create_time: Option<String>,
    pub update_time: Option<String>,
    pub cc_users: Vec<CcUser>,
    pub tasks: Vec<TaskInfo>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn order_id_serializes_either_form() {
        assert_eq!(
            serde_json::to_string(&OrderId::from(123456)).unwrap(),
            "123456"
        );
        assert_eq!(
            serde_json::to_string(&OrderId::from("ORD-1")).unwrap(),
            "\"ORD-1\""
        );
    }
}
