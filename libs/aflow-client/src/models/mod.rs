//! Wire models for the AFlow workflow API. All structs serialize to the
//! camelCase names the platform expects.

mod flow;
mod sync;
mod task;

pub use flow::{AllowedRule, CreateFlowRequest, UrlConfig};
pub use sync::{Department, SyncFailDetail, SyncResult, User};
pub use task::{CcUser, OrderId, SyncTaskRequest, TaskInfo};
