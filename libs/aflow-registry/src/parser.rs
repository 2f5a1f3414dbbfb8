//! Turns a registered route plus its bound model into an interface
//! descriptor ready for the field adapter.

use http::Method;

use aflow_schema::{expand_record, type_token, FieldDescriptor, RecordRef, SchemaNode};

use crate::error::RegistryError;
use crate::route::RegisteredRoute;

/// One discovered interface. Built fresh on every scan, never cached.
#[derive(Debug, Clone)]
pub struct InterfaceDescriptor {
    pub name: String,
    pub package_path: String,
    pub description: String,
    pub http_method: Method,
    pub path: String,
    /// Declaration order, preserved end-to-end into the emitted payload.
    pub parameters: Vec<FieldDescriptor>,
    pub return_info: ReturnInfo,
    pub model_name: String,
}

/// Resolved return-type information.
#[derive(Debug, Clone)]
pub struct ReturnInfo {
    /// `void` when the route declares no return schema.
    pub type_token: String,
    pub raw_type: Option<String>,
    /// Present when the return type is itself a structured model.
    pub fields: Option<Vec<FieldDescriptor>>,
    /// Present when the return type is a container whose first model-typed
    /// argument was expanded.
    pub item_fields: Option<Vec<FieldDescriptor>>,
}

impl ReturnInfo {
    fn void() -> Self {
        ReturnInfo {
            type_token: "void".to_string(),
            raw_type: None,
            fields: None,
            item_fields: None,
        }
    }
}

/// Parses one table entry into an [`InterfaceDescriptor`].
///
/// Fails with [`RegistryError::MissingBinding`] when the route has no bound
/// model, and with a schema error when the model graph cannot be expanded.
pub fn parse(route: &RegisteredRoute, package: &str) -> Result<InterfaceDescriptor, RegistryError> {
    let model = route.model.as_ref().ok_or_else(|| RegistryError::MissingBinding {
        route: route.route.name.clone(),
    })?;

    let parameters = expand_record(model)?;
    let return_info = extract_return_info(route.returns.as_ref())?;

    Ok(InterfaceDescriptor {
        name: route.route.name.clone(),
        package_path: package.to_string(),
        description: route.route.description.clone(),
        http_method: route.route.method.clone(),
        path: route.route.path.clone(),
        parameters,
        return_info,
        model_name: model.name.to_string(),
    })
}

fn extract_return_info(node: Option<&SchemaNode>) -> Result<ReturnInfo, RegistryError> {
    let Some(node) = node else {
        return Ok(ReturnInfo::void());
    };

    let mut info = ReturnInfo {
        type_token: type_token(node)?,
        raw_type: Some(node.to_string()),
        fields: None,
        item_fields: None,
    };

    if let SchemaNode::Record(record) = node {
        info.fields = Some(expand_record(record)?);
    } else if let Some(record) = first_record_argument(node) {
        info.item_fields = Some(expand_record(record)?);
    }

    Ok(info)
}

// First structured model among the node's type arguments; for mappings the
// key argument is checked before the value.
fn first_record_argument(node: &SchemaNode) -> Option<&RecordRef> {
    match node {
        SchemaNode::Optional(inner) | SchemaNode::List(inner) | SchemaNode::Set(inner) => {
            record_of(inner)
        }
        SchemaNode::Map(key, value) => record_of(key).or_else(|| record_of(value)),
        _ => None,
    }
}

fn record_of(node: &SchemaNode) -> Option<&RecordRef> {
    match node {
        SchemaNode::Record(record) => Some(record),
        _ => None,
    }
}
