//! Recursive field expansion over model schemas.

use serde_json::Value;

use crate::convert::type_token;
use crate::error::SchemaError;
use crate::node::{FieldSpec, RecordRef, SchemaNode};

/// A fully resolved field: the parser-facing shape, built in declaration
/// order and preserved end-to-end into the emitted payload.
#[derive(Debug, Clone)]
pub struct FieldDescriptor {
    pub name: String,
    pub required: bool,
    /// Textual rendering of the declared node, informational only.
    pub raw_type: String,
    pub type_token: String,
    /// Declared default, absent for required fields.
    pub default: Option<Value>,
    pub description: String,
    /// True iff the field's actual type is itself a structured model.
    pub is_nested: bool,
    /// Present only when `is_nested`; authoritative for downstream adapters.
    pub nested_fields: Vec<FieldDescriptor>,
}

/// Expands a model's declared fields into ordered [`FieldDescriptor`]s,
/// recursing into nested records.
pub fn expand_fields(fields: &[FieldSpec]) -> Result<Vec<FieldDescriptor>, SchemaError> {
    expand(fields, &mut Vec::new())
}

/// Expands a record reference, seeding the visited set with the record
/// itself so a direct self-reference is caught at depth one.
pub fn expand_record(record: &RecordRef) -> Result<Vec<FieldDescriptor>, SchemaError> {
    let mut visited = vec![record.name];
    expand(&(record.fields)(), &mut visited)
}

fn expand(
    fields: &[FieldSpec],
    visited: &mut Vec<&'static str>,
) -> Result<Vec<FieldDescriptor>, SchemaError> {
    let mut out = Vec::with_capacity(fields.len());
    for spec in fields {
        out.push(expand_field(spec, visited)?);
    }
    Ok(out)
}

fn expand_field(
    spec: &FieldSpec,
    visited: &mut Vec<&'static str>,
) -> Result<FieldDescriptor, SchemaError> {
    let required = spec.required();
    let token = type_token(&spec.node)?;

    let (is_nested, nested_fields) = match spec.node.as_record() {
        Some(record) => {
            if visited.contains(&record.name) {
                let mut path = visited.clone();
                path.push(record.name);
                return Err(SchemaError::CyclicSchema { path });
            }
            visited.push(record.name);
            let nested = expand(&(record.fields)(), visited)?;
            visited.pop();
            (true, nested)
        }
        None => (false, Vec::new()),
    };

    Ok(FieldDescriptor {
        name: spec.name.clone(),
        required,
        raw_type: spec.node.to_string(),
        type_token: token,
        default: if required { None } else { spec.default.clone() },
        description: spec.description.clone(),
        is_nested,
        nested_fields,
    })
}
