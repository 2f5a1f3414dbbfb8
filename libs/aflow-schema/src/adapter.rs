//! Transforms parser field descriptors into the registry's wire schema.

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::field::FieldDescriptor;

// First bracketed type parameter of a canonical token, non-greedy.
static ITEM_TYPE_RE: LazyLock<Option<Regex>> = LazyLock::new(|| Regex::new(r"\[(.*?)\]").ok());

/// One field in the shape the remote registry expects.
///
/// `itemType` is present only for array fields, `childrenFields` only for
/// record fields; all other fields carry just the flat quadruple.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WireField {
    pub field_name: String,
    #[serde(rename = "type")]
    pub field_type: String,
    pub required: bool,
    pub doc: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub item_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub children_fields: Option<Vec<WireField>>,
}

/// Adapts a single field descriptor to its wire form.
///
/// Termination is guaranteed by expansion: descriptors come out of
/// `expand_fields`, which rejects cyclic model graphs before any adapter
/// sees them.
pub fn adapt(field: &FieldDescriptor) -> WireField {
    if field.is_nested {
        return WireField {
            field_name: field.name.clone(),
            field_type: "record".to_string(),
            required: field.required,
            doc: field.description.clone(),
            item_type: None,
            children_fields: Some(field.nested_fields.iter().map(adapt).collect()),
        };
    }

    if field.type_token.starts_with("list") || field.type_token.starts_with("array") {
        return WireField {
            field_name: field.name.clone(),
            field_type: "array".to_string(),
            required: field.required,
            doc: field.description.clone(),
            item_type: Some(extract_item_type(&field.type_token)),
            children_fields: None,
        };
    }

    WireField {
        field_name: field.name.clone(),
        field_type: field.type_token.clone(),
        required: field.required,
        doc: field.description.clone(),
        item_type: None,
        children_fields: None,
    }
}

pub fn adapt_all(fields: &[FieldDescriptor]) -> Vec<WireField> {
    fields.iter().map(adapt).collect()
}

/// Pulls the bracketed item type out of a `list[...]` token.
///
/// No bracket content defaults to `any`; failure of the extraction
/// machinery itself defaults to `string`. The asymmetry is part of the
/// wire contract and kept as-is.
fn extract_item_type(token: &str) -> String {
    match ITEM_TYPE_RE.as_ref() {
        Some(re) => re
            .captures(token)
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str().to_string())
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| "any".to_string()),
        None => "string".to_string(),
    }
}
