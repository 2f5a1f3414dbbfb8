//! Canonical type-token conversion.

use crate::error::SchemaError;
use crate::node::SchemaNode;

/// Maps a [`SchemaNode`] to its canonical wire token.
///
/// Optionality is not encoded in the token (it is carried by the field's
/// `required` flag), sets collapse to the list representation, and bare
/// container references map to `array`/`record` exactly like the original
/// wire contract. [`SchemaNode::Opaque`] always fails conversion.
pub fn type_token(node: &SchemaNode) -> Result<String, SchemaError> {
    let token = match node {
        SchemaNode::String => "string".to_string(),
        SchemaNode::Long => "long".to_string(),
        SchemaNode::Double => "double".to_string(),
        SchemaNode::Boolean => "boolean".to_string(),
        SchemaNode::Any => "any".to_string(),
        SchemaNode::Optional(inner) => type_token(inner)?,
        SchemaNode::List(item) | SchemaNode::Set(item) => {
            format!("list[{}]", type_token(item)?)
        }
        SchemaNode::Map(key, value) => {
            format!("dict[{}, {}]", type_token(key)?, type_token(value)?)
        }
        SchemaNode::BareList | SchemaNode::BareSet => "array".to_string(),
        SchemaNode::BareMap => "record".to_string(),
        SchemaNode::Record(_) => "record".to_string(),
        SchemaNode::Opaque(name) => return Err(SchemaError::UnsupportedType { name }),
    };
    Ok(token)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::node::{FieldSpec, ModelSchema};

    #[test]
    fn primitive_tokens() {
        assert_eq!(type_token(&SchemaNode::String).unwrap(), "string");
        assert_eq!(type_token(&SchemaNode::Long).unwrap(), "long");
        assert_eq!(type_token(&SchemaNode::Double).unwrap(), "double");
        assert_eq!(type_token(&SchemaNode::Boolean).unwrap(), "boolean");
        assert_eq!(type_token(&SchemaNode::Any).unwrap(), "any");
    }

    #[test]
    fn optional_yields_inner_token() {
        // Nullability is carried by the required flag, not the token.
        let node = SchemaNode::optional(SchemaNode::Long);
        assert_eq!(type_token(&node).unwrap(), "long");
    }

    #[test]
    fn containers_are_parameterized() {
        assert_eq!(
            type_token(&SchemaNode::list(SchemaNode::String)).unwrap(),
            "list[string]"
        );
        assert_eq!(
            type_token(&SchemaNode::list(SchemaNode::Any)).unwrap(),
            "list[any]"
        );
        assert_eq!(
            type_token(&SchemaNode::map(SchemaNode::String, SchemaNode::Any)).unwrap(),
            "dict[string, any]"
        );
        assert_eq!(
            type_token(&SchemaNode::list(SchemaNode::list(SchemaNode::Long))).unwrap(),
            "list[list[long]]"
        );
    }

    #[test]
    fn sets_collapse_to_list_representation() {
        assert_eq!(
            type_token(&SchemaNode::set(SchemaNode::String)).unwrap(),
            "list[string]"
        );
    }

    #[test]
    fn bare_containers_match_class_reference_mapping() {
        assert_eq!(type_token(&SchemaNode::BareList).unwrap(), "array");
        assert_eq!(type_token(&SchemaNode::BareSet).unwrap(), "array");
        assert_eq!(type_token(&SchemaNode::BareMap).unwrap(), "record");
    }

    #[test]
    fn records_map_to_record() {
        struct Empty;
        impl ModelSchema for Empty {
            const NAME: &'static str = "Empty";
            fn fields() -> Vec<FieldSpec> {
                Vec::new()
            }
        }
        assert_eq!(type_token(&SchemaNode::record::<Empty>()).unwrap(), "record");
    }

    #[test]
    fn opaque_type_is_a_hard_failure() {
        let err = type_token(&SchemaNode::Opaque("datetime")).unwrap_err();
        match err {
            SchemaError::UnsupportedType { name } => assert_eq!(name, "datetime"),
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
