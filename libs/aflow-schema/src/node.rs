use std::fmt;

/// Closed, tagged description of a field's type.
///
/// This replaces runtime type introspection: a model states its shape
/// explicitly and every downstream step is a structural match over the
/// variants. Nullability is expressed by wrapping in [`SchemaNode::Optional`]
/// and surfaces as the field's `required` flag, never in the type token.
#[derive(Debug, Clone)]
pub enum SchemaNode {
    /// Text.
    String,
    /// Integer; maps to the registry's `long`.
    Long,
    /// Floating point; maps to the registry's `double`.
    Double,
    Boolean,
    /// Untyped value.
    Any,
    /// Nullable wrapper around the actual type.
    Optional(Box<SchemaNode>),
    /// Homogeneous sequence.
    List(Box<SchemaNode>),
    /// Sets are wire-indistinguishable from lists.
    Set(Box<SchemaNode>),
    /// Keyed mapping.
    Map(Box<SchemaNode>, Box<SchemaNode>),
    /// A bare `list` class reference with no element type.
    BareList,
    /// A bare `set` class reference with no element type.
    BareSet,
    /// A bare `dict` class reference with no key/value types.
    BareMap,
    /// A nested structured model.
    Record(RecordRef),
    /// A host type with no schema mapping; conversion fails on it.
    Opaque(&'static str),
}

impl SchemaNode {
    pub fn optional(inner: SchemaNode) -> Self {
        SchemaNode::Optional(Box::new(inner))
    }

    pub fn list(item: SchemaNode) -> Self {
        SchemaNode::List(Box::new(item))
    }

    pub fn set(item: SchemaNode) -> Self {
        SchemaNode::Set(Box::new(item))
    }

    pub fn map(key: SchemaNode, value: SchemaNode) -> Self {
        SchemaNode::Map(Box::new(key), Box::new(value))
    }

    /// Reference to a structured model's schema.
    pub fn record<M: ModelSchema>() -> Self {
        SchemaNode::Record(RecordRef::of::<M>())
    }

    /// Strips one layer of `Optional`, yielding the field's actual type.
    pub fn actual(&self) -> &SchemaNode {
        match self {
            SchemaNode::Optional(inner) => inner,
            other => other,
        }
    }

    /// The record behind this node's actual type, if any. Containers of
    /// records do not count: their element type lives in the type token.
    pub fn as_record(&self) -> Option<&RecordRef> {
        match self.actual() {
            SchemaNode::Record(r) => Some(r),
            _ => None,
        }
    }
}

impl fmt::Display for SchemaNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SchemaNode::String => write!(f, "string"),
            SchemaNode::Long => write!(f, "long"),
            SchemaNode::Double => write!(f, "double"),
            SchemaNode::Boolean => write!(f, "boolean"),
            SchemaNode::Any => write!(f, "any"),
            SchemaNode::Optional(inner) => write!(f, "optional<{inner}>"),
            SchemaNode::List(item) => write!(f, "list<{item}>"),
            SchemaNode::Set(item) => write!(f, "set<{item}>"),
            SchemaNode::Map(key, value) => write!(f, "map<{key}, {value}>"),
            SchemaNode::BareList => write!(f, "list"),
            SchemaNode::BareSet => write!(f, "set"),
            SchemaNode::BareMap => write!(f, "dict"),
            SchemaNode::Record(r) => write!(f, "record<{}>", r.name),
            SchemaNode::Opaque(name) => write!(f, "{name}"),
        }
    }
}

/// Lazy reference to a structured model's declared fields.
///
/// The fields function is invoked only during expansion, which is what makes
/// recursive and mutually-referential model definitions representable (and
/// detectable, via the visited set in `expand`).
#[derive(Clone, Copy)]
pub struct RecordRef {
    pub name: &'static str,
    pub fields: fn() -> Vec<FieldSpec>,
}

impl RecordRef {
    pub fn of<M: ModelSchema>() -> Self {
        RecordRef {
            name: M::NAME,
            fields: M::fields,
        }
    }
}

impl fmt::Debug for RecordRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RecordRef").field("name", &self.name).finish()
    }
}

/// A structured model that declares its own field schema.
///
/// Declaration order is significant: it becomes the wire parameter order.
pub trait ModelSchema {
    const NAME: &'static str;

    fn fields() -> Vec<FieldSpec>;
}

/// One declared field of a structured model.
#[derive(Debug, Clone)]
pub struct FieldSpec {
    pub name: String,
    pub node: SchemaNode,
    pub default: Option<serde_json::Value>,
    pub description: String,
}

impl FieldSpec {
    pub fn new(name: impl Into<String>, node: SchemaNode) -> Self {
        Self {
            name: name.into(),
            node,
            default: None,
            description: String::new(),
        }
    }

    pub fn doc(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn default_value(mut self, value: serde_json::Value) -> Self {
        self.default = Some(value);
        self
    }

    /// A field is required iff it has no default and no optional wrapper.
    pub fn required(&self) -> bool {
        self.default.is_none() && !matches!(self.node, SchemaNode::Optional(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn required_reflects_default_and_optionality() {
        let plain = FieldSpec::new("a", SchemaNode::String);
        assert!(plain.required());

        let optional = FieldSpec::new("b", SchemaNode::optional(SchemaNode::Long));
        assert!(!optional.required());

        let defaulted =
            FieldSpec::new("c", SchemaNode::Long).default_value(serde_json::json!(20));
        assert!(!defaulted.required());
    }

    #[test]
    fn actual_strips_one_optional_layer() {
        let node = SchemaNode::optional(SchemaNode::list(SchemaNode::String));
        assert!(matches!(node.actual(), SchemaNode::List(_)));

        let plain = SchemaNode::Boolean;
        assert!(matches!(plain.actual(), SchemaNode::Boolean));
    }

    #[test]
    fn display_is_stable_raw_type_text() {
        let node = SchemaNode::map(
            SchemaNode::String,
            SchemaNode::optional(SchemaNode::list(SchemaNode::Long)),
        );
        assert_eq!(node.to_string(), "map<string, optional<list<long>>>");
    }
}
