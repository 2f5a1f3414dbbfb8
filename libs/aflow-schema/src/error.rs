use thiserror::Error;

/// Structured errors for schema conversion and expansion.
#[derive(Debug, Error)]
pub enum SchemaError {
    /// A node that cannot be mapped to a canonical type token. Hard failure:
    /// the converter has no silent `any` fallback for unrecognized types.
    #[error("unsupported type: {name}")]
    UnsupportedType { name: &'static str },

    /// A record referencing itself, directly or through other records.
    /// Expansion fails fast instead of recursing indefinitely.
    #[error("cyclic model schema detected: {}", path.join(" -> "))]
    CyclicSchema { path: Vec<&'static str> },
}
