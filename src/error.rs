//! Error types for dissection and building.

/// Errors surfaced by the packet engine.
///
/// "Unknown discriminator" is deliberately *not* a variant here: the layer
/// binder returning no match is not an error, it just leaves the remaining
/// octets as a trailer on the parent packet.
#[derive(Debug, thiserror::Error)]
pub enum CodecError {
    /// A length/count field referenced a sibling field that does not exist
    /// in the schema. This is an implementation fault, not a data problem.
    #[error("schema error: field '{field}' references undefined sibling '{reference}'")]
    SchemaError {
        field: &'static str,
        reference: &'static str,
    },

    /// A length resolver needed a sibling field's value or size, but the
    /// sibling itself is unset and has no way to derive one.
    #[error("build error: '{field}' cannot be resolved, dependency '{reference}' has no value")]
    MissingDependency {
        field: &'static str,
        reference: &'static str,
    },
}

pub type Result<T> = std::result::Result<T, CodecError>;
