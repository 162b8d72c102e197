//! Construction-time errors.

/// Misuse detected while assembling a codec.
///
/// These are programmer errors in codec definitions, reported when the
/// combinator is called rather than when a value is decoded.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BuildError {
    /// A field was listed as both required and optional.
    #[error("field '{field}' of '{codec}' is declared both required and optional")]
    DuplicateField { field: String, codec: String },

    /// A child codec redeclared a field its parent already validates.
    #[error("field '{field}' of '{codec}' is already declared by parent '{parent}'")]
    ConflictingField {
        field: String,
        codec: String,
        parent: String,
    },
}
