//! Typed compilation errors

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

/// Compilation failures. All of them are fatal: the compiler produces
/// either a complete descriptor tree or one of these, never partial
/// output.
#[derive(Debug, Error)]
pub enum Error {
    /// A group of raw property names normalizing to the same identifier
    /// did not reduce to exactly one non-deprecated survivor.
    #[error("duplicate field `{identifier}` at `{path}` (raw names: {raw_names:?})")]
    DuplicateField {
        path: String,
        identifier: String,
        raw_names: Vec<String>,
    },

    /// A schema fragment's kind/format combination has no resolver mapping.
    #[error("unsupported schema shape at `{path}`: {detail}")]
    UnsupportedShape { path: String, detail: String },

    /// Object nesting exceeded the recursion bound, most likely a cyclic
    /// schema reference.
    #[error("schema nesting at `{path}` exceeds {limit} levels")]
    RecursionLimit { path: String, limit: usize },

    /// Invalid or conflicting override configuration.
    #[error("invalid configuration: {0}")]
    Configuration(String),

    /// Two enum literals produced the same constant identifier.
    #[error("duplicate enum constant `{token}` at `{path}`")]
    DuplicateEnumConstant { path: String, token: String },
}
