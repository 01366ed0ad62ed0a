//! CRD (CustomResourceDefinition) parsing and schema normalization

pub mod parser;
pub mod schema;

pub use parser::{CrdParser, CrdSchema, CrdVersion};
pub use schema::{AdditionalProperties, SchemaKind, SchemaNode};
