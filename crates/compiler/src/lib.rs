//! Schema-to-type-model compiler
//!
//! Compiles the OpenAPI v3 subset used by Kubernetes CRDs into a
//! normalized graph of class, enum and field descriptors, ready for a
//! rendering backend to turn into source files. Resolution is a pure,
//! synchronous, single-pass tree transform with deterministic naming
//! and artifact ordering.

pub mod config;
pub mod descriptor;
pub mod enums;
pub mod error;
pub mod names;
pub mod primitive;
pub mod resolve;
mod resource;
pub mod result;

pub use config::Config;
pub use descriptor::{
    ClassDescriptor, EnumDescriptor, EnumEntryDescriptor, ExistingTypeDescriptor, FieldDescriptor,
    LiteralValue, MapDescriptor, PrimitiveDescriptor, ResourceDescriptor, SequenceDescriptor,
    TypeDescriptor, ValidationBounds,
};
pub use error::{Error, Result};
pub use resolve::{Resolved, SchemaCompiler};
pub use result::CompiledTypes;
