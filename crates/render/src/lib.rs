//! Rendering backends for compiled type descriptors

pub mod java;

use anyhow::Result;
use javagen_compiler::CompiledTypes;

/// One rendered source unit, ready to be written to disk.
#[derive(Debug, Clone)]
pub struct SourceUnit {
    /// Qualified name of the top-level type in this unit.
    pub qualified_name: String,

    /// Package path, one directory per segment.
    pub package: Vec<String>,

    /// File name including extension.
    pub file_name: String,

    pub content: String,
}

/// A backend turning compiled descriptors into source text.
///
/// One unit per top-level artifact, in the compiler's artifact order;
/// inner artifacts are embedded in their owner's unit.
pub trait Renderer {
    fn render(&self, types: &CompiledTypes) -> Result<Vec<SourceUnit>>;
}

pub use java::JavaRenderer;
