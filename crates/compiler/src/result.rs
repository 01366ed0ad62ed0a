//! Aggregated compilation results

use crate::descriptor::TypeDescriptor;
use crate::resolve::Resolved;

/// The ordered, flattened output of one top-level compilation.
///
/// `top_level` holds one entry per emitted source unit, child before
/// parent, the compilation root last. `inner` holds the enum artifacts
/// that are rendered nested inside their owning type.
#[derive(Debug, Clone, PartialEq)]
pub struct CompiledTypes {
    pub top_level: Vec<TypeDescriptor>,
    pub inner: Vec<TypeDescriptor>,
}

impl CompiledTypes {
    /// Flatten a resolution, appending the root descriptor after
    /// everything it discovered.
    pub fn from_resolution(resolved: Resolved) -> Self {
        let mut all = resolved.artifacts;
        if resolved.descriptor.is_artifact() {
            all.push(resolved.descriptor);
        }

        let mut top_level = Vec::with_capacity(all.len());
        let mut inner = Vec::new();
        for artifact in all {
            if artifact.is_inner() {
                inner.push(artifact);
            } else {
                top_level.push(artifact);
            }
        }

        Self { top_level, inner }
    }

    pub fn artifact_count(&self) -> usize {
        self.top_level.len() + self.inner.len()
    }

    /// Inner artifacts nested under a given owner.
    pub fn inner_of(&self, owner_qualified: &str) -> Vec<&TypeDescriptor> {
        self.inner
            .iter()
            .filter(|artifact| match artifact {
                TypeDescriptor::Enum(e) => e.owner == owner_qualified,
                _ => false,
            })
            .collect()
    }
}
