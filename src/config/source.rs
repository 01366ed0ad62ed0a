//! Source configuration definitions

use anyhow::{anyhow, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// A directory of CRD manifests to process
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Source {
    /// Name of the source
    pub name: String,

    /// Directory holding the CRD manifests
    pub path: PathBuf,

    /// Filters for CRDs (`group/version` glob patterns)
    #[serde(default)]
    pub filters: Vec<String>,
}

impl Source {
    /// Validate the source configuration
    pub fn validate(&self) -> Result<()> {
        if self.name.is_empty() {
            return Err(anyhow!("Source name cannot be empty"));
        }

        if self.path.to_string_lossy().is_empty() {
            return Err(anyhow!("Source path cannot be empty"));
        }

        Ok(())
    }
}
