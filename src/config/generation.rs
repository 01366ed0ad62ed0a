//! Generation configuration

use serde::{Deserialize, Serialize};

/// Generation configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerationConfig {
    /// Whether to fail fast on errors
    #[serde(default)]
    pub fail_fast: bool,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self { fail_fast: false }
    }
}
