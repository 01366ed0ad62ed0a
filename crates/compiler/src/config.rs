//! Compiler configuration

use crate::error::{Error, Result};
use crate::names;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Options consulted during schema resolution.
///
/// The configuration is an explicit, immutable value threaded through
/// every resolution call; the compiler holds no ambient state.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Uppercase string enum constants (FOO from "foo").
    #[serde(default = "default_true")]
    pub enum_uppercase: bool,

    /// Add the reserved `additionalProperties` field to every generated
    /// class, regardless of per-schema flags.
    #[serde(default)]
    pub preserve_unknown_fields: bool,

    /// Emit `@Generated` annotations on generated types.
    #[serde(default = "default_true")]
    pub generated_annotations: bool,

    /// Qualified names resolved to hand-written types instead of being
    /// generated. Keys are the qualified names the compiler would assign,
    /// values the replacement types.
    #[serde(default)]
    pub existing_java_types: HashMap<String, String>,
}

fn default_true() -> bool {
    true
}

impl Default for Config {
    fn default() -> Self {
        Self {
            enum_uppercase: true,
            preserve_unknown_fields: false,
            generated_annotations: true,
            existing_java_types: HashMap::new(),
        }
    }
}

impl Config {
    /// Reject overrides that are not syntactically valid qualified names.
    pub fn validate(&self) -> Result<()> {
        for (from, to) in &self.existing_java_types {
            if !names::is_qualified_name(from) {
                return Err(Error::Configuration(format!(
                    "existing_java_types key is not a qualified name: `{from}`"
                )));
            }
            if !names::is_qualified_name(to) {
                return Err(Error::Configuration(format!(
                    "existing_java_types value is not a qualified name: `{to}`"
                )));
            }
        }
        Ok(())
    }
}
