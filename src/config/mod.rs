//! Configuration management for JavaGen

pub mod config;
pub mod generation;
pub mod source;

#[cfg(test)]
mod tests;

// Re-export main types for convenience
pub use config::{Config, OutputConfig};
pub use generation::GenerationConfig;
pub use source::Source;
