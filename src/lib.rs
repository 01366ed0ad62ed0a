//! JavaGen Library
//!
//! A Rust library for generating Java model classes from Kubernetes
//! CustomResourceDefinitions (CRDs). The compiler core lives in
//! `javagen-compiler`; this crate wires it to CRD discovery, the Java
//! rendering backend and the file system.

pub mod cli;
pub mod config;

pub use config::{Config, GenerationConfig, OutputConfig, Source};
pub use javagen_compiler::{CompiledTypes, SchemaCompiler};
pub use javagen_crd::{CrdParser, CrdSchema, CrdVersion, SchemaNode};
pub use javagen_render::{JavaRenderer, Renderer, SourceUnit};

use anyhow::{Context, Result};
use std::path::PathBuf;
use std::time::Instant;
use tracing::{error, info};

/// Main application context that coordinates all components
pub struct JavaGen {
    config: Config,
    crd_parser: CrdParser,
    compiler: SchemaCompiler,
    renderer: JavaRenderer,
}

impl JavaGen {
    /// Create a new JavaGen instance with the given configuration
    pub fn new(config: Config) -> Result<Self> {
        config.validate()?;
        let compiler = SchemaCompiler::new(config.compiler.clone())?;
        let renderer = JavaRenderer::new(config.compiler.generated_annotations);

        Ok(Self {
            config,
            crd_parser: CrdParser::new(),
            compiler,
            renderer,
        })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Generate Java sources from all configured sources
    pub fn generate(&self) -> Result<GenerationResult> {
        info!("Starting Java model generation");

        let start_time = Instant::now();
        let mut results = Vec::new();

        for source in &self.config.sources {
            match self.process_source(source) {
                Ok(result) => {
                    info!("Successfully processed source: {}", source.name);
                    results.push(result);
                }
                Err(e) => {
                    error!("Failed to process source {}: {}", source.name, e);
                    if self.config.generation.fail_fast {
                        return Err(e);
                    }
                    results.push(SourceResult {
                        source_name: source.name.clone(),
                        files_generated: 0,
                        errors: vec![e.to_string()],
                        output_path: self.config.output.base_path.clone(),
                        processing_time_ms: 0,
                    });
                }
            }
        }

        let generation_time = start_time.elapsed();
        info!("Generation completed in {:?}", generation_time);

        let statistics = GenerationStatistics {
            total_processing_time_ms: generation_time.as_millis() as u64,
            files_generated: results.iter().map(|r| r.files_generated).sum(),
            error_count: results.iter().map(|r| r.errors.len()).sum(),
        };

        Ok(GenerationResult {
            sources_processed: results.len(),
            total_sources: self.config.sources.len(),
            results,
            statistics,
        })
    }

    /// Process a single source
    fn process_source(&self, source: &Source) -> Result<SourceResult> {
        let start_time = Instant::now();

        let schemas = self
            .crd_parser
            .parse_from_directory(&source.path, &source.filters)?;

        let mut files = Vec::new();
        let mut errors = Vec::new();

        for crd in &schemas {
            for version in &crd.versions {
                match self.generate_version(crd, version) {
                    Ok(mut written) => files.append(&mut written),
                    Err(e) => {
                        if self.config.generation.fail_fast {
                            return Err(e);
                        }
                        errors.push(format!(
                            "{} {}: {e}",
                            crd.kind,
                            crd.api_version(version)
                        ));
                    }
                }
            }
        }

        Ok(SourceResult {
            source_name: source.name.clone(),
            files_generated: files.len(),
            errors,
            output_path: self.config.output.base_path.clone(),
            processing_time_ms: start_time.elapsed().as_millis() as u64,
        })
    }

    /// Compile and render one CRD version, writing its source units
    fn generate_version(&self, crd: &CrdSchema, version: &CrdVersion) -> Result<Vec<PathBuf>> {
        let types = self
            .compiler
            .compile_resource(crd, version)
            .with_context(|| format!("compiling {} {}", crd.kind, crd.api_version(version)))?;

        let units = self.renderer.render(&types)?;
        self.write_units(&units)
    }

    fn write_units(&self, units: &[SourceUnit]) -> Result<Vec<PathBuf>> {
        let mut written = Vec::with_capacity(units.len());

        for unit in units {
            let mut dir = self.config.output.base_path.clone();
            for segment in &unit.package {
                dir.push(segment);
            }
            std::fs::create_dir_all(&dir)?;

            let file_path = dir.join(&unit.file_name);
            std::fs::write(&file_path, &unit.content)?;
            info!("Generated source file: {:?}", file_path);
            written.push(file_path);
        }

        Ok(written)
    }

    /// Parse and compile every configured source without writing files.
    ///
    /// Returns the number of source units that a full run would emit.
    pub fn check(&self) -> Result<usize> {
        let mut units = 0;

        for source in &self.config.sources {
            let schemas = self
                .crd_parser
                .parse_from_directory(&source.path, &source.filters)?;

            for crd in &schemas {
                for version in &crd.versions {
                    let types = self
                        .compiler
                        .compile_resource(crd, version)
                        .with_context(|| {
                            format!("compiling {} {}", crd.kind, crd.api_version(version))
                        })?;
                    units += types.top_level.len();
                }
            }
        }

        Ok(units)
    }

    /// List the CRDs each configured source would process
    pub fn discover(&self) -> Result<Vec<(String, Vec<CrdSchema>)>> {
        let mut discovered = Vec::new();

        for source in &self.config.sources {
            let schemas = self
                .crd_parser
                .parse_from_directory(&source.path, &source.filters)?;
            discovered.push((source.name.clone(), schemas));
        }

        Ok(discovered)
    }
}

/// Result of processing a source
#[derive(Debug, Clone)]
pub struct SourceResult {
    pub source_name: String,
    pub files_generated: usize,
    pub errors: Vec<String>,
    pub output_path: PathBuf,
    pub processing_time_ms: u64,
}

/// Overall generation result
#[derive(Debug)]
pub struct GenerationResult {
    pub sources_processed: usize,
    pub total_sources: usize,
    pub results: Vec<SourceResult>,
    pub statistics: GenerationStatistics,
}

/// Generation statistics
#[derive(Debug, Clone)]
pub struct GenerationStatistics {
    /// Total processing time in milliseconds
    pub total_processing_time_ms: u64,

    /// Number of files generated
    pub files_generated: usize,

    /// Number of errors encountered
    pub error_count: usize,
}
