//! Generate command implementation

use crate::cli::utils;
use anyhow::Result;
use clap::{ArgMatches, Command};
use std::path::PathBuf;
use tracing::info;

pub fn command() -> Command {
    Command::new("generate")
        .about("Generate Java model classes from configured sources")
        .arg(
            clap::Arg::new("config")
                .short('c')
                .long("config")
                .help("Configuration file path")
                .value_name("FILE"),
        )
        .arg(
            clap::Arg::new("output")
                .short('o')
                .long("output")
                .help("Output directory")
                .value_name("DIR"),
        )
        .arg(
            clap::Arg::new("dry-run")
                .long("dry-run")
                .help("Don't write files")
                .action(clap::ArgAction::SetTrue),
        )
        .arg(
            clap::Arg::new("fail-fast")
                .long("fail-fast")
                .help("Stop on first error")
                .action(clap::ArgAction::SetTrue),
        )
}

pub fn run(matches: &ArgMatches) -> Result<()> {
    info!("Starting Java model generation");

    let mut config = utils::load_config(matches)?;

    // Override output path if specified
    if let Some(output_path) = matches.get_one::<String>("output") {
        config.output.base_path = PathBuf::from(output_path);
    }

    // Override fail_fast setting if specified
    if matches.get_flag("fail-fast") {
        config.generation.fail_fast = true;
    }

    let app = utils::create_app(config)?;

    if matches.get_flag("dry-run") {
        info!("Dry run mode - no files will be written");
        println!("Dry run mode - no files will be written");

        let units = app.check()?;
        println!("Files that would be generated: {units}");
        return Ok(());
    }

    let result = app.generate()?;

    println!("Generation completed!");
    println!(
        "Sources processed: {}/{}",
        result.sources_processed, result.total_sources
    );
    println!("Files generated: {}", result.statistics.files_generated);
    println!(
        "Processing time: {}ms",
        result.statistics.total_processing_time_ms
    );

    if result.statistics.error_count > 0 {
        println!("Errors: {}", result.statistics.error_count);
        for source_result in &result.results {
            for error in &source_result.errors {
                println!("  - [{}] {}", source_result.source_name, error);
            }
        }
    }

    Ok(())
}
