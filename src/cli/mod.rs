//! CLI command implementations

use anyhow::Result;
use clap::{ArgMatches, Command};

pub mod commands;

/// Main CLI application
pub struct CliApp;

impl CliApp {
    /// Create the CLI application
    pub fn app() -> Command {
        Command::new("javagen")
            .version(env!("CARGO_PKG_VERSION"))
            .about("Generate Java model classes from Kubernetes CRDs")
            .subcommand_negates_reqs(true)
            .subcommand(commands::generate::command())
            .subcommand(commands::validate::command())
            .subcommand(commands::info::command())
    }

    /// Run the CLI application
    pub fn run(matches: &ArgMatches) -> Result<()> {
        match matches.subcommand() {
            Some(("generate", sub_matches)) => commands::generate::run(sub_matches),
            Some(("validate", sub_matches)) => commands::validate::run(sub_matches),
            Some(("info", sub_matches)) => commands::info::run(sub_matches),
            _ => {
                // No subcommand provided, show help
                let _ = Self::app().print_help();
                Ok(())
            }
        }
    }
}

/// Common CLI utilities
pub mod utils {
    use anyhow::{anyhow, Result};
    use std::path::PathBuf;

    /// Get configuration file path from arguments or use default
    pub fn get_config_path(matches: &clap::ArgMatches) -> Result<PathBuf> {
        if let Some(config_path) = matches.get_one::<String>("config") {
            Ok(PathBuf::from(config_path))
        } else {
            // Look for default config files
            let default_paths = [
                PathBuf::from(".javagen.yaml"),
                PathBuf::from(".javagen.yml"),
                PathBuf::from("javagen.yaml"),
                PathBuf::from("javagen.yml"),
            ];

            for path in &default_paths {
                if path.exists() {
                    return Ok(path.clone());
                }
            }

            Err(anyhow!(
                "No configuration file found. Use --config to specify a file"
            ))
        }
    }

    /// Load configuration from file
    pub fn load_config(matches: &clap::ArgMatches) -> Result<crate::Config> {
        let config_path = get_config_path(matches)?;
        crate::Config::from_file(&config_path)
    }

    /// Create JavaGen instance
    pub fn create_app(config: crate::Config) -> Result<crate::JavaGen> {
        crate::JavaGen::new(config)
    }
}
