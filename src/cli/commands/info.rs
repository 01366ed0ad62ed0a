//! Info command implementation

use crate::cli::utils;
use anyhow::Result;
use clap::{ArgMatches, Command};

pub fn command() -> Command {
    Command::new("info")
        .about("Show tool information and discovered CRDs")
        .arg(
            clap::Arg::new("config")
                .short('c')
                .long("config")
                .help("Configuration file path")
                .value_name("FILE"),
        )
        .arg(
            clap::Arg::new("json")
                .long("json")
                .help("Print discovered CRDs as JSON")
                .action(clap::ArgAction::SetTrue),
        )
}

pub fn run(matches: &ArgMatches) -> Result<()> {
    if matches.get_flag("json") {
        let config = utils::load_config(matches)?;
        let app = utils::create_app(config)?;

        let discovered: Vec<_> = app
            .discover()?
            .into_iter()
            .map(|(source, schemas)| serde_json::json!({ "source": source, "crds": schemas }))
            .collect();
        println!("{}", serde_json::to_string_pretty(&discovered)?);
        return Ok(());
    }

    println!("JavaGen - Java model generator for Kubernetes CRDs");
    println!("Version: {}", env!("CARGO_PKG_VERSION"));

    // Listing CRDs needs a configuration; without one, stop at the header
    let Ok(config) = utils::load_config(matches) else {
        return Ok(());
    };

    let app = utils::create_app(config)?;
    for (source_name, schemas) in app.discover()? {
        println!("\nSource: {source_name}");
        for crd in &schemas {
            for version in &crd.versions {
                println!(
                    "  - {} {} ({}, storage: {})",
                    crd.kind,
                    crd.api_version(version),
                    crd.scope,
                    version.storage
                );
            }
        }
    }

    Ok(())
}
