//! Geocoder CLI
//!
//! Runs one geocoding operation and prints the result as pretty JSON.

#![allow(clippy::print_stdout)]

use anyhow::Context;
use application::Geocoder;
use clap::Parser;
use infrastructure::{AppConfig, init_tracing};
use presentation_cli::cli::log_filter_from_verbosity;
use presentation_cli::{Cli, Commands, build_geocoder};
use serde_json::Value;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut config = AppConfig::load(cli.config.as_deref()).context("failed to load configuration")?;
    if let Some(filter) = log_filter_from_verbosity(cli.verbose) {
        config.logging.filter = filter.to_string();
    }
    init_tracing(&config.logging)?;
    config.validate()?;

    let geocoder = build_geocoder(&config)?;

    let Some(query) = cli.command.to_query() else {
        for name in geocoder.provider_names() {
            let marker = if config.default_provider.as_deref() == Some(name) {
                " (default)"
            } else {
                ""
            };
            println!("{name}{marker}");
        }
        return Ok(());
    };

    let output = run(&geocoder, cli.provider.as_deref(), &cli.command, &query).await?;
    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

async fn run(
    geocoder: &Geocoder,
    provider: Option<&str>,
    command: &Commands,
    query: &Value,
) -> anyhow::Result<Value> {
    let handle = match provider {
        Some(name) => geocoder.using_name(name)?,
        None => geocoder.default_handle()?,
    };

    let output = match command {
        Commands::Geocode { .. } => serde_json::to_value(handle.geocode(query).await?)?,
        Commands::Reverse { .. } => serde_json::to_value(handle.reverse(query).await?)?,
        Commands::Suggest { .. } => serde_json::to_value(handle.suggest(query).await?)?,
        Commands::PlaceDetails { .. } => serde_json::to_value(handle.place_details(query).await?)?,
        Commands::Providers => Value::Null,
    };
    Ok(output)
}
