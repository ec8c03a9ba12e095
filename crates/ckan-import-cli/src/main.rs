use anyhow::Context;
use clap::Parser;
use dotenvy::dotenv;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use ckan_import::Config;
use ckan_import_client::CkanClient;
use ckan_import_core::{
    load_import_defaults, validate_directories, HttpConfig, ImportService, ImportStats,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file
    dotenv().ok();

    // Parse command line arguments
    let config = Config::parse();

    // Setup logging (stderr to keep stdout for the summary)
    let level = if config.verbose { Level::DEBUG } else { Level::INFO };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber).expect("setting default subscriber failed");

    let defaults = load_import_defaults(config.config.clone())
        .map_err(|e| anyhow::anyhow!(e.user_message()))?;
    let settings = config
        .resolve(defaults)
        .map_err(|e| anyhow::anyhow!(e.user_message()))?;

    // Nothing is sent to CKAN unless every directory exists
    validate_directories(&settings.dirs).map_err(|e| anyhow::anyhow!(e.user_message()))?;

    let http_config = HttpConfig::default();
    let client = CkanClient::with_config(&settings.base_url, &settings.api_key, &http_config)
        .map_err(|e| anyhow::anyhow!(e.user_message()))
        .context("Invalid CKAN configuration")?;

    info!(
        "Importing into {} (organization: {}, private: {})",
        settings.base_url, settings.owner_org, settings.visibility
    );

    let service = ImportService::new(
        client,
        settings.filter,
        settings.visibility,
        settings.owner_org,
    );
    let stats = service.run(&settings.dirs).await;

    print_summary(&stats);

    Ok(())
}

fn print_summary(stats: &ImportStats) {
    println!("SUMMARY");
    println!("Dataset directories processed\t: {}", stats.directories);
    println!("Dataset imported\t\t: {}", stats.succeeded);
    println!("Dataset import failed\t\t: {}", stats.failed);
    println!("Dataset total\t\t\t: {}", stats.total);
}
