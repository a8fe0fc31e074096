// addonctl
// Main entry point for the addonctl binary

use addon_engine::cli::{Cli, Command};
use addon_engine::config::Config;
use addon_engine::handlers::{
    handle_hash, handle_info, handle_purge, handle_rate, handle_repo_id, OutputFormat,
};
use addon_engine::telemetry::init_telemetry_with_level;
use clap::Parser;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Load configuration (or use custom path if provided)
    let config = if let Some(config_path) = &cli.config {
        Config::load_from_path(config_path)?
    } else {
        Config::load_or_create()?
    };

    // --log wins over the config file; RUST_LOG wins over both
    let log_level = cli.log.as_deref().unwrap_or(&config.core.log_level);
    init_telemetry_with_level(log_level);

    tracing::debug!("addonctl v{}", env!("CARGO_PKG_VERSION"));

    let format = if cli.json {
        OutputFormat::Json
    } else {
        OutputFormat::Text
    };

    match cli.command {
        Command::Rate {
            descriptor,
            explain,
        } => handle_rate(&descriptor, explain, format),

        Command::Info { descriptor } => handle_info(&descriptor, format).await,

        Command::RepoId { path } => handle_repo_id(&path, format),

        Command::Hash { name } => handle_hash(&name, format),

        Command::Purge { slug } => {
            tracing::info!("Purging data for {}", slug);
            handle_purge(&slug, &config, format).await
        }
    }
}
