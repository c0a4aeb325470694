//! yomu-cr - Catalog Resolver Microservice
//!
//! Resolves tracked series against the external comic catalog: confirms
//! which catalog entries are the same series, merges them into one
//! canonical record, and serves the result to the other yomu services
//! over HTTP REST.

use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::EnvFilter;

use yomu_common::config::TomlConfig;
use yomu_cr::config::ResolverConfig;
use yomu_cr::services::ComickClient;
use yomu_cr::AppState;

#[derive(Debug, Parser)]
#[command(name = "yomu-cr", version, about = "yomu catalog resolver service")]
struct Args {
    /// Path to a TOML config file (default: platform config dir)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Base URL of the comic catalog API
    #[arg(long)]
    catalog_base_url: Option<String>,

    /// Preferred chapter language code
    #[arg(long)]
    catalog_lang: Option<String>,

    /// Listen port
    #[arg(long)]
    port: Option<u16>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let args = Args::parse();

    info!("Starting yomu-cr (Catalog Resolver) microservice");
    info!("Version: {}", env!("CARGO_PKG_VERSION"));

    let toml_config = TomlConfig::load(args.config.as_deref())?;
    let config = ResolverConfig::resolve(
        args.catalog_base_url.as_deref(),
        args.catalog_lang.as_deref(),
        args.port,
        &toml_config,
    )?;

    info!("Catalog: {}", config.catalog_base_url);
    info!("Language: {}", config.catalog_lang);

    let catalog = ComickClient::new(&config)
        .map_err(|e| anyhow::anyhow!("Failed to create catalog client: {}", e))?;
    let state = AppState::new(Arc::new(catalog));

    let app = yomu_cr::build_router(state);

    let listener = tokio::net::TcpListener::bind(("127.0.0.1", config.port)).await?;
    info!("Listening on http://127.0.0.1:{}", config.port);
    info!("Health check: http://127.0.0.1:{}/health", config.port);

    axum::serve(listener, app).await?;

    Ok(())
}
