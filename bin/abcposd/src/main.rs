//! `abcposd` — the POS back-office server binary.
//!
//! Usage:
//!   abcposd -c <config-name-or-path> [--listen <addr>]
//!
//! The config name resolves to `/etc/abcpos/<name>.toml`.
//! If a path with `/` or `.` is given, it's used directly.

mod config;
mod routes;

use std::sync::Arc;

use clap::Parser;
use abcpos_core::Module;
use tracing::info;

use config::ServerConfig;

/// POS back-office server.
#[derive(Parser, Debug)]
#[command(name = "abcposd", about = "POS back-office server")]
struct Cli {
    /// Config name or path to config file.
    #[arg(short = 'c', long = "config", required = true)]
    config: String,

    /// Listen address (overrides default 0.0.0.0:8080).
    #[arg(long = "listen", default_value = "0.0.0.0:8080")]
    listen: String,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging.
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let cli = Cli::parse();

    // Load server configuration.
    let config_path = ServerConfig::resolve_path(&cli.config);
    info!("Loading configuration from {}", config_path.display());
    let server_config = ServerConfig::load(&config_path)?;

    // Initialize storage.
    let data_dir = std::path::PathBuf::from(&server_config.storage.data_dir);
    std::fs::create_dir_all(&data_dir)?;

    let core_config = abcpos_core::ServiceConfig {
        data_dir: Some(data_dir.clone()),
        listen: cli.listen.clone(),
        ..Default::default()
    };

    // Embedded KV store, shared by all modules.
    let kv: Arc<dyn abcpos_kv::KVStore> = Arc::new(
        abcpos_kv::RedbStore::open(&core_config.resolve_db_path())
            .map_err(|e| anyhow::anyhow!("failed to open KV store: {}", e))?,
    );

    // No compliance backend is wired in yet; packs are never matched.
    let compliance: Arc<dyn storecfg::service::CompliancePolicyExecutor> =
        Arc::new(storecfg::service::NoopCompliancePolicy);

    let storecfg_service = storecfg::service::StorecfgService::new(kv, compliance);
    let storecfg_module = storecfg::StorecfgModule::new(storecfg_service);
    info!("Storecfg module initialized");

    let module_routes = vec![(storecfg_module.name(), storecfg_module.routes())];

    // Build router.
    let app = routes::build_router(module_routes);

    // Start server.
    let listener = tokio::net::TcpListener::bind(&cli.listen).await?;
    info!("abcposd listening on {}", cli.listen);
    axum::serve(listener, app).await?;

    Ok(())
}
