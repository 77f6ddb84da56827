//! Artist catalog service (catalog-api) - Main entry point
//!
//! Serves the artist REST endpoints and uploaded media files.

use std::path::PathBuf;

use anyhow::{Context, Result};
use catalog_api::{build_router, AppState};
use catalog_common::config::{load_dotenv, CatalogConfig, ConfigOverrides};
use catalog_common::db::init_database;
use clap::Parser;
use tokio::signal;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Command-line arguments for catalog-api
///
/// Unset values fall back to environment variables, then the config file,
/// then compiled defaults.
#[derive(Parser, Debug)]
#[command(name = "catalog-api")]
#[command(about = "Artist catalog REST service")]
#[command(version)]
struct Args {
    /// Database connection string (sqlx SQLite URL); falls back to DATABASE_URL
    #[arg(long)]
    database_url: Option<String>,

    /// Listen address; falls back to CATALOG_BIND
    #[arg(short, long)]
    bind: Option<String>,

    /// Upload directory served under /static; falls back to CATALOG_STATIC_DIR
    #[arg(short, long)]
    static_dir: Option<PathBuf>,

    /// Allow every origin, method and header (CORS)
    #[arg(long)]
    cors_permissive: bool,

    /// Optional TOML config file
    #[arg(short, long, env = "CATALOG_CONFIG")]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = parse_args();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "catalog_api=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting catalog-api v{}", env!("CARGO_PKG_VERSION"));

    let config = CatalogConfig::resolve(ConfigOverrides {
        database_url: args.database_url,
        bind: args.bind,
        static_dir: args.static_dir,
        cors_permissive: args.cors_permissive.then_some(true),
        config_file: args.config,
    })
    .map_err(|e| {
        error!("{}", e);
        e
    })
    .context("Failed to resolve configuration")?;

    let pool = init_database(&config.database_url)
        .await
        .context("Failed to initialize database")?;
    info!("Database connection established");

    if config.cors_permissive {
        info!("CORS: permissive (all origins, methods, headers)");
    }

    let state = AppState::new(pool.clone(), config.static_dir.clone())
        .with_permissive_cors(config.cors_permissive);

    // Upload directory must exist before the first request
    state.uploads.ensure_directory_exists().with_context(|| {
        format!("Failed to create static directory {}", config.static_dir.display())
    })?;
    info!("Static directory: {}", config.static_dir.display());

    let app = build_router(state);

    let listener = tokio::net::TcpListener::bind(config.bind_addr)
        .await
        .with_context(|| format!("Failed to bind to {}", config.bind_addr))?;
    info!("Listening on http://{}", config.bind_addr);
    info!("Health check: http://{}/health", config.bind_addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    pool.close().await;
    info!("Server shutdown complete");
    Ok(())
}

/// Apply `.env` first so clap's `env =` fallbacks can read from it
fn parse_args() -> Args {
    load_dotenv();
    Args::parse()
}

/// Graceful shutdown signal handler
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, shutting down");
        },
        _ = terminate => {
            info!("Received terminate signal, shutting down");
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use catalog_common::config::load_dotenv_from;
    use serial_test::serial;

    #[test]
    #[serial]
    fn test_config_path_from_env_file_reaches_args() {
        std::env::remove_var("CATALOG_CONFIG");
        let dir = tempfile::tempdir().unwrap();
        let env_file = dir.path().join(".env");
        std::fs::write(&env_file, "CATALOG_CONFIG=from-env-file.toml\n").unwrap();

        load_dotenv_from(&env_file);
        let args = Args::try_parse_from(["catalog-api"]).unwrap();
        std::env::remove_var("CATALOG_CONFIG");

        assert_eq!(args.config, Some(PathBuf::from("from-env-file.toml")));
    }

    #[test]
    #[serial]
    fn test_explicit_config_flag_beats_env_file() {
        std::env::remove_var("CATALOG_CONFIG");
        let dir = tempfile::tempdir().unwrap();
        let env_file = dir.path().join(".env");
        std::fs::write(&env_file, "CATALOG_CONFIG=from-env-file.toml\n").unwrap();

        load_dotenv_from(&env_file);
        let args = Args::try_parse_from(["catalog-api", "--config", "cli.toml"]).unwrap();
        std::env::remove_var("CATALOG_CONFIG");

        assert_eq!(args.config, Some(PathBuf::from("cli.toml")));
    }
}
