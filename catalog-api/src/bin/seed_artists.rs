//! seed-artists - insert the demo artists into the catalog database
//!
//! Creates the schema if needed, inserts four fixed rows and reports the
//! count. Run once, outside the serving process.

use std::path::PathBuf;

use anyhow::{Context, Result};
use catalog_api::db::ArtistStore;
use catalog_api::seed::seed_artists;
use catalog_common::config::{load_dotenv, resolve_database_url, TomlConfig};
use catalog_common::db::init_database;
use clap::Parser;
use tracing::info;

#[derive(Parser, Debug)]
#[command(name = "seed-artists")]
#[command(about = "Insert demo artists into the catalog database")]
struct Args {
    /// Database connection string; falls back to DATABASE_URL
    #[arg(long)]
    database_url: Option<String>,

    /// Optional TOML config file
    #[arg(short, long, env = "CATALOG_CONFIG")]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    // .env before parsing so CATALOG_CONFIG from it is honored
    load_dotenv();
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    let file = match &args.config {
        Some(path) => TomlConfig::load(path)?,
        None => TomlConfig::default(),
    };
    let database_url = resolve_database_url(args.database_url.as_deref(), &file)?;

    let pool = init_database(&database_url)
        .await
        .context("Failed to initialize database")?;
    let store = ArtistStore::new(pool.clone());

    let count = seed_artists(&store).await.context("Seeding failed")?;
    println!("Seeded {} artists.", count);

    pool.close().await;
    info!("Done");
    Ok(())
}
