//! Configuration loading for the catalog service and seed tool
//!
//! Each setting is resolved in priority order:
//! 1. Explicit override (command-line argument)
//! 2. Environment variable
//! 3. TOML config file
//! 4. Compiled default
//!
//! The database URL has no compiled default. Startup fails with
//! [`Error::Config`] when it cannot be resolved.

use crate::{Error, Result};
use serde::Deserialize;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Environment variable holding the database connection string
pub const DATABASE_URL_ENV: &str = "DATABASE_URL";
/// Environment variable holding the listen address
pub const BIND_ENV: &str = "CATALOG_BIND";
/// Environment variable holding the upload directory
pub const STATIC_DIR_ENV: &str = "CATALOG_STATIC_DIR";
/// Environment variable toggling the wide-open CORS policy
pub const CORS_PERMISSIVE_ENV: &str = "CATALOG_CORS_PERMISSIVE";

/// Compiled fallback values used when no other source provides a setting
#[derive(Debug, Clone)]
pub struct CompiledDefaults {
    pub bind_addr: SocketAddr,
    pub static_dir: PathBuf,
    pub cors_permissive: bool,
}

impl Default for CompiledDefaults {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from(([127, 0, 0, 1], 8000)),
            static_dir: PathBuf::from("static"),
            cors_permissive: false,
        }
    }
}

/// Optional on-disk configuration (all keys optional)
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TomlConfig {
    pub database_url: Option<String>,
    pub bind: Option<String>,
    pub static_dir: Option<PathBuf>,
    pub cors_permissive: Option<bool>,
}

impl TomlConfig {
    /// Parse a TOML config file
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            Error::Config(format!("Failed to read config file {}: {}", path.display(), e))
        })?;
        Self::parse(&content)
            .map_err(|e| Error::Config(format!("Invalid config file {}: {}", path.display(), e)))
    }

    fn parse(content: &str) -> std::result::Result<Self, toml::de::Error> {
        toml::from_str(content)
    }
}

/// Values supplied explicitly by the caller, usually from the command line
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub database_url: Option<String>,
    pub bind: Option<String>,
    pub static_dir: Option<PathBuf>,
    pub cors_permissive: Option<bool>,
    pub config_file: Option<PathBuf>,
}

/// Fully resolved service configuration
#[derive(Debug, Clone)]
pub struct CatalogConfig {
    pub database_url: String,
    pub bind_addr: SocketAddr,
    pub static_dir: PathBuf,
    pub cors_permissive: bool,
}

impl CatalogConfig {
    /// Resolve every setting from overrides, environment, TOML file and defaults
    pub fn resolve(overrides: ConfigOverrides) -> Result<Self> {
        let file = match &overrides.config_file {
            Some(path) => {
                info!("Loading config file: {}", path.display());
                TomlConfig::load(path)?
            }
            None => TomlConfig::default(),
        };
        let defaults = CompiledDefaults::default();

        let database_url = resolve_database_url(overrides.database_url.as_deref(), &file)?;

        let bind_addr = match first_of(overrides.bind, env_value(BIND_ENV), file.bind) {
            Some(raw) => raw
                .parse::<SocketAddr>()
                .map_err(|e| Error::Config(format!("Invalid bind address '{}': {}", raw, e)))?,
            None => defaults.bind_addr,
        };

        let static_dir = overrides
            .static_dir
            .or_else(|| env_value(STATIC_DIR_ENV).map(PathBuf::from))
            .or(file.static_dir)
            .unwrap_or(defaults.static_dir);

        let cors_permissive = match overrides.cors_permissive {
            Some(flag) => flag,
            None => match env_value(CORS_PERMISSIVE_ENV) {
                Some(raw) => parse_flag(CORS_PERMISSIVE_ENV, &raw)?,
                None => file.cors_permissive.unwrap_or(defaults.cors_permissive),
            },
        };

        Ok(Self {
            database_url,
            bind_addr,
            static_dir,
            cors_permissive,
        })
    }
}

/// Load a `.env` file from the working directory, if one exists
///
/// Variables already present in the process environment win. Call before
/// parsing command-line arguments so `env =` fallbacks see these values.
pub fn load_dotenv() {
    load_dotenv_from(Path::new(".env"));
}

/// Load a specific env file, with the same precedence as [`load_dotenv`]
pub fn load_dotenv_from(path: &Path) {
    match dotenvy::from_path(path) {
        Ok(()) => debug!("Loaded environment from {}", path.display()),
        Err(e) if e.not_found() => {}
        Err(e) => tracing::warn!("Ignoring unreadable env file {}: {}", path.display(), e),
    }
}

/// Resolve the database connection string
///
/// Empty values count as missing.
pub fn resolve_database_url(cli_arg: Option<&str>, file: &TomlConfig) -> Result<String> {
    let cli = cli_arg.map(str::to_string).filter(|s| !s.trim().is_empty());
    let file_value = file.database_url.clone().filter(|s| !s.trim().is_empty());

    first_of(cli, env_value(DATABASE_URL_ENV), file_value).ok_or_else(|| {
        Error::Config(format!("{} is missing from environment", DATABASE_URL_ENV))
    })
}

fn env_value(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.trim().is_empty())
}

fn first_of<T>(a: Option<T>, b: Option<T>, c: Option<T>) -> Option<T> {
    a.or(b).or(c)
}

fn parse_flag(name: &str, raw: &str) -> Result<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        other => Err(Error::Config(format!("Invalid boolean for {}: '{}'", name, other))),
    }
}
