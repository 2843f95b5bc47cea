//! Configuration loading for the libris service
//!
//! Resolution follows a fixed priority order per setting:
//! 1. Environment variable (highest priority)
//! 2. TOML config file (`~/.config/libris/libris.toml`, or `LIBRIS_CONFIG`)
//! 3. Compiled default (fallback)

use crate::{Error, Result};
use serde::Deserialize;
use std::path::PathBuf;

const DEFAULT_BIND_ADDRESS: &str = "127.0.0.1";
const DEFAULT_PORT: u16 = 7151;

/// Resolved service configuration
#[derive(Debug, Clone)]
pub struct Config {
    pub bind_address: String,
    pub port: u16,
    pub database_path: PathBuf,
}

/// On-disk TOML shape; every field optional so a partial file is valid
#[derive(Debug, Default, Deserialize)]
struct TomlConfig {
    bind_address: Option<String>,
    port: Option<u16>,
    database_path: Option<PathBuf>,
}

impl Config {
    /// Load configuration with env → TOML → default priority
    pub fn load() -> Result<Self> {
        let toml_config = load_toml_config()?;

        let bind_address = std::env::var("LIBRIS_BIND_ADDRESS")
            .ok()
            .or(toml_config.bind_address)
            .unwrap_or_else(|| DEFAULT_BIND_ADDRESS.to_string());

        let port = match std::env::var("LIBRIS_PORT") {
            Ok(raw) => raw
                .parse::<u16>()
                .map_err(|_| Error::Config(format!("Invalid LIBRIS_PORT: {}", raw)))?,
            Err(_) => toml_config.port.unwrap_or(DEFAULT_PORT),
        };

        let database_path = std::env::var("LIBRIS_DB")
            .map(PathBuf::from)
            .ok()
            .or(toml_config.database_path)
            .unwrap_or_else(default_database_path);

        Ok(Self {
            bind_address,
            port,
            database_path,
        })
    }
}

/// Read the TOML config file if one exists; missing file is not an error
fn load_toml_config() -> Result<TomlConfig> {
    let path = match config_file_path() {
        Some(path) if path.exists() => path,
        _ => return Ok(TomlConfig::default()),
    };

    let content = std::fs::read_to_string(&path)
        .map_err(|e| Error::Config(format!("Failed to read {}: {}", path.display(), e)))?;
    let config: TomlConfig = toml::from_str(&content)
        .map_err(|e| Error::Config(format!("Failed to parse {}: {}", path.display(), e)))?;

    tracing::debug!("Loaded config file: {}", path.display());
    Ok(config)
}

/// Config file location: explicit override via LIBRIS_CONFIG, otherwise the
/// platform config directory
fn config_file_path() -> Option<PathBuf> {
    if let Ok(path) = std::env::var("LIBRIS_CONFIG") {
        return Some(PathBuf::from(path));
    }
    dirs::config_dir().map(|d| d.join("libris").join("libris.toml"))
}

/// Default database location under the platform data directory
fn default_database_path() -> PathBuf {
    dirs::data_local_dir()
        .map(|d| d.join("libris").join("libris.db"))
        .unwrap_or_else(|| PathBuf::from("./libris.db"))
}
