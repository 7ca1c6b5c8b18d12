use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::info;

#[derive(Debug, Deserialize, Clone, Default)]
#[serde(default)]
pub struct BoardConfig {
    pub server: ServerConfig,
    pub storage: StorageConfig,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub log_level: String,
    /// The single origin allowed to make cross-origin requests.
    pub allowed_origin: String,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct StorageConfig {
    pub db_path: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".into(),
            port: 8000,
            log_level: "info".into(),
            allowed_origin: "https://b7-9414.github.io".into(),
        }
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            db_path: "ideas.db".into(),
        }
    }
}

/// Returns the default config file path: `./ideaboard.toml`
pub fn default_config_path() -> PathBuf {
    PathBuf::from("ideaboard.toml")
}

impl BoardConfig {
    /// Load config from the default TOML file (if it exists) then apply env var overrides.
    pub fn load() -> Result<Self> {
        Self::load_from(default_config_path())
    }

    /// Load from a specific path, then apply env var overrides.
    pub fn load_from(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let mut config = if path.exists() {
            let contents =
                std::fs::read_to_string(path).context("failed to read config file")?;
            toml::from_str(&contents).context("failed to parse config TOML")?
        } else {
            info!("no config file at {}, using defaults", path.display());
            BoardConfig::default()
        };

        config.apply_env_overrides()?;
        Ok(config)
    }

    /// Apply environment variable overrides (IDEABOARD_DB, IDEABOARD_HOST, IDEABOARD_PORT,
    /// IDEABOARD_LOG_LEVEL, IDEABOARD_ALLOWED_ORIGIN).
    fn apply_env_overrides(&mut self) -> Result<()> {
        if let Ok(val) = std::env::var("IDEABOARD_DB") {
            self.storage.db_path = val;
        }
        if let Ok(val) = std::env::var("IDEABOARD_HOST") {
            self.server.host = val;
        }
        if let Ok(val) = std::env::var("IDEABOARD_PORT") {
            self.server.port = val
                .parse()
                .with_context(|| format!("invalid IDEABOARD_PORT: {val}"))?;
        }
        if let Ok(val) = std::env::var("IDEABOARD_LOG_LEVEL") {
            self.server.log_level = val;
        }
        if let Ok(val) = std::env::var("IDEABOARD_ALLOWED_ORIGIN") {
            self.server.allowed_origin = val;
        }
        Ok(())
    }

    /// Resolve the database path, expanding `~` if needed.
    pub fn resolved_db_path(&self) -> PathBuf {
        expand_tilde(&self.storage.db_path)
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}

pub fn expand_tilde(path: &str) -> PathBuf {
    match (path.strip_prefix("~/"), dirs::home_dir()) {
        (Some(rest), Some(home)) => home.join(rest),
        _ => PathBuf::from(path),
    }
}
