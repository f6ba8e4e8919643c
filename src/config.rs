use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::info;

#[derive(Debug, Deserialize, Clone, Default)]
#[serde(default)]
pub struct NotebookConfig {
    pub server: ServerConfig,
    pub storage: StorageConfig,
    pub lookup: LookupConfig,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub log_level: String,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct StorageConfig {
    pub path: String,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct LookupConfig {
    pub endpoint: String,
    pub user_agent: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "localhost".into(),
            port: 8000,
            log_level: "info".into(),
        }
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            path: "notes_database.xml".into(),
        }
    }
}

impl Default for LookupConfig {
    fn default() -> Self {
        Self {
            endpoint: "https://en.wikipedia.org/w/api.php".into(),
            user_agent: concat!("notebook/", env!("CARGO_PKG_VERSION")).into(),
        }
    }
}

/// Returns `~/.notebook/`, or the current directory when there is no home.
pub fn default_notebook_dir() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".notebook")
}

/// Returns the default config file path: `~/.notebook/config.toml`
pub fn default_config_path() -> PathBuf {
    default_notebook_dir().join("config.toml")
}

impl NotebookConfig {
    /// Load config from TOML file (if it exists) then apply env var overrides.
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
            NotebookConfig::default()
        };

        config.apply_env_overrides()?;
        Ok(config)
    }

    /// Apply environment variable overrides
    /// (NOTEBOOK_DB, NOTEBOOK_HOST, NOTEBOOK_PORT, NOTEBOOK_LOG_LEVEL).
    fn apply_env_overrides(&mut self) -> Result<()> {
        if let Ok(val) = std::env::var("NOTEBOOK_DB") {
            self.storage.path = val;
        }
        if let Ok(val) = std::env::var("NOTEBOOK_HOST") {
            self.server.host = val;
        }
        if let Ok(val) = std::env::var("NOTEBOOK_PORT") {
            self.server.port = val
                .parse()
                .with_context(|| format!("NOTEBOOK_PORT is not a valid port: {val}"))?;
        }
        if let Ok(val) = std::env::var("NOTEBOOK_LOG_LEVEL") {
            self.server.log_level = val;
        }
        Ok(())
    }

    /// Resolve the document path, expanding `~` if needed.
    pub fn resolved_store_path(&self) -> PathBuf {
        expand_tilde(&self.storage.path)
    }

    /// `host:port` the server binds to and the client connects to.
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }

    /// URL of the JSON-RPC endpoint.
    pub fn rpc_url(&self) -> String {
        format!("http://{}/rpc", self.bind_addr())
    }
}

pub fn expand_tilde(path: &str) -> PathBuf {
    match (path.strip_prefix("~/"), dirs::home_dir()) {
        (Some(rest), Some(home)) => home.join(rest),
        _ => PathBuf::from(path),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_matches_fixed_interface() {
        let config = NotebookConfig::default();
        assert_eq!(config.server.host, "localhost");
        assert_eq!(config.server.port, 8000);
        assert_eq!(config.server.log_level, "info");
        assert_eq!(config.storage.path, "notes_database.xml");
        assert_eq!(config.lookup.endpoint, "https://en.wikipedia.org/w/api.php");
        assert_eq!(config.rpc_url(), "http://localhost:8000/rpc");
    }

    #[test]
    fn parse_toml_config() {
        let toml_str = r#"
[server]
port = 9100

[storage]
path = "/tmp/notes.xml"
"#;
        let config: NotebookConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.server.port, 9100);
        assert_eq!(config.storage.path, "/tmp/notes.xml");
        // defaults still apply for unset fields
        assert_eq!(config.server.host, "localhost");
        assert_eq!(config.server.log_level, "info");
        assert!(config.lookup.user_agent.starts_with("notebook/"));
    }

    #[test]
    fn env_overrides_apply() {
        let mut config = NotebookConfig::default();
        std::env::set_var("NOTEBOOK_DB", "/tmp/override.xml");
        std::env::set_var("NOTEBOOK_HOST", "127.0.0.1");
        std::env::set_var("NOTEBOOK_PORT", "8123");
        std::env::set_var("NOTEBOOK_LOG_LEVEL", "trace");

        config.apply_env_overrides().unwrap();

        assert_eq!(config.storage.path, "/tmp/override.xml");
        assert_eq!(config.bind_addr(), "127.0.0.1:8123");
        assert_eq!(config.server.log_level, "trace");

        // Clean up
        std::env::remove_var("NOTEBOOK_DB");
        std::env::remove_var("NOTEBOOK_HOST");
        std::env::remove_var("NOTEBOOK_PORT");
        std::env::remove_var("NOTEBOOK_LOG_LEVEL");
    }

    #[test]
    fn tilde_expands_to_home() {
        let expanded = expand_tilde("~/notes.xml");
        if let Some(home) = dirs::home_dir() {
            assert_eq!(expanded, home.join("notes.xml"));
        }
        assert_eq!(expand_tilde("plain.xml"), PathBuf::from("plain.xml"));
    }
}
