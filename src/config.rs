use std::path::{Path, PathBuf};

use anyhow::Context;
use serde::Deserialize;

/// Top-level server configuration.
///
/// Every field has a default, so an empty YAML document (or no file at all)
/// yields a server on port 8888 serving `index.html` from the working
/// directory.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub server: ServerConfig,
    pub static_files: StaticFilesConfig,
}

/// Listener and connection settings.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Interface to bind; `0.0.0.0` binds all interfaces.
    pub host: String,
    /// TCP port to bind. 0 asks the OS for an ephemeral port.
    pub port: u16,
    /// Pending-connection queue depth passed to `listen`.
    pub backlog: u32,
    /// Read and send chunk size in bytes.
    pub buffer_size: usize,
    /// Largest request head accepted before the connection is refused.
    pub max_request_size: usize,
    /// Upper bound on concurrently served connections.
    pub max_connections: Option<usize>,
}

/// Where documents are served from.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct StaticFilesConfig {
    pub root: PathBuf,
    /// Document served for the target `/`.
    pub index: String,
    /// Reject targets containing `..` or resolving to absolute paths.
    pub confine_to_root: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8888,
            backlog: 10,
            buffer_size: 2048,
            max_request_size: 8192,
            max_connections: None,
        }
    }
}

impl Default for StaticFilesConfig {
    fn default() -> Self {
        Self {
            root: PathBuf::from("."),
            index: "index.html".to_string(),
            confine_to_root: true,
        }
    }
}

impl ServerConfig {
    pub fn listen_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl Config {
    /// Loads configuration from the YAML file named by `DOCSERVE_CONFIG`,
    /// falling back to defaults, then applies the `PORT` override.
    pub fn load() -> anyhow::Result<Self> {
        let mut cfg = match std::env::var("DOCSERVE_CONFIG") {
            Ok(path) => Self::parse_yaml(&read_config_file(path.as_ref())?)?,
            Err(_) => Self::default(),
        };

        if let Ok(port) = std::env::var("PORT") {
            cfg.server.port = port
                .parse()
                .with_context(|| format!("invalid PORT value {:?}", port))?;
        }

        cfg.validate()?;
        Ok(cfg)
    }

    pub fn from_file(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        Self::from_yaml_str(&read_config_file(path.as_ref())?)
    }

    pub fn from_yaml_str(text: &str) -> anyhow::Result<Self> {
        let cfg = Self::parse_yaml(text)?;
        cfg.validate()?;
        Ok(cfg)
    }

    fn parse_yaml(text: &str) -> anyhow::Result<Self> {
        // serde_yaml rejects an empty document, which should mean "all defaults"
        if text.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(text).context("failed to parse config")
    }

    fn validate(&self) -> anyhow::Result<()> {
        if self.server.buffer_size == 0 {
            anyhow::bail!("server.buffer_size must be greater than zero");
        }
        if self.server.backlog == 0 {
            anyhow::bail!("server.backlog must be greater than zero");
        }
        if self.server.max_request_size == 0 {
            anyhow::bail!("server.max_request_size must be greater than zero");
        }
        if self.server.max_connections == Some(0) {
            anyhow::bail!("server.max_connections must be greater than zero when set");
        }
        Ok(())
    }
}

fn read_config_file(path: &Path) -> anyhow::Result<String> {
    std::fs::read_to_string(path)
        .with_context(|| format!("failed to read config file {}", path.display()))
}
