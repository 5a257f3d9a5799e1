//! Configuration for framewire
//!
//! Centralized configuration with sensible defaults. The client reads its
//! settings from a `KEY=VALUE` properties file; the server is configured
//! through a builder.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{Result, WireError};

/// Default service port
pub const DEFAULT_PORT: &str = "4444";

/// Default client configuration file
pub const DEFAULT_CLIENT_CONFIG: &str = "cliente.config";

// =============================================================================
// Properties File
// =============================================================================

/// Parsed `KEY=VALUE` file
///
/// Blank lines and lines starting with `#` are ignored. Keys and values are
/// trimmed. A later duplicate key replaces an earlier one.
#[derive(Debug, Clone, Default)]
pub struct Properties {
    values: HashMap<String, String>,
}

impl Properties {
    /// Read and parse a properties file
    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path).map_err(|e| {
            WireError::Config(format!("cannot read config file {}: {}", path.display(), e))
        })?;
        Self::parse(&text)
    }

    /// Parse properties from text
    pub fn parse(text: &str) -> Result<Self> {
        let mut values = HashMap::new();

        for (lineno, line) in text.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            let (key, value) = line.split_once('=').ok_or_else(|| {
                WireError::Config(format!("line {}: expected KEY=VALUE, got {:?}", lineno + 1, line))
            })?;

            let key = key.trim();
            if key.is_empty() {
                return Err(WireError::Config(format!("line {}: empty key", lineno + 1)));
            }
            values.insert(key.to_string(), value.trim().to_string());
        }

        Ok(Self { values })
    }

    /// Look up a key
    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }

    /// Look up the first key present among `keys`, failing if none are
    pub fn require(&self, keys: &[&str]) -> Result<&str> {
        keys.iter()
            .find_map(|k| self.get(k))
            .ok_or_else(|| WireError::Config(format!("missing required key {}", keys.join(" / "))))
    }
}

// =============================================================================
// Client Configuration
// =============================================================================

/// Settings the client needs before it can connect
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Server host or IP address
    pub ip: String,

    /// Server port, as text
    pub port: String,

    /// Value sent to the server as the first message
    pub key: String,
}

impl ClientConfig {
    /// Load from a properties file with `IP`, `PUERTO` and `CLAVE` keys
    ///
    /// `PORT` and `KEY` are accepted as alternatives.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        Self::from_properties(&Properties::load(path.as_ref())?)
    }

    pub fn from_properties(props: &Properties) -> Result<Self> {
        Ok(Self {
            ip: props.require(&["IP"])?.to_string(),
            port: props.require(&["PUERTO", "PORT"])?.to_string(),
            key: props.require(&["CLAVE", "KEY"])?.to_string(),
        })
    }
}

// =============================================================================
// Server Configuration
// =============================================================================

/// Main configuration for a server instance
#[derive(Debug, Clone)]
pub struct ServerConfig {
    // -------------------------------------------------------------------------
    // Network Configuration
    // -------------------------------------------------------------------------
    /// Local address to bind
    pub bind_host: String,

    /// Port to listen on, as text
    pub port: String,

    // -------------------------------------------------------------------------
    // Logging Configuration
    // -------------------------------------------------------------------------
    /// Log file, in addition to the console
    pub log_file: Option<PathBuf>,

    /// Default log level when `RUST_LOG` is unset
    pub log_level: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_host: "0.0.0.0".to_string(),
            port: DEFAULT_PORT.to_string(),
            log_file: Some(PathBuf::from("server.log")),
            log_level: "debug".to_string(),
        }
    }
}

impl ServerConfig {
    /// Create a new config builder
    pub fn builder() -> ServerConfigBuilder {
        ServerConfigBuilder::default()
    }
}

/// Builder for ServerConfig
#[derive(Default)]
pub struct ServerConfigBuilder {
    config: ServerConfig,
}

impl ServerConfigBuilder {
    /// Set the local bind address
    pub fn bind_host(mut self, host: impl Into<String>) -> Self {
        self.config.bind_host = host.into();
        self
    }

    /// Set the listen port
    pub fn port(mut self, port: impl Into<String>) -> Self {
        self.config.port = port.into();
        self
    }

    /// Set (or clear) the log file
    pub fn log_file(mut self, path: Option<PathBuf>) -> Self {
        self.config.log_file = path;
        self
    }

    /// Set the default log level
    pub fn log_level(mut self, level: impl Into<String>) -> Self {
        self.config.log_level = level.into();
        self
    }

    pub fn build(self) -> ServerConfig {
        self.config
    }
}
