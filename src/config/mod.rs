// Configuration module entry point
// Loads layered configuration: built-in defaults, optional config.toml, environment

mod types;

use config::builder::DefaultState;
use config::{ConfigBuilder, ConfigError, Environment, File};
use std::net::{SocketAddr, ToSocketAddrs};

// Re-export public types
pub use types::{AccessLogFormat, Config, LoggingConfig};

/// Environment variable prefix, e.g. `SENTIMENT_SERVER__PORT=9000`
const ENV_PREFIX: &str = "SENTIMENT";

/// Default config file name (without extension)
const DEFAULT_CONFIG_PATH: &str = "config";

impl Config {
    /// Load configuration from the default `config.toml` (if present) and environment
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(DEFAULT_CONFIG_PATH)
    }

    /// Load configuration from specified file path (without extension)
    pub fn load_from(config_path: &str) -> Result<Self, ConfigError> {
        let builder = config::Config::builder()
            .add_source(File::with_name(config_path).required(false))
            .add_source(environment());

        with_defaults(builder)?.build()?.try_deserialize()
    }

    /// Resolve `server.host:server.port` to a bindable address.
    ///
    /// IPv4 results are preferred so that `localhost` binds 127.0.0.1.
    pub fn get_socket_addr(&self) -> Result<SocketAddr, String> {
        let host = self.server.host.as_str();
        let port = self.server.port;
        let addrs: Vec<SocketAddr> = (host, port)
            .to_socket_addrs()
            .map_err(|e| format!("Invalid address {host}:{port}: {e}"))?
            .collect();

        addrs
            .iter()
            .find(|addr| addr.is_ipv4())
            .or_else(|| addrs.first())
            .copied()
            .ok_or_else(|| format!("Address {host}:{port} did not resolve"))
    }

    /// Base URL printed in the startup banner
    pub fn base_url(&self) -> String {
        format!("http://{}:{}", self.server.host, self.server.port)
    }
}

/// `SENTIMENT_`-prefixed variables, `__` between nested keys
fn environment() -> Environment {
    Environment::with_prefix(ENV_PREFIX)
        .prefix_separator("_")
        .separator("__")
        .try_parsing(true)
}

/// Apply built-in defaults; with no file and no environment the server binds
/// localhost:8000 with access logging on.
fn with_defaults(
    builder: ConfigBuilder<DefaultState>,
) -> Result<ConfigBuilder<DefaultState>, ConfigError> {
    builder
        .set_default("server.host", "localhost")?
        .set_default("server.port", 8000)?
        .set_default("logging.access_log", true)?
        .set_default("logging.access_log_format", "common")?
        .set_default("performance.read_timeout", 30)?
        .set_default("performance.backlog", 128)
}

#[cfg(test)]
impl Config {
    /// Defaults only, unaffected by files or environment
    pub fn from_defaults() -> Self {
        with_defaults(config::Config::builder())
            .and_then(|builder| builder.build())
            .and_then(|settings| settings.try_deserialize())
            .expect("defaults must deserialize")
    }
}
