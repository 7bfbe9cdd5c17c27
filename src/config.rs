//! Layered configuration.
//!
//! Sources, lowest precedence first:
//!
//! 1. built-in defaults (below)
//! 2. `toolbox.toml` in the working directory, or the file given with `--config`
//! 3. environment variables prefixed `TOOLBOX`, `__` between sections
//!    (`TOOLBOX_SERVER__PORT=9000`, `TOOLBOX_HTTP__ENABLE_CORS=false`)
//! 4. command-line flags, applied by `main` via [`Config::with_overrides`]

use std::net::SocketAddr;
use std::time::Duration;

use serde::Deserialize;

use crate::error::Error;

/// Default configuration file name, without extension.
pub const DEFAULT_CONFIG_FILE: &str = "toolbox";

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub server: ServerConfig,
    pub http: HttpConfig,
    pub logging: LoggingConfig,
    pub fetch: FetchConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Deserialize, Clone)]
pub struct HttpConfig {
    pub enable_cors: bool,
    /// Largest request body accepted, in bytes. Larger bodies get `413`.
    pub max_body_size: u64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct LoggingConfig {
    /// Default `tracing` filter when `RUST_LOG` is unset.
    pub level: String,
    pub access_log: bool,
}

/// Outbound HTTP settings for the image extractor.
#[derive(Debug, Deserialize, Clone)]
pub struct FetchConfig {
    pub timeout_secs: u64,
    pub user_agent: String,
    /// Largest page body read, in bytes.
    pub max_page_size: u64,
}

impl FetchConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl Config {
    /// Loads configuration from `path` (no extension; any format the
    /// `config` crate understands) layered over defaults and environment.
    pub fn load_from(path: &str) -> Result<Self, Error> {
        let settings = config::Config::builder()
            .set_default("server.host", "127.0.0.1")?
            .set_default("server.port", 5000)?
            .set_default("http.enable_cors", true)?
            .set_default("http.max_body_size", 1_048_576)? // 1 MiB
            .set_default("logging.level", "info")?
            .set_default("logging.access_log", true)?
            .set_default("fetch.timeout_secs", 10)?
            .set_default("fetch.user_agent", concat!("toolbox/", env!("CARGO_PKG_VERSION")))?
            .set_default("fetch.max_page_size", 5_242_880)? // 5 MiB
            .add_source(config::File::with_name(path).required(false))
            .add_source(
                config::Environment::with_prefix("TOOLBOX")
                    .prefix_separator("_")
                    .separator("__"),
            )
            .build()?;

        Ok(settings.try_deserialize()?)
    }

    /// Loads `toolbox.toml` (if present) over defaults and environment.
    pub fn load() -> Result<Self, Error> {
        Self::load_from(DEFAULT_CONFIG_FILE)
    }

    /// Applies command-line overrides on top of the loaded sources.
    pub fn with_overrides(mut self, host: Option<String>, port: Option<u16>) -> Self {
        if let Some(host) = host {
            self.server.host = host;
        }
        if let Some(port) = port {
            self.server.port = port;
        }
        self
    }

    pub fn socket_addr(&self) -> Result<SocketAddr, Error> {
        let addr = format!("{}:{}", self.server.host, self.server.port);
        addr.parse().map_err(|_| Error::InvalidAddress(addr))
    }
}
