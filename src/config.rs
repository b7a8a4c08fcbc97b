//! Server configuration.

use std::net::SocketAddr;

use thiserror::Error;

// Environment variable names for configuration.

/// Bind address environment variable.
pub const ENV_BIND_ADDR: &str = "TRUNCATED_DECOMP_BIND_ADDR";
/// Maximum request body size environment variable.
pub const ENV_MAX_BODY_SIZE: &str = "TRUNCATED_DECOMP_MAX_BODY_SIZE";

/// Default bind address.
pub const DEFAULT_BIND_ADDR: &str = "127.0.0.1:5000";
/// Default maximum request body size (16MB).
pub const DEFAULT_MAX_BODY_SIZE: usize = 16 * 1024 * 1024;

/// Configuration error.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// An environment variable holds an unparsable value.
    #[error("invalid {key}: {message}")]
    InvalidValue { key: &'static str, message: String },
}

/// Environment variable parsing helpers.
mod env_parse {
    use std::net::SocketAddr;

    use super::ConfigError;

    /// Parse a socket address from an environment variable.
    pub fn parse_socket_addr(key: &'static str) -> Option<Result<SocketAddr, ConfigError>> {
        std::env::var(key).ok().map(|val| {
            val.parse().map_err(|e| ConfigError::InvalidValue {
                key,
                message: format!("{e}"),
            })
        })
    }

    /// Parse a usize from an environment variable.
    pub fn parse_usize(key: &'static str) -> Option<Result<usize, ConfigError>> {
        std::env::var(key).ok().map(|val| {
            val.parse().map_err(|e| ConfigError::InvalidValue {
                key,
                message: format!("{e}"),
            })
        })
    }
}

/// Server configuration.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Address to bind the server to.
    pub bind_addr: SocketAddr,
    /// Maximum request body size in bytes.
    pub max_body_size: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from(([127, 0, 0, 1], 5000)),
            max_body_size: DEFAULT_MAX_BODY_SIZE,
        }
    }
}

impl ServerConfig {
    /// Create a configuration with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Load configuration from environment variables, falling back to defaults.
    ///
    /// - `TRUNCATED_DECOMP_BIND_ADDR` - Socket address to listen on
    /// - `TRUNCATED_DECOMP_MAX_BODY_SIZE` - Maximum request body size in bytes
    pub fn from_env() -> Result<Self, ConfigError> {
        let mut config = Self::default();

        if let Some(result) = env_parse::parse_socket_addr(ENV_BIND_ADDR) {
            config.bind_addr = result?;
        }
        if let Some(result) = env_parse::parse_usize(ENV_MAX_BODY_SIZE) {
            config.max_body_size = result?;
        }

        Ok(config)
    }

    /// Set the bind address.
    #[must_use]
    pub fn with_bind_addr(mut self, addr: SocketAddr) -> Self {
        self.bind_addr = addr;
        self
    }

    /// Set the maximum request body size.
    #[must_use]
    pub const fn with_max_body_size(mut self, size: usize) -> Self {
        self.max_body_size = size;
        self
    }
}
