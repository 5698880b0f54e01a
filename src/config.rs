//! Configuration module for the gateway.
//!
//! Loads configuration from optional files and environment variables. The
//! bearer token is only ever sourced from `MCP_SERVER_BEARER_TOKEN` and is
//! required: the server refuses to start without it.

use config::{Config as ConfigLoader, Environment, File};
use serde::Deserialize;
use std::net::SocketAddr;

use crate::error::{GatewayError, GatewayResult};

/// Environment variable holding the shared secret.
pub const BEARER_TOKEN_ENV: &str = "MCP_SERVER_BEARER_TOKEN";

/// Root configuration structure.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub mcp: McpConfig,
    #[serde(default)]
    pub auth: AuthConfig,
}

/// Server configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

/// Endpoints of the mounted MCP sub-application.
#[derive(Debug, Clone, Deserialize)]
pub struct McpConfig {
    /// SSE endpoint clients subscribe to for server responses.
    #[serde(default = "default_sse_path")]
    pub sse_path: String,
    /// Endpoint clients POST their messages to.
    #[serde(default = "default_message_path")]
    pub message_path: String,
}

/// Authentication configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct AuthConfig {
    /// Shared secret for the `Bearer` scheme. Populated from
    /// `MCP_SERVER_BEARER_TOKEN`; empty means unset.
    #[serde(default)]
    pub bearer_token: String,
    /// Path prefixes requiring a bearer credential. `/` protects every
    /// route of the sub-application.
    #[serde(default = "default_protected_prefixes")]
    pub protected_prefixes: Vec<String>,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    9090
}

fn default_sse_path() -> String {
    "/custom-mcp/sse".to_string()
}

fn default_message_path() -> String {
    "/custom-mcp/messages".to_string()
}

fn default_protected_prefixes() -> Vec<String> {
    vec!["/".to_string()]
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

impl Default for McpConfig {
    fn default() -> Self {
        Self {
            sse_path: default_sse_path(),
            message_path: default_message_path(),
        }
    }
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            bearer_token: String::new(),
            protected_prefixes: default_protected_prefixes(),
        }
    }
}

impl Config {
    /// Load configuration from files and environment.
    ///
    /// Priority (highest to lowest):
    /// 1. `MCP_SERVER_BEARER_TOKEN` (token only)
    /// 2. Environment variables (`MCP_GATEWAY_*`, `__` separator)
    /// 3. `config/local.*` (if exists)
    /// 4. `config/default.*`
    pub fn load() -> GatewayResult<Self> {
        let loader = ConfigLoader::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name("config/local").required(false))
            .add_source(
                Environment::with_prefix("MCP_GATEWAY")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        let mut config: Config = loader.try_deserialize()?;

        // The shared secret always comes from its dedicated variable
        if let Ok(token) = std::env::var(BEARER_TOKEN_ENV) {
            config.auth.bearer_token = token;
        }

        config.validate()?;
        Ok(config)
    }

    /// Reject configurations the server must not start with.
    pub fn validate(&self) -> GatewayResult<()> {
        if self.auth.bearer_token.is_empty() {
            return Err(GatewayError::MissingConfig(BEARER_TOKEN_ENV));
        }
        Ok(())
    }

    /// The socket address to bind.
    pub fn listen_addr(&self) -> GatewayResult<SocketAddr> {
        let addr = format!("{}:{}", self.server.host, self.server.port);
        addr.parse()
            .map_err(|source| GatewayError::InvalidListenAddr { addr, source })
    }
}
