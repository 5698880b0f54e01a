//! Error types for the gateway startup path.
//!
//! Authorization failures are deliberately not represented here: the
//! request gate answers them locally with a fixed 401 and they never
//! surface as server errors.

use thiserror::Error;

/// Unified error type for gateway startup and configuration.
#[derive(Debug, Error)]
pub enum GatewayError {
    #[error("configuration error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("missing configuration: {0}")]
    MissingConfig(&'static str),

    #[error("invalid listen address {addr}: {source}")]
    InvalidListenAddr {
        addr: String,
        source: std::net::AddrParseError,
    },
}

/// Result type alias for gateway operations.
pub type GatewayResult<T> = Result<T, GatewayError>;
