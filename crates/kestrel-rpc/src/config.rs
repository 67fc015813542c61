//! RPC server configuration with validation.

use crate::permissions::RpcMode;
use axum::http::HeaderValue;
use kestrel_types::address;
use serde::{Deserialize, Serialize};
use std::net::{IpAddr, Ipv4Addr, SocketAddr};

/// Daemon RPC configuration.
///
/// Immutable once the server is constructed; [`RpcConfig::validate`] runs
/// at construction so a bad fee address or CORS origin aborts startup
/// instead of surfacing per-request.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RpcConfig {
    /// Bind address
    pub host: IpAddr,
    /// Port (default: 12898)
    pub port: u16,
    /// CORS origin sent back in Access-Control-Allow-Origin (empty = CORS disabled)
    pub cors_origin: String,
    /// Node operator fee address (empty = fee collection disabled)
    pub fee_address: String,
    /// Node operator fee in atomic units
    pub fee_amount: u64,
    /// Which route tier this daemon exposes
    pub mode: RpcMode,
}

impl Default for RpcConfig {
    fn default() -> Self {
        Self {
            host: IpAddr::V4(Ipv4Addr::new(0, 0, 0, 0)),
            port: 12898,
            cors_origin: String::new(),
            fee_address: String::new(),
            fee_amount: 0,
            mode: RpcMode::Default,
        }
    }
}

impl RpcConfig {
    /// Validate configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        // A non-empty fee address must look like a real wallet address,
        // otherwise every fee-paying wallet would send coins into the void
        if !self.fee_address.is_empty() {
            address::validate(&self.fee_address)
                .map_err(|e| ConfigError::InvalidFeeAddress(e.to_string()))?;
        }

        // The origin goes out verbatim as a header value on every response
        if !self.cors_origin.is_empty() && HeaderValue::from_str(&self.cors_origin).is_err() {
            return Err(ConfigError::InvalidCorsOrigin(self.cors_origin.clone()));
        }

        Ok(())
    }

    /// Get the socket address to bind the listener to
    pub fn bind_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }

    /// CORS origin as a ready-made header value, if configured
    pub fn cors_header(&self) -> Option<HeaderValue> {
        if self.cors_origin.is_empty() {
            None
        } else {
            HeaderValue::from_str(&self.cors_origin).ok()
        }
    }
}

/// Configuration errors
#[derive(Debug, Clone, thiserror::Error)]
pub enum ConfigError {
    /// Fee address failed wallet address validation
    #[error("fee address given is not valid: {0}")]
    InvalidFeeAddress(String),
    /// CORS origin is not a legal header value
    #[error("invalid CORS origin: {0}")]
    InvalidCorsOrigin(String),
}
