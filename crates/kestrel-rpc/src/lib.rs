//! Daemon RPC server - the externally reachable HTTP interface of a Kestrel
//! node.
//!
//! Wallets, block explorers, and peers use this surface to query chain
//! state, submit raw transactions, and fetch decoy outputs for ring
//! signature construction. It is the trust boundary between untrusted
//! network callers and the node's internal subsystems.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                      DAEMON RPC SERVER                       │
//! ├──────────────────────────────────────────────────────────────┤
//! │   HTTP listener (axum, single catch-all dispatch)            │
//! │        │                                                     │
//! │   Route table ── (method, path) → handler, tier, body flag   │
//! │        │                                                     │
//! │   Middleware pipeline                                        │
//! │     log → CORS → body parse → permission gate → handler      │
//! │     → panic containment → status assignment                  │
//! │        │                                                     │
//! │   Handlers: info / fee / height / peers                      │
//! │             sendrawtransaction / getrandom_outs              │
//! └────────┼─────────────────────────────────────────────────────┘
//!          │
//!   ┌──────┼──────────┬──────────────┐
//!   ▼      ▼          ▼              ▼
//! Ledger  PeerNet  SyncManager   (other node subsystems)
//! ```
//!
//! The blockchain engine (Ledger), the peer-to-peer stack (PeerNet), and
//! the chain synchronizer (SyncManager) are owned elsewhere in the node and
//! reached through the traits in [`ports`].
//!
//! # Usage
//!
//! ```ignore
//! use kestrel_rpc::{RpcConfig, RpcServer};
//!
//! let config = RpcConfig::default();
//! let mut server = RpcServer::new(config, ledger, peer_net, sync_manager)?;
//! server.start().await?;
//! ```

#![warn(clippy::all)]
#![deny(unsafe_code)]

pub mod config;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod permissions;
pub mod ports;
pub mod response;
pub mod routes;
pub mod server;


// Re-exports for public API
pub use config::{ConfigError, RpcConfig};
pub use error::{codes, ErrorKind, RpcError, RpcResult, ServerError};
pub use handlers::Handlers;
pub use permissions::RpcMode;
pub use ports::{BlockDetails, Ledger, PeerNet, SyncManager};
pub use routes::{HandlerKind, PathPattern, RouteEntry, RouteTable};
pub use server::RpcServer;

/// Crate version, reported by the /info endpoint.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
