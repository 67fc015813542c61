//! Read-only node state handlers.

use crate::config::RpcConfig;
use crate::error::RpcResult;
use crate::handlers::to_value;
use crate::ports::{Ledger, PeerNet, SyncManager};
use crate::response::STATUS_OK;
use axum::http::StatusCode;
use kestrel_types::params;
use serde::Serialize;
use serde_json::Value;
use std::sync::Arc;
use tracing::instrument;

/// `/info` response body, field for field what the original daemon line
/// reported. Wallets and explorers parse these keys.
#[derive(Debug, Serialize)]
struct InfoResponse {
    height: u64,
    difficulty: u64,
    tx_count: u64,
    tx_pool_size: u64,
    alt_blocks_count: u64,
    outgoing_connections_count: u64,
    incoming_connections_count: u64,
    white_peerlist_size: u64,
    grey_peerlist_size: u64,
    last_known_block_index: u64,
    network_height: u64,
    upgrade_heights: &'static [u64],
    supported_height: u64,
    hashrate: u64,
    synced: bool,
    major_version: u64,
    minor_version: u64,
    version: &'static str,
    status: &'static str,
    start_time: u64,
}

#[derive(Debug, Serialize)]
struct FeeResponse {
    address: String,
    amount: u64,
    status: &'static str,
}

#[derive(Debug, Serialize)]
struct HeightResponse {
    height: u64,
    network_height: u64,
    status: &'static str,
}

#[derive(Debug, Serialize)]
struct PeersResponse {
    peers: Vec<String>,
    peers_gray: Vec<String>,
    status: &'static str,
}

/// Node state methods handler
pub struct NodeRpc {
    fee_address: String,
    fee_amount: u64,
    ledger: Arc<dyn Ledger>,
    peer_net: Arc<dyn PeerNet>,
    sync: Arc<dyn SyncManager>,
}

impl NodeRpc {
    pub fn new(
        config: &RpcConfig,
        ledger: Arc<dyn Ledger>,
        peer_net: Arc<dyn PeerNet>,
        sync: Arc<dyn SyncManager>,
    ) -> Self {
        Self {
            fee_address: config.fee_address.clone(),
            fee_amount: config.fee_amount,
            ledger,
            peer_net,
            sync,
        }
    }

    /// `/info` - Aggregated chain, pool, and peer state
    #[instrument(skip(self))]
    pub async fn info(&self) -> RpcResult<(StatusCode, Value)> {
        let top_index = self.ledger.top_block_index().await;
        let height = top_index + 1;
        // Peers that have not completed a handshake report 0; the floor
        // keeps the subtraction below well-defined.
        let network_height = self.sync.network_height().await.max(1);
        let details = self.ledger.block_details(top_index).await;
        let difficulty = self.ledger.next_difficulty().await;

        let total_connections = self.peer_net.connection_count().await;
        let outgoing_connections = self.peer_net.outgoing_connection_count().await;

        let body = InfoResponse {
            height,
            difficulty,
            // One coinbase per block, so subtracting the height leaves the
            // transfer count.
            tx_count: self.ledger.transaction_count().await.saturating_sub(height),
            tx_pool_size: self.ledger.pool_size().await,
            alt_blocks_count: self.ledger.alternative_block_count().await,
            outgoing_connections_count: outgoing_connections,
            incoming_connections_count: total_connections.saturating_sub(outgoing_connections),
            white_peerlist_size: self.peer_net.white_peer_count().await,
            grey_peerlist_size: self.peer_net.gray_peer_count().await,
            last_known_block_index: self.sync.observed_height().await.max(1) - 1,
            network_height,
            upgrade_heights: &params::FORK_HEIGHTS,
            supported_height: params::supported_height(),
            hashrate: difficulty / params::DIFFICULTY_TARGET,
            synced: height == network_height,
            major_version: details.major_version,
            minor_version: details.minor_version,
            version: crate::VERSION,
            status: STATUS_OK,
            start_time: self.ledger.start_time().await,
        };

        Ok((StatusCode::OK, to_value(body)?))
    }

    /// `/fee` - Node operator fee configuration, verbatim
    #[instrument(skip(self))]
    pub async fn fee(&self) -> RpcResult<(StatusCode, Value)> {
        let body = FeeResponse {
            address: self.fee_address.clone(),
            amount: self.fee_amount,
            status: STATUS_OK,
        };

        Ok((StatusCode::OK, to_value(body)?))
    }

    /// `/height` - Local and network chain heights
    #[instrument(skip(self))]
    pub async fn height(&self) -> RpcResult<(StatusCode, Value)> {
        let body = HeightResponse {
            height: self.ledger.top_block_index().await + 1,
            network_height: self.sync.network_height().await.max(1),
            status: STATUS_OK,
        };

        Ok((StatusCode::OK, to_value(body)?))
    }

    /// `/peers` - White and gray peer lists
    #[instrument(skip(self))]
    pub async fn peers(&self) -> RpcResult<(StatusCode, Value)> {
        let (white, gray) = self.peer_net.list_peers().await;

        let body = PeersResponse {
            peers: white,
            peers_gray: gray,
            status: STATUS_OK,
        };

        Ok((StatusCode::OK, to_value(body)?))
    }
}
