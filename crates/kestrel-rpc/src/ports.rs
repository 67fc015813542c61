//! Collaborator interfaces the gateway calls into.
//!
//! The blockchain engine, the peer-to-peer stack, and the chain
//! synchronizer are owned elsewhere in the node; the gateway sees them
//! through these traits only. All three are shared concurrently with other
//! subsystems, so implementations must be thread-safe, and the gateway
//! never assumes exclusive access.

use async_trait::async_trait;
use kestrel_types::PublicKey;

/// Version fields of a stored block.
#[derive(Debug, Clone, Copy, Default)]
pub struct BlockDetails {
    /// Consensus major version the block was mined under.
    pub major_version: u64,
    /// Minor version (miner vote field).
    pub minor_version: u64,
}

/// The blockchain engine: chain index, mempool admission, output index.
#[async_trait]
pub trait Ledger: Send + Sync {
    /// Index of the current top block.
    async fn top_block_index(&self) -> u64;

    /// Version fields of the block at `index`.
    async fn block_details(&self, index: u64) -> BlockDetails;

    /// Difficulty the next block must meet.
    async fn next_difficulty(&self) -> u64;

    /// Total transactions stored on-chain, coinbase included.
    async fn transaction_count(&self) -> u64;

    /// Transactions currently waiting in the pool.
    async fn pool_size(&self) -> u64;

    /// Blocks held on alternative branches.
    async fn alternative_block_count(&self) -> u64;

    /// Unix timestamp the node came up at.
    async fn start_time(&self) -> u64;

    /// Validate `transaction` and admit it to the pool.
    ///
    /// # Errors
    /// Returns the rejection reason (double spend, invalid signature,
    /// already in pool, ...) when admission fails.
    async fn admit_transaction(&self, transaction: Vec<u8>) -> Result<(), String>;

    /// Sample up to `count` spendable outputs of `amount` for use as ring
    /// signature decoys.
    ///
    /// Returns parallel vectors of global output indexes and output keys.
    /// May return fewer than `count` entries when the amount is rare
    /// on-chain; callers must check the returned length.
    async fn sample_outputs(&self, amount: u64, count: u64) -> (Vec<u32>, Vec<PublicKey>);
}

/// The peer-to-peer transport and peer-list bookkeeping.
#[async_trait]
pub trait PeerNet: Send + Sync {
    /// Live connections, inbound and outbound.
    async fn connection_count(&self) -> u64;

    /// Live outbound connections.
    async fn outgoing_connection_count(&self) -> u64;

    /// Peers on the white (known-good) list.
    async fn white_peer_count(&self) -> u64;

    /// Peers on the gray (candidate) list.
    async fn gray_peer_count(&self) -> u64;

    /// Peer addresses as (white, gray) lists.
    async fn list_peers(&self) -> (Vec<String>, Vec<String>);
}

/// Tracks network height and relays transactions to peers.
#[async_trait]
pub trait SyncManager: Send + Sync {
    /// Best chain height reported by connected peers.
    async fn network_height(&self) -> u64;

    /// Highest height this node has observed.
    async fn observed_height(&self) -> u64;

    /// Broadcast raw transactions to connected peers.
    async fn relay_transactions(&self, transactions: Vec<Vec<u8>>);
}
