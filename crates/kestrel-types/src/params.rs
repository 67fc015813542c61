//! Network parameters.
//!
//! Consensus-adjacent constants the rest of the node (and the RPC surface)
//! reports to wallets. Changing any of these is a network fork.

/// Currency ticker.
pub const TICKER: &str = "KSL";

/// Decimal places in one KSL.
pub const DECIMAL_PLACES: u32 = 6;

/// Atomic units per KSL.
pub const COIN: u64 = 1_000_000;

/// Target seconds between blocks.
pub const DIFFICULTY_TARGET: u64 = 30;

/// Block heights at which consensus upgrades activate, oldest first.
pub const FORK_HEIGHTS: [u64; 6] = [1, 30_000, 120_000, 310_000, 620_000, 950_000];

/// Index into [`FORK_HEIGHTS`] of the fork this build supports.
pub const CURRENT_FORK_INDEX: usize = 4;

/// Prefix every standard wallet address starts with.
pub const ADDRESS_PREFIX: &str = "KSL";

/// Length of a standard wallet address, prefix included.
pub const ADDRESS_LENGTH: usize = 99;

/// Activation height of the fork this build supports, 0 when no forks are
/// defined.
pub fn supported_height() -> u64 {
    FORK_HEIGHTS.get(CURRENT_FORK_INDEX).copied().unwrap_or(0)
}
