//! Hashing primitives and fixed-size key types.

use sha3::{Digest, Keccak256};

/// A 32-byte hash.
pub type Hash = [u8; 32];

/// A 32-byte output public key.
pub type PublicKey = [u8; 32];

/// Keccak-256 content hash of arbitrary bytes.
///
/// Transactions are identified on the wire by the fast hash of their raw
/// serialized bytes.
pub fn fast_hash(data: &[u8]) -> Hash {
    let mut hasher = Keccak256::new();
    hasher.update(data);
    hasher.finalize().into()
}
