//! Wallet address shape validation.
//!
//! Full address decoding (checksum verification, embedded spend/view keys)
//! lives in the wallet crates. The node only needs to know whether a
//! configured string could be a real address, so this module checks the
//! network prefix, the overall length, and the base58 alphabet.

use crate::params::{ADDRESS_LENGTH, ADDRESS_PREFIX};
use thiserror::Error;

/// Characters legal in an address body. Base58 omits 0, O, I, and l.
const BASE58_ALPHABET: &str = "123456789ABCDEFGHJKLMNPQRSTUVWXYZabcdefghijkmnopqrstuvwxyz";

/// Why an address string failed validation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AddressError {
    /// Missing the network prefix.
    #[error("address does not start with the {0} prefix")]
    WrongPrefix(&'static str),

    /// Wrong overall length.
    #[error("address is {0} characters long, expected {1}")]
    WrongLength(usize, usize),

    /// Contains a character outside the base58 alphabet.
    #[error("address contains invalid character '{0}'")]
    InvalidCharacter(char),
}

/// Check that `address` has the shape of a standard wallet address.
///
/// # Errors
/// Returns the first shape violation found: prefix, then length, then
/// alphabet.
pub fn validate(address: &str) -> Result<(), AddressError> {
    if !address.starts_with(ADDRESS_PREFIX) {
        return Err(AddressError::WrongPrefix(ADDRESS_PREFIX));
    }

    if address.len() != ADDRESS_LENGTH {
        return Err(AddressError::WrongLength(address.len(), ADDRESS_LENGTH));
    }

    if let Some(bad) = address.chars().find(|c| !BASE58_ALPHABET.contains(*c)) {
        return Err(AddressError::InvalidCharacter(bad));
    }

    Ok(())
}
