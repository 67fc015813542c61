//! # Kestrel Types Crate
//!
//! Chain primitives shared across the node: fixed-size hash and key types,
//! the Keccak-256 content hash, network parameters, atomic-unit amount
//! formatting, and wallet address validation.
//!
//! Consensus rules, transaction construction, and wallet key handling live
//! in their own crates; this one only holds what several subsystems need
//! to agree on.

#![warn(clippy::all)]
#![deny(unsafe_code)]

pub mod address;
pub mod amounts;
pub mod hash;
pub mod params;

pub use address::AddressError;
pub use hash::{fast_hash, Hash, PublicKey};
