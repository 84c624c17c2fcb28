//! Canonical leaf encoding.
//!
//! A leaf is the hash of `address (20 bytes) ‖ weight (32 bytes, big-endian)`.
//! Both parts have a fixed width so the encoding needs no length prefixes and is
//! injective. This is the `abi.encodePacked(address, uint256)` layout, so with
//! [`sha3::Keccak256`] a leaf equals Solidity's
//! `keccak256(abi.encodePacked(account, amount))`.

use std::fmt::Display;

use alloy_primitives::{Address, U256};

use crate::{
    hasher::Hasher,
    identifier::{canonical_string, ADDRESS_LEN},
    AllowlistError,
};

/// Weight carried by every leaf.
pub type Weight = U256;

/// Size of the weight encoding in bytes.
pub const WEIGHT_LEN: usize = 32;

/// Size of an encoded entry in bytes.
pub const ENCODED_LEN: usize = ADDRESS_LEN + WEIGHT_LEN;

/// Weight used when a record carries no explicit amount.
pub const DEFAULT_WEIGHT: Weight = U256::from_limbs([1, 0, 0, 0]);

/// Parses a weight column: decimal, or hexadecimal with a `0x` prefix.
pub fn parse_weight(input: &str) -> Result<Weight, AllowlistError> {
    let trimmed = input.trim();
    let parsed = match trimmed
        .strip_prefix("0x")
        .or_else(|| trimmed.strip_prefix("0X"))
    {
        Some(digits) if !digits.is_empty() => U256::from_str_radix(digits, 16),
        None if !trimmed.is_empty() => U256::from_str_radix(trimmed, 10),
        _ => {
            return Err(AllowlistError::InvalidWeight {
                input: input.to_string(),
                reason: "empty weight".to_string(),
            })
        }
    };
    parsed.map_err(|e| AllowlistError::InvalidWeight {
        input: input.to_string(),
        reason: e.to_string(),
    })
}

/// Packs an identifier and a weight into their fixed-width encoding.
pub fn encode(identifier: &Address, weight: &Weight) -> [u8; ENCODED_LEN] {
    let mut encoded = [0u8; ENCODED_LEN];
    encoded[..ADDRESS_LEN].copy_from_slice(identifier.as_slice());
    encoded[ADDRESS_LEN..].copy_from_slice(&weight.to_be_bytes::<WEIGHT_LEN>());
    encoded
}

/// Hashes an encoded entry into its leaf digest.
pub fn leaf_hash<const HASH_SIZE: usize, H: Hasher<HASH_SIZE>>(encoded: &[u8]) -> [u8; HASH_SIZE] {
    H::hash(encoded)
}

/// One validated allowlist entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Entry {
    identifier: Address,
    weight: Weight,
}

impl Entry {
    pub fn new(identifier: Address, weight: Weight) -> Self {
        Self { identifier, weight }
    }

    /// Returns the account address.
    pub fn identifier(&self) -> &Address {
        &self.identifier
    }

    /// Returns the weight.
    pub fn weight(&self) -> &Weight {
        &self.weight
    }

    /// Checksummed identifier, the key of this entry in the published map.
    pub fn canonical_identifier(&self) -> String {
        canonical_string(&self.identifier)
    }

    pub fn encode(&self) -> [u8; ENCODED_LEN] {
        encode(&self.identifier, &self.weight)
    }

    /// Computes the leaf digest. This function performs a hash.
    pub fn leaf_hash<const HASH_SIZE: usize, H: Hasher<HASH_SIZE>>(&self) -> [u8; HASH_SIZE] {
        leaf_hash::<HASH_SIZE, H>(&self.encode())
    }
}

impl Display for Entry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Entry {{ identifier: {}, weight: {} }}",
            self.canonical_identifier(),
            self.weight
        )
    }
}

/// Hashes every entry, preserving input order.
#[cfg(feature = "multi-thread")]
pub fn leaf_hashes<const HASH_SIZE: usize, H: Hasher<HASH_SIZE>>(
    entries: &[Entry],
) -> Vec<[u8; HASH_SIZE]> {
    use rayon::prelude::*;

    entries
        .par_iter()
        .map(|entry| entry.leaf_hash::<HASH_SIZE, H>())
        .collect()
}

/// Hashes every entry, preserving input order.
#[cfg(not(feature = "multi-thread"))]
pub fn leaf_hashes<const HASH_SIZE: usize, H: Hasher<HASH_SIZE>>(
    entries: &[Entry],
) -> Vec<[u8; HASH_SIZE]> {
    entries
        .iter()
        .map(|entry| entry.leaf_hash::<HASH_SIZE, H>())
        .collect()
}
