//! Hash primitive shared by leaves and internal nodes.

use sha2::{Digest, Sha256};
use sha3::Keccak256;

/// Simple hash trait used for both leaf digests and internal nodes.
///
/// # Type Parameters
/// * `HASH_SIZE` - The size of the hash digest in bytes
pub trait Hasher<const HASH_SIZE: usize> {
    fn hash(data: &[u8]) -> [u8; HASH_SIZE];
}

impl Hasher<32> for Keccak256 {
    fn hash(data: &[u8]) -> [u8; 32] {
        let mut hasher = Keccak256::new();
        hasher.update(data);
        hasher.finalize().into()
    }
}

impl Hasher<32> for Sha256 {
    fn hash(data: &[u8]) -> [u8; 32] {
        let mut hasher = Sha256::new();
        hasher.update(data);
        hasher.finalize().into()
    }
}

/// Hashes two sibling digests with the smaller one (byte-lexicographic) first.
///
/// The result does not depend on which sibling sits on the left, so a verifier
/// only needs the sibling digests, not their positions.
pub fn hash_sorted_pair<const HASH_SIZE: usize, H: Hasher<HASH_SIZE>>(
    a: &[u8; HASH_SIZE],
    b: &[u8; HASH_SIZE],
) -> [u8; HASH_SIZE] {
    let (low, high) = if a <= b { (a, b) } else { (b, a) };
    H::hash([low.as_slice(), high.as_slice()].concat().as_slice())
}
