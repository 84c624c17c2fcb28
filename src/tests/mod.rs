//! Tests spanning encoding, tree building, proof extraction and assembly

mod sha512;

use crate::{hasher::hash_sorted_pair, Hasher, Proof};

/// Recomputes a root the way an on-chain verifier does: fold the leaf with each
/// sibling using the sort-pair rule.
pub(crate) fn compute_root<const HASH_SIZE: usize, H: Hasher<HASH_SIZE>>(
    leaf: [u8; HASH_SIZE],
    proof: &Proof<HASH_SIZE>,
) -> [u8; HASH_SIZE] {
    proof
        .nodes()
        .iter()
        .fold(leaf, |current, sibling| {
            hash_sorted_pair::<HASH_SIZE, H>(&current, sibling)
        })
}
