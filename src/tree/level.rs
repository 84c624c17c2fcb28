//! Construction of one tree level from the level below it.

use crate::hasher::{hash_sorted_pair, Hasher};

/// Pairs adjacent nodes and hashes each pair with the sort-pair rule.
/// A lone last node is promoted unchanged.
fn parent<const HASH_SIZE: usize, H: Hasher<HASH_SIZE>>(
    children: &[[u8; HASH_SIZE]],
) -> [u8; HASH_SIZE] {
    match children {
        [left, right] => hash_sorted_pair::<HASH_SIZE, H>(left, right),
        [lone] => *lone,
        _ => unreachable!("levels are chunked by two"),
    }
}

#[cfg(feature = "multi-thread")]
pub(crate) fn next_level<const HASH_SIZE: usize, H: Hasher<HASH_SIZE>>(
    level: &[[u8; HASH_SIZE]],
) -> Vec<[u8; HASH_SIZE]> {
    use rayon::prelude::*;

    level
        .par_chunks(2)
        .map(parent::<HASH_SIZE, H>)
        .collect()
}

#[cfg(not(feature = "multi-thread"))]
pub(crate) fn next_level<const HASH_SIZE: usize, H: Hasher<HASH_SIZE>>(
    level: &[[u8; HASH_SIZE]],
) -> Vec<[u8; HASH_SIZE]> {
    level.chunks(2).map(parent::<HASH_SIZE, H>).collect()
}
