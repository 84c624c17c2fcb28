//! Sorted-pair binary merkle tree.
//!
//! The tree is built once from an ordered list of leaf digests and keeps every
//! level so proofs can be read off without recomputation.
//!
//! Two rules fix the root for a given leaf sequence:
//! - sibling digests are hashed smaller-first (see [`hash_sorted_pair`]);
//! - a lone node at the end of an odd-sized level is promoted unchanged.
//!
//! ```text
//!            R
//!          /   \
//!        B0     L4      <- L4 promoted twice
//!       /  \
//!     B1    B2
//!    / \   / \
//!   L0 L1 L2 L3 L4
//! ```
//!
//! [`hash_sorted_pair`]: crate::hasher::hash_sorted_pair

mod level;

use std::fmt::Debug;
use std::marker::PhantomData;

use tracing::debug;

use crate::{hasher::Hasher, AllowlistError};

/// Merkle tree over a fixed leaf sequence.
/// * `HASH_SIZE` - size of the hash digest in bytes.
/// * `H` - Hasher used for internal nodes.
pub struct MerkleTree<const HASH_SIZE: usize, H: Hasher<HASH_SIZE>> {
    /// `levels[0]` holds the leaves, the last level holds only the root.
    levels: Vec<Vec<[u8; HASH_SIZE]>>,
    _phantom: PhantomData<H>,
}

/// Builds a tree from leaf digests. See [`MerkleTree::from_leaves`].
pub fn build<const HASH_SIZE: usize, H: Hasher<HASH_SIZE>>(
    leaves: Vec<[u8; HASH_SIZE]>,
) -> Result<MerkleTree<HASH_SIZE, H>, AllowlistError> {
    MerkleTree::from_leaves(leaves)
}

impl<const HASH_SIZE: usize, H: Hasher<HASH_SIZE>> MerkleTree<HASH_SIZE, H> {
    /// Builds the whole tree bottom-up. Fails with [`AllowlistError::EmptyTree`]
    /// when `leaves` is empty.
    pub fn from_leaves(leaves: Vec<[u8; HASH_SIZE]>) -> Result<Self, AllowlistError> {
        if leaves.is_empty() {
            return Err(AllowlistError::EmptyTree);
        }
        let mut levels = vec![leaves];
        while levels[levels.len() - 1].len() > 1 {
            let next = level::next_level::<HASH_SIZE, H>(&levels[levels.len() - 1]);
            debug!(height = levels.len(), nodes = next.len(), "built tree level");
            levels.push(next);
        }
        Ok(Self {
            levels,
            _phantom: PhantomData,
        })
    }

    /// Root digest of the tree.
    pub fn root(&self) -> [u8; HASH_SIZE] {
        // from_leaves guarantees a non-empty top level
        self.levels[self.levels.len() - 1][0]
    }

    /// Root digest as `0x` prefixed lowercase hex.
    pub fn root_hex(&self) -> String {
        format!("0x{}", hex::encode(self.root()))
    }

    /// All levels, leaves first.
    pub fn levels(&self) -> &[Vec<[u8; HASH_SIZE]>] {
        &self.levels
    }

    /// Leaf digests in their build order.
    pub fn leaves(&self) -> &[[u8; HASH_SIZE]] {
        &self.levels[0]
    }

    pub fn leaf_count(&self) -> usize {
        self.levels[0].len()
    }

    /// Number of hashing levels above the leaves (0 for a single leaf).
    pub fn depth(&self) -> usize {
        self.levels.len() - 1
    }
}

impl<const HASH_SIZE: usize, H: Hasher<HASH_SIZE>> Clone for MerkleTree<HASH_SIZE, H> {
    fn clone(&self) -> Self {
        Self {
            levels: self.levels.clone(),
            _phantom: PhantomData,
        }
    }
}

impl<const HASH_SIZE: usize, H: Hasher<HASH_SIZE>> Debug for MerkleTree<HASH_SIZE, H> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "MerkleTree {{ leaves: {}, depth: {}, root: {} }}",
            self.leaf_count(),
            self.depth(),
            hex::encode(self.root())
        )
    }
}

#[cfg(test)]
mod test {
    use super::{build, MerkleTree};
    use crate::{hasher::hash_sorted_pair, AllowlistError};
    use hex_literal::hex;
    use sha3::Keccak256;

    const L0: [u8; 32] = hex!("67c6a2e151d4352a55021b5d0028c18121cfc24c7d73b179d22b17daff069c6e");
    const L1: [u8; 32] = hex!("3f68e79174daf15b50e15833babc8eb7743e730bb9606f922c48e95314c3905c");
    const L2: [u8; 32] = hex!("320723cfc0bfa9b0f7c5b275a01ffa5e0f111f05723ba5df2b2684ab86bebe06");

    #[test]
    fn test_empty_tree() {
        assert!(matches!(
            MerkleTree::<32, Keccak256>::from_leaves(vec![]),
            Err(AllowlistError::EmptyTree)
        ));
    }

    #[test]
    fn test_single_leaf_is_root() {
        let tree = build::<32, Keccak256>(vec![L0]).unwrap();
        assert_eq!(tree.root(), L0);
        assert_eq!(tree.depth(), 0);
        assert_eq!(tree.levels().len(), 1);
    }

    #[test]
    fn test_two_leaves() {
        let tree = build::<32, Keccak256>(vec![L0, L1]).unwrap();
        assert_eq!(
            tree.root(),
            hex!("1838245b08d1e921c5c0b6c7aede4f17dd9b159feaee59ffebba9fd6c4bccb03")
        );
        assert_eq!(tree.root(), hash_sorted_pair::<32, Keccak256>(&L0, &L1));
        assert_eq!(tree.depth(), 1);
    }

    #[test]
    fn test_three_leaves_promotes_last() {
        let tree = build::<32, Keccak256>(vec![L0, L1, L2]).unwrap();
        assert_eq!(tree.levels()[1][1], L2);
        assert_eq!(
            tree.root(),
            hex!("73ebfa47f11a60d67b4f05be47caf6676ed901cebdfcd0046dd8864124d30c6b")
        );
        assert_eq!(
            tree.root_hex(),
            "0x73ebfa47f11a60d67b4f05be47caf6676ed901cebdfcd0046dd8864124d30c6b"
        );
    }

    #[test]
    fn test_level_sizes() {
        let leaves = (0..11u8).map(|i| [i; 32]).collect::<Vec<_>>();
        let tree = build::<32, Keccak256>(leaves).unwrap();
        let sizes = tree.levels().iter().map(Vec::len).collect::<Vec<_>>();
        assert_eq!(sizes, vec![11, 6, 3, 2, 1]);
        assert_eq!(tree.leaf_count(), 11);
        assert_eq!(tree.depth(), 4);
    }

    #[test]
    fn test_leaf_order_matters() {
        let forward = build::<32, Keccak256>(vec![L0, L1, L2]).unwrap();
        let shuffled = build::<32, Keccak256>(vec![L2, L0, L1]).unwrap();
        assert_ne!(forward.root(), shuffled.root());
    }

    #[test]
    fn test_debug() {
        let tree = build::<32, Keccak256>(vec![L0, L1]).unwrap();
        assert_eq!(
            format!("{:?}", tree),
            "MerkleTree { leaves: 2, depth: 1, root: 1838245b08d1e921c5c0b6c7aede4f17dd9b159feaee59ffebba9fd6c4bccb03 }"
        );
    }
}
