//! Inclusion proofs.
//!
//! A proof is the ordered list of sibling digests met while walking from a leaf
//! up to the root. Because parents are built with the sort-pair rule, the
//! digests alone are enough to recompute the root; the side of each sibling is
//! still recorded for consumers that hash positionally.
//!
//! A proof can be encoded into a compact byte string and decoded back.
use bitvec::order::Lsb0;
use bitvec::vec::BitVec;
use serde::ser::{Serialize, SerializeSeq, Serializer};

use crate::{hasher::Hasher, AllowlistError, MerkleTree};

/// Position of a sibling relative to the node being proven.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Left,
    Right,
}

/// One step of a proof.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProofNode<const HASH_SIZE: usize> {
    pub hash: [u8; HASH_SIZE],
    pub side: Side,
}

/// A merkle inclusion proof for a single leaf.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Proof<const HASH_SIZE: usize> {
    leaf_index: usize,
    nodes: Vec<[u8; HASH_SIZE]>,
    /// One bit per node, set when the sibling is on the right.
    sides: BitVec<u8, Lsb0>,
}

/// Extracts the proof of the leaf at `leaf_index`. See [`MerkleTree::prove`].
pub fn prove<const HASH_SIZE: usize, H: Hasher<HASH_SIZE>>(
    tree: &MerkleTree<HASH_SIZE, H>,
    leaf_index: usize,
) -> Result<Proof<HASH_SIZE>, AllowlistError> {
    tree.prove(leaf_index)
}

impl<const HASH_SIZE: usize, H: Hasher<HASH_SIZE>> MerkleTree<HASH_SIZE, H> {
    /// Walks from the leaf to the root collecting one sibling per level.
    /// Levels where the node was promoted without a sibling add nothing.
    pub fn prove(&self, leaf_index: usize) -> Result<Proof<HASH_SIZE>, AllowlistError> {
        if leaf_index >= self.leaf_count() {
            return Err(AllowlistError::IndexOutOfRange {
                index: leaf_index,
                leaf_count: self.leaf_count(),
            });
        }
        let mut nodes = Vec::with_capacity(self.depth());
        let mut sides = BitVec::with_capacity(self.depth());
        let mut index = leaf_index;
        for level in &self.levels()[..self.depth()] {
            let sibling = index ^ 1;
            if let Some(hash) = level.get(sibling) {
                nodes.push(*hash);
                sides.push(sibling > index);
            }
            index /= 2;
        }
        Ok(Proof {
            leaf_index,
            nodes,
            sides,
        })
    }
}

impl<const HASH_SIZE: usize> Proof<HASH_SIZE> {
    /// Index of the proven leaf in the tree.
    pub fn leaf_index(&self) -> usize {
        self.leaf_index
    }

    /// Sibling digests, from the leaf level upwards.
    pub fn nodes(&self) -> &[[u8; HASH_SIZE]] {
        &self.nodes
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Side of the `i`-th sibling.
    pub fn side(&self, i: usize) -> Option<Side> {
        self.sides
            .get(i)
            .map(|bit| if *bit { Side::Right } else { Side::Left })
    }

    /// Iterates over the proof steps with their sides.
    pub fn iter(&self) -> impl Iterator<Item = ProofNode<HASH_SIZE>> + '_ {
        self.nodes
            .iter()
            .zip(self.sides.iter())
            .map(|(hash, bit)| ProofNode {
                hash: *hash,
                side: if *bit { Side::Right } else { Side::Left },
            })
    }

    /// Sibling digests as `0x` prefixed hex strings, the published format.
    pub fn to_hex(&self) -> Vec<String> {
        self.nodes
            .iter()
            .map(|hash| format!("0x{}", hex::encode(hash)))
            .collect()
    }

    /// Encodes the proof into a byte vector:
    /// leaf index (u64 BE) ‖ node count (u16 BE) ‖ nodes ‖ side bits.
    pub fn encode(&self) -> Vec<u8> {
        let mut encoded = Vec::with_capacity(10 + self.nodes.len() * HASH_SIZE + 1);
        encoded.extend_from_slice(&(self.leaf_index as u64).to_be_bytes());
        encoded.extend_from_slice(&(self.nodes.len() as u16).to_be_bytes());
        for node in self.nodes.iter() {
            encoded.extend_from_slice(node);
        }
        encoded.extend_from_slice(self.sides.as_raw_slice());
        encoded
    }

    /// Decodes a proof produced by [`Proof::encode`].
    pub fn decode(data: &[u8]) -> Result<Self, AllowlistError> {
        let (index_bytes, rest) = split(data, 8, "leaf index")?;
        let (count_bytes, rest) = split(rest, 2, "node count")?;
        let leaf_index = u64::from_be_bytes(index_bytes.try_into().map_err(malformed)?);
        let leaf_index = usize::try_from(leaf_index).map_err(|e| {
            AllowlistError::MalformedProof(format!("leaf index {leaf_index} does not fit: {e}"))
        })?;
        let nb_nodes = u16::from_be_bytes(count_bytes.try_into().map_err(malformed)?) as usize;
        let (node_bytes, side_bytes) = split(rest, nb_nodes * HASH_SIZE, "nodes")?;
        if side_bytes.len() != nb_nodes.div_ceil(8) {
            return Err(AllowlistError::MalformedProof(format!(
                "expected {} side bytes, got {}",
                nb_nodes.div_ceil(8),
                side_bytes.len()
            )));
        }
        let nodes = node_bytes
            .chunks_exact(HASH_SIZE)
            .map(|chunk| {
                let mut hash = [0u8; HASH_SIZE];
                hash.copy_from_slice(chunk);
                hash
            })
            .collect();
        let mut sides = BitVec::<u8, Lsb0>::from_slice(side_bytes);
        sides.truncate(nb_nodes);
        Ok(Self {
            leaf_index,
            nodes,
            sides,
        })
    }
}

fn split<'a>(
    data: &'a [u8],
    len: usize,
    what: &str,
) -> Result<(&'a [u8], &'a [u8]), AllowlistError> {
    if data.len() < len {
        return Err(AllowlistError::MalformedProof(format!(
            "truncated {what}: need {len} bytes, got {}",
            data.len()
        )));
    }
    Ok(data.split_at(len))
}

fn malformed(e: std::array::TryFromSliceError) -> AllowlistError {
    AllowlistError::MalformedProof(e.to_string())
}

impl<const HASH_SIZE: usize> Serialize for Proof<HASH_SIZE> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut seq = serializer.serialize_seq(Some(self.nodes.len()))?;
        for hash in self.to_hex() {
            seq.serialize_element(&hash)?;
        }
        seq.end()
    }
}

#[cfg(test)]
mod test {
    use super::{prove, Proof, Side};
    use crate::{tests::compute_root, AllowlistError, MerkleTree};
    use hex_literal::hex;
    use sha3::Keccak256;

    const L0: [u8; 32] = hex!("67c6a2e151d4352a55021b5d0028c18121cfc24c7d73b179d22b17daff069c6e");
    const L1: [u8; 32] = hex!("3f68e79174daf15b50e15833babc8eb7743e730bb9606f922c48e95314c3905c");
    const L2: [u8; 32] = hex!("320723cfc0bfa9b0f7c5b275a01ffa5e0f111f05723ba5df2b2684ab86bebe06");
    const B01: [u8; 32] = hex!("1838245b08d1e921c5c0b6c7aede4f17dd9b159feaee59ffebba9fd6c4bccb03");

    fn tree(leaves: Vec<[u8; 32]>) -> MerkleTree<32, Keccak256> {
        MerkleTree::from_leaves(leaves).unwrap()
    }

    #[test]
    fn test_two_leaf_proofs() {
        let tree = tree(vec![L0, L1]);
        let proof0 = prove(&tree, 0).unwrap();
        let proof1 = prove(&tree, 1).unwrap();
        assert_eq!(proof0.nodes(), &[L1]);
        assert_eq!(proof1.nodes(), &[L0]);
        assert_eq!(proof0.side(0), Some(Side::Right));
        assert_eq!(proof1.side(0), Some(Side::Left));
        assert_eq!(compute_root::<32, Keccak256>(L0, &proof0), tree.root());
        assert_eq!(compute_root::<32, Keccak256>(L1, &proof1), tree.root());
    }

    #[test]
    fn test_single_leaf_proof_is_empty() {
        let tree = tree(vec![L0]);
        let proof = tree.prove(0).unwrap();
        assert!(proof.is_empty());
        assert_eq!(compute_root::<32, Keccak256>(L0, &proof), L0);
    }

    #[test]
    fn test_promoted_leaf_skips_level() {
        let tree = tree(vec![L0, L1, L2]);
        let proof = tree.prove(2).unwrap();
        assert_eq!(proof.nodes(), &[B01]);
        assert_eq!(proof.side(0), Some(Side::Left));

        let proof0 = tree.prove(0).unwrap();
        assert_eq!(proof0.nodes(), &[L1, L2]);
        for (i, leaf) in [L0, L1, L2].into_iter().enumerate() {
            let proof = tree.prove(i).unwrap();
            assert_eq!(compute_root::<32, Keccak256>(leaf, &proof), tree.root());
        }
    }

    #[test]
    fn test_out_of_range() {
        let tree = tree(vec![L0, L1, L2]);
        assert!(matches!(
            tree.prove(3),
            Err(AllowlistError::IndexOutOfRange {
                index: 3,
                leaf_count: 3
            })
        ));
    }

    #[test]
    fn test_to_hex() {
        let tree = tree(vec![L0, L1]);
        assert_eq!(
            tree.prove(0).unwrap().to_hex(),
            vec!["0x3f68e79174daf15b50e15833babc8eb7743e730bb9606f922c48e95314c3905c"]
        );
    }

    #[test]
    fn test_iter() {
        let tree = tree(vec![L0, L1, L2]);
        let steps = tree.prove(1).unwrap().iter().collect::<Vec<_>>();
        assert_eq!(steps.len(), 2);
        assert_eq!(steps[0].hash, L0);
        assert_eq!(steps[0].side, Side::Left);
        assert_eq!(steps[1].hash, L2);
        assert_eq!(steps[1].side, Side::Right);
    }

    #[test]
    fn test_encode_decode() {
        let leaves = (0..13u8).map(|i| [i; 32]).collect::<Vec<_>>();
        let tree = tree(leaves);
        let proof = tree.prove(9).unwrap();
        let encoded = proof.encode();
        assert_eq!(encoded.len(), 10 + proof.len() * 32 + proof.len().div_ceil(8));
        assert_eq!(Proof::<32>::decode(&encoded).unwrap(), proof);
    }

    #[test]
    fn test_decode_empty_proof() {
        let proof = tree(vec![L0]).prove(0).unwrap();
        let encoded = proof.encode();
        assert_eq!(encoded, hex!("00000000000000000000"));
        assert_eq!(Proof::<32>::decode(&encoded).unwrap(), proof);
    }

    #[test]
    fn test_decode_truncated() {
        let proof = tree(vec![L0, L1, L2]).prove(0).unwrap();
        let encoded = proof.encode();
        for len in [0, 5, 9, 41, encoded.len() - 1] {
            assert!(
                matches!(
                    Proof::<32>::decode(&encoded[..len]),
                    Err(AllowlistError::MalformedProof(_))
                ),
                "decoded a proof truncated to {len} bytes"
            );
        }
        let mut extended = encoded.clone();
        extended.push(0);
        assert!(Proof::<32>::decode(&extended).is_err());
    }

    #[test]
    fn test_decode_large_leaf_index() {
        let mut encoded = u64::MAX.to_be_bytes().to_vec();
        encoded.extend_from_slice(&[0, 0]);
        let decoded = Proof::<32>::decode(&encoded);
        if usize::BITS < u64::BITS {
            assert!(matches!(decoded, Err(AllowlistError::MalformedProof(_))));
        } else {
            assert_eq!(decoded.unwrap().leaf_index(), usize::MAX);
        }
    }

    #[test]
    fn test_serialize() {
        let proof = tree(vec![L0, L1]).prove(1).unwrap();
        assert_eq!(
            serde_json::to_string(&proof).unwrap(),
            "[\"0x67c6a2e151d4352a55021b5d0028c18121cfc24c7d73b179d22b17daff069c6e\"]"
        );
    }
}
