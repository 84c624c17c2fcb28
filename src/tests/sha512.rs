use hex_literal::hex;
use sha2::{Digest, Sha512};

use super::compute_root;
use crate::{
    build_allowlist, identifier::parse_identifier, input::records_from_identifiers,
    leaf::DEFAULT_WEIGHT, BuildOptions, Entry, Hasher, MerkleTree,
};

impl Hasher<64> for Sha512 {
    fn hash(data: &[u8]) -> [u8; 64] {
        let mut hasher = Sha512::new();
        hasher.update(data);
        hasher.finalize().into()
    }
}

const ACCOUNTS: [&str; 3] = [
    "0xf39Fd6e51aad88F6F4ce6aB8827279cffFb92266",
    "0x70997970C51812dc3A010C7d01b50e0d17dc79C8",
    "0x3C44CdDdB6a900fa2b585dd299e03d12FA4293BC",
];

fn entries() -> Vec<Entry> {
    ACCOUNTS
        .iter()
        .map(|account| Entry::new(parse_identifier(account).unwrap(), DEFAULT_WEIGHT))
        .collect()
}

#[test]
fn test_leaf_hash() {
    assert_eq!(
        entries()[0].leaf_hash::<64, Sha512>(),
        hex!("8b01dd1692c00b93f5e99d0fc8e3914f473324805727149fceac681e7b8c52f502203e6f8c0a3c78159ee8b470f4a2b5de7caa06d43fff7a6f94f78d4c160266")
    );
}

#[test]
fn test_tree_root() {
    let leaves = entries()
        .iter()
        .map(|entry| entry.leaf_hash::<64, Sha512>())
        .collect::<Vec<_>>();
    let tree = MerkleTree::<64, Sha512>::from_leaves(leaves.clone()).unwrap();
    assert_eq!(
        tree.root(),
        hex!("140e77334fa20b2209e23bd64e0b277a5c2dd7602a9a51c8cc340b76a58c018d34b08700a0abe862787400d44dd39f440788391a221f8fa833e8daf8b2ed2ec0")
    );
    for (i, leaf) in leaves.into_iter().enumerate() {
        let proof = tree.prove(i).unwrap();
        assert_eq!(compute_root::<64, Sha512>(leaf, &proof), tree.root());
    }
}

#[test]
fn test_pipeline() {
    let report = build_allowlist::<64, Sha512>(
        records_from_identifiers(ACCOUNTS),
        &BuildOptions::default(),
    )
    .unwrap();
    let proof = report.allowlist.get(ACCOUNTS[2]).unwrap();
    assert_eq!(proof.len(), 1);
    assert_eq!(proof.to_hex()[0].len(), 2 + 128);
    assert_eq!(
        compute_root::<64, Sha512>(entries()[2].leaf_hash::<64, Sha512>(), proof),
        report.allowlist.root()
    );
}
