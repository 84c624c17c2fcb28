//! Basic example of building a merkle allowlist
//!
//! This example demonstrates:
//! - Parsing an account list with optional weights
//! - Building the tree and the account -> proof map
//! - Reading a proof back and encoding it for transport

use merkle_allowlist::{
    build_allowlist, input::parse_records, leaf::leaf_hashes, BuildOptions, MerkleTree, Proof,
};
use sha3::Keccak256;

const ACCOUNTS: &str = "\
0xf39Fd6e51aad88F6F4ce6aB8827279cffFb92266
0x70997970C51812dc3A010C7d01b50e0d17dc79C8,5
0x3C44CdDdB6a900fa2b585dd299e03d12FA4293BC,0x10
not-an-address
";

fn main() {
    // Parse the list; bad lines are reported, not fatal
    let records = parse_records(ACCOUNTS);
    let report = build_allowlist::<32, Keccak256>(records, &BuildOptions::default()).unwrap();

    println!("Root: {}", report.allowlist.root_hex());
    println!("Leaves: {}", report.leaf_count);
    for skipped in &report.skipped {
        println!("Skipped line {} ({}): {}", skipped.line, skipped.input, skipped.reason);
    }

    // Every account gets its own proof, keyed by checksummed address
    for (account, proof) in report.allowlist.iter() {
        println!("{account} -> {:?}", proof.to_hex());
    }

    // Lookups accept any casing
    let proof = report
        .allowlist
        .get("0x70997970c51812dc3a010c7d01b50e0d17dc79c8")
        .unwrap();

    // Compact binary form, e.g. for storing proofs off chain
    let bytes = proof.encode();
    let decoded = Proof::<32>::decode(&bytes).unwrap();
    println!("Encoded proof: {} bytes, leaf index {}", bytes.len(), decoded.leaf_index());

    // The lower level API: leaves -> tree -> proof by index
    let entries = parse_records(ACCOUNTS)
        .iter()
        .filter_map(|record| record.to_entry(BuildOptions::default().default_weight).ok())
        .collect::<Vec<_>>();
    let tree = MerkleTree::<32, Keccak256>::from_leaves(leaf_hashes::<32, Keccak256>(&entries))
        .unwrap();
    println!("Tree depth: {}, same root: {}", tree.depth(), tree.root() == report.allowlist.root());
    println!("JSON artifact:\n{}", report.allowlist.to_json_pretty().unwrap());
}
