//! Example of plugging a custom hasher into the allowlist builder
//!
//! This example demonstrates:
//! - Creating a custom hasher implementation
//! - Building the same allowlist with it and with keccak256

use merkle_allowlist::{build_allowlist, input::records_from_identifiers, BuildOptions, Hasher};
use sha2::{Digest, Sha256};
use sha3::Keccak256;

// Custom hasher that uses SHA256 but adds a domain prefix to the input
struct PrefixedSha256;

impl Hasher<32> for PrefixedSha256 {
    fn hash(data: &[u8]) -> [u8; 32] {
        let mut hasher = Sha256::new();
        hasher.update(b"allowlist:");
        hasher.update(data);
        hasher.finalize().into()
    }
}

const ACCOUNTS: [&str; 3] = [
    "0xf39Fd6e51aad88F6F4ce6aB8827279cffFb92266",
    "0x70997970C51812dc3A010C7d01b50e0d17dc79C8",
    "0x3C44CdDdB6a900fa2b585dd299e03d12FA4293BC",
];

fn main() {
    let custom = build_allowlist::<32, PrefixedSha256>(
        records_from_identifiers(ACCOUNTS),
        &BuildOptions::default(),
    )
    .unwrap();
    println!("Root with custom hasher: {}", custom.allowlist.root_hex());

    let standard = build_allowlist::<32, Keccak256>(
        records_from_identifiers(ACCOUNTS),
        &BuildOptions::default(),
    )
    .unwrap();
    println!("Root with keccak256: {}", standard.allowlist.root_hex());

    // Proof shapes match, the digests do not
    let account = ACCOUNTS[0];
    println!(
        "Proof lengths for {account}: {} vs {}",
        custom.allowlist.get(account).unwrap().len(),
        standard.allowlist.get(account).unwrap().len()
    );
}
