//! Merkle allowlist generator
//!
//! Given a list of accounts (optionally weighted), this crate produces a single
//! merkle root to publish on chain and, for every account, the inclusion proof
//! that account submits to claim its spot.
//!
//! The tree follows the conventions of common Solidity verifiers:
//! - leaves are `keccak256(address ‖ uint256 weight)`;
//! - sibling pairs are hashed smaller-first, so verification does not need
//!   left/right flags;
//! - the last node of an odd-sized level is promoted unchanged.
//!
//! ```
//! use merkle_allowlist::{build_allowlist, input::parse_records, BuildOptions};
//! use sha3::Keccak256;
//!
//! let records = parse_records(
//!     "0xf39Fd6e51aad88F6F4ce6aB8827279cffFb92266\n0x70997970c51812dc3a010c7d01b50e0d17dc79c8\n",
//! );
//! let report = build_allowlist::<32, Keccak256>(records, &BuildOptions::default()).unwrap();
//! let proof = report
//!     .allowlist
//!     .get("0xf39Fd6e51aad88F6F4ce6aB8827279cffFb92266")
//!     .unwrap();
//! assert_eq!(proof.len(), 1);
//! println!("root: {}", report.allowlist.root_hex());
//! ```

pub mod allowlist;
pub mod error;
pub mod hasher;
pub mod identifier;
pub mod input;
pub mod leaf;
pub mod proof;
pub mod tree;

pub use allowlist::{
    assemble, assemble_in_input_order, build_allowlist, Allowlist, BuildOptions, BuildReport,
    SkippedRecord,
};
pub use error::AllowlistError;
pub use hasher::Hasher;
pub use leaf::{Entry, Weight};
pub use proof::{prove, Proof, ProofNode, Side};
pub use tree::{build, MerkleTree};

#[cfg(test)]
mod tests;
