//! Result assembly: the published account → proof map and the batch pipeline
//! that produces it from raw records.

use std::collections::{BTreeMap, HashSet};

use alloy_primitives::Address;
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::{
    hasher::Hasher,
    identifier::{canonical_string, parse_identifier},
    input::RawRecord,
    leaf::{leaf_hashes, Entry, Weight, DEFAULT_WEIGHT},
    AllowlistError, MerkleTree, Proof,
};

/// Account → proof map together with the root it proves against.
///
/// Keys are canonical (checksummed) identifiers. The map is built once and
/// never mutated afterwards.
#[derive(Debug, Clone)]
pub struct Allowlist<const HASH_SIZE: usize> {
    root: [u8; HASH_SIZE],
    proofs: BTreeMap<String, Proof<HASH_SIZE>>,
}

/// Maps every entry to the proof of the leaf at the same index.
///
/// When an identifier appears more than once, the proof of its last occurrence
/// wins. The earlier leaves stay in the tree and can still be proven by index.
pub fn assemble<const HASH_SIZE: usize, H: Hasher<HASH_SIZE>>(
    entries: &[Entry],
    tree: &MerkleTree<HASH_SIZE, H>,
) -> Result<Allowlist<HASH_SIZE>, AllowlistError> {
    assemble_in_input_order(entries.iter().enumerate(), tree)
}

/// Like [`assemble`], for leaves that were reordered after reading.
///
/// `entries` yields `(input position, entry)` in leaf order. Repeated
/// identifiers are resolved by input position, so the record read last keeps
/// its proof wherever its leaf ended up in the tree.
pub fn assemble_in_input_order<'a, const HASH_SIZE: usize, H: Hasher<HASH_SIZE>>(
    entries: impl IntoIterator<Item = (usize, &'a Entry)>,
    tree: &MerkleTree<HASH_SIZE, H>,
) -> Result<Allowlist<HASH_SIZE>, AllowlistError> {
    let mut proofs: BTreeMap<String, (usize, Proof<HASH_SIZE>)> = BTreeMap::new();
    for (index, (position, entry)) in entries.into_iter().enumerate() {
        let proof = tree.prove(index)?;
        let key = entry.canonical_identifier();
        if let Some((previous, _)) = proofs.get(&key) {
            if *previous > position {
                continue;
            }
            debug!(
                identifier = %key,
                previous = *previous,
                position,
                "later record overwrites proof"
            );
        }
        proofs.insert(key, (position, proof));
    }
    Ok(Allowlist {
        root: tree.root(),
        proofs: proofs
            .into_iter()
            .map(|(key, (_, proof))| (key, proof))
            .collect(),
    })
}

impl<const HASH_SIZE: usize> Allowlist<HASH_SIZE> {
    pub fn root(&self) -> [u8; HASH_SIZE] {
        self.root
    }

    /// Root as `0x` prefixed lowercase hex, the form published on chain.
    pub fn root_hex(&self) -> String {
        format!("0x{}", hex::encode(self.root))
    }

    /// Proof for an account.
    pub fn proof(&self, address: &Address) -> Option<&Proof<HASH_SIZE>> {
        self.proofs.get(&canonical_string(address))
    }

    /// Proof for an account given in any accepted textual form.
    pub fn get(&self, identifier: &str) -> Option<&Proof<HASH_SIZE>> {
        let address = parse_identifier(identifier).ok()?;
        self.proof(&address)
    }

    pub fn len(&self) -> usize {
        self.proofs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.proofs.is_empty()
    }

    /// Iterates over `(canonical identifier, proof)` in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&String, &Proof<HASH_SIZE>)> {
        self.proofs.iter()
    }

    /// The published artifact: `{"<identifier>": ["0x…", …], …}`.
    pub fn to_json(&self) -> Result<String, AllowlistError> {
        Ok(serde_json::to_string(&self.proofs)?)
    }

    pub fn to_json_pretty(&self) -> Result<String, AllowlistError> {
        Ok(serde_json::to_string_pretty(&self.proofs)?)
    }
}

/// Knobs of the batch pipeline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildOptions {
    /// Weight of records without a weight column
    pub default_weight: Weight,
    /// Keep only the last occurrence of each identifier in the tree
    pub dedup: bool,
    /// Order leaves by digest before building
    pub sort_leaves: bool,
}

impl Default for BuildOptions {
    fn default() -> Self {
        Self {
            default_weight: DEFAULT_WEIGHT,
            dedup: false,
            sort_leaves: false,
        }
    }
}

/// A record left out of the tree and why.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SkippedRecord {
    pub line: usize,
    /// The record as read, weight column included
    pub input: String,
    pub reason: String,
}

/// Outcome of [`build_allowlist`].
#[derive(Debug, Clone)]
pub struct BuildReport<const HASH_SIZE: usize> {
    pub allowlist: Allowlist<HASH_SIZE>,
    /// Number of leaves in the tree
    pub leaf_count: usize,
    /// Records rejected by validation, in input order
    pub skipped: Vec<SkippedRecord>,
    /// Valid records superseded by a later record for the same identifier
    pub duplicates: usize,
}

/// Run summary, serializable next to the artifact.
#[derive(Debug, Clone, Serialize)]
pub struct BuildSummary<'a> {
    pub root: String,
    pub leaf_count: usize,
    pub accounts: usize,
    pub duplicates: usize,
    pub skipped: &'a [SkippedRecord],
}

impl<const HASH_SIZE: usize> BuildReport<HASH_SIZE> {
    pub fn summary(&self) -> BuildSummary<'_> {
        BuildSummary {
            root: self.allowlist.root_hex(),
            leaf_count: self.leaf_count,
            accounts: self.allowlist.len(),
            duplicates: self.duplicates,
            skipped: &self.skipped,
        }
    }
}

/// Validates `records`, builds the tree and assembles the allowlist.
///
/// Invalid records are logged and reported in [`BuildReport::skipped`]; they
/// never stop the batch. Fails with [`AllowlistError::EmptyTree`] when no valid
/// record is left.
pub fn build_allowlist<const HASH_SIZE: usize, H: Hasher<HASH_SIZE>>(
    records: impl IntoIterator<Item = RawRecord>,
    options: &BuildOptions,
) -> Result<BuildReport<HASH_SIZE>, AllowlistError> {
    let mut entries = Vec::new();
    let mut skipped = Vec::new();
    for record in records {
        match record.to_entry(options.default_weight) {
            Ok(entry) => entries.push(entry),
            Err(e) if e.is_recoverable() => {
                warn!(line = record.line, error = %e, "skipping record");
                skipped.push(SkippedRecord {
                    line: record.line,
                    input: record.text(),
                    reason: e.to_string(),
                });
            }
            Err(e) => return Err(e),
        }
    }

    let unique = entries
        .iter()
        .map(Entry::identifier)
        .collect::<HashSet<_>>()
        .len();
    let duplicates = entries.len() - unique;
    if options.dedup && duplicates > 0 {
        entries = keep_last_occurrence(entries);
        debug!(removed = duplicates, "removed duplicate identifiers");
    }

    let mut leaves = leaf_hashes::<HASH_SIZE, H>(&entries);
    // input position of the record behind each leaf
    let mut positions = (0..entries.len()).collect::<Vec<_>>();
    if options.sort_leaves {
        positions.sort_by(|&a, &b| leaves[a].cmp(&leaves[b]));
        entries = positions.iter().map(|&i| entries[i]).collect();
        leaves = positions.iter().map(|&i| leaves[i]).collect();
    }

    let tree = MerkleTree::<HASH_SIZE, H>::from_leaves(leaves)?;
    let allowlist = assemble_in_input_order(positions.iter().copied().zip(&entries), &tree)?;
    info!(
        root = %allowlist.root_hex(),
        leaves = tree.leaf_count(),
        accounts = allowlist.len(),
        skipped = skipped.len(),
        duplicates,
        "allowlist built"
    );
    Ok(BuildReport {
        allowlist,
        leaf_count: tree.leaf_count(),
        skipped,
        duplicates,
    })
}

/// Drops every entry whose identifier shows up again later. Survivors keep their
/// relative order.
fn keep_last_occurrence(entries: Vec<Entry>) -> Vec<Entry> {
    let mut seen = HashSet::new();
    let mut kept = entries
        .into_iter()
        .rev()
        .filter(|entry| seen.insert(*entry.identifier()))
        .collect::<Vec<_>>();
    kept.reverse();
    kept
}
