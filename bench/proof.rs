use alloy_primitives::{Address, U256};
use criterion::{black_box, criterion_group, criterion_main, Criterion};
use merkle_allowlist::{leaf::leaf_hashes, Entry, MerkleTree, Proof};
use sha3::Keccak256;

fn setup_tree(num_leaves: usize) -> MerkleTree<32, Keccak256> {
    let entries = (0..num_leaves)
        .map(|_| {
            Entry::new(
                Address::from(rand::random::<[u8; 20]>()),
                U256::from(rand::random::<u64>()),
            )
        })
        .collect::<Vec<_>>();
    MerkleTree::from_leaves(leaf_hashes::<32, Keccak256>(&entries)).unwrap()
}

fn bench_proof_generation(c: &mut Criterion) {
    let mut group = c.benchmark_group("Proof Generation");

    // odd leaf count so some proofs cross promoted nodes
    let tree = setup_tree(1_001);

    group.bench_function("Every Leaf", |b| {
        b.iter(|| {
            for index in 0..tree.leaf_count() {
                black_box(tree.prove(index)).unwrap();
            }
        })
    });

    group.finish();
}

fn bench_proof_encoding(c: &mut Criterion) {
    let mut group = c.benchmark_group("Proof Encoding");

    let tree = setup_tree(1_001);
    let proofs = (0..tree.leaf_count())
        .map(|index| tree.prove(index).unwrap())
        .collect::<Vec<_>>();
    let encoded = proofs.iter().map(Proof::encode).collect::<Vec<_>>();

    group.bench_function("Encode", |b| {
        b.iter(|| {
            for proof in &proofs {
                black_box(proof.encode());
            }
        })
    });

    group.bench_function("Decode", |b| {
        b.iter(|| {
            for bytes in &encoded {
                black_box(Proof::<32>::decode(bytes)).unwrap();
            }
        })
    });

    group.bench_function("Hex", |b| {
        b.iter(|| {
            for proof in &proofs {
                black_box(proof.to_hex());
            }
        })
    });

    group.finish();
}

criterion_group!(benches, bench_proof_generation, bench_proof_encoding);
criterion_main!(benches);
