use alloy_primitives::{Address, U256};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use merkle_allowlist::{
    build_allowlist, input::RawRecord, leaf::leaf_hashes, BuildOptions, Entry, MerkleTree,
};
use sha2::Sha256;
use sha3::Keccak256;

pub fn generate_random_entry() -> Entry {
    Entry::new(
        Address::from(rand::random::<[u8; 20]>()),
        U256::from(rand::random::<u64>()),
    )
}

fn generate_records(count: usize) -> Vec<RawRecord> {
    (0..count)
        .map(|i| {
            let entry = generate_random_entry();
            RawRecord::new(
                i + 1,
                entry.canonical_identifier(),
                Some(entry.weight().to_string()),
            )
        })
        .collect()
}

fn bench_tree_build(c: &mut Criterion) {
    let mut group = c.benchmark_group("Tree Build");

    for size in [100, 1_000, 10_000] {
        let entries = (0..size).map(|_| generate_random_entry()).collect::<Vec<_>>();

        group.bench_with_input(BenchmarkId::new("Keccak256", size), &entries, |b, entries| {
            b.iter(|| {
                let leaves = leaf_hashes::<32, Keccak256>(entries);
                black_box(MerkleTree::<32, Keccak256>::from_leaves(leaves)).unwrap();
            })
        });

        group.bench_with_input(BenchmarkId::new("Sha256", size), &entries, |b, entries| {
            b.iter(|| {
                let leaves = leaf_hashes::<32, Sha256>(entries);
                black_box(MerkleTree::<32, Sha256>::from_leaves(leaves)).unwrap();
            })
        });
    }

    group.finish();
}

fn bench_full_pipeline(c: &mut Criterion) {
    let mut group = c.benchmark_group("Allowlist Pipeline");
    group.sample_size(10);

    for size in [1_000, 10_000] {
        let records = generate_records(size);
        group.bench_with_input(BenchmarkId::from_parameter(size), &records, |b, records| {
            b.iter(|| {
                black_box(build_allowlist::<32, Keccak256>(
                    records.clone(),
                    &BuildOptions::default(),
                ))
                .unwrap();
            })
        });
    }

    group.finish();
}

criterion_group!(benches, bench_tree_build, bench_full_pipeline);
criterion_main!(benches);
