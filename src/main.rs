use std::fs;
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::{Parser, ValueEnum};
use merkle_allowlist::{
    build_allowlist, input::parse_records, leaf::parse_weight, BuildOptions, Hasher,
};
use sha2::Sha256;
use sha3::Keccak256;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum HashAlgorithm {
    Keccak256,
    Sha256,
}

#[derive(Debug, Parser)]
#[command(
    name = "merkle-allowlist",
    version,
    about = "Build a merkle allowlist: one root to publish, one proof per account"
)]
struct Cli {
    /// Account list, one address per line with an optional `,weight` column
    #[arg(short, long, value_name = "FILE")]
    input: PathBuf,
    /// Where to write the account -> proof map (JSON)
    #[arg(short, long, value_name = "FILE")]
    output: PathBuf,
    /// Also write a run summary (root, counts, skipped records) as JSON
    #[arg(long, value_name = "FILE")]
    summary: Option<PathBuf>,
    #[arg(long, value_enum, default_value_t = HashAlgorithm::Keccak256)]
    hasher: HashAlgorithm,
    /// Weight of records that have no weight column
    #[arg(long, default_value = "1")]
    default_weight: String,
    /// Keep only the last occurrence of a repeated account in the tree
    #[arg(long)]
    dedup: bool,
    /// Sort leaves by digest before building the tree
    #[arg(long)]
    sort_leaves: bool,
    /// Pretty-print the output map
    #[arg(long)]
    pretty: bool,
    /// Print the proof of this account once the allowlist is built
    #[arg(long, value_name = "ADDRESS")]
    check: Option<String>,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(false)
        .init();

    let cli = Cli::parse();
    let options = BuildOptions {
        default_weight: parse_weight(&cli.default_weight).context("invalid --default-weight")?,
        dedup: cli.dedup,
        sort_leaves: cli.sort_leaves,
    };
    match cli.hasher {
        HashAlgorithm::Keccak256 => run::<Keccak256>(&cli, &options),
        HashAlgorithm::Sha256 => run::<Sha256>(&cli, &options),
    }
}

fn run<H: Hasher<32>>(cli: &Cli, options: &BuildOptions) -> Result<()> {
    let text = fs::read_to_string(&cli.input)
        .with_context(|| format!("failed to read {}", cli.input.display()))?;
    let records = parse_records(&text);
    info!(input = %cli.input.display(), records = records.len(), "read account list");

    let report = build_allowlist::<32, H>(records, options).context("failed to build allowlist")?;

    let json = if cli.pretty {
        report.allowlist.to_json_pretty()?
    } else {
        report.allowlist.to_json()?
    };
    fs::write(&cli.output, json)
        .with_context(|| format!("failed to write {}", cli.output.display()))?;
    info!(output = %cli.output.display(), accounts = report.allowlist.len(), "wrote proofs");

    if let Some(path) = &cli.summary {
        fs::write(path, serde_json::to_string_pretty(&report.summary())?)
            .with_context(|| format!("failed to write {}", path.display()))?;
    }

    println!("root: {}", report.allowlist.root_hex());
    println!("root bytes: {:?}", report.allowlist.root());
    println!(
        "accounts: {}, leaves: {}, duplicates: {}, skipped: {}",
        report.allowlist.len(),
        report.leaf_count,
        report.duplicates,
        report.skipped.len()
    );
    for skipped in &report.skipped {
        println!("  line {}: {}", skipped.line, skipped.reason);
    }

    if let Some(account) = &cli.check {
        match report.allowlist.get(account) {
            Some(proof) => println!("{account}: {}", serde_json::to_string_pretty(proof)?),
            None => bail!("{account} is not in the allowlist"),
        }
    }
    Ok(())
}
