//! Chainlet command line front-end

use anyhow::{bail, Context, Result};
use chainlet_core::{storage, Chain, ChainConfig, Fingerprint, SnapshotFormat};
use clap::Parser;
use std::fs;
use std::path::Path;

use crate::cli::{CliArgs, Command};

mod cli;
mod output;

/// Transactions seeded into every demo block
const DEMO_TRANSACTIONS: &[(&str, &str, f64)] =
    &[("Alice", "Bob", 1.5), ("Charlie", "Dave", 0.75)];

fn main() -> Result<()> {
    let args = CliArgs::parse();
    init_logging(args.verbose);

    match args.command {
        Command::Demo {
            blocks,
            tamper,
            export,
            config,
            capacity,
        } => {
            let config = load_config(config.as_deref(), capacity)?;
            run_demo(config, blocks, tamper, export.as_deref())
        }
        Command::Verify { path } => run_verify(&path),
        Command::Inspect { path, latest } => run_inspect(&path, latest),
    }
}

fn init_logging(verbose: bool) {
    let level = if verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();
}

/// Chain configuration from an optional JSON file plus command line overrides
fn load_config(path: Option<&Path>, capacity: Option<usize>) -> Result<ChainConfig> {
    let mut config = match path {
        Some(path) => {
            let raw = fs::read_to_string(path)
                .with_context(|| format!("Failed to read config {}", path.display()))?;
            serde_json::from_str(&raw)
                .with_context(|| format!("Invalid config {}", path.display()))?
        }
        None => ChainConfig::default(),
    };

    if let Some(capacity) = capacity {
        config.max_transactions = capacity;
    }

    log::debug!("Using {:?}", config);
    Ok(config)
}

fn run_demo(
    config: ChainConfig,
    blocks: u64,
    tamper: Option<u64>,
    export: Option<&Path>,
) -> Result<()> {
    output::print_banner();

    let mut chain = Chain::with_config(config)?;
    for _ in 0..blocks {
        chain.append_block(DEMO_TRANSACTIONS)?;
    }

    if let Some(index) = tamper {
        let block = chain
            .block_mut(index)
            .with_context(|| format!("Cannot tamper with block #{}: no such block", index))?;
        block.previous_fingerprint = Fingerprint::from("tampered");
        log::warn!("Previous fingerprint of block #{} overwritten", index);
    }

    output::print_blocks(&chain);

    let verification = chain.verify();
    output::print_verification(&verification);

    if let Some(path) = export {
        storage::save(&chain, path, SnapshotFormat::from_path(path))
            .with_context(|| format!("Failed to export chain to {}", path.display()))?;
        println!("Blockchain data saved to {}", path.display());
    }

    let released = chain.teardown();
    log::debug!("{} blocks released", released);

    println!();
    println!("=== Implementation Complete ===");
    Ok(())
}

fn run_verify(path: &Path) -> Result<()> {
    let chain = load_snapshot(path)?;
    let verification = chain.verify();
    output::print_verification(&verification);

    if let Some(index) = verification.offending_index() {
        bail!("Chain in {} is broken at block #{}", path.display(), index);
    }
    Ok(())
}

fn run_inspect(path: &Path, latest: usize) -> Result<()> {
    let chain = load_snapshot(path)?;

    println!("Displaying latest {} blocks...", chain.latest(latest).len());
    output::print_blocks(chain.latest(latest));
    output::print_stats(&chain.stats());
    Ok(())
}

fn load_snapshot(path: &Path) -> Result<Chain> {
    storage::load(path, SnapshotFormat::from_path(path))
        .with_context(|| format!("Failed to load snapshot {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_demo_export_then_verify() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("chain.json");

        run_demo(ChainConfig::default(), 3, None, Some(path.as_path())).unwrap();

        assert!(run_verify(&path).is_ok());
        assert!(run_inspect(&path, 2).is_ok());
    }

    #[test]
    fn test_verify_fails_on_tampered_export() {
        let temp_dir = TempDir::new().unwrap();

        for (name, index) in [("link.json", 2), ("genesis.bin", 0)] {
            let path = temp_dir.path().join(name);
            run_demo(ChainConfig::default(), 3, Some(index), Some(path.as_path())).unwrap();

            let error = run_verify(&path).unwrap_err();
            assert!(error.to_string().contains(&format!("block #{}", index)));
        }
    }

    #[test]
    fn test_demo_rejects_unknown_tamper_target() {
        assert!(run_demo(ChainConfig::default(), 1, Some(5), None).is_err());
    }

    #[test]
    fn test_demo_with_small_capacity() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("chain.bin");
        let config = ChainConfig { max_transactions: 1 };

        run_demo(config, 2, None, Some(path.as_path())).unwrap();

        let chain = storage::load(&path, SnapshotFormat::Binary).unwrap();
        assert_eq!(chain.block_count(), 3);
        assert!(chain.iter().skip(1).all(|block| block.transactions.len() == 1));
    }

    #[test]
    fn test_missing_snapshot() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("missing.json");

        assert!(run_verify(&path).is_err());
        assert!(run_inspect(&path, 1).is_err());
    }

    #[test]
    fn test_load_config() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.json");
        fs::write(&path, r#"{ "max_transactions": 4 }"#).unwrap();

        assert_eq!(load_config(Some(path.as_path()), None).unwrap().max_transactions, 4);
        assert_eq!(load_config(Some(path.as_path()), Some(7)).unwrap().max_transactions, 7);
        assert_eq!(load_config(None, None).unwrap(), ChainConfig::default());

        fs::write(&path, "{}").unwrap();
        assert_eq!(load_config(Some(path.as_path()), None).unwrap(), ChainConfig::default());

        fs::write(&path, "not json").unwrap();
        assert!(load_config(Some(path.as_path()), None).is_err());
    }
}
