//! Command line arguments for the chainlet binary

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "chainlet", version, about = "Educational linked-block chain simulator")]
pub struct CliArgs {
    /// Enable debug logging (RUST_LOG takes precedence)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Build a sample chain, print it and verify it
    Demo {
        /// Number of blocks to append after genesis
        #[arg(short, long, default_value_t = 3)]
        blocks: u64,

        /// Overwrite the previous fingerprint of this block before verifying
        #[arg(long)]
        tamper: Option<u64>,

        /// Write a snapshot of the chain (.json for JSON, binary otherwise)
        #[arg(long)]
        export: Option<PathBuf>,

        /// JSON file with the chain configuration
        #[arg(long)]
        config: Option<PathBuf>,

        /// Maximum transactions per block, overrides the config file
        #[arg(long)]
        capacity: Option<usize>,
    },

    /// Load a snapshot and verify its links
    Verify {
        /// Snapshot file
        path: PathBuf,
    },

    /// Print the latest blocks and statistics of a snapshot
    Inspect {
        /// Snapshot file
        path: PathBuf,

        /// Number of blocks to show
        #[arg(short, long, default_value_t = 5)]
        latest: usize,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        CliArgs::command().debug_assert();
    }

    #[test]
    fn test_demo_defaults() {
        let args = CliArgs::try_parse_from(["chainlet", "demo"]).unwrap();
        match args.command {
            Command::Demo {
                blocks,
                tamper,
                export,
                config,
                capacity,
            } => {
                assert_eq!(blocks, 3);
                assert!(tamper.is_none());
                assert!(export.is_none());
                assert!(config.is_none());
                assert!(capacity.is_none());
            }
            other => panic!("unexpected command: {:?}", other),
        }
        assert!(!args.verbose);
    }

    #[test]
    fn test_inspect_arguments() {
        let argv = ["chainlet", "-v", "inspect", "chain.json", "--latest", "2"];
        let args = CliArgs::try_parse_from(argv).unwrap();
        assert!(args.verbose);
        match args.command {
            Command::Inspect { path, latest } => {
                assert_eq!(path, PathBuf::from("chain.json"));
                assert_eq!(latest, 2);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_verify_requires_path() {
        assert!(CliArgs::try_parse_from(["chainlet", "verify"]).is_err());
    }
}
