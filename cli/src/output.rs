//! Console rendering of chains and statistics

use chainlet_core::{Block, ChainStats, Verification};

pub fn print_banner() {
    println!("=== Simple Blockchain Implementation ===");
    println!();
}

pub fn print_blocks<'a, I>(blocks: I)
where
    I: IntoIterator<Item = &'a Block>,
{
    let mut count = 0;
    for block in blocks {
        println!();
        println!("{}", block);
        count += 1;
    }
    println!();
    println!("Total blocks shown: {}", count);
}

pub fn print_stats(stats: &ChainStats) {
    println!();
    println!("=== BLOCKCHAIN STATISTICS ===");
    println!("Total Blocks:        {}", stats.total_blocks);
    println!("Total Transactions:  {}", stats.total_transactions);
    println!("Latest Block Index:  {}", stats.tip_index);
    println!("Last Block Hash:     {}", stats.tip_fingerprint);
    if stats.age_seconds > 0 {
        let minutes = stats.age_seconds / 60;
        println!(
            "Blockchain Age:      {:.1} hours ({} minutes)",
            minutes as f64 / 60.0,
            minutes
        );
    }
    println!("========================================");
}

pub fn print_verification(verification: &Verification) {
    println!();
    println!("Verifying blockchain integrity...");
    match verification {
        Verification::Valid { blocks } => {
            println!("Blockchain is valid! ({} blocks)", blocks)
        }
        Verification::Broken { index, expected, found } => {
            println!("WARNING: Block #{} hash mismatch!", index);
            println!("  expected previous fingerprint: {}", expected);
            println!("  found:                         {}", found);
            println!("Blockchain verification failed!");
        }
    }
}
