#![forbid(unsafe_code)]
//! Builds a ledger from config (or the built-in sample) and prints the chain
//! and every account's balance.

use clap::Parser;
use colored::*;
use comfy_table::Table;
use std::path::PathBuf;
use std::time::Instant;
use tallychain::blockchain::Blockchain;
use tallychain::config::load_config;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Path to a TOML config file (defaults to ./tally.toml if present)
    #[arg(long)]
    config: Option<PathBuf>,
    /// Override the block capacity
    #[arg(long)]
    block_size: Option<usize>,
    /// Override the difficulty target (required hash prefix)
    #[arg(long)]
    target: Option<String>,
    /// Give up sealing a block after this many nonce attempts
    #[arg(long)]
    max_attempts: Option<u64>,
    /// Print the chain as JSON instead of tables
    #[arg(long)]
    json: bool,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let mut config = load_config(cli.config.as_deref())?;
    if let Some(block_size) = cli.block_size {
        config.chain.block_size = block_size;
    }
    if let Some(target) = cli.target {
        config.chain.difficulty_target = target;
    }
    if let Some(max_attempts) = cli.max_attempts {
        config.chain.max_attempts = Some(max_attempts);
    }
    config.validate()?;

    let mut chain = config.build_blockchain()?;

    let start_time = Instant::now();
    chain.initialize()?;
    let elapsed = start_time.elapsed();

    if cli.json {
        print_json(&chain)?;
        return Ok(());
    }

    println!("{}", "TallyChain".bright_cyan().bold());
    println!(
        "Sealed {} blocks in {:.3} seconds (target \"{}\")\n",
        chain.height(),
        elapsed.as_secs_f64(),
        chain.pow().target
    );

    print_blocks(&chain);
    if let Some(tip) = chain.last_block() {
        println!("Tip: {}", tip.hash().bright_white());
    }
    print_balances(&chain)?;

    if !chain.rejections().is_empty() {
        println!("\n{}", "Rejected transfers:".bright_red().underline());
        for rejection in chain.rejections() {
            println!("  - {}", rejection.to_string().red());
        }
    }

    Ok(())
}

fn print_blocks(chain: &Blockchain) {
    let mut table = Table::new();
    table.set_header(vec!["Height", "Timestamp", "Nonce", "Transactions", "Hash", "Previous"]);

    for (height, block) in chain.blocks().iter().enumerate() {
        let transactions: Vec<String> = block.transactions().iter().map(|tx| tx.to_string()).collect();
        table.add_row(vec![
            height.to_string(),
            block.timestamp().to_string(),
            block.nonce().to_string(),
            transactions.join(" "),
            short_hash(block.hash()),
            short_hash(block.previous_hash()),
        ]);
    }

    println!("{table}");
}

fn print_balances(chain: &Blockchain) -> Result<(), Box<dyn std::error::Error>> {
    println!("\n{}", "Balances:".bright_green().underline());
    for account in 0..chain.initial_balances().len() {
        let balance = chain.get_balance(account)?;
        println!("  account {:<4} {}", account, balance.to_string().bright_white());
    }
    Ok(())
}

fn print_json(chain: &Blockchain) -> Result<(), Box<dyn std::error::Error>> {
    let output = serde_json::json!({
        "target": chain.pow().target,
        "blocks": chain.blocks(),
        "balances": chain.balances(),
        "rejections": chain.rejections(),
    });
    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

fn short_hash(hash: &str) -> String {
    if hash.len() > 16 {
        format!("{}…", &hash[..16])
    } else {
        hash.to_string()
    }
}
