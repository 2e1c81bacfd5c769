// crates/slimarray-cli/src/cmd/stat.rs

use anyhow::{Context, Result};
use clap::Args;

use slimarray_core::Snapshot;

#[derive(Args, Debug)]
pub struct StatArgs {
    /// Snapshot path produced by `slimarray build`
    #[arg(long)]
    pub r#in: String,
}

pub fn run(args: StatArgs) -> Result<()> {
    let raw = std::fs::read_to_string(&args.r#in).with_context(|| format!("reading {}", args.r#in))?;
    let snapshot: Snapshot = serde_json::from_str(&raw).with_context(|| format!("parsing snapshot {}", args.r#in))?;
    let arr = snapshot.into_array().context("reconstructing array from snapshot")?;

    for (key, value) in arr.stat() {
        println!("{key:<16}{value}");
    }
    Ok(())
}
