// crates/slimarray-cli/src/cmd/get.rs

use anyhow::{Context, Result};
use clap::Args;

use slimarray_core::Snapshot;

#[derive(Args, Debug)]
pub struct GetArgs {
    /// Snapshot path produced by `slimarray build`
    #[arg(long)]
    pub r#in: String,

    /// Element index to look up
    #[arg(long)]
    pub index: i64,
}

pub fn run(args: GetArgs) -> Result<()> {
    let raw = std::fs::read_to_string(&args.r#in).with_context(|| format!("reading {}", args.r#in))?;
    let snapshot: Snapshot = serde_json::from_str(&raw).with_context(|| format!("parsing snapshot {}", args.r#in))?;
    let arr = snapshot.into_array().context("reconstructing array from snapshot")?;

    let value = arr.get(args.index)?;
    println!("{value}");
    Ok(())
}
