// crates/slimarray-cli/src/cmd/build.rs

use anyhow::{Context, Result};
use clap::Args;

use slimarray_core::SlimArray32;

#[derive(Args, Debug)]
pub struct BuildArgs {
    /// Input path: a JSON array of u32 values, e.g. `[1, 2, 3]`
    #[arg(long)]
    pub r#in: String,

    /// Output path for the array's JSON snapshot
    #[arg(long)]
    pub out: String,
}

pub fn run(args: BuildArgs) -> Result<()> {
    let raw = std::fs::read_to_string(&args.r#in).with_context(|| format!("reading {}", args.r#in))?;
    let nums: Vec<u32> = serde_json::from_str(&raw).with_context(|| format!("parsing {} as a JSON array of u32", args.r#in))?;

    let arr = SlimArray32::new_from_u32(&nums);
    let snapshot = arr.to_snapshot();
    let json = serde_json::to_string(&snapshot)?;
    std::fs::write(&args.out, json).with_context(|| format!("writing {}", args.out))?;

    let stat = arr.stat();
    eprintln!("n              = {}", stat["n"]);
    eprintln!("bits/elt       = {}", stat["bits/elt"]);
    eprintln!("mem_total      = {} bytes", stat["mem_total"]);
    eprintln!("wrote snapshot = {}", args.out);

    Ok(())
}
