// crates/slimarray-cli/src/main.rs

use clap::{Parser, Subcommand};

mod cmd;

#[derive(Parser)]
#[command(name = "slimarray")]
#[command(about = "Build and query slimarray-core compressed arrays", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub cmd: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Build a compressed array from a JSON array of u32 values and
    /// write its snapshot to disk
    Build(cmd::build::BuildArgs),

    /// Look up a single index in a snapshot on disk
    Get(cmd::get::GetArgs),

    /// Report memory footprint and bits/element for a snapshot on disk
    Stat(cmd::stat::StatArgs),
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.cmd {
        Commands::Build(args) => cmd::build::run(args),
        Commands::Get(args) => cmd::get::run(args),
        Commands::Stat(args) => cmd::stat::run(args),
    }
}
