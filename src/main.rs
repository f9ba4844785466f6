use anyhow::Result;
use clap::Parser;

use git_workflow::cli::{self, Args};

fn main() -> Result<()> {
    let args = Args::parse();
    // both an exit and an abort end with status 0
    cli::run(args)?;
    Ok(())
}
