use std::path::PathBuf;

use anyhow::Result;
use clap::Args;
use hyperstack_core::probe::probe_status;
use hyperstack_core::with_hyperstack;

use super::{load_stack, parse_coords};

#[derive(Args)]
pub struct ProbeArgs {
    /// Input stack (.hst) or image file
    pub file: PathBuf,

    /// Zero-based coordinate, one entry per axis in storage order (e.g. "3,4,0")
    #[arg(long)]
    pub at: String,
}

pub fn run(args: &ProbeArgs) -> Result<()> {
    let stack = load_stack(&args.file)?;
    let coords = parse_coords(&args.at)?;

    let line = with_hyperstack!(&stack, s => probe_status(s, &coords))?;
    println!("{line}");

    Ok(())
}
