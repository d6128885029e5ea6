use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use hyperstack_core::io::image_io::export_plane;

use super::{load_stack, parse_coords};

#[derive(Args)]
pub struct ExportArgs {
    /// Input stack file
    pub file: PathBuf,

    /// Coordinate selecting the plane; X and Y entries are ignored.
    /// Defaults to the origin.
    #[arg(long)]
    pub at: Option<String>,

    /// Output image (PNG or TIFF)
    #[arg(short, long, default_value = "plane.png")]
    pub output: PathBuf,
}

pub fn run(args: &ExportArgs) -> Result<()> {
    let stack = load_stack(&args.file)?;
    let position = match args.at {
        Some(ref at) => parse_coords(at)?,
        None => vec![0; stack.dims().len()],
    };

    export_plane(&stack, &position, &args.output)
        .with_context(|| format!("Failed to export plane to {}", args.output.display()))?;
    println!("Plane saved to {}", args.output.display());

    Ok(())
}
