use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use hyperstack_core::io::image_io::import_image;
use hyperstack_core::io::stack_file::{write_stack, StackHeader};

use crate::summary::print_layout;

#[derive(Args)]
pub struct ImportArgs {
    /// Input PNG or TIFF image
    pub file: PathBuf,

    /// Output stack file
    #[arg(short, long, default_value = "result.hst")]
    pub output: PathBuf,
}

pub fn run(args: &ImportArgs) -> Result<()> {
    let stack = import_image(&args.file)
        .with_context(|| format!("Failed to import {}", args.file.display()))?;
    print_layout(&StackHeader::of(&stack));

    write_stack(&stack, &args.output)
        .with_context(|| format!("Failed to write {}", args.output.display()))?;
    println!("Saved to {}", args.output.display());

    Ok(())
}
