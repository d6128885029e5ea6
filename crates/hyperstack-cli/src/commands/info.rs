use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use hyperstack_core::io::stack_file::{StackHeader, StackReader};
use hyperstack_core::io::STACK_FILE_EXTENSION;

use super::load_stack;
use crate::summary::print_layout;

#[derive(Args)]
pub struct InfoArgs {
    /// Input stack (.hst) or image file
    pub file: PathBuf,
}

pub fn run(args: &InfoArgs) -> Result<()> {
    let is_stack = args
        .file
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case(STACK_FILE_EXTENSION));

    // Stack files only need their header; images have to be decoded.
    let header = if is_stack {
        StackReader::open(&args.file)
            .with_context(|| format!("Failed to open {}", args.file.display()))?
            .header
    } else {
        StackHeader::of(&load_stack(&args.file)?)
    };

    println!("File:        {}", args.file.display());
    print_layout(&header);

    Ok(())
}
