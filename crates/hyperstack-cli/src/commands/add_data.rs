use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use hyperstack_core::axis::AxisLabel;
use hyperstack_core::restructure::{grow_any, InsertionRequest};

use super::{load_stack, save_stack};
use crate::summary::print_reshape_summary;

#[derive(Args)]
pub struct AddDataArgs {
    /// Input stack (.hst) or image file
    pub file: PathBuf,

    /// Axis to grow (x, y, c, z, t or a custom label)
    #[arg(long, default_value = "x")]
    pub axis: AxisLabel,

    /// 1-based insertion position; new planes start before this index
    #[arg(long, default_value = "1", allow_negative_numbers = true)]
    pub position: i64,

    /// Number of hyperplanes to insert
    #[arg(long, default_value = "1", allow_negative_numbers = true)]
    pub quantity: i64,

    /// Output file path
    #[arg(short, long, default_value = "result.hst")]
    pub output: PathBuf,
}

pub fn run(args: &AddDataArgs) -> Result<()> {
    let stack = load_stack(&args.file)?;
    let request = InsertionRequest::new(args.axis.clone(), args.position, args.quantity);

    let grown = grow_any(&stack, &request).with_context(|| {
        format!(
            "Cannot insert {} plane(s) on axis {} at position {}",
            request.quantity, request.axis, request.position
        )
    })?;

    print_reshape_summary("Add Data", &stack, &grown);
    save_stack(&grown, &args.output)?;
    println!("Saved to {}", args.output.display());

    Ok(())
}
