use std::path::PathBuf;

use anyhow::{bail, Result};
use clap::{Args, ValueEnum};
use hyperstack_core::dataset::AnyHyperstack;
use hyperstack_core::ops::calculator::{calculate_any, calculate_scalar_any, CalculatorOp};

use super::{load_stack, save_stack};

#[derive(Clone, ValueEnum)]
pub enum CalcOpArg {
    Add,
    Subtract,
    Multiply,
    Divide,
    And,
    Or,
    Xor,
    Min,
    Max,
    Average,
    Difference,
    Copy,
    TransparentZero,
}

impl From<&CalcOpArg> for CalculatorOp {
    fn from(arg: &CalcOpArg) -> Self {
        match arg {
            CalcOpArg::Add => CalculatorOp::Add,
            CalcOpArg::Subtract => CalculatorOp::Subtract,
            CalcOpArg::Multiply => CalculatorOp::Multiply,
            CalcOpArg::Divide => CalculatorOp::Divide,
            CalcOpArg::And => CalculatorOp::And,
            CalcOpArg::Or => CalculatorOp::Or,
            CalcOpArg::Xor => CalculatorOp::Xor,
            CalcOpArg::Min => CalculatorOp::Min,
            CalcOpArg::Max => CalculatorOp::Max,
            CalcOpArg::Average => CalculatorOp::Average,
            CalcOpArg::Difference => CalculatorOp::Difference,
            CalcOpArg::Copy => CalculatorOp::Copy,
            CalcOpArg::TransparentZero => CalculatorOp::TransparentZero,
        }
    }
}

#[derive(Args)]
pub struct CalcArgs {
    /// First operand: stack (.hst) or image file
    pub a: PathBuf,

    /// Second operand file; must match the first in axes and extents
    pub b: Option<PathBuf>,

    /// Use a constant as the second operand instead of a file
    #[arg(long, allow_negative_numbers = true)]
    pub value: Option<f64>,

    /// Operation
    #[arg(long, value_enum, default_value = "add")]
    pub op: CalcOpArg,

    /// Output file path
    #[arg(short, long, default_value = "result.hst")]
    pub output: PathBuf,
}

pub fn run(args: &CalcArgs) -> Result<()> {
    let op = CalculatorOp::from(&args.op);
    let a = load_stack(&args.a)?;

    let result = match (&args.b, args.value) {
        (Some(path), None) => {
            let b = load_stack(path)?;
            println!("{} {} {}", args.a.display(), op, path.display());
            calculate_any(op, &a, &b)?
        }
        (None, Some(value)) => {
            println!("{} {} {}", args.a.display(), op, value);
            calculate_scalar_any(op, &a, value)?
        }
        (Some(_), Some(_)) => bail!("Give either a second file or --value, not both"),
        (None, None) => bail!("Missing second operand: give a file or --value"),
    };

    save_stack(&AnyHyperstack::F64(result), &args.output)?;
    println!("Saved to {}", args.output.display());

    Ok(())
}
