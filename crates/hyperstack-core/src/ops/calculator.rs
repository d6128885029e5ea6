use std::fmt;

use ndarray::Zip;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::consts::PARALLEL_PIXEL_THRESHOLD;
use crate::dataset::{AnyHyperstack, Hyperstack};
use crate::error::{HyperstackError, Result};
use crate::sample::Sample;

/// Binary operation combining two samples into a real result.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum CalculatorOp {
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

impl fmt::Display for CalculatorOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Add => write!(f, "Add"),
            Self::Subtract => write!(f, "Subtract"),
            Self::Multiply => write!(f, "Multiply"),
            Self::Divide => write!(f, "Divide"),
            Self::And => write!(f, "AND"),
            Self::Or => write!(f, "OR"),
            Self::Xor => write!(f, "XOR"),
            Self::Min => write!(f, "Min"),
            Self::Max => write!(f, "Max"),
            Self::Average => write!(f, "Average"),
            Self::Difference => write!(f, "Difference"),
            Self::Copy => write!(f, "Copy"),
            Self::TransparentZero => write!(f, "Transparent-zero"),
        }
    }
}

impl CalculatorOp {
    /// Combine `a` (first operand) with `b` (second operand).
    ///
    /// Division by zero yields 0. Bitwise operations act on the values
    /// truncated to integers. `Copy` yields `b`; `TransparentZero` yields
    /// `b` unless it is zero, in which case `a` shows through.
    pub fn apply(self, a: f64, b: f64) -> f64 {
        match self {
            Self::Add => a + b,
            Self::Subtract => a - b,
            Self::Multiply => a * b,
            Self::Divide => {
                if b == 0.0 {
                    0.0
                } else {
                    a / b
                }
            }
            Self::And => ((a as i64) & (b as i64)) as f64,
            Self::Or => ((a as i64) | (b as i64)) as f64,
            Self::Xor => ((a as i64) ^ (b as i64)) as f64,
            Self::Min => a.min(b),
            Self::Max => a.max(b),
            Self::Average => (a + b) / 2.0,
            Self::Difference => (a - b).abs(),
            Self::Copy => b,
            Self::TransparentZero => {
                if b == 0.0 {
                    a
                } else {
                    b
                }
            }
        }
    }
}

/// Combine two equally-shaped hyperstacks element by element.
///
/// The result is real-valued and takes its axes, calibration and composite
/// count from `a`.
pub fn calculate<A: Sample, B: Sample>(
    op: CalculatorOp,
    a: &Hyperstack<A>,
    b: &Hyperstack<B>,
) -> Result<Hyperstack<f64>> {
    if a.dims() != b.dims() || a.axes() != b.axes() {
        return Err(HyperstackError::IncompatibleShapes {
            left: a.dims().to_vec(),
            right: b.dims().to_vec(),
        });
    }

    let zip = Zip::from(a.data()).and(b.data());
    let combined = if a.len() >= PARALLEL_PIXEL_THRESHOLD {
        zip.par_map_collect(|&x, &y| op.apply(x.as_f64(), y.as_f64()))
    } else {
        zip.map_collect(|&x, &y| op.apply(x.as_f64(), y.as_f64()))
    };

    info!(op = %op, dims = ?a.dims(), "Calculator applied");
    Ok(a.with_data(combined, a.composite_channel_count()))
}

/// Combine every sample of `a` with a constant.
pub fn calculate_scalar<A: Sample>(
    op: CalculatorOp,
    a: &Hyperstack<A>,
    value: f64,
) -> Result<Hyperstack<f64>> {
    let combined = a.data().mapv(|x| op.apply(x.as_f64(), value));
    info!(op = %op, value, "Calculator applied with constant");
    Ok(a.with_data(combined, a.composite_channel_count()))
}

/// [`calculate`] for hyperstacks whose sample types are only known at runtime.
pub fn calculate_any(
    op: CalculatorOp,
    a: &AnyHyperstack,
    b: &AnyHyperstack,
) -> Result<Hyperstack<f64>> {
    crate::with_hyperstack!(a, left => {
        crate::with_hyperstack!(b, right => calculate(op, left, right))
    })
}

/// [`calculate_scalar`] for a hyperstack whose sample type is only known at runtime.
pub fn calculate_scalar_any(op: CalculatorOp, a: &AnyHyperstack, value: f64) -> Result<Hyperstack<f64>> {
    crate::with_hyperstack!(a, s => calculate_scalar(op, s, value))
}
