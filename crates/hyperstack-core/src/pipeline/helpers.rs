use tracing::info;

use crate::dataset::AnyHyperstack;
use crate::error::Result;
use crate::io;
use crate::ops::calculator::{calculate_any, calculate_scalar_any};
use crate::ops::noise::reduce_noise_any;
use crate::restructure::grow_any;

use super::config::{Operand, PipelineStep};

/// Apply a single pipeline step, consuming the working stack.
pub fn apply_step(stack: AnyHyperstack, step: &PipelineStep) -> Result<AnyHyperstack> {
    let result = match step {
        PipelineStep::AddData(request) => grow_any(&stack, request)?,
        PipelineStep::NoiseReduction {
            method,
            neighborhood,
        } => reduce_noise_any(&stack, *method, *neighborhood)?,
        PipelineStep::Calculator { op, operand } => {
            let combined = match operand {
                Operand::Constant(value) => calculate_scalar_any(*op, &stack, *value)?,
                Operand::Stack(path) => {
                    let other = io::load(path)?;
                    calculate_any(*op, &stack, &other)?
                }
            };
            AnyHyperstack::F64(combined)
        }
        PipelineStep::SetComposite { count } => {
            let mut stack = stack;
            stack.set_composite_channel_count(*count)?;
            stack
        }
    };
    info!(step = %step, dims = ?result.dims(), "Step applied");
    Ok(result)
}
