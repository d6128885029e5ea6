use std::fmt;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::ops::calculator::CalculatorOp;
use crate::ops::noise::{Neighborhood, NoiseReducer};
use crate::restructure::InsertionRequest;

/// A batch job: load `input`, apply `steps` in order, save to `output`.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct PipelineConfig {
    pub input: PathBuf,
    pub output: PathBuf,
    #[serde(default)]
    pub steps: Vec<PipelineStep>,
}

/// One transformation applied to the working hyperstack.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum PipelineStep {
    /// Insert default-valued hyperplanes along an axis.
    AddData(InsertionRequest),
    /// Neighborhood noise reduction over every XY plane.
    NoiseReduction {
        method: NoiseReducer,
        #[serde(default)]
        neighborhood: Neighborhood,
    },
    /// Combine with a second stack or a constant. Produces 64-bit float data.
    Calculator { op: CalculatorOp, operand: Operand },
    /// Change how many leading channels are composited.
    SetComposite { count: usize },
}

impl fmt::Display for PipelineStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::AddData(req) => write!(
                f,
                "Add Data ({} x{} at {})",
                req.axis, req.quantity, req.position
            ),
            Self::NoiseReduction {
                method,
                neighborhood,
            } => write!(
                f,
                "{} ({}x{})",
                method,
                2 * neighborhood.radius_x + 1,
                2 * neighborhood.radius_y + 1
            ),
            Self::Calculator { op, operand } => write!(f, "Calculator {op} {operand}"),
            Self::SetComposite { count } => write!(f, "Composite {count}"),
        }
    }
}

/// Second operand of a calculator step.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum Operand {
    Constant(f64),
    Stack(PathBuf),
}

impl fmt::Display for Operand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Constant(v) => write!(f, "{v}"),
            Self::Stack(path) => write!(f, "{}", path.display()),
        }
    }
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            input: PathBuf::from("input.hst"),
            output: PathBuf::from("result.hst"),
            steps: Vec::new(),
        }
    }
}
