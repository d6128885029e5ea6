use std::fmt;

use ndarray::{ArrayD, ArrayView3, Axis, IxDyn};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::axis::AxisLabel;
use crate::consts::PARALLEL_PIXEL_THRESHOLD;
use crate::dataset::{AnyHyperstack, Hyperstack};
use crate::error::{HyperstackError, Result};
use crate::sample::Sample;

/// Statistic computed over each pixel's neighborhood.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum NoiseReducer {
    Mean,
    Median,
    Minimum,
    Maximum,
    Midpoint,
    HarmonicMean,
    GeometricMean,
}

impl fmt::Display for NoiseReducer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Mean => write!(f, "Mean"),
            Self::Median => write!(f, "Median"),
            Self::Minimum => write!(f, "Minimum"),
            Self::Maximum => write!(f, "Maximum"),
            Self::Midpoint => write!(f, "Midpoint"),
            Self::HarmonicMean => write!(f, "Harmonic Mean"),
            Self::GeometricMean => write!(f, "Geometric Mean"),
        }
    }
}

impl NoiseReducer {
    /// Reduce a non-empty window of samples. `values` may be reordered.
    pub fn reduce(self, values: &mut [f64]) -> f64 {
        let n = values.len() as f64;
        match self {
            Self::Mean => values.iter().sum::<f64>() / n,
            Self::Median => median(values),
            Self::Minimum => values.iter().copied().fold(f64::INFINITY, f64::min),
            Self::Maximum => values.iter().copied().fold(f64::NEG_INFINITY, f64::max),
            Self::Midpoint => {
                let lo = values.iter().copied().fold(f64::INFINITY, f64::min);
                let hi = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
                (lo + hi) / 2.0
            }
            Self::HarmonicMean => {
                if values.iter().any(|&v| v == 0.0) {
                    return 0.0;
                }
                n / values.iter().map(|&v| 1.0 / v).sum::<f64>()
            }
            Self::GeometricMean => (values.iter().map(|v| v.ln()).sum::<f64>() / n).exp(),
        }
    }
}

fn median(values: &mut [f64]) -> f64 {
    let n = values.len();
    let mid = n / 2;
    if n % 2 == 1 {
        *values.select_nth_unstable_by(mid, |a, b| a.total_cmp(b)).1
    } else {
        values.select_nth_unstable_by(mid, |a, b| a.total_cmp(b));
        let upper = values[mid];
        let lower = values[..mid]
            .iter()
            .copied()
            .fold(f64::NEG_INFINITY, f64::max);
        (lower + upper) / 2.0
    }
}

/// Rectangular window centred on each pixel of an XY plane.
///
/// The window spans `2 * radius + 1` pixels along each axis and is cut off
/// at the plane edges.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Neighborhood {
    pub radius_x: usize,
    pub radius_y: usize,
}

impl Neighborhood {
    pub fn square(radius: usize) -> Self {
        Self {
            radius_x: radius,
            radius_y: radius,
        }
    }
}

impl Default for Neighborhood {
    fn default() -> Self {
        Self::square(1)
    }
}

/// Apply `reducer` over `neighborhood` to every XY plane of `stack`.
///
/// Planes are independent: each combination of the non-XY axes is filtered
/// on its own. Integer results are rounded and saturated.
pub fn reduce_noise<T: Sample>(
    stack: &Hyperstack<T>,
    reducer: NoiseReducer,
    neighborhood: Neighborhood,
) -> Result<Hyperstack<T>> {
    let x_axis = stack
        .axis_index(&AxisLabel::X)
        .ok_or(HyperstackError::AxisNotFound(AxisLabel::X))?;
    let y_axis = stack
        .axis_index(&AxisLabel::Y)
        .ok_or(HyperstackError::AxisNotFound(AxisLabel::Y))?;

    // Move Y and X to the back so every plane is a contiguous (h, w) block.
    let mut order: Vec<usize> = (0..stack.ndim())
        .filter(|&a| a != x_axis && a != y_axis)
        .collect();
    order.push(y_axis);
    order.push(x_axis);

    let permuted = stack.data().view().permuted_axes(IxDyn(&order));
    let permuted_dims = permuted.shape().to_vec();
    let h = stack.dims()[y_axis];
    let w = stack.dims()[x_axis];
    let planes = stack.len() / (h * w);

    let cube = permuted
        .to_shape((planes, h, w))
        .map_err(|e| HyperstackError::InvalidShape(e.to_string()))?;
    let cube = cube.view();

    let mut out = vec![T::default(); stack.len()];
    let process_row = |(row, dst): (usize, &mut [T])| {
        let mut window = Vec::with_capacity(
            (2 * neighborhood.radius_x + 1) * (2 * neighborhood.radius_y + 1),
        );
        filter_row(&cube, row / h, row % h, reducer, neighborhood, &mut window, dst);
    };
    if stack.len() >= PARALLEL_PIXEL_THRESHOLD {
        out.par_chunks_mut(w).enumerate().for_each(process_row);
    } else {
        out.chunks_mut(w).enumerate().for_each(process_row);
    }

    let mut inverse = vec![0; order.len()];
    for (i, &axis) in order.iter().enumerate() {
        inverse[axis] = i;
    }
    let filtered = ArrayD::from_shape_vec(IxDyn(&permuted_dims), out)
        .map_err(|e| HyperstackError::InvalidShape(e.to_string()))?
        .permuted_axes(IxDyn(&inverse))
        .as_standard_layout()
        .into_owned();

    info!(
        method = %reducer,
        radius_x = neighborhood.radius_x,
        radius_y = neighborhood.radius_y,
        planes,
        "Noise reduction applied"
    );

    Ok(stack.with_data(filtered, stack.composite_channel_count()))
}

/// [`reduce_noise`] for a hyperstack whose sample type is only known at runtime.
pub fn reduce_noise_any(
    stack: &AnyHyperstack,
    reducer: NoiseReducer,
    neighborhood: Neighborhood,
) -> Result<AnyHyperstack> {
    Ok(crate::with_hyperstack!(stack, s => reduce_noise(s, reducer, neighborhood)?.into()))
}

fn filter_row<T: Sample>(
    cube: &ArrayView3<'_, T>,
    plane: usize,
    y: usize,
    reducer: NoiseReducer,
    neighborhood: Neighborhood,
    window: &mut Vec<f64>,
    dst: &mut [T],
) {
    let (_, h, w) = cube.dim();
    let plane = cube.index_axis(Axis(0), plane);
    let y0 = y.saturating_sub(neighborhood.radius_y);
    let y1 = (y + neighborhood.radius_y).min(h - 1);

    for (x, out) in dst.iter_mut().enumerate() {
        let x0 = x.saturating_sub(neighborhood.radius_x);
        let x1 = (x + neighborhood.radius_x).min(w - 1);
        window.clear();
        for yy in y0..=y1 {
            for xx in x0..=x1 {
                window.push(plane[[yy, xx]].as_f64());
            }
        }
        *out = T::from_f64(reducer.reduce(window));
    }
}
