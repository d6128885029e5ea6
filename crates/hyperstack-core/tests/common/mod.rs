use std::path::PathBuf;

use hyperstack_core::axis::AxisLabel;
use hyperstack_core::dataset::{AnyHyperstack, Hyperstack};
use hyperstack_core::io::stack_file::write_stack;
use ndarray::{ArrayD, IxDyn};

/// Build a `u16` hyperstack whose samples are `1 + row-major index`.
///
/// No sample is zero, so default-filled hyperplanes are easy to spot.
pub fn ramp_stack(axes: &[AxisLabel], dims: &[usize]) -> Hyperstack<u16> {
    let len: usize = dims.iter().product();
    let samples = (1..=len).map(|v| v as u16).collect();
    let data = ArrayD::from_shape_vec(IxDyn(dims), samples).expect("ramp shape");
    Hyperstack::new(axes.to_vec(), data).expect("ramp layout")
}

/// Same as [`ramp_stack`] but with `f64` samples.
pub fn ramp_stack_f64(axes: &[AxisLabel], dims: &[usize]) -> Hyperstack<f64> {
    let len: usize = dims.iter().product();
    let samples = (1..=len).map(|v| v as f64).collect();
    let data = ArrayD::from_shape_vec(IxDyn(dims), samples).expect("ramp shape");
    Hyperstack::new(axes.to_vec(), data).expect("ramp layout")
}

/// The usual `[X, Y]` plane.
pub fn xy() -> Vec<AxisLabel> {
    vec![AxisLabel::X, AxisLabel::Y]
}

/// `[X, Y, Channel, Z, Time]`, the full five-axis layout.
pub fn xyczt() -> Vec<AxisLabel> {
    vec![
        AxisLabel::X,
        AxisLabel::Y,
        AxisLabel::Channel,
        AxisLabel::Z,
        AxisLabel::Time,
    ]
}

/// Write a stack to `name` inside a fresh temp dir.
///
/// The file stays alive as long as the returned `TempDir` is not dropped.
pub fn write_temp_stack(stack: &AnyHyperstack, name: &str) -> (tempfile::TempDir, PathBuf) {
    let dir = tempfile::tempdir().expect("create temp dir");
    let path = dir.path().join(name);
    write_stack(stack, &path).expect("write stack");
    (dir, path)
}
