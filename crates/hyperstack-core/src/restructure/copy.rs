use ndarray::{ArrayViewD, ArrayViewMutD, Axis, Slice};

use crate::error::{HyperstackError, Result};
use crate::sample::Sample;

use super::shape::new_dimensions;

/// Copy `count` consecutive hyperplanes along `axis`, starting at
/// `src_start` in `src`, to `dst` starting at `dst_start`.
///
/// All other axes are copied in full. Callers guarantee the ranges are in
/// bounds and that `src` and `dst` agree on every other extent.
pub fn copy_hyperplanes<T: Sample>(
    src: &ArrayViewD<'_, T>,
    dst: &mut ArrayViewMutD<'_, T>,
    axis: usize,
    src_start: usize,
    dst_start: usize,
    count: usize,
) {
    if count == 0 {
        return;
    }
    let from = src.slice_axis(Axis(axis), Slice::from(src_start..src_start + count));
    dst.slice_axis_mut(Axis(axis), Slice::from(dst_start..dst_start + count))
        .assign(&from);
}

/// Copy every hyperplane of `src` into `dst`, leaving a gap of `quantity`
/// hyperplanes at zero-based index `position - 1` along `axis`.
///
/// Hyperplanes before the gap keep their index; the rest shift up by
/// `quantity`. The gap itself is not written, so it keeps whatever `dst`
/// was initialized with.
pub fn copy_preserving<T: Sample>(
    src: ArrayViewD<'_, T>,
    mut dst: ArrayViewMutD<'_, T>,
    axis: usize,
    position: usize,
    quantity: usize,
) -> Result<()> {
    if axis >= src.ndim() {
        return Err(HyperstackError::InvalidShape(format!(
            "axis index {axis} out of range for {} dimension(s)",
            src.ndim()
        )));
    }

    let extent = src.len_of(Axis(axis));
    if position < 1 || position > extent {
        return Err(HyperstackError::PositionOutOfRange {
            position: position as i64,
            extent,
        });
    }

    let expected = new_dimensions(src.shape(), axis, quantity);
    if dst.shape() != expected.as_slice() {
        return Err(HyperstackError::ShapeMismatch {
            expected,
            actual: dst.shape().to_vec(),
        });
    }

    let num_before = position - 1;
    let num_after = extent - num_before;

    copy_hyperplanes(&src, &mut dst, axis, 0, 0, num_before);
    copy_hyperplanes(&src, &mut dst, axis, num_before, num_before + quantity, num_after);

    Ok(())
}
