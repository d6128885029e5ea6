use ndarray::{ArrayD, IxDyn};
use tracing::{debug, info};

use crate::axis::AxisLabel;
use crate::dataset::{AnyHyperstack, Hyperstack};
use crate::error::{HyperstackError, Result};
use crate::sample::Sample;

use super::composite::recompute_composite_count;
use super::copy::copy_preserving;
use super::shape::new_dimensions;
use super::validate::validate;
use super::InsertionRequest;

/// Insert `request.quantity` default-valued hyperplanes into `stack`.
///
/// Returns a new hyperstack; `stack` is only read. Validation and
/// allocation both happen before any sample is copied, so on error nothing
/// has been produced. The caller swaps the result in for the original.
pub fn grow<T: Sample>(stack: &Hyperstack<T>, request: &InsertionRequest) -> Result<Hyperstack<T>> {
    let spec = validate(stack, request)?;
    let position = request.position as usize;
    let quantity = request.quantity as usize;

    let old_dims = stack.dims().to_vec();
    let dims = new_dimensions(&old_dims, spec.index, quantity);
    let mut data = allocate::<T>(&dims)?;

    copy_preserving(stack.data().view(), data.view_mut(), spec.index, position, quantity)?;

    let is_channel = spec.label == AxisLabel::Channel;
    let composite = recompute_composite_count(
        stack.composite_channel_count(),
        old_dims[spec.index],
        dims[spec.index],
        is_channel,
    );
    if is_channel {
        debug!(
            old = stack.composite_channel_count(),
            new = composite,
            "Composite channel count recomputed"
        );
    }

    info!(
        axis = %spec.label,
        position,
        quantity,
        old_dims = ?old_dims,
        new_dims = ?dims,
        "Hyperplanes inserted"
    );

    Ok(stack.with_data(data, composite))
}

/// [`grow`] for a hyperstack whose sample type is only known at runtime.
pub fn grow_any(stack: &AnyHyperstack, request: &InsertionRequest) -> Result<AnyHyperstack> {
    Ok(crate::with_hyperstack!(stack, s => grow(s, request)?.into()))
}

/// Allocate a default-initialized array, reporting failure instead of
/// aborting.
pub(crate) fn allocate<T: Sample>(dims: &[usize]) -> Result<ArrayD<T>> {
    let elements = dims
        .iter()
        .try_fold(1usize, |acc, &d| acc.checked_mul(d))
        .filter(|&n| n <= isize::MAX as usize)
        .ok_or(HyperstackError::AllocationFailed {
            elements: usize::MAX,
        })?;

    let mut samples = Vec::new();
    samples
        .try_reserve_exact(elements)
        .map_err(|_| HyperstackError::AllocationFailed { elements })?;
    samples.resize(elements, T::default());

    ArrayD::from_shape_vec(IxDyn(dims), samples)
        .map_err(|e| HyperstackError::InvalidShape(e.to_string()))
}
