use std::ops::RangeInclusive;

use crate::consts::MAX_EXTENT;
use crate::dataset::Hyperstack;
use crate::error::{HyperstackError, Result};
use crate::sample::Sample;

use super::InsertionRequest;

/// Legal range for the insertion position on an axis of `extent`.
pub fn position_bounds(extent: usize) -> RangeInclusive<i64> {
    1..=extent as i64
}

/// Legal range for the insertion quantity at `position`.
pub fn quantity_bounds(position: i64) -> RangeInclusive<i64> {
    let position = position.max(1);
    let max = (MAX_EXTENT as i64).saturating_sub(position).saturating_add(1);
    1..=max.max(1)
}

/// Pull a request's position and quantity back into their bounds.
///
/// Used by interactive front ends to keep their fields sane while the user
/// edits them. The result still goes through [`super::validate`].
pub fn clamp_request<T: Sample>(
    stack: &Hyperstack<T>,
    request: &InsertionRequest,
) -> Result<InsertionRequest> {
    let extent = stack
        .extent(&request.axis)
        .ok_or_else(|| HyperstackError::AxisNotFound(request.axis.clone()))?;

    let positions = position_bounds(extent);
    let position = request
        .position
        .clamp(*positions.start(), *positions.end());

    let quantities = quantity_bounds(position);
    let quantity = request
        .quantity
        .clamp(*quantities.start(), *quantities.end());

    Ok(InsertionRequest {
        axis: request.axis.clone(),
        position,
        quantity,
    })
}
