use crate::axis::AxisSpec;
use crate::consts::MAX_EXTENT;
use crate::dataset::Hyperstack;
use crate::error::{HyperstackError, Result};
use crate::sample::Sample;

use super::InsertionRequest;

/// Check an insertion request against the current shape of `stack`.
///
/// On success returns the resolved axis. Rules:
/// - the axis must be present,
/// - `1 <= position < extent` (insertion goes before an existing
///   hyperplane; appending past the last one is rejected),
/// - `quantity >= 1` and `extent + quantity <= MAX_EXTENT`.
pub fn validate<T: Sample>(stack: &Hyperstack<T>, request: &InsertionRequest) -> Result<AxisSpec> {
    let spec = stack
        .axis_spec(&request.axis)
        .ok_or_else(|| HyperstackError::AxisNotFound(request.axis.clone()))?;
    let extent = stack.dims()[spec.index];

    if request.position < 1 || request.position as u64 >= extent as u64 {
        return Err(HyperstackError::PositionOutOfRange {
            position: request.position,
            extent,
        });
    }

    if request.quantity <= 0 {
        return Err(HyperstackError::QuantityInvalid {
            quantity: request.quantity,
            extent,
        });
    }
    match MAX_EXTENT.checked_sub(request.quantity as u64) {
        Some(headroom) if headroom >= extent as u64 => {}
        _ => {
            return Err(HyperstackError::QuantityInvalid {
                quantity: request.quantity,
                extent,
            })
        }
    }

    Ok(spec)
}
