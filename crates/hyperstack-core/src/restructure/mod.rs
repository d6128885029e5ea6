pub mod add_data;
pub mod bounds;
pub mod composite;
pub mod copy;
pub mod shape;
pub mod validate;

use serde::{Deserialize, Serialize};

use crate::axis::AxisLabel;

pub use add_data::{grow, grow_any};
pub use composite::recompute_composite_count;
pub use copy::copy_preserving;
pub use shape::new_dimensions;
pub use validate::validate;

/// Parameters of one hyperplane insertion.
///
/// `position` is 1-based in the pre-insertion coordinate space. The new
/// block starts at zero-based index `position - 1`; everything from that
/// index on shifts up by `quantity`. Both fields are signed so raw user
/// input can be validated rather than wrapped.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct InsertionRequest {
    pub axis: AxisLabel,
    pub position: i64,
    pub quantity: i64,
}

impl InsertionRequest {
    pub fn new(axis: AxisLabel, position: i64, quantity: i64) -> Self {
        Self {
            axis,
            position,
            quantity,
        }
    }
}

impl Default for InsertionRequest {
    fn default() -> Self {
        Self {
            axis: AxisLabel::X,
            position: 1,
            quantity: 1,
        }
    }
}
