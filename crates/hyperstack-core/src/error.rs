use thiserror::Error;

use crate::axis::AxisLabel;

#[derive(Error, Debug)]
pub enum HyperstackError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Image format error: {0}")]
    Image(#[from] image::ImageError),

    #[error("Axis {0} not present in dataset")]
    AxisNotFound(AxisLabel),

    #[error("Insertion position {position} out of range (axis extent: {extent})")]
    PositionOutOfRange { position: i64, extent: usize },

    #[error("Insertion quantity {quantity} invalid for axis extent {extent}")]
    QuantityInvalid { quantity: i64, extent: usize },

    #[error("Shape mismatch: expected {expected:?}, got {actual:?}")]
    ShapeMismatch {
        expected: Vec<usize>,
        actual: Vec<usize>,
    },

    #[error("Failed to allocate {elements} samples")]
    AllocationFailed { elements: usize },

    #[error("Invalid shape: {0}")]
    InvalidShape(String),

    #[error("Coordinate {coordinate} out of range on axis {axis} (extent: {extent})")]
    CoordinateOutOfRange {
        axis: AxisLabel,
        coordinate: usize,
        extent: usize,
    },

    #[error("Incompatible shapes: {left:?} vs {right:?}")]
    IncompatibleShapes { left: Vec<usize>, right: Vec<usize> },

    #[error("Invalid composite channel count {count} for {channels} channel(s)")]
    InvalidCompositeCount { count: usize, channels: usize },

    #[error("Invalid stack file: {0}")]
    InvalidStackFile(String),

    #[error("Unsupported sample type: {0}")]
    UnsupportedSampleType(String),
}

pub type Result<T> = std::result::Result<T, HyperstackError>;
