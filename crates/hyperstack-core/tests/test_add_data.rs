mod common;

use hyperstack_core::axis::AxisLabel;
use hyperstack_core::consts::MAX_EXTENT;
use hyperstack_core::dataset::{AnyHyperstack, Hyperstack};
use hyperstack_core::error::HyperstackError;
use hyperstack_core::restructure::bounds::{clamp_request, position_bounds, quantity_bounds};
use hyperstack_core::restructure::{
    copy_preserving, grow, grow_any, new_dimensions, recompute_composite_count, validate,
    InsertionRequest,
};
use ndarray::{ArrayD, Dimension, IxDyn};
use quickcheck::quickcheck;

use common::{ramp_stack, ramp_stack_f64, xy, xyczt};

// ---------------------------------------------------------------------------
// Growing along X / Y
// ---------------------------------------------------------------------------

#[test]
fn test_grow_x_inserts_default_column() {
    let stack = ramp_stack(&xy(), &[4, 3]);
    let grown = grow(&stack, &InsertionRequest::new(AxisLabel::X, 2, 1)).unwrap();

    assert_eq!(grown.dims(), &[5, 3]);
    for y in 0..3 {
        assert_eq!(grown.data()[[0, y]], stack.data()[[0, y]]);
        assert_eq!(grown.data()[[1, y]], 0);
        for x in 1..4 {
            assert_eq!(grown.data()[[x + 1, y]], stack.data()[[x, y]]);
        }
    }
}

#[test]
fn test_grow_y_at_first_position_shifts_everything() {
    let stack = ramp_stack(&xy(), &[2, 3]);
    let grown = grow(&stack, &InsertionRequest::new(AxisLabel::Y, 1, 2)).unwrap();

    assert_eq!(grown.dims(), &[2, 5]);
    for x in 0..2 {
        assert_eq!(grown.data()[[x, 0]], 0);
        assert_eq!(grown.data()[[x, 1]], 0);
        for y in 0..3 {
            assert_eq!(grown.data()[[x, y + 2]], stack.data()[[x, y]]);
        }
    }
}

#[test]
fn test_grow_last_legal_position() {
    let stack = ramp_stack(&xy(), &[4, 2]);
    let grown = grow(&stack, &InsertionRequest::new(AxisLabel::X, 3, 1)).unwrap();

    assert_eq!(grown.dims(), &[5, 2]);
    for y in 0..2 {
        assert_eq!(grown.data()[[2, y]], 0);
        assert_eq!(grown.data()[[1, y]], stack.data()[[1, y]]);
        assert_eq!(grown.data()[[3, y]], stack.data()[[2, y]]);
        assert_eq!(grown.data()[[4, y]], stack.data()[[3, y]]);
    }
}

#[test]
fn test_grow_five_dimensional_z() {
    let stack = ramp_stack(&xyczt(), &[3, 2, 2, 3, 2]);
    let grown = grow(&stack, &InsertionRequest::new(AxisLabel::Z, 2, 3)).unwrap();

    assert_eq!(grown.dims(), &[3, 2, 2, 6, 2]);
    for ((x, y, c, z, t), &v) in stack
        .data()
        .view()
        .into_dimensionality::<ndarray::Ix5>()
        .unwrap()
        .indexed_iter()
    {
        let nz = if z < 1 { z } else { z + 3 };
        assert_eq!(grown.data()[[x, y, c, nz, t]], v);
    }
    for z in 1..4 {
        let slab = grown
            .data()
            .index_axis(ndarray::Axis(3), z)
            .to_owned();
        assert!(slab.iter().all(|&v| v == 0));
    }
}

#[test]
fn test_grow_custom_axis() {
    let axes = vec![AxisLabel::X, AxisLabel::Y, AxisLabel::from("lambda")];
    let stack = ramp_stack(&axes, &[2, 2, 3]);
    let grown = grow(
        &stack,
        &InsertionRequest::new(AxisLabel::Custom("lambda".into()), 1, 1),
    )
    .unwrap();
    assert_eq!(grown.dims(), &[2, 2, 4]);
    assert_eq!(grown.axes(), stack.axes());
}

#[test]
fn test_grow_keeps_metadata() {
    let mut stack = ramp_stack_f64(&xyczt(), &[2, 2, 3, 2, 1]);
    stack.set_calibration(vec![0.5, 0.5, 1.0, 2.0, 1.0]).unwrap();
    stack.set_composite_channel_count(3).unwrap();

    let grown = grow(&stack, &InsertionRequest::new(AxisLabel::X, 1, 1)).unwrap();
    assert_eq!(grown.axes(), stack.axes());
    assert_eq!(grown.calibration(), stack.calibration());
    assert_eq!(grown.composite_channel_count(), 3);
}

#[test]
fn test_grow_leaves_input_untouched() {
    let stack = ramp_stack(&xy(), &[3, 3]);
    let before = stack.data().clone();
    let _ = grow(&stack, &InsertionRequest::new(AxisLabel::Y, 2, 4)).unwrap();
    assert_eq!(stack.data(), &before);
}

#[test]
fn test_grow_any_keeps_sample_type() {
    let stack: AnyHyperstack = ramp_stack_f64(&xy(), &[3, 2]).into();
    let grown = grow_any(&stack, &InsertionRequest::new(AxisLabel::X, 1, 2)).unwrap();
    assert!(matches!(grown, AnyHyperstack::F64(_)));
    assert_eq!(grown.dims(), &[5, 2]);
}

// ---------------------------------------------------------------------------
// Composite channel count
// ---------------------------------------------------------------------------

fn channel_stack(channels: usize, composite: usize) -> Hyperstack<u16> {
    let mut stack = ramp_stack(&[AxisLabel::Channel], &[channels]);
    stack.set_composite_channel_count(composite).unwrap();
    stack
}

#[test]
fn test_channel_growth_keeps_dividing_composite() {
    let stack = channel_stack(4, 2);
    let grown = grow(&stack, &InsertionRequest::new(AxisLabel::Channel, 1, 2)).unwrap();
    assert_eq!(grown.dims(), &[6]);
    assert_eq!(grown.composite_channel_count(), 2);
}

#[test]
fn test_channel_growth_single_composite_stays_single() {
    let stack = channel_stack(4, 1);
    let grown = grow(&stack, &InsertionRequest::new(AxisLabel::Channel, 1, 2)).unwrap();
    assert_eq!(grown.composite_channel_count(), 1);
}

#[test]
fn test_channel_growth_full_composite_follows_extent() {
    let stack = channel_stack(3, 3);
    let grown = grow(&stack, &InsertionRequest::new(AxisLabel::Channel, 2, 2)).unwrap();
    assert_eq!(grown.composite_channel_count(), 5);
}

#[test]
fn test_channel_growth_non_dividing_composite_resets() {
    let stack = channel_stack(4, 2);
    let grown = grow(&stack, &InsertionRequest::new(AxisLabel::Channel, 3, 1)).unwrap();
    assert_eq!(grown.dims(), &[5]);
    assert_eq!(grown.composite_channel_count(), 1);
}

#[test]
fn test_composite_table() {
    // (old count, old extent, new extent, channel axis) -> new count
    let cases = [
        (1, 4, 6, true, 1),
        (0, 4, 6, true, 1),
        (4, 4, 7, true, 7),
        (2, 4, 6, true, 2),
        (2, 4, 5, true, 1),
        (3, 6, 7, true, 1),
        (3, 6, 9, true, 3),
        (2, 4, 5, false, 2),
        (4, 4, 4, false, 4),
    ];
    for (old, old_ext, new_ext, is_channel, expected) in cases {
        assert_eq!(
            recompute_composite_count(old, old_ext, new_ext, is_channel),
            expected,
            "old={old} old_ext={old_ext} new_ext={new_ext} channel={is_channel}"
        );
    }
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

#[test]
fn test_position_zero_rejected() {
    let stack = ramp_stack(&xy(), &[4, 3]);
    let err = grow(&stack, &InsertionRequest::new(AxisLabel::X, 0, 1)).unwrap_err();
    assert!(matches!(
        err,
        HyperstackError::PositionOutOfRange {
            position: 0,
            extent: 4
        }
    ));
}

#[test]
fn test_negative_position_rejected() {
    let stack = ramp_stack(&xy(), &[4, 3]);
    let err = validate(&stack, &InsertionRequest::new(AxisLabel::X, -3, 1)).unwrap_err();
    assert!(matches!(err, HyperstackError::PositionOutOfRange { .. }));
}

#[test]
fn test_position_equal_to_extent_rejected() {
    let stack = ramp_stack(&xy(), &[4, 3]);
    let err = grow(&stack, &InsertionRequest::new(AxisLabel::X, 4, 1)).unwrap_err();
    assert!(matches!(
        err,
        HyperstackError::PositionOutOfRange {
            position: 4,
            extent: 4
        }
    ));
}

#[test]
fn test_unit_extent_axis_never_grows() {
    let stack = ramp_stack(&xyczt(), &[2, 2, 1, 1, 1]);
    for axis in [AxisLabel::Channel, AxisLabel::Z, AxisLabel::Time] {
        let err = validate(&stack, &InsertionRequest::new(axis, 1, 1)).unwrap_err();
        assert!(matches!(err, HyperstackError::PositionOutOfRange { .. }));
    }
}

#[test]
fn test_zero_and_negative_quantity_rejected() {
    let stack = ramp_stack(&xy(), &[4, 3]);
    for quantity in [0, -1, i64::MIN] {
        let err = grow(&stack, &InsertionRequest::new(AxisLabel::Y, 1, quantity)).unwrap_err();
        assert!(
            matches!(err, HyperstackError::QuantityInvalid { .. }),
            "quantity {quantity}"
        );
    }
}

#[test]
fn test_missing_axis_rejected() {
    let stack = ramp_stack(&xy(), &[4, 3]);
    let err = grow(&stack, &InsertionRequest::new(AxisLabel::Time, 1, 1)).unwrap_err();
    assert!(matches!(err, HyperstackError::AxisNotFound(AxisLabel::Time)));
}

#[test]
fn test_quantity_overflowing_max_extent_rejected() {
    let stack = ramp_stack(&xy(), &[4, 3]);
    let quantity = MAX_EXTENT as i64;
    let err = grow(&stack, &InsertionRequest::new(AxisLabel::X, 1, quantity)).unwrap_err();
    assert!(matches!(err, HyperstackError::QuantityInvalid { .. }));

    let just_over = MAX_EXTENT as i64 - 3;
    let err = validate(&stack, &InsertionRequest::new(AxisLabel::X, 1, just_over)).unwrap_err();
    assert!(matches!(err, HyperstackError::QuantityInvalid { .. }));
}

#[test]
fn test_quantity_at_max_extent_passes_validation() {
    let stack = ramp_stack(&xy(), &[4, 3]);
    let quantity = MAX_EXTENT as i64 - 4;
    let spec = validate(&stack, &InsertionRequest::new(AxisLabel::X, 1, quantity)).unwrap();
    assert_eq!(spec.index, 0);
}

#[test]
fn test_huge_quantity_fails_without_panicking() {
    // Passes validation, but the grown grid cannot be allocated.
    let stack = ramp_stack(&xy(), &[4, 3]);
    let quantity = MAX_EXTENT as i64 - 4;
    let err = grow(&stack, &InsertionRequest::new(AxisLabel::X, 1, quantity)).unwrap_err();
    assert!(matches!(err, HyperstackError::AllocationFailed { .. }));
}

#[test]
fn test_validation_is_pure() {
    let stack = ramp_stack(&xyczt(), &[3, 2, 2, 2, 2]);
    let request = InsertionRequest::new(AxisLabel::Z, 1, 5);
    let first = validate(&stack, &request).unwrap();
    let second = validate(&stack, &request).unwrap();
    assert_eq!(first, second);
    assert_eq!(first.label, AxisLabel::Z);
    assert_eq!(first.index, 3);
}

// ---------------------------------------------------------------------------
// Shape calculator and copy engine
// ---------------------------------------------------------------------------

#[test]
fn test_new_dimensions_only_touches_axis() {
    assert_eq!(new_dimensions(&[4, 3, 2], 1, 5), vec![4, 8, 2]);
    assert_eq!(new_dimensions(&[7], 0, 1), vec![8]);
}

#[test]
fn test_copy_preserving_rejects_wrong_destination() {
    let src = ArrayD::<u8>::from_elem(IxDyn(&[3, 2]), 1);
    let mut dst = ArrayD::<u8>::zeros(IxDyn(&[4, 3]));
    let err = copy_preserving(src.view(), dst.view_mut(), 0, 1, 1).unwrap_err();
    match err {
        HyperstackError::ShapeMismatch { expected, actual } => {
            assert_eq!(expected, vec![4, 2]);
            assert_eq!(actual, vec![4, 3]);
        }
        other => panic!("unexpected error {other:?}"),
    }
}

#[test]
fn test_copy_preserving_allows_append_position() {
    // The copy engine accepts position == extent; only the request
    // validator rejects it.
    let src = ArrayD::from_shape_vec(IxDyn(&[3]), vec![1u8, 2, 3]).unwrap();
    let mut dst = ArrayD::<u8>::zeros(IxDyn(&[5]));
    copy_preserving(src.view(), dst.view_mut(), 0, 3, 2).unwrap();
    assert_eq!(dst.as_slice().unwrap(), &[1, 2, 0, 0, 3]);
}

// ---------------------------------------------------------------------------
// Bounds
// ---------------------------------------------------------------------------

#[test]
fn test_position_bounds() {
    assert_eq!(position_bounds(5), 1..=5);
}

#[test]
fn test_quantity_bounds() {
    let bounds = quantity_bounds(3);
    assert_eq!(*bounds.start(), 1);
    assert_eq!(*bounds.end(), MAX_EXTENT as i64 - 2);
}

#[test]
fn test_clamp_request() {
    let stack = ramp_stack(&xy(), &[4, 3]);

    let clamped = clamp_request(&stack, &InsertionRequest::new(AxisLabel::Y, 9, 0)).unwrap();
    assert_eq!(clamped, InsertionRequest::new(AxisLabel::Y, 3, 1));

    let clamped = clamp_request(&stack, &InsertionRequest::new(AxisLabel::X, -2, 7)).unwrap();
    assert_eq!(clamped, InsertionRequest::new(AxisLabel::X, 1, 7));

    let err = clamp_request(&stack, &InsertionRequest::new(AxisLabel::Z, 1, 1)).unwrap_err();
    assert!(matches!(err, HyperstackError::AxisNotFound(AxisLabel::Z)));
}

// ---------------------------------------------------------------------------
// Properties
// ---------------------------------------------------------------------------

/// Map small random inputs onto a valid request against `dims`.
fn pick_request(dims: &[usize], axis: usize, position: usize, quantity: usize) -> Option<(usize, i64, i64)> {
    let axis = axis % dims.len();
    let extent = dims[axis];
    if extent < 2 {
        return None;
    }
    let position = 1 + position % (extent - 1);
    let quantity = 1 + quantity % 4;
    Some((axis, position as i64, quantity as i64))
}

fn small_dims(raw: &[u8]) -> Vec<usize> {
    raw.iter().take(4).map(|&d| 1 + (d as usize) % 4).collect()
}

quickcheck! {
    fn prop_grow_preserves_samples_and_fills_default(
        raw_dims: Vec<u8>,
        axis: usize,
        position: usize,
        quantity: usize
    ) -> bool {
        let dims = small_dims(&raw_dims);
        if dims.is_empty() {
            return true;
        }
        let Some((axis, position, quantity)) = pick_request(&dims, axis, position, quantity) else {
            return true;
        };
        let labels: Vec<AxisLabel> = xyczt().into_iter().take(dims.len()).collect();
        let stack = ramp_stack(&labels, &dims);
        let request = InsertionRequest::new(labels[axis].clone(), position, quantity);
        let grown = match grow(&stack, &request) {
            Ok(g) => g,
            Err(_) => return false,
        };

        let start = (position - 1) as usize;
        let q = quantity as usize;

        // Shape: only the grown axis changes.
        let shape_ok = grown.dims().iter().enumerate().all(|(i, &d)| {
            if i == axis { d == dims[i] + q } else { d == dims[i] }
        });

        // Every old sample lands at its shifted index.
        let moved_ok = stack.data().indexed_iter().all(|(ix, &v)| {
            let mut target = ix.slice().to_vec();
            if target[axis] >= start {
                target[axis] += q;
            }
            grown.data()[IxDyn(&target)] == v
        });

        // Everything in the gap is default.
        let gap_ok = grown.data().indexed_iter().all(|(ix, &v)| {
            let i = ix[axis];
            !(start..start + q).contains(&i) || v == 0
        });

        shape_ok && moved_ok && gap_ok
    }

    fn prop_non_channel_growth_keeps_composite(quantity: u8) -> bool {
        let mut stack = ramp_stack(&xyczt(), &[3, 2, 3, 2, 1]);
        stack.set_composite_channel_count(3).unwrap();
        let request = InsertionRequest::new(AxisLabel::X, 2, 1 + quantity as i64 % 5);
        grow(&stack, &request)
            .map(|g| g.composite_channel_count() == 3)
            .unwrap_or(false)
    }

    fn prop_sample_count_grows_by_slab(raw_dims: Vec<u8>, axis: usize, position: usize, quantity: usize) -> bool {
        let dims = small_dims(&raw_dims);
        if dims.is_empty() {
            return true;
        }
        let Some((axis, position, quantity)) = pick_request(&dims, axis, position, quantity) else {
            return true;
        };
        let labels: Vec<AxisLabel> = xyczt().into_iter().take(dims.len()).collect();
        let stack = ramp_stack(&labels, &dims);
        let request = InsertionRequest::new(labels[axis].clone(), position, quantity);
        let slab: usize = dims.iter().enumerate().filter(|&(i, _)| i != axis).map(|(_, &d)| d).product();
        grow(&stack, &request)
            .map(|g| g.len() == stack.len() + slab * quantity as usize)
            .unwrap_or(false)
    }
}
