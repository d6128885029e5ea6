use crate::consts::NON_COMPOSITE;

/// Composite channel count after the channel extent changes.
///
/// When the grown axis is not the channel axis the old count passes through.
/// Otherwise:
/// - a single-channel "composite" stays single,
/// - a composite over all channels stays a composite over all channels,
/// - a composite over a subset that evenly divides both the old and the new
///   channel extent keeps its size,
/// - anything else falls back to non-composite.
///
/// A count of zero is treated as non-composite.
pub fn recompute_composite_count(
    old_count: usize,
    old_channel_extent: usize,
    new_channel_extent: usize,
    axis_is_channel: bool,
) -> usize {
    if !axis_is_channel {
        return old_count;
    }

    if old_count <= NON_COMPOSITE {
        return NON_COMPOSITE;
    }

    if old_channel_extent == old_count {
        return new_channel_extent;
    }

    if old_channel_extent % old_count == 0 && new_channel_extent % old_count == 0 {
        return old_count;
    }

    NON_COMPOSITE
}
