/// Largest extent a single axis may reach.
///
/// ndarray caps the total element count of an array at `isize::MAX`, so no
/// single axis can exceed it either.
pub const MAX_EXTENT: u64 = isize::MAX as u64;

/// Minimum sample count before an operation switches to Rayon parallelism.
pub const PARALLEL_PIXEL_THRESHOLD: usize = 65_536;

/// Composite channel count of a dataset that is not displayed as a composite.
pub const NON_COMPOSITE: usize = 1;

/// Number of channels in an imported color image (R, G, B).
pub const COLOR_CHANNEL_COUNT: usize = 3;

/// Magic bytes at the start of a native stack file.
pub const STACK_FILE_MAGIC: &[u8; 8] = b"HYPERSTK";

/// Current native stack file format version.
pub const STACK_FILE_VERSION: u16 = 1;
