use std::fmt;

use num_traits::{Bounded, NumCast, ToPrimitive};
use serde::{Deserialize, Serialize};

/// Runtime tag for the element type of a hyperstack.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum SampleType {
    U8,
    U16,
    F32,
    F64,
}

impl SampleType {
    pub fn byte_size(self) -> usize {
        match self {
            Self::U8 => 1,
            Self::U16 => 2,
            Self::F32 => 4,
            Self::F64 => 8,
        }
    }

    pub fn is_integer(self) -> bool {
        matches!(self, Self::U8 | Self::U16)
    }

    pub(crate) fn tag(self) -> u8 {
        match self {
            Self::U8 => 0,
            Self::U16 => 1,
            Self::F32 => 2,
            Self::F64 => 3,
        }
    }

    pub(crate) fn from_tag(tag: u8) -> Option<Self> {
        match tag {
            0 => Some(Self::U8),
            1 => Some(Self::U16),
            2 => Some(Self::F32),
            3 => Some(Self::F64),
            _ => None,
        }
    }
}

impl fmt::Display for SampleType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::U8 => write!(f, "8-bit unsigned"),
            Self::U16 => write!(f, "16-bit unsigned"),
            Self::F32 => write!(f, "32-bit float"),
            Self::F64 => write!(f, "64-bit float"),
        }
    }
}

/// A fixed-width numeric element a hyperstack can hold.
///
/// `Default::default()` is the value newly inserted hyperplanes start with.
pub trait Sample:
    Copy + Default + PartialOrd + Send + Sync + fmt::Debug + NumCast + 'static
{
    const SAMPLE_TYPE: SampleType;

    fn as_f64(self) -> f64 {
        ToPrimitive::to_f64(&self).unwrap_or(0.0)
    }

    /// Convert from `f64`. Integer types round to nearest and saturate.
    fn from_f64(value: f64) -> Self;
}

fn saturating_int<T: Sample + Bounded>(value: f64) -> T {
    if value.is_nan() {
        return T::default();
    }
    let lo = T::min_value().as_f64();
    let hi = T::max_value().as_f64();
    let clamped = value.round().clamp(lo, hi);
    <T as NumCast>::from(clamped).unwrap_or_default()
}

impl Sample for u8 {
    const SAMPLE_TYPE: SampleType = SampleType::U8;

    fn from_f64(value: f64) -> Self {
        saturating_int(value)
    }
}

impl Sample for u16 {
    const SAMPLE_TYPE: SampleType = SampleType::U16;

    fn from_f64(value: f64) -> Self {
        saturating_int(value)
    }
}

impl Sample for f32 {
    const SAMPLE_TYPE: SampleType = SampleType::F32;

    fn from_f64(value: f64) -> Self {
        value as f32
    }
}

impl Sample for f64 {
    const SAMPLE_TYPE: SampleType = SampleType::F64;

    fn as_f64(self) -> f64 {
        self
    }

    fn from_f64(value: f64) -> Self {
        value
    }
}
