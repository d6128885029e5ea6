use std::collections::HashSet;

use ndarray::ArrayD;

use crate::axis::{AxisLabel, AxisSpec};
use crate::consts::NON_COMPOSITE;
use crate::error::{HyperstackError, Result};
use crate::restructure::add_data::allocate;
use crate::sample::{Sample, SampleType};

/// An N-dimensional image: a typed sample grid plus per-axis metadata.
///
/// Sample data is stored in row-major order with one ndarray axis per
/// entry of `axes`, in the same order.
#[derive(Clone, Debug)]
pub struct Hyperstack<T: Sample> {
    data: ArrayD<T>,
    axes: Vec<AxisLabel>,
    /// Physical size of one step along each axis.
    calibration: Vec<f64>,
    /// Number of leading channels shown together as a composite.
    composite_channel_count: usize,
}

impl<T: Sample> Hyperstack<T> {
    /// Wrap existing sample data. One label per array axis, no duplicate
    /// labels, every extent >= 1.
    pub fn new(axes: Vec<AxisLabel>, data: ArrayD<T>) -> Result<Self> {
        validate_layout(&axes, data.shape())?;
        let calibration = vec![1.0; axes.len()];
        Ok(Self {
            data,
            axes,
            calibration,
            composite_channel_count: NON_COMPOSITE,
        })
    }

    /// Allocate a default-initialized hyperstack of the given shape.
    ///
    /// Fails with `AllocationFailed` when the sample count overflows the
    /// address space.
    pub fn zeros(axes: Vec<AxisLabel>, dims: &[usize]) -> Result<Self> {
        validate_layout(&axes, dims)?;
        let data = allocate::<T>(dims)?;
        Self::new(axes, data)
    }

    pub fn data(&self) -> &ArrayD<T> {
        &self.data
    }

    pub fn axes(&self) -> &[AxisLabel] {
        &self.axes
    }

    pub fn dims(&self) -> &[usize] {
        self.data.shape()
    }

    pub fn ndim(&self) -> usize {
        self.axes.len()
    }

    /// Total number of samples.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn sample_type(&self) -> SampleType {
        T::SAMPLE_TYPE
    }

    pub fn is_integer(&self) -> bool {
        T::SAMPLE_TYPE.is_integer()
    }

    pub fn axis_index(&self, label: &AxisLabel) -> Option<usize> {
        self.axes.iter().position(|a| a == label)
    }

    pub fn axis_spec(&self, label: &AxisLabel) -> Option<AxisSpec> {
        self.axis_index(label).map(|index| AxisSpec {
            label: label.clone(),
            index,
        })
    }

    /// Extent along `label`, or `None` when the axis is absent.
    pub fn extent(&self, label: &AxisLabel) -> Option<usize> {
        self.axis_index(label).map(|i| self.dims()[i])
    }

    /// Number of XY planes: the product of every extent other than X and Y.
    pub fn plane_count(&self) -> usize {
        self.axes
            .iter()
            .zip(self.dims())
            .filter(|(label, _)| !matches!(label, AxisLabel::X | AxisLabel::Y))
            .map(|(_, &d)| d)
            .product()
    }

    /// Number of channels; 1 when there is no channel axis.
    pub fn channel_count(&self) -> usize {
        self.extent(&AxisLabel::Channel).unwrap_or(1)
    }

    pub fn calibration(&self) -> &[f64] {
        &self.calibration
    }

    /// Calibration along `label`; NaN when the axis is absent.
    pub fn axis_calibration(&self, label: &AxisLabel) -> f64 {
        self.axis_index(label)
            .map(|i| self.calibration[i])
            .unwrap_or(f64::NAN)
    }

    pub fn set_calibration(&mut self, calibration: Vec<f64>) -> Result<()> {
        if calibration.len() != self.axes.len() {
            return Err(HyperstackError::InvalidShape(format!(
                "{} calibration value(s) for {} axes",
                calibration.len(),
                self.axes.len()
            )));
        }
        self.calibration = calibration;
        Ok(())
    }

    pub fn composite_channel_count(&self) -> usize {
        self.composite_channel_count
    }

    /// Set how many leading channels are composited. Must lie in
    /// `1..=channel_count()`.
    pub fn set_composite_channel_count(&mut self, count: usize) -> Result<()> {
        let channels = self.channel_count();
        if count == 0 || count > channels {
            return Err(HyperstackError::InvalidCompositeCount { count, channels });
        }
        self.composite_channel_count = count;
        Ok(())
    }

    /// Replace the sample grid, keeping axis labels and calibration.
    ///
    /// Used by operations that build a new grid of a different extent; the
    /// composite count is stored as given without range checks against the
    /// new channel extent.
    pub(crate) fn with_data<U: Sample>(
        &self,
        data: ArrayD<U>,
        composite_channel_count: usize,
    ) -> Hyperstack<U> {
        debug_assert_eq!(data.ndim(), self.axes.len());
        Hyperstack {
            data,
            axes: self.axes.clone(),
            calibration: self.calibration.clone(),
            composite_channel_count,
        }
    }
}

fn validate_layout(axes: &[AxisLabel], dims: &[usize]) -> Result<()> {
    if axes.len() != dims.len() {
        return Err(HyperstackError::InvalidShape(format!(
            "{} axis label(s) for {} dimension(s)",
            axes.len(),
            dims.len()
        )));
    }
    if let Some(i) = dims.iter().position(|&d| d == 0) {
        return Err(HyperstackError::InvalidShape(format!(
            "axis {} has zero extent",
            axes[i]
        )));
    }
    let mut seen = HashSet::new();
    for label in axes {
        if !seen.insert(label) {
            return Err(HyperstackError::InvalidShape(format!(
                "duplicate axis {label}"
            )));
        }
    }
    Ok(())
}

/// A hyperstack whose sample type is only known at runtime.
#[derive(Clone, Debug)]
pub enum AnyHyperstack {
    U8(Hyperstack<u8>),
    U16(Hyperstack<u16>),
    F32(Hyperstack<f32>),
    F64(Hyperstack<f64>),
}

/// Run `$body` with `$stack` bound to the typed hyperstack inside `$any`.
#[macro_export]
macro_rules! with_hyperstack {
    ($any:expr, $stack:ident => $body:expr) => {
        match $any {
            $crate::dataset::AnyHyperstack::U8($stack) => $body,
            $crate::dataset::AnyHyperstack::U16($stack) => $body,
            $crate::dataset::AnyHyperstack::F32($stack) => $body,
            $crate::dataset::AnyHyperstack::F64($stack) => $body,
        }
    };
}

impl AnyHyperstack {
    pub fn sample_type(&self) -> SampleType {
        with_hyperstack!(self, s => s.sample_type())
    }

    pub fn axes(&self) -> &[AxisLabel] {
        with_hyperstack!(self, s => s.axes())
    }

    pub fn dims(&self) -> &[usize] {
        with_hyperstack!(self, s => s.dims())
    }

    pub fn calibration(&self) -> &[f64] {
        with_hyperstack!(self, s => s.calibration())
    }

    pub fn plane_count(&self) -> usize {
        with_hyperstack!(self, s => s.plane_count())
    }

    pub fn composite_channel_count(&self) -> usize {
        with_hyperstack!(self, s => s.composite_channel_count())
    }

    pub fn set_composite_channel_count(&mut self, count: usize) -> Result<()> {
        with_hyperstack!(self, s => s.set_composite_channel_count(count))
    }

    /// Convert every sample to `f64`, keeping metadata.
    pub fn to_f64(&self) -> Hyperstack<f64> {
        with_hyperstack!(self, s => {
            let data = s.data().mapv(Sample::as_f64);
            s.with_data(data, s.composite_channel_count())
        })
    }
}

macro_rules! impl_from_hyperstack {
    ($($ty:ty => $variant:ident),*) => {
        $(
            impl From<Hyperstack<$ty>> for AnyHyperstack {
                fn from(stack: Hyperstack<$ty>) -> Self {
                    AnyHyperstack::$variant(stack)
                }
            }
        )*
    };
}

impl_from_hyperstack!(u8 => U8, u16 => U16, f32 => F32, f64 => F64);
