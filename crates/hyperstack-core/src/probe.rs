use std::fmt::Write;

use ndarray::IxDyn;

use crate::axis::AxisLabel;
use crate::dataset::Hyperstack;
use crate::error::{HyperstackError, Result};
use crate::sample::Sample;

/// Sample values under one XY location, across all channels.
#[derive(Clone, Debug, PartialEq)]
pub struct ProbeReading {
    pub x: usize,
    pub y: usize,
    /// Channel the probe coordinates point at.
    pub channel: usize,
    /// One value per channel, in channel order.
    pub values: Vec<f64>,
    pub is_integer: bool,
}

impl ProbeReading {
    /// Value of the channel the probe points at.
    pub fn value(&self) -> f64 {
        self.values[self.channel]
    }

    /// Status line in the form `x=1, y=2, value=3 from (3,4,5)`.
    ///
    /// A coordinate is printed scaled with two decimals when its calibration
    /// is neither NaN nor 1. The `from (...)` list only appears for
    /// multi-channel data.
    pub fn status_line(&self, x_calibration: f64, y_calibration: f64) -> String {
        let mut line = String::new();
        let _ = write!(
            line,
            "x={}, y={}, value={}",
            coordinate_string(self.x, x_calibration),
            coordinate_string(self.y, y_calibration),
            self.value_string(self.value())
        );
        if self.values.len() > 1 {
            let all: Vec<String> = self.values.iter().map(|&v| self.value_string(v)).collect();
            let _ = write!(line, " from ({})", all.join(","));
        }
        line
    }

    fn value_string(&self, value: f64) -> String {
        if self.is_integer {
            format!("{}", value as i64)
        } else {
            format!("{value:.6}")
        }
    }
}

fn coordinate_string(coord: usize, calibration: f64) -> String {
    if !calibration.is_nan() && calibration != 1.0 {
        format!("{:.2}", calibration * coord as f64)
    } else {
        coord.to_string()
    }
}

/// Read every channel value at `coords` (one coordinate per axis).
pub fn probe<T: Sample>(stack: &Hyperstack<T>, coords: &[usize]) -> Result<ProbeReading> {
    if coords.len() != stack.ndim() {
        return Err(HyperstackError::InvalidShape(format!(
            "{} coordinate(s) for {} axes",
            coords.len(),
            stack.ndim()
        )));
    }
    for ((&coordinate, &extent), axis) in coords.iter().zip(stack.dims()).zip(stack.axes()) {
        if coordinate >= extent {
            return Err(HyperstackError::CoordinateOutOfRange {
                axis: axis.clone(),
                coordinate,
                extent,
            });
        }
    }

    let x_axis = stack
        .axis_index(&AxisLabel::X)
        .ok_or(HyperstackError::AxisNotFound(AxisLabel::X))?;
    let y_axis = stack
        .axis_index(&AxisLabel::Y)
        .ok_or(HyperstackError::AxisNotFound(AxisLabel::Y))?;

    let data = stack.data();
    let (channel, values) = match stack.axis_index(&AxisLabel::Channel) {
        Some(c_axis) => {
            let mut position = coords.to_vec();
            let values = (0..stack.dims()[c_axis])
                .map(|c| {
                    position[c_axis] = c;
                    data[IxDyn(&position)].as_f64()
                })
                .collect();
            (coords[c_axis], values)
        }
        None => (0, vec![data[IxDyn(coords)].as_f64()]),
    };

    Ok(ProbeReading {
        x: coords[x_axis],
        y: coords[y_axis],
        channel,
        values,
        is_integer: stack.is_integer(),
    })
}

/// Probe `coords` and format the result with the stack's own calibration.
pub fn probe_status<T: Sample>(stack: &Hyperstack<T>, coords: &[usize]) -> Result<String> {
    let reading = probe(stack, coords)?;
    Ok(reading.status_line(
        stack.axis_calibration(&AxisLabel::X),
        stack.axis_calibration(&AxisLabel::Y),
    ))
}
