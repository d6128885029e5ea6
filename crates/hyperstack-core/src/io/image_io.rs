use std::path::Path;

use image::{ColorType, GrayImage, ImageBuffer, Luma, Pixel, Primitive, Rgb};
use ndarray::{ArrayD, ArrayView2, Axis, Ix2, IxDyn};
use tracing::info;

use crate::axis::AxisLabel;
use crate::consts::COLOR_CHANNEL_COUNT;
use crate::dataset::{AnyHyperstack, Hyperstack};
use crate::error::{HyperstackError, Result};
use crate::sample::Sample;

/// Load a PNG/TIFF image as a hyperstack.
///
/// Grayscale images become `[X, Y]`; color images become
/// `[X, Y, Channel]` with all three channels composited. 8-bit and 16-bit
/// sources keep their depth, float sources load as `f32`. Alpha is dropped.
pub fn import_image(path: &Path) -> Result<AnyHyperstack> {
    let img = image::open(path)?;
    let stack: AnyHyperstack = match img.color() {
        ColorType::L8 | ColorType::La8 => gray_stack(&img.to_luma8())?.into(),
        ColorType::L16 | ColorType::La16 => gray_stack(&img.to_luma16())?.into(),
        ColorType::Rgb16 | ColorType::Rgba16 => rgb_stack(&img.to_rgb16())?.into(),
        ColorType::Rgb32F | ColorType::Rgba32F => rgb_stack(&img.to_rgb32f())?.into(),
        _ => rgb_stack(&img.to_rgb8())?.into(),
    };
    info!(
        path = %path.display(),
        dims = ?stack.dims(),
        sample_type = %stack.sample_type(),
        "Imported image"
    );
    Ok(stack)
}

fn gray_stack<T>(buf: &ImageBuffer<Luma<T>, Vec<T>>) -> Result<Hyperstack<T>>
where
    T: Sample + Primitive,
    Luma<T>: Pixel<Subpixel = T>,
{
    let (w, h) = buf.dimensions();
    let data = ArrayD::from_shape_fn(IxDyn(&[w as usize, h as usize]), |ix| {
        buf.get_pixel(ix[0] as u32, ix[1] as u32).0[0]
    });
    Hyperstack::new(vec![AxisLabel::X, AxisLabel::Y], data)
}

fn rgb_stack<T>(buf: &ImageBuffer<Rgb<T>, Vec<T>>) -> Result<Hyperstack<T>>
where
    T: Sample + Primitive,
    Rgb<T>: Pixel<Subpixel = T>,
{
    let (w, h) = buf.dimensions();
    let data = ArrayD::from_shape_fn(
        IxDyn(&[w as usize, h as usize, COLOR_CHANNEL_COUNT]),
        |ix| buf.get_pixel(ix[0] as u32, ix[1] as u32).0[ix[2]],
    );
    let mut stack = Hyperstack::new(vec![AxisLabel::X, AxisLabel::Y, AxisLabel::Channel], data)?;
    stack.set_composite_channel_count(COLOR_CHANNEL_COUNT)?;
    Ok(stack)
}

/// View of the XY plane selected by `position`, indexed `[x, y]`.
///
/// `position` holds one coordinate per axis; the X and Y entries are
/// ignored.
pub fn plane_view<'a, T: Sample>(
    stack: &'a Hyperstack<T>,
    position: &[usize],
) -> Result<ArrayView2<'a, T>> {
    let x_axis = stack
        .axis_index(&AxisLabel::X)
        .ok_or(HyperstackError::AxisNotFound(AxisLabel::X))?;
    let y_axis = stack
        .axis_index(&AxisLabel::Y)
        .ok_or(HyperstackError::AxisNotFound(AxisLabel::Y))?;
    if position.len() != stack.ndim() {
        return Err(HyperstackError::InvalidShape(format!(
            "{} coordinate(s) for {} axes",
            position.len(),
            stack.ndim()
        )));
    }

    let mut view = stack.data().view();
    for axis in (0..stack.ndim()).rev() {
        if axis == x_axis || axis == y_axis {
            continue;
        }
        let extent = stack.dims()[axis];
        if position[axis] >= extent {
            return Err(HyperstackError::CoordinateOutOfRange {
                axis: stack.axes()[axis].clone(),
                coordinate: position[axis],
                extent,
            });
        }
        view = view.index_axis_move(Axis(axis), position[axis]);
    }

    let plane = view
        .into_dimensionality::<Ix2>()
        .map_err(|e| HyperstackError::InvalidShape(e.to_string()))?;
    Ok(if x_axis < y_axis {
        plane
    } else {
        plane.reversed_axes()
    })
}

/// Save one XY plane as a grayscale image, format chosen by extension.
///
/// 8-bit data is written as 8-bit, 16-bit data as 16-bit. Real data is
/// stretched from the plane's min/max onto the full 16-bit range.
pub fn export_plane(stack: &AnyHyperstack, position: &[usize], path: &Path) -> Result<()> {
    match stack {
        AnyHyperstack::U8(s) => {
            let plane = plane_view(s, position)?;
            save_gray8(plane_pixels(&plane, |v| v), plane.dim(), path)
        }
        AnyHyperstack::U16(s) => {
            let plane = plane_view(s, position)?;
            save_gray16(plane_pixels(&plane, |v| v), plane.dim(), path)
        }
        AnyHyperstack::F32(s) => save_real_plane(&plane_view(s, position)?, path),
        AnyHyperstack::F64(s) => save_real_plane(&plane_view(s, position)?, path),
    }
}

fn save_real_plane<T: Sample>(plane: &ArrayView2<'_, T>, path: &Path) -> Result<()> {
    let (lo, hi) = plane
        .iter()
        .map(|v| v.as_f64())
        .filter(|v| v.is_finite())
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| (lo.min(v), hi.max(v)));
    let range = if hi > lo { hi - lo } else { 1.0 };
    let lo = if lo.is_finite() { lo } else { 0.0 };

    let pixels = plane_pixels(plane, |v| {
        <u16 as Sample>::from_f64((v.as_f64() - lo) / range * u16::MAX as f64)
    });
    save_gray16(pixels, plane.dim(), path)
}

/// Row-major (y outer, x inner) pixel buffer of a plane indexed `[x, y]`.
fn plane_pixels<T: Sample, P>(plane: &ArrayView2<'_, T>, convert: impl Fn(T) -> P) -> Vec<P> {
    let (w, h) = plane.dim();
    let mut pixels = Vec::with_capacity(w * h);
    for y in 0..h {
        for x in 0..w {
            pixels.push(convert(plane[[x, y]]));
        }
    }
    pixels
}

fn save_gray8(pixels: Vec<u8>, (w, h): (usize, usize), path: &Path) -> Result<()> {
    let img = GrayImage::from_raw(w as u32, h as u32, pixels)
        .ok_or_else(|| HyperstackError::InvalidShape("Plane buffer size mismatch".into()))?;
    img.save(path)?;
    info!(path = %path.display(), width = w, height = h, bit_depth = 8, "Exported plane");
    Ok(())
}

fn save_gray16(pixels: Vec<u16>, (w, h): (usize, usize), path: &Path) -> Result<()> {
    let img = ImageBuffer::<Luma<u16>, Vec<u16>>::from_raw(w as u32, h as u32, pixels)
        .ok_or_else(|| HyperstackError::InvalidShape("Plane buffer size mismatch".into()))?;
    img.save(path)?;
    info!(path = %path.display(), width = w, height = h, bit_depth = 16, "Exported plane");
    Ok(())
}
