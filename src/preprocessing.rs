// Ultralytics 🚀 AGPL-3.0 License - https://ultralytics.com/license

//! Image and heatmap geometry for pose network input and output.
//!
//! This module handles the resizing, square padding and cropping applied to
//! camera frames before they reach the network, and the rescaling of the
//! network's heatmap stacks back to input resolution.

#![allow(
    clippy::cast_precision_loss,
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss
)]

use fast_image_resize::{FilterType, PixelType, ResizeAlg, ResizeOptions, Resizer, images::Image};
use image::{Rgb, RgbImage};
use ndarray::{Array2, Array3, ArrayView2, Axis};
use rayon::prelude::*;

use crate::error::{PoseError, Result};

// ================================================================================================
// Helpers
// ================================================================================================

/// Lanczos convolution used for every resample in this module.
fn lanczos_options() -> ResizeOptions {
    ResizeOptions::new().resize_alg(ResizeAlg::Convolution(FilterType::Lanczos3))
}

/// Output length of one axis scaled by `factor`, rounded to the nearest pixel.
fn scaled_dim(dim: u32, factor: f64) -> u32 {
    (f64::from(dim) * factor).round() as u32
}

fn to_u32(value: usize, what: &str) -> Result<u32> {
    u32::try_from(value).map_err(|_| PoseError::ShapeError(format!("{what} {value} exceeds u32")))
}

fn check_dims(src: (u32, u32), dst: (u32, u32)) -> Result<()> {
    if src.0 == 0 || src.1 == 0 || dst.0 == 0 || dst.1 == 0 {
        return Err(PoseError::ResizeError(format!(
            "cannot resize {}x{} to {}x{}",
            src.0, src.1, dst.0, dst.1
        )));
    }
    Ok(())
}

/// Resize an RGB image to an exact size.
fn resize_rgb(image: &RgbImage, dst_width: u32, dst_height: u32) -> Result<RgbImage> {
    let (src_width, src_height) = image.dimensions();
    check_dims((src_width, src_height), (dst_width, dst_height))?;

    let src = Image::from_vec_u8(src_width, src_height, image.as_raw().clone(), PixelType::U8x3)
        .map_err(|e| PoseError::ResizeError(e.to_string()))?;
    let mut dst = Image::new(dst_width, dst_height, PixelType::U8x3);

    let mut resizer = Resizer::new();
    resizer
        .resize(&src, &mut dst, Some(&lanczos_options()))
        .map_err(|e| PoseError::ResizeError(e.to_string()))?;

    RgbImage::from_raw(dst_width, dst_height, dst.into_vec())
        .ok_or_else(|| PoseError::ImageError("resized buffer has unexpected size".to_string()))
}

/// Resize one heatmap channel to an exact size.
fn resize_plane(plane: ArrayView2<'_, f32>, dst_width: u32, dst_height: u32) -> Result<Array2<f32>> {
    let (height, width) = plane.dim();
    let (src_width, src_height) = (to_u32(width, "width")?, to_u32(height, "height")?);
    check_dims((src_width, src_height), (dst_width, dst_height))?;

    // Logical (row-major) order, so strided channel views work too
    let bytes: Vec<u8> = plane.iter().flat_map(|v| v.to_ne_bytes()).collect();
    let src = Image::from_vec_u8(src_width, src_height, bytes, PixelType::F32)
        .map_err(|e| PoseError::ResizeError(e.to_string()))?;
    let mut dst = Image::new(dst_width, dst_height, PixelType::F32);

    let mut resizer = Resizer::new();
    resizer
        .resize(&src, &mut dst, Some(&lanczos_options()))
        .map_err(|e| PoseError::ResizeError(e.to_string()))?;

    let values: Vec<f32> = dst
        .into_vec()
        .chunks_exact(4)
        .map(|b| f32::from_ne_bytes([b[0], b[1], b[2], b[3]]))
        .collect();

    Ok(Array2::from_shape_vec(
        (dst_height as usize, dst_width as usize),
        values,
    )?)
}

// ================================================================================================
// Public API Functions
// ================================================================================================

/// Scale an image by the same factor in both directions.
///
/// Uses Lanczos resampling. Each output side is `round(side * factor)`.
///
/// # Errors
///
/// Returns [`PoseError::ResizeError`] if the input is empty or an output side
/// rounds to zero.
pub fn scale_image(image: &RgbImage, factor: f64) -> Result<RgbImage> {
    let (width, height) = image.dimensions();
    resize_rgb(image, scaled_dim(width, factor), scaled_dim(height, factor))
}

/// Pad an image on its left and right sides to fill a square box.
///
/// The image occupies columns `[box/2 - ceil(w/2), box/2 + ceil(w/2) - offset)`
/// of a `box_size x box_size` canvas filled with `pad_value` (`0` is black,
/// `128` mid gray). `offset` must be `w % 2` so that the slot is exactly as
/// wide as the image.
///
/// # Panics
///
/// Panics if the image height differs from `box_size`, if the width is not
/// smaller than `box_size`, or if `offset` does not match the width parity.
#[must_use]
pub fn pad_image(image: &RgbImage, box_size: u32, offset: u32, pad_value: u8) -> RgbImage {
    let (width, height) = image.dimensions();
    assert_eq!(height, box_size, "height of the image not equal to box size");
    assert!(width < box_size, "width of the image not smaller than box size");

    let half = width.div_ceil(2);
    assert_eq!(
        (2 * half).checked_sub(offset),
        Some(width),
        "offset {offset} does not match image width {width}"
    );

    let left = box_size / 2 - half;
    let mut padded = RgbImage::from_pixel(box_size, box_size, Rgb([pad_value; 3]));
    image::imageops::replace(&mut padded, image, i64::from(left), 0);
    padded
}

/// Scale and squareify an image to a `box_size x box_size` square.
///
/// The image is scaled so its height equals `box_size`. A narrower result is
/// padded with black on both sides; a wider one is center-cropped starting
/// at column `w/2 - box_size/2`. The crop always spans exactly `box_size`
/// columns, so odd box sizes yield a square too (a `2 * (box_size / 2)` wide
/// slice would come out one column short).
///
/// # Errors
///
/// Returns an error if the scaling fails (e.g. an empty input).
///
/// # Panics
///
/// Panics if the result is not `box_size x box_size`.
pub fn scale_and_squareify(image: &RgbImage, box_size: u32) -> Result<RgbImage> {
    let scale = f64::from(box_size) / f64::from(image.height());
    let scaled = scale_image(image, scale)?;

    let squared = if scaled.width() < box_size {
        let offset = scaled.width() % 2;
        pad_image(&scaled, box_size, offset, 0)
    } else {
        let x = scaled.width() / 2 - box_size / 2;
        image::imageops::crop_imm(&scaled, x, 0, box_size, box_size).to_image()
    };

    assert_eq!(
        squared.dimensions(),
        (box_size, box_size),
        "cropped image shape invalid"
    );
    Ok(squared)
}

/// Shrink a square image and pad it back to its original size.
///
/// Padding is split evenly per axis; an odd remaining pixel goes to the
/// bottom or right edge.
///
/// # Errors
///
/// Returns an error if the scaled image would be empty.
///
/// # Panics
///
/// Panics if the image is not square or `scale` exceeds `1.0`.
pub fn scale_and_pad(image: &RgbImage, scale: f64, pad_value: u8) -> Result<RgbImage> {
    let (width, height) = image.dimensions();
    assert_eq!(width, height, "image must be square, got {width}x{height}");
    assert!(scale <= 1.0, "scale {scale} must not exceed 1.0");

    let box_size = height;
    let scaled = scale_image(image, scale)?;
    let (scaled_width, scaled_height) = scaled.dimensions();

    let pad_top = (box_size - scaled_height) / 2;
    let pad_left = (box_size - scaled_width) / 2;

    let mut padded = RgbImage::from_pixel(box_size, box_size, Rgb([pad_value; 3]));
    image::imageops::replace(&mut padded, &scaled, i64::from(pad_left), i64::from(pad_top));
    Ok(padded)
}

/// Scale every channel of a (H, W, J) heatmap stack by `factor`.
///
/// Channels are resampled independently (and in parallel) with the same
/// Lanczos filter used for images. Values are not clamped.
///
/// # Errors
///
/// Returns [`PoseError::ResizeError`] if the stack is spatially empty or an
/// output side rounds to zero.
pub fn scale_heatmaps(heatmaps: &Array3<f32>, factor: f64) -> Result<Array3<f32>> {
    let (height, width, joints) = heatmaps.dim();
    let src_width = to_u32(width, "width")?;
    let src_height = to_u32(height, "height")?;
    let dst_width = scaled_dim(src_width, factor);
    let dst_height = scaled_dim(src_height, factor);
    check_dims((src_width, src_height), (dst_width, dst_height))?;

    if joints == 0 {
        return Ok(Array3::zeros((dst_height as usize, dst_width as usize, 0)));
    }

    let planes = (0..joints)
        .into_par_iter()
        .map(|joint| resize_plane(heatmaps.index_axis(Axis(2), joint), dst_width, dst_height))
        .collect::<Result<Vec<_>>>()?;

    let views: Vec<_> = planes.iter().map(|plane| plane.view()).collect();
    Ok(ndarray::stack(Axis(2), &views)?)
}

/// Convert an `RgbImage` to an HWC ndarray.
#[must_use]
pub fn image_to_array(image: &RgbImage) -> Array3<u8> {
    let (width, height) = image.dimensions();
    Array3::from_shape_fn((height as usize, width as usize, 3), |(y, x, c)| {
        image.get_pixel(x as u32, y as u32)[c]
    })
}

/// Convert an HWC ndarray with three channels to an `RgbImage`.
///
/// # Errors
///
/// Returns [`PoseError::ShapeError`] if the array does not have three channels
/// or its sides do not fit in `u32`.
pub fn array_to_image(array: &Array3<u8>) -> Result<RgbImage> {
    let (height, width, channels) = array.dim();
    if channels != 3 {
        return Err(PoseError::ShapeError(format!(
            "expected 3 channels, got {channels}"
        )));
    }
    let pixels: Vec<u8> = array.iter().copied().collect();
    RgbImage::from_raw(to_u32(width, "width")?, to_u32(height, "height")?, pixels)
        .ok_or_else(|| PoseError::ShapeError("pixel buffer does not match dimensions".to_string()))
}
