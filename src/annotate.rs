// Ultralytics 🚀 AGPL-3.0 License - https://ultralytics.com/license

//! Drawing of 2D limbs and heatmaps onto images.

#![allow(
    clippy::cast_precision_loss,
    clippy::cast_possible_truncation,
    clippy::cast_possible_wrap,
    clippy::cast_sign_loss
)]

use image::{GrayImage, Luma, RgbImage};
use imageproc::drawing::{draw_line_segment_mut, draw_polygon_mut};
use imageproc::point::Point;
use ndarray::{Array2, ArrayView2};

use crate::config::RenderStyle;
use crate::skeleton::Skeleton;

/// Angular step of the ellipse approximation, in degrees.
const ELLIPSE_STEP: usize = 1;

/// Approximate a rotated ellipse by a polygon.
///
/// Vertices are sampled every `step` degrees over the full turn and rounded
/// to integer pixels; consecutive duplicates and a closing copy of the first
/// vertex are dropped.
fn ellipse_polygon(center: (i32, i32), axes: (i32, i32), angle: i32, step: usize) -> Vec<Point<i32>> {
    let (beta, alpha) = f64::from(angle.rem_euclid(360)).to_radians().sin_cos();
    let (cx, cy) = (f64::from(center.0), f64::from(center.1));
    let (a, b) = (f64::from(axes.0), f64::from(axes.1));

    let mut points: Vec<Point<i32>> = Vec::with_capacity(360 / step + 1);
    for deg in (0..=360_i32).step_by(step) {
        let (sin, cos) = f64::from(deg).to_radians().sin_cos();
        let (x, y) = (a * cos, b * sin);
        let point = Point::new(
            (cx + x * alpha - y * beta).round() as i32,
            (cy + x * beta + y * alpha).round() as i32,
        );
        if points.last() != Some(&point) {
            points.push(point);
        }
    }

    while points.len() > 1 && points.first() == points.last() {
        points.pop();
    }
    points
}

/// Polygon covering the limb from `child` to `parent`, both `(row, column)`.
///
/// The ellipse is centered on the midpoint, its major half-axis is half the
/// limb length and its minor half-axis is `thickness`; it is rotated by the
/// limb angle truncated to whole degrees.
#[must_use]
pub fn limb_polygon(child: (usize, usize), parent: (usize, usize), thickness: u32) -> Vec<Point<i32>> {
    let (x1, y1) = (child.0 as f64, child.1 as f64);
    let (x2, y2) = (parent.0 as f64, parent.1 as f64);

    let length = (x1 - x2).hypot(y1 - y2);
    let deg = (x1 - x2).atan2(y1 - y2).to_degrees();
    let center = (((y1 + y2) / 2.0) as i32, ((x1 + x2) / 2.0) as i32);

    ellipse_polygon(
        center,
        ((length / 2.0) as i32, thickness as i32),
        deg as i32,
        ELLIPSE_STEP,
    )
}

fn fill_polygon(image: &mut RgbImage, polygon: &[Point<i32>], color: image::Rgb<u8>) {
    match polygon {
        [] => {}
        [p] => {
            if p.x >= 0 && p.y >= 0 && (p.x as u32) < image.width() && (p.y as u32) < image.height() {
                image.put_pixel(p.x as u32, p.y as u32, color);
            }
        }
        [a, b] => draw_line_segment_mut(
            image,
            (a.x as f32, a.y as f32),
            (b.x as f32, b.y as f32),
            color,
        ),
        _ => draw_polygon_mut(image, polygon, color),
    }
}

/// Draw every limb of the skeleton onto `image` in place.
///
/// `joints_2d` holds `(row, column)` pairs. Each joint is connected to its
/// parent by a filled ellipse in `style.color`.
///
/// # Panics
///
/// Panics if `joints_2d` is not (J, 2) with at least as many rows as the
/// skeleton has joints.
pub fn draw_limbs_2d_mut(
    image: &mut RgbImage,
    joints_2d: &Array2<usize>,
    skeleton: &Skeleton,
    style: &RenderStyle,
) {
    assert_eq!(joints_2d.ncols(), 2, "2D joints must have two columns");
    assert!(
        joints_2d.nrows() >= skeleton.len(),
        "expected at least {} 2D joints, got {}",
        skeleton.len(),
        joints_2d.nrows()
    );

    let color = style.color.to_rgb();
    for (joint, parent) in skeleton.limbs() {
        let child = (joints_2d[[joint, 0]], joints_2d[[joint, 1]]);
        let parent = (joints_2d[[parent, 0]], joints_2d[[parent, 1]]);
        let polygon = limb_polygon(child, parent, style.thickness);
        fill_polygon(image, &polygon, color);
    }
}

/// Draw every limb of the skeleton onto a copy of `image`.
///
/// # Panics
///
/// Panics under the same conditions as [`draw_limbs_2d_mut`].
#[must_use]
pub fn draw_limbs_2d(
    image: &RgbImage,
    joints_2d: &Array2<usize>,
    skeleton: &Skeleton,
    style: &RenderStyle,
) -> RgbImage {
    let mut out = image.clone();
    draw_limbs_2d_mut(&mut out, joints_2d, skeleton, style);
    out
}

/// Render a heatmap channel as a grayscale image, mapping [0, 1] to [0, 255].
#[must_use]
pub fn heatmap_to_image(heatmap: ArrayView2<'_, f32>) -> GrayImage {
    let (height, width) = heatmap.dim();
    GrayImage::from_fn(width as u32, height as u32, |x, y| {
        let value = heatmap[[y as usize, x as usize]].clamp(0.0, 1.0);
        Luma([(value * 255.0).round() as u8])
    })
}
