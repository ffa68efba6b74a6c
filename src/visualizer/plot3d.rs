// Ultralytics 🚀 AGPL-3.0 License - https://ultralytics.com/license

//! 3D limb geometry and the plotting seam.
//!
//! [`limb_segments_3d`] turns joints into plain line segments. Anything that
//! can draw a 3D line implements [`Axes3d`]; [`draw_limbs_3d`] feeds the
//! segments to it. [`ProjectionCanvas`] is a small built-in implementation
//! that projects onto an image.

use ndarray::Array2;

use crate::config::RenderStyle;
use crate::skeleton::Skeleton;
use crate::visualizer::Color;

/// One limb in 3D: from a joint to its parent.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Segment3 {
    /// Child joint index.
    pub joint: usize,
    /// Parent joint index.
    pub parent: usize,
    /// Child joint position.
    pub start: [f32; 3],
    /// Parent joint position.
    pub end: [f32; 3],
}

impl Segment3 {
    /// X coordinates of both endpoints.
    #[must_use]
    pub const fn xs(&self) -> [f32; 2] {
        [self.start[0], self.end[0]]
    }

    /// Y coordinates of both endpoints.
    #[must_use]
    pub const fn ys(&self) -> [f32; 2] {
        [self.start[1], self.end[1]]
    }

    /// Z coordinates of both endpoints.
    #[must_use]
    pub const fn zs(&self) -> [f32; 2] {
        [self.start[2], self.end[2]]
    }

    /// Euclidean length.
    #[must_use]
    pub fn length(&self) -> f32 {
        self.start
            .iter()
            .zip(self.end)
            .map(|(a, b)| (a - b).powi(2))
            .sum::<f32>()
            .sqrt()
    }
}

/// A surface that can draw 3D line segments.
pub trait Axes3d {
    /// Draw one line from `(xs[0], ys[0], zs[0])` to `(xs[1], ys[1], zs[1])`.
    fn plot(&mut self, xs: [f32; 2], ys: [f32; 2], zs: [f32; 2], color: Color, line_width: f32);
}

/// Build one segment per joint, from the joint to its skeleton parent.
///
/// The root yields a zero-length segment.
///
/// # Panics
///
/// Panics if `joints_3d` is not (J, 3), or the skeleton has fewer than J
/// joints or names a parent beyond J.
#[must_use]
pub fn limb_segments_3d(joints_3d: &Array2<f32>, skeleton: &Skeleton) -> Vec<Segment3> {
    let joints = joints_3d.nrows();
    assert_eq!(joints_3d.ncols(), 3, "3D joints must have three columns");
    assert!(
        skeleton.len() >= joints,
        "skeleton has {} joints, pose has {joints}",
        skeleton.len()
    );

    let point = |j: usize| [joints_3d[[j, 0]], joints_3d[[j, 1]], joints_3d[[j, 2]]];

    skeleton
        .limbs()
        .take(joints)
        .map(|(joint, parent)| {
            assert!(parent < joints, "parent {parent} of joint {joint} out of range");
            Segment3 {
                joint,
                parent,
                start: point(joint),
                end: point(parent),
            }
        })
        .collect()
}

/// Plot every limb of `joints_3d` onto `axes`.
///
/// Each limb takes the next color of the line palette, the width comes from
/// `style`.
///
/// # Panics
///
/// Panics under the same conditions as [`limb_segments_3d`].
pub fn draw_limbs_3d<A: Axes3d + ?Sized>(
    axes: &mut A,
    joints_3d: &Array2<f32>,
    skeleton: &Skeleton,
    style: &RenderStyle,
) {
    for (i, segment) in limb_segments_3d(joints_3d, skeleton).iter().enumerate() {
        axes.plot(
            segment.xs(),
            segment.ys(),
            segment.zs(),
            Color::from_index(i),
            style.line_width,
        );
    }
}

#[cfg(feature = "annotate")]
pub use canvas::ProjectionCanvas;

#[cfg(feature = "annotate")]
mod canvas {
    #![allow(clippy::cast_precision_loss, clippy::cast_possible_truncation, clippy::cast_sign_loss)]

    use image::{Rgb, RgbImage};
    use imageproc::drawing::draw_line_segment_mut;

    use super::Axes3d;
    use crate::visualizer::Color;

    /// Orthographic 3D view rendered into an `RgbImage`.
    ///
    /// The view follows the usual 3D plot convention: z points up, the
    /// camera sits at `elevation` degrees above the x-y plane and is rotated
    /// `azimuth` degrees about z.
    #[derive(Debug, Clone)]
    pub struct ProjectionCanvas {
        image: RgbImage,
        elevation: f32,
        azimuth: f32,
        scale: f32,
    }

    impl ProjectionCanvas {
        /// Create a white canvas with the default view (elevation 30, azimuth -60)
        /// and one pixel per unit.
        #[must_use]
        pub fn new(width: u32, height: u32) -> Self {
            Self {
                image: RgbImage::from_pixel(width, height, Rgb([255, 255, 255])),
                elevation: 30.0,
                azimuth: -60.0,
                scale: 1.0,
            }
        }

        /// Set the camera elevation and azimuth, in degrees.
        #[must_use]
        pub const fn with_view(mut self, elevation: f32, azimuth: f32) -> Self {
            self.elevation = elevation;
            self.azimuth = azimuth;
            self
        }

        /// Set pixels per world unit.
        #[must_use]
        pub const fn with_scale(mut self, scale: f32) -> Self {
            self.scale = scale;
            self
        }

        /// Project a world point to pixel coordinates. The origin maps to the
        /// canvas center.
        #[must_use]
        pub fn project(&self, point: [f32; 3]) -> (f32, f32) {
            let (az_sin, az_cos) = self.azimuth.to_radians().sin_cos();
            let (el_sin, el_cos) = self.elevation.to_radians().sin_cos();
            let [x, y, z] = point;

            let right = -x * az_sin + y * az_cos;
            let depth = x * az_cos + y * az_sin;
            let up = -depth * el_sin + z * el_cos;

            let (width, height) = self.image.dimensions();
            (
                width as f32 / 2.0 + right * self.scale,
                height as f32 / 2.0 - up * self.scale,
            )
        }

        /// Rendered image.
        #[must_use]
        pub const fn image(&self) -> &RgbImage {
            &self.image
        }

        /// Consume the canvas, returning the rendered image.
        #[must_use]
        pub fn into_image(self) -> RgbImage {
            self.image
        }
    }

    impl Axes3d for ProjectionCanvas {
        fn plot(&mut self, xs: [f32; 2], ys: [f32; 2], zs: [f32; 2], color: Color, line_width: f32) {
            let start = self.project([xs[0], ys[0], zs[0]]);
            let end = self.project([xs[1], ys[1], zs[1]]);

            let (dx, dy) = (end.0 - start.0, end.1 - start.1);
            let length = dx.hypot(dy);
            let normal = if length > f32::EPSILON {
                (-dy / length, dx / length)
            } else {
                (0.0, 0.0)
            };

            let strokes = line_width.round().max(1.0) as u32;
            let center = (strokes - 1) as f32 / 2.0;
            for stroke in 0..strokes {
                let off = stroke as f32 - center;
                draw_line_segment_mut(
                    &mut self.image,
                    (start.0 + normal.0 * off, start.1 + normal.1 * off),
                    (end.0 + normal.0 * off, end.1 + normal.1 * off),
                    color.to_rgb(),
                );
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    #[derive(Default)]
    struct RecordingAxes {
        lines: Vec<([f32; 2], [f32; 2], [f32; 2], Color, f32)>,
    }

    impl Axes3d for RecordingAxes {
        fn plot(&mut self, xs: [f32; 2], ys: [f32; 2], zs: [f32; 2], color: Color, line_width: f32) {
            self.lines.push((xs, ys, zs, color, line_width));
        }
    }

    fn chain() -> (Array2<f32>, Skeleton) {
        let joints = array![[0.0, 0.0, 0.0], [0.0, 0.0, 10.0], [5.0, 0.0, 10.0]];
        let skeleton = Skeleton::new(0, vec![0, 0, 1]).unwrap();
        (joints, skeleton)
    }

    #[test]
    fn test_limb_segments_one_per_joint() {
        let (joints, skeleton) = chain();
        let segments = limb_segments_3d(&joints, &skeleton);
        assert_eq!(segments.len(), 3);
        assert_eq!(segments[0].length(), 0.0);
        assert_eq!((segments[2].joint, segments[2].parent), (2, 1));
        assert_eq!(segments[2].start, [5.0, 0.0, 10.0]);
        assert_eq!(segments[2].end, [0.0, 0.0, 10.0]);
        assert_eq!(segments[2].xs(), [5.0, 0.0]);
        assert!((segments[1].length() - 10.0).abs() < 1e-6);
    }

    #[test]
    #[should_panic(expected = "skeleton has 3 joints, pose has 4")]
    fn test_limb_segments_rejects_short_skeleton() {
        let joints = Array2::<f32>::zeros((4, 3));
        let skeleton = Skeleton::new(0, vec![0, 0, 1]).unwrap();
        let _ = limb_segments_3d(&joints, &skeleton);
    }

    #[test]
    fn test_draw_limbs_3d_feeds_axes() {
        let (joints, skeleton) = chain();
        let mut axes = RecordingAxes::default();
        draw_limbs_3d(&mut axes, &joints, &skeleton, &RenderStyle::default());

        assert_eq!(axes.lines.len(), 3);
        let (xs, ys, zs, color, width) = axes.lines[1];
        assert_eq!(xs, [0.0, 0.0]);
        assert_eq!(ys, [0.0, 0.0]);
        assert_eq!(zs, [10.0, 0.0]);
        assert_eq!(color, Color::from_index(1));
        assert!((width - 3.0).abs() < f32::EPSILON);
    }

    #[cfg(feature = "annotate")]
    #[test]
    fn test_projection_canvas() {
        let canvas = ProjectionCanvas::new(100, 100).with_view(0.0, -90.0).with_scale(2.0);
        // looking along +y with z up: x goes right, z goes up
        let (px, py) = canvas.project([10.0, 0.0, 0.0]);
        assert!((px - 70.0).abs() < 1e-3);
        assert!((py - 50.0).abs() < 1e-3);
        let (px, py) = canvas.project([0.0, 0.0, 10.0]);
        assert!((px - 50.0).abs() < 1e-3);
        assert!((py - 30.0).abs() < 1e-3);
    }

    #[cfg(feature = "annotate")]
    #[test]
    fn test_projection_canvas_draws() {
        let (joints, skeleton) = chain();
        let mut canvas = ProjectionCanvas::new(64, 64).with_view(0.0, -90.0).with_scale(2.0);
        draw_limbs_3d(&mut canvas, &joints, &skeleton, &RenderStyle::default());

        let image = canvas.into_image();
        // limb 1 runs from (32, 12) up to the origin at (32, 32)
        assert_eq!(image.get_pixel(32, 22), &Color::from_index(1).to_rgb());
        assert_eq!(image.get_pixel(2, 2), &image::Rgb([255, 255, 255]));
    }
}
