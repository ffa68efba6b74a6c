// Ultralytics 🚀 AGPL-3.0 License - https://ultralytics.com/license

//! Synthetic Gaussian heatmaps.
//!
//! Used to build training labels: one Gaussian bump per joint, truncated
//! where its value would drop below 1% of the peak. Drawing into a plane that
//! already holds values keeps the pixel-wise maximum, it never sums.

#![allow(
    clippy::cast_precision_loss,
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss
)]

use ndarray::{Array2, Array3, ArrayViewMut2, Axis};

/// Largest exponent drawn, `-ln(0.01)`.
pub const GAUSSIAN_THRESHOLD: f64 = 4.6052;

/// Draw a Gaussian centered at `center = (x, y)` into `heatmap`.
///
/// Only pixels inside the box `[c - sqrt(2 * threshold) * sigma, c + ...)`
/// (truncated, clipped to the plane) are visited, and pixels whose exponent
/// exceeds [`GAUSSIAN_THRESHOLD`] are left untouched. Each visited pixel
/// becomes `min(max(old, gaussian), 1.0)`.
pub fn draw_gaussian_mut(mut heatmap: ArrayViewMut2<'_, f32>, center: (f64, f64), sigma: f64) {
    let (height, width) = heatmap.dim();
    let (center_x, center_y) = center;
    let radius = (GAUSSIAN_THRESHOLD * 2.0).sqrt() * sigma;

    let x0 = (center_x - radius).max(0.0) as usize;
    let y0 = (center_y - radius).max(0.0) as usize;
    let x1 = (center_x + radius).min(width as f64) as usize;
    let y1 = (center_y + radius).min(height as f64) as usize;

    for y in y0..y1 {
        for x in x0..x1 {
            let d = (x as f64 - center_x).powi(2) + (y as f64 - center_y).powi(2);
            let exponent = d / 2.0 / sigma / sigma;
            if exponent > GAUSSIAN_THRESHOLD {
                continue;
            }
            let cell = &mut heatmap[[y, x]];
            *cell = f64::from(*cell).max((-exponent).exp()).min(1.0) as f32;
        }
    }
}

/// Generate a single-channel heatmap of `shape = (height, width)` with one
/// Gaussian centered at `center = (x, y)`.
#[must_use]
pub fn generate_heatmap(shape: (usize, usize), center: (f64, f64), sigma: f64) -> Array2<f32> {
    let mut heatmap = Array2::zeros(shape);
    draw_gaussian_mut(heatmap.view_mut(), center, sigma);
    heatmap
}

/// Generate a (height, width, J) heatmap stack with one Gaussian per channel.
///
/// `centers[j]` is the `(x, y)` location of joint `j`.
#[must_use]
pub fn generate_heatmap_stack(
    shape: (usize, usize),
    centers: &[(f64, f64)],
    sigma: f64,
) -> Array3<f32> {
    let (height, width) = shape;
    let mut stack = Array3::zeros((height, width, centers.len()));
    for (joint, &center) in centers.iter().enumerate() {
        draw_gaussian_mut(stack.index_axis_mut(Axis(2), joint), center, sigma);
    }
    stack
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_peak_and_far_field() {
        let heatmap = generate_heatmap((20, 20), (5.0, 5.0), 3.0);
        assert_eq!(heatmap.dim(), (20, 20));
        assert!((heatmap[[5, 5]] - 1.0).abs() < f32::EPSILON);
        assert!((heatmap[[6, 5]] - (-1.0f32 / 18.0).exp()).abs() < 1e-6);
        assert_eq!(heatmap[[19, 19]], 0.0);
        assert_eq!(heatmap[[5, 15]], 0.0);
        assert_eq!(heatmap[[15, 5]], 0.0);
    }

    #[test]
    fn test_truncation_threshold() {
        let heatmap = generate_heatmap((20, 20), (10.0, 10.0), 1.0);
        // exponent 4.5 is kept, 5.0 is dropped
        assert!((heatmap[[10, 7]] - (-4.5f32).exp()).abs() < 1e-6);
        assert_eq!(heatmap[[9, 7]], 0.0);
        assert!(heatmap[[12, 12]] > 0.0);
    }

    #[test]
    fn test_center_near_border() {
        let heatmap = generate_heatmap((10, 10), (0.0, 9.0), 2.0);
        assert!((heatmap[[9, 0]] - 1.0).abs() < f32::EPSILON);
        assert!(heatmap.iter().all(|v| (0.0..=1.0).contains(v)));
    }

    #[test]
    fn test_center_outside_plane() {
        let heatmap = generate_heatmap((10, 10), (-50.0, 40.0), 3.0);
        assert!(heatmap.iter().all(|&v| v == 0.0));
    }

    #[test]
    fn test_overlap_takes_maximum() {
        let mut heatmap = generate_heatmap((20, 20), (8.0, 10.0), 3.0);
        draw_gaussian_mut(heatmap.view_mut(), (12.0, 10.0), 3.0);
        // midpoint is 2 px from both centers: max of equal values, not their sum
        let expected = (-4.0f32 / 18.0).exp();
        assert!((heatmap[[10, 10]] - expected).abs() < 1e-6);
        assert!((heatmap[[10, 8]] - 1.0).abs() < f32::EPSILON);
        assert!((heatmap[[10, 12]] - 1.0).abs() < f32::EPSILON);
    }

    #[test]
    fn test_existing_larger_value_kept() {
        let mut heatmap = Array2::<f32>::zeros((20, 20));
        heatmap[[5, 8]] = 0.9;
        draw_gaussian_mut(heatmap.view_mut(), (5.0, 5.0), 3.0);
        assert!((heatmap[[5, 8]] - 0.9).abs() < f32::EPSILON);
    }

    #[test]
    fn test_stack_one_peak_per_channel() {
        let centers = [(2.0, 3.0), (10.0, 12.0), (15.0, 1.0)];
        let stack = generate_heatmap_stack((16, 20), &centers, 2.0);
        assert_eq!(stack.dim(), (16, 20, 3));
        for (joint, &(x, y)) in centers.iter().enumerate() {
            assert!((stack[[y as usize, x as usize, joint]] - 1.0).abs() < f32::EPSILON);
        }
        assert_eq!(stack[[3, 2, 1]], 0.0);
    }
}
