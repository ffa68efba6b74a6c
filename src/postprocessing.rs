// Ultralytics 🚀 AGPL-3.0 License - https://ultralytics.com/license

//! Post-processing of pose network output.
//!
//! The network produces, per joint, a 2D confidence heatmap and three
//! location maps holding the joint's X, Y and Z offsets. Joints are found by
//! arg-max on the rescaled heatmaps, then their 3D position is read from the
//! location maps at the matching low-resolution pixel.

#![allow(
    clippy::cast_precision_loss,
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss
)]

use ndarray::{Array2, Array3, ArrayView2, Axis};

use crate::config::PoseConfig;
use crate::error::{PoseError, Result};
use crate::preprocessing::scale_heatmaps;
use crate::results::Pose;
use crate::skeleton::Skeleton;

/// Multiplier applied to location map values.
pub const LOCATION_SCALE: f32 = 100.0;

/// X, Y and Z location maps, each shaped (height, width, J).
#[derive(Debug, Clone)]
pub struct LocationMaps {
    x: Array3<f32>,
    y: Array3<f32>,
    z: Array3<f32>,
}

impl LocationMaps {
    /// Bundle three location maps.
    ///
    /// # Errors
    ///
    /// Returns [`PoseError::ShapeError`] if the maps differ in shape.
    pub fn new(x: Array3<f32>, y: Array3<f32>, z: Array3<f32>) -> Result<Self> {
        if x.dim() != y.dim() || x.dim() != z.dim() {
            return Err(PoseError::ShapeError(format!(
                "location maps differ in shape: x {:?}, y {:?}, z {:?}",
                x.dim(),
                y.dim(),
                z.dim()
            )));
        }
        Ok(Self { x, y, z })
    }

    /// Shape of each map as (height, width, joints).
    #[must_use]
    pub fn dim(&self) -> (usize, usize, usize) {
        self.x.dim()
    }

    /// Number of joint channels.
    #[must_use]
    pub fn num_joints(&self) -> usize {
        self.x.dim().2
    }

    /// X location map.
    #[must_use]
    pub const fn x(&self) -> &Array3<f32> {
        &self.x
    }

    /// Y location map.
    #[must_use]
    pub const fn y(&self) -> &Array3<f32> {
        &self.y
    }

    /// Z location map.
    #[must_use]
    pub const fn z(&self) -> &Array3<f32> {
        &self.z
    }
}

/// Flat row-major index of the first maximum. A NaN wins immediately.
fn argmax(plane: ArrayView2<'_, f32>) -> usize {
    let mut best = 0;
    let mut best_value = f32::NEG_INFINITY;
    for (idx, &value) in plane.iter().enumerate() {
        if value.is_nan() {
            return idx;
        }
        if value > best_value {
            best = idx;
            best_value = value;
        }
    }
    best
}

/// Location map index for a box-resolution coordinate: truncated, at least 1.
fn map_index(coord: usize, factor: f64) -> usize {
    ((coord as f64 / factor) as usize).max(1)
}

/// Extract the 2D joint locations from a heatmap stack.
///
/// The stack is rescaled by `factor` to box resolution, then each channel's
/// maximum is located. Ties go to the first pixel in row-major order. The
/// flat index is unravelled against `(box_size, box_size)`, so the rescaled
/// heatmap is expected to match the box.
///
/// Returns a (J, 2) array of `(row, column)` pairs.
///
/// # Errors
///
/// Returns an error if rescaling fails.
///
/// # Panics
///
/// Panics if the heatmaps are not square or a maximum falls outside the box.
pub fn extract_2d_joints(heatmaps: &Array3<f32>, box_size: u32, factor: f64) -> Result<Array2<usize>> {
    let (height, width, _) = heatmaps.dim();
    assert_eq!(height, width, "heatmap must be square, got {height}x{width}");

    let scaled = scale_heatmaps(heatmaps, factor)?;
    let box_size = box_size as usize;
    let mut joints_2d = Array2::zeros((scaled.dim().2, 2));

    for (joint, plane) in scaled.axis_iter(Axis(2)).enumerate() {
        let flat = argmax(plane);
        assert!(
            flat < box_size * box_size,
            "maximum of joint {joint} lies outside the {box_size}x{box_size} box"
        );
        joints_2d[[joint, 0]] = flat / box_size;
        joints_2d[[joint, 1]] = flat % box_size;
    }

    Ok(joints_2d)
}

/// Obtain root-relative 3D joint coordinates from 2D joints and location maps.
///
/// For joint `j` at `(row, col)`, the map pixel is
/// `(max(trunc(row / factor), 1), max(trunc(col / factor), 1))`; the X, Y and Z
/// values there, times [`LOCATION_SCALE`], form the joint. The skeleton's
/// root is then subtracted from every joint, so the root ends at the origin.
///
/// Axes: x points left to right, y up to down, z forward to backward.
///
/// # Panics
///
/// Panics if `joints_2d` is not (J', 2) with J' at least the map joint count,
/// a joint lies outside the box, a map index falls outside the maps, or the
/// skeleton root is not one of the map joints.
#[must_use]
pub fn extract_3d_joints(
    joints_2d: &Array2<usize>,
    maps: &LocationMaps,
    box_size: u32,
    factor: f64,
    skeleton: &Skeleton,
) -> Array2<f32> {
    let (map_height, map_width, joints) = maps.dim();
    let box_size = box_size as usize;
    let root = skeleton.root();

    assert_eq!(joints_2d.ncols(), 2, "2D joints must have two columns");
    assert!(
        joints_2d.nrows() >= joints,
        "expected at least {joints} 2D joints, got {}",
        joints_2d.nrows()
    );
    assert!(root < joints, "root joint {root} out of range for {joints} joints");

    let mut joints_3d = Array2::<f32>::zeros((joints, 3));

    for joint in 0..joints {
        let (row, col) = (joints_2d[[joint, 0]], joints_2d[[joint, 1]]);
        assert!(
            row < box_size && col < box_size,
            "joint {joint} at ({row}, {col}) lies outside the {box_size}x{box_size} box"
        );

        let (map_row, map_col) = (map_index(row, factor), map_index(col, factor));
        assert!(
            map_row < map_height && map_col < map_width,
            "joint {joint} maps to ({map_row}, {map_col}) outside {map_height}x{map_width} location maps"
        );

        let idx = [map_row, map_col, joint];
        joints_3d[[joint, 0]] = maps.x[idx] * LOCATION_SCALE;
        joints_3d[[joint, 1]] = maps.y[idx] * LOCATION_SCALE;
        joints_3d[[joint, 2]] = maps.z[idx] * LOCATION_SCALE;
    }

    let root_coords = joints_3d.row(root).to_owned();
    joints_3d -= &root_coords;

    joints_3d
}

/// Decode a full pose from network output using `config`.
///
/// # Errors
///
/// Returns an error if the heatmaps cannot be rescaled.
///
/// # Panics
///
/// Panics on the contract violations of [`extract_2d_joints`] and
/// [`extract_3d_joints`].
pub fn decode_pose(heatmaps: &Array3<f32>, maps: &LocationMaps, config: &PoseConfig) -> Result<Pose> {
    let joints_2d = extract_2d_joints(heatmaps, config.box_size, config.heatmap_factor)?;
    let joints_3d = extract_3d_joints(
        &joints_2d,
        maps,
        config.box_size,
        config.heatmap_factor,
        &config.skeleton,
    );
    Ok(Pose::new(joints_2d, joints_3d))
}
