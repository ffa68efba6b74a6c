// Ultralytics 🚀 AGPL-3.0 License - https://ultralytics.com/license

//! Decoded pose results.

use ndarray::{Array2, ArrayView2};

use crate::skeleton::Skeleton;
use crate::visualizer::{Segment3, limb_segments_3d};

/// A decoded pose: 2D joints at box resolution and root-relative 3D joints.
#[derive(Debug, Clone, PartialEq)]
pub struct Pose {
    joints_2d: Array2<usize>,
    joints_3d: Array2<f32>,
}

impl Pose {
    /// Create a new pose.
    ///
    /// # Arguments
    ///
    /// * `joints_2d` - (J, 2) array of `(row, column)` pairs.
    /// * `joints_3d` - (J, 3) array of root-relative `(x, y, z)` coordinates.
    #[must_use]
    pub const fn new(joints_2d: Array2<usize>, joints_3d: Array2<f32>) -> Self {
        Self {
            joints_2d,
            joints_3d,
        }
    }

    /// Number of joints with 3D coordinates.
    #[must_use]
    pub fn len(&self) -> usize {
        self.joints_3d.nrows()
    }

    /// Check if the pose has no joints.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.joints_3d.nrows() == 0
    }

    /// All 2D joints.
    #[must_use]
    pub fn joints_2d(&self) -> ArrayView2<'_, usize> {
        self.joints_2d.view()
    }

    /// All 3D joints.
    #[must_use]
    pub fn joints_3d(&self) -> ArrayView2<'_, f32> {
        self.joints_3d.view()
    }

    /// `(row, column)` of one joint.
    #[must_use]
    pub fn joint_2d(&self, joint: usize) -> Option<(usize, usize)> {
        (joint < self.joints_2d.nrows())
            .then(|| (self.joints_2d[[joint, 0]], self.joints_2d[[joint, 1]]))
    }

    /// `[x, y, z]` of one joint.
    #[must_use]
    pub fn joint_3d(&self, joint: usize) -> Option<[f32; 3]> {
        (joint < self.joints_3d.nrows()).then(|| {
            [
                self.joints_3d[[joint, 0]],
                self.joints_3d[[joint, 1]],
                self.joints_3d[[joint, 2]],
            ]
        })
    }

    /// 3D limb segments for plotting.
    ///
    /// # Panics
    ///
    /// Panics if the skeleton references joints this pose does not have.
    #[must_use]
    pub fn limb_segments(&self, skeleton: &Skeleton) -> Vec<Segment3> {
        limb_segments_3d(&self.joints_3d, skeleton)
    }

    /// Consume the pose, returning the 2D and 3D arrays.
    #[must_use]
    pub fn into_parts(self) -> (Array2<usize>, Array2<f32>) {
        (self.joints_2d, self.joints_3d)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    #[test]
    fn test_pose_accessors() {
        let pose = Pose::new(
            array![[1, 2], [3, 4]],
            array![[0.0, 0.0, 0.0], [1.0, -2.0, 3.0]],
        );
        assert_eq!(pose.len(), 2);
        assert!(!pose.is_empty());
        assert_eq!(pose.joint_2d(1), Some((3, 4)));
        assert_eq!(pose.joint_3d(1), Some([1.0, -2.0, 3.0]));
        assert_eq!(pose.joint_2d(2), None);
        assert_eq!(pose.joint_3d(5), None);
    }

    #[test]
    fn test_pose_limb_segments() {
        let skeleton = Skeleton::new(0, vec![0, 0]).unwrap();
        let pose = Pose::new(array![[0, 0], [1, 1]], array![[0.0, 0.0, 0.0], [1.0, 1.0, 1.0]]);
        let segments = pose.limb_segments(&skeleton);
        assert_eq!(segments.len(), 2);
        assert_eq!(segments[1].start, [1.0, 1.0, 1.0]);
        assert_eq!(segments[1].end, [0.0, 0.0, 0.0]);
    }

    #[test]
    fn test_into_parts() {
        let pose = Pose::new(Array2::zeros((0, 2)), Array2::zeros((0, 3)));
        assert!(pose.is_empty());
        let (j2, j3) = pose.into_parts();
        assert_eq!(j2.dim(), (0, 2));
        assert_eq!(j3.dim(), (0, 3));
    }
}
