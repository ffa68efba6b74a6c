// Ultralytics 🚀 AGPL-3.0 License - https://ultralytics.com/license

//! Skeleton topology shared by joint extraction and rendering.
//!
//! A skeleton is a tree of joints: every joint names a parent, and following
//! parents from any joint ends at the root, which is its own parent. 3D joint
//! coordinates are expressed relative to the root.

use crate::error::{PoseError, Result};

/// Number of joints in the VNect skeleton.
pub const VNECT_NUM_JOINTS: usize = 21;

/// Root joint (pelvis) of the VNect skeleton.
pub const VNECT_ROOT: usize = 14;

/// Parent of each VNect joint.
pub const VNECT_PARENTS: [usize; VNECT_NUM_JOINTS] = [
    1,  // head top -> neck
    15, // neck -> spine
    1,  // right shoulder -> neck
    2,  // right elbow -> right shoulder
    3,  // right wrist -> right elbow
    1,  // left shoulder -> neck
    5,  // left elbow -> left shoulder
    6,  // left wrist -> left elbow
    14, // right hip -> pelvis
    8,  // right knee -> right hip
    9,  // right ankle -> right knee
    14, // left hip -> pelvis
    11, // left knee -> left hip
    12, // left ankle -> left knee
    14, // pelvis (root)
    14, // spine -> pelvis
    1,  // head -> neck
    4,  // right hand -> right wrist
    7,  // left hand -> left wrist
    10, // right toe -> right ankle
    13, // left toe -> left ankle
];

/// Joint names of the VNect skeleton, indexed like [`VNECT_PARENTS`].
pub const VNECT_JOINT_NAMES: [&str; VNECT_NUM_JOINTS] = [
    "head_top",
    "neck",
    "right_shoulder",
    "right_elbow",
    "right_wrist",
    "left_shoulder",
    "left_elbow",
    "left_wrist",
    "right_hip",
    "right_knee",
    "right_ankle",
    "left_hip",
    "left_knee",
    "left_ankle",
    "pelvis",
    "spine",
    "head",
    "right_hand",
    "left_hand",
    "right_toe",
    "left_toe",
];

/// Joint tree with a designated root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Skeleton {
    root: usize,
    parents: Vec<usize>,
    names: Vec<String>,
}

impl Skeleton {
    /// Create a skeleton from a root index and a limb-parent list.
    ///
    /// # Errors
    ///
    /// Returns [`PoseError::ConfigError`] if the list is empty, the root or a
    /// parent index is out of range, or some joint does not reach the root.
    pub fn new(root: usize, parents: Vec<usize>) -> Result<Self> {
        if parents.is_empty() {
            return Err(PoseError::ConfigError(
                "skeleton must have at least one joint".to_string(),
            ));
        }
        let len = parents.len();
        if root >= len {
            return Err(PoseError::ConfigError(format!(
                "root joint {root} out of range for {len} joints"
            )));
        }
        if let Some((joint, &parent)) = parents.iter().enumerate().find(|&(_, &p)| p >= len) {
            return Err(PoseError::ConfigError(format!(
                "parent {parent} of joint {joint} out of range for {len} joints"
            )));
        }

        for start in 0..len {
            let mut joint = start;
            let mut steps = 0;
            while joint != root {
                joint = parents[joint];
                steps += 1;
                if steps > len {
                    return Err(PoseError::ConfigError(format!(
                        "joint {start} does not reach root {root}"
                    )));
                }
            }
        }

        Ok(Self {
            root,
            parents,
            names: Vec::new(),
        })
    }

    /// The 21-joint VNect skeleton rooted at the pelvis.
    #[must_use]
    pub fn vnect() -> Self {
        Self {
            root: VNECT_ROOT,
            parents: VNECT_PARENTS.to_vec(),
            names: VNECT_JOINT_NAMES.iter().map(|&s| s.to_string()).collect(),
        }
    }

    /// Attach joint names.
    ///
    /// # Errors
    ///
    /// Returns [`PoseError::ConfigError`] if the name count differs from the joint count.
    pub fn with_names<S: Into<String>>(mut self, names: impl IntoIterator<Item = S>) -> Result<Self> {
        let names: Vec<String> = names.into_iter().map(Into::into).collect();
        if names.len() != self.parents.len() {
            return Err(PoseError::ConfigError(format!(
                "expected {} joint names, got {}",
                self.parents.len(),
                names.len()
            )));
        }
        self.names = names;
        Ok(self)
    }

    /// Index of the root joint.
    #[must_use]
    pub const fn root(&self) -> usize {
        self.root
    }

    /// Parent index of every joint.
    #[must_use]
    pub fn parents(&self) -> &[usize] {
        &self.parents
    }

    /// Parent of `joint`, or `None` if out of range.
    #[must_use]
    pub fn parent(&self, joint: usize) -> Option<usize> {
        self.parents.get(joint).copied()
    }

    /// Name of `joint`, if names were attached.
    #[must_use]
    pub fn joint_name(&self, joint: usize) -> Option<&str> {
        self.names.get(joint).map(String::as_str)
    }

    /// Number of joints.
    #[must_use]
    pub fn len(&self) -> usize {
        self.parents.len()
    }

    /// Always `false` for a constructed skeleton.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.parents.is_empty()
    }

    /// Iterate `(joint, parent)` pairs, one per joint. The root pairs with itself.
    pub fn limbs(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.parents.iter().copied().enumerate()
    }
}

impl Default for Skeleton {
    fn default() -> Self {
        Self::vnect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vnect_is_valid_tree() {
        let vnect = Skeleton::vnect();
        let rebuilt = Skeleton::new(VNECT_ROOT, VNECT_PARENTS.to_vec()).unwrap();
        assert_eq!(rebuilt.parents(), vnect.parents());
        assert_eq!(vnect.root(), 14);
        assert_eq!(vnect.parent(vnect.root()), Some(14));
        assert_eq!(vnect.joint_name(14), Some("pelvis"));
        assert_eq!(vnect.len(), VNECT_NUM_JOINTS);
    }

    #[test]
    fn test_rejects_out_of_range() {
        assert!(Skeleton::new(3, vec![0, 0, 1]).is_err());
        assert!(Skeleton::new(0, vec![0, 5, 1]).is_err());
        assert!(Skeleton::new(0, vec![]).is_err());
    }

    #[test]
    fn test_rejects_cycle_not_through_root() {
        // joints 1 and 2 point at each other and never reach joint 0
        assert!(Skeleton::new(0, vec![0, 2, 1]).is_err());
    }

    #[test]
    fn test_with_names_checks_length() {
        let skeleton = Skeleton::new(0, vec![0, 0]).unwrap();
        assert!(skeleton.clone().with_names(["a"]).is_err());
        let named = skeleton.with_names(["hip", "knee"]).unwrap();
        assert_eq!(named.joint_name(1), Some("knee"));
    }

    #[test]
    fn test_limbs() {
        let skeleton = Skeleton::new(0, vec![0, 0, 1]).unwrap();
        let limbs: Vec<_> = skeleton.limbs().collect();
        assert_eq!(limbs, vec![(0, 0), (1, 0), (2, 1)]);
    }
}
