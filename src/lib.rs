// Ultralytics 🚀 AGPL-3.0 License - https://ultralytics.com/license

#![allow(clippy::multiple_crate_versions)]
#![cfg_attr(docsrs, feature(doc_cfg))]

//! # VNect Pose Utilities
//!
//! Stateless image-geometry and heatmap-decoding helpers for single-person
//! 3D pose estimation networks of the VNect family. The network itself is not
//! part of this crate: you bring its heatmaps and location maps, this crate
//! prepares the input images and turns the outputs into joints.
//!
//! ## Features
//!
//! - **Input geometry** - Lanczos scaling, scale-and-squareify, scale-and-pad
//! - **Pose decoding** - 2D arg-max joints and root-relative 3D joints from location maps
//! - **Ground truth** - Gaussian heatmap rendering with max blending
//! - **Rendering** - 2D limb ellipses and a pluggable 3D line plotting seam
//!
//! ## Quick Start
//!
//! ```
//! use ndarray::Array3;
//! use vnect_utils::{LocationMaps, PoseConfig, Skeleton, decode_pose, generate_heatmap_stack};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let skeleton = Skeleton::new(0, vec![0, 0])?;
//! let config = PoseConfig::new()
//!     .with_box_size(64)
//!     .with_heatmap_factor(4.0)
//!     .with_skeleton(skeleton);
//!
//! // Network outputs at 1/4 of the box resolution
//! let heatmaps = generate_heatmap_stack((16, 16), &[(8.0, 8.0), (3.0, 5.0)], 1.0);
//! let maps = LocationMaps::new(
//!     Array3::zeros((16, 16, 2)),
//!     Array3::zeros((16, 16, 2)),
//!     Array3::zeros((16, 16, 2)),
//! )?;
//!
//! let pose = decode_pose(&heatmaps, &maps, &config)?;
//! assert_eq!(pose.len(), 2);
//! assert_eq!(pose.joint_3d(0), Some([0.0, 0.0, 0.0]));
//! # Ok(())
//! # }
//! ```
//!
//! ## CLI Usage
//!
//! ```bash
//! # Scale to 368 rows and center-crop or pad to a square
//! vnect-utils squareify --source person.jpg --output box.png
//!
//! # Shrink a square box and pad it back to its original size
//! vnect-utils pad --source box.png --output small.png --scale 0.7
//!
//! # Render a single Gaussian heatmap
//! vnect-utils heatmap --output hm.png --height 46 --width 46 --center-x 20 --center-y 12
//!
//! # Draw limbs from a CSV of row,col joints
//! vnect-utils skeleton --joints joints.csv --source box.png --output limbs.png
//! ```
//!
//! ## Module Overview
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`preprocessing`] | Scaling, padding, squareify, heatmap resizing |
//! | [`postprocessing`] | 2D/3D joint extraction ([`decode_pose`]) |
//! | [`heatmap`] | Gaussian heatmap generation |
//! | [`results`] | Decoded [`Pose`] |
//! | [`skeleton`] | Joint hierarchy ([`Skeleton`]) |
//! | [`config`] | [`PoseConfig`] and [`RenderStyle`] |
//! | [`visualizer`] | Colors and 3D limb plotting |
//! | `annotate` | 2D limb drawing (feature `annotate`) |
//! | [`error`] | Error types ([`PoseError`], [`Result`]) |
//!
//! ## Feature Flags
//!
//! | Feature | Description |
//! |---------|-------------|
//! | `annotate` | Limb drawing and the projection canvas (default) |

// Modules
#[cfg(feature = "annotate")]
pub mod annotate;
pub mod config;
pub mod error;
pub mod heatmap;
pub mod postprocessing;
pub mod preprocessing;
pub mod results;
pub mod skeleton;
pub mod visualizer;

// Re-export main types for convenience
pub use config::{PoseConfig, RenderStyle};
pub use error::{PoseError, Result};
pub use postprocessing::{LocationMaps, decode_pose, extract_2d_joints, extract_3d_joints};
pub use results::Pose;
pub use skeleton::Skeleton;

pub use heatmap::{draw_gaussian_mut, generate_heatmap, generate_heatmap_stack};
pub use preprocessing::{
    array_to_image, image_to_array, pad_image, scale_and_pad, scale_and_squareify, scale_heatmaps,
    scale_image,
};

#[cfg(feature = "annotate")]
pub use annotate::{draw_limbs_2d, draw_limbs_2d_mut, heatmap_to_image, limb_polygon};
pub use visualizer::{Axes3d, Color, draw_limbs_3d};

/// Library version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name.
pub const NAME: &str = env!("CARGO_PKG_NAME");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(VERSION.contains('.'));
    }

    #[test]
    fn test_name() {
        assert_eq!(NAME, "vnect-utils");
    }
}
