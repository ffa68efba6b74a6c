// Ultralytics 🚀 AGPL-3.0 License - https://ultralytics.com/license

//! Visualization tools for decoded poses.

/// Color definitions and palettes.
pub mod color;

/// 3D limb geometry and plotting.
pub mod plot3d;

pub use color::Color;
#[cfg(feature = "annotate")]
pub use plot3d::ProjectionCanvas;
pub use plot3d::{Axes3d, Segment3, draw_limbs_3d, limb_segments_3d};
