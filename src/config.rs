// Ultralytics 🚀 AGPL-3.0 License - https://ultralytics.com/license

//! Pose decoding configuration.
//!
//! [`PoseConfig`] bundles the network geometry (input box size, heatmap
//! stride), the skeleton topology and the render style that the free
//! functions in this crate otherwise take one by one.

use crate::skeleton::Skeleton;
use crate::visualizer::Color;

/// Default square input size of the network.
pub const DEFAULT_BOX_SIZE: u32 = 368;

/// Default ratio between the input box and the heatmap resolution.
pub const DEFAULT_HEATMAP_FACTOR: f64 = 8.0;

/// Default gray level for padded borders (black).
pub const DEFAULT_PAD_VALUE: u8 = 0;

/// Default Gaussian sigma for synthetic heatmaps.
pub const DEFAULT_SIGMA: f64 = 3.0;

/// Drawing parameters for limbs.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderStyle {
    /// Limb fill color.
    pub color: Color,
    /// Minor half-axis of the 2D limb ellipse, in pixels.
    pub thickness: u32,
    /// Line width for 3D limbs, in pixels.
    pub line_width: f32,
}

impl Default for RenderStyle {
    fn default() -> Self {
        Self {
            color: Color::LIMB,
            thickness: 3,
            line_width: 3.0,
        }
    }
}

/// Configuration for pose pre/post-processing.
///
/// # Example
///
/// ```rust
/// use vnect_utils::PoseConfig;
///
/// let config = PoseConfig::new()
///     .with_box_size(256)
///     .with_heatmap_factor(8.0)
///     .with_pad_value(128);
/// assert_eq!(config.box_size, 256);
/// ```
#[derive(Debug, Clone)]
pub struct PoseConfig {
    /// Side length of the square network input.
    pub box_size: u32,
    /// Scale factor from heatmap resolution to box resolution.
    pub heatmap_factor: f64,
    /// Gray level used when padding images.
    pub pad_value: u8,
    /// Sigma for synthetic Gaussian heatmaps.
    pub sigma: f64,
    /// Joint topology.
    pub skeleton: Skeleton,
    /// Limb drawing style.
    pub style: RenderStyle,
}

impl Default for PoseConfig {
    fn default() -> Self {
        Self {
            box_size: DEFAULT_BOX_SIZE,
            heatmap_factor: DEFAULT_HEATMAP_FACTOR,
            pad_value: DEFAULT_PAD_VALUE,
            sigma: DEFAULT_SIGMA,
            skeleton: Skeleton::vnect(),
            style: RenderStyle::default(),
        }
    }
}

impl PoseConfig {
    /// Create a new configuration with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the square input box size.
    #[must_use]
    pub const fn with_box_size(mut self, box_size: u32) -> Self {
        self.box_size = box_size;
        self
    }

    /// Set the heatmap-to-box scale factor.
    #[must_use]
    pub const fn with_heatmap_factor(mut self, factor: f64) -> Self {
        self.heatmap_factor = factor;
        self
    }

    /// Set the padding gray level.
    ///
    /// `0` pads with black, `128` with mid gray.
    #[must_use]
    pub const fn with_pad_value(mut self, pad_value: u8) -> Self {
        self.pad_value = pad_value;
        self
    }

    /// Set the Gaussian sigma for synthetic heatmaps.
    #[must_use]
    pub const fn with_sigma(mut self, sigma: f64) -> Self {
        self.sigma = sigma;
        self
    }

    /// Set the skeleton topology.
    #[must_use]
    pub fn with_skeleton(mut self, skeleton: Skeleton) -> Self {
        self.skeleton = skeleton;
        self
    }

    /// Set the limb render style.
    #[must_use]
    pub const fn with_style(mut self, style: RenderStyle) -> Self {
        self.style = style;
        self
    }
}
