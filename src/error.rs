// Ultralytics 🚀 AGPL-3.0 License - https://ultralytics.com/license

//! Error types for the pose utilities library.
//!
//! Contract violations (mismatched image dimensions, non-square heatmaps) are
//! programming errors and panic at the call site. The variants here cover the
//! failures a caller can reasonably recover from.

use std::fmt;

/// Result type alias for pose utility operations.
pub type Result<T> = std::result::Result<T, PoseError>;

/// Main error type for the pose utilities library.
#[derive(Debug)]
pub enum PoseError {
    /// Error processing or converting images.
    ImageError(String),
    /// Error resampling an image or heatmap.
    ResizeError(String),
    /// Invalid array shape for the requested conversion.
    ShapeError(String),
    /// Invalid configuration (skeleton topology, style, sizes).
    ConfigError(String),
    /// Error parsing joint data supplied by the caller.
    ParseError(String),
    /// Wrapped `std::io::Error`
    Io(std::io::Error),
}

impl fmt::Display for PoseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ImageError(msg) => write!(f, "Image error: {msg}"),
            Self::ResizeError(msg) => write!(f, "Resize error: {msg}"),
            Self::ShapeError(msg) => write!(f, "Shape error: {msg}"),
            Self::ConfigError(msg) => write!(f, "Config error: {msg}"),
            Self::ParseError(msg) => write!(f, "Parse error: {msg}"),
            Self::Io(err) => write!(f, "IO error: {err}"),
        }
    }
}

impl std::error::Error for PoseError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(err) => Some(err),
            _ => None,
        }
    }
}

impl From<std::io::Error> for PoseError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<image::ImageError> for PoseError {
    fn from(err: image::ImageError) -> Self {
        Self::ImageError(err.to_string())
    }
}

impl From<ndarray::ShapeError> for PoseError {
    fn from(err: ndarray::ShapeError) -> Self {
        Self::ShapeError(err.to_string())
    }
}
