// Ultralytics 🚀 AGPL-3.0 License - https://ultralytics.com/license

use image::Rgb;

/// Color type for visualization.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Color(pub u8, pub u8, pub u8);

impl Color {
    /// Red color.
    pub const RED: Color = Color(255, 0, 0);
    /// Green color.
    pub const GREEN: Color = Color(0, 255, 0);
    /// Blue color.
    pub const BLUE: Color = Color(0, 0, 255);
    /// White color.
    pub const WHITE: Color = Color(255, 255, 255);
    /// Black color.
    pub const BLACK: Color = Color(0, 0, 0);
    /// Default limb color (RGB of the BGR triple 38, 73, 170).
    pub const LIMB: Color = Color(170, 73, 38);

    /// Create a new color from RGB values.
    #[must_use]
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self(r, g, b)
    }

    /// Create a color from a BGR triple.
    #[must_use]
    pub const fn from_bgr(b: u8, g: u8, r: u8) -> Self {
        Self(r, g, b)
    }

    /// Get a color from the line palette by index, cycling.
    #[must_use]
    pub fn from_index(index: usize) -> Self {
        let color = LINE_COLORS[index % LINE_COLORS.len()];
        Self(color[0], color[1], color[2])
    }

    /// Pixel value for drawing into an `RgbImage`.
    #[must_use]
    pub const fn to_rgb(self) -> Rgb<u8> {
        Rgb([self.0, self.1, self.2])
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::LIMB
    }
}

impl From<Color> for Rgb<u8> {
    fn from(color: Color) -> Self {
        color.to_rgb()
    }
}

/// Line color cycle used for 3D limbs, one entry per plotted line.
pub const LINE_COLORS: [[u8; 3]; 10] = [
    [31, 119, 180],  // #1f77b4
    [255, 127, 14],  // #ff7f0e
    [44, 160, 44],   // #2ca02c
    [214, 39, 40],   // #d62728
    [148, 103, 189], // #9467bd
    [140, 86, 75],   // #8c564b
    [227, 119, 194], // #e377c2
    [127, 127, 127], // #7f7f7f
    [188, 189, 34],  // #bcbd22
    [23, 190, 207],  // #17becf
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_index_cycles() {
        assert_eq!(Color::from_index(0), Color::from_index(LINE_COLORS.len()));
        assert_eq!(Color::from_index(1), Color(255, 127, 14));
    }

    #[test]
    fn test_bgr_conversion() {
        assert_eq!(Color::from_bgr(38, 73, 170), Color::LIMB);
        assert_eq!(Rgb::from(Color::LIMB), Rgb([170, 73, 38]));
    }
}
