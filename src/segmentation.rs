// Ultralytics 🚀 AGPL-3.0 License - https://ultralytics.com/license

//! Segmentation overlay strategies.
//!
//! A segmentation is a list of per-person masks, each a grayscale image aligned
//! with the frame where any non-zero pixel belongs to that person. Masks larger or
//! smaller than the frame are clipped to the overlapping area.

use std::fmt;
use std::str::FromStr;

use image::{GrayImage, Rgb, RgbImage};

use crate::error::OverlayError;
use crate::visualizer::Color;

/// Opacity of the person tint in [`WinStyleSegmentation`].
const WIN_STYLE_ALPHA: f32 = 0.5;

/// Renders a set of person masks onto a frame.
pub trait SegmentationRenderer {
    /// Composite `masks` onto `image` in place.
    fn render(&self, image: &mut RgbImage, masks: &[GrayImage]);
}

/// Available segmentation overlay styles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub enum SegmentationType {
    /// No segmentation overlay.
    #[default]
    None,
    /// Black out everything that is not a person.
    Black,
    /// Tint each person with a palette color and outline it.
    WinStyle,
}

impl SegmentationType {
    /// Build the renderer for this style, `None` for [`SegmentationType::None`].
    #[must_use]
    pub fn renderer(self) -> Option<Box<dyn SegmentationRenderer>> {
        match self {
            Self::None => None,
            Self::Black => Some(Box::new(BlackSegmentation)),
            Self::WinStyle => Some(Box::new(WinStyleSegmentation)),
        }
    }

    /// Get the style name as a string.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Black => "black",
            Self::WinStyle => "win-style",
        }
    }
}

impl fmt::Display for SegmentationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for SegmentationType {
    type Err = OverlayError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "none" | "off" => Ok(Self::None),
            "black" => Ok(Self::Black),
            "win-style" | "win_style" | "winstyle" | "win" => Ok(Self::WinStyle),
            _ => Err(OverlayError::ConfigError(format!(
                "Unknown segmentation type: {s}. Valid types: none, black, win-style"
            ))),
        }
    }
}

/// Check whether pixel `(x, y)` is covered by `mask`.
fn covered(mask: &GrayImage, x: u32, y: u32) -> bool {
    x < mask.width() && y < mask.height() && mask.get_pixel(x, y)[0] > 0
}

/// Sets every pixel not covered by any mask to black.
#[derive(Debug, Clone, Copy, Default)]
pub struct BlackSegmentation;

impl SegmentationRenderer for BlackSegmentation {
    fn render(&self, image: &mut RgbImage, masks: &[GrayImage]) {
        for (x, y, pixel) in image.enumerate_pixels_mut() {
            if !masks.iter().any(|m| covered(m, x, y)) {
                *pixel = Rgb::from(Color::BLACK);
            }
        }
    }
}

/// Blends each person with its palette color and traces its outline.
#[derive(Debug, Clone, Copy, Default)]
pub struct WinStyleSegmentation;

impl WinStyleSegmentation {
    fn is_boundary(mask: &GrayImage, x: u32, y: u32) -> bool {
        if x == 0 || y == 0 || x + 1 >= mask.width() || y + 1 >= mask.height() {
            return true;
        }
        !(covered(mask, x - 1, y)
            && covered(mask, x + 1, y)
            && covered(mask, x, y - 1)
            && covered(mask, x, y + 1))
    }
}

impl SegmentationRenderer for WinStyleSegmentation {
    fn render(&self, image: &mut RgbImage, masks: &[GrayImage]) {
        let (width, height) = image.dimensions();
        for (index, mask) in masks.iter().enumerate() {
            let color = Color::from_index(index);
            for y in 0..height.min(mask.height()) {
                for x in 0..width.min(mask.width()) {
                    if !covered(mask, x, y) {
                        continue;
                    }
                    let pixel = image.get_pixel_mut(x, y);
                    *pixel = if Self::is_boundary(mask, x, y) {
                        Rgb::from(color)
                    } else {
                        Rgb::from(Color::from(*pixel).blend(color, WIN_STYLE_ALPHA))
                    };
                }
            }
        }
    }
}
