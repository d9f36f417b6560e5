// Ultralytics 🚀 AGPL-3.0 License - https://ultralytics.com/license

//! Text labels with a background box.
//!
//! Labels are drawn through the [`LabelPainter`] trait so the renderer can stack
//! them using the rectangle each label actually occupied. [`FontLabelPainter`] is
//! the real implementation, rendering TrueType text with `ab_glyph`.

use std::fs;
use std::path::Path;

use ab_glyph::{FontVec, PxScale};
use image::{Rgb, RgbImage};
use imageproc::drawing::{draw_filled_rect_mut, draw_text_mut, text_size};
use imageproc::rect::Rect;

use crate::error::{OverlayError, Result};
use crate::visualizer::Color;

/// Assets URL for downloading fonts
#[cfg(feature = "annotate")]
const ASSETS_URL: &str = "https://github.com/ultralytics/assets/releases/download/v0.0.0";

/// Font used when none is given explicitly.
pub const DEFAULT_FONT: &str = "Arial.ttf";

/// Pixel height of a label drawn at scale `1.0`.
pub const BASE_FONT_PX: f32 = 24.0;

/// Padding between the text and the edge of its background box.
const LABEL_PADDING: i32 = 1;

/// Something that can draw a text label and report where it went.
pub trait LabelPainter {
    /// Draw `text` with its top-left corner at `anchor`.
    ///
    /// # Arguments
    ///
    /// * `image` - Frame to draw on.
    /// * `text` - Label text.
    /// * `anchor` - Top-left corner of the label box, in pixels.
    /// * `scale` - Relative text size; `1.0` is [`BASE_FONT_PX`] pixels tall.
    ///
    /// # Returns
    ///
    /// * The rectangle covered by the label, background included.
    fn draw_label(&mut self, image: &mut RgbImage, text: &str, anchor: (i32, i32), scale: f32)
    -> Rect;
}

/// Label painter backed by a TrueType font.
///
/// Without a font the painter still draws the background box, sized from a glyph
/// width estimate, so labels keep stacking correctly.
#[derive(Debug)]
pub struct FontLabelPainter {
    font: Option<FontVec>,
    text_color: Color,
    background: Color,
}

impl FontLabelPainter {
    /// Create a painter from raw font bytes (TTF / OTF).
    ///
    /// # Errors
    ///
    /// Returns an error if the bytes are not a parsable font.
    pub fn from_bytes(data: Vec<u8>) -> Result<Self> {
        let font = FontVec::try_from_vec(data)
            .map_err(|e| OverlayError::FontError(format!("Invalid font data: {e}")))?;
        Ok(Self::with_font(Some(font)))
    }

    /// Create a painter from a font file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let data = fs::read(path).map_err(|e| {
            OverlayError::FontError(format!("Failed to read font {}: {e}", path.display()))
        })?;
        Self::from_bytes(data)
    }

    /// Load the default font, downloading it on first use.
    ///
    /// # Errors
    ///
    /// Returns an error if the font is neither cached nor downloadable.
    #[cfg(feature = "annotate")]
    pub fn load_default() -> Result<Self> {
        let path = check_font(DEFAULT_FONT)?;
        Self::from_path(path)
    }

    /// Load the default font.
    ///
    /// # Errors
    ///
    /// Always fails: font download needs the `annotate` feature.
    #[cfg(not(feature = "annotate"))]
    pub fn load_default() -> Result<Self> {
        Err(OverlayError::FeatureNotEnabled(
            "font download requires the 'annotate' feature".to_string(),
        ))
    }

    /// Create a painter that draws label boxes without text.
    #[must_use]
    pub fn without_font() -> Self {
        Self::with_font(None)
    }

    fn with_font(font: Option<FontVec>) -> Self {
        Self {
            font,
            text_color: Color::WHITE,
            background: Color::BLACK,
        }
    }

    /// Set the text and background colors.
    #[must_use]
    pub const fn with_colors(mut self, text: Color, background: Color) -> Self {
        self.text_color = text;
        self.background = background;
        self
    }

    /// Check whether a font is loaded.
    #[must_use]
    pub const fn has_font(&self) -> bool {
        self.font.is_some()
    }

    #[allow(
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss,
        clippy::cast_precision_loss
    )]
    fn measure(&self, text: &str, px: f32) -> (u32, u32) {
        match self.font {
            Some(ref font) => text_size(PxScale::from(px), font, text),
            None => ((text.chars().count() as f32 * px * 0.5).ceil() as u32, px.ceil() as u32),
        }
    }
}

impl LabelPainter for FontLabelPainter {
    #[allow(clippy::cast_possible_wrap, clippy::cast_sign_loss)]
    fn draw_label(
        &mut self,
        image: &mut RgbImage,
        text: &str,
        anchor: (i32, i32),
        scale: f32,
    ) -> Rect {
        let px = (BASE_FONT_PX * scale).max(1.0);
        let (text_w, text_h) = self.measure(text, px);
        let box_w = (text_w as i32 + 2 * LABEL_PADDING).max(1) as u32;
        let box_h = (text_h as i32 + 2 * LABEL_PADDING).max(1) as u32;
        let rect = Rect::at(anchor.0, anchor.1).of_size(box_w, box_h);

        draw_filled_rect_mut(image, rect, Rgb::from(self.background));
        if let Some(ref font) = self.font {
            draw_text_mut(
                image,
                Rgb::from(self.text_color),
                anchor.0 + LABEL_PADDING,
                anchor.1 + LABEL_PADDING,
                PxScale::from(px),
                font,
                text,
            );
        }
        rect
    }
}

/// Check if font exists locally or download it.
///
/// Fonts are cached under the user config directory.
///
/// # Errors
///
/// Returns an error if the cache directory cannot be created or the download fails.
#[cfg(feature = "annotate")]
pub fn check_font(font: &str) -> Result<std::path::PathBuf> {
    let font_name = Path::new(font)
        .file_name()
        .ok_or_else(|| OverlayError::FontError(format!("Invalid font name: {font}")))?
        .to_string_lossy()
        .to_string();
    let config_dir = dirs::config_dir()
        .ok_or_else(|| OverlayError::IoError("No user config directory".to_string()))?
        .join("tracking-overlay");
    let font_path = config_dir.join(&font_name);

    if font_path.exists() {
        return Ok(font_path);
    }

    fs::create_dir_all(&config_dir)?;

    let url = format!("{ASSETS_URL}/{font_name}");
    crate::verbose!("Downloading {url} to {}", font_path.display());

    let response = ureq::get(&url)
        .call()
        .map_err(|e| OverlayError::FontError(format!("Failed to download font from {url}: {e}")))?;

    let mut file = fs::File::create(&font_path)?;
    let mut reader = response.into_body().into_reader();
    if let Err(e) = std::io::copy(&mut reader, &mut file) {
        // Try to remove partial file
        let _ = fs::remove_file(&font_path);
        return Err(OverlayError::FontError(format!("Failed to download font: {e}")));
    }

    Ok(font_path)
}
