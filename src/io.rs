// Ultralytics 🚀 AGPL-3.0 License - https://ultralytics.com/license

//! I/O utilities for loading frames and masks and saving rendered frames.

use std::fs::{self, File};
use std::io::BufReader;
use std::path::{Path, PathBuf};

use image::{DynamicImage, GrayImage, ImageBuffer, RgbImage};

use crate::error::{OverlayError, Result};

/// Load a frame as 8-bit RGB.
///
/// JPEG files are decoded with `jpeg-decoder` first to avoid stride issues in the
/// default decoder; anything else goes through `image::open`.
///
/// # Errors
///
/// Returns an error if the file cannot be opened or decoded.
pub fn load_frame<P: AsRef<Path>>(path: P) -> Result<RgbImage> {
    let path = path.as_ref();
    if is_jpeg(path) {
        if let Some(frame) = decode_jpeg(path) {
            return Ok(frame);
        }
    }
    Ok(image::open(path)
        .map_err(|e| OverlayError::ImageError(format!("Failed to load {}: {e}", path.display())))?
        .to_rgb8())
}

fn is_jpeg(path: &Path) -> bool {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_lowercase);
    matches!(ext.as_deref(), Some("jpg" | "jpeg"))
}

fn decode_jpeg(path: &Path) -> Option<RgbImage> {
    let file = File::open(path).ok()?;
    let mut decoder = jpeg_decoder::Decoder::new(BufReader::new(file));
    let pixels = decoder.decode().ok()?;
    let info = decoder.info()?;
    let (width, height) = (u32::from(info.width), u32::from(info.height));
    match info.pixel_format {
        jpeg_decoder::PixelFormat::RGB24 => ImageBuffer::from_raw(width, height, pixels),
        jpeg_decoder::PixelFormat::L8 => {
            let gray: GrayImage = ImageBuffer::from_raw(width, height, pixels)?;
            Some(DynamicImage::ImageLuma8(gray).to_rgb8())
        }
        _ => None,
    }
}

/// Load a person mask; any non-zero pixel belongs to the person.
///
/// # Errors
///
/// Returns an error if the file cannot be opened or decoded.
pub fn load_mask<P: AsRef<Path>>(path: P) -> Result<GrayImage> {
    let path = path.as_ref();
    Ok(image::open(path)
        .map_err(|e| {
            OverlayError::ImageError(format!("Failed to load mask {}: {e}", path.display()))
        })?
        .to_luma8())
}

/// Save a rendered frame, creating parent directories as needed.
///
/// # Errors
///
/// Returns an error if the directory cannot be created or the image cannot be encoded.
pub fn save_frame<P: AsRef<Path>>(frame: &RgbImage, path: P) -> Result<()> {
    let path = path.as_ref();
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    frame
        .save(path)
        .map_err(|e| OverlayError::ImageError(format!("Failed to save {}: {e}", path.display())))
}

/// Find the next available run directory (render, render2, render3, etc.)
#[must_use]
pub fn find_next_run_dir(base: &Path, prefix: &str) -> PathBuf {
    let first = base.join(prefix);
    if !first.exists() {
        return first;
    }

    (2..)
        .map(|i| base.join(format!("{prefix}{i}")))
        .find(|candidate| !candidate.exists())
        .unwrap_or(first)
}
