// Ultralytics 🚀 AGPL-3.0 License - https://ultralytics.com/license

//! Thick-stroke drawing primitives on top of `imageproc`.
//!
//! `imageproc` draws one-pixel outlines and lines; the helpers here add stroke
//! thickness and arrowheads. All of them clip silently at the image border.

use image::{Rgb, RgbImage};
use imageproc::drawing::{draw_filled_circle_mut, draw_hollow_rect_mut, draw_line_segment_mut};
use imageproc::point::Point;
use imageproc::rect::Rect;

/// Angle between the shaft and each arrowhead stroke.
const ARROW_HEAD_ANGLE: f32 = std::f32::consts::FRAC_PI_4;

/// Draw a rectangle outline growing inwards from `rect` by `thickness` pixels.
#[allow(clippy::cast_possible_wrap, clippy::cast_sign_loss)]
pub fn draw_thick_rect_mut(image: &mut RgbImage, rect: Rect, color: Rgb<u8>, thickness: u32) {
    let (x1, y1) = (rect.left(), rect.top());
    let (x2, y2) = (rect.right(), rect.bottom());

    for t in 0..thickness.max(1) as i32 {
        let tx1 = x1 + t;
        let ty1 = y1 + t;
        let tx2 = x2 - t;
        let ty2 = y2 - t;
        if tx2 < tx1 || ty2 < ty1 {
            break;
        }
        let inner = Rect::at(tx1, ty1).of_size((tx2 - tx1 + 1) as u32, (ty2 - ty1 + 1) as u32);
        draw_hollow_rect_mut(image, inner, color);
    }
}

/// Draw a filled circular marker.
pub fn draw_marker_mut(image: &mut RgbImage, center: Point<i32>, radius: i32, color: Rgb<u8>) {
    draw_filled_circle_mut(image, (center.x, center.y), radius.max(0), color);
}

/// Draw a line segment `thickness` pixels wide, centered on `start -> end`.
#[allow(clippy::cast_precision_loss)]
pub fn draw_thick_line_mut(
    image: &mut RgbImage,
    start: (f32, f32),
    end: (f32, f32),
    color: Rgb<u8>,
    thickness: u32,
) {
    let thickness = thickness.max(1);
    let (dx, dy) = (end.0 - start.0, end.1 - start.1);
    let length = dx.hypot(dy);
    if thickness == 1 || length <= f32::EPSILON {
        draw_line_segment_mut(image, start, end, color);
        return;
    }

    let (nx, ny) = (-dy / length, dx / length);
    let half = (thickness - 1) as f32 / 2.0;
    for k in 0..thickness {
        let offset = k as f32 - half;
        draw_line_segment_mut(
            image,
            (start.0 + nx * offset, start.1 + ny * offset),
            (end.0 + nx * offset, end.1 + ny * offset),
            color,
        );
    }
}

/// Draw an arrow from `start` to `end`.
///
/// Each arrowhead stroke is `tip_fraction` of the shaft length and leaves the tip at
/// 45 degrees to the shaft. A zero-length arrow draws nothing.
pub fn draw_arrowed_line_mut(
    image: &mut RgbImage,
    start: (f32, f32),
    end: (f32, f32),
    color: Rgb<u8>,
    thickness: u32,
    tip_fraction: f32,
) {
    let (dx, dy) = (start.0 - end.0, start.1 - end.1);
    let length = dx.hypot(dy);
    if length <= f32::EPSILON {
        return;
    }

    draw_thick_line_mut(image, start, end, color, thickness);

    let tip = length * tip_fraction;
    let angle = dy.atan2(dx);
    for side in [ARROW_HEAD_ANGLE, -ARROW_HEAD_ANGLE] {
        let head = (
            end.0 + tip * (angle + side).cos(),
            end.1 + tip * (angle + side).sin(),
        );
        draw_thick_line_mut(image, head, end, color, thickness);
    }
}

/// Arrow end point for `origin + scale * direction`, in floating point pixels.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn arrow_end(origin: Point<i32>, direction: Point<f32>, scale: f32) -> (f32, f32) {
    (
        origin.x as f32 + scale * direction.x,
        origin.y as f32 + scale * direction.y,
    )
}
