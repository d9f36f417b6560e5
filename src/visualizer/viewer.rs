// Ultralytics 🚀 AGPL-3.0 License - https://ultralytics.com/license

//! Frame viewer with pointer input.

use image::RgbImage;
use minifb::{Key, MouseButton, MouseMode, Window, WindowOptions};

use crate::error::{OverlayError, Result};
use crate::input::{Modifiers, PointerEvent, PointerInput};

/// Mouse buttons tracked by the viewer, with their press and release events.
const BUTTONS: [(MouseButton, PointerEvent, PointerEvent); 3] = [
    (MouseButton::Left, PointerEvent::PrimaryDown, PointerEvent::PrimaryUp),
    (MouseButton::Middle, PointerEvent::MiddleDown, PointerEvent::MiddleUp),
    (MouseButton::Right, PointerEvent::SecondaryDown, PointerEvent::SecondaryUp),
];

/// A simple frame viewer using minifb.
///
/// Pointer input is collected on every [`Viewer::update`] / [`Viewer::wait`] call,
/// converted to image pixel coordinates, and handed out by
/// [`Viewer::take_pointer_events`].
pub struct Viewer {
    window: Window,
    pub width: usize,
    pub height: usize,
    buffer: Vec<u32>,
    pointer: PointerTracker,
    pending: Vec<PointerInput>,
}

impl Viewer {
    /// Create a new viewer window.
    ///
    /// # Errors
    ///
    /// Returns an error if the window cannot be created.
    pub fn new(title: &str, width: usize, height: usize) -> Result<Self> {
        let mut window = Window::new(
            title,
            width,
            height,
            WindowOptions {
                resize: true,
                ..WindowOptions::default()
            },
        )
        .map_err(|e| OverlayError::VisualizerError(format!("Failed to create window: {e}")))?;

        // Limit update rate
        window.set_target_fps(60);

        Ok(Self {
            window,
            width,
            height,
            buffer: Vec::new(),
            pointer: PointerTracker::new(),
            pending: Vec::new(),
        })
    }

    /// Check whether the window is still open and not asked to close.
    #[must_use]
    pub fn is_open(&self) -> bool {
        self.window.is_open()
            && !self.window.is_key_down(Key::Escape)
            && !self.window.is_key_down(Key::Q)
    }

    /// Show a new frame.
    ///
    /// # Returns
    ///
    /// * `false` once the window has been closed (Escape / Q also close it).
    ///
    /// # Errors
    ///
    /// Returns an error if the window cannot be updated.
    pub fn update(&mut self, frame: &RgbImage) -> Result<bool> {
        if !self.is_open() {
            return Ok(false);
        }

        let (img_width, img_height) = (frame.width() as usize, frame.height() as usize);

        // Resize buffer if needed
        let num_pixels = img_width * img_height;
        if self.buffer.len() != num_pixels {
            self.buffer.resize(num_pixels, 0);
        }

        // Pack as 0x00RRGGBB
        for (slot, pixel) in self.buffer.iter_mut().zip(frame.pixels()) {
            let [r, g, b] = pixel.0;
            *slot = (u32::from(r) << 16) | (u32::from(g) << 8) | u32::from(b);
        }

        self.width = img_width;
        self.height = img_height;

        self.window
            .update_with_buffer(&self.buffer, self.width, self.height)
            .map_err(|e| OverlayError::VisualizerError(format!("Failed to update window: {e}")))?;
        self.poll_pointer();

        Ok(true)
    }

    /// Keep the window responsive for `duration` without changing the frame.
    ///
    /// # Errors
    ///
    /// Never fails at present; the signature matches [`Viewer::update`].
    pub fn wait(&mut self, duration: std::time::Duration) -> Result<bool> {
        if self.buffer.is_empty() {
            return Ok(true);
        }

        let start = std::time::Instant::now();
        while start.elapsed() < duration {
            if !self.is_open() {
                return Ok(false);
            }
            // Re-present the buffer so the frame persists; minifb paces the loop.
            let _ = self
                .window
                .update_with_buffer(&self.buffer, self.width, self.height);
            self.poll_pointer();
        }
        Ok(true)
    }

    /// Drain the pointer events collected since the last call.
    pub fn take_pointer_events(&mut self) -> Vec<PointerInput> {
        std::mem::take(&mut self.pending)
    }

    fn modifiers(&self) -> Modifiers {
        let held = |a: Key, b: Key| self.window.is_key_down(a) || self.window.is_key_down(b);
        let mut mods = Modifiers::NONE;
        if held(Key::LeftShift, Key::RightShift) {
            mods = mods | Modifiers::SHIFT;
        }
        if held(Key::LeftCtrl, Key::RightCtrl) {
            mods = mods | Modifiers::CTRL;
        }
        if held(Key::LeftAlt, Key::RightAlt) {
            mods = mods | Modifiers::ALT;
        }
        mods
    }

    fn poll_pointer(&mut self) {
        let Some(mouse) = self.window.get_mouse_pos(MouseMode::Discard) else {
            return;
        };
        let sample = PointerSample {
            mouse,
            buttons: BUTTONS.map(|(button, _, _)| self.window.get_mouse_down(button)),
            window_size: self.window.get_size(),
            modifiers: self.modifiers(),
        };
        let events = self.pointer.advance(sample, (self.width, self.height));
        self.pending.extend(events);
    }
}

/// One poll of the raw window pointer state.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerSample {
    /// Mouse position in window coordinates.
    pub mouse: (f32, f32),
    /// Left, middle and right button state.
    pub buttons: [bool; 3],
    /// Current window size in pixels.
    pub window_size: (usize, usize),
    /// Modifier keys held during the poll.
    pub modifiers: Modifiers,
}

/// Turns successive [`PointerSample`]s into press, release and move events.
#[derive(Debug, Default, Clone)]
pub struct PointerTracker {
    buttons_down: [bool; 3],
    last_position: Option<(i32, i32)>,
}

impl PointerTracker {
    /// Create a tracker with all buttons released and no known position.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed one sample and return the events it produced, in image coordinates.
    ///
    /// A move is reported whenever the image pixel under the pointer changes;
    /// the first sample only records the position. Buttons report an event on
    /// each press and release edge, never while held. A zero-sized window yields
    /// nothing and leaves the tracker unchanged.
    pub fn advance(
        &mut self,
        sample: PointerSample,
        image_size: (usize, usize),
    ) -> Vec<PointerInput> {
        let Some((x, y)) = window_to_image(sample.mouse, sample.window_size, image_size) else {
            return Vec::new();
        };
        let modifiers = sample.modifiers;
        let mut events = Vec::new();

        if self.last_position.is_some_and(|last| last != (x, y)) {
            events.push(PointerInput {
                event: PointerEvent::Move,
                x,
                y,
                modifiers,
            });
        }
        self.last_position = Some((x, y));

        for ((slot, pressed), (_, down, up)) in
            self.buttons_down.iter_mut().zip(sample.buttons).zip(BUTTONS)
        {
            if pressed != *slot {
                *slot = pressed;
                events.push(PointerInput {
                    event: if pressed { down } else { up },
                    x,
                    y,
                    modifiers,
                });
            }
        }
        events
    }
}

/// Map a window position to image pixel coordinates.
///
/// The window may be resized independently of the image, so each axis is scaled
/// by `image / window`.
#[allow(clippy::cast_possible_truncation, clippy::cast_precision_loss)]
#[must_use]
pub fn window_to_image(
    mouse: (f32, f32),
    window_size: (usize, usize),
    image_size: (usize, usize),
) -> Option<(i32, i32)> {
    let (win_w, win_h) = window_size;
    if win_w == 0 || win_h == 0 {
        return None;
    }
    let x = mouse.0 * image_size.0 as f32 / win_w as f32;
    let y = mouse.1 * image_size.1 as f32 / win_h as f32;
    Some((x.floor() as i32, y.floor() as i32))
}

#[cfg(test)]
mod tests {
    use super::*;

    const LEFT: [bool; 3] = [true, false, false];
    const MIDDLE: [bool; 3] = [false, true, false];
    const NONE: [bool; 3] = [false; 3];

    fn sample(mouse: (f32, f32), buttons: [bool; 3]) -> PointerSample {
        PointerSample {
            mouse,
            buttons,
            window_size: (640, 480),
            modifiers: Modifiers::NONE,
        }
    }

    fn events(inputs: &[PointerInput]) -> Vec<PointerEvent> {
        inputs.iter().map(|i| i.event).collect()
    }

    #[test]
    fn test_press_and_release_edges() {
        let mut tracker = PointerTracker::new();
        let image = (640, 480);

        assert!(tracker.advance(sample((10.0, 20.0), NONE), image).is_empty());

        let pressed = tracker.advance(sample((10.0, 20.0), LEFT), image);
        assert_eq!(events(&pressed), vec![PointerEvent::PrimaryDown]);
        assert_eq!((pressed[0].x, pressed[0].y), (10, 20));

        let released = tracker.advance(sample((10.0, 20.0), NONE), image);
        assert_eq!(events(&released), vec![PointerEvent::PrimaryUp]);
    }

    #[test]
    fn test_held_button_reports_once() {
        let mut tracker = PointerTracker::new();
        let image = (640, 480);

        assert_eq!(
            events(&tracker.advance(sample((5.0, 5.0), MIDDLE), image)),
            vec![PointerEvent::MiddleDown]
        );
        assert!(tracker.advance(sample((5.0, 5.0), MIDDLE), image).is_empty());
        assert!(tracker.advance(sample((5.0, 5.0), MIDDLE), image).is_empty());
        assert_eq!(
            events(&tracker.advance(sample((5.0, 5.0), NONE), image)),
            vec![PointerEvent::MiddleUp]
        );
    }

    #[test]
    fn test_move_then_press_in_one_sample() {
        let mut tracker = PointerTracker::new();
        let image = (640, 480);
        tracker.advance(sample((10.0, 10.0), NONE), image);

        let moved = tracker.advance(sample((30.5, 40.9), NONE), image);
        assert_eq!(events(&moved), vec![PointerEvent::Move]);
        assert_eq!((moved[0].x, moved[0].y), (30, 40));

        // Sub-pixel motion stays on the same image pixel.
        assert!(tracker.advance(sample((30.9, 40.1), NONE), image).is_empty());

        let both = tracker.advance(sample((50.0, 60.0), [false, false, true]), image);
        assert_eq!(
            events(&both),
            vec![PointerEvent::Move, PointerEvent::SecondaryDown]
        );
        assert!(both.iter().all(|i| (i.x, i.y) == (50, 60)));
    }

    #[test]
    fn test_resized_window_scales_to_image() {
        let mut tracker = PointerTracker::new();
        let resized = PointerSample {
            mouse: (400.0, 300.0),
            buttons: LEFT,
            window_size: (1280, 960),
            modifiers: Modifiers::CTRL | Modifiers::SHIFT,
        };

        let pressed = tracker.advance(resized, (640, 480));
        assert_eq!(pressed.len(), 1);
        assert_eq!((pressed[0].x, pressed[0].y), (200, 150));
        assert!(pressed[0].modifiers.contains(Modifiers::CTRL));
        assert!(pressed[0].modifiers.contains(Modifiers::SHIFT));

        assert_eq!(
            window_to_image((639.0, 479.0), (320, 240), (160, 120)),
            Some((319, 239))
        );
    }

    #[test]
    fn test_zero_sized_window_is_ignored() {
        let mut tracker = PointerTracker::new();
        let minimized = PointerSample {
            window_size: (0, 0),
            ..sample((10.0, 10.0), LEFT)
        };
        assert!(tracker.advance(minimized, (640, 480)).is_empty());
        assert_eq!(window_to_image((1.0, 1.0), (0, 480), (640, 480)), None);

        // The press is still reported once the window has a size again.
        assert_eq!(
            events(&tracker.advance(sample((10.0, 10.0), LEFT), (640, 480))),
            vec![PointerEvent::PrimaryDown]
        );
    }
}
