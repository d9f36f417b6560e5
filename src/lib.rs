// Ultralytics 🚀 AGPL-3.0 License - https://ultralytics.com/license

#![allow(clippy::multiple_crate_versions)]
#![cfg_attr(docsrs, feature(doc_cfg))]

//! # Tracking Overlay
//!
//! Overlay rendering and click routing for real-time person-tracking views.
//!
//! The tracking pipeline reports, per frame, a bounding box, a center of mass (in
//! pixels and in world coordinates), optional skeleton joints, an optional pointing
//! direction and optional segmentation masks for every person. This crate draws
//! all of that onto the frame and remembers where each person was drawn, so a
//! click in the viewer can be turned back into "the user picked person 3".
//!
//! ## Quick Start
//!
//! ```no_run
//! use imageproc::point::Point;
//! use imageproc::rect::Rect;
//! use tracking_overlay::{
//!     FontLabelPainter, Modifiers, PointerEvent, SegmentationType, TrackingRenderer,
//! };
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let mut renderer = TrackingRenderer::new(FontLabelPainter::load_default()?);
//!     renderer.set_segmentation_type(SegmentationType::WinStyle);
//!     renderer.set_person_selected_handler(|person, kind| {
//!         println!("person {} selected for {kind:?}", person.id);
//!     });
//!
//!     let mut frame = image::RgbImage::new(640, 480);
//!
//!     // Once per frame
//!     renderer.reset();
//!     renderer.draw_person(
//!         &mut frame,
//!         1,
//!         Rect::at(100, 80).of_size(120, 300),
//!         Point::new(160, 230),
//!         [0.12, -0.05, 1.874],
//!     );
//!
//!     // Later, from the viewer's event loop
//!     renderer.handle_pointer_event(PointerEvent::PrimaryDown, 150, 200, Modifiers::NONE);
//!     Ok(())
//! }
//! ```
//!
//! ## CLI Usage
//!
//! ```bash
//! # Draw a scene description onto a frame
//! tracking-overlay render --image frame.png --scene scene.json
//!
//! # Black out the background and show the result; click persons to select them
//! tracking-overlay render -i frame.png -s scene.json --segmentation black --show
//! ```
//!
//! ## Module Overview
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`renderer`] | [`TrackingRenderer`]: draw operations and click routing |
//! | [`registry`] | [`FrameRegistry`] and [`PersonRecord`] for hit-testing |
//! | [`segmentation`] | Segmentation styles ([`SegmentationType`]) |
//! | [`label`] | Text labels ([`LabelPainter`], [`FontLabelPainter`]) |
//! | [`draw`] | Thick rectangles, markers and arrows |
//! | [`input`] | Pointer events, modifiers and selection kinds |
//! | [`scene`] | JSON scene descriptions |
//! | [`config`] | [`RendererConfig`] |
//! | [`error`] | Error types ([`OverlayError`], [`Result`]) |
//!
//! ## Feature Flags
//!
//! | Feature | Description |
//! |---------|-------------|
//! | `annotate` | Default font download (default) |
//! | `visualize` | Real-time window display with pointer input (default) |

// Modules
pub mod cli;
pub mod config;
pub mod draw;
pub mod error;
pub mod input;
pub mod io;
pub mod label;
pub mod registry;
pub mod renderer;
pub mod scene;
pub mod segmentation;
pub mod visualizer;

// Re-export main types for convenience
pub use config::RendererConfig;
pub use error::{OverlayError, Result};
pub use input::{Modifiers, PointerEvent, PointerInput, SelectKind};
pub use label::{FontLabelPainter, LabelPainter};
pub use registry::{FrameRegistry, PersonRecord};
pub use renderer::{PersonSelectedHandler, TrackingRenderer};
pub use scene::{Scene, ScenePerson, ScenePointing};
pub use segmentation::{
    BlackSegmentation, SegmentationRenderer, SegmentationType, WinStyleSegmentation,
};
pub use visualizer::Color;

/// Library version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name.
pub const NAME: &str = env!("CARGO_PKG_NAME");
