// Ultralytics 🚀 AGPL-3.0 License - https://ultralytics.com/license

//! Tracking overlay renderer.
//!
//! [`TrackingRenderer`] draws everything the tracking view shows for a frame and
//! remembers where each person was drawn, so a later click can be mapped back to
//! the person under the pointer.
//!
//! Call [`TrackingRenderer::reset`] once per frame before drawing it.

use image::{GrayImage, Rgb, RgbImage};
use imageproc::point::Point;
use imageproc::rect::Rect;

use crate::config::RendererConfig;
use crate::draw::{arrow_end, draw_arrowed_line_mut, draw_marker_mut, draw_thick_rect_mut};
use crate::input::{Modifiers, PointerEvent, PointerInput, SelectKind};
use crate::label::{FontLabelPainter, LabelPainter};
use crate::registry::{FrameRegistry, PersonRecord};
use crate::segmentation::{SegmentationRenderer, SegmentationType};

/// Callback invoked when the user clicks on a person.
pub type PersonSelectedHandler = Box<dyn FnMut(&PersonRecord, SelectKind)>;

/// Format a world-space center of mass as `"{id}: (x,y,z)"` with 3 decimals.
#[must_use]
pub fn format_world_label(id: i32, world: [f32; 3]) -> String {
    format!("{id}: ({:.3},{:.3},{:.3})", world[0], world[1], world[2])
}

/// Format the recognition id label, `"RID: ?"` when unknown.
#[must_use]
pub fn format_recognition_label(rid: Option<u32>) -> String {
    rid.map_or_else(|| "RID: ?".to_string(), |rid| format!("RID: {rid}"))
}

/// Draws person overlays and routes clicks to the person under the pointer.
pub struct TrackingRenderer<L: LabelPainter = FontLabelPainter> {
    config: RendererConfig,
    labels: L,
    registry: FrameRegistry,
    segmentation: Option<Box<dyn SegmentationRenderer>>,
    segmentation_type: SegmentationType,
    on_person_selected: Option<PersonSelectedHandler>,
}

impl<L: LabelPainter> TrackingRenderer<L> {
    /// Create a renderer with the default configuration.
    ///
    /// # Arguments
    ///
    /// * `labels` - Painter used for all text labels.
    pub fn new(labels: L) -> Self {
        Self::with_config(labels, RendererConfig::default())
    }

    /// Create a renderer with a custom configuration.
    pub fn with_config(labels: L, config: RendererConfig) -> Self {
        Self {
            config,
            labels,
            registry: FrameRegistry::new(),
            segmentation: None,
            segmentation_type: SegmentationType::None,
            on_person_selected: None,
        }
    }

    /// Get the renderer configuration.
    pub const fn config(&self) -> &RendererConfig {
        &self.config
    }

    /// Get the label painter.
    pub const fn label_painter(&self) -> &L {
        &self.labels
    }

    /// Get the current frame's person registry.
    pub const fn registry(&self) -> &FrameRegistry {
        &self.registry
    }

    /// Start a new frame: forget drawn persons and rewind the label cursor.
    pub fn reset(&mut self) {
        self.registry.reset();
    }

    /// Draw one tracked person and register it for hit-testing.
    ///
    /// Draws the bounding box, the `ID` and `RID` labels at its top-left corner, a
    /// dot at the center of mass, and the world-space center of mass in the
    /// top-left corner of the frame, stacked below the previous person's line.
    ///
    /// # Arguments
    ///
    /// * `image` - Frame to draw on.
    /// * `id` - Tracker person id.
    /// * `bbox` - Person bounding box in pixels.
    /// * `center_of_mass` - Center of mass in pixels.
    /// * `center_of_mass_world` - Center of mass in world coordinates.
    pub fn draw_person(
        &mut self,
        image: &mut RgbImage,
        id: i32,
        bbox: Rect,
        center_of_mass: Point<i32>,
        center_of_mass_world: [f32; 3],
    ) {
        let cfg = &self.config;
        draw_thick_rect_mut(image, bbox, Rgb::from(cfg.box_color), cfg.box_thickness);

        let (dx, dy) = cfg.label_offset;
        let anchor = (bbox.left().saturating_add(dx), bbox.top().saturating_add(dy));
        let id_rect = self
            .labels
            .draw_label(image, &format!("ID: {id}"), anchor, cfg.id_label_scale);

        let recognition_id = self.registry.recognition_id(id);
        #[allow(clippy::cast_possible_wrap)]
        let rid_anchor = (anchor.0, anchor.1.saturating_add(id_rect.height() as i32));
        self.labels.draw_label(
            image,
            &format_recognition_label(recognition_id),
            rid_anchor,
            cfg.id_label_scale,
        );

        draw_marker_mut(
            image,
            center_of_mass,
            cfg.center_of_mass_radius,
            Rgb::from(cfg.center_of_mass_color),
        );

        let world_rect = self.labels.draw_label(
            image,
            &format_world_label(id, center_of_mass_world),
            (0, self.registry.label_cursor()),
            cfg.world_label_scale,
        );
        #[allow(clippy::cast_possible_wrap)]
        let below = world_rect.top().saturating_add(world_rect.height() as i32);
        self.registry.advance_label_cursor(below);

        self.registry.add(PersonRecord::new(id, recognition_id, bbox));
    }

    /// Draw a marker at each skeleton joint.
    pub fn draw_skeleton(&self, image: &mut RgbImage, points: &[Point<i32>]) {
        let color = Rgb::from(self.config.skeleton_color);
        for &point in points {
            draw_marker_mut(image, point, self.config.skeleton_radius, color);
        }
    }

    /// Draw the pointing origin and an arrow along `direction`.
    ///
    /// The arrow ends at `origin + pointing_scale * direction`; `direction` is used
    /// as given, without normalization.
    #[allow(clippy::cast_precision_loss)]
    pub fn draw_pointing_direction(
        &self,
        image: &mut RgbImage,
        origin: Point<i32>,
        direction: Point<f32>,
    ) {
        let cfg = &self.config;
        draw_marker_mut(
            image,
            origin,
            cfg.pointing_origin_radius,
            Rgb::from(cfg.pointing_origin_color),
        );
        draw_arrowed_line_mut(
            image,
            (origin.x as f32, origin.y as f32),
            arrow_end(origin, direction, cfg.pointing_scale),
            Rgb::from(cfg.arrow_color),
            cfg.arrow_thickness,
            cfg.arrow_tip_fraction,
        );
    }

    /// Composite person masks using the active segmentation style.
    ///
    /// Does nothing while the style is [`SegmentationType::None`].
    pub fn draw_segmentation(&self, image: &mut RgbImage, masks: &[GrayImage]) {
        if let Some(ref renderer) = self.segmentation {
            renderer.render(image, masks);
        }
    }

    /// Switch the segmentation style, dropping the previous one.
    pub fn set_segmentation_type(&mut self, kind: SegmentationType) {
        self.segmentation = kind.renderer();
        self.segmentation_type = kind;
    }

    /// Get the active segmentation style.
    pub const fn segmentation_type(&self) -> SegmentationType {
        self.segmentation_type
    }

    /// Register the callback invoked when a person is clicked, replacing any
    /// previous one.
    pub fn set_person_selected_handler<F>(&mut self, handler: F)
    where
        F: FnMut(&PersonRecord, SelectKind) + 'static,
    {
        self.on_person_selected = Some(Box::new(handler));
    }

    /// Remove the person-selected callback.
    pub fn clear_person_selected_handler(&mut self) {
        self.on_person_selected = None;
    }

    /// Route a pointer event to the person-selected callback.
    ///
    /// A primary press selects the person under `(x, y)` for recognition, a middle
    /// press selects it for tracking. Anything else, a miss, or a missing callback
    /// is ignored.
    ///
    /// # Returns
    ///
    /// * The selected person id and selection kind, if the callback fired.
    pub fn handle_pointer_event(
        &mut self,
        event: PointerEvent,
        x: i32,
        y: i32,
        _modifiers: Modifiers,
    ) -> Option<(i32, SelectKind)> {
        let handler = self.on_person_selected.as_mut()?;
        let kind = SelectKind::from_event(event)?;
        let record = self.registry.match_point(Point::new(x, y))?;
        handler(record, kind);
        Some((record.id, kind))
    }

    /// Route a [`PointerInput`] reported by a display surface.
    pub fn handle_pointer_input(&mut self, input: PointerInput) -> Option<(i32, SelectKind)> {
        self.handle_pointer_event(input.event, input.x, input.y, input.modifiers)
    }

    /// Assign a recognition id to a tracked person; shown from the next draw on.
    pub fn set_recognition_id(&mut self, id: i32, rid: u32) {
        self.registry.set_recognition_id(id, rid);
    }

    /// Forget the recognition id of a tracked person.
    pub fn clear_recognition_id(&mut self, id: i32) {
        self.registry.clear_recognition_id(id);
    }

    /// Forget every assigned recognition id.
    pub fn clear_recognition_ids(&mut self) {
        self.registry.clear_recognition_ids();
    }

    /// Keep only the recognition ids whose tracker id satisfies `keep`.
    pub fn retain_recognition_ids<F: FnMut(i32) -> bool>(&mut self, keep: F) {
        self.registry.retain_recognition_ids(keep);
    }
}
