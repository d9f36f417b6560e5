// Ultralytics 🚀 AGPL-3.0 License - https://ultralytics.com/license

//! Renderer configuration.
//!
//! This module defines the [`RendererConfig`] struct, which controls colors, stroke
//! widths, marker sizes and label placement for the overlay renderer.

use crate::visualizer::Color;

/// Configuration for the tracking overlay renderer.
///
/// Uses a builder pattern for convenient construction. The defaults reproduce the
/// classic tracking-sample look: yellow person boxes, red center-of-mass dots,
/// green skeleton joints and a green pointing arrow.
///
/// # Example
///
/// ```rust
/// use tracking_overlay::RendererConfig;
///
/// let config = RendererConfig::new()
///     .with_box_thickness(3)
///     .with_pointing_scale(250.0)
///     .with_id_label_scale(0.5);
/// ```
#[derive(Debug, Clone)]
pub struct RendererConfig {
    /// Person bounding box outline color.
    pub box_color: Color,
    /// Person bounding box outline thickness in pixels.
    pub box_thickness: u32,
    /// Center-of-mass marker color.
    pub center_of_mass_color: Color,
    /// Center-of-mass marker radius in pixels.
    pub center_of_mass_radius: i32,
    /// Skeleton joint marker color.
    pub skeleton_color: Color,
    /// Skeleton joint marker radius in pixels.
    pub skeleton_radius: i32,
    /// Pointing origin marker color.
    pub pointing_origin_color: Color,
    /// Pointing origin marker radius in pixels.
    pub pointing_origin_radius: i32,
    /// Pointing arrow color.
    pub arrow_color: Color,
    /// Pointing arrow thickness in pixels.
    pub arrow_thickness: u32,
    /// Pixels per unit of the pointing direction vector.
    pub pointing_scale: f32,
    /// Arrowhead length as a fraction of the arrow length.
    pub arrow_tip_fraction: f32,
    /// Offset of the ID label from the bounding box top-left corner.
    pub label_offset: (i32, i32),
    /// Scale of the ID / RID labels.
    pub id_label_scale: f32,
    /// Scale of the world-coordinate labels.
    pub world_label_scale: f32,
}

impl Default for RendererConfig {
    fn default() -> Self {
        Self {
            box_color: Color::YELLOW,
            box_thickness: 2,
            center_of_mass_color: Color::RED,
            center_of_mass_radius: 2,
            skeleton_color: Color::GREEN,
            skeleton_radius: 3,
            pointing_origin_color: Color::BLUE,
            pointing_origin_radius: 3,
            arrow_color: Color::GREEN,
            arrow_thickness: 2,
            pointing_scale: 400.0,
            arrow_tip_fraction: 0.15,
            label_offset: (5, 5),
            id_label_scale: 0.4,
            world_label_scale: 1.0,
        }
    }
}

impl RendererConfig {
    /// Create a new configuration with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the bounding box color.
    #[must_use]
    pub const fn with_box_color(mut self, color: Color) -> Self {
        self.box_color = color;
        self
    }

    /// Set the bounding box outline thickness.
    ///
    /// A thickness of `0` is treated as `1`.
    #[must_use]
    pub const fn with_box_thickness(mut self, thickness: u32) -> Self {
        self.box_thickness = thickness;
        self
    }

    /// Set the skeleton joint color.
    #[must_use]
    pub const fn with_skeleton_color(mut self, color: Color) -> Self {
        self.skeleton_color = color;
        self
    }

    /// Set the pointing arrow color.
    #[must_use]
    pub const fn with_arrow_color(mut self, color: Color) -> Self {
        self.arrow_color = color;
        self
    }

    /// Set how many pixels one unit of pointing direction spans.
    ///
    /// # Arguments
    ///
    /// * `scale` - Pixels per unit direction vector.
    ///
    /// # Returns
    ///
    /// * The modified `RendererConfig`.
    #[must_use]
    pub const fn with_pointing_scale(mut self, scale: f32) -> Self {
        self.pointing_scale = scale;
        self
    }

    /// Set the arrowhead length as a fraction of the arrow length.
    #[must_use]
    pub const fn with_arrow_tip_fraction(mut self, fraction: f32) -> Self {
        self.arrow_tip_fraction = fraction;
        self
    }

    /// Set the ID / RID label scale.
    #[must_use]
    pub const fn with_id_label_scale(mut self, scale: f32) -> Self {
        self.id_label_scale = scale;
        self
    }

    /// Set the world-coordinate label scale.
    #[must_use]
    pub const fn with_world_label_scale(mut self, scale: f32) -> Self {
        self.world_label_scale = scale;
        self
    }

    /// Set the ID label offset from the bounding box corner.
    #[must_use]
    pub const fn with_label_offset(mut self, dx: i32, dy: i32) -> Self {
        self.label_offset = (dx, dy);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_default() {
        let config = RendererConfig::default();
        assert_eq!(config.box_color, Color::YELLOW);
        assert_eq!(config.box_thickness, 2);
        assert!((config.pointing_scale - 400.0).abs() < f32::EPSILON);
        assert!((config.arrow_tip_fraction - 0.15).abs() < f32::EPSILON);
        assert_eq!(config.label_offset, (5, 5));
    }

    #[test]
    fn test_config_builder() {
        let config = RendererConfig::new()
            .with_box_thickness(4)
            .with_pointing_scale(100.0)
            .with_id_label_scale(0.8)
            .with_label_offset(2, 3)
            .with_arrow_color(Color::RED);

        assert_eq!(config.box_thickness, 4);
        assert!((config.pointing_scale - 100.0).abs() < f32::EPSILON);
        assert!((config.id_label_scale - 0.8).abs() < f32::EPSILON);
        assert_eq!(config.label_offset, (2, 3));
        assert_eq!(config.arrow_color, Color::RED);
    }
}
