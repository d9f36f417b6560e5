// Ultralytics 🚀 AGPL-3.0 License - https://ultralytics.com/license

//! Scene descriptions: one frame's tracking output as JSON.
//!
//! A scene lists the persons the tracker reported for a frame plus optional
//! segmentation mask files, and can replay itself onto a [`TrackingRenderer`].
//!
//! ```json
//! {
//!   "persons": [
//!     {
//!       "id": 1,
//!       "bbox": [40, 30, 120, 260],
//!       "center_of_mass": [100, 160],
//!       "center_of_mass_world": [0.12, -0.05, 1.874],
//!       "recognition_id": 3,
//!       "skeleton": [[80, 60], [120, 60]],
//!       "pointing": { "origin": [150, 120], "direction": [0.6, -0.2] }
//!     }
//!   ],
//!   "masks": ["person1_mask.png"]
//! }
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use image::{GrayImage, RgbImage};
use imageproc::point::Point;
use imageproc::rect::Rect;
use serde::{Deserialize, Serialize};

use crate::error::{OverlayError, Result};
use crate::io::load_mask;
use crate::label::LabelPainter;
use crate::renderer::TrackingRenderer;

/// Largest absolute pixel coordinate a scene may use.
///
/// Keeps box extents, label anchors and marker arithmetic far from `i32` overflow.
pub const MAX_COORDINATE: i32 = 1 << 20;

fn check_point(id: i32, what: &str, [x, y]: [i32; 2]) -> Result<()> {
    if x.unsigned_abs() > MAX_COORDINATE.unsigned_abs()
        || y.unsigned_abs() > MAX_COORDINATE.unsigned_abs()
    {
        return Err(OverlayError::SceneError(format!(
            "person {id} has {what} ({x}, {y}) outside +/-{MAX_COORDINATE}"
        )));
    }
    Ok(())
}

/// Pointing gesture of a person.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScenePointing {
    /// Arrow origin `[x, y]` in pixels.
    pub origin: [i32; 2],
    /// Direction `[dx, dy]`, scaled by the renderer's pointing scale.
    pub direction: [f32; 2],
}

/// One tracked person in a scene.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScenePerson {
    /// Tracker person id.
    pub id: i32,
    /// Bounding box `[x, y, width, height]` in pixels.
    pub bbox: [i32; 4],
    /// Center of mass `[x, y]` in pixels.
    pub center_of_mass: [i32; 2],
    /// Center of mass `[x, y, z]` in world coordinates.
    pub center_of_mass_world: [f32; 3],
    /// Recognition id, if the person has been recognized.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recognition_id: Option<u32>,
    /// Skeleton joints `[[x, y], ...]` in pixels.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub skeleton: Vec<[i32; 2]>,
    /// Pointing gesture.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pointing: Option<ScenePointing>,
}

impl ScenePerson {
    /// Bounding box as a [`Rect`].
    ///
    /// # Errors
    ///
    /// Returns an error if the width or height is not positive, or if any corner
    /// lies further than [`MAX_COORDINATE`] from the origin.
    #[allow(clippy::cast_sign_loss)]
    pub fn rect(&self) -> Result<Rect> {
        let [x, y, w, h] = self.bbox;
        if w <= 0 || h <= 0 {
            return Err(OverlayError::SceneError(format!(
                "person {} has an empty bounding box {w}x{h}",
                self.id
            )));
        }
        let (Some(x2), Some(y2)) = (x.checked_add(w), y.checked_add(h)) else {
            return Err(OverlayError::SceneError(format!(
                "person {} has a bounding box {x},{y} {w}x{h} that overflows",
                self.id
            )));
        };
        check_point(self.id, "bounding box corner", [x, y])?;
        check_point(self.id, "bounding box corner", [x2, y2])?;
        Ok(Rect::at(x, y).of_size(w as u32, h as u32))
    }

    /// Check every coordinate of the person against [`MAX_COORDINATE`].
    ///
    /// # Errors
    ///
    /// Returns a [`OverlayError::SceneError`] naming the first offending value.
    pub fn validate(&self) -> Result<()> {
        self.rect()?;
        check_point(self.id, "center of mass", self.center_of_mass)?;
        for &joint in &self.skeleton {
            check_point(self.id, "skeleton joint", joint)?;
        }
        if let Some(pointing) = self.pointing {
            check_point(self.id, "pointing origin", pointing.origin)?;
        }
        Ok(())
    }
}

/// One frame's worth of tracking output.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Scene {
    /// Tracked persons, drawn in order.
    #[serde(default)]
    pub persons: Vec<ScenePerson>,
    /// Mask image paths, relative to the scene file.
    #[serde(default)]
    pub masks: Vec<PathBuf>,
}

impl Scene {
    /// Parse a scene from a JSON string.
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON is malformed or a bounding box is empty.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let scene: Self = serde_json::from_str(json)?;
        scene.validate()?;
        Ok(scene)
    }

    /// Load a scene file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let json = fs::read_to_string(path).map_err(|e| {
            OverlayError::IoError(format!("Failed to read scene {}: {e}", path.display()))
        })?;
        Self::from_json_str(&json)
    }

    fn validate(&self) -> Result<()> {
        self.persons.iter().try_for_each(ScenePerson::validate)
    }

    /// Load the scene's masks, resolving relative paths against `base_dir`.
    ///
    /// # Errors
    ///
    /// Returns an error if any mask cannot be loaded.
    pub fn load_masks(&self, base_dir: &Path) -> Result<Vec<GrayImage>> {
        self.masks
            .iter()
            .map(|p| {
                if p.is_absolute() {
                    load_mask(p)
                } else {
                    load_mask(base_dir.join(p))
                }
            })
            .collect()
    }

    /// Replay the scene onto `image` as a fresh frame.
    ///
    /// Resets the renderer, applies recognition ids from the scene, draws the
    /// segmentation underneath, then each person with its skeleton and pointing
    /// arrow.
    ///
    /// # Errors
    ///
    /// Returns an error if a person fails [`ScenePerson::validate`]; nothing of that
    /// person is drawn.
    pub fn render<L: LabelPainter>(
        &self,
        renderer: &mut TrackingRenderer<L>,
        image: &mut RgbImage,
        masks: &[GrayImage],
    ) -> Result<()> {
        renderer.reset();
        renderer.draw_segmentation(image, masks);

        for person in &self.persons {
            person.validate()?;
            let rect = person.rect()?;
            if let Some(rid) = person.recognition_id {
                renderer.set_recognition_id(person.id, rid);
            }

            let [cx, cy] = person.center_of_mass;
            renderer.draw_person(
                image,
                person.id,
                rect,
                Point::new(cx, cy),
                person.center_of_mass_world,
            );

            let joints: Vec<Point<i32>> =
                person.skeleton.iter().map(|&[x, y]| Point::new(x, y)).collect();
            renderer.draw_skeleton(image, &joints);

            if let Some(pointing) = person.pointing {
                let [ox, oy] = pointing.origin;
                let [dx, dy] = pointing.direction;
                renderer.draw_pointing_direction(image, Point::new(ox, oy), Point::new(dx, dy));
            }
        }
        Ok(())
    }
}
