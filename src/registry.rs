// Ultralytics 🚀 AGPL-3.0 License - https://ultralytics.com/license

//! Per-frame person registry used for click hit-testing.
//!
//! The registry is rebuilt every frame: [`FrameRegistry::reset`] drops the previous
//! frame's records and rewinds the label cursor, then the renderer adds one
//! [`PersonRecord`] per drawn person. Recognition ids assigned by the application
//! are keyed by tracker id and outlive the reset, since the upstream tracker reuses
//! the same id for the same person across frames.

use std::collections::HashMap;

use imageproc::point::Point;
use imageproc::rect::Rect;

/// A person drawn in the current frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PersonRecord {
    /// Tracker-assigned person id.
    pub id: i32,
    /// Recognition id, `None` while the person is unrecognized.
    pub recognition_id: Option<u32>,
    /// Last drawn bounding box in image pixel coordinates.
    pub rect: Rect,
}

impl PersonRecord {
    /// Create a new record.
    #[must_use]
    pub const fn new(id: i32, recognition_id: Option<u32>, rect: Rect) -> Self {
        Self {
            id,
            recognition_id,
            rect,
        }
    }

    /// Check whether `point` lies inside the record's rectangle.
    ///
    /// Edges are inclusive: the rectangle covers columns `left()..=right()` and rows
    /// `top()..=bottom()`.
    #[must_use]
    pub fn contains(&self, point: Point<i32>) -> bool {
        point.x >= self.rect.left()
            && point.x <= self.rect.right()
            && point.y >= self.rect.top()
            && point.y <= self.rect.bottom()
    }
}

/// Frame-scoped collection of [`PersonRecord`]s.
#[derive(Debug, Default)]
pub struct FrameRegistry {
    records: Vec<PersonRecord>,
    recognition_ids: HashMap<i32, u32>,
    label_cursor: i32,
}

impl FrameRegistry {
    /// Create an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Drop all records of the previous frame and rewind the label cursor.
    pub fn reset(&mut self) {
        self.records.clear();
        self.label_cursor = 0;
    }

    /// Add a record for the current frame.
    ///
    /// A second record with the same id replaces the first one in place, so the
    /// last write wins while the original insertion position is kept.
    pub fn add(&mut self, record: PersonRecord) {
        match self.records.iter_mut().find(|r| r.id == record.id) {
            Some(existing) => *existing = record,
            None => self.records.push(record),
        }
    }

    /// Find the record whose rectangle contains `point`.
    ///
    /// When rectangles overlap, the record added first in the current frame wins.
    #[must_use]
    pub fn match_point(&self, point: Point<i32>) -> Option<&PersonRecord> {
        self.records.iter().find(|r| r.contains(point))
    }

    /// Look up the current-frame record for `id`.
    #[must_use]
    pub fn get(&self, id: i32) -> Option<&PersonRecord> {
        self.records.iter().find(|r| r.id == id)
    }

    /// Iterate over the current frame's records in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &PersonRecord> {
        self.records.iter()
    }

    /// Number of records in the current frame.
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Check if the current frame has no records.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Recognition id known for `id`, if any.
    ///
    /// A value stored on the current-frame record takes precedence over the
    /// application-assigned one. Zero is never a valid recognition id.
    #[must_use]
    pub fn recognition_id(&self, id: i32) -> Option<u32> {
        self.get(id)
            .and_then(|r| r.recognition_id)
            .or_else(|| self.recognition_ids.get(&id).copied())
            .filter(|&rid| rid > 0)
    }

    /// Assign a recognition id to a tracked person.
    ///
    /// The assignment survives [`FrameRegistry::reset`]. Any record already drawn for
    /// `id` in the current frame is updated as well.
    ///
    /// Assignments are never dropped on their own: the registry cannot tell a person
    /// who left the view from one who is briefly occluded. Callers that see many
    /// short-lived tracker ids should prune with
    /// [`FrameRegistry::retain_recognition_ids`].
    pub fn set_recognition_id(&mut self, id: i32, rid: u32) {
        if rid == 0 {
            self.clear_recognition_id(id);
            return;
        }
        self.recognition_ids.insert(id, rid);
        if let Some(record) = self.records.iter_mut().find(|r| r.id == id) {
            record.recognition_id = Some(rid);
        }
    }

    /// Forget the recognition id of a tracked person.
    pub fn clear_recognition_id(&mut self, id: i32) {
        self.recognition_ids.remove(&id);
        if let Some(record) = self.records.iter_mut().find(|r| r.id == id) {
            record.recognition_id = None;
        }
    }

    /// Forget every assigned recognition id.
    pub fn clear_recognition_ids(&mut self) {
        self.recognition_ids.clear();
        for record in &mut self.records {
            record.recognition_id = None;
        }
    }

    /// Keep only the recognition ids whose tracker id satisfies `keep`.
    ///
    /// Records of the current frame lose their recognition id when it is dropped.
    pub fn retain_recognition_ids<F>(&mut self, mut keep: F)
    where
        F: FnMut(i32) -> bool,
    {
        self.recognition_ids.retain(|&id, _| keep(id));
        for record in &mut self.records {
            if !self.recognition_ids.contains_key(&record.id) {
                record.recognition_id = None;
            }
        }
    }

    /// Number of tracker ids with an assigned recognition id.
    #[must_use]
    pub fn recognition_id_count(&self) -> usize {
        self.recognition_ids.len()
    }

    /// First row below the last drawn world-coordinate label.
    #[must_use]
    pub const fn label_cursor(&self) -> i32 {
        self.label_cursor
    }

    /// Move the label cursor to `row`.
    pub fn advance_label_cursor(&mut self, row: i32) {
        self.label_cursor = row;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(id: i32, x: i32, y: i32, w: u32, h: u32) -> PersonRecord {
        PersonRecord::new(id, None, Rect::at(x, y).of_size(w, h))
    }

    #[test]
    fn test_empty_registry_matches_nothing() {
        let registry = FrameRegistry::new();
        assert!(registry.is_empty());
        assert!(registry.match_point(Point::new(0, 0)).is_none());
    }

    #[test]
    fn test_match_inside_and_outside() {
        let mut registry = FrameRegistry::new();
        registry.add(record(1, 10, 10, 20, 40));
        registry.add(record(2, 100, 10, 20, 40));

        assert_eq!(registry.match_point(Point::new(15, 20)).map(|r| r.id), Some(1));
        assert_eq!(registry.match_point(Point::new(119, 49)).map(|r| r.id), Some(2));
        assert!(registry.match_point(Point::new(50, 20)).is_none());
        assert!(registry.match_point(Point::new(120, 20)).is_none());
    }

    #[test]
    fn test_edges_are_inclusive() {
        let mut registry = FrameRegistry::new();
        registry.add(record(3, 10, 10, 5, 5));

        assert!(registry.match_point(Point::new(10, 10)).is_some());
        assert!(registry.match_point(Point::new(14, 14)).is_some());
        assert!(registry.match_point(Point::new(15, 14)).is_none());
        assert!(registry.match_point(Point::new(9, 10)).is_none());
    }

    #[test]
    fn test_overlap_first_inserted_wins() {
        let mut registry = FrameRegistry::new();
        registry.add(record(7, 0, 0, 100, 100));
        registry.add(record(8, 50, 50, 100, 100));

        assert_eq!(registry.match_point(Point::new(75, 75)).map(|r| r.id), Some(7));
        assert_eq!(registry.match_point(Point::new(120, 120)).map(|r| r.id), Some(8));
    }

    #[test]
    fn test_add_same_id_overwrites_in_place() {
        let mut registry = FrameRegistry::new();
        registry.add(record(1, 0, 0, 10, 10));
        registry.add(record(2, 0, 0, 10, 10));
        registry.add(record(1, 200, 200, 10, 10));

        assert_eq!(registry.len(), 2);
        assert_eq!(registry.iter().map(|r| r.id).collect::<Vec<_>>(), vec![1, 2]);
        assert_eq!(registry.match_point(Point::new(5, 5)).map(|r| r.id), Some(2));
        assert_eq!(registry.get(1).map(|r| r.rect.left()), Some(200));
    }

    #[test]
    fn test_reset_clears_records_and_cursor() {
        let mut registry = FrameRegistry::new();
        registry.add(record(1, 0, 0, 10, 10));
        registry.advance_label_cursor(42);
        assert!(registry.match_point(Point::new(5, 5)).is_some());

        registry.reset();
        assert!(registry.match_point(Point::new(5, 5)).is_none());
        assert_eq!(registry.label_cursor(), 0);
    }

    #[test]
    fn test_recognition_id_survives_reset() {
        let mut registry = FrameRegistry::new();
        assert_eq!(registry.recognition_id(4), None);

        registry.set_recognition_id(4, 9);
        registry.reset();
        assert_eq!(registry.recognition_id(4), Some(9));

        registry.clear_recognition_id(4);
        assert_eq!(registry.recognition_id(4), None);
    }

    #[test]
    fn test_retain_prunes_departed_ids() {
        let mut registry = FrameRegistry::new();
        for id in 1..=5 {
            registry.set_recognition_id(id, 100 + id as u32);
        }
        registry.reset();
        registry.add(record(2, 0, 0, 10, 10));
        registry.add(record(4, 20, 0, 10, 10));
        registry.set_recognition_id(2, 102);
        assert_eq!(registry.recognition_id_count(), 5);

        let visible: Vec<i32> = registry.iter().map(|r| r.id).collect();
        registry.retain_recognition_ids(|id| visible.contains(&id) && id != 4);

        assert_eq!(registry.recognition_id_count(), 1);
        assert_eq!(registry.recognition_id(2), Some(102));
        assert_eq!(registry.recognition_id(1), None);
        assert_eq!(registry.recognition_id(4), None);
        assert_eq!(registry.get(2).and_then(|r| r.recognition_id), Some(102));
    }

    #[test]
    fn test_recognition_id_updates_current_record() {
        let mut registry = FrameRegistry::new();
        registry.add(record(5, 0, 0, 10, 10));
        registry.set_recognition_id(5, 3);
        assert_eq!(registry.get(5).and_then(|r| r.recognition_id), Some(3));

        registry.set_recognition_id(5, 0);
        assert_eq!(registry.recognition_id(5), None);

        registry.set_recognition_id(5, 6);
        registry.clear_recognition_ids();
        assert_eq!(registry.recognition_id(5), None);
    }
}
