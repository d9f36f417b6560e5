// Ultralytics 🚀 AGPL-3.0 License - https://ultralytics.com/license

//! Integration tests for the overlay library

use std::cell::RefCell;
use std::rc::Rc;

use image::{GrayImage, Luma, Rgb, RgbImage};
use imageproc::point::Point;
use imageproc::rect::Rect;
use tracking_overlay::{
    FontLabelPainter, LabelPainter, Modifiers, PointerEvent, RendererConfig, Scene,
    SegmentationType, SelectKind, TrackingRenderer,
};

/// Label painter that only remembers what it was asked to draw.
#[derive(Default)]
struct TextLog {
    texts: Vec<(String, Rect)>,
}

impl LabelPainter for TextLog {
    fn draw_label(&mut self, _: &mut RgbImage, text: &str, anchor: (i32, i32), _: f32) -> Rect {
        let rect = Rect::at(anchor.0, anchor.1).of_size(8 * text.len().max(1) as u32, 14);
        self.texts.push((text.to_string(), rect));
        rect
    }
}

fn frame() -> RgbImage {
    RgbImage::from_pixel(640, 480, Rgb([60, 60, 60]))
}

#[test]
fn test_click_selects_drawn_person() {
    let mut renderer = TrackingRenderer::new(TextLog::default());
    let selected: Rc<RefCell<Vec<(i32, SelectKind)>>> = Rc::default();
    let sink = Rc::clone(&selected);
    renderer.set_person_selected_handler(move |p, kind| sink.borrow_mut().push((p.id, kind)));

    let mut img = frame();
    renderer.reset();
    renderer.draw_person(
        &mut img,
        1,
        Rect::at(10, 10).of_size(100, 200),
        Point::new(60, 110),
        [0.0, 0.0, 1.0],
    );
    renderer.draw_person(
        &mut img,
        2,
        Rect::at(300, 50).of_size(100, 200),
        Point::new(350, 150),
        [1.0, 0.0, 2.0],
    );

    renderer.handle_pointer_event(PointerEvent::PrimaryDown, 350, 100, Modifiers::NONE);
    renderer.handle_pointer_event(PointerEvent::MiddleDown, 20, 20, Modifiers::CTRL);
    renderer.handle_pointer_event(PointerEvent::SecondaryDown, 20, 20, Modifiers::NONE);
    renderer.handle_pointer_event(PointerEvent::PrimaryDown, 600, 400, Modifiers::NONE);

    assert_eq!(
        *selected.borrow(),
        vec![(2, SelectKind::Recognition), (1, SelectKind::Tracking)]
    );
}

#[test]
fn test_recognition_label_follows_assignment_across_frames() {
    let mut renderer = TrackingRenderer::new(TextLog::default());
    let mut img = frame();
    let bbox = Rect::at(10, 10).of_size(100, 200);

    renderer.reset();
    renderer.draw_person(
        &mut img,
        3,
        bbox,
        Point::new(60, 110),
        [0.0; 3],
    );
    renderer.set_recognition_id(3, 7);
    renderer.reset();
    renderer.draw_person(
        &mut img,
        3,
        bbox,
        Point::new(60, 110),
        [0.0; 3],
    );

    let rids: Vec<&str> = renderer
        .label_painter()
        .texts
        .iter()
        .map(|(t, _)| t.as_str())
        .filter(|t| t.starts_with("RID"))
        .collect();
    assert_eq!(rids, vec!["RID: ?", "RID: 7"]);
}

#[test]
fn test_world_labels_do_not_overlap() {
    let mut renderer = TrackingRenderer::new(TextLog::default());
    let mut img = frame();
    renderer.reset();
    renderer.draw_person(
        &mut img,
        1,
        Rect::at(10, 10).of_size(50, 50),
        Point::new(30, 30),
        [1.0, 2.0, 3.0],
    );
    renderer.draw_person(
        &mut img,
        2,
        Rect::at(100, 10).of_size(50, 50),
        Point::new(130, 30),
        [4.0, 5.0, 6.0],
    );

    let world: Vec<Rect> = renderer
        .label_painter()
        .texts
        .iter()
        .filter(|(t, _)| t.contains(": ("))
        .map(|(_, r)| *r)
        .collect();
    assert_eq!(world.len(), 2);
    assert_eq!(renderer.label_painter().texts[2].0, "1: (1.000,2.000,3.000)");
    assert!(world[1].top() > world[0].bottom());
    assert!(world[1].top() > world[0].top());
}

#[test]
fn test_segmentation_styles_on_full_renderer() {
    let mut renderer = TrackingRenderer::with_config(
        FontLabelPainter::without_font(),
        RendererConfig::new().with_box_thickness(3),
    );
    let mask = GrayImage::from_fn(640, 480, |x, _| Luma([if x < 320 { 255 } else { 0 }]));

    let mut img = frame();
    renderer.draw_segmentation(&mut img, std::slice::from_ref(&mask));
    assert_eq!(img, frame());

    renderer.set_segmentation_type(SegmentationType::Black);
    renderer.draw_segmentation(&mut img, std::slice::from_ref(&mask));
    assert_eq!(*img.get_pixel(100, 100), Rgb([60, 60, 60]));
    assert_eq!(*img.get_pixel(500, 100), Rgb([0, 0, 0]));

    renderer.set_segmentation_type(SegmentationType::WinStyle);
    let mut img = frame();
    renderer.draw_segmentation(&mut img, std::slice::from_ref(&mask));
    assert_ne!(*img.get_pixel(100, 100), Rgb([60, 60, 60]));
    assert_eq!(*img.get_pixel(500, 100), Rgb([60, 60, 60]));
}

#[test]
fn test_scene_round_trip_through_renderer() {
    let json = r#"{
        "persons": [
            { "id": 11, "bbox": [20, 20, 80, 160], "center_of_mass": [60, 100],
              "center_of_mass_world": [0.5, 0.1, 2.0],
              "skeleton": [[40, 40], [80, 40], [60, 90]] }
        ]
    }"#;
    let scene = Scene::from_json_str(json).unwrap();
    let mut renderer = TrackingRenderer::new(TextLog::default());
    let mut img = frame();
    scene.render(&mut renderer, &mut img, &[]).unwrap();

    assert_eq!(*img.get_pixel(20, 20), Rgb([255, 255, 0]));
    assert_eq!(*img.get_pixel(80, 40), Rgb([0, 255, 0]));
    assert_eq!(
        renderer.registry().match_point(Point::new(50, 150)).map(|p| p.id),
        Some(11)
    );
}
