// Ultralytics 🚀 AGPL-3.0 License - https://ultralytics.com/license

//! Example script drawing a synthetic tracking frame with the library API.
//!
//! This example covers:
//! 1. Drawing persons, skeletons and a pointing arrow directly.
//! 2. Routing a simulated click back to the person under it.

use imageproc::point::Point;
use imageproc::rect::Rect;
use tracking_overlay::io::save_frame;
use tracking_overlay::{
    FontLabelPainter, Modifiers, PointerEvent, Result, SegmentationType, TrackingRenderer,
};

fn main() -> Result<()> {
    // 1. Labels: use the default font if it can be fetched, boxes only otherwise
    let labels = FontLabelPainter::load_default().unwrap_or_else(|e| {
        println!("No font available ({e}), drawing label boxes only");
        FontLabelPainter::without_font()
    });
    let mut renderer = TrackingRenderer::new(labels);
    renderer.set_segmentation_type(SegmentationType::Black);
    renderer.set_person_selected_handler(|person, kind| {
        println!("Selected person {} ({kind:?})", person.id);
    });

    // 2. One frame with two persons
    let mut frame = image::RgbImage::from_pixel(640, 480, image::Rgb([90, 90, 90]));
    let mask = image::GrayImage::from_fn(640, 480, |x, y| {
        let inside = (100..220).contains(&x) && (80..400).contains(&y)
            || (380..500).contains(&x) && (60..420).contains(&y);
        image::Luma([if inside { 255 } else { 0 }])
    });

    renderer.reset();
    renderer.draw_segmentation(&mut frame, &[mask]);
    renderer.draw_person(
        &mut frame,
        1,
        Rect::at(100, 80).of_size(120, 320),
        Point::new(160, 240),
        [-0.42, 0.05, 1.874],
    );
    renderer.draw_skeleton(
        &mut frame,
        &[Point::new(160, 110), Point::new(130, 170), Point::new(190, 170)],
    );
    renderer.draw_person(
        &mut frame,
        2,
        Rect::at(380, 60).of_size(120, 360),
        Point::new(440, 240),
        [0.61, 0.02, 2.310],
    );
    renderer.draw_pointing_direction(&mut frame, Point::new(470, 150), Point::new(-0.4, 0.1));

    // 3. A click on the second person
    renderer.handle_pointer_event(PointerEvent::PrimaryDown, 420, 200, Modifiers::NONE);

    save_frame(&frame, "runs/demo/frame.png")?;
    println!("Saved runs/demo/frame.png");
    Ok(())
}
