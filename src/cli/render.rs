// Ultralytics 🚀 AGPL-3.0 License - https://ultralytics.com/license

use std::path::{Path, PathBuf};
use std::process;
#[cfg(feature = "visualize")]
use std::time::Duration;

use crate::cli::args::RenderArgs;
use crate::io::{find_next_run_dir, load_frame, save_frame};
use crate::label::FontLabelPainter;
use crate::renderer::TrackingRenderer;
use crate::scene::Scene;
#[cfg(feature = "visualize")]
use crate::visualizer::Viewer;
use crate::{VERSION, error, section, success, verbose, warn};

/// Load the label font, falling back to text-less label boxes.
fn load_labels(font: Option<&str>) -> FontLabelPainter {
    let loaded = match font {
        Some(path) => FontLabelPainter::from_path(path),
        None => FontLabelPainter::load_default(),
    };
    loaded.unwrap_or_else(|e| {
        warn!("{e}. Labels will be drawn without text.");
        FontLabelPainter::without_font()
    })
}

/// Default output path: `runs/render/<image file name>`.
fn default_output(image: &Path) -> PathBuf {
    let name = image
        .file_name()
        .map_or_else(|| "frame.png".into(), ToOwned::to_owned);
    find_next_run_dir(Path::new("runs"), "render").join(name)
}

/// Render a scene onto a frame and save (and optionally show) the result.
#[allow(clippy::needless_pass_by_value)]
pub fn run_render(args: RenderArgs) {
    crate::cli::logging::set_verbose(args.verbose);
    section!("tracking-overlay {VERSION}");

    let image_path = PathBuf::from(&args.image);
    let scene_path = PathBuf::from(&args.scene);

    let mut frame = match load_frame(&image_path) {
        Ok(f) => f,
        Err(e) => {
            error!("{e}");
            process::exit(1);
        }
    };
    let scene = match Scene::from_path(&scene_path) {
        Ok(s) => s,
        Err(e) => {
            error!("{e}");
            process::exit(1);
        }
    };
    let base_dir = scene_path.parent().unwrap_or_else(|| Path::new("."));
    let masks = match scene.load_masks(base_dir) {
        Ok(m) => m,
        Err(e) => {
            error!("{e}");
            process::exit(1);
        }
    };
    verbose!(
        "{}x{} frame, {} persons, {} masks, segmentation: {}",
        frame.width(),
        frame.height(),
        scene.persons.len(),
        masks.len(),
        args.segmentation
    );

    let mut renderer = TrackingRenderer::new(load_labels(args.font.as_deref()));
    renderer.set_segmentation_type(args.segmentation);

    let original = frame.clone();
    if let Err(e) = scene.render(&mut renderer, &mut frame, &masks) {
        error!("{e}");
        process::exit(1);
    }

    let output = args
        .output
        .as_ref()
        .map_or_else(|| default_output(&image_path), PathBuf::from);
    if let Err(e) = save_frame(&frame, &output) {
        error!("{e}");
        process::exit(1);
    }
    success!("Results saved to {}", output.display());

    #[cfg(feature = "visualize")]
    if args.show {
        show(renderer, &scene, &original, &masks, frame);
    }
    #[cfg(not(feature = "visualize"))]
    {
        let _ = original;
        if args.show {
            warn!("--show requires the 'visualize' feature");
        }
    }
}

/// Display the rendered frame until closed, reporting clicked persons.
///
/// A primary click selects a person for recognition and assigns it the next free
/// recognition id; a middle click selects it for tracking.
#[cfg(feature = "visualize")]
fn show(
    mut renderer: TrackingRenderer,
    scene: &Scene,
    original: &image::RgbImage,
    masks: &[image::GrayImage],
    mut frame: image::RgbImage,
) {
    use std::sync::mpsc;

    use crate::input::SelectKind;

    let mut viewer = match Viewer::new(
        "tracking-overlay",
        frame.width() as usize,
        frame.height() as usize,
    ) {
        Ok(v) => v,
        Err(e) => {
            error!("{e}");
            return;
        }
    };

    let (tx, rx) = mpsc::channel();
    renderer.set_person_selected_handler(move |person, kind| {
        let _ = tx.send((*person, kind));
    });
    let mut next_rid = scene
        .persons
        .iter()
        .filter_map(|p| p.recognition_id)
        .max()
        .unwrap_or(0)
        + 1;

    loop {
        match viewer.update(&frame) {
            Ok(true) => {}
            Ok(false) => break,
            Err(e) => {
                error!("{e}");
                break;
            }
        }

        for input in viewer.take_pointer_events() {
            renderer.handle_pointer_input(input);
        }

        let mut redraw = false;
        for (person, kind) in rx.try_iter() {
            match kind {
                SelectKind::Recognition => {
                    let rid = person.recognition_id.unwrap_or_else(|| {
                        let rid = next_rid;
                        next_rid += 1;
                        rid
                    });
                    crate::info!("Person {} selected for recognition (RID {rid})", person.id);
                    renderer.set_recognition_id(person.id, rid);
                    redraw = true;
                }
                SelectKind::Tracking => {
                    crate::info!("Person {} selected for tracking", person.id);
                }
            }
        }

        if redraw {
            frame = original.clone();
            if let Err(e) = scene.render(&mut renderer, &mut frame, masks) {
                error!("{e}");
                break;
            }
        }

        if let Ok(false) = viewer.wait(Duration::from_millis(16)) {
            break;
        }
    }
}
