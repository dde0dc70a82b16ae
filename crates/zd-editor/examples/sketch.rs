//! Replay a scripted drawing session and write the result as a PNG.
//!
//! ```text
//! RUST_LOG=debug cargo run -p zd-editor --example sketch [out-dir]
//! ```

use std::env;
use std::fs;
use std::path::PathBuf;
use zd_core::{Background, BrushConfig, BrushType, Color};
use zd_editor::{DrawingCanvas, InputEvent, SurfaceRect};

const WIDTH: f64 = 480.0;
const HEIGHT: f64 = 320.0;

fn main() {
    env_logger::init();

    let out_dir = env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("."));

    let mut canvas = DrawingCanvas::new(
        BrushConfig::default().with_background(Background::Solid(Color::rgb(0xf1, 0xf5, 0xf9))),
    );
    canvas.resize(WIDTH, HEIGHT);

    let rect = SurfaceRect::ORIGIN;
    let strokes = [
        (Color::rgb(0x3b, 0x82, 0xf6), BrushType::Pen, 6.0, 60.0),
        (Color::rgb(0xef, 0x44, 0x44), BrushType::Brush, 14.0, 120.0),
        (Color::rgb(0x47, 0x55, 0x69), BrushType::Pencil, 10.0, 180.0),
        (Color::rgb(0x10, 0xb9, 0x81), BrushType::Crayon, 12.0, 240.0),
    ];
    for (color, brush_type, size, baseline) in strokes {
        let config = BrushConfig::default()
            .with_color(color)
            .with_brush_type(brush_type)
            .with_size(size);
        if let Err(e) = canvas.set_config(config) {
            eprintln!("SKIP {brush_type}: {e}");
            continue;
        }
        canvas.handle_input(&InputEvent::mouse_down(40.0, baseline), rect);
        for step in 1..=40 {
            let x = 40.0 + step as f32 * 10.0;
            let y = baseline + (step as f32 * 0.35).sin() * 18.0;
            canvas.handle_input(&InputEvent::mouse_move(x, y), rect);
        }
        canvas.handle_input(&InputEvent::MouseUp, rect);
    }

    // Erase a diagonal through everything.
    let eraser = BrushConfig::default().with_size(8.0).with_eraser(true);
    if canvas.set_config(eraser).is_ok() {
        canvas.handle_input(&InputEvent::mouse_down(20.0, 20.0), rect);
        canvas.handle_input(&InputEvent::mouse_move(460.0, 300.0), rect);
        canvas.handle_input(&InputEvent::MouseUp, rect);
    }

    let image = match canvas.export_now() {
        Ok(image) => image,
        Err(e) => {
            eprintln!("export failed: {e}");
            std::process::exit(1);
        }
    };
    let path = out_dir.join(&image.filename);
    match fs::write(&path, &image.png) {
        Ok(()) => println!("wrote {} ({} bytes)", path.display(), image.png.len()),
        Err(e) => {
            eprintln!("write {}: {e}", path.display());
            std::process::exit(1);
        }
    }
}
