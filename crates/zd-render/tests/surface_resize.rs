//! Integration tests: surface lifecycle, resize preservation, and export.
//!
//! Drives `SurfaceManager` + `Painter` together the way the canvas engine
//! does, and checks pixels (and decoded PNG output) rather than internals.

use pretty_assertions::assert_eq;
use zd_core::{Background, BrushConfig, BrushType, Color, Point, Segment};
use zd_render::{
    FixedJitter, Lifecycle, ResizeOutcome, SurfaceManager, export_png, resolve_style,
};

const WHITE: Background = Background::Solid(Color::WHITE);
const SLATE: Color = Color::rgb(0xf1, 0xf5, 0xf9);

fn surface(width: u32, height: u32, background: Background) -> SurfaceManager {
    let mut surface = SurfaceManager::new();
    surface.resize(width, height, background).unwrap();
    surface
}

fn paint(surface: &mut SurfaceManager, config: &BrushConfig, from: (f32, f32), to: (f32, f32)) {
    let style = resolve_style(config, &mut FixedJitter(0.0));
    let mut painter = surface.painter().expect("surface should be paintable");
    painter.stroke_segment(Segment::new(Point::from(from), Point::from(to)), &style);
}

fn red_pen() -> BrushConfig {
    BrushConfig::default()
        .with_color(Color::rgb(255, 0, 0))
        .with_size(10.0)
        .with_opacity(1.0)
        .with_brush_type(BrushType::Pen)
}

// ─── Resize preservation ────────────────────────────────────────────────

#[test]
fn same_size_resize_is_byte_identical() {
    let mut surface = surface(120, 80, WHITE);
    paint(&mut surface, &red_pen(), (10.0, 10.0), (100.0, 70.0));
    let before = surface.buffer().data().to_vec();

    let outcome = surface.resize(120, 80, WHITE).unwrap();
    assert_eq!(outcome, ResizeOutcome::Unchanged);
    assert_eq!(surface.buffer().data(), &before[..]);
}

#[test]
fn round_trip_through_larger_size_preserves_content() {
    let mut surface = surface(60, 40, WHITE);
    paint(&mut surface, &red_pen(), (5.0, 20.0), (55.0, 20.0));
    let before = surface.buffer().data().to_vec();

    surface.resize(200, 150, WHITE).unwrap();
    surface.resize(60, 40, WHITE).unwrap();
    assert_eq!(surface.buffer().data(), &before[..]);
}

#[test]
fn final_state_independent_of_growth_path() {
    let mut direct = surface(50, 50, WHITE);
    paint(&mut direct, &red_pen(), (10.0, 10.0), (40.0, 40.0));
    let mut stepped = surface(50, 50, WHITE);
    paint(&mut stepped, &red_pen(), (10.0, 10.0), (40.0, 40.0));

    direct.resize(300, 200, WHITE).unwrap();
    for (w, h) in [(80, 60), (80, 60), (150, 90), (300, 200)] {
        stepped.resize(w, h, WHITE).unwrap();
    }
    assert_eq!(direct.buffer().data(), stepped.buffer().data());
}

#[test]
fn strokes_survive_resize() {
    let mut surface = surface(100, 100, WHITE);
    paint(&mut surface, &red_pen(), (20.0, 50.0), (80.0, 50.0));
    surface.resize(400, 300, WHITE).unwrap();
    assert_eq!(surface.buffer().pixel(50, 50), Some(Color::rgb(255, 0, 0)));
}

// ─── One-shot background ────────────────────────────────────────────────

#[test]
fn background_fills_exactly_once() {
    let mut surface = SurfaceManager::new();
    surface.resize(800, 600, Background::Solid(SLATE)).unwrap();
    assert_eq!(surface.lifecycle(), Lifecycle::Initialized);
    assert_eq!(surface.buffer().pixel(400, 300), Some(SLATE));

    // Punch a transparent hole; a second fill (even draw-behind) would cover it.
    let eraser = red_pen().with_eraser(true);
    paint(&mut surface, &eraser, (400.0, 300.0), (420.0, 300.0));
    assert_eq!(surface.buffer().pixel(410, 300).map(|c| c.a), Some(0));

    surface.resize(800, 600, Background::Solid(SLATE)).unwrap();
    surface.resize(801, 600, Background::Solid(SLATE)).unwrap();
    assert_eq!(surface.buffer().pixel(410, 300).map(|c| c.a), Some(0));
}

#[test]
fn later_background_changes_do_not_refill() {
    let mut surface = surface(40, 40, WHITE);
    surface.resize(80, 80, Background::Solid(SLATE)).unwrap();
    assert_eq!(surface.buffer().pixel(10, 10), Some(Color::WHITE));
    assert_eq!(surface.buffer().pixel(60, 60).map(|c| c.a), Some(0));
}

// ─── Painting scenarios ─────────────────────────────────────────────────

#[test]
fn red_pen_segment_on_white() {
    let mut surface = surface(80, 40, WHITE);
    paint(&mut surface, &red_pen(), (10.0, 10.0), (50.0, 10.0));

    let buffer = surface.buffer();
    for x in [10, 20, 30, 45] {
        assert_eq!(buffer.pixel(x, 10), Some(Color::rgb(255, 0, 0)), "x={x}");
    }
    // 10px wide: rows 6..=13 are fully inside, row 17 is outside
    assert_eq!(buffer.pixel(30, 6), Some(Color::rgb(255, 0, 0)));
    assert_eq!(buffer.pixel(30, 13), Some(Color::rgb(255, 0, 0)));
    assert_eq!(buffer.pixel(30, 17), Some(Color::WHITE));
    assert_eq!(buffer.pixel(70, 10), Some(Color::WHITE));
}

#[test]
fn pencil_blends_with_background() {
    let mut surface = surface(60, 30, WHITE);
    let pencil = BrushConfig::default()
        .with_color(Color::BLACK)
        .with_size(10.0)
        .with_brush_type(BrushType::Pencil);
    paint(&mut surface, &pencil, (10.0, 15.0), (50.0, 15.0));

    let px = surface.buffer().pixel(30, 15).unwrap();
    assert_eq!(px.a, 255);
    // 40% black over white ≈ 153
    assert!((150..=156).contains(&px.r), "got {px:?}");
    // 4px wide: 5px off-center is untouched
    assert_eq!(surface.buffer().pixel(30, 20), Some(Color::WHITE));
}

#[test]
fn eraser_reveals_transparency_in_exported_png() {
    let mut surface = surface(60, 40, WHITE);
    paint(&mut surface, &red_pen(), (5.0, 20.0), (55.0, 20.0));
    let eraser = red_pen().with_eraser(true);
    paint(&mut surface, &eraser, (30.0, 20.0), (30.0, 20.0));

    let image = export_png(&surface, 1_700_000_000_000).unwrap();
    let decoded = tiny_skia::Pixmap::decode_png(&image.png).unwrap();
    assert_eq!((decoded.width(), decoded.height()), (60, 40));
    assert_eq!(decoded.pixel(30, 20).unwrap().alpha(), 0, "erased pixel must be transparent");
    assert_eq!(decoded.pixel(2, 2).unwrap().alpha(), 255, "background stays opaque");
}

#[test]
fn transparent_clear_exports_fully_transparent() {
    let mut surface = surface(16, 16, WHITE);
    paint(&mut surface, &red_pen(), (0.0, 8.0), (16.0, 8.0));
    surface.clear(Background::Transparent).unwrap();

    let image = export_png(&surface, 7).unwrap();
    let decoded = tiny_skia::Pixmap::decode_png(&image.png).unwrap();
    assert!(decoded.pixels().iter().all(|px| px.alpha() == 0));
}
