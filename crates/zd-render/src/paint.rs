//! Segment painting onto the drawing buffer.
//!
//! A [`Painter`] is a short-lived mutable borrow of the surface's pixmap,
//! lent out by [`SurfaceManager::painter`](crate::surface::SurfaceManager::painter)
//! for one paint operation. Holding it excludes resizes and clears.

use crate::blur::gaussian_blur;
use crate::style::{BrushStyle, Glow};
use kurbo::{Line, Rect, Shape};
use tiny_skia::{
    FilterQuality, Paint, Path, PathBuilder, Pixmap, PixmapPaint, Stroke, Transform,
};
use zd_core::{Color, Segment};

pub struct Painter<'a> {
    pixmap: &'a mut Pixmap,
}

impl<'a> Painter<'a> {
    pub(crate) fn new(pixmap: &'a mut Pixmap) -> Self {
        Self { pixmap }
    }

    pub fn width(&self) -> u32 {
        self.pixmap.width()
    }

    pub fn height(&self) -> u32 {
        self.pixmap.height()
    }

    /// Paint a straight segment with round caps. Zero-length segments paint
    /// a dot. Returns the area that may have changed, clipped to the buffer,
    /// or `None` if nothing landed inside it.
    pub fn stroke_segment(&mut self, segment: Segment, style: &BrushStyle) -> Option<Rect> {
        let path = segment_path(segment)?;
        let damage = self.damage_rect(segment, style)?;

        if let Some(glow) = style.glow {
            self.paint_glow(&path, segment, style, glow);
        }

        let paint = stroke_paint(style.color, style.alpha, style);
        let stroke = stroke_params(style);
        self.pixmap
            .stroke_path(&path, &paint, &stroke, Transform::identity(), None);

        log::trace!(
            "{} ({:.1},{:.1})→({:.1},{:.1}) w={:.2} a={:.2} {:?}",
            if segment.is_degenerate() { "dot" } else { "segment" },
            segment.from.x,
            segment.from.y,
            segment.to.x,
            segment.to.y,
            style.width,
            style.alpha,
            style.composite
        );
        Some(damage)
    }

    fn bounds(&self) -> Rect {
        Rect::new(0.0, 0.0, self.width() as f64, self.height() as f64)
    }

    fn damage_rect(&self, segment: Segment, style: &BrushStyle) -> Option<Rect> {
        let reach = style.reach() as f64;
        let rect = segment_line(segment)
            .bounding_box()
            .inflate(reach, reach)
            .intersect(self.bounds());
        (rect.width() > 0.0 && rect.height() > 0.0).then_some(rect)
    }

    /// Render the stroke's coverage in the glow color into a scratch layer,
    /// blur it, and composite it beneath where the stroke will go.
    fn paint_glow(&mut self, path: &Path, segment: Segment, style: &BrushStyle, glow: Glow) {
        let margin = (style.width.max(1.0) / 2.0 + glow.margin()) as f64;
        // Keep the off-buffer part of the stroke within blur reach, since it
        // still bleeds into visible pixels.
        let limit = self.bounds().inflate(glow.margin() as f64, glow.margin() as f64);
        let area = segment_line(segment)
            .bounding_box()
            .inflate(margin, margin)
            .intersect(limit)
            .expand();
        if area.width() <= 0.0 || area.height() <= 0.0 {
            return;
        }
        let Some(mut layer) = Pixmap::new(area.width() as u32, area.height() as u32) else {
            log::debug!("glow layer {}x{} refused", area.width(), area.height());
            return;
        };

        let mut paint = stroke_paint(glow.color, 1.0, style);
        paint.blend_mode = tiny_skia::BlendMode::SourceOver;
        let offset = Transform::from_translate(-area.x0 as f32, -area.y0 as f32);
        layer.stroke_path(path, &paint, &stroke_params(style), offset, None);
        gaussian_blur(&mut layer, glow.sigma());

        let layer_paint = PixmapPaint {
            opacity: style.alpha.clamp(0.0, 1.0),
            blend_mode: style.composite.blend_mode(),
            quality: FilterQuality::Nearest,
        };
        self.pixmap.draw_pixmap(
            area.x0 as i32,
            area.y0 as i32,
            layer.as_ref(),
            &layer_paint,
            Transform::identity(),
            None,
        );
    }
}

fn segment_line(segment: Segment) -> Line {
    Line::new(
        (segment.from.x as f64, segment.from.y as f64),
        (segment.to.x as f64, segment.to.y as f64),
    )
}

fn segment_path(segment: Segment) -> Option<Path> {
    let mut pb = PathBuilder::new();
    pb.move_to(segment.from.x, segment.from.y);
    pb.line_to(segment.to.x, segment.to.y);
    pb.finish()
}

fn stroke_paint(color: Color, alpha: f32, style: &BrushStyle) -> Paint<'static> {
    let alpha = (color.a as f32 / 255.0 * alpha.clamp(0.0, 1.0) * 255.0).round() as u8;
    let mut paint = Paint {
        anti_alias: true,
        blend_mode: style.composite.blend_mode(),
        ..Default::default()
    };
    paint.set_color_rgba8(color.r, color.g, color.b, alpha);
    paint
}

fn stroke_params(style: &BrushStyle) -> Stroke {
    Stroke {
        width: style.width.max(0.0),
        line_cap: style.line_cap,
        line_join: style.line_join,
        dash: None,
        ..Default::default()
    }
}
