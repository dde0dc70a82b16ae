//! The raster buffer: a premultiplied RGBA8 pixel grid backed by a
//! `tiny_skia::Pixmap`.
//!
//! A pixmap cannot have zero area, so the buffer is `None` inside until the
//! first real allocation.

use crate::error::SurfaceError;
use crate::style::Composite;
use kurbo::Rect;
use tiny_skia::{Paint, Pixmap, Transform};
use zd_core::Color;

#[derive(Clone, Default)]
pub struct DrawingBuffer {
    pixmap: Option<Pixmap>,
}

impl std::fmt::Debug for DrawingBuffer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "DrawingBuffer({}x{})", self.width(), self.height())
    }
}

/// An integer pixel rectangle, always inside the buffer it was derived from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PixelRegion {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl PixelRegion {
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }
}

impl DrawingBuffer {
    /// A zero-area buffer, as before the canvas first mounts.
    pub fn empty() -> Self {
        Self { pixmap: None }
    }

    /// A fully transparent buffer of the given size.
    pub fn allocate(width: u32, height: u32) -> Result<Self, SurfaceError> {
        let pixmap = Pixmap::new(width, height).ok_or(SurfaceError::Allocation { width, height })?;
        Ok(Self {
            pixmap: Some(pixmap),
        })
    }

    pub fn width(&self) -> u32 {
        self.pixmap.as_ref().map_or(0, Pixmap::width)
    }

    pub fn height(&self) -> u32 {
        self.pixmap.as_ref().map_or(0, Pixmap::height)
    }

    pub fn size(&self) -> (u32, u32) {
        (self.width(), self.height())
    }

    pub fn is_empty(&self) -> bool {
        self.pixmap.is_none()
    }

    pub fn pixmap(&self) -> Option<&Pixmap> {
        self.pixmap.as_ref()
    }

    pub(crate) fn pixmap_mut(&mut self) -> Option<&mut Pixmap> {
        self.pixmap.as_mut()
    }

    /// Buffer bounds in pixel space.
    pub fn bounds(&self) -> Rect {
        Rect::new(0.0, 0.0, self.width() as f64, self.height() as f64)
    }

    /// Straight-alpha color at `(x, y)`, or `None` outside the buffer.
    pub fn pixel(&self, x: u32, y: u32) -> Option<Color> {
        let px = self.pixmap.as_ref()?.pixel(x, y)?.demultiply();
        Some(Color::rgba(px.red(), px.green(), px.blue(), px.alpha()))
    }

    /// Raw premultiplied RGBA bytes, row-major. Empty for a zero-area buffer.
    pub fn data(&self) -> &[u8] {
        self.pixmap.as_ref().map_or(&[][..], |p| p.data())
    }

    /// Snap a floating-point rectangle outward to whole pixels and clip it
    /// to the buffer. Returns `None` when nothing of it is inside.
    pub fn region(&self, rect: Rect) -> Option<PixelRegion> {
        let clipped = rect.expand().intersect(self.bounds());
        if clipped.width() <= 0.0 || clipped.height() <= 0.0 {
            return None;
        }
        let region = PixelRegion {
            x: clipped.x0 as u32,
            y: clipped.y0 as u32,
            width: clipped.width() as u32,
            height: clipped.height() as u32,
        };
        (!region.is_empty()).then_some(region)
    }

    /// Copy a region out as straight-alpha RGBA, the layout `ImageData`
    /// and PNG encoders expect.
    pub fn rgba_region(&self, region: PixelRegion) -> Vec<u8> {
        let mut out = Vec::with_capacity((region.width * region.height * 4) as usize);
        let Some(pixmap) = self.pixmap.as_ref() else {
            return out;
        };
        for y in region.y..region.y + region.height {
            for x in region.x..region.x + region.width {
                match pixmap.pixel(x, y) {
                    Some(px) => {
                        let c = px.demultiply();
                        out.extend_from_slice(&[c.red(), c.green(), c.blue(), c.alpha()]);
                    }
                    None => out.extend_from_slice(&[0, 0, 0, 0]),
                }
            }
        }
        out
    }

    /// Copy `src` onto this buffer at the origin, clipped to the smaller of
    /// the two sizes. Rows are copied verbatim, so same-size copies are exact.
    pub fn blit_at_origin(&mut self, src: &DrawingBuffer) {
        let (Some(dst), Some(src)) = (self.pixmap.as_mut(), src.pixmap.as_ref()) else {
            return;
        };
        let cols = dst.width().min(src.width()) as usize;
        let rows = dst.height().min(src.height()) as usize;
        let dst_stride = dst.width() as usize * 4;
        let src_stride = src.width() as usize * 4;
        let src_data = src.data();
        let dst_data = dst.data_mut();
        for row in 0..rows {
            let d = row * dst_stride;
            let s = row * src_stride;
            dst_data[d..d + cols * 4].copy_from_slice(&src_data[s..s + cols * 4]);
        }
    }

    /// Fill the whole buffer with `color` composited *behind* existing
    /// content, so nothing already drawn is occluded.
    pub fn fill_behind(&mut self, color: Color) {
        let Some(pixmap) = self.pixmap.as_mut() else {
            return;
        };
        let Some(rect) = tiny_skia::Rect::from_xywh(
            0.0,
            0.0,
            pixmap.width() as f32,
            pixmap.height() as f32,
        ) else {
            return;
        };
        let mut paint = Paint {
            blend_mode: Composite::DrawBehind.blend_mode(),
            anti_alias: false,
            ..Default::default()
        };
        paint.set_color_rgba8(color.r, color.g, color.b, color.a);
        pixmap.fill_rect(rect, &paint, Transform::identity(), None);
    }

    /// Replace every pixel with `color`.
    pub fn fill(&mut self, color: Color) {
        if let Some(pixmap) = self.pixmap.as_mut() {
            pixmap.fill(tiny_skia::Color::from_rgba8(color.r, color.g, color.b, color.a));
        }
    }

    /// Make every pixel fully transparent.
    pub fn clear(&mut self) {
        if let Some(pixmap) = self.pixmap.as_mut() {
            pixmap.fill(tiny_skia::Color::TRANSPARENT);
        }
    }

    /// Encode the whole buffer as a straight-alpha RGBA PNG.
    pub fn encode_png(&self) -> Result<Vec<u8>, SurfaceError> {
        let pixmap = self.pixmap.as_ref().ok_or(SurfaceError::Empty)?;
        pixmap
            .encode_png()
            .map_err(|e| SurfaceError::Encode(e.to_string()))
    }
}
