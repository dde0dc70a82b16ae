//! Canvas surface manager: owns the drawing buffer, its size, and its
//! background.
//!
//! The buffer follows the viewport. On every resize the old pixels are
//! snapshotted and copied back at the origin, so drawings survive window
//! changes (clipped when shrinking). The background is painted exactly once,
//! on the `Uninitialized → Initialized` transition; after that only
//! [`SurfaceManager::clear`] repaints it.

use crate::buffer::DrawingBuffer;
use crate::error::SurfaceError;
use crate::paint::Painter;
use zd_core::Background;

/// Where the surface is in its life.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Lifecycle {
    /// No pixels yet; the first nonzero resize allocates and fills.
    Uninitialized,
    /// Buffer allocated and background applied.
    Initialized,
    /// The host has no 2D context. Terminal: every operation is a no-op.
    Unavailable,
}

/// Result of a successful [`SurfaceManager::resize`] call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResizeOutcome {
    /// Buffer reallocated at the new size, content carried over.
    Resized,
    /// Same size as before; nothing to do.
    Unchanged,
    /// Degenerate dimensions; previous buffer kept as-is.
    Skipped,
}

#[derive(Debug)]
pub struct SurfaceManager {
    buffer: DrawingBuffer,
    lifecycle: Lifecycle,
}

impl Default for SurfaceManager {
    fn default() -> Self {
        Self::new()
    }
}

impl SurfaceManager {
    pub fn new() -> Self {
        Self {
            buffer: DrawingBuffer::empty(),
            lifecycle: Lifecycle::Uninitialized,
        }
    }

    pub fn lifecycle(&self) -> Lifecycle {
        self.lifecycle
    }

    pub fn buffer(&self) -> &DrawingBuffer {
        &self.buffer
    }

    pub fn size(&self) -> (u32, u32) {
        self.buffer.size()
    }

    /// Record that the host could not provide a rendering context.
    pub fn mark_unavailable(&mut self) {
        if self.lifecycle != Lifecycle::Unavailable {
            log::warn!("drawing surface unavailable; painting disabled");
        }
        self.lifecycle = Lifecycle::Unavailable;
        self.buffer = DrawingBuffer::empty();
    }

    /// Follow a viewport size change, preserving drawn content.
    ///
    /// `background` is only consulted on the very first allocation.
    pub fn resize(
        &mut self,
        width: u32,
        height: u32,
        background: Background,
    ) -> Result<ResizeOutcome, SurfaceError> {
        if self.lifecycle == Lifecycle::Unavailable {
            return Err(SurfaceError::Unavailable);
        }
        if width == 0 || height == 0 {
            log::debug!("ignoring degenerate resize to {width}x{height}");
            return Ok(ResizeOutcome::Skipped);
        }
        if self.lifecycle == Lifecycle::Initialized && self.buffer.size() == (width, height) {
            return Ok(ResizeOutcome::Unchanged);
        }

        // Allocate first so a refused size leaves the old buffer untouched.
        // The outgoing buffer doubles as the snapshot.
        let fresh = DrawingBuffer::allocate(width, height)?;
        let old = std::mem::replace(&mut self.buffer, fresh);
        let snapshot = (!old.is_empty()).then_some(old);

        if self.lifecycle == Lifecycle::Uninitialized {
            if let Some(color) = background.color() {
                self.buffer.fill_behind(color);
            }
            self.lifecycle = Lifecycle::Initialized;
            log::info!("drawing surface initialized at {width}x{height}, background {background}");
        }

        if let Some(old) = snapshot {
            log::debug!(
                "resized {}x{} → {width}x{height}",
                old.width(),
                old.height()
            );
            self.buffer.blit_at_origin(&old);
        }

        Ok(ResizeOutcome::Resized)
    }

    /// Discard every stroke and re-apply `background`: a solid fill, or a
    /// true clear for the transparent sentinel.
    pub fn clear(&mut self, background: Background) -> Result<(), SurfaceError> {
        match self.lifecycle {
            Lifecycle::Unavailable => return Err(SurfaceError::Unavailable),
            Lifecycle::Uninitialized => return Err(SurfaceError::Empty),
            Lifecycle::Initialized => {}
        }
        match background {
            Background::Transparent => self.buffer.clear(),
            Background::Solid(color) => self.buffer.fill(color),
        }
        log::debug!("surface cleared to {background}");
        Ok(())
    }

    /// Lend a painter for one paint operation. `None` when there is nothing
    /// to paint on.
    pub fn painter(&mut self) -> Option<Painter<'_>> {
        if self.lifecycle != Lifecycle::Initialized {
            return None;
        }
        self.buffer.pixmap_mut().map(Painter::new)
    }

    pub fn encode_png(&self) -> Result<Vec<u8>, SurfaceError> {
        match self.lifecycle {
            Lifecycle::Unavailable => Err(SurfaceError::Unavailable),
            _ => self.buffer.encode_png(),
        }
    }
}

/// Convert a host viewport dimension (CSS pixels, possibly fractional,
/// negative, or NaN) to a buffer dimension. Anything unusable maps to zero.
pub fn pixel_dimension(value: f64) -> u32 {
    if !value.is_finite() || value < 1.0 {
        return 0;
    }
    value.floor().min(u32::MAX as f64) as u32
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use zd_core::Color;

    const SLATE: Color = Color::rgb(0xf1, 0xf5, 0xf9);

    #[test]
    fn first_resize_initializes_and_fills() {
        let mut surface = SurfaceManager::new();
        assert_eq!(surface.lifecycle(), Lifecycle::Uninitialized);
        let outcome = surface.resize(800, 600, Background::Solid(SLATE)).unwrap();
        assert_eq!(outcome, ResizeOutcome::Resized);
        assert_eq!(surface.lifecycle(), Lifecycle::Initialized);
        assert_eq!(surface.size(), (800, 600));
        assert_eq!(surface.buffer().pixel(0, 0), Some(SLATE));
        assert_eq!(surface.buffer().pixel(799, 599), Some(SLATE));
    }

    #[test]
    fn transparent_background_is_not_painted() {
        let mut surface = SurfaceManager::new();
        surface.resize(10, 10, Background::Transparent).unwrap();
        assert_eq!(surface.buffer().pixel(5, 5).map(|c| c.a), Some(0));
    }

    #[test]
    fn degenerate_resize_keeps_buffer() {
        let mut surface = SurfaceManager::new();
        surface.resize(20, 20, Background::Solid(Color::WHITE)).unwrap();
        assert_eq!(
            surface.resize(0, 300, Background::Transparent).unwrap(),
            ResizeOutcome::Skipped
        );
        assert_eq!(surface.size(), (20, 20));
        assert_eq!(surface.buffer().pixel(3, 3), Some(Color::WHITE));
    }

    #[test]
    fn degenerate_resize_before_init_stays_uninitialized() {
        let mut surface = SurfaceManager::new();
        surface.resize(0, 0, Background::Solid(Color::WHITE)).unwrap();
        assert_eq!(surface.lifecycle(), Lifecycle::Uninitialized);
        assert!(surface.painter().is_none());
    }

    #[test]
    fn growing_leaves_new_area_unfilled() {
        let mut surface = SurfaceManager::new();
        surface.resize(10, 10, Background::Solid(Color::WHITE)).unwrap();
        surface.resize(20, 15, Background::Solid(Color::WHITE)).unwrap();
        assert_eq!(surface.buffer().pixel(9, 9), Some(Color::WHITE));
        assert_eq!(surface.buffer().pixel(15, 5).map(|c| c.a), Some(0));
        assert_eq!(surface.buffer().pixel(5, 12).map(|c| c.a), Some(0));
    }

    #[test]
    fn shrinking_clips_content() {
        let mut surface = SurfaceManager::new();
        surface.resize(10, 10, Background::Solid(Color::WHITE)).unwrap();
        surface.resize(4, 4, Background::Transparent).unwrap();
        assert_eq!(surface.size(), (4, 4));
        assert_eq!(surface.buffer().pixel(3, 3), Some(Color::WHITE));
    }

    #[test]
    fn clear_to_solid_and_transparent() {
        let mut surface = SurfaceManager::new();
        surface.resize(8, 8, Background::Solid(Color::WHITE)).unwrap();
        surface.clear(Background::Solid(SLATE)).unwrap();
        assert_eq!(surface.buffer().pixel(4, 4), Some(SLATE));
        surface.clear(Background::Transparent).unwrap();
        assert_eq!(surface.buffer().pixel(4, 4).map(|c| c.a), Some(0));
    }

    #[test]
    fn clear_before_init_is_reported() {
        let mut surface = SurfaceManager::new();
        assert!(matches!(
            surface.clear(Background::Transparent),
            Err(SurfaceError::Empty)
        ));
    }

    #[test]
    fn unavailable_surface_refuses_everything() {
        let mut surface = SurfaceManager::new();
        surface.resize(8, 8, Background::Solid(Color::WHITE)).unwrap();
        surface.mark_unavailable();
        assert_eq!(surface.lifecycle(), Lifecycle::Unavailable);
        assert!(matches!(
            surface.resize(16, 16, Background::Transparent),
            Err(SurfaceError::Unavailable)
        ));
        assert!(surface.painter().is_none());
        assert!(surface.clear(Background::Transparent).is_err());
        assert!(surface.encode_png().is_err());
    }

    #[test]
    fn host_dimensions_map_to_pixels() {
        assert_eq!(pixel_dimension(800.0), 800);
        assert_eq!(pixel_dimension(799.6), 799);
        assert_eq!(pixel_dimension(0.4), 0);
        assert_eq!(pixel_dimension(-20.0), 0);
        assert_eq!(pixel_dimension(f64::NAN), 0);
        assert_eq!(pixel_dimension(f64::INFINITY), 0);
    }
}
