//! The drawing engine: one canvas instance's configuration, surface, and
//! stroke state.
//!
//! Host glue (the wasm bridge, the native sketch example) talks only to
//! [`DrawingCanvas`]. Everything here degrades quietly: failures are logged
//! and reported as "nothing changed" so a bad event never interrupts
//! drawing.

use crate::input::{InputEvent, SurfaceRect};
use crate::stroke::StrokeRenderer;
use zd_core::{BrushConfig, ConfigError};
use zd_render::{
    ExportedImage, JitterSource, Lifecycle, PixelRegion, Rect, ResizeOutcome, SurfaceError,
    SurfaceManager, XorShiftJitter, export_png, pixel_dimension,
};

pub struct DrawingCanvas {
    surface: SurfaceManager,
    renderer: StrokeRenderer,
    config: BrushConfig,
    jitter: Box<dyn JitterSource>,
    /// Area changed since the host last presented the buffer.
    dirty: Option<Rect>,
}

impl std::fmt::Debug for DrawingCanvas {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DrawingCanvas")
            .field("surface", &self.surface)
            .field("renderer", &self.renderer)
            .field("config", &self.config)
            .field("dirty", &self.dirty)
            .finish_non_exhaustive()
    }
}

impl Default for DrawingCanvas {
    fn default() -> Self {
        Self::new(BrushConfig::default())
    }
}

impl DrawingCanvas {
    /// A canvas whose crayon jitter is seeded from the clock.
    pub fn new(config: BrushConfig) -> Self {
        Self::with_jitter(config, Box::new(XorShiftJitter::from_clock()))
    }

    pub fn with_jitter(config: BrushConfig, jitter: Box<dyn JitterSource>) -> Self {
        Self {
            surface: SurfaceManager::new(),
            renderer: StrokeRenderer::new(),
            config,
            jitter,
            dirty: None,
        }
    }

    // ─── Configuration ──────────────────────────────────────────────────

    pub fn config(&self) -> &BrushConfig {
        &self.config
    }

    /// Replace the configuration wholesale. An invalid configuration is
    /// rejected and the previous one stays in effect.
    ///
    /// Takes effect from the next segment; the background only changes
    /// on the next [`clear`](Self::clear).
    pub fn set_config(&mut self, config: BrushConfig) -> Result<(), ConfigError> {
        config.validate()?;
        self.config = config;
        Ok(())
    }

    /// JSON form of [`set_config`](Self::set_config). Returns `false` when
    /// the payload was rejected.
    pub fn set_config_json(&mut self, json: &str) -> bool {
        match BrushConfig::from_json(json) {
            Ok(config) => {
                self.config = config;
                true
            }
            Err(err) => {
                log::warn!("rejected brush configuration: {err}");
                false
            }
        }
    }

    // ─── Surface ────────────────────────────────────────────────────────

    pub fn surface(&self) -> &SurfaceManager {
        &self.surface
    }

    pub fn renderer(&self) -> &StrokeRenderer {
        &self.renderer
    }

    /// The host has no 2D context; painting is disabled for good.
    pub fn mark_unavailable(&mut self) {
        self.surface.mark_unavailable();
        self.dirty = None;
    }

    /// Follow the viewport. Returns `true` when the buffer was reallocated
    /// and the whole surface needs presenting again.
    pub fn resize(&mut self, width: f64, height: f64) -> bool {
        let (w, h) = (pixel_dimension(width), pixel_dimension(height));
        match self.surface.resize(w, h, self.config.background) {
            Ok(ResizeOutcome::Resized) => {
                self.dirty = Some(self.surface.buffer().bounds());
                true
            }
            Ok(ResizeOutcome::Unchanged | ResizeOutcome::Skipped) => false,
            Err(SurfaceError::Unavailable) => false,
            Err(err) => {
                log::warn!("resize to {w}x{h} failed: {err}");
                false
            }
        }
    }

    // ─── Input ──────────────────────────────────────────────────────────

    /// Feed one host event. `rect` is the canvas origin at the time of the
    /// event. Returns `true` when pixels changed.
    pub fn handle_input(&mut self, event: &InputEvent, rect: SurfaceRect) -> bool {
        let Some(gesture) = event.gesture(rect) else {
            return false;
        };
        let damage = self.renderer.handle(
            gesture,
            &self.config,
            &mut self.surface,
            self.jitter.as_mut(),
        );
        match damage {
            Some(rect) => {
                self.mark_dirty(rect);
                true
            }
            None => false,
        }
    }

    // ─── Host callbacks ─────────────────────────────────────────────────

    /// `onClear`: discard every stroke and repaint the current background.
    pub fn clear(&mut self) -> bool {
        match self.surface.clear(self.config.background) {
            Ok(()) => {
                self.dirty = Some(self.surface.buffer().bounds());
                true
            }
            Err(err) => {
                log::debug!("clear skipped: {err}");
                false
            }
        }
    }

    /// `onDownload`: encode the buffer as `zendraw-<epoch_millis>.png`.
    pub fn export(&self, epoch_millis: u64) -> Result<ExportedImage, SurfaceError> {
        export_png(&self.surface, epoch_millis)
    }

    /// [`export`](Self::export) stamped with the system clock.
    #[cfg(not(target_arch = "wasm32"))]
    pub fn export_now(&self) -> Result<ExportedImage, SurfaceError> {
        let millis = std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .map(|d| d.as_millis() as u64)
            .unwrap_or_default();
        self.export(millis)
    }

    // ─── Presentation ───────────────────────────────────────────────────

    fn mark_dirty(&mut self, rect: Rect) {
        self.dirty = Some(match self.dirty {
            Some(existing) => existing.union(rect),
            None => rect,
        });
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty.is_some()
    }

    /// Hand the accumulated dirty area to the host as whole pixels and
    /// reset it.
    pub fn take_dirty(&mut self) -> Option<PixelRegion> {
        let rect = self.dirty.take()?;
        if self.surface.lifecycle() != Lifecycle::Initialized {
            return None;
        }
        self.surface.buffer().region(rect)
    }

    /// Straight-alpha RGBA bytes for `region`, row-major.
    pub fn rgba_region(&self, region: PixelRegion) -> Vec<u8> {
        self.surface.buffer().rgba_region(region)
    }
}
