//! Raster side of the drawing surface, built on `tiny-skia`.

pub mod blur;
pub mod buffer;
pub mod error;
pub mod export;
pub mod jitter;
pub mod paint;
pub mod style;
pub mod surface;

pub use buffer::{DrawingBuffer, PixelRegion};
pub use error::SurfaceError;
pub use export::{ExportedImage, export_filename, export_png};
pub use jitter::{FixedJitter, JitterSource, UnitRandomJitter, XorShiftJitter};
pub use paint::Painter;
pub use style::{BrushStyle, Composite, Glow, resolve_style};
pub use surface::{Lifecycle, ResizeOutcome, SurfaceManager, pixel_dimension};

// Re-export kurbo's rectangle so downstream crates can track damage
// without a direct dependency.
pub use kurbo::Rect;
