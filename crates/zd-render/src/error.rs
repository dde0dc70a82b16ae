use thiserror::Error;

/// Failures of the raster surface. None of these are shown to the user: the
/// canvas engine logs them and treats the operation as a no-op.
#[derive(Debug, Error)]
pub enum SurfaceError {
    #[error("no 2D rendering context is available")]
    Unavailable,

    #[error("cannot allocate a {width}x{height} drawing buffer")]
    Allocation { width: u32, height: u32 },

    #[error("the drawing buffer has no pixels yet")]
    Empty,

    #[error("PNG encoding failed: {0}")]
    Encode(String),
}
