//! One-shot raster export.

use crate::error::SurfaceError;
use crate::surface::SurfaceManager;

pub const FILENAME_PREFIX: &str = "zendraw-";

/// A PNG ready to hand to the host's save mechanism.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportedImage {
    pub filename: String,
    pub png: Vec<u8>,
}

/// `zendraw-<unix-epoch-millis>.png`
pub fn export_filename(epoch_millis: u64) -> String {
    format!("{FILENAME_PREFIX}{epoch_millis}.png")
}

pub fn export_png(surface: &SurfaceManager, epoch_millis: u64) -> Result<ExportedImage, SurfaceError> {
    let png = surface.encode_png()?;
    let filename = export_filename(epoch_millis);
    log::info!("exported {} ({} bytes)", filename, png.len());
    Ok(ExportedImage { filename, png })
}
