//! Getting pixels out of the engine: onto the visible canvas, and into a
//! downloaded file.

use wasm_bindgen::closure::Closure;
use wasm_bindgen::{Clamped, JsCast, JsValue};
use web_sys::{Blob, BlobPropertyBag, CanvasRenderingContext2d, HtmlAnchorElement, ImageData, Url};
use zd_editor::DrawingCanvas;
use zd_render::{ExportedImage, PixelRegion};

/// Copy `region` of the engine's buffer onto the 2D context.
pub(crate) fn put_region(
    ctx: &CanvasRenderingContext2d,
    canvas: &DrawingCanvas,
    region: PixelRegion,
) -> Result<(), JsValue> {
    let rgba = canvas.rgba_region(region);
    let image = ImageData::new_with_u8_clamped_array_and_sh(
        Clamped(&rgba[..]),
        region.width,
        region.height,
    )?;
    ctx.put_image_data(&image, f64::from(region.x), f64::from(region.y))
}

/// Hand a PNG to the browser's download machinery via a temporary link.
pub(crate) fn download(image: &ExportedImage) -> Result<(), JsValue> {
    let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
    let document = window
        .document()
        .ok_or_else(|| JsValue::from_str("no document"))?;

    let bytes = js_sys::Uint8Array::from(&image.png[..]);
    let parts = js_sys::Array::new();
    parts.push(&bytes);
    let options = BlobPropertyBag::new();
    options.set_type("image/png");
    let blob = Blob::new_with_u8_array_sequence_and_options(&parts, &options)?;

    let url = Url::create_object_url_with_blob(&blob)?;
    let anchor = document
        .create_element("a")?
        .dyn_into::<HtmlAnchorElement>()?;
    anchor.set_href(&url);
    anchor.set_download(&image.filename);
    anchor.click();

    // Revoking inside the click handler can cancel the download in some
    // browsers; release the URL on the next task instead.
    let revoke = Closure::once_into_js(move || {
        if let Err(e) = Url::revoke_object_url(&url) {
            log::debug!("revokeObjectURL failed: {e:?}");
        }
    });
    window.set_timeout_with_callback_and_timeout_and_arguments_0(revoke.unchecked_ref(), 0)?;
    Ok(())
}
