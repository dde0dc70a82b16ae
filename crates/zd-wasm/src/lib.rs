//! WASM bridge for ZenDraw: exposes the drawing engine to JavaScript.
//!
//! Compiled via `wasm-pack build --target web`. The host page owns the
//! `<canvas>` element and the settings store; it forwards DOM events and
//! configuration changes here, and everything visible is pushed back with
//! `putImageData`.

mod present;

use wasm_bindgen::prelude::*;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, MouseEvent, TouchEvent};
use zd_core::{BrushConfig, palette};
use zd_editor::{DrawingCanvas, InputEvent, SurfaceRect};
use zd_render::UnitRandomJitter;

/// The WASM-facing drawing canvas.
///
/// One instance per `<canvas>` element. Every method returns quietly;
/// failures go to the browser console.
#[wasm_bindgen]
pub struct ZdCanvas {
    element: HtmlCanvasElement,
    /// `None` when the browser refused a 2D context.
    ctx: Option<CanvasRenderingContext2d>,
    engine: DrawingCanvas,
}

#[wasm_bindgen]
impl ZdCanvas {
    /// Attach to `element`. `config_json` is the initial brush configuration;
    /// an empty or invalid string falls back to the defaults.
    #[wasm_bindgen(constructor)]
    pub fn new(element: HtmlCanvasElement, config_json: &str) -> Self {
        init_console();

        let config = if config_json.trim().is_empty() {
            BrushConfig::default()
        } else {
            BrushConfig::from_json(config_json).unwrap_or_else(|e| {
                log::warn!("initial configuration rejected, using defaults: {e}");
                BrushConfig::default()
            })
        };
        let jitter = UnitRandomJitter(js_sys::Math::random);
        let mut engine = DrawingCanvas::with_jitter(config, Box::new(jitter));

        let ctx = match element.get_context("2d") {
            Ok(Some(obj)) => obj.dyn_into::<CanvasRenderingContext2d>().ok(),
            _ => None,
        };
        if ctx.is_none() {
            engine.mark_unavailable();
        }

        Self {
            element,
            ctx,
            engine,
        }
    }

    /// Replace the brush configuration wholesale.
    /// Returns `false` (keeping the previous one) on a bad payload.
    pub fn set_config(&mut self, json: &str) -> bool {
        self.engine.set_config_json(json)
    }

    /// Current configuration as JSON.
    pub fn get_config(&self) -> String {
        self.engine.config().to_json().unwrap_or_default()
    }

    /// Follow a viewport size change. Content is preserved at the top-left.
    pub fn resize(&mut self, width: f64, height: f64) -> bool {
        if !self.engine.resize(width, height) {
            return false;
        }
        let (w, h) = self.engine.surface().size();
        // Assigning the element's size wipes the visible canvas; the whole
        // buffer is marked dirty and repainted below.
        self.element.set_width(w);
        self.element.set_height(h);
        self.present();
        true
    }

    // ─── Pointer input ──────────────────────────────────────────────────

    pub fn mouse_down(&mut self, event: &MouseEvent) -> bool {
        let input = InputEvent::mouse_down(event.client_x() as f32, event.client_y() as f32);
        self.dispatch(&input)
    }

    pub fn mouse_move(&mut self, event: &MouseEvent) -> bool {
        let input = InputEvent::mouse_move(event.client_x() as f32, event.client_y() as f32);
        self.dispatch(&input)
    }

    pub fn mouse_up(&mut self) -> bool {
        self.dispatch(&InputEvent::MouseUp)
    }

    /// `mouseout`: ends the gesture like a release.
    pub fn mouse_leave(&mut self) -> bool {
        self.dispatch(&InputEvent::MouseLeave)
    }

    pub fn touch_start(&mut self, event: &TouchEvent) -> bool {
        let input = InputEvent::TouchStart {
            touches: touch_points(event),
        };
        self.dispatch(&input)
    }

    pub fn touch_move(&mut self, event: &TouchEvent) -> bool {
        let input = InputEvent::TouchMove {
            touches: touch_points(event),
        };
        self.dispatch(&input)
    }

    pub fn touch_end(&mut self) -> bool {
        self.dispatch(&InputEvent::TouchEnd)
    }

    pub fn touch_cancel(&mut self) -> bool {
        self.dispatch(&InputEvent::TouchCancel)
    }

    // ─── Host callbacks ─────────────────────────────────────────────────

    /// `onClear`: wipe every stroke and repaint the current background.
    pub fn clear(&mut self) -> bool {
        if !self.engine.clear() {
            return false;
        }
        self.present();
        true
    }

    /// `onDownload`: save the drawing as `zendraw-<millis>.png`.
    pub fn download(&self) -> bool {
        let millis = js_sys::Date::now().max(0.0) as u64;
        let image = match self.engine.export(millis) {
            Ok(image) => image,
            Err(e) => {
                log::warn!("export failed: {e}");
                return false;
            }
        };
        match present::download(&image) {
            Ok(()) => true,
            Err(e) => {
                log::warn!("download of {} failed: {e:?}", image.filename);
                false
            }
        }
    }

    // ─── Internals ──────────────────────────────────────────────────────

    fn dispatch(&mut self, input: &InputEvent) -> bool {
        // The element can move between events (scrolling, layout), so the
        // origin is read fresh every time.
        let bounds = self.element.get_bounding_client_rect();
        let rect = SurfaceRect::new(bounds.left() as f32, bounds.top() as f32);
        let changed = self.engine.handle_input(input, rect);
        if changed {
            self.present();
        }
        changed
    }

    /// Push the dirty part of the buffer to the visible canvas.
    fn present(&mut self) {
        let Some(region) = self.engine.take_dirty() else {
            return;
        };
        let Some(ctx) = self.ctx.as_ref() else {
            return;
        };
        if let Err(e) = present::put_region(ctx, &self.engine, region) {
            log::warn!("putImageData failed: {e:?}");
        }
    }
}

fn touch_points(event: &TouchEvent) -> Vec<(f32, f32)> {
    let list = event.touches();
    (0..list.length())
        .filter_map(|i| list.get(i))
        .map(|t| (t.client_x() as f32, t.client_y() as f32))
        .collect()
}

// ─── Console logging and panic hook ──────────────────────────────────────

fn init_console() {
    #[cfg(target_arch = "wasm32")]
    {
        use std::sync::Once;
        static INIT: Once = Once::new();
        INIT.call_once(|| {
            console_error_panic_hook::set_once();
            // A logger may already be installed by the embedding page.
            let _ = console_log::init_with_level(log::Level::Info);
        });
    }
}

// ─── Standalone helpers (no canvas needed) ───────────────────────────────

/// The configuration the app starts with, as JSON.
#[wasm_bindgen]
pub fn default_config() -> String {
    BrushConfig::default().to_json().unwrap_or_default()
}

/// Swatches and slider ranges for the settings panel.
/// Returns JSON `{"colors":[...],"backgrounds":[...],"size":[min,max],"opacity":[min,max,step]}`.
#[wasm_bindgen]
pub fn palette_json() -> String {
    let value = serde_json::json!({
        "colors": palette::stroke_colors().map(|c| c.to_hex()).collect::<Vec<_>>(),
        "backgrounds": palette::backgrounds().map(|b| b.to_string()).collect::<Vec<_>>(),
        "size": [palette::SIZE_RANGE.start(), palette::SIZE_RANGE.end()],
        "opacity": [
            palette::OPACITY_RANGE.start(),
            palette::OPACITY_RANGE.end(),
            palette::OPACITY_STEP,
        ],
    });
    value.to_string()
}

/// Snap a configuration from the settings panel onto the sliders' ranges
/// and opacity step. Returns JSON `{"ok":true,"config":{...}}` or
/// `{"ok":false,"error":"..."}`.
#[wasm_bindgen]
pub fn clamp_config(json: &str) -> String {
    let value = match serde_json::from_str::<BrushConfig>(json) {
        Ok(config) => serde_json::json!({ "ok": true, "config": config.clamped_to_ui() }),
        Err(e) => serde_json::json!({ "ok": false, "error": e.to_string() }),
    };
    value.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn default_config_uses_wire_names() {
        let json: serde_json::Value = serde_json::from_str(&default_config()).unwrap();
        assert_eq!(json["color"], "#000000");
        assert_eq!(json["brushType"], "pen");
        assert_eq!(json["bgColor"], "#ffffff");
        assert_eq!(json["isEraser"], false);
    }

    #[test]
    fn palette_lists_swatches_and_ranges() {
        let json: serde_json::Value = serde_json::from_str(&palette_json()).unwrap();
        assert_eq!(json["colors"].as_array().map(Vec::len), Some(12));
        assert_eq!(json["backgrounds"][5], "transparent");
        assert_eq!(json["size"][0], 1.0);
        assert_eq!(json["size"][1], 100.0);
    }

    #[test]
    fn clamp_config_snaps_to_sliders() {
        let out = clamp_config(r#"{"size":250,"opacity":0.52,"brushType":"crayon"}"#);
        let json: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(json["ok"], true);
        assert_eq!(json["config"]["size"], 100.0);
        assert_eq!(json["config"]["brushType"], "crayon");
        let opacity = json["config"]["opacity"].as_f64().unwrap();
        assert!((opacity - 0.5).abs() < 1e-6, "{opacity}");
    }

    #[test]
    fn clamp_config_reports_bad_payloads() {
        let json: serde_json::Value = serde_json::from_str(&clamp_config("{")).unwrap();
        assert_eq!(json["ok"], false);
        assert!(json["error"].is_string());
    }
}
