//! Context acquisition: WebGL2 preferred, WebGL1 accepted.

use shaderfolio_core::render::{ContextApi, GpuContext};
use shaderfolio_core::RenderError;
use wasm_bindgen::JsCast;
use web_sys::{HtmlCanvasElement, WebGl2RenderingContext, WebGlRenderingContext};

/// Obtains a drawing context from the canvas, trying `webgl2` first and
/// falling back to `webgl` (and the legacy `experimental-webgl` alias).
///
/// # Errors
///
/// Returns [`RenderError::ContextUnsupported`] when no API version is
/// available. The caller must render a user-visible fallback message and
/// never retry automatically.
pub fn acquire_context(canvas: &HtmlCanvasElement) -> Result<GpuContext, RenderError> {
    if let Some(object) = context_object(canvas, "webgl2") {
        if let Ok(ctx) = object.dyn_into::<WebGl2RenderingContext>() {
            let gl = glow::Context::from_webgl2_context(ctx);
            return Ok(GpuContext::new(gl, ContextApi::WebGl2));
        }
    }

    for id in ["webgl", "experimental-webgl"] {
        if let Some(object) = context_object(canvas, id) {
            if let Ok(ctx) = object.dyn_into::<WebGlRenderingContext>() {
                let gl = glow::Context::from_webgl1_context(ctx);
                return Ok(GpuContext::new(gl, ContextApi::WebGl1));
            }
        }
    }

    log::error!("neither webgl2 nor webgl is available on this canvas");
    Err(RenderError::ContextUnsupported)
}

/// One `getContext` attempt; any failure mode collapses to `None` so the
/// caller can fall through to the next API version.
fn context_object(canvas: &HtmlCanvasElement, id: &str) -> Option<js_sys::Object> {
    canvas.get_context(id).ok().flatten()
}
