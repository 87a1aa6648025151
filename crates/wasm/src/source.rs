//! Alternate shader-source loader: fetch GLSL text from a URL.
//!
//! The built-in catalog embeds its sources, so nothing in the portfolio
//! calls this; it is exported for embedding pages that load shader text
//! from elsewhere.

use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::JsFuture;
use web_sys::Response;

/// Fetches fragment-shader source text from `url`.
///
/// # Errors
///
/// Fails on network errors, non-OK responses, or a non-text body.
pub async fn fetch_fragment_source(url: &str) -> Result<String, JsValue> {
    let window = web_sys::window().ok_or("no window")?;

    let response: Response = JsFuture::from(window.fetch_with_str(url)).await?.dyn_into()?;
    if !response.ok() {
        return Err(JsValue::from_str(&format!(
            "failed to load shader from {url}: {}",
            response.status_text()
        )));
    }

    let text = JsFuture::from(response.text()?).await?;
    text.as_string()
        .ok_or_else(|| JsValue::from_str("shader response body was not text"))
}

/// JS-visible export of [`fetch_fragment_source`].
#[wasm_bindgen(js_name = fetchFragmentSource)]
pub async fn fetch_fragment_source_js(url: String) -> Result<String, JsValue> {
    fetch_fragment_source(&url).await
}
