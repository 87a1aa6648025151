#![deny(unsafe_code)]
#![cfg_attr(not(target_arch = "wasm32"), allow(dead_code))]
//! Browser front end for the shaderfolio portfolio.
//!
//! Wires the core GPU lifecycle to the page: WebGL2/WebGL1 context
//! acquisition, canvas surfaces, pointer tracking, requestAnimationFrame
//! scheduling with cancellation, the gallery and detail views, and the
//! parameter controls. Everything except the pure pointer state only
//! compiles for wasm32.

pub mod input;

#[cfg(target_arch = "wasm32")]
pub mod app;
#[cfg(target_arch = "wasm32")]
pub mod context;
#[cfg(target_arch = "wasm32")]
pub mod schedule;
#[cfg(target_arch = "wasm32")]
pub mod source;
#[cfg(target_arch = "wasm32")]
pub mod surface;

#[cfg(target_arch = "wasm32")]
mod boot {
    use wasm_bindgen::prelude::*;

    /// Page entry point: installs logging and starts the portfolio app.
    #[wasm_bindgen(start)]
    pub fn main() -> Result<(), JsValue> {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).ok();

        let window = web_sys::window().ok_or("no window")?;
        let document = window.document().ok_or("no document")?;

        crate::app::App::start(document)
    }
}
