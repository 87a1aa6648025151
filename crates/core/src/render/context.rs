//! GPU context wrapper recording which drawing API version was obtained.
//!
//! Context acquisition itself is host-specific (the browser front end asks a
//! canvas for `"webgl2"` first and falls back to `"webgl"`); the core only
//! records the outcome so callers can adapt to the older API where needed.

/// Which drawing API version a context was created with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContextApi {
    /// WebGL2 / GLSL ES 3.0 capable.
    WebGl2,
    /// WebGL1 fallback.
    WebGl1,
}

impl ContextApi {
    /// The context-id string the browser API uses for this version.
    pub fn label(&self) -> &'static str {
        match self {
            ContextApi::WebGl2 => "webgl2",
            ContextApi::WebGl1 => "webgl",
        }
    }
}

/// Wraps a `glow::Context` together with the API version it was obtained
/// with. Created once per surface and never shared across surfaces.
pub struct GpuContext {
    gl: glow::Context,
    api: ContextApi,
}

impl GpuContext {
    /// Wraps an already-created GL context.
    pub fn new(gl: glow::Context, api: ContextApi) -> Self {
        Self { gl, api }
    }

    /// The underlying `glow::Context`.
    pub fn gl(&self) -> &glow::Context {
        &self.gl
    }

    /// Which API version this context was obtained with.
    pub fn api(&self) -> ContextApi {
        self.api
    }

    /// Consumes the wrapper and returns the underlying context.
    pub fn into_gl(self) -> glow::Context {
        self.gl
    }
}
