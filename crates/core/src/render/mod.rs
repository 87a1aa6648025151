//! GPU program lifecycle for WebGL2 / WebGL1.
//!
//! Only available with the `render` feature. Everything here is
//! per-surface: each canvas owns its own context, program registry, quad
//! buffers, and driver, so surfaces tear down independently and a defect in
//! one never reaches another.
//!
//! # Module overview
//!
//! - [`context`] -- GPU context wrapper recording the obtained API version.
//! - [`shader`] -- Shader compilation, linking, and log formatting.
//! - [`quad`] -- The static full-screen quad geometry.
//! - [`registry`] -- Program registry with memoized slot lookups.
//! - [`surface`] -- Surface abstraction and resize policy.
//! - [`driver`] -- The per-frame render tick.

pub mod context;
pub mod driver;
pub mod quad;
pub mod registry;
pub mod shader;
pub mod surface;

// Re-export key types at the render module level for convenience.
pub use context::{ContextApi, GpuContext};
pub use driver::{FrameInputs, RenderDriver, U_MOUSE, U_RESOLUTION, U_TIME};
pub use quad::{FullScreenQuad, VertexLayout, QUAD_VERTEX_COUNT};
pub use registry::{ProgramRegistry, DEFAULT_VERTEX_SHADER};
pub use shader::{compile_program, compile_shader, format_compile_log, link_program, ShaderStage};
pub use surface::{resize_to_display, Surface};
