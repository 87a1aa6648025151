//! The per-surface render tick.
//!
//! One driver per active surface. The host scheduler (requestAnimationFrame
//! in the browser) calls [`RenderDriver::tick`] once per display refresh;
//! the driver recomputes elapsed time from its injected clock, keeps the
//! backing buffer sized to the layout, re-binds the surface's program, sets
//! the per-frame uniforms, and draws the shared quad. Cancellation is the
//! scheduler's job: a cancelled surface simply stops ticking.

use glam::Vec2;

use crate::definition::ShaderDefinition;
use crate::error::RenderError;
use crate::render::quad::FullScreenQuad;
use crate::render::registry::ProgramRegistry;
use crate::render::surface::{resize_to_display, Surface};
use crate::timing::{Clock, FrameTimer};
use crate::uniform::UniformValue;

/// Elapsed animation time in seconds.
pub const U_TIME: &str = "u_time";

/// Backing-buffer size in pixels.
pub const U_RESOLUTION: &str = "u_resolution";

/// Pointer position, normalized to [0,1]^2. Only written when the
/// definition declares it.
pub const U_MOUSE: &str = "u_mouse";

/// Per-frame inputs read by the tick. The pointer position is the only
/// value shared across surfaces; the input handler owns it, the tick only
/// reads it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameInputs {
    /// Pointer position normalized to [0,1]^2 over the surface.
    pub mouse: Vec2,
}

impl Default for FrameInputs {
    /// Center of the surface: the resting position when the pointer has
    /// left (or never entered).
    fn default() -> Self {
        Self {
            mouse: Vec2::new(0.5, 0.5),
        }
    }
}

/// Drives one surface's program through per-frame uniform updates and draw
/// calls.
pub struct RenderDriver {
    program_name: String,
    timer: FrameTimer,
}

impl RenderDriver {
    /// Creates a driver for the program registered under `program_name`,
    /// with its own frame timer.
    pub fn new(program_name: impl Into<String>, timer: FrameTimer) -> Self {
        Self {
            program_name: program_name.into(),
            timer,
        }
    }

    /// The logical program name this driver renders.
    pub fn program_name(&self) -> &str {
        &self.program_name
    }

    /// Current animation speed factor.
    pub fn speed_factor(&self) -> f64 {
        self.timer.speed_factor()
    }

    /// Adjusts the animation speed factor (the reserved "speed" control).
    pub fn set_speed_factor(&mut self, factor: f64) {
        self.timer.set_speed_factor(factor);
    }

    /// Restarts the animation timer.
    pub fn reset_timer(&mut self, clock: &dyn Clock) {
        self.timer.reset(clock);
    }

    /// Renders one frame.
    ///
    /// Resizes the backing buffer on layout change, clears to opaque black,
    /// binds the program and quad attributes, uploads `u_time` and
    /// `u_resolution` (plus `u_mouse` when declared), and draws.
    ///
    /// # Errors
    ///
    /// Returns [`RenderError::MissingProgram`] if the driver's program was
    /// unregistered out from under it.
    #[allow(unsafe_code)]
    pub fn tick(
        &self,
        gl: &glow::Context,
        clock: &dyn Clock,
        registry: &mut ProgramRegistry,
        quad: &FullScreenQuad,
        surface: &mut dyn Surface,
        definition: &ShaderDefinition,
        inputs: FrameInputs,
    ) -> Result<(), RenderError> {
        use glow::HasContext;

        let elapsed = self.timer.elapsed_seconds(clock);

        resize_to_display(surface);
        let (width, height) = surface.backing_size();

        // SAFETY: viewport/clear on a live context with non-negative sizes.
        unsafe {
            gl.viewport(0, 0, width as i32, height as i32);
            gl.clear_color(0.0, 0.0, 0.0, 1.0);
            gl.clear(glow::COLOR_BUFFER_BIT);
        }

        let name = self.program_name.as_str();
        registry.bind(gl, name)?;
        registry.bind_quad_attributes(gl, name, quad)?;

        registry.set_uniform(gl, name, U_TIME, &UniformValue::Float(elapsed))?;
        registry.set_uniform(
            gl,
            name,
            U_RESOLUTION,
            &UniformValue::Vec2([width as f32, height as f32]),
        )?;

        if definition.declares_uniform(U_MOUSE) {
            registry.set_uniform(
                gl,
                name,
                U_MOUSE,
                &UniformValue::Vec2([inputs.mouse.x, inputs.mouse.y]),
            )?;
        }

        quad.draw(gl);

        Ok(())
    }
}
