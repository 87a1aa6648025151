//! Shader compilation and linking for WebGL2 / WebGL1.
//!
//! Compilation and linking failures are data, not faults: they carry the
//! driver's diagnostic log (with line-numbered source prepended) so the
//! caller can surface them inline. A portfolio with one broken shader must
//! not take down the other surfaces. The formatting helper is pure string
//! processing; everything else needs a live `glow::Context`.

use crate::error::RenderError;

/// A shader stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShaderStage {
    /// Per-vertex stage.
    Vertex,
    /// Per-fragment stage.
    Fragment,
}

impl ShaderStage {
    /// The GL object type for this stage.
    pub fn gl_type(&self) -> u32 {
        match self {
            ShaderStage::Vertex => glow::VERTEX_SHADER,
            ShaderStage::Fragment => glow::FRAGMENT_SHADER,
        }
    }

    /// Human-readable stage name used in diagnostics.
    pub fn label(&self) -> &'static str {
        match self {
            ShaderStage::Vertex => "vertex",
            ShaderStage::Fragment => "fragment",
        }
    }
}

/// Formats a compile diagnostic for human-readable debugging.
///
/// Prepends right-aligned line numbers to each line of `source`, then
/// appends the driver's `log`, so error messages that reference line
/// numbers can be correlated with the actual GLSL. Either input may be
/// empty.
pub fn format_compile_log(source: &str, log: &str) -> String {
    let source_lines: Vec<&str> = if source.is_empty() {
        Vec::new()
    } else {
        source.lines().collect()
    };

    let width = if source_lines.is_empty() {
        1
    } else {
        source_lines.len().to_string().len()
    };

    let numbered: String = source_lines
        .iter()
        .enumerate()
        .map(|(i, line)| format!("{:>width$}: {line}", i + 1, width = width))
        .collect::<Vec<_>>()
        .join("\n");

    match (numbered.is_empty(), log.is_empty()) {
        (true, true) => String::new(),
        (true, false) => log.to_string(),
        (false, true) => numbered,
        (false, false) => format!("{numbered}\n\n{log}"),
    }
}

/// Compiles a single shader stage.
///
/// On failure the partially-created shader object is released before the
/// error is returned.
///
/// # Errors
///
/// Returns [`RenderError::Compile`] with the formatted diagnostic log if the
/// source fails to compile.
#[allow(unsafe_code)]
pub fn compile_shader(
    gl: &glow::Context,
    stage: ShaderStage,
    source: &str,
) -> Result<glow::Shader, RenderError> {
    use glow::HasContext;

    // SAFETY: glow wraps raw GL calls as unsafe. We pass a valid stage type
    // and source string; the shader object is released on every error path.
    let shader = unsafe {
        gl.create_shader(stage.gl_type())
            .map_err(|e| RenderError::Compile {
                stage: stage.label().to_string(),
                log: e,
            })?
    };

    unsafe {
        gl.shader_source(shader, source);
        gl.compile_shader(shader);
    }

    let compiled = unsafe { gl.get_shader_compile_status(shader) };

    if compiled {
        Ok(shader)
    } else {
        let info_log = unsafe { gl.get_shader_info_log(shader) };
        unsafe { gl.delete_shader(shader) };
        Err(RenderError::Compile {
            stage: stage.label().to_string(),
            log: format_compile_log(source, &info_log),
        })
    }
}

/// Links a vertex and fragment shader into a program.
///
/// Attaches both stages, links, and detaches them afterward (the program
/// retains its own copies). On failure the program object is released.
///
/// # Errors
///
/// Returns [`RenderError::Link`] with the driver's link log.
#[allow(unsafe_code)]
pub fn link_program(
    gl: &glow::Context,
    vertex: glow::Shader,
    fragment: glow::Shader,
) -> Result<glow::Program, RenderError> {
    use glow::HasContext;

    // SAFETY: glow wraps raw GL calls as unsafe. Both shader handles come
    // from successful compile_shader calls; cleanup happens on error.
    let program = unsafe { gl.create_program().map_err(RenderError::Link)? };

    unsafe {
        gl.attach_shader(program, vertex);
        gl.attach_shader(program, fragment);
        gl.link_program(program);

        // Detach regardless of link outcome -- the program owns copies.
        gl.detach_shader(program, vertex);
        gl.detach_shader(program, fragment);
    }

    let linked = unsafe { gl.get_program_link_status(program) };

    if linked {
        Ok(program)
    } else {
        let info_log = unsafe { gl.get_program_info_log(program) };
        unsafe { gl.delete_program(program) };
        Err(RenderError::Link(info_log))
    }
}

/// Compiles both stages and links them into a program.
///
/// Shader handles are released after linking regardless of outcome.
///
/// # Errors
///
/// Returns [`RenderError::Compile`] if either stage fails, or
/// [`RenderError::Link`] if linking fails.
#[allow(unsafe_code)]
pub fn compile_program(
    gl: &glow::Context,
    vertex_source: &str,
    fragment_source: &str,
) -> Result<glow::Program, RenderError> {
    use glow::HasContext;

    let vert = compile_shader(gl, ShaderStage::Vertex, vertex_source)?;
    let frag = match compile_shader(gl, ShaderStage::Fragment, fragment_source) {
        Ok(f) => f,
        Err(e) => {
            // SAFETY: vert is a valid handle from a successful compile.
            unsafe { gl.delete_shader(vert) };
            return Err(e);
        }
    };

    let result = link_program(gl, vert, frag);

    // SAFETY: both handles are valid; the linked program keeps its own
    // copies, so deleting these is correct.
    unsafe {
        gl.delete_shader(vert);
        gl.delete_shader(frag);
    }

    result
}
