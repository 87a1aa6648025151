//! Error types for the shaderfolio core.
//!
//! Every failure in this crate is contained at the surface boundary: a defect
//! in one shader or canvas never prevents other surfaces from initializing or
//! rendering, and nothing here is process-fatal.

use thiserror::Error;

/// Errors produced by context acquisition, shader compilation, and the
/// per-surface program registry.
#[derive(Debug, Clone, Error)]
pub enum RenderError {
    /// No supported drawing API could be obtained from the surface.
    ///
    /// The caller must render a user-visible fallback message and never
    /// retry automatically.
    #[error("no supported drawing context is available")]
    ContextUnsupported,

    /// A shader stage failed to compile. The log is the driver's diagnostic
    /// output with line-numbered source prepended.
    #[error("shader compile error ({stage}):\n{log}")]
    Compile {
        /// The shader stage that failed ("vertex" or "fragment").
        stage: String,
        /// Formatted diagnostic log.
        log: String,
    },

    /// A program failed to link.
    #[error("shader link error:\n{0}")]
    Link(String),

    /// A GPU object (buffer, program container) could not be created.
    #[error("resource allocation failed: {0}")]
    Resource(String),

    /// An operation referenced a logical program name that was never
    /// registered (or has been unregistered).
    #[error("program not registered: '{0}'")]
    MissingProgram(String),

    /// An attribute or uniform was absent from the compiled program.
    /// Reported once at first lookup; later uses skip the binding silently.
    #[error("'{name}' not found in program '{program}'")]
    MissingSlot {
        /// Logical name of the program that was queried.
        program: String,
        /// The attribute or uniform name that was absent.
        name: String,
    },

    /// A uniform kind tag was not recognized, or a control tried to drive a
    /// uniform kind it cannot produce a value for. Always a defect in the
    /// calling wiring, never in the catalog consumer.
    #[error("unknown uniform kind: '{0}'")]
    UnknownUniformKind(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn context_unsupported_displays_readable_message() {
        let msg = format!("{}", RenderError::ContextUnsupported);
        assert!(
            msg.contains("context"),
            "expected message mentioning context, got: {msg}"
        );
    }

    #[test]
    fn compile_error_display_includes_stage_and_log() {
        let err = RenderError::Compile {
            stage: "fragment".into(),
            log: "undeclared identifier".into(),
        };
        let msg = format!("{err}");
        assert!(msg.contains("fragment"), "missing stage in: {msg}");
        assert!(
            msg.contains("undeclared identifier"),
            "missing log in: {msg}"
        );
    }

    #[test]
    fn link_error_display_includes_log() {
        let err = RenderError::Link("varying mismatch".into());
        let msg = format!("{err}");
        assert!(msg.contains("varying mismatch"), "missing log in: {msg}");
    }

    #[test]
    fn resource_error_includes_reason() {
        let err = RenderError::Resource("buffer creation failed".into());
        let msg = format!("{err}");
        assert!(msg.contains("buffer creation failed"), "got: {msg}");
    }

    #[test]
    fn missing_program_includes_name() {
        let err = RenderError::MissingProgram("hero".into());
        let msg = format!("{err}");
        assert!(msg.contains("hero"), "missing program name in: {msg}");
    }

    #[test]
    fn missing_slot_includes_program_and_slot_name() {
        let err = RenderError::MissingSlot {
            program: "preview-julia".into(),
            name: "u_mouse".into(),
        };
        let msg = format!("{err}");
        assert!(msg.contains("preview-julia"), "missing program in: {msg}");
        assert!(msg.contains("u_mouse"), "missing slot name in: {msg}");
    }

    #[test]
    fn unknown_uniform_kind_includes_tag() {
        let err = RenderError::UnknownUniformKind("5f".into());
        let msg = format!("{err}");
        assert!(msg.contains("5f"), "missing tag in: {msg}");
    }

    #[test]
    fn render_error_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<RenderError>();
    }

    #[test]
    fn render_error_implements_std_error() {
        fn assert_std_error<T: std::error::Error>() {}
        assert_std_error::<RenderError>();
    }
}
