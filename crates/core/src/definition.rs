//! Shader definitions: the catalog's data model.
//!
//! A [`ShaderDefinition`] bundles everything the portfolio needs to show one
//! effect: identity and display metadata, the fragment source, the uniforms
//! the source declares (with defaults), and the parameter controls the detail
//! view offers. Definitions are immutable after catalog construction and are
//! shared by reference with the UI layer.

use crate::uniform::{UniformKind, UniformValue};
use serde::Serialize;

/// Reserved control name that adjusts a surface's animation speed factor
/// instead of writing a uniform.
pub const SPEED_CONTROL: &str = "speed";

/// A uniform the fragment source declares, with its default value.
#[derive(Debug, Clone, Serialize)]
pub struct UniformDeclaration {
    /// Uniform name as spelled in the GLSL (e.g. `u_time`).
    pub name: String,
    /// Type of the uniform.
    pub kind: UniformKind,
    /// Value uploaded before the first frame writes anything.
    pub default: UniformValue,
}

/// The input widget kind for a parameter control.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ControlKind {
    /// A numeric slider.
    Range,
}

impl ControlKind {
    /// The HTML input `type` attribute value for this widget.
    pub fn input_type(&self) -> &'static str {
        match self {
            ControlKind::Range => "range",
        }
    }
}

/// One parameter control offered in the detail view.
///
/// A control either drives the reserved [`SPEED_CONTROL`] speed factor, or
/// forwards its numeric value to the uniform named in `uniform`. Controls
/// with neither are rendered but ignored.
#[derive(Debug, Clone, Serialize)]
pub struct ControlDescriptor {
    /// Control name; [`SPEED_CONTROL`] is reserved.
    pub name: String,
    /// Human-readable widget label.
    pub label: String,
    /// Widget kind.
    pub kind: ControlKind,
    /// Minimum slider value.
    pub min: f64,
    /// Maximum slider value.
    pub max: f64,
    /// Slider step.
    pub step: f64,
    /// Initial slider value.
    pub default: f64,
    /// Uniform this control writes, if any.
    pub uniform: Option<String>,
    /// Kind of that uniform; required when `uniform` is set.
    pub uniform_kind: Option<UniformKind>,
}

/// A complete catalog entry for one fragment-shader effect.
#[derive(Debug, Clone, Serialize)]
pub struct ShaderDefinition {
    /// Stable identifier, unique within a catalog.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Short display description.
    pub description: String,
    /// Free-form tags shown in the gallery.
    pub tags: Vec<String>,
    /// GLSL fragment source, compiled against the default passthrough
    /// vertex shader.
    pub fragment_source: String,
    /// Uniforms the source declares, with defaults.
    pub uniforms: Vec<UniformDeclaration>,
    /// Parameter controls for the detail view, in display order.
    pub controls: Vec<ControlDescriptor>,
}

impl ShaderDefinition {
    /// Whether the definition declares a uniform with this name.
    ///
    /// The render driver consults this before writing optional per-frame
    /// uniforms such as the pointer position.
    pub fn declares_uniform(&self, name: &str) -> bool {
        self.uniforms.iter().any(|u| u.name == name)
    }

    /// The declaration for `name`, if present.
    pub fn uniform(&self, name: &str) -> Option<&UniformDeclaration> {
        self.uniforms.iter().find(|u| u.name == name)
    }
}
