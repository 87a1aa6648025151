//! Uniform kind tags and typed uniform values.
//!
//! Uniform uploads dispatch on a closed enum, so every upload routine is
//! selected exhaustively at compile time. The original wire-format string
//! tags (`"1f"`, `"2f"`, ... `"matrix4fv"`) survive only at the catalog
//! parsing boundary via [`UniformKind::from_tag`]; an unrecognized tag there
//! is a [`RenderError::UnknownUniformKind`], and nothing is written.

use crate::error::RenderError;
use serde::Serialize;

/// The type of a declared uniform, without a value.
///
/// Used in catalog declarations and control descriptors, where a default
/// value may not be meaningful yet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum UniformKind {
    /// Scalar `float`.
    Float,
    /// `vec2`.
    Vec2,
    /// `vec3`.
    Vec3,
    /// `vec4`.
    Vec4,
    /// Scalar `int`.
    Int,
    /// `ivec2`.
    IVec2,
    /// `ivec3`.
    IVec3,
    /// `ivec4`.
    IVec4,
    /// `float[]`, packed flat.
    FloatArray,
    /// `vec2[]`, packed flat (2 components per element).
    Vec2Array,
    /// `vec3[]`, packed flat (3 components per element).
    Vec3Array,
    /// `vec4[]`, packed flat (4 components per element).
    Vec4Array,
    /// `mat2`, column-major.
    Mat2,
    /// `mat3`, column-major.
    Mat3,
    /// `mat4`, column-major.
    Mat4,
}

/// All kinds, in tag order. Useful for table-driven tests and tooling.
pub const ALL_KINDS: [UniformKind; 15] = [
    UniformKind::Float,
    UniformKind::Vec2,
    UniformKind::Vec3,
    UniformKind::Vec4,
    UniformKind::Int,
    UniformKind::IVec2,
    UniformKind::IVec3,
    UniformKind::IVec4,
    UniformKind::FloatArray,
    UniformKind::Vec2Array,
    UniformKind::Vec3Array,
    UniformKind::Vec4Array,
    UniformKind::Mat2,
    UniformKind::Mat3,
    UniformKind::Mat4,
];

impl UniformKind {
    /// Parses a wire-format tag (`"1f"`, `"2i"`, `"3fv"`, `"matrix4fv"`, ...).
    ///
    /// # Errors
    ///
    /// Returns [`RenderError::UnknownUniformKind`] for any tag outside the
    /// recognized set.
    pub fn from_tag(tag: &str) -> Result<Self, RenderError> {
        match tag {
            "1f" => Ok(UniformKind::Float),
            "2f" => Ok(UniformKind::Vec2),
            "3f" => Ok(UniformKind::Vec3),
            "4f" => Ok(UniformKind::Vec4),
            "1i" => Ok(UniformKind::Int),
            "2i" => Ok(UniformKind::IVec2),
            "3i" => Ok(UniformKind::IVec3),
            "4i" => Ok(UniformKind::IVec4),
            "1fv" => Ok(UniformKind::FloatArray),
            "2fv" => Ok(UniformKind::Vec2Array),
            "3fv" => Ok(UniformKind::Vec3Array),
            "4fv" => Ok(UniformKind::Vec4Array),
            "matrix2fv" => Ok(UniformKind::Mat2),
            "matrix3fv" => Ok(UniformKind::Mat3),
            "matrix4fv" => Ok(UniformKind::Mat4),
            other => Err(RenderError::UnknownUniformKind(other.to_string())),
        }
    }

    /// The wire-format tag for this kind. Inverse of [`UniformKind::from_tag`].
    pub fn tag(&self) -> &'static str {
        match self {
            UniformKind::Float => "1f",
            UniformKind::Vec2 => "2f",
            UniformKind::Vec3 => "3f",
            UniformKind::Vec4 => "4f",
            UniformKind::Int => "1i",
            UniformKind::IVec2 => "2i",
            UniformKind::IVec3 => "3i",
            UniformKind::IVec4 => "4i",
            UniformKind::FloatArray => "1fv",
            UniformKind::Vec2Array => "2fv",
            UniformKind::Vec3Array => "3fv",
            UniformKind::Vec4Array => "4fv",
            UniformKind::Mat2 => "matrix2fv",
            UniformKind::Mat3 => "matrix3fv",
            UniformKind::Mat4 => "matrix4fv",
        }
    }
}

/// A typed uniform value, ready for upload.
///
/// Array variants carry flat component data; matrix variants are column-major
/// and never transposed on upload.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum UniformValue {
    /// Scalar `float`.
    Float(f32),
    /// `vec2`.
    Vec2([f32; 2]),
    /// `vec3`.
    Vec3([f32; 3]),
    /// `vec4`.
    Vec4([f32; 4]),
    /// Scalar `int`.
    Int(i32),
    /// `ivec2`.
    IVec2([i32; 2]),
    /// `ivec3`.
    IVec3([i32; 3]),
    /// `ivec4`.
    IVec4([i32; 4]),
    /// `float[]`, packed flat.
    FloatArray(Vec<f32>),
    /// `vec2[]`, packed flat.
    Vec2Array(Vec<f32>),
    /// `vec3[]`, packed flat.
    Vec3Array(Vec<f32>),
    /// `vec4[]`, packed flat.
    Vec4Array(Vec<f32>),
    /// `mat2`, column-major.
    Mat2([f32; 4]),
    /// `mat3`, column-major.
    Mat3([f32; 9]),
    /// `mat4`, column-major.
    Mat4([f32; 16]),
}

impl UniformValue {
    /// The kind of this value.
    pub fn kind(&self) -> UniformKind {
        match self {
            UniformValue::Float(_) => UniformKind::Float,
            UniformValue::Vec2(_) => UniformKind::Vec2,
            UniformValue::Vec3(_) => UniformKind::Vec3,
            UniformValue::Vec4(_) => UniformKind::Vec4,
            UniformValue::Int(_) => UniformKind::Int,
            UniformValue::IVec2(_) => UniformKind::IVec2,
            UniformValue::IVec3(_) => UniformKind::IVec3,
            UniformValue::IVec4(_) => UniformKind::IVec4,
            UniformValue::FloatArray(_) => UniformKind::FloatArray,
            UniformValue::Vec2Array(_) => UniformKind::Vec2Array,
            UniformValue::Vec3Array(_) => UniformKind::Vec3Array,
            UniformValue::Vec4Array(_) => UniformKind::Vec4Array,
            UniformValue::Mat2(_) => UniformKind::Mat2,
            UniformValue::Mat3(_) => UniformKind::Mat3,
            UniformValue::Mat4(_) => UniformKind::Mat4,
        }
    }

    /// Builds a value from a scalar control reading for the given kind.
    ///
    /// Parameter controls are numeric sliders, so only scalar kinds can be
    /// driven by them. Wiring a control to a vector, array, or matrix
    /// uniform is a defect in the descriptor, not in the widget.
    ///
    /// # Errors
    ///
    /// Returns [`RenderError::UnknownUniformKind`] for non-scalar kinds.
    pub fn from_control_value(kind: UniformKind, value: f64) -> Result<Self, RenderError> {
        match kind {
            UniformKind::Float => Ok(UniformValue::Float(value as f32)),
            UniformKind::Int => Ok(UniformValue::Int(value.round() as i32)),
            other => Err(RenderError::UnknownUniformKind(other.tag().to_string())),
        }
    }
}
