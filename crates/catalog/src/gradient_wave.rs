//! Gradient Wave: animated two-color gradient distorted by sine waves.
//!
//! The featured hero shader. Declares `u_mouse` for uniformity with the
//! rest of the collection even though the source does not read it; the
//! registry caches the absent slot after one warning.

use shaderfolio_core::definition::{ControlDescriptor, ControlKind, UniformDeclaration};
use shaderfolio_core::{ShaderDefinition, UniformKind, UniformValue, SPEED_CONTROL};

const FRAGMENT_SOURCE: &str = r#"
precision highp float;

uniform vec2 u_resolution;
uniform float u_time;

varying vec2 v_texCoord;

void main() {
    vec2 uv = v_texCoord;
    uv.y = 1.0 - uv.y;

    float frequency = 10.0;
    float amplitude = 0.1;
    float wave1 = sin(uv.x * frequency + u_time) * amplitude;
    float wave2 = sin(uv.y * frequency + u_time * 0.7) * amplitude;

    vec3 color1 = vec3(0.2, 0.7, 0.9);
    vec3 color2 = vec3(0.9, 0.2, 0.5);

    vec3 color = mix(
        color1,
        color2,
        sin(uv.x * 3.14159 + wave1 + wave2 + u_time * 0.5) * 0.5 + 0.5
    );

    color += 0.1 * sin(u_time + uv.y * 20.0);

    gl_FragColor = vec4(color, 1.0);
}
"#;

/// The Gradient Wave catalog entry.
pub fn definition() -> ShaderDefinition {
    ShaderDefinition {
        id: "gradient-wave".into(),
        name: "Gradient Wave".into(),
        description: "Colorful gradient waves drifting across the surface".into(),
        tags: vec!["gradient".into(), "animation".into(), "wave".into()],
        fragment_source: FRAGMENT_SOURCE.into(),
        uniforms: vec![
            UniformDeclaration {
                name: "u_time".into(),
                kind: UniformKind::Float,
                default: UniformValue::Float(0.0),
            },
            UniformDeclaration {
                name: "u_resolution".into(),
                kind: UniformKind::Vec2,
                default: UniformValue::Vec2([0.0, 0.0]),
            },
            UniformDeclaration {
                name: "u_mouse".into(),
                kind: UniformKind::Vec2,
                default: UniformValue::Vec2([0.0, 0.0]),
            },
        ],
        controls: vec![ControlDescriptor {
            name: SPEED_CONTROL.into(),
            label: "Speed".into(),
            kind: ControlKind::Range,
            min: 0.1,
            max: 2.0,
            step: 0.1,
            default: 1.0,
            uniform: None,
            uniform_kind: None,
        }],
    }
}
