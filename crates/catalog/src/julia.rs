//! Julia Fractal: an interactive Julia set, steered by the pointer.
//!
//! The Julia parameter follows the pointer when it is over the surface and
//! orbits on a slow circle otherwise. The escape-iteration loop keeps
//! `smoothColor == 0.0` as the "never escaped" sentinel; a point escaping
//! exactly at iteration 0 is indistinguishable from non-escape. Preserved
//! deliberately: the rendered set is catalog content, and existing captures
//! of it would change.

use shaderfolio_core::definition::{ControlDescriptor, ControlKind, UniformDeclaration};
use shaderfolio_core::{ShaderDefinition, UniformKind, UniformValue};

const FRAGMENT_SOURCE: &str = r#"
precision highp float;

uniform vec2 u_resolution;
uniform float u_time;
uniform vec2 u_mouse;

varying vec2 v_texCoord;

#define MAX_ITERATIONS 100

vec2 complexMul(vec2 a, vec2 b) {
    return vec2(a.x * b.x - a.y * b.y, a.x * b.y + a.y * b.x);
}

vec3 hsv2rgb(vec3 c) {
    vec4 K = vec4(1.0, 2.0 / 3.0, 1.0 / 3.0, 3.0);
    vec3 p = abs(fract(c.xxx + K.xyz) * 6.0 - K.www);
    return c.z * mix(K.xxx, clamp(p - K.xxx, 0.0, 1.0), c.y);
}

void main() {
    vec2 uv = v_texCoord;
    uv.y = 1.0 - uv.y;

    vec2 c = (uv * 2.0 - 1.0) * 1.5;

    float t = u_time * 0.1;
    vec2 juliaParam;

    // Pointer steers the parameter; otherwise orbit over time.
    if (u_mouse.x > 0.0 || u_mouse.y > 0.0) {
        juliaParam = (u_mouse * 2.0 - 1.0) * 0.8;
    } else {
        juliaParam = vec2(
            0.7 * sin(t),
            0.3 * cos(t)
        );
    }

    vec2 z = c;
    float smoothColor = 0.0;

    // WebGL 1.0 requires the loop variable in the declaration.
    for (int i = 0; i < MAX_ITERATIONS; i++) {
        z = complexMul(z, z) + juliaParam;

        if (dot(z, z) > 4.0) {
            smoothColor = float(i) - log(log(dot(z, z))) / log(2.0);
            break;
        }
    }

    // smoothColor stays 0.0 when the point never escaped.
    if (smoothColor == 0.0) {
        gl_FragColor = vec4(0.0, 0.0, 0.0, 1.0);
    } else {
        float hue = smoothColor / 100.0 + t * 0.5;
        vec3 color = hsv2rgb(vec3(hue, 0.8, 1.0));

        gl_FragColor = vec4(color, 1.0);
    }
}
"#;

/// The Julia Fractal catalog entry.
pub fn definition() -> ShaderDefinition {
    ShaderDefinition {
        id: "fractal-julia".into(),
        name: "Julia Fractal".into(),
        description: "An interactive Julia set fractal".into(),
        tags: vec!["fractal".into(), "mathematics".into(), "complex".into()],
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
        controls: vec![
            // Rendered but inert: neither maps to a uniform the source
            // reads (the iteration cap is a compile-time constant).
            ControlDescriptor {
                name: "iterations".into(),
                label: "Iterations".into(),
                kind: ControlKind::Range,
                min: 10.0,
                max: 200.0,
                step: 10.0,
                default: 100.0,
                uniform: None,
                uniform_kind: None,
            },
            ControlDescriptor {
                name: "zoom".into(),
                label: "Zoom".into(),
                kind: ControlKind::Range,
                min: 0.5,
                max: 3.0,
                step: 0.1,
                default: 1.5,
                uniform: None,
                uniform_kind: None,
            },
        ],
    }
}
