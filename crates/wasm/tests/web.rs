#![cfg(target_arch = "wasm32")]
//! Browser tests for the GPU lifecycle against a real WebGL context.

use shaderfolio_core::render::{ContextApi, FullScreenQuad, ProgramRegistry, Surface};
use shaderfolio_core::{Clock, RenderError, UniformValue};
use shaderfolio_wasm::app::SurfaceRuntime;
use shaderfolio_wasm::context::acquire_context;
use shaderfolio_wasm::schedule::PerformanceClock;
use shaderfolio_wasm::surface::CanvasSurface;
use shaderfolio_core::render::FrameInputs;
use wasm_bindgen::JsCast;
use wasm_bindgen_test::*;

wasm_bindgen_test_configure!(run_in_browser);

const MINIMAL_FRAGMENT: &str = "
precision highp float;
uniform float u_time;
void main() {
    gl_FragColor = vec4(fract(u_time), 0.0, 0.0, 1.0);
}
";

const BROKEN_FRAGMENT: &str = "
precision highp float;
void main() {
    gl_FragColor = vec4(1.0
}
";

fn make_canvas() -> web_sys::HtmlCanvasElement {
    let document = web_sys::window().unwrap().document().unwrap();
    let canvas: web_sys::HtmlCanvasElement = document
        .create_element("canvas")
        .unwrap()
        .dyn_into()
        .unwrap();
    canvas.set_width(64);
    canvas.set_height(64);
    canvas
}

#[wasm_bindgen_test]
fn acquire_prefers_webgl2_when_available() {
    let probe = make_canvas();
    let has_webgl2 = probe.get_context("webgl2").ok().flatten().is_some();

    let gpu = acquire_context(&make_canvas()).expect("a drawing context should be available");

    if has_webgl2 {
        assert_eq!(gpu.api(), ContextApi::WebGl2, "webgl2 must be preferred");
    }
}

#[wasm_bindgen_test]
fn register_bind_set_time_and_draw() {
    let gpu = acquire_context(&make_canvas()).unwrap();
    let gl = gpu.gl();

    let mut registry = ProgramRegistry::new();
    registry
        .register_fragment(gl, "e2e", MINIMAL_FRAGMENT)
        .expect("minimal fragment should compile");
    let quad = FullScreenQuad::new(gl).expect("quad buffers should allocate");

    registry.bind(gl, "e2e").expect("bind registered program");
    registry.bind_quad_attributes(gl, "e2e", &quad).unwrap();
    registry
        .set_uniform(gl, "e2e", "u_time", &UniformValue::Float(1.5))
        .unwrap();
    quad.draw(gl);

    assert_eq!(registry.current(), Some("e2e"));

    use glow::HasContext;
    let error = unsafe { gl.get_error() };
    assert_eq!(error, glow::NO_ERROR, "draw must leave no GL error");

    registry.unregister_all(gl);
    quad.destroy(gl);
}

#[wasm_bindgen_test]
fn broken_fragment_reports_compile_error_and_registers_nothing() {
    let gpu = acquire_context(&make_canvas()).unwrap();
    let gl = gpu.gl();
    let mut registry = ProgramRegistry::new();

    let err = registry
        .register_fragment(gl, "broken", BROKEN_FRAGMENT)
        .expect_err("broken fragment must not compile");

    match err {
        RenderError::Compile { stage, log } => {
            assert_eq!(stage, "fragment");
            assert!(!log.is_empty(), "compile error must carry a log");
        }
        other => panic!("expected a compile error, got: {other:?}"),
    }

    assert!(!registry.contains("broken"), "no partial entry may remain");
    assert!(matches!(
        registry.bind(gl, "broken"),
        Err(RenderError::MissingProgram(_))
    ));
}

#[wasm_bindgen_test]
fn uniform_slot_is_queried_once() {
    let gpu = acquire_context(&make_canvas()).unwrap();
    let gl = gpu.gl();
    let mut registry = ProgramRegistry::new();
    registry.register_fragment(gl, "memo", MINIMAL_FRAGMENT).unwrap();

    let first = registry.uniform_slot(gl, "memo", "u_time").unwrap();
    let second = registry.uniform_slot(gl, "memo", "u_time").unwrap();

    assert!(first.is_some(), "u_time is declared and read");
    assert!(second.is_some());
    assert_eq!(
        registry.cached_uniform_slots("memo"),
        Some(1),
        "two lookups must resolve to one cached entry"
    );
}

#[wasm_bindgen_test]
fn absent_uniform_is_cached_and_set_is_a_noop() {
    let gpu = acquire_context(&make_canvas()).unwrap();
    let gl = gpu.gl();
    let mut registry = ProgramRegistry::new();
    registry.register_fragment(gl, "sparse", MINIMAL_FRAGMENT).unwrap();
    registry.bind(gl, "sparse").unwrap();

    let slot = registry.uniform_slot(gl, "sparse", "u_resolution").unwrap();
    assert!(slot.is_none(), "u_resolution is not declared in the source");

    // Writing to the absent uniform is a clean no-op.
    registry
        .set_uniform(gl, "sparse", "u_resolution", &UniformValue::Vec2([64.0, 64.0]))
        .unwrap();
    assert_eq!(registry.cached_uniform_slots("sparse"), Some(1));

    use glow::HasContext;
    assert_eq!(unsafe { gl.get_error() }, glow::NO_ERROR);
}

#[wasm_bindgen_test]
fn distinct_programs_do_not_share_slot_caches() {
    let gpu = acquire_context(&make_canvas()).unwrap();
    let gl = gpu.gl();
    let mut registry = ProgramRegistry::new();
    registry.register_fragment(gl, "left", MINIMAL_FRAGMENT).unwrap();
    registry.register_fragment(gl, "right", MINIMAL_FRAGMENT).unwrap();

    registry.uniform_slot(gl, "left", "u_time").unwrap();
    registry.attribute_slot(gl, "left", "a_position").unwrap();

    assert_eq!(registry.cached_uniform_slots("left"), Some(1));
    assert_eq!(registry.cached_attribute_slots("left"), Some(1));
    assert_eq!(
        registry.cached_uniform_slots("right"),
        Some(0),
        "resolving one program's slots must not touch the other's cache"
    );
    assert_eq!(registry.cached_attribute_slots("right"), Some(0));
}

#[wasm_bindgen_test]
fn unregister_all_twice_is_safe_and_bind_fails_after() {
    let gpu = acquire_context(&make_canvas()).unwrap();
    let gl = gpu.gl();
    let mut registry = ProgramRegistry::new();
    registry.register_fragment(gl, "gone", MINIMAL_FRAGMENT).unwrap();
    registry.bind(gl, "gone").unwrap();

    registry.unregister_all(gl);
    registry.unregister_all(gl);

    assert!(registry.is_empty());
    assert_eq!(registry.current(), None, "current must clear with its entry");
    assert!(matches!(
        registry.bind(gl, "gone"),
        Err(RenderError::MissingProgram(_))
    ));
}

#[wasm_bindgen_test]
fn every_catalog_source_compiles_and_links() {
    let gpu = acquire_context(&make_canvas()).unwrap();
    let gl = gpu.gl();
    let mut registry = ProgramRegistry::new();

    for def in shaderfolio_catalog::builtin().entries() {
        registry
            .register_fragment(gl, &def.id, &def.fragment_source)
            .unwrap_or_else(|e| panic!("'{}' failed to build: {e}", def.id));
    }

    assert_eq!(registry.len(), shaderfolio_catalog::builtin().len());
}

#[wasm_bindgen_test]
fn featured_definition_renders_one_frame() {
    let definition = shaderfolio_catalog::builtin()
        .featured()
        .expect("catalog is not empty");
    let clock = PerformanceClock::new().unwrap();

    let mut runtime = SurfaceRuntime::init(make_canvas(), definition, "hero-test", 1.0, &clock)
        .expect("surface init");
    runtime
        .render_frame(&clock, FrameInputs::default())
        .expect("frame renders");
    runtime.teardown();
}

#[wasm_bindgen_test]
fn canvas_surface_backing_round_trip() {
    let mut surface = CanvasSurface::new(make_canvas());
    assert_eq!(surface.backing_size(), (64, 64));

    surface.set_backing_size(128, 32);
    assert_eq!(surface.backing_size(), (128, 32));
}

#[wasm_bindgen_test]
fn performance_clock_never_goes_backwards() {
    let clock = PerformanceClock::new().unwrap();
    let a = clock.now_ms();
    let b = clock.now_ms();
    assert!(b >= a, "clock went backwards: {a} -> {b}");
}
