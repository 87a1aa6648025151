//! Page orchestration: hero surface, gallery previews, detail view, and
//! parameter controls.
//!
//! Each surface owns its own context, registry, quad, and driver; the only
//! state shared across surfaces is the pointer position and the clock. At
//! most one surface animates at a time (the hero, or the detail view that
//! replaces it); previews render a single frame and release their GPU
//! objects immediately.

use std::cell::RefCell;
use std::rc::Rc;

use shaderfolio_core::definition::ControlDescriptor;
use shaderfolio_core::render::{
    FrameInputs, FullScreenQuad, GpuContext, ProgramRegistry, RenderDriver,
};
use shaderfolio_core::{
    Clock, FrameTimer, RenderError, ShaderDefinition, UniformValue, SPEED_CONTROL,
};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Document, Element, HtmlCanvasElement, HtmlInputElement};

use crate::context::acquire_context;
use crate::input::{track_pointer, PointerState};
use crate::schedule::{self, AnimationHandle, PerformanceClock};
use crate::surface::CanvasSurface;

/// Preview canvas size when the container has no layout yet.
const PREVIEW_FALLBACK: (u32, u32) = (300, 200);

/// Previews animate at half speed.
const PREVIEW_SPEED: f64 = 0.5;

/// Everything one rendering surface owns. Torn down as a unit.
pub struct SurfaceRuntime {
    gpu: GpuContext,
    registry: ProgramRegistry,
    quad: FullScreenQuad,
    driver: RenderDriver,
    surface: CanvasSurface,
    definition: &'static ShaderDefinition,
}

impl SurfaceRuntime {
    /// Acquires a context on `canvas` and registers `definition`'s
    /// fragment source under `program_name`.
    ///
    /// # Errors
    ///
    /// Returns [`RenderError::ContextUnsupported`] when no drawing API is
    /// available, or a compile/link error from the shader source. Either
    /// way no GPU state is left behind.
    pub fn init(
        canvas: HtmlCanvasElement,
        definition: &'static ShaderDefinition,
        program_name: &str,
        speed_factor: f64,
        clock: &dyn Clock,
    ) -> Result<Self, RenderError> {
        let gpu = acquire_context(&canvas)?;

        let mut registry = ProgramRegistry::new();
        registry.register_fragment(gpu.gl(), program_name, &definition.fragment_source)?;

        let quad = FullScreenQuad::new(gpu.gl())?;
        let driver = RenderDriver::new(program_name, FrameTimer::with_speed(clock, speed_factor));

        Ok(Self {
            gpu,
            registry,
            quad,
            driver,
            surface: CanvasSurface::new(canvas),
            definition,
        })
    }

    /// Renders one frame.
    ///
    /// # Errors
    ///
    /// Propagates registry errors; see [`RenderDriver::tick`].
    pub fn render_frame(&mut self, clock: &dyn Clock, inputs: FrameInputs) -> Result<(), RenderError> {
        self.driver.tick(
            self.gpu.gl(),
            clock,
            &mut self.registry,
            &self.quad,
            &mut self.surface,
            self.definition,
            inputs,
        )
    }

    /// Applies a control change: the reserved speed control adjusts the
    /// frame timer, a bound uniform receives the value, and anything else
    /// is ignored.
    pub fn apply_control(&mut self, control: &ControlDescriptor, value: f64) {
        if control.name == SPEED_CONTROL {
            self.driver.set_speed_factor(value);
            return;
        }

        let (Some(uniform), Some(kind)) = (&control.uniform, control.uniform_kind) else {
            return;
        };

        match UniformValue::from_control_value(kind, value) {
            Ok(v) => {
                let name = self.driver.program_name().to_string();
                if let Err(e) = self.registry.set_uniform(self.gpu.gl(), &name, uniform, &v) {
                    log::error!("control '{}' failed: {e}", control.name);
                }
            }
            Err(e) => log::error!("control '{}' cannot drive '{uniform}': {e}", control.name),
        }
    }

    /// Releases the registered programs and quad buffers. Cancel the
    /// surface's tick before calling.
    pub fn teardown(&mut self) {
        self.registry.unregister_all(self.gpu.gl());
        self.quad.destroy(self.gpu.gl());
    }
}

/// The animated surface currently on screen (hero or detail view).
struct ActiveSurface {
    handle: AnimationHandle,
    runtime: Rc<RefCell<SurfaceRuntime>>,
}

/// The portfolio application.
pub struct App {
    document: Document,
    clock: Rc<PerformanceClock>,
    pointer: Rc<RefCell<PointerState>>,
    active: RefCell<Option<ActiveSurface>>,
    saved_main: RefCell<Option<String>>,
}

impl App {
    /// Builds the page: hero surface plus gallery previews. Returns after
    /// wiring; the app stays alive through the event closures that hold it.
    ///
    /// # Errors
    ///
    /// Fails only when the performance clock is unavailable.
    pub fn start(document: Document) -> Result<(), JsValue> {
        let app = Rc::new(App {
            document,
            clock: Rc::new(PerformanceClock::new()?),
            pointer: Rc::new(RefCell::new(PointerState::default())),
            active: RefCell::new(None),
            saved_main: RefCell::new(None),
        });

        app.init_hero();
        app.init_gallery();

        Ok(())
    }

    /// Starts the featured shader in the hero container.
    fn init_hero(self: &Rc<Self>) {
        let Some(container) = self.document.get_element_by_id("hero-shader") else {
            return;
        };
        container.set_inner_html("");

        let Some(definition) = shaderfolio_catalog::builtin().featured() else {
            return;
        };

        self.start_animated_surface(&container, definition, definition.id.clone());
    }

    /// Rebuilds the gallery grid with one preview per catalog entry.
    fn init_gallery(self: &Rc<Self>) {
        let Some(grid) = self.document.query_selector(".gallery-grid").ok().flatten() else {
            return;
        };
        grid.set_inner_html("");

        for definition in shaderfolio_catalog::builtin().entries() {
            if let Err(e) = self.add_gallery_item(&grid, definition) {
                log::error!("gallery item for '{}' failed: {e:?}", definition.id);
            }
        }
    }

    fn add_gallery_item(
        self: &Rc<Self>,
        grid: &Element,
        definition: &'static ShaderDefinition,
    ) -> Result<(), JsValue> {
        let item = self.document.create_element("div")?;
        item.set_class_name("gallery-item");

        let tags: String = definition
            .tags
            .iter()
            .map(|t| format!(r#"<span class="gallery-item-tag">{t}</span>"#))
            .collect();
        item.set_inner_html(&format!(
            r#"<div class="gallery-item-preview"></div>
<div class="gallery-item-info">
    <h3>{name}</h3>
    <p>{description}</p>
    <div class="gallery-item-tags">{tags}</div>
</div>"#,
            name = definition.name,
            description = definition.description,
        ));
        grid.append_child(&item)?;

        if let Some(preview) = item.query_selector(".gallery-item-preview")? {
            self.render_preview(&preview, definition);
        }

        let on_click = {
            let app = self.clone();
            let id = definition.id.clone();
            Closure::wrap(Box::new(move |_: web_sys::MouseEvent| {
                app.open_detail(&id);
            }) as Box<dyn FnMut(web_sys::MouseEvent)>)
        };
        item.add_event_listener_with_callback("click", on_click.as_ref().unchecked_ref())?;
        on_click.forget();

        Ok(())
    }

    /// Renders one half-speed preview frame, then releases the GPU
    /// objects. The pixels stay on the canvas.
    fn render_preview(&self, container: &Element, definition: &'static ShaderDefinition) {
        let canvas = match self.create_canvas(container, Some(PREVIEW_FALLBACK)) {
            Ok(c) => c,
            Err(e) => {
                log::error!("preview canvas for '{}' failed: {e:?}", definition.id);
                return;
            }
        };

        let program_name = format!("preview-{}", definition.id);
        let mut runtime = match SurfaceRuntime::init(
            canvas,
            definition,
            &program_name,
            PREVIEW_SPEED,
            &*self.clock,
        ) {
            Ok(r) => r,
            Err(RenderError::ContextUnsupported) => {
                show_context_error(container);
                return;
            }
            Err(e) => {
                show_shader_error(container, &e);
                return;
            }
        };

        if let Err(e) = runtime.render_frame(&*self.clock, FrameInputs::default()) {
            log::error!("preview render for '{}' failed: {e}", definition.id);
        }
        runtime.teardown();
    }

    /// Replaces the page with the detail view for `shader_id`.
    fn open_detail(self: &Rc<Self>, shader_id: &str) {
        let Some(definition) = shaderfolio_catalog::builtin().lookup(shader_id) else {
            log::error!("unknown shader id '{shader_id}'");
            return;
        };
        let Some(main) = self.document.query_selector("main").ok().flatten() else {
            return;
        };

        self.teardown_active();
        *self.saved_main.borrow_mut() = Some(main.inner_html());
        main.set_inner_html(&detail_markup(definition));

        if let Some(back) = self.document.query_selector(".btn-back").ok().flatten() {
            let on_back = {
                let app = self.clone();
                Closure::wrap(Box::new(move |_: web_sys::MouseEvent| {
                    app.close_detail();
                }) as Box<dyn FnMut(web_sys::MouseEvent)>)
            };
            let _ = back.add_event_listener_with_callback("click", on_back.as_ref().unchecked_ref());
            on_back.forget();
        }

        if let Some(container) = self.document.get_element_by_id("detail-shader-container") {
            self.start_animated_surface(&container, definition, format!("detail-{}", definition.id));
        }

        self.wire_controls(definition);

        if let Some(window) = web_sys::window() {
            window.scroll_to_with_x_and_y(0.0, 0.0);
        }
    }

    /// Tears down the detail view and restores the gallery page.
    fn close_detail(self: &Rc<Self>) {
        self.teardown_active();

        if let Some(main) = self.document.query_selector("main").ok().flatten() {
            if let Some(saved) = self.saved_main.borrow_mut().take() {
                main.set_inner_html(&saved);
            }
        }

        // Restored markup carries no listeners; rebuild both sections.
        self.init_gallery();
        self.init_hero();
    }

    /// Creates a canvas sized to the container and makes it the active
    /// animated surface, replacing any previous one.
    fn start_animated_surface(
        self: &Rc<Self>,
        container: &Element,
        definition: &'static ShaderDefinition,
        program_name: String,
    ) {
        self.teardown_active();

        let canvas = match self.create_canvas(container, None) {
            Ok(c) => c,
            Err(e) => {
                log::error!("canvas creation failed: {e:?}");
                return;
            }
        };

        let runtime = match SurfaceRuntime::init(
            canvas.clone(),
            definition,
            &program_name,
            1.0,
            &*self.clock,
        ) {
            Ok(r) => r,
            Err(RenderError::ContextUnsupported) => {
                show_context_error(container);
                return;
            }
            Err(e) => {
                show_shader_error(container, &e);
                return;
            }
        };

        track_pointer(&canvas, &self.pointer);

        let runtime = Rc::new(RefCell::new(runtime));
        let handle = {
            let runtime = runtime.clone();
            let clock = self.clock.clone();
            let pointer = self.pointer.clone();
            schedule::spawn(move || {
                let inputs = FrameInputs {
                    mouse: pointer.borrow().position(),
                };
                if let Err(e) = runtime.borrow_mut().render_frame(&*clock, inputs) {
                    log::error!("render tick failed: {e}");
                }
            })
        };

        match handle {
            Ok(handle) => {
                *self.active.borrow_mut() = Some(ActiveSurface { handle, runtime });
            }
            Err(e) => log::error!("failed to start animation loop: {e:?}"),
        }
    }

    /// Cancels the scheduled tick, releases the registered programs, then
    /// drops the registry and canvas references, in that order. A queued
    /// tick can never fire against released GPU objects.
    fn teardown_active(&self) {
        if let Some(active) = self.active.borrow_mut().take() {
            active.handle.cancel();
            active.runtime.borrow_mut().teardown();
        }
    }

    /// Wires the detail view's inputs to the active surface.
    fn wire_controls(self: &Rc<Self>, definition: &'static ShaderDefinition) {
        for control in &definition.controls {
            let Some(element) = self
                .document
                .get_element_by_id(&format!("control-{}", control.name))
            else {
                continue;
            };
            let Ok(input) = element.dyn_into::<HtmlInputElement>() else {
                continue;
            };

            let on_input = {
                let app = self.clone();
                let control = control.clone();
                let input = input.clone();
                Closure::wrap(Box::new(move |_: web_sys::Event| {
                    let value = input.value_as_number();
                    if value.is_nan() {
                        return;
                    }
                    if let Some(active) = app.active.borrow().as_ref() {
                        active.runtime.borrow_mut().apply_control(&control, value);
                    }
                }) as Box<dyn FnMut(web_sys::Event)>)
            };
            let _ = input.add_event_listener_with_callback("input", on_input.as_ref().unchecked_ref());
            on_input.forget();
        }
    }

    /// Creates a canvas sized to the container's layout (or the fallback
    /// when the container has none) and appends it.
    fn create_canvas(
        &self,
        container: &Element,
        fallback: Option<(u32, u32)>,
    ) -> Result<HtmlCanvasElement, JsValue> {
        let canvas: HtmlCanvasElement = self.document.create_element("canvas")?.dyn_into()?;

        let mut width = container.client_width().max(0) as u32;
        let mut height = container.client_height().max(0) as u32;
        if let Some((fw, fh)) = fallback {
            if width == 0 {
                width = fw;
            }
            if height == 0 {
                height = fh;
            }
        }
        canvas.set_width(width);
        canvas.set_height(height);

        container.append_child(&canvas)?;
        Ok(canvas)
    }
}

fn detail_markup(definition: &ShaderDefinition) -> String {
    let controls: String = definition
        .controls
        .iter()
        .map(|c| {
            format!(
                r#"<div class="shader-control">
    <label for="control-{name}">{label}</label>
    <input type="{kind}" id="control-{name}" min="{min}" max="{max}" step="{step}" value="{default}">
</div>"#,
                name = c.name,
                label = c.label,
                kind = c.kind.input_type(),
                min = c.min,
                max = c.max,
                step = c.step,
                default = c.default,
            )
        })
        .collect();

    let tags: String = definition
        .tags
        .iter()
        .map(|t| format!(r#"<span class="gallery-item-tag">{t}</span>"#))
        .collect();

    format!(
        r#"<section class="shader-detail">
<div class="container">
    <div class="shader-detail-header">
        <button class="btn-back">&larr; Back</button>
        <h2>{name}</h2>
    </div>
    <div class="shader-detail-container">
        <div class="shader-canvas-container" id="detail-shader-container"></div>
        <div class="shader-controls">
            <h3>Parameters</h3>
            <div id="shader-controls-container">{controls}</div>
        </div>
    </div>
    <div class="shader-info">
        <h3>About</h3>
        <p>{description}</p>
        <div class="shader-tags">{tags}</div>
    </div>
    <div class="shader-code">
        <h3>Fragment Shader</h3>
        <pre>{source}</pre>
    </div>
</div>
</section>"#,
        name = definition.name,
        description = definition.description,
        source = escape_html(&definition.fragment_source),
    )
}

/// Fallback panel when no drawing API is available.
fn show_context_error(container: &Element) {
    container.set_inner_html(
        r#"<div class="error-message">
    <h3>WebGL not supported</h3>
    <p>Your browser does not support WebGL, which is required to view these shaders.</p>
    <p>Please try a modern browser such as Chrome, Firefox, or Edge.</p>
</div>"#,
    );
}

/// Inline panel for a compile or link failure in this surface's shader.
fn show_shader_error(container: &Element, error: &RenderError) {
    container.set_inner_html(&format!(
        r#"<div class="error-message">
    <h3>Shader Error</h3>
    <pre>{}</pre>
</div>"#,
        escape_html(&error.to_string())
    ));
}

fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}
