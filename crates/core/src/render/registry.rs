//! Per-surface program registry: compiled programs keyed by logical name,
//! with memoized attribute/uniform slot lookups.
//!
//! One registry per drawing surface; GPU objects are never shared across
//! surfaces. A logical name moves through Unregistered -> Registered ->
//! (Bound <-> Unbound) -> Deleted; operations on names outside the expected
//! state return error values and never panic.

use std::collections::hash_map::Entry;
use std::collections::HashMap;

use crate::error::RenderError;
use crate::render::quad::{FullScreenQuad, VertexLayout};
use crate::render::shader::compile_program;
use crate::uniform::UniformValue;

/// Attribute name carrying clip-space positions in the default vertex
/// shader.
pub const POSITION_ATTRIBUTE: &str = "a_position";

/// Attribute name carrying texture coordinates in the default vertex shader.
pub const TEX_COORD_ATTRIBUTE: &str = "a_texCoord";

/// Passthrough vertex shader paired with every catalog fragment source.
///
/// WebGL1-compatible (`attribute`/`varying`) so it works unchanged on the
/// fallback API.
pub const DEFAULT_VERTEX_SHADER: &str = "\
attribute vec2 a_position;
attribute vec2 a_texCoord;

varying vec2 v_texCoord;

void main() {
    gl_Position = vec4(a_position, 0.0, 1.0);
    v_texCoord = a_texCoord;
}
";

/// Memoizing slot lookup: each name is queried at most once per program
/// lifetime, and the result (including "absent") is cached.
struct SlotCache<T> {
    slots: HashMap<String, Option<T>>,
}

impl<T: Clone> SlotCache<T> {
    fn new() -> Self {
        Self {
            slots: HashMap::new(),
        }
    }

    /// Returns the cached slot for `name`, running `query` only on the
    /// first access. An absent slot is cached as `None`, so the query (and
    /// any warning it logs) happens exactly once.
    fn get_or_query(&mut self, name: &str, query: impl FnOnce() -> Option<T>) -> Option<T> {
        match self.slots.entry(name.to_string()) {
            Entry::Occupied(entry) => entry.get().clone(),
            Entry::Vacant(entry) => entry.insert(query()).clone(),
        }
    }

    fn len(&self) -> usize {
        self.slots.len()
    }
}

/// A registered program: the linked GPU handle, its slot caches, and the
/// sources it was built from (retained for introspection).
struct ProgramEntry {
    program: glow::Program,
    attributes: SlotCache<u32>,
    uniforms: SlotCache<glow::UniformLocation>,
    vertex_source: String,
    fragment_source: String,
}

/// Maps logical program names to compiled programs for one surface.
pub struct ProgramRegistry {
    programs: HashMap<String, ProgramEntry>,
    current: Option<String>,
}

impl ProgramRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self {
            programs: HashMap::new(),
            current: None,
        }
    }

    /// Compiles and links a program and registers it under `name`.
    ///
    /// On any compile or link failure nothing is stored: a later
    /// [`ProgramRegistry::bind`] of `name` fails with `MissingProgram`.
    /// Re-registering an existing name replaces it and releases the old
    /// GPU program.
    ///
    /// # Errors
    ///
    /// Returns [`RenderError::Compile`] or [`RenderError::Link`] from the
    /// shader compiler.
    #[allow(unsafe_code)]
    pub fn register(
        &mut self,
        gl: &glow::Context,
        name: &str,
        vertex_source: &str,
        fragment_source: &str,
    ) -> Result<(), RenderError> {
        use glow::HasContext;

        let program = compile_program(gl, vertex_source, fragment_source)?;

        let entry = ProgramEntry {
            program,
            attributes: SlotCache::new(),
            uniforms: SlotCache::new(),
            vertex_source: vertex_source.to_string(),
            fragment_source: fragment_source.to_string(),
        };

        if let Some(displaced) = self.programs.insert(name.to_string(), entry) {
            // SAFETY: the displaced handle is a valid program this registry
            // created; it is unreachable after the insert.
            unsafe { gl.delete_program(displaced.program) };
            if self.current.as_deref() == Some(name) {
                self.current = None;
            }
        }

        Ok(())
    }

    /// Registers a fragment-only effect, pairing it with
    /// [`DEFAULT_VERTEX_SHADER`].
    ///
    /// # Errors
    ///
    /// Same as [`ProgramRegistry::register`].
    pub fn register_fragment(
        &mut self,
        gl: &glow::Context,
        name: &str,
        fragment_source: &str,
    ) -> Result<(), RenderError> {
        self.register(gl, name, DEFAULT_VERTEX_SHADER, fragment_source)
    }

    /// Activates `name`'s program on the owning context and records it as
    /// current. Safe to call repeatedly with the same name.
    ///
    /// # Errors
    ///
    /// Returns [`RenderError::MissingProgram`] (also logged) if `name` was
    /// never registered.
    #[allow(unsafe_code)]
    pub fn bind(&mut self, gl: &glow::Context, name: &str) -> Result<(), RenderError> {
        use glow::HasContext;

        let entry = self.programs.get(name).ok_or_else(|| {
            log::error!("cannot bind '{name}': not registered");
            RenderError::MissingProgram(name.to_string())
        })?;

        // SAFETY: entry.program is a valid linked program owned by this
        // registry.
        unsafe { gl.use_program(Some(entry.program)) };
        self.current = Some(name.to_string());

        Ok(())
    }

    /// The logical name of the currently bound program, if any.
    pub fn current(&self) -> Option<&str> {
        self.current.as_deref()
    }

    /// Whether `name` is registered.
    pub fn contains(&self, name: &str) -> bool {
        self.programs.contains_key(name)
    }

    /// Number of registered programs.
    pub fn len(&self) -> usize {
        self.programs.len()
    }

    /// Whether the registry is empty.
    pub fn is_empty(&self) -> bool {
        self.programs.is_empty()
    }

    /// The vertex and fragment sources `name` was registered with.
    pub fn sources(&self, name: &str) -> Option<(&str, &str)> {
        self.programs
            .get(name)
            .map(|e| (e.vertex_source.as_str(), e.fragment_source.as_str()))
    }

    /// Number of attribute names `name`'s cache has resolved (absent slots
    /// included). Introspection for tests and debugging.
    pub fn cached_attribute_slots(&self, name: &str) -> Option<usize> {
        self.programs.get(name).map(|e| e.attributes.len())
    }

    /// Number of uniform names `name`'s cache has resolved (absent slots
    /// included). Introspection for tests and debugging.
    pub fn cached_uniform_slots(&self, name: &str) -> Option<usize> {
        self.programs.get(name).map(|e| e.uniforms.len())
    }

    /// The attribute slot for `attribute` in `name`'s program, memoized.
    ///
    /// `Ok(None)` means the compiled program does not declare the
    /// attribute; that outcome is cached and warned about once, and callers
    /// must skip the binding.
    ///
    /// # Errors
    ///
    /// Returns [`RenderError::MissingProgram`] if `name` is unregistered.
    #[allow(unsafe_code)]
    pub fn attribute_slot(
        &mut self,
        gl: &glow::Context,
        name: &str,
        attribute: &str,
    ) -> Result<Option<u32>, RenderError> {
        use glow::HasContext;

        let entry = self.programs.get_mut(name).ok_or_else(|| {
            log::error!("cannot look up attribute '{attribute}': '{name}' not registered");
            RenderError::MissingProgram(name.to_string())
        })?;

        let program = entry.program;
        Ok(entry.attributes.get_or_query(attribute, || {
            // SAFETY: program is a valid linked program handle.
            let slot = unsafe { gl.get_attrib_location(program, attribute) };
            if slot.is_none() {
                log::warn!("attribute '{attribute}' not found in program '{name}'");
            }
            slot
        }))
    }

    /// The uniform location for `uniform` in `name`'s program, memoized.
    ///
    /// `Ok(None)` means the compiled program does not declare the uniform
    /// (or the linker eliminated it); cached and warned about once.
    ///
    /// # Errors
    ///
    /// Returns [`RenderError::MissingProgram`] if `name` is unregistered.
    #[allow(unsafe_code)]
    pub fn uniform_slot(
        &mut self,
        gl: &glow::Context,
        name: &str,
        uniform: &str,
    ) -> Result<Option<glow::UniformLocation>, RenderError> {
        use glow::HasContext;

        let entry = self.programs.get_mut(name).ok_or_else(|| {
            log::error!("cannot look up uniform '{uniform}': '{name}' not registered");
            RenderError::MissingProgram(name.to_string())
        })?;

        let program = entry.program;
        Ok(entry.uniforms.get_or_query(uniform, || {
            // SAFETY: program is a valid linked program handle.
            let location = unsafe { gl.get_uniform_location(program, uniform) };
            if location.is_none() {
                log::warn!("uniform '{uniform}' not found in program '{name}'");
            }
            location
        }))
    }

    /// Binds the quad's buffers to `name`'s position and texcoord
    /// attributes, describing the vertex layout to the bound program.
    ///
    /// An attribute the shader does not declare is skipped silently (the
    /// slot cache already warned once).
    ///
    /// # Errors
    ///
    /// Returns [`RenderError::MissingProgram`] if `name` is unregistered.
    pub fn bind_quad_attributes(
        &mut self,
        gl: &glow::Context,
        name: &str,
        quad: &FullScreenQuad,
    ) -> Result<(), RenderError> {
        let bindings = [
            (
                POSITION_ATTRIBUTE,
                quad.position_buffer(),
                quad.position_layout(),
            ),
            (
                TEX_COORD_ATTRIBUTE,
                quad.tex_coord_buffer(),
                quad.tex_coord_layout(),
            ),
        ];

        for (attribute, buffer, layout) in bindings {
            if let Some(slot) = self.attribute_slot(gl, name, attribute)? {
                bind_vertex_attribute(gl, slot, buffer, layout);
            }
        }

        Ok(())
    }

    /// Uploads `value` to `uniform` in `name`'s program.
    ///
    /// Dispatch on [`UniformValue`] is exhaustive; there is no
    /// unrecognized-kind path here. A uniform absent from the compiled
    /// program is a silent no-op (warned once at first lookup). The upload
    /// targets the currently bound program, so bind `name` first.
    ///
    /// # Errors
    ///
    /// Returns [`RenderError::MissingProgram`] if `name` is unregistered.
    #[allow(unsafe_code)]
    pub fn set_uniform(
        &mut self,
        gl: &glow::Context,
        name: &str,
        uniform: &str,
        value: &UniformValue,
    ) -> Result<(), RenderError> {
        use glow::HasContext;

        let Some(location) = self.uniform_slot(gl, name, uniform)? else {
            return Ok(());
        };
        let location = Some(&location);

        // SAFETY: location belongs to a program owned by this registry; the
        // slice variants pass component data whose length matches the
        // declared GLSL type.
        unsafe {
            match value {
                UniformValue::Float(v) => gl.uniform_1_f32(location, *v),
                UniformValue::Vec2(v) => gl.uniform_2_f32(location, v[0], v[1]),
                UniformValue::Vec3(v) => gl.uniform_3_f32(location, v[0], v[1], v[2]),
                UniformValue::Vec4(v) => gl.uniform_4_f32(location, v[0], v[1], v[2], v[3]),
                UniformValue::Int(v) => gl.uniform_1_i32(location, *v),
                UniformValue::IVec2(v) => gl.uniform_2_i32(location, v[0], v[1]),
                UniformValue::IVec3(v) => gl.uniform_3_i32(location, v[0], v[1], v[2]),
                UniformValue::IVec4(v) => gl.uniform_4_i32(location, v[0], v[1], v[2], v[3]),
                UniformValue::FloatArray(v) => gl.uniform_1_f32_slice(location, v),
                UniformValue::Vec2Array(v) => gl.uniform_2_f32_slice(location, v),
                UniformValue::Vec3Array(v) => gl.uniform_3_f32_slice(location, v),
                UniformValue::Vec4Array(v) => gl.uniform_4_f32_slice(location, v),
                UniformValue::Mat2(v) => gl.uniform_matrix_2_f32_slice(location, false, v),
                UniformValue::Mat3(v) => gl.uniform_matrix_3_f32_slice(location, false, v),
                UniformValue::Mat4(v) => gl.uniform_matrix_4_f32_slice(location, false, v),
            }
        }

        Ok(())
    }

    /// Releases `name`'s GPU program and removes the entry. Clears the
    /// current binding if it pointed at `name`. No-op for absent names.
    #[allow(unsafe_code)]
    pub fn unregister(&mut self, gl: &glow::Context, name: &str) {
        use glow::HasContext;

        if let Some(entry) = self.programs.remove(name) {
            // SAFETY: entry.program is a valid program owned by this
            // registry; nothing references it after removal.
            unsafe { gl.delete_program(entry.program) };

            if self.current.as_deref() == Some(name) {
                self.current = None;
            }
        }
    }

    /// Releases every registered program. Idempotent.
    pub fn unregister_all(&mut self, gl: &glow::Context) {
        let names: Vec<String> = self.programs.keys().cloned().collect();
        for name in names {
            self.unregister(gl, &name);
        }
    }
}

impl Default for ProgramRegistry {
    fn default() -> Self {
        Self::new()
    }
}

/// Binds `buffer` to `slot` and describes `layout` to the bound program.
#[allow(unsafe_code)]
fn bind_vertex_attribute(gl: &glow::Context, slot: u32, buffer: glow::Buffer, layout: VertexLayout) {
    use glow::HasContext;

    // SAFETY: slot came from a successful get_attrib_location on a program
    // of this context; buffer is one of the quad's live buffers.
    unsafe {
        gl.bind_buffer(glow::ARRAY_BUFFER, Some(buffer));
        gl.enable_vertex_attrib_array(slot);
        gl.vertex_attrib_pointer_f32(
            slot,
            layout.size,
            layout.data_type,
            layout.normalized,
            layout.stride,
            layout.offset,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // --- SlotCache: the memoization core, testable without a context ---

    #[test]
    fn slot_cache_queries_once_per_name() {
        let mut cache: SlotCache<u32> = SlotCache::new();
        let mut calls = 0;

        let first = cache.get_or_query("a_position", || {
            calls += 1;
            Some(3)
        });
        let second = cache.get_or_query("a_position", || {
            calls += 1;
            Some(99)
        });

        assert_eq!(first, Some(3));
        assert_eq!(second, Some(3), "second lookup must return the cached slot");
        assert_eq!(calls, 1, "query must run exactly once per name");
    }

    #[test]
    fn slot_cache_remembers_absent_slots() {
        let mut cache: SlotCache<u32> = SlotCache::new();
        let mut calls = 0;

        for _ in 0..3 {
            let slot = cache.get_or_query("u_missing", || {
                calls += 1;
                None
            });
            assert_eq!(slot, None);
        }

        assert_eq!(calls, 1, "absent slots must also be queried exactly once");
    }

    #[test]
    fn slot_cache_tracks_names_independently() {
        let mut cache: SlotCache<u32> = SlotCache::new();
        cache.get_or_query("a_position", || Some(0));
        cache.get_or_query("a_texCoord", || Some(1));

        assert_eq!(cache.len(), 2);
        assert_eq!(cache.get_or_query("a_position", || None), Some(0));
        assert_eq!(cache.get_or_query("a_texCoord", || None), Some(1));
    }

    // --- Registry bookkeeping without a live context ---

    #[test]
    fn new_registry_is_empty_with_no_current() {
        let registry = ProgramRegistry::new();
        assert!(registry.is_empty());
        assert_eq!(registry.current(), None);
        assert!(!registry.contains("hero"));
    }

    #[test]
    fn introspection_on_unregistered_name_is_none() {
        let registry = ProgramRegistry::new();
        assert!(registry.sources("hero").is_none());
        assert!(registry.cached_attribute_slots("hero").is_none());
        assert!(registry.cached_uniform_slots("hero").is_none());
    }

    #[test]
    fn default_vertex_shader_declares_both_quad_attributes() {
        assert!(DEFAULT_VERTEX_SHADER.contains(POSITION_ATTRIBUTE));
        assert!(DEFAULT_VERTEX_SHADER.contains(TEX_COORD_ATTRIBUTE));
        assert!(DEFAULT_VERTEX_SHADER.contains("varying vec2 v_texCoord"));
    }

    // --- GL-dependent paths ---
    // Register/bind/set_uniform against a real context are covered by the
    // browser tests in the wasm crate.

    #[test]
    #[ignore = "requires GL context"]
    fn register_failure_leaves_no_partial_entry() {
        // Would test: register with a bad fragment source returns
        // Err(Compile) and a later bind fails with MissingProgram.
    }

    #[test]
    #[ignore = "requires GL context"]
    fn unregister_all_twice_is_safe() {
        // Would test: two consecutive unregister_all calls, then bind
        // fails with MissingProgram.
    }

    #[test]
    #[ignore = "requires GL context"]
    fn distinct_names_do_not_share_slot_caches() {
        // Would test: resolving a uniform for one name leaves the other
        // name's cached_uniform_slots at zero.
    }
}
