//! The static full-screen quad shared by all fragment-shader effects.
//!
//! Four vertices in triangle-strip order cover the viewport: positions in
//! [-1,1]^2 and texture coordinates in [0,1]^2, each in its own STATIC_DRAW
//! buffer. The pair is built once per surface and reused every frame; it is
//! never reallocated during the render loop.

use crate::error::RenderError;

/// Layout metadata for binding one of the quad's buffers to a vertex
/// attribute: component count, component type, and packing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VertexLayout {
    /// Components per vertex.
    pub size: i32,
    /// GL component type (e.g. `glow::FLOAT`).
    pub data_type: u32,
    /// Whether integer data should be normalized.
    pub normalized: bool,
    /// Byte stride between vertices; 0 means tightly packed.
    pub stride: i32,
    /// Byte offset of the first component.
    pub offset: i32,
}

impl VertexLayout {
    /// Layout for a tightly-packed buffer of 2-component f32 vertices.
    pub fn vec2_f32() -> Self {
        Self {
            size: 2,
            data_type: glow::FLOAT,
            normalized: false,
            stride: 0,
            offset: 0,
        }
    }
}

/// Vertex count of the quad.
pub const QUAD_VERTEX_COUNT: i32 = 4;

/// Clip-space positions, triangle-strip order.
pub const QUAD_POSITIONS: [f32; 8] = [
    -1.0, -1.0, //
    1.0, -1.0, //
    -1.0, 1.0, //
    1.0, 1.0,
];

/// Texture coordinates matching [`QUAD_POSITIONS`].
pub const QUAD_TEX_COORDS: [f32; 8] = [
    0.0, 0.0, //
    1.0, 0.0, //
    0.0, 1.0, //
    1.0, 1.0,
];

/// The two static vertex buffers plus their layout metadata.
pub struct FullScreenQuad {
    position_buffer: glow::Buffer,
    tex_coord_buffer: glow::Buffer,
    position_layout: VertexLayout,
    tex_coord_layout: VertexLayout,
}

impl FullScreenQuad {
    /// Allocates and fills both buffers.
    ///
    /// # Errors
    ///
    /// Returns [`RenderError::Resource`] if a buffer cannot be created.
    #[allow(unsafe_code)]
    pub fn new(gl: &glow::Context) -> Result<Self, RenderError> {
        let position_buffer = create_static_buffer(gl, &QUAD_POSITIONS)?;
        let tex_coord_buffer = match create_static_buffer(gl, &QUAD_TEX_COORDS) {
            Ok(b) => b,
            Err(e) => {
                use glow::HasContext;
                // SAFETY: position_buffer is a valid handle from a
                // successful create_static_buffer call.
                unsafe { gl.delete_buffer(position_buffer) };
                return Err(e);
            }
        };

        Ok(Self {
            position_buffer,
            tex_coord_buffer,
            position_layout: VertexLayout::vec2_f32(),
            tex_coord_layout: VertexLayout::vec2_f32(),
        })
    }

    /// The position buffer handle.
    pub fn position_buffer(&self) -> glow::Buffer {
        self.position_buffer
    }

    /// The texture-coordinate buffer handle.
    pub fn tex_coord_buffer(&self) -> glow::Buffer {
        self.tex_coord_buffer
    }

    /// Layout of the position buffer.
    pub fn position_layout(&self) -> VertexLayout {
        self.position_layout
    }

    /// Layout of the texture-coordinate buffer.
    pub fn tex_coord_layout(&self) -> VertexLayout {
        self.tex_coord_layout
    }

    /// Issues the draw call over the quad's vertices.
    #[allow(unsafe_code)]
    pub fn draw(&self, gl: &glow::Context) {
        use glow::HasContext;

        // SAFETY: draw_arrays over a constant vertex count; the caller has
        // bound a program and the quad's attributes.
        unsafe {
            gl.draw_arrays(glow::TRIANGLE_STRIP, 0, QUAD_VERTEX_COUNT);
        }
    }

    /// Releases both GPU buffers. Call before dropping for deterministic
    /// cleanup; GL objects have no destructor of their own.
    #[allow(unsafe_code)]
    pub fn destroy(&self, gl: &glow::Context) {
        use glow::HasContext;

        // SAFETY: both handles are valid buffers created in new().
        unsafe {
            gl.delete_buffer(self.position_buffer);
            gl.delete_buffer(self.tex_coord_buffer);
        }
    }
}

/// Creates a STATIC_DRAW array buffer filled with `data`.
#[allow(unsafe_code)]
fn create_static_buffer(gl: &glow::Context, data: &[f32]) -> Result<glow::Buffer, RenderError> {
    use glow::HasContext;

    // SAFETY: glow wraps raw GL calls as unsafe. The buffer is bound before
    // upload and the byte view of `data` is valid for the call's duration.
    unsafe {
        let buffer = gl.create_buffer().map_err(RenderError::Resource)?;
        gl.bind_buffer(glow::ARRAY_BUFFER, Some(buffer));
        gl.buffer_data_u8_slice(
            glow::ARRAY_BUFFER,
            bytemuck::cast_slice(data),
            glow::STATIC_DRAW,
        );
        Ok(buffer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn positions_cover_clip_space_corners() {
        let corners: Vec<(f32, f32)> = QUAD_POSITIONS
            .chunks(2)
            .map(|c| (c[0], c[1]))
            .collect();
        assert_eq!(corners.len(), QUAD_VERTEX_COUNT as usize);
        for (x, y) in &corners {
            assert!(
                x.abs() == 1.0 && y.abs() == 1.0,
                "vertex ({x}, {y}) is not a clip-space corner"
            );
        }
    }

    #[test]
    fn tex_coords_stay_in_unit_square() {
        for chunk in QUAD_TEX_COORDS.chunks(2) {
            assert!(
                (0.0..=1.0).contains(&chunk[0]) && (0.0..=1.0).contains(&chunk[1]),
                "tex coord ({}, {}) outside [0,1]^2",
                chunk[0],
                chunk[1]
            );
        }
    }

    #[test]
    fn tex_coords_pair_with_positions() {
        // Vertex i's texcoord must be the [0,1] remap of its position.
        for (pos, tex) in QUAD_POSITIONS.chunks(2).zip(QUAD_TEX_COORDS.chunks(2)) {
            assert_eq!(tex[0], pos[0] * 0.5 + 0.5, "u mismatch for x={}", pos[0]);
            assert_eq!(tex[1], pos[1] * 0.5 + 0.5, "v mismatch for y={}", pos[1]);
        }
    }

    #[test]
    fn vec2_f32_layout_is_tightly_packed() {
        let layout = VertexLayout::vec2_f32();
        assert_eq!(layout.size, 2);
        assert_eq!(layout.data_type, glow::FLOAT);
        assert!(!layout.normalized);
        assert_eq!(layout.stride, 0);
        assert_eq!(layout.offset, 0);
    }

    #[test]
    #[ignore = "requires GL context"]
    fn new_allocates_two_static_buffers() {
        // Would test: FullScreenQuad::new succeeds and both buffer
        // handles are distinct.
    }

    #[test]
    #[ignore = "requires GL context"]
    fn destroy_releases_both_buffers() {
        // Would test: after destroy(), both buffers are deleted.
    }
}
