//! Drawing-surface abstraction and the backing-buffer resize policy.
//!
//! A surface is anything with a layout size and a resizable backing-buffer
//! pixel size; the browser front end implements this for a canvas element.
//! Keeping the trait here lets the resize decision be tested without a DOM.

/// A drawable pixel area with separate layout and backing-buffer sizes.
pub trait Surface {
    /// Current layout size in CSS pixels (what the page gives the surface).
    fn display_size(&self) -> (u32, u32);

    /// Current backing-buffer size in device pixels.
    fn backing_size(&self) -> (u32, u32);

    /// Reallocates the backing buffer at the given size.
    fn set_backing_size(&mut self, width: u32, height: u32);
}

/// Resizes the backing buffer to match the layout size, only on mismatch.
///
/// Returns whether a resize happened. Called every tick; the mismatch check
/// is what keeps the per-frame cost at a comparison instead of a
/// reallocation.
pub fn resize_to_display(surface: &mut dyn Surface) -> bool {
    let (display_w, display_h) = surface.display_size();
    let changed = surface.backing_size() != (display_w, display_h);

    if changed {
        surface.set_backing_size(display_w, display_h);
    }

    changed
}
