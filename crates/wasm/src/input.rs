//! Pointer and touch tracking, normalized to surface coordinates.
//!
//! The pointer position is the only mutable value shared across surfaces.
//! This module owns the writes; render ticks read a snapshot each frame.

use glam::Vec2;

/// Resting position when the pointer is outside the surface.
const POINTER_REST: Vec2 = Vec2::new(0.5, 0.5);

/// Last known pointer position, normalized to [0,1]^2 over the tracked
/// surface.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerState {
    position: Vec2,
}

impl Default for PointerState {
    fn default() -> Self {
        Self {
            position: POINTER_REST,
        }
    }
}

impl PointerState {
    /// Current normalized position.
    pub fn position(&self) -> Vec2 {
        self.position
    }

    /// Records a normalized position.
    pub fn set(&mut self, x: f32, y: f32) {
        self.position = Vec2::new(x, y);
    }

    /// Returns the pointer to the resting center position.
    pub fn reset(&mut self) {
        self.position = POINTER_REST;
    }
}

#[cfg(target_arch = "wasm32")]
mod tracking {
    use super::PointerState;
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::closure::Closure;
    use wasm_bindgen::JsCast;
    use web_sys::{HtmlCanvasElement, MouseEvent, TouchEvent};

    /// Wires mouse and touch listeners on the canvas to the shared pointer
    /// state. Listener closures live as long as the page.
    pub fn track_pointer(canvas: &HtmlCanvasElement, pointer: &Rc<RefCell<PointerState>>) {
        let on_mouse_move = {
            let canvas = canvas.clone();
            let pointer = pointer.clone();
            Closure::wrap(Box::new(move |event: MouseEvent| {
                let rect = canvas.get_bounding_client_rect();
                if rect.width() > 0.0 && rect.height() > 0.0 {
                    let x = (f64::from(event.client_x()) - rect.left()) / rect.width();
                    let y = (f64::from(event.client_y()) - rect.top()) / rect.height();
                    pointer.borrow_mut().set(x as f32, y as f32);
                }
            }) as Box<dyn FnMut(MouseEvent)>)
        };

        let on_mouse_leave = {
            let pointer = pointer.clone();
            Closure::wrap(Box::new(move |_: MouseEvent| {
                pointer.borrow_mut().reset();
            }) as Box<dyn FnMut(MouseEvent)>)
        };

        let on_touch_move = {
            let canvas = canvas.clone();
            let pointer = pointer.clone();
            Closure::wrap(Box::new(move |event: TouchEvent| {
                event.prevent_default();
                let Some(touch) = event.touches().get(0) else {
                    return;
                };
                let rect = canvas.get_bounding_client_rect();
                if rect.width() > 0.0 && rect.height() > 0.0 {
                    let x = (f64::from(touch.client_x()) - rect.left()) / rect.width();
                    let y = (f64::from(touch.client_y()) - rect.top()) / rect.height();
                    pointer.borrow_mut().set(x as f32, y as f32);
                }
            }) as Box<dyn FnMut(TouchEvent)>)
        };

        let on_touch_end = {
            let pointer = pointer.clone();
            Closure::wrap(Box::new(move |_: TouchEvent| {
                pointer.borrow_mut().reset();
            }) as Box<dyn FnMut(TouchEvent)>)
        };

        let listeners: [(&str, &js_sys::Function); 4] = [
            ("mousemove", on_mouse_move.as_ref().unchecked_ref()),
            ("mouseleave", on_mouse_leave.as_ref().unchecked_ref()),
            ("touchmove", on_touch_move.as_ref().unchecked_ref()),
            ("touchend", on_touch_end.as_ref().unchecked_ref()),
        ];
        for (event, callback) in listeners {
            if let Err(e) = canvas.add_event_listener_with_callback(event, callback) {
                log::warn!("failed to attach {event} listener: {e:?}");
            }
        }

        // The canvas outlives this call; keep the closures alive with it.
        on_mouse_move.forget();
        on_mouse_leave.forget();
        on_touch_move.forget();
        on_touch_end.forget();
    }
}

#[cfg(target_arch = "wasm32")]
pub use tracking::track_pointer;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pointer_rests_at_center() {
        let state = PointerState::default();
        assert_eq!(state.position(), Vec2::new(0.5, 0.5));
    }

    #[test]
    fn set_then_reset_returns_to_center() {
        let mut state = PointerState::default();
        state.set(0.1, 0.9);
        assert_eq!(state.position(), Vec2::new(0.1, 0.9));
        state.reset();
        assert_eq!(state.position(), Vec2::new(0.5, 0.5));
    }
}
