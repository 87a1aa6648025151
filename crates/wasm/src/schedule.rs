//! Frame scheduling over `requestAnimationFrame`, with explicit
//! cancellation.
//!
//! One [`spawn`] per animated surface. The returned handle cancels both the
//! queued frame and any frame already in flight; after [`AnimationHandle::cancel`]
//! no further ticks run, and the callback closure is dropped from within
//! its final invocation.

use shaderfolio_core::Clock;
use std::cell::{Cell, RefCell};
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};

/// A [`Clock`] over `performance.now()`.
pub struct PerformanceClock {
    performance: web_sys::Performance,
}

impl PerformanceClock {
    /// Grabs the window's `performance` object.
    ///
    /// # Errors
    ///
    /// Fails if there is no window or no performance timer.
    pub fn new() -> Result<Self, JsValue> {
        let window = web_sys::window().ok_or("no window")?;
        let performance = window.performance().ok_or("no performance timer")?;
        Ok(Self { performance })
    }
}

impl Clock for PerformanceClock {
    fn now_ms(&self) -> f64 {
        self.performance.now()
    }
}

type FrameCallback = Rc<RefCell<Option<Closure<dyn FnMut()>>>>;

/// Cancellation handle for a spawned animation loop.
#[derive(Clone)]
pub struct AnimationHandle {
    cancelled: Rc<Cell<bool>>,
    pending: Rc<Cell<Option<i32>>>,
}

impl AnimationHandle {
    /// Stops the loop: cancels the queued frame and marks any in-flight
    /// callback as dead. Idempotent.
    pub fn cancel(&self) {
        self.cancelled.set(true);
        if let Some(id) = self.pending.take() {
            if let Some(window) = web_sys::window() {
                let _ = window.cancel_animation_frame(id);
            }
        }
    }

    /// Whether the loop has been cancelled.
    pub fn is_cancelled(&self) -> bool {
        self.cancelled.get()
    }
}

/// Starts a per-frame loop calling `tick` once per display refresh.
///
/// The closure re-registers itself after each tick until the handle is
/// cancelled.
///
/// # Errors
///
/// Fails if the first `requestAnimationFrame` registration fails.
pub fn spawn(mut tick: impl FnMut() + 'static) -> Result<AnimationHandle, JsValue> {
    let cancelled = Rc::new(Cell::new(false));
    let pending: Rc<Cell<Option<i32>>> = Rc::new(Cell::new(None));
    let callback: FrameCallback = Rc::new(RefCell::new(None));

    let frame = {
        let cancelled = cancelled.clone();
        let pending = pending.clone();
        let callback = callback.clone();
        Closure::wrap(Box::new(move || {
            if cancelled.get() {
                // Final invocation: drop the closure so nothing re-queues.
                callback.borrow_mut().take();
                return;
            }

            tick();

            match request_frame(&callback) {
                Ok(id) => pending.set(Some(id)),
                Err(e) => log::error!("failed to schedule next frame: {e:?}"),
            }
        }) as Box<dyn FnMut()>)
    };

    *callback.borrow_mut() = Some(frame);
    let id = request_frame(&callback)?;
    pending.set(Some(id));

    Ok(AnimationHandle { cancelled, pending })
}

fn request_frame(callback: &FrameCallback) -> Result<i32, JsValue> {
    let window = web_sys::window().ok_or("no window")?;
    let borrow = callback.borrow();
    let closure = borrow.as_ref().ok_or("frame callback already dropped")?;
    window.request_animation_frame(closure.as_ref().unchecked_ref())
}
