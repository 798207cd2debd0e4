//! `requestAnimationFrame` as a [`FrameScheduler`].

use std::cell::RefCell;
use std::rc::Rc;

use particle_field_core::FrameScheduler;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys::Window;

/// Slot holding the frame callback; empty once the animation is torn down.
pub type FrameCallback = Rc<RefCell<Option<Closure<dyn FnMut()>>>>;

pub struct AnimationFrames {
    window: Window,
    callback: FrameCallback,
}

impl AnimationFrames {
    pub fn new(window: Window, callback: FrameCallback) -> Self {
        Self { window, callback }
    }
}

impl FrameScheduler for AnimationFrames {
    /// `None` when no callback is installed or the browser refused.
    type Handle = Option<i32>;

    fn request_frame(&mut self) -> Option<i32> {
        let slot = self.callback.borrow();
        let callback = slot.as_ref()?;
        self.window
            .request_animation_frame(callback.as_ref().unchecked_ref())
            .ok()
    }

    fn cancel_frame(&mut self, handle: Option<i32>) {
        if let Some(id) = handle {
            // Cancelling an id that already fired is a no-op in browsers.
            let _ = self.window.cancel_animation_frame(id);
        }
    }
}
