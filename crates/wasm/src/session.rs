//! Frame bookkeeping shared by the animation callbacks.
//!
//! A [`Session`] pairs a driver with the surface it draws on and the
//! scheduler that wakes it, and remembers the one frame it has asked for so
//! shutdown can cancel it. Nothing here touches the DOM directly.

use std::cell::RefCell;
use std::rc::Weak;

use particle_field_core::{Driver, FrameScheduler, RasterSurface};

pub struct Session<F: FrameScheduler, S> {
    driver: Driver,
    surface: S,
    frames: F,
    pending: Option<F::Handle>,
}

impl<F: FrameScheduler, S: RasterSurface> Session<F, S> {
    pub fn new(driver: Driver, surface: S, frames: F) -> Self {
        Self {
            driver,
            surface,
            frames,
            pending: None,
        }
    }

    /// Requests the first frame. Returns `false` once shut down.
    pub fn start(&mut self) -> bool {
        if !self.driver.is_running() {
            return false;
        }
        if self.pending.is_none() {
            self.pending = self.driver.schedule(&mut self.frames);
        }
        true
    }

    /// Handles a delivered frame: tick, then ask for the next one.
    pub fn frame(&mut self) {
        self.pending = None;
        if self.driver.tick(&mut self.surface) {
            self.pending = self.driver.schedule(&mut self.frames);
        }
    }

    /// Stops the driver and cancels the outstanding frame, if any.
    pub fn shutdown(&mut self) {
        self.driver.stop();
        if let Some(handle) = self.pending.take() {
            self.frames.cancel_frame(handle);
        }
    }

    pub fn is_running(&self) -> bool {
        self.driver.is_running()
    }

    pub fn driver(&self) -> &Driver {
        &self.driver
    }

    pub fn driver_mut(&mut self) -> &mut Driver {
        &mut self.driver
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }
}

/// Body of the frame callback. The callback only holds a weak handle, so a
/// freed animation stops here instead of being kept alive by its own loop.
///
/// Returns whether the session was still alive.
pub fn run_frame<F, S>(session: &Weak<RefCell<Session<F, S>>>) -> bool
where
    F: FrameScheduler,
    S: RasterSurface,
{
    let Some(session) = session.upgrade() else {
        return false;
    };
    session.borrow_mut().frame();
    true
}
